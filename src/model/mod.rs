//! # Report Input Model
//!
//! The two shapes a report can be rendered from:
//!
//! - a nested data tree ([`DataNode`]): objects become sections, arrays
//!   become bulleted lists, scalars become labelled fields;
//! - a list of pre-written [`Section`]s whose prose is rendered verbatim.
//!
//! [`DataNode`] is a closed tagged union, so the walker matches every shape
//! exhaustively. Object members keep the order they had in the input.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Scalar {
    /// `null` and blank strings carry nothing worth drawing. `0` and `false`
    /// are meaningful values and are not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Text(s) => s.trim().is_empty(),
            Scalar::Bool(_) | Scalar::Number(_) => false,
        }
    }

    /// The display form of the value.
    pub fn display(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => format_number(n),
            Scalar::Text(s) => s.clone(),
        }
    }
}

/// Whole floats print without a trailing `.0`; everything else uses the
/// shortest round-tripping form.
fn format_number(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{:.0}", f);
            }
        }
    }
    n.to_string()
}

/// A node of the data tree being rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum DataNode {
    Scalar(Scalar),
    /// Members in input order.
    Object(Vec<(String, DataNode)>),
    Array(Vec<DataNode>),
}

impl DataNode {
    pub fn text(s: impl Into<String>) -> Self {
        DataNode::Scalar(Scalar::Text(s.into()))
    }

    pub fn object<K: Into<String>>(members: impl IntoIterator<Item = (K, DataNode)>) -> Self {
        DataNode::Object(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// True for scalars that should be omitted (see [`Scalar::is_empty`]).
    pub fn is_empty_scalar(&self) -> bool {
        matches!(self, DataNode::Scalar(s) if s.is_empty())
    }
}

impl From<Value> for DataNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DataNode::Scalar(Scalar::Null),
            Value::Bool(b) => DataNode::Scalar(Scalar::Bool(b)),
            Value::Number(n) => DataNode::Scalar(Scalar::Number(n)),
            Value::String(s) => DataNode::Scalar(Scalar::Text(s)),
            Value::Array(items) => DataNode::Array(items.into_iter().map(DataNode::from).collect()),
            Value::Object(map) => {
                DataNode::Object(map.into_iter().map(|(k, v)| (k, DataNode::from(v))).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for DataNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(DataNode::from)
    }
}

/// A pre-composed prose section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    #[serde(default)]
    pub content: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
        }
    }
}

/// What a report is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportInput {
    /// A nested data object, flattened into labelled fields.
    Data(DataNode),
    /// Headings with prose rendered verbatim.
    Sections(Vec<Section>),
}

impl ReportInput {
    /// Classify a parsed JSON value.
    ///
    /// A non-empty array whose every element is an object with a string
    /// `heading` member is a section list; anything else is data.
    pub fn from_value(value: Value) -> Self {
        if is_section_list(&value) {
            if let Ok(sections) = serde_json::from_value::<Vec<Section>>(value.clone()) {
                return ReportInput::Sections(sections);
            }
        }
        ReportInput::Data(DataNode::from(value))
    }
}

fn is_section_list(value: &Value) -> bool {
    match value {
        Value::Array(items) if !items.is_empty() => items.iter().all(|item| {
            item.as_object()
                .and_then(|obj| obj.get("heading"))
                .is_some_and(Value::is_string)
        }),
        _ => false,
    }
}

impl From<DataNode> for ReportInput {
    fn from(node: DataNode) -> Self {
        ReportInput::Data(node)
    }
}

impl From<Vec<Section>> for ReportInput {
    fn from(sections: Vec<Section>) -> Self {
        ReportInput::Sections(sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_keeps_input_order() {
        let node = DataNode::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let DataNode::Object(members) = node else {
            panic!("expected object");
        };
        let keys: Vec<&str> = members.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_scalar_emptiness() {
        assert!(Scalar::Null.is_empty());
        assert!(Scalar::Text(String::new()).is_empty());
        assert!(Scalar::Text("  ".into()).is_empty());
        assert!(!Scalar::Number(0.into()).is_empty());
        assert!(!Scalar::Bool(false).is_empty());
    }

    #[test]
    fn test_number_display() {
        let node = |v: Value| match DataNode::from(v) {
            DataNode::Scalar(s) => s.display(),
            _ => unreachable!(),
        };
        assert_eq!(node(json!(12)), "12");
        assert_eq!(node(json!(12.0)), "12");
        assert_eq!(node(json!(12.5)), "12.5");
        assert_eq!(node(json!(-3)), "-3");
        assert_eq!(node(json!(true)), "true");
    }

    #[test]
    fn test_section_list_detection() {
        let sections = ReportInput::from_value(json!([
            {"heading": "Summary", "content": "Text"},
            {"heading": "Risks"}
        ]));
        assert_eq!(
            sections,
            ReportInput::Sections(vec![Section::new("Summary", "Text"), Section::new("Risks", "")])
        );

        let data = ReportInput::from_value(json!([{"heading": "x"}, {"other": 1}]));
        assert!(matches!(data, ReportInput::Data(DataNode::Array(_))));

        let empty = ReportInput::from_value(json!([]));
        assert!(matches!(empty, ReportInput::Data(_)));
    }

    #[test]
    fn test_data_node_deserializes() {
        let node: DataNode = serde_json::from_str(r#"{"a": [1, "two"]}"#).unwrap();
        assert_eq!(
            node,
            DataNode::object([(
                "a",
                DataNode::Array(vec![
                    DataNode::Scalar(Scalar::Number(1.into())),
                    DataNode::text("two"),
                ])
            )])
        );
    }
}
