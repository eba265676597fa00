//! # Structure Walker
//!
//! Turns a [`DataNode`] tree (or a list of prose [`Section`]s) into a flat,
//! ordered list of [`Instruction`]s. The walker does no measuring and no
//! placement; the layout engine consumes its output. That split lets the
//! traversal rules be tested on plain instruction lists.
//!
//! Rules:
//! - members are visited in input order;
//! - excluded keys are dropped at every depth, including inside flattened
//!   array elements;
//! - `null` and blank strings are dropped, `0` and `false` are kept;
//! - objects become headings followed by their members one level deeper;
//! - arrays become a sub-heading followed by one list item per element.
//!   Object elements are summarised on one line from their scalar members
//!   and are never walked further.

use std::collections::HashSet;

use crate::model::{DataNode, Scalar, Section};
use crate::text::format_label;

/// Marker emitted in place of content nested deeper than the depth limit.
pub const TRUNCATED_MARKER: &str = "\u{2026}(truncated)";

/// Heading weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Top-level heading with a rule beneath it.
    Section,
    /// Plain bold label for nested objects and lists.
    SubSection,
}

/// One drawing step, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Heading {
        text: String,
        level: HeadingLevel,
        depth: usize,
    },
    KeyValue {
        label: String,
        value: String,
        depth: usize,
    },
    /// A bulleted line. The bullet is added at layout time.
    ListItem { text: String, depth: usize },
    /// Free prose, wrapped as-is.
    Paragraph { text: String, depth: usize },
}

impl Instruction {
    pub fn depth(&self) -> usize {
        match self {
            Instruction::Heading { depth, .. }
            | Instruction::KeyValue { depth, .. }
            | Instruction::ListItem { depth, .. }
            | Instruction::Paragraph { depth, .. } => *depth,
        }
    }
}

/// Walks data trees into instructions.
pub struct StructureWalker<'a> {
    excluded: &'a HashSet<String>,
    max_depth: usize,
}

impl<'a> StructureWalker<'a> {
    pub fn new(excluded: &'a HashSet<String>, max_depth: usize) -> Self {
        Self { excluded, max_depth }
    }

    /// Walk a data tree.
    ///
    /// A top-level object contributes its members directly; any other root
    /// is treated as the single member of an unnamed object.
    pub fn walk(&self, root: &DataNode) -> Vec<Instruction> {
        let mut out = Vec::new();
        match root {
            DataNode::Object(members) => self.walk_members(members, 0, &mut out),
            DataNode::Array(items) => self.walk_list(items, 0, &mut out),
            DataNode::Scalar(s) if !s.is_empty() => out.push(Instruction::Paragraph {
                text: s.display(),
                depth: 0,
            }),
            DataNode::Scalar(_) => {}
        }
        out
    }

    fn walk_members(&self, members: &[(String, DataNode)], depth: usize, out: &mut Vec<Instruction>) {
        if depth > self.max_depth {
            log::debug!("object nesting exceeds {} levels, truncating", self.max_depth);
            out.push(Instruction::Paragraph {
                text: TRUNCATED_MARKER.to_string(),
                depth,
            });
            return;
        }

        for (key, value) in members {
            if self.excluded.contains(key) || value.is_empty_scalar() {
                continue;
            }
            let label = format_label(key);
            match value {
                DataNode::Object(children) => {
                    let level = if depth == 0 {
                        HeadingLevel::Section
                    } else {
                        HeadingLevel::SubSection
                    };
                    out.push(Instruction::Heading {
                        text: label,
                        level,
                        depth,
                    });
                    self.walk_members(children, depth + 1, out);
                }
                DataNode::Array(items) => {
                    out.push(Instruction::Heading {
                        text: label,
                        level: HeadingLevel::SubSection,
                        depth,
                    });
                    self.walk_list(items, depth, out);
                }
                DataNode::Scalar(s) => out.push(Instruction::KeyValue {
                    label,
                    value: s.display(),
                    depth,
                }),
            }
        }
    }

    fn walk_list(&self, items: &[DataNode], depth: usize, out: &mut Vec<Instruction>) {
        for item in items {
            let text = match item {
                DataNode::Scalar(s) if s.is_empty() => continue,
                DataNode::Scalar(s) => s.display(),
                DataNode::Object(members) => self.summarize(
                    members
                        .iter()
                        .filter(|(key, _)| !self.excluded.contains(key))
                        .map(|(_, v)| v),
                ),
                DataNode::Array(nested) => self.summarize(nested.iter()),
            };
            if !text.is_empty() {
                out.push(Instruction::ListItem { text, depth });
            }
        }
    }

    /// Comma-join the non-empty scalars, ignoring nested containers.
    fn summarize<'n>(&self, values: impl Iterator<Item = &'n DataNode>) -> String {
        values
            .filter_map(|v| match v {
                DataNode::Scalar(s) if !s.is_empty() => Some(s.display()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Instructions for a list of prose sections: each becomes a section heading
/// followed by its content as a paragraph. Blank headings and blank content
/// are skipped independently.
pub fn sections_to_instructions(sections: &[Section]) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(sections.len() * 2);
    for section in sections {
        let heading = section.heading.trim();
        if !heading.is_empty() {
            out.push(Instruction::Heading {
                text: heading.to_string(),
                level: HeadingLevel::Section,
                depth: 0,
            });
        }
        if !Scalar::Text(section.content.clone()).is_empty() {
            out.push(Instruction::Paragraph {
                text: section.content.clone(),
                depth: 0,
            });
        }
    }
    out
}
