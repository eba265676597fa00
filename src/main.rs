//! # Dossier CLI
//!
//! Usage:
//!   dossier render plan.json --title "Business Plan" -o out/
//!   echo '{ ... }' | dossier render --title "Business Plan"
//!   dossier render --store-dir data/ --key plan --title "Business Plan"
//!   dossier example > plan.json

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

use dossier::store::JsonStore;
use dossier::{DossierError, ReportConfig, ReportInput};

#[derive(Parser)]
#[command(name = "dossier", version, about = "Render report data to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a JSON document to PDF.
    Render {
        /// Input JSON file. Reads stdin when omitted and no --key is given.
        input: Option<PathBuf>,

        /// Report title, shown in the header and used for the file name.
        #[arg(short, long, default_value = "Report")]
        title: String,

        /// Directory the PDF is written into.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Report configuration file (JSON).
        #[arg(short, long, env = "DOSSIER_CONFIG")]
        config: Option<PathBuf>,

        /// Directory of the JSON store used by --key and --save-as.
        #[arg(long, env = "DOSSIER_STORE_DIR", default_value = ".dossier")]
        store_dir: PathBuf,

        /// Render the value stored under this key instead of reading input.
        #[arg(long, conflicts_with = "input")]
        key: Option<String>,

        /// Also store the input under this key.
        #[arg(long)]
        save_as: Option<String>,
    },
    /// Print an example input document.
    Example,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Example => {
            println!("{}", example_json());
            ExitCode::SUCCESS
        }
        Command::Render {
            input,
            title,
            out_dir,
            config,
            store_dir,
            key,
            save_as,
        } => match run_render(input, &title, &out_dir, config, store_dir, key, save_as) {
            Ok(path) => {
                eprintln!("✓ Written {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("✗ {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn run_render(
    input: Option<PathBuf>,
    title: &str,
    out_dir: &Path,
    config: Option<PathBuf>,
    store_dir: PathBuf,
    key: Option<String>,
    save_as: Option<String>,
) -> Result<PathBuf, DossierError> {
    let config = match config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    let store = JsonStore::open(store_dir);

    let value: Value = match key {
        Some(key) => match store.load(&key, Value::Null) {
            Value::Null => {
                return Err(DossierError::MissingInput(format!(
                    "nothing stored under {:?} in {}",
                    key,
                    store.dir().display()
                )))
            }
            value => value,
        },
        None => serde_json::from_str(&read_input(input)?)?,
    };

    if let Some(save_key) = save_as {
        if !store.save(&save_key, &value) {
            log::warn!("input was not saved under {:?}", save_key);
        }
    }

    let document = dossier::render(title, ReportInput::from_value(value), &config);
    document.save(out_dir)
}

fn read_input(input: Option<PathBuf>) -> Result<String, DossierError> {
    match input {
        Some(path) => fs::read_to_string(&path).map_err(|e| DossierError::IoError { path, source: e }),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| DossierError::IoError {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            Ok(buf)
        }
    }
}

fn example_json() -> &'static str {
    r##"{
  "id": "plan-0001",
  "projectName": "Harbor View Residences",
  "assetType": "Residential real estate",
  "location": "Lisbon, Portugal",
  "tokenization": {
    "tokenSymbol": "HVR",
    "totalSupply": 1000000,
    "pricePerToken": "10.00 EUR",
    "minimumInvestment": 500,
    "transferRestrictions": true
  },
  "financials": {
    "expectedROI": "8.5%",
    "holdingPeriodYears": 5,
    "distributionSchedule": "Quarterly rental distributions"
  },
  "targetInvestors": ["Accredited investors", "Family offices", "Retail (EU crowdfunding cap)"],
  "milestones": [
    { "id": 1, "phase": "Legal structuring", "quarter": "Q1" },
    { "id": 2, "phase": "Token issuance", "quarter": "Q2" },
    { "id": 3, "phase": "Secondary market listing", "quarter": "Q4" }
  ],
  "executiveSummary": "Harbor View Residences is a 42-unit residential building offered to investors as fractional ownership through a security token. Rental income is distributed quarterly and the token is listed on a regulated secondary market after the lock-up period."
}"##
}
