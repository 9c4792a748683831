//! Triage CLI
//!
//! Parses and prioritizes alerts in a JSON file:
//!
//! ```text
//! triage alerts.json --severity critical --start 2025-06-06T00:00:00Z
//! ```
//!
//! Prints each component group with its alerts' computed priorities. On any
//! top-level failure prints a single error line and exits non-zero.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage::{process_document, AlertFilter, ParsePolicy};

#[derive(Parser)]
#[command(name = "triage", version, about = "Parse and prioritize alerts in a JSON file")]
struct Cli {
    /// Path to the JSON file
    file: PathBuf,

    /// Filter by severity level (e.g. critical)
    #[arg(long)]
    severity: Option<String>,

    /// Filter by affected service
    #[arg(long)]
    service: Option<String>,

    /// Filter by time range: start time (e.g. 2025-06-06T00:00:00Z)
    #[arg(long)]
    start: Option<String>,

    /// Filter by time range: end time (e.g. 2025-06-06T00:00:00Z)
    #[arg(long)]
    end: Option<String>,

    /// Abort on unparseable record timestamps instead of skipping them
    #[arg(long)]
    strict: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triage=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&cli.file)?;
    let doc: serde_json::Value = serde_json::from_str(&raw)?;

    let filter = AlertFilter::from_args(
        cli.severity.as_deref(),
        cli.service.as_deref(),
        cli.start.as_deref(),
        cli.end.as_deref(),
    )?;
    let policy = if cli.strict {
        ParsePolicy::Abort
    } else {
        ParsePolicy::Skip
    };

    let report = process_document(doc, &filter, policy)?;
    print!("{}", report.render_text());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(file: PathBuf) -> Cli {
        Cli {
            file,
            severity: None,
            service: None,
            start: None,
            end: None,
            strict: false,
        }
    }

    #[test]
    fn run_processes_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"alerts":[{{"id":"a1","timestamp":"2025-06-06T00:00:00Z","service":"s1","component":"c1","severity":"critical","metric":"cpu","value":90,"threshold":80,"description":"high cpu"}}]}}"#
        )
        .unwrap();

        assert!(run(&cli(file.path().to_path_buf())).is_ok());
    }

    #[test]
    fn run_fails_on_missing_file() {
        assert!(run(&cli(PathBuf::from("/nonexistent/alerts.json"))).is_err());
    }

    #[test]
    fn run_fails_on_bad_envelope() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"events":[]}}"#).unwrap();

        let err = run(&cli(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("alerts"));
    }
}
