//! datumaro2yolo: convert Datumaro polygon exports into YOLO datasets.
//!
//! A Datumaro export keeps one JSON document per split under `annotations/`
//! and the matching images under `images/<split>/`. The converter mirrors
//! the images into an Ultralytics layout, writes one normalized label file per
//! item and emits a `data.yaml` describing the classes and split locations.
//!
//! # Modules
//!
//! - [`conversion`]: The staged conversion driver and its report
//! - [`datumaro`]: Datumaro document reading and item model
//! - [`labels`]: Coordinate normalization and label file writing
//! - [`images`]: Image copying
//! - [`data_yaml`]: The `data.yaml` summary
//! - [`layout`]: Input and output directory layouts
//! - [`split`]: Split names and their output mapping
//! - [`error`]: Error types for datumaro2yolo operations

pub mod conversion;
pub mod data_yaml;
pub mod datumaro;
pub mod error;
pub mod images;
pub mod labels;
pub mod layout;
pub mod split;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use conversion::{convert, convert_with_report, ConversionReport};
pub use error::{ConvertError, Stage};
pub use split::Split;

/// The datumaro2yolo CLI application.
#[derive(Parser)]
#[command(name = "datumaro2yolo")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a Datumaro dataset into a YOLO dataset.
    Convert(ConvertArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Datumaro dataset root containing annotations/ and images/.
    #[arg(default_value = conversion::DEFAULT_DATASET_DIR)]
    dataset: PathBuf,

    /// Output root for the YOLO dataset.
    #[arg(default_value = conversion::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Report format printed after a successful run ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Run the datumaro2yolo CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            println!("datumaro2yolo {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert Datumaro polygon datasets into YOLO layout.");
            println!();
            println!("Run 'datumaro2yolo --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), ConvertError> {
    // Reject a bad report format before touching the filesystem.
    let json = match args.report.as_str() {
        "text" => false,
        "json" => true,
        other => {
            return Err(ConvertError::UnsupportedReportFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    };

    let report = convert_with_report(&args.dataset, &args.output)?;
    println!("{}", render_report(&report, json)?);

    Ok(())
}

/// Render a conversion report as text or pretty JSON.
fn render_report(report: &ConversionReport, json: bool) -> Result<String, ConvertError> {
    if json {
        serde_json::to_string_pretty(report).map_err(ConvertError::ReportRender)
    } else {
        Ok(report.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_report_json_is_parseable() {
        let mut report = ConversionReport::new("data", "out");
        report.classes = vec!["cat".into()];

        let text = render_report(&report, true).expect("render json");
        let value: serde_json::Value = serde_json::from_str(&text).expect("parse json");
        assert_eq!(value["classes"][0], "cat");
        assert_eq!(value["splits"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn render_report_text_uses_display() {
        let report = ConversionReport::new("data", "out");
        let text = render_report(&report, false).expect("render text");
        assert!(text.starts_with("Converted data -> out"));
    }

    #[test]
    fn render_failure_is_a_cli_stage_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConvertError::ReportRender(source);
        assert_eq!(err.stage(), Stage::Cli);
        assert!(err.to_string().starts_with("Failed to render conversion report"));
    }
}
