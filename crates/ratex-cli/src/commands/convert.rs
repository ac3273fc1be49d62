//! Convert command - turn a single rate sheet into a spreadsheet.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use ratex_core::models::config::RatexConfig;
use ratex_core::{extract_document, write_sheet, OutputFormat, RateSheet};

use super::{load_config, FormatArg};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input document (PDF, markdown or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Airline name (default: Turkish)
    #[arg(short, long)]
    airline: Option<String>,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Print the extracted records instead of writing a file
    #[arg(long)]
    dry_run: bool,

    /// List table rows that were skipped
    #[arg(long)]
    show_skipped: bool,
}

/// Airline, output directory and format after applying config defaults.
pub(crate) struct ConvertSettings {
    pub airline: String,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

impl ConvertSettings {
    pub fn resolve(
        airline: Option<String>,
        output_dir: Option<PathBuf>,
        format: Option<FormatArg>,
        config: &RatexConfig,
    ) -> Self {
        Self {
            airline: airline.unwrap_or_else(|| config.output.default_airline.clone()),
            output_dir: output_dir.unwrap_or_else(|| config.output.output_dir.clone()),
            format: format.map(OutputFormat::from).unwrap_or(config.output.format),
        }
    }
}

pub async fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let settings = ConvertSettings::resolve(
        args.airline.clone(),
        args.output_dir.clone(),
        args.format,
        &config,
    );

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Converting rate sheet: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Extracting rates...");
    pb.set_position(30);
    let sheet = extract_document(&args.input, &settings.airline, &config)?;

    if args.dry_run {
        pb.finish_and_clear();
        print!("{}", format_summary(&sheet));
        if args.show_skipped {
            print_skipped(&sheet);
        }
        return Ok(());
    }

    pb.set_message("Writing spreadsheet...");
    pb.set_position(80);
    let path = write_sheet(&sheet, &settings.output_dir, settings.format, &config)?;

    pb.finish_with_message("Done");

    if sheet.is_empty() {
        warn!("No rate rows extracted from {}", args.input.display());
    }
    if args.show_skipped {
        print_skipped(&sheet);
    }

    println!(
        "{} Spreadsheet created at: {}",
        style("✓").green(),
        path.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_skipped(sheet: &RateSheet) {
    if sheet.skipped.is_empty() {
        return;
    }
    eprintln!("{}", style("Skipped rows:").yellow());
    for row in &sheet.skipped {
        eprintln!("  line {}: {} ({})", row.line_number, row.line.trim(), row.reason);
    }
}

/// Plain text summary of an extracted rate sheet.
pub(crate) fn format_summary(sheet: &RateSheet) -> String {
    let mut output = String::new();
    let metadata = &sheet.metadata;

    output.push_str(&format!("Output: {}\n", sheet.identifier));
    output.push_str(&format!("Currency: {}\n", metadata.currency));
    output.push_str(&format!("Commodity: {}\n", metadata.commodity));

    match metadata.validity_dates() {
        Some((from, until)) => {
            let days = (until - from).num_days() + 1;
            output.push_str(&format!(
                "Valid: {} - {} ({} days)\n",
                from.format("%d %b %Y"),
                until.format("%d %b %Y"),
                days
            ));
        }
        None if metadata.has_validity() => {
            output.push_str(&format!(
                "Valid: {} - {}\n",
                metadata.valid_from, metadata.valid_until
            ));
        }
        None => output.push_str("Valid: unknown\n"),
    }

    output.push_str(&format!(
        "\nRates ({} rows, {} skipped):\n",
        sheet.records.len(),
        sheet.skipped.len()
    ));
    for record in &sheet.records {
        let over_100 = record
            .over_100
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "  {} -> {}  min {}  <45 {}  >45 {}  >100 {}\n",
            record.origin,
            record.destination,
            record.min_charge,
            record.under_45,
            record.over_45,
            over_100
        ));
    }

    output
}
