//! Batch conversion command for multiple rate sheets.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use ratex_core::models::config::RatexConfig;
use ratex_core::{extract_document, output_path, write_sheet, DocumentKind, RateSheet};

use super::convert::ConvertSettings;
use super::{load_config, FormatArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input documents
    #[arg(required = true)]
    input: String,

    /// Airline name used for every document
    #[arg(short, long)]
    airline: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Also write a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for one input document.
struct ConvertResult {
    path: PathBuf,
    output: Option<PathBuf>,
    rows: usize,
    skipped: usize,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let settings = ConvertSettings::resolve(
        args.airline.clone(),
        args.output_dir.clone(),
        args.format,
        &config,
    );

    let files = matching_documents(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!("{} Found {} files to convert", style("ℹ").blue(), files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    let mut written = HashSet::new();

    for path in files {
        let file_start = Instant::now();
        let result = convert_one(&path, &settings, &config, &mut written);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok((sheet, output)) => results.push(ConvertResult {
                path,
                output: Some(output),
                rows: sheet.records.len(),
                skipped: sheet.skipped.len(),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if !args.continue_on_error {
                    error!("Failed to convert {}: {}", path.display(), error_msg);
                    anyhow::bail!("Conversion failed: {}", error_msg);
                }
                warn!("Failed to convert {}: {}", path.display(), error_msg);
                results.push(ConvertResult {
                    path,
                    output: None,
                    rows: 0,
                    skipped: 0,
                    error: Some(error_msg),
                    processing_time_ms,
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if args.summary {
        let summary_path = settings.output_dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let (succeeded, failed): (Vec<_>, Vec<_>) = results.iter().partition(|r| r.error.is_none());

    println!();
    println!(
        "{} Converted {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(succeeded.len()).green(),
        style(failed.len()).red()
    );
    for result in &succeeded {
        if let Some(output) = &result.output {
            println!("   {}", output.display());
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Convert one document of the run.
///
/// Documents sharing a validity window map to the same output name; a later
/// one gets its input file stem appended instead of replacing the earlier
/// output.
fn convert_one(
    path: &Path,
    settings: &ConvertSettings,
    config: &RatexConfig,
    written: &mut HashSet<PathBuf>,
) -> anyhow::Result<(RateSheet, PathBuf)> {
    let mut sheet = extract_document(path, &settings.airline, config)?;

    let target = output_path(&settings.output_dir, &sheet.identifier, settings.format);
    if written.contains(&target) {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?;
        sheet.identifier = sheet.identifier.with_suffix(stem);

        let renamed = output_path(&settings.output_dir, &sheet.identifier, settings.format);
        if written.contains(&renamed) {
            anyhow::bail!("Output {} already written in this run", renamed.display());
        }
        warn!(
            "{} already written in this run, writing {} to {}",
            target.display(),
            path.display(),
            renamed.display()
        );
    }

    let output = write_sheet(&sheet, &settings.output_dir, settings.format, config)?;
    written.insert(output.clone());
    Ok((sheet, output))
}

/// Expand a glob, keeping only supported document types.
fn matching_documents(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| DocumentKind::from_path(p).is_ok())
        .collect();
    files.sort();
    Ok(files)
}

fn write_summary(path: &Path, results: &[ConvertResult]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "rows",
        "skipped_rows",
        "output",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let status = if result.error.is_none() { "success" } else { "error" };
        let output = result
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let rows = result.rows.to_string();
        let skipped = result.skipped.to_string();
        let time_ms = result.processing_time_ms.to_string();

        wtr.write_record([
            filename,
            status,
            rows.as_str(),
            skipped.as_str(),
            output.as_str(),
            time_ms.as_str(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
