//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use ratex_core::models::config::RatexConfig;

use super::{config_file, load_config};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "output.default_airline")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a plain string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = load_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommand::Init(init_args) => init_config(init_args, config_path),
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(load_config(config_path)?)?;
            println!("{}", serde_json::to_string_pretty(lookup(&json, &key)?)?);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set_config(&key, &value, config_path),
        ConfigCommand::Path => show_path(config_path),
    }
}

fn init_config(args: InitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| config_file(config_path));

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    RatexConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn set_config(key: &str, value: &str, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_file(config_path);
    let config = if path.exists() {
        RatexConfig::from_file(&path)?
    } else {
        RatexConfig::default()
    };

    let mut json = serde_json::to_value(&config)?;
    let parsed = parse_value(value);
    assign(&mut json, key, parsed.clone())?;

    // Round-trip through the typed config so bad values are rejected
    let config: RatexConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(&path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );

    Ok(())
}

fn show_path(config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_file(config_path);

    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'ratex config init' to create a configuration file.");
    }

    Ok(())
}

/// Values that are not valid JSON are taken as plain strings.
fn parse_value(value: &str) -> Value {
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

/// Find a dotted key in a JSON tree.
fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

/// Replace the value at an existing dotted key.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let (parent, last) = match key.rsplit_once('.') {
        Some((parent, last)) => (Some(parent), last),
        None => (None, key),
    };

    let mut current = json;
    if let Some(parent) = parent {
        for part in parent.split('.') {
            current = current
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    let object = current
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path: {}", key))?;
    if !object.contains_key(last) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    object.insert(last.to_string(), value);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratex_core::OutputFormat;

    #[test]
    fn test_lookup() {
        let json = serde_json::to_value(RatexConfig::default()).unwrap();

        assert_eq!(lookup(&json, "output.default_airline").unwrap(), "Turkish");
        assert_eq!(lookup(&json, "extraction.min_cells").unwrap(), 4);
        assert!(lookup(&json, "output.nope").is_err());
    }

    #[test]
    fn test_assign_and_round_trip() {
        let mut json = serde_json::to_value(RatexConfig::default()).unwrap();

        assign(&mut json, "output.format", parse_value("csv")).unwrap();
        assign(&mut json, "extraction.min_cells", parse_value("5")).unwrap();

        let config: RatexConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.extraction.min_cells, 5);
    }

    #[test]
    fn test_assign_unknown_key() {
        let mut json = serde_json::to_value(RatexConfig::default()).unwrap();

        assert!(assign(&mut json, "output.typo", Value::Bool(true)).is_err());
        assert!(assign(&mut json, "missing.key", Value::Bool(true)).is_err());
        assert!(assign(&mut json, "output.format.deep", Value::Bool(true)).is_err());
    }
}
