//! Config command implementation.
//!
//! Manages CLI preferences stored as JSON under the user config directory.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Precision for decimal output
    DecimalPrecision,
    /// Whether to use colors
    UseColors,
    /// Quote file used when `--quotes` is omitted
    QuotesFile,
}

impl ConfigKey {
    fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "use_colors" | "colors" => Some(Self::UseColors),
            "quotes_file" | "quotes" => Some(Self::QuotesFile),
            _ => None,
        }
    }

    fn parse(s: &str) -> CliResult<Self> {
        Self::from_name(s).ok_or_else(|| CliError::Config(format!("Unknown configuration key: {s}")))
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DecimalPrecision => "decimal_precision",
            Self::UseColors => "use_colors",
            Self::QuotesFile => "quotes_file",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DecimalPrecision => "Number of decimal places for table output (0-8)",
            Self::UseColors => "Enable colored output (true, false)",
            Self::QuotesFile => "JSON/YAML quote file used when --quotes is omitted",
        }
    }

    fn default_value(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DecimalPrecision => "2",
            Self::UseColors => "true",
            Self::QuotesFile => "",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DecimalPrecision,
            Self::UseColors,
            Self::QuotesFile,
        ]
    }
}

/// Simple config storage.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl Config {
    fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| CliError::Serialization(format!("{}: {e}", path.display())))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn value(&self, key: ConfigKey) -> &str {
        self.values
            .get(key.as_str())
            .map_or(key.default_value(), String::as_str)
    }

    fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Resolved preferences used by the other commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Output format when `--format` is omitted.
    pub format: OutputFormat,
    /// Decimal places for table output.
    pub precision: u32,
    /// Whether colored output is enabled.
    pub use_colors: bool,
    /// Quote file used when `--quotes` is omitted.
    pub quotes_file: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 2,
            use_colors: true,
            quotes_file: None,
        }
    }
}

impl Preferences {
    /// Loads preferences from the config file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_config(&Config::load(path)?)?)
    }

    fn from_config(config: &Config) -> CliResult<Self> {
        let quotes_file = config.value(ConfigKey::QuotesFile).trim();
        Ok(Self {
            format: parse_format(config.value(ConfigKey::DefaultFormat))?,
            precision: parse_precision(config.value(ConfigKey::DecimalPrecision))?,
            use_colors: parse_bool(config.value(ConfigKey::UseColors))?,
            quotes_file: (!quotes_file.is_empty()).then(|| PathBuf::from(quotes_file)),
        })
    }
}

/// Resolves the config file path.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".to_string()))?;
    Ok(home.join("folio").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat, path: &Path) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(format, path),
        ConfigCommand::Get(get_args) => execute_get(get_args, format, path),
        ConfigCommand::Set(set_args) => execute_set(set_args, path),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, path),
        ConfigCommand::Path => execute_path(path),
    }
}

/// Show current configuration.
fn execute_show(format: OutputFormat, path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), config.value(*key)))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: HashMap<&str, &str> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), config.value(*key)))
                .collect();
            crate::output::print_json(&output)?;
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for kv in &results {
                println!("{}={}", kv.key, kv.value);
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, format: OutputFormat, path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let key = ConfigKey::parse(&args.key)?;
    let value = config.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            crate::output::print_json(&output)?;
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs, path: &Path) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;
    validate_config_value(key, &args.value)?;

    let mut config = Config::load(path)?;
    config.set(key, args.value.clone());
    config.save(path)?;

    print_success(&format!("Set {} = {}", key.as_str(), args.value));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {:?})", key.description(), key.default_value()),
            )
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            crate::output::print_json(&output)?;
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs, path: &Path) -> Result<()> {
    let mut config = Config::load(path)?;

    if args.all {
        config.clear();
        config.save(path)?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::parse(&key_str)?;
        config.remove(key);
        config.save(path)?;
        print_success(&format!(
            "Reset {} to default ({:?})",
            key.as_str(),
            key.default_value()
        ));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(path: &Path) -> Result<()> {
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

fn parse_format(value: &str) -> CliResult<OutputFormat> {
    OutputFormat::from_name(value).ok_or_else(|| {
        CliError::Config(format!(
            "Invalid format: {value}. Use table, json, csv, or minimal."
        ))
    })
}

fn parse_precision(value: &str) -> CliResult<u32> {
    let precision: u32 = value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid precision: {value}. Must be a number.")))?;
    if precision > 8 {
        return Err(CliError::Config(format!(
            "Invalid precision: {precision}. Must be between 0 and 8."
        )));
    }
    Ok(precision)
}

fn parse_bool(value: &str) -> CliResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CliError::Config(format!(
            "Invalid boolean: {value}. Use true or false."
        ))),
    }
}

/// Validate a configuration value.
fn validate_config_value(key: ConfigKey, value: &str) -> CliResult<()> {
    match key {
        ConfigKey::DefaultFormat => parse_format(value).map(|_| ()),
        ConfigKey::DecimalPrecision => parse_precision(value).map(|_| ()),
        ConfigKey::UseColors => parse_bool(value).map(|_| ()),
        ConfigKey::QuotesFile => {
            let path = Path::new(value.trim());
            if value.trim().is_empty() || path.is_file() {
                Ok(())
            } else {
                Err(CliError::Config(format!("Quote file not found: {value}")))
            }
        }
    }
}
