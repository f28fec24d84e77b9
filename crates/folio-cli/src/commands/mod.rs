//! CLI command implementations.

pub mod config;
pub mod export;
pub mod screen;
pub mod search;
pub mod session;
pub mod universe;
pub mod value;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use screen::ScreenArgs;
pub use search::SearchArgs;
pub use session::SessionArgs;
pub use universe::UniverseArgs;
pub use value::ValueArgs;

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use folio_core::Date;
use folio_market::{QuoteBook, StockUniverse};
use folio_portfolio::{Ledger, NewLot, ValuationConfig};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};
use config::Preferences;

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.trim().to_string()))
}

/// Parses an optional as-of date, defaulting to today.
pub fn parse_as_of(s: Option<&str>) -> CliResult<Date> {
    s.map_or_else(|| Ok(Date::today()), parse_date)
}

/// Parses a decimal number.
pub fn parse_decimal(s: &str) -> CliResult<Decimal> {
    Decimal::from_str(s.trim()).map_err(|_| CliError::InvalidNumber(s.trim().to_string()))
}

/// Supported input document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Json,
    Yaml,
}

impl DocumentKind {
    fn from_path(path: &Path) -> CliResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(CliError::UnsupportedFile(path.display().to_string())),
        }
    }
}

/// Reads a JSON or YAML document, chosen by file extension.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let kind = DocumentKind::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let parsed: T = match kind {
        DocumentKind::Json => serde_json::from_str(&content)
            .map_err(|e| CliError::Serialization(format!("{}: {e}", path.display())))?,
        DocumentKind::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| CliError::Serialization(format!("{}: {e}", path.display())))?,
    };
    Ok(parsed)
}

/// Loads lot requests from a JSON/YAML list.
pub fn load_lots(path: &Path) -> Result<Vec<NewLot>> {
    let lots: Vec<NewLot> = read_document(path)?;
    debug!(count = lots.len(), path = %path.display(), "loaded lot file");
    Ok(lots)
}

/// Loads a quote book from `explicit`, the saved `quotes_file`, or the
/// reference universe, in that order.
pub fn load_quotes(explicit: Option<&Path>, prefs: &Preferences) -> Result<QuoteBook> {
    match explicit.or(prefs.quotes_file.as_deref()) {
        Some(path) => {
            let quotes: QuoteBook = read_document(path)?;
            info!(count = quotes.len(), path = %path.display(), "loaded quotes");
            Ok(quotes)
        }
        None => Ok(QuoteBook::from_universe(&StockUniverse::reference())?),
    }
}

/// Loads engine settings, or the defaults when no file is given.
pub fn load_valuation_config(path: Option<&Path>) -> Result<ValuationConfig> {
    let config = match path {
        Some(path) => read_document::<ValuationConfig>(path)?,
        None => ValuationConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Builds a reference-universe ledger from lot requests.
///
/// Stops at the first invalid lot, naming its position in the file.
pub fn build_ledger(lots: Vec<NewLot>, as_of: Date) -> Result<Ledger> {
    let mut ledger = Ledger::with_reference_universe();
    for (i, lot) in lots.into_iter().enumerate() {
        let symbol = lot.symbol.clone();
        ledger
            .add_lot_as_of(lot, as_of)
            .with_context(|| format!("Lot {} ({symbol})", i + 1))?;
    }
    Ok(ledger)
}
