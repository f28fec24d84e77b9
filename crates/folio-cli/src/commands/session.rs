//! Session command implementation.
//!
//! An interactive in-memory ledger. Each stdin line is one command; bad
//! lines are reported and skipped, and the ledger is dropped on exit.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use folio_core::Date;
use folio_market::QuoteBook;
use folio_portfolio::{export_csv, value_portfolio, Ledger, Lot, LotId, NewLot, ValuationConfig};
use rust_decimal::Decimal;
use tabled::Tabled;
use tracing::{debug, warn};

use super::config::Preferences;
use super::value::render_snapshot;
use super::{load_quotes, load_valuation_config, parse_as_of, parse_decimal};
use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{format_decimal, format_signed, print_info, render_table};

const HELP: &str = "\
Commands:
  add SYMBOL SHARES PRICE DATE   add a lot (DATE as YYYY-MM-DD)
  remove ID                      remove a lot
  list                           list lots
  value                          value the portfolio
  export                         print the CSV export
  tick SYMBOL PRICE              set a new quoted price
  help                           show this help
  quit                           leave the session";

/// Arguments for the session command.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Quote file (JSON/YAML); defaults to reference quotes
    #[arg(long)]
    pub quotes: Option<PathBuf>,

    /// Fixed valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Engine settings file (JSON/YAML)
    #[arg(long)]
    pub valuation_config: Option<PathBuf>,
}

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Add a lot.
    Add(NewLot),
    /// Remove a lot by id.
    Remove(LotId),
    /// List lots.
    List,
    /// Value the portfolio.
    Value,
    /// Print the CSV export.
    Export,
    /// Apply a price tick.
    Tick {
        /// Symbol to reprice.
        symbol: String,
        /// New price.
        price: Decimal,
    },
    /// Show help.
    Help,
    /// End the session.
    Quit,
}

impl FromStr for SessionCommand {
    type Err = CliError;

    fn from_str(line: &str) -> CliResult<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((name, rest)) = parts.split_first() else {
            return Err(CliError::UnknownCommand(String::new()));
        };

        match (name.to_lowercase().as_str(), rest) {
            ("add", [symbol, shares, price, date]) => {
                let shares: i64 = shares
                    .parse()
                    .map_err(|_| CliError::InvalidNumber((*shares).to_string()))?;
                Ok(Self::Add(NewLot::new(*symbol, shares, parse_decimal(price)?, *date)))
            }
            ("add", _) => Err(CliError::Usage("add SYMBOL SHARES PRICE DATE")),
            ("remove" | "rm", [id]) => id
                .parse()
                .map(Self::Remove)
                .map_err(|_| CliError::InvalidNumber((*id).to_string())),
            ("remove" | "rm", _) => Err(CliError::Usage("remove ID")),
            ("tick", [symbol, price]) => Ok(Self::Tick {
                symbol: (*symbol).to_string(),
                price: parse_decimal(price)?,
            }),
            ("tick", _) => Err(CliError::Usage("tick SYMBOL PRICE")),
            ("list" | "ls", []) => Ok(Self::List),
            ("value", []) => Ok(Self::Value),
            ("export", []) => Ok(Self::Export),
            ("help" | "?", _) => Ok(Self::Help),
            ("quit" | "exit" | "q", _) => Ok(Self::Quit),
            (other, _) => Err(CliError::UnknownCommand(other.to_string())),
        }
    }
}

/// A lot as listed in a session.
#[derive(Debug, Clone, Tabled)]
struct LotRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Shares")]
    shares: u64,
    #[tabled(rename = "Price")]
    purchase_price: String,
    #[tabled(rename = "Date")]
    purchase_date: String,
    #[tabled(rename = "Cost")]
    total_cost: String,
}

impl LotRow {
    fn new(lot: &Lot, precision: u32) -> Self {
        Self {
            id: lot.id().value(),
            symbol: lot.symbol().to_string(),
            shares: lot.shares(),
            purchase_price: format_decimal(lot.purchase_price(), precision),
            purchase_date: lot.purchase_date().to_string(),
            total_cost: format_decimal(lot.total_cost(), precision),
        }
    }
}

/// What a command produced.
enum Reply {
    Text(String),
    Quit,
}

/// Interactive ledger state: the ledger, the live quote book and the clock.
pub struct Session {
    ledger: Ledger,
    quotes: QuoteBook,
    config: ValuationConfig,
    as_of: Option<Date>,
    precision: u32,
    format: OutputFormat,
}

impl Session {
    /// Creates an empty session over the reference universe.
    pub fn new(quotes: QuoteBook, config: ValuationConfig, format: OutputFormat) -> Self {
        Self {
            ledger: Ledger::with_reference_universe(),
            quotes,
            config,
            as_of: None,
            precision: 2,
            format,
        }
    }

    /// Pins the session clock to a fixed date.
    #[must_use]
    pub fn with_as_of(mut self, as_of: Date) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Sets the decimal places used in tables.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Returns the session's ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn today(&self) -> Date {
        self.as_of.unwrap_or_else(Date::today)
    }

    fn apply(&mut self, command: SessionCommand) -> Result<Reply> {
        let text = match command {
            SessionCommand::Add(new_lot) => {
                let as_of = self.today();
                let lot = self.ledger.add_lot_as_of(new_lot, as_of)?;
                format!(
                    "Added lot #{}: {} {} @ {} on {}",
                    lot.id(),
                    lot.shares(),
                    lot.symbol(),
                    format_decimal(lot.purchase_price(), self.precision),
                    lot.purchase_date()
                )
            }
            SessionCommand::Remove(id) => {
                let lot = self.ledger.remove_lot(id)?;
                format!("Removed lot #{}: {} {}", lot.id(), lot.shares(), lot.symbol())
            }
            SessionCommand::List => {
                if self.ledger.is_empty() {
                    "No lots.".to_string()
                } else {
                    let rows: Vec<LotRow> = self
                        .ledger
                        .lots()
                        .iter()
                        .map(|lot| LotRow::new(lot, self.precision))
                        .collect();
                    render_table(&rows)
                }
            }
            SessionCommand::Value => {
                let snapshot =
                    value_portfolio(self.ledger.lots(), &self.quotes, self.today(), &self.config)?;
                if self.format == OutputFormat::Json {
                    serde_json::to_string_pretty(&snapshot)?
                } else {
                    render_snapshot(&snapshot, self.precision)
                }
            }
            SessionCommand::Export => export_csv(
                self.ledger.lots(),
                &self.quotes,
                self.ledger.directory(),
                self.today(),
            )?
            .trim_end()
            .to_string(),
            SessionCommand::Tick { symbol, price } => {
                let mv = self.quotes.reprice(&symbol, price)?;
                format!(
                    "{} {} -> {} ({}, {}%)",
                    symbol.to_uppercase(),
                    format_decimal(mv.previous_price, self.precision),
                    format_decimal(mv.current_price, self.precision),
                    format_signed(mv.change, self.precision),
                    format_signed(mv.change_pct, self.precision)
                )
            }
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }

    /// Runs commands from `input` until `quit` or end of input.
    ///
    /// Failed commands are written as `error: ...` lines and the session
    /// continues; only I/O failures end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W, prompt: bool) -> Result<()> {
        let mut line = String::new();
        loop {
            if prompt {
                write!(out, "folio> ")?;
                out.flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let reply = trimmed
                .parse::<SessionCommand>()
                .map_err(anyhow::Error::from)
                .and_then(|command| {
                    debug!(?command, "session command");
                    self.apply(command)
                });

            match reply {
                Ok(Reply::Text(text)) => writeln!(out, "{text}")?,
                Ok(Reply::Quit) => break,
                Err(e) => {
                    warn!(line = trimmed, error = %e, "session command failed");
                    writeln!(out, "error: {e:#}")?;
                }
            }
            out.flush()?;
        }
        Ok(())
    }
}

/// Execute the session command.
pub fn execute(args: SessionArgs, format: OutputFormat, prefs: &Preferences) -> Result<()> {
    let quotes = load_quotes(args.quotes.as_deref(), prefs)?;
    let config = load_valuation_config(args.valuation_config.as_deref())?;

    let mut session = Session::new(quotes, config, format).with_precision(prefs.precision);
    if args.as_of.is_some() {
        session = session.with_as_of(parse_as_of(args.as_of.as_deref())?);
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        print_info("Folio session. Type 'help' for commands.");
    }
    session.run(stdin.lock(), io::stdout().lock(), interactive)?;
    debug!(lots = session.ledger().len(), "session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_market::StockUniverse;
    use rust_decimal_macros::dec;

    fn session() -> Session {
        let quotes = QuoteBook::from_universe(&StockUniverse::reference()).unwrap();
        Session::new(quotes, ValuationConfig::default(), OutputFormat::Table)
            .with_as_of(Date::from_ymd(2025, 10, 18).unwrap())
    }

    fn run(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "add aapl 10 200.00 2024-09-13".parse::<SessionCommand>().unwrap(),
            SessionCommand::Add(NewLot::new("aapl", 10, dec!(200.00), "2024-09-13"))
        );
        assert_eq!(
            "remove #3".parse::<SessionCommand>().unwrap(),
            SessionCommand::Remove(LotId::new(3))
        );
        assert_eq!("LIST".parse::<SessionCommand>().unwrap(), SessionCommand::List);
        assert_eq!("exit".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "add AAPL 10".parse::<SessionCommand>(),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            "add AAPL ten 200 2024-09-13".parse::<SessionCommand>(),
            Err(CliError::InvalidNumber(_))
        ));
        assert!(matches!(
            "buy AAPL".parse::<SessionCommand>(),
            Err(CliError::UnknownCommand(_))
        ));
        assert!(matches!(
            "remove x".parse::<SessionCommand>(),
            Err(CliError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_add_list_remove() {
        let mut s = session();
        let out = run(
            &mut s,
            "add AAPL 10 200 2024-09-13\nadd JPM 5 250 2025-03-01\nremove 1\nlist\n",
        );

        assert!(out.contains("Added lot #1: 10 AAPL @ 200.00 on 2024-09-13"));
        assert!(out.contains("Added lot #2: 5 JPM"));
        assert!(out.contains("Removed lot #1: 10 AAPL"));
        assert_eq!(s.ledger().len(), 1);
        assert_eq!(s.ledger().lots()[0].symbol().as_str(), "JPM");
    }

    #[test]
    fn test_bad_lines_do_not_end_session() {
        let mut s = session();
        let out = run(
            &mut s,
            "add ZZZZ 1 1 2025-01-02\nremove 9\nfrobnicate\nadd AAPL 0 200 2024-09-13\nadd AAPL 1 200 2024-09-13\n",
        );

        assert_eq!(out.matches("error:").count(), 4);
        assert!(out.contains("Unknown symbol: ZZZZ"));
        assert!(out.contains("Lot not found: 9"));
        assert_eq!(s.ledger().len(), 1);
    }

    #[test]
    fn test_tick_moves_from_prior_price() {
        let mut s = session();
        let out = run(&mut s, "tick aapl 255.50\ntick AAPL 250.00\n");
        assert!(out.contains("AAPL 245.50 -> 255.50 (+10.00, +4.07%)"));
        assert!(out.contains("AAPL 255.50 -> 250.00 (-5.50, -2.15%)"));
    }

    #[test]
    fn test_export_and_quit() {
        let mut s = session();
        let out = run(
            &mut s,
            "add AAPL 10 200 2024-09-13\nexport\nquit\nadd JPM 1 1 2025-01-02\n",
        );

        assert!(out.contains(
            "AAPL,Apple Inc.,10,200.00,2024-09-13,245.50,2455.00,455.00,22.75,1.1 years"
        ));
        // Lines after quit are ignored
        assert_eq!(s.ledger().len(), 1);
    }

    #[test]
    fn test_value_in_json() {
        let quotes = QuoteBook::from_universe(&StockUniverse::reference()).unwrap();
        let mut s = Session::new(quotes, ValuationConfig::default(), OutputFormat::Json)
            .with_as_of(Date::from_ymd(2025, 10, 18).unwrap());
        let out = run(&mut s, "add AAPL 10 200 2024-09-13\nvalue\n");

        let json_start = out.find('{').unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&out[json_start..]).unwrap();
        assert_eq!(snapshot["totals"]["lot_count"], 1);
    }
}
