//! Value command implementation.
//!
//! Loads a lot file into a ledger, values it and prints the snapshot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_portfolio::{value_portfolio, LotValuation, RiskMetrics, ValuationSnapshot};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use super::config::Preferences;
use super::{build_ledger, load_lots, load_quotes, load_valuation_config, parse_as_of};
use crate::cli::OutputFormat;
use crate::output::{
    format_decimal, format_percent, format_signed, print_json, print_output, render_table,
    KeyValue,
};

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Lot file (JSON/YAML list of symbol, shares, purchase_price, purchase_date)
    #[arg(short, long)]
    pub lots: PathBuf,

    /// Quote file (JSON/YAML); defaults to reference quotes
    #[arg(long)]
    pub quotes: Option<PathBuf>,

    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Engine settings file (JSON/YAML)
    #[arg(long)]
    pub valuation_config: Option<PathBuf>,
}

/// One valued lot.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct HoldingRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Symbol")]
    pub symbol: String,
    #[tabled(rename = "Shares")]
    pub shares: u64,
    #[tabled(rename = "Cost/Share")]
    pub purchase_price: String,
    #[tabled(rename = "Price")]
    pub current_price: String,
    #[tabled(rename = "Value")]
    pub market_value: String,
    #[tabled(rename = "Gain/Loss")]
    pub gain_loss: String,
    #[tabled(rename = "Gain %")]
    pub gain_loss_pct: String,
    #[tabled(rename = "Held")]
    pub holding_period: String,
}

impl HoldingRow {
    /// Formats a lot valuation.
    pub fn new(v: &LotValuation, precision: u32) -> Self {
        Self {
            id: v.lot_id.value(),
            symbol: v.symbol.to_string(),
            shares: v.shares,
            purchase_price: format_decimal(v.purchase_price, precision),
            current_price: format_decimal(v.current_price, precision),
            market_value: format_decimal(v.market_value, precision),
            gain_loss: format_signed(v.gain_loss, precision),
            gain_loss_pct: format_percent(v.gain_loss_pct, precision),
            holding_period: v.holding_period.label.clone(),
        }
    }
}

/// One allocation bucket.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct AllocationRow {
    #[tabled(rename = "Bucket")]
    pub bucket: String,
    #[tabled(rename = "Lots")]
    pub count: usize,
    #[tabled(rename = "Value")]
    pub market_value: String,
    #[tabled(rename = "Weight")]
    pub weight: String,
}

fn holding_rows(snapshot: &ValuationSnapshot, precision: u32) -> Vec<HoldingRow> {
    snapshot
        .lots
        .iter()
        .map(|v| HoldingRow::new(v, precision))
        .collect()
}

fn summary_rows(snapshot: &ValuationSnapshot, precision: u32) -> Vec<KeyValue> {
    let totals = &snapshot.totals;
    let best = snapshot.best_performer.as_ref().map_or_else(
        || "-".to_string(),
        |b| {
            format!(
                "{} (#{}) {}%",
                b.symbol,
                b.lot_id,
                format_signed(b.gain_loss_pct, precision)
            )
        },
    );

    vec![
        KeyValue::new("As Of", snapshot.as_of.to_string()),
        KeyValue::new("Lots", totals.lot_count.to_string()),
        KeyValue::from_decimal("Total Value", totals.total_value, precision),
        KeyValue::from_decimal("Total Cost", totals.total_cost, precision),
        KeyValue::new("Gain/Loss", format_signed(totals.total_gain_loss, precision)),
        KeyValue::from_percent("Gain/Loss %", totals.total_gain_loss_pct, precision),
        KeyValue::new("Best Performer", best),
    ]
}

fn risk_rows(risk: &RiskMetrics, precision: u32) -> Vec<KeyValue> {
    vec![
        KeyValue::from_decimal("Weighted Beta", risk.weighted_beta, precision),
        KeyValue::from_percent("Weighted Volatility", risk.weighted_volatility, precision),
        KeyValue::from_decimal("VaR (95%)", risk.value_at_risk_95, precision),
        KeyValue::from_decimal("Sharpe (approx)", risk.sharpe_approx, precision),
        KeyValue::from_percent("Max Drawdown (approx)", risk.max_drawdown_approx, precision),
    ]
}

fn sector_rows(snapshot: &ValuationSnapshot, precision: u32) -> Vec<AllocationRow> {
    snapshot
        .sector_allocation
        .sorted_by_weight()
        .into_iter()
        .map(|(sector, bucket)| AllocationRow {
            bucket: sector.name().to_string(),
            count: bucket.count,
            market_value: format_decimal(bucket.market_value, precision),
            weight: format_percent(bucket.weight_pct, precision),
        })
        .collect()
}

fn risk_bucket_rows(snapshot: &ValuationSnapshot, precision: u32) -> Vec<AllocationRow> {
    snapshot
        .risk_allocation
        .buckets()
        .into_iter()
        .map(|(risk, bucket)| AllocationRow {
            bucket: risk.label().to_string(),
            count: bucket.count,
            market_value: format_decimal(bucket.market_value, precision),
            weight: format_percent(bucket.weight_pct, precision),
        })
        .collect()
}

fn section(title: &str, body: &str) -> String {
    format!("\n{}\n{}\n", title.bold().underline(), body)
}

/// Renders the full snapshot as titled tables.
pub fn render_snapshot(snapshot: &ValuationSnapshot, precision: u32) -> String {
    if snapshot.is_empty() {
        return section("Holdings", "No lots.");
    }

    [
        section("Holdings", &render_table(&holding_rows(snapshot, precision))),
        section("Summary", &render_table(&summary_rows(snapshot, precision))),
        section("Risk Metrics", &render_table(&risk_rows(&snapshot.risk, precision))),
        section("Sector Allocation", &render_table(&sector_rows(snapshot, precision))),
        section("Risk Allocation", &render_table(&risk_bucket_rows(snapshot, precision))),
    ]
    .concat()
}

/// Execute the value command.
pub fn execute(args: ValueArgs, format: OutputFormat, prefs: &Preferences) -> Result<()> {
    let as_of = parse_as_of(args.as_of.as_deref())?;
    let ledger = build_ledger(load_lots(&args.lots)?, as_of)?;
    let quotes = load_quotes(args.quotes.as_deref(), prefs)?;
    let config = load_valuation_config(args.valuation_config.as_deref())?;

    let snapshot = value_portfolio(ledger.lots(), &quotes, as_of, &config)?;
    info!(
        lots = snapshot.totals.lot_count,
        total_value = %snapshot.totals.total_value,
        "valued portfolio"
    );

    match format {
        OutputFormat::Table => print!("{}", render_snapshot(&snapshot, prefs.precision)),
        OutputFormat::Json => print_json(&snapshot)?,
        OutputFormat::Csv => print_output(&holding_rows(&snapshot, prefs.precision), format)?,
        OutputFormat::Minimal => {
            println!("{}", format_decimal(snapshot.totals.total_value, prefs.precision));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Date;
    use folio_market::{QuoteBook, StockUniverse};
    use folio_portfolio::{Ledger, NewLot, ValuationConfig};
    use rust_decimal_macros::dec;

    fn snapshot() -> ValuationSnapshot {
        let as_of = Date::from_ymd(2025, 10, 18).unwrap();
        let mut ledger = Ledger::with_reference_universe();
        ledger
            .add_lot_as_of(NewLot::new("AAPL", 10, dec!(200), "2024-09-13"), as_of)
            .unwrap();
        ledger
            .add_lot_as_of(NewLot::new("JNJ", 5, dec!(170), "2025-09-01"), as_of)
            .unwrap();
        let quotes = QuoteBook::from_universe(&StockUniverse::reference()).unwrap();
        value_portfolio(ledger.lots(), &quotes, as_of, &ValuationConfig::default()).unwrap()
    }

    #[test]
    fn test_holding_row_formatting() {
        let snap = snapshot();
        let row = HoldingRow::new(&snap.lots[0], 2);
        assert_eq!(row.id, 1);
        assert_eq!(row.market_value, "2455.00");
        assert_eq!(row.gain_loss, "+455.00");
        assert_eq!(row.gain_loss_pct, "22.75%");
        assert_eq!(row.holding_period, "1.1 years");

        let loser = HoldingRow::new(&snap.lots[1], 2);
        assert!(loser.gain_loss.starts_with('-'));
    }

    #[test]
    fn test_summary_names_best_performer() {
        let rows = summary_rows(&snapshot(), 2);
        let best = rows.iter().find(|kv| kv.key == "Best Performer").unwrap();
        assert_eq!(best.value, "AAPL (#1) +22.75%");
    }

    #[test]
    fn test_risk_buckets_always_listed() {
        let rows = risk_bucket_rows(&snapshot(), 2);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_render_sections() {
        colored::control::set_override(false);
        let text = render_snapshot(&snapshot(), 2);
        for title in ["Holdings", "Summary", "Risk Metrics", "Sector Allocation", "Risk Allocation"] {
            assert!(text.contains(title), "missing section {title}");
        }
        assert!(text.contains("2455.00"));
    }

    #[test]
    fn test_render_empty_snapshot() {
        let as_of = Date::from_ymd(2025, 10, 18).unwrap();
        let empty = value_portfolio(&[], &QuoteBook::new(), as_of, &ValuationConfig::default())
            .unwrap();
        colored::control::set_override(false);
        assert!(render_snapshot(&empty, 2).contains("No lots."));
    }
}
