//! Integration tests for folio-portfolio.
//!
//! These tests verify end-to-end functionality: ledger mutation, quotes
//! from the reference universe, valuation and export.

use folio_core::{Date, Symbol};
use folio_market::{PriceQuote, QuoteBook, RiskBucket, Sector, StockUniverse};
use folio_portfolio::prelude::*;
use folio_portfolio::{export_filename, CSV_HEADERS};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn as_of() -> Date {
    Date::from_ymd(2025, 10, 18).unwrap()
}

fn quote(price: Decimal, beta: Decimal, volatility: Decimal, sector: Sector) -> PriceQuote {
    PriceQuote::new(price, beta, volatility, sector).unwrap()
}

/// Creates a diversified ledger across five sectors.
fn create_diversified_ledger() -> Ledger {
    let mut ledger = Ledger::with_reference_universe();
    let lots = [
        ("AAPL", 20, dec!(180.00), "2023-05-10"),
        ("MSFT", 10, dec!(410.25), "2024-02-01"),
        ("JPM", 40, dec!(195.40), "2024-06-15"),
        ("V", 15, dec!(275.00), "2025-08-01"),
        ("JNJ", 30, dec!(158.10), "2025-10-01"),
        ("PG", 25, dec!(170.00), "2022-11-30"),
        ("TSLA", 8, dec!(250.00), "2024-12-20"),
    ];
    for (symbol, shares, price, date) in lots {
        ledger
            .add_lot_as_of(NewLot::new(symbol, shares, price, date), as_of())
            .unwrap();
    }
    ledger
}

fn reference_quotes() -> QuoteBook {
    QuoteBook::from_universe(&StockUniverse::reference()).unwrap()
}

// =============================================================================
// WORKED EXAMPLES
// =============================================================================

#[test]
fn test_single_aapl_lot_example() {
    let mut ledger = Ledger::with_reference_universe();
    let purchase_date = as_of().add_days(-400);
    ledger
        .add_lot_as_of(
            NewLot::new("AAPL", 10, dec!(200.00), purchase_date.to_string()),
            as_of(),
        )
        .unwrap();

    let mut quotes = QuoteBook::new();
    quotes.insert(
        Symbol::new("AAPL").unwrap(),
        quote(dec!(245.50), dec!(1.1), dec!(25.0), Sector::Technology),
    );

    let snapshot =
        value_portfolio(ledger.lots(), &quotes, as_of(), &ValuationConfig::default()).unwrap();
    let lot = &snapshot.lots[0];

    assert_eq!(lot.market_value, dec!(2455.00));
    assert_eq!(lot.total_cost, dec!(2000.00));
    assert_eq!(lot.gain_loss, dec!(455.00));
    assert_eq!(lot.gain_loss_pct, dec!(22.75));
    assert_eq!(lot.holding_period.days, 400);
    assert_eq!(lot.holding_period.label, "1.1 years");
}

#[test]
fn test_equal_value_sectors_split_50_50() {
    let mut ledger = Ledger::with_reference_universe();
    ledger
        .add_lot_as_of(NewLot::new("AAPL", 4, dec!(200), "2025-01-02"), as_of())
        .unwrap();
    ledger
        .add_lot_as_of(NewLot::new("JPM", 8, dec!(90), "2025-01-02"), as_of())
        .unwrap();

    let mut quotes = QuoteBook::new();
    quotes.insert(
        Symbol::new("AAPL").unwrap(),
        quote(dec!(250), dec!(1.2), dec!(25), Sector::Technology),
    );
    quotes.insert(
        Symbol::new("JPM").unwrap(),
        quote(dec!(125), dec!(1.0), dec!(18), Sector::Financial),
    );

    let snapshot =
        value_portfolio(ledger.lots(), &quotes, as_of(), &ValuationConfig::default()).unwrap();

    let tech = snapshot.sector_allocation.get(Sector::Technology).unwrap();
    let fin = snapshot.sector_allocation.get(Sector::Financial).unwrap();
    assert_eq!(tech.weight_pct, dec!(50));
    assert_eq!(fin.weight_pct, dec!(50));

    // Equal weights: (1.2 + 1.0) / 2, (25 + 18) / 2
    assert_eq!(snapshot.risk.weighted_beta, dec!(1.1));
    assert_eq!(snapshot.risk.weighted_volatility, dec!(21.5));
    assert_eq!(snapshot.risk_allocation.get(RiskBucket::Low).weight_pct, dec!(50));
    assert_eq!(snapshot.risk_allocation.get(RiskBucket::Medium).weight_pct, dec!(50));
}

#[test]
fn test_single_lot_csv_has_two_lines_of_ten_fields() {
    let mut ledger = Ledger::with_reference_universe();
    ledger
        .add_lot_as_of(NewLot::new("AAPL", 10, dec!(200.00), "2024-09-13"), as_of())
        .unwrap();

    let csv = export_csv(ledger.lots(), &reference_quotes(), ledger.directory(), as_of()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_eq!(line.split(',').count(), CSV_HEADERS.len());
    }
    assert!(lines[1].starts_with("AAPL,Apple Inc.,10,200.00,2024-09-13,245.50,"));
}

// =============================================================================
// END-TO-END
// =============================================================================

#[test]
fn test_diversified_portfolio_valuation() {
    let ledger = create_diversified_ledger();
    let snapshot = value_portfolio(
        ledger.lots(),
        &reference_quotes(),
        as_of(),
        &ValuationConfig::default(),
    )
    .unwrap();

    assert_eq!(snapshot.totals.lot_count, 7);
    assert_eq!(snapshot.lots.len(), ledger.len());

    // Ledger order is preserved
    let symbols: Vec<_> = snapshot.lots.iter().map(|l| l.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "MSFT", "JPM", "V", "JNJ", "PG", "TSLA"]);

    // TSLA 250 -> 426.07 is the best performer
    let best = snapshot.best_performer.as_ref().unwrap();
    assert_eq!(best.symbol.as_str(), "TSLA");

    // Five sectors held
    assert_eq!(snapshot.sector_allocation.len(), 5);
    let fin = snapshot.sector_allocation.get(Sector::Financial).unwrap();
    assert_eq!(fin.count, 2);
    assert_eq!(
        fin.market_value,
        dec!(40) * dec!(314.78) + dec!(15) * dec!(341.61)
    );

    assert!(snapshot.risk.value_at_risk_95 < Decimal::ZERO);
    assert!(snapshot.risk.weighted_beta > Decimal::ZERO);
}

#[test]
fn test_price_tick_then_revalue() {
    let ledger = create_diversified_ledger();
    let mut quotes = reference_quotes();
    let config = ValuationConfig::default();

    let before = value_portfolio(ledger.lots(), &quotes, as_of(), &config).unwrap();
    let mv = quotes.reprice("AAPL", dec!(255.50)).unwrap();
    let after = value_portfolio(ledger.lots(), &quotes, as_of(), &config).unwrap();

    assert_eq!(mv.change, dec!(10.00));
    assert_eq!(
        after.totals.total_value - before.totals.total_value,
        dec!(20) * mv.change
    );
    assert_eq!(after.totals.total_cost, before.totals.total_cost);
}

#[test]
fn test_remove_then_revalue() {
    let mut ledger = create_diversified_ledger();
    let quotes = reference_quotes();
    let config = ValuationConfig::default();

    let before = value_portfolio(ledger.lots(), &quotes, as_of(), &config).unwrap();
    let removed = ledger.remove_lot(ledger.lots()[2].id()).unwrap();
    let after = value_portfolio(ledger.lots(), &quotes, as_of(), &config).unwrap();

    assert_eq!(removed.symbol().as_str(), "JPM");
    assert_eq!(
        after.totals.total_value,
        before.totals.total_value - dec!(40) * dec!(314.78)
    );
    assert_eq!(
        after.sector_allocation.get(Sector::Financial).unwrap().count,
        1
    );
}

#[test]
fn test_remove_unknown_lot_reports_not_found() {
    let mut ledger = create_diversified_ledger();
    let err = ledger.remove_lot(LotId::new(1_000)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(ledger.len(), 7);
}

#[test]
fn test_missing_quote_reports_error_kind() {
    let ledger = create_diversified_ledger();
    let mut quotes = QuoteBook::new();
    quotes.insert(
        Symbol::new("AAPL").unwrap(),
        quote(dec!(245.50), dec!(1.2), dec!(25), Sector::Technology),
    );

    let err = value_portfolio(ledger.lots(), &quotes, as_of(), &ValuationConfig::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingQuote);
    assert_eq!(err, PortfolioError::missing_quote("MSFT"));
}

#[test]
fn test_custom_config_changes_metrics() {
    let ledger = create_diversified_ledger();
    let quotes = reference_quotes();

    let default = value_portfolio(ledger.lots(), &quotes, as_of(), &ValuationConfig::default())
        .unwrap();
    let stressed = value_portfolio(
        ledger.lots(),
        &quotes,
        as_of(),
        &ValuationConfig::new().with_var_z_score(dec!(3.29)),
    )
    .unwrap();

    // 3.29 is twice the default z-score
    let diff = stressed.risk.value_at_risk_95 - default.risk.value_at_risk_95 * dec!(2);
    assert!(diff.abs() < dec!(0.000001));
    assert_eq!(stressed.totals, default.totals);
}

#[test]
fn test_unknown_symbol_rejected() {
    let mut ledger = Ledger::with_reference_universe();
    let err = ledger
        .add_lot_as_of(NewLot::new("ZZZZ", 1, dec!(1), "2025-01-02"), as_of())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(err, PortfolioError::UnknownSymbol { .. }));
}

#[test]
fn test_export_filename_uses_as_of() {
    assert_eq!(export_filename(as_of()), "portfolio_2025-10-18.csv");
}
