//! In-memory holding ledger.
//!
//! The ledger is an ordered, append/remove-only collection of [`Lot`]s.
//! Symbols are validated against a [`SecurityDirectory`] on entry. The
//! ledger never values itself; pass [`Ledger::lots`] to the valuation
//! engine instead.

use folio_core::{Date, Symbol};
use folio_market::{SecurityDirectory, StockUniverse};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{Lot, LotId, NewLot};

/// Ordered collection of purchase lots.
///
/// Ids come from a monotonic counter and are never reused, even after the
/// lot they named has been removed.
///
/// # Example
///
/// ```rust
/// use folio_core::Date;
/// use folio_portfolio::{Ledger, NewLot};
/// use rust_decimal_macros::dec;
///
/// let mut ledger = Ledger::with_reference_universe();
/// let as_of = Date::from_ymd(2025, 10, 18).unwrap();
///
/// let lot = ledger
///     .add_lot_as_of(NewLot::new("aapl", 10, dec!(200), "2024-09-13"), as_of)
///     .unwrap();
/// assert_eq!(lot.symbol().as_str(), "AAPL");
///
/// ledger.remove_lot(lot.id()).unwrap();
/// assert!(ledger.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Ledger<D = StockUniverse> {
    directory: D,
    lots: Vec<Lot>,
    next_id: u64,
}

impl Ledger<StockUniverse> {
    /// Creates an empty ledger over the built-in reference universe.
    #[must_use]
    pub fn with_reference_universe() -> Self {
        Self::new(StockUniverse::reference())
    }
}

impl<D: SecurityDirectory> Ledger<D> {
    /// Creates an empty ledger that accepts the directory's symbols.
    #[must_use]
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            lots: Vec::new(),
            next_id: 1,
        }
    }

    /// Returns the directory used to validate symbols.
    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Adds a lot purchased no later than today.
    ///
    /// # Errors
    ///
    /// See [`Ledger::add_lot_as_of`].
    pub fn add_lot(&mut self, new_lot: NewLot) -> PortfolioResult<Lot> {
        self.add_lot_as_of(new_lot, Date::today())
    }

    /// Adds a lot, rejecting purchase dates after `as_of`.
    ///
    /// Returns a copy of the stored lot with its freshly assigned id.
    ///
    /// # Errors
    ///
    /// - `InvalidLot` if the symbol is blank or malformed, `shares <= 0`,
    ///   `purchase_price <= 0`, the cost basis overflows, or the date is
    ///   after `as_of`
    /// - `UnknownSymbol` if the directory does not list the symbol
    /// - `InvalidDate` if the purchase date cannot be parsed
    pub fn add_lot_as_of(&mut self, new_lot: NewLot, as_of: Date) -> PortfolioResult<Lot> {
        let symbol = Symbol::new(&new_lot.symbol)
            .map_err(|e| PortfolioError::invalid_lot("symbol", e.to_string()))?;
        if !self.directory.contains(symbol.as_str()) {
            return Err(PortfolioError::unknown_symbol(symbol.as_str()));
        }

        let shares = u64::try_from(new_lot.shares)
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| {
                PortfolioError::invalid_lot(
                    "shares",
                    format!("must be positive, got {}", new_lot.shares),
                )
            })?;

        if new_lot.purchase_price <= Decimal::ZERO {
            return Err(PortfolioError::invalid_lot(
                "purchase_price",
                format!("must be positive, got {}", new_lot.purchase_price),
            ));
        }

        let purchase_date =
            Date::parse(&new_lot.purchase_date).map_err(|_| PortfolioError::InvalidDate {
                input: new_lot.purchase_date.clone(),
            })?;
        if purchase_date > as_of {
            return Err(PortfolioError::invalid_lot(
                "purchase_date",
                format!("{purchase_date} is after {as_of}"),
            ));
        }

        let id = LotId::new(self.next_id);
        let lot = Lot::new(id, symbol, shares, new_lot.purchase_price, purchase_date)?;
        self.next_id += 1;

        debug!(
            lot_id = %id,
            symbol = %lot.symbol(),
            shares,
            price = %lot.purchase_price(),
            "added lot"
        );

        self.lots.push(lot.clone());
        Ok(lot)
    }

    /// Removes the lot with the given id and returns it.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::LotNotFound` if no lot has this id; the
    /// ledger is left unchanged.
    pub fn remove_lot(&mut self, id: LotId) -> PortfolioResult<Lot> {
        let index = self
            .lots
            .iter()
            .position(|lot| lot.id() == id)
            .ok_or(PortfolioError::LotNotFound { id })?;
        let lot = self.lots.remove(index);
        debug!(lot_id = %id, symbol = %lot.symbol(), "removed lot");
        Ok(lot)
    }

    /// Returns an owned copy of the lots in ledger order.
    #[must_use]
    pub fn list_lots(&self) -> Vec<Lot> {
        self.lots.clone()
    }

    /// Borrows the lots in ledger order.
    #[must_use]
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Looks up a lot by id.
    #[must_use]
    pub fn get(&self, id: LotId) -> Option<&Lot> {
        self.lots.iter().find(|lot| lot.id() == id)
    }

    /// Returns the number of lots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Returns true if the ledger holds no lots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Returns the distinct symbols held, in ledger order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut seen: Vec<&Symbol> = Vec::new();
        for lot in &self.lots {
            if !seen.contains(&lot.symbol()) {
                seen.push(lot.symbol());
            }
        }
        seen
    }
}
