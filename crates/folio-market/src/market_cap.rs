//! Market capitalization parsing and size classes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{MarketError, MarketResult};

/// Market capitalization, stored in billions of currency units.
///
/// Parsed from compact strings such as `"3.64T"`, `"866B"` or `"$450M"`.
///
/// # Examples
///
/// ```
/// use folio_market::{MarketCap, MarketCapClass};
///
/// let cap: MarketCap = "3.64T".parse().unwrap();
/// assert_eq!(cap.to_string(), "3.64T");
/// assert_eq!(cap.class(), MarketCapClass::Mega);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MarketCap {
    billions: Decimal,
}

impl MarketCap {
    /// Creates a market cap from a value in billions.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidMarketCap` for negative values.
    pub fn from_billions(billions: Decimal) -> MarketResult<Self> {
        if billions.is_sign_negative() {
            return Err(MarketError::invalid_market_cap(
                billions.to_string(),
                "market cap cannot be negative",
            ));
        }
        Ok(Self { billions })
    }

    /// Returns the capitalization in billions.
    #[must_use]
    pub fn billions(&self) -> Decimal {
        self.billions
    }

    /// Returns the size class of this capitalization.
    #[must_use]
    pub fn class(&self) -> MarketCapClass {
        MarketCapClass::classify(self.billions)
    }
}

impl FromStr for MarketCap {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        let Some(last) = trimmed.chars().last() else {
            return Err(MarketError::invalid_market_cap(s, "empty input"));
        };

        let (number, scale) = match last.to_ascii_uppercase() {
            'T' => (&trimmed[..trimmed.len() - 1], dec!(1000)),
            'B' => (&trimmed[..trimmed.len() - 1], Decimal::ONE),
            'M' => (&trimmed[..trimmed.len() - 1], dec!(0.001)),
            c if c.is_ascii_digit() => (trimmed, Decimal::ONE),
            c => {
                return Err(MarketError::invalid_market_cap(
                    s,
                    format!("unknown unit '{c}'"),
                ))
            }
        };

        let value = Decimal::from_str(number.trim())
            .map_err(|e| MarketError::invalid_market_cap(s, e.to_string()))?;

        Self::from_billions(value * scale)
    }
}

impl std::fmt::Display for MarketCap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.billions >= dec!(1000) {
            write!(f, "{}T", (self.billions / dec!(1000)).normalize())
        } else if self.billions >= Decimal::ONE {
            write!(f, "{}B", self.billions.normalize())
        } else {
            write!(f, "{}M", (self.billions * dec!(1000)).normalize())
        }
    }
}

impl TryFrom<String> for MarketCap {
    type Error = MarketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MarketCap> for String {
    fn from(cap: MarketCap) -> Self {
        cap.to_string()
    }
}

/// Size class used by the screener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketCapClass {
    /// $200B and above
    Mega,
    /// $10B up to $200B
    Large,
    /// $2B up to $10B
    Mid,
    /// Below $2B
    Small,
}

impl MarketCapClass {
    /// Returns all classes from largest to smallest.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Mega, Self::Large, Self::Mid, Self::Small]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mega => "Mega Cap",
            Self::Large => "Large Cap",
            Self::Mid => "Mid Cap",
            Self::Small => "Small Cap",
        }
    }

    /// Classifies a capitalization given in billions.
    #[must_use]
    pub fn classify(billions: Decimal) -> Self {
        if billions >= dec!(200) {
            Self::Mega
        } else if billions >= dec!(10) {
            Self::Large
        } else if billions >= dec!(2) {
            Self::Mid
        } else {
            Self::Small
        }
    }
}

impl std::fmt::Display for MarketCapClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MarketCapClass {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mega" => Ok(Self::Mega),
            "large" => Ok(Self::Large),
            "mid" => Ok(Self::Mid),
            "small" => Ok(Self::Small),
            _ => Err(MarketError::invalid_value("market cap class", s)),
        }
    }
}
