//! Ticker symbol type.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A ticker symbol such as `AAPL` or `BRK.B`.
///
/// Symbols are trimmed and uppercased on construction, so `" msft "` and
/// `"MSFT"` compare equal. Letters, digits, `.` and `-` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a normalized symbol.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSymbol` if the input is empty after
    /// trimming or contains characters other than ASCII letters, digits,
    /// `.` and `-`.
    pub fn new(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_symbol(raw, "symbol is empty"));
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-'))
        {
            return Err(CoreError::invalid_symbol(
                raw,
                format!("unexpected character '{c}'"),
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Symbol::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(Symbol::new("aapl").unwrap().as_str(), "AAPL");
        assert_eq!(Symbol::new("  brk.b ").unwrap().as_str(), "BRK.B");
        assert_eq!(Symbol::new("msft").unwrap(), Symbol::new("MSFT").unwrap());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("   ").is_err());
        assert!(Symbol::new("AA PL").is_err());
        assert!(Symbol::new("AAPL,MSFT").is_err());
    }

    #[test]
    fn test_borrow_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(Symbol::new("JPM").unwrap(), 1);
        assert_eq!(map.get("JPM"), Some(&1));
    }

    #[test]
    fn test_serde_normalizes() {
        let parsed: Symbol = serde_json::from_str("\"nvda\"").unwrap();
        assert_eq!(parsed.as_str(), "NVDA");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"NVDA\"");
        assert!(serde_json::from_str::<Symbol>("\"\"").is_err());
    }
}
