//! Equity sector classification.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MarketError;

/// Normalized equity sector.
///
/// Serialized by display name (`"Consumer Discretionary"`), and parsed
/// leniently: case, spaces, hyphens and underscores are ignored, and a few
/// common aliases (`"Financials"`, `"Tech"`) are accepted.
///
/// # Examples
///
/// ```
/// use folio_market::Sector;
///
/// let sector: Sector = "consumer-discretionary".parse().unwrap();
/// assert_eq!(sector, Sector::ConsumerDiscretionary);
/// assert_eq!(sector.name(), "Consumer Discretionary");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sector {
    /// Software, hardware and semiconductors
    Technology,
    /// Media, telecom and interactive platforms
    CommunicationServices,
    /// Retail, autos and leisure
    ConsumerDiscretionary,
    /// Food, beverages and household products
    ConsumerStaples,
    /// Oil, gas and energy equipment
    Energy,
    /// Banks, insurers and payment networks
    Financial,
    /// Pharma, biotech and managed care
    Healthcare,
    /// Capital goods and transportation
    Industrials,
    /// Chemicals, metals and mining
    Materials,
    /// REITs and real estate services
    RealEstate,
    /// Electric, gas and water utilities
    Utilities,
    /// Other or unclassified
    #[default]
    Other,
}

impl Sector {
    /// Returns all sectors in a standard order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Technology,
            Self::CommunicationServices,
            Self::ConsumerDiscretionary,
            Self::ConsumerStaples,
            Self::Energy,
            Self::Financial,
            Self::Healthcare,
            Self::Industrials,
            Self::Materials,
            Self::RealEstate,
            Self::Utilities,
            Self::Other,
        ]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::CommunicationServices => "Communication Services",
            Self::ConsumerDiscretionary => "Consumer Discretionary",
            Self::ConsumerStaples => "Consumer Staples",
            Self::Energy => "Energy",
            Self::Financial => "Financial",
            Self::Healthcare => "Healthcare",
            Self::Industrials => "Industrials",
            Self::Materials => "Materials",
            Self::RealEstate => "Real Estate",
            Self::Utilities => "Utilities",
            Self::Other => "Other",
        }
    }

    /// Returns a short code for the sector.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Technology => "TECH",
            Self::CommunicationServices => "COMM",
            Self::ConsumerDiscretionary => "COND",
            Self::ConsumerStaples => "CONS",
            Self::Energy => "ENGY",
            Self::Financial => "FIN",
            Self::Healthcare => "HLTH",
            Self::Industrials => "INDU",
            Self::Materials => "MATR",
            Self::RealEstate => "REIT",
            Self::Utilities => "UTIL",
            Self::Other => "OTH",
        }
    }

    /// Returns true for sectors that tend to hold up in downturns.
    #[must_use]
    pub fn is_defensive(&self) -> bool {
        matches!(
            self,
            Self::ConsumerStaples | Self::Healthcare | Self::Utilities
        )
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Sector {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        let sector = match key.as_str() {
            "technology" | "tech" | "informationtechnology" => Self::Technology,
            "communicationservices" | "communication" | "telecom" => Self::CommunicationServices,
            "consumerdiscretionary" => Self::ConsumerDiscretionary,
            "consumerstaples" => Self::ConsumerStaples,
            "energy" => Self::Energy,
            "financial" | "financials" => Self::Financial,
            "healthcare" => Self::Healthcare,
            "industrials" | "industrial" => Self::Industrials,
            "materials" => Self::Materials,
            "realestate" => Self::RealEstate,
            "utilities" | "utility" => Self::Utilities,
            "other" => Self::Other,
            _ => {
                return Err(MarketError::UnknownSector {
                    name: s.to_string(),
                })
            }
        };
        Ok(sector)
    }
}

impl TryFrom<String> for Sector {
    type Error = MarketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sector> for String {
    fn from(sector: Sector) -> Self {
        sector.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_basics() {
        assert_eq!(Sector::Technology.name(), "Technology");
        assert_eq!(Sector::Technology.code(), "TECH");
        assert!(Sector::Utilities.is_defensive());
        assert!(!Sector::Technology.is_defensive());
    }

    #[test]
    fn test_sector_all() {
        let all = Sector::all();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0], Sector::Technology);
        assert_eq!(all[11], Sector::Other);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for sector in Sector::all() {
            assert_eq!(sector.name().parse::<Sector>().unwrap(), *sector);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Financials".parse::<Sector>().unwrap(), Sector::Financial);
        assert_eq!("health care".parse::<Sector>().unwrap(), Sector::Healthcare);
        assert_eq!("REAL_ESTATE".parse::<Sector>().unwrap(), Sector::RealEstate);
        assert!("Crypto".parse::<Sector>().is_err());
    }

    #[test]
    fn test_sector_serde() {
        let json = serde_json::to_string(&Sector::ConsumerStaples).unwrap();
        assert_eq!(json, "\"Consumer Staples\"");
        let parsed: Sector = serde_json::from_str("\"consumer staples\"").unwrap();
        assert_eq!(parsed, Sector::ConsumerStaples);
        assert!(serde_json::from_str::<Sector>("\"Nope\"").is_err());
    }
}
