//! Pollutant identifiers, symbols and units
//!
//! The declaration order of [`Pollutant`] is the canonical enumeration order
//! of the crate. It is also the tie-break order when several pollutants reach
//! the same maximum sub-index: the first one listed wins.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six pollutants covered by the AQI standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    /// Carbon monoxide
    Co,
    /// Nitrogen dioxide
    No2,
    /// Ozone
    O3,
    /// Particulate matter up to 10 µm
    Pm10,
    /// Particulate matter up to 2.5 µm
    Pm25,
    /// Sulfur dioxide
    So2,
}

impl Pollutant {
    /// All pollutants in canonical (tie-break) order
    pub const ALL: [Self; 6] = [
        Self::Co,
        Self::No2,
        Self::O3,
        Self::Pm10,
        Self::Pm25,
        Self::So2,
    ];

    /// Two-letter symbol used by the upstream hourly feed
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Co => "co",
            Self::No2 => "n2",
            Self::O3 => "o3",
            Self::Pm10 => "p1",
            Self::Pm25 => "p2",
            Self::So2 => "s2",
        }
    }

    /// Look up a pollutant from its feed symbol
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.symbol() == symbol)
    }

    /// Native concentration unit of the reading for this pollutant
    #[must_use]
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Co => "mg/m³",
            _ => "µg/m³",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Co => "CO",
            Self::No2 => "NO2",
            Self::O3 => "O3",
            Self::Pm10 => "PM10",
            Self::Pm25 => "PM2.5",
            Self::So2 => "SO2",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn canonical_order() {
        let symbols: Vec<&str> = Pollutant::ALL.iter().map(|p| p.symbol()).collect();
        assert_eq!(symbols, vec!["co", "n2", "o3", "p1", "p2", "s2"]);
    }

    #[rstest]
    #[case("co", Some(Pollutant::Co))]
    #[case("p2", Some(Pollutant::Pm25))]
    #[case("s2", Some(Pollutant::So2))]
    #[case("xx", None)]
    fn symbol_round_trip(#[case] symbol: &str, #[case] expected: Option<Pollutant>) {
        assert_eq!(Pollutant::from_symbol(symbol), expected);
    }

    #[test]
    fn units() {
        assert_eq!(Pollutant::Co.unit(), "mg/m³");
        assert_eq!(Pollutant::Pm25.unit(), "µg/m³");
        assert_eq!(Pollutant::O3.unit(), "µg/m³");
    }

    #[test]
    fn display_names() {
        assert_eq!(Pollutant::Pm25.to_string(), "PM2.5");
        assert_eq!(Pollutant::No2.to_string(), "NO2");
    }
}
