//! Categorical health levels derived from an AQI value

use std::fmt;

use serde::{Deserialize, Serialize};

/// Health-level label for an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    /// Map an AQI value onto its level band
    #[must_use]
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }
}

impl fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, AqiLevel::Good)]
    #[case(50, AqiLevel::Good)]
    #[case(51, AqiLevel::Moderate)]
    #[case(100, AqiLevel::Moderate)]
    #[case(101, AqiLevel::UnhealthyForSensitiveGroups)]
    #[case(150, AqiLevel::UnhealthyForSensitiveGroups)]
    #[case(151, AqiLevel::Unhealthy)]
    #[case(200, AqiLevel::Unhealthy)]
    #[case(201, AqiLevel::VeryUnhealthy)]
    #[case(300, AqiLevel::VeryUnhealthy)]
    #[case(301, AqiLevel::Hazardous)]
    #[case(500, AqiLevel::Hazardous)]
    fn level_bands(#[case] aqi: u16, #[case] expected: AqiLevel) {
        assert_eq!(AqiLevel::from_aqi(aqi), expected);
    }

    #[test]
    fn display_labels() {
        assert_eq!(AqiLevel::Good.to_string(), "Good");
        assert_eq!(
            AqiLevel::UnhealthyForSensitiveGroups.to_string(),
            "Unhealthy for Sensitive Groups"
        );
    }
}
