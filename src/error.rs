//! Error types for AQI computation

use thiserror::Error;

use crate::pollutant::Pollutant;

/// Result type alias for AQI operations
pub type Result<T> = std::result::Result<T, AqiError>;

/// Errors that can occur while validating readings, parsing feed data or
/// aggregating stations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    /// A required pollutant field is absent from the input
    #[error("Missing reading: {0}")]
    MissingReading(String),

    /// A concentration below zero was supplied (readings are rejected, not clamped)
    #[error("Negative concentration for {pollutant}: {value}")]
    NegativeConcentration { pollutant: Pollutant, value: f64 },

    /// Aggregation was requested over zero stations
    #[error("No stations supplied for aggregation")]
    EmptyStationSet,

    /// A feed value could not be parsed as a number
    #[error("Malformed concentration for {field}: {value:?}")]
    MalformedConcentration { field: String, value: String },

    /// The feed returned no hourly records for a station
    #[error("No hourly records for station: {0}")]
    EmptyFeed(String),

    /// The feed body is not the expected JSON document
    #[error("Unparseable feed payload: {0}")]
    InvalidPayload(String),

    /// A breakpoint table violates the segment ordering invariant
    #[error("Invalid breakpoint table: {0}")]
    InvalidTable(String),
}

impl AqiError {
    /// Create a new `MissingReading` error for a pollutant field
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::MissingReading(field.to_string())
    }

    /// Create a new `MalformedConcentration` error
    #[must_use]
    pub fn malformed(field: &str, value: &str) -> Self {
        Self::MalformedConcentration {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AqiError::missing("o3_8h");
        assert_eq!(err.to_string(), "Missing reading: o3_8h");

        let err = AqiError::malformed("pm25onehour", "12..3");
        assert_eq!(
            err.to_string(),
            "Malformed concentration for pm25onehour: \"12..3\""
        );

        let err = AqiError::NegativeConcentration {
            pollutant: Pollutant::Pm25,
            value: -4.0,
        };
        assert_eq!(err.to_string(), "Negative concentration for PM2.5: -4");
    }

    #[test]
    fn test_error_equality() {
        let err1 = AqiError::EmptyStationSet;
        let err2 = AqiError::EmptyStationSet;
        let err3 = AqiError::EmptyFeed("洪山地大".to_string());

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
