//! Strict parsing of the upstream hourly feed
//!
//! The municipal feed answers one station query with a JSON body whose
//! newest record carries every concentration as a string
//! (`{"hourlist": [{"createtime": …, "pm25onehour": "12", …}]}`). Values
//! are parsed strictly here: a field that is absent, null or not a finite
//! number is an error. Nothing is ever defaulted to zero.

use serde_json::Value;

use crate::error::{AqiError, Result};
use crate::reading::{PollutantReading, StationReading};

/// One station's parsed feed snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct StationSnapshot {
    /// Station identifier the snapshot was fetched for
    pub station: String,
    /// Observation timestamp as reported by the feed
    pub time: Option<String>,
    /// The validated concentration reading
    pub reading: PollutantReading,
}

impl StationSnapshot {
    /// Drop the timestamp and keep the station-tagged reading
    #[must_use]
    pub fn into_station_reading(self) -> StationReading {
        StationReading::new(self.station, self.reading)
    }
}

/// Parse one station's hourly feed body into a snapshot
///
/// The newest `hourlist` record is used. Concentrations may arrive as JSON
/// numbers or as numeric strings; anything else fails.
///
/// # Errors
///
/// * `AqiError::InvalidPayload` - The body is not the expected JSON document
/// * `AqiError::EmptyFeed` - The `hourlist` array is missing or empty
/// * `AqiError::MissingReading` - A pollutant field is absent or null
/// * `AqiError::MalformedConcentration` - A value is not a finite number
/// * `AqiError::NegativeConcentration` - A concentration is below zero
///
/// # Example
///
/// ```rust
/// use aqi_calculator::feed::parse_snapshot;
///
/// let body = r#"{"hourlist": [{
///     "createtime": "2024-06-01 14:00",
///     "pm25onehour": "12", "pm10onehour": "40", "no2onehour": "30",
///     "so2onehour": "8", "o3onehour": "90", "coonehour": "0.6",
///     "o3eighthour": "80"
/// }]}"#;
/// let snapshot = parse_snapshot("洪山地大", body)?;
///
/// assert_eq!(snapshot.reading.pm25, 12.0);
/// assert_eq!(snapshot.reading.o3_8h, Some(80.0));
/// # Ok::<(), aqi_calculator::AqiError>(())
/// ```
pub fn parse_snapshot(station: &str, body: &str) -> Result<StationSnapshot> {
    let document: Value = serde_json::from_str(body)
        .map_err(|e| AqiError::InvalidPayload(e.to_string()))?;

    let record = document
        .get("hourlist")
        .and_then(Value::as_array)
        .and_then(|records| records.first())
        .ok_or_else(|| AqiError::EmptyFeed(station.to_string()))?;

    let time = record
        .get("createtime")
        .and_then(Value::as_str)
        .map(str::to_string);

    let reading = PollutantReading {
        pm25: concentration(record, "pm25onehour")?,
        pm10: concentration(record, "pm10onehour")?,
        no2: concentration(record, "no2onehour")?,
        so2: concentration(record, "so2onehour")?,
        o3: concentration(record, "o3onehour")?,
        o3_8h: optional_concentration(record, "o3eighthour")?,
        co: concentration(record, "coonehour")?,
    };
    reading.validate()?;

    Ok(StationSnapshot {
        station: station.to_string(),
        time,
        reading,
    })
}

/// Parse one required concentration field
fn concentration(record: &Value, field: &str) -> Result<f64> {
    match record.get(field) {
        None | Some(Value::Null) => Err(AqiError::missing(field)),
        Some(value) => parse_number(field, value),
    }
}

/// Parse an optional field; absent and null both mean "not reported"
fn optional_concentration(record: &Value, field: &str) -> Result<Option<f64>> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_number(field, value).map(Some),
    }
}

fn parse_number(field: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|number| number.is_finite())
        .ok_or_else(|| AqiError::malformed(field, &value.to_string()))
}
