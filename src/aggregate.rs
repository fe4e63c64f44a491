//! Multi-station aggregation
//!
//! Combines readings from N stations into one result: per-pollutant
//! arithmetic means, the truncated mean of the per-station AQI values, the
//! level of that combined AQI and the primary pollutant of the averaged
//! concentrations. Aggregation over zero stations is an error, never a
//! division by zero.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::breakpoints::BreakpointTable;
use crate::calculator::AqiCalculator;
use crate::error::{AqiError, Result};
use crate::level::AqiLevel;
use crate::pollutant::Pollutant;
use crate::reading::{PollutantReading, StationReading};

/// An averaged concentration, kept in the feed's display convention
///
/// A mean that comes out integral is emitted as an integer; anything else is
/// rounded to 3 decimal places. The rule is cosmetic output parity with the
/// upstream feed, carried through both `Display` and `Serialize`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MeanValue(f64);

impl MeanValue {
    fn mean(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(AqiError::EmptyStationSet);
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Ok(Self((mean * 1000.0).round() / 1000.0))
    }

    /// The averaged concentration, rounded to 3 decimal places
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the mean came out exactly integral
    #[must_use]
    pub fn is_integral(self) -> bool {
        self.0.fract() == 0.0
    }
}

impl fmt::Display for MeanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integral() {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for MeanValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_integral() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl PartialEq<f64> for MeanValue {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

/// Combined air-quality result over one or more stations
///
/// A flat named-field structure; the presentation layer reads these fields
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Truncated mean of the per-station AQI values
    pub aqi_value: u16,
    /// Level band of `aqi_value`
    pub aqi_level: AqiLevel,
    /// Primary pollutant of the averaged concentrations
    pub primary_pollutant: Pollutant,
    /// Mean PM2.5 in µg/m³
    pub pm25: MeanValue,
    /// Mean PM10 in µg/m³
    pub pm10: MeanValue,
    /// Mean NO2 in µg/m³
    pub no2: MeanValue,
    /// Mean SO2 in µg/m³
    pub so2: MeanValue,
    /// Mean 1-hour ozone in µg/m³
    pub o3: MeanValue,
    /// Mean 8-hour ozone in µg/m³, present only when every station reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub o3_8h: Option<MeanValue>,
    /// Mean CO in mg/m³
    pub co: MeanValue,
    /// Source station identifiers, comma separated
    pub source_stations: String,
}

impl AggregateResult {
    /// Feed symbol of the primary pollutant
    #[must_use]
    pub fn pollutant_symbol(&self) -> &'static str {
        self.primary_pollutant.symbol()
    }

    /// Native unit of the primary pollutant
    #[must_use]
    pub fn pollutant_unit(&self) -> &'static str {
        self.primary_pollutant.unit()
    }
}

/// Combine station readings into one air-quality result
///
/// Each station's AQI is computed with the supplied table; the combined AQI
/// is the truncated (not rounded) mean of those values. Per-pollutant
/// concentrations are averaged arithmetically, and the primary pollutant is
/// derived from the averaged reading.
///
/// # Errors
///
/// * `AqiError::EmptyStationSet` - `stations` is empty
/// * `AqiError::NegativeConcentration` - A station carries a negative value
/// * `AqiError::MissingReading` - The table's ozone rule needs an 8-hour
///   average a station does not carry
///
/// # Example
///
/// ```rust
/// use aqi_calculator::{compute_air_quality, BreakpointTable, PollutantReading, StationReading};
///
/// let table = BreakpointTable::us_epa();
/// let stations = vec![
///     StationReading::new("east", PollutantReading::new(9.6, 0.0, 0.0, 0.0, 0.0, 0.0)?),
///     StationReading::new("west", PollutantReading::new(16.9, 0.0, 0.0, 0.0, 0.0, 0.0)?),
/// ];
/// let result = compute_air_quality(&stations, &table)?;
///
/// assert_eq!(result.aqi_value, 50);
/// assert_eq!(result.aqi_level.to_string(), "Moderate");
/// # Ok::<(), aqi_calculator::AqiError>(())
/// ```
pub fn compute_air_quality(
    stations: &[StationReading],
    table: &BreakpointTable,
) -> Result<AggregateResult> {
    if stations.is_empty() {
        return Err(AqiError::EmptyStationSet);
    }

    let mut aqi_sum: u32 = 0;
    for station in stations {
        let aqi = AqiCalculator::new(table, &station.reading)?.aqi()?;
        aqi_sum += u32::from(aqi);
    }
    // Truncating integer division, matching the feed's published values
    let aqi_value = (aqi_sum / stations.len() as u32) as u16;

    let mean_of = |field: fn(&PollutantReading) -> f64| -> Result<MeanValue> {
        let values: Vec<f64> = stations.iter().map(|s| field(&s.reading)).collect();
        MeanValue::mean(&values)
    };
    let pm25 = mean_of(|r| r.pm25)?;
    let pm10 = mean_of(|r| r.pm10)?;
    let no2 = mean_of(|r| r.no2)?;
    let so2 = mean_of(|r| r.so2)?;
    let o3 = mean_of(|r| r.o3)?;
    let co = mean_of(|r| r.co)?;

    // The 8-hour ozone mean is only meaningful over the full station set
    let o3_8h_values: Vec<f64> = stations
        .iter()
        .filter_map(|s| s.reading.o3_8h)
        .collect();
    let o3_8h = if o3_8h_values.len() == stations.len() {
        Some(MeanValue::mean(&o3_8h_values)?)
    } else {
        None
    };

    let averaged = PollutantReading {
        pm25: pm25.value(),
        pm10: pm10.value(),
        no2: no2.value(),
        so2: so2.value(),
        o3: o3.value(),
        o3_8h: o3_8h.map(MeanValue::value),
        co: co.value(),
    };
    let primary_pollutant = AqiCalculator::new(table, &averaged)?.primary_pollutant()?;

    let source_stations = stations
        .iter()
        .map(|s| s.station.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(AggregateResult {
        aqi_value,
        aqi_level: AqiLevel::from_aqi(aqi_value),
        primary_pollutant,
        pm25,
        pm10,
        no2,
        so2,
        o3,
        o3_8h,
        co,
        source_stations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rstest::rstest;

    fn station(name: &str, pm25: f64) -> StationReading {
        StationReading::new(
            name,
            PollutantReading::new(pm25, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap(),
        )
    }

    #[rstest]
    #[case(&[10.0, 11.0], 10.5, false)]
    #[case(&[10.0, 10.0], 10.0, true)]
    #[case(&[10.0, 10.5, 10.5], 10.333, false)]
    fn mean_formatting(#[case] values: &[f64], #[case] expected: f64, #[case] integral: bool) {
        let mean = MeanValue::mean(values).unwrap();
        assert_eq!(mean, expected);
        assert_eq!(mean.is_integral(), integral);
    }

    #[test]
    fn mean_display() {
        assert_eq!(MeanValue::mean(&[10.0, 11.0]).unwrap().to_string(), "10.5");
        assert_eq!(MeanValue::mean(&[10.0, 10.0]).unwrap().to_string(), "10");
    }

    #[test]
    fn combined_aqi_is_truncated_not_rounded() {
        // Station AQIs 40 and 61: the mean 50.5 truncates to 50 (Moderate)
        let table = BreakpointTable::us_epa();
        let stations = vec![station("A", 9.6), station("B", 16.9)];

        let a = AqiCalculator::new(&table, &stations[0].reading)
            .unwrap()
            .aqi()
            .unwrap();
        let b = AqiCalculator::new(&table, &stations[1].reading)
            .unwrap()
            .aqi()
            .unwrap();
        assert_eq!((a, b), (40, 61));

        let result = compute_air_quality(&stations, &table).unwrap();
        assert_eq!(result.aqi_value, 50);
        assert_eq!(result.aqi_level, AqiLevel::Moderate);
    }

    #[test]
    fn empty_station_set_fails() {
        let table = BreakpointTable::us_epa();
        let err = compute_air_quality(&[], &table).unwrap_err();
        assert_eq!(err, AqiError::EmptyStationSet);
    }

    #[test]
    fn station_names_are_concatenated() {
        let table = BreakpointTable::us_epa();
        let stations = vec![station("洪山地大", 5.0), station("东湖梨园", 6.0)];
        let result = compute_air_quality(&stations, &table).unwrap();
        assert_eq!(result.source_stations, "洪山地大, 东湖梨园");
    }

    #[test]
    fn primary_pollutant_comes_from_the_averaged_reading() {
        let table = BreakpointTable::us_epa();
        let stations = vec![
            StationReading::new(
                "A",
                PollutantReading::new(10.0, 20.0, 30.0, 8.0, 90.0, 0.5).unwrap(),
            ),
            StationReading::new(
                "B",
                PollutantReading::new(11.0, 20.0, 31.0, 8.0, 90.0, 0.7).unwrap(),
            ),
        ];
        let result = compute_air_quality(&stations, &table).unwrap();
        assert_eq!(result.primary_pollutant, Pollutant::O3);
        assert_eq!(result.pollutant_symbol(), "o3");
        assert_eq!(result.pollutant_unit(), "µg/m³");
    }

    #[test]
    fn eight_hour_ozone_mean_requires_every_station() {
        let table = BreakpointTable::us_epa();
        let with = StationReading::new(
            "A",
            PollutantReading::with_o3_8h(5.0, 0.0, 0.0, 0.0, 0.0, 80.0, 0.0).unwrap(),
        );
        let without = station("B", 5.0);

        let result = compute_air_quality(&[with.clone()], &table).unwrap();
        assert_eq!(result.o3_8h, Some(MeanValue(80.0)));

        let result = compute_air_quality(&[with, without], &table).unwrap();
        assert_eq!(result.o3_8h, None);
    }

    #[test]
    fn result_serialization_parity() {
        let table = BreakpointTable::us_epa();
        let stations = vec![
            StationReading::new(
                "A",
                PollutantReading::new(10.0, 20.0, 30.0, 8.0, 90.0, 0.5).unwrap(),
            ),
            StationReading::new(
                "B",
                PollutantReading::new(11.0, 20.0, 31.0, 8.0, 90.0, 0.7).unwrap(),
            ),
        ];
        let result = compute_air_quality(&stations, &table).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        // Integral means serialize as integers, the rest with 3-decimal rounding
        assert_snapshot!(
            json,
            @r#"{"aqi_value":161,"aqi_level":"Unhealthy","primary_pollutant":"o3","pm25":10.5,"pm10":20,"no2":30.5,"so2":8,"o3":90,"co":0.6,"source_stations":"A, B"}"#
        );
    }
}
