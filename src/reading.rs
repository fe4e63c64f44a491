//! Pollutant concentration readings
//!
//! A [`PollutantReading`] is one snapshot of raw concentrations in their
//! native feed units. Values are validated on construction: a negative
//! concentration is rejected with an error instead of being clamped to zero,
//! so sign errors in the upstream feed surface immediately.

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};
use crate::pollutant::Pollutant;

/// One snapshot of raw pollutant concentrations
///
/// All values are in µg/m³ except `co`, which is in mg/m³. The 8-hour ozone
/// average is optional: only feeds that report it can serve breakpoint
/// tables with a dual-window ozone rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    /// PM2.5 in µg/m³
    pub pm25: f64,
    /// PM10 in µg/m³
    pub pm10: f64,
    /// Nitrogen dioxide in µg/m³
    pub no2: f64,
    /// Sulfur dioxide in µg/m³
    pub so2: f64,
    /// 1-hour ozone in µg/m³
    pub o3: f64,
    /// 8-hour average ozone in µg/m³, when the feed reports it
    pub o3_8h: Option<f64>,
    /// Carbon monoxide in mg/m³
    pub co: f64,
}

impl PollutantReading {
    /// Build a validated reading without an 8-hour ozone average
    ///
    /// # Errors
    ///
    /// * `AqiError::NegativeConcentration` - Any value is below zero
    pub fn new(pm25: f64, pm10: f64, no2: f64, so2: f64, o3: f64, co: f64) -> Result<Self> {
        Self {
            pm25,
            pm10,
            no2,
            so2,
            o3,
            o3_8h: None,
            co,
        }
        .validated()
    }

    /// Build a validated reading including an 8-hour ozone average
    ///
    /// # Errors
    ///
    /// * `AqiError::NegativeConcentration` - Any value is below zero
    #[allow(clippy::too_many_arguments)]
    pub fn with_o3_8h(
        pm25: f64,
        pm10: f64,
        no2: f64,
        so2: f64,
        o3: f64,
        o3_8h: f64,
        co: f64,
    ) -> Result<Self> {
        Self {
            pm25,
            pm10,
            no2,
            so2,
            o3,
            o3_8h: Some(o3_8h),
            co,
        }
        .validated()
    }

    /// Concentration for a pollutant (1-hour values; ozone returns `o3`)
    #[must_use]
    pub fn concentration(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Co => self.co,
            Pollutant::No2 => self.no2,
            Pollutant::O3 => self.o3,
            Pollutant::Pm10 => self.pm10,
            Pollutant::Pm25 => self.pm25,
            Pollutant::So2 => self.so2,
        }
    }

    /// Check every concentration for a negative value
    ///
    /// # Errors
    ///
    /// * `AqiError::NegativeConcentration` - Any value is below zero
    pub fn validate(&self) -> Result<()> {
        for pollutant in Pollutant::ALL {
            let value = self.concentration(pollutant);
            if value < 0.0 {
                return Err(AqiError::NegativeConcentration { pollutant, value });
            }
        }
        if let Some(value) = self.o3_8h {
            if value < 0.0 {
                return Err(AqiError::NegativeConcentration {
                    pollutant: Pollutant::O3,
                    value,
                });
            }
        }
        Ok(())
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

/// A reading tagged with the station that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    /// Station identifier, as used by the upstream feed
    pub station: String,
    /// The station's concentration snapshot
    pub reading: PollutantReading,
}

impl StationReading {
    /// Tag a reading with its source station
    #[must_use]
    pub fn new(station: impl Into<String>, reading: PollutantReading) -> Self {
        Self {
            station: station.into(),
            reading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_non_negative_values() {
        let reading = PollutantReading::new(12.0, 40.0, 30.0, 8.0, 90.0, 0.6).unwrap();
        assert_eq!(reading.pm25, 12.0);
        assert_eq!(reading.o3_8h, None);

        let reading = PollutantReading::with_o3_8h(12.0, 40.0, 30.0, 8.0, 90.0, 80.0, 0.6).unwrap();
        assert_eq!(reading.o3_8h, Some(80.0));
    }

    #[rstest]
    #[case(-0.1, 0.0, 0.0, 0.0, 0.0, 0.0, Pollutant::Pm25)]
    #[case(0.0, -1.0, 0.0, 0.0, 0.0, 0.0, Pollutant::Pm10)]
    #[case(0.0, 0.0, 0.0, 0.0, 0.0, -3.0, Pollutant::Co)]
    fn rejects_negative_values(
        #[case] pm25: f64,
        #[case] pm10: f64,
        #[case] no2: f64,
        #[case] so2: f64,
        #[case] o3: f64,
        #[case] co: f64,
        #[case] pollutant: Pollutant,
    ) {
        let err = PollutantReading::new(pm25, pm10, no2, so2, o3, co).unwrap_err();
        assert!(matches!(
            err,
            AqiError::NegativeConcentration { pollutant: p, .. } if p == pollutant
        ));
    }

    #[test]
    fn rejects_negative_o3_8h() {
        let err =
            PollutantReading::with_o3_8h(0.0, 0.0, 0.0, 0.0, 0.0, -80.0, 0.0).unwrap_err();
        assert!(matches!(err, AqiError::NegativeConcentration { .. }));
    }

    #[test]
    fn concentration_lookup() {
        let reading = PollutantReading::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).unwrap();
        assert_eq!(reading.concentration(Pollutant::Pm25), 1.0);
        assert_eq!(reading.concentration(Pollutant::Pm10), 2.0);
        assert_eq!(reading.concentration(Pollutant::No2), 3.0);
        assert_eq!(reading.concentration(Pollutant::So2), 4.0);
        assert_eq!(reading.concentration(Pollutant::O3), 5.0);
        assert_eq!(reading.concentration(Pollutant::Co), 6.0);
    }

    #[test]
    fn deserializes_without_o3_8h() {
        let json = r#"{"pm25":12,"pm10":40,"no2":30,"so2":8,"o3":90,"co":0.6}"#;
        let reading: PollutantReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.o3_8h, None);
    }
}
