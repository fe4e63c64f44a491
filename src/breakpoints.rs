//! Breakpoint tables and sub-index interpolation
//!
//! A [`BreakpointTable`] maps raw concentrations onto the common 0–500 index
//! scale through piecewise-linear interpolation over ordered concentration
//! segments. Tables are plain data: the two built-in standard variants are
//! constructed by [`BreakpointTable::us_epa`] and
//! [`BreakpointTable::china_hourly`], and custom revisions can be assembled
//! from the same building blocks without touching the calculator.

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};
use crate::pollutant::Pollutant;
use crate::reading::PollutantReading;

/// Ceiling sub-index returned for concentrations beyond the top segment
pub const INDEX_CEILING: u16 = 500;

/// One concentration interval with its index range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Lower concentration bound of the interval
    pub low: f64,
    /// Upper concentration bound of the interval (inclusive)
    pub high: f64,
    /// Index value at the lower bound
    pub index_low: u16,
    /// Index value at the upper bound
    pub index_high: u16,
}

/// Per-pollutant index scale: a unit conversion factor and ordered segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Multiplicative unit conversion applied before the segment lookup
    pub factor: f64,
    /// Segments in ascending concentration order
    pub segments: Vec<Segment>,
}

impl Scale {
    /// Build a scale that needs no unit conversion
    #[must_use]
    pub fn new(segments: &[Segment]) -> Self {
        Self::with_factor(1.0, segments)
    }

    /// Build a scale whose input is multiplied by `factor` first
    #[must_use]
    pub fn with_factor(factor: f64, segments: &[Segment]) -> Self {
        Self {
            factor,
            segments: segments.to_vec(),
        }
    }

    /// Map a raw concentration onto the 0–500 index scale
    ///
    /// The concentration is converted with the scale's factor, then located
    /// in the segment list. Up to the first segment's high bound the implicit
    /// `[0, high]` interval with index 0 at the origin applies; beyond the
    /// top segment the ceiling sentinel 500 is returned. Interpolated values
    /// round half away from zero.
    #[must_use]
    pub fn sub_index(&self, concentration: f64) -> u16 {
        let c = concentration * self.factor;
        let Some(first) = self.segments.first() else {
            return INDEX_CEILING;
        };
        if c <= first.high {
            return round_index(f64::from(first.index_high) / first.high * c);
        }
        for segment in &self.segments[1..] {
            if c <= segment.high {
                let span = f64::from(segment.index_high - segment.index_low);
                let value = span / (segment.high - segment.low) * (c - segment.low)
                    + f64::from(segment.index_low);
                return round_index(value);
            }
        }
        INDEX_CEILING
    }

    fn validate(&self, pollutant: &str) -> Result<()> {
        if self.factor <= 0.0 {
            return Err(AqiError::InvalidTable(format!(
                "{pollutant}: conversion factor must be positive"
            )));
        }
        if self.segments.is_empty() {
            return Err(AqiError::InvalidTable(format!("{pollutant}: no segments")));
        }
        for window in self.segments.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if next.low <= prev.high || next.index_low <= prev.index_high {
                return Err(AqiError::InvalidTable(format!(
                    "{pollutant}: segments out of order at {}..{}",
                    next.low, next.high
                )));
            }
        }
        for segment in &self.segments {
            if segment.high <= segment.low || segment.index_high < segment.index_low {
                return Err(AqiError::InvalidTable(format!(
                    "{pollutant}: degenerate segment {}..{}",
                    segment.low, segment.high
                )));
            }
        }
        Ok(())
    }
}

/// How a table evaluates ozone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OzonePolicy {
    /// A single scale applied to the 1-hour reading
    SingleWindow(Scale),
    /// Two averaging windows: below the raw 1-hour threshold the 8-hour
    /// average is scored, at or above it the 1-hour reading is
    DualWindow {
        /// Threshold in raw (unconverted) 1-hour µg/m³
        raw_threshold: f64,
        /// Scale for the 1-hour reading
        one_hour: Scale,
        /// Scale for the 8-hour average
        eight_hour: Scale,
    },
}

/// A complete breakpoint standard: one scale per pollutant plus the ozone rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointTable {
    pub pm25: Scale,
    pub pm10: Scale,
    pub no2: Scale,
    pub so2: Scale,
    pub co: Scale,
    pub ozone: OzonePolicy,
}

impl BreakpointTable {
    /// US EPA breakpoints, readings scored in their feed units unchanged
    #[must_use]
    pub fn us_epa() -> Self {
        Self {
            pm25: Scale::new(&US_PM25),
            pm10: Scale::new(&US_PM10),
            no2: Scale::new(&US_NO2),
            so2: Scale::new(&US_SO2),
            co: Scale::new(&US_CO),
            ozone: OzonePolicy::SingleWindow(Scale::new(&US_O3_1H)),
        }
    }

    /// China hourly-feed variant: µg/m³ readings converted to the ppb/ppm
    /// breakpoint units, with the dual-window ozone rule
    #[must_use]
    pub fn china_hourly() -> Self {
        Self {
            pm25: Scale::new(&CN_PM25),
            pm10: Scale::new(&CN_PM10),
            // µg/m³ → ppb, 24.45 / 46.0055
            no2: Scale::with_factor(0.5315, &US_NO2_LOW),
            // µg/m³ → ppb, 24.45 / 64.066
            so2: Scale::with_factor(0.3816, &CN_SO2),
            // mg/m³ → ppm, 24.45 / 28.01
            co: Scale::with_factor(0.8729, &CN_CO),
            ozone: OzonePolicy::DualWindow {
                raw_threshold: 125.0,
                // µg/m³ → ppb, 24.45 / 48
                one_hour: Scale::with_factor(0.5094, &CN_O3_1H),
                eight_hour: Scale::with_factor(0.5094, &US_O3_1H),
            },
        }
    }

    /// Sub-index for one pollutant of a reading
    ///
    /// # Errors
    ///
    /// * `AqiError::MissingReading` - The ozone rule needs an 8-hour average
    ///   the reading does not carry
    pub fn sub_index(&self, pollutant: Pollutant, reading: &PollutantReading) -> Result<u16> {
        match pollutant {
            Pollutant::O3 => self.ozone_sub_index(reading.o3, reading.o3_8h),
            Pollutant::Co => Ok(self.co.sub_index(reading.co)),
            Pollutant::No2 => Ok(self.no2.sub_index(reading.no2)),
            Pollutant::Pm10 => Ok(self.pm10.sub_index(reading.pm10)),
            Pollutant::Pm25 => Ok(self.pm25.sub_index(reading.pm25)),
            Pollutant::So2 => Ok(self.so2.sub_index(reading.so2)),
        }
    }

    /// Ozone sub-index from the 1-hour reading and optional 8-hour average
    ///
    /// # Errors
    ///
    /// * `AqiError::MissingReading` - The dual-window rule selected the
    ///   8-hour path and no 8-hour average is present
    pub fn ozone_sub_index(&self, o3: f64, o3_8h: Option<f64>) -> Result<u16> {
        match &self.ozone {
            OzonePolicy::SingleWindow(scale) => Ok(scale.sub_index(o3)),
            OzonePolicy::DualWindow {
                raw_threshold,
                one_hour,
                eight_hour,
            } => {
                if o3 < *raw_threshold {
                    let average = o3_8h.ok_or_else(|| AqiError::missing("o3_8h"))?;
                    Ok(eight_hour.sub_index(average))
                } else {
                    Ok(one_hour.sub_index(o3))
                }
            }
        }
    }

    /// Check the segment ordering invariant on every scale
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidTable` - A scale has unordered, overlapping or
    ///   degenerate segments, or a non-positive conversion factor
    pub fn validate(&self) -> Result<()> {
        self.pm25.validate("pm25")?;
        self.pm10.validate("pm10")?;
        self.no2.validate("no2")?;
        self.so2.validate("so2")?;
        self.co.validate("co")?;
        match &self.ozone {
            OzonePolicy::SingleWindow(scale) => scale.validate("o3"),
            OzonePolicy::DualWindow {
                raw_threshold,
                one_hour,
                eight_hour,
            } => {
                if *raw_threshold <= 0.0 {
                    return Err(AqiError::InvalidTable(
                        "o3: window threshold must be positive".to_string(),
                    ));
                }
                one_hour.validate("o3 1h")?;
                eight_hour.validate("o3 8h")
            }
        }
    }
}

/// Round half away from zero, the rounding rule pinned for every formula
fn round_index(value: f64) -> u16 {
    value.round() as u16
}

const fn seg(low: f64, high: f64, index_low: u16, index_high: u16) -> Segment {
    Segment {
        low,
        high,
        index_low,
        index_high,
    }
}

const US_PM25: [Segment; 7] = [
    seg(0.0, 12.0, 0, 50),
    seg(12.1, 35.4, 51, 100),
    seg(35.5, 55.4, 101, 150),
    seg(55.5, 150.4, 151, 200),
    seg(150.5, 250.4, 201, 300),
    seg(250.5, 350.4, 301, 400),
    seg(350.5, 500.4, 401, 500),
];

const US_PM10: [Segment; 7] = [
    seg(0.0, 54.0, 0, 50),
    seg(55.0, 154.0, 51, 100),
    seg(155.0, 254.0, 101, 150),
    seg(255.0, 354.0, 151, 200),
    seg(355.0, 424.0, 201, 300),
    seg(425.0, 504.0, 301, 400),
    seg(505.0, 604.0, 401, 500),
];

const US_NO2: [Segment; 7] = [
    seg(0.0, 53.0, 0, 50),
    seg(54.0, 100.0, 51, 100),
    seg(101.0, 360.0, 101, 150),
    seg(361.0, 649.0, 151, 200),
    seg(650.0, 1249.0, 201, 300),
    seg(1250.0, 1649.0, 301, 400),
    seg(1650.0, 2049.0, 401, 500),
];

const US_SO2: [Segment; 7] = [
    seg(0.0, 35.0, 0, 50),
    seg(36.0, 75.0, 51, 100),
    seg(76.0, 185.0, 101, 150),
    seg(186.0, 304.0, 151, 200),
    seg(305.0, 604.0, 201, 300),
    seg(605.0, 804.0, 301, 400),
    seg(805.0, 1004.0, 401, 500),
];

const US_O3_1H: [Segment; 5] = [
    seg(0.0, 54.0, 0, 50),
    seg(55.0, 70.0, 51, 100),
    seg(71.0, 85.0, 101, 150),
    seg(86.0, 105.0, 151, 200),
    seg(106.0, 200.0, 201, 300),
];

const US_CO: [Segment; 7] = [
    seg(0.0, 4.4, 0, 50),
    seg(4.5, 9.4, 51, 100),
    seg(9.5, 12.4, 101, 150),
    seg(12.5, 15.4, 151, 200),
    seg(15.5, 30.4, 201, 300),
    seg(30.5, 40.4, 301, 400),
    seg(40.5, 50.4, 401, 500),
];

// 2024 revision of the PM2.5 bands (Good band tops out at 9.0 µg/m³)
const CN_PM25: [Segment; 6] = [
    seg(0.0, 9.0, 0, 50),
    seg(9.1, 35.4, 51, 100),
    seg(35.5, 55.4, 101, 150),
    seg(55.5, 125.4, 151, 200),
    seg(125.5, 225.4, 201, 300),
    seg(225.5, 325.4, 301, 500),
];

const CN_PM10: [Segment; 6] = [
    seg(0.0, 54.0, 0, 50),
    seg(55.0, 154.0, 51, 100),
    seg(155.0, 254.0, 101, 150),
    seg(255.0, 354.0, 151, 200),
    seg(355.0, 424.0, 201, 300),
    seg(425.0, 604.0, 301, 400),
];

// First five bands match US_NO2; the hourly feed folds everything above
// 1249 ppb into a single top band
const US_NO2_LOW: [Segment; 6] = [
    seg(0.0, 53.0, 0, 50),
    seg(54.0, 100.0, 51, 100),
    seg(101.0, 360.0, 101, 150),
    seg(361.0, 649.0, 151, 200),
    seg(650.0, 1249.0, 201, 300),
    seg(1250.0, 2049.0, 301, 400),
];

const CN_SO2: [Segment; 6] = [
    seg(0.0, 35.0, 0, 50),
    seg(36.0, 75.0, 51, 100),
    seg(76.0, 185.0, 101, 150),
    seg(186.0, 304.0, 151, 200),
    seg(305.0, 604.0, 201, 300),
    seg(605.0, 1004.0, 301, 400),
];

// 1-hour ozone has no bands below index 101; sub-threshold values are
// normally scored on the 8-hour scale instead
const CN_O3_1H: [Segment; 4] = [
    seg(125.0, 164.0, 101, 150),
    seg(165.0, 204.0, 151, 200),
    seg(205.0, 404.0, 201, 300),
    seg(405.0, 604.0, 301, 400),
];

const CN_CO: [Segment; 6] = [
    seg(0.0, 4.4, 0, 50),
    seg(4.5, 9.4, 51, 100),
    seg(9.5, 12.4, 101, 150),
    seg(12.5, 15.4, 151, 200),
    seg(15.5, 30.4, 201, 300),
    seg(30.5, 50.4, 301, 400),
];
