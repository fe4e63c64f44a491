//! Air Quality Index Calculators
//!
//! This crate converts raw pollutant concentration readings (PM2.5, PM10,
//! NO2, SO2, O3, CO) into a standardized AQI value, a health-level label and
//! the dominant ("primary") pollutant:
//! - Piecewise-linear breakpoint interpolation onto the common 0–500 scale
//! - Max-of-sub-indices aggregation per reading
//! - Multi-station averaging with the feed's display conventions
//! - Strict parsing of an already-fetched hourly feed snapshot
//!
//! # Example
//!
//! ```rust
//! use aqi_calculator::{compute_air_quality, BreakpointTable, PollutantReading, StationReading};
//!
//! let table = BreakpointTable::us_epa();
//! let stations = vec![
//!     StationReading::new("east", PollutantReading::new(12.0, 40.0, 30.0, 8.0, 50.0, 0.6)?),
//!     StationReading::new("west", PollutantReading::new(18.0, 44.0, 28.0, 9.0, 61.0, 0.8)?),
//! ];
//!
//! let result = compute_air_quality(&stations, &table)?;
//! println!("AQI {} ({})", result.aqi_value, result.aqi_level);
//! # Ok::<(), aqi_calculator::AqiError>(())
//! ```
//!
//! Fetching, polling and entity exposure are the host's concern; the crate
//! consumes readings that have already been collected.

pub mod aggregate;
pub mod breakpoints;
pub mod calculator;
pub mod error;
pub mod feed;
pub mod level;
pub mod pollutant;
pub mod reading;

pub use aggregate::{AggregateResult, MeanValue, compute_air_quality};
pub use breakpoints::{BreakpointTable, OzonePolicy, Scale, Segment};
pub use calculator::{AqiBreakdown, AqiCalculator};
pub use error::{AqiError, Result};
pub use level::AqiLevel;
pub use pollutant::Pollutant;
pub use reading::{PollutantReading, StationReading};
