//! Per-reading AQI computation
//!
//! [`AqiCalculator`] borrows one reading and one breakpoint table and derives
//! the six sub-indices, the final AQI (the maximum sub-index, never an
//! average) and the primary pollutant. All derivations are pure; the
//! calculator holds no state beyond its two borrows.

use serde::Serialize;

use crate::breakpoints::BreakpointTable;
use crate::error::Result;
use crate::level::AqiLevel;
use crate::pollutant::Pollutant;
use crate::reading::PollutantReading;

/// Computes sub-indices and the aggregate AQI for one reading
#[derive(Debug, Clone, Copy)]
pub struct AqiCalculator<'a> {
    table: &'a BreakpointTable,
    reading: &'a PollutantReading,
}

/// Full derivation for one reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiBreakdown {
    /// Sub-indices in canonical pollutant order
    pub sub_indices: [(Pollutant, u16); 6],
    /// Final AQI: the maximum sub-index
    pub aqi: u16,
    /// First pollutant in canonical order that reaches the maximum
    pub primary_pollutant: Pollutant,
    /// Level band of the final AQI
    pub level: AqiLevel,
}

impl<'a> AqiCalculator<'a> {
    /// Pair a validated reading with a breakpoint table
    ///
    /// # Errors
    ///
    /// * `AqiError::NegativeConcentration` - The reading carries a negative value
    pub fn new(table: &'a BreakpointTable, reading: &'a PollutantReading) -> Result<Self> {
        reading.validate()?;
        Ok(Self { table, reading })
    }

    /// Sub-index for one pollutant
    ///
    /// # Errors
    ///
    /// * `AqiError::MissingReading` - The table's ozone rule needs an 8-hour
    ///   average the reading does not carry
    pub fn sub_index(&self, pollutant: Pollutant) -> Result<u16> {
        self.table.sub_index(pollutant, self.reading)
    }

    /// Final AQI: the maximum of the six sub-indices
    ///
    /// # Errors
    ///
    /// Propagates [`AqiCalculator::sub_index`] errors.
    pub fn aqi(&self) -> Result<u16> {
        Ok(self.breakdown()?.aqi)
    }

    /// The pollutant responsible for the final AQI
    ///
    /// Ties are broken by the canonical pollutant order: the first pollutant
    /// reaching the maximum wins.
    ///
    /// # Errors
    ///
    /// Propagates [`AqiCalculator::sub_index`] errors.
    pub fn primary_pollutant(&self) -> Result<Pollutant> {
        Ok(self.breakdown()?.primary_pollutant)
    }

    /// Compute all six sub-indices plus the aggregate values in one pass
    ///
    /// # Errors
    ///
    /// Propagates [`AqiCalculator::sub_index`] errors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use aqi_calculator::{AqiCalculator, BreakpointTable, PollutantReading};
    ///
    /// let table = BreakpointTable::us_epa();
    /// let reading = PollutantReading::new(12.0, 40.0, 30.0, 8.0, 50.0, 0.6)?;
    /// let breakdown = AqiCalculator::new(&table, &reading)?.breakdown()?;
    ///
    /// assert_eq!(breakdown.aqi, 50);
    /// # Ok::<(), aqi_calculator::AqiError>(())
    /// ```
    pub fn breakdown(&self) -> Result<AqiBreakdown> {
        let mut sub_indices = [(Pollutant::Co, 0u16); 6];
        for (slot, pollutant) in sub_indices.iter_mut().zip(Pollutant::ALL) {
            *slot = (pollutant, self.sub_index(pollutant)?);
        }

        // First maximum in canonical order wins the tie-break
        let (primary_pollutant, aqi) = sub_indices
            .iter()
            .copied()
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
            .unwrap_or((Pollutant::Co, 0));

        Ok(AqiBreakdown {
            sub_indices,
            aqi,
            primary_pollutant,
            level: AqiLevel::from_aqi(aqi),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AqiError;

    fn single_pollutant(pollutant: Pollutant, value: f64) -> PollutantReading {
        let mut reading = PollutantReading::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        match pollutant {
            Pollutant::Co => reading.co = value,
            Pollutant::No2 => reading.no2 = value,
            Pollutant::O3 => reading.o3 = value,
            Pollutant::Pm10 => reading.pm10 = value,
            Pollutant::Pm25 => reading.pm25 = value,
            Pollutant::So2 => reading.so2 = value,
        }
        reading
    }

    #[test]
    fn aqi_is_the_maximum_sub_index() {
        let table = BreakpointTable::us_epa();
        let reading = PollutantReading::new(40.0, 60.0, 30.0, 10.0, 80.0, 2.0).unwrap();
        let breakdown = AqiCalculator::new(&table, &reading).unwrap().breakdown().unwrap();

        let max = breakdown
            .sub_indices
            .iter()
            .map(|(_, index)| *index)
            .max()
            .unwrap();
        assert_eq!(breakdown.aqi, max);
        assert!(breakdown
            .sub_indices
            .iter()
            .all(|(_, index)| *index <= breakdown.aqi));
        // o3 = 80 is the worst reading here: band 71..85 maps to 101..150
        assert_eq!(breakdown.primary_pollutant, Pollutant::O3);
    }

    #[test]
    fn dominant_pollutant_is_reported() {
        let table = BreakpointTable::us_epa();
        for pollutant in [Pollutant::No2, Pollutant::Pm25, Pollutant::So2] {
            let reading = single_pollutant(pollutant, 300.0);
            let calculator = AqiCalculator::new(&table, &reading).unwrap();
            assert_eq!(calculator.primary_pollutant().unwrap(), pollutant);
        }
    }

    #[test]
    fn ties_resolve_in_canonical_order() {
        let table = BreakpointTable::us_epa();
        // All six sub-indices are zero; CO is first in canonical order
        let reading = PollutantReading::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let calculator = AqiCalculator::new(&table, &reading).unwrap();
        assert_eq!(calculator.primary_pollutant().unwrap(), Pollutant::Co);
        assert_eq!(calculator.aqi().unwrap(), 0);

        // NO2 53 and SO2 35 both score exactly 50; NO2 precedes SO2
        let reading = PollutantReading::new(0.0, 0.0, 53.0, 35.0, 0.0, 0.0).unwrap();
        let calculator = AqiCalculator::new(&table, &reading).unwrap();
        assert_eq!(calculator.aqi().unwrap(), 50);
        assert_eq!(calculator.primary_pollutant().unwrap(), Pollutant::No2);
    }

    #[test]
    fn level_follows_the_aqi() {
        let table = BreakpointTable::us_epa();
        let reading = single_pollutant(Pollutant::Pm25, 35.4);
        let breakdown = AqiCalculator::new(&table, &reading).unwrap().breakdown().unwrap();
        assert_eq!(breakdown.aqi, 100);
        assert_eq!(breakdown.level, AqiLevel::Moderate);
    }

    #[test]
    fn rejects_invalid_reading() {
        let table = BreakpointTable::us_epa();
        let mut reading = PollutantReading::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        reading.pm10 = -1.0;
        let err = AqiCalculator::new(&table, &reading).unwrap_err();
        assert!(matches!(err, AqiError::NegativeConcentration { .. }));
    }

    #[test]
    fn china_table_requires_eight_hour_ozone_below_threshold() {
        let table = BreakpointTable::china_hourly();
        let reading = PollutantReading::new(10.0, 20.0, 30.0, 8.0, 100.0, 0.5).unwrap();
        let calculator = AqiCalculator::new(&table, &reading).unwrap();
        assert_eq!(calculator.aqi().unwrap_err(), AqiError::missing("o3_8h"));

        let reading =
            PollutantReading::with_o3_8h(10.0, 20.0, 30.0, 8.0, 100.0, 100.0, 0.5).unwrap();
        let calculator = AqiCalculator::new(&table, &reading).unwrap();
        assert_eq!(calculator.sub_index(Pollutant::O3).unwrap(), 47);
    }
}
