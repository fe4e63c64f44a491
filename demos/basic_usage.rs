//! Basic Usage Example for the AQI Calculator
//!
//! Demonstrates per-pollutant sub-indices, the max-rule AQI, the primary
//! pollutant and the two built-in breakpoint tables.
//!
//! Run with: cargo run --example basic_usage

use aqi_calculator::{AqiCalculator, BreakpointTable, Pollutant, PollutantReading};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🌏 AQI Calculator - Basic Usage Example\n");

    // Example 1: One reading through the US EPA table
    println!("📊 Example 1: US EPA table");
    println!("==========================");

    let table = BreakpointTable::us_epa();
    let reading = PollutantReading::new(35.4, 60.0, 30.0, 10.0, 80.0, 2.0)?;
    print_breakdown(&table, &reading)?;

    // Example 2: The same concentrations on the china hourly-feed table,
    // which converts gas readings from µg/m³ into the breakpoint units
    println!("📊 Example 2: China hourly-feed table");
    println!("=====================================");

    let table = BreakpointTable::china_hourly();
    let reading = PollutantReading::with_o3_8h(35.4, 60.0, 30.0, 10.0, 80.0, 70.0, 2.0)?;
    print_breakdown(&table, &reading)?;

    // Example 3: Ceiling sentinel for off-scale readings
    println!("📊 Example 3: Off-scale reading");
    println!("===============================");

    let table = BreakpointTable::us_epa();
    let reading = PollutantReading::new(500.5, 0.0, 0.0, 0.0, 0.0, 0.0)?;
    let calculator = AqiCalculator::new(&table, &reading)?;
    println!(
        "PM2.5 at 500.5 µg/m³ scores {} (beyond-scale sentinel)\n",
        calculator.sub_index(Pollutant::Pm25)?
    );

    Ok(())
}

/// Compute and pretty print one reading's full breakdown
fn print_breakdown(
    table: &BreakpointTable,
    reading: &PollutantReading,
) -> Result<(), Box<dyn std::error::Error>> {
    let breakdown = AqiCalculator::new(table, reading)?.breakdown()?;

    for (pollutant, sub_index) in breakdown.sub_indices {
        println!(
            "  {:>5}: {:>3}  ({} {})",
            pollutant.to_string(),
            sub_index,
            reading.concentration(pollutant),
            pollutant.unit()
        );
    }
    println!(
        "  AQI {} ({}) - primary pollutant {}\n",
        breakdown.aqi, breakdown.level, breakdown.primary_pollutant
    );
    Ok(())
}
