//! Error Handling Example
//!
//! Walks through the failure modes the crate surfaces as typed errors
//! instead of coercing to zero or guessing.
//!
//! Run with: cargo run --example error_handling

use aqi_calculator::feed::parse_snapshot;
use aqi_calculator::{
    AqiCalculator, BreakpointTable, PollutantReading, compute_air_quality,
};

fn main() {
    println!("⚠️  AQI Calculator - Error Handling Example\n");

    // Malformed feed values: the upstream feed sends numbers as strings,
    // and anything that does not parse as a finite number is rejected
    println!("Feed parsing failures:");
    let cases = [
        ("empty body", ""),
        ("html instead of json", "<html>backend error</html>"),
        ("no records", r#"{"hourlist": []}"#),
        (
            "missing field",
            r#"{"hourlist": [{"pm25onehour": "12"}]}"#,
        ),
        (
            "malformed number",
            r#"{"hourlist": [{
                "pm25onehour": "12..3", "pm10onehour": "40", "no2onehour": "30",
                "so2onehour": "8", "o3onehour": "90", "coonehour": "0.6"
            }]}"#,
        ),
    ];
    for (description, body) in cases {
        match parse_snapshot("demo-station", body) {
            Ok(_) => println!("  ✅ {description}: unexpectedly succeeded"),
            Err(e) => println!("  ❌ {description}: {e}"),
        }
    }

    // Negative concentrations are rejected, never clamped to zero
    println!("\nReading validation:");
    match PollutantReading::new(-4.0, 0.0, 0.0, 0.0, 0.0, 0.0) {
        Ok(_) => println!("  ✅ unexpectedly accepted a negative reading"),
        Err(e) => println!("  ❌ {e}"),
    }

    // The china table's dual-window ozone rule needs the 8-hour average
    // whenever the 1-hour reading sits below the threshold
    println!("\nMissing 8-hour ozone:");
    let table = BreakpointTable::china_hourly();
    let reading = PollutantReading::new(10.0, 20.0, 30.0, 8.0, 100.0, 0.5)
        .expect("valid reading");
    match AqiCalculator::new(&table, &reading).and_then(|c| c.aqi()) {
        Ok(aqi) => println!("  ✅ unexpectedly computed AQI {aqi}"),
        Err(e) => println!("  ❌ {e}"),
    }

    // Aggregation over zero stations fails instead of dividing by zero
    println!("\nEmpty station set:");
    match compute_air_quality(&[], &BreakpointTable::us_epa()) {
        Ok(_) => println!("  ✅ unexpectedly aggregated nothing"),
        Err(e) => println!("  ❌ {e}"),
    }
}
