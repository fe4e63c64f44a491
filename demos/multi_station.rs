//! Multi-Station Aggregation Example
//!
//! Parses hourly feed snapshots for several stations and combines them into
//! one air-quality result, the way a host integration would on every poll.
//!
//! Run with: cargo run --example multi_station

use aqi_calculator::feed::parse_snapshot;
use aqi_calculator::{BreakpointTable, StationReading, compute_air_quality};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🗺️  AQI Calculator - Multi-Station Example\n");

    // Two snapshots as the upstream endpoint returns them: the newest
    // hourly record per station, concentrations as numeric strings
    let snapshots = [
        (
            "洪山地大",
            r#"{"hourlist": [{
                "createtime": "2024-06-01 14:00",
                "pm25onehour": "18", "pm10onehour": "52", "no2onehour": "35",
                "so2onehour": "9", "o3onehour": "96", "coonehour": "0.7",
                "o3eighthour": "88"
            }]}"#,
        ),
        (
            "东湖梨园",
            r#"{"hourlist": [{
                "createtime": "2024-06-01 14:00",
                "pm25onehour": "22", "pm10onehour": "61", "no2onehour": "41",
                "so2onehour": "11", "o3onehour": "104", "coonehour": "0.9",
                "o3eighthour": "95"
            }]}"#,
        ),
    ];

    let mut stations: Vec<StationReading> = Vec::new();
    for (station, body) in snapshots {
        let snapshot = parse_snapshot(station, body)?;
        println!(
            "📡 {} at {}: PM2.5 {} µg/m³",
            snapshot.station,
            snapshot.time.as_deref().unwrap_or("unknown time"),
            snapshot.reading.pm25
        );
        stations.push(snapshot.into_station_reading());
    }

    let table = BreakpointTable::china_hourly();
    let result = compute_air_quality(&stations, &table)?;

    println!("\n✅ Combined result for {}:", result.source_stations);
    println!("   AQI {} ({})", result.aqi_value, result.aqi_level);
    println!(
        "   Primary pollutant: {} ({} in {})",
        result.primary_pollutant,
        result.pollutant_symbol(),
        result.pollutant_unit()
    );
    println!(
        "   Averages: PM2.5 {}, PM10 {}, NO2 {}, SO2 {}, O3 {}, CO {}",
        result.pm25, result.pm10, result.no2, result.so2, result.o3, result.co
    );

    println!("\n   As the presentation layer sees it:");
    println!("   {}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
