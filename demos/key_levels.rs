//! Example: Derive GEX key levels from a synthetic options chain
//!
//! Run with: cargo run --example key_levels

use gex_levels::prelude::*;
use serde_json::{json, Value};

fn main() {
    // Sample chain: strikes 480..=520 around a 500 spot
    let spot = 500.0;
    let mut records: Vec<Value> = Vec::new();

    for i in 0..=8 {
        let strike = 480.0 + i as f64 * 5.0;
        let moneyness: f64 = (strike - spot) / 10.0;
        let gamma = 0.02 * (-0.5 * moneyness * moneyness).exp();

        // Call OI builds above spot, put OI below
        let call_oi = if strike >= spot { 4000 + (i * 900) } else { 1500 };
        let put_oi = if strike <= spot { 9000 - (i * 700) } else { 1200 };

        records.push(json!({
            "strike": format!("{:.2}", strike),
            "type": "call",
            "open_interest": call_oi.to_string(),
            "gamma": format!("{:.5}", gamma),
            "volume": "250"
        }));
        records.push(json!({
            "strike": format!("{:.2}", strike),
            "type": "put",
            "open_interest": put_oi.to_string(),
            "gamma": format!("{:.5}", gamma),
            "volume": "310"
        }));
    }

    // One malformed record: dropped from aggregation, not fatal
    records.push(json!({"strike": "525.00", "type": "call", "open_interest": "n/a", "gamma": "0.001"}));

    let raw = json!({ "data": records });

    let profile = match analyze_chain(&raw) {
        Ok(p) => p,
        Err(e) => {
            println!("Analysis failed: {}", e);
            return;
        }
    };

    println!("=== GEX Profile ===\n");
    println!("Spot: {:.2}", spot);
    println!(
        "Contracts: {} total, {} used\n",
        profile.contracts_total, profile.contracts_used
    );

    println!("--- Net GEX by Strike ---\n");
    for point in profile.strike_profile() {
        let bar_len = (point.gex.abs() / 2000.0).round() as usize;
        let bar = if point.gex >= 0.0 { "+" } else { "-" }.repeat(bar_len.min(60));
        println!("{:>8.2} {:>12.0} {}", point.strike, point.gex, bar);
    }

    println!("\n--- Key Levels ---\n");
    println!("{}", profile.key_levels);

    if let Some(inside) = profile.key_levels.is_within_walls(spot) {
        println!(
            "\nSpot is {} the put/call walls",
            if inside { "between" } else { "outside" }
        );
    }

    let snapshot = ProcessedSnapshot::new("DEMO", &profile);
    match serde_json::to_string_pretty(&snapshot.key_levels) {
        Ok(json) => println!("\n--- key_levels JSON ---\n\n{}", json),
        Err(e) => println!("Serialization failed: {}", e),
    }
}
