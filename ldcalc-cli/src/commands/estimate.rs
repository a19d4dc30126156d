use anyhow::{Context, Result};
use ldcalc::LandingInputs;
use serde::Serialize;
use std::path::PathBuf;

use crate::load;

#[derive(Serialize)]
struct EstimateResponse {
    pressure_alt_ft: f64,
    oat_c: f64,
    weight_lb: i32,
    wind_kt: i32,
    baseline_ft: f64,
    weight_adjusted_ft: f64,
    wind_adjusted_ft: f64,
    over_obstacle_ft: f64,
    over_obstacle_m: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    chart: bool,
}

pub fn run(
    data_dir: Option<PathBuf>,
    pressure_alt: f64,
    oat: f64,
    weight: i32,
    wind: i32,
    chart: bool,
    json: bool,
) -> Result<()> {
    let dir = load::resolve_data_dir(data_dir)?;
    let tables = load::load_tables(&dir)?;

    let inputs = LandingInputs {
        pressure_alt_ft: pressure_alt,
        oat_c: oat,
        weight_lb: weight,
        wind_kt: wind,
    };
    let est = if chart {
        tables.estimate_chart(&inputs)
    } else {
        tables.estimate(&inputs)
    }
    .context("failed to estimate landing distance")?;

    if json {
        let response = EstimateResponse {
            pressure_alt_ft: pressure_alt,
            oat_c: oat,
            weight_lb: weight,
            wind_kt: wind,
            baseline_ft: est.baseline_ft,
            weight_adjusted_ft: est.weight_adjusted_ft,
            wind_adjusted_ft: est.wind_adjusted_ft,
            over_obstacle_ft: est.over_obstacle_ft,
            over_obstacle_m: est.over_obstacle_m,
            chart,
        };
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    // The four chart steps, in reading order
    println!("Step 1: baseline distance");
    println!("  pressure altitude {:.0} ft, OAT {:.0} C", pressure_alt, oat);
    println!("  baseline landing distance: {:.0} ft", est.baseline_ft);

    println!("Step 2: weight adjustment");
    println!("  weight {} lb", weight);
    println!("  weight-adjusted distance: {:.0} ft", est.weight_adjusted_ft);

    println!("Step 3: wind adjustment");
    println!(
        "  wind {:+} kt, delta {:+.0} ft",
        wind,
        est.wind_adjusted_ft - est.weight_adjusted_ft
    );
    println!("  wind-adjusted distance: {:.0} ft", est.wind_adjusted_ft);

    println!("Step 4: 50 ft obstacle correction");
    println!(
        "  final landing distance: {:.0} ft ({:.1} m)",
        est.over_obstacle_ft, est.over_obstacle_m
    );

    Ok(())
}
