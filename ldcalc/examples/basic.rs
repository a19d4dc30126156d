//! Basic example demonstrating the ldcalc pipeline.
//!
//! Run with: cargo run --example basic

use ldcalc::{AdjustmentTable, LandingInputs, LandingTables, ReferenceGrid, TableError};

fn main() -> Result<(), TableError> {
    let tables = LandingTables::new(
        ReferenceGrid::new(
            vec![0.0, 2000.0, 4000.0, 6000.0],
            vec![-5.0, 5.0, 15.0, 25.0, 35.0, 45.0],
            vec![
                vec![2100.0, 2250.0, 2400.0, 2500.0, 2620.0, 2760.0],
                vec![2300.0, 2450.0, 2600.0, 2720.0, 2850.0, 3010.0],
                vec![2520.0, 2680.0, 2830.0, 2960.0, 3100.0, 3280.0],
                vec![2760.0, 2930.0, 3090.0, 3240.0, 3400.0, 3590.0],
            ],
        )?,
        AdjustmentTable::new(
            vec![9000, 10500, 11500, 12500],
            vec![
                vec![1600.0, 1750.0, 1900.0, 2000.0],
                vec![2400.0, 2650.0, 2820.0, 3000.0],
                vec![3200.0, 3550.0, 3750.0, 4000.0],
            ],
        )?,
        AdjustmentTable::new(
            vec![-20, -10, 0, 10, 20, 30],
            vec![
                vec![2600.0, 2350.0, 2000.0, 1800.0, 1650.0, 1550.0],
                vec![3700.0, 3300.0, 3000.0, 2700.0, 2500.0, 2350.0],
                vec![4800.0, 4300.0, 4000.0, 3600.0, 3350.0, 3150.0],
            ],
        )?,
        AdjustmentTable::new(
            vec![0, 50],
            vec![
                vec![2000.0, 2600.0],
                vec![3000.0, 3800.0],
                vec![4000.0, 5100.0],
            ],
        )?,
    )?;

    // A few representative scenarios
    let scenarios = [
        ("sea level, standard day", LandingInputs {
            pressure_alt_ft: 0.0,
            oat_c: 15.0,
            weight_lb: 12_500,
            wind_kt: 0,
        }),
        ("hot and high, light", LandingInputs {
            pressure_alt_ft: 6000.0,
            oat_c: 35.0,
            weight_lb: 9500,
            wind_kt: 10,
        }),
        ("tailwind at max weight", LandingInputs {
            pressure_alt_ft: 2000.0,
            oat_c: 25.0,
            weight_lb: 12_500,
            wind_kt: -10,
        }),
    ];

    for (name, inputs) in &scenarios {
        let est = tables.estimate(inputs)?;
        println!("{}:", name);
        println!("  baseline:        {:7.0} ft", est.baseline_ft);
        println!("  weight adjusted: {:7.0} ft", est.weight_adjusted_ft);
        println!("  wind adjusted:   {:7.0} ft", est.wind_adjusted_ft);
        println!(
            "  over 50 ft:      {:7.0} ft ({:.0} m)",
            est.over_obstacle_ft, est.over_obstacle_m
        );
    }

    Ok(())
}
