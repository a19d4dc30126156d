//! Example comparing interpolated estimates with the legacy chart-style
//! step lookup.
//!
//! Run with: cargo run --example chart_lookup

use ldcalc::{AdjustmentTable, LandingInputs, LandingTables, ReferenceGrid, TableError};

fn main() -> Result<(), TableError> {
    let tables = LandingTables::new(
        ReferenceGrid::new(
            vec![0.0, 2000.0, 4000.0],
            vec![5.0, 15.0, 25.0, 35.0],
            vec![
                vec![2250.0, 2400.0, 2500.0, 2620.0],
                vec![2450.0, 2600.0, 2720.0, 2850.0],
                vec![2680.0, 2830.0, 2960.0, 3100.0],
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

    // Sweep pressure altitude between chart rows to show the difference:
    // interpolation is continuous, chart reading steps at each row.
    println!("Interpolated vs chart-style lookup (15 °C, 11 500 lb, calm):");
    println!("{:-<58}", "");
    println!(
        "{:>10} {:>15} {:>15}",
        "PA (ft)", "interp (ft)", "chart (ft)"
    );

    for pa in (0..=4000).step_by(500) {
        let inputs = LandingInputs {
            pressure_alt_ft: pa as f64,
            ..LandingInputs::default()
        };
        let smooth = tables.estimate(&inputs)?;
        let chart = tables.estimate_chart(&inputs)?;
        println!(
            "{:>10} {:>15.0} {:>15.0}",
            pa, smooth.over_obstacle_ft, chart.over_obstacle_ft
        );
    }

    Ok(())
}
