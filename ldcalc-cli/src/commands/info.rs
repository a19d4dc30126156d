use anyhow::Result;
use std::path::PathBuf;

use crate::load;

pub fn run(data_dir: Option<PathBuf>) -> Result<()> {
    let dir = load::resolve_data_dir(data_dir)?;
    let tables = load::load_tables(&dir)?;

    println!("Chart tables in {}", dir.display());
    println!("{:-<60}", "");

    let grid = tables.baseline();
    let (rows, cols) = (grid.row_keys(), grid.col_keys());
    println!("Baseline grid ({}):", load::BASELINE_FILE);
    println!("  {} rows x {} columns", rows.len(), cols.len());
    println!(
        "  pressure altitude: {:.0} - {:.0} ft",
        rows[0],
        rows[rows.len() - 1]
    );
    println!("  OAT: {:.0} - {:.0} C", cols[0], cols[cols.len() - 1]);

    let weight = tables.weight();
    println!("Weight adjustment ({}):", load::WEIGHT_FILE);
    println!("  columns (lb): {:?}", weight.col_keys());

    let wind = tables.wind();
    println!("Wind adjustment ({}):", load::WIND_FILE);
    println!("  columns (kt): {:?}", wind.col_keys());

    let curve = tables.obstacle();
    let points = curve.points();
    println!("Obstacle correction ({}):", load::OBSTACLE_FILE);
    println!(
        "  {} points, reference distance {:.0} - {:.0} ft",
        points.len(),
        points[0].0,
        points[points.len() - 1].0
    );

    Ok(())
}
