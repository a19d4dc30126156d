//! Chart CSV ingestion.
//!
//! The core library consumes raw string cells; this module owns the file
//! side: locating the data directory, splitting CSV records, and assembling
//! the four tables into a [`LandingTables`].

use anyhow::{Context, Result};
use ldcalc::{AdjustmentTable, LandingTables, ReferenceGrid};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Default chart filenames, matching the AFM spreadsheet export so an
/// existing data directory works unchanged.
pub const BASELINE_FILE: &str = "pressureheight_oat.csv";
pub const WEIGHT_FILE: &str = "weightadjustment.csv";
pub const WIND_FILE: &str = "wind adjustment.csv";
pub const OBSTACLE_FILE: &str = "50ft.csv";

/// Resolve the data directory from the CLI flag (clap also fills it from
/// `LDCALC_DATA_DIR`).
pub fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    data_dir.context("no data directory given; use --data-dir or set LDCALC_DATA_DIR")
}

/// Read a CSV file into raw row-major string cells.
///
/// Records are read headerless and with flexible lengths; deciding what is
/// a header, a title row or a label column is the core loader's job.
pub fn read_raw(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to read record from {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!("read {} raw rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load the four chart tables from a data directory.
pub fn load_tables(dir: &Path) -> Result<LandingTables> {
    let baseline = ReferenceGrid::from_rows(&read_raw(&dir.join(BASELINE_FILE))?)
        .with_context(|| format!("malformed baseline table {BASELINE_FILE}"))?;
    let weight = AdjustmentTable::from_rows(&read_raw(&dir.join(WEIGHT_FILE))?)
        .with_context(|| format!("malformed weight table {WEIGHT_FILE}"))?;
    let wind = AdjustmentTable::from_rows(&read_raw(&dir.join(WIND_FILE))?)
        .with_context(|| format!("malformed wind table {WIND_FILE}"))?;
    let obstacle = AdjustmentTable::from_rows(&read_raw(&dir.join(OBSTACLE_FILE))?)
        .with_context(|| format!("malformed obstacle table {OBSTACLE_FILE}"))?;

    LandingTables::new(baseline, weight, wind, obstacle)
        .context("chart tables are missing a reference column")
}
