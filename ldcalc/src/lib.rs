//! # ldcalc - Landing Distance Calculator
//!
//! Library for estimating aircraft landing distance from tabulated
//! performance charts: a pressure-altitude × temperature baseline grid and
//! three adjustment tables (weight, wind, 50 ft obstacle), chained so that
//! each stage's output distance keys the next stage's lookup.
//!
//! ## Features
//!
//! - **Pure**: immutable tables in, distances out; no I/O, no globals,
//!   no caching, safe to call concurrently
//! - **Defined everywhere**: inputs beyond chart limits are clamped or
//!   flat-extrapolated, never rejected
//! - **Smooth by default**: bilinear/linear interpolation between chart
//!   entries, with the legacy chart-style step lookup available separately
//! - **Validating loader**: raw CSV cells are coerced explicitly; malformed
//!   tables fail construction with a typed error
//!
//! ## Quick Start
//!
//! ```ignore
//! use ldcalc::{AdjustmentTable, LandingInputs, LandingTables, ReferenceGrid};
//!
//! // Raw rows come from any cell source (the CLI uses the csv crate)
//! let baseline = ReferenceGrid::from_rows(&baseline_rows)?;
//! let weight = AdjustmentTable::from_rows(&weight_rows)?;
//! let wind = AdjustmentTable::from_rows(&wind_rows)?;
//! let obstacle = AdjustmentTable::from_rows(&obstacle_rows)?;
//!
//! let tables = LandingTables::new(baseline, weight, wind, obstacle)?;
//! let est = tables.estimate(&LandingInputs {
//!     pressure_alt_ft: 2000.0,
//!     oat_c: 15.0,
//!     weight_lb: 11_500,
//!     wind_kt: 0,
//! })?;
//! println!("over 50 ft obstacle: {:.0} ft ({:.0} m)",
//!          est.over_obstacle_ft, est.over_obstacle_m);
//! ```
//!
//! ## Chart Format
//!
//! The loaders accept row-major string cells in the shape chart CSV exports
//! actually have: optional title rows, an optional leading label column, a
//! header row of integer keys, then numeric data rows. Rows with cells that
//! fail numeric coercion are dropped; structural problems (too few rows,
//! duplicate keys, non-integer headers) are [`TableError`]s.

pub mod adjust;
mod cells;
pub mod error;
pub mod grid;
pub mod pipeline;

// Re-export main types at crate root for convenience
pub use adjust::{AdjustmentTable, CorrectionCurve};
pub use error::{Result, TableError};
pub use grid::ReferenceGrid;
pub use pipeline::{
    LandingEstimate, LandingInputs, LandingTables, FT_TO_M, OBSTACLE_HEIGHT_FT,
    REFERENCE_WEIGHT_LB, REFERENCE_WIND_KT,
};
