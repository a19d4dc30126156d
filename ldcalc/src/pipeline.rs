//! The four-stage landing distance pipeline.
//!
//! [`LandingTables`] bundles the immutable reference tables and runs the
//! estimate: baseline grid lookup, weight adjustment, wind adjustment,
//! obstacle correction, unit conversion. Each stage's output distance is
//! the next stage's interpolation key: the weight and wind deltas are
//! looked up at the adjusted distance so far, not at the original baseline.

use crate::adjust::{AdjustmentTable, CorrectionCurve};
use crate::error::{Result, TableError};
use crate::grid::ReferenceGrid;

/// Canonical gross weight (lb) against which weight deltas are tabulated.
pub const REFERENCE_WEIGHT_LB: i32 = 12_500;

/// Canonical wind (kt) against which wind deltas are tabulated.
pub const REFERENCE_WIND_KT: i32 = 0;

/// Obstacle height (ft) of the final correction stage.
pub const OBSTACLE_HEIGHT_FT: i32 = 50;

/// Key column of the obstacle table: distance with no obstacle.
const NO_OBSTACLE_FT: i32 = 0;

/// Feet to meters.
pub const FT_TO_M: f64 = 0.3048;

/// The four scalar inputs to one estimate.
///
/// Values outside the tabulated ranges are clamped (baseline grid) or
/// flat-extrapolated (adjustment stages) rather than rejected; slight
/// overshoot of chart limits is operationally plausible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingInputs {
    /// Pressure altitude in feet (charts cover 0–10 000).
    pub pressure_alt_ft: f64,
    /// Outside air temperature in °C (charts cover -5–45).
    pub oat_c: f64,
    /// Landing weight in lb (charts cover 9 000–12 500).
    pub weight_lb: i32,
    /// Wind speed in kt; negative is tailwind (charts cover -20–30).
    pub wind_kt: i32,
}

impl Default for LandingInputs {
    /// A mid-chart scenario: 2 000 ft, 15 °C, 11 500 lb, calm wind.
    fn default() -> Self {
        Self {
            pressure_alt_ft: 2000.0,
            oat_c: 15.0,
            weight_lb: 11_500,
            wind_kt: 0,
        }
    }
}

/// The intermediate and final distances of one estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingEstimate {
    /// Baseline distance at reference weight and wind, ft.
    pub baseline_ft: f64,
    /// Distance after the weight adjustment, ft.
    pub weight_adjusted_ft: f64,
    /// Distance after the wind adjustment, ft.
    pub wind_adjusted_ft: f64,
    /// Final distance over the 50 ft obstacle, ft.
    pub over_obstacle_ft: f64,
    /// Final distance over the 50 ft obstacle, m.
    pub over_obstacle_m: f64,
}

/// The immutable reference tables behind the pipeline.
///
/// Construction validates the reference columns once, so a malformed table
/// set fails before any computation. After that the struct is read-only:
/// estimates take `&self`, hold no state between invocations, and are safe
/// to run concurrently without coordination.
///
/// # Example
///
/// ```ignore
/// use ldcalc::{LandingInputs, LandingTables};
///
/// let tables = LandingTables::new(baseline, weight, wind, obstacle)?;
/// let est = tables.estimate(&LandingInputs::default())?;
/// println!("{:.0} ft / {:.0} m", est.over_obstacle_ft, est.over_obstacle_m);
/// ```
#[derive(Debug, Clone)]
pub struct LandingTables {
    baseline: ReferenceGrid,
    weight: AdjustmentTable,
    wind: AdjustmentTable,
    obstacle: CorrectionCurve,
}

impl LandingTables {
    /// Bundle the four tables, validating their reference columns.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if the weight table has no
    /// 12 500 lb column, the wind table no 0 kt column, or the obstacle
    /// table is missing its 0 ft / 50 ft pair.
    pub fn new(
        baseline: ReferenceGrid,
        weight: AdjustmentTable,
        wind: AdjustmentTable,
        obstacle: AdjustmentTable,
    ) -> Result<Self> {
        if !weight.has_column(REFERENCE_WEIGHT_LB) {
            return Err(TableError::UnknownColumn {
                key: REFERENCE_WEIGHT_LB,
            });
        }
        if !wind.has_column(REFERENCE_WIND_KT) {
            return Err(TableError::UnknownColumn {
                key: REFERENCE_WIND_KT,
            });
        }
        let obstacle = obstacle.curve(NO_OBSTACLE_FT, OBSTACLE_HEIGHT_FT)?;

        Ok(Self {
            baseline,
            weight,
            wind,
            obstacle,
        })
    }

    /// Run the pipeline with interpolated lookups (the primary contract).
    ///
    /// Stages, in order:
    ///
    /// 1. baseline: bilinear grid lookup at (pressure altitude, OAT)
    /// 2. weight: delta vs the 12 500 lb column, keyed at the baseline
    /// 3. wind: delta vs the 0 kt column, keyed at the weight-adjusted
    ///    distance
    /// 4. obstacle: direct curve lookup at the wind-adjusted distance
    /// 5. ft → m conversion of the result
    pub fn estimate(&self, inputs: &LandingInputs) -> Result<LandingEstimate> {
        let baseline = self.baseline.value_at(inputs.pressure_alt_ft, inputs.oat_c);
        let weight_adj = self
            .weight
            .adjust(baseline, inputs.weight_lb, REFERENCE_WEIGHT_LB)?;
        let wind_adj = self.wind.adjust(weight_adj, inputs.wind_kt, REFERENCE_WIND_KT)?;
        let over = self.obstacle.value_at(wind_adj);

        Ok(LandingEstimate {
            baseline_ft: baseline,
            weight_adjusted_ft: weight_adj,
            wind_adjusted_ft: wind_adj,
            over_obstacle_ft: over,
            over_obstacle_m: over * FT_TO_M,
        })
    }

    /// Run the pipeline with chart-style step lookups (legacy).
    ///
    /// Reproduces how the printed chart is read: greatest tabulated entry
    /// at or below the target at every stage. Output is step-discontinuous
    /// in all four inputs; prefer [`Self::estimate`] unless matching
    /// hand-computed chart figures.
    pub fn estimate_chart(&self, inputs: &LandingInputs) -> Result<LandingEstimate> {
        let baseline = self.baseline.value_floor(inputs.pressure_alt_ft, inputs.oat_c);
        let weight_adj = self
            .weight
            .adjust_floor(baseline, inputs.weight_lb, REFERENCE_WEIGHT_LB)?;
        let wind_adj = self
            .wind
            .adjust_floor(weight_adj, inputs.wind_kt, REFERENCE_WIND_KT)?;
        let over = self.obstacle.value_floor(wind_adj);

        Ok(LandingEstimate {
            baseline_ft: baseline,
            weight_adjusted_ft: weight_adj,
            wind_adjusted_ft: wind_adj,
            over_obstacle_ft: over,
            over_obstacle_m: over * FT_TO_M,
        })
    }

    /// The baseline grid.
    pub fn baseline(&self) -> &ReferenceGrid {
        &self.baseline
    }

    /// The weight adjustment table.
    pub fn weight(&self) -> &AdjustmentTable {
        &self.weight
    }

    /// The wind adjustment table.
    pub fn wind(&self) -> &AdjustmentTable {
        &self.wind
    }

    /// The obstacle correction curve.
    pub fn obstacle(&self) -> &CorrectionCurve {
        &self.obstacle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tables() -> LandingTables {
        let baseline = ReferenceGrid::new(
            vec![0.0, 2000.0, 4000.0],
            vec![5.0, 15.0, 25.0, 35.0],
            vec![
                vec![2250.0, 2400.0, 2500.0, 2620.0],
                vec![2450.0, 2600.0, 2720.0, 2850.0],
                vec![2680.0, 2830.0, 2960.0, 3100.0],
            ],
        )
        .unwrap();

        let weight = AdjustmentTable::new(
            vec![9000, 10500, 11500, 12500],
            vec![
                vec![1600.0, 1750.0, 1900.0, 2000.0],
                vec![2400.0, 2650.0, 2820.0, 3000.0],
                vec![3200.0, 3550.0, 3750.0, 4000.0],
            ],
        )
        .unwrap();

        let wind = AdjustmentTable::new(
            vec![-20, -10, 0, 10, 20, 30],
            vec![
                vec![2600.0, 2350.0, 2000.0, 1800.0, 1650.0, 1550.0],
                vec![3700.0, 3300.0, 3000.0, 2700.0, 2500.0, 2350.0],
                vec![4800.0, 4300.0, 4000.0, 3600.0, 3350.0, 3150.0],
            ],
        )
        .unwrap();

        let obstacle = AdjustmentTable::new(
            vec![0, 50],
            vec![
                vec![2000.0, 2600.0],
                vec![3000.0, 3800.0],
                vec![4000.0, 5100.0],
            ],
        )
        .unwrap();

        LandingTables::new(baseline, weight, wind, obstacle).unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let tables = sample_tables();
        // The original UI defaults: 2000 ft / 15 °C / 11 500 lb / calm
        let est = tables.estimate(&LandingInputs::default()).unwrap();

        // (2000, 15) are exact grid keys
        assert_eq!(est.baseline_ft, 2600.0);

        // Weight deltas at refs 2000/3000 are -100/-180; at 2600 → -148
        assert!((est.weight_adjusted_ft - 2452.0).abs() < 1e-9);

        // Calm wind: selector equals the reference column, delta 0
        assert!((est.wind_adjusted_ft - est.weight_adjusted_ft).abs() < 1e-9);

        // Obstacle curve between (2000, 2600) and (3000, 3800)
        assert!((est.over_obstacle_ft - 3142.4).abs() < 1e-9);
        assert!((est.over_obstacle_m - est.over_obstacle_ft * FT_TO_M).abs() < 1e-12);
    }

    #[test]
    fn test_stage_threading() {
        // The wind delta must be keyed at the weight-adjusted distance,
        // not at the baseline: a heavy tailwind case makes the two differ.
        let tables = sample_tables();
        let est = tables
            .estimate(&LandingInputs {
                weight_lb: 9000,
                wind_kt: -20,
                ..LandingInputs::default()
            })
            .unwrap();

        // Weight deltas at refs 2000/3000 are -400/-600; at 2600 → -520
        assert!((est.weight_adjusted_ft - 2080.0).abs() < 1e-9);
        // Wind delta interpolated at 2080 (refs 2000/3000 → +600/+700),
        // not at the 2600 baseline
        let expected_delta = 600.0 + 100.0 * (2080.0 - 2000.0) / 1000.0;
        assert!((est.wind_adjusted_ft - (2080.0 + expected_delta)).abs() < 1e-9);
    }

    #[test]
    fn test_feet_to_meters() {
        assert!((1000.0 * FT_TO_M - 304.8).abs() < 1e-12);
    }

    #[test]
    fn test_idempotence() {
        let tables = sample_tables();
        let inputs = LandingInputs {
            pressure_alt_ft: 3100.0,
            oat_c: 22.0,
            weight_lb: 10000,
            wind_kt: 12,
        };
        let a = tables.estimate(&inputs).unwrap();
        let b = tables.estimate(&inputs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_inputs_are_defined() {
        let tables = sample_tables();
        // Everything beyond chart limits: clamped / flat-extrapolated,
        // never an error
        let est = tables
            .estimate(&LandingInputs {
                pressure_alt_ft: 15_000.0,
                oat_c: 60.0,
                weight_lb: 8000,
                wind_kt: -40,
            })
            .unwrap();
        assert!(est.over_obstacle_ft.is_finite());

        let clamped = tables
            .estimate(&LandingInputs {
                pressure_alt_ft: 4000.0,
                oat_c: 35.0,
                weight_lb: 8000,
                wind_kt: -40,
            })
            .unwrap();
        assert_eq!(est, clamped);
    }

    #[test]
    fn test_chart_mode_matches_hand_reading() {
        let tables = sample_tables();
        let est = tables
            .estimate_chart(&LandingInputs {
                pressure_alt_ft: 2500.0,
                oat_c: 20.0,
                weight_lb: 11_500,
                wind_kt: 0,
            })
            .unwrap();

        // Floor on both axes: the (2000, 15) cell
        assert_eq!(est.baseline_ft, 2600.0);
        // Weight row with greatest ref <= 2600 is the 2000 row: delta -100
        assert_eq!(est.weight_adjusted_ft, 2500.0);
        // Calm wind: delta 0
        assert_eq!(est.wind_adjusted_ft, 2500.0);
        // Obstacle row with greatest key <= 2500 is (2000, 2600)
        assert_eq!(est.over_obstacle_ft, 2600.0);
    }

    #[test]
    fn test_missing_reference_weight_column() {
        let tables = sample_tables();
        let weight = AdjustmentTable::new(
            vec![9000, 10500, 11500],
            vec![
                vec![1600.0, 1750.0, 1900.0],
                vec![2400.0, 2650.0, 2820.0],
            ],
        )
        .unwrap();
        let err = LandingTables::new(
            tables.baseline.clone(),
            weight,
            tables.wind.clone(),
            AdjustmentTable::new(
                vec![0, 50],
                vec![vec![2000.0, 2600.0], vec![3000.0, 3800.0]],
            )
            .unwrap(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::UnknownColumn {
                key: REFERENCE_WEIGHT_LB
            }
        );
    }

    #[test]
    fn test_missing_obstacle_column() {
        let tables = sample_tables();
        let obstacle = AdjustmentTable::new(
            vec![0, 35],
            vec![vec![2000.0, 2500.0], vec![3000.0, 3600.0]],
        )
        .unwrap();
        let err = LandingTables::new(
            tables.baseline.clone(),
            tables.weight.clone(),
            tables.wind.clone(),
            obstacle,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::UnknownColumn {
                key: OBSTACLE_HEIGHT_FT
            }
        );
    }
}
