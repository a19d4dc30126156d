//! Baseline distance grid and bilinear lookup.
//!
//! This module provides [`ReferenceGrid`], the two-axis performance table
//! (pressure altitude rows × outside air temperature columns) behind the
//! baseline stage of the pipeline.

use log::debug;

use crate::cells::{numeric_count, parse_cell, parse_key_cell};
use crate::error::{Result, TableError};

/// A two-axis reference table with bilinear lookup.
///
/// Row keys and column keys are strictly increasing; the value matrix is
/// fully populated over their cross product. Both axes are sorted at
/// construction time, so callers may supply rows in chart order.
///
/// # Example
///
/// ```
/// use ldcalc::ReferenceGrid;
///
/// let grid = ReferenceGrid::new(
///     vec![0.0, 2000.0],
///     vec![15.0, 25.0],
///     vec![vec![2400.0, 2500.0], vec![2600.0, 2720.0]],
/// )?;
/// assert_eq!(grid.value_at(2000.0, 15.0), 2600.0);
/// # Ok::<(), ldcalc::TableError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceGrid {
    /// Row keys (pressure altitude, ft), ascending.
    row_keys: Vec<f64>,
    /// Column keys (OAT, °C), ascending.
    col_keys: Vec<f64>,
    /// `values[r][c]` is the distance at `(row_keys[r], col_keys[c])`.
    values: Vec<Vec<f64>>,
}

impl ReferenceGrid {
    /// Build a grid from already-typed axes and values.
    ///
    /// Axes are sorted ascending (values are permuted to match), so input
    /// order does not matter.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - fewer than 2 rows or an empty column axis is given
    /// - the value matrix does not match the axis dimensions
    /// - an axis contains a duplicate key
    pub fn new(row_keys: Vec<f64>, col_keys: Vec<f64>, values: Vec<Vec<f64>>) -> Result<Self> {
        if row_keys.len() < 2 || col_keys.is_empty() {
            return Err(TableError::TooFewRows {
                rows: row_keys.len(),
            });
        }
        if values.len() != row_keys.len() || values.iter().any(|r| r.len() != col_keys.len()) {
            return Err(TableError::TooFewRows { rows: values.len() });
        }

        // Sort the row axis, carrying each value row along
        let mut rows: Vec<(f64, Vec<f64>)> = row_keys.into_iter().zip(values).collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in rows.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(TableError::DuplicateRow { key: pair[0].0 });
            }
        }

        // Sort the column axis, permuting every value row the same way
        let mut order: Vec<usize> = (0..col_keys.len()).collect();
        order.sort_by(|a, b| col_keys[*a].total_cmp(&col_keys[*b]));
        let sorted_cols: Vec<f64> = order.iter().map(|i| col_keys[*i]).collect();
        for pair in sorted_cols.windows(2) {
            if pair[0] == pair[1] {
                return Err(TableError::DuplicateColumn {
                    key: pair[0] as i32,
                });
            }
        }

        let (row_keys, values): (Vec<f64>, Vec<Vec<f64>>) = rows
            .into_iter()
            .map(|(k, row)| (k, order.iter().map(|i| row[*i]).collect()))
            .unzip();

        Ok(Self {
            row_keys,
            col_keys: sorted_cols,
            values,
        })
    }

    /// Build a grid from raw row-major string cells.
    ///
    /// Handles the shape chart CSV exports actually have:
    ///
    /// - Leading title rows (fewer than two numeric cells) are skipped.
    /// - The first remaining row is the header. Leading non-numeric cells
    ///   are labels; the last label position is the row-key column. The
    ///   remaining cells, parsed as integers, are the column keys.
    /// - Each later row contributes a row key and one value per column.
    ///   A row with any unparseable cell is dropped, never kept as text.
    ///
    /// # Errors
    ///
    /// Returns an error if a column header cell is not an integer, if
    /// column keys repeat, or if fewer than 2 data rows survive coercion.
    pub fn from_rows(raw: &[Vec<String>]) -> Result<Self> {
        let mut iter = raw.iter().enumerate().skip_while(|(_, r)| numeric_count(r) < 2);

        let (_, header) = iter.next().ok_or(TableError::TooFewRows { rows: 0 })?;

        // Label prefix: everything before the first numeric header cell.
        // A fully numeric header still has a corner cell over the key column.
        let labels = header
            .iter()
            .take_while(|c| parse_cell(c).is_none())
            .count()
            .max(1);

        let col_keys: Vec<f64> = header[labels..]
            .iter()
            .map(|cell| {
                parse_key_cell(cell)
                    .map(f64::from)
                    .ok_or_else(|| TableError::BadHeader { cell: cell.clone() })
            })
            .collect::<Result<_>>()?;

        let mut row_keys = Vec::new();
        let mut values = Vec::new();
        for (i, row) in iter {
            if row.len() < labels + col_keys.len() {
                debug!("grid row {i}: too short, dropped");
                continue;
            }
            let key = parse_cell(&row[labels - 1]);
            let cells: Option<Vec<f64>> = row[labels..labels + col_keys.len()]
                .iter()
                .map(|c| parse_cell(c))
                .collect();
            match (key, cells) {
                (Some(key), Some(cells)) => {
                    row_keys.push(key);
                    values.push(cells);
                }
                _ => debug!("grid row {i}: non-numeric cell, dropped"),
            }
        }

        if row_keys.len() < 2 {
            return Err(TableError::TooFewRows {
                rows: row_keys.len(),
            });
        }

        debug!(
            "loaded grid: {} rows x {} columns",
            row_keys.len(),
            col_keys.len()
        );
        Self::new(row_keys, col_keys, values)
    }

    /// Bilinear lookup, clamped to the grid bounds.
    ///
    /// Both targets are clamped to their axis range (no extrapolation).
    /// Exact at grid points and continuous in both inputs; when a target
    /// sits exactly on a key, that axis degenerates to plain linear
    /// interpolation along the other one.
    pub fn value_at(&self, row: f64, col: f64) -> f64 {
        let x = clamp(row, &self.row_keys);
        let y = clamp(col, &self.col_keys);
        let (r1, r2) = bracket(&self.row_keys, x);
        let (c1, c2) = bracket(&self.col_keys, y);
        let (x1, x2) = (self.row_keys[r1], self.row_keys[r2]);
        let (y1, y2) = (self.col_keys[c1], self.col_keys[c2]);

        let q11 = self.values[r1][c1];
        let q21 = self.values[r2][c1];
        let q12 = self.values[r1][c2];
        let q22 = self.values[r2][c2];

        match (r1 == r2, c1 == c2) {
            (true, true) => q11,
            (true, false) => q11 + (q12 - q11) * (y - y1) / (y2 - y1),
            (false, true) => q11 + (q21 - q11) * (x - x1) / (x2 - x1),
            (false, false) => {
                let w11 = (x2 - x) * (y2 - y);
                let w21 = (x - x1) * (y2 - y);
                let w12 = (x2 - x) * (y - y1);
                let w22 = (x - x1) * (y - y1);
                (q11 * w11 + q21 * w21 + q12 * w12 + q22 * w22) / ((x2 - x1) * (y2 - y1))
            }
        }
    }

    /// Chart-style step lookup (legacy).
    ///
    /// Selects the greatest key ≤ target on each axis, the way the printed
    /// chart is read row-by-row. Produces step-discontinuous output; the
    /// interpolated [`Self::value_at`] is the primary contract.
    pub fn value_floor(&self, row: f64, col: f64) -> f64 {
        let r = floor_index(&self.row_keys, row);
        let c = floor_index(&self.col_keys, col);
        self.values[r][c]
    }

    /// Row keys (ascending).
    pub fn row_keys(&self) -> &[f64] {
        &self.row_keys
    }

    /// Column keys (ascending).
    pub fn col_keys(&self) -> &[f64] {
        &self.col_keys
    }
}

/// Clamp a target to the closed range of a sorted, non-empty key axis.
fn clamp(target: f64, keys: &[f64]) -> f64 {
    target.clamp(keys[0], keys[keys.len() - 1])
}

/// Bracketing indices `(lo, hi)` for an already-clamped target.
///
/// `lo == hi` when the target lands exactly on a key.
fn bracket(keys: &[f64], target: f64) -> (usize, usize) {
    let hi = keys.partition_point(|k| *k < target);
    if hi == keys.len() {
        (hi - 1, hi - 1)
    } else if keys[hi] == target {
        (hi, hi)
    } else if hi == 0 {
        (0, 0)
    } else {
        (hi - 1, hi)
    }
}

/// Index of the greatest key ≤ target, or 0 when the target is below the
/// axis.
fn floor_index(keys: &[f64], target: f64) -> usize {
    keys.partition_point(|k| *k <= target).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    /// 3x3 grid: rows 0/2000/4000 ft, cols 15/25/35 °C.
    fn sample_grid() -> ReferenceGrid {
        ReferenceGrid::new(
            vec![0.0, 2000.0, 4000.0],
            vec![15.0, 25.0, 35.0],
            vec![
                vec![2400.0, 2500.0, 2620.0],
                vec![2600.0, 2720.0, 2850.0],
                vec![2830.0, 2960.0, 3100.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_grid_points() {
        let grid = sample_grid();
        assert_eq!(grid.value_at(0.0, 15.0), 2400.0);
        assert_eq!(grid.value_at(2000.0, 25.0), 2720.0);
        assert_eq!(grid.value_at(4000.0, 35.0), 3100.0);
    }

    #[test]
    fn test_degenerate_row_axis() {
        let grid = sample_grid();
        // Exactly on a row key: linear along the column axis only
        assert_eq!(grid.value_at(2000.0, 20.0), 2660.0);
    }

    #[test]
    fn test_degenerate_col_axis() {
        let grid = sample_grid();
        // Exactly on a column key: linear along the row axis only
        assert_eq!(grid.value_at(1000.0, 15.0), 2500.0);
    }

    #[test]
    fn test_bilinear_interior() {
        let grid = sample_grid();
        // Center of the (0..2000, 15..25) cell: average of the four corners
        let v = grid.value_at(1000.0, 20.0);
        assert!((v - (2400.0 + 2500.0 + 2600.0 + 2720.0) / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_betweenness() {
        let grid = sample_grid();
        // For a column target between two keys, the result lies between the
        // values interpolated at the adjacent keys
        let lo = grid.value_at(1500.0, 15.0);
        let hi = grid.value_at(1500.0, 25.0);
        let mid = grid.value_at(1500.0, 19.0);
        assert!(lo < mid && mid < hi);
    }

    #[test]
    fn test_clamping() {
        let grid = sample_grid();
        assert_eq!(grid.value_at(-500.0, 15.0), grid.value_at(0.0, 15.0));
        assert_eq!(grid.value_at(9000.0, 15.0), grid.value_at(4000.0, 15.0));
        assert_eq!(grid.value_at(2000.0, -40.0), grid.value_at(2000.0, 15.0));
        assert_eq!(grid.value_at(2000.0, 60.0), grid.value_at(2000.0, 35.0));
    }

    #[test]
    fn test_floor_lookup() {
        let grid = sample_grid();
        // Greatest key <= target on each axis
        assert_eq!(grid.value_floor(2500.0, 28.0), 2720.0);
        // Exactly on keys
        assert_eq!(grid.value_floor(2000.0, 25.0), 2720.0);
        // Below both axes: first row/column
        assert_eq!(grid.value_floor(-100.0, 0.0), 2400.0);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let grid = ReferenceGrid::new(
            vec![4000.0, 0.0, 2000.0],
            vec![35.0, 15.0, 25.0],
            vec![
                vec![3100.0, 2830.0, 2960.0],
                vec![2620.0, 2400.0, 2500.0],
                vec![2850.0, 2600.0, 2720.0],
            ],
        )
        .unwrap();
        assert_eq!(grid, sample_grid());
    }

    #[test]
    fn test_duplicate_row_key() {
        let err = ReferenceGrid::new(
            vec![0.0, 0.0],
            vec![15.0],
            vec![vec![2400.0], vec![2500.0]],
        )
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateRow { key: 0.0 });
    }

    #[test]
    fn test_from_rows_chart_export() {
        // Title row, then a header with two label columns, then data rows
        // with a leading label cell: the shape the chart CSV export has.
        let grid = ReferenceGrid::from_rows(&raw(&[
            &["LANDING DISTANCE - FLAPS 100%", "", "", "", ""],
            &["", "PressAlt", "15", "25", "35"],
            &["", "0", "2400", "2500", "2620"],
            &["", "2000", "2600", "2720", "2850"],
            &["", "4000", "2830", "2960", "3100"],
        ]))
        .unwrap();

        assert_eq!(grid, sample_grid());
    }

    #[test]
    fn test_from_rows_plain_layout() {
        // No label columns: the corner cell sits over the key column.
        let grid = ReferenceGrid::from_rows(&raw(&[
            &["0", "15", "25", "35"],
            &["0", "2400", "2500", "2620"],
            &["2000", "2600", "2720", "2850"],
            &["4000", "2830", "2960", "3100"],
        ]))
        .unwrap();
        assert_eq!(grid, sample_grid());
    }

    #[test]
    fn test_from_rows_drops_poisoned_rows() {
        let grid = ReferenceGrid::from_rows(&raw(&[
            &["", "PressAlt", "15", "25", "35"],
            &["", "0", "2400", "2500", "2620"],
            &["", "2000", "2600", "n/a", "2850"],
            &["", "4000", "2830", "2960", "3100"],
        ]))
        .unwrap();
        // The 2000 ft row had a bad cell and is gone
        assert_eq!(grid.row_keys(), &[0.0, 4000.0]);
    }

    #[test]
    fn test_from_rows_too_few_rows() {
        let err = ReferenceGrid::from_rows(&raw(&[
            &["", "PressAlt", "15", "25"],
            &["", "0", "2400", "2500"],
            &["", "2000", "bad", "2720"],
        ]))
        .unwrap_err();
        assert_eq!(err, TableError::TooFewRows { rows: 1 });
    }

    #[test]
    fn test_from_rows_bad_header() {
        let err = ReferenceGrid::from_rows(&raw(&[
            &["", "PressAlt", "15", "25", "hot"],
            &["", "0", "2400", "2500", "2620"],
            &["", "2000", "2600", "2720", "2850"],
        ]))
        .unwrap_err();
        assert!(matches!(err, TableError::BadHeader { .. }));
    }

    #[test]
    fn test_from_rows_duplicate_column() {
        let err = ReferenceGrid::from_rows(&raw(&[
            &["", "PressAlt", "15", "15"],
            &["", "0", "2400", "2500"],
            &["", "2000", "2600", "2720"],
        ]))
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn { key: 15 });
    }

    #[test]
    fn test_from_rows_empty() {
        let err = ReferenceGrid::from_rows(&[]).unwrap_err();
        assert_eq!(err, TableError::TooFewRows { rows: 0 });
    }
}
