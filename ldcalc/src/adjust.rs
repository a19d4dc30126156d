//! Adjustment tables and correction curves.
//!
//! The weight, wind and obstacle stages all read the same kind of table: a
//! family of curves sharing one key axis, indexed by a discrete parameter
//! (weight in lb, wind in kt, obstacle height in ft). [`AdjustmentTable`]
//! holds the family; [`CorrectionCurve`] is a single extracted curve.
//!
//! Adjustments are tabulated as *differences from a reference condition*
//! (12 500 lb gross weight, zero wind), so the quantity carried between
//! stages is the delta, interpolated along the reference column's own
//! values. Outside the sampled range the delta is held flat rather than
//! projected.

use log::debug;

use crate::cells::{numeric_count, parse_cell, parse_key_cell};
use crate::error::{Result, TableError};

/// A family of reference curves indexed by a discrete column key.
///
/// Rows are kept in load order; each lookup sorts along the reference
/// column it is asked to use, so one table can serve as both a delta table
/// and a source of [`CorrectionCurve`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentTable {
    /// Discrete column keys, in header order.
    col_keys: Vec<i32>,
    /// `rows[r][c]` is the value of column `col_keys[c]` in row `r`.
    rows: Vec<Vec<f64>>,
}

impl AdjustmentTable {
    /// Build a table from already-typed columns and rows.
    ///
    /// # Errors
    ///
    /// Returns an error if column keys repeat, if a row's cell count does
    /// not match the header, or if fewer than 2 rows are given.
    pub fn new(col_keys: Vec<i32>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let mut seen = col_keys.clone();
        seen.sort_unstable();
        for pair in seen.windows(2) {
            if pair[0] == pair[1] {
                return Err(TableError::DuplicateColumn { key: pair[0] });
            }
        }
        if rows.len() < 2 || rows.iter().any(|r| r.len() != col_keys.len()) {
            return Err(TableError::TooFewRows { rows: rows.len() });
        }
        Ok(Self { col_keys, rows })
    }

    /// Build a table from raw row-major string cells.
    ///
    /// Blank and title rows (no numeric cells) are skipped. The first
    /// remaining row is the header: every cell must parse as an integer
    /// column key. Later rows are coerced to floats; a row with any
    /// unparseable cell, or the wrong cell count, is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::BadHeader`] for a non-integer header cell,
    /// [`TableError::DuplicateColumn`] for repeated keys, and
    /// [`TableError::TooFewRows`] if fewer than 2 rows survive.
    pub fn from_rows(raw: &[Vec<String>]) -> Result<Self> {
        let mut iter = raw.iter().enumerate().skip_while(|(_, r)| numeric_count(r) == 0);

        let (_, header) = iter.next().ok_or(TableError::TooFewRows { rows: 0 })?;
        let col_keys: Vec<i32> = header
            .iter()
            .map(|cell| {
                parse_key_cell(cell).ok_or_else(|| TableError::BadHeader { cell: cell.clone() })
            })
            .collect::<Result<_>>()?;

        let mut rows = Vec::new();
        for (i, row) in iter {
            if numeric_count(row) == 0 {
                continue;
            }
            if row.len() != col_keys.len() {
                debug!("adjustment row {i}: wrong cell count, dropped");
                continue;
            }
            match row.iter().map(|c| parse_cell(c)).collect::<Option<Vec<f64>>>() {
                Some(cells) => rows.push(cells),
                None => debug!("adjustment row {i}: non-numeric cell, dropped"),
            }
        }

        debug!("loaded adjustment table: {} rows x {} columns", rows.len(), col_keys.len());
        Self::new(col_keys, rows)
    }

    /// Discrete column keys, in header order.
    pub fn col_keys(&self) -> &[i32] {
        &self.col_keys
    }

    /// Whether `key` is an exact column of this table.
    pub fn has_column(&self, key: i32) -> bool {
        self.col_keys.contains(&key)
    }

    /// Interpolated delta between the selected and reference columns.
    ///
    /// The delta curve is `(reference value, selected value − reference
    /// value)` per row, keyed and sorted by the reference column's own
    /// values, then linearly interpolated at `refd`. Outside the sampled
    /// range the nearest endpoint delta is held flat.
    ///
    /// A `selector` that is not an exact column resolves to the nearest
    /// tabulated column (lower key on ties).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if `reference` is not an
    /// exact column.
    pub fn delta(&self, refd: f64, selector: i32, reference: i32) -> Result<f64> {
        let points = self.delta_points(selector, reference)?;
        Ok(interp_flat(&points, refd))
    }

    /// `refd` plus the interpolated delta. See [`Self::delta`].
    pub fn adjust(&self, refd: f64, selector: i32, reference: i32) -> Result<f64> {
        Ok(refd + self.delta(refd, selector, reference)?)
    }

    /// Chart-style step delta (legacy).
    ///
    /// Selects the row with the greatest reference value ≤ `refd` (the
    /// first row when `refd` is below them all) and returns that row's
    /// delta unchanged, the way the printed chart is read.
    pub fn delta_floor(&self, refd: f64, selector: i32, reference: i32) -> Result<f64> {
        let points = self.delta_points(selector, reference)?;
        let idx = points.partition_point(|p| p.0 <= refd).saturating_sub(1);
        Ok(points[idx].1)
    }

    /// `refd` plus the step delta. See [`Self::delta_floor`].
    pub fn adjust_floor(&self, refd: f64, selector: i32, reference: i32) -> Result<f64> {
        Ok(refd + self.delta_floor(refd, selector, reference)?)
    }

    /// Extract the curve mapping column `key` to column `value`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if either column is missing,
    /// or [`TableError::DuplicateRow`] if the key column repeats a value.
    pub fn curve(&self, key: i32, value: i32) -> Result<CorrectionCurve> {
        let k = self.col_index(key).ok_or(TableError::UnknownColumn { key })?;
        let v = self
            .col_index(value)
            .ok_or(TableError::UnknownColumn { key: value })?;
        CorrectionCurve::new(self.rows.iter().map(|r| (r[k], r[v])).collect())
    }

    fn col_index(&self, key: i32) -> Option<usize> {
        self.col_keys.iter().position(|k| *k == key)
    }

    /// Nearest-column resolution for off-grid selectors; lower key wins ties.
    fn resolve(&self, selector: i32) -> usize {
        let mut best = 0;
        for (i, key) in self.col_keys.iter().enumerate().skip(1) {
            let d = (i64::from(*key) - i64::from(selector)).abs();
            let best_key = self.col_keys[best];
            let best_d = (i64::from(best_key) - i64::from(selector)).abs();
            if d < best_d || (d == best_d && *key < best_key) {
                best = i;
            }
        }
        best
    }

    /// Delta curve points sorted by the reference column's values.
    fn delta_points(&self, selector: i32, reference: i32) -> Result<Vec<(f64, f64)>> {
        let r = self
            .col_index(reference)
            .ok_or(TableError::UnknownColumn { key: reference })?;
        let s = self.resolve(selector);
        let mut points: Vec<(f64, f64)> = self
            .rows
            .iter()
            .map(|row| (row[r], row[s] - row[r]))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(points)
    }
}

/// A single reference curve: sorted `(key, value)` pairs with linear
/// interpolation and flat extrapolation.
///
/// Used for the obstacle-correction stage, whose table already encodes the
/// absolute output distance (no delta computation).
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionCurve {
    points: Vec<(f64, f64)>,
}

impl CorrectionCurve {
    /// Build a curve from `(key, value)` pairs. Points are sorted by key.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than 2 points or duplicate keys.
    pub fn new(mut points: Vec<(f64, f64)>) -> Result<Self> {
        if points.len() < 2 {
            return Err(TableError::TooFewRows { rows: points.len() });
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in points.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(TableError::DuplicateRow { key: pair[0].0 });
            }
        }
        Ok(Self { points })
    }

    /// Linear interpolation at `x`, holding endpoint values outside the
    /// sampled range.
    pub fn value_at(&self, x: f64) -> f64 {
        interp_flat(&self.points, x)
    }

    /// Chart-style step lookup (legacy): the value at the greatest key ≤
    /// `x`, or the first value when `x` is below the curve.
    pub fn value_floor(&self, x: f64) -> f64 {
        let idx = self.points.partition_point(|p| p.0 <= x).saturating_sub(1);
        self.points[idx].1
    }

    /// The sorted `(key, value)` pairs.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// Linear interpolation over sorted points, holding the first value below
/// the range and the last value above it.
fn interp_flat(points: &[(f64, f64)], x: f64) -> f64 {
    let (first, last) = (points[0], points[points.len() - 1]);
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    let hi = points.partition_point(|p| p.0 < x);
    let (x1, y1) = points[hi - 1];
    let (x2, y2) = points[hi];
    // Repeated keys collapse to the later value
    if x2 == x1 {
        return y2;
    }
    y1 + (y2 - y1) * (x - x1) / (x2 - x1)
}
