//! Raw cell coercion for the table loaders.
//!
//! Chart CSV exports are messy: title rows, label columns, padded numbers,
//! thousands separators. The loaders in [`crate::grid`] and [`crate::adjust`]
//! consume raw string cells and rely on these helpers to decide what is a
//! number and what is noise. A cell that fails coercion is never carried
//! along as a string; the containing row is dropped by the caller.

/// Coerce a cell to `f64`.
///
/// Trims whitespace and tolerates thousands separators ("1,250"). Empty
/// cells and non-numeric text yield `None`.
pub(crate) fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        return v.is_finite().then_some(v);
    }
    // Retry without thousands separators
    let stripped: String = trimmed.chars().filter(|c| *c != ',').collect();
    match stripped.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Coerce a cell to a discrete integer key.
///
/// Accepts plain integers and float-formatted integers ("12500.0"), which
/// spreadsheet exports produce for header rows.
pub(crate) fn parse_key_cell(cell: &str) -> Option<i32> {
    let v = parse_cell(cell)?;
    let rounded = v.round();
    if (v - rounded).abs() > f64::EPSILON {
        return None;
    }
    if rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return None;
    }
    Some(rounded as i32)
}

/// Number of cells in a row that coerce to a number.
///
/// Used to distinguish title rows (0 or 1 numeric cells) from header and
/// data rows.
pub(crate) fn numeric_count(row: &[String]) -> usize {
    row.iter().filter(|c| parse_cell(c).is_some()).count()
}
