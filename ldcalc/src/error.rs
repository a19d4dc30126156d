//! Error types for the ldcalc library.

use thiserror::Error;

/// Errors that can occur when building reference tables.
///
/// Every variant describes a malformed table. They are raised while a table
/// or pipeline is being constructed; once construction succeeds, lookups are
/// total over their clamped input domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Too few rows survived numeric coercion to interpolate between.
    #[error("table has {rows} valid data row(s), need at least 2")]
    TooFewRows { rows: usize },

    /// The same discrete column key appears more than once in a header.
    #[error("duplicate column key: {key}")]
    DuplicateColumn { key: i32 },

    /// The same key appears more than once on a grid row axis.
    #[error("duplicate row key: {key}")]
    DuplicateRow { key: f64 },

    /// A header cell could not be parsed as a discrete column key.
    #[error("unparseable column header: {cell:?}")]
    BadHeader { cell: String },

    /// A required column key is not present in the table.
    #[error("column {key} not found in table")]
    UnknownColumn { key: i32 },
}

/// Result type alias using [`TableError`].
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TableError::TooFewRows { rows: 1 };
        assert!(err.to_string().contains("1 valid data row"));

        let err = TableError::DuplicateColumn { key: 12500 };
        assert!(err.to_string().contains("12500"));

        let err = TableError::BadHeader {
            cell: "weight".to_string(),
        };
        assert!(err.to_string().contains("weight"));

        let err = TableError::UnknownColumn { key: -20 };
        assert!(err.to_string().contains("-20"));
    }
}
