use polars::prelude::PolarsError;

/// Error encountered while validating or executing an operation on an event `DataFrame`
///
/// All validation errors are raised _before_ any row is scanned, and carry the
/// universe of valid alternatives where applicable.
#[derive(Debug)]
pub enum EventFrameError {
    /// A referenced column does not exist in the `DataFrame`
    ColumnNotFound {
        /// The missing column name
        column: String,
        /// Columns present in the `DataFrame`
        available: Vec<String>,
    },
    /// The trim fraction is outside its valid range (must be smaller than 0.5)
    InvalidTrimFraction(f64),
    /// A value does not occur in the referenced column
    ValueNotFound {
        /// The column the value was searched in
        column: String,
        /// The value that was not found
        value: String,
        /// Distinct values observed in the column
        observed: Vec<String>,
    },
    /// Activities that do not occur in the `activity` column
    UnknownActivities(Vec<String>),
    /// Error reported by polars while executing the operation
    Polars(PolarsError),
}

impl std::fmt::Display for EventFrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventFrameError::ColumnNotFound { column, available } => write!(
                f,
                "The column \"{}\" is not in the DataFrame columns: {}",
                column,
                available.join(", ")
            ),
            EventFrameError::InvalidTrimFraction(v) => {
                write!(f, "The trim fraction must be smaller than 0.5, got {}", v)
            }
            EventFrameError::ValueNotFound {
                column,
                value,
                observed,
            } => write!(
                f,
                "\"{}\" is not in the values of the column \"{}\", values can be: {}",
                value,
                column,
                observed.join(", ")
            ),
            EventFrameError::UnknownActivities(missing) => write!(
                f,
                "There are activities to filter that do not appear in the DataFrame: {}",
                missing.join(", ")
            ),
            EventFrameError::Polars(e) => write!(f, "Polars Error: {}", e),
        }
    }
}

impl std::error::Error for EventFrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EventFrameError::Polars(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PolarsError> for EventFrameError {
    fn from(e: PolarsError) -> Self {
        EventFrameError::Polars(e)
    }
}
