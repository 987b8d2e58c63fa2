use polars::prelude::*;

use crate::error::EventFrameError;

/// Get a column from a `DataFrame`, failing with an [`EventFrameError::ColumnNotFound`] that
/// enumerates the available columns if it does not exist
pub fn get_column<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Column, EventFrameError> {
    df.column(column)
        .map_err(|_| EventFrameError::ColumnNotFound {
            column: column.to_string(),
            available: df
                .get_column_names()
                .iter()
                .map(|c| c.to_string())
                .collect(),
        })
}
