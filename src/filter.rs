use std::collections::HashSet;

use itertools::Itertools;
use polars::prelude::*;

use crate::constants::ACTIVITY_COLUMN;
use crate::error::EventFrameError;
use crate::utils::get_column;

/// Keep the rows of an event `DataFrame` whose `column` equals `value` (or differs from it, if
/// `negate` is set)
///
/// Validation happens before any row scan: a missing column fails with
/// [`EventFrameError::ColumnNotFound`] and a `value` that does not occur in the column fails with
/// [`EventFrameError::ValueNotFound`], each enumerating the valid alternatives. Rows with a null
/// cell in `column` are kept by neither mode.
///
/// The input `DataFrame` is not modified; a new, narrowed `DataFrame` is returned.
pub fn filter_by_attribute(
    df: &DataFrame,
    column: &str,
    value: &str,
    negate: bool,
) -> Result<DataFrame, EventFrameError> {
    let strings = get_column(df, column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = strings.str()?;
    let observed: HashSet<&str> = ca.into_iter().flatten().collect();
    if !observed.contains(value) {
        return Err(EventFrameError::ValueNotFound {
            column: column.to_string(),
            value: value.to_string(),
            observed: observed.iter().map(|v| v.to_string()).sorted().collect(),
        });
    }
    let mask = if negate {
        ca.not_equal(value)
    } else {
        ca.equal(value)
    };
    Ok(df.filter(&mask)?)
}

/// Keep the rows of an event `DataFrame` whose `activity` is in `activities` (or its complement,
/// if `remove` is set)
///
/// Every requested activity must occur in the `activity` column; otherwise the call fails with
/// [`EventFrameError::UnknownActivities`] naming exactly the missing ones. Rows with a null
/// activity are kept by neither mode.
///
/// The input `DataFrame` is not modified; a new, narrowed `DataFrame` is returned.
pub fn filter_activities<S: AsRef<str>>(
    df: &DataFrame,
    activities: &[S],
    remove: bool,
) -> Result<DataFrame, EventFrameError> {
    let strings = get_column(df, ACTIVITY_COLUMN)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = strings.str()?;
    let observed: HashSet<&str> = ca.into_iter().flatten().collect();
    let requested: HashSet<&str> = activities.iter().map(|a| a.as_ref()).collect();
    let missing: Vec<String> = requested
        .difference(&observed)
        .map(|a| a.to_string())
        .sorted()
        .collect();
    if !missing.is_empty() {
        return Err(EventFrameError::UnknownActivities(missing));
    }
    let mask: BooleanChunked = ca
        .into_iter()
        .map(|activity| activity.is_some_and(|a| requested.contains(a) != remove))
        .collect();
    Ok(df.filter(&mask)?)
}
