use std::collections::HashMap;

use itertools::Itertools;
use polars::prelude::*;

use crate::error::EventFrameError;
use crate::utils::get_column;

/// Count how often each distinct value occurs in a column
///
/// Returns a two-column `DataFrame` (the column's name and `count`), sorted by count descending.
/// Ties are ordered by value, so the output is deterministic. Null cells are not counted.
///
/// Fails with [`EventFrameError::ColumnNotFound`] if `column` is not present.
pub fn column_value_counts(df: &DataFrame, column: &str) -> Result<DataFrame, EventFrameError> {
    let strings = get_column(df, column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = strings.str()?;
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for value in ca.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }
    let (values, occurrences): (Vec<String>, Vec<i64>) = counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .map(|(value, count)| (value.to_string(), count))
        .unzip();
    Ok(df!(column => values, "count" => occurrences)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::sample_event_frame;

    #[test]
    fn value_counts_are_sorted_descending() {
        let df = sample_event_frame();
        let counts = column_value_counts(&df, "activity").unwrap();
        assert_eq!(counts.height(), 3);
        let values: Vec<&str> = counts
            .column("activity")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        let occurrences: Vec<i64> = counts
            .column("count")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(values, vec!["C", "A", "B"]);
        assert_eq!(occurrences, vec![3, 2, 1]);
    }

    #[test]
    fn value_counts_missing_column() {
        let df = sample_event_frame();
        assert!(matches!(
            column_value_counts(&df, "department"),
            Err(EventFrameError::ColumnNotFound { .. })
        ));
    }
}
