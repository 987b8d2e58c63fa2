use polars::prelude::*;
use process_mining::core::event_data::case_centric::constants::{
    ACTIVITY_NAME, PREFIXED_TRACE_ID_NAME,
};
use process_mining::core::event_data::case_centric::dataframe::convert_dataframe_to_log;
use process_mining::core::event_data::case_centric::EventLogClassifier;
use process_mining::core::process_models::case_centric::dfg::DirectlyFollowsGraph;
use process_mining::EventLog;

use crate::constants::{ACTIVITY_COLUMN, CASE_ID_COLUMN, TIMESTAMP_COLUMN, TIMESTAMP_NAME};
use crate::error::EventFrameError;
use crate::performance_dfg::PerformanceDfg;
use crate::utils::get_column;

/// Result of converting an event `DataFrame` into an [`EventLog`], with optionally discovered
/// directly-follows graphs (see [`convert_to_event_log`])
#[derive(Debug)]
pub struct EventLogAnalysis {
    /// The converted event log
    pub event_log: EventLog,
    /// Performance DFG, if discovery was requested
    pub performance_dfg: Option<PerformanceDfg>,
    /// Frequency DFG, if discovery was requested
    pub frequency_dfg: Option<DirectlyFollowsGraph<'static>>,
}

/// Prepare an event `DataFrame` for conversion into an [`EventLog`]
///
/// Validates that the fixed role columns [`CASE_ID_COLUMN`], [`ACTIVITY_COLUMN`] and
/// [`TIMESTAMP_COLUMN`] are present (failing with [`EventFrameError::ColumnNotFound`] otherwise),
/// parses the timestamp column into a datetime column if it is not one already, and renames the
/// role columns to the XES attribute keys expected by
/// [`convert_dataframe_to_log`].
///
/// The input `DataFrame` is not modified; a new, formatted `DataFrame` is returned.
pub fn format_dataframe(df: &DataFrame) -> Result<DataFrame, EventFrameError> {
    for column in [CASE_ID_COLUMN, ACTIVITY_COLUMN, TIMESTAMP_COLUMN] {
        get_column(df, column)?;
    }
    let timestamps = get_column(df, TIMESTAMP_COLUMN)?.as_materialized_series();
    let mut formatted = df.clone();
    if !matches!(timestamps.dtype(), DataType::Datetime(_, _)) {
        let parsed = timestamps.cast(&DataType::Datetime(TimeUnit::Nanoseconds, None))?;
        formatted.with_column(parsed)?;
    }
    formatted.rename(CASE_ID_COLUMN, PREFIXED_TRACE_ID_NAME.into())?;
    formatted.rename(ACTIVITY_COLUMN, ACTIVITY_NAME.into())?;
    formatted.rename(TIMESTAMP_COLUMN, TIMESTAMP_NAME.into())?;
    Ok(formatted)
}

/// Convert an event `DataFrame` into an [`EventLog`], optionally discovering both DFGs
///
/// The frame is formatted with [`format_dataframe`] (fixed column roles `case_id`, `activity`,
/// `timestamp`) and then converted via
/// [`convert_dataframe_to_log`]. If `with_dfg` is set, a
/// performance DFG and a frequency DFG are additionally discovered with [`discover_dfgs`].
///
/// The discovered graphs can be rendered with their `export_svg`/`export_png` methods if the
/// `graphviz-export` feature is enabled.
pub fn convert_to_event_log(
    df: &DataFrame,
    with_dfg: bool,
) -> Result<EventLogAnalysis, EventFrameError> {
    let formatted = format_dataframe(df)?;
    let event_log = convert_dataframe_to_log(&formatted)?;
    let (performance_dfg, frequency_dfg) = if with_dfg {
        let (performance, frequency) = discover_dfgs(&event_log);
        (Some(performance), Some(frequency))
    } else {
        (None, None)
    };
    Ok(EventLogAnalysis {
        event_log,
        performance_dfg,
        frequency_dfg,
    })
}

/// Discover the performance DFG and the frequency DFG of an [`EventLog`]
///
/// Uses the default [`EventLogClassifier`] (`concept:name`) to derive the activity names.
/// Frequency DFG discovery is delegated to
/// [`DirectlyFollowsGraph::discover`].
pub fn discover_dfgs(log: &EventLog) -> (PerformanceDfg, DirectlyFollowsGraph<'static>) {
    let classifier = EventLogClassifier::default();
    (
        PerformanceDfg::create_from_log(log, &classifier),
        DirectlyFollowsGraph::discover(log),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::sample_event_frame;
    use crate::variants::{variant_frequency_table, variants_of_log};

    #[test]
    fn format_renames_role_columns() {
        let df = sample_event_frame();
        let formatted = format_dataframe(&df).unwrap();
        let names: Vec<String> = formatted
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert!(names.contains(&PREFIXED_TRACE_ID_NAME.to_string()));
        assert!(names.contains(&ACTIVITY_NAME.to_string()));
        assert!(names.contains(&TIMESTAMP_NAME.to_string()));
        // Input frame is untouched
        assert!(df.column(CASE_ID_COLUMN).is_ok());
    }

    #[test]
    fn format_requires_role_columns() {
        let df = sample_event_frame().drop(TIMESTAMP_COLUMN).unwrap();
        let result = format_dataframe(&df);
        match result {
            Err(EventFrameError::ColumnNotFound { column, .. }) => {
                assert_eq!(column, TIMESTAMP_COLUMN);
            }
            other => panic!("Expected ColumnNotFound, got {:?}", other),
        }
    }

    #[test]
    fn convert_groups_rows_into_traces() {
        let df = sample_event_frame();
        let analysis = convert_to_event_log(&df, false).unwrap();
        assert_eq!(analysis.event_log.traces.len(), 3);
        let mut events_per_trace: Vec<usize> = analysis
            .event_log
            .traces
            .iter()
            .map(|t| t.events.len())
            .collect();
        events_per_trace.sort();
        assert_eq!(events_per_trace, vec![1, 2, 3]);
        assert!(analysis.performance_dfg.is_none());
        assert!(analysis.frequency_dfg.is_none());
    }

    #[test]
    fn convert_with_dfg_discovers_both_graphs() {
        let df = sample_event_frame();
        let analysis = convert_to_event_log(&df, true).unwrap();
        let frequency = analysis.frequency_dfg.unwrap();
        assert_eq!(frequency.activities.len(), 3);
        assert!(frequency.contains_df_relation(("A", "B")));
        assert!(frequency.contains_df_relation(("A", "C")));

        let performance = analysis.performance_dfg.unwrap();
        // c1: A -> B after one hour; c2: A -> C after half an hour
        assert_eq!(performance.edge_mean_seconds("A", "B"), Some(3600.0));
        assert_eq!(performance.edge_mean_seconds("A", "C"), Some(1800.0));
        assert!(performance.is_start_activity("A"));
        assert!(performance.is_end_activity("C"));
    }

    #[test]
    fn convert_parses_string_timestamps() {
        let df = df!(
            CASE_ID_COLUMN => ["c1", "c1", "c2", "c2"],
            ACTIVITY_COLUMN => ["A", "B", "A", "B"],
            TIMESTAMP_COLUMN => [
                "2024-01-01T08:00:00",
                "2024-01-01T09:00:00",
                "2024-01-02T08:00:00",
                "2024-01-02T09:00:00",
            ],
        )
        .unwrap();
        let analysis = convert_to_event_log(&df, true).unwrap();
        assert_eq!(analysis.event_log.traces.len(), 2);
        // One hour between A and B in both traces
        let performance = analysis.performance_dfg.unwrap();
        assert_eq!(performance.edge_mean_seconds("A", "B"), Some(3600.0));
    }

    #[test]
    fn variants_of_converted_log_keep_encounter_order() {
        let df = sample_event_frame();
        let analysis = convert_to_event_log(&df, false).unwrap();
        let variants = variants_of_log(&analysis.event_log, &EventLogClassifier::default());
        assert_eq!(variants.len(), 3);
        assert_eq!(
            variants[0].0,
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
        assert_eq!(variants.iter().map(|(_, t)| t.len()).sum::<usize>(), 3);

        let table = variant_frequency_table(&variants).unwrap();
        assert_eq!(table.height(), 3);
    }
}
