use std::collections::HashMap;

use polars::prelude::*;
use process_mining::core::event_data::case_centric::{EventLogClassifier, Trace};
use process_mining::EventLog;

/// The distinct ordered sequence of activity labels shared by one or more traces
pub type TraceVariant = Vec<String>;

/// Separator used to join the activity labels of a variant into a single display string
pub const VARIANT_SEPARATOR: &str = ", ";

/// Group the traces of an [`EventLog`] by their variant, using the given [`EventLogClassifier`]
/// to derive the activity names
///
/// The returned pairs are ordered by first encounter of each variant in the log, which is also
/// the tie-break order of [`variant_frequency_table`].
pub fn variants_of_log<'a>(
    log: &'a EventLog,
    classifier: &EventLogClassifier,
) -> Vec<(TraceVariant, Vec<&'a Trace>)> {
    let mut index_of: HashMap<TraceVariant, usize> = HashMap::new();
    let mut variants: Vec<(TraceVariant, Vec<&'a Trace>)> = Vec::new();
    for trace in &log.traces {
        let variant: TraceVariant = trace
            .events
            .iter()
            .map(|e| classifier.get_class_identity(e))
            .collect();
        match index_of.get(&variant) {
            Some(&i) => variants[i].1.push(trace),
            None => {
                index_of.insert(variant.clone(), variants.len());
                variants.push((variant, vec![trace]));
            }
        }
    }
    variants
}

/// Summarize a variant -> occurrences mapping as a ranked frequency table
///
/// The returned `DataFrame` has one row per variant with the columns `variant` (activity labels
/// joined with [`VARIANT_SEPARATOR`]), `frequency` (number of occurrences) and `total_percent`
/// (share of the total occurrence count, in percent, rounded to 4 decimals). Rows are sorted by
/// frequency descending; variants with equal frequency keep their input order.
///
/// An empty input yields an empty table. If the total occurrence count is zero, all percentages
/// are reported as `0.0`.
pub fn variant_frequency_table<T>(
    variants: &[(TraceVariant, Vec<T>)],
) -> Result<DataFrame, PolarsError> {
    let mut rows: Vec<(String, i64)> = variants
        .iter()
        .map(|(variant, occurrences)| {
            (variant.join(VARIANT_SEPARATOR), occurrences.len() as i64)
        })
        .collect();
    // Stable sort: ties keep first-encounter order
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    let total: i64 = rows.iter().map(|(_, frequency)| *frequency).sum();
    let percentages: Vec<f64> = rows
        .iter()
        .map(|(_, frequency)| {
            if total > 0 {
                round4(*frequency as f64 / total as f64 * 100.0)
            } else {
                0.0
            }
        })
        .collect();
    let (labels, frequencies): (Vec<String>, Vec<i64>) = rows.into_iter().unzip();
    df!(
        "variant" => labels,
        "frequency" => frequencies,
        "total_percent" => percentages,
    )
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
