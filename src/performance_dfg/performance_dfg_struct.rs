use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset};
use process_mining::core::event_data::case_centric::{EventLogClassifier, XESEditableAttribute};
use process_mining::EventLog;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::constants::TIMESTAMP_NAME;

/// Activity in a performance directly-follows graph.
type Activity = String;

/// Duration statistics of one directly-follows relation.
///
/// Aggregates the time passing between an activity and the activity directly following it, over
/// all timed traversals of the relation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct EdgePerformance {
    /// Number of timed traversals of the relation
    pub frequency: u32,
    /// Sum of all observed durations, in seconds
    pub total_seconds: f64,
    /// Shortest observed duration, in seconds
    pub min_seconds: f64,
    /// Longest observed duration, in seconds
    pub max_seconds: f64,
}

impl EdgePerformance {
    fn observe(&mut self, seconds: f64) {
        if self.frequency == 0 {
            self.min_seconds = seconds;
            self.max_seconds = seconds;
        } else {
            self.min_seconds = self.min_seconds.min(seconds);
            self.max_seconds = self.max_seconds.max(seconds);
        }
        self.frequency += 1;
        self.total_seconds += seconds;
    }

    /// Mean duration of the relation in seconds (`0.0` if nothing was observed)
    pub fn mean_seconds(&self) -> f64 {
        if self.frequency == 0 {
            0.0
        } else {
            self.total_seconds / f64::from(self.frequency)
        }
    }
}

/// A directly-follows graph annotated with edge durations.
///
/// Like a frequency [`DirectlyFollowsGraph`](process_mining::core::process_models::case_centric::dfg::DirectlyFollowsGraph), but each
/// directly-follows relation carries the duration statistics of its traversals (see
/// [`EdgePerformance`]) instead of a plain frequency.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceDfg {
    /// Activities, annotated with their frequency
    pub activities: HashMap<Activity, u32>,
    /// Directly-follows relations, annotated with duration statistics
    #[serde_as(as = "Vec<(_, _)>")]
    pub edges: HashMap<(Activity, Activity), EdgePerformance>,
    /// Start activities
    pub start_activities: HashSet<Activity>,
    /// End activities
    pub end_activities: HashSet<Activity>,
}

impl Default for PerformanceDfg {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceDfg {
    /// Create a new [`PerformanceDfg`] with no activities and no edges.
    pub fn new() -> Self {
        Self {
            activities: HashMap::new(),
            edges: HashMap::new(),
            start_activities: HashSet::new(),
            end_activities: HashSet::new(),
        }
    }

    /// Construct a [`PerformanceDfg`] from an [`EventLog`] using the specified
    /// [`EventLogClassifier`] to derive the 'activity' names
    ///
    /// Durations are taken from the `time:timestamp` event attribute. Event pairs where either
    /// event has no timestamp are counted for the activity frequencies, but contribute no edge.
    pub fn create_from_log(event_log: &EventLog, classifier: &EventLogClassifier) -> Self {
        let mut result = Self::new();
        for trace in &event_log.traces {
            let mut last: Option<(String, Option<&DateTime<FixedOffset>>)> = None;
            for event in &trace.events {
                let identity = classifier.get_class_identity(event);
                let timestamp = event
                    .attributes
                    .get_by_key(TIMESTAMP_NAME)
                    .and_then(|a| a.value.try_as_date());
                result.add_activity(identity.clone(), 1);

                if let Some((last_identity, last_timestamp)) = last.take() {
                    if let (Some(start), Some(end)) = (last_timestamp, timestamp) {
                        let seconds = (*end - *start).num_milliseconds() as f64 / 1000.0;
                        result.add_edge(last_identity, identity.clone(), seconds);
                    }
                } else {
                    result.add_start_activity(identity.clone());
                }

                last = Some((identity, timestamp));
            }
            if let Some((last_identity, _)) = last.take() {
                result.add_end_activity(last_identity);
            }
        }
        result
    }

    /// Serialize to JSON string.
    pub fn to_json(self) -> String {
        serde_json::to_string(&self).unwrap()
    }

    /// Add an activity with a frequency.
    ///
    /// If the activity already exists, the frequency count is added to the existing activity.
    pub fn add_activity(&mut self, activity: Activity, frequency: u32) {
        *self.activities.entry(activity).or_default() += frequency;
    }

    /// Adds an activity to the set of start activities.
    pub fn add_start_activity(&mut self, activity: Activity) {
        self.start_activities.insert(activity);
    }

    /// Adds an activity to the set of end activities.
    pub fn add_end_activity(&mut self, activity: Activity) {
        self.end_activities.insert(activity);
    }

    /// Checks if an activity is a start activity in the performance DFG.
    pub fn is_start_activity<S: AsRef<str>>(&self, activity: S) -> bool {
        self.start_activities.contains(activity.as_ref())
    }

    /// Checks if an activity is an end activity in the performance DFG.
    pub fn is_end_activity<S: AsRef<str>>(&self, activity: S) -> bool {
        self.end_activities.contains(activity.as_ref())
    }

    /// Record one timed traversal of a directly-follows relation.
    ///
    /// If the relation already exists, the duration is folded into the existing statistics.
    pub fn add_edge(&mut self, from: Activity, to: Activity, duration_seconds: f64) {
        self.edges
            .entry((from, to))
            .or_default()
            .observe(duration_seconds);
    }

    /// Mean duration of a directly-follows relation in seconds, if the relation exists.
    pub fn edge_mean_seconds(&self, from: &str, to: &str) -> Option<f64> {
        self.edges
            .get(&(from.to_string(), to.to_string()))
            .map(EdgePerformance::mean_seconds)
    }

    #[cfg(feature = "graphviz-export")]
    /// Export the performance DFG as a PNG image written to the specified filepath
    ///
    /// Only available with the `graphviz-export` feature.
    pub fn export_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), std::io::Error> {
        super::image_export::export_performance_dfg_image_png(self, path)
    }

    #[cfg(feature = "graphviz-export")]
    /// Export the performance DFG as an SVG image written to the specified filepath
    ///
    /// Only available with the `graphviz-export` feature.
    pub fn export_svg<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), std::io::Error> {
        super::image_export::export_performance_dfg_image_svg(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub const SAMPLE_JSON_PERFORMANCE_DFG: &str = r#"
{
    "activities": {
        "Register": 2,
        "Ship": 2
    },
    "edges": [
        [
            ["Register", "Ship"],
            { "frequency": 2, "total_seconds": 90.0, "min_seconds": 30.0, "max_seconds": 60.0 }
        ]
    ],
    "start_activities": ["Register"],
    "end_activities": ["Ship"]
}"#;

    #[test]
    fn edge_statistics_fold_durations() {
        let mut dfg = PerformanceDfg::new();
        dfg.add_activity("Register".into(), 2);
        dfg.add_activity("Ship".into(), 2);
        dfg.add_start_activity("Register".into());
        dfg.add_end_activity("Ship".into());
        dfg.add_edge("Register".into(), "Ship".into(), 60.0);
        dfg.add_edge("Register".into(), "Ship".into(), 30.0);

        let edge = dfg
            .edges
            .get(&("Register".to_string(), "Ship".to_string()))
            .unwrap();
        assert_eq!(edge.frequency, 2);
        assert_eq!(edge.min_seconds, 30.0);
        assert_eq!(edge.max_seconds, 60.0);
        assert_eq!(dfg.edge_mean_seconds("Register", "Ship"), Some(45.0));
        assert!(dfg.is_start_activity("Register"));
        assert!(dfg.is_end_activity("Ship"));
    }

    #[test]
    fn deserialize_performance_dfg() {
        let dfg: PerformanceDfg = serde_json::from_str(SAMPLE_JSON_PERFORMANCE_DFG).unwrap();
        assert_eq!(dfg.activities.len(), 2);
        assert_eq!(dfg.edges.len(), 1);
        assert_eq!(dfg.edge_mean_seconds("Register", "Ship"), Some(45.0));
    }
}
