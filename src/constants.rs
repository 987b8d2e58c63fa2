/// Column holding the trace identifier in an event `DataFrame`
///
/// Renamed to [`PREFIXED_TRACE_ID_NAME`](process_mining::core::event_data::case_centric::constants::PREFIXED_TRACE_ID_NAME) when converting to an event log.
pub const CASE_ID_COLUMN: &str = "case_id";
/// Column holding the activity label in an event `DataFrame`
///
/// Renamed to [`ACTIVITY_NAME`](process_mining::core::event_data::case_centric::constants::ACTIVITY_NAME) when converting to an event log.
pub const ACTIVITY_COLUMN: &str = "activity";
/// Column holding the event time in an event `DataFrame`
///
/// Renamed to [`TIMESTAMP_NAME`] when converting to an event log.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Common identifying field for event timestamps (time XES extension)
pub const TIMESTAMP_NAME: &str = "time:timestamp";
