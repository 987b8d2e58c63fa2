#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![doc = include_str!("../README.md")]

/// Column value distribution summaries
pub mod analysis;
/// Fixed column roles of event `DataFrame`s
pub mod constants;
/// Conversion of event `DataFrame`s into [`EventLog`](process_mining::EventLog)s and DFG discovery
pub mod convert;
/// Error types
pub mod error;
/// Validated row filtering by attribute value or activity set
pub mod filter;
/// Quantile-based outlier trimming of numeric columns
pub mod trim;
/// Trace variants and variant frequency tables
pub mod variants;

///
/// Directly-follows graphs annotated with edge durations
///
pub mod performance_dfg {
    #[cfg(feature = "graphviz-export")]
    /// Export [`PerformanceDfg`] to images (SVG, PNG, ...)
    ///
    /// __Requires the `graphviz-export` feature to be enabled__
    ///
    /// Also requires an active graphviz installation in the PATH.
    /// See also <https://github.com/besok/graphviz-rust?tab=readme-ov-file#caveats> and <https://graphviz.org/download/>
    pub mod image_export;
    /// [`PerformanceDfg`] struct and sub-structs
    pub mod performance_dfg_struct;

    #[doc(inline)]
    pub use performance_dfg_struct::{EdgePerformance, PerformanceDfg};
}

/// Util module with smaller helper functions
pub mod utils;

#[doc(inline)]
pub use analysis::column_value_counts;

#[doc(inline)]
pub use convert::convert_to_event_log;

#[doc(inline)]
pub use convert::discover_dfgs;

#[doc(inline)]
pub use convert::format_dataframe;

#[doc(inline)]
pub use convert::EventLogAnalysis;

#[doc(inline)]
pub use error::EventFrameError;

#[doc(inline)]
pub use filter::filter_activities;

#[doc(inline)]
pub use filter::filter_by_attribute;

#[doc(inline)]
pub use performance_dfg::PerformanceDfg;

#[doc(inline)]
pub use trim::trim_quantile;

#[doc(inline)]
pub use variants::variant_frequency_table;

#[doc(inline)]
pub use variants::variants_of_log;

#[doc(inline)]
pub use variants::TraceVariant;
