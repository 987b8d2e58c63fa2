use polars::prelude::*;

use crate::error::EventFrameError;
use crate::utils::get_column;

/// Remove outlier rows from a numeric column via quantile bounds
///
/// Keeps the rows whose value in `column` lies _strictly between_ the lower and upper quantile
/// bound (both exclusive). The upper bound is the `(1 - trim_fraction)`-quantile; the lower bound
/// is the `trim_fraction`-quantile, or the 0th percentile (i.e., the column minimum) if
/// `only_upper` is set.
///
/// Quantiles are computed with _linear interpolation_ ([`QuantileMethod::Linear`]), so results are
/// reproducible across runs and inputs.
///
/// Fails with [`EventFrameError::ColumnNotFound`] if `column` is not present and with
/// [`EventFrameError::InvalidTrimFraction`] if `trim_fraction >= 0.5` (such fractions would empty
/// or invert the selection).
///
/// The input `DataFrame` is not modified; a new, narrowed `DataFrame` is returned.
pub fn trim_quantile(
    df: &DataFrame,
    column: &str,
    trim_fraction: f64,
    only_upper: bool,
) -> Result<DataFrame, EventFrameError> {
    let col = get_column(df, column)?;
    if trim_fraction >= 0.5 {
        return Err(EventFrameError::InvalidTrimFraction(trim_fraction));
    }
    let values = col.as_materialized_series().cast(&DataType::Float64)?;
    let ca = values.f64()?;
    let lower_fraction = if only_upper { 0.0 } else { trim_fraction };
    let lower = ca.quantile(lower_fraction, QuantileMethod::Linear)?;
    let upper = ca.quantile(1.0 - trim_fraction, QuantileMethod::Linear)?;
    match (lower, upper) {
        (Some(lo), Some(hi)) => {
            let mask = &ca.gt(lo) & &ca.lt(hi);
            Ok(df.filter(&mask)?)
        }
        // Column has no non-null values; nothing can lie between the bounds
        _ => Ok(df.head(Some(0))),
    }
}
