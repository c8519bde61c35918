//! Shared helpers for the built-in metrics.

use std::borrow::Cow;

use super::types::{MetricError, MetricParams, Result};

/// Reads a cost parameter, substituting `default` when absent.
///
/// # Errors
/// Returns [`MetricError::NonFiniteCost`] for NaN or infinite values and
/// [`MetricError::NegativeCost`] for values below zero.
pub(crate) fn cost_parameter(
    params: &MetricParams,
    name: &'static str,
    default: f64,
) -> Result<f64> {
    let value = params.number(name)?.unwrap_or(default);
    if !value.is_finite() {
        return Err(MetricError::NonFiniteCost {
            parameter: name,
            value,
        });
    }
    if value < 0.0 {
        return Err(MetricError::NegativeCost {
            parameter: name,
            value,
        });
    }
    Ok(value)
}

/// Applies optional case folding before comparison.
pub(crate) fn folded(value: &str, fold_case: bool) -> Cow<'_, str> {
    if fold_case {
        Cow::Owned(value.to_lowercase())
    } else {
        Cow::Borrowed(value)
    }
}
