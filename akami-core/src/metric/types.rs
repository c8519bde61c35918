//! Domain primitives shared by the built-in metrics.

use std::{collections::BTreeMap, sync::Arc};

use thiserror::Error;

/// Errors emitted while constructing or evaluating a built-in metric.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MetricError {
    /// A cost parameter was negative.
    #[error("parameter `{parameter}` must be non-negative (got {value})")]
    NegativeCost {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
    /// A cost parameter was NaN or infinite.
    #[error("parameter `{parameter}` must be finite (got {value})")]
    NonFiniteCost {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
    /// A parameter carried a value of the wrong kind.
    #[error("parameter `{parameter}` expects a {expected} value")]
    WrongParameterKind {
        /// Name of the offending parameter.
        parameter: Arc<str>,
        /// Kind the metric expected for this parameter.
        expected: &'static str,
    },
    /// A parameter name is not accepted by the metric.
    #[error("metric does not accept parameter `{parameter}`")]
    UnknownParameter {
        /// Name supplied by the caller.
        parameter: Arc<str>,
    },
    /// The metric requires items of equal length.
    #[error("items must have equal length: left={left}, right={right}")]
    LengthMismatch {
        /// Character count of the left item.
        left: usize,
        /// Character count of the right item.
        right: usize,
    },
}

/// Convenient alias for metric-level results.
pub type Result<T> = core::result::Result<T, MetricError>;

/// A single named parameter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    /// A real-valued parameter, such as an edit cost.
    Number(f64),
    /// A boolean switch, such as a case-folding flag.
    Flag(bool),
}

/// Named parameters attached to a built-in metric identifier.
///
/// Parameters are validated when the metric is resolved, before any pair is
/// evaluated: unknown names, wrong kinds, and out-of-domain values all fail
/// the whole computation up front.
///
/// # Examples
/// ```
/// use akami_core::MetricParams;
///
/// let params = MetricParams::new()
///     .with_number("substitute", 2.0)
///     .with_flag("fold_case", true);
/// assert!(!params.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricParams {
    entries: BTreeMap<String, ParamValue>,
}

impl MetricParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a numeric parameter, replacing any previous value for the name.
    #[must_use]
    pub fn with_number(mut self, name: impl Into<String>, value: f64) -> Self {
        self.entries.insert(name.into(), ParamValue::Number(value));
        self
    }

    /// Adds a flag parameter, replacing any previous value for the name.
    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.entries.insert(name.into(), ParamValue::Flag(value));
        self
    }

    /// Returns whether no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a numeric parameter.
    ///
    /// # Errors
    /// Returns [`MetricError::WrongParameterKind`] when the name is present
    /// but does not hold a number.
    pub fn number(&self, name: &str) -> Result<Option<f64>> {
        match self.entries.get(name) {
            None => Ok(None),
            Some(ParamValue::Number(value)) => Ok(Some(*value)),
            Some(_) => Err(MetricError::WrongParameterKind {
                parameter: Arc::from(name),
                expected: "numeric",
            }),
        }
    }

    /// Looks up a flag parameter.
    ///
    /// # Errors
    /// Returns [`MetricError::WrongParameterKind`] when the name is present
    /// but does not hold a flag.
    pub fn flag(&self, name: &str) -> Result<Option<bool>> {
        match self.entries.get(name) {
            None => Ok(None),
            Some(ParamValue::Flag(value)) => Ok(Some(*value)),
            Some(_) => Err(MetricError::WrongParameterKind {
                parameter: Arc::from(name),
                expected: "flag",
            }),
        }
    }

    /// Rejects any parameter name outside `known`.
    ///
    /// # Errors
    /// Returns [`MetricError::UnknownParameter`] naming the first offender.
    pub(crate) fn ensure_known(&self, known: &[&str]) -> Result<()> {
        for name in self.entries.keys() {
            if !known.contains(&name.as_str()) {
                return Err(MetricError::UnknownParameter {
                    parameter: Arc::from(name.as_str()),
                });
            }
        }
        Ok(())
    }
}

/// Selects a built-in metric by identifier, with optional parameters.
///
/// # Examples
/// ```
/// use akami_core::{MetricParams, MetricSpec};
///
/// let unit = MetricSpec::new("levenshtein");
/// assert_eq!(unit.name(), "levenshtein");
///
/// let weighted = MetricSpec::with_params(
///     "levenshtein",
///     MetricParams::new().with_number("substitute", 2.0),
/// );
/// assert!(!weighted.params().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MetricSpec {
    name: String,
    params: MetricParams,
}

impl MetricSpec {
    /// Creates a spec for `name` with default parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: MetricParams::default(),
        }
    }

    /// Creates a spec for `name` with explicit parameters.
    #[must_use]
    pub fn with_params(name: impl Into<String>, params: MetricParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Returns the metric identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attached parameters.
    #[must_use]
    pub fn params(&self) -> &MetricParams {
        &self.params
    }
}

/// A resolved built-in distance function over two string items.
///
/// Implementations are pure functions of their arguments and parameters, so
/// the engine may evaluate independent pairs concurrently. Every built-in
/// metric is deterministic and yields `0` for two identical items under
/// default parameters.
pub trait SequenceMetric: std::fmt::Debug + Send + Sync {
    /// Returns the canonical identifier the metric was registered under.
    fn name(&self) -> &'static str;

    /// Computes the distance between two items.
    ///
    /// # Errors
    /// Returns a [`MetricError`] when the items violate a structural
    /// requirement of the metric, such as unequal lengths for Hamming.
    fn evaluate(&self, left: &str, right: &str) -> Result<f64>;
}
