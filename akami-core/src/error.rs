//! Error types for the Akami core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::metric::MetricError;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Identifies which of the two collections an argument error refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CollectionSide {
    /// The first collection, `X`.
    Left,
    /// The second collection, `Y`.
    Right,
}

impl fmt::Display for CollectionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Error type produced when configuring or running [`crate::Akami`].
///
/// Failures are detected as early as possible: arguments and the metric spec
/// are validated before any pair evaluation begins, and the first evaluation
/// failure aborts the whole computation. A caller receives either a fully
/// populated matrix or one of these errors, never a partial result.
#[non_exhaustive]
#[derive(Clone, Debug, Error)]
pub enum AkamiError {
    /// The metric identifier is not registered.
    #[error("unknown metric `{name}`")]
    UnknownMetric {
        /// Identifier supplied by the caller.
        name: Arc<str>,
    },
    /// A metric parameter failed validation at resolve time.
    #[error("metric `{metric}` rejected its parameters: {error}")]
    InvalidParameter {
        /// Canonical identifier of the metric being resolved.
        metric: &'static str,
        /// Underlying parameter problem.
        #[source]
        error: MetricError,
    },
    /// One of the collections contained no items.
    #[error("{side} collection contains no items")]
    EmptyCollection {
        /// Which collection was empty.
        side: CollectionSide,
    },
    /// Symmetric mode was requested over two collections of different sizes.
    #[error("symmetric mode requires equally sized collections (left={left}, right={right})")]
    SymmetricSizeMismatch {
        /// Number of items in the left collection.
        left: usize,
        /// Number of items in the right collection.
        right: usize,
    },
    /// Cross mode was requested without a right collection.
    #[error("cross mode requires a right collection")]
    MissingRightCollection,
    /// The builder requested parallel execution in a build without it.
    #[error("parallel execution is not available in this build")]
    ParallelUnavailable,
    /// The builder was given a thread count of zero.
    #[error("thread count must be at least 1 (got {got})")]
    InvalidThreadCount {
        /// The invalid thread count supplied by the caller.
        got: usize,
    },
    /// The dedicated worker pool could not be constructed.
    #[error("failed to build worker pool: {message}")]
    ThreadPool {
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
    /// A built-in metric failed while evaluating a pair.
    #[error("metric `{metric}` failed on pair ({row}, {col}): {error}")]
    Metric {
        /// Canonical identifier of the failing metric.
        metric: &'static str,
        /// Row index of the failing pair.
        row: usize,
        /// Column index of the failing pair.
        col: usize,
        /// Underlying metric error.
        #[source]
        error: MetricError,
    },
    /// The caller-supplied callback raised an error.
    ///
    /// The foreign payload is preserved unmodified as the error source.
    #[error("callback failed on pair ({row}, {col})")]
    Callback {
        /// Row index of the failing pair.
        row: usize,
        /// Column index of the failing pair.
        col: usize,
        /// Error payload raised by the callback.
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
    /// The caller-supplied callback returned NaN or an infinite value.
    #[error("callback returned a non-finite distance {value} on pair ({row}, {col})")]
    NonFiniteCallback {
        /// Row index of the offending pair.
        row: usize,
        /// Column index of the offending pair.
        col: usize,
        /// Value returned by the callback.
        value: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`AkamiError`] variants.
    enum AkamiErrorCode for AkamiError {
        /// The metric identifier is not registered.
        UnknownMetric => UnknownMetric { .. } => "AKAMI_UNKNOWN_METRIC",
        /// A metric parameter failed validation at resolve time.
        InvalidParameter => InvalidParameter { .. } => "AKAMI_INVALID_PARAMETER",
        /// One of the collections contained no items.
        EmptyCollection => EmptyCollection { .. } => "AKAMI_EMPTY_COLLECTION",
        /// Symmetric mode was requested over two collections of different sizes.
        SymmetricSizeMismatch => SymmetricSizeMismatch { .. } => "AKAMI_SYMMETRIC_SIZE_MISMATCH",
        /// Cross mode was requested without a right collection.
        MissingRightCollection => MissingRightCollection => "AKAMI_MISSING_RIGHT_COLLECTION",
        /// The builder requested parallel execution in a build without it.
        ParallelUnavailable => ParallelUnavailable => "AKAMI_PARALLEL_UNAVAILABLE",
        /// The builder was given a thread count of zero.
        InvalidThreadCount => InvalidThreadCount { .. } => "AKAMI_INVALID_THREAD_COUNT",
        /// The dedicated worker pool could not be constructed.
        ThreadPool => ThreadPool { .. } => "AKAMI_THREAD_POOL",
        /// A built-in metric failed while evaluating a pair.
        MetricFailure => Metric { .. } => "AKAMI_METRIC_FAILURE",
        /// The caller-supplied callback raised an error.
        CallbackFailure => Callback { .. } => "AKAMI_CALLBACK_FAILURE",
        /// The caller-supplied callback returned NaN or an infinite value.
        CallbackNonFinite => NonFiniteCallback { .. } => "AKAMI_CALLBACK_NON_FINITE",
    }
}

impl AkamiError {
    /// Retrieve the inner [`MetricError`] when the failure originated in a
    /// built-in metric.
    pub const fn metric_error(&self) -> Option<&MetricError> {
        match self {
            Self::InvalidParameter { error, .. } | Self::Metric { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, AkamiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_strings() {
        let err = AkamiError::UnknownMetric {
            name: Arc::from("mystery"),
        };
        assert_eq!(err.code(), AkamiErrorCode::UnknownMetric);
        assert_eq!(err.code().as_str(), "AKAMI_UNKNOWN_METRIC");
        assert_eq!(err.code().to_string(), "AKAMI_UNKNOWN_METRIC");
    }

    #[test]
    fn callback_failure_preserves_the_payload() {
        let payload: Box<dyn std::error::Error + Send + Sync> = Box::from("sensor offline");
        let err = AkamiError::Callback {
            row: 1,
            col: 2,
            source: Arc::from(payload),
        };
        let source = std::error::Error::source(&err).expect("payload must be the source");
        assert_eq!(source.to_string(), "sensor offline");
        assert_eq!(err.code(), AkamiErrorCode::CallbackFailure);
    }

    #[test]
    fn metric_error_accessor_exposes_inner_failure() {
        let err = AkamiError::Metric {
            metric: "hamming",
            row: 0,
            col: 1,
            error: MetricError::LengthMismatch { left: 2, right: 3 },
        };
        assert!(matches!(
            err.metric_error(),
            Some(MetricError::LengthMismatch { .. })
        ));
    }
}
