//! Adapter around caller-supplied distance callables.
//!
//! Invoking the wrapped callable re-enters caller-controlled code; this is
//! the only place where that happens. The adapter translates every foreign
//! failure into [`AkamiError::Callback`] with the original payload attached,
//! and rejects non-finite results before they can reach the matrix. Foreign
//! code is not assumed re-entrant, so callback evaluation always runs
//! sequentially in canonical pair order.

use std::sync::Arc;

use crate::error::AkamiError;

/// Error payload a callback may raise.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result a callback returns for a single pair.
pub type CallbackOutcome = core::result::Result<f64, CallbackError>;

/// Wraps a foreign callable behind the same evaluation shape as a built-in
/// metric.
pub(crate) struct CallbackAdapter<F> {
    callback: F,
}

impl<F> CallbackAdapter<F> {
    pub(crate) const fn new(callback: F) -> Self {
        Self { callback }
    }

    /// Evaluates the callable on one pair, translating failures.
    ///
    /// # Errors
    /// Returns [`AkamiError::Callback`] when the callable raises, carrying
    /// the foreign payload unmodified, and [`AkamiError::NonFiniteCallback`]
    /// when it returns NaN or an infinity.
    pub(crate) fn evaluate<I>(
        &mut self,
        row: usize,
        col: usize,
        left: &I,
        right: &I,
    ) -> Result<f64, AkamiError>
    where
        I: ?Sized,
        F: FnMut(&I, &I) -> CallbackOutcome,
    {
        match (self.callback)(left, right) {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(value) => Err(AkamiError::NonFiniteCallback { row, col, value }),
            Err(source) => Err(AkamiError::Callback {
                row,
                col,
                source: Arc::from(source),
            }),
        }
    }
}
