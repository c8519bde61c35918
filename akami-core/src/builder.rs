//! Builder utilities for configuring the Akami engine.
//!
//! Exposes the execution strategy selection surface and builder validation
//! used before constructing [`Akami`] instances.

use std::num::NonZeroUsize;

use crate::{Result, engine::Akami, error::AkamiError};

/// Indicates how [`Akami`] evaluates built-in metric pairs.
///
/// `Auto` resolves deterministically: it selects `Parallel` when the
/// `parallel` feature is compiled in and `Sequential` otherwise, so behaviour
/// stays stable across builds. Callback operations ignore the strategy and
/// always run sequentially, because caller-supplied code is not assumed safe
/// to re-enter from multiple threads.
///
/// # Examples
/// ```
/// use akami_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select an appropriate mode automatically.
    Auto,
    /// Evaluate every pair on the calling thread, in canonical order.
    Sequential,
    /// Spread built-in pair evaluation across worker threads.
    Parallel,
}

/// Configures and constructs [`Akami`] instances.
///
/// # Examples
/// ```
/// use akami_core::{AkamiBuilder, ExecutionStrategy};
///
/// let akami = AkamiBuilder::new()
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(akami.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct AkamiBuilder {
    execution_strategy: ExecutionStrategy,
    threads: Option<usize>,
}

impl Default for AkamiBuilder {
    fn default() -> Self {
        Self {
            execution_strategy: ExecutionStrategy::Auto,
            threads: None,
        }
    }
}

impl AkamiBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use akami_core::{AkamiBuilder, ExecutionStrategy};
    ///
    /// let builder = AkamiBuilder::new();
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.threads(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the execution strategy used for built-in metric evaluation.
    ///
    /// # Examples
    /// ```
    /// use akami_core::{AkamiBuilder, ExecutionStrategy};
    ///
    /// let builder = AkamiBuilder::new().with_execution_strategy(ExecutionStrategy::Parallel);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Parallel);
    /// ```
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Pins parallel evaluation to a dedicated pool of `threads` workers.
    ///
    /// Without this override, parallel evaluation uses the process-wide
    /// worker pool.
    ///
    /// # Examples
    /// ```
    /// use akami_core::AkamiBuilder;
    ///
    /// let builder = AkamiBuilder::new().with_threads(4);
    /// assert_eq!(builder.threads(), Some(4));
    /// ```
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Returns the configured worker count, if any.
    #[must_use]
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Validates the configuration and constructs an [`Akami`] instance.
    ///
    /// # Errors
    /// Returns [`AkamiError::InvalidThreadCount`] for a zero thread count and
    /// [`AkamiError::ParallelUnavailable`] when parallel execution (or a
    /// worker-count override) is requested in a build without the `parallel`
    /// feature.
    ///
    /// # Examples
    /// ```
    /// use akami_core::AkamiBuilder;
    ///
    /// let akami = AkamiBuilder::new().build().expect("configuration is valid");
    /// assert_eq!(akami.threads(), None);
    /// ```
    pub fn build(self) -> Result<Akami> {
        let threads = match self.threads {
            None => None,
            Some(count) => Some(
                NonZeroUsize::new(count).ok_or(AkamiError::InvalidThreadCount { got: count })?,
            ),
        };

        let parallel_requested =
            matches!(self.execution_strategy, ExecutionStrategy::Parallel) || threads.is_some();
        if parallel_requested && !cfg!(feature = "parallel") {
            return Err(AkamiError::ParallelUnavailable);
        }

        Ok(Akami::new(self.execution_strategy, threads))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_is_rejected() {
        let err = AkamiBuilder::new()
            .with_threads(0)
            .build()
            .expect_err("zero workers must fail");
        assert!(matches!(err, AkamiError::InvalidThreadCount { got: 0 }));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_strategy_builds_when_available() {
        let akami = AkamiBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .with_threads(2)
            .build()
            .expect("parallel build must succeed");
        assert_eq!(akami.execution_strategy(), ExecutionStrategy::Parallel);
        assert_eq!(akami.threads().map(std::num::NonZeroUsize::get), Some(2));
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn parallel_strategy_fails_without_the_feature() {
        let err = AkamiBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .build()
            .expect_err("parallel must be unavailable");
        assert!(matches!(err, AkamiError::ParallelUnavailable));
    }
}
