//! Distance-matrix engine orchestration.
//!
//! Provides the [`Akami`] entry point: it validates arguments, resolves the
//! metric once per invocation, walks the pair grid, and hands back a fully
//! populated [`DistanceMatrix`]. Built-in metrics may be evaluated in
//! parallel; callback metrics always run sequentially in canonical pair
//! order.

use std::num::NonZeroUsize;

use tracing::{debug, instrument, warn};

use crate::{
    builder::ExecutionStrategy,
    callback::{CallbackAdapter, CallbackOutcome},
    error::{AkamiError, CollectionSide, Result},
    matrix::DistanceMatrix,
    metric::{self, MetricSpec, SequenceMetric},
    pairs::PairGrid,
};

/// Entry point for computing pairwise distance matrices.
///
/// The engine is stateless across invocations: collections are borrowed for
/// the duration of a call and the returned matrix is owned by the caller.
///
/// # Examples
/// ```
/// use akami_core::{AkamiBuilder, MetricSpec};
///
/// let akami = AkamiBuilder::new().build()?;
/// let matrix = akami.symmetric(&["cat", "cot", "dog"], &MetricSpec::new("levenshtein"))?;
/// assert_eq!(matrix.as_slice(), &[0.0, 1.0, 3.0, 1.0, 0.0, 3.0, 3.0, 3.0, 0.0]);
/// # Ok::<(), akami_core::AkamiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Akami {
    execution_strategy: ExecutionStrategy,
    threads: Option<NonZeroUsize>,
}

impl Akami {
    pub(crate) const fn new(
        execution_strategy: ExecutionStrategy,
        threads: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            execution_strategy,
            threads,
        }
    }

    /// Returns the execution strategy used for built-in metrics.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the dedicated worker count, if one was configured.
    #[must_use]
    pub fn threads(&self) -> Option<NonZeroUsize> {
        self.threads
    }

    /// Computes the distance matrix between two collections with a built-in
    /// metric.
    ///
    /// Every entry `(i, j)` holds the metric evaluated on
    /// `(left[i], right[j])`; no symmetry is assumed and no shortcuts apply.
    ///
    /// # Errors
    /// Returns the same errors as [`Self::compute`].
    ///
    /// # Examples
    /// ```
    /// use akami_core::{AkamiBuilder, MetricSpec};
    ///
    /// let akami = AkamiBuilder::new().build()?;
    /// let matrix = akami.cross(&["ab"], &["ab", "ba"], &MetricSpec::new("levenshtein"))?;
    /// assert_eq!(matrix.as_slice(), &[0.0, 2.0]);
    /// # Ok::<(), akami_core::AkamiError>(())
    /// ```
    pub fn cross<S: AsRef<str> + Sync>(
        &self,
        left: &[S],
        right: &[S],
        spec: &MetricSpec,
    ) -> Result<DistanceMatrix> {
        self.compute(left, Some(right), spec, false)
    }

    /// Computes the self-distance matrix of one collection with a built-in
    /// metric.
    ///
    /// Only the strict upper triangle is evaluated: diagonal entries are set
    /// to zero without invoking the metric, and each mirrored entry is a
    /// plain copy of its twin. For `n` items that is exactly
    /// `n · (n − 1) / 2` metric evaluations.
    ///
    /// # Errors
    /// Returns the same errors as [`Self::compute`].
    pub fn symmetric<S: AsRef<str> + Sync>(
        &self,
        items: &[S],
        spec: &MetricSpec,
    ) -> Result<DistanceMatrix> {
        self.compute(items, None, spec, true)
    }

    /// General built-in entry point: computes `left × right` (or
    /// `left × left` when `right` is `None`) under the requested symmetry.
    ///
    /// The metric is resolved exactly once, before any pair evaluation, so
    /// identifier and parameter problems surface with zero evaluations
    /// performed.
    ///
    /// # Errors
    /// - [`AkamiError::UnknownMetric`] and [`AkamiError::InvalidParameter`]
    ///   from metric resolution.
    /// - [`AkamiError::EmptyCollection`] when either collection has no items.
    /// - [`AkamiError::MissingRightCollection`] when `right` is absent
    ///   without `symmetric`.
    /// - [`AkamiError::SymmetricSizeMismatch`] when `symmetric` is requested
    ///   over two collections of different sizes.
    /// - [`AkamiError::Metric`] when a pair evaluation fails; the whole
    ///   computation aborts and no matrix is returned.
    #[instrument(
        name = "core.compute",
        err,
        skip(self, left, right, spec),
        fields(
            metric = spec.name(),
            rows = left.len(),
            cols = right.map_or(left.len(), <[S]>::len),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn compute<S: AsRef<str> + Sync>(
        &self,
        left: &[S],
        right: Option<&[S]>,
        spec: &MetricSpec,
        symmetric: bool,
    ) -> Result<DistanceMatrix> {
        let grid = validate(left, right, symmetric)?;
        let resolved = metric::resolve(spec)?;
        let right_items = right.unwrap_or(left);

        let matrix = match self.resolved_strategy() {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => {
                self.fill_builtin_parallel(&grid, left, right_items, resolved.as_ref())?
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => return Err(AkamiError::ParallelUnavailable),
            _ => fill_sequential(&grid, |row, col| {
                evaluate_builtin(resolved.as_ref(), left, right_items, row, col)
            })?,
        };

        debug!(
            evaluations = metric_evaluations(&grid),
            "distance matrix computed"
        );
        Ok(matrix)
    }

    /// Computes the distance matrix between two collections with a
    /// caller-supplied callback.
    ///
    /// # Errors
    /// Returns the same errors as [`Self::compute_with`].
    ///
    /// # Examples
    /// ```
    /// use akami_core::AkamiBuilder;
    ///
    /// let akami = AkamiBuilder::new().build()?;
    /// let matrix = akami.cross_with(&[1.0_f64, 4.0], &[2.0_f64], |x, y| Ok((x - y).abs()))?;
    /// assert_eq!(matrix.as_slice(), &[1.0, 2.0]);
    /// # Ok::<(), akami_core::AkamiError>(())
    /// ```
    pub fn cross_with<I, F>(&self, left: &[I], right: &[I], callback: F) -> Result<DistanceMatrix>
    where
        F: FnMut(&I, &I) -> CallbackOutcome,
    {
        self.compute_with(left, Some(right), callback, false)
    }

    /// Computes the self-distance matrix of one collection with a
    /// caller-supplied callback.
    ///
    /// The diagonal and symmetry shortcuts of [`Self::symmetric`] apply
    /// identically, so the callback runs exactly `n · (n − 1) / 2` times.
    ///
    /// # Errors
    /// Returns the same errors as [`Self::compute_with`].
    pub fn symmetric_with<I, F>(&self, items: &[I], callback: F) -> Result<DistanceMatrix>
    where
        F: FnMut(&I, &I) -> CallbackOutcome,
    {
        self.compute_with(items, None, callback, true)
    }

    /// General callback entry point: computes `left × right` (or
    /// `left × left` when `right` is `None`) under the requested symmetry.
    ///
    /// Re-entering caller-controlled code is never assumed thread-safe, so
    /// pairs are evaluated sequentially in row-major order regardless of the
    /// configured execution strategy; the visiting order is reproducible
    /// across runs for the same inputs.
    ///
    /// # Errors
    /// - Argument validation errors as for [`Self::compute`].
    /// - [`AkamiError::Callback`] when the callback raises; the foreign
    ///   payload is preserved as the error source.
    /// - [`AkamiError::NonFiniteCallback`] when the callback returns NaN or
    ///   an infinity.
    #[instrument(
        name = "core.compute_with",
        err,
        skip(self, left, right, callback),
        fields(
            rows = left.len(),
            cols = right.map_or(left.len(), <[I]>::len),
        ),
    )]
    pub fn compute_with<I, F>(
        &self,
        left: &[I],
        right: Option<&[I]>,
        callback: F,
        symmetric: bool,
    ) -> Result<DistanceMatrix>
    where
        F: FnMut(&I, &I) -> CallbackOutcome,
    {
        let grid = validate(left, right, symmetric)?;
        let right_items = right.unwrap_or(left);
        let mut adapter = CallbackAdapter::new(callback);

        let matrix = fill_sequential(&grid, |row, col| {
            adapter.evaluate(row, col, &left[row], &right_items[col])
        })?;

        debug!(
            evaluations = metric_evaluations(&grid),
            "distance matrix computed via callback"
        );
        Ok(matrix)
    }

    fn resolved_strategy(&self) -> ExecutionStrategy {
        match self.execution_strategy {
            ExecutionStrategy::Auto => {
                if cfg!(feature = "parallel") {
                    ExecutionStrategy::Parallel
                } else {
                    ExecutionStrategy::Sequential
                }
            }
            other => other,
        }
    }

    #[cfg(feature = "parallel")]
    fn fill_builtin_parallel<S: AsRef<str> + Sync>(
        &self,
        grid: &PairGrid,
        left: &[S],
        right: &[S],
        resolved: &dyn SequenceMetric,
    ) -> Result<DistanceMatrix> {
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads.get())
                    .build()
                    .map_err(|err| AkamiError::ThreadPool {
                        message: std::sync::Arc::from(err.to_string().as_str()),
                    })?;
                pool.install(|| fill_parallel(grid, left, right, resolved))
            }
            None => fill_parallel(grid, left, right, resolved),
        }
    }
}

/// Builds the pair grid for the requested mode, rejecting invalid argument
/// combinations before any evaluation begins.
fn validate<I>(left: &[I], right: Option<&[I]>, symmetric: bool) -> Result<PairGrid> {
    if left.is_empty() {
        warn!("left collection is empty, returning error");
        return Err(AkamiError::EmptyCollection {
            side: CollectionSide::Left,
        });
    }
    match right {
        None if symmetric => Ok(PairGrid::symmetric(left.len())),
        None => Err(AkamiError::MissingRightCollection),
        Some(items) => {
            if items.is_empty() {
                warn!("right collection is empty, returning error");
                return Err(AkamiError::EmptyCollection {
                    side: CollectionSide::Right,
                });
            }
            if symmetric {
                if items.len() != left.len() {
                    return Err(AkamiError::SymmetricSizeMismatch {
                        left: left.len(),
                        right: items.len(),
                    });
                }
                Ok(PairGrid::symmetric(left.len()))
            } else {
                Ok(PairGrid::cross(left.len(), items.len()))
            }
        }
    }
}

/// Number of real metric evaluations a grid incurs: symmetric mode skips the
/// diagonal and the mirrored half.
fn metric_evaluations(grid: &PairGrid) -> usize {
    if grid.is_symmetric() {
        grid.pair_count() - grid.rows()
    } else {
        grid.pair_count()
    }
}

/// Walks the grid in canonical order, writing each evaluated value once and
/// applying the diagonal and mirror shortcuts in symmetric mode.
fn fill_sequential(
    grid: &PairGrid,
    mut eval: impl FnMut(usize, usize) -> Result<f64>,
) -> Result<DistanceMatrix> {
    let mut matrix = DistanceMatrix::zeroed(grid.rows(), grid.cols());
    for (row, col) in grid {
        if grid.is_symmetric() && row == col {
            // Diagonal short-circuit: the metric never runs on (i, i).
            matrix.set(row, col, 0.0);
            continue;
        }
        let value = eval(row, col)?;
        matrix.set(row, col, value);
        if grid.is_symmetric() {
            // Mirror write, no second evaluation.
            matrix.set(col, row, value);
        }
    }
    Ok(matrix)
}

fn evaluate_builtin<S: AsRef<str>>(
    resolved: &dyn SequenceMetric,
    left: &[S],
    right: &[S],
    row: usize,
    col: usize,
) -> Result<f64> {
    resolved
        .evaluate(left[row].as_ref(), right[col].as_ref())
        .map_err(|error| AkamiError::Metric {
            metric: resolved.name(),
            row,
            col,
            error,
        })
}

#[cfg(feature = "parallel")]
fn fill_parallel<S: AsRef<str> + Sync>(
    grid: &PairGrid,
    left: &[S],
    right: &[S],
    resolved: &dyn SequenceMetric,
) -> Result<DistanceMatrix> {
    use rayon::prelude::*;

    let mut matrix = DistanceMatrix::zeroed(grid.rows(), grid.cols());
    if grid.is_symmetric() {
        // Evaluate the strict upper triangle in canonical order, then scatter
        // each value to its two mirrored cells. The diagonal keeps the zero
        // fill from allocation.
        let pairs: Vec<(usize, usize)> = grid.iter().filter(|&(row, col)| row != col).collect();
        let values = pairs
            .par_iter()
            .map(|&(row, col)| evaluate_builtin(resolved, left, right, row, col))
            .collect::<Result<Vec<f64>>>()?;
        for (&(row, col), &value) in pairs.iter().zip(&values) {
            matrix.set(row, col, value);
            matrix.set(col, row, value);
        }
    } else {
        let cols = grid.cols();
        matrix
            .as_mut_slice()
            .par_chunks_mut(cols)
            .enumerate()
            .try_for_each(|(row, out)| {
                for (col, cell) in out.iter_mut().enumerate() {
                    *cell = evaluate_builtin(resolved, left, right, row, col)?;
                }
                Ok(())
            })?;
    }
    Ok(matrix)
}
