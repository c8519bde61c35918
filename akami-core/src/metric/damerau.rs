//! Transposition-aware edit distances.

use super::helpers::folded;
use super::types::{MetricParams, Result, SequenceMetric};

const PARAMETERS: &[&str] = &["fold_case"];

/// Optimal string alignment distance: edits plus adjacent transpositions,
/// with no substring edited twice.
#[derive(Debug)]
pub(crate) struct Osa {
    fold_case: bool,
}

impl Osa {
    pub(crate) fn from_params(params: &MetricParams) -> Result<Self> {
        params.ensure_known(PARAMETERS)?;
        Ok(Self {
            fold_case: params.flag("fold_case")?.unwrap_or(false),
        })
    }
}

impl SequenceMetric for Osa {
    fn name(&self) -> &'static str {
        "osa"
    }

    fn evaluate(&self, left: &str, right: &str) -> Result<f64> {
        let left = folded(left, self.fold_case);
        let right = folded(right, self.fold_case);
        Ok(strsim::osa_distance(&left, &right) as f64)
    }
}

/// Unrestricted Damerau-Levenshtein distance.
#[derive(Debug)]
pub(crate) struct DamerauLevenshtein {
    fold_case: bool,
}

impl DamerauLevenshtein {
    pub(crate) fn from_params(params: &MetricParams) -> Result<Self> {
        params.ensure_known(PARAMETERS)?;
        Ok(Self {
            fold_case: params.flag("fold_case")?.unwrap_or(false),
        })
    }
}

impl SequenceMetric for DamerauLevenshtein {
    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }

    fn evaluate(&self, left: &str, right: &str) -> Result<f64> {
        let left = folded(left, self.fold_case);
        let right = folded(right, self.fold_case);
        Ok(strsim::damerau_levenshtein(&left, &right) as f64)
    }
}
