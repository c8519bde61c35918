//! Positional mismatch count for equal-length items.

use strsim::StrSimError;

use super::helpers::folded;
use super::types::{MetricError, MetricParams, Result, SequenceMetric};

const PARAMETERS: &[&str] = &["fold_case"];

#[derive(Debug)]
pub(crate) struct Hamming {
    fold_case: bool,
}

impl Hamming {
    pub(crate) fn from_params(params: &MetricParams) -> Result<Self> {
        params.ensure_known(PARAMETERS)?;
        Ok(Self {
            fold_case: params.flag("fold_case")?.unwrap_or(false),
        })
    }
}

impl SequenceMetric for Hamming {
    fn name(&self) -> &'static str {
        "hamming"
    }

    fn evaluate(&self, left: &str, right: &str) -> Result<f64> {
        let left = folded(left, self.fold_case);
        let right = folded(right, self.fold_case);
        match strsim::hamming(&left, &right) {
            Ok(distance) => Ok(distance as f64),
            Err(StrSimError::DifferentLengthArgs) => Err(MetricError::LengthMismatch {
                left: left.chars().count(),
                right: right.chars().count(),
            }),
        }
    }
}
