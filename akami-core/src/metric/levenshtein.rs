//! Weighted edit distance over Unicode scalar values.

use super::helpers::{cost_parameter, folded};
use super::types::{MetricParams, Result, SequenceMetric};

const PARAMETERS: &[&str] = &["insert", "delete", "substitute", "fold_case"];

/// Edit distance with configurable insertion, deletion, and substitution
/// costs. Unit costs take the classic Levenshtein fast path from `strsim`;
/// any other weighting runs the general dynamic programme.
#[derive(Debug)]
pub(crate) struct Levenshtein {
    insert: f64,
    delete: f64,
    substitute: f64,
    fold_case: bool,
}

impl Levenshtein {
    /// Validates parameters and builds the metric.
    ///
    /// # Errors
    /// Rejects unknown parameter names and non-finite or negative costs.
    pub(crate) fn from_params(params: &MetricParams) -> Result<Self> {
        params.ensure_known(PARAMETERS)?;
        Ok(Self {
            insert: cost_parameter(params, "insert", 1.0)?,
            delete: cost_parameter(params, "delete", 1.0)?,
            substitute: cost_parameter(params, "substitute", 1.0)?,
            fold_case: params.flag("fold_case")?.unwrap_or(false),
        })
    }

    fn has_unit_costs(&self) -> bool {
        self.insert == 1.0 && self.delete == 1.0 && self.substitute == 1.0
    }
}

impl SequenceMetric for Levenshtein {
    fn name(&self) -> &'static str {
        "levenshtein"
    }

    fn evaluate(&self, left: &str, right: &str) -> Result<f64> {
        let left = folded(left, self.fold_case);
        let right = folded(right, self.fold_case);
        if self.has_unit_costs() {
            return Ok(strsim::levenshtein(&left, &right) as f64);
        }
        Ok(weighted_edit_distance(
            &left,
            &right,
            self.insert,
            self.delete,
            self.substitute,
        ))
    }
}

/// Two-row dynamic programme over characters. `insert` prices a character
/// present only in `right`, `delete` one present only in `left`.
fn weighted_edit_distance(
    left: &str,
    right: &str,
    insert: f64,
    delete: f64,
    substitute: f64,
) -> f64 {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();

    let mut prev: Vec<f64> = (0..=right.len()).map(|j| j as f64 * insert).collect();
    let mut cur = vec![0.0_f64; right.len() + 1];

    for (i, &lc) in left.iter().enumerate() {
        cur[0] = (i + 1) as f64 * delete;
        for (j, &rc) in right.iter().enumerate() {
            let substituted = if lc == rc { prev[j] } else { prev[j] + substitute };
            let deleted = prev[j + 1] + delete;
            let inserted = cur[j] + insert;
            cur[j + 1] = substituted.min(deleted).min(inserted);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[right.len()]
}
