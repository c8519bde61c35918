//! Resolution of metric identifiers to concrete distance functions.
//!
//! Resolution happens once per engine invocation, before any pair is
//! evaluated, so identifier and parameter problems surface early and the
//! per-pair loop pays no lookup cost.

use std::sync::Arc;

use crate::error::AkamiError;

use super::damerau::{DamerauLevenshtein, Osa};
use super::hamming::Hamming;
use super::jaro::{Jaro, JaroWinkler};
use super::levenshtein::Levenshtein;
use super::types::{MetricParams, MetricSpec, SequenceMetric};

type Builder = fn(&MetricParams) -> super::types::Result<Box<dyn SequenceMetric>>;

/// Identifiers accepted by the registry, in alphabetical order.
///
/// # Examples
/// ```
/// use akami_core::metric_names;
///
/// assert!(metric_names().contains(&"levenshtein"));
/// ```
#[must_use]
pub fn metric_names() -> &'static [&'static str] {
    &[
        "damerau_levenshtein",
        "hamming",
        "jaro",
        "jaro_winkler",
        "levenshtein",
        "osa",
    ]
}

/// Resolves a [`MetricSpec`] into a ready-to-evaluate metric.
///
/// # Errors
/// Returns [`AkamiError::UnknownMetric`] for an unregistered identifier and
/// [`AkamiError::InvalidParameter`] when a parameter is unknown, of the wrong
/// kind, or outside its domain.
pub(crate) fn resolve(spec: &MetricSpec) -> Result<Box<dyn SequenceMetric>, AkamiError> {
    let (name, build): (&'static str, Builder) = match spec.name() {
        "damerau_levenshtein" => ("damerau_levenshtein", |params| {
            Ok(Box::new(DamerauLevenshtein::from_params(params)?))
        }),
        "hamming" => ("hamming", |params| Ok(Box::new(Hamming::from_params(params)?))),
        "jaro" => ("jaro", |params| Ok(Box::new(Jaro::from_params(params)?))),
        "jaro_winkler" => ("jaro_winkler", |params| {
            Ok(Box::new(JaroWinkler::from_params(params)?))
        }),
        "levenshtein" => ("levenshtein", |params| {
            Ok(Box::new(Levenshtein::from_params(params)?))
        }),
        "osa" => ("osa", |params| Ok(Box::new(Osa::from_params(params)?))),
        other => {
            return Err(AkamiError::UnknownMetric {
                name: Arc::from(other),
            });
        }
    };

    build(spec.params()).map_err(|error| AkamiError::InvalidParameter {
        metric: name,
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_name_resolves_with_defaults() {
        for name in metric_names() {
            let metric =
                resolve(&MetricSpec::new(*name)).expect("default parameters must resolve");
            assert_eq!(metric.name(), *name);
            assert_eq!(
                metric.evaluate("akami", "akami"),
                Ok(0.0),
                "{name} must be zero on identical items"
            );
        }
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = resolve(&MetricSpec::new("euclidean")).expect_err("unknown metric must fail");
        assert!(matches!(err, AkamiError::UnknownMetric { name } if &*name == "euclidean"));
    }

    #[test]
    fn invalid_parameters_name_the_metric() {
        let spec = MetricSpec::with_params(
            "levenshtein",
            MetricParams::new().with_number("insert", -2.0),
        );
        let err = resolve(&spec).expect_err("negative cost must fail");
        assert!(matches!(err, AkamiError::InvalidParameter { metric: "levenshtein", .. }));
    }

    #[test]
    fn metric_names_are_sorted_and_unique() {
        let names = metric_names();
        let mut sorted: Vec<_> = names.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted.as_slice());
    }
}
