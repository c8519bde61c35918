//! Jaro-family distances derived from `strsim` similarities.

use super::types::{MetricParams, Result, SequenceMetric};

/// Jaro distance, `1 −` the Jaro similarity.
#[derive(Debug)]
pub(crate) struct Jaro;

impl Jaro {
    pub(crate) fn from_params(params: &MetricParams) -> Result<Self> {
        params.ensure_known(&[])?;
        Ok(Self)
    }
}

impl SequenceMetric for Jaro {
    fn name(&self) -> &'static str {
        "jaro"
    }

    fn evaluate(&self, left: &str, right: &str) -> Result<f64> {
        Ok(1.0 - strsim::jaro(left, right))
    }
}

/// Jaro-Winkler distance, boosting matches with a common prefix.
#[derive(Debug)]
pub(crate) struct JaroWinkler;

impl JaroWinkler {
    pub(crate) fn from_params(params: &MetricParams) -> Result<Self> {
        params.ensure_known(&[])?;
        Ok(Self)
    }
}

impl SequenceMetric for JaroWinkler {
    fn name(&self) -> &'static str {
        "jaro_winkler"
    }

    fn evaluate(&self, left: &str, right: &str) -> Result<f64> {
        Ok(1.0 - strsim::jaro_winkler(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::types::MetricError;

    #[test]
    fn identical_items_have_zero_distance() {
        let jaro = Jaro::from_params(&MetricParams::new()).expect("defaults must build");
        assert_eq!(jaro.evaluate("akami", "akami"), Ok(0.0));
        let winkler = JaroWinkler::from_params(&MetricParams::new()).expect("defaults must build");
        assert_eq!(winkler.evaluate("", ""), Ok(0.0));
    }

    #[test]
    fn disjoint_items_have_unit_distance() {
        let jaro = Jaro::from_params(&MetricParams::new()).expect("defaults must build");
        assert_eq!(jaro.evaluate("abc", "xyz"), Ok(1.0));
    }

    #[test]
    fn winkler_rewards_shared_prefixes() {
        let jaro = Jaro::from_params(&MetricParams::new()).expect("defaults must build");
        let winkler = JaroWinkler::from_params(&MetricParams::new()).expect("defaults must build");
        let plain = jaro.evaluate("prefix", "present").expect("jaro must evaluate");
        let boosted = winkler
            .evaluate("prefix", "present")
            .expect("jaro_winkler must evaluate");
        assert!(boosted < plain, "shared prefix must shrink the distance");
    }

    #[test]
    fn jaro_accepts_no_parameters() {
        let err = Jaro::from_params(&MetricParams::new().with_flag("fold_case", true))
            .expect_err("jaro takes no parameters");
        assert!(matches!(err, MetricError::UnknownParameter { .. }));
    }
}
