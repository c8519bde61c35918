//! Akami core library.
//!
//! Computes dense pairwise distance matrices over collections of string-like
//! items, either with a built-in metric resolved by identifier or with a
//! caller-supplied callback, for use as precomputed input to clustering and
//! nearest-neighbour methods.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod callback;
mod engine;
mod error;
mod matrix;
mod metric;
mod pairs;

pub use crate::{
    builder::{AkamiBuilder, ExecutionStrategy},
    callback::{CallbackError, CallbackOutcome},
    engine::Akami,
    error::{AkamiError, AkamiErrorCode, CollectionSide, Result},
    matrix::DistanceMatrix,
    metric::{MetricError, MetricParams, MetricSpec, ParamValue, SequenceMetric, metric_names},
    pairs::{PairGrid, PairIter},
};
