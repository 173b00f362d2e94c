//! Batch pipeline for Wire Arc Additive Manufacturing (WAAM) alloy experiment
//! data: flattens a semi-structured raw JSON corpus into per-alloy-category
//! tables of numeric fields, filters statistical outliers per chart, and
//! renders styled scatter plots.
//!
//! The flow is strictly one way: raw store -> [`flatten`] (which uses
//! [`extract`] and [`classify`]) -> derived store -> [`filter`] ->
//! [`report`]/[`plot`]. Every run is an independent, single-threaded batch.

pub mod authors;
pub mod charts;
pub mod classify;
pub mod constants;
pub mod domain;
pub mod error;
pub mod extract;
pub mod filter;
pub mod flatten;
pub mod logging;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod stats;
pub mod store;
