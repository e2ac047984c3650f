#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate metrics and zone classification over the ward dataset.
//!
//! Every public function is a pure, read-only query against an immutable
//! [`stress_map_dataset::Dataset`]. Stress zones are taken from the source
//! labels as-is and never re-derived from ESI.
//!
//! Queries that can meet non-finite source values return
//! [`MetricsError`]; callers are expected to turn that into a degraded
//! response rather than fail the process.

pub mod format;
pub mod insights;
pub mod queries;

use thiserror::Error;

pub use insights::insights;
pub use queries::{
    map_markers, marker_radius, overview, pm25_vs_green, stress_distribution, ward_table,
};

/// Errors that can occur while computing a metric.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// A computed value came out NaN or infinite, usually because the
    /// source data contains a `NaN` or `inf` cell.
    #[error("Non-finite value for {metric}: {value}")]
    NonFinite {
        /// Name of the metric or field.
        metric: &'static str,
        /// The offending value.
        value: f64,
    },
}

/// Passes `value` through if it is finite.
pub(crate) fn finite(metric: &'static str, value: f64) -> Result<f64, MetricsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        log::debug!("Metric {metric} is not finite: {value}");
        Err(MetricsError::NonFinite { metric, value })
    }
}
