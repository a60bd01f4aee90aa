//! Drift module - comparing a proposal's snapshot against live assessment data.
//!
//! Drift is computed on demand and never stored. Everything here is pure.

mod detector;
mod report;

pub use detector::DriftDetector;
pub use report::{DriftCheck, DriftReport, StatusChange};
