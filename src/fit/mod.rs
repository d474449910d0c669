//! Baseline fitting.
//!
//! Responsibilities:
//!
//! - per-sample cost-function adjustments (the IRLS surrogate)
//! - the core iteratively reweighted estimator
//! - parallel batch fitting of many spectra

pub mod batch;
pub mod cost;
pub mod estimator;

pub use batch::*;
pub use cost::*;
pub use estimator::*;
