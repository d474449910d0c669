//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - serialized by callers that want to record settings alongside results
//! - constructed trivially by any front-end (GUI fields, batch configs)

use serde::{Deserialize, Serialize};

/// Cost function driving the iteratively reweighted least-squares fit.
///
/// All four are quadratic for small residuals and flatten (Huber) or truncate
/// (truncated quadratic) beyond the threshold. The asymmetric variants only
/// penalize positive residuals, which is what makes peaks rising *above* the
/// baseline cheap to ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostFunction {
    /// Quadratic inside `±threshold`, linear growth outside.
    SymmetricHuber,
    /// Quadratic below `threshold`, linear growth above.
    AsymmetricHuber,
    /// Quadratic inside `±threshold`, constant outside.
    SymmetricTruncatedQuadratic,
    /// Quadratic below `threshold`, constant above.
    AsymmetricTruncatedQuadratic,
}

impl CostFunction {
    /// Human-readable label for status bars and summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            CostFunction::SymmetricHuber => "symmetric Huber",
            CostFunction::AsymmetricHuber => "asymmetric Huber",
            CostFunction::SymmetricTruncatedQuadratic => "symmetric truncated quadratic",
            CostFunction::AsymmetricTruncatedQuadratic => "asymmetric truncated quadratic",
        }
    }

    /// All variants, in a stable order (useful for UI combo boxes and tests).
    pub const ALL: [CostFunction; 4] = [
        CostFunction::SymmetricHuber,
        CostFunction::AsymmetricHuber,
        CostFunction::SymmetricTruncatedQuadratic,
        CostFunction::AsymmetricTruncatedQuadratic,
    ];
}

/// Default safety cap on reweighting iterations.
///
/// The reweighting loop has no intrinsic bound; the cap turns a
/// non-converging fit into an explicit `ConvergenceFailure` instead of an
/// infinite loop. Typical fits converge in well under a hundred iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 2000;

/// Configuration for a single baseline fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitSettings {
    /// Degree of the background polynomial.
    pub order: usize,

    /// Residual magnitude at which the cost function leaves its quadratic
    /// region, in the same units as the signal. Must be positive.
    pub threshold: f64,

    /// Cost function variant.
    pub cost: CostFunction,

    /// Safety cap on reweighting iterations.
    pub max_iterations: usize,
}

impl FitSettings {
    /// Settings with the default iteration cap.
    pub fn new(order: usize, threshold: f64, cost: CostFunction) -> Self {
        Self {
            order,
            threshold,
            cost,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A one-dimensional spectrum: axis positions and observed values.
///
/// Samples need not be sorted by axis; the estimator sorts internally and
/// reports its baseline in the original sample order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Axis positions (e.g. wavelength).
    pub x: Vec<f64>,
    /// Observed values (e.g. intensity).
    pub y: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Output of a baseline fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineFit {
    /// Estimated baseline, index-for-index with the original input axis
    /// (including masked-out samples).
    pub baseline: Vec<f64>,

    /// The `order + 1` polynomial coefficients, ascending power, expressed
    /// over the original axis and signal units (evaluating them at an axis
    /// position reproduces the baseline there).
    pub coefficients: Vec<f64>,

    /// Number of reweighting iterations performed.
    pub iterations: usize,
}
