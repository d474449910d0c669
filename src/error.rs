//! Crate-wide error type.
//!
//! Every failure is local and synchronous: the estimator is deterministic, so
//! retrying with identical input reproduces the same failure. Callers (GUI,
//! batch driver) are responsible for surfacing messages to the user.

/// Errors produced by baseline estimation and its I/O collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Shape mismatches, non-finite values, or a non-positive threshold.
    InvalidInput(String),

    /// Fewer valid (masked-in) samples than the `order + 1` coefficients
    /// the requested polynomial needs.
    UnderdeterminedFit { valid: usize, required: usize },

    /// Zero dynamic range: `max(y) == min(y)` over the valid samples, so the
    /// signal rescaling is undefined.
    DegenerateSignal,

    /// All valid axis values identical (or a design matrix the solver
    /// rejects at every tolerance), so the axis rescaling is undefined.
    DegenerateAxis,

    /// The reweighting loop exceeded the configured iteration cap without
    /// meeting the relative-change tolerance.
    ConvergenceFailure { iterations: usize },

    /// File-level failure in the CSV ingest/export collaborators.
    Io(String),
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            FitError::UnderdeterminedFit { valid, required } => write!(
                f,
                "Underdetermined fit: {valid} valid samples, but the requested order needs at least {required}."
            ),
            FitError::DegenerateSignal => {
                write!(f, "Degenerate signal: max(y) == min(y) over the valid samples.")
            }
            FitError::DegenerateAxis => {
                write!(f, "Degenerate axis: valid samples share a single axis value.")
            }
            FitError::ConvergenceFailure { iterations } => write!(
                f,
                "Baseline fit did not converge within {iterations} iterations."
            ),
            FitError::Io(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FitError {}
