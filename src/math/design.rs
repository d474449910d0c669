//! Vandermonde design matrix and least-squares solves.
//!
//! The background polynomial is expressed as a linear map: row `i` of the
//! design matrix holds the powers `x_i^0 .. x_i^order` of the (normalized)
//! axis, so evaluating the polynomial is `T · a` and fitting it is a
//! least-squares solve.
//!
//! Implementation choices:
//! - We solve with SVD rather than forming the normal equations
//!   `pinv(TᵀT)·Tᵀ` explicitly: mathematically equivalent, better
//!   conditioned, and it tolerates rank-deficient designs (e.g.
//!   near-duplicate axis values) the same way the pseudo-inverse does.
//! - The SVD is computed once per fit and reused for every reweighted
//!   solve, since the design matrix never changes across iterations.

use nalgebra::{DMatrix, DVector};

/// Vandermonde design matrix with a precomputed SVD.
pub struct DesignMatrix {
    t: DMatrix<f64>,
    svd: nalgebra::SVD<f64, nalgebra::Dyn, nalgebra::Dyn>,
}

impl DesignMatrix {
    /// Build the `(len(x), order + 1)` Vandermonde matrix over a normalized
    /// axis and factor it.
    pub fn new(x: &[f64], order: usize) -> Self {
        let t = vandermonde(x, order);
        let svd = t.clone().svd(true, true);
        Self { t, svd }
    }

    /// Solve the least-squares problem `T · a ≈ rhs`.
    ///
    /// Returns `None` if the system is too ill-conditioned to solve robustly.
    pub fn solve(&self, rhs: &DVector<f64>) -> Option<DVector<f64>> {
        // Try progressively looser tolerances if strict solve fails.
        for &tol in &[1e-10, 1e-8, 1e-6] {
            if let Ok(a) = self.svd.solve(rhs, tol) {
                if a.iter().all(|v| v.is_finite()) {
                    return Some(a);
                }
            }
        }

        None
    }

    /// Evaluate the polynomial at every design row: `T · a`.
    pub fn eval(&self, a: &DVector<f64>) -> DVector<f64> {
        &self.t * a
    }
}

/// Construct the Vandermonde matrix `T[i][k] = x_i^k` for `k = 0..=order`.
pub fn vandermonde(x: &[f64], order: usize) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), order + 1, |i, k| x[i].powi(k as i32))
}

/// Evaluate a polynomial with ascending coefficients at a single point
/// (Horner form).
pub fn eval_poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
