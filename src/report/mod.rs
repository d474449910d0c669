//! Reporting utilities: corrected signal, residual statistics, and a
//! formatted run summary.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{BaselineFit, FitSettings};
use crate::error::FitError;

/// Summary statistics of the corrected signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualStats {
    pub min: f64,
    pub max: f64,
    pub rms: f64,
}

/// Compute `y - baseline`, the peak signal with the background removed.
pub fn corrected_signal(y: &[f64], baseline: &[f64]) -> Result<Vec<f64>, FitError> {
    if y.len() != baseline.len() {
        return Err(FitError::InvalidInput(format!(
            "Signal and baseline lengths differ: {} vs {}.",
            y.len(),
            baseline.len()
        )));
    }
    Ok(y.iter().zip(baseline.iter()).map(|(yi, bi)| yi - bi).collect())
}

/// Residual statistics over a corrected signal.
pub fn residual_stats(corrected: &[f64]) -> Option<ResidualStats> {
    if corrected.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum_sq = 0.0;
    for &v in corrected {
        min = min.min(v);
        max = max.max(v);
        sum_sq += v * v;
    }

    Some(ResidualStats {
        min,
        max,
        rms: (sum_sq / corrected.len() as f64).sqrt(),
    })
}

/// Format a run summary for status bars and terminal output.
pub fn format_fit_summary(settings: &FitSettings, fit: &BaselineFit, corrected: &[f64]) -> String {
    let mut out = String::new();

    out.push_str("=== backfit - baseline estimation ===\n");
    out.push_str(&format!("Cost: {}\n", settings.cost.display_name()));
    out.push_str(&format!(
        "Order: {} | Threshold: {}\n",
        settings.order, settings.threshold
    ));
    out.push_str(&format!("Iterations: {}\n", fit.iterations));
    out.push_str(&format!("Coefficients: {}\n", fmt_vec(&fit.coefficients)));

    if let Some(stats) = residual_stats(corrected) {
        out.push_str(&format!(
            "Corrected signal: min={:.4} | max={:.4} | rms={:.4}\n",
            stats.min, stats.max, stats.rms
        ));
    }

    out
}

fn fmt_vec(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CostFunction;

    #[test]
    fn corrected_signal_subtracts_pointwise() {
        let corrected = corrected_signal(&[3.0, 4.0, 5.0], &[1.0, 1.5, 2.0]).unwrap();
        assert_eq!(corrected, vec![2.0, 2.5, 3.0]);
    }

    #[test]
    fn corrected_signal_rejects_length_mismatch() {
        assert!(matches!(
            corrected_signal(&[1.0], &[1.0, 2.0]),
            Err(FitError::InvalidInput(_))
        ));
    }

    #[test]
    fn residual_stats_on_known_values() {
        let stats = residual_stats(&[-1.0, 0.0, 2.0]).unwrap();
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 2.0);
        assert!((stats.rms - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);

        assert!(residual_stats(&[]).is_none());
    }

    #[test]
    fn summary_mentions_cost_and_iterations() {
        let settings = FitSettings::new(2, 0.5, CostFunction::AsymmetricHuber);
        let fit = BaselineFit {
            baseline: vec![1.0, 1.0],
            coefficients: vec![1.0, 0.0, 0.0],
            iterations: 7,
        };

        let summary = format_fit_summary(&settings, &fit, &[0.1, -0.1]);
        assert!(summary.contains("asymmetric Huber"));
        assert!(summary.contains("Iterations: 7"));
        assert!(summary.contains("Order: 2"));
    }
}
