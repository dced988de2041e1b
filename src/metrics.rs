//! Metrics
//!
//! Scores for comparing predicted labels against the truth.

/// Share of positions where the prediction equals the true label.
///
/// Predictions are compared pairwise; the denominator is the number of
/// true labels. An empty `y` gives NaN.
pub fn accuracy<L: PartialEq>(y: &[L], y_hat: &[L]) -> f64 {
    let correct = y.iter().zip(y_hat).filter(|(a, b)| a == b).count();
    correct as f64 / y.len() as f64
}

/// Indices of the rows whose prediction differs from the true label.
pub fn misclassified<L: PartialEq>(y: &[L], y_hat: &[L]) -> Vec<usize> {
    y.iter()
        .zip(y_hat)
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect()
}
