use crate::error::{check_len, Result};

pub struct SquaredErrorLoss;

impl SquaredErrorLoss {
    /// Sum of half-squared errors: `Σ (target - predicted)² / 2`.
    ///
    /// This is a sum over outputs, not a mean; each term is halved so that
    /// its derivative is the plain error.
    pub fn loss(target: &[f64], predicted: &[f64]) -> Result<f64> {
        check_len("predicted", target.len(), predicted.len())?;
        Ok(target.iter().zip(predicted.iter())
            .map(|(t, p)| (t - p).powi(2) / 2.0)
            .sum())
    }

    /// Per-output error `target - predicted`; positive means the output
    /// should grow.
    pub fn error(target: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
        check_len("predicted", target.len(), predicted.len())?;
        Ok(target.iter().zip(predicted.iter())
            .map(|(t, p)| t - p)
            .collect())
    }
}

/// The engine's loss metric under its historical name. See
/// [`SquaredErrorLoss::loss`] for the formula.
pub fn average_squared_error(target: &[f64], predicted: &[f64]) -> Result<f64> {
    SquaredErrorLoss::loss(target, predicted)
}
