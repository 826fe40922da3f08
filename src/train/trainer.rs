use crate::error::{MlpError, Result};
use crate::network::mlp::{Activations, Mlp};
use crate::loss::squared_error::SquaredErrorLoss;

/// One online pass over the data in dataset order. Returns the mean
/// per-sample loss, each measured on the forward pass that preceded that
/// sample's update.
pub fn train_epoch(mlp: &mut Mlp, inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<f64> {
    check_dataset(inputs, labels)?;
    let order: Vec<usize> = (0..inputs.len()).collect();
    train_in_order(mlp, inputs, labels, &order)
}

/// Mean loss over a dataset without touching the parameters.
pub fn evaluate(mlp: &Mlp, inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<f64> {
    check_dataset(inputs, labels)?;
    let mut activations = Activations::default();
    let mut total = 0.0;
    for (input, label) in inputs.iter().zip(labels.iter()) {
        let output = mlp.feedforward_into(input, &mut activations)?;
        total += SquaredErrorLoss::loss(label, output)?;
    }
    Ok(total / inputs.len() as f64)
}

/// Visits samples in `order`, one backpropagation step each. The dataset
/// must already have passed `check_dataset`.
pub(crate) fn train_in_order(
    mlp: &mut Mlp,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    order: &[usize],
) -> Result<f64> {
    let mut activations = Activations::default();
    let mut total_loss = 0.0;

    for &idx in order {
        let (input, label) = (&inputs[idx], &labels[idx]);
        mlp.backpropagate_into(input, label, &mut activations)?;
        total_loss += SquaredErrorLoss::loss(label, activations.output())?;
    }

    Ok(total_loss / order.len() as f64)
}

pub(crate) fn check_dataset(inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<()> {
    if inputs.is_empty() {
        return Err(MlpError::InvalidData("dataset has no samples".to_string()));
    }
    if inputs.len() != labels.len() {
        return Err(MlpError::InvalidData(format!(
            "{} inputs but {} labels",
            inputs.len(),
            labels.len()
        )));
    }
    Ok(())
}
