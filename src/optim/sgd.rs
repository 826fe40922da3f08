use serde::{Serialize, Deserialize};

use crate::network::parameters::Parameters;

/// How a single-sample gradient step is written into the parameters.
///
/// Gradients arrive already signed for ascent on `target - output`, so both
/// rules add `learning_rate * gradient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRule {
    /// The historical update of this engine, kept for behavioral parity:
    ///
    /// - `hidden_output[j][k] += lr * out_grad[k]`, with no `hidden[j]` factor
    /// - `output_bias[j] += lr * out_grad[j]` for `j` over the hidden units
    /// - `input_hidden[j][i] += lr * hidden_grad[j]`, i.e. written transposed
    ///   relative to how the forward pass reads it
    /// - `hidden_bias[j] += lr * hidden_grad[j]`
    ///
    /// Index pairs that fall outside the stored shapes (possible whenever
    /// `H != O` or `H != I`) are skipped.
    #[default]
    Reference,
    /// Textbook gradient descent for squared error through sigmoid/ReLU:
    ///
    /// - `hidden_output[j][k] += lr * out_grad[k] * hidden[j]`
    /// - `output_bias[k] += lr * out_grad[k]`
    /// - `input_hidden[i][j] += lr * hidden_grad[j] * input[i]`
    /// - `hidden_bias[j] += lr * hidden_grad[j]`
    Canonical,
}

/// Plain stochastic gradient descent: one step per sample, no state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
    pub rule: UpdateRule,
}

impl Sgd {
    pub fn new(learning_rate: f64, rule: UpdateRule) -> Sgd {
        Sgd { learning_rate, rule }
    }

    /// Applies one update. Slice lengths are expected to match the
    /// parameters' topology; callers validate them first.
    pub fn step(
        &self,
        params: &mut Parameters,
        input: &[f64],
        hidden: &[f64],
        out_grad: &[f64],
        hidden_grad: &[f64],
    ) {
        match self.rule {
            UpdateRule::Reference => self.reference_step(params, input, hidden, out_grad, hidden_grad),
            UpdateRule::Canonical => self.canonical_step(params, input, hidden, out_grad, hidden_grad),
        }
    }

    fn reference_step(
        &self,
        params: &mut Parameters,
        input: &[f64],
        hidden: &[f64],
        out_grad: &[f64],
        hidden_grad: &[f64],
    ) {
        let lr = self.learning_rate;

        for j in 0..hidden.len() {
            if let Some(row) = params.hidden_output.data.get_mut(j) {
                for (w, g) in row.iter_mut().zip(out_grad.iter()) {
                    *w += lr * g;
                }
            }
            // Indexed by hidden unit; only the first min(H, O) entries exist.
            if let (Some(b), Some(g)) = (params.output_bias.get_mut(j), out_grad.get(j)) {
                *b += lr * g;
            }
        }

        for i in 0..input.len() {
            for (j, g) in hidden_grad.iter().enumerate().take(hidden.len()) {
                if let Some(w) = params.input_hidden.get_mut(j, i) {
                    *w += lr * g;
                }
            }
        }

        for (b, g) in params.hidden_bias.iter_mut().zip(hidden_grad.iter()) {
            *b += lr * g;
        }
    }

    fn canonical_step(
        &self,
        params: &mut Parameters,
        input: &[f64],
        hidden: &[f64],
        out_grad: &[f64],
        hidden_grad: &[f64],
    ) {
        let lr = self.learning_rate;

        for (row, h) in params.hidden_output.data.iter_mut().zip(hidden.iter()) {
            for (w, g) in row.iter_mut().zip(out_grad.iter()) {
                *w += lr * g * h;
            }
        }
        for (b, g) in params.output_bias.iter_mut().zip(out_grad.iter()) {
            *b += lr * g;
        }

        for (row, x) in params.input_hidden.data.iter_mut().zip(input.iter()) {
            for (w, g) in row.iter_mut().zip(hidden_grad.iter()) {
                *w += lr * g * x;
            }
        }
        for (b, g) in params.hidden_bias.iter_mut().zip(hidden_grad.iter()) {
            *b += lr * g;
        }
    }
}
