use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::activation::activation::ActivationFunction;
use crate::error::{check_len, Result};
use crate::loss::squared_error::SquaredErrorLoss;
use crate::network::config::{MlpConfig, Seed, Topology};
use crate::network::parameters::Parameters;
use crate::optim::{Sgd, UpdateRule};

pub const HIDDEN_ACTIVATION: ActivationFunction = ActivationFunction::ReLU;
pub const OUTPUT_ACTIVATION: ActivationFunction = ActivationFunction::Sigmoid;

/// Result of a forward pass: the post-activation values of both layers.
///
/// Can be kept around and handed back to [`Mlp::feedforward_into`] /
/// [`Mlp::backpropagate_into`], which resize and overwrite it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activations {
    pub hidden: Vec<f64>,
    pub output: Vec<f64>,
}

impl Activations {
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    pub fn hidden(&self) -> &[f64] {
        &self.hidden
    }
}

/// Gradients of one backpropagation step, with respect to the
/// pre-activation sums of each layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub output: Vec<f64>,
    pub hidden: Vec<f64>,
}

/// A fully-connected network with one ReLU hidden layer and a sigmoid
/// output layer, trained one sample at a time.
#[derive(Debug, Clone)]
pub struct Mlp {
    topology: Topology,
    optimizer: Sgd,
    epochs: usize,
    params: Parameters,
    rng: StdRng,
}

impl Mlp {
    /// Validates `config`, seeds the generator and draws initial parameters.
    pub fn new(config: MlpConfig) -> Result<Mlp> {
        let seed = match config.seed {
            Seed::Fixed(seed) => seed,
            Seed::Time => time_seed(),
        };
        debug!(seed, "seeding parameter generator");
        Mlp::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Same as [`Mlp::new`] with an explicit generator; `config.seed` is ignored.
    pub fn with_rng(config: MlpConfig, rng: StdRng) -> Result<Mlp> {
        config.validate()?;
        let mut mlp = Mlp {
            topology: config.topology,
            optimizer: Sgd::new(config.learning_rate, config.update_rule),
            epochs: config.epochs,
            params: Parameters::zeros(config.topology),
            rng,
        };
        mlp.init_weights();
        Ok(mlp)
    }

    /// Positional constructor: widths, learning rate and epoch count, with
    /// the reference update rule and a time-derived seed.
    pub fn from_parts(
        inputs: usize,
        hidden: usize,
        outputs: usize,
        learning_rate: f64,
        epochs: usize,
    ) -> Result<Mlp> {
        Mlp::new(MlpConfig::new(Topology::new(inputs, hidden, outputs), learning_rate, epochs))
    }

    /// Redraws every weight and bias from `U[-1, 1]`, discarding anything
    /// learned so far.
    pub fn init_weights(&mut self) {
        self.params.randomize(&mut self.rng);
        debug!(
            inputs = self.topology.inputs,
            hidden = self.topology.hidden,
            outputs = self.topology.outputs,
            "initialized parameters"
        );
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    /// Epoch count handed over at construction; only training loops read it.
    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn update_rule(&self) -> UpdateRule {
        self.optimizer.rule
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Replaces all parameters, e.g. with hand-picked values.
    pub fn set_parameters(&mut self, params: Parameters) -> Result<()> {
        params.check_shape(self.topology)?;
        self.params = params;
        Ok(())
    }

    /// Forward pass into fresh buffers.
    pub fn feedforward(&self, input: &[f64]) -> Result<Activations> {
        let mut activations = Activations::default();
        self.feedforward_into(input, &mut activations)?;
        Ok(activations)
    }

    /// Forward pass into `activations`, resizing both buffers to the layer
    /// widths. Returns the output layer.
    pub fn feedforward_into<'a>(
        &self,
        input: &[f64],
        activations: &'a mut Activations,
    ) -> Result<&'a [f64]> {
        check_len("input", self.topology.inputs, input.len())?;

        let hidden = &mut activations.hidden;
        hidden.clear();
        hidden.extend(
            self.params.hidden_bias.iter().enumerate()
                .map(|(j, b)| self.params.input_hidden.column_dot(input, j) + b),
        );
        HIDDEN_ACTIVATION.apply(hidden);

        let output = &mut activations.output;
        output.clear();
        output.extend(
            self.params.output_bias.iter().enumerate()
                .map(|(k, b)| self.params.hidden_output.column_dot(&activations.hidden, k) + b),
        );
        OUTPUT_ACTIVATION.apply(output);

        Ok(&activations.output)
    }

    /// One online training step on a single sample. Returns the activations
    /// of the forward pass the gradients were computed from.
    pub fn backpropagate(&mut self, input: &[f64], target: &[f64]) -> Result<Activations> {
        let mut activations = Activations::default();
        self.backpropagate_into(input, target, &mut activations)?;
        Ok(activations)
    }

    /// As [`Mlp::backpropagate`], reusing `activations` for the forward pass.
    pub fn backpropagate_into(
        &mut self,
        input: &[f64],
        target: &[f64],
        activations: &mut Activations,
    ) -> Result<()> {
        check_len("target", self.topology.outputs, target.len())?;
        self.feedforward_into(input, activations)?;

        let grads = self.gradients(target, activations)?;
        trace!(output_grad = ?grads.output, hidden_grad = ?grads.hidden, "backpropagated");

        self.update_weights(input, &activations.hidden, &grads.output, &grads.hidden)
    }

    /// Output and hidden gradients for `target` given the activations of
    /// the current parameters. Does not modify the network.
    pub fn gradients(&self, target: &[f64], activations: &Activations) -> Result<Gradients> {
        check_len("target", self.topology.outputs, target.len())?;
        check_len("hidden activations", self.topology.hidden, activations.hidden.len())?;

        let output: Vec<f64> = SquaredErrorLoss::error(target, &activations.output)?
            .into_iter()
            .zip(activations.output.iter())
            .map(|(e, &y)| e * OUTPUT_ACTIVATION.derivative(y))
            .collect();

        // Uses the weights as they are before this step's update.
        let hidden = activations.hidden.iter().enumerate()
            .map(|(j, &h)| self.params.hidden_output.row_dot(j, &output) * HIDDEN_ACTIVATION.derivative(h))
            .collect();

        Ok(Gradients { output, hidden })
    }

    /// Applies one update step with the configured [`UpdateRule`].
    pub fn update_weights(
        &mut self,
        input: &[f64],
        hidden: &[f64],
        out_grad: &[f64],
        hidden_grad: &[f64],
    ) -> Result<()> {
        check_len("input", self.topology.inputs, input.len())?;
        check_len("hidden activations", self.topology.hidden, hidden.len())?;
        check_len("output gradient", self.topology.outputs, out_grad.len())?;
        check_len("hidden gradient", self.topology.hidden, hidden_grad.len())?;

        self.optimizer.step(&mut self.params, input, hidden, out_grad, hidden_grad);
        Ok(())
    }

    /// Loss metric of the network: `Σ (target - predicted)² / 2`.
    pub fn average_squared_error(target: &[f64], predicted: &[f64]) -> Result<f64> {
        SquaredErrorLoss::loss(target, predicted)
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
