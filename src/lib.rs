//! A from-scratch multi-layer perceptron with a single hidden layer.
//!
//! The network is `I → H (ReLU) → O (sigmoid)`, trained one sample at a time
//! with squared error. [`Mlp`] owns the parameters and exposes the four
//! stages (init, feedforward, backpropagate, update); [`train`] holds a
//! training loop that drives it from the outside.

pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{MlpError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use network::{Activations, Gradients, Mlp, MlpConfig, Parameters, Seed, Topology};
pub use loss::{average_squared_error, SquaredErrorLoss};
pub use optim::{Sgd, UpdateRule};
pub use train::{evaluate, train_epoch, train_loop, EpochStats, Shuffle, TrainConfig};
