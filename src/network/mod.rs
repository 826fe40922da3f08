pub mod config;
pub mod mlp;
pub mod parameters;

pub use config::{MlpConfig, Seed, Topology};
pub use mlp::{Activations, Gradients, Mlp};
pub use parameters::Parameters;
