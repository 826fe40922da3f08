//! Training drivers. Everything here goes through the public operations of
//! [`Mlp`](crate::Mlp); none of it is required to use the network.

pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::{evaluate, train_epoch};
pub use epoch_stats::EpochStats;
pub use train_config::{Shuffle, TrainConfig};
pub use loop_fn::train_loop;
