use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::network::mlp::Mlp;
use crate::train::epoch_stats::EpochStats;

/// Sample order within an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shuffle {
    /// Dataset order every epoch.
    #[default]
    None,
    /// Reshuffled every epoch from a generator seeded once per run.
    Seeded(u64),
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`     : total number of full passes over the training data
/// - `shuffle`    : sample ordering; training is always one sample per step
/// - `progress_tx`: optional channel sender; one `EpochStats` is sent per
///                completed epoch.  If the receiver is dropped the loop
///                terminates early.
/// - `stop_flag`  : optional atomic flag; when set to `true` from another
///                thread the loop terminates after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: Shuffle,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, shuffle: Shuffle) -> Self {
        TrainConfig {
            epochs,
            shuffle,
            progress_tx: None,
            stop_flag: None,
        }
    }

    /// Uses the epoch count the network was built with.
    pub fn for_mlp(mlp: &Mlp) -> Self {
        TrainConfig::new(mlp.epochs(), Shuffle::None)
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }
}
