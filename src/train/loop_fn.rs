use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use crate::error::{MlpError, Result};
use crate::network::mlp::Mlp;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::{Shuffle, TrainConfig};
use crate::train::trainer::{check_dataset, evaluate, train_in_order};

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `mlp` for `config.epochs` epochs and returns the mean training
/// loss of the **last completed epoch**.
///
/// # Arguments
/// - `mlp`         : the network; modified in place
/// - `train_inputs`: training samples, each of length `inputs`
/// - `train_labels`: corresponding targets, each of length `outputs`
/// - `val_inputs`  : optional validation samples
/// - `val_labels`  : validation targets (required iff `val_inputs` is `Some`)
/// - `config`      : epochs, ordering, optional progress channel and stop flag
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `InvalidData` for empty or mismatched datasets; `DimensionMismatch` if a
/// sample does not fit the network's topology.
#[instrument(skip_all, fields(epochs = config.epochs, samples = train_inputs.len()))]
pub fn train_loop(
    mlp: &mut Mlp,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    val_inputs: Option<&[Vec<f64>]>,
    val_labels: Option<&[Vec<f64>]>,
    config: &TrainConfig,
) -> Result<f64> {
    check_dataset(train_inputs, train_labels)?;
    let validation = match (val_inputs, val_labels) {
        (Some(vi), Some(vl)) => {
            check_dataset(vi, vl)?;
            Some((vi, vl))
        }
        (None, None) => None,
        _ => {
            return Err(MlpError::InvalidData(
                "validation inputs and labels must be given together".to_string(),
            ))
        }
    };

    let mut order: Vec<usize> = (0..train_inputs.len()).collect();
    let mut rng = match config.shuffle {
        Shuffle::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
        Shuffle::None => None,
    };

    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            debug!(epoch, "stop flag set; ending training");
            break;
        }

        let t_start = Instant::now();

        if let Some(rng) = rng.as_mut() {
            order.shuffle(rng);
        }
        let train_loss = train_in_order(mlp, train_inputs, train_labels, &order)?;
        last_train_loss = train_loss;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let val_loss = match validation {
            Some((vi, vl)) => Some(evaluate(mlp, vi, vl)?),
            None => None,
        };

        debug!(epoch, train_loss, ?val_loss, elapsed_ms, "epoch finished");

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                debug!(epoch, "progress receiver dropped; ending training");
                break;
            }
        }
    }

    info!(loss = last_train_loss, "training finished");
    Ok(last_train_loss)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    use crate::network::config::{MlpConfig, Topology};
    use crate::optim::UpdateRule;

    fn xor() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
            vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
        )
    }

    fn mlp(epochs: usize) -> Mlp {
        Mlp::new(
            MlpConfig::new(Topology::new(2, 8, 1), 0.5, epochs)
                .with_update_rule(UpdateRule::Canonical)
                .with_seed(3),
        )
        .unwrap()
    }

    #[test]
    fn sends_one_stats_per_epoch() {
        let (xs, ys) = xor();
        let mut m = mlp(7);
        let (tx, rx) = mpsc::channel();
        let config = TrainConfig::for_mlp(&m).with_progress(tx);

        let validation = (Some(xs.as_slice()), Some(ys.as_slice()));
        let last = train_loop(&mut m, &xs, &ys, validation.0, validation.1, &config).unwrap();
        drop(config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 7);
        assert_eq!(stats[0].epoch, 1);
        assert!(stats.iter().all(|s| s.total_epochs == 7 && s.val_loss.is_some()));
        assert_eq!(stats[6].train_loss, last);
    }

    #[test]
    fn dropped_receiver_stops_after_first_epoch() {
        let (xs, ys) = xor();
        let mut m = mlp(50);
        let mut reference = m.clone();
        let (tx, rx) = mpsc::channel();
        drop(rx);

        let config = TrainConfig::for_mlp(&m).with_progress(tx);
        train_loop(&mut m, &xs, &ys, None, None, &config).unwrap();

        train_loop(&mut reference, &xs, &ys, None, None, &TrainConfig::new(1, Shuffle::None)).unwrap();
        assert_eq!(m.parameters(), reference.parameters());
    }

    #[test]
    fn stop_flag_set_up_front_skips_training() {
        let (xs, ys) = xor();
        let mut m = mlp(10);
        let before = m.parameters().clone();
        let flag = Arc::new(AtomicBool::new(true));

        let config = TrainConfig::for_mlp(&m).with_stop_flag(flag);
        assert_eq!(train_loop(&mut m, &xs, &ys, None, None, &config).unwrap(), 0.0);
        assert_eq!(m.parameters(), &before);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let (xs, ys) = xor();
        let mut a = mlp(20);
        let mut b = a.clone();
        let config = TrainConfig::new(20, Shuffle::Seeded(99));

        let la = train_loop(&mut a, &xs, &ys, None, None, &config).unwrap();
        let lb = train_loop(&mut b, &xs, &ys, None, None, &config).unwrap();
        assert_eq!(la, lb);
        assert_eq!(a.parameters(), b.parameters());
    }

    #[test]
    fn half_given_validation_set_is_rejected() {
        let (xs, ys) = xor();
        let mut m = mlp(1);
        let config = TrainConfig::for_mlp(&m);
        let err = train_loop(&mut m, &xs, &ys, Some(xs.as_slice()), None, &config);
        assert!(matches!(err, Err(MlpError::InvalidData(_))));
    }

    #[test]
    fn canonical_rule_learns_xor() {
        let (xs, ys) = xor();
        let mut m = mlp(5000);
        let config = TrainConfig::new(m.epochs(), Shuffle::Seeded(1));
        let before = evaluate(&m, &xs, &ys).unwrap();
        train_loop(&mut m, &xs, &ys, None, None, &config).unwrap();
        let after = evaluate(&m, &xs, &ys).unwrap();
        assert!(after < before, "loss went from {before} to {after}");
    }
}
