use oxide_mlp::{train_loop, Mlp, MlpConfig, Shuffle, Topology, TrainConfig, UpdateRule};
use std::sync::mpsc;

fn main() -> oxide_mlp::Result<()> {
    let config = MlpConfig::new(Topology::new(2, 8, 1), 0.5, 10000)
        .with_update_rule(UpdateRule::Canonical);
    let mut mlp = Mlp::new(config)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let (tx, rx) = mpsc::channel();
    let train_config = TrainConfig::new(mlp.epochs(), Shuffle::Seeded(0)).with_progress(tx);
    let loss = train_loop(&mut mlp, &inputs, &expected_outputs, None, None, &train_config)?;
    drop(train_config);

    for stats in rx.iter().filter(|s| s.epoch % 1000 == 0) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.train_loss);
    }
    println!("Final loss = {loss:.6}");

    for input in &inputs {
        let activations = mlp.feedforward(input)?;
        println!("Input: {:?} -> Output: {:.4}", input, activations.output()[0]);
    }
    Ok(())
}
