// The binary only shows construction; all network logic lives in the
// library. The XOR training demo runs with:
//   cargo run --example xor
use std::process::ExitCode;

use oxide_mlp::Mlp;
use tracing::error;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format;

fn main() -> ExitCode {
    let event_format = format().with_target(false).without_time();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .event_format(event_format)
        .init();

    let mut mlp = match Mlp::from_parts(3, 5, 2, 0.01, 1000) {
        Ok(mlp) => mlp,
        Err(e) => {
            error!("could not build network: {e}");
            return ExitCode::FAILURE;
        }
    };
    mlp.init_weights();

    let t = mlp.topology();
    println!("oxide-mlp: {}-{}-{} perceptron ready.", t.inputs, t.hidden, t.outputs);
    ExitCode::SUCCESS
}
