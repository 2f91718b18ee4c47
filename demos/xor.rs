use ferrite_mlp::{evaluate, Example, NetworkConfig, NetworkError, TrainConfig};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> Result<(), NetworkError> {
    tracing_subscriber::fmt::init();

    let data = vec![
        Example::labelled(vec![1.0, 0.0], 1, 2)?,
        Example::labelled(vec![1.0, 1.0], 0, 2)?,
        Example::labelled(vec![0.0, 1.0], 1, 2)?,
        Example::labelled(vec![0.0, 0.0], 0, 2)?,
    ];

    let mut network = NetworkConfig::new(vec![2, 4, 2]).with_seed(7).build()?;
    let config = TrainConfig::new(2.0, 2)
        .with_improvement_threshold(200)
        .with_max_epochs(5000);

    let report = network.train(&data, Some(data.as_slice()), &config, &mut StdRng::seed_from_u64(7))?;
    println!(
        "stopped after {} epochs ({:?}), best accuracy {:.1}%",
        report.epochs_run,
        report.stop_reason,
        report.best_accuracy.unwrap_or(0.0)
    );

    for (example, prediction) in data.iter().zip(evaluate(&network, &data)?.predictions) {
        let output = network.feedforward(&example.input)?;
        println!(
            "Input: {:?} -> class {} (expected {}), output {:.4?}",
            example.input.to_vec(),
            prediction.predicted,
            prediction.actual,
            output.to_vec()
        );
    }

    Ok(())
}
