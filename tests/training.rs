//! Epoch loop, early stopping and evaluation.

use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};

use ferrite_mlp::{
    evaluate, train_epoch, CostType, EarlyStopping, Example, Network, NetworkConfig, NetworkError,
    Prediction, StopReason, TrainConfig, WeightInit,
};
use rand::{rngs::StdRng, SeedableRng};

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Two well separated classes in the plane.
fn two_clusters() -> Vec<Example> {
    let mut data = Vec::new();
    for i in 0..10 {
        let jitter = i as f64 * 0.01;
        data.push(Example::labelled(vec![0.9 - jitter, 0.1 + jitter], 0, 2).unwrap());
        data.push(Example::labelled(vec![0.1 + jitter, 0.9 - jitter], 1, 2).unwrap());
    }
    data
}

/// With a single output unit every prediction is class 0, so accuracy is
/// pinned at 100% and never improves after the first epoch.
fn single_output_setup() -> (Network, Vec<Example>) {
    let net = Network::new(&[2, 1], CostType::CrossEntropy, WeightInit::Scaled, &mut rng(1)).unwrap();
    let data = vec![
        Example::new(vec![0.2, 0.4], vec![1.0]),
        Example::new(vec![0.7, 0.1], vec![1.0]),
    ];
    (net, data)
}

#[test]
fn stops_once_threshold_plus_one_epochs_fail_to_improve() {
    for threshold in [0, 1, 3] {
        let (mut net, data) = single_output_setup();
        let config = TrainConfig::new(0.5, 1).with_improvement_threshold(threshold);
        let report = net.train(&data, Some(data.as_slice()), &config, &mut rng(2)).unwrap();

        assert_eq!(report.stop_reason, StopReason::NoImprovement);
        assert_eq!(report.epochs_run, 1 + threshold + 1);
        assert_eq!(report.best_accuracy, Some(100.0));
        assert!(report.history.iter().all(|s| s.accuracy == Some(100.0)));
    }
}

#[test]
fn epoch_limit_applies_without_evaluation_set() {
    let mut net = Network::new(&[2, 3, 2], CostType::CrossEntropy, WeightInit::Scaled, &mut rng(3)).unwrap();
    let data = two_clusters();
    let config = TrainConfig::new(1.0, 6).with_max_epochs(4);
    let report = net.train(&data, None, &config, &mut rng(4)).unwrap();

    assert_eq!(report.stop_reason, StopReason::EpochLimit);
    assert_eq!(report.epochs_run, 4);
    assert_eq!(report.best_accuracy, None);
    // 20 examples in batches of 6: 6, 6, 6, 2
    assert!(report.history.iter().all(|s| s.batches == 4 && s.accuracy.is_none()));
}

#[test]
fn learns_two_separable_clusters() {
    let mut net = NetworkConfig::new(vec![2, 4, 2]).with_seed(5).build().unwrap();
    let data = two_clusters();
    let config = TrainConfig::new(3.0, 4).with_max_epochs(300);
    net.train(&data, None, &config, &mut rng(6)).unwrap();

    let eval = evaluate(&net, &data).unwrap();
    assert_eq!(eval.accuracy(), 100.0);
    assert!(eval.predictions.iter().all(|p| p.predicted == p.actual));
}

#[test]
fn regularized_training_keeps_weights_smaller() {
    let data = two_clusters();
    let base = NetworkConfig::new(vec![2, 8, 2]).with_seed(7);
    let mut plain = base.build().unwrap();
    let mut decayed = base.build().unwrap();

    let config = TrainConfig::new(1.0, 5).with_max_epochs(50);
    plain.train(&data, None, &config, &mut rng(8)).unwrap();
    decayed.train(&data, None, &config.clone().with_lambda(5.0), &mut rng(8)).unwrap();

    let norm = |n: &Network| n.weights().iter().map(|w| w.norm_squared()).sum::<f64>();
    assert!(norm(&decayed) < norm(&plain));
}

#[test]
fn same_seeds_give_same_run() {
    let data = two_clusters();
    let config = TrainConfig::new(0.5, 3).with_max_epochs(5);
    let run = || {
        let mut net = NetworkConfig::new(vec![2, 3, 2]).with_seed(9).build().unwrap();
        net.train(&data, Some(data.as_slice()), &config, &mut rng(10)).unwrap();
        net
    };
    assert_eq!(run(), run());
}

#[test]
fn progress_channel_receives_every_epoch() {
    let (mut net, data) = single_output_setup();
    let (tx, rx) = mpsc::channel();
    let config = TrainConfig::new(0.5, 2).with_improvement_threshold(2).with_progress(tx);
    let report = net.train(&data, Some(data.as_slice()), &config, &mut rng(11)).unwrap();
    drop(config);

    let received: Vec<_> = rx.iter().collect();
    assert_eq!(received, report.history);
    assert_eq!(received.iter().map(|s| s.epoch).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}

#[test]
fn dropped_receiver_stops_training() {
    let (mut net, data) = single_output_setup();
    let (tx, rx) = mpsc::channel();
    drop(rx);
    let config = TrainConfig::new(0.5, 2).with_progress(tx);
    let report = net.train(&data, Some(data.as_slice()), &config, &mut rng(12)).unwrap();
    assert_eq!(report.stop_reason, StopReason::ReceiverDropped);
    assert_eq!(report.epochs_run, 1);
}

#[test]
fn raised_stop_flag_prevents_any_epoch() {
    let (mut net, data) = single_output_setup();
    let before = net.clone();
    let config = TrainConfig::new(0.5, 2).with_stop_flag(Arc::new(AtomicBool::new(true)));
    let report = net.train(&data, Some(data.as_slice()), &config, &mut rng(13)).unwrap();
    assert_eq!(report.stop_reason, StopReason::Cancelled);
    assert_eq!(report.epochs_run, 0);
    assert_eq!(net, before);
}

#[test]
fn rejects_malformed_datasets_and_configs() {
    let (mut net, data) = single_output_setup();
    let config = TrainConfig::new(0.5, 2);

    let bad_target = vec![Example::new(vec![0.1, 0.2], vec![0.3])];
    assert!(matches!(
        net.train(&bad_target, Some(data.as_slice()), &config, &mut rng(14)),
        Err(NetworkError::NotOneHot { index: 0, .. })
    ));

    let bad_input = vec![Example::new(vec![0.1], vec![1.0])];
    assert!(matches!(
        net.train(&data, Some(bad_input.as_slice()), &config, &mut rng(14)),
        Err(NetworkError::InputShape { .. })
    ));

    assert!(matches!(
        net.train(&[], Some(data.as_slice()), &config, &mut rng(14)),
        Err(NetworkError::EmptyDataset { name: "training" })
    ));

    assert!(matches!(net.train(&data, None, &config, &mut rng(14)), Err(NetworkError::NoStoppingCondition)));

    let zero_batch = TrainConfig::new(0.5, 0);
    assert!(net.train(&data, Some(data.as_slice()), &zero_batch, &mut rng(14)).is_err());
}

#[test]
fn train_epoch_runs_ceil_n_over_m_batches() {
    let mut net = Network::new(&[2, 2], CostType::Quadratic, WeightInit::Naive, &mut rng(15)).unwrap();
    let data = two_clusters();
    let before = net.clone();
    assert_eq!(train_epoch(&mut net, &data, &TrainConfig::new(0.5, 7), &mut rng(16)).unwrap(), 3);
    assert_eq!(train_epoch(&mut net, &data, &TrainConfig::new(0.5, 20), &mut rng(16)).unwrap(), 1);
    assert_eq!(train_epoch(&mut net, &data, &TrainConfig::new(0.5, 64), &mut rng(16)).unwrap(), 1);
    assert_ne!(net, before);
}

#[test]
fn evaluation_agrees_with_standalone_early_stopping() {
    let (net, data) = single_output_setup();
    let eval = evaluate(&net, &data).unwrap();
    assert_eq!(eval.predictions, vec![Prediction { predicted: 0, actual: 0 }; 2]);
    assert!(eval.predictions.iter().all(Prediction::is_correct));

    let mut stopping = EarlyStopping::new(1);
    assert!(!stopping.observe(eval.accuracy()));
    assert!(!stopping.observe(eval.accuracy()));
    assert!(stopping.observe(eval.accuracy()));
    assert_eq!(stopping.best(), Some(100.0));
}
