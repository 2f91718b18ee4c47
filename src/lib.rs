pub mod errors;
pub mod math;
pub mod activation;
pub mod init;
pub mod cost;
pub mod data;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use errors::{MatrixError, NetworkError};
pub use math::matrix::Matrix;
pub use init::weight_init::WeightInit;
pub use cost::cost_type::CostType;
pub use data::example::Example;
pub use network::{Gradients, Network, NetworkConfig};
pub use optim::sgd::Sgd;
pub use train::{
    evaluate, train_epoch, train_loop, EarlyStopping, EpochStats, Evaluation, Prediction, StopReason, TrainConfig,
    TrainReport,
};
