pub mod backprop;
pub mod config;
pub mod network;
pub mod persist;

pub use backprop::Gradients;
pub use config::NetworkConfig;
pub use network::Network;
