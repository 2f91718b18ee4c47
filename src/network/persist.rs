use serde::{Serialize, Deserialize};
use tracing::info;

use crate::cost::cost_type::CostType;
use crate::errors::NetworkError;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// On-disk form of a trained network.
#[derive(Serialize, Deserialize)]
struct SavedNetwork {
    sizes: Vec<usize>,
    cost: CostType,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
}

impl Network {
    /// Serializes the network parameters to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), NetworkError> {
        let saved = SavedNetwork {
            sizes: self.sizes().to_vec(),
            cost: self.cost(),
            weights: self.weights().to_vec(),
            biases: self.biases().to_vec(),
        };
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &saved)?;
        info!(path, "saved network");
        Ok(())
    }

    /// Deserializes a network written by `save_json`, re-checking every
    /// parameter shape.
    pub fn load_json(path: &str) -> Result<Network, NetworkError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let saved: SavedNetwork = serde_json::from_reader(reader)?;
        let network = Network::from_parameters(saved.sizes, saved.weights, saved.biases, saved.cost)?;
        info!(path, sizes = ?network.sizes(), "loaded network");
        Ok(network)
    }
}
