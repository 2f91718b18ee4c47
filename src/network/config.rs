use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::cost::cost_type::CostType;
use crate::errors::NetworkError;
use crate::init::weight_init::WeightInit;
use crate::network::network::Network;

/// A serializable description of a network before training: layer sizes,
/// cost policy, initialisation policy and an optional RNG seed.
///
/// ```json
/// { "sizes": [784, 30, 10], "cost": "cross_entropy", "init": "scaled", "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Layer sizes, input first.
    pub sizes: Vec<usize>,
    #[serde(default)]
    pub cost: CostType,
    #[serde(default)]
    pub init: WeightInit,
    /// Seed for parameter initialisation; drawn from OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkConfig {
    pub fn new(sizes: Vec<usize>) -> NetworkConfig {
        NetworkConfig { sizes, cost: CostType::default(), init: WeightInit::default(), seed: None }
    }

    pub fn with_cost(mut self, cost: CostType) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_init(mut self, init: WeightInit) -> Self {
        self.init = init;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Constructs a freshly initialised network.
    pub fn build(&self) -> Result<Network, NetworkError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Network::new(&self.sizes, self.cost, self.init, &mut rng)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), NetworkError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkConfig, NetworkError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
