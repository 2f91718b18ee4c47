pub mod quadratic;
pub mod cross_entropy;
pub mod cost_type;

pub use quadratic::QuadraticCost;
pub use cross_entropy::CrossEntropyCost;
pub use cost_type::CostType;
