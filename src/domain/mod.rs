// Domain layer: request models and ports. Engines and adapters live elsewhere.

pub mod model;
pub mod ports;
