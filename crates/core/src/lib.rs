pub mod category;
pub mod config;
pub mod error;
pub mod telemetry;

pub use category::*;
pub use config::{ClassifierConfig, Config, DataMode, KgConfig, SimulationConfig};
pub use error::*;
pub use telemetry::*;
