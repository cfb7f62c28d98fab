pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use error::{ColonyError, Result};
pub use types::{Item, Tick, TilePosition, UnitId};
