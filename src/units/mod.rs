//! Units - the colony's workers and the manager that drives them
//!
//! A unit holds at most one job, identified by the grid index of a built
//! job building. Each tick the [`UnitManager`] walks the units in insertion
//! order and runs the state machine of the role their job grants.

pub mod behavior;
pub mod events;
pub mod inventory;
pub mod jobs;
pub mod manager;
pub mod search;
pub mod unit;

pub use events::UnitEvent;
pub use inventory::InventoryReason;
pub use manager::UnitManager;
pub use search::nearest_to;
pub use unit::{Activity, Errand, Unit};
