//! City layer - tile types, inventories and construction

pub mod building;
pub mod construction;
pub mod stockpile;

pub use building::{Role, TileType};
pub use construction::{apply_construction_work, is_ready_to_build, remaining_need, ContributionResult};
pub use stockpile::Inventory;
