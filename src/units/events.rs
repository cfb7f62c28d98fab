//! Events emitted by the unit simulation during a tick

use serde::Serialize;

use crate::city::building::TileType;
use crate::core::types::{Item, TilePosition, UnitId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UnitEvent {
    JobAssigned { unit: UnitId, job: usize },
    /// The job tile stopped being a job (demolished or replaced)
    JobLost { unit: UnitId, job: usize },
    Harvested { unit: UnitId, at: TilePosition },
    TreeFelled { at: TilePosition },
    Deposited { unit: UnitId, at: TilePosition, item: Item, amount: u32 },
    PickedUp { unit: UnitId, at: TilePosition, item: Item, amount: u32 },
    Delivered { unit: UnitId, at: TilePosition, item: Item, amount: u32 },
    ConstructionCompleted { at: TilePosition, tile_type: TileType },
    Demolished { at: TilePosition, tile_type: TileType },
}
