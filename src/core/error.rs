use thiserror::Error;

use crate::city::building::TileType;
use crate::core::types::{TilePosition, UnitId};

#[derive(Error, Debug)]
pub enum ColonyError {
    #[error("Position {0} is outside the grid")]
    OutOfBounds(TilePosition),

    #[error("Tile at {position} is occupied by {tile_type:?}")]
    TileOccupied {
        position: TilePosition,
        tile_type: TileType,
    },

    #[error("{0:?} is not a building")]
    NotABuilding(TileType),

    #[error("Unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("Tile index {0} is not a job")]
    NotAJob(usize),

    #[error("Job at tile index {job} is full ({capacity} units)")]
    JobFull { job: usize, capacity: u32 },

    #[error("Unknown building: {0}")]
    UnknownBuilding(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ColonyError>;
