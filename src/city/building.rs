//! Tile types: natural terrain and buildings, with their build costs

use serde::{Deserialize, Serialize};

use crate::core::types::Item;

/// What occupies a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Grass,
    Water,
    Tree,
    Sawmill,
    BuilderHut,
    Storage,
    House,
    Road,
    LogisticsCenter,
}

/// The work a job building offers; every unit's role comes from its job tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Sawmill,
    Builder,
    Logistician,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Sawmill => "Sawmill worker",
            Role::Builder => "Builder",
            Role::Logistician => "Logistician",
        }
    }
}

impl TileType {
    /// Buildings the player can place, in construction menu order
    pub const BUILDINGS: [TileType; 6] = [
        TileType::Sawmill,
        TileType::BuilderHut,
        TileType::Storage,
        TileType::House,
        TileType::Road,
        TileType::LogisticsCenter,
    ];

    pub fn is_building(&self) -> bool {
        !matches!(self, TileType::Grass | TileType::Water | TileType::Tree)
    }

    /// Role of the units working here, if this is a job building
    pub fn role(&self) -> Option<Role> {
        match self {
            TileType::Sawmill => Some(Role::Sawmill),
            TileType::BuilderHut => Some(Role::Builder),
            TileType::LogisticsCenter => Some(Role::Logistician),
            _ => None,
        }
    }

    /// Goods that must be delivered before construction can finish
    pub fn needed_items_to_build(&self, item: Item) -> u32 {
        match (self, item) {
            (TileType::Sawmill, Item::Wood) => 10,
            (TileType::BuilderHut, Item::Wood) => 8,
            (TileType::BuilderHut, Item::Stone) => 2,
            (TileType::Storage, Item::Wood) => 15,
            (TileType::House, Item::Wood) => 10,
            (TileType::House, Item::Stone) => 4,
            (TileType::Road, Item::Stone) => 1,
            (TileType::LogisticsCenter, Item::Wood) => 12,
            (TileType::LogisticsCenter, Item::Stone) => 4,
            _ => 0,
        }
    }

    /// How many of `item` a built tile of this type can store
    pub fn storage_capacity(&self, item: Item) -> u32 {
        match (self, item) {
            (TileType::Storage, Item::Wood) => 100,
            (TileType::Storage, Item::Stone) => 50,
            // Sawmills keep a small local wood pile
            (TileType::Sawmill, Item::Wood) => 20,
            _ => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TileType::Grass => "Grass",
            TileType::Water => "Water",
            TileType::Tree => "Tree",
            TileType::Sawmill => "Sawmill",
            TileType::BuilderHut => "Builder hut",
            TileType::Storage => "Storage",
            TileType::House => "House",
            TileType::Road => "Road",
            TileType::LogisticsCenter => "Logistics center",
        }
    }

    /// Parse a building name as typed on the command line
    pub fn parse_building(name: &str) -> Option<TileType> {
        match name.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "sawmill" => Some(TileType::Sawmill),
            "builderhut" | "builder" => Some(TileType::BuilderHut),
            "storage" => Some(TileType::Storage),
            "house" => Some(TileType::House),
            "road" => Some(TileType::Road),
            "logisticscenter" | "logistics" => Some(TileType::LogisticsCenter),
            _ => None,
        }
    }
}
