//! Construction - delivery bookkeeping, completion and salvage of buildings

use crate::core::types::Item;
use crate::spatial::grid::Tile;

/// Result of applying a tick of construction work
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContributionResult {
    /// Work contributed, building still under construction
    InProgress { progress: u32 },
    /// Work contributed, building is now complete
    Completed,
    /// Building is already complete
    AlreadyComplete,
    /// Goods are still missing, no work possible
    MissingItems,
}

/// How many of `item` a construction site still accepts
pub fn remaining_need(tile: &Tile, item: Item) -> u32 {
    if tile.is_built {
        return 0;
    }
    tile.tile_type
        .needed_items_to_build(item)
        .saturating_sub(tile.inventory.get(item))
}

/// True while any required good has not been fully delivered
pub fn needs_items(tile: &Tile) -> bool {
    Item::ALL.iter().any(|item| remaining_need(tile, *item) > 0)
}

/// Unbuilt site with every required good delivered
pub fn is_ready_to_build(tile: &Tile) -> bool {
    !tile.is_built && tile.tile_type.is_building() && !needs_items(tile)
}

/// Apply one tick of builder work; `progress` counts ticks already worked
pub fn apply_construction_work(tile: &mut Tile, progress: u32, build_ticks: u32) -> ContributionResult {
    if tile.is_built {
        return ContributionResult::AlreadyComplete;
    }
    if !is_ready_to_build(tile) {
        return ContributionResult::MissingItems;
    }

    let progress = progress + 1;
    if progress >= build_ticks {
        // Delivered goods are consumed by the building
        tile.inventory.clear();
        tile.is_built = true;
        ContributionResult::Completed
    } else {
        ContributionResult::InProgress { progress }
    }
}

/// Goods recovered by tearing down a building: half its cost, rounded down
pub fn salvage(tile: &Tile, item: Item) -> u32 {
    tile.tile_type.needed_items_to_build(item) / 2
}
