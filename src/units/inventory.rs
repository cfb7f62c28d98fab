//! Inventory rules - carry limits and when a unit should unload

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::Item;
use crate::spatial::grid::Grid;
use crate::units::manager::UnitManager;
use crate::units::unit::Unit;

/// Policy deciding when a unit must offload carried goods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryReason {
    /// Carried count has reached the carry limit
    Full,
    /// Carried count is above half the carry limit
    MoreThanHalf,
    /// Carrying more than a single item
    MoreThanOne,
}

impl UnitManager {
    /// Carry limit of `item` for the unit's role; jobless units carry nothing new
    pub fn get_max_items_for(&self, grid: &Grid, unit: &Unit, item: Item) -> u32 {
        unit.job
            .and_then(|job| self.get_character(grid, job))
            .map(|role| self.config.carry_limit(role, item))
            .unwrap_or(0)
    }

    pub fn is_inventory_empty(unit: &Unit) -> bool {
        unit.inventory.is_empty()
    }

    /// Total of each item held in storage, i.e. what can be picked up
    pub fn get_all_usable_items(&self, grid: &Grid) -> BTreeMap<Item, u32> {
        let mut totals = BTreeMap::new();
        for (_, tile) in grid.iter() {
            for (item, count) in tile.inventory.iter() {
                if tile.is_storage_for(item) {
                    *totals.entry(item).or_insert(0) += count;
                }
            }
        }
        totals
    }

    /// Whether the unit's tick logic should switch to a delivery trip
    pub fn need_to_drop_items_at_job(
        &self,
        grid: &Grid,
        unit: &Unit,
        item: Item,
        reason: InventoryReason,
    ) -> bool {
        let carried = unit.inventory.get(item);
        match reason {
            InventoryReason::Full => carried == self.get_max_items_for(grid, unit, item),
            InventoryReason::MoreThanHalf => carried > self.get_max_items_for(grid, unit, item) / 2,
            InventoryReason::MoreThanOne => carried > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::building::TileType;
    use crate::core::config::SimulationConfig;
    use crate::core::types::TilePosition;
    use crate::spatial::grid::Tile;

    fn logistics_setup() -> (Grid, UnitManager, usize) {
        let mut grid = Grid::new(6, 6);
        let center = TilePosition::new(2, 2);
        grid.set_tile(center, Tile::new(TileType::LogisticsCenter)).unwrap();
        let job = grid.index_of(center).unwrap();
        (grid, UnitManager::new(SimulationConfig::default()), job)
    }

    #[test]
    fn test_max_items_follow_role() {
        let (grid, manager, job) = logistics_setup();
        let worker = Unit::new(TilePosition::new(0, 0)).with_job(job);
        assert_eq!(manager.get_max_items_for(&grid, &worker, Item::Wood), 10);
        assert_eq!(manager.get_max_items_for(&grid, &worker, Item::Stone), 1);

        let jobless = Unit::new(TilePosition::new(0, 0));
        assert_eq!(manager.get_max_items_for(&grid, &jobless, Item::Wood), 0);
    }

    #[test]
    fn test_inventory_empty() {
        let unit = Unit::new(TilePosition::new(0, 0));
        assert!(UnitManager::is_inventory_empty(&unit));
        let unit = unit.with_item(Item::Stone, 1);
        assert!(!UnitManager::is_inventory_empty(&unit));
    }

    #[test]
    fn test_drop_reasons_for_wood() {
        let (grid, manager, job) = logistics_setup();
        let check = |count: u32, reason| {
            let unit = Unit::new(TilePosition::new(0, 0))
                .with_job(job)
                .with_item(Item::Wood, count);
            manager.need_to_drop_items_at_job(&grid, &unit, Item::Wood, reason)
        };

        // Carry limit 10
        assert!(!check(9, InventoryReason::Full));
        assert!(check(10, InventoryReason::Full));
        assert!(!check(5, InventoryReason::MoreThanHalf));
        assert!(check(6, InventoryReason::MoreThanHalf));
        assert!(!check(1, InventoryReason::MoreThanOne));
        assert!(check(2, InventoryReason::MoreThanOne));
    }

    #[test]
    fn test_bulky_good_boundary() {
        let (grid, manager, job) = logistics_setup();
        // Stone carry limit is 1
        let unit = Unit::new(TilePosition::new(0, 0))
            .with_job(job)
            .with_item(Item::Stone, 1);

        assert!(!manager.need_to_drop_items_at_job(&grid, &unit, Item::Stone, InventoryReason::MoreThanOne));
        assert!(manager.need_to_drop_items_at_job(&grid, &unit, Item::Stone, InventoryReason::Full));
        assert!(manager.need_to_drop_items_at_job(&grid, &unit, Item::Stone, InventoryReason::MoreThanHalf));
    }

    #[test]
    fn test_usable_items_only_count_storage() {
        let mut grid = Grid::new(6, 6);
        let mut storage = Tile::new(TileType::Storage);
        storage.inventory.add(Item::Wood, 12);
        storage.inventory.add(Item::Stone, 3);
        grid.set_tile(TilePosition::new(0, 0), storage).unwrap();

        let mut sawmill = Tile::new(TileType::Sawmill);
        sawmill.inventory.add(Item::Wood, 4);
        grid.set_tile(TilePosition::new(1, 0), sawmill).unwrap();

        // Trees and construction sites hold wood that cannot be picked up
        grid.plant_tree(TilePosition::new(2, 0), 4).unwrap();
        grid.place_building(TilePosition::new(3, 0), TileType::House).unwrap();
        grid.tile_mut(TilePosition::new(3, 0)).unwrap().inventory.add(Item::Wood, 5);

        let manager = UnitManager::new(SimulationConfig::default());
        let usable = manager.get_all_usable_items(&grid);
        assert_eq!(usable.get(&Item::Wood), Some(&16));
        assert_eq!(usable.get(&Item::Stone), Some(&3));
    }
}
