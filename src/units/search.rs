//! Spatial search over the grid for unit logistics
//!
//! Radius searches come back sorted by Chebyshev distance from their origin.
//! The sort is stable, so tiles at equal distance keep grid scan order and the
//! first element is always the nearest one. Global scans return scan order;
//! pick from them with [`nearest_to`].

use crate::city::construction::needs_items;
use crate::core::types::{Item, TilePosition};
use crate::spatial::grid::Grid;
use crate::units::manager::UnitManager;

/// Nearest candidate to `from`; the earliest one wins a tie
pub fn nearest_to(from: TilePosition, candidates: &[TilePosition]) -> Option<TilePosition> {
    let mut best: Option<(u32, TilePosition)> = None;
    for candidate in candidates {
        let distance = from.distance(candidate);
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, *candidate));
        }
    }
    best.map(|(_, position)| position)
}

fn sorted_by_distance(from: TilePosition, mut positions: Vec<TilePosition>) -> Vec<TilePosition> {
    positions.sort_by_key(|p| from.distance(p));
    positions
}

impl UnitManager {
    pub fn get_all_harvestable_trees(
        &self,
        grid: &Grid,
        position: TilePosition,
        radius: u32,
    ) -> Vec<TilePosition> {
        let trees = grid
            .positions_within(position, radius)
            .filter(|p| grid.tile(*p).is_some_and(|tile| tile.is_harvestable_tree()))
            .collect();
        sorted_by_distance(position, trees)
    }

    /// Storage tiles within `radius` that still have room for `item`
    pub fn get_storage_around_for(
        &self,
        grid: &Grid,
        position: TilePosition,
        radius: u32,
        item: Item,
    ) -> Vec<TilePosition> {
        let storage = grid
            .positions_within(position, radius)
            .filter(|p| grid.tile(*p).is_some_and(|tile| tile.storage_room(item) > 0))
            .collect();
        sorted_by_distance(position, storage)
    }

    /// Construction sites and buildings marked for destruction
    pub fn get_all_buildable_or_destroyable_tiles(&self, grid: &Grid) -> Vec<TilePosition> {
        grid.iter()
            .filter(|(_, tile)| (tile.tile_type.is_building() && !tile.is_built) || tile.to_destroy)
            .map(|(position, _)| position)
            .collect()
    }

    /// Construction sites that still accept deliveries
    pub fn get_tiles_that_need_items_to_be_built(&self, grid: &Grid) -> Vec<TilePosition> {
        self.get_all_buildable_or_destroyable_tiles(grid)
            .into_iter()
            .filter(|p| grid.tile(*p).is_some_and(|tile| !tile.is_built && needs_items(tile)))
            .collect()
    }

    /// Storage tiles currently holding some `item`
    pub fn get_storage_that_have(&self, grid: &Grid, item: Item) -> Vec<TilePosition> {
        grid.iter()
            .filter(|(_, tile)| tile.is_storage_for(item) && tile.inventory.get(item) > 0)
            .map(|(position, _)| position)
            .collect()
    }

    /// Job tiles with room for another unit, in scan order
    pub fn get_available_jobs(&self, grid: &Grid) -> Vec<usize> {
        (0..grid.len())
            .filter(|&index| {
                grid.tile_at_index(index).is_some_and(|tile| !tile.to_destroy)
                    && self.get_character(grid, index).is_some()
                    && !self.is_tile_job_full(grid, index)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::building::TileType;
    use crate::core::config::SimulationConfig;
    use crate::spatial::grid::Tile;
    use crate::units::unit::Unit;

    fn manager() -> UnitManager {
        UnitManager::new(SimulationConfig::default())
    }

    #[test]
    fn test_nearest_to_breaks_ties_by_order() {
        let from = TilePosition::new(0, 0);
        let candidates = [
            TilePosition::new(3, 0),
            TilePosition::new(0, 2),
            TilePosition::new(2, 2),
        ];
        // (0, 2) and (2, 2) are both at distance 2
        assert_eq!(nearest_to(from, &candidates), Some(TilePosition::new(0, 2)));
        assert_eq!(nearest_to(from, &[]), None);
    }

    #[test]
    fn test_single_tree_at_radius_one() {
        let mut grid = Grid::new(5, 5);
        let center = TilePosition::new(2, 2);
        grid.plant_tree(TilePosition::new(3, 2), 4).unwrap();

        let trees = manager().get_all_harvestable_trees(&grid, center, 1);
        assert_eq!(trees, vec![TilePosition::new(3, 2)]);
    }

    #[test]
    fn test_trees_sorted_by_distance_and_filtered() {
        let mut grid = Grid::new(10, 10);
        let center = TilePosition::new(5, 5);
        grid.plant_tree(TilePosition::new(0, 0), 4).unwrap(); // outside radius 3
        grid.plant_tree(TilePosition::new(8, 5), 4).unwrap(); // distance 3
        grid.plant_tree(TilePosition::new(4, 4), 4).unwrap(); // distance 1
        grid.plant_tree(TilePosition::new(6, 6), 0).unwrap(); // stump, nothing left

        let trees = manager().get_all_harvestable_trees(&grid, center, 3);
        assert_eq!(trees, vec![TilePosition::new(4, 4), TilePosition::new(8, 5)]);
    }

    #[test]
    fn test_storage_around_for_respects_room() {
        let mut grid = Grid::new(10, 10);
        let mut full = Tile::new(TileType::Storage);
        full.inventory.add(Item::Wood, 100);
        grid.set_tile(TilePosition::new(1, 1), full).unwrap();
        grid.set_tile(TilePosition::new(3, 3), Tile::new(TileType::Storage)).unwrap();
        grid.set_tile(TilePosition::new(2, 2), Tile::new(TileType::Sawmill)).unwrap();

        let m = manager();
        let for_wood = m.get_storage_around_for(&grid, TilePosition::new(1, 1), 5, Item::Wood);
        assert_eq!(for_wood, vec![TilePosition::new(2, 2), TilePosition::new(3, 3)]);

        // Sawmills do not take stone, the full wood storage still has stone room
        let for_stone = m.get_storage_around_for(&grid, TilePosition::new(1, 1), 5, Item::Stone);
        assert_eq!(for_stone, vec![TilePosition::new(1, 1), TilePosition::new(3, 3)]);
    }

    #[test]
    fn test_buildable_and_needing_items() {
        let mut grid = Grid::new(6, 6);
        grid.place_building(TilePosition::new(0, 0), TileType::Road).unwrap();
        grid.place_building(TilePosition::new(1, 0), TileType::Road).unwrap();
        grid.tile_mut(TilePosition::new(1, 0))
            .unwrap()
            .inventory
            .add(Item::Stone, 1);
        grid.set_tile(TilePosition::new(2, 0), Tile::new(TileType::House)).unwrap();
        grid.mark_for_destruction(TilePosition::new(2, 0)).unwrap();
        grid.set_tile(TilePosition::new(3, 0), Tile::new(TileType::Storage)).unwrap();

        let m = manager();
        assert_eq!(
            m.get_all_buildable_or_destroyable_tiles(&grid),
            vec![
                TilePosition::new(0, 0),
                TilePosition::new(1, 0),
                TilePosition::new(2, 0),
            ]
        );
        // Fully supplied road and the built house are not accepting deliveries
        assert_eq!(
            m.get_tiles_that_need_items_to_be_built(&grid),
            vec![TilePosition::new(0, 0)]
        );
    }

    #[test]
    fn test_storage_that_have() {
        let mut grid = Grid::new(6, 6);
        let mut stocked = Tile::new(TileType::Storage);
        stocked.inventory.add(Item::Stone, 3);
        grid.set_tile(TilePosition::new(4, 4), stocked).unwrap();
        grid.set_tile(TilePosition::new(1, 1), Tile::new(TileType::Storage)).unwrap();

        let m = manager();
        assert_eq!(m.get_storage_that_have(&grid, Item::Stone), vec![TilePosition::new(4, 4)]);
        assert!(m.get_storage_that_have(&grid, Item::Wood).is_empty());
    }

    #[test]
    fn test_available_jobs_excludes_full_and_unbuilt() {
        let mut grid = Grid::new(6, 6);
        grid.set_tile(TilePosition::new(0, 0), Tile::new(TileType::Sawmill)).unwrap();
        grid.set_tile(TilePosition::new(1, 0), Tile::new(TileType::BuilderHut)).unwrap();
        grid.place_building(TilePosition::new(2, 0), TileType::LogisticsCenter).unwrap();

        let mut m = manager();
        assert_eq!(m.get_available_jobs(&grid), vec![0, 1]);

        m.add_unit(&grid, &Unit::new(TilePosition::new(0, 0)).with_job(1));
        m.add_unit(&grid, &Unit::new(TilePosition::new(0, 0)).with_job(1));
        assert_eq!(m.get_available_jobs(&grid), vec![0]);
        // Unchanged state, unchanged answer
        assert_eq!(m.get_available_jobs(&grid), vec![0]);
    }
}
