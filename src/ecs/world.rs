//! World - the grid, its units and the clock

use crate::core::config::SimulationConfig;
use crate::core::types::{Tick, TilePosition, UnitId};
use crate::spatial::grid::Grid;
use crate::units::manager::UnitManager;
use crate::units::unit::Unit;

/// The colony: map, workers and simulation time
pub struct World {
    pub current_tick: Tick,
    pub grid: Grid,
    pub units: UnitManager,
    pub config: SimulationConfig,
}

impl World {
    /// Empty grass map of the given size
    pub fn new(width: usize, height: usize, config: SimulationConfig) -> Self {
        Self::from_grid(Grid::new(width, height), config)
    }

    pub fn from_grid(grid: Grid, config: SimulationConfig) -> Self {
        Self {
            current_tick: 0,
            grid,
            units: UnitManager::new(config.clone()),
            config,
        }
    }

    /// Add a copy of `unit`; see [`UnitManager::add_unit`]
    pub fn add_unit(&mut self, unit: &Unit) -> UnitId {
        self.units.add_unit(&self.grid, unit)
    }

    /// Spawn a jobless unit at `position`
    pub fn spawn_unit(&mut self, position: TilePosition) -> UnitId {
        self.add_unit(&Unit::new(position))
    }

    pub fn unit_count(&self) -> usize {
        self.units.count()
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(32, 24, SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::building::TileType;
    use crate::spatial::grid::Tile;

    #[test]
    fn test_spawned_units_get_sequential_ids() {
        let mut world = World::new(8, 8, SimulationConfig::default());
        let a = world.spawn_unit(TilePosition::new(0, 0));
        let b = world.spawn_unit(TilePosition::new(1, 1));
        assert_eq!(a, UnitId(0));
        assert_eq!(b, UnitId(1));
        assert_eq!(world.unit_count(), 2);
    }

    #[test]
    fn test_add_unit_honors_open_job() {
        let mut world = World::new(8, 8, SimulationConfig::default());
        let hut = TilePosition::new(3, 3);
        world.grid.set_tile(hut, Tile::new(TileType::BuilderHut)).unwrap();
        let job = world.grid.index_of(hut).unwrap();

        let id = world.add_unit(&Unit::new(hut).with_job(job));
        assert_eq!(world.units.unit(id).unwrap().job, Some(job));
    }
}
