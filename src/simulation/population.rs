//! Population growth system
//!
//! Built houses shelter `house_capacity` units each. While the colony has
//! spare room a newcomer moves into the first house in scan order.

use crate::city::building::TileType;
use crate::core::types::{TilePosition, UnitId};
use crate::ecs::world::World;

fn built_houses(world: &World) -> impl Iterator<Item = TilePosition> + '_ {
    world
        .grid
        .iter()
        .filter(|(_, tile)| tile.tile_type == TileType::House && tile.is_built)
        .map(|(position, _)| position)
}

/// Total housing capacity of built houses
pub fn housing_capacity(world: &World) -> u32 {
    built_houses(world).count() as u32 * world.config.house_capacity
}

/// Housing capacity minus current population (may be negative)
pub fn housing_surplus(world: &World) -> i64 {
    housing_capacity(world) as i64 - world.unit_count() as i64
}

/// Spawn one jobless unit if there is room; returns its id
pub fn try_population_growth(world: &mut World) -> Option<UnitId> {
    if housing_surplus(world) <= 0 {
        return None;
    }

    let house = built_houses(world).next()?;
    let id = world.spawn_unit(house);
    tracing::info!("Unit {:?} moved into the house at {}", id, house);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::spatial::grid::Tile;

    #[test]
    fn test_housing_surplus_calculation() {
        let mut world = World::new(8, 8, SimulationConfig::default());

        // No housing = 0 surplus
        assert_eq!(housing_surplus(&world), 0);

        // A house under construction shelters nobody
        world.grid.place_building(TilePosition::new(1, 1), TileType::House).unwrap();
        assert_eq!(housing_capacity(&world), 0);

        world.grid.set_tile(TilePosition::new(5, 5), Tile::new(TileType::House)).unwrap();
        assert_eq!(housing_surplus(&world), 2);

        world.spawn_unit(TilePosition::new(0, 0));
        world.spawn_unit(TilePosition::new(0, 0));
        world.spawn_unit(TilePosition::new(0, 0));
        assert_eq!(housing_surplus(&world), -1);
    }

    #[test]
    fn test_growth_fills_houses_then_stops() {
        let mut world = World::new(8, 8, SimulationConfig::default());
        assert_eq!(try_population_growth(&mut world), None);

        let house = TilePosition::new(2, 3);
        world.grid.set_tile(house, Tile::new(TileType::House)).unwrap();

        let first = try_population_growth(&mut world).unwrap();
        assert_eq!(world.units.unit(first).unwrap().position, house);
        assert_eq!(world.units.unit(first).unwrap().job, None);
        assert!(try_population_growth(&mut world).is_some());
        assert_eq!(try_population_growth(&mut world), None);
        assert_eq!(world.unit_count(), 2);
    }
}
