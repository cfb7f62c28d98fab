//! Rendering snapshots of the colony
//!
//! This module is READ-ONLY - it never modifies simulation state.

pub mod ascii;
pub mod colors;

use crate::city::building::{Role, TileType};
use crate::core::types::{TilePosition, UnitId};
use crate::ecs::world::World;

pub use colors::Color;

/// Lightweight snapshot of a unit for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderUnit {
    pub id: UnitId,
    pub position: TilePosition,
    pub role: Option<Role>,
    pub activity: &'static str,
    pub carrying: u32,
    pub color: Color,
}

/// Lightweight snapshot of a tile for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTile {
    pub position: TilePosition,
    pub tile_type: TileType,
    pub is_built: bool,
    pub to_destroy: bool,
    pub color: Color,
}

/// Collects every unit into a reusable buffer.
/// Call this once per frame, passing the same buffer to avoid allocations.
pub fn collect_render_units(world: &World, buffer: &mut Vec<RenderUnit>) {
    world.units.draw_units(&world.grid, buffer);
}

/// Collects every non-grass tile into a reusable buffer
pub fn collect_render_tiles(world: &World, buffer: &mut Vec<RenderTile>) {
    buffer.clear();

    for (position, tile) in world.grid.iter() {
        if tile.tile_type == TileType::Grass {
            continue;
        }
        buffer.push(RenderTile {
            position,
            tile_type: tile.tile_type,
            is_built: tile.is_built,
            to_destroy: tile.to_destroy,
            color: colors::construction_tint(colors::tile_color(tile.tile_type), tile.is_built),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::spatial::grid::Tile;
    use crate::units::unit::Unit;

    #[test]
    fn test_collect_render_units_reuses_buffer() {
        let mut world = World::new(6, 6, SimulationConfig::default());
        let mill = TilePosition::new(1, 1);
        world.grid.set_tile(mill, Tile::new(TileType::Sawmill)).unwrap();
        let job = world.grid.index_of(mill).unwrap();
        world.add_unit(&Unit::new(mill).with_job(job));
        world.spawn_unit(TilePosition::new(4, 4));

        let mut buffer = vec![];
        collect_render_units(&world, &mut buffer);
        collect_render_units(&world, &mut buffer);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[0].role, Some(Role::Sawmill));
        assert_eq!(buffer[0].color, colors::role_color(Role::Sawmill));
        assert_eq!(buffer[1].role, None);
        assert_eq!(buffer[1].color, colors::JOBLESS);
        assert_eq!(buffer[1].activity, "idle");
    }

    #[test]
    fn test_collect_render_tiles_skips_grass() {
        let mut world = World::new(6, 6, SimulationConfig::default());
        world.grid.plant_tree(TilePosition::new(0, 0), 4).unwrap();
        world.grid.place_building(TilePosition::new(2, 2), TileType::House).unwrap();

        let mut buffer = vec![];
        collect_render_tiles(&world, &mut buffer);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[0].tile_type, TileType::Tree);
        assert!(!buffer[1].is_built);
    }
}
