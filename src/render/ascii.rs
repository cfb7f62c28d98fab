//! Plain-text map for terminals and logs

use crate::city::building::TileType;
use crate::ecs::world::World;
use crate::render::{collect_render_tiles, collect_render_units, RenderTile};

/// Glyph for a tile; unbuilt sites are lowercase, marked buildings are `x`
pub fn tile_glyph(tile: &RenderTile) -> char {
    if tile.to_destroy {
        return 'x';
    }
    let glyph = match tile.tile_type {
        TileType::Grass => '.',
        TileType::Water => '~',
        TileType::Tree => 'T',
        TileType::Sawmill => 'S',
        TileType::BuilderHut => 'B',
        TileType::Storage => 'W',
        TileType::House => 'H',
        TileType::Road => 'R',
        TileType::LogisticsCenter => 'L',
    };
    if tile.is_built {
        glyph
    } else {
        glyph.to_ascii_lowercase()
    }
}

/// Render the grid row by row, with `@` over tiles holding a unit
pub fn render_frame(world: &World) -> String {
    let grid = &world.grid;
    let mut cells = vec!['.'; grid.len()];

    let mut tiles = Vec::new();
    collect_render_tiles(world, &mut tiles);
    for tile in &tiles {
        if let Some(index) = grid.index_of(tile.position) {
            cells[index] = tile_glyph(tile);
        }
    }

    let mut units = Vec::new();
    collect_render_units(world, &mut units);
    for unit in &units {
        if let Some(index) = grid.index_of(unit.position) {
            cells[index] = '@';
        }
    }

    let mut frame = String::with_capacity(cells.len() + grid.height);
    for row in cells.chunks(grid.width) {
        frame.extend(row.iter());
        frame.push('\n');
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::TilePosition;
    use crate::spatial::grid::Tile;

    #[test]
    fn test_render_frame_layout() {
        let mut world = World::new(4, 2, SimulationConfig::default());
        world.grid.plant_tree(TilePosition::new(0, 0), 4).unwrap();
        world
            .grid
            .set_tile(TilePosition::new(3, 0), Tile::new(TileType::Storage))
            .unwrap();
        world.grid.place_building(TilePosition::new(1, 1), TileType::House).unwrap();
        world.spawn_unit(TilePosition::new(3, 1));

        assert_eq!(render_frame(&world), "T..W\n.h.@\n");
    }

    #[test]
    fn test_marked_building_drawn_as_x() {
        let mut world = World::new(3, 1, SimulationConfig::default());
        world
            .grid
            .set_tile(TilePosition::new(1, 0), Tile::new(TileType::Sawmill))
            .unwrap();
        assert_eq!(render_frame(&world), ".S.\n");

        world.grid.mark_for_destruction(TilePosition::new(1, 0)).unwrap();
        assert_eq!(render_frame(&world), ".x.\n");
    }
}
