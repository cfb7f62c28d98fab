//! Tile inventory panel

use crate::core::types::{Item, TilePosition};
use crate::spatial::grid::Grid;

/// Text panel listing the goods of the tile at `position`
///
/// Built tiles show `"<n> of <Item>"` per stored good. Construction sites
/// show every required good as `"<n> of <Item> / <needed>"`, including ones
/// nothing has been delivered for yet. `None` outside the grid.
pub fn tile_inventory_panel(grid: &Grid, position: TilePosition) -> Option<String> {
    let tile = grid.tile(position)?;
    let mut lines = vec![format!("Inventory of {}", tile.tile_type.name())];

    if tile.is_built {
        for (item, count) in tile.inventory.iter() {
            lines.push(format!("{} of {}", count, item));
        }
    } else {
        for item in Item::ALL {
            let needed = grid.needed_items_to_build(tile.tile_type, item);
            if needed > 0 {
                lines.push(format!("{} of {} / {}", tile.inventory.get(item), item, needed));
            }
        }
    }

    Some(lines.join("\n"))
}
