//! Tile grid - the world map the units live on

use serde::{Deserialize, Serialize};

use crate::city::building::TileType;
use crate::city::stockpile::Inventory;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{Item, TilePosition};

/// State of a single cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    /// Construction sites are unbuilt; natural tiles are always built
    pub is_built: bool,
    /// Stored goods, delivered construction goods, or a tree's wood
    pub inventory: Inventory,
    /// Marked by the player for demolition
    pub to_destroy: bool,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            is_built: true,
            inventory: Inventory::new(),
            to_destroy: false,
        }
    }

    /// Construction site for a building, with nothing delivered yet
    pub fn construction_site(tile_type: TileType) -> Self {
        Self {
            is_built: false,
            ..Self::new(tile_type)
        }
    }

    pub fn tree(wood: u32) -> Self {
        let mut tile = Self::new(TileType::Tree);
        tile.inventory.add(Item::Wood, wood);
        tile
    }

    /// Room left for `item` if this tile is usable as storage
    pub fn storage_room(&self, item: Item) -> u32 {
        if !self.is_built || self.to_destroy {
            return 0;
        }
        self.tile_type
            .storage_capacity(item)
            .saturating_sub(self.inventory.get(item))
    }

    pub fn is_storage_for(&self, item: Item) -> bool {
        self.is_built && !self.to_destroy && self.tile_type.storage_capacity(item) > 0
    }

    pub fn is_harvestable_tree(&self) -> bool {
        self.tile_type == TileType::Tree && self.inventory.get(Item::Wood) > 0
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Grass)
    }
}

/// Row-major grid of tiles; index = y * width + x
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Grass-covered grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, position: TilePosition) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.width
            && (position.y as usize) < self.height
    }

    #[inline]
    pub fn index_of(&self, position: TilePosition) -> Option<usize> {
        if self.in_bounds(position) {
            Some(position.y as usize * self.width + position.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn position_of(&self, index: usize) -> TilePosition {
        TilePosition::new((index % self.width) as i32, (index / self.width) as i32)
    }

    #[inline]
    pub fn tile(&self, position: TilePosition) -> Option<&Tile> {
        self.index_of(position).map(|i| &self.tiles[i])
    }

    #[inline]
    pub fn tile_mut(&mut self, position: TilePosition) -> Option<&mut Tile> {
        self.index_of(position).map(move |i| &mut self.tiles[i])
    }

    #[inline]
    pub fn tile_at_index(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn set_tile(&mut self, position: TilePosition, tile: Tile) -> Result<()> {
        let slot = self
            .tile_mut(position)
            .ok_or(ColonyError::OutOfBounds(position))?;
        *slot = tile;
        Ok(())
    }

    /// All tiles with their positions, in scan order
    pub fn iter(&self) -> impl Iterator<Item = (TilePosition, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (self.position_of(i), tile))
    }

    /// In-bounds positions within Chebyshev `radius` of `center`, in scan order
    pub fn positions_within(
        &self,
        center: TilePosition,
        radius: u32,
    ) -> impl Iterator<Item = TilePosition> + '_ {
        let r = radius.min(i32::MAX as u32) as i32;
        let min_y = center.y.saturating_sub(r).max(0);
        let max_y = center.y.saturating_add(r).min(self.height as i32 - 1);
        let min_x = center.x.saturating_sub(r).max(0);
        let max_x = center.x.saturating_add(r).min(self.width as i32 - 1);

        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| TilePosition::new(x, y)))
    }

    /// Radius that covers the whole grid from any tile
    pub fn full_radius(&self) -> u32 {
        self.width.max(self.height) as u32
    }

    /// Amount of `item` a `tile_type` needs delivered before it can be built
    pub fn needed_items_to_build(&self, tile_type: TileType, item: Item) -> u32 {
        tile_type.needed_items_to_build(item)
    }

    /// Lay out a construction site on an empty grass tile
    pub fn place_building(&mut self, position: TilePosition, tile_type: TileType) -> Result<()> {
        if !tile_type.is_building() {
            return Err(ColonyError::NotABuilding(tile_type));
        }

        let tile = self
            .tile_mut(position)
            .ok_or(ColonyError::OutOfBounds(position))?;
        if tile.tile_type != TileType::Grass {
            return Err(ColonyError::TileOccupied {
                position,
                tile_type: tile.tile_type,
            });
        }

        *tile = Tile::construction_site(tile_type);
        tracing::debug!("Placed {:?} construction site at {}", tile_type, position);
        Ok(())
    }

    /// Flag a built building for builders to tear down
    pub fn mark_for_destruction(&mut self, position: TilePosition) -> Result<()> {
        let tile = self
            .tile_mut(position)
            .ok_or(ColonyError::OutOfBounds(position))?;
        if !tile.tile_type.is_building() {
            return Err(ColonyError::NotABuilding(tile.tile_type));
        }

        // An unfinished site is simply cancelled; its deliveries are lost
        if !tile.is_built {
            *tile = Tile::default();
            tracing::debug!("Cancelled construction site at {}", position);
            return Ok(());
        }

        tile.to_destroy = true;
        Ok(())
    }

    /// Grow a tree on a grass tile
    pub fn plant_tree(&mut self, position: TilePosition, wood: u32) -> Result<()> {
        let tile = self
            .tile_mut(position)
            .ok_or(ColonyError::OutOfBounds(position))?;
        if tile.tile_type != TileType::Grass {
            return Err(ColonyError::TileOccupied {
                position,
                tile_type: tile.tile_type,
            });
        }
        *tile = Tile::tree(wood);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_is_row_major() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.index_of(TilePosition::new(1, 2)), Some(9));
        assert_eq!(grid.position_of(9), TilePosition::new(1, 2));
        assert_eq!(grid.index_of(TilePosition::new(4, 0)), None);
        assert_eq!(grid.index_of(TilePosition::new(0, -1)), None);
    }

    #[test]
    fn test_positions_within_clips_to_bounds() {
        let grid = Grid::new(5, 5);
        let around_corner: Vec<_> = grid.positions_within(TilePosition::new(0, 0), 1).collect();
        assert_eq!(
            around_corner,
            vec![
                TilePosition::new(0, 0),
                TilePosition::new(1, 0),
                TilePosition::new(0, 1),
                TilePosition::new(1, 1),
            ]
        );

        let center: Vec<_> = grid.positions_within(TilePosition::new(2, 2), 1).collect();
        assert_eq!(center.len(), 9);
    }

    #[test]
    fn test_place_building_requires_grass() {
        let mut grid = Grid::new(5, 5);
        let pos = TilePosition::new(2, 2);

        grid.place_building(pos, TileType::House).unwrap();
        let tile = grid.tile(pos).unwrap();
        assert_eq!(tile.tile_type, TileType::House);
        assert!(!tile.is_built);

        // Occupied now
        assert!(matches!(
            grid.place_building(pos, TileType::Road),
            Err(ColonyError::TileOccupied { .. })
        ));

        // Trees are not buildings
        assert!(matches!(
            grid.place_building(TilePosition::new(0, 0), TileType::Tree),
            Err(ColonyError::NotABuilding(TileType::Tree))
        ));

        assert!(matches!(
            grid.place_building(TilePosition::new(9, 9), TileType::Road),
            Err(ColonyError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_mark_for_destruction() {
        let mut grid = Grid::new(5, 5);
        let built = TilePosition::new(1, 1);
        grid.set_tile(built, Tile::new(TileType::Storage)).unwrap();
        grid.mark_for_destruction(built).unwrap();
        assert!(grid.tile(built).unwrap().to_destroy);

        // Unfinished sites are cancelled immediately
        let site = TilePosition::new(3, 3);
        grid.place_building(site, TileType::Road).unwrap();
        grid.mark_for_destruction(site).unwrap();
        assert_eq!(grid.tile(site).unwrap().tile_type, TileType::Grass);

        assert!(grid.mark_for_destruction(TilePosition::new(0, 0)).is_err());
    }

    #[test]
    fn test_storage_room() {
        let mut storage = Tile::new(TileType::Storage);
        storage.inventory.add(Item::Wood, 95);
        assert_eq!(storage.storage_room(Item::Wood), 5);
        assert!(storage.is_storage_for(Item::Stone));

        storage.to_destroy = true;
        assert_eq!(storage.storage_room(Item::Wood), 0);
        assert!(!storage.is_storage_for(Item::Wood));

        let site = Tile::construction_site(TileType::Storage);
        assert_eq!(site.storage_room(Item::Wood), 0);
    }

    #[test]
    fn test_harvestable_tree() {
        assert!(Tile::tree(3).is_harvestable_tree());
        assert!(!Tile::tree(0).is_harvestable_tree());
        assert!(!Tile::new(TileType::Grass).is_harvestable_tree());
    }
}
