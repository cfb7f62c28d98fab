//! Seeded starting map
//!
//! Same seed, same map: every random draw goes through one `ChaCha8Rng`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::city::building::{Role, TileType};
use crate::core::config::SimulationConfig;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{Item, TilePosition};
use crate::ecs::world::World;
use crate::spatial::grid::{Grid, Tile};
use crate::units::unit::Unit;

/// Smallest side that fits the starting settlement
pub const MIN_MAP_SIDE: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    /// Number of tree clusters scattered over the map
    pub tree_clusters: u32,
    /// Chance for each grass tile of a cluster to hold a tree
    pub tree_density: f32,
    /// Goods in the starting storage
    pub starting_wood: u32,
    pub starting_stone: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 24,
            seed: 42,
            tree_clusters: 6,
            tree_density: 0.6,
            starting_wood: 60,
            starting_stone: 30,
        }
    }
}

/// Build a starting colony: a settlement in the middle, a river to the east,
/// forest clusters and a full crew for every job building
pub fn generate_world(map: &MapConfig, config: SimulationConfig) -> Result<World> {
    if map.width < MIN_MAP_SIDE || map.height < MIN_MAP_SIDE {
        return Err(ColonyError::InvalidConfig(format!(
            "map must be at least {}x{}, got {}x{}",
            MIN_MAP_SIDE, MIN_MAP_SIDE, map.width, map.height
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(map.seed);
    let mut grid = Grid::new(map.width, map.height);

    let center = TilePosition::new(map.width as i32 / 2 - 2, map.height as i32 / 2);
    let jobs = place_settlement(&mut grid, center, map)?;
    carve_river(&mut grid, &mut rng);
    plant_forests(&mut grid, &mut rng, map, config.tree_wood);

    let mut world = World::from_grid(grid, config);
    for (position, role) in jobs {
        let Some(job) = world.grid.index_of(position) else {
            continue;
        };
        for _ in 0..world.config.job_capacity(role) {
            world.add_unit(&Unit::new(position).with_job(job));
        }
    }

    tracing::info!(
        "Generated {}x{} map (seed {}) with {} units",
        map.width,
        map.height,
        map.seed,
        world.unit_count()
    );
    Ok(world)
}

/// Built starting buildings around `center`; returns the job tiles
fn place_settlement(
    grid: &mut Grid,
    center: TilePosition,
    map: &MapConfig,
) -> Result<Vec<(TilePosition, Role)>> {
    let mut storage = Tile::new(TileType::Storage);
    storage.inventory.add_up_to(Item::Wood, map.starting_wood, TileType::Storage.storage_capacity(Item::Wood));
    storage.inventory.add_up_to(Item::Stone, map.starting_stone, TileType::Storage.storage_capacity(Item::Stone));
    grid.set_tile(center, storage)?;

    let offset = |dx: i32, dy: i32| TilePosition::new(center.x + dx, center.y + dy);
    grid.set_tile(offset(0, -3), Tile::new(TileType::House))?;

    let mut jobs = Vec::new();
    for (position, tile_type) in [
        (offset(-3, 0), TileType::Sawmill),
        (offset(3, 0), TileType::BuilderHut),
        (offset(0, 3), TileType::LogisticsCenter),
    ] {
        grid.set_tile(position, Tile::new(tile_type))?;
        if let Some(role) = tile_type.role() {
            jobs.push((position, role));
        }
    }
    Ok(jobs)
}

/// A one-tile river meandering down the eastern quarter
fn carve_river(grid: &mut Grid, rng: &mut ChaCha8Rng) {
    let min_x = (grid.width * 3 / 4) as i32;
    let max_x = grid.width as i32 - 2;
    let mut x = rng.gen_range(min_x..=max_x);

    for y in 0..grid.height as i32 {
        let position = TilePosition::new(x, y);
        if let Some(tile) = grid.tile_mut(position) {
            if tile.tile_type == TileType::Grass {
                *tile = Tile::new(TileType::Water);
            }
        }
        x = (x + rng.gen_range(-1..=1)).clamp(min_x, max_x);
    }
}

fn plant_forests(grid: &mut Grid, rng: &mut ChaCha8Rng, map: &MapConfig, tree_wood: u32) {
    for _ in 0..map.tree_clusters {
        let cluster = TilePosition::new(
            rng.gen_range(0..grid.width as i32),
            rng.gen_range(0..grid.height as i32),
        );
        let spots: Vec<TilePosition> = grid.positions_within(cluster, 2).collect();
        for spot in spots {
            let is_grass = grid.tile(spot).is_some_and(|tile| tile.tile_type == TileType::Grass);
            if is_grass && rng.gen::<f32>() < map.tree_density {
                let _ = grid.plant_tree(spot, tree_wood);
            }
        }
    }
}
