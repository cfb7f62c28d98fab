//! Per-role tick functions
//!
//! Every role runs the same activity state machine:
//! `Idle -> Travel -> Work -> Idle`. Roles differ only in what they plan
//! while idle and which timed work they perform on arrival.

use crate::city::building::Role;
use crate::city::construction::{apply_construction_work, is_ready_to_build, remaining_need, salvage, ContributionResult};
use crate::core::types::{Item, TilePosition};
use crate::spatial::grid::{Grid, Tile};
use crate::units::events::UnitEvent;
use crate::units::inventory::InventoryReason;
use crate::units::manager::UnitManager;
use crate::units::search::nearest_to;
use crate::units::unit::{Activity, Errand};

impl UnitManager {
    // ========================================================================
    // Role dispatch targets
    // ========================================================================

    /// Harvest trees around the sawmill and haul the wood to storage
    pub(crate) fn on_tick_sawmill(&mut self, idx: usize, grid: &mut Grid) {
        match self.units[idx].activity {
            Activity::Idle => self.plan_sawmill(idx, grid),
            Activity::Travel { target, errand } => self.travel(idx, grid, target, errand),
            Activity::Work {
                target,
                errand: Errand::Harvest,
                progress,
            } => self.harvest(idx, grid, target, progress),
            Activity::Work { .. } => self.units[idx].activity = Activity::Idle,
        }
    }

    /// Finish supplied construction sites and tear down marked buildings
    pub(crate) fn on_tick_builder(&mut self, idx: usize, grid: &mut Grid) {
        match self.units[idx].activity {
            Activity::Idle => self.plan_builder(idx, grid),
            Activity::Travel { target, errand } => self.travel(idx, grid, target, errand),
            Activity::Work {
                target,
                errand: Errand::Build,
                progress,
            } => self.build(idx, grid, target, progress),
            Activity::Work {
                target,
                errand: Errand::Demolish,
                progress,
            } => self.demolish(idx, grid, target, progress),
            Activity::Work { .. } => self.units[idx].activity = Activity::Idle,
        }
    }

    /// Move goods from storage to construction sites
    pub(crate) fn on_tick_logistician(&mut self, idx: usize, grid: &mut Grid) {
        match self.units[idx].activity {
            Activity::Idle => self.plan_logistician(idx, grid),
            Activity::Travel { target, errand } => self.travel(idx, grid, target, errand),
            // Logisticians have no timed work
            Activity::Work { .. } => self.units[idx].activity = Activity::Idle,
        }
    }

    // ========================================================================
    // Planning (idle units)
    // ========================================================================

    fn plan_sawmill(&mut self, idx: usize, grid: &Grid) {
        let Some(job_position) = self.job_position(idx, grid) else {
            return;
        };
        let unit = &self.units[idx];
        let position = unit.position;
        let radius = self.config.storage_search_radius;

        // A unit reassigned from a bigger carrier can hold more than the cap
        let overloaded = unit.inventory.get(Item::Wood) > self.get_max_items_for(grid, unit, Item::Wood);
        if overloaded || self.need_to_drop_items_at_job(grid, unit, Item::Wood, InventoryReason::Full) {
            // Storage full everywhere: wait with the load
            self.start_deposit(idx, grid, radius);
            return;
        }

        let trees: Vec<TilePosition> = self
            .get_all_harvestable_trees(grid, job_position, self.config.harvest_radius)
            .into_iter()
            .filter(|tree| !self.taken_care_by(grid, *tree, Role::Sawmill, Some(idx)))
            .collect();
        if let Some(tree) = nearest_to(position, &trees) {
            self.set_travel(idx, tree, Errand::Harvest);
            return;
        }

        if !Self::is_inventory_empty(&self.units[idx]) && self.start_deposit(idx, grid, radius) {
            return;
        }
        self.return_to_job(idx, job_position);
    }

    fn plan_builder(&mut self, idx: usize, grid: &Grid) {
        let Some(job_position) = self.job_position(idx, grid) else {
            return;
        };
        let unit = &self.units[idx];
        let position = unit.position;

        let overloaded = Item::ALL
            .iter()
            .any(|item| self.need_to_drop_items_at_job(grid, unit, *item, InventoryReason::MoreThanOne));
        if overloaded && self.start_deposit(idx, grid, grid.full_radius()) {
            return;
        }

        let sites: Vec<TilePosition> = self
            .get_all_buildable_or_destroyable_tiles(grid)
            .into_iter()
            .filter(|site| {
                grid.tile(*site)
                    .is_some_and(|tile| tile.to_destroy || is_ready_to_build(tile))
            })
            .filter(|site| !self.taken_care_by(grid, *site, Role::Builder, Some(idx)))
            .collect();
        if let Some(site) = nearest_to(position, &sites) {
            let errand = match grid.tile(site) {
                Some(tile) if tile.to_destroy => Errand::Demolish,
                _ => Errand::Build,
            };
            self.set_travel(idx, site, errand);
            return;
        }

        if !Self::is_inventory_empty(&self.units[idx])
            && self.start_deposit(idx, grid, grid.full_radius())
        {
            return;
        }
        self.return_to_job(idx, job_position);
    }

    fn plan_logistician(&mut self, idx: usize, grid: &Grid) {
        let Some(job_position) = self.job_position(idx, grid) else {
            return;
        };

        if !Self::is_inventory_empty(&self.units[idx]) {
            if self.plan_delivery(idx, grid) || self.start_deposit(idx, grid, grid.full_radius()) {
                return;
            }
            // Nowhere to put the goods; keep them and wait at the job
            self.units[idx].destination = None;
            self.return_to_job(idx, job_position);
            return;
        }

        if self.plan_pickup(idx, grid) {
            return;
        }
        self.return_to_job(idx, job_position);
    }

    /// Pick a site for carried goods, topping up first when the load is light
    fn plan_delivery(&mut self, idx: usize, grid: &Grid) -> bool {
        let sites = self.get_tiles_that_need_items_to_be_built(grid);
        let unit = &self.units[idx];

        for item in Item::ALL {
            let carried = unit.inventory.get(item);
            if carried == 0 {
                continue;
            }

            let needs = |site: &TilePosition| grid.tile(*site).is_some_and(|tile| remaining_need(tile, item) > 0);
            let site = unit.destination.filter(|d| needs(d)).or_else(|| {
                let open: Vec<TilePosition> = sites
                    .iter()
                    .copied()
                    .filter(|s| needs(s))
                    .filter(|s| !self.taken_care_by(grid, *s, Role::Logistician, Some(idx)))
                    .collect();
                nearest_to(unit.position, &open)
            });
            let Some(site) = site else {
                continue;
            };

            let need = grid.tile(site).map_or(0, |tile| remaining_need(tile, item));
            let wanted = need.min(self.get_max_items_for(grid, unit, item));
            if carried < wanted
                && !self.need_to_drop_items_at_job(grid, unit, item, InventoryReason::MoreThanHalf)
            {
                let sources = self.get_storage_that_have(grid, item);
                if let Some(source) = nearest_to(unit.position, &sources) {
                    self.units[idx].destination = Some(site);
                    self.set_travel(idx, source, Errand::Pickup(item));
                    return true;
                }
            }

            self.units[idx].destination = Some(site);
            self.set_travel(idx, site, Errand::Deliver(item));
            return true;
        }

        false
    }

    /// Reserve the nearest site that needs something storage can supply
    fn plan_pickup(&mut self, idx: usize, grid: &Grid) -> bool {
        let position = self.units[idx].position;
        let stock = self.get_all_usable_items(grid);

        let mut sites: Vec<TilePosition> = self
            .get_tiles_that_need_items_to_be_built(grid)
            .into_iter()
            .filter(|site| !self.taken_care_by(grid, *site, Role::Logistician, Some(idx)))
            .collect();
        sites.sort_by_key(|site| position.distance(site));

        for site in sites {
            let Some(tile) = grid.tile(site) else {
                continue;
            };
            for item in Item::ALL {
                if remaining_need(tile, item) == 0
                    || stock.get(&item).copied().unwrap_or(0) == 0
                    || self.get_max_items_for(grid, &self.units[idx], item) == 0
                {
                    continue;
                }
                let sources = self.get_storage_that_have(grid, item);
                if let Some(source) = nearest_to(position, &sources) {
                    self.units[idx].destination = Some(site);
                    self.set_travel(idx, source, Errand::Pickup(item));
                    return true;
                }
            }
        }

        false
    }

    /// Head for the nearest storage with room for the first carried item
    fn start_deposit(&mut self, idx: usize, grid: &Grid, radius: u32) -> bool {
        let unit = &self.units[idx];
        let position = unit.position;
        let carried: Vec<Item> = unit.inventory.iter().map(|(item, _)| item).collect();
        for item in carried {
            let storage = self.get_storage_around_for(grid, position, radius, item);
            if let Some(target) = storage.first().copied() {
                self.set_travel(idx, target, Errand::Deposit);
                return true;
            }
        }
        false
    }

    fn return_to_job(&mut self, idx: usize, job_position: TilePosition) {
        if self.units[idx].position != job_position {
            self.set_travel(idx, job_position, Errand::ReturnToJob);
        }
    }

    fn set_travel(&mut self, idx: usize, target: TilePosition, errand: Errand) {
        self.units[idx].activity = Activity::Travel { target, errand };
    }

    fn job_position(&self, idx: usize, grid: &Grid) -> Option<TilePosition> {
        self.units[idx].job.map(|job| grid.position_of(job))
    }

    // ========================================================================
    // Movement and arrival
    // ========================================================================

    fn travel(&mut self, idx: usize, grid: &mut Grid, target: TilePosition, errand: Errand) {
        let unit = &mut self.units[idx];
        if unit.position != target {
            unit.position = unit.position.step_toward(&target);
        }
        if unit.position == target {
            self.arrive(idx, grid, target, errand);
        }
    }

    fn arrive(&mut self, idx: usize, grid: &mut Grid, target: TilePosition, errand: Errand) {
        if errand.is_timed() {
            self.units[idx].activity = Activity::Work {
                target,
                errand,
                progress: 0,
            };
            return;
        }

        match errand {
            Errand::Harvest | Errand::Build | Errand::Demolish => {}
            Errand::Deposit => self.deposit(idx, grid, target),
            Errand::Pickup(item) => self.pickup(idx, grid, target, item),
            Errand::Deliver(item) => self.deliver(idx, grid, target, item),
            Errand::ReturnToJob => {}
        }
        self.units[idx].activity = Activity::Idle;
    }

    fn deposit(&mut self, idx: usize, grid: &mut Grid, at: TilePosition) {
        let Some(tile) = grid.tile_mut(at) else {
            return;
        };
        let unit = &mut self.units[idx];

        for item in Item::ALL {
            let amount = unit.inventory.get(item).min(tile.storage_room(item));
            if amount == 0 {
                continue;
            }
            unit.inventory.remove(item, amount);
            tile.inventory.add(item, amount);
            self.events.push(UnitEvent::Deposited {
                unit: unit.id,
                at,
                item,
                amount,
            });
        }
    }

    fn pickup(&mut self, idx: usize, grid: &mut Grid, at: TilePosition, item: Item) {
        let max = self.get_max_items_for(grid, &self.units[idx], item);
        let unit = &self.units[idx];
        let carried = unit.inventory.get(item);

        let mut wanted = max.saturating_sub(carried);
        if let Some(site) = unit.destination.and_then(|d| grid.tile(d)) {
            wanted = wanted.min(remaining_need(site, item).saturating_sub(carried));
        }

        let Some(tile) = grid.tile_mut(at) else {
            return;
        };
        if !tile.is_storage_for(item) {
            return;
        }

        let amount = tile.inventory.remove(item, wanted);
        if amount > 0 {
            let unit = &mut self.units[idx];
            unit.inventory.add(item, amount);
            self.events.push(UnitEvent::PickedUp {
                unit: unit.id,
                at,
                item,
                amount,
            });
        }
    }

    fn deliver(&mut self, idx: usize, grid: &mut Grid, at: TilePosition, item: Item) {
        let unit = &mut self.units[idx];
        unit.destination = None;

        let Some(tile) = grid.tile_mut(at) else {
            return;
        };
        let amount = unit.inventory.get(item).min(remaining_need(tile, item));
        if amount == 0 {
            return;
        }

        unit.inventory.remove(item, amount);
        tile.inventory.add(item, amount);
        tracing::debug!("Unit {:?} delivered {} {} to {}", unit.id, amount, item, at);
        self.events.push(UnitEvent::Delivered {
            unit: unit.id,
            at,
            item,
            amount,
        });
    }

    // ========================================================================
    // Timed work
    // ========================================================================

    fn harvest(&mut self, idx: usize, grid: &mut Grid, target: TilePosition, progress: u32) {
        let max = self.get_max_items_for(grid, &self.units[idx], Item::Wood);
        let harvest_ticks = self.config.harvest_ticks;
        let unit = &mut self.units[idx];

        let Some(tile) = grid.tile_mut(target).filter(|tile| tile.is_harvestable_tree()) else {
            unit.activity = Activity::Idle;
            return;
        };
        if unit.inventory.get(Item::Wood) >= max {
            unit.activity = Activity::Idle;
            return;
        }

        let progress = progress + 1;
        if progress < harvest_ticks {
            unit.activity = Activity::Work {
                target,
                errand: Errand::Harvest,
                progress,
            };
            return;
        }

        let cut = tile.inventory.remove(Item::Wood, 1);
        unit.inventory.add(Item::Wood, cut);
        self.events.push(UnitEvent::Harvested { unit: unit.id, at: target });

        if !tile.is_harvestable_tree() {
            *tile = Tile::default();
            unit.activity = Activity::Idle;
            tracing::debug!("Tree at {} felled", target);
            self.events.push(UnitEvent::TreeFelled { at: target });
            return;
        }

        unit.activity = if unit.inventory.get(Item::Wood) >= max {
            Activity::Idle
        } else {
            Activity::Work {
                target,
                errand: Errand::Harvest,
                progress: 0,
            }
        };
    }

    fn build(&mut self, idx: usize, grid: &mut Grid, target: TilePosition, progress: u32) {
        let build_ticks = self.config.build_ticks;
        let unit = &mut self.units[idx];
        let Some(tile) = grid.tile_mut(target) else {
            unit.activity = Activity::Idle;
            return;
        };

        match apply_construction_work(tile, progress, build_ticks) {
            ContributionResult::InProgress { progress } => {
                unit.activity = Activity::Work {
                    target,
                    errand: Errand::Build,
                    progress,
                };
            }
            ContributionResult::Completed => {
                unit.activity = Activity::Idle;
                tracing::info!("{:?} completed at {}", tile.tile_type, target);
                self.events.push(UnitEvent::ConstructionCompleted {
                    at: target,
                    tile_type: tile.tile_type,
                });
            }
            ContributionResult::AlreadyComplete | ContributionResult::MissingItems => {
                unit.activity = Activity::Idle;
            }
        }
    }

    fn demolish(&mut self, idx: usize, grid: &mut Grid, target: TilePosition, progress: u32) {
        let limits: Vec<(Item, u32)> = Item::ALL
            .iter()
            .map(|item| (*item, self.get_max_items_for(grid, &self.units[idx], *item)))
            .collect();
        let demolish_ticks = self.config.demolish_ticks;
        let unit = &mut self.units[idx];

        let Some(tile) = grid.tile_mut(target).filter(|tile| tile.to_destroy) else {
            unit.activity = Activity::Idle;
            return;
        };

        let progress = progress + 1;
        if progress < demolish_ticks {
            unit.activity = Activity::Work {
                target,
                errand: Errand::Demolish,
                progress,
            };
            return;
        }

        for (item, limit) in limits {
            unit.inventory.add_up_to(item, salvage(tile, item), limit);
        }
        let tile_type = tile.tile_type;
        *tile = Tile::default();
        unit.activity = Activity::Idle;

        tracing::info!("{:?} at {} demolished", tile_type, target);
        self.events.push(UnitEvent::Demolished { at: target, tile_type });
    }
}
