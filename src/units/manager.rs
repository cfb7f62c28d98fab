//! UnitManager - owns every unit and drives them one tick at a time

use crate::city::building::Role;
use crate::core::config::SimulationConfig;
use crate::core::types::{TilePosition, UnitId};
use crate::render::{colors, RenderUnit};
use crate::spatial::grid::Grid;
use crate::units::events::UnitEvent;
use crate::units::unit::Unit;

/// Owner of all units
///
/// Units live in an insertion-ordered arena. They are never removed, so a
/// `UnitId` doubles as the unit's slot and stays valid for the whole run.
/// The grid is not owned here: every operation borrows it from the caller.
pub struct UnitManager {
    pub(crate) config: SimulationConfig,
    pub(crate) units: Vec<Unit>,
    pub(crate) events: Vec<UnitEvent>,
}

impl UnitManager {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            units: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn count(&self) -> usize {
        self.units.len()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.0 as usize)
    }

    /// Append a copy of `unit`, returning its id
    ///
    /// A requested job that is full or is not a job tile is not honored:
    /// the unit joins jobless and looks for work on its first tick.
    pub fn add_unit(&mut self, grid: &Grid, unit: &Unit) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        let mut unit = unit.clone();
        unit.id = id;

        if let Some(job) = unit.job {
            if self.get_character(grid, job).is_none() {
                tracing::warn!("Unit {:?} added with tile {} which is not a job", id, job);
                unit.clear_job();
            } else if self.is_tile_job_full(grid, job) {
                tracing::warn!(
                    "Unit {:?} redirected: job {} already has {} units",
                    id,
                    job,
                    self.count_how_many_unit_are_working_on(job)
                );
                unit.clear_job();
            }
        }

        self.units.push(unit);
        id
    }

    /// Role of units working at `job_tile_index`, if it is a built job tile
    pub fn get_character(&self, grid: &Grid, job_tile_index: usize) -> Option<Role> {
        grid.tile_at_index(job_tile_index)
            .filter(|tile| tile.is_built)
            .and_then(|tile| tile.tile_type.role())
    }

    /// True if a unit of `role` is heading to, working at, or supplying `position`
    pub fn is_tile_taken_care_by(&self, grid: &Grid, position: TilePosition, role: Role) -> bool {
        self.taken_care_by(grid, position, role, None)
    }

    pub(crate) fn taken_care_by(
        &self,
        grid: &Grid,
        position: TilePosition,
        role: Role,
        except: Option<usize>,
    ) -> bool {
        self.units.iter().enumerate().any(|(i, unit)| {
            Some(i) != except
                && (unit.activity.target() == Some(position) || unit.destination == Some(position))
                && unit.job.and_then(|job| self.get_character(grid, job)) == Some(role)
        })
    }

    /// Advance every unit by one tick, in insertion order
    pub fn update_units(&mut self, grid: &mut Grid) {
        for idx in 0..self.units.len() {
            self.update_unit(idx, grid);
        }
    }

    fn update_unit(&mut self, idx: usize, grid: &mut Grid) {
        if let Some(job) = self.units[idx].job {
            if self.get_character(grid, job).is_none() {
                let unit = &mut self.units[idx];
                unit.clear_job();
                tracing::info!("Unit {:?} lost its job at tile {}", unit.id, job);
                self.events.push(UnitEvent::JobLost { unit: unit.id, job });
            }
        }

        let role = self.units[idx]
            .job
            .and_then(|job| self.get_character(grid, job));

        match role {
            Some(Role::Sawmill) => self.on_tick_sawmill(idx, grid),
            Some(Role::Builder) => self.on_tick_builder(idx, grid),
            Some(Role::Logistician) => self.on_tick_logistician(idx, grid),
            None => {
                self.seek_job(idx, grid);
            }
        }
    }

    /// Snapshot every unit for display; never mutates
    pub fn draw_units(&self, grid: &Grid, buffer: &mut Vec<RenderUnit>) {
        buffer.clear();

        for unit in &self.units {
            let role = unit.job.and_then(|job| self.get_character(grid, job));
            let carrying = unit.inventory.total();
            let base = role.map(colors::role_color).unwrap_or(colors::JOBLESS);
            buffer.push(RenderUnit {
                id: unit.id,
                position: unit.position,
                role,
                activity: unit.activity.label(),
                carrying,
                color: colors::carrying_tint(base, carrying),
            });
        }
    }

    /// Events produced since the last call
    pub fn take_events(&mut self) -> Vec<UnitEvent> {
        std::mem::take(&mut self.events)
    }
}
