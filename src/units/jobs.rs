//! Job capacity accounting
//!
//! Occupancy is never cached: it is counted from the unit list on every
//! query, so a job taken earlier in a tick is seen by every later unit.

use crate::core::error::{ColonyError, Result};
use crate::core::types::UnitId;
use crate::spatial::grid::Grid;
use crate::units::events::UnitEvent;
use crate::units::manager::UnitManager;
use crate::units::unit::Activity;

impl UnitManager {
    /// Capacity of the job at `job_tile_index`; 0 when it is not a job
    pub fn get_max_unit_on_job(&self, grid: &Grid, job_tile_index: usize) -> u32 {
        self.get_character(grid, job_tile_index)
            .map(|role| self.config.job_capacity(role))
            .unwrap_or(0)
    }

    pub fn count_how_many_unit_are_working_on(&self, job_tile_index: usize) -> u32 {
        self.units
            .iter()
            .filter(|unit| unit.job == Some(job_tile_index))
            .count() as u32
    }

    pub fn is_tile_job_full(&self, grid: &Grid, job_tile_index: usize) -> bool {
        self.count_how_many_unit_are_working_on(job_tile_index)
            >= self.get_max_unit_on_job(grid, job_tile_index)
    }

    /// Put unit `id` to work at `job_tile_index`, if the job has room
    pub fn try_assign_job(&mut self, grid: &Grid, id: UnitId, job_tile_index: usize) -> Result<()> {
        let idx = id.0 as usize;
        if idx >= self.units.len() {
            return Err(ColonyError::UnitNotFound(id));
        }
        self.assign_job(idx, grid, job_tile_index)
    }

    /// Assignment re-checks fullness right before writing the job
    pub(crate) fn assign_job(&mut self, idx: usize, grid: &Grid, job_tile_index: usize) -> Result<()> {
        if self.get_character(grid, job_tile_index).is_none() {
            return Err(ColonyError::NotAJob(job_tile_index));
        }
        if self.units[idx].job == Some(job_tile_index) {
            return Ok(());
        }
        if self.is_tile_job_full(grid, job_tile_index) {
            return Err(ColonyError::JobFull {
                job: job_tile_index,
                capacity: self.get_max_unit_on_job(grid, job_tile_index),
            });
        }

        let unit = &mut self.units[idx];
        unit.job = Some(job_tile_index);
        unit.activity = Activity::Idle;
        unit.destination = None;
        tracing::info!(
            "Unit {:?} assigned to job at {}",
            unit.id,
            grid.position_of(job_tile_index)
        );
        self.events.push(UnitEvent::JobAssigned {
            unit: unit.id,
            job: job_tile_index,
        });
        Ok(())
    }

    /// Take the nearest open job; returns false when none is available
    pub(crate) fn seek_job(&mut self, idx: usize, grid: &Grid) -> bool {
        let position = self.units[idx].position;
        let mut best: Option<(u32, usize)> = None;
        for job in self.get_available_jobs(grid) {
            let distance = position.distance(&grid.position_of(job));
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, job));
            }
        }

        match best {
            Some((_, job)) => self.assign_job(idx, grid, job).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::city::building::TileType;
    use crate::core::config::SimulationConfig;
    use crate::core::error::ColonyError;
    use crate::core::types::TilePosition;
    use crate::spatial::grid::{Grid, Tile};
    use crate::units::manager::UnitManager;
    use crate::units::unit::Unit;

    fn setup() -> (Grid, UnitManager, usize) {
        let mut grid = Grid::new(8, 8);
        let sawmill = TilePosition::new(4, 4);
        grid.set_tile(sawmill, Tile::new(TileType::Sawmill)).unwrap();
        let job = grid.index_of(sawmill).unwrap();
        (grid, UnitManager::new(SimulationConfig::default()), job)
    }

    #[test]
    fn test_count_and_fullness() {
        let (grid, mut manager, job) = setup();
        assert_eq!(manager.get_max_unit_on_job(&grid, job), 2);
        assert_eq!(manager.count_how_many_unit_are_working_on(job), 0);
        assert!(!manager.is_tile_job_full(&grid, job));

        let a = manager.add_unit(&grid, &Unit::new(TilePosition::new(0, 0)));
        let b = manager.add_unit(&grid, &Unit::new(TilePosition::new(0, 1)));
        let c = manager.add_unit(&grid, &Unit::new(TilePosition::new(0, 2)));

        manager.try_assign_job(&grid, a, job).unwrap();
        assert!(!manager.is_tile_job_full(&grid, job));
        manager.try_assign_job(&grid, b, job).unwrap();
        assert!(manager.is_tile_job_full(&grid, job));

        // Third unit is rejected
        let err = manager.try_assign_job(&grid, c, job).unwrap_err();
        assert!(matches!(err, ColonyError::JobFull { capacity: 2, .. }));
        assert_eq!(manager.count_how_many_unit_are_working_on(job), 2);
        assert_eq!(manager.unit(c).unwrap().job, None);
    }

    #[test]
    fn test_reassigning_same_job_is_noop() {
        let (grid, mut manager, job) = setup();
        let a = manager.add_unit(&grid, &Unit::new(TilePosition::new(0, 0)));
        manager.try_assign_job(&grid, a, job).unwrap();
        manager.try_assign_job(&grid, a, job).unwrap();
        assert_eq!(manager.count_how_many_unit_are_working_on(job), 1);
        assert_eq!(manager.take_events().len(), 1);
    }

    #[test]
    fn test_non_job_tile_rejected() {
        let (grid, mut manager, _) = setup();
        let a = manager.add_unit(&grid, &Unit::new(TilePosition::new(0, 0)));
        assert!(matches!(
            manager.try_assign_job(&grid, a, 0),
            Err(ColonyError::NotAJob(0))
        ));
        assert_eq!(manager.get_max_unit_on_job(&grid, 0), 0);
    }

    #[test]
    fn test_seek_job_prefers_nearest_then_scan_order() {
        let mut grid = Grid::new(9, 9);
        // Both at distance 3 from (4, 4); (1, 1) comes first in scan order
        grid.set_tile(TilePosition::new(7, 7), Tile::new(TileType::BuilderHut)).unwrap();
        grid.set_tile(TilePosition::new(1, 1), Tile::new(TileType::Sawmill)).unwrap();
        let mut manager = UnitManager::new(SimulationConfig::default());
        let id = manager.add_unit(&grid, &Unit::new(TilePosition::new(4, 4)));

        assert!(manager.seek_job(id.0 as usize, &grid));
        assert_eq!(manager.unit(id).unwrap().job, grid.index_of(TilePosition::new(1, 1)));
    }

    #[test]
    fn test_same_tick_assignments_never_overbook() {
        let (mut grid, mut manager, job) = setup();
        for i in 0..5 {
            manager.add_unit(&grid, &Unit::new(TilePosition::new(i, 0)));
        }

        manager.update_units(&mut grid);

        assert_eq!(manager.count_how_many_unit_are_working_on(job), 2);
        let jobless = manager.units().iter().filter(|u| u.job.is_none()).count();
        assert_eq!(jobless, 3);
    }
}
