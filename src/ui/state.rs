//! UI state for the construction menu and action log

use std::collections::VecDeque;

use crate::city::building::TileType;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{Tick, TilePosition};
use crate::spatial::grid::Grid;

/// Maximum action log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Game UI state
#[derive(Debug, Default)]
pub struct GameUI {
    /// Building chosen in the construction menu (if any)
    pub selected_building: Option<TileType>,
    /// Tile whose inventory panel is shown
    pub inspected_tile: Option<TilePosition>,
    /// Action log entries
    pub action_log: VecDeque<LogEntry>,
}

/// An entry in the action log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub tick: Tick,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Construction,
    Workforce,
    System,
}

impl GameUI {
    pub fn new() -> Self {
        Self {
            selected_building: None,
            inspected_tile: None,
            action_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    /// Add an entry to the action log
    pub fn log(&mut self, tick: Tick, message: String, category: LogCategory) {
        if self.action_log.len() >= MAX_LOG_ENTRIES {
            self.action_log.pop_front();
        }
        self.action_log.push_back(LogEntry {
            tick,
            message,
            category,
        });
    }

    /// Select a building in the construction menu; non-buildings are rejected
    pub fn select_building(&mut self, tile_type: TileType) -> Result<()> {
        if !tile_type.is_building() {
            return Err(ColonyError::NotABuilding(tile_type));
        }
        self.selected_building = Some(tile_type);
        Ok(())
    }

    /// Clear selection
    pub fn deselect(&mut self) {
        self.selected_building = None;
    }

    /// Place the selected building as a construction site
    pub fn apply_placement(&mut self, grid: &mut Grid, tick: Tick, position: TilePosition) -> Result<TileType> {
        let tile_type = self
            .selected_building
            .ok_or_else(|| ColonyError::UnknownBuilding("no building selected".into()))?;
        grid.place_building(position, tile_type)?;
        self.log(
            tick,
            format!("Placed {} site at {}", tile_type.name(), position),
            LogCategory::Construction,
        );
        Ok(tile_type)
    }

    /// Mark the building at `position` for demolition
    pub fn apply_destruction(&mut self, grid: &mut Grid, tick: Tick, position: TilePosition) -> Result<()> {
        grid.mark_for_destruction(position)?;
        self.log(
            tick,
            format!("Marked {} for demolition", position),
            LogCategory::Construction,
        );
        Ok(())
    }

    /// Most recent log entries, oldest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        let skip = self.action_log.len().saturating_sub(count);
        self.action_log.iter().skip(skip)
    }
}
