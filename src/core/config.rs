//! Simulation configuration with documented constants
//!
//! All tuning numbers are collected here. Defaults produce a colony that
//! clears nearby forest and finishes a few buildings in a few hundred ticks.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::city::building::Role;
use crate::core::error::{ColonyError, Result};
use crate::core::types::Item;

/// Configuration for the simulation systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === SPATIAL SEARCH ===
    /// How far from its sawmill a worker looks for trees (tiles, Chebyshev)
    pub harvest_radius: u32,

    /// How far from the harvest site a sawmill worker looks for storage
    ///
    /// Builders and logisticians search the whole grid instead.
    pub storage_search_radius: u32,

    // === WORK DURATIONS ===
    /// Ticks of work needed to cut one unit of wood from a tree
    pub harvest_ticks: u32,

    /// Ticks of work to finish a construction site once all goods are delivered
    pub build_ticks: u32,

    /// Ticks of work to tear down a building marked for destruction
    pub demolish_ticks: u32,

    // === WORLD ===
    /// Wood held by a freshly grown tree
    pub tree_wood: u32,

    /// Units housed by each built house
    pub house_capacity: u32,

    /// Ticks between population growth checks
    pub spawn_interval: u64,

    // === JOBS ===
    pub jobs: JobCapacities,

    /// Carry limits per role
    pub carry: CarryConfig,
}

/// Maximum units per job tile, by role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobCapacities {
    pub sawmill: u32,
    pub builder_hut: u32,
    pub logistics_center: u32,
}

impl Default for JobCapacities {
    fn default() -> Self {
        Self {
            sawmill: 2,
            builder_hut: 2,
            logistics_center: 2,
        }
    }
}

/// Per-item carry limits for one role
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryLimits {
    pub wood: u32,
    pub stone: u32,
}

impl CarryLimits {
    pub fn get(&self, item: Item) -> u32 {
        match item {
            Item::Wood => self.wood,
            Item::Stone => self.stone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryConfig {
    pub sawmill: CarryLimits,
    pub builder: CarryLimits,
    pub logistician: CarryLimits,
}

impl Default for CarryConfig {
    fn default() -> Self {
        Self {
            sawmill: CarryLimits { wood: 5, stone: 0 },
            // Builders only carry salvage from demolitions
            builder: CarryLimits { wood: 2, stone: 1 },
            // Stone is bulky: one block per trip
            logistician: CarryLimits { wood: 10, stone: 1 },
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            harvest_radius: 6,
            storage_search_radius: 8,

            harvest_ticks: 3,
            build_ticks: 5,
            demolish_ticks: 3,

            tree_wood: 4,
            house_capacity: 2,
            spawn_interval: 50,

            jobs: JobCapacities::default(),
            carry: CarryConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Maximum units the job tile of `role` accepts
    pub fn job_capacity(&self, role: Role) -> u32 {
        match role {
            Role::Sawmill => self.jobs.sawmill,
            Role::Builder => self.jobs.builder_hut,
            Role::Logistician => self.jobs.logistics_center,
        }
    }

    /// How many of `item` a unit of `role` can carry
    pub fn carry_limit(&self, role: Role, item: Item) -> u32 {
        let limits = match role {
            Role::Sawmill => &self.carry.sawmill,
            Role::Builder => &self.carry.builder,
            Role::Logistician => &self.carry.logistician,
        };
        limits.get(item)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        // Zero-length work would let a unit finish in the tick it arrives
        // and never show up as working
        if self.harvest_ticks == 0 || self.build_ticks == 0 || self.demolish_ticks == 0 {
            return Err(ColonyError::InvalidConfig(
                "work durations must be at least 1 tick".into(),
            ));
        }

        if self.spawn_interval == 0 {
            return Err(ColonyError::InvalidConfig(
                "spawn_interval must be positive".into(),
            ));
        }

        if self.carry.sawmill.wood == 0 {
            return Err(ColonyError::InvalidConfig(
                "sawmill workers must be able to carry wood".into(),
            ));
        }

        if self.carry.logistician.wood == 0 && self.carry.logistician.stone == 0 {
            return Err(ColonyError::InvalidConfig(
                "logisticians must be able to carry something".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            harvest_radius = 3

            [jobs]
            sawmill = 4

            [carry.logistician]
            wood = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.harvest_radius, 3);
        assert_eq!(config.jobs.sawmill, 4);
        assert_eq!(config.jobs.builder_hut, 2);
        assert_eq!(config.carry.logistician.wood, 6);
        // Table given without stone: field-level default is 0
        assert_eq!(config.carry.logistician.stone, 0);
        assert_eq!(config.build_ticks, SimulationConfig::default().build_ticks);
    }

    #[test]
    fn test_zero_work_duration_rejected() {
        let result = SimulationConfig::from_toml_str("build_ticks = 0");
        assert!(matches!(result, Err(ColonyError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = SimulationConfig::from_toml_str("harvest_radius = \"far\"");
        assert!(matches!(result, Err(ColonyError::TomlError(_))));
    }

    #[test]
    fn test_role_lookups() {
        let config = SimulationConfig::default();
        assert_eq!(config.job_capacity(Role::Builder), 2);
        assert_eq!(config.carry_limit(Role::Logistician, Item::Stone), 1);
        assert_eq!(config.carry_limit(Role::Sawmill, Item::Stone), 0);
    }
}
