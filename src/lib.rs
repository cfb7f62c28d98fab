//! Timberline - Tile-Based Colony Simulation
//!
//! Units take jobs at buildings and keep the colony running: sawmill workers
//! cut trees, logisticians haul goods to construction sites, builders finish
//! and tear down buildings.

pub mod city;
pub mod core;
pub mod ecs;
pub mod render;
pub mod simulation;
pub mod spatial;
pub mod ui;
pub mod units;
pub mod world;
