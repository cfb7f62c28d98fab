//! World generation

pub mod generator;

pub use generator::{generate_world, MapConfig};
