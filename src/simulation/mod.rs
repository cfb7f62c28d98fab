//! Simulation systems - tick driver and population growth

pub mod population;
pub mod tick;

pub use population::{housing_capacity, housing_surplus, try_population_growth};
pub use tick::{run_simulation, run_simulation_tick, SimulationEvent};
