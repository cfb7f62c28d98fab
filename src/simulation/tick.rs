//! Tick system - advances the colony one step
//!
//! Units act first, in insertion order, then the clock advances and
//! periodic systems (population growth) run.

use serde::Serialize;

use crate::core::types::{Tick, TilePosition, UnitId};
use crate::ecs::world::World;
use crate::simulation::population::try_population_growth;
use crate::units::events::UnitEvent;

/// Events generated during a simulation tick
///
/// These events are returned by `run_simulation_tick` for display in the UI action log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// Something a unit did or caused
    Unit { tick: Tick, event: UnitEvent },
    /// A newcomer moved into a house
    UnitSpawned {
        tick: Tick,
        unit: UnitId,
        at: TilePosition,
    },
}

/// Run a single simulation tick
pub fn run_simulation_tick(world: &mut World) -> Vec<SimulationEvent> {
    world.units.update_units(&mut world.grid);

    let tick = world.current_tick;
    let mut events: Vec<SimulationEvent> = world
        .units
        .take_events()
        .into_iter()
        .map(|event| SimulationEvent::Unit { tick, event })
        .collect();

    world.tick();

    if world.current_tick % world.config.spawn_interval == 0 {
        if let Some(unit) = try_population_growth(world) {
            let at = world
                .units
                .unit(unit)
                .map(|u| u.position)
                .unwrap_or_default();
            events.push(SimulationEvent::UnitSpawned {
                tick: world.current_tick,
                unit,
                at,
            });
        }
    }

    events
}

/// Run `ticks` ticks and collect every event
pub fn run_simulation(world: &mut World, ticks: u64) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(run_simulation_tick(world));
    }
    events
}
