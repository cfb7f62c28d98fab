//! Timberline - Entry Point
//!
//! Generates a seeded colony and either runs it headless, printing a summary,
//! or drops into an interactive loop for placing and inspecting buildings.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use timberline::city::building::{Role, TileType};
use timberline::core::config::SimulationConfig;
use timberline::core::error::Result;
use timberline::core::types::{Item, TilePosition};
use timberline::ecs::world::World;
use timberline::render::ascii::render_frame;
use timberline::simulation::tick::{run_simulation_tick, SimulationEvent};
use timberline::ui::{tile_inventory_panel, GameUI, LogCategory};
use timberline::units::events::UnitEvent;
use timberline::world::generator::{generate_world, MapConfig};

/// Timberline - a grid colony of lumberjacks, builders and haulers
#[derive(Parser, Debug)]
#[command(name = "timberline")]
#[command(about = "Run a tile-based colony simulation")]
struct Args {
    /// Run without the interactive loop and print a summary
    #[arg(long)]
    headless: bool,

    /// Ticks to simulate in headless mode
    #[arg(long, default_value_t = 500)]
    ticks: u64,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Simulation config (TOML); defaults are used for missing keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for the starting map
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Map width in tiles
    #[arg(long, default_value_t = 32)]
    width: usize,

    /// Map height in tiles
    #[arg(long, default_value_t = 24)]
    height: usize,
}

/// Headless run summary
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    units: usize,
    jobless: usize,
    sawmill_workers: usize,
    builders: usize,
    logisticians: usize,
    buildings: usize,
    construction_sites: usize,
    trees: usize,
    stored_wood: u32,
    stored_stone: u32,
    wood_harvested: u32,
    trees_felled: u32,
    deliveries: u32,
    constructions_completed: u32,
    demolitions: u32,
    units_spawned: u32,
}

impl RunSummary {
    fn record(&mut self, event: &SimulationEvent) {
        match event {
            SimulationEvent::UnitSpawned { .. } => self.units_spawned += 1,
            SimulationEvent::Unit { event, .. } => match event {
                UnitEvent::Harvested { .. } => self.wood_harvested += 1,
                UnitEvent::TreeFelled { .. } => self.trees_felled += 1,
                UnitEvent::Delivered { .. } => self.deliveries += 1,
                UnitEvent::ConstructionCompleted { .. } => self.constructions_completed += 1,
                UnitEvent::Demolished { .. } => self.demolitions += 1,
                _ => {}
            },
        }
    }

    fn snapshot(&mut self, world: &World) {
        self.ticks = world.current_tick;
        self.units = world.unit_count();
        self.jobless = 0;
        self.sawmill_workers = 0;
        self.builders = 0;
        self.logisticians = 0;
        for unit in world.units.units() {
            match unit.job.and_then(|job| world.units.get_character(&world.grid, job)) {
                Some(Role::Sawmill) => self.sawmill_workers += 1,
                Some(Role::Builder) => self.builders += 1,
                Some(Role::Logistician) => self.logisticians += 1,
                None => self.jobless += 1,
            }
        }

        self.buildings = 0;
        self.construction_sites = 0;
        self.trees = 0;
        for (_, tile) in world.grid.iter() {
            if tile.tile_type == TileType::Tree {
                self.trees += 1;
            } else if tile.tile_type.is_building() {
                if tile.is_built {
                    self.buildings += 1;
                } else {
                    self.construction_sites += 1;
                }
            }
        }

        let stock = world.units.get_all_usable_items(&world.grid);
        self.stored_wood = stock.get(&Item::Wood).copied().unwrap_or(0);
        self.stored_stone = stock.get(&Item::Stone).copied().unwrap_or(0);
    }

    fn print_text(&self) {
        println!("=== TIMBERLINE RUN (seed {}) ===", self.seed);
        println!("Ticks: {}", self.ticks);
        println!(
            "Units: {} ({} sawmill, {} builders, {} logisticians, {} jobless)",
            self.units, self.sawmill_workers, self.builders, self.logisticians, self.jobless
        );
        println!(
            "Buildings: {} built, {} under construction",
            self.buildings, self.construction_sites
        );
        println!("Trees left: {}", self.trees);
        println!("Stored: {} wood, {} stone", self.stored_wood, self.stored_stone);
        println!(
            "Activity: {} wood cut, {} trees felled, {} deliveries",
            self.wood_harvested, self.trees_felled, self.deliveries
        );
        println!(
            "          {} constructions, {} demolitions, {} newcomers",
            self.constructions_completed, self.demolitions, self.units_spawned
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing for logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("timberline=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let map = MapConfig {
        width: args.width,
        height: args.height,
        seed: args.seed,
        ..MapConfig::default()
    };
    let mut world = generate_world(&map, config)?;

    if args.headless {
        run_headless(&mut world, &args)
    } else {
        run_interactive(&mut world)
    }
}

fn run_headless(world: &mut World, args: &Args) -> Result<()> {
    let mut summary = RunSummary {
        seed: args.seed,
        ..RunSummary::default()
    };

    for _ in 0..args.ticks {
        for event in run_simulation_tick(world) {
            summary.record(&event);
        }
    }
    summary.snapshot(world);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print_text();
    }
    Ok(())
}

/// One line of interactive input
#[derive(Debug, PartialEq)]
enum Command {
    Tick,
    Run(u32),
    Place(TileType, TilePosition),
    Destroy(TilePosition),
    Inspect(TilePosition),
    Map,
    Status,
    Log,
    Quit,
}

fn parse_position(x: Option<&str>, y: Option<&str>) -> Option<TilePosition> {
    Some(TilePosition::new(x?.parse().ok()?, y?.parse().ok()?))
}

fn parse_command(input: &str) -> std::result::Result<Command, String> {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(String::new());
    };

    match verb {
        "tick" | "t" => Ok(Command::Tick),
        "run" => words
            .next()
            .and_then(|n| n.parse().ok())
            .map(Command::Run)
            .ok_or_else(|| "Usage: run <number>".to_string()),
        "place" | "p" => {
            let usage = || "Usage: place <building> <x> <y>".to_string();
            let name = words.next().ok_or_else(usage)?;
            let building =
                TileType::parse_building(name).ok_or_else(|| format!("Unknown building: {}", name))?;
            let position = parse_position(words.next(), words.next()).ok_or_else(usage)?;
            Ok(Command::Place(building, position))
        }
        "destroy" | "d" => parse_position(words.next(), words.next())
            .map(Command::Destroy)
            .ok_or_else(|| "Usage: destroy <x> <y>".to_string()),
        "inspect" | "i" => parse_position(words.next(), words.next())
            .map(Command::Inspect)
            .ok_or_else(|| "Usage: inspect <x> <y>".to_string()),
        "map" | "m" => Ok(Command::Map),
        "status" | "s" => Ok(Command::Status),
        "log" | "l" => Ok(Command::Log),
        "quit" | "q" => Ok(Command::Quit),
        _ => Err(format!(
            "Unknown command: {}. Available: tick, run <n>, place, destroy, inspect, map, status, log, quit",
            verb
        )),
    }
}

fn run_interactive(world: &mut World) -> Result<()> {
    let mut ui = GameUI::new();
    ui.log(
        world.current_tick,
        format!("Colony founded with {} units", world.unit_count()),
        LogCategory::System,
    );

    println!("\n=== TIMBERLINE ===");
    println!();
    println!("Commands:");
    println!("  tick / t                   - Advance simulation by one tick");
    println!("  run <n>                    - Run n simulation ticks");
    println!("  place <building> <x> <y>   - Lay out a construction site");
    println!("  destroy <x> <y>            - Mark a building for demolition");
    println!("  inspect <x> <y>            - Show a tile's inventory");
    println!("  map / m                    - Draw the map");
    println!("  status / s                 - Show colony status");
    println!("  log / l                    - Show recent events");
    println!("  quit / q                   - Exit");
    println!();
    println!(
        "Buildings: {}",
        TileType::BUILDINGS
            .iter()
            .map(|b| b.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();
    print!("{}", render_frame(world));

    loop {
        print!("[tick {}] > ", world.current_tick);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let command = match parse_command(input.trim()) {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    println!("{}", message);
                }
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Tick => {
                advance(world, &mut ui, 1);
                println!("Tick {} complete.", world.current_tick);
            }
            Command::Run(n) => {
                println!("Running {} ticks...", n);
                advance(world, &mut ui, n);
                println!("Completed {} ticks. Now at tick {}.", n, world.current_tick);
            }
            Command::Place(building, position) => {
                let tick = world.current_tick;
                let placed = ui
                    .select_building(building)
                    .and_then(|_| ui.apply_placement(&mut world.grid, tick, position));
                match placed {
                    Ok(tile_type) => println!("{} site laid out at {}", tile_type.name(), position),
                    Err(e) => println!("Cannot place: {}", e),
                }
                ui.deselect();
            }
            Command::Destroy(position) => {
                let tick = world.current_tick;
                match ui.apply_destruction(&mut world.grid, tick, position) {
                    Ok(()) => println!("Marked {} for demolition", position),
                    Err(e) => println!("Cannot destroy: {}", e),
                }
            }
            Command::Inspect(position) => match tile_inventory_panel(&world.grid, position) {
                Some(panel) => {
                    ui.inspected_tile = Some(position);
                    println!("{}", panel);
                }
                None => println!("{} is outside the map", position),
            },
            Command::Map => print!("{}", render_frame(world)),
            Command::Status => display_status(world),
            Command::Log => {
                for entry in ui.recent(15) {
                    println!("  [{}] {:?}: {}", entry.tick, entry.category, entry.message);
                }
            }
        }
    }

    println!(
        "\nGoodbye! Final state: {} units, {} ticks elapsed.",
        world.unit_count(),
        world.current_tick
    );
    Ok(())
}

fn advance(world: &mut World, ui: &mut GameUI, ticks: u32) {
    for _ in 0..ticks {
        for event in run_simulation_tick(world) {
            if let Some((tick, message, category)) = describe(&event) {
                ui.log(tick, message, category);
            }
        }
    }
}

/// Action log line for events worth showing the player
fn describe(event: &SimulationEvent) -> Option<(u64, String, LogCategory)> {
    match event {
        SimulationEvent::UnitSpawned { tick, unit, at } => Some((
            *tick,
            format!("Unit {} moved into the house at {}", unit.0, at),
            LogCategory::Workforce,
        )),
        SimulationEvent::Unit { tick, event } => {
            let (message, category) = match event {
                UnitEvent::JobAssigned { unit, job } => {
                    (format!("Unit {} took the job at tile {}", unit.0, job), LogCategory::Workforce)
                }
                UnitEvent::JobLost { unit, job } => {
                    (format!("Unit {} lost the job at tile {}", unit.0, job), LogCategory::Workforce)
                }
                UnitEvent::ConstructionCompleted { at, tile_type } => (
                    format!("{} completed at {}", tile_type.name(), at),
                    LogCategory::Construction,
                ),
                UnitEvent::Demolished { at, tile_type } => (
                    format!("{} at {} demolished", tile_type.name(), at),
                    LogCategory::Construction,
                ),
                _ => return None,
            };
            Some((*tick, message, category))
        }
    }
}

fn display_status(world: &World) {
    let mut summary = RunSummary::default();
    summary.snapshot(world);

    println!();
    println!("--- Tick {} | Units: {} ---", world.current_tick, summary.units);
    println!(
        "  Sawmill: {}  Builders: {}  Logisticians: {}  Jobless: {}",
        summary.sawmill_workers, summary.builders, summary.logisticians, summary.jobless
    );
    println!("  Stored: {} wood, {} stone", summary.stored_wood, summary.stored_stone);
    println!(
        "  Buildings: {} built, {} sites, {} trees",
        summary.buildings, summary.construction_sites, summary.trees
    );

    for unit in world.units.units().iter().take(8) {
        let role = unit
            .job
            .and_then(|job| world.units.get_character(&world.grid, job))
            .map(|role| role.name())
            .unwrap_or("Jobless");
        let carrying: Vec<String> = unit
            .inventory
            .iter()
            .map(|(item, count)| format!("{} {}", count, item))
            .collect();
        println!(
            "  Unit {:>3} {:<15} at {:<9} {:<8} {}",
            unit.id.0,
            role,
            unit.position.to_string(),
            unit.activity.label(),
            carrying.join(", ")
        );
    }
    println!();
}
