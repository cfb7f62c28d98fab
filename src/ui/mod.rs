//! UI module - construction menu state and text panels for the CLI

pub mod inventory;
pub mod state;

pub use inventory::tile_inventory_panel;
pub use state::{GameUI, LogCategory, LogEntry};
