//! Color definitions for roles, tiles and visual states

use crate::city::building::{Role, TileType};

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Darken color by a factor (0.0 = black, 1.0 = unchanged)
    pub fn darken(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// Same color at reduced opacity
    pub fn faded(&self, alpha: f32) -> Self {
        Self {
            a: self.a * alpha.clamp(0.0, 1.0),
            ..*self
        }
    }
}

/// Units without a job
pub const JOBLESS: Color = Color::new(0.7, 0.7, 0.7, 1.0);

/// Base color for a worker role
pub fn role_color(role: Role) -> Color {
    match role {
        Role::Sawmill => Color::new(0.8, 0.5, 0.2, 1.0),     // Sawdust orange
        Role::Builder => Color::new(0.9, 0.8, 0.2, 1.0),     // Hard-hat yellow
        Role::Logistician => Color::new(0.2, 0.6, 0.9, 1.0), // Blue
    }
}

/// Base color for a tile type
pub fn tile_color(tile_type: TileType) -> Color {
    match tile_type {
        TileType::Grass => Color::new(0.3, 0.6, 0.3, 1.0),
        TileType::Water => Color::new(0.2, 0.4, 0.8, 1.0),
        TileType::Tree => Color::new(0.1, 0.4, 0.15, 1.0),
        TileType::Sawmill => Color::new(0.6, 0.4, 0.2, 1.0),
        TileType::BuilderHut => Color::new(0.7, 0.6, 0.3, 1.0),
        TileType::Storage => Color::new(0.5, 0.35, 0.2, 1.0),
        TileType::House => Color::new(0.8, 0.3, 0.25, 1.0),
        TileType::Road => Color::new(0.55, 0.55, 0.5, 1.0),
        TileType::LogisticsCenter => Color::new(0.3, 0.5, 0.7, 1.0),
    }
}

/// Construction sites are drawn translucent
pub fn construction_tint(base: Color, is_built: bool) -> Color {
    if is_built {
        base
    } else {
        base.faded(0.5)
    }
}

/// Loaded units are drawn darker (up to 30% for 10+ items)
pub fn carrying_tint(base: Color, carrying: u32) -> Color {
    let load = carrying.min(10) as f32 / 10.0;
    base.darken(1.0 - load * 0.3)
}
