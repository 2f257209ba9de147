//! Shape Hunt - bouncing shapes and the evil circles that eat them
//!
//! Core modules:
//! - `sim`: Deterministic simulation (shapes, registry, collisions, tick loop)
//! - `renderer`: Draw commands and the canvas surface that replays them
//! - `platform`: Browser viewport and HUD glue
//! - `settings`: Tunables loaded from JSON

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{CounterRefresh, Settings};

use thiserror::Error;

/// Simulation configuration constants
pub mod consts {
    /// Initial population seeded at startup
    pub const INITIAL_HUNTERS: usize = 5;
    pub const INITIAL_CIRCLES: usize = 15;
    pub const INITIAL_SQUARES: usize = 15;

    /// Random shape size range (inclusive)
    pub const SIZE_MIN: i32 = 10;
    pub const SIZE_MAX: i32 = 20;

    /// Random velocity component range (inclusive), also used by bounce
    pub const VEL_MIN: i32 = -7;
    pub const VEL_MAX: i32 = 7;

    /// Random color channel range (inclusive)
    pub const CHANNEL_MIN: i32 = 20;
    pub const CHANNEL_MAX: i32 = 255;

    /// Alpha of the dark rectangle painted each tick (motion trails)
    pub const TRAIL_ALPHA: f64 = 0.25;

    /// Hunter collision radius is size / this
    pub const HUNTER_COLLISION_DIVISOR: f64 = 5.0;

    /// Default spawn keeps this many sizes away from every edge
    pub const SPAWN_EDGE_FACTOR: f64 = 2.0;

    /// Viewport used by the headless native run
    pub const HEADLESS_WIDTH: f64 = 800.0;
    pub const HEADLESS_HEIGHT: f64 = 600.0;
}

/// Errors raised while configuring a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A settings value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Settings JSON could not be parsed.
    #[error("failed to parse settings: {0}")]
    ParseSettings(#[from] serde_json::Error),
    /// Settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}
