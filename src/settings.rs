//! Simulation settings
//!
//! Read from LocalStorage on the web, or from a JSON file for the headless run.

use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::{INITIAL_CIRCLES, INITIAL_HUNTERS, INITIAL_SQUARES, TRAIL_ALPHA};

/// When the live counter is refreshed during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CounterRefresh {
    /// After each shape's collision pass
    #[default]
    PerShape,
    /// Once, at the end of the tick
    PerTick,
}

impl CounterRefresh {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterRefresh::PerShape => "per_shape",
            CounterRefresh::PerTick => "per_tick",
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,

    // === Initial population ===
    pub hunters: usize,
    pub circles: usize,
    pub squares: usize,

    // === Rendering ===
    /// Alpha of the fade rectangle (0 = endless trails, 1 = no trails)
    pub trail_alpha: f64,

    // === Loop ===
    /// Stop the frame loop once every shape is caught
    pub halt_on_end: bool,
    pub counter_refresh: CounterRefresh,
    /// Tick cap for the headless run
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            hunters: INITIAL_HUNTERS,
            circles: INITIAL_CIRCLES,
            squares: INITIAL_SQUARES,
            trail_alpha: TRAIL_ALPHA,
            halt_on_end: true,
            counter_refresh: CounterRefresh::PerShape,
            max_ticks: 10_000,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "shape_hunt_settings";

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SimError> {
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return Err(SimError::InvalidConfig("trail_alpha must be within [0, 1]"));
        }
        if self.max_ticks == 0 {
            return Err(SimError::InvalidConfig("max_ticks must be non-zero"));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
