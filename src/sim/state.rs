//! Simulation state and core types
//!
//! Everything a tick reads or mutates lives in [`SimState`]: the registry,
//! the viewport, the seeded RNG and the Running/Ended phase.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::random::Rgb;
use super::registry::{ShapeId, ShapeRegistry, SpawnParams};
use super::shape::ShapeKind;
use crate::settings::{CounterRefresh, Settings};

/// Current size of the drawing surface, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// Phase of the simulation. Once ended it never runs again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    Running,
    Ended,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// A shape entered the registry (clicks)
    Spawned { id: ShapeId, kind: ShapeKind },
    /// Two shapes touched and took a shared new color
    Recolored { a: ShapeId, b: ShapeId, color: Rgb },
    /// A hunter caught a shape, which left the registry
    Captured { prey: ShapeId, hunter: ShapeId },
    /// The last non-hunter is gone
    Cleared,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub registry: ShapeRegistry,
    pub viewport: Viewport,
    pub phase: SimPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Value last published to the live counter
    pub displayed_count: usize,
    /// End indicator visibility, set once on Running -> Ended
    pub end_visible: bool,
    /// Stop ticking once ended (otherwise keep animating)
    pub halt_on_end: bool,
    pub counter_refresh: CounterRefresh,
    /// Alpha of the per-tick fade rectangle
    pub trail_alpha: f64,
}

impl SimState {
    /// Empty simulation; nothing is spawned
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_settings(seed, viewport, &Settings::default())
    }

    pub fn with_settings(seed: u64, viewport: Viewport, settings: &Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            registry: ShapeRegistry::new(),
            viewport,
            phase: SimPhase::Running,
            time_ticks: 0,
            displayed_count: 0,
            end_visible: false,
            halt_on_end: settings.halt_on_end,
            counter_refresh: settings.counter_refresh,
            trail_alpha: settings.trail_alpha,
        }
    }

    /// Simulation with the initial population from `settings`
    pub fn seeded(seed: u64, viewport: Viewport, settings: &Settings) -> Self {
        let mut state = Self::with_settings(seed, viewport, settings);
        state.populate(settings.hunters, settings.circles, settings.squares);
        state
    }

    /// Spawn hunters first, then circles, then squares
    pub fn populate(&mut self, hunters: usize, circles: usize, squares: usize) {
        let viewport = self.viewport;
        self.registry
            .spawn_many(ShapeKind::Hunter, hunters, viewport, &mut self.rng);
        self.registry
            .spawn_many(ShapeKind::Circle, circles, viewport, &mut self.rng);
        self.registry
            .spawn_many(ShapeKind::Square, squares, viewport, &mut self.rng);
        self.displayed_count = self.registry.live_count();
        log::info!(
            "Seeded {} hunters, {} circles, {} squares on {}x{}",
            hunters,
            circles,
            squares,
            viewport.width,
            viewport.height
        );
    }

    /// Spawn one shape using the state's RNG and viewport
    pub fn spawn(&mut self, kind: ShapeKind, params: SpawnParams) -> ShapeId {
        let viewport = self.viewport;
        self.registry.spawn(kind, params, viewport, &mut self.rng)
    }

    /// Shapes still to be caught
    #[inline]
    pub fn live_count(&self) -> usize {
        self.registry.live_count()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }

    /// True when the frame loop should stop rescheduling
    pub fn is_halted(&self) -> bool {
        self.phase == SimPhase::Ended && self.halt_on_end
    }
}
