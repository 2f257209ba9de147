//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (one `Pcg32` per run)
//! - Stable iteration order (registry insertion order)
//! - Drawing is recorded as commands, never performed here

pub mod collision;
pub mod random;
pub mod registry;
pub mod shape;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, reflect_at_walls};
pub use random::{Rgb, random_color, random_int};
pub use registry::{ShapeId, ShapeRegistry, SpawnParams, Traversal};
pub use shape::{Shape, ShapeKind};
pub use state::{SimEvent, SimPhase, SimState, Viewport};
pub use tick::{TickInput, click_kind, tick};
