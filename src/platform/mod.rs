//! Platform abstraction layer
//!
//! Browser glue for the simulation's boundary collaborators:
//! - Viewport size (window inner size, canvas resize)
//! - Live counter text
//! - End-of-game indicator

#[cfg(target_arch = "wasm32")]
pub mod web;
