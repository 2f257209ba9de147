//! Rendering module
//!
//! The simulation records [`DrawCommand`]s into a [`Frame`]; a [`Surface`]
//! replays them. On the web the surface is a 2D canvas context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::DVec2;

use crate::sim::{Rgb, SimEvent, Viewport};

/// A single drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Translucent black over the whole viewport (motion trails)
    Fade { alpha: f64 },
    /// Filled disc
    FillCircle { center: DVec2, radius: f64, color: Rgb },
    /// Filled axis-aligned square centered on `center`
    FillSquare { center: DVec2, side: f64, color: Rgb },
    /// Circle outline
    StrokeCircle { center: DVec2, radius: f64, color: Rgb },
}

/// Everything one tick produced for the boundary collaborators
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Draw operations in paint order
    pub commands: Vec<DrawCommand>,
    /// Latest value published to the live counter this tick
    pub counter: Option<usize>,
    /// How many times the counter was refreshed this tick
    pub counter_refreshes: u32,
    /// Raised on the tick the last non-hunter was captured
    pub end_visible: bool,
    pub events: Vec<SimEvent>,
}

impl Frame {
    #[inline]
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Reset for reuse without dropping allocations
    pub fn clear(&mut self) {
        self.commands.clear();
        self.counter = None;
        self.counter_refreshes = 0;
        self.end_visible = false;
        self.events.clear();
    }

    /// Paint every recorded command onto `surface`
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        for command in &self.commands {
            match *command {
                DrawCommand::Fade { alpha } => surface.fade(alpha, viewport),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => surface.fill_circle(center, radius, color),
                DrawCommand::FillSquare {
                    center,
                    side,
                    color,
                } => surface.fill_square(center, side, color),
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    color,
                } => surface.stroke_circle(center, radius, color),
            }
        }
    }
}

/// A 2D drawing target
pub trait Surface {
    fn fade(&mut self, alpha: f64, viewport: Viewport);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgb);
    fn fill_square(&mut self, center: DVec2, side: f64, color: Rgb);
    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgb);
}
