//! Movable, drawable shapes and their per-kind behavior

use glam::DVec2;
use rand::Rng;
use serde::Serialize;

use super::collision::{circles_overlap, reflect_at_walls};
use super::random::{Rgb, random_int};
use crate::consts::{HUNTER_COLLISION_DIVISOR, VEL_MAX, VEL_MIN};
use crate::renderer::DrawCommand;

/// Shape variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Filled disc, collides at its full radius
    Circle,
    /// Filled square, collides at half its diagonal
    Square,
    /// Stationary stroked circle that captures non-hunters on contact
    Hunter,
}

impl ShapeKind {
    /// Collision radius derived from the nominal size
    pub fn collision_radius(&self, size: f64) -> f64 {
        match self {
            ShapeKind::Circle => size,
            ShapeKind::Square => size * std::f64::consts::SQRT_2 / 2.0,
            ShapeKind::Hunter => size / HUNTER_COLLISION_DIVISOR,
        }
    }
}

/// A shape entity
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Center in canvas space
    pub pos: DVec2,
    /// Displacement per tick (always zero for hunters)
    pub vel: DVec2,
    /// Nominal radius / edge used for drawing and wall reflection
    pub size: f64,
    /// Contact distance, independent of `size`
    pub collision_radius: f64,
    pub color: Rgb,
}

impl Shape {
    pub fn circle(pos: DVec2, size: f64, vel: DVec2, color: Rgb) -> Self {
        Self::with_kind(ShapeKind::Circle, pos, size, vel, color)
    }

    pub fn square(pos: DVec2, size: f64, vel: DVec2, color: Rgb) -> Self {
        Self::with_kind(ShapeKind::Square, pos, size, vel, color)
    }

    /// Hunters never move and are always born white
    pub fn hunter(pos: DVec2, size: f64) -> Self {
        Self::with_kind(ShapeKind::Hunter, pos, size, DVec2::ZERO, Rgb::WHITE)
    }

    fn with_kind(kind: ShapeKind, pos: DVec2, size: f64, vel: DVec2, color: Rgb) -> Self {
        Self {
            kind,
            pos,
            vel,
            size,
            collision_radius: kind.collision_radius(size),
            color,
        }
    }

    #[inline]
    pub fn is_hunter(&self) -> bool {
        self.kind == ShapeKind::Hunter
    }

    /// Reflect off the viewport walls, then advance by one velocity step.
    /// Hunters stay put.
    pub fn update(&mut self, extent: DVec2) {
        if self.is_hunter() {
            return;
        }
        self.vel = reflect_at_walls(self.pos, self.vel, self.size / 2.0, extent);
        self.pos += self.vel;
    }

    /// Collision-circle overlap, ignoring identity
    pub fn overlaps(&self, other: &Shape) -> bool {
        circles_overlap(self.pos, self.collision_radius, other.pos, other.collision_radius)
    }

    /// Overlap with a distinct instance; a shape never collides with itself
    pub fn collides_with(&self, other: &Shape) -> bool {
        !std::ptr::eq(self, other) && self.overlaps(other)
    }

    /// Scatter in a random direction after a collision. No-op for hunters.
    pub fn bounce<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.is_hunter() {
            return;
        }
        self.vel = DVec2::new(
            random_int(rng, VEL_MIN, VEL_MAX) as f64,
            random_int(rng, VEL_MIN, VEL_MAX) as f64,
        );
    }

    /// Draw command for the current position and color
    pub fn draw(&self) -> DrawCommand {
        match self.kind {
            ShapeKind::Circle => DrawCommand::FillCircle {
                center: self.pos,
                radius: self.size,
                color: self.color,
            },
            ShapeKind::Square => DrawCommand::FillSquare {
                center: self.pos,
                side: self.size,
                color: self.color,
            },
            ShapeKind::Hunter => DrawCommand::StrokeCircle {
                center: self.pos,
                radius: self.size,
                color: self.color,
            },
        }
    }
}
