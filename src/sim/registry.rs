//! Ordered registry of live shapes with stable handles
//!
//! Shapes live in a generational slot map so a handle taken before a removal
//! can never alias a shape spawned afterwards. A separate id list keeps
//! insertion order for traversal; removal leaves a stale id behind that is
//! swept out once stale ids make up half the list.

use glam::DVec2;
use rand::Rng;
use slotmap::{SlotMap, new_key_type};

use super::random::{Rgb, random_color, random_int};
use super::shape::{Shape, ShapeKind};
use super::state::Viewport;
use crate::consts::{SIZE_MAX, SIZE_MIN, SPAWN_EDGE_FACTOR, VEL_MAX, VEL_MIN};

new_key_type! {
    /// Stable identity of a shape in the registry.
    pub struct ShapeId;
}

/// Optional spawn parameters; `None` fields are drawn at random
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnParams {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub size: Option<f64>,
    pub vel_x: Option<f64>,
    pub vel_y: Option<f64>,
    pub color: Option<Rgb>,
}

impl SpawnParams {
    /// Spawn at a fixed point, everything else random (pointer clicks)
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }
}

/// Snapshot traversal over the ids that were live when it was created.
///
/// Entries removed after the snapshot are still yielded; callers look them
/// up with [`ShapeRegistry::get`] and skip the ones that are gone.
#[derive(Debug, Clone)]
pub struct Traversal {
    ids: std::vec::IntoIter<ShapeId>,
}

impl Iterator for Traversal {
    type Item = ShapeId;

    fn next(&mut self) -> Option<ShapeId> {
        self.ids.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Traversal {}

/// Exclusive owner of every live shape
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    shapes: SlotMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    /// Removed ids still present in `order`
    stale: usize,
    hunters_created: usize,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one shape, filling unset parameters with random defaults.
    ///
    /// Default positions keep `2 * size` away from every viewport edge.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        kind: ShapeKind,
        params: SpawnParams,
        viewport: Viewport,
        rng: &mut R,
    ) -> ShapeId {
        let size = params
            .size
            .unwrap_or_else(|| random_int(rng, SIZE_MIN, SIZE_MAX) as f64);
        let vel_x = params
            .vel_x
            .unwrap_or_else(|| random_int(rng, VEL_MIN, VEL_MAX) as f64);
        let vel_y = params
            .vel_y
            .unwrap_or_else(|| random_int(rng, VEL_MIN, VEL_MAX) as f64);
        let color = params.color.unwrap_or_else(|| random_color(rng));

        let margin = SPAWN_EDGE_FACTOR * size;
        let x = params
            .x
            .unwrap_or_else(|| random_int(rng, margin as i32, (viewport.width - margin) as i32) as f64);
        let y = params
            .y
            .unwrap_or_else(|| random_int(rng, margin as i32, (viewport.height - margin) as i32) as f64);

        let pos = DVec2::new(x, y);
        let vel = DVec2::new(vel_x, vel_y);
        let shape = match kind {
            ShapeKind::Circle => Shape::circle(pos, size, vel, color),
            ShapeKind::Square => Shape::square(pos, size, vel, color),
            ShapeKind::Hunter => Shape::hunter(pos, size),
        };
        self.insert(shape)
    }

    /// Spawn `n` shapes of one kind with all-default parameters
    pub fn spawn_many<R: Rng + ?Sized>(
        &mut self,
        kind: ShapeKind,
        n: usize,
        viewport: Viewport,
        rng: &mut R,
    ) {
        for _ in 0..n {
            self.spawn(kind, SpawnParams::default(), viewport, rng);
        }
    }

    /// Append an already-built shape
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        if shape.is_hunter() {
            self.hunters_created += 1;
        }
        let id = self.shapes.insert(shape);
        self.order.push(id);
        id
    }

    /// Remove by identity. Absent ids leave the registry untouched.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let shape = self.shapes.remove(id)?;
        self.stale += 1;
        if self.stale * 2 > self.order.len() {
            self.compact();
        }
        Some(shape)
    }

    fn compact(&mut self) {
        let shapes = &self.shapes;
        self.order.retain(|&id| shapes.contains_key(id));
        self.stale = 0;
    }

    /// Number of live shapes, hunters included
    #[inline]
    pub fn count(&self) -> usize {
        self.shapes.len()
    }

    /// Number of hunters ever constructed (never decremented)
    #[inline]
    pub fn hunter_count(&self) -> usize {
        self.hunters_created
    }

    /// Shapes still in play, i.e. the number shown on the live counter
    #[inline]
    pub fn live_count(&self) -> usize {
        self.count().saturating_sub(self.hunters_created)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    /// Fresh snapshot traversal in insertion order
    pub fn traversal(&self) -> Traversal {
        let ids: Vec<ShapeId> = self
            .order
            .iter()
            .copied()
            .filter(|&id| self.shapes.contains_key(id))
            .collect();
        Traversal {
            ids: ids.into_iter(),
        }
    }

    /// Borrowing iterator over live shapes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.shapes.get(id).map(|shape| (id, shape)))
    }

    /// Collision between two live registry entries
    pub fn collides(&self, a: ShapeId, b: ShapeId) -> bool {
        match (self.shapes.get(a), self.shapes.get(b)) {
            (Some(sa), Some(sb)) => a != b && sa.collides_with(sb),
            _ => false,
        }
    }
}
