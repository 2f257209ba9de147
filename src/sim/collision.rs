//! Collision tests for shapes in a rectangular viewport
//!
//! Two kinds of contact matter here: a shape's leading edge touching a
//! viewport wall (reflect the velocity) and two shapes' collision circles
//! overlapping (trigger a recolor or a capture).

use glam::DVec2;

/// Reflect velocity components whose leading edge touches a wall.
///
/// The edge is `pos ± half_extent` on each axis, tested against `0` and the
/// viewport extent. Reflection is a plain sign flip with no overshoot
/// correction, so a shape may render partly off-canvas for a frame.
pub fn reflect_at_walls(pos: DVec2, vel: DVec2, half_extent: f64, extent: DVec2) -> DVec2 {
    let mut vel = vel;

    if pos.x + half_extent >= extent.x {
        vel.x = -vel.x;
    }
    if pos.x - half_extent <= 0.0 {
        vel.x = -vel.x;
    }
    if pos.y + half_extent >= extent.y {
        vel.y = -vel.y;
    }
    if pos.y - half_extent <= 0.0 {
        vel.y = -vel.y;
    }

    vel
}

/// True when two collision circles overlap (strictly closer than the sum of radii)
#[inline]
pub fn circles_overlap(a: DVec2, a_radius: f64, b: DVec2, b_radius: f64) -> bool {
    a.distance(b) < a_radius + b_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reflect_right_wall() {
        let extent = DVec2::new(800.0, 600.0);
        let vel = reflect_at_walls(DVec2::new(795.0, 300.0), DVec2::new(5.0, 0.0), 10.0, extent);
        assert_eq!(vel, DVec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_reflect_top_left_corner() {
        let extent = DVec2::new(800.0, 600.0);
        let vel = reflect_at_walls(DVec2::new(3.0, 2.0), DVec2::new(-4.0, -6.0), 5.0, extent);
        assert_eq!(vel, DVec2::new(4.0, 6.0));
    }

    #[test]
    fn test_no_reflection_in_open_space() {
        let extent = DVec2::new(800.0, 600.0);
        let vel = DVec2::new(3.0, -2.0);
        assert_eq!(reflect_at_walls(DVec2::new(400.0, 300.0), vel, 10.0, extent), vel);
    }

    #[test]
    fn test_edge_contact_counts_as_hit() {
        // Leading edge exactly on the wall reflects (>=)
        let extent = DVec2::new(100.0, 100.0);
        let vel = reflect_at_walls(DVec2::new(95.0, 50.0), DVec2::new(1.0, 0.0), 5.0, extent);
        assert_eq!(vel.x, -1.0);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = DVec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 10.0, DVec2::new(19.9, 0.0), 10.0));
        assert!(!circles_overlap(a, 10.0, DVec2::new(20.0, 0.0), 10.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -1000.0f64..1000.0, ay in -1000.0f64..1000.0,
            bx in -1000.0f64..1000.0, by in -1000.0f64..1000.0,
            ar in 0.1f64..50.0, br in 0.1f64..50.0,
        ) {
            let a = DVec2::new(ax, ay);
            let b = DVec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ar, b, br), circles_overlap(b, br, a, ar));
        }
    }
}
