//! Per-frame simulation tick
//!
//! One call advances every shape once, resolves all pairwise contacts and
//! records what the frame should show.

use rand::Rng;

use super::random::{random_color, random_int};
use super::registry::{ShapeId, SpawnParams};
use super::shape::ShapeKind;
use super::state::{SimEvent, SimPhase, SimState, Viewport};
use crate::renderer::{DrawCommand, Frame};
use crate::settings::CounterRefresh;

/// Boundary events delivered between two ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer clicks in canvas coordinates, oldest first
    pub clicks: Vec<(f64, f64)>,
    /// Latest viewport size if the window was resized
    pub resize: Option<Viewport>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty() && self.resize.is_none()
    }

    /// Clear delivered events (called after each tick)
    pub fn clear(&mut self) {
        self.clicks.clear();
        self.resize = None;
    }
}

/// Shape kind for a pointer click: a circle one time in three, else a square
pub fn click_kind<R: Rng + ?Sized>(rng: &mut R) -> ShapeKind {
    if random_int(rng, 0, 2) > 1 {
        ShapeKind::Circle
    } else {
        ShapeKind::Square
    }
}

/// Advance the simulation by one frame, appending output to `frame`
pub fn tick(state: &mut SimState, input: &TickInput, frame: &mut Frame) {
    if state.is_halted() {
        if !input.is_empty() {
            log::debug!(
                "Simulation ended, dropping {} clicks (resize: {})",
                input.clicks.len(),
                input.resize.is_some()
            );
        }
        return;
    }

    apply_input(state, input, frame);

    state.time_ticks += 1;
    frame.push(DrawCommand::Fade {
        alpha: state.trail_alpha,
    });

    let extent = state.viewport.extent();
    // One snapshot serves both loops; ids removed mid-tick miss on lookup
    let ids: Vec<ShapeId> = state.registry.traversal().collect();

    for &a in &ids {
        // Captured earlier in this tick
        let Some(shape) = state.registry.get_mut(a) else {
            continue;
        };
        frame.push(shape.draw());
        shape.update(extent);
        let a_is_hunter = shape.is_hunter();

        for &b in &ids {
            if !state.registry.collides(a, b) {
                continue;
            }
            let b_is_hunter = state.registry.get(b).is_some_and(|s| s.is_hunter());
            if b_is_hunter {
                // Hunters only ever capture prey
                if a_is_hunter {
                    continue;
                }
                capture(state, a, b, frame);
                break;
            }
            scatter(state, a, b, frame);
        }

        if state.counter_refresh == CounterRefresh::PerShape {
            publish_count(state, frame);
        }
    }

    if state.counter_refresh == CounterRefresh::PerTick {
        publish_count(state, frame);
    }

    // Covers a registry that never had any prey to catch
    check_cleared(state, frame);
}

fn apply_input(state: &mut SimState, input: &TickInput, frame: &mut Frame) {
    if let Some(viewport) = input.resize {
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        state.viewport = viewport;
    }

    for &(x, y) in &input.clicks {
        let kind = click_kind(&mut state.rng);
        let id = state.spawn(kind, SpawnParams::at(x, y));
        frame.events.push(SimEvent::Spawned { id, kind });
    }
}

/// Non-lethal contact: shared new color, both scatter
fn scatter(state: &mut SimState, a: ShapeId, b: ShapeId, frame: &mut Frame) {
    let color = random_color(&mut state.rng);
    for id in [a, b] {
        if let Some(shape) = state.registry.get_mut(id) {
            shape.color = color;
            shape.bounce(&mut state.rng);
        }
    }
    frame.events.push(SimEvent::Recolored { a, b, color });
}

/// Lethal contact: `prey` leaves the registry
fn capture(state: &mut SimState, prey: ShapeId, hunter: ShapeId, frame: &mut Frame) {
    if state.registry.remove(prey).is_none() {
        return;
    }
    log::debug!(
        "Shape captured, {} left (tick {})",
        state.registry.live_count(),
        state.time_ticks
    );
    frame.events.push(SimEvent::Captured { prey, hunter });
    check_cleared(state, frame);
}

fn check_cleared(state: &mut SimState, frame: &mut Frame) {
    if state.phase != SimPhase::Running || state.registry.live_count() != 0 {
        return;
    }
    state.phase = SimPhase::Ended;
    state.end_visible = true;
    frame.end_visible = true;
    frame.events.push(SimEvent::Cleared);
    log::info!("All shapes captured after {} ticks", state.time_ticks);
}

fn publish_count(state: &mut SimState, frame: &mut Frame) {
    let live = state.registry.live_count();
    state.displayed_count = live;
    frame.counter = Some(live);
    frame.counter_refreshes += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::random::Rgb;
    use glam::DVec2;

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    fn still(x: f64, y: f64, size: f64) -> SpawnParams {
        SpawnParams {
            x: Some(x),
            y: Some(y),
            size: Some(size),
            vel_x: Some(0.0),
            vel_y: Some(0.0),
            color: Some(Rgb::new(100, 100, 100)),
        }
    }

    #[test]
    fn test_hunter_captures_circle() {
        let mut state = SimState::new(1, VIEW);
        let circle = state.spawn(
            ShapeKind::Circle,
            SpawnParams {
                vel_x: Some(5.0),
                vel_y: Some(5.0),
                ..still(100.0, 100.0, 10.0)
            },
        );
        state.spawn(ShapeKind::Hunter, still(104.0, 100.0, 50.0));

        let mut frame = Frame::default();
        tick(&mut state, &TickInput::default(), &mut frame);

        assert!(state.registry.get(circle).is_none());
        assert_eq!(state.registry.count(), 1);
        assert_eq!(state.live_count(), 0);
        assert_eq!(state.phase, SimPhase::Ended);
        assert!(state.end_visible);
        assert!(frame.end_visible);
        assert!(frame.events.contains(&SimEvent::Cleared));
        assert_eq!(frame.counter, Some(0));
    }

    #[test]
    fn test_circles_share_new_color() {
        let mut state = SimState::new(2, VIEW);
        let a = state.spawn(ShapeKind::Circle, still(50.0, 50.0, 10.0));
        let b = state.spawn(ShapeKind::Circle, still(55.0, 50.0, 10.0));

        let mut frame = Frame::default();
        tick(&mut state, &TickInput::default(), &mut frame);

        let sa = state.registry.get(a).expect("a survives");
        let sb = state.registry.get(b).expect("b survives");
        assert_eq!(sa.color, sb.color);
        assert_eq!(state.registry.count(), 2);
        assert_eq!(state.phase, SimPhase::Running);
        assert!(
            frame
                .events
                .iter()
                .any(|e| matches!(e, SimEvent::Recolored { .. }))
        );
    }

    #[test]
    fn test_overlapping_hunters_both_survive() {
        let mut state = SimState::new(12, VIEW);
        state.spawn(ShapeKind::Hunter, still(300.0, 300.0, 40.0));
        state.spawn(ShapeKind::Hunter, still(302.0, 300.0, 40.0));
        state.spawn(ShapeKind::Circle, still(700.0, 500.0, 10.0));

        let mut frame = Frame::default();
        tick(&mut state, &TickInput::default(), &mut frame);
        assert_eq!(state.registry.count(), 3);
        assert_eq!(state.registry.hunter_count(), 2);
        assert_eq!(state.phase, SimPhase::Running);
    }

    #[test]
    fn test_only_hunters_ends_immediately() {
        let mut state = SimState::seeded(
            3,
            VIEW,
            &Settings {
                circles: 0,
                squares: 0,
                ..Settings::default()
            },
        );
        assert_eq!(state.registry.count(), 5);
        assert_eq!(state.live_count(), 0);

        let mut frame = Frame::default();
        tick(&mut state, &TickInput::default(), &mut frame);
        assert_eq!(state.phase, SimPhase::Ended);
        assert!(frame.end_visible);
    }

    #[test]
    fn test_end_signal_fires_once_and_halts() {
        let mut state = SimState::new(4, VIEW);
        state.spawn(ShapeKind::Hunter, still(100.0, 100.0, 50.0));
        state.spawn(ShapeKind::Circle, still(102.0, 100.0, 10.0));

        let mut frame = Frame::default();
        tick(&mut state, &TickInput::default(), &mut frame);
        assert!(state.is_halted());
        let ticks = state.time_ticks;

        // Halted: further ticks and input are ignored
        let mut frame = Frame::default();
        let input = TickInput {
            clicks: vec![(300.0, 300.0)],
            resize: None,
        };
        tick(&mut state, &input, &mut frame);
        assert_eq!(state.time_ticks, ticks);
        assert!(frame.commands.is_empty());
        assert_eq!(state.registry.count(), 1);
    }

    #[test]
    fn test_keeps_running_after_end_without_halt() {
        let mut state = SimState::new(5, VIEW);
        state.halt_on_end = false;
        state.spawn(ShapeKind::Hunter, still(100.0, 100.0, 50.0));
        state.spawn(ShapeKind::Circle, still(102.0, 100.0, 10.0));

        let mut frame = Frame::default();
        tick(&mut state, &TickInput::default(), &mut frame);
        assert_eq!(state.phase, SimPhase::Ended);

        let input = TickInput {
            clicks: vec![(500.0, 400.0)],
            resize: None,
        };
        let mut frame = Frame::default();
        tick(&mut state, &input, &mut frame);
        assert_eq!(state.time_ticks, 2);
        assert_eq!(state.live_count(), 1);
        // The end indicator is never raised twice
        assert!(!frame.end_visible);
        assert!(!frame.events.contains(&SimEvent::Cleared));
        assert!(state.end_visible);
    }

    #[test]
    fn test_draw_order_and_counter_refreshes() {
        let mut state = SimState::seeded(6, VIEW, &Settings::default());
        let before = state.registry.count();

        let mut frame = Frame::default();
        tick(&mut state, &TickInput::default(), &mut frame);

        assert!(matches!(frame.commands[0], DrawCommand::Fade { alpha } if alpha == 0.25));
        // Only the shape being processed can be captured, and it has already drawn
        let draws = frame.commands.len() - 1;
        assert_eq!(draws, before);
        assert_eq!(frame.counter_refreshes as usize, draws);
        assert_eq!(frame.counter, Some(state.live_count()));
    }

    #[test]
    fn test_per_tick_counter_refresh() {
        let settings = Settings {
            counter_refresh: CounterRefresh::PerTick,
            ..Settings::default()
        };
        let mut state = SimState::seeded(7, VIEW, &settings);
        let mut frame = Frame::default();
        tick(&mut state, &TickInput::default(), &mut frame);
        assert_eq!(frame.counter_refreshes, 1);
        assert_eq!(frame.counter, Some(state.live_count()));
    }

    #[test]
    fn test_draw_uses_position_before_update() {
        let mut state = SimState::new(8, VIEW);
        state.spawn(
            ShapeKind::Square,
            SpawnParams {
                vel_x: Some(3.0),
                ..still(200.0, 200.0, 10.0)
            },
        );
        // Keep the run alive: the hunter is far away
        state.spawn(ShapeKind::Hunter, still(700.0, 500.0, 20.0));

        let mut frame = Frame::default();
        tick(&mut state, &TickInput::default(), &mut frame);
        assert!(matches!(
            frame.commands[1],
            DrawCommand::FillSquare { center, .. } if center == DVec2::new(200.0, 200.0)
        ));
    }

    #[test]
    fn test_clicks_spawn_and_resize_applies() {
        let mut state = SimState::new(9, VIEW);
        state.spawn(ShapeKind::Hunter, still(10.0, 10.0, 20.0));
        let input = TickInput {
            clicks: vec![(400.0, 300.0), (600.0, 100.0)],
            resize: Some(Viewport::new(1024.0, 768.0)),
        };
        let mut frame = Frame::default();
        tick(&mut state, &input, &mut frame);

        assert_eq!(state.viewport, Viewport::new(1024.0, 768.0));
        assert_eq!(state.live_count(), 2);
        let spawned: Vec<_> = frame
            .events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Spawned { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 2);
        assert!(spawned.iter().all(|k| *k != ShapeKind::Hunter));
    }

    #[test]
    fn test_click_kind_mix() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(10);
        let circles = (0..3000)
            .filter(|_| click_kind(&mut rng) == ShapeKind::Circle)
            .count();
        // Roughly one in three
        assert!((800..1200).contains(&circles), "circles = {circles}");
    }

    #[test]
    fn test_hunters_stay_put_and_count_never_grows() {
        let mut state = SimState::seeded(11, VIEW, &Settings::default());
        let hunters: Vec<_> = state
            .registry
            .iter()
            .filter(|(_, s)| s.is_hunter())
            .map(|(id, s)| (id, s.pos))
            .collect();

        let mut last_live = state.live_count();
        for _ in 0..500 {
            let mut frame = Frame::default();
            tick(&mut state, &TickInput::default(), &mut frame);
            assert!(state.live_count() <= last_live);
            last_live = state.live_count();
            if state.is_halted() {
                break;
            }
        }

        assert_eq!(state.registry.hunter_count(), 5);
        for (id, pos) in hunters {
            let hunter = state.registry.get(id).expect("hunters are never removed");
            assert_eq!(hunter.pos, pos);
            assert_eq!(hunter.vel, DVec2::ZERO);
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = SimState::seeded(99999, VIEW, &Settings::default());
        let mut state2 = SimState::seeded(99999, VIEW, &Settings::default());

        let inputs = [
            TickInput::default(),
            TickInput {
                clicks: vec![(120.0, 80.0)],
                ..Default::default()
            },
            TickInput {
                resize: Some(Viewport::new(700.0, 500.0)),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for input in &inputs {
            tick(&mut state1, input, &mut Frame::default());
            tick(&mut state2, input, &mut Frame::default());
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.registry.count(), state2.registry.count());
        let a: Vec<_> = state1.registry.iter().map(|(_, s)| s.clone()).collect();
        let b: Vec<_> = state2.registry.iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(a, b);
    }
}
