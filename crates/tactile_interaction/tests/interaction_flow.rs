//! Integration tests for the interaction engine
//!
//! These exercise the full per-frame pipeline the way a host view layer
//! drives it: insert sessions, feed pointer events, tick until the engine
//! reports no more motion, read transforms.

use tactile_core::clock::{FrameClock, ManualClock};
use tactile_core::events::InputEvent;
use tactile_core::geometry::{Rect, Vec3};
use tactile_interaction::{InteractionEngine, SessionError, SessionOptions};
use tactile_physics::config::{InteractionKind, MotionOverrides, SensitivityLevel};
use tactile_physics::field::{LinkMode, SnapPoint};

const DT: f32 = 1.0 / 60.0;

fn magnetic_options(bounds: Rect) -> SessionOptions {
    SessionOptions::new(bounds).overrides(
        MotionOverrides::new()
            .kind(InteractionKind::Magnetic)
            .radius(150.0)
            .strength(1.0)
            .max_displacement(40.0),
    )
}

/// Tick until the engine reports rest, with a safety bound
fn run_to_rest(engine: &mut InteractionEngine) -> usize {
    for tick in 0..4000 {
        if !engine.tick(DT) {
            return tick;
        }
    }
    panic!("engine never settled");
}

#[test]
fn full_interaction_lifecycle() {
    let mut engine = InteractionEngine::new();
    let button = engine.insert(magnetic_options(Rect::new(100.0, 50.0, 100.0, 100.0)));

    // Nothing to animate yet
    assert!(!engine.tick(DT));
    assert!(!engine.is_animating(button));

    engine.handle_event(button, &InputEvent::PointerEnter { x: 200.0, y: 100.0 });
    assert!(engine.is_animating(button));

    for _ in 0..300 {
        engine.tick(DT);
    }
    let transform = engine.transform(button).unwrap();
    assert!(transform.translate_x > 15.0 && transform.translate_x <= 40.0);
    assert!(transform.translate_y.abs() < 0.05);

    let state = engine.physics_state(button).unwrap();
    assert!(state.active);
    assert_eq!(state.distance, 50.0);

    engine.handle_event(button, &InputEvent::PointerLeave);
    run_to_rest(&mut engine);
    let rest = engine.transform(button).unwrap();
    assert!(rest.translate_x.abs() < 0.05);
    assert!(!engine.is_animating(button));
}

#[test]
fn pointer_move_retargets_while_active() {
    let mut engine = InteractionEngine::new();
    let card = engine.insert(magnetic_options(Rect::new(100.0, 50.0, 100.0, 100.0)));

    engine.handle_event(card, &InputEvent::PointerEnter { x: 200.0, y: 100.0 });
    for _ in 0..300 {
        engine.tick(DT);
    }
    let right = engine.transform(card).unwrap().translate_x;
    assert!(right > 0.0);

    // Pointer crosses to the other side of the element
    engine.handle_event(card, &InputEvent::PointerMove { x: 100.0, y: 100.0 });
    for _ in 0..300 {
        engine.tick(DT);
    }
    let left = engine.transform(card).unwrap().translate_x;
    assert!(left < 0.0, "target did not follow the pointer: {left}");
}

#[test]
fn detached_session_operations_are_no_ops() {
    let mut engine = InteractionEngine::new();
    let ghost = engine.insert(magnetic_options(Rect::new(0.0, 0.0, 40.0, 40.0)));
    engine.handle_event(ghost, &InputEvent::PointerEnter { x: 20.0, y: 20.0 });
    engine.tick(DT);

    engine.remove(ghost);
    assert!(!engine.contains(ghost));

    // The dangling handle touches nothing and panics nowhere
    engine.handle_event(ghost, &InputEvent::PointerMove { x: 25.0, y: 20.0 });
    engine.reset(ghost);
    engine.set_position(ghost, Vec3::new(5.0, 5.0, 0.0));
    assert_eq!(engine.transform(ghost), None);
    assert!(!engine.is_animating(ghost));
    assert!(!engine.tick(DT));
}

#[test]
fn linked_sessions_attract_through_published_targets() {
    let mut engine = InteractionEngine::new();
    // A centered at (0,0), B centered at (110,0)
    let a = engine.insert(magnetic_options(Rect::new(-50.0, -50.0, 100.0, 100.0)));
    let b = engine.insert(magnetic_options(Rect::new(60.0, -50.0, 100.0, 100.0)));
    engine
        .link(a, b, 0.5, LinkMode::Attract, 200.0)
        .expect("link failed");

    // Activate A with the pointer dead center: its own field contributes
    // nothing, so any displacement comes from the coupling
    engine.handle_event(a, &InputEvent::PointerEnter { x: 0.0, y: 0.0 });
    for _ in 0..300 {
        engine.tick(DT);
    }
    let pulled = engine.transform(a).unwrap().translate_x;
    assert!(pulled > 5.0, "no coupling pull, x = {pulled}");

    // Removing the peer degrades to "no coupling force", not a crash
    engine.remove(b);
    for _ in 0..600 {
        engine.tick(DT);
    }
    let released = engine.transform(a).unwrap().translate_x;
    assert!(released.abs() < 1.0, "coupling survived peer removal: {released}");
}

#[test]
fn link_validation() {
    let mut engine = InteractionEngine::new();
    let a = engine.insert(magnetic_options(Rect::new(0.0, 0.0, 40.0, 40.0)));
    let b = engine.insert(magnetic_options(Rect::new(100.0, 0.0, 40.0, 40.0)));

    assert_eq!(engine.link(a, a, 1.0, LinkMode::Attract, 100.0), Err(SessionError::SelfLink));

    engine.remove(b);
    assert_eq!(
        engine.link(a, b, 1.0, LinkMode::Attract, 100.0),
        Err(SessionError::UnknownPeer)
    );
    assert_eq!(
        engine.link(b, a, 1.0, LinkMode::Attract, 100.0),
        Err(SessionError::UnknownSession)
    );
}

#[test]
fn snap_points_capture_the_target() {
    let mut engine = InteractionEngine::new();
    let tab = engine.insert(
        magnetic_options(Rect::new(100.0, 50.0, 100.0, 100.0))
            .snap_points(vec![SnapPoint::new(40.0, 0.0)]),
    );

    // Computed target (~33.3, 0) lands within the snap threshold of (40, 0)
    engine.handle_event(tab, &InputEvent::PointerEnter { x: 200.0, y: 100.0 });
    for _ in 0..400 {
        engine.tick(DT);
    }
    let transform = engine.transform(tab).unwrap();
    assert!((transform.translate_x - 40.0).abs() < 0.05);
}

#[test]
fn sensitivity_rescales_a_live_session() {
    let mut engine = InteractionEngine::new();
    let bounds = Rect::new(100.0, 50.0, 100.0, 100.0);
    // Strength high enough that the clamp is what determines steady state
    let options = SessionOptions::new(bounds).overrides(
        MotionOverrides::new()
            .kind(InteractionKind::Magnetic)
            .radius(150.0)
            .strength(5.0)
            .max_displacement(40.0),
    );
    let low = engine.insert(options.clone().sensitivity(SensitivityLevel::Low));
    let high = engine.insert(options.sensitivity(SensitivityLevel::High));

    for id in [low, high] {
        engine.handle_event(id, &InputEvent::PointerEnter { x: 280.0, y: 100.0 });
    }
    for _ in 0..600 {
        engine.tick(DT);
    }

    let low_x = engine.transform(low).unwrap().translate_x;
    let high_x = engine.transform(high).unwrap().translate_x;
    let ratio = high_x / low_x;
    assert!((ratio - 3.0).abs() < 0.02, "expected 3x, got {ratio}");
}

#[test]
fn disabled_and_reduced_motion_paths() {
    let mut engine = InteractionEngine::new();
    let frozen = engine.insert(magnetic_options(Rect::new(100.0, 50.0, 100.0, 100.0)));

    engine.handle_event(frozen, &InputEvent::PointerEnter { x: 200.0, y: 100.0 });
    for _ in 0..30 {
        engine.tick(DT);
    }
    engine.set_disabled(frozen, true);
    assert!(!engine.is_animating(frozen));
    assert_eq!(engine.transform(frozen).unwrap().translate_x, 0.0);

    // Re-enabled, reduced motion: runs, but barely moves
    engine.set_disabled(frozen, false);
    engine.set_reduced_motion(frozen, true);
    engine.handle_event(frozen, &InputEvent::PointerEnter { x: 200.0, y: 100.0 });
    for _ in 0..300 {
        engine.tick(DT);
    }
    let transform = engine.transform(frozen).unwrap();
    assert!(transform.translate_x > 0.0);
    assert!(transform.translate_x <= 2.0 + 1e-3); // 40px clamp × 0.05
    assert_eq!(transform.rotate_z, 0.0);
    assert_eq!(transform.scale, 1.0);
}

#[test]
fn imperative_controls_are_documented_no_ops() {
    let mut engine = InteractionEngine::new();
    let id = engine.insert(magnetic_options(Rect::new(0.0, 0.0, 40.0, 40.0)));

    // Declared but unwired: warn and leave state untouched
    let before = *engine.physics_state(id).unwrap();
    engine.apply_force(id, Vec3::new(100.0, 0.0, 0.0));
    engine.apply_impulse(id, Vec3::new(100.0, 0.0, 0.0));
    engine.toggle_pause(id);
    assert_eq!(before, *engine.physics_state(id).unwrap());
}

#[test]
fn manual_clock_drives_the_engine_deterministically() {
    // The host loop: read dt from a clock, feed it to tick. A ManualClock
    // stands in for the real frame callback so settling is reproducible.
    let mut clock = ManualClock::new();
    let mut engine = InteractionEngine::new();
    let id = engine.insert(magnetic_options(Rect::new(100.0, 50.0, 100.0, 100.0)));

    engine.handle_event(id, &InputEvent::PointerEnter { x: 200.0, y: 100.0 });

    let mut last_ms = clock.now_ms();
    for _ in 0..300 {
        clock.advance(16.0);
        let dt = clock.delta_secs(last_ms, 0.032);
        last_ms = clock.now_ms();
        engine.tick(dt);
    }
    assert!(engine.transform(id).unwrap().translate_x > 15.0);

    // A long stall (background tab) is clamped, never integrated raw
    clock.advance(5_000.0);
    let dt = clock.delta_secs(last_ms, 0.032);
    assert_eq!(dt, 0.032);
    engine.tick(dt);
    assert!(engine.transform(id).unwrap().translate_x.is_finite());
}

#[test]
fn reset_returns_session_to_zero_state() {
    let mut engine = InteractionEngine::new();
    let id = engine.insert(magnetic_options(Rect::new(100.0, 50.0, 100.0, 100.0)));
    engine.handle_event(id, &InputEvent::PointerEnter { x: 200.0, y: 100.0 });
    for _ in 0..60 {
        engine.tick(DT);
    }
    assert!(engine.transform(id).unwrap().translate_x > 0.0);

    engine.reset(id);
    let once = *engine.physics_state(id).unwrap();
    engine.reset(id);
    assert_eq!(once, *engine.physics_state(id).unwrap());
    assert_eq!(once.x, 0.0);
    assert!(!engine.is_animating(id));
}
