#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn tween(from: f64, to: f64, duration_ms: f64, easing: Easing) -> Tween {
    Tween::new(Uuid::new_v4(), Property::Top, from, to, AnimateOptions { duration_ms, easing })
}

// =============================================================
// Easing
// =============================================================

#[test]
fn linear_midpoint_is_half() {
    assert!(approx(Easing::Linear.apply(50.0, 0.0, 10.0, 100.0), 5.0));
}

#[test]
fn ease_out_quad_closed_form() {
    // 1 - (1 - 0.5)^2 = 0.75
    assert!(approx(Easing::EaseOutQuad.apply(0.5, 0.0, 1.0, 1.0), 0.75));
}

#[test]
fn ease_in_out_cubic_closed_form() {
    // Lower half: 4t^3 at t = 0.25 -> 0.0625
    assert!(approx(Easing::EaseInOutCubic.apply(0.25, 0.0, 1.0, 1.0), 0.0625));
    // Symmetric about the midpoint.
    assert!(approx(Easing::EaseInOutCubic.apply(0.5, 0.0, 1.0, 1.0), 0.5));
    assert!(approx(Easing::EaseInOutCubic.apply(0.75, 0.0, 1.0, 1.0), 0.9375));
}

#[test]
fn easings_hit_endpoints() {
    for easing in [Easing::Linear, Easing::EaseOutQuad, Easing::EaseInOutCubic] {
        assert!(approx(easing.apply(0.0, 3.0, 7.0, 10.0), 3.0), "{easing:?} start");
        assert!(approx(easing.apply(10.0, 3.0, 7.0, 10.0), 10.0), "{easing:?} end");
    }
}

#[test]
fn easing_serde_snake_case() {
    assert_eq!(serde_json::to_string(&Easing::EaseOutQuad).unwrap(), "\"ease_out_quad\"");
}

// =============================================================
// Tween sampling
// =============================================================

#[test]
fn sample_at_zero_is_start() {
    let t = tween(1080.0, -50.0, 6000.0, Easing::EaseOutQuad);
    let step = t.sample(0.0);
    assert_eq!(step.value, 1080.0);
    assert!(!step.done);
}

#[test]
fn sample_at_duration_is_end_and_done() {
    let t = tween(1080.0, -50.0, 6000.0, Easing::EaseOutQuad);
    let step = t.sample(6000.0);
    assert_eq!(step.value, -50.0);
    assert!(step.done);
}

#[test]
fn sample_past_duration_clamps() {
    let t = tween(0.0, 360.0, 2000.0, Easing::EaseInOutCubic);
    let step = t.sample(9999.0);
    assert_eq!(step.value, 360.0);
    assert!(step.done);
}

#[test]
fn sample_is_pure() {
    let t = tween(0.0, 10.0, 100.0, Easing::Linear);
    let _ = t.sample(50.0);
    assert_eq!(t.elapsed_ms, 0.0);
}

#[test]
fn zero_duration_finishes_immediately() {
    let t = tween(0.0, 10.0, 0.0, Easing::Linear);
    let step = t.sample(0.0);
    assert_eq!(step.value, 10.0);
    assert!(step.done);
}

#[test]
fn negative_duration_is_clamped_to_zero() {
    let t = tween(0.0, 10.0, -5.0, Easing::Linear);
    assert_eq!(t.duration_ms, 0.0);
}

#[test]
fn advance_accumulates_elapsed() {
    let mut t = tween(0.0, 100.0, 100.0, Easing::Linear);
    assert!(approx(t.advance(25.0).value, 25.0));
    assert!(approx(t.advance(25.0).value, 50.0));
    assert_eq!(t.elapsed_ms, 50.0);
    let last = t.advance(60.0);
    assert!(last.done);
    assert_eq!(last.value, 100.0);
}

#[test]
fn advance_ignores_negative_dt() {
    let mut t = tween(0.0, 100.0, 100.0, Easing::Linear);
    t.advance(-10.0);
    assert_eq!(t.elapsed_ms, 0.0);
}

#[test]
fn rising_particle_moves_monotonically_up() {
    let t = tween(1080.0, -50.0, 6000.0, Easing::EaseOutQuad);
    let mut last = f64::INFINITY;
    for ms in (0..=6000).step_by(300) {
        let v = t.sample(f64::from(ms)).value;
        assert!(v <= last);
        last = v;
    }
}
