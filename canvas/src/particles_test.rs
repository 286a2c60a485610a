#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;
use crate::doc::Shape;
use crate::surface::SceneSurface;

fn setup() -> (ParticleAnimator, SceneSurface, SmallRng) {
    (ParticleAnimator::default(), SceneSurface::new(1920.0, 1080.0), SmallRng::seed_from_u64(7))
}

// =============================================================
// Capacity
// =============================================================

#[test]
fn buffer_grows_until_capacity() {
    let (mut anim, mut surface, mut rng) = setup();
    for n in 1..=12 {
        assert!(anim.tick(&mut surface, &mut rng).evicted.is_none());
        assert_eq!(anim.len(), n);
        assert_eq!(surface.objects().len(), n);
    }
}

#[test]
fn buffer_stays_at_capacity_and_evicts_oldest_in_order() {
    let (mut anim, mut surface, mut rng) = setup();
    let mut spawned = Vec::new();
    for _ in 0..12 {
        spawned.push(anim.tick(&mut surface, &mut rng).id);
    }

    for n in 13..=30 {
        let spawn = anim.tick(&mut surface, &mut rng);
        spawned.push(spawn.id);
        assert_eq!(anim.len(), 12);
        assert_eq!(surface.objects().len(), 12);

        // The oldest at this point is the (n - 12)th spawn (1-based).
        let evicted = spawned[n - 13];
        assert_eq!(spawn.evicted, Some(evicted));
        assert!(surface.object(&evicted).is_none(), "spawn {n} should evict {evicted}");
        let expected: Vec<_> = spawned[n - 12..n].to_vec();
        assert_eq!(anim.live().copied().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn eviction_leaves_other_objects_alone() {
    let (mut anim, mut surface, mut rng) = setup();
    let rect = surface.add(SceneObject::rect(0.0, 0.0, 10.0, 10.0));
    for _ in 0..20 {
        anim.tick(&mut surface, &mut rng);
    }
    assert!(surface.object(&rect).is_some());
    assert_eq!(surface.objects().len(), 13);
}

#[test]
fn zero_capacity_is_raised_to_one() {
    let mut anim = ParticleAnimator::new(0, 6000.0, EvictionPolicy::Capacity);
    let mut surface = SceneSurface::new(100.0, 100.0);
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(anim.capacity(), 1);
    anim.tick(&mut surface, &mut rng);
    anim.tick(&mut surface, &mut rng);
    assert_eq!(anim.len(), 1);
    assert_eq!(surface.objects().len(), 1);
}

// =============================================================
// Spawned particle
// =============================================================

#[test]
fn particle_starts_below_viewport_with_offset_x() {
    let (mut anim, mut surface, mut rng) = setup();
    let id = anim.tick(&mut surface, &mut rng).id;
    let obj = surface.object(&id).unwrap();
    assert_eq!(obj.top, 1080.0);
    assert!(obj.left >= 200.0 && obj.left < 1920.0 + 200.0);
    assert!(!obj.selectable);
    match &obj.shape {
        Shape::Text { text, font_size, .. } => {
            assert_eq!(text, "\u{1f9e1}");
            assert_eq!(*font_size, 20.0);
        }
        other => panic!("expected text particle, got {other:?}"),
    }
}

#[test]
fn particle_rises_to_end_top() {
    let (mut anim, mut surface, mut rng) = setup();
    let id = anim.tick(&mut surface, &mut rng).id;
    assert_eq!(surface.active_tweens(), 1);

    surface.advance(3000.0);
    let mid = surface.object(&id).unwrap().top;
    assert!(mid < 1080.0 && mid > -50.0);

    let done = surface.advance(3000.0);
    assert_eq!(surface.object(&id).unwrap().top, -50.0);
    assert_eq!(done.len(), 1);
    assert!(surface.take_render_request());
}

#[test]
fn finished_particles_linger_under_capacity_policy() {
    let (mut anim, mut surface, mut rng) = setup();
    let id = anim.tick(&mut surface, &mut rng).id;
    let done = surface.advance(6000.0);
    let removed = anim.on_completed(&mut surface, &done);
    assert!(removed.is_empty());
    assert!(surface.object(&id).is_some());
    assert_eq!(anim.len(), 1);
}

#[test]
fn on_complete_policy_retires_finished_particles() {
    let mut anim = ParticleAnimator::new(12, 6000.0, EvictionPolicy::OnComplete);
    let mut surface = SceneSurface::new(1920.0, 1080.0);
    let mut rng = SmallRng::seed_from_u64(3);
    let first = anim.tick(&mut surface, &mut rng).id;
    surface.advance(300.0);
    let second = anim.tick(&mut surface, &mut rng).id;

    let done = surface.advance(5700.0);
    let removed = anim.on_completed(&mut surface, &done);
    assert_eq!(removed, vec![first]);
    assert!(surface.object(&first).is_none());
    assert_eq!(anim.live().copied().collect::<Vec<_>>(), vec![second]);
}

#[test]
fn retire_unknown_id_is_none() {
    let (mut anim, mut surface, _) = setup();
    assert!(anim.retire(&mut surface, &uuid::Uuid::new_v4()).is_none());
}

#[test]
fn evicting_selected_particle_prunes_selection() {
    let mut anim = ParticleAnimator::new(1, 6000.0, EvictionPolicy::Capacity);
    let mut surface = SceneSurface::new(100.0, 100.0);
    let mut rng = SmallRng::seed_from_u64(9);
    let first = anim.tick(&mut surface, &mut rng).id;
    surface.set_active_selection(crate::doc::Selection::Single(first));
    anim.tick(&mut surface, &mut rng);
    assert!(surface.active_selection().is_empty());
}
