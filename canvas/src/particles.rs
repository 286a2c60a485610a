//! Floating-particle animator backed by a bounded ring buffer.
//!
//! Every tick spawns one particle just below the surface and tweens its `top`
//! off the top edge. The buffer holds at most `capacity` live particles in
//! spawn order; spawning at capacity first evicts the oldest.

#[cfg(test)]
#[path = "particles_test.rs"]
mod particles_test;

use std::collections::VecDeque;

use log::trace;
use rand::Rng;

use crate::consts::{
    DEFAULT_FONT_FAMILY, PARTICLE_CAPACITY, PARTICLE_END_TOP, PARTICLE_FONT_SIZE, PARTICLE_GLYPH, PARTICLE_RISE_MS, PARTICLE_X_OFFSET,
};
use crate::doc::{ObjectId, Property, SceneObject};
use crate::surface::{Completed, Surface};
use crate::tween::{AnimateOptions, Easing};

/// When a particle leaves the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Only when a spawn finds the buffer full. Finished particles linger
    /// off screen until pushed out.
    #[default]
    Capacity,
    /// Also as soon as the particle's rise tween completes.
    OnComplete,
}

/// Outcome of one spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    /// The new particle.
    pub id: ObjectId,
    /// The oldest particle, if the buffer was full.
    pub evicted: Option<ObjectId>,
}

/// Bounded buffer of live particles plus the spawn parameters.
#[derive(Debug, Clone)]
pub struct ParticleAnimator {
    live: VecDeque<ObjectId>,
    capacity: usize,
    rise_ms: f64,
    policy: EvictionPolicy,
}

impl Default for ParticleAnimator {
    fn default() -> Self {
        Self::new(PARTICLE_CAPACITY, PARTICLE_RISE_MS, EvictionPolicy::default())
    }
}

impl ParticleAnimator {
    /// Create an animator. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize, rise_ms: f64, policy: EvictionPolicy) -> Self {
        let capacity = capacity.max(1);
        Self { live: VecDeque::with_capacity(capacity), capacity, rise_ms, policy }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Live particle ids, oldest first.
    pub fn live(&self) -> impl ExactSizeIterator<Item = &ObjectId> {
        self.live.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Spawn one particle, evicting the oldest first when full.
    pub fn tick<S, R>(&mut self, surface: &mut S, rng: &mut R) -> Spawned
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let mut evicted = None;
        if self.live.len() >= self.capacity {
            if let Some(oldest) = self.live.pop_front() {
                trace!("evicting particle {oldest}");
                surface.remove(&oldest);
                evicted = Some(oldest);
            }
        }

        let size = surface.size();
        let left = rng.random::<f64>() * size.width + PARTICLE_X_OFFSET;
        let particle = SceneObject::text(left, size.height, PARTICLE_GLYPH)
            .with_font(PARTICLE_FONT_SIZE, DEFAULT_FONT_FAMILY)
            .with_selectable(false);

        let id = surface.add(particle);
        self.live.push_back(id);
        surface.animate(
            &id,
            Property::Top,
            PARTICLE_END_TOP,
            AnimateOptions { duration_ms: self.rise_ms, easing: Easing::EaseOutQuad },
        );
        Spawned { id, evicted }
    }

    /// React to tweens that finished this frame. Under
    /// [`EvictionPolicy::OnComplete`] finished particles are retired.
    /// Returns the ids removed.
    pub fn on_completed<S>(&mut self, surface: &mut S, completed: &[Completed]) -> Vec<ObjectId>
    where
        S: Surface + ?Sized,
    {
        if self.policy != EvictionPolicy::OnComplete {
            return Vec::new();
        }
        completed
            .iter()
            .filter(|c| c.property == Property::Top)
            .filter_map(|c| self.retire(&mut *surface, &c.target))
            .collect()
    }

    /// Remove one particle from the buffer and the surface.
    pub fn retire<S>(&mut self, surface: &mut S, id: &ObjectId) -> Option<ObjectId>
    where
        S: Surface + ?Sized,
    {
        let idx = self.live.iter().position(|p| p == id)?;
        let removed = self.live.remove(idx)?;
        surface.remove(&removed);
        Some(removed)
    }

    /// Forget every particle without touching a surface.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}
