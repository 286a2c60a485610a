//! Property tweens: easing curves and the per-frame sampler.
//!
//! A `Tween` animates one numeric `Property` of one object from a start value
//! to an end value. It holds no callbacks; the surface advances it once per
//! frame and writes the sampled value back into the object.

#[cfg(test)]
#[path = "tween_test.rs"]
mod tween_test;

use serde::{Deserialize, Serialize};

use crate::doc::{ObjectId, Property};

/// Easing curve in Penner form: `f(t, b, c, d)` with elapsed time `t`, start
/// value `b`, total change `c` and duration `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Evaluate the curve. `t` must already be clamped to `0..=d`.
    #[must_use]
    pub fn apply(self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        match self {
            Self::Linear => c * t / d + b,
            Self::EaseOutQuad => {
                let t = t / d;
                -c * t * (t - 2.0) + b
            }
            Self::EaseInOutCubic => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t * t + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * (t * t * t + 2.0) + b
                }
            }
        }
    }
}

/// Options for starting a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimateOptions {
    pub duration_ms: f64,
    pub easing: Easing,
}

/// Value produced by one sample of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep {
    pub value: f64,
    pub done: bool,
}

/// A running animation of one property on one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: ObjectId,
    pub property: Property,
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    /// Time advanced so far.
    pub elapsed_ms: f64,
}

impl Tween {
    #[must_use]
    pub fn new(target: ObjectId, property: Property, from: f64, to: f64, options: AnimateOptions) -> Self {
        Self {
            target,
            property,
            from,
            to,
            duration_ms: options.duration_ms.max(0.0),
            easing: options.easing,
            elapsed_ms: 0.0,
        }
    }

    /// Value of the tween `elapsed_ms` after it started. Pure: does not
    /// touch `self.elapsed_ms`.
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> TweenStep {
        if self.duration_ms <= 0.0 || elapsed_ms >= self.duration_ms {
            return TweenStep { value: self.to, done: true };
        }
        let t = elapsed_ms.max(0.0);
        let value = self.easing.apply(t, self.from, self.to - self.from, self.duration_ms);
        TweenStep { value, done: false }
    }

    /// Advance by `dt_ms` and return the new value.
    pub fn advance(&mut self, dt_ms: f64) -> TweenStep {
        self.elapsed_ms += dt_ms.max(0.0);
        self.sample(self.elapsed_ms)
    }
}
