use serde::{Deserialize, Serialize};

/// Tunables for [`WindModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Converts horizontal drag pixels into target sway.
    pub drag_sensitivity: f32,
    /// Fraction of the gap to the target that remains after one second.
    pub follow_base: f32,
    /// Fraction of the target that remains after one second.
    pub decay_base: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.015,
            follow_base: 0.001,
            decay_base: 0.02,
        }
    }
}

/// Smooths discrete drag impulses into a continuous, decaying sway signal.
#[derive(Debug, Clone, Default)]
pub struct WindModel {
    wind: f32,
    target: f32,
    config: WindConfig,
}

impl WindModel {
    pub fn new(config: WindConfig) -> Self {
        Self {
            wind: 0.0,
            target: 0.0,
            config,
        }
    }

    /// Add a horizontal drag delta (pixels) to the impulse accumulator.
    pub fn apply_impulse(&mut self, dx: f32) {
        self.target += dx * self.config.drag_sensitivity;
    }

    /// Relax `wind` toward the target and decay the target toward zero.
    /// Both factors are `base^dt`, so the result does not depend on frame rate.
    pub fn advance(&mut self, dt: f32) {
        let follow = 1.0 - self.config.follow_base.powf(dt);
        self.wind += (self.target - self.wind) * follow;
        self.target *= self.config.decay_base.powf(dt);
    }

    /// Current sway value.
    pub fn value(&self) -> f32 {
        self.wind
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}
