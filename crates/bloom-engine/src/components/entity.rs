use glam::Vec2;

use crate::components::bloom::BloomState;
use crate::renderer::color::Color;

/// Shared contract of every entity kind.
pub trait Animated {
    /// Advance by `dt` seconds. Returns true once the entity has expired.
    /// Called exactly once per simulation step.
    fn update(&mut self, dt: f32) -> bool;

    /// Read-only view of what the renderer needs this frame.
    fn snapshot(&self) -> RenderState;
}

/// Age and life budget of a transient entity, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub age: f32,
    pub life: f32,
}

impl Lifetime {
    pub fn new(life: f32) -> Self {
        Self {
            age: 0.0,
            life: life.max(f32::EPSILON),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.age += dt;
    }

    /// Normalized progress `age / life`, clamped to [0, 1].
    pub fn progress(&self) -> f32 {
        (self.age / self.life).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.life
    }
}

/// Per-kind render state handed to the frame builder.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    Bloom(BloomState),
    Spark {
        pos: Vec2,
        radius: f32,
        alpha: f32,
    },
    Heart {
        pos: Vec2,
        size: f32,
        rotation: f32,
        alpha: f32,
        color: Color,
    },
    Rocket {
        pos: Vec2,
        /// Oldest first.
        trail: Vec<Vec2>,
        color: Color,
    },
    FireworkSpark {
        pos: Vec2,
        radius: f32,
        alpha: f32,
        color: Color,
    },
    Bokeh {
        pos: Vec2,
        radius: f32,
        alpha: f32,
    },
}
