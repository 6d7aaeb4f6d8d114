use std::collections::VecDeque;

use glam::Vec2;

use crate::components::entity::{Animated, Lifetime, RenderState};
use crate::components::palette;
use crate::core::rng::Rng;
use crate::renderer::color::Color;

/// A rising rocket. Explodes at its apex or when its life runs out.
#[derive(Debug, Clone)]
pub struct FireworkRocket {
    pub pos: Vec2,
    pub vel: Vec2,
    accel: Vec2,
    color: Color,
    trail: VecDeque<Vec2>,
    lifetime: Lifetime,
}

impl FireworkRocket {
    /// Positions kept for the trail.
    pub const TRAIL_LEN: usize = 10;
    /// Upward speed (px/s) at which the rocket counts as having peaked.
    pub const APEX_SPEED: f32 = -40.0;

    pub fn new(pos: Vec2, rng: &mut Rng) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.range(-35.0, 35.0), -rng.range(420.0, 620.0)),
            accel: Vec2::new(rng.range(-8.0, 8.0), 230.0),
            color: palette::firework(rng),
            trail: VecDeque::with_capacity(Self::TRAIL_LEN + 1),
            lifetime: Lifetime::new(rng.range(0.9, 1.35)),
        }
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn life(&self) -> f32 {
        self.lifetime.life
    }

    pub fn age(&self) -> f32 {
        self.lifetime.age
    }
}

impl Animated for FireworkRocket {
    /// Returns true when the rocket explodes.
    fn update(&mut self, dt: f32) -> bool {
        self.lifetime.advance(dt);
        self.vel += self.accel * dt;
        self.pos += self.vel * dt;
        self.trail.push_back(self.pos);
        if self.trail.len() > Self::TRAIL_LEN {
            self.trail.pop_front();
        }
        self.lifetime.is_expired() || self.vel.y > Self::APEX_SPEED
    }

    fn snapshot(&self) -> RenderState {
        RenderState::Rocket {
            pos: self.pos,
            trail: self.trail.iter().copied().collect(),
            color: self.color,
        }
    }
}

/// One ember of an exploded rocket.
#[derive(Debug, Clone)]
pub struct FireworkSpark {
    pub pos: Vec2,
    pub vel: Vec2,
    gravity: f32,
    /// Velocity retained per 1/60 s.
    drag: f32,
    radius: f32,
    color: Color,
    lifetime: Lifetime,
}

impl FireworkSpark {
    /// Reference frame rate the drag factor is expressed against.
    const DRAG_FRAME_RATE: f32 = 60.0;

    pub fn new(pos: Vec2, color: Color, rng: &mut Rng) -> Self {
        let angle = rng.angle();
        let speed = rng.range(140.0, 520.0);
        Self {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            gravity: 260.0,
            drag: rng.range(0.88, 0.94),
            lifetime: Lifetime::new(rng.range(0.9, 1.7)),
            radius: rng.range(1.2, 2.6),
            color,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn life(&self) -> f32 {
        self.lifetime.life
    }
}

impl Animated for FireworkSpark {
    fn update(&mut self, dt: f32) -> bool {
        self.lifetime.advance(dt);
        self.vel *= self.drag.powf(dt * Self::DRAG_FRAME_RATE);
        self.vel.y += self.gravity * dt;
        self.pos += self.vel * dt;
        self.lifetime.is_expired()
    }

    fn snapshot(&self) -> RenderState {
        RenderState::FireworkSpark {
            pos: self.pos,
            radius: self.radius,
            alpha: 1.0 - self.lifetime.progress(),
            color: self.color,
        }
    }
}
