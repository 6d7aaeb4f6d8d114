use glam::Vec2;

use crate::components::entity::{Animated, RenderState};
use crate::core::rng::Rng;
use crate::core::surface::Surface;

/// Soft background glow drifting upward. Never expires; wraps instead.
#[derive(Debug, Clone)]
pub struct Bokeh {
    pub pos: Vec2,
    radius: f32,
    alpha: f32,
    /// Upward drift in px/s.
    speed: f32,
}

impl Bokeh {
    /// Margin above and below the surface used for wrapping.
    pub const WRAP_MARGIN: f32 = 20.0;

    pub fn new(surface: &Surface, rng: &mut Rng) -> Self {
        Self {
            pos: Vec2::new(rng.unit() * surface.width, rng.unit() * surface.height),
            radius: rng.range(18.0, 90.0),
            alpha: rng.range(0.06, 0.16),
            // 0.12 - 0.5 px per frame at 60 fps
            speed: rng.range(0.12, 0.5) * 60.0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Fully drifted off the top edge.
    pub fn is_above_view(&self) -> bool {
        self.pos.y + self.radius < -Self::WRAP_MARGIN
    }

    /// Reappear below the bottom edge at a new horizontal position.
    pub fn wrap(&mut self, surface: &Surface, x: f32) {
        self.pos = Vec2::new(x, surface.height + self.radius + Self::WRAP_MARGIN);
    }
}

impl Animated for Bokeh {
    fn update(&mut self, dt: f32) -> bool {
        self.pos.y -= self.speed * dt;
        false
    }

    fn snapshot(&self) -> RenderState {
        RenderState::Bokeh {
            pos: self.pos,
            radius: self.radius,
            alpha: self.alpha,
        }
    }
}
