//! Short-lived flourish particles: white sparks and floating hearts.

use glam::Vec2;

use crate::components::entity::{Animated, Lifetime, RenderState};
use crate::components::palette;
use crate::core::rng::Rng;
use crate::renderer::color::Color;

/// A small white spark flung radially outward.
#[derive(Debug, Clone)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    lifetime: Lifetime,
}

impl Spark {
    /// Per-step velocity retention. Not dt-corrected; sparks live under a second.
    pub const DRAG: f32 = 0.98;

    pub fn new(pos: Vec2, rng: &mut Rng) -> Self {
        let angle = rng.angle();
        let speed = rng.range(60.0, 220.0);
        Self {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            radius: rng.range(1.0, 2.2),
            lifetime: Lifetime::new(rng.range(0.4, 0.9)),
        }
    }

    pub fn life(&self) -> f32 {
        self.lifetime.life
    }
}

impl Animated for Spark {
    fn update(&mut self, dt: f32) -> bool {
        self.lifetime.advance(dt);
        self.pos += self.vel * dt;
        self.vel *= Self::DRAG;
        self.lifetime.is_expired()
    }

    fn snapshot(&self) -> RenderState {
        RenderState::Spark {
            pos: self.pos,
            radius: self.radius,
            alpha: 1.0 - self.lifetime.progress(),
        }
    }
}

/// How a heart was launched. Bursts fly faster, fall harder and die sooner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartStyle {
    /// Drifts upward from the bottom edge.
    Ambient,
    /// Thrown in all directions from a point.
    Burst,
}

#[derive(Debug, Clone)]
pub struct HeartParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    accel: Vec2,
    size: f32,
    rotation: f32,
    spin: f32,
    color: Color,
    style: HeartStyle,
    lifetime: Lifetime,
}

impl HeartParticle {
    pub fn new(pos: Vec2, size: f32, style: HeartStyle, rng: &mut Rng) -> Self {
        let burst = style == HeartStyle::Burst;
        let angle = if burst { rng.angle() } else { rng.range(-0.8, 0.8) };
        let speed = if burst {
            rng.range(120.0, 320.0)
        } else {
            rng.range(25.0, 70.0)
        };
        let lift = if burst {
            rng.range(120.0, 260.0)
        } else {
            rng.range(80.0, 160.0)
        };
        let gravity = if burst {
            rng.range(90.0, 160.0)
        } else {
            rng.range(55.0, 95.0)
        };
        let vel = Vec2::from_angle(angle) * speed - Vec2::new(0.0, lift);
        Self {
            pos,
            vel,
            accel: Vec2::new(rng.range(-12.0, 12.0), gravity),
            size,
            rotation: rng.angle(),
            spin: rng.range(-2.2, 2.2),
            color: palette::petal(rng),
            style,
            lifetime: Lifetime::new(if burst {
                rng.range(0.9, 1.6)
            } else {
                rng.range(1.8, 3.2)
            }),
        }
    }

    pub fn style(&self) -> HeartStyle {
        self.style
    }

    pub fn life(&self) -> f32 {
        self.lifetime.life
    }
}

impl Animated for HeartParticle {
    fn update(&mut self, dt: f32) -> bool {
        self.lifetime.advance(dt);
        self.vel += self.accel * dt;
        self.pos += self.vel * dt;
        self.rotation += self.spin * dt;
        self.lifetime.is_expired()
    }

    fn snapshot(&self) -> RenderState {
        RenderState::Heart {
            pos: self.pos,
            size: self.size,
            rotation: self.rotation,
            alpha: 1.0 - self.lifetime.progress(),
            color: self.color,
        }
    }
}

/// Homogeneous storage for the mixed spark/heart population.
#[derive(Debug, Clone)]
pub enum Particle {
    Spark(Spark),
    Heart(HeartParticle),
}

impl Particle {
    pub fn is_heart(&self) -> bool {
        matches!(self, Particle::Heart(_))
    }
}

impl Animated for Particle {
    fn update(&mut self, dt: f32) -> bool {
        match self {
            Particle::Spark(s) => s.update(dt),
            Particle::Heart(h) => h.update(dt),
        }
    }

    fn snapshot(&self) -> RenderState {
        match self {
            Particle::Spark(s) => s.snapshot(),
            Particle::Heart(h) => h.snapshot(),
        }
    }
}

impl From<Spark> for Particle {
    fn from(s: Spark) -> Self {
        Particle::Spark(s)
    }
}

impl From<HeartParticle> for Particle {
    fn from(h: HeartParticle) -> Self {
        Particle::Heart(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Step until expired; returns total simulated time.
    fn run_to_expiry<A: Animated>(a: &mut A, dt: f32, budget: f32) -> f32 {
        let mut elapsed = 0.0;
        while elapsed <= budget + dt {
            elapsed += dt;
            if a.update(dt) {
                return elapsed;
            }
        }
        panic!("entity outlived {}s", budget);
    }

    #[test]
    fn spark_expires_within_life() {
        let mut rng = Rng::new(11);
        let mut s = Spark::new(Vec2::ZERO, &mut rng);
        let life = s.life();
        let elapsed = run_to_expiry(&mut s, 0.016, life);
        assert!(elapsed >= life - 1e-4);
        assert!(elapsed < life + 0.016 + 1e-4);
    }

    #[test]
    fn spark_slows_down() {
        let mut s = Spark::new(Vec2::ZERO, &mut Rng::new(2));
        let before = s.vel.length();
        s.update(0.016);
        assert!((s.vel.length() - before * Spark::DRAG).abs() < 1e-3);
    }

    #[test]
    fn spark_fades() {
        let mut s = Spark::new(Vec2::ZERO, &mut Rng::new(2));
        s.update(s.life() * 0.5);
        match s.snapshot() {
            RenderState::Spark { alpha, .. } => assert!((alpha - 0.5).abs() < 1e-4),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn ambient_hearts_rise() {
        let mut rng = Rng::new(3);
        for _ in 0..100 {
            let h = HeartParticle::new(Vec2::ZERO, 12.0, HeartStyle::Ambient, &mut rng);
            assert!(h.vel.y < 0.0, "ambient heart should start upward");
            assert!((1.8..3.2).contains(&h.life()));
        }
    }

    #[test]
    fn burst_hearts_live_shorter() {
        let mut rng = Rng::new(4);
        for _ in 0..100 {
            let h = HeartParticle::new(Vec2::ZERO, 12.0, HeartStyle::Burst, &mut rng);
            assert!((0.9..1.6).contains(&h.life()));
        }
    }

    #[test]
    fn heart_gravity_pulls_down() {
        let mut h = HeartParticle::new(Vec2::ZERO, 12.0, HeartStyle::Ambient, &mut Rng::new(8));
        let vy0 = h.vel.y;
        h.update(0.5);
        assert!(h.vel.y > vy0);
    }

    #[test]
    fn heart_expires_within_life() {
        let mut h = HeartParticle::new(Vec2::ZERO, 12.0, HeartStyle::Burst, &mut Rng::new(6));
        let life = h.life();
        let elapsed = run_to_expiry(&mut h, 0.033, life);
        assert!(elapsed >= life - 1e-4);
    }

    #[test]
    fn particle_enum_delegates() {
        let mut rng = Rng::new(1);
        let mut p: Particle =
            HeartParticle::new(Vec2::ZERO, 10.0, HeartStyle::Burst, &mut rng).into();
        assert!(p.is_heart());
        assert!(!p.update(0.01));
        assert!(matches!(p.snapshot(), RenderState::Heart { .. }));
        let s: Particle = Spark::new(Vec2::ZERO, &mut rng).into();
        assert!(!s.is_heart());
    }
}
