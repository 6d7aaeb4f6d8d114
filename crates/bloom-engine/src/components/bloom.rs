use glam::Vec2;

use crate::components::entity::{Animated, Lifetime, RenderState};
use crate::components::palette;
use crate::core::rng::Rng;
use crate::extensions::easing::Easing;
use crate::renderer::color::Color;

/// Fraction of life over which the stem grows to full length.
pub const STEM_PHASE: f32 = 0.5;
/// Default fraction of life the petals take to open once started.
pub const OPEN_SPAN: f32 = 0.55;

/// A procedurally grown flower: stem growth then delayed petal opening.
///
/// Neither phase is stored. Both are re-derived from `age` on demand, so
/// the opening can never start before its delay.
#[derive(Debug, Clone)]
pub struct Bloom {
    pub pos: Vec2,
    pub scale: f32,
    seed: f32,
    petal_color: Color,
    petal_color2: Color,
    glow: Color,
    stem_color: Color,
    petal_count: u32,
    leaf_count: u32,
    stem_length: f32,
    head_radius: f32,
    /// Normalized progress at which opening begins.
    open_delay: f32,
    /// Normalized duration of the opening phase.
    open_span: f32,
    lifetime: Lifetime,
}

/// Render view of a bloom. Phases are already eased.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomState {
    pub base: Vec2,
    pub scale: f32,
    pub seed: f32,
    pub petal_color: Color,
    pub petal_color2: Color,
    pub glow: Color,
    pub stem_color: Color,
    pub petal_count: u32,
    pub leaf_count: u32,
    pub stem_length: f32,
    pub head_radius: f32,
    pub stem_progress: f32,
    pub open_progress: f32,
}

impl Bloom {
    pub fn new(pos: Vec2, scale: f32, rng: &mut Rng) -> Self {
        Self {
            pos,
            scale,
            seed: rng.unit() * 1000.0,
            petal_count: rng.range(8.0, 14.0).round() as u32,
            petal_color: palette::petal(rng),
            petal_color2: palette::petal(rng),
            glow: palette::glow(rng),
            stem_color: palette::stem(rng),
            stem_length: rng.range(120.0, 240.0) * scale,
            head_radius: rng.range(18.0, 34.0) * scale,
            leaf_count: if rng.chance(0.8) { 2 } else { 1 },
            open_delay: rng.range(0.1, 0.35),
            open_span: OPEN_SPAN,
            lifetime: Lifetime::new(rng.range(6.5, 9.0)),
        }
    }

    /// Override the opening timing (both as fractions of life).
    pub fn with_opening(mut self, delay: f32, span: f32) -> Self {
        self.open_delay = delay.clamp(0.0, 1.0);
        self.open_span = span.max(f32::EPSILON);
        self
    }

    pub fn with_life(mut self, life: f32) -> Self {
        self.lifetime = Lifetime::new(life);
        self
    }

    pub fn life(&self) -> f32 {
        self.lifetime.life
    }

    pub fn age(&self) -> f32 {
        self.lifetime.age
    }

    pub fn is_alive(&self) -> bool {
        !self.lifetime.is_expired()
    }

    pub fn stem_progress(&self) -> f32 {
        Easing::CubicOut.apply(self.lifetime.progress() / STEM_PHASE)
    }

    pub fn open_progress(&self) -> f32 {
        let t = self.lifetime.progress();
        Easing::CubicInOut.apply((t - self.open_delay) / self.open_span)
    }
}

impl Animated for Bloom {
    fn update(&mut self, dt: f32) -> bool {
        self.lifetime.advance(dt);
        self.lifetime.is_expired()
    }

    fn snapshot(&self) -> RenderState {
        RenderState::Bloom(BloomState {
            base: self.pos,
            scale: self.scale,
            seed: self.seed,
            petal_color: self.petal_color,
            petal_color2: self.petal_color2,
            glow: self.glow,
            stem_color: self.stem_color,
            petal_count: self.petal_count,
            leaf_count: self.leaf_count,
            stem_length: self.stem_length,
            head_radius: self.head_radius,
            stem_progress: self.stem_progress(),
            open_progress: self.open_progress(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bloom() -> Bloom {
        Bloom::new(Vec2::new(100.0, 400.0), 1.0, &mut Rng::new(42))
    }

    #[test]
    fn attributes_within_ranges() {
        let mut rng = Rng::new(9);
        for _ in 0..200 {
            let b = Bloom::new(Vec2::ZERO, 1.0, &mut rng);
            assert!((8..=14).contains(&b.petal_count));
            assert!(b.leaf_count == 1 || b.leaf_count == 2);
            assert!((120.0..240.0).contains(&b.stem_length));
            assert!((18.0..34.0).contains(&b.head_radius));
            assert!((6.5..9.0).contains(&b.life()));
        }
    }

    #[test]
    fn scale_applies_to_geometry() {
        let a = Bloom::new(Vec2::ZERO, 1.0, &mut Rng::new(5));
        let b = Bloom::new(Vec2::ZERO, 0.5, &mut Rng::new(5));
        assert!((a.stem_length * 0.5 - b.stem_length).abs() < 1e-4);
        assert!((a.head_radius * 0.5 - b.head_radius).abs() < 1e-4);
    }

    #[test]
    fn stem_grows_over_first_half() {
        let mut b = bloom().with_life(8.0);
        assert_eq!(b.stem_progress(), 0.0);
        b.update(2.0);
        let quarter = b.stem_progress();
        assert!(quarter > 0.5 && quarter < 1.0, "{}", quarter);
        b.update(2.0);
        assert_eq!(b.stem_progress(), 1.0);
    }

    #[test]
    fn opening_waits_for_delay() {
        let mut b = bloom().with_life(10.0).with_opening(0.3, 0.5);
        b.update(2.9);
        assert_eq!(b.open_progress(), 0.0);
        b.update(0.2);
        assert!(b.open_progress() > 0.0);
        b.update(5.0); // t = 0.81, past delay + span
        assert_eq!(b.open_progress(), 1.0);
    }

    #[test]
    fn expires_once_life_is_spent() {
        let mut b = bloom().with_life(1.0);
        let dt = 0.033;
        let mut elapsed = 0.0_f32;
        loop {
            elapsed += dt;
            if b.update(dt) {
                break;
            }
            assert!(elapsed < 1.0 + dt, "bloom outlived its budget");
        }
        assert!(!b.is_alive());
        // Reported on the step that crossed the budget, not before.
        assert!(b.age() >= 1.0);
        assert!(b.age() - dt < 1.0);
    }

    #[test]
    fn snapshot_reflects_phases() {
        let mut b = bloom().with_life(4.0);
        b.update(1.0);
        match b.snapshot() {
            RenderState::Bloom(s) => {
                assert_eq!(s.stem_progress, b.stem_progress());
                assert_eq!(s.open_progress, b.open_progress());
                assert_eq!(s.base, Vec2::new(100.0, 400.0));
            }
            other => panic!("unexpected snapshot {:?}", other),
        }
    }
}
