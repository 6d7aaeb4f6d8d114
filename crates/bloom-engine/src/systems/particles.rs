//! Owner of every live entity collection.

use glam::Vec2;

use crate::api::config::{PopulationConfig, SimConfig};
use crate::components::bloom::Bloom;
use crate::components::bokeh::Bokeh;
use crate::components::entity::Animated;
use crate::components::firework::{FireworkRocket, FireworkSpark};
use crate::components::palette;
use crate::components::particle::{HeartParticle, HeartStyle, Particle, Spark};
use crate::core::rng::Rng;
use crate::core::surface::Surface;

/// Live entity collections plus the spawn operations that feed them.
///
/// Each step updates every member once, then compacts the collections.
/// Order inside a collection is not preserved.
pub struct ParticleSystem {
    blooms: Vec<Bloom>,
    particles: Vec<Particle>,
    rockets: Vec<FireworkRocket>,
    sparks: Vec<FireworkSpark>,
    bokeh: Vec<Bokeh>,
    population: PopulationConfig,
    reduced_motion: bool,
}

impl ParticleSystem {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            blooms: Vec::with_capacity(64),
            particles: Vec::with_capacity(512),
            rockets: Vec::with_capacity(16),
            sparks: Vec::with_capacity(1024),
            bokeh: Vec::with_capacity(32),
            population: config.population,
            reduced_motion: config.reduced_motion,
        }
    }

    // -- Read access --

    pub fn blooms(&self) -> &[Bloom] {
        &self.blooms
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn rockets(&self) -> &[FireworkRocket] {
        &self.rockets
    }

    pub fn sparks(&self) -> &[FireworkSpark] {
        &self.sparks
    }

    pub fn bokeh(&self) -> &[Bokeh] {
        &self.bokeh
    }

    /// Lifecycle-bound entities. Bokeh is not counted.
    pub fn live_count(&self) -> usize {
        self.blooms.len() + self.particles.len() + self.rockets.len() + self.sparks.len()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    // -- Stepping --

    /// Advance every entity by `dt` and drop the expired ones.
    /// Rockets that explode this step are replaced by a firework burst.
    pub fn step(&mut self, dt: f32, surface: &Surface, rng: &mut Rng) {
        self.blooms.retain_mut(|b| !b.update(dt));

        let mut explosions: Vec<Vec2> = Vec::new();
        self.rockets.retain_mut(|r| {
            if r.update(dt) {
                explosions.push(r.pos);
                false
            } else {
                true
            }
        });

        self.sparks.retain_mut(|s| !s.update(dt));
        self.particles.retain_mut(|p| !p.update(dt));

        for b in &mut self.bokeh {
            b.update(dt);
            if b.is_above_view() {
                b.wrap(surface, rng.unit() * surface.width);
            }
        }

        for pos in explosions {
            log::debug!("rocket burst at ({:.0}, {:.0})", pos.x, pos.y);
            self.firework_burst(pos, rng);
        }
    }

    // -- Spawning --

    /// One bloom plus a ring of sparks around its base.
    pub fn spawn_bloom(&mut self, pos: Vec2, scale: f32, rng: &mut Rng) {
        self.blooms.push(Bloom::new(pos, scale, rng));
        for _ in 0..self.population.bloom_sparks {
            let jitter = Vec2::new(rng.range(-8.0, 8.0), rng.range(-8.0, 8.0));
            self.particles.push(Spark::new(pos + jitter, rng).into());
        }
    }

    /// Radial burst of hearts with a spark on every other heart.
    pub fn heart_burst(&mut self, pos: Vec2, rng: &mut Rng) {
        let count = self.population.heart_burst.pick(self.reduced_motion);
        for i in 0..count {
            let size = rng.range(8.0, 16.0);
            self.particles
                .push(HeartParticle::new(pos, size, HeartStyle::Burst, rng).into());
            if i % 2 == 0 {
                self.particles.push(Spark::new(pos, rng).into());
            }
        }
    }

    /// Smaller heart burst used by the celebration pulse.
    pub fn pulse_hearts(&mut self, pos: Vec2, rng: &mut Rng) {
        let count = self.population.pulse_hearts.pick(self.reduced_motion);
        for _ in 0..count {
            let size = rng.range(8.0, 14.0);
            self.particles
                .push(HeartParticle::new(pos, size, HeartStyle::Burst, rng).into());
        }
    }

    /// Firework explosion. The whole burst shares one color.
    pub fn firework_burst(&mut self, pos: Vec2, rng: &mut Rng) {
        let count = self.population.firework_sparks.pick(self.reduced_motion);
        let every = self.population.firework_heart_every.max(1);
        let color = palette::firework(rng);
        for i in 0..count {
            self.sparks.push(FireworkSpark::new(pos, color, rng));
            if !self.reduced_motion && i % every == 0 {
                let size = rng.range(7.0, 12.0);
                self.particles
                    .push(HeartParticle::new(pos, size, HeartStyle::Burst, rng).into());
            }
        }
    }

    pub fn launch_rocket(&mut self, pos: Vec2, rng: &mut Rng) {
        self.rockets.push(FireworkRocket::new(pos, rng));
    }

    /// Probabilistic ambient hearts rising from below the bottom edge.
    ///
    /// The per-step chance is `rate * dt * reference_rate`, so long-run
    /// density does not depend on the actual frame cadence.
    pub fn ambient_hearts(&mut self, dt: f32, surface: &Surface, rng: &mut Rng) {
        if self.reduced_motion {
            return;
        }
        let rate = self.population.ambient_hearts.value(surface.area());
        if rng.chance(rate * dt * self.population.frame_reference_rate) {
            let pos = Vec2::new(rng.range(0.0, surface.width), surface.height + 30.0);
            let size = rng.range(10.0, 18.0);
            self.particles
                .push(HeartParticle::new(pos, size, HeartStyle::Ambient, rng).into());
        }
    }

    /// `count` ambient hearts at random on-screen points.
    pub fn scatter_hearts(&mut self, count: usize, surface: &Surface, rng: &mut Rng) {
        for _ in 0..count {
            let pos = Vec2::new(rng.range(0.0, surface.width), rng.range(0.0, surface.height));
            let size = rng.range(10.0, 18.0);
            self.particles
                .push(HeartParticle::new(pos, size, HeartStyle::Ambient, rng).into());
        }
    }

    /// Replace the background population with one sized for `surface`.
    pub fn seed_bokeh(&mut self, surface: &Surface, rng: &mut Rng) {
        let count = self.population.bokeh.value(surface.area()).round() as usize;
        self.bokeh.clear();
        self.bokeh.extend((0..count).map(|_| Bokeh::new(surface, rng)));
    }

    /// Remove blooms and particles. Fireworks and bokeh run on their own timers.
    pub fn clear(&mut self) {
        self.blooms.clear();
        self.particles.clear();
    }
}
