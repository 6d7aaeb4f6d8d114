use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::types::SimEvent;
use crate::core::rng::Rng;
use crate::core::surface::Surface;
use crate::core::time::Clock;
use crate::core::wind::WindModel;
use crate::input::gesture::{Command, GestureInterpreter};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::draw::Frame;
use crate::systems::director::EventDirector;
use crate::systems::particles::ParticleSystem;
use crate::systems::render::{build_frame, View};

/// The whole simulation: clock, wind, entities, event machines and input.
///
/// One `step` runs to completion before the next. The host pushes input
/// between steps and reads the frame and events after each one.
pub struct SimContext {
    config: SimConfig,
    clock: Clock,
    wind: WindModel,
    surface: Surface,
    rng: Rng,
    particles: ParticleSystem,
    director: EventDirector,
    gestures: GestureInterpreter,
    input: InputQueue,
    commands: Vec<Command>,
    events: Vec<SimEvent>,
}

impl SimContext {
    /// Build a context with an entropy-seeded generator.
    pub fn new(config: SimConfig, surface: Surface) -> Self {
        Self::with_rng(config, surface, Rng::from_entropy())
    }

    /// Build a context with a fixed seed. Runs are reproducible for a
    /// given seed and input sequence.
    pub fn with_seed(config: SimConfig, surface: Surface, seed: u64) -> Self {
        Self::with_rng(config, surface, Rng::new(seed))
    }

    fn with_rng(config: SimConfig, surface: Surface, rng: Rng) -> Self {
        Self {
            clock: Clock::new(config.max_dt),
            wind: WindModel::new(config.wind),
            particles: ParticleSystem::new(&config),
            director: EventDirector::new(&config),
            gestures: GestureInterpreter::new(config.gesture),
            input: InputQueue::new(),
            commands: Vec::with_capacity(16),
            events: Vec::new(),
            surface,
            rng,
            config,
        }
    }

    /// Seed the opening scene: a row of blooms, the bokeh field and the hint.
    pub fn init(&mut self) {
        self.seed_scene();
        self.particles.seed_bokeh(&self.surface, &mut self.rng);
        self.director.show_hint(self.clock.now());
        log::info!(
            "scene seeded: {} blooms, {} bokeh on {}x{}{}",
            self.particles.blooms().len(),
            self.particles.bokeh().len(),
            self.surface.width,
            self.surface.height,
            if self.config.reduced_motion { " (reduced motion)" } else { "" },
        );
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface = Surface::new(width, height);
        self.particles.seed_bokeh(&self.surface, &mut self.rng);
        log::info!(
            "surface resized to {}x{}, {} bokeh",
            self.surface.width,
            self.surface.height,
            self.particles.bokeh().len()
        );
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Advance the simulation to the raw timestamp `raw_seconds`.
    /// Returns the clamped step delta.
    pub fn step(&mut self, raw_seconds: f64) -> f32 {
        let dt = self.clock.tick(raw_seconds);
        let now = self.clock.now();
        let wall = self.clock.wall();

        self.wind.advance(dt);
        self.particles.step(dt, &self.surface, &mut self.rng);
        self.particles.ambient_hearts(dt, &self.surface, &mut self.rng);
        self.director
            .step(now, dt, &self.surface, &mut self.particles, &mut self.rng);

        self.commands.clear();
        for event in self.input.drain() {
            self.gestures
                .interpret(event, wall, &self.surface, &mut self.commands);
        }
        self.gestures.poll(wall, &mut self.commands);

        let commands = std::mem::take(&mut self.commands);
        for command in &commands {
            self.apply(*command);
        }
        self.commands = commands;

        self.events = self.director.take_events();
        dt
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SpawnBloom { pos, scale } => {
                self.particles.spawn_bloom(pos, scale, &mut self.rng)
            }
            Command::HeartBurst { pos } => self.particles.heart_burst(pos, &mut self.rng),
            Command::WindImpulse(dx) => self.wind.apply_impulse(dx),
            Command::Bouquet => self.bouquet(),
            Command::Clear => self.clear(),
            Command::Celebrate => self.celebrate(),
            Command::DismissCelebration => self.director.close_celebration(),
        }
    }

    // -- Button actions --

    /// Plant a cluster of blooms along the lower third, then burst hearts above.
    pub fn bouquet(&mut self) {
        let (w, h) = (self.surface.width, self.surface.height);
        let count = self.config.population.bouquet_blooms.pick(self.config.reduced_motion);
        let rng = &mut self.rng;
        for _ in 0..count {
            let pos = Vec2::new(
                w * 0.5 + rng.range(-w * 0.26, w * 0.26),
                h * 0.78 + rng.range(-h * 0.08, h * 0.05),
            );
            let scale = (w / 560.0).clamp(0.72, 1.2) * rng.range(0.8, 1.1);
            self.particles.spawn_bloom(pos, scale, rng);
        }
        self.particles.heart_burst(self.surface.at(0.5, 0.35), &mut self.rng);
    }

    /// Remove blooms and particles, then sprinkle fresh hearts.
    pub fn clear(&mut self) {
        self.particles.clear();
        let hearts = self.config.population.clear_hearts;
        self.particles
            .scatter_hearts(hearts, &self.surface, &mut self.rng);
    }

    /// Open the overlay, burst at its centre and start the barrage.
    pub fn celebrate(&mut self) {
        let now = self.clock.now();
        let center = self.surface.at(0.5, 0.38);
        self.director.open_celebration(now);
        self.particles.heart_burst(center, &mut self.rng);
        self.particles.firework_burst(center, &mut self.rng);
        self.director.start_barrage(now);
    }

    fn seed_scene(&mut self) {
        let (w, h) = (self.surface.width, self.surface.height);
        let count = (w / 190.0).round().clamp(2.0, 5.0) as usize;
        let rng = &mut self.rng;
        for i in 0..count {
            let along = i as f32 / (count - 1).max(1) as f32;
            let pos = Vec2::new(
                w * (0.2 + along * 0.6) + rng.range(-16.0, 16.0),
                h * 0.82 + rng.range(-12.0, 12.0),
            );
            let scale = (w / 600.0).clamp(0.72, 1.15) * rng.range(0.9, 1.12);
            self.particles.spawn_bloom(pos, scale, rng);
        }
    }

    // -- Output --

    /// Rebuild `frame` from the current state.
    pub fn build_frame(&self, frame: &mut Frame) {
        let view = View {
            surface: self.surface,
            wind: self.wind.value(),
            time: self.clock.now() as f32,
            parallax: self.gestures.parallax(),
        };
        build_frame(&self.particles, &view, frame);
    }

    /// Events emitted during the last step.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    // -- Read access --

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn director(&self) -> &EventDirector {
        &self.director
    }

    pub fn wind(&self) -> &WindModel {
        &self.wind
    }

    pub fn parallax(&self) -> Vec2 {
        self.gestures.parallax()
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }
}
