//! Celebration overlay, firework barrage and hint deadlines.
//!
//! The overlay and the barrage are started by the same action but run
//! as two independent state machines. Dismissing the overlay never stops
//! a barrage in flight.

use glam::Vec2;

use crate::api::config::{BarrageConfig, CelebrationConfig, SimConfig};
use crate::api::types::SimEvent;
use crate::core::rng::Rng;
use crate::core::surface::Surface;
use crate::systems::particles::ParticleSystem;

/// Overlay state. `close_at` and `next_pulse_at` are only meaningful while open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Celebration {
    pub open: bool,
    pub close_at: f64,
    pub next_pulse_at: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Barrage {
    pub active: bool,
    pub active_until: f64,
    pub spawn_accumulator: f32,
}

pub struct EventDirector {
    celebration: Celebration,
    barrage: Barrage,
    hint_until: Option<f64>,
    celebration_config: CelebrationConfig,
    barrage_config: BarrageConfig,
    hint_duration: f64,
    reduced_motion: bool,
    events: Vec<SimEvent>,
}

impl EventDirector {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            celebration: Celebration::default(),
            barrage: Barrage::default(),
            hint_until: None,
            celebration_config: config.celebration,
            barrage_config: config.barrage,
            hint_duration: config.hint_duration,
            reduced_motion: config.reduced_motion,
            events: Vec::new(),
        }
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub fn barrage(&self) -> &Barrage {
        &self.barrage
    }

    pub fn is_open(&self) -> bool {
        self.celebration.open
    }

    pub fn barrage_active(&self) -> bool {
        self.barrage.active
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_until.is_some()
    }

    /// Take the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Transitions --

    pub fn show_hint(&mut self, now: f64) {
        self.hint_until = Some(now + self.hint_duration);
        self.events.push(SimEvent::HintShown);
    }

    /// Open the overlay, or restart its window if it is already open.
    pub fn open_celebration(&mut self, now: f64) {
        let reopened = self.celebration.open;
        self.celebration = Celebration {
            open: true,
            close_at: now + self.celebration_config.duration,
            next_pulse_at: now + self.celebration_config.first_pulse_delay,
        };
        if reopened {
            log::debug!("celebration re-triggered, closes at {:.2}", self.celebration.close_at);
        } else {
            log::debug!("celebration opened, closes at {:.2}", self.celebration.close_at);
            self.events.push(SimEvent::CelebrationOpened);
        }
    }

    /// Close the overlay and clear its timers. The barrage is untouched.
    pub fn close_celebration(&mut self) {
        if !self.celebration.open {
            return;
        }
        self.celebration = Celebration::default();
        log::debug!("celebration closed");
        self.events.push(SimEvent::CelebrationClosed);
    }

    pub fn start_barrage(&mut self, now: f64) {
        let duration = self.barrage_config.duration.pick(self.reduced_motion);
        if !self.barrage.active {
            self.events.push(SimEvent::BarrageStarted);
        }
        self.barrage = Barrage {
            active: true,
            active_until: now + duration,
            spawn_accumulator: 0.0,
        };
    }

    // -- Stepping --

    /// Advance every deadline. May inject pulse hearts and rockets.
    pub fn step(
        &mut self,
        now: f64,
        dt: f32,
        surface: &Surface,
        particles: &mut ParticleSystem,
        rng: &mut Rng,
    ) {
        self.step_hint(now);
        self.step_celebration(now, surface, particles, rng);
        self.step_barrage(now, dt, surface, particles, rng);
    }

    fn step_hint(&mut self, now: f64) {
        if let Some(until) = self.hint_until {
            if now > until {
                self.hint_until = None;
                self.events.push(SimEvent::HintHidden);
            }
        }
    }

    fn step_celebration(
        &mut self,
        now: f64,
        surface: &Surface,
        particles: &mut ParticleSystem,
        rng: &mut Rng,
    ) {
        if !self.celebration.open {
            return;
        }
        if now > self.celebration.close_at {
            self.close_celebration();
            return;
        }
        if now < self.celebration.next_pulse_at {
            return;
        }
        let interval = self.celebration_config.pulse_interval.pick(self.reduced_motion);
        self.celebration.next_pulse_at = now + interval;
        let pos = surface.at(rng.range(0.28, 0.72), rng.range(0.22, 0.48));
        particles.pulse_hearts(pos, rng);
    }

    fn step_barrage(
        &mut self,
        now: f64,
        dt: f32,
        surface: &Surface,
        particles: &mut ParticleSystem,
        rng: &mut Rng,
    ) {
        if !self.barrage.active {
            return;
        }
        if now > self.barrage.active_until {
            self.barrage.active = false;
            log::debug!("barrage finished");
            self.events.push(SimEvent::BarrageEnded);
            return;
        }
        let rate = self.barrage_config.rate.pick(self.reduced_motion).max(f32::EPSILON);
        self.barrage.spawn_accumulator += dt;
        if self.barrage.spawn_accumulator >= 1.0 / rate {
            self.barrage.spawn_accumulator = 0.0;
            let x = rng.range(surface.width * 0.12, surface.width * 0.88);
            particles.launch_rocket(Vec2::new(x, surface.height + 10.0), rng);
        }
    }
}
