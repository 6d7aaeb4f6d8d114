//! Turns raw pointer, key and button input into simulation commands.

use glam::Vec2;

use crate::api::config::GestureConfig;
use crate::api::types::ButtonIntent;
use crate::core::surface::Surface;
use crate::input::queue::{InputEvent, KEY_ESCAPE};

/// What the context should do in response to input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SpawnBloom { pos: Vec2, scale: f32 },
    HeartBurst { pos: Vec2 },
    /// Horizontal drag delta in pixels.
    WindImpulse(f32),
    Bouquet,
    Clear,
    Celebrate,
    DismissCelebration,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    id: u32,
    down: Vec2,
    last: Vec2,
}

/// Position and wall time of the most recent press.
#[derive(Debug, Clone, Copy)]
struct LastDown {
    pos: Vec2,
    at: f64,
}

/// A tap held back until it can no longer become a double tap.
#[derive(Debug, Clone, Copy)]
struct PendingTap {
    down: Vec2,
    deadline: f64,
    command: Command,
}

pub struct GestureInterpreter {
    config: GestureConfig,
    press: Option<Press>,
    last_down: Option<LastDown>,
    pending: Option<PendingTap>,
    suppress_tap: bool,
    parallax: Vec2,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
            last_down: None,
            pending: None,
            suppress_tap: false,
            parallax: Vec2::ZERO,
        }
    }

    /// Pointer-derived offset in `[-1, 1]` on both axes.
    pub fn parallax(&self) -> Vec2 {
        self.parallax
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn has_pending_tap(&self) -> bool {
        self.pending.is_some()
    }

    /// Interpret one event at wall time `now` (seconds).
    pub fn interpret(
        &mut self,
        event: InputEvent,
        now: f64,
        surface: &Surface,
        out: &mut Vec<Command>,
    ) {
        self.poll(now, out);
        match event {
            InputEvent::PointerDown { id, x, y } => {
                self.pointer_down(id, surface.clamp(Vec2::new(x, y)), now, out)
            }
            InputEvent::PointerMove { id, x, y } => {
                self.pointer_move(id, surface.clamp(Vec2::new(x, y)), surface, out)
            }
            InputEvent::PointerUp { id, x, y } => {
                self.pointer_up(id, surface.clamp(Vec2::new(x, y)), surface)
            }
            InputEvent::PointerCancel { id, .. } => {
                if self.tracks(id) {
                    self.press = None;
                    self.suppress_tap = false;
                }
            }
            InputEvent::HoverMove { x, y } => {
                if self.press.is_none() {
                    self.parallax = surface.parallax(surface.clamp(Vec2::new(x, y)));
                }
            }
            InputEvent::Button(intent) => out.push(match intent {
                ButtonIntent::Bouquet => Command::Bouquet,
                ButtonIntent::Clear => Command::Clear,
                ButtonIntent::Celebrate => Command::Celebrate,
            }),
            InputEvent::KeyDown { key_code } => {
                if key_code == KEY_ESCAPE {
                    out.push(Command::DismissCelebration);
                }
            }
            InputEvent::DismissOverlay => out.push(Command::DismissCelebration),
        }
    }

    /// Commit a pending tap whose double-tap window has elapsed.
    pub fn poll(&mut self, now: f64, out: &mut Vec<Command>) {
        if let Some(pending) = self.pending {
            if now >= pending.deadline {
                self.pending = None;
                out.push(pending.command);
            }
        }
    }

    fn tracks(&self, id: u32) -> bool {
        self.press.is_some_and(|p| p.id == id)
    }

    fn pointer_down(&mut self, id: u32, pos: Vec2, now: f64, out: &mut Vec<Command>) {
        let radius = self.config.double_tap_radius;

        if let Some(pending) = self.pending {
            if pending.down.distance_squared(pos) >= radius * radius {
                self.pending = None;
                out.push(pending.command);
            }
        }

        let is_double = self.last_down.is_some_and(|last| {
            now - last.at < self.config.double_tap_window
                && last.pos.distance_squared(pos) < radius * radius
        });

        if is_double {
            log::debug!("double tap at ({:.0}, {:.0})", pos.x, pos.y);
            out.push(Command::HeartBurst { pos });
            self.pending = None;
            self.suppress_tap = true;
            self.last_down = None;
        } else {
            self.suppress_tap = false;
            self.last_down = Some(LastDown { pos, at: now });
        }

        self.press = Some(Press {
            id,
            down: pos,
            last: pos,
        });
    }

    fn pointer_move(&mut self, id: u32, pos: Vec2, surface: &Surface, out: &mut Vec<Command>) {
        self.parallax = surface.parallax(pos);
        let Some(press) = self.press.as_mut() else {
            return;
        };
        if press.id != id {
            return;
        }
        let dx = pos.x - press.last.x;
        press.last = pos;
        if dx != 0.0 {
            out.push(Command::WindImpulse(dx));
        }
    }

    fn pointer_up(&mut self, id: u32, pos: Vec2, surface: &Surface) {
        let Some(press) = self.press else {
            return;
        };
        if press.id != id {
            return;
        }
        self.press = None;
        let suppressed = std::mem::take(&mut self.suppress_tap);
        if suppressed || press.down.distance(pos) >= self.config.tap_slop {
            return;
        }
        let deadline = self
            .last_down
            .map_or(0.0, |last| last.at + self.config.double_tap_window);
        self.pending = Some(PendingTap {
            down: press.down,
            deadline,
            command: tap_command(pos, surface),
        });
    }
}

/// Placement for a bloom planted by a tap.
fn tap_command(pos: Vec2, surface: &Surface) -> Command {
    let h = surface.height;
    let top = h * 0.28;
    let bottom = (h - (h * 0.08).max(18.0)).max(top);
    Command::SpawnBloom {
        pos: Vec2::new(pos.x, pos.y.clamp(top, bottom)),
        scale: (surface.width / 520.0).clamp(0.75, 1.15),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GestureInterpreter, Surface, Vec<Command>) {
        (
            GestureInterpreter::new(GestureConfig::default()),
            Surface::new(800.0, 600.0),
            Vec::new(),
        )
    }

    fn tap(
        g: &mut GestureInterpreter,
        s: &Surface,
        out: &mut Vec<Command>,
        x: f32,
        y: f32,
        t: f64,
    ) {
        g.interpret(InputEvent::PointerDown { id: 1, x, y }, t, s, out);
        g.interpret(InputEvent::PointerUp { id: 1, x, y }, t + 0.05, s, out);
    }

    fn blooms(out: &[Command]) -> usize {
        out.iter()
            .filter(|c| matches!(c, Command::SpawnBloom { .. }))
            .count()
    }

    fn bursts(out: &[Command]) -> usize {
        out.iter()
            .filter(|c| matches!(c, Command::HeartBurst { .. }))
            .count()
    }

    #[test]
    fn double_tap_yields_hearts_only() {
        let (mut g, s, mut out) = setup();
        tap(&mut g, &s, &mut out, 400.0, 300.0, 0.0);
        tap(&mut g, &s, &mut out, 410.0, 305.0, 0.2);
        g.poll(5.0, &mut out);
        assert_eq!(bursts(&out), 1);
        assert_eq!(blooms(&out), 0);
    }

    #[test]
    fn separated_taps_plant_two_blooms() {
        let (mut g, s, mut out) = setup();
        tap(&mut g, &s, &mut out, 100.0, 300.0, 0.0);
        tap(&mut g, &s, &mut out, 600.0, 300.0, 0.1);
        g.poll(5.0, &mut out);
        assert_eq!(blooms(&out), 2);
        assert_eq!(bursts(&out), 0);
    }

    #[test]
    fn slow_taps_at_one_spot_plant_two_blooms() {
        let (mut g, s, mut out) = setup();
        tap(&mut g, &s, &mut out, 400.0, 300.0, 0.0);
        tap(&mut g, &s, &mut out, 400.0, 300.0, 0.5);
        g.poll(5.0, &mut out);
        assert_eq!(blooms(&out), 2);
        assert_eq!(bursts(&out), 0);
    }

    #[test]
    fn tap_is_held_until_window_elapses() {
        let (mut g, s, mut out) = setup();
        tap(&mut g, &s, &mut out, 400.0, 300.0, 0.0);
        g.poll(0.2, &mut out);
        assert!(out.is_empty());
        assert!(g.has_pending_tap());
        g.poll(0.33, &mut out);
        assert_eq!(blooms(&out), 1);
        assert!(!g.has_pending_tap());
    }

    #[test]
    fn tap_placement_is_clamped() {
        let (mut g, s, mut out) = setup();
        tap(&mut g, &s, &mut out, 400.0, 10.0, 0.0);
        tap(&mut g, &s, &mut out, 700.0, 599.0, 1.0);
        g.poll(5.0, &mut out);
        let ys: Vec<f32> = out
            .iter()
            .filter_map(|c| match c {
                Command::SpawnBloom { pos, scale } => {
                    assert!((0.75..=1.15).contains(scale), "scale was {}", scale);
                    Some(pos.y)
                }
                _ => None,
            })
            .collect();
        assert_eq!(ys, vec![600.0 * 0.28, 600.0 - 48.0]);
    }

    #[test]
    fn drag_produces_wind_and_no_tap() {
        let (mut g, s, mut out) = setup();
        g.interpret(InputEvent::PointerDown { id: 3, x: 100.0, y: 300.0 }, 0.0, &s, &mut out);
        g.interpret(InputEvent::PointerMove { id: 3, x: 130.0, y: 300.0 }, 0.02, &s, &mut out);
        g.interpret(InputEvent::PointerMove { id: 3, x: 120.0, y: 310.0 }, 0.04, &s, &mut out);
        g.interpret(InputEvent::PointerUp { id: 3, x: 120.0, y: 310.0 }, 0.06, &s, &mut out);
        g.poll(5.0, &mut out);
        assert_eq!(out, vec![Command::WindImpulse(30.0), Command::WindImpulse(-10.0)]);
    }

    #[test]
    fn untracked_pointer_is_ignored() {
        let (mut g, s, mut out) = setup();
        g.interpret(InputEvent::PointerDown { id: 1, x: 100.0, y: 300.0 }, 0.0, &s, &mut out);
        g.interpret(InputEvent::PointerMove { id: 2, x: 300.0, y: 300.0 }, 0.01, &s, &mut out);
        g.interpret(InputEvent::PointerUp { id: 2, x: 100.0, y: 300.0 }, 0.02, &s, &mut out);
        assert!(out.is_empty());
        assert!(g.is_pressed());
        // Parallax still follows any pointer.
        assert_eq!(g.parallax(), s.parallax(Vec2::new(300.0, 300.0)));
    }

    #[test]
    fn cancel_releases_without_tap() {
        let (mut g, s, mut out) = setup();
        g.interpret(InputEvent::PointerDown { id: 1, x: 100.0, y: 300.0 }, 0.0, &s, &mut out);
        g.interpret(InputEvent::PointerCancel { id: 1, x: 100.0, y: 300.0 }, 0.05, &s, &mut out);
        g.poll(5.0, &mut out);
        assert!(out.is_empty());
        assert!(!g.is_pressed());
    }

    #[test]
    fn hover_updates_parallax_only_when_released() {
        let (mut g, s, mut out) = setup();
        g.interpret(InputEvent::HoverMove { x: 800.0, y: 0.0 }, 0.0, &s, &mut out);
        assert_eq!(g.parallax(), Vec2::new(1.0, -1.0));
        g.interpret(InputEvent::PointerDown { id: 1, x: 400.0, y: 300.0 }, 0.1, &s, &mut out);
        g.interpret(InputEvent::HoverMove { x: 0.0, y: 600.0 }, 0.2, &s, &mut out);
        assert_eq!(g.parallax(), Vec2::new(1.0, -1.0));
        assert!(out.is_empty());
    }

    #[test]
    fn coordinates_outside_surface_are_clamped() {
        let (mut g, s, mut out) = setup();
        g.interpret(InputEvent::HoverMove { x: -500.0, y: 9000.0 }, 0.0, &s, &mut out);
        assert_eq!(g.parallax(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn escape_and_dismiss_map_to_dismissal() {
        let (mut g, s, mut out) = setup();
        g.interpret(InputEvent::KeyDown { key_code: KEY_ESCAPE }, 0.0, &s, &mut out);
        g.interpret(InputEvent::KeyDown { key_code: 32 }, 0.0, &s, &mut out);
        g.interpret(InputEvent::DismissOverlay, 0.0, &s, &mut out);
        g.interpret(InputEvent::Button(ButtonIntent::Celebrate), 0.0, &s, &mut out);
        assert_eq!(
            out,
            vec![
                Command::DismissCelebration,
                Command::DismissCelebration,
                Command::Celebrate
            ]
        );
    }
}
