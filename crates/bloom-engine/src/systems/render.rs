//! Builds the per-frame draw list from entity snapshots.
//!
//! Paint order: background, bokeh, blooms, rockets, firework sparks, then
//! hearts and sparks on top.

use std::f32::consts::TAU;

use glam::{Affine2, Vec2};

use crate::components::bloom::BloomState;
use crate::components::entity::{Animated, RenderState};
use crate::components::palette;
use crate::core::surface::Surface;
use crate::extensions::easing::lerp;
use crate::renderer::color::Color;
use crate::renderer::draw::{ColorStop, Fill, Frame, Paint, Shape};
use crate::systems::particles::ParticleSystem;

/// Frame-wide values shared by every entity drawing.
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub surface: Surface,
    pub wind: f32,
    /// Simulation time in seconds, drives petal wobble and sway phase.
    pub time: f32,
    pub parallax: Vec2,
}

/// Offset (px) applied to bloom bases at full parallax.
const PARALLAX_SHIFT: f32 = 18.0;

/// Rebuild `frame` from the current simulation state.
pub fn build_frame(particles: &ParticleSystem, view: &View, frame: &mut Frame) {
    frame.clear();
    frame.width = view.surface.width;
    frame.height = view.surface.height;

    draw_background(frame, view);

    for b in particles.bokeh() {
        push_state(frame, &b.snapshot(), view);
    }
    for b in particles.blooms() {
        push_state(frame, &b.snapshot(), view);
    }
    for r in particles.rockets() {
        push_state(frame, &r.snapshot(), view);
    }
    for s in particles.sparks() {
        push_state(frame, &s.snapshot(), view);
    }
    for p in particles.particles() {
        push_state(frame, &p.snapshot(), view);
    }
}

fn stop(offset: f32, color: Color) -> ColorStop {
    ColorStop::new(offset, color)
}

fn circle(center: Vec2, radius: f32) -> Shape {
    Shape::Circle { center, radius }
}

fn draw_background(frame: &mut Frame, view: &View) {
    let (w, h) = (view.surface.width, view.surface.height);
    let p = view.parallax;
    let fill = Fill::Radial {
        start: Vec2::new(w * (0.2 + p.x * 0.06), h * (0.12 + p.y * 0.06)),
        start_radius: 20.0,
        end: Vec2::new(w * 0.5, h * 0.5),
        end_radius: w.max(h),
        stops: vec![
            stop(0.0, Color::rgba8(255, 59, 107, 0.14)),
            stop(0.55, Color::rgba8(255, 122, 168, 0.06)),
            stop(1.0, Color::rgba8(18, 0, 24, 0.0)),
        ],
    };
    frame.push(
        Shape::Rect {
            pos: Vec2::ZERO,
            size: view.surface.size(),
        },
        Paint::gradient(fill),
    );
}

fn push_state(frame: &mut Frame, state: &RenderState, view: &View) {
    match state {
        RenderState::Bloom(b) => draw_bloom(frame, b, view),
        RenderState::Bokeh { pos, radius, alpha } => {
            let tint = Color::rgba8(255, 122, 168, *alpha);
            let fill = Fill::radial(
                *pos,
                1.0,
                *radius,
                &[stop(0.0, tint), stop(1.0, tint.with_alpha(0.0))],
            );
            frame.push(circle(*pos, *radius), Paint::gradient(fill));
        }
        RenderState::Rocket { pos, trail, color } => {
            let n = trail.len() as f32;
            for (i, p) in trail.iter().enumerate() {
                let a = i as f32 / n;
                frame.push(
                    circle(*p, 2.0 + a * 1.2),
                    Paint::solid(*color).with_alpha(a * 0.45).additive(),
                );
            }
            frame.push(
                circle(*pos, 2.1),
                Paint::solid(Color::WHITE.with_alpha(0.95)).with_alpha(0.95).additive(),
            );
        }
        RenderState::FireworkSpark { pos, radius, alpha, color } => {
            frame.push(circle(*pos, *radius), Paint::solid(*color).with_alpha(*alpha).additive());
            frame.push(
                circle(*pos, radius * 2.3),
                Paint::solid(Color::WHITE.with_alpha(0.9))
                    .with_alpha(alpha * 0.18)
                    .additive(),
            );
        }
        RenderState::Spark { pos, radius, alpha } => {
            frame.push(
                circle(*pos, *radius),
                Paint::solid(Color::WHITE.with_alpha(0.92)).with_alpha(*alpha),
            );
        }
        RenderState::Heart { pos, size, rotation, alpha, color } => {
            frame.push(
                Shape::Heart { center: *pos, size: *size, rotation: *rotation },
                Paint::solid(*color).with_alpha(*alpha),
            );
            frame.push(
                Shape::Heart { center: *pos, size: size * 1.12, rotation: *rotation },
                Paint::solid(Color::WHITE.with_alpha(0.85))
                    .with_alpha(alpha * 0.22)
                    .additive(),
            );
        }
    }
}

// -- Blooms --

fn draw_bloom(frame: &mut Frame, b: &BloomState, view: &View) {
    let stem_t = b.stem_progress;
    let sway = view.wind * (0.7 + 0.4 * (b.seed + view.time * 0.7).sin());
    let base = b.base + view.parallax * PARALLAX_SHIFT;
    let top_y = base.y - b.stem_length * stem_t;
    let bend = sway * (0.35 + 0.65 * stem_t) * b.stem_length * 0.25;
    let top = Vec2::new(base.x + bend, top_y);

    let stem_fill = Fill::linear(
        base,
        top,
        &[
            stop(0.0, Color::rgba8(12, 90, 60, 0.0)),
            stop(0.18, b.stem_color),
            stop(1.0, Color::rgba8(42, 203, 127, 0.30)),
        ],
    );
    frame.push(
        Shape::Curve {
            from: base,
            ctrl1: Vec2::new(base.x + bend * 0.2, lerp(base.y, top_y, 0.35)),
            ctrl2: Vec2::new(base.x + bend * 0.7, lerp(base.y, top_y, 0.7)),
            to: top,
            width: 6.0 * b.scale,
        },
        Paint::gradient(stem_fill),
    );

    let leaves = b.leaf_count;
    for i in 0..leaves {
        let at = lerp(0.35, 0.75, i as f32 / leaves.saturating_sub(1).max(1) as f32);
        let dir = if i % 2 == 0 { -1.0 } else { 1.0 };
        let len = (40.0 + 22.0 * (b.seed * 2.0 + i as f32).sin()) * b.scale;
        draw_leaf(frame, base.lerp(top, at), dir, len, stem_t, b.stem_color);
    }

    draw_head(frame, top, b, sway, view.time);
}

fn draw_leaf(frame: &mut Frame, at: Vec2, dir: f32, len: f32, open: f32, color: Color) {
    if open <= 0.0 {
        return;
    }
    let xf = Affine2::from_translation(at)
        * Affine2::from_angle(dir * (0.75 + 0.25 * open))
        * Affine2::from_scale(Vec2::splat(open));
    let base = xf.transform_point2(Vec2::ZERO);
    let tip = xf.transform_point2(Vec2::new(len, 0.0));
    let fill = Fill::linear(
        base,
        tip,
        &[
            stop(0.0, Color::rgba8(255, 255, 255, 0.02)),
            stop(0.25, color),
            stop(1.0, Color::rgba8(18, 209, 143, 0.12)),
        ],
    );
    frame.push(
        Shape::Lens {
            base,
            tip,
            half_width: len * 0.55 * open,
            ctrl_at: 0.4,
        },
        Paint::gradient(fill),
    );
}

fn draw_head(frame: &mut Frame, at: Vec2, b: &BloomState, sway: f32, time: f32) {
    let r = b.head_radius;
    let open = b.open_progress;
    let head = Affine2::from_translation(at) * Affine2::from_angle(sway * 0.55);

    frame.push(
        circle(at, r * (1.9 + 0.4 * open)),
        Paint::solid(b.glow).additive(),
    );

    let petals = b.petal_count.max(1);
    for i in 0..petals {
        let fi = i as f32;
        let angle = fi / petals as f32 * TAU;
        let wobble = 0.15 * (b.seed * 3.0 + fi * 1.7 + time * 1.2).sin();
        let p_open = open * (0.85 + 0.15 * (b.seed + fi).sin());
        draw_petal(frame, head * Affine2::from_angle(angle + wobble), r, p_open, b);
    }

    let inner = (petals as f32 * 0.6).clamp(5.0, 10.0).round() as u32;
    for i in 0..inner {
        let fi = i as f32;
        let angle = fi / inner as f32 * TAU + 0.22;
        let wobble = 0.18 * (b.seed * 2.0 + fi * 2.3 + time * 1.35).sin();
        let petal = head * Affine2::from_angle(angle + wobble);
        draw_inner_petal(frame, petal, r * 0.72, open * 0.92, b);
    }

    let center_r = r * lerp(0.35, 0.52, open);
    let center_fill = Fill::radial(
        at,
        1.0,
        center_r * 1.4,
        &[
            stop(0.0, Color::rgba8(255, 245, 250, 0.95)),
            stop(0.35, Color::rgba8(255, 197, 220, 0.92)),
            stop(1.0, Color::rgba8(255, 59, 107, 0.70)),
        ],
    );
    frame.push(circle(at, center_r), Paint::gradient(center_fill));

    draw_stamen(frame, head, center_r, open, b.seed);
}

/// Lens from the local origin (shifted up by `lift`) to `(0, -len)`.
fn petal_lens(xf: Affine2, len: f32, half_width: f32) -> Shape {
    Shape::Lens {
        base: xf.transform_point2(Vec2::ZERO),
        tip: xf.transform_point2(Vec2::new(0.0, -len)),
        half_width,
        ctrl_at: 0.55,
    }
}

fn draw_petal(frame: &mut Frame, xf: Affine2, r: f32, open: f32, b: &BloomState) {
    let len = r * lerp(1.2, 2.05, open);
    let width = r * lerp(0.55, 0.95, open);
    let lift = r * lerp(0.15, 0.45, open);
    let tip = r * lerp(0.55, 1.0, open);
    let xf = xf * Affine2::from_translation(Vec2::new(0.0, -lift));

    let fill = Fill::linear(
        xf.transform_point2(Vec2::new(0.0, -r * 0.2)),
        xf.transform_point2(Vec2::new(0.0, -len)),
        &[
            stop(0.0, b.petal_color2),
            stop(0.45, b.petal_color),
            stop(1.0, Color::rgba8(255, 255, 255, 0.90)),
        ],
    );
    frame.push(petal_lens(xf, len, width), Paint::gradient(fill).with_alpha(open));

    frame.push(
        Shape::line(
            xf.transform_point2(Vec2::new(0.0, -tip)),
            xf.transform_point2(Vec2::new(0.0, -len)),
            1.0,
        ),
        Paint::solid(Color::rgba8(255, 255, 255, 0.55)).with_alpha(lerp(0.0, 0.22, open)),
    );
}

fn draw_inner_petal(frame: &mut Frame, xf: Affine2, r: f32, open: f32, b: &BloomState) {
    let len = r * lerp(1.05, 1.55, open);
    let width = r * lerp(0.45, 0.78, open);
    let lift = r * lerp(0.1, 0.26, open);
    let xf = xf * Affine2::from_translation(Vec2::new(0.0, -lift));

    let fill = Fill::linear(
        xf.transform_point2(Vec2::new(0.0, -r * 0.1)),
        xf.transform_point2(Vec2::new(0.0, -len)),
        &[
            stop(0.0, Color::rgba8(255, 255, 255, 0.85)),
            stop(0.35, b.petal_color2),
            stop(1.0, b.petal_color),
        ],
    );
    frame.push(
        petal_lens(xf, len, width),
        Paint::gradient(fill).with_alpha(lerp(0.0, 0.95, open)),
    );
}

fn draw_stamen(frame: &mut Frame, head: Affine2, center_r: f32, open: f32, seed: f32) {
    let dots = lerp(8.0, 18.0, open).round() as usize;
    let ring = center_r * lerp(0.4, 0.85, open);
    let dot_r = center_r * lerp(0.09, 0.13, open);

    for i in 0..dots {
        let fi = i as f32;
        let a = fi / dots as f32 * TAU + 0.3 * (seed + fi).sin();
        let rr = ring * (0.82 + 0.22 * (seed * 2.0 + fi).sin());
        let p = head.transform_point2(Vec2::from_angle(a) * rr);
        frame.push(
            circle(p, dot_r),
            Paint::solid(palette::stamen(i)).with_alpha(0.85).additive(),
        );
        frame.push(
            circle(p, dot_r * 1.8),
            Paint::solid(Color::WHITE.with_alpha(0.85))
                .with_alpha(0.22)
                .additive(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SimConfig;
    use crate::components::bloom::Bloom;
    use crate::core::rng::Rng;
    use crate::renderer::draw::Blend;

    fn view() -> View {
        View {
            surface: Surface::new(800.0, 600.0),
            wind: 0.0,
            time: 0.0,
            parallax: Vec2::ZERO,
        }
    }

    fn lenses(frame: &Frame) -> usize {
        frame
            .instructions()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Lens { .. }))
            .count()
    }

    #[test]
    fn empty_scene_is_background_only() {
        let ps = ParticleSystem::new(&SimConfig::default());
        let mut frame = Frame::new(0.0, 0.0);
        build_frame(&ps, &view(), &mut frame);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.width, 800.0);
        assert!(matches!(frame.instructions()[0].shape, Shape::Rect { .. }));
        assert!(matches!(frame.instructions()[0].paint.fill, Fill::Radial { .. }));
    }

    #[test]
    fn bokeh_paint_before_blooms() {
        let v = view();
        let mut rng = Rng::new(1);
        let mut ps = ParticleSystem::new(&SimConfig::default());
        ps.seed_bokeh(&v.surface, &mut rng);
        ps.spawn_bloom(Vec2::new(400.0, 500.0), 1.0, &mut rng);
        let mut frame = Frame::new(0.0, 0.0);
        build_frame(&ps, &v, &mut frame);

        let bokeh = ps.bokeh().len();
        for inst in &frame.instructions()[1..=bokeh] {
            assert!(matches!(inst.shape, Shape::Circle { .. }));
            assert!(matches!(inst.paint.fill, Fill::Radial { .. }));
        }
        // The stem follows the glows.
        assert!(matches!(frame.instructions()[bokeh + 1].shape, Shape::Curve { .. }));
    }

    #[test]
    fn closed_bloom_draws_no_petals() {
        let mut rng = Rng::new(2);
        let mut ps = ParticleSystem::new(&SimConfig::default());
        ps.spawn_bloom(Vec2::new(400.0, 500.0), 1.0, &mut rng);
        let mut frame = Frame::new(0.0, 0.0);
        build_frame(&ps, &view(), &mut frame);
        // Petal alpha is zero until opening starts, and leaves are zero-sized.
        assert_eq!(lenses(&frame), 0);
    }

    #[test]
    fn open_bloom_draws_every_petal() {
        let mut bloom = Bloom::new(Vec2::new(400.0, 500.0), 1.0, &mut Rng::new(3)).with_life(10.0);
        bloom.update(9.0);
        let RenderState::Bloom(state) = bloom.snapshot() else {
            panic!("expected bloom state");
        };
        let mut frame = Frame::new(800.0, 600.0);
        draw_bloom(&mut frame, &state, &view());

        let inner = (state.petal_count as f32 * 0.6).clamp(5.0, 10.0).round() as usize;
        let expected = state.leaf_count as usize + state.petal_count as usize + inner;
        assert_eq!(lenses(&frame), expected);

        // 18 stamen dots with a halo each, all additive.
        let additive_circles = frame
            .instructions()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Circle { .. }) && i.paint.blend == Blend::Additive)
            .count();
        assert_eq!(additive_circles, 1 + 18 * 2);
    }

    #[test]
    fn parallax_shifts_bloom_base() {
        let mut ps = ParticleSystem::new(&SimConfig::default());
        ps.spawn_bloom(Vec2::new(400.0, 500.0), 1.0, &mut Rng::new(4));
        let mut v = view();
        v.parallax = Vec2::new(1.0, -1.0);
        let mut frame = Frame::new(0.0, 0.0);
        build_frame(&ps, &v, &mut frame);
        let stem = frame
            .instructions()
            .iter()
            .find_map(|i| match i.shape {
                Shape::Curve { from, .. } => Some(from),
                _ => None,
            })
            .unwrap();
        assert_eq!(stem, Vec2::new(418.0, 482.0));
    }

    #[test]
    fn wind_bends_the_stem() {
        let mut bloom = Bloom::new(Vec2::new(400.0, 500.0), 1.0, &mut Rng::new(5)).with_life(8.0);
        bloom.update(4.0);
        let RenderState::Bloom(state) = bloom.snapshot() else {
            panic!("expected bloom state");
        };
        let mut v = view();
        v.wind = 1.0;
        let mut frame = Frame::new(800.0, 600.0);
        draw_bloom(&mut frame, &state, &v);
        let Shape::Curve { from, to, .. } = frame.instructions()[0].shape else {
            panic!("stem first");
        };
        assert!(to.x > from.x, "stem top at {} vs base {}", to.x, from.x);
        assert!((from.y - to.y - state.stem_length).abs() < 1e-3);
    }

    #[test]
    fn fireworks_are_additive() {
        let mut rng = Rng::new(6);
        let mut ps = ParticleSystem::new(&SimConfig::default().with_reduced_motion(true));
        ps.firework_burst(Vec2::new(400.0, 200.0), &mut rng);
        let mut frame = Frame::new(0.0, 0.0);
        build_frame(&ps, &view(), &mut frame);
        // Background plus core and halo per spark.
        assert_eq!(frame.len(), 1 + 40 * 2);
        assert!(frame.instructions()[1..].iter().all(|i| i.paint.blend == Blend::Additive));
    }
}
