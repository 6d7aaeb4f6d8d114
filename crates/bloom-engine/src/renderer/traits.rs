//! Renderer contract.
//!
//! The simulation never draws. It hands a [`Frame`] to whatever implements
//! this trait: the lyon tessellator in `systems::vector`, or a host-side
//! Canvas 2D / WebGPU backend reading the same draw list.

use super::draw::Frame;

pub trait Renderer {
    /// Backend identifier (e.g. "lyon", "canvas2d").
    fn backend(&self) -> &'static str;

    /// Consume one complete frame. Called once per simulation step.
    fn draw(&mut self, frame: &Frame);

    /// Handle a surface resize, in surface pixels.
    fn resize(&mut self, width: u32, height: u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::color::Color;
    use crate::renderer::draw::{Paint, Shape};
    use glam::Vec2;

    /// Records instruction counts instead of drawing.
    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        instructions: usize,
        size: (u32, u32),
    }

    impl Renderer for CountingRenderer {
        fn backend(&self) -> &'static str {
            "counting"
        }

        fn draw(&mut self, frame: &Frame) {
            self.frames += 1;
            self.instructions += frame.len();
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    #[test]
    fn renderer_is_object_safe() {
        let mut counter = CountingRenderer::default();
        let mut frame = Frame::new(10.0, 10.0);
        frame.push(
            Shape::Circle {
                center: Vec2::ZERO,
                radius: 1.0,
            },
            Paint::solid(Color::WHITE),
        );
        {
            let backend: &mut dyn Renderer = &mut counter;
            backend.draw(&frame);
            backend.draw(&frame);
            backend.resize(20, 30);
            assert_eq!(backend.backend(), "counting");
        }
        assert_eq!(counter.frames, 2);
        assert_eq!(counter.instructions, 2);
        assert_eq!(counter.size, (20, 30));
    }
}
