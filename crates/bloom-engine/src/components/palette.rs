//! Fixed color palettes. Entities pick from these once at construction.

use crate::core::rng::Rng;
use crate::renderer::color::Color;

pub const PETALS: [u32; 5] = [0xff3b6b, 0xff5fa0, 0xff7aa8, 0xff2d55, 0xff4b87];
pub const STEMS: [u32; 3] = [0x2bd18f, 0x2acb7f, 0x1cae6f];
pub const STAMEN: [u32; 3] = [0xffd1e1, 0xffe7f0, 0xffd36b];
pub const FIREWORKS: [u32; 5] = [0xff3b6b, 0xff7aa8, 0xffd1e1, 0xffffff, 0xff2d55];

/// Additive halo tints behind a flower head: (rgb, alpha).
pub const GLOWS: [(u32, f32); 3] = [(0xff3b6b, 0.30), (0xff7aa8, 0.24), (0xff3b6b, 0.18)];

pub fn petal(rng: &mut Rng) -> Color {
    Color::hex(rng.pick(&PETALS))
}

pub fn stem(rng: &mut Rng) -> Color {
    Color::hex(rng.pick(&STEMS))
}

pub fn firework(rng: &mut Rng) -> Color {
    Color::hex(rng.pick(&FIREWORKS))
}

pub fn glow(rng: &mut Rng) -> Color {
    let (rgb, a) = rng.pick(&GLOWS);
    Color::hex(rgb).with_alpha(a)
}

/// Stamen dots cycle through the palette by index.
pub fn stamen(index: usize) -> Color {
    Color::hex(STAMEN[index % STAMEN.len()])
}
