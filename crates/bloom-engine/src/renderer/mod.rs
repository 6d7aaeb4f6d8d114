pub mod color;
pub mod draw;
pub mod traits;

pub use color::Color;
pub use draw::{Blend, ColorStop, DrawInstruction, Fill, Frame, Paint, Shape};
pub use traits::Renderer;
