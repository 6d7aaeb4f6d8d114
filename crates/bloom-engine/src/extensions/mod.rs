// extensions/mod.rs
//
// Math helpers shared by entity kinds and the frame builder.

pub mod easing;

pub use easing::{Easing, lerp, ease};
