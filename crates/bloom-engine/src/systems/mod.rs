pub mod director;
pub mod particles;
pub mod render;
#[cfg(feature = "vectors")]
pub mod vector;
