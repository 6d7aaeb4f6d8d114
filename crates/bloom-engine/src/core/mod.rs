pub mod rng;
pub mod surface;
pub mod time;
pub mod wind;
