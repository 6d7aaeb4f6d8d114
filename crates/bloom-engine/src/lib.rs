pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{
    BarrageConfig, CelebrationConfig, DensityBand, GestureConfig, MotionScaled,
    PopulationConfig, SimConfig,
};
pub use api::context::SimContext;
pub use api::types::{ButtonIntent, SimEvent, WireEvent};
pub use core::rng::Rng;
pub use core::surface::Surface;
pub use core::time::{Clock, DEFAULT_MAX_DT};
pub use core::wind::{WindConfig, WindModel};
pub use components::bloom::{Bloom, BloomState};
pub use components::bokeh::Bokeh;
pub use components::entity::{Animated, Lifetime, RenderState};
pub use components::firework::{FireworkRocket, FireworkSpark};
pub use components::particle::{HeartParticle, HeartStyle, Particle, Spark};
pub use input::gesture::{Command, GestureInterpreter};
pub use input::queue::{InputEvent, InputQueue, KEY_ESCAPE};
pub use renderer::{Blend, Color, ColorStop, DrawInstruction, Fill, Frame, Paint, Renderer, Shape};
pub use systems::director::EventDirector;
pub use systems::particles::ParticleSystem;
pub use systems::render::{build_frame, View};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};

#[cfg(feature = "vectors")]
pub use systems::vector::{BlendBatch, VectorState, VectorVertex};

pub use extensions::{Easing, lerp, ease};
