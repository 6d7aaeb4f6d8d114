pub mod bloom;
pub mod bokeh;
pub mod entity;
pub mod firework;
pub mod palette;
pub mod particle;
