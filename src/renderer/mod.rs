//! WebGPU rendering module
//!
//! Draws every entity as a flat-colored quad at its world rectangle.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Palette;
