//! WebGPU rendering module
//!
//! The scene is rebuilt as flat-colored triangles every frame and drawn in a
//! single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
