//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Tank palette
pub mod colors {
    pub const WATER_TOP: [f32; 4] = [0.647, 0.953, 0.988, 1.0]; // cyan-200
    pub const WATER_MID: [f32; 4] = [0.576, 0.773, 0.992, 1.0]; // blue-300
    pub const WATER_BOTTOM: [f32; 4] = [0.231, 0.510, 0.965, 1.0]; // blue-500
    pub const GLASS_SHEEN: [f32; 4] = [1.0, 1.0, 1.0, 0.2];
    pub const SURFACE: [f32; 4] = [0.812, 0.980, 0.996, 0.3]; // cyan-100/30
    pub const SAND: [f32; 4] = [0.792, 0.541, 0.016, 0.4]; // yellow-600/40
    pub const SEAWEED: [[f32; 4]; 3] = [
        [0.133, 0.773, 0.369, 0.6], // green-500
        [0.086, 0.639, 0.290, 0.7], // green-600
        [0.290, 0.871, 0.502, 0.5], // green-400
    ];
    pub const BUBBLE: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    pub const BUBBLE_RIM: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    pub const FOOD: [f32; 4] = [0.792, 0.541, 0.016, 1.0]; // yellow-600
    pub const FOOD_GLOW: [f32; 4] = [0.980, 0.800, 0.082, 0.5]; // yellow-400
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.376, 0.647, 0.980, 1.0]; // blue-400
}

/// Scale a color's alpha
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}
