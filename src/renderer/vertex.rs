//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::ObstacleKind;
use crate::tuning::Preset;

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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.97, 0.97, 0.97, 1.0];
    pub const GROUND: [f32; 4] = [0.33, 0.33, 0.33, 1.0];
    pub const DINO: [f32; 4] = [0.33, 0.33, 0.33, 1.0];
    pub const ROCK: [f32; 4] = [0.55, 0.45, 0.35, 1.0];
    pub const CACTUS: [f32; 4] = [0.2, 0.55, 0.25, 1.0];
    pub const FLAT: [f32; 4] = [0.45, 0.45, 0.45, 1.0];
}

/// Fill color per entity class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub ground: [f32; 4],
    pub player: [f32; 4],
    pub rock: [f32; 4],
    pub cactus: [f32; 4],
}

impl Palette {
    pub fn for_preset(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self {
                background: colors::BACKGROUND,
                ground: colors::GROUND,
                player: colors::DINO,
                rock: colors::ROCK,
                cactus: colors::CACTUS,
            },
            // Single flat fill for every obstacle
            Preset::Flat => Self {
                background: colors::BACKGROUND,
                ground: colors::GROUND,
                player: colors::DINO,
                rock: colors::FLAT,
                cactus: colors::FLAT,
            },
        }
    }

    pub fn obstacle(&self, kind: ObstacleKind) -> [f32; 4] {
        match kind {
            ObstacleKind::Rock => self.rock,
            ObstacleKind::Cactus => self.cactus,
        }
    }
}
