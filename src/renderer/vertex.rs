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
}

/// Colors for game elements
pub mod colors {
    use crate::palette;

    /// 0xRRGGBB plus alpha to normalized RGBA
    pub fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
        [channel(16), channel(8), channel(0), alpha]
    }

    pub fn background() -> [f32; 4] {
        rgba(palette::BACKGROUND, 1.0)
    }

    pub fn pipe() -> [f32; 4] {
        rgba(palette::PURPLE, 1.0)
    }

    pub fn pipe_cap() -> [f32; 4] {
        rgba(palette::PURPLE_LIGHT, 1.0)
    }

    pub fn player() -> [f32; 4] {
        rgba(palette::WHITE, 1.0)
    }

    /// Dims the field behind the game-over text
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
}
