//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const WALL: [f32; 4] = [0.9, 0.16, 0.22, 1.0];
    pub const PLAYER: [f32; 4] = [0.176, 0.89, 0.75, 1.0];
    pub const DANGER_OVERLAY: [f32; 4] = [1.0, 0.25, 0.1, 1.0];
    pub const WINNING_OVERLAY: [f32; 4] = [0.25, 1.0, 0.45, 1.0];
    pub const HUD_TEXT: [f32; 4] = [0.85, 0.85, 0.9, 1.0];
    pub const TITLE_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
