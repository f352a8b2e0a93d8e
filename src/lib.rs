//! Tunnel Dive - a dive-down-the-tunnel arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tunnel geometry, level carving, collision, game state)
//! - `renderer`: Perspective projection and render primitive emission
//! - `assets`: Image-backed level masks and wall tints
//! - `tuning`: Data-driven gameplay numbers
//! - `settings`: Player preferences
//! - `audio`: Sound cue mapping

pub mod assets;
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{ControlScheme, Settings};
pub use tuning::Tuning;

/// Engine constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum sim ticks folded into one frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default window size (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
}

/// Wrap an integer ring position into `[0, ring_len)`
#[inline]
pub fn wrap_ring(pos: i32, ring_len: i32) -> i32 {
    pos.rem_euclid(ring_len)
}

/// Wrap a fractional ring position into `[0, ring_len)`
#[inline]
pub fn wrap_ring_f(pos: f32, ring_len: f32) -> f32 {
    pos.rem_euclid(ring_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_ring() {
        assert_eq!(wrap_ring(0, 280), 0);
        assert_eq!(wrap_ring(280, 280), 0);
        assert_eq!(wrap_ring(281, 280), 1);
        assert_eq!(wrap_ring(-1, 280), 279);
        assert_eq!(wrap_ring(-281, 280), 279);
    }

    #[test]
    fn test_wrap_ring_f() {
        assert!((wrap_ring_f(280.0 - 0.1 + 0.5, 280.0) - 0.4).abs() < 1e-4);
        assert!((wrap_ring_f(-0.25, 280.0) - 279.75).abs() < 1e-4);
        assert_eq!(wrap_ring_f(0.0, 280.0), 0.0);
    }
}
