//! Ring-space geometry for tunnel slices
//!
//! A slice's cross-section is a rectangular ring of wall cells. A ring
//! position is a single index that walks the perimeter: left to right across
//! the top, down the right side, right to left across the bottom, and back up
//! the left side. Ring positions wrap at the perimeter length.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::wrap_ring;

/// Cell dimensions of one tunnel cross-section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingLayout {
    /// Cells along the top and bottom edges
    pub slice_width: i32,
    /// Cells along the left and right edges
    pub slice_height: i32,
}

impl RingLayout {
    pub fn new(slice_width: i32, slice_height: i32) -> Self {
        assert!(
            slice_width > 0 && slice_height > 0,
            "degenerate ring layout {slice_width}x{slice_height}"
        );
        Self {
            slice_width,
            slice_height,
        }
    }

    /// Perimeter length in cells
    #[inline]
    pub fn ring_len(&self) -> i32 {
        2 * self.slice_width + 2 * self.slice_height
    }

    /// World-space extent of the cross-section rectangle
    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.slice_width as f32, self.slice_height as f32)
    }

    /// Map an integer ring position onto the cross-section rectangle.
    ///
    /// Position 0 is the top-left corner. Positions walk clockwise as seen on
    /// screen: top edge left to right, right edge top to bottom, bottom edge
    /// right to left, left edge bottom to top. The slice coordinate passes
    /// through as `z`.
    pub fn sim_to_world(&self, slice: f32, ring_pos: i32) -> Vec3 {
        let w = self.slice_width as f32;
        let h = self.slice_height as f32;
        let pos = wrap_ring(ring_pos, self.ring_len());

        if pos < self.slice_width {
            let t = pos as f32 / w;
            Vec3::new(w * t, 0.0, slice)
        } else if pos < self.slice_width + self.slice_height {
            let t = (pos - self.slice_width) as f32 / h;
            Vec3::new(w, h * t, slice)
        } else if pos < 2 * self.slice_width + self.slice_height {
            let t = (pos - self.slice_width - self.slice_height) as f32 / w;
            Vec3::new(w * (1.0 - t), h, slice)
        } else {
            let t = (pos - 2 * self.slice_width - self.slice_height) as f32 / h;
            Vec3::new(0.0, h * (1.0 - t), slice)
        }
    }

    /// Fractional ring positions interpolate between the two neighboring
    /// integer points, so motion around a corner stays continuous.
    pub fn sim_to_world_f(&self, slice: f32, ring_pos: f32) -> Vec3 {
        let base = ring_pos.floor();
        let frac = ring_pos - base;
        let p0 = self.sim_to_world(slice, base as i32);
        let p1 = self.sim_to_world(slice, base as i32 + 1);
        p0.lerp(p1, frac)
    }
}

/// Depth-scaled projection from tunnel world space into screen pixels.
///
/// A point at the vanishing slice collapses to the screen center; a point one
/// full screen-depth nearer fills the screen.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Slice whose cross-section projects to a single point
    pub vanish_slice: f32,
    /// Depth of one screen, in slices
    pub slices_per_screen: f32,
    /// Screen center in pixels
    pub screen_center: Vec2,
    /// Cross-section rectangle extent in world units
    pub world_size: Vec2,
}

impl Projection {
    pub fn new(
        vanish_slice: f32,
        slices_per_screen: f32,
        screen_center: Vec2,
        world_size: Vec2,
    ) -> Self {
        assert!(slices_per_screen > 0.0, "zero-depth projection");
        Self {
            vanish_slice,
            slices_per_screen,
            screen_center,
            world_size,
        }
    }

    /// Depth scale for a world point: 0 at the vanishing slice, 1 a full
    /// screen-depth nearer. Points past the vanishing slice clamp to 0.
    #[inline]
    pub fn depth_scale(&self, z: f32) -> f32 {
        ((self.vanish_slice - z) / self.slices_per_screen).max(0.0)
    }

    /// Project a world point into pixel space.
    pub fn world_to_screen(&self, world: Vec3) -> Vec2 {
        let scale = self.depth_scale(world.z);
        let half = self.world_size * 0.5;
        // Offset from the cross-section center, normalized to [-1, 1]
        let norm = (Vec2::new(world.x, world.y) - half) / half;
        self.screen_center + norm * self.screen_center * scale
    }
}
