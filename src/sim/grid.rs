//! Tunnel wall storage
//!
//! One byte per cell: 0 is open air, anything else is rock. The byte
//! convention matches image-sourced masks, where any visible pixel blocks.

use glam::Vec3;

use super::ring::RingLayout;
use crate::assets::PixelSource;
use crate::wrap_ring;

/// An open cell
pub const CELL_OPEN: u8 = 0;
/// A wall cell
pub const CELL_BLOCKED: u8 = 255;

/// Integer cell address: slice along the tunnel, position around the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub slice: i32,
    pub ring: i32,
}

impl GridPos {
    pub const fn new(slice: i32, ring: i32) -> Self {
        Self { slice, ring }
    }
}

/// Dense wall grid for the whole tunnel, plus a baked cache of the world-space
/// corner point for every integer `(slice, ring)`
#[derive(Debug, Clone, PartialEq)]
pub struct SliceGrid {
    layout: RingLayout,
    num_slices: i32,
    cells: Vec<u8>,
    world_corners: Vec<Vec3>,
}

impl SliceGrid {
    /// An all-open tunnel. The world corner cache starts empty; call
    /// `rebuild_world_corners` once the walls are final.
    pub fn new(num_slices: i32, layout: RingLayout) -> Self {
        assert!(num_slices > 0, "empty tunnel");
        let cells = vec![CELL_OPEN; (num_slices * layout.ring_len()) as usize];
        Self {
            layout,
            num_slices,
            cells,
            world_corners: Vec::new(),
        }
    }

    #[inline]
    pub fn layout(&self) -> RingLayout {
        self.layout
    }

    #[inline]
    pub fn num_slices(&self) -> i32 {
        self.num_slices
    }

    #[inline]
    pub fn ring_len(&self) -> i32 {
        self.layout.ring_len()
    }

    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    fn index(&self, slice: i32, ring: i32) -> usize {
        debug_assert!(
            (0..self.num_slices).contains(&slice),
            "slice {slice} outside tunnel of {}",
            self.num_slices
        );
        (slice * self.ring_len() + wrap_ring(ring, self.ring_len())) as usize
    }

    /// Whether the cell at `pos` is rock. The ring position wraps; the slice
    /// must be inside the tunnel.
    #[inline]
    pub fn blocked(&self, pos: GridPos) -> bool {
        self.cells[self.index(pos.slice, pos.ring)] != CELL_OPEN
    }

    #[inline]
    pub fn set_blocked(&mut self, pos: GridPos) {
        let i = self.index(pos.slice, pos.ring);
        self.cells[i] = CELL_BLOCKED;
    }

    #[inline]
    pub fn set_open(&mut self, pos: GridPos) {
        let i = self.index(pos.slice, pos.ring);
        self.cells[i] = CELL_OPEN;
    }

    /// Set every cell of slices `first..=last` to `value`
    pub fn fill_slices(&mut self, first: i32, last: i32, value: u8) {
        assert!(first <= last, "inverted slice range {first}..={last}");
        let lo = self.index(first, 0);
        let hi = self.index(last, self.ring_len() - 1);
        self.cells[lo..=hi].fill(value);
    }

    /// Block cells from an image mask. Column `x` maps to slice `x`, row `y`
    /// to ring position `y`; a visible pixel is a wall. Rows past the image
    /// height stay open, and columns past the tunnel length are dropped.
    pub fn populate_from_pixels(&mut self, src: &dyn PixelSource) {
        if src.width() > self.num_slices as u32 {
            log::warn!(
                "mask has {} columns but the tunnel has {} slices; extra columns ignored",
                src.width(),
                self.num_slices
            );
        }
        let slices = src.width().min(self.num_slices as u32);
        let rows = src.height().min(self.ring_len() as u32);
        for x in 0..slices {
            for y in 0..rows {
                if src.pixel(x, y).is_visible() {
                    self.set_blocked(GridPos::new(x as i32, y as i32));
                }
            }
        }
    }

    /// Overwrite every cell from a predicate; `f(slice, ring)` true is a wall
    pub fn populate_pattern(&mut self, f: impl Fn(i32, i32) -> bool) {
        for slice in 0..self.num_slices {
            for ring in 0..self.ring_len() {
                let pos = GridPos::new(slice, ring);
                if f(slice, ring) {
                    self.set_blocked(pos);
                } else {
                    self.set_open(pos);
                }
            }
        }
    }

    /// Bake the world-space corner point of every integer `(slice, ring)`.
    /// Includes one extra slice and one extra ring entry, so the far corner of
    /// the last cell resolves without wrapping arithmetic.
    pub fn rebuild_world_corners(&mut self) {
        let stride = self.ring_len() + 1;
        let mut corners = Vec::with_capacity(((self.num_slices + 1) * stride) as usize);
        for slice in 0..=self.num_slices {
            for ring in 0..=self.ring_len() {
                corners.push(self.layout.sim_to_world(slice as f32, ring));
            }
        }
        self.world_corners = corners;
    }

    /// Cached world corner; `rebuild_world_corners` must have run. Slice in
    /// `0..=num_slices`, ring in `0..=ring_len`.
    #[inline]
    pub fn world_corner(&self, slice: i32, ring: i32) -> Vec3 {
        let stride = self.layout.ring_len() + 1;
        self.world_corners[(slice * stride + ring) as usize]
    }
}

/// Debug pattern: every 10th slice is a ring with a gap in each group of ten
/// cells
pub fn test_rings_pattern(slice: i32, ring: i32) -> bool {
    slice % 10 == 0 && ring % 10 >= 7
}
