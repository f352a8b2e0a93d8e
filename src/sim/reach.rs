//! Reachability over the wall grid
//!
//! Level carving never commits a wall without proof the tunnel stays
//! passable. `path_exists` is that proof: a breadth-first search from start to
//! end, optionally pretending a candidate wall rectangle is already rock.

use std::collections::VecDeque;

use super::grid::{GridPos, SliceGrid};
use crate::wrap_ring;

/// A slice-interval by ring-interval region. Both bounds are inclusive; the
/// ring interval may cross the wrap seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingRect {
    pub slice_min: i32,
    pub slice_max: i32,
    pub ring_min: i32,
    pub ring_max: i32,
}

impl RingRect {
    pub fn contains(&self, pos: GridPos, ring_len: i32) -> bool {
        if pos.slice < self.slice_min || pos.slice > self.slice_max {
            return false;
        }
        let ring = wrap_ring(pos.ring, ring_len);
        let lo = wrap_ring(self.ring_min, ring_len);
        let hi = wrap_ring(self.ring_max, ring_len);
        if lo <= hi {
            ring >= lo && ring <= hi
        } else {
            // Interval crosses the seam
            ring >= lo || ring <= hi
        }
    }
}

/// True if open cells connect `start` to `end` without leaving the inclusive
/// `slice_bounds`. Steps move one cell at a time: slice plus or minus one, or
/// ring plus or minus one with wrap.
///
/// `temp_block` is treated as rock without touching the grid; carving uses it
/// to ask whether a candidate wall would sever the tunnel before committing.
///
/// Both endpoints must be open cells inside bounds and outside the temp block.
pub fn path_exists(
    grid: &SliceGrid,
    start: GridPos,
    end: GridPos,
    slice_bounds: (i32, i32),
    temp_block: Option<&RingRect>,
) -> bool {
    let (lo, hi) = slice_bounds;
    assert!(lo <= hi, "inverted slice bounds {lo}..={hi}");
    assert!(
        lo >= 0 && hi < grid.num_slices(),
        "slice bounds {lo}..={hi} leave the tunnel"
    );

    let ring_len = grid.ring_len();
    let passable = |pos: GridPos| -> bool {
        if pos.slice < lo || pos.slice > hi {
            return false;
        }
        if grid.blocked(pos) {
            return false;
        }
        if let Some(rect) = temp_block {
            if rect.contains(pos, ring_len) {
                return false;
            }
        }
        true
    };

    assert!(passable(start), "search start {start:?} is not an open cell");
    assert!(passable(end), "search end {end:?} is not an open cell");

    let index = |pos: GridPos| -> usize {
        ((pos.slice - lo) * ring_len + wrap_ring(pos.ring, ring_len)) as usize
    };
    let end_key = index(end);

    let mut visited = vec![false; ((hi - lo + 1) * ring_len) as usize];
    let mut queue = VecDeque::new();
    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        if index(pos) == end_key {
            return true;
        }
        let neighbors = [
            GridPos::new(pos.slice + 1, pos.ring),
            GridPos::new(pos.slice - 1, pos.ring),
            GridPos::new(pos.slice, wrap_ring(pos.ring + 1, ring_len)),
            GridPos::new(pos.slice, wrap_ring(pos.ring - 1, ring_len)),
        ];
        for next in neighbors {
            if next.slice < lo || next.slice > hi {
                continue;
            }
            let key = index(next);
            if visited[key] || !passable(next) {
                continue;
            }
            visited[key] = true;
            queue.push_back(next);
        }
    }
    false
}
