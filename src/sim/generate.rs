//! Level carving
//!
//! A tunnel is built section by section, each section filling its slice range
//! with one style of obstacle course. Every style that could seal the tunnel
//! runs its changes past `path_exists` first: randomness decides the shape,
//! the reachability probe decides what is allowed to stand.

use rand::Rng;
use rand_pcg::Pcg32;

use super::grid::{GridPos, SliceGrid, CELL_BLOCKED, CELL_OPEN};
use super::reach::{path_exists, RingRect};
use super::ring::RingLayout;
use crate::assets::PixelSource;

/// Inclusive slice interval a section occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRange {
    pub start: i32,
    pub end: i32,
}

impl SliceRange {
    pub fn new(start: i32, end: i32) -> Self {
        assert!(start <= end, "inverted slice range {start}..={end}");
        Self { start, end }
    }

    #[inline]
    pub fn span(&self) -> i32 {
        self.end - self.start + 1
    }
}

/// A full-length lane through a solid or noisy section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slip {
    /// Ring position of the lane's first cell
    pub ring: i32,
    /// Lane width in cells
    pub width: i32,
}

/// Tunnels dug before the clearing carver gives up and cuts a bailout corridor
const CARVE_ATTEMPT_CAP: u32 = 100_000;

/// Wall proposals are snapped to this grid
const WALL_QUANTUM: i32 = 4;
/// Wall-maze proposal budget per slice of section
const WALL_PROPOSALS_PER_SLICE: i32 = 4;

/// Fill `range` solid, then dig random straight tunnels until the section is
/// passable end to end. Digging stops the moment the probe succeeds, so the
/// final density is whatever the walk happens to leave behind.
pub fn carve_maze(grid: &mut SliceGrid, range: SliceRange, rng: &mut Pcg32) {
    let ring_len = grid.ring_len();
    grid.fill_slices(range.start, range.end, CELL_BLOCKED);

    let entry = GridPos::new(range.start - 1, 0);
    let exit = GridPos::new(range.end + 1, 0);
    let bounds = (range.start - 1, range.end + 1);

    let mut tunnels = 0u32;
    while !path_exists(grid, entry, exit, bounds, None) {
        if tunnels >= CARVE_ATTEMPT_CAP {
            log::warn!(
                "section {}..{} still sealed after {tunnels} tunnels; cutting a bailout corridor",
                range.start,
                range.end
            );
            for slice in range.start..=range.end {
                grid.set_open(GridPos::new(slice, 0));
            }
            return;
        }
        tunnels += 1;

        let slice = rng.random_range(range.start..=range.end);
        let ring = rng.random_range(0..ring_len);
        let len = rng.random_range(2..=8);
        if rng.random_bool(0.5) {
            // Dig along the travel axis
            for s in slice..=(slice + len).min(range.end) {
                grid.set_open(GridPos::new(s, ring));
            }
        } else {
            // Dig around the ring
            for r in ring..ring + len {
                grid.set_open(GridPos::new(slice, r));
            }
        }
    }
    log::debug!(
        "section {}..{} opened after {tunnels} tunnels",
        range.start,
        range.end
    );
}

/// Leave `range` open and drop in quantized straight walls, committing only
/// the proposals the reachability probe approves. Rejected proposals are
/// skipped, so density comes out probabilistic rather than exact.
pub fn build_wall_maze(grid: &mut SliceGrid, range: SliceRange, rng: &mut Pcg32) {
    let ring_len = grid.ring_len();
    grid.fill_slices(range.start, range.end, CELL_OPEN);

    let entry = GridPos::new(range.start - 1, 0);
    let exit = GridPos::new(range.end + 1, 0);
    let bounds = (range.start - 1, range.end + 1);

    let budget = range.span() * WALL_PROPOSALS_PER_SLICE;
    let mut committed = 0;
    for _ in 0..budget {
        let thickness = rng.random_range(1..=2);
        let wall = if rng.random_bool(0.5) {
            // A fin running along the travel axis
            let s0 = range.start + snap(rng.random_range(0..range.span()));
            let s1 = (s0 + WALL_QUANTUM * rng.random_range(1..=3) - 1).min(range.end);
            let r0 = snap(rng.random_range(0..ring_len));
            RingRect {
                slice_min: s0,
                slice_max: s1,
                ring_min: r0,
                ring_max: r0 + thickness - 1,
            }
        } else {
            // A baffle running around the ring
            let s0 = range.start + rng.random_range(0..range.span());
            let s1 = (s0 + thickness - 1).min(range.end);
            let r0 = snap(rng.random_range(0..ring_len));
            RingRect {
                slice_min: s0,
                slice_max: s1,
                ring_min: r0,
                ring_max: r0 + WALL_QUANTUM * rng.random_range(1..=4) - 1,
            }
        };
        if !path_exists(grid, entry, exit, bounds, Some(&wall)) {
            continue;
        }
        block_rect(grid, &wall);
        committed += 1;
    }
    log::debug!(
        "section {}..{}: committed {committed} of {budget} wall proposals",
        range.start,
        range.end
    );
}

/// Fill `range` solid except for the given lanes, which run its whole length.
/// A lane is a path, so no probe is needed.
pub fn carve_slips(grid: &mut SliceGrid, range: SliceRange, slips: &[Slip]) {
    assert!(!slips.is_empty(), "a slip section needs at least one lane");
    grid.fill_slices(range.start, range.end, CELL_BLOCKED);
    open_lanes(grid, range, slips);
}

/// Leave `range` open, sprinkle single blocked cells, then cut lanes through.
/// The sprinkle is unchecked; the lanes go in last so noise cannot close them.
pub fn scatter_points_with_slips(
    grid: &mut SliceGrid,
    range: SliceRange,
    density: f32,
    slips: &[Slip],
    rng: &mut Pcg32,
) {
    assert!(
        (0.0..=1.0).contains(&density),
        "scatter density {density} out of range"
    );
    assert!(!slips.is_empty(), "a scatter section needs at least one lane");
    let ring_len = grid.ring_len();
    grid.fill_slices(range.start, range.end, CELL_OPEN);

    let count = ((range.span() * ring_len) as f32 * density) as i32;
    for _ in 0..count {
        let slice = rng.random_range(range.start..=range.end);
        let ring = rng.random_range(0..ring_len);
        grid.set_blocked(GridPos::new(slice, ring));
    }
    open_lanes(grid, range, slips);
}

/// Random lane positions for the slip styles
pub fn random_slips(count: i32, width: i32, ring_len: i32, rng: &mut Pcg32) -> Vec<Slip> {
    (0..count.max(1))
        .map(|_| Slip {
            ring: rng.random_range(0..ring_len),
            width,
        })
        .collect()
}

fn open_lanes(grid: &mut SliceGrid, range: SliceRange, slips: &[Slip]) {
    for slip in slips {
        assert!(slip.width > 0, "zero-width slip");
        for slice in range.start..=range.end {
            for ring in slip.ring..slip.ring + slip.width {
                grid.set_open(GridPos::new(slice, ring));
            }
        }
    }
}

#[inline]
fn snap(v: i32) -> i32 {
    (v / WALL_QUANTUM) * WALL_QUANTUM
}

fn block_rect(grid: &mut SliceGrid, rect: &RingRect) {
    for slice in rect.slice_min..=rect.slice_max {
        for ring in rect.ring_min..=rect.ring_max {
            grid.set_blocked(GridPos::new(slice, ring));
        }
    }
}

/// How a recipe section fills its slice range
#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind {
    /// Solid rock dug out until passable
    ClearedMaze,
    /// Open tube with committed wall proposals
    WallMaze,
    /// Solid rock with full-length lanes
    Slips { count: i32, width: i32 },
    /// Open tube with noise cells and lanes
    ScatterAndSlips { density: f32, count: i32, width: i32 },
}

/// Ordered plan for carving a whole tunnel. Sections must not touch: each
/// needs an open slice on both sides for the passability probe, and the slice
/// after the final section doubles as the winning zone.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRecipe {
    pub sections: Vec<(SliceRange, SectionKind)>,
}

impl LevelRecipe {
    /// The campaign tube: a clear run-up, then section styles cycling down the
    /// tunnel with breathing room between them, and an open tail to win in.
    pub fn standard(num_slices: i32) -> Self {
        const RUN_UP: i32 = 24;
        const SECTION_LEN: i32 = 120;
        const GAP: i32 = 4;
        const TAIL: i32 = 60;
        assert!(
            num_slices > RUN_UP + SECTION_LEN + TAIL,
            "tunnel of {num_slices} slices is too short for the standard recipe"
        );

        let mut sections = Vec::new();
        let mut start = RUN_UP;
        let mut index = 0;
        while start + SECTION_LEN <= num_slices - TAIL {
            let range = SliceRange::new(start, start + SECTION_LEN - 1);
            let kind = match index % 4 {
                0 => SectionKind::ClearedMaze,
                1 => SectionKind::Slips { count: 3, width: 2 },
                2 => SectionKind::WallMaze,
                _ => SectionKind::ScatterAndSlips {
                    density: 0.04,
                    count: 2,
                    width: 2,
                },
            };
            sections.push((range, kind));
            start += SECTION_LEN + GAP;
            index += 1;
        }
        Self { sections }
    }

    /// Carve every section in order. Returns the winning zone: the first slice
    /// past the final section.
    pub fn carve(&self, grid: &mut SliceGrid, rng: &mut Pcg32) -> i32 {
        assert!(!self.sections.is_empty(), "empty recipe");
        let mut min_start = 1;
        let mut last_end = 0;
        for (range, kind) in &self.sections {
            assert!(
                range.start >= min_start,
                "section {range:?} needs an open slice before it"
            );
            assert!(
                range.end + 1 < grid.num_slices(),
                "section {range:?} runs past the tunnel"
            );
            match kind {
                SectionKind::ClearedMaze => carve_maze(grid, *range, rng),
                SectionKind::WallMaze => build_wall_maze(grid, *range, rng),
                SectionKind::Slips { count, width } => {
                    let slips = random_slips(*count, *width, grid.ring_len(), rng);
                    carve_slips(grid, *range, &slips);
                }
                SectionKind::ScatterAndSlips {
                    density,
                    count,
                    width,
                } => {
                    let slips = random_slips(*count, *width, grid.ring_len(), rng);
                    scatter_points_with_slips(grid, *range, *density, &slips, rng);
                }
            }
            min_start = range.end + 2;
            last_end = range.end;
        }
        last_end + 1
    }
}

/// A fully built tunnel: walls, baked world geometry, and the goal line
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub grid: SliceGrid,
    /// First slice past the final obstacle; flying beyond it wins the run
    pub winning_zone: i32,
}

impl Level {
    /// Carve a fresh tunnel from a recipe
    pub fn generate(
        num_slices: i32,
        layout: RingLayout,
        recipe: &LevelRecipe,
        rng: &mut Pcg32,
    ) -> Self {
        let mut grid = SliceGrid::new(num_slices, layout);
        let winning_zone = recipe.carve(&mut grid, rng);
        grid.rebuild_world_corners();
        log::info!(
            "tunnel carved: {num_slices} slices, {} sections, winning zone at {winning_zone}",
            recipe.sections.len()
        );
        Self { grid, winning_zone }
    }

    /// Walls from an image mask; the winning zone sits one slice past the
    /// covered columns.
    pub fn from_pixels(num_slices: i32, layout: RingLayout, src: &dyn PixelSource) -> Self {
        let mut grid = SliceGrid::new(num_slices, layout);
        grid.populate_from_pixels(src);
        let covered = (src.width() as i32).min(num_slices);
        let winning_zone = covered.min(num_slices - 1);
        grid.rebuild_world_corners();
        log::info!("tunnel masked from image: winning zone at {winning_zone}");
        Self { grid, winning_zone }
    }

    /// Walls from a predicate; the run goes the whole tunnel
    pub fn from_pattern(
        num_slices: i32,
        layout: RingLayout,
        f: impl Fn(i32, i32) -> bool,
    ) -> Self {
        let mut grid = SliceGrid::new(num_slices, layout);
        grid.populate_pattern(f);
        grid.rebuild_world_corners();
        Self {
            grid,
            winning_zone: num_slices - 1,
        }
    }
}
