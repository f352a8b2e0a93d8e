//! Game state containers
//!
//! Everything the simulation mutates lives here. Level geometry is built once
//! and read-only during play; the tick loop in `sim::tick` owns all mutation.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{footprint_collides, Footprint};
use super::generate::{Level, LevelRecipe};
use super::grid::SliceGrid;
use super::ring::RingLayout;
use crate::settings::ControlScheme;
use crate::tuning::Tuning;
use crate::wrap_ring_f;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Active descent
    Playing,
    /// Caught by the danger zone; the explosion is playing out
    Dead,
    /// Crossed the winning zone
    Won,
}

/// The four directions the player can push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Deeper into the tunnel
    In,
    /// Back toward the entrance
    Out,
    /// Clockwise around the ring
    Cw,
    /// Counterclockwise around the ring
    Ccw,
}

/// Things a tick did that the outside world may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was refused by a wall
    Bump,
    /// The danger zone caught the player
    Death,
    /// The player crossed the winning zone
    Win,
}

/// The player avatar in sim space
#[derive(Debug, Clone)]
pub struct Player {
    /// Continuous slice coordinate
    pub slice: f32,
    /// Continuous ring coordinate, kept in `[0, ring_len)`
    pub ring: f32,
    /// Collision extent
    pub footprint: Footprint,
    /// Latched movement direction under the Momentum scheme; cleared on bump
    pub heading: Option<Direction>,
}

impl Player {
    pub fn new(slice: f32, ring: f32, footprint: Footprint) -> Self {
        Self {
            slice,
            ring,
            footprint,
            heading: None,
        }
    }

    /// Move around the ring, refusing the move if the footprint would clip a
    /// wall. Returns true on a bump; the position is unchanged in that case.
    pub fn incr_ring(&mut self, grid: &SliceGrid, delta: f32) -> bool {
        let next = wrap_ring_f(self.ring + delta, grid.ring_len() as f32);
        if footprint_collides(grid, self.slice, next, &self.footprint) {
            return true;
        }
        self.ring = next;
        false
    }

    /// Move along the tunnel; same bump contract as `incr_ring`.
    pub fn incr_slice(&mut self, grid: &SliceGrid, delta: f32) -> bool {
        let next = self.slice + delta;
        if footprint_collides(grid, next, self.ring, &self.footprint) {
            return true;
        }
        self.slice = next;
        false
    }
}

/// Maximum explosion particles alive at once
pub const MAX_PARTICLES: usize = 256;
/// Particles spawned by one death burst
pub const EXPLOSION_PARTICLES: usize = 96;

/// One piece of explosion debris, in world space
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Remaining life in `[0, 1]`; fades the color out
    pub life: f32,
    /// On-screen size at full depth scale, pixels
    pub size: f32,
    pub color: [f32; 4],
}

/// Complete run state for one tunnel
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Live RNG; only the death burst draws from it during play
    pub rng: Pcg32,
    /// Simulation tick counter
    pub tick: u64,
    pub phase: Phase,
    /// Pause flag, orthogonal to phase
    pub paused: bool,
    /// The carved tunnel
    pub level: Level,
    pub player: Player,
    /// Rearmost survivable slice; being at or behind it is lethal
    pub danger_zone: i32,
    /// Active steering behavior
    pub control_scheme: ControlScheme,
    /// Debug override: the danger zone cannot kill
    pub no_kill: bool,
    /// Death explosion debris, visual only
    pub particles: Vec<Particle>,
    /// Gameplay numbers the run was started with
    pub tuning: Tuning,
}

impl GameState {
    /// Carve a tunnel from the seed and place the player at the spawn
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let layout = RingLayout::new(tuning.slice_width, tuning.slice_height);
        let recipe = LevelRecipe::standard(tuning.num_slices);
        let level = Level::generate(tuning.num_slices, layout, &recipe, &mut rng);
        Self::with_level(seed, rng, tuning, level)
    }

    /// Run state over an already-built level (image masks, tests)
    pub fn with_level(seed: u64, rng: Pcg32, tuning: Tuning, level: Level) -> Self {
        let spawn_ring =
            (tuning.slice_width + tuning.slice_height + tuning.slice_width / 2) as f32 + 0.5;
        let footprint = Footprint::new(tuning.half_slice, tuning.half_ring);
        Self {
            seed,
            rng,
            tick: 0,
            phase: Phase::Playing,
            paused: false,
            level,
            player: Player::new(tuning.spawn_slice, spawn_ring, footprint),
            danger_zone: tuning.danger_start,
            control_scheme: ControlScheme::default(),
            no_kill: false,
            particles: Vec::new(),
            tuning,
        }
    }

    /// How close the danger zone is: 0 far away, 1 at the player
    pub fn warning_intensity(&self) -> f32 {
        warning_intensity(
            self.player.slice,
            self.danger_zone,
            self.tuning.num_warning_zones,
        )
    }

    /// Fill the particle buffer with a burst at the player's world position
    pub(super) fn spawn_explosion(&mut self) {
        let layout = self.level.grid.layout();
        let origin = layout.sim_to_world_f(self.player.slice, self.player.ring);
        self.particles.clear();
        for _ in 0..EXPLOSION_PARTICLES.min(MAX_PARTICLES) {
            let dir = Vec3::new(
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
            );
            let speed = self.rng.random_range(0.05..0.35);
            let heat = self.rng.random_range(0.5..1.0);
            self.particles.push(Particle {
                pos: origin,
                vel: dir * speed,
                life: 1.0,
                size: self.rng.random_range(2.0..6.0),
                color: [1.0, 0.4 + 0.4 * heat, 0.15, 1.0],
            });
        }
    }
}

/// Danger proximity ramp: 0 until the zone is `num_warning_zones` slices back,
/// then linear up to 1 at the player's own slice.
pub fn warning_intensity(player_slice: f32, danger_zone: i32, num_warning_zones: i32) -> f32 {
    (1.0 - (player_slice - danger_zone as f32) / num_warning_zones as f32).clamp(0.0, 1.0)
}

/// Ring colors the attract screen cycles through
pub const TITLE_PALETTE: [[f32; 3]; 5] = [
    [242.0 / 255.0, 242.0 / 255.0, 48.0 / 255.0],
    [194.0 / 255.0, 242.0 / 255.0, 97.0 / 255.0],
    [145.0 / 255.0, 242.0 / 255.0, 145.0 / 255.0],
    [97.0 / 255.0, 242.0 / 255.0, 194.0 / 255.0],
    [48.0 / 255.0, 242.0 / 255.0, 242.0 / 255.0],
];

/// Rings the attract animation grows to
pub const TITLE_RING_COUNT: usize = 24;
/// Ticks between ring advances
pub const TITLE_RING_TICKS: u64 = 6;
/// Innermost ring radius, pixels
pub const TITLE_RING_START_RADIUS: f32 = 18.0;
/// Radius step between rings, pixels
pub const TITLE_RING_STEP: f32 = 14.0;

/// Attract-screen state: concentric rings recolored from the palette
#[derive(Debug, Clone)]
pub struct TitleScreen {
    /// Ring colors, innermost first
    pub rings: Vec<[f32; 4]>,
    /// Next ring slot to recolor
    pub cursor: usize,
    /// Title animation tick counter
    pub tick: u64,
    /// Seed the next run will start with
    pub run_seed: u64,
    rng: Pcg32,
}

impl TitleScreen {
    pub fn new(run_seed: u64) -> Self {
        let mut rings = Vec::with_capacity(TITLE_RING_COUNT);
        let [r, g, b] = TITLE_PALETTE[0];
        rings.push([r, g, b, 1.0]);
        Self {
            rings,
            cursor: 1,
            tick: 0,
            run_seed,
            // Offset stream so the title animation never echoes the run
            rng: Pcg32::seed_from_u64(run_seed ^ 0xA77),
        }
    }

    /// Grow by one ring until full, then keep recoloring in place. The cursor
    /// sweeps the stack, dimming each palette color a little differently.
    pub fn advance(&mut self) {
        if self.rings.len() < TITLE_RING_COUNT {
            self.rings.push([1.0, 1.0, 1.0, 1.0]);
        }
        let [r, g, b] = TITLE_PALETTE[self.cursor % TITLE_PALETTE.len()];
        let dim = self.rng.random_range(0.6..=1.0);
        if self.cursor < self.rings.len() {
            self.rings[self.cursor] = [r * dim, g * dim, b * dim, 1.0];
        }
        self.cursor = (self.cursor + 1) % TITLE_RING_COUNT;
    }
}

/// Top-level mode switch: attract screen or an active run
#[derive(Debug, Clone)]
pub enum Scene {
    Title(TitleScreen),
    Level(Box<GameState>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::GridPos;

    fn open_level(num_slices: i32) -> Level {
        Level::from_pattern(num_slices, RingLayout::new(8, 6), |_, _| false)
    }

    fn small_tuning() -> Tuning {
        Tuning {
            num_slices: 60,
            slice_width: 8,
            slice_height: 6,
            spawn_slice: 10.5,
            ..Tuning::default()
        }
    }

    fn playing_state() -> GameState {
        let tuning = small_tuning();
        let level = open_level(tuning.num_slices);
        GameState::with_level(1, Pcg32::seed_from_u64(1), tuning, level)
    }

    #[test]
    fn test_spawn_is_mid_bottom() {
        let state = playing_state();
        // Layout 8x6: the bottom edge starts at 14, spawn sits 4 cells in
        assert_eq!(state.player.ring, 18.5);
        assert_eq!(state.player.slice, 10.5);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_incr_ring_moves_and_wraps() {
        let mut state = playing_state();
        let grid = state.level.grid.clone();
        state.player.ring = 0.0;
        let bumped = state.player.incr_ring(&grid, 0.75);
        assert!(!bumped);
        assert_eq!(state.player.ring, 0.75);

        state.player.ring = grid.ring_len() as f32 - 0.1;
        let bumped = state.player.incr_ring(&grid, 0.5);
        assert!(!bumped);
        assert!((state.player.ring - 0.4).abs() < 1e-4);
    }

    #[test]
    fn test_incr_ring_bumps_on_wall() {
        let mut state = playing_state();
        let mut grid = state.level.grid.clone();
        grid.set_blocked(GridPos::new(10, 20));
        state.player.ring = 18.5;
        // One cell short of the wall is fine
        assert!(!state.player.incr_ring(&grid, 0.5));
        assert_eq!(state.player.ring, 19.0);
        // Stepping onto the wall cell is refused and position holds
        assert!(state.player.incr_ring(&grid, 1.0));
        assert_eq!(state.player.ring, 19.0);
    }

    #[test]
    fn test_incr_slice_bumps_at_tunnel_ends() {
        let mut state = playing_state();
        let grid = state.level.grid.clone();
        state.player.slice = 0.5;
        assert!(state.player.incr_slice(&grid, -0.4));
        assert_eq!(state.player.slice, 0.5);
        assert!(!state.player.incr_slice(&grid, 0.4));
    }

    #[test]
    fn test_warning_intensity_ramp() {
        assert_eq!(warning_intensity(25.0, 0, 50), 0.5);
        assert_eq!(warning_intensity(0.0, 0, 50), 1.0);
        assert_eq!(warning_intensity(100.0, 0, 50), 0.0);
        assert_eq!(warning_intensity(12.0, 12, 50), 1.0);
    }

    #[test]
    fn test_explosion_burst_fills_particles() {
        let mut state = playing_state();
        state.spawn_explosion();
        assert_eq!(state.particles.len(), EXPLOSION_PARTICLES);
        assert!(state.particles.iter().all(|p| p.life == 1.0));
        let origin = state
            .level
            .grid
            .layout()
            .sim_to_world_f(state.player.slice, state.player.ring);
        assert!(state.particles.iter().all(|p| p.pos == origin));
    }

    #[test]
    fn test_title_rings_grow_then_recolor() {
        let mut title = TitleScreen::new(5);
        assert_eq!(title.rings.len(), 1);
        for _ in 0..TITLE_RING_COUNT + 10 {
            title.advance();
        }
        assert_eq!(title.rings.len(), TITLE_RING_COUNT);
        // The cursor has lapped the stack, so at most the ring it grew last
        // is still waiting for a color
        let white = title
            .rings
            .iter()
            .filter(|c| **c == [1.0, 1.0, 1.0, 1.0])
            .count();
        assert!(white <= 1, "{white} rings still white");
    }
}
