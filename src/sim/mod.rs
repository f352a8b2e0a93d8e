//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Dense grids with stable iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod generate;
pub mod grid;
pub mod reach;
pub mod ring;
pub mod state;
pub mod tick;

pub use collision::{footprint_collides, Footprint};
pub use generate::{Level, LevelRecipe, SectionKind, SliceRange, Slip};
pub use grid::{test_rings_pattern, GridPos, SliceGrid, CELL_BLOCKED, CELL_OPEN};
pub use reach::{path_exists, RingRect};
pub use ring::{Projection, RingLayout};
pub use state::{
    warning_intensity, Direction, GameEvent, GameState, Particle, Phase, Player, Scene,
    TitleScreen, EXPLOSION_PARTICLES, MAX_PARTICLES, TITLE_PALETTE, TITLE_RING_COUNT,
};
pub use tick::{advance_scene, tick, TickInput};
