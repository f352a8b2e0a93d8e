//! Frame description
//!
//! Walks the visible stretch of tunnel far slice to near slice and emits
//! primitives in paint order: walls, then zone overlays, then the player, then
//! debris and HUD text. The GPU side only ever sees the primitive list.

use glam::{Vec2, Vec3};

use super::primitives::RenderPrimitive;
use super::vertex::colors;
use crate::assets::PixelSource;
use crate::sim::grid::GridPos;
use crate::sim::ring::Projection;
use crate::sim::state::{
    GameState, Phase, Scene, TitleScreen, TITLE_RING_START_RADIUS, TITLE_RING_STEP,
};

/// Output surface in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Zone overlay alpha: a slow shimmer keyed to the slice and the tick, so
/// neighboring slices pulse out of step.
pub fn overlay_alpha(slice: i32, tick: u64) -> f32 {
    let wave = (slice as f32 / 3.0 + tick as f32 * 0.4).sin();
    0.3 + 0.1 * (0.5 * wave + 0.5)
}

/// Describe whichever scene is active.
pub fn build_scene(
    scene: &Scene,
    viewport: Viewport,
    background: Option<&dyn PixelSource>,
) -> Vec<RenderPrimitive> {
    match scene {
        Scene::Title(title) => build_title(title, viewport),
        Scene::Level(state) => build_frame(state, viewport, background),
    }
}

/// Describe one frame of a run.
///
/// The vanishing slice sits a fixed depth past the player, clamped so the far
/// end of the tunnel never shows past its last slice. Each drawn cell extrudes
/// from its slice index (far face) one slice toward the camera, and an
/// optional image tints wall cells by tiling over `(slice, ring)`.
pub fn build_frame(
    state: &GameState,
    viewport: Viewport,
    background: Option<&dyn PixelSource>,
) -> Vec<RenderPrimitive> {
    let grid = &state.level.grid;
    let layout = grid.layout();
    let tuning = &state.tuning;

    let sps = tuning.slices_per_screen;
    let raw_vanish = state.player.slice + (sps - tuning.player_screen_depth) as f32;
    let max_vanish = (grid.num_slices() - sps - 1) as f32;
    let vanish = raw_vanish.min(max_vanish).max(0.0);
    let proj = Projection::new(vanish, sps as f32, viewport.center(), layout.world_size());

    let far = vanish.floor() as i32;
    let near = far - sps + 1;
    let player_cell = state.player.slice.floor() as i32;
    let warning = state.warning_intensity();

    let mut prims = vec![full_screen(viewport, colors::BACKGROUND)];

    for slice in (near..=far).rev() {
        if slice < 0 || slice >= grid.num_slices() {
            continue;
        }

        for ring in 0..grid.ring_len() {
            if !grid.blocked(GridPos::new(slice, ring)) {
                continue;
            }
            prims.push(RenderPrimitive::Quad {
                corners: cell_quad(grid, &proj, slice, ring),
                color: wall_color(background, slice, ring),
            });
        }

        if slice <= state.danger_zone && warning > 0.0 {
            let alpha = overlay_alpha(slice, state.tick) * warning;
            push_ring_overlay(&mut prims, &proj, layout.world_size(), slice, {
                let [r, g, b, _] = colors::DANGER_OVERLAY;
                [r, g, b, alpha]
            });
        } else if slice > state.level.winning_zone {
            let alpha = overlay_alpha(slice, state.tick);
            push_ring_overlay(&mut prims, &proj, layout.world_size(), slice, {
                let [r, g, b, _] = colors::WINNING_OVERLAY;
                [r, g, b, alpha]
            });
        }

        if slice == player_cell && state.phase != Phase::Dead {
            prims.push(player_quad(state, &proj));
        }
    }

    for p in &state.particles {
        let head = proj.world_to_screen(p.pos);
        let tail = proj.world_to_screen(p.pos - p.vel * 3.0);
        let [r, g, b, _] = p.color;
        prims.push(RenderPrimitive::ParticleSegment {
            head,
            tail,
            width: p.size * proj.depth_scale(p.pos.z).max(0.2),
            color: [r, g, b, p.life.clamp(0.0, 1.0)],
        });
    }

    push_hud(&mut prims, state, viewport);
    prims
}

/// Describe the attract screen: the ring stack outermost first, so each ring
/// paints inside the previous one, plus the title text.
pub fn build_title(title: &TitleScreen, viewport: Viewport) -> Vec<RenderPrimitive> {
    let center = viewport.center();
    let mut prims = vec![full_screen(viewport, colors::BACKGROUND)];

    for (i, color) in title.rings.iter().enumerate().rev() {
        prims.push(RenderPrimitive::Circle {
            center,
            radius: TITLE_RING_START_RADIUS + i as f32 * TITLE_RING_STEP,
            color: *color,
        });
    }

    prims.push(RenderPrimitive::Text {
        pos: Vec2::new(center.x - 170.0, 72.0),
        size: 56.0,
        color: colors::TITLE_TEXT,
        text: "TUNNEL DIVE".to_string(),
    });
    prims.push(RenderPrimitive::Text {
        pos: Vec2::new(center.x - 120.0, viewport.height - 110.0),
        size: 22.0,
        color: colors::HUD_TEXT,
        text: "press enter to dive".to_string(),
    });
    prims
}

fn full_screen(viewport: Viewport, color: [f32; 4]) -> RenderPrimitive {
    RenderPrimitive::Quad {
        corners: [
            Vec2::new(0.0, 0.0),
            Vec2::new(viewport.width, 0.0),
            Vec2::new(viewport.width, viewport.height),
            Vec2::new(0.0, viewport.height),
        ],
        color,
    }
}

/// Screen corners of one wall cell, far edge first
fn cell_quad(
    grid: &crate::sim::grid::SliceGrid,
    proj: &Projection,
    slice: i32,
    ring: i32,
) -> [Vec2; 4] {
    let far_a = grid.world_corner(slice, ring);
    let far_b = grid.world_corner(slice, ring + 1);
    let near_a = Vec3::new(far_a.x, far_a.y, far_a.z - 1.0);
    let near_b = Vec3::new(far_b.x, far_b.y, far_b.z - 1.0);
    [
        proj.world_to_screen(far_a),
        proj.world_to_screen(far_b),
        proj.world_to_screen(near_b),
        proj.world_to_screen(near_a),
    ]
}

fn wall_color(background: Option<&dyn PixelSource>, slice: i32, ring: i32) -> [f32; 4] {
    if let Some(src) = background {
        if src.width() > 0 && src.height() > 0 {
            let px = src.pixel(slice as u32 % src.width(), ring as u32 % src.height());
            if px.is_visible() {
                return px.to_f32();
            }
        }
    }
    colors::WALL
}

/// One translucent tube segment covering the whole cross-section of a slice,
/// as four trapezoids between its far and near rectangles
fn push_ring_overlay(
    prims: &mut Vec<RenderPrimitive>,
    proj: &Projection,
    size: Vec2,
    slice: i32,
    color: [f32; 4],
) {
    let rect = [
        Vec2::new(0.0, 0.0),
        Vec2::new(size.x, 0.0),
        Vec2::new(size.x, size.y),
        Vec2::new(0.0, size.y),
    ];
    let z_far = slice as f32;
    let z_near = z_far - 1.0;
    for i in 0..4 {
        let a = rect[i];
        let b = rect[(i + 1) % 4];
        prims.push(RenderPrimitive::Quad {
            corners: [
                proj.world_to_screen(Vec3::new(a.x, a.y, z_far)),
                proj.world_to_screen(Vec3::new(b.x, b.y, z_far)),
                proj.world_to_screen(Vec3::new(b.x, b.y, z_near)),
                proj.world_to_screen(Vec3::new(a.x, a.y, z_near)),
            ],
            color,
        });
    }
}

fn player_quad(state: &GameState, proj: &Projection) -> RenderPrimitive {
    let layout = state.level.grid.layout();
    let s = state.player.slice;
    let r = state.player.ring;
    let hs = state.player.footprint.half_slice;
    let hr = state.player.footprint.half_ring;
    let corners = [
        layout.sim_to_world_f(s + hs, r - hr),
        layout.sim_to_world_f(s + hs, r + hr),
        layout.sim_to_world_f(s - hs, r + hr),
        layout.sim_to_world_f(s - hs, r - hr),
    ];
    RenderPrimitive::Quad {
        corners: corners.map(|c| proj.world_to_screen(c)),
        color: colors::PLAYER,
    }
}

fn push_hud(prims: &mut Vec<RenderPrimitive>, state: &GameState, viewport: Viewport) {
    prims.push(RenderPrimitive::Text {
        pos: Vec2::new(16.0, 16.0),
        size: 20.0,
        color: colors::HUD_TEXT,
        text: format!("depth {}", state.player.slice.floor() as i32),
    });

    let center = viewport.center();
    let banner = if state.paused {
        Some("paused")
    } else {
        match state.phase {
            Phase::Playing => None,
            Phase::Dead => Some("you were caught. press enter"),
            Phase::Won => Some("you made it out. press enter"),
        }
    };
    if let Some(text) = banner {
        prims.push(RenderPrimitive::Text {
            pos: Vec2::new(center.x - 160.0, center.y - 16.0),
            size: 28.0,
            color: colors::HUD_TEXT,
            text: text.to_string(),
        });
    }
}
