//! Fixed-timestep simulation
//!
//! One `tick` is the atom of gameplay: steering, the advancing danger zone,
//! and the death and win checks all happen here, in a fixed order, so a seed
//! plus an input trace replays a run exactly.

use log::info;

use super::state::{Direction, GameEvent, GameState, Phase, Scene, TitleScreen, TITLE_RING_TICKS};
use crate::settings::{ControlScheme, Settings};
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Dive deeper
    pub move_in: bool,
    /// Back out toward the entrance
    pub move_out: bool,
    /// Clockwise around the ring
    pub move_cw: bool,
    /// Counterclockwise around the ring
    pub move_ccw: bool,
    /// Toggle pause
    pub pause: bool,
    /// Start a run, or leave a finished one
    pub confirm: bool,
    /// Toggle between the Momentum and Direct steering schemes
    pub toggle_scheme: bool,
    /// Debug toggle: the danger zone cannot kill
    pub toggle_no_kill: bool,
}

/// Advance a run by one tick. Returns the events the tick produced; the shell
/// maps them to audio and UI.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        state.paused = !state.paused;
        info!("{}", if state.paused { "paused" } else { "resumed" });
    }
    if state.paused {
        return events;
    }

    if input.toggle_no_kill {
        state.no_kill = !state.no_kill;
        info!("no-kill {}", if state.no_kill { "on" } else { "off" });
    }
    if input.toggle_scheme {
        state.control_scheme = match state.control_scheme {
            ControlScheme::Momentum => ControlScheme::Direct,
            ControlScheme::Direct => ControlScheme::Momentum,
        };
        info!("control scheme: {:?}", state.control_scheme);
    }

    state.tick += 1;

    if state.phase == Phase::Dead {
        advance_particles(state);
        return events;
    }

    if let Some(dir) = steering(state, input) {
        let bumped = match dir {
            Direction::In => state
                .player
                .incr_slice(&state.level.grid, state.tuning.slice_speed),
            Direction::Out => state
                .player
                .incr_slice(&state.level.grid, -state.tuning.slice_speed),
            Direction::Cw => state
                .player
                .incr_ring(&state.level.grid, state.tuning.ring_speed),
            Direction::Ccw => state
                .player
                .incr_ring(&state.level.grid, -state.tuning.ring_speed),
        };
        if bumped {
            state.player.heading = None;
            events.push(GameEvent::Bump);
        }
    }

    if state.tick % state.tuning.danger_step_ticks == 0 {
        state.danger_zone += 1;
    }

    if state.phase == Phase::Playing {
        if !state.no_kill && (state.player.slice.floor() as i32) <= state.danger_zone {
            state.phase = Phase::Dead;
            state.spawn_explosion();
            events.push(GameEvent::Death);
            info!(
                "caught by the danger zone at depth {} on tick {}",
                state.player.slice.floor(),
                state.tick
            );
        } else if state.player.slice > state.level.winning_zone as f32 {
            state.phase = Phase::Won;
            events.push(GameEvent::Win);
            info!("cleared the tunnel on tick {}", state.tick);
        }
    }

    events
}

/// Resolve this tick's movement direction from held keys and the latched
/// heading. Momentum keeps the last direction alive until a bump or a new
/// press; Direct moves only while a key is held.
fn steering(state: &mut GameState, input: &TickInput) -> Option<Direction> {
    let pressed = if input.move_in {
        Some(Direction::In)
    } else if input.move_out {
        Some(Direction::Out)
    } else if input.move_cw {
        Some(Direction::Cw)
    } else if input.move_ccw {
        Some(Direction::Ccw)
    } else {
        None
    };

    match state.control_scheme {
        ControlScheme::Direct => pressed,
        ControlScheme::Momentum => {
            if pressed.is_some() {
                state.player.heading = pressed;
            }
            state.player.heading
        }
    }
}

fn advance_particles(state: &mut GameState) {
    for p in state.particles.iter_mut() {
        p.pos += p.vel;
        p.vel *= 0.96;
        p.life -= 0.02;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Drive whichever scene is active. A confirm on the title starts a run; a
/// confirm on a finished run returns to the title with a fresh seed.
pub fn advance_scene(
    scene: &mut Scene,
    input: &TickInput,
    settings: &Settings,
    tuning: &Tuning,
) -> Vec<GameEvent> {
    match scene {
        Scene::Title(title) => {
            title.tick += 1;
            if title.tick % TITLE_RING_TICKS == 0 {
                title.advance();
            }
            if input.confirm {
                let seed = title.run_seed;
                info!("starting run with seed {seed}");
                let mut state = GameState::new(seed, tuning.clone());
                state.control_scheme = settings.control_scheme;
                state.no_kill = settings.no_kill;
                *scene = Scene::Level(Box::new(state));
            }
            Vec::new()
        }
        Scene::Level(state) => {
            if input.confirm && state.phase != Phase::Playing {
                let next_seed = state.seed.wrapping_add(1);
                *scene = Scene::Title(TitleScreen::new(next_seed));
                return Vec::new();
            }
            tick(state, input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generate::Level;
    use crate::sim::grid::GridPos;
    use crate::sim::ring::RingLayout;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn small_tuning() -> Tuning {
        Tuning {
            num_slices: 60,
            slice_width: 8,
            slice_height: 6,
            spawn_slice: 10.5,
            danger_start: -30,
            ..Tuning::default()
        }
    }

    fn open_state() -> GameState {
        let tuning = small_tuning();
        let level = Level::from_pattern(tuning.num_slices, RingLayout::new(8, 6), |_, _| false);
        GameState::with_level(1, Pcg32::seed_from_u64(1), tuning, level)
    }

    fn held(dir: fn(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        dir(&mut input);
        input
    }

    #[test]
    fn test_direct_scheme_moves_only_while_held() {
        let mut state = open_state();
        state.control_scheme = ControlScheme::Direct;
        let start = state.player.ring;

        tick(&mut state, &held(|i| i.move_cw = true));
        assert_eq!(state.player.ring, start + 1.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.ring, start + 1.0);
    }

    #[test]
    fn test_momentum_scheme_latches() {
        let mut state = open_state();
        let start = state.player.slice;

        tick(&mut state, &held(|i| i.move_in = true));
        let after_press = state.player.slice;
        assert!(after_press > start);

        // Keeps diving with no keys held
        tick(&mut state, &TickInput::default());
        assert!(state.player.slice > after_press);

        // A new direction replaces the latch
        let ring = state.player.ring;
        tick(&mut state, &held(|i| i.move_ccw = true));
        assert_eq!(state.player.ring, ring - 1.0);
    }

    #[test]
    fn test_bump_emits_event_and_clears_heading() {
        let mut state = open_state();
        let mut grid = state.level.grid.clone();
        grid.set_blocked(GridPos::new(10, 20));
        grid.set_blocked(GridPos::new(11, 20));
        state.level.grid = grid;
        state.player.ring = 19.5;

        let events = tick(&mut state, &held(|i| i.move_cw = true));
        assert_eq!(events, vec![GameEvent::Bump]);
        assert_eq!(state.player.ring, 19.5);
        assert_eq!(state.player.heading, None);

        // The latch did not survive the bump
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.player.ring, 19.5);
    }

    #[test]
    fn test_danger_zone_cadence() {
        let mut state = open_state();
        let start = state.danger_zone;
        for _ in 0..state.tuning.danger_step_ticks {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.danger_zone, start + 1);
        for _ in 0..state.tuning.danger_step_ticks {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.danger_zone, start + 2);
    }

    #[test]
    fn test_danger_zone_kills() {
        let mut state = open_state();
        state.danger_zone = 12;
        state.player.slice = 12.0;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, Phase::Dead);
        assert!(events.contains(&GameEvent::Death));
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_no_kill_survives_the_zone() {
        let mut state = open_state();
        state.no_kill = true;
        state.danger_zone = 12;
        state.player.slice = 12.0;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, Phase::Playing);
        assert!(events.is_empty());
    }

    #[test]
    fn test_dead_state_only_animates_particles() {
        let mut state = open_state();
        state.danger_zone = 12;
        state.player.slice = 12.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, Phase::Dead);

        let slice = state.player.slice;
        let life_before = state.particles[0].life;
        tick(&mut state, &held(|i| i.move_in = true));
        assert_eq!(state.player.slice, slice);
        assert!(state.particles[0].life < life_before);
    }

    #[test]
    fn test_win_fires_once() {
        let mut state = open_state();
        state.level.winning_zone = 20;
        state.player.slice = 20.5;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, Phase::Won);
        assert_eq!(events, vec![GameEvent::Win]);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.phase, Phase::Won);
    }

    #[test]
    fn test_pause_freezes_the_sim() {
        let mut state = open_state();
        tick(&mut state, &held(|i| i.pause = true));
        assert!(state.paused);
        assert_eq!(state.tick, 0);

        tick(&mut state, &held(|i| i.move_in = true));
        assert_eq!(state.tick, 0);
        assert_eq!(state.player.slice, 10.5);

        tick(&mut state, &held(|i| i.pause = true));
        assert!(!state.paused);
        tick(&mut state, &held(|i| i.move_in = true));
        assert!(state.tick > 0);
    }

    #[test]
    fn test_scheme_toggle() {
        let mut state = open_state();
        assert_eq!(state.control_scheme, ControlScheme::Momentum);
        tick(&mut state, &held(|i| i.toggle_scheme = true));
        assert_eq!(state.control_scheme, ControlScheme::Direct);
        tick(&mut state, &held(|i| i.toggle_scheme = true));
        assert_eq!(state.control_scheme, ControlScheme::Momentum);
    }

    #[test]
    fn test_determinism() {
        let trace: Vec<TickInput> = (0..200)
            .map(|i| {
                let mut input = TickInput::default();
                match i % 7 {
                    0 | 1 | 2 => input.move_in = true,
                    3 => input.move_cw = true,
                    4 => input.move_ccw = true,
                    _ => {}
                }
                input
            })
            .collect();

        let mut a = open_state();
        let mut b = open_state();
        let mut events_a = Vec::new();
        let mut events_b = Vec::new();
        for input in &trace {
            events_a.extend(tick(&mut a, input));
            events_b.extend(tick(&mut b, input));
        }
        assert_eq!(a.player.slice, b.player.slice);
        assert_eq!(a.player.ring, b.player.ring);
        assert_eq!(a.danger_zone, b.danger_zone);
        assert_eq!(a.phase, b.phase);
        assert_eq!(events_a, events_b);
    }

    #[test]
    fn test_title_confirm_starts_a_run() {
        let tuning = Tuning {
            num_slices: 260,
            slice_width: 8,
            slice_height: 6,
            spawn_slice: 10.5,
            ..Tuning::default()
        };
        let settings = Settings::default();
        let mut scene = Scene::Title(TitleScreen::new(9));

        advance_scene(&mut scene, &TickInput::default(), &settings, &tuning);
        assert!(matches!(scene, Scene::Title(_)));

        advance_scene(&mut scene, &held(|i| i.confirm = true), &settings, &tuning);
        match &scene {
            Scene::Level(state) => {
                assert_eq!(state.seed, 9);
                assert_eq!(state.phase, Phase::Playing);
            }
            Scene::Title(_) => panic!("confirm did not start a run"),
        }
    }

    #[test]
    fn test_finished_run_returns_to_title() {
        let tuning = small_tuning();
        let settings = Settings::default();
        let mut state = open_state();
        state.phase = Phase::Won;
        let seed = state.seed;
        let mut scene = Scene::Level(Box::new(state));

        advance_scene(&mut scene, &held(|i| i.confirm = true), &settings, &tuning);
        match &scene {
            Scene::Title(title) => assert_eq!(title.run_seed, seed + 1),
            Scene::Level(_) => panic!("confirm did not leave the finished run"),
        }
    }

    #[test]
    fn test_title_rings_advance_on_cadence() {
        let tuning = small_tuning();
        let settings = Settings::default();
        let mut scene = Scene::Title(TitleScreen::new(3));
        for _ in 0..TITLE_RING_TICKS * 3 {
            advance_scene(&mut scene, &TickInput::default(), &settings, &tuning);
        }
        match &scene {
            Scene::Title(title) => assert_eq!(title.rings.len(), 4),
            Scene::Level(_) => panic!("no confirm was sent"),
        }
    }
}
