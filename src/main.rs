//! Tunnel Dive entry point
//!
//! Headless demo shell. Runs the attract screen, starts a run, autopilots the
//! dive with the same fixed-step loop a windowed shell would use, and reports
//! what the final frame would draw. A real shell wires its window to
//! `build_scene` and `tessellate` and its mixer to the `AudioDirector`.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tunnel_dive::audio::AudioDirector;
use tunnel_dive::consts::{MAX_SUBSTEPS, SCREEN_HEIGHT, SCREEN_WIDTH, SIM_DT};
use tunnel_dive::renderer::{build_scene, tessellate, Viewport};
use tunnel_dive::sim::{advance_scene, GameEvent, Phase, Scene, TickInput, TitleScreen};
use tunnel_dive::tuning::TuningError;
use tunnel_dive::{Settings, Tuning};

/// Demo frames before the shell gives up on a run
const MAX_DEMO_FRAMES: u32 = 20_000;
/// Attract-screen frames before the demo presses start
const TITLE_FRAMES: u32 = 120;
/// Frames of sideways dodging after a bump
const DODGE_FRAMES: u32 = 12;

/// The pieces a windowed shell would hold between frames
struct DemoShell {
    scene: Scene,
    settings: Settings,
    tuning: Tuning,
    accumulator: f32,
    input: TickInput,
}

impl DemoShell {
    /// Run the sim ticks one 60 Hz frame is worth
    fn frame(&mut self) -> Vec<GameEvent> {
        self.accumulator += SIM_DT;
        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(advance_scene(
                &mut self.scene,
                &self.input,
                &self.settings,
                &self.tuning,
            ));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.confirm = false;
            self.input.pause = false;
            self.input.toggle_scheme = false;
            self.input.toggle_no_kill = false;
        }
        events
    }
}

fn main() {
    env_logger::init();

    let settings = Settings::load(Path::new("settings.json"));
    let tuning = match Tuning::load(Path::new("tuning.json")) {
        Ok(tuning) => tuning,
        Err(TuningError::Io(_)) => Tuning::default(),
        Err(err) => {
            log::warn!("ignoring tuning file: {err}");
            Tuning::default()
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(48);

    let audio = AudioDirector::new(&settings);
    let viewport = Viewport::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut shell = DemoShell {
        scene: Scene::Title(TitleScreen::new(seed)),
        settings,
        tuning,
        accumulator: 0.0,
        input: TickInput::default(),
    };

    // Let the attract animation run, then press start
    for _ in 0..TITLE_FRAMES {
        shell.frame();
    }
    shell.input.confirm = true;
    shell.frame();

    // Autopilot: dive until a wall refuses, dodge sideways, dive again
    let mut dodge_frames = 0u32;
    let mut dodge_cw = true;
    let mut bumps = 0u32;
    let mut frames = 0u32;
    loop {
        frames += 1;
        shell.input.move_in = dodge_frames == 0;
        shell.input.move_cw = dodge_frames > 0 && dodge_cw;
        shell.input.move_ccw = dodge_frames > 0 && !dodge_cw;
        dodge_frames = dodge_frames.saturating_sub(1);

        let events = shell.frame();
        for playback in audio.cues_for(&events) {
            log::debug!("cue {:?} at volume {:.2}", playback.cue, playback.volume);
        }
        if events.contains(&GameEvent::Bump) {
            bumps += 1;
            dodge_frames = DODGE_FRAMES;
            dodge_cw = !dodge_cw;
        }

        let Scene::Level(state) = &shell.scene else {
            break;
        };
        if frames % 600 == 0 {
            log::debug!(
                "depth {:.0}, danger zone {}, hum {:.2}",
                state.player.slice,
                state.danger_zone,
                audio.hum_level(state.warning_intensity())
            );
        }
        if state.phase != Phase::Playing {
            break;
        }
        if frames >= MAX_DEMO_FRAMES {
            log::warn!("demo hit the frame cap while still playing");
            break;
        }
    }

    let prims = build_scene(&shell.scene, viewport, None);
    let mut verts = Vec::new();
    tessellate(&prims, &mut verts);
    log::info!(
        "final frame: {} primitives, {} vertices",
        prims.len(),
        verts.len()
    );

    if let Scene::Level(state) = &shell.scene {
        let outcome = match state.phase {
            Phase::Won => "made it out",
            Phase::Dead => "was caught by the danger zone",
            Phase::Playing => "ran out of demo frames",
        };
        println!(
            "seed {}: {outcome} at depth {} after {} ticks ({:.1}s), {bumps} bumps",
            state.seed,
            state.player.slice.floor() as i32,
            state.tick,
            state.tick as f32 * SIM_DT,
        );
    }
}
