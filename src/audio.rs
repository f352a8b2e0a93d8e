//! Audio direction
//!
//! The sim emits `GameEvent`s; this module turns them into cue playbacks and
//! describes each cue as oscillator layers, so any backend can synthesize the
//! effects without audio files. The director holds the volume state; nothing
//! here touches a device.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// A move refused by a wall
    Bump,
    /// Death explosion
    Explosion,
    /// Run cleared
    Fanfare,
}

/// Oscillator waveform for a cue layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscKind {
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

/// One oscillator layer of a cue: a frequency sweep under a decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueLayer {
    pub osc: OscKind,
    /// Seconds after the cue starts
    pub delay: f32,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Seconds from full gain to silence
    pub duration: f32,
    /// Peak gain before the volume scale
    pub gain: f32,
}

const fn layer(
    osc: OscKind,
    delay: f32,
    freq_start: f32,
    freq_end: f32,
    duration: f32,
    gain: f32,
) -> CueLayer {
    CueLayer {
        osc,
        delay,
        freq_start,
        freq_end,
        duration,
        gain,
    }
}

/// Solid low thump
const BUMP_LAYERS: [CueLayer; 1] = [layer(OscKind::Sine, 0.0, 150.0, 60.0, 0.1, 0.6)];

/// Descending boom with a high crack on top
const EXPLOSION_LAYERS: [CueLayer; 2] = [
    layer(OscKind::Sawtooth, 0.0, 100.0, 30.0, 0.4, 0.5),
    layer(OscKind::Square, 0.0, 1500.0, 1500.0, 0.1, 0.2),
];

/// Rising four-note arpeggio
const FANFARE_LAYERS: [CueLayer; 4] = [
    layer(OscKind::Triangle, 0.0, 400.0, 400.0, 0.4, 0.3),
    layer(OscKind::Triangle, 0.1, 500.0, 500.0, 0.4, 0.3),
    layer(OscKind::Triangle, 0.2, 600.0, 600.0, 0.4, 0.3),
    layer(OscKind::Triangle, 0.3, 800.0, 800.0, 0.4, 0.3),
];

impl AudioCue {
    /// Synthesis recipe for this cue
    pub fn layers(&self) -> &'static [CueLayer] {
        match self {
            AudioCue::Bump => &BUMP_LAYERS,
            AudioCue::Explosion => &EXPLOSION_LAYERS,
            AudioCue::Fanfare => &FANFARE_LAYERS,
        }
    }
}

/// A cue the backend should start this frame, at an already-resolved volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuePlayback {
    pub cue: AudioCue,
    pub volume: f32,
}

/// Volume state and the event-to-cue mapping
#[derive(Debug, Clone)]
pub struct AudioDirector {
    master_volume: f32,
    sfx_volume: f32,
    hum_volume: f32,
    muted: bool,
}

impl AudioDirector {
    pub fn new(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            hum_volume: settings.hum_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_sfx(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Map a tick's events to cue playbacks. Empty when effectively silent.
    pub fn cues_for(&self, events: &[GameEvent]) -> Vec<CuePlayback> {
        let volume = self.effective_sfx();
        if volume <= 0.0 {
            return Vec::new();
        }
        events
            .iter()
            .map(|event| {
                let cue = match event {
                    GameEvent::Bump => AudioCue::Bump,
                    GameEvent::Death => AudioCue::Explosion,
                    GameEvent::Win => AudioCue::Fanfare,
                };
                CuePlayback { cue, volume }
            })
            .collect()
    }

    /// Loudness of the looping danger hum for the current warning intensity
    pub fn hum_level(&self, warning_intensity: f32) -> f32 {
        if self.muted {
            return 0.0;
        }
        warning_intensity.clamp(0.0, 1.0) * self.master_volume * self.hum_volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn director() -> AudioDirector {
        AudioDirector::new(&Settings::default())
    }

    #[test]
    fn test_events_map_to_cues() {
        let cues = director().cues_for(&[GameEvent::Bump, GameEvent::Death, GameEvent::Win]);
        let kinds: Vec<AudioCue> = cues.iter().map(|c| c.cue).collect();
        assert_eq!(
            kinds,
            vec![AudioCue::Bump, AudioCue::Explosion, AudioCue::Fanfare]
        );
        assert!(cues.iter().all(|c| c.volume > 0.0));
    }

    #[test]
    fn test_muted_director_stays_silent() {
        let mut d = director();
        d.set_muted(true);
        assert!(d.cues_for(&[GameEvent::Death]).is_empty());
        assert_eq!(d.hum_level(1.0), 0.0);
    }

    #[test]
    fn test_zero_master_volume_drops_cues() {
        let mut d = director();
        d.set_master_volume(0.0);
        assert!(d.cues_for(&[GameEvent::Bump]).is_empty());
    }

    #[test]
    fn test_hum_follows_warning_intensity() {
        let d = director();
        assert_eq!(d.hum_level(0.0), 0.0);
        let half = d.hum_level(0.5);
        let full = d.hum_level(1.0);
        assert!(half > 0.0 && full > half);
        // Out-of-range intensity clamps rather than overdriving
        assert_eq!(d.hum_level(3.0), full);
    }

    #[test]
    fn test_cue_layers_are_ordered() {
        for cue in [AudioCue::Bump, AudioCue::Explosion, AudioCue::Fanfare] {
            let layers = cue.layers();
            assert!(!layers.is_empty());
            assert!(layers.windows(2).all(|w| w[0].delay <= w[1].delay));
            assert!(layers.iter().all(|l| l.duration > 0.0 && l.gain > 0.0));
        }
    }
}
