//! Game settings and preferences
//!
//! Persisted as JSON next to the executable, separately from any run state.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// How held keys turn into movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// A press latches its direction until a wall stops it
    #[default]
    Momentum,
    /// Movement only while a key is held
    Direct,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Momentum => "Momentum",
            ControlScheme::Direct => "Direct",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "momentum" => Some(ControlScheme::Momentum),
            "direct" => Some(ControlScheme::Direct),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Steering behavior new runs start with
    pub control_scheme: ControlScheme,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Danger hum volume (0.0 - 1.0)
    pub hum_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Debug ===
    /// Start runs with the danger zone unable to kill
    pub no_kill: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::default(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            hum_volume: 0.7,
            muted: false,

            no_kill: false,
        }
    }
}

impl Settings {
    /// Effective sound-effect volume (respects mute)
    pub fn effective_sfx(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective danger-hum volume (respects mute)
    pub fn effective_hum(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.hum_volume
        }
    }

    /// Load settings from a JSON file, falling back to defaults if the file is
    /// missing or does not parse.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("settings file {} did not parse: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
