//! Gameplay tuning
//!
//! Every balance number in one serializable struct, so a JSON file can
//! override any subset of the defaults without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay numbers a run is started with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Tunnel length in slices
    pub num_slices: i32,
    /// Cells along the top and bottom edges of a cross-section
    pub slice_width: i32,
    /// Cells along the left and right edges of a cross-section
    pub slice_height: i32,
    /// Slices between the near plane and the vanishing slice
    pub slices_per_screen: i32,
    /// How many slices past the player the vanishing slice sits short of a
    /// full screen
    pub player_screen_depth: i32,
    /// Player depth speed, slices per tick
    pub slice_speed: f32,
    /// Player ring speed, cells per tick
    pub ring_speed: f32,
    /// Ticks between danger zone advances
    pub danger_step_ticks: u64,
    /// Slice the danger zone starts on; negative gives a head start
    pub danger_start: i32,
    /// Distance over which the danger warning ramps up, in slices
    pub num_warning_zones: i32,
    /// Slice the player spawns at
    pub spawn_slice: f32,
    /// Player collision half-extent along the tunnel
    pub half_slice: f32,
    /// Player collision half-extent around the ring
    pub half_ring: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            num_slices: 3000,
            slice_width: 80,
            slice_height: 60,
            slices_per_screen: 46,
            player_screen_depth: 10,
            slice_speed: 1.0 / 3.0,
            ring_speed: 1.0,
            danger_step_ticks: 12,
            danger_start: -60,
            num_warning_zones: 50,
            spawn_slice: 10.5,
            half_slice: 0.45,
            half_ring: 0.45,
        }
    }
}

impl Tuning {
    /// Parse from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("loaded tuning overrides from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the sim cannot run with.
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(name: &str, v: f32) -> Result<(), TuningError> {
            if v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid(format!("{name} must be positive, got {v}")))
            }
        }

        positive("num_slices", self.num_slices as f32)?;
        positive("slice_width", self.slice_width as f32)?;
        positive("slice_height", self.slice_height as f32)?;
        positive("slices_per_screen", self.slices_per_screen as f32)?;
        positive("slice_speed", self.slice_speed)?;
        positive("ring_speed", self.ring_speed)?;
        positive("danger_step_ticks", self.danger_step_ticks as f32)?;
        positive("num_warning_zones", self.num_warning_zones as f32)?;
        positive("half_slice", self.half_slice)?;
        positive("half_ring", self.half_ring)?;
        if !(0..self.slices_per_screen).contains(&self.player_screen_depth) {
            return Err(TuningError::Invalid(format!(
                "player_screen_depth {} must sit inside the screen depth {}",
                self.player_screen_depth, self.slices_per_screen
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        Tuning::default().validate().expect("defaults must be runnable");
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{"num_slices": 500, "ring_speed": 2.0}"#).unwrap();
        assert_eq!(tuning.num_slices, 500);
        assert_eq!(tuning.ring_speed, 2.0);
        assert_eq!(tuning.slice_width, 80);
        assert_eq!(tuning.danger_step_ticks, 12);
    }

    #[test]
    fn test_bad_json_is_a_parse_error() {
        let err = Tuning::from_json("{num_slices: oops").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_zero_width_is_invalid() {
        let err = Tuning::from_json(r#"{"slice_width": 0}"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_depth_outside_screen_is_invalid() {
        let err = Tuning::from_json(r#"{"player_screen_depth": 46}"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }
}
