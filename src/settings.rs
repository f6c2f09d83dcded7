//! Player settings and preferences
//!
//! Persisted separately from high scores. Gameplay constants are not
//! configurable; only presentation and audio live here.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceResult, Storage};
use crate::sim::state::TRAIL_LENGTH;

/// Longest trail the renderer will draw
pub const MAX_TRAIL_LENGTH: usize = 100;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Ball trails
    pub trails: bool,
    /// Trail points kept while airborne
    pub trail_length: usize,
    /// Firework particles on made shots
    pub fireworks: bool,

    // === Accessibility ===
    /// Reduced motion (no trails or fireworks)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            trails: true,
            trail_length: TRAIL_LENGTH,
            fireworks: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "arcade_hoops_settings";

    /// Effective trail cap (0 when trails are off or motion is reduced)
    pub fn effective_trail_length(&self) -> usize {
        if self.trails && !self.reduced_motion {
            self.trail_length.min(MAX_TRAIL_LENGTH)
        } else {
            0
        }
    }

    /// Effective fireworks toggle (respects reduced_motion)
    pub fn effective_fireworks(&self) -> bool {
        self.fireworks && !self.reduced_motion
    }

    /// Clamp out-of-range values (hand-edited files)
    pub fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.trail_length = self.trail_length.min(MAX_TRAIL_LENGTH);
    }

    /// Load settings, falling back to defaults on missing or unreadable data
    pub fn load_from(storage: &dyn Storage) -> Self {
        match persistence::load_json::<Settings>(storage, Self::STORAGE_KEY) {
            Ok(Some(mut settings)) => {
                settings.sanitize();
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, storage: &mut dyn Storage) -> PersistenceResult<()> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
