//! Sound cues
//!
//! The core only names the cue and its volume; playback belongs to whatever
//! [`AudioSink`] the host installs. Every cue is fire-and-forget.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball launched
    Launch,
    /// Ball hits a backboard
    BackboardHit,
    /// Ball bounces off the rim
    RimBounce,
    /// Ball bounces on the floor
    FloorBounce,
    /// Basket
    MadeShot,
    /// Missed basket
    MissedShot,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Launched { .. } => Some(SoundEffect::Launch),
            GameEvent::BackboardHit { .. } => Some(SoundEffect::BackboardHit),
            GameEvent::RimBounce { .. } => Some(SoundEffect::RimBounce),
            GameEvent::FloorBounce => Some(SoundEffect::FloorBounce),
            GameEvent::ShotMade { .. } => Some(SoundEffect::MadeShot),
            GameEvent::ShotMissed => Some(SoundEffect::MissedShot),
            GameEvent::Landed
            | GameEvent::Impulse { .. }
            | GameEvent::BallReset
            | GameEvent::PowerChanged { .. } => None,
        }
    }

    /// Asset name the host plays for this cue
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Launch => "launch",
            SoundEffect::BackboardHit => "backboard",
            SoundEffect::RimBounce => "rim",
            SoundEffect::FloorBounce => "bounce",
            SoundEffect::MadeShot => "made",
            SoundEffect::MissedShot => "missed",
        }
    }
}

/// Plays cues; implemented by the host
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {} @ {:.2}", effect.name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volume and mute state from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the cues for a batch of simulation events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HoopSide;
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder(played.clone())));
        audio.handle_events(&[
            GameEvent::Launched {
                target: HoopSide::Left,
                velocity: Vec3::Y,
            },
            GameEvent::Impulse { at: Vec3::ZERO },
            GameEvent::RimBounce { sphere: Vec3::ZERO },
            GameEvent::ShotMade {
                swish: false,
                points: 2,
                bonus: 0,
                combo: 1,
            },
        ]);
        let effects: Vec<_> = played.borrow().iter().map(|(e, _)| *e).collect();
        assert_eq!(
            effects,
            vec![
                SoundEffect::Launch,
                SoundEffect::RimBounce,
                SoundEffect::MadeShot
            ]
        );
        assert!((played.borrow()[0].1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder(played.clone())));
        audio.apply_settings(&Settings {
            muted: true,
            ..Default::default()
        });
        audio.play(SoundEffect::FloorBounce);
        assert!(played.borrow().is_empty());
        assert_eq!(audio.effective_volume(), 0.0);
    }
}
