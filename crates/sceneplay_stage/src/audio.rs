// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fire-and-forget audio cues.
//!
//! The runtime never waits on audio. Cues are appended to a log the host
//! drains each frame and maps to actual clips.

use crate::clock::FrameClock;

/// One cue the runtime asked to play
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedCue {
    /// Cue identifier
    pub cue: String,
    /// Clock time the cue was requested, in seconds
    pub at: f64,
}

/// Cue sink with master volume/mute
#[derive(Debug, Clone)]
pub struct CuePlayer {
    clock: FrameClock,
    pending: Vec<PlayedCue>,
    volume: f32,
    muted: bool,
}

impl CuePlayer {
    /// Create a player stamping cues with the given clock
    pub fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            pending: Vec::new(),
            volume: 1.0,
            muted: false,
        }
    }

    /// Request a cue; muted players drop it
    pub fn play(&mut self, cue: &str) {
        if self.muted || self.volume <= 0.0 {
            tracing::trace!(cue, "cue suppressed (muted)");
            return;
        }
        tracing::debug!(cue, "cue");
        self.pending.push(PlayedCue {
            cue: cue.to_string(),
            at: self.clock.elapsed(),
        });
    }

    /// Request a cue if one is configured
    pub fn play_optional(&mut self, cue: Option<&str>) {
        if let Some(cue) = cue {
            self.play(cue);
        }
    }

    /// Take all cues requested since the last drain
    pub fn drain(&mut self) -> Vec<PlayedCue> {
        std::mem::take(&mut self.pending)
    }

    /// Cues requested and not yet drained
    pub fn pending(&self) -> &[PlayedCue] {
        &self.pending
    }

    /// Set master volume (clamped to 0..=1)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Master volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Mute or unmute the player
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cues_are_stamped_and_drained() {
        let clock = FrameClock::new();
        let mut player = CuePlayer::new(clock.clone());
        player.play("pick");
        clock.tick(1.0);
        player.play("drop");

        let cues = player.drain();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].cue, "pick");
        assert_eq!(cues[0].at, 0.0);
        assert_eq!(cues[1].cue, "drop");
        assert_eq!(cues[1].at, 1.0);
        assert!(player.pending().is_empty());
    }

    #[test]
    fn muted_player_drops_cues() {
        let mut player = CuePlayer::new(FrameClock::new());
        player.set_muted(true);
        player.play("pick");
        player.play_optional(Some("drop"));
        player.play_optional(None);
        assert!(player.drain().is_empty());
    }
}
