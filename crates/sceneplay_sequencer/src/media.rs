// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation and timeline playback.
//!
//! The sequencer never animates clips itself; it starts playback through an
//! [`AnimationDriver`] and polls the playing flag once per frame until it
//! clears. Hosts plug in their own driver; [`TimedMediaDriver`] is the
//! built-in clock-backed implementation used headless and in tests.

use indexmap::IndexMap;
use sceneplay_stage::{FrameClock, ObjectId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for authored timelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub Uuid);

impl TimelineId {
    /// Create a new random timeline ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TimelineId {
    fn default() -> Self {
        Self::new()
    }
}

/// Playback backend the sequencer drives animation steps through
pub trait AnimationDriver {
    /// Start timeline playback; returns false if the timeline is unknown
    fn start_timeline(&mut self, timeline: &TimelineId) -> bool;

    /// Start a named clip on an object; returns false if the clip is unknown
    fn start_clip(&mut self, target: &ObjectId, clip: &str) -> bool;

    /// Whether any started playback is still running
    fn is_playing(&self) -> bool;
}

/// Clock-backed driver: registered timelines and clips play for a fixed
/// duration of tick time
pub struct TimedMediaDriver {
    clock: FrameClock,
    timelines: IndexMap<TimelineId, f32>,
    clips: IndexMap<String, f32>,
    playing_until: f64,
}

impl TimedMediaDriver {
    /// Create a driver with no registered media
    pub fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            timelines: IndexMap::new(),
            clips: IndexMap::new(),
            playing_until: 0.0,
        }
    }

    /// Register a timeline with a playback duration in seconds
    pub fn register_timeline(&mut self, duration: f32) -> TimelineId {
        let id = TimelineId::new();
        self.timelines.insert(id, duration);
        id
    }

    /// Register a named clip with a playback duration in seconds
    pub fn register_clip(&mut self, name: impl Into<String>, duration: f32) {
        self.clips.insert(name.into(), duration);
    }

    fn begin(&mut self, duration: f32) {
        self.playing_until = self.clock.elapsed() + f64::from(duration);
    }
}

impl AnimationDriver for TimedMediaDriver {
    fn start_timeline(&mut self, timeline: &TimelineId) -> bool {
        match self.timelines.get(timeline).copied() {
            Some(duration) => {
                tracing::debug!(?timeline, duration, "timeline started");
                self.begin(duration);
                true
            }
            None => {
                tracing::debug!(?timeline, "unknown timeline, skipping");
                false
            }
        }
    }

    fn start_clip(&mut self, target: &ObjectId, clip: &str) -> bool {
        match self.clips.get(clip).copied() {
            Some(duration) => {
                tracing::debug!(?target, clip, duration, "clip started");
                self.begin(duration);
                true
            }
            None => {
                tracing::debug!(clip, "unknown clip, skipping");
                false
            }
        }
    }

    fn is_playing(&self) -> bool {
        self.clock.elapsed() < self.playing_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_clears_after_duration() {
        let clock = FrameClock::new();
        let mut driver = TimedMediaDriver::new(clock.clone());
        let timeline = driver.register_timeline(1.0);

        assert!(driver.start_timeline(&timeline));
        assert!(driver.is_playing());

        clock.tick(0.6);
        assert!(driver.is_playing());
        clock.tick(0.6);
        assert!(!driver.is_playing());
    }

    #[test]
    fn unknown_media_does_not_start() {
        let clock = FrameClock::new();
        let mut driver = TimedMediaDriver::new(clock);
        driver.register_clip("wave", 0.5);

        assert!(!driver.start_timeline(&TimelineId::new()));
        assert!(!driver.start_clip(&ObjectId::new(), "bow"));
        assert!(!driver.is_playing());

        assert!(driver.start_clip(&ObjectId::new(), "wave"));
        assert!(driver.is_playing());
    }
}
