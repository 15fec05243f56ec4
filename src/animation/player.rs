//! Tick-driven playback of a loaded animation onto a live rig.

use log::{debug, warn};

use super::buffer::AnimationBuffer;
use crate::schema::PlaybackConfig;

/// Host clock queried once per tick.
pub trait HostClock {
    /// True while the host itself is paused; playback does nothing then.
    fn is_paused(&self) -> bool;
}

/// Character rig that receives frame data.
pub trait RigSink {
    /// Hold the rig still so its own animation does not fight playback.
    fn set_frozen(&mut self, frozen: bool);

    /// Apply one frame's raw bytes (exactly `FRAME_SIZE` long).
    fn apply_frame(&mut self, frame: usize, data: &[u8]);
}

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Not playing; the rig is released.
    #[default]
    Idle,
    /// Applying frames and advancing every tick.
    Playing,
    /// Applying the current frame without advancing.
    Paused,
}

/// Playback driver.
///
/// Usage:
/// ```ignore
/// let mut driver = PlaybackDriver::new(&config.playback);
/// driver.play();
/// loop {
///     driver.tick(&clock, editor.buffer(), &mut rig);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PlaybackDriver {
    state: PlaybackState,
    current_frame: usize,
    loop_enabled: bool,
    start_paused: bool,
    rig_frozen: bool,
}

impl PlaybackDriver {
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            state: PlaybackState::Idle,
            current_frame: 0,
            loop_enabled: config.loop_enabled,
            start_paused: config.start_paused,
            rig_frozen: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn is_looping(&self) -> bool {
        self.loop_enabled
    }

    pub fn is_rig_frozen(&self) -> bool {
        self.rig_frozen
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    /// Start (or resume) playback.
    pub fn play(&mut self) {
        let next = match self.state {
            PlaybackState::Idle if self.start_paused => PlaybackState::Paused,
            _ => PlaybackState::Playing,
        };
        self.transition(next);
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.transition(PlaybackState::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.transition(PlaybackState::Playing);
        }
    }

    pub fn stop(&mut self) {
        self.transition(PlaybackState::Idle);
    }

    /// Move the cursor, clamped to the animation.
    pub fn seek(&mut self, frame: usize, frame_count: usize) {
        self.current_frame = frame.min(frame_count.saturating_sub(1));
    }

    /// Rewind after a new animation is loaded.
    pub fn reset(&mut self) {
        self.current_frame = 0;
    }

    /// Advance one host tick.
    ///
    /// `buffer` is `None` while no animation is loaded.
    pub fn tick<C, R>(&mut self, clock: &C, buffer: Option<&AnimationBuffer>, rig: &mut R)
    where
        C: HostClock + ?Sized,
        R: RigSink + ?Sized,
    {
        if clock.is_paused() {
            return;
        }

        let Some(buffer) = buffer else {
            self.release(rig);
            return;
        };

        if self.state == PlaybackState::Idle {
            self.release(rig);
            return;
        }

        if !self.rig_frozen {
            rig.set_frozen(true);
            self.rig_frozen = true;
        }

        let frame_count = buffer.frame_count();
        if self.current_frame >= frame_count {
            self.current_frame = 0;
        }
        match buffer.frame_slice(self.current_frame) {
            Ok(data) => rig.apply_frame(self.current_frame, data),
            Err(e) => warn!("Skipping frame: {}", e),
        }

        if self.state == PlaybackState::Playing {
            self.current_frame += 1;
        }

        if self.current_frame >= frame_count {
            self.current_frame = 0;
            if !self.loop_enabled {
                self.transition(PlaybackState::Idle);
            }
        }
    }

    fn release<R: RigSink + ?Sized>(&mut self, rig: &mut R) {
        if self.rig_frozen {
            rig.set_frozen(false);
            self.rig_frozen = false;
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!("Playback {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
