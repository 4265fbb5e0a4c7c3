//! Playback controller: the pause flag and speed setting shared by every
//! in-flight step.
//!
//! The UI side is the only writer. Drivers read the speed when a suspension
//! begins and wait on the pause flag, so a change applies to the next step,
//! never to one already sleeping.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::config::PlaybackConfig;

/// Shared pause/speed state.
///
/// Clones share state.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    paused: Arc<watch::Sender<bool>>,
    speed: Arc<AtomicU32>,
    speed_min: u32,
    speed_max: u32,
    speed_step: u32,
    instant: bool,
}

impl PlaybackController {
    /// Create a controller running at `speed` steps per second, clamped to
    /// `[speed_min, speed_max]`.
    #[must_use]
    pub fn new(speed: u32, speed_min: u32, speed_max: u32) -> Self {
        let speed_min = speed_min.max(1);
        let speed_max = speed_max.max(speed_min);
        let (tx, _) = watch::channel(false);
        Self {
            paused: Arc::new(tx),
            speed: Arc::new(AtomicU32::new(speed.clamp(speed_min, speed_max))),
            speed_min,
            speed_max,
            speed_step: 1,
            instant: false,
        }
    }

    /// Create a controller from the playback section of the configuration.
    #[must_use]
    pub fn from_config(config: &PlaybackConfig) -> Self {
        let mut controller = Self::new(config.speed, config.speed_min, config.speed_max);
        controller.speed_step = config.speed_step.max(1);
        controller
    }

    /// Controller whose steps only yield to the scheduler, with no delay.
    ///
    /// Used by headless runs and benchmarks. Pausing still holds every step.
    #[must_use]
    pub fn instant() -> Self {
        let mut controller = Self::new(1, 1, 1);
        controller.instant = true;
        controller
    }

    /// Returns true while playback is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    /// Pause playback. Steps already sleeping finish their current delay.
    pub fn pause(&self) {
        self.paused.send_replace(true);
    }

    /// Resume playback, waking every held step.
    pub fn resume(&self) {
        self.paused.send_replace(false);
    }

    /// Flip the pause flag and return the new state.
    pub fn toggle_pause(&self) -> bool {
        let mut now_paused = false;
        self.paused.send_modify(|paused| {
            *paused = !*paused;
            now_paused = *paused;
        });
        tracing::debug!(paused = now_paused, "playback toggled");
        now_paused
    }

    /// Resolve once playback is not paused.
    pub async fn resumed(&self) {
        let mut rx = self.paused.subscribe();
        // The sender lives as long as `self`, so this only ends on resume.
        let _ = rx.wait_for(|paused| !*paused).await;
    }

    /// Current speed in steps per second.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed.load(Ordering::Relaxed)
    }

    /// Selectable speed range.
    #[must_use]
    pub const fn speed_bounds(&self) -> (u32, u32) {
        (self.speed_min, self.speed_max)
    }

    /// Set the speed, clamped to the configured bounds. Returns the applied value.
    pub fn set_speed(&self, speed: u32) -> u32 {
        let applied = speed.clamp(self.speed_min, self.speed_max);
        self.speed.store(applied, Ordering::Relaxed);
        tracing::debug!(speed = applied, "speed changed");
        applied
    }

    /// Raise the speed by one configured step.
    pub fn speed_up(&self) -> u32 {
        self.set_speed(self.speed().saturating_add(self.speed_step))
    }

    /// Lower the speed by one configured step.
    pub fn slow_down(&self) -> u32 {
        self.set_speed(self.speed().saturating_sub(self.speed_step))
    }

    /// Delay to use for a step starting now: `1000 / speed` milliseconds.
    #[must_use]
    pub fn step_delay(&self) -> Duration {
        if self.instant {
            return Duration::ZERO;
        }
        Duration::from_micros(1_000_000 / u64::from(self.speed().max(1)))
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::from_config(&PlaybackConfig::default())
    }
}
