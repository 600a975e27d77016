//! Per-session playback clock
//!
//! Each frame carries its own display duration, so playback is variable-rate
//! and a fixed-interval ticker cannot pace it. [`FrameClock`] instead
//! schedules one wake-up at now + duration: a one-shot deadline re-armed for
//! every frame. The deadline is computed once at arm time, so pacing error
//! never accumulates beyond single-shot timer resolution.
//!
//! Durations are expressed in source ticks; the clock converts them to wall
//! time with a tick rate (ticks per second) fixed for the session.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

/// One-shot, re-armable playback timer for a single session.
#[derive(Debug)]
pub struct FrameClock {
    tick_rate: f64,
    deadline: Option<Instant>,
}

impl FrameClock {
    /// Create a clock converting ticks to wall time at `tick_rate` ticks per
    /// second. The rate must be positive; `PlaybackConfig::validate` enforces
    /// this before a clock is built.
    pub fn new(tick_rate: f64) -> Self {
        debug_assert!(tick_rate > 0.0, "tick_rate must be positive");
        Self { tick_rate, deadline: None }
    }

    /// Wall-clock duration of `ticks` source ticks.
    pub fn tick_duration(&self, ticks: u32) -> Duration {
        Duration::from_secs_f64(f64::from(ticks) / self.tick_rate)
    }

    /// Arm the one-shot deadline `ticks` from now, replacing any pending
    /// deadline.
    pub fn arm(&mut self, ticks: u32) {
        let duration = self.tick_duration(ticks);
        self.deadline = Some(Instant::now() + duration);
        trace!("Clock armed for {} ticks ({:?})", ticks, duration);
    }

    /// Disarm any pending deadline. Idempotent; called on every termination
    /// path.
    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is currently pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Wait for the armed deadline to pass, then clear it.
    ///
    /// Pends forever while disarmed: a session with no armed timer has
    /// nothing to wake up for. Cancellation-safe, since dropping the future
    /// leaves the deadline in place and a re-created wait resumes against
    /// the same instant.
    pub async fn expired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, timeout};

    #[test]
    fn tick_duration_follows_the_configured_rate() {
        let clock = FrameClock::new(15.0);
        assert_eq!(clock.tick_duration(15), Duration::from_secs(1));
        assert_eq!(clock.tick_duration(0), Duration::ZERO);

        // The 100ms-per-tick deployment is tick_rate = 10
        let clock = FrameClock::new(10.0);
        assert_eq!(clock.tick_duration(1), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_resolves_at_the_armed_deadline() {
        let mut clock = FrameClock::new(15.0);
        clock.arm(30);

        let before = Instant::now();
        clock.expired().await;
        assert_eq!(before.elapsed(), Duration::from_secs(2));
        assert!(!clock.is_armed(), "deadline should clear once it fires");
    }

    #[tokio::test(start_paused = true)]
    async fn expired_pends_forever_while_disarmed() {
        let mut clock = FrameClock::new(15.0);
        assert!(!clock.is_armed());

        let waited = timeout(Duration::from_secs(60), clock.expired()).await;
        assert!(waited.is_err(), "a disarmed clock must never fire");
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_pending_deadline() {
        let mut clock = FrameClock::new(15.0);
        clock.arm(150); // 10s
        clock.arm(15); // 1s, replaces the first deadline

        let before = Instant::now();
        clock.expired().await;
        assert_eq!(before.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tick_frame_expires_immediately() {
        let mut clock = FrameClock::new(15.0);
        clock.arm(0);

        let before = Instant::now();
        clock.expired().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[test]
    fn disarm_is_idempotent() {
        let mut clock = FrameClock::new(15.0);
        clock.arm(10);
        clock.disarm();
        clock.disarm();
        assert!(!clock.is_armed());
    }
}
