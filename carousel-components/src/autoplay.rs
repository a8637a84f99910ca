//! Timer that advances the carousel by one page per interval.
//!
//! Ticks are one-shot and re-armed from the moment they fire, not on a fixed
//! rate: a frame that arrives late produces one advance, never a burst of
//! catch-up advances.
//!
//! The scheduler does not read the clock itself. The host polls it once per
//! frame, in the manner of other frame-driven controllers; a freshly started
//! scheduler fixes its first deadline on the first poll after the start.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::CarouselError;

/// Whether the scheduler currently has a pending tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayState {
    /// No tick is pending.
    Stopped,
    /// A tick is pending.
    Running,
}

/// One-shot, self re-arming autoplay timer.
#[derive(Clone, Debug, Default)]
pub struct AutoplayScheduler {
    interval: Option<Duration>,
    running: bool,
    next_tick: Option<Instant>,
}

impl AutoplayScheduler {
    /// Creates a stopped scheduler with no interval configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> AutoplayState {
        if self.running {
            AutoplayState::Running
        } else {
            AutoplayState::Stopped
        }
    }

    /// Returns `true` while a tick is pending.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The last interval passed to [`start`](Self::start).
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// When the pending tick fires. `None` when stopped, or when armed but
    /// not yet polled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Cancels any pending tick, records `interval` and arms a new tick.
    ///
    /// The interval is kept even when nothing is armed, so a later
    /// [`resume`](Self::resume) can pick it up once there is something to
    /// animate. Returns whether a tick was armed.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NonPositiveInterval`] for a zero interval,
    /// leaving the scheduler untouched.
    pub fn start(&mut self, interval: Duration, page_count: usize) -> Result<bool, CarouselError> {
        self.configure(interval)?;
        Ok(self.resume(page_count))
    }

    /// Cancels any pending tick and records `interval` without arming.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NonPositiveInterval`] for a zero interval,
    /// leaving the scheduler untouched.
    pub fn configure(&mut self, interval: Duration) -> Result<(), CarouselError> {
        if interval.is_zero() {
            return Err(CarouselError::NonPositiveInterval(interval));
        }
        self.cancel();
        self.interval = Some(interval);
        Ok(())
    }

    /// Re-arms with the configured interval. Does nothing (after cancelling
    /// any pending tick) when no interval is configured or when there are
    /// fewer than two pages to cycle through.
    pub fn resume(&mut self, page_count: usize) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };
        self.cancel();
        if page_count <= 1 {
            debug!(page_count, "autoplay not armed, nothing to cycle");
            return false;
        }
        self.running = true;
        debug!(?interval, "autoplay armed");
        true
    }

    /// Cancels the pending tick. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            debug!("autoplay stopped");
        }
        self.cancel();
    }

    /// Returns `true` when a tick fires at `now`. The next tick is armed
    /// one interval after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let Some(interval) = self.interval else {
            return false;
        };
        match self.next_tick {
            None => {
                self.next_tick = Some(now + interval);
                false
            }
            Some(deadline) if now >= deadline => {
                self.next_tick = Some(now + interval);
                trace!("autoplay tick");
                true
            }
            Some(_) => false,
        }
    }

    fn cancel(&mut self) {
        self.running = false;
        self.next_tick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(2_000);
    const FRAME: Duration = Duration::from_millis(10);

    fn count_ticks(scheduler: &mut AutoplayScheduler, start: Instant, span: Duration) -> usize {
        let mut ticks = 0;
        let mut elapsed = Duration::ZERO;
        while elapsed <= span {
            if scheduler.poll(start + elapsed) {
                ticks += 1;
            }
            elapsed += FRAME;
        }
        ticks
    }

    #[test]
    fn ticks_at_each_full_interval_after_arming() {
        let start = Instant::now();

        let mut scheduler = AutoplayScheduler::new();
        scheduler.start(INTERVAL, 3).expect("valid interval");
        assert_eq!(count_ticks(&mut scheduler, start, INTERVAL * 3), 3);

        let mut scheduler = AutoplayScheduler::new();
        scheduler.start(INTERVAL, 3).expect("valid interval");
        assert_eq!(count_ticks(&mut scheduler, start, INTERVAL * 3 - FRAME), 2);
    }

    #[test]
    fn late_poll_fires_once_and_rearms_from_now() {
        let start = Instant::now();
        let mut scheduler = AutoplayScheduler::new();
        scheduler.start(INTERVAL, 3).expect("valid interval");

        assert!(!scheduler.poll(start));
        let late = start + INTERVAL * 5 / 2;
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late));
        assert_eq!(scheduler.next_deadline(), Some(late + INTERVAL));
    }

    #[test]
    fn start_restarts_the_countdown() {
        let start = Instant::now();
        let mut scheduler = AutoplayScheduler::new();
        scheduler.start(INTERVAL, 3).expect("valid interval");
        scheduler.poll(start);

        let restart = start + INTERVAL / 2;
        scheduler.start(INTERVAL, 3).expect("valid interval");
        assert!(!scheduler.poll(restart));
        assert!(!scheduler.poll(start + INTERVAL));
        assert!(scheduler.poll(restart + INTERVAL));
    }

    #[test]
    fn stop_cancels_and_is_idempotent() {
        let start = Instant::now();
        let mut scheduler = AutoplayScheduler::new();
        scheduler.start(INTERVAL, 2).expect("valid interval");
        scheduler.poll(start);

        scheduler.stop();
        scheduler.stop();
        assert_eq!(scheduler.state(), AutoplayState::Stopped);
        assert!(!scheduler.poll(start + INTERVAL * 4));
        assert_eq!(scheduler.interval(), Some(INTERVAL));
    }

    #[test]
    fn zero_interval_is_rejected_without_side_effects() {
        let mut scheduler = AutoplayScheduler::new();
        scheduler.start(INTERVAL, 3).expect("valid interval");

        assert_eq!(
            scheduler.start(Duration::ZERO, 3),
            Err(CarouselError::NonPositiveInterval(Duration::ZERO))
        );
        assert!(scheduler.is_running());
        assert_eq!(scheduler.interval(), Some(INTERVAL));
    }

    #[test]
    fn single_page_is_never_armed() {
        let mut scheduler = AutoplayScheduler::new();
        assert_eq!(scheduler.start(INTERVAL, 1), Ok(false));
        assert_eq!(scheduler.start(INTERVAL, 0), Ok(false));
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.interval(), Some(INTERVAL));

        assert!(scheduler.resume(2));
        assert!(scheduler.is_running());
    }

    #[test]
    fn configure_records_the_interval_without_arming() {
        let start = Instant::now();
        let mut scheduler = AutoplayScheduler::new();
        scheduler.start(INTERVAL, 3).expect("valid interval");
        scheduler.poll(start);

        scheduler
            .configure(INTERVAL * 2)
            .expect("valid interval");
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.interval(), Some(INTERVAL * 2));
        assert!(!scheduler.poll(start + INTERVAL * 3));

        assert!(scheduler.resume(3));
        assert!(!scheduler.poll(start + INTERVAL * 3));
        assert!(scheduler.poll(start + INTERVAL * 5));
    }

    #[test]
    fn resume_without_interval_does_nothing() {
        let mut scheduler = AutoplayScheduler::new();
        assert!(!scheduler.resume(5));
        assert!(!scheduler.poll(Instant::now()));
    }
}
