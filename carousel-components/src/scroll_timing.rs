//! Settle duration and easing for page transitions.
//!
//! The host pager picks a settle duration from distance and fling velocity.
//! The policy stretches it to a configured minimum, so a page change always
//! takes at least that long, and applies one easing curve to the whole
//! transition whichever duration wins. The minimum must stay below the
//! autoplay interval: otherwise the next tick would land mid-transition.

use std::time::{Duration, Instant};

use crate::{
    animation::{Easing, quintic_ease_out},
    error::CarouselError,
};

/// Minimum transition duration used until configured otherwise.
pub const DEFAULT_MIN_TRANSITION: Duration = Duration::from_millis(250);

/// Settle timing handed to hosts that accept custom timing.
#[derive(Clone, Copy, Debug)]
pub struct ScrollTiming {
    min_duration: Duration,
    easing: Easing,
}

impl ScrollTiming {
    /// Creates a timing with the given minimum duration and curve.
    pub const fn new(min_duration: Duration, easing: Easing) -> Self {
        Self {
            min_duration,
            easing,
        }
    }

    /// Lower bound for every transition.
    pub fn min_duration(&self) -> Duration {
        self.min_duration
    }

    /// Curve applied to every transition.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Duration of a transition the host would have run for
    /// `host_duration`.
    pub fn settle_duration(&self, host_duration: Duration) -> Duration {
        host_duration.max(self.min_duration)
    }

    /// Eases linear progress.
    pub fn ease(&self, progress: f32) -> f32 {
        (self.easing)(progress)
    }

    /// Plans a transition from `from` to `to` (in pixels) that the host
    /// would have run for `host_duration`.
    pub fn plan(&self, from: f32, to: f32, host_duration: Duration) -> SettleAnimation {
        SettleAnimation {
            from,
            to,
            duration: self.settle_duration(host_duration),
            started_at: None,
            easing: self.easing,
        }
    }
}

impl Default for ScrollTiming {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TRANSITION, quintic_ease_out)
    }
}

/// Owns the carousel's [`ScrollTiming`] and guards its invariant against
/// the autoplay interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollTimingPolicy {
    timing: ScrollTiming,
}

impl ScrollTimingPolicy {
    /// Wraps an initial timing.
    pub fn new(timing: ScrollTiming) -> Self {
        Self { timing }
    }

    /// Current timing.
    pub fn timing(&self) -> ScrollTiming {
        self.timing
    }

    /// Changes the minimum transition duration.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::TransitionTooLong`] when `duration` is not
    /// shorter than `interval`. The timing is left unchanged.
    pub fn set_min_duration(
        &mut self,
        duration: Duration,
        interval: Option<Duration>,
    ) -> Result<(), CarouselError> {
        if let Some(interval) = interval {
            ensure_shorter(duration, interval)?;
        }
        self.timing.min_duration = duration;
        Ok(())
    }

    /// Changes the easing curve.
    pub fn set_easing(&mut self, easing: Easing) {
        self.timing.easing = easing;
    }

    /// Checks that an autoplay interval leaves room for a full transition.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::TransitionTooLong`] when the current minimum
    /// duration is not shorter than `interval`.
    pub fn check_interval(&self, interval: Duration) -> Result<(), CarouselError> {
        ensure_shorter(self.timing.min_duration, interval)
    }
}

fn ensure_shorter(duration: Duration, interval: Duration) -> Result<(), CarouselError> {
    if duration >= interval {
        return Err(CarouselError::TransitionTooLong { duration, interval });
    }
    Ok(())
}

/// A running settle transition along the scroll axis.
///
/// The clock starts on the first [`sample`](Self::sample).
#[derive(Clone, Copy, Debug)]
pub struct SettleAnimation {
    from: f32,
    to: f32,
    duration: Duration,
    started_at: Option<Instant>,
    easing: Easing,
}

impl SettleAnimation {
    /// Final value.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Total length of the transition.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the value at `now` and whether the transition is over.
    pub fn sample(&mut self, now: Instant) -> (f32, bool) {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = (self.easing)(progress);
        (self.from + (self.to - self.from) * eased, false)
    }
}
