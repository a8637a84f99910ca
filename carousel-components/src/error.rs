//! Errors reported by carousel configuration.

use std::time::Duration;

use thiserror::Error;

/// Broad classification of a [`CarouselError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value the carousel cannot accept. Nothing was
    /// changed.
    InvalidArgument,
    /// Internal bookkeeping disagreed with itself, usually because an
    /// asynchronous notification raced with teardown. Never surfaced to
    /// callers.
    InconsistentState,
}

/// Errors raised by carousel operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CarouselError {
    /// Autoplay intervals must be positive.
    #[error("autoplay interval must be positive, got {0:?}")]
    NonPositiveInterval(Duration),
    /// A page transition may not last as long as the autoplay interval.
    #[error("transition duration {duration:?} must be shorter than the autoplay interval {interval:?}")]
    TransitionTooLong {
        /// Requested minimum transition duration.
        duration: Duration,
        /// Autoplay interval in effect.
        interval: Duration,
    },
    /// Indicator dots cannot have a negative radius.
    #[error("indicator dot radius must be non-negative, got {0}")]
    NegativeDotRadius(f64),
    /// The observer is already subscribed to this page set.
    #[error("observer is already registered with this page set")]
    ObserverAlreadyRegistered,
    /// Internal state mismatch.
    #[error("inconsistent carousel state: {0}")]
    InconsistentState(&'static str),
}

impl CarouselError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CarouselError::InconsistentState(_) => ErrorKind::InconsistentState,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_invalid_arguments() {
        let error = CarouselError::TransitionTooLong {
            duration: Duration::from_millis(500),
            interval: Duration::from_millis(500),
        };
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            CarouselError::NonPositiveInterval(Duration::ZERO).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            CarouselError::InconsistentState("tick without pages").kind(),
            ErrorKind::InconsistentState
        );
    }

    #[test]
    fn messages_name_the_offending_values() {
        let error = CarouselError::TransitionTooLong {
            duration: Duration::from_millis(800),
            interval: Duration::from_millis(500),
        };
        let message = error.to_string();
        assert!(message.contains("800ms"));
        assert!(message.contains("500ms"));
    }
}
