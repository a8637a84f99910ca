//! The scrollable pager the carousel drives.
//!
//! The carousel never reaches into the pager's internals. It talks to it
//! through [`HostPager`], and only asks for custom transition timing when
//! the host advertises that capability.

use std::time::Instant;

use crate::{index_wrapper::DrivePosition, interaction::ScrollState, scroll_timing::ScrollTiming};

/// Something the host pager reports back to the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerEvent {
    /// The scroll state changed.
    ScrollStateChanged(ScrollState),
    /// A new virtual page became the current one, by gesture or by request.
    PageSelected(DrivePosition),
}

/// A scrollable, paging host control.
pub trait HostPager {
    /// Virtual position currently shown (or being settled to).
    fn current_position(&self) -> DrivePosition;

    /// Moves to `position`, animating when `animate` is set.
    fn set_current_position(&mut self, position: DrivePosition, animate: bool);

    /// The number of virtual pages changed. Any layout cached for the old
    /// count must be dropped.
    fn page_count_changed(&mut self, virtual_count: usize);

    /// Schedules a repaint.
    fn request_redraw(&mut self);

    /// Whether [`set_transition_timing`](Self::set_transition_timing) is
    /// honoured.
    fn supports_custom_transition_timing(&self) -> bool {
        false
    }

    /// Replaces the settle duration floor and easing of future transitions.
    fn set_transition_timing(&mut self, _timing: ScrollTiming) {}

    /// Advances running animations to `now`.
    fn advance(&mut self, _now: Instant) {}

    /// Drains the events produced since the last call.
    fn take_events(&mut self) -> Vec<PagerEvent> {
        Vec::new()
    }
}
