//! Reference host pager for looping carousels.
//!
//! [`LoopPagerController`] is a frame-driven horizontal pager over an
//! unbounded virtual page space. It tracks the current virtual page and a
//! pixel offset from it, follows drags, snaps on release and settles with a
//! [`ScrollTiming`]. Hosts embedding the carousel in their own pager can use
//! it as a model for implementing [`HostPager`].
//!
//! ## Usage
//!
//! Feed pointer input through [`start_drag`](LoopPagerController::start_drag),
//! [`drag_to`](LoopPagerController::drag_to) and
//! [`end_drag`](LoopPagerController::end_drag); translate the page at
//! [`current_position`](HostPager::current_position) by
//! [`scroll_offset`](LoopPagerController::scroll_offset) when laying out.

use std::{
    mem,
    time::{Duration, Instant},
};

use carousel_ui::Px;

use crate::{
    animation::quintic_ease_out,
    host::{HostPager, PagerEvent},
    index_wrapper::DrivePosition,
    interaction::ScrollState,
    scroll_timing::{ScrollTiming, SettleAnimation},
};

const DEFAULT_SNAP_THRESHOLD: f32 = 0.5;
/// Pixels per second above which a release counts as a fling.
const MIN_FLING_VELOCITY: f32 = 400.0;
const MAX_SETTLE_DURATION: Duration = Duration::from_millis(600);
const SETTLE_MS_PER_PAGE: f32 = 100.0;

/// Timing used when no custom timing is installed.
const NATIVE_TIMING: ScrollTiming = ScrollTiming::new(Duration::ZERO, quintic_ease_out);

#[derive(Clone, Copy, Debug)]
struct DragState {
    last_x: Px,
    last_time: Instant,
    velocity: f32,
}

/// Frame-driven horizontal pager over virtual pages.
#[derive(Clone, Debug)]
pub struct LoopPagerController {
    current: DrivePosition,
    /// Displacement from `current` in pixels; positive toward later pages.
    offset: f32,
    page_extent: Px,
    virtual_count: usize,
    snap_threshold: f32,
    scroll_state: ScrollState,
    drag: Option<DragState>,
    settle: Option<SettleAnimation>,
    timing: Option<ScrollTiming>,
    accepts_custom_timing: bool,
    events: Vec<PagerEvent>,
    redraw_requested: bool,
}

impl LoopPagerController {
    /// Creates a pager whose pages are `page_extent` wide.
    pub fn new(page_extent: Px) -> Self {
        Self {
            current: DrivePosition::ZERO,
            offset: 0.0,
            page_extent: page_extent.non_negative(),
            virtual_count: 0,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            scroll_state: ScrollState::Idle,
            drag: None,
            settle: None,
            timing: None,
            accepts_custom_timing: true,
            events: Vec::new(),
            redraw_requested: false,
        }
    }

    /// Fraction of a page that must be crossed for a slow release to move on.
    pub fn with_snap_threshold(mut self, threshold: f32) -> Self {
        self.snap_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Makes the pager refuse custom transition timing, like a host control
    /// without that extension point.
    pub fn without_custom_timing(mut self) -> Self {
        self.accepts_custom_timing = false;
        self
    }

    /// Width of one page.
    pub fn page_extent(&self) -> Px {
        self.page_extent
    }

    /// Updates the page width after a layout pass, keeping the relative
    /// scroll progress.
    pub fn set_page_extent(&mut self, extent: Px) {
        let extent = extent.non_negative();
        if extent == self.page_extent {
            return;
        }
        let fraction = self.offset_fraction();
        self.page_extent = extent;
        self.offset = fraction * extent.to_f32();
        self.settle = None;
        self.redraw_requested = true;
    }

    /// Displacement of the current page, in pixels.
    pub fn scroll_offset(&self) -> f32 {
        self.offset
    }

    /// Displacement of the current page, in pages.
    pub fn offset_fraction(&self) -> f32 {
        let extent = self.page_extent.to_f32();
        if extent <= f32::EPSILON {
            0.0
        } else {
            self.offset / extent
        }
    }

    /// Last scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Returns `true` while following a pointer.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        mem::take(&mut self.redraw_requested)
    }

    /// A pointer went down at horizontal position `x`. Grabbing a settling
    /// page stops it where it is.
    pub fn start_drag(&mut self, x: Px, now: Instant) {
        if self.virtual_count == 0 {
            return;
        }
        self.settle = None;
        self.drag = Some(DragState {
            last_x: x,
            last_time: now,
            velocity: 0.0,
        });
        self.set_scroll_state(ScrollState::Dragging);
    }

    /// The pointer moved to `x`.
    pub fn drag_to(&mut self, x: Px, now: Instant) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let dx = (x - drag.last_x).to_f32();
        let dt = now.saturating_duration_since(drag.last_time).as_secs_f32();
        if dt > f32::EPSILON {
            drag.velocity = dx / dt;
        }
        drag.last_x = x;
        drag.last_time = now;

        // Finger moving left reveals later pages.
        self.offset = self.clamp_offset(self.offset - dx);
        self.redraw_requested = true;
    }

    /// The pointer was released. Snaps to the nearest page, or to the next
    /// one in the fling direction.
    pub fn end_drag(&mut self, now: Instant) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let velocity = if now.saturating_duration_since(drag.last_time) > MAX_SETTLE_DURATION {
            0.0
        } else {
            drag.velocity
        };

        let pages = self.offset_fraction();
        let steps = if velocity.abs() >= MIN_FLING_VELOCITY && pages.abs() > f32::EPSILON {
            if velocity < 0.0 { pages.ceil() } else { pages.floor() }
        } else {
            let base = pages.floor();
            if pages - base >= self.snap_threshold {
                base + 1.0
            } else {
                base
            }
        };
        let target = self.clamp_position(self.current.offset(steps as i64));
        self.settle_to(target, velocity);
    }

    /// Advances the settle animation.
    pub fn advance(&mut self, now: Instant) {
        let Some(settle) = self.settle.as_mut() else {
            return;
        };
        let (offset, finished) = settle.sample(now);
        self.offset = offset;
        self.redraw_requested = true;
        if finished {
            self.offset = 0.0;
            self.settle = None;
            self.set_scroll_state(ScrollState::Idle);
        }
    }

    fn settle_to(&mut self, target: DrivePosition, velocity: f32) {
        let steps_back = (self.current.get() - target.get()) as f32;
        self.offset += steps_back * self.page_extent.to_f32();
        if target != self.current {
            self.current = target;
            self.events.push(PagerEvent::PageSelected(target));
        }

        if self.offset.abs() < 0.5 || self.page_extent <= Px::ZERO {
            self.offset = 0.0;
            self.settle = None;
            self.set_scroll_state(ScrollState::Idle);
            return;
        }

        let host_duration = self.host_settle_duration(self.offset, velocity);
        let timing = self.timing.unwrap_or(NATIVE_TIMING);
        self.settle = Some(timing.plan(self.offset, 0.0, host_duration));
        self.set_scroll_state(ScrollState::Settling);
    }

    /// Duration the pager would pick on its own for a `distance` pixel
    /// settle released at `velocity` pixels per second.
    fn host_settle_duration(&self, distance: f32, velocity: f32) -> Duration {
        let extent = self.page_extent.to_f32();
        if extent <= f32::EPSILON {
            return Duration::ZERO;
        }
        let millis = if velocity.abs() > f32::EPSILON {
            4.0 * (1000.0 * (distance / velocity).abs()).round()
        } else {
            (distance.abs() / extent + 1.0) * SETTLE_MS_PER_PAGE
        };
        Duration::from_millis(millis as u64).min(MAX_SETTLE_DURATION)
    }

    fn last_position(&self) -> i64 {
        i64::try_from(self.virtual_count)
            .unwrap_or(i64::MAX)
            .saturating_sub(1)
            .max(0)
    }

    fn clamp_position(&self, position: DrivePosition) -> DrivePosition {
        DrivePosition(position.get().clamp(0, self.last_position()))
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        let extent = self.page_extent.to_f32();
        let before = self.current.get() as f32 * extent;
        let after = (self.last_position() - self.current.get()) as f32 * extent;
        offset.clamp(-before, after.max(0.0))
    }

    fn set_scroll_state(&mut self, state: ScrollState) {
        if self.scroll_state != state {
            self.scroll_state = state;
            self.events.push(PagerEvent::ScrollStateChanged(state));
        }
    }
}

impl HostPager for LoopPagerController {
    fn current_position(&self) -> DrivePosition {
        self.current
    }

    fn set_current_position(&mut self, position: DrivePosition, animate: bool) {
        let target = self.clamp_position(position);
        self.drag = None;
        self.redraw_requested = true;
        if animate && self.page_extent > Px::ZERO {
            self.settle_to(target, 0.0);
            return;
        }
        self.settle = None;
        self.offset = 0.0;
        if target != self.current {
            self.current = target;
            self.events.push(PagerEvent::PageSelected(target));
        }
        self.set_scroll_state(ScrollState::Idle);
    }

    fn page_count_changed(&mut self, virtual_count: usize) {
        self.virtual_count = virtual_count;
        self.current = self.clamp_position(self.current);
        self.drag = None;
        self.settle = None;
        self.offset = 0.0;
        self.set_scroll_state(ScrollState::Idle);
        self.redraw_requested = true;
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    fn supports_custom_transition_timing(&self) -> bool {
        self.accepts_custom_timing
    }

    fn set_transition_timing(&mut self, timing: ScrollTiming) {
        if self.accepts_custom_timing {
            self.timing = Some(timing);
        }
    }

    fn advance(&mut self, now: Instant) {
        LoopPagerController::advance(self, now);
    }

    fn take_events(&mut self) -> Vec<PagerEvent> {
        mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_wrapper::LOOP_VIRTUAL_COUNT;

    const EXTENT: Px = Px(360);
    const START: DrivePosition = DrivePosition(1_000);

    fn pager() -> LoopPagerController {
        let mut pager = LoopPagerController::new(EXTENT);
        pager.page_count_changed(LOOP_VIRTUAL_COUNT);
        pager.set_current_position(START, false);
        pager.take_events();
        pager
    }

    fn run_until_idle(pager: &mut LoopPagerController, start: Instant) -> Duration {
        let mut elapsed = Duration::ZERO;
        while pager.scroll_state() != ScrollState::Idle {
            pager.advance(start + elapsed);
            if pager.scroll_state() == ScrollState::Idle {
                break;
            }
            elapsed += Duration::from_millis(10);
            assert!(elapsed < Duration::from_secs(5), "settle never finished");
        }
        elapsed
    }

    #[test]
    fn drag_past_threshold_moves_to_next_page() {
        let mut pager = pager();
        let start = Instant::now();

        pager.start_drag(Px(300), start);
        pager.drag_to(Px(100), start + Duration::from_secs(1));
        pager.end_drag(start + Duration::from_secs(1));

        assert_eq!(pager.current_position(), START.next());
        assert_eq!(
            pager.take_events(),
            vec![
                PagerEvent::ScrollStateChanged(ScrollState::Dragging),
                PagerEvent::PageSelected(START.next()),
                PagerEvent::ScrollStateChanged(ScrollState::Settling),
            ]
        );

        run_until_idle(&mut pager, start);
        assert_eq!(pager.scroll_offset(), 0.0);
        assert_eq!(
            pager.take_events(),
            vec![PagerEvent::ScrollStateChanged(ScrollState::Idle)]
        );
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        let mut pager = pager();
        let start = Instant::now();

        pager.start_drag(Px(200), start);
        pager.drag_to(Px(250), start + Duration::from_secs(1));
        pager.end_drag(start + Duration::from_secs(1));

        assert_eq!(pager.current_position(), START);
        assert_eq!(pager.scroll_state(), ScrollState::Settling);
        run_until_idle(&mut pager, start);
        assert_eq!(pager.current_position(), START);
    }

    #[test]
    fn fling_moves_in_fling_direction() {
        let mut pager = pager();
        let start = Instant::now();

        pager.start_drag(Px(200), start);
        pager.drag_to(Px(240), start + Duration::from_millis(20));
        pager.end_drag(start + Duration::from_millis(20));

        assert_eq!(pager.current_position(), START.offset(-1));
    }

    #[test]
    fn installed_timing_stretches_programmatic_settles() {
        let mut pager = pager();
        pager.set_transition_timing(ScrollTiming::new(
            Duration::from_millis(800),
            quintic_ease_out,
        ));
        let start = Instant::now();

        pager.set_current_position(START.next(), true);
        let elapsed = run_until_idle(&mut pager, start);
        assert_eq!(elapsed, Duration::from_millis(800));
    }

    #[test]
    fn native_timing_is_used_without_the_capability() {
        let mut pager = LoopPagerController::new(EXTENT).without_custom_timing();
        pager.page_count_changed(LOOP_VIRTUAL_COUNT);
        pager.set_current_position(START, false);
        assert!(!pager.supports_custom_transition_timing());
        pager.set_transition_timing(ScrollTiming::new(
            Duration::from_millis(800),
            quintic_ease_out,
        ));
        let start = Instant::now();

        pager.set_current_position(START.next(), true);
        let elapsed = run_until_idle(&mut pager, start);
        assert_eq!(elapsed, Duration::from_millis(200));
    }

    #[test]
    fn single_page_cannot_be_dragged_away() {
        let mut pager = LoopPagerController::new(EXTENT);
        pager.page_count_changed(1);
        let start = Instant::now();

        pager.start_drag(Px(300), start);
        pager.drag_to(Px(0), start + Duration::from_millis(100));
        assert_eq!(pager.scroll_offset(), 0.0);
        pager.end_drag(start + Duration::from_millis(100));
        assert_eq!(pager.current_position(), DrivePosition::ZERO);
        assert_eq!(pager.scroll_state(), ScrollState::Idle);
    }

    #[test]
    fn grabbing_a_settling_page_returns_to_dragging() {
        let mut pager = pager();
        let start = Instant::now();
        pager.set_current_position(START.next(), true);
        pager.advance(start);
        pager.advance(start + Duration::from_millis(50));
        pager.take_events();

        pager.start_drag(Px(100), start + Duration::from_millis(60));
        assert_eq!(
            pager.take_events(),
            vec![PagerEvent::ScrollStateChanged(ScrollState::Dragging)]
        );
        assert!(pager.scroll_offset() < 0.0);
    }

    #[test]
    fn extent_change_keeps_relative_progress() {
        let mut pager = pager();
        let start = Instant::now();
        pager.start_drag(Px(300), start);
        pager.drag_to(Px(120), start + Duration::from_millis(100));
        assert!((pager.offset_fraction() - 0.5).abs() < 1e-4);

        pager.set_page_extent(Px(720));
        assert!((pager.scroll_offset() - 360.0).abs() < 1e-2);
    }
}
