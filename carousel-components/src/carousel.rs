//! Self-looping, auto-advancing paged carousel.
//!
//! ## Usage
//!
//! Build an [`AutoPlayCarousel`] around a [`HostPager`], hand it a page set
//! and call [`pump`](AutoPlayCarousel::pump) once per frame. The host's
//! paint pass calls [`draw`](AutoPlayCarousel::draw) after painting the
//! pages to overlay the dot indicator.
//!
//! ```
//! use std::{
//!     sync::Arc,
//!     time::{Duration, Instant},
//! };
//!
//! use carousel_components::{
//!     carousel::{AutoPlayCarousel, CarouselArgs},
//!     page_set::VecPageSet,
//!     pager::LoopPagerController,
//! };
//! use carousel_ui::Px;
//!
//! let pager = LoopPagerController::new(Px(360));
//! let args = CarouselArgs::default().transition_duration(Duration::from_millis(800));
//! let mut carousel = AutoPlayCarousel::new(pager, args).unwrap();
//!
//! let pages = Arc::new(VecPageSet::new(vec!["Page-1", "Page-2", "Page-3"]));
//! carousel.set_page_set(Some(pages));
//! carousel.start_autoplay(Duration::from_secs(2)).unwrap();
//!
//! let start = Instant::now();
//! carousel.pump(start);
//! carousel.pump(start + Duration::from_secs(2));
//! assert_eq!(carousel.selected_index(), Some(1));
//! ```

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use carousel_ui::Canvas;
use derive_setters::Setters;
use tracing::{debug, warn};

use crate::{
    animation::{Easing, quintic_ease_out},
    autoplay::AutoplayScheduler,
    error::CarouselError,
    host::{HostPager, PagerEvent},
    index_wrapper::{DrivePosition, LoopStrategy},
    indicator::{CarouselIndicator, IndicatorStyle},
    interaction::{GateAction, InteractionGate, ScrollState},
    looping_provider::LoopingPageProvider,
    page_set::{PageSet, PageSetObserver},
    scroll_timing::{DEFAULT_MIN_TRANSITION, ScrollTiming, ScrollTimingPolicy},
};


/// Initial configuration of an [`AutoPlayCarousel`].
#[derive(Clone, Copy, Debug, Setters)]
pub struct CarouselArgs {
    /// Autoplay interval. `None` leaves autoplay off.
    #[setters(strip_option)]
    pub autoplay_interval: Option<Duration>,
    /// Minimum duration of a page transition.
    pub transition_duration: Duration,
    /// Indicator appearance.
    pub indicator: IndicatorStyle,
    /// Curve applied to page transitions.
    pub easing: Easing,
}

impl Default for CarouselArgs {
    fn default() -> Self {
        Self {
            autoplay_interval: None,
            transition_duration: DEFAULT_MIN_TRANSITION,
            indicator: IndicatorStyle::default(),
            easing: quintic_ease_out,
        }
    }
}

/// Page set change notifications land here, possibly from another thread,
/// and are handled on the next [`AutoPlayCarousel::pump`].
#[derive(Debug, Default)]
struct PendingResync(AtomicBool);

impl PendingResync {
    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl PageSetObserver for PendingResync {
    fn on_changed(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// A paged carousel that loops endlessly over its pages, advances on a
/// timer, pauses while the user drags and draws a dot indicator.
pub struct AutoPlayCarousel<P: PageSet, H: HostPager> {
    host: H,
    provider: LoopingPageProvider<P>,
    scheduler: AutoplayScheduler,
    gate: InteractionGate,
    timing: ScrollTimingPolicy,
    indicator: IndicatorStyle,
    position: DrivePosition,
    pending: Arc<PendingResync>,
    observer: Arc<dyn PageSetObserver>,
    attached: bool,
}

impl<P: PageSet, H: HostPager> AutoPlayCarousel<P, H> {
    /// Creates an attached carousel with no pages.
    ///
    /// # Errors
    ///
    /// Fails with [`CarouselError::NonPositiveInterval`] for a zero
    /// autoplay interval, [`CarouselError::TransitionTooLong`] when the
    /// transition duration is not shorter than the interval, and
    /// [`CarouselError::NegativeDotRadius`] for an invalid indicator style.
    pub fn new(host: H, args: CarouselArgs) -> Result<Self, CarouselError> {
        if let Some(interval) = args.autoplay_interval.filter(|interval| interval.is_zero()) {
            return Err(CarouselError::NonPositiveInterval(interval));
        }
        args.indicator.validate()?;
        let mut timing = ScrollTimingPolicy::new(ScrollTiming::new(DEFAULT_MIN_TRANSITION, args.easing));
        timing.set_min_duration(args.transition_duration, args.autoplay_interval)?;

        let pending = Arc::new(PendingResync::default());
        let observer: Arc<dyn PageSetObserver> = pending.clone();
        let mut carousel = Self {
            host,
            provider: LoopingPageProvider::new(),
            scheduler: AutoplayScheduler::new(),
            gate: InteractionGate::new(),
            timing,
            indicator: args.indicator,
            position: DrivePosition::ZERO,
            pending,
            observer,
            attached: true,
        };
        carousel.install_timing();
        carousel.host.page_count_changed(0);
        if let Some(interval) = args.autoplay_interval {
            carousel.start_autoplay(interval)?;
        }
        Ok(carousel)
    }

    /// Installs or replaces the page set. `None` clears it and the host
    /// shows nothing.
    ///
    /// The carousel jumps back to the first page and autoplay restarts its
    /// interval if it is wanted.
    pub fn set_page_set(&mut self, pages: Option<Arc<P>>) {
        self.provider.set_source(pages);
        self.pending.take();
        if self.attached {
            self.subscribe();
        }
        self.resync();
    }

    /// The installed page set.
    pub fn page_set(&self) -> Option<&Arc<P>> {
        self.provider.source()
    }

    /// Starts, or restarts, advancing one page per `interval`.
    ///
    /// With fewer than two pages, while detached or while the user is
    /// dragging, nothing is armed. The interval is remembered and autoplay
    /// kicks in once there are pages to cycle, on attach, or when the drag
    /// is released.
    ///
    /// # Errors
    ///
    /// Fails with [`CarouselError::NonPositiveInterval`] for a zero
    /// interval and [`CarouselError::TransitionTooLong`] when the configured
    /// transition duration does not fit in `interval`. Nothing changes on
    /// failure.
    pub fn start_autoplay(&mut self, interval: Duration) -> Result<(), CarouselError> {
        if interval.is_zero() {
            return Err(CarouselError::NonPositiveInterval(interval));
        }
        self.timing.check_interval(interval)?;
        self.scheduler.configure(interval)?;
        self.gate.set_autoplay_desired(true);
        self.arm_autoplay();
        Ok(())
    }

    /// Stops autoplay. It stays off across drags and page set changes until
    /// [`start_autoplay`](Self::start_autoplay) is called again.
    pub fn stop_autoplay(&mut self) {
        self.gate.set_autoplay_desired(false);
        self.scheduler.stop();
    }

    /// Sets the minimum duration of a page transition.
    ///
    /// Hosts that do not accept custom timing keep their own and a warning
    /// is logged.
    ///
    /// # Errors
    ///
    /// Fails with [`CarouselError::TransitionTooLong`] when `duration` is not
    /// shorter than the autoplay interval. The previous timing stays in
    /// effect.
    pub fn set_transition_timing(&mut self, duration: Duration) -> Result<(), CarouselError> {
        self.timing
            .set_min_duration(duration, self.scheduler.interval())?;
        self.install_timing();
        Ok(())
    }

    /// Replaces the transition easing curve.
    pub fn set_easing(&mut self, easing: Easing) {
        self.timing.set_easing(easing);
        self.install_timing();
    }

    /// Restyles the indicator and requests a redraw.
    ///
    /// # Errors
    ///
    /// Fails with [`CarouselError::NegativeDotRadius`] for a negative
    /// radius, keeping the previous style.
    pub fn set_indicator_style(&mut self, style: IndicatorStyle) -> Result<(), CarouselError> {
        style.validate()?;
        self.indicator = style;
        self.host.request_redraw();
        Ok(())
    }

    /// The carousel was attached to a display surface. Listens to the page
    /// set again and resumes autoplay if it is wanted.
    pub fn on_attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        self.subscribe();

        let before = self.provider.strategy();
        if self.provider.refresh() != before {
            debug!("page set changed while detached");
            self.resync();
        } else if self.gate.is_autoplay_desired() {
            self.arm_autoplay();
        }
    }

    /// The carousel was detached from its display surface. Cancels the
    /// pending tick and stops listening to the page set; late notifications
    /// are ignored.
    pub fn on_detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.scheduler.stop();
        self.provider.unsubscribe();
        self.pending.take();
        self.gate.reset_gesture();
        debug!("carousel detached");
    }

    /// Returns `true` between [`on_attach`](Self::on_attach) and
    /// [`on_detach`](Self::on_detach).
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The page set changed. Recounts the pages, tells the host and jumps
    /// back to the first page.
    ///
    /// Autoplay restarts its interval if it is wanted. After an explicit
    /// [`stop_autoplay`](Self::stop_autoplay) it stays off, even though an
    /// interval is still configured.
    pub fn on_page_set_changed(&mut self) {
        if !self.attached || self.provider.source().is_none() {
            debug!("page set notification ignored, carousel is not showing a page set");
            return;
        }
        self.resync();
    }

    /// The host's scroll state changed.
    pub fn on_scroll_state_changed(&mut self, state: ScrollState) {
        match self.gate.on_scroll_state_changed(state) {
            GateAction::PauseAutoplay => self.scheduler.stop(),
            GateAction::ResumeAutoplay => self.arm_autoplay(),
            GateAction::None => {}
        }
    }

    /// The host settled on, or is heading for, a new virtual page.
    pub fn on_page_selected(&mut self, position: DrivePosition) {
        self.position = position;
        if self.gate.on_page_selected(position, self.provider.strategy()) {
            self.host.request_redraw();
        }
    }

    /// Runs one frame: host events first, then page set changes, then the
    /// autoplay deadline. A drag reported in this frame therefore cancels a
    /// tick that is due in the same frame.
    pub fn pump(&mut self, now: Instant) {
        if !self.attached {
            return;
        }
        self.host.advance(now);
        self.dispatch_host_events();

        if self.pending.take() {
            self.on_page_set_changed();
        }

        if self.scheduler.poll(now) {
            if let Err(error) = self.advance_page() {
                debug!(%error, "autoplay tick ignored");
            }
            self.dispatch_host_events();
        }
    }

    /// Paints the indicator. Call after the pages have been painted.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        CarouselIndicator::draw(
            canvas,
            self.provider.page_count(),
            self.gate.selected_index(),
            &self.indicator,
        );
    }

    /// Selected real page, `None` without pages.
    pub fn selected_index(&self) -> Option<usize> {
        self.gate.selected_index()
    }

    /// Current virtual position.
    pub fn drive_position(&self) -> DrivePosition {
        self.position
    }

    /// Number of real pages.
    pub fn page_count(&self) -> usize {
        self.provider.page_count()
    }

    /// Number of virtual pages presented to the host.
    pub fn virtual_count(&self) -> usize {
        self.provider.virtual_count()
    }

    /// How the page set is presented to the host.
    pub fn loop_strategy(&self) -> LoopStrategy {
        self.provider.strategy()
    }

    /// Content of the selected page.
    pub fn current_page(&self) -> Option<P::Page> {
        self.provider.page_at(self.position)
    }

    /// Content for a virtual position.
    pub fn page_at(&self, position: DrivePosition) -> Option<P::Page> {
        self.provider.page_at(position)
    }

    /// Title for a virtual position.
    pub fn page_title_at(&self, position: DrivePosition) -> Option<String> {
        self.provider.page_title_at(position)
    }

    /// Returns `true` while an autoplay tick is pending.
    pub fn is_autoplaying(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Returns `true` when autoplay was started and not explicitly stopped,
    /// even if it is currently paused.
    pub fn is_autoplay_desired(&self) -> bool {
        self.gate.is_autoplay_desired()
    }

    /// The last autoplay interval configured.
    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.scheduler.interval()
    }

    /// When the pending tick fires, once armed.
    pub fn next_autoplay_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Transition timing in effect.
    pub fn transition_timing(&self) -> ScrollTiming {
        self.timing.timing()
    }

    /// Indicator appearance.
    pub fn indicator_style(&self) -> &IndicatorStyle {
        &self.indicator
    }

    /// Last scroll state reported by the host.
    pub fn scroll_state(&self) -> ScrollState {
        self.gate.scroll_state()
    }

    /// The host pager.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host pager, for feeding it input.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn subscribe(&mut self) {
        if let Err(error) = self.provider.subscribe(&self.observer) {
            warn!(%error, "could not listen to page set changes");
        }
    }

    fn install_timing(&mut self) {
        if self.host.supports_custom_transition_timing() {
            self.host.set_transition_timing(self.timing.timing());
        } else {
            warn!("host pager does not accept custom transition timing, keeping its own");
        }
    }

    fn resync(&mut self) {
        self.scheduler.stop();
        let strategy = self.provider.refresh();
        let anchor = strategy.anchor();

        self.host.page_count_changed(strategy.virtual_count());
        self.host.set_current_position(anchor, false);
        self.dispatch_host_events();
        self.on_page_selected(anchor);
        self.host.request_redraw();
        debug!(
            page_count = strategy.page_count(),
            anchor = anchor.get(),
            "carousel resynced"
        );

        if self.gate.is_autoplay_desired() {
            self.arm_autoplay();
        }
    }

    /// Arms the next tick unless the carousel is detached or the user holds
    /// the pager. A held pager arms on release.
    fn arm_autoplay(&mut self) {
        if !self.attached {
            self.scheduler.stop();
            return;
        }
        if self.gate.defer_until_release() {
            self.scheduler.stop();
            debug!("autoplay deferred until the drag is released");
            return;
        }
        self.scheduler.resume(self.provider.page_count());
    }

    fn advance_page(&mut self) -> Result<(), CarouselError> {
        if self.provider.page_count() <= 1 {
            self.scheduler.stop();
            return Err(CarouselError::InconsistentState(
                "autoplay tick with fewer than two pages",
            ));
        }
        let target = self.host.current_position().next();
        self.host.set_current_position(target, true);
        Ok(())
    }

    fn dispatch_host_events(&mut self) {
        for event in self.host.take_events() {
            match event {
                PagerEvent::ScrollStateChanged(state) => self.on_scroll_state_changed(state),
                PagerEvent::PageSelected(position) => self.on_page_selected(position),
            }
        }
    }
}

impl<P: PageSet, H: HostPager + std::fmt::Debug> std::fmt::Debug for AutoPlayCarousel<P, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoPlayCarousel")
            .field("host", &self.host)
            .field("strategy", &self.provider.strategy())
            .field("scheduler", &self.scheduler)
            .field("gate", &self.gate)
            .field("position", &self.position)
            .field("attached", &self.attached)
            .finish()
    }
}
