//! Self-looping, auto-advancing paged carousel.
//!
//! A finite page set is presented to a host pager as an endless strip of
//! virtual pages. The carousel advances one page per autoplay interval,
//! stands aside while the user drags, jumps back to the first page when the
//! page set changes and overlays a dot indicator.
//!
//! # Usage
//!
//! The host owns the frame loop. Each frame it feeds pointer input to its
//! pager, calls [`AutoPlayCarousel::pump`](carousel::AutoPlayCarousel::pump)
//! and, in the paint pass, [`AutoPlayCarousel::draw`](carousel::AutoPlayCarousel::draw).
//!
//! ```
//! use std::{
//!     sync::Arc,
//!     time::{Duration, Instant},
//! };
//!
//! use carousel_components::{
//!     carousel::{AutoPlayCarousel, CarouselArgs},
//!     indicator::IndicatorStyle,
//!     page_set::VecPageSet,
//!     pager::LoopPagerController,
//! };
//! use carousel_ui::{Dp, Px, PxSize, RecordingCanvas};
//!
//! let args = CarouselArgs::default()
//!     .transition_duration(Duration::from_millis(800))
//!     .indicator(IndicatorStyle::default().dot_radius(Dp(5.0)));
//! let mut carousel = AutoPlayCarousel::new(LoopPagerController::new(Px(360)), args).unwrap();
//!
//! let pages = Arc::new(VecPageSet::new(vec!["Page-1", "Page-2", "Page-3"]));
//! carousel.set_page_set(Some(pages.clone()));
//! carousel.start_autoplay(Duration::from_secs(2)).unwrap();
//!
//! let start = Instant::now();
//! carousel.pump(start);
//! carousel.pump(start + Duration::from_secs(2));
//! assert_eq!(carousel.current_page(), Some("Page-2"));
//!
//! pages.push("Page-4");
//! carousel.pump(start + Duration::from_millis(2100));
//! assert_eq!(carousel.selected_index(), Some(0));
//!
//! let mut canvas = RecordingCanvas::new(PxSize::new(Px(360), Px(200)));
//! carousel.draw(&mut canvas);
//! assert_eq!(canvas.commands().len(), 5);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod autoplay;
pub mod carousel;
pub mod error;
pub mod host;
pub mod index_wrapper;
pub mod indicator;
pub mod interaction;
pub mod looping_provider;
pub mod page_set;
pub mod pager;
pub mod scroll_timing;

pub use crate::{
    carousel::{AutoPlayCarousel, CarouselArgs},
    error::{CarouselError, ErrorKind},
    host::{HostPager, PagerEvent},
    index_wrapper::{DrivePosition, LoopStrategy, wrap},
    indicator::{CarouselIndicator, IndicatorStyle},
    interaction::ScrollState,
    page_set::{PageSet, PageSetObservable, PageSetObserver, VecPageSet},
    pager::LoopPagerController,
    scroll_timing::{ScrollTiming, ScrollTimingPolicy},
};
