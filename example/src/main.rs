//! Headless carousel demo.
//!
//! Three pages advance every two seconds with slow, eased transitions. A
//! fourth page is appended after four seconds and the user swipes back
//! once after seven. Run with `RUST_LOG=debug` to see the carousel's own
//! events.

mod terminal_canvas;

use std::{sync::Arc, time::Duration};

use carousel_components::{
    AutoPlayCarousel, CarouselArgs, CarouselError, IndicatorStyle, LoopPagerController, PageSet,
    VecPageSet,
};
use carousel_ui::{Color, Dp, Px, PxSize};
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use crate::terminal_canvas::TerminalCanvas;

const FRAME: Duration = Duration::from_millis(16);
const RUN_FOR: Duration = Duration::from_secs(10);
const APPEND_AT: Duration = Duration::from_secs(4);
const SWIPE_AT: Duration = Duration::from_secs(7);
const SWIPE_LENGTH: Duration = Duration::from_millis(120);
const VIEWPORT: PxSize = PxSize::new(Px(360), Px(200));

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,carousel_components=info,example=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), CarouselError> {
    init_tracing();

    let style = IndicatorStyle::default()
        .dot_radius(Dp(5.0))
        .background_color(Color::from_argb_u32(0x66FF_FFFF))
        .selected_color(Color::RED);
    let args = CarouselArgs::default()
        .transition_duration(Duration::from_millis(800))
        .indicator(style);
    let pager = LoopPagerController::new(VIEWPORT.width);
    let mut carousel = AutoPlayCarousel::new(pager, args)?;

    let pages = Arc::new(VecPageSet::new(
        (1..=3).map(|n| format!("Page-{n}")).collect(),
    ));
    carousel.set_page_set(Some(pages.clone()));
    carousel.start_autoplay(Duration::from_millis(2000))?;

    let appender = {
        let pages = pages.clone();
        tokio::spawn(async move {
            time::sleep(APPEND_AT).await;
            pages.push("Page-4".to_string());
            info!("appended Page-4");
        })
    };

    let mut canvas = TerminalCanvas::new(VIEWPORT, style.selected_color);
    let mut frames = time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let started = frames.tick().await;
    let mut swipe_started = false;
    let mut swipe_released = false;
    let mut shown = None;

    loop {
        let now = frames.tick().await;
        let elapsed = now.duration_since(started);
        if elapsed > RUN_FOR {
            break;
        }
        let now = now.into_std();

        if !swipe_started && elapsed >= SWIPE_AT {
            swipe_started = true;
            info!("swiping back");
            carousel.host_mut().start_drag(Px(60), now);
        } else if swipe_started && !swipe_released && elapsed >= SWIPE_AT + SWIPE_LENGTH {
            swipe_released = true;
            let pager = carousel.host_mut();
            pager.drag_to(Px(300), now);
            pager.end_drag(now);
        }

        carousel.pump(now);

        if carousel.host_mut().take_redraw_request() {
            carousel.draw(&mut canvas);
            let dots = canvas.take_line();
            let page = carousel.current_page();
            if page != shown {
                info!(
                    at = ?elapsed,
                    page = page.as_deref().unwrap_or("-"),
                    scroll = ?carousel.scroll_state(),
                    "{dots}"
                );
                shown = page;
            }
        }
    }

    if let Err(error) = appender.await {
        warn!(%error, "page appender did not finish");
    }
    carousel.on_detach();
    info!(
        pages = carousel.page_count(),
        observers = pages.observable().observer_count(),
        "demo finished"
    );
    Ok(())
}
