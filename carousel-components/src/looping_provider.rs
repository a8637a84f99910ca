//! Presents a finite page set to the host as an endless one.
//!
//! The provider caches the [`LoopStrategy`] derived from the page count, so
//! that the host keeps seeing a consistent virtual space between the moment
//! the page set mutates and the moment its change notification is handled.

use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{
    error::CarouselError,
    index_wrapper::{DrivePosition, LoopStrategy},
    page_set::{ObserverId, PageSet, PageSetObserver},
};

/// Wraps a [`PageSet`] and resolves virtual positions to its pages.
pub struct LoopingPageProvider<P: PageSet> {
    source: Option<Arc<P>>,
    subscription: Option<ObserverId>,
    strategy: LoopStrategy,
}

impl<P: PageSet> LoopingPageProvider<P> {
    /// Creates a provider with no source.
    pub fn new() -> Self {
        Self {
            source: None,
            subscription: None,
            strategy: LoopStrategy::Empty,
        }
    }

    /// The wrapped page set, if any.
    pub fn source(&self) -> Option<&Arc<P>> {
        self.source.as_ref()
    }

    /// Replaces the wrapped page set. `None` clears it.
    ///
    /// Any subscription to the previous set is dropped first; call
    /// [`subscribe`](Self::subscribe) to listen to the new one.
    pub fn set_source(&mut self, source: Option<Arc<P>>) {
        self.unsubscribe();
        self.source = source;
        self.refresh();
    }

    /// Subscribes `observer` to the wrapped set. Does nothing when already
    /// subscribed or when there is no source.
    ///
    /// # Errors
    ///
    /// Propagates [`CarouselError::ObserverAlreadyRegistered`] if the
    /// observer was subscribed to this set behind the provider's back.
    pub fn subscribe(&mut self, observer: &Arc<dyn PageSetObserver>) -> Result<(), CarouselError> {
        if self.subscription.is_some() {
            return Ok(());
        }
        let Some(source) = &self.source else {
            return Ok(());
        };
        let id = source.observable().register(observer.clone())?;
        self.subscription = Some(id);
        Ok(())
    }

    /// Drops the subscription to the wrapped set, if any.
    pub fn unsubscribe(&mut self) {
        let Some(id) = self.subscription.take() else {
            return;
        };
        if let Some(source) = &self.source
            && !source.observable().unregister(id)
        {
            debug!("page set subscription was already gone");
        }
    }

    /// Returns `true` while subscribed to the wrapped set.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Re-reads the page count and recomputes the strategy.
    pub fn refresh(&mut self) -> LoopStrategy {
        let count = self.source.as_ref().map_or(0, |source| source.count());
        self.strategy = LoopStrategy::for_count(count);
        self.strategy
    }

    /// The cached strategy.
    pub fn strategy(&self) -> LoopStrategy {
        self.strategy
    }

    /// Number of real pages as of the last refresh.
    pub fn page_count(&self) -> usize {
        self.strategy.page_count()
    }

    /// Number of virtual pages the host should expose.
    pub fn virtual_count(&self) -> usize {
        self.strategy.virtual_count()
    }

    /// Bounded page index for a drive position.
    pub fn bounded_index(&self, position: DrivePosition) -> Option<usize> {
        self.strategy.wrap(position)
    }

    /// Content for the virtual page at `position`.
    pub fn page_at(&self, position: DrivePosition) -> Option<P::Page> {
        let index = self.bounded_index(position)?;
        self.source.as_ref()?.page(index)
    }

    /// Title for the virtual page at `position`. Empty titles count as none.
    pub fn page_title_at(&self, position: DrivePosition) -> Option<String> {
        let index = self.bounded_index(position)?;
        self.source
            .as_ref()?
            .page_title(index)
            .filter(|title| !title.is_empty())
    }
}

impl<P: PageSet> Default for LoopingPageProvider<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PageSet> Drop for LoopingPageProvider<P> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl<P: PageSet> fmt::Debug for LoopingPageProvider<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopingPageProvider")
            .field("has_source", &self.source.is_some())
            .field("subscribed", &self.subscription.is_some())
            .field("strategy", &self.strategy)
            .finish()
    }
}
