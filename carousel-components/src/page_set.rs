//! Page sets and their change notifications.
//!
//! A [`PageSet`] is owned by the application. It can change at any time,
//! and it announces changes through its [`PageSetObservable`] rather than
//! being polled.
//!
//! ## Usage
//!
//! ```
//! use std::sync::{
//!     Arc,
//!     atomic::{AtomicUsize, Ordering},
//! };
//!
//! use carousel_components::page_set::{PageSet, PageSetObserver, VecPageSet};
//!
//! struct Counter(AtomicUsize);
//!
//! impl PageSetObserver for Counter {
//!     fn on_changed(&self) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let pages = VecPageSet::new(vec!["Page-1", "Page-2", "Page-3"]);
//! let counter = Arc::new(Counter(AtomicUsize::new(0)));
//! pages.observable().register(counter.clone()).unwrap();
//!
//! pages.push("Page-4");
//! assert_eq!(pages.count(), 4);
//! assert_eq!(counter.0.load(Ordering::SeqCst), 1);
//! ```

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::RwLock;

use crate::error::CarouselError;

/// Receives change notifications from a page set.
pub trait PageSetObserver: Send + Sync {
    /// The pages or their count changed.
    fn on_changed(&self);

    /// The page set is no longer valid as a whole.
    fn on_invalidated(&self) {
        self.on_changed();
    }
}

/// Handle returned by [`PageSetObservable::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Observer registry embedded in every page set.
#[derive(Default)]
pub struct PageSetObservable {
    observers: RwLock<Vec<(ObserverId, Arc<dyn PageSetObserver>)>>,
    next_id: AtomicU64,
}

impl PageSetObservable {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes an observer.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::ObserverAlreadyRegistered`] if the same
    /// observer instance is already subscribed.
    pub fn register(&self, observer: Arc<dyn PageSetObserver>) -> Result<ObserverId, CarouselError> {
        let mut observers = self.observers.write();
        let duplicate = observers
            .iter()
            .any(|(_, existing)| std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(&observer)));
        if duplicate {
            return Err(CarouselError::ObserverAlreadyRegistered);
        }
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        observers.push((id, observer));
        Ok(id)
    }

    /// Removes a subscription. Returns `false` if it was not present.
    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Number of current subscriptions.
    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Tells every observer that the pages changed.
    pub fn notify_changed(&self) {
        for observer in self.snapshot() {
            observer.on_changed();
        }
    }

    /// Tells every observer that the page set was invalidated.
    pub fn notify_invalidated(&self) {
        for observer in self.snapshot() {
            observer.on_invalidated();
        }
    }

    // Observers may unregister themselves while being notified.
    fn snapshot(&self) -> Vec<Arc<dyn PageSetObserver>> {
        self.observers
            .read()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect()
    }
}

impl fmt::Debug for PageSetObservable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSetObservable")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// A finite, ordered, externally owned set of pages.
pub trait PageSet: Send + Sync {
    /// Content handed out for a page.
    type Page;

    /// Number of pages.
    fn count(&self) -> usize;

    /// Content of the page at `index`, `None` if out of range.
    fn page(&self, index: usize) -> Option<Self::Page>;

    /// Optional title of the page at `index`.
    fn page_title(&self, _index: usize) -> Option<String> {
        None
    }

    /// The registry this page set notifies on change.
    fn observable(&self) -> &PageSetObservable;
}

/// A page set backed by a vector.
///
/// Every mutation through [`update`](Self::update) notifies observers once
/// the write lock has been released.
pub struct VecPageSet<T> {
    pages: RwLock<Vec<T>>,
    title: Option<fn(&T) -> String>,
    observable: PageSetObservable,
}

impl<T> VecPageSet<T>
where
    T: Clone + Send + Sync,
{
    /// Creates a page set from initial pages.
    pub fn new(pages: Vec<T>) -> Self {
        Self {
            pages: RwLock::new(pages),
            title: None,
            observable: PageSetObservable::new(),
        }
    }

    /// Derives page titles from page content.
    pub fn with_titles(mut self, title: fn(&T) -> String) -> Self {
        self.title = Some(title);
        self
    }

    /// Mutates the pages, then notifies observers.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let result = {
            let mut pages = self.pages.write();
            mutate(&mut pages)
        };
        self.observable.notify_changed();
        result
    }

    /// Appends a page.
    pub fn push(&self, page: T) {
        self.update(|pages| pages.push(page));
    }

    /// Replaces all pages.
    pub fn replace(&self, pages: Vec<T>) {
        self.update(|current| *current = pages);
    }

    /// Clones the current pages.
    pub fn snapshot(&self) -> Vec<T> {
        self.pages.read().clone()
    }
}

impl<T> PageSet for VecPageSet<T>
where
    T: Clone + Send + Sync,
{
    type Page = T;

    fn count(&self) -> usize {
        self.pages.read().len()
    }

    fn page(&self, index: usize) -> Option<T> {
        self.pages.read().get(index).cloned()
    }

    fn page_title(&self, index: usize) -> Option<String> {
        let title = self.title?;
        self.pages.read().get(index).map(title)
    }

    fn observable(&self) -> &PageSetObservable {
        &self.observable
    }
}

impl<T> fmt::Debug for VecPageSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecPageSet")
            .field("count", &self.pages.read().len())
            .field("observable", &self.observable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[derive(Default)]
    struct CountingObserver {
        changed: AtomicUsize,
        invalidated: AtomicUsize,
    }

    impl PageSetObserver for CountingObserver {
        fn on_changed(&self) {
            self.changed.fetch_add(1, Ordering::SeqCst);
        }

        fn on_invalidated(&self) {
            self.invalidated.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn double_registration_is_rejected() {
        let observable = PageSetObservable::new();
        let observer = Arc::new(CountingObserver::default());

        let id = observable.register(observer.clone()).expect("first registration");
        assert_eq!(
            observable.register(observer.clone()),
            Err(CarouselError::ObserverAlreadyRegistered)
        );
        assert_eq!(observable.observer_count(), 1);

        assert!(observable.unregister(id));
        assert!(!observable.unregister(id));
        assert!(observable.register(observer).is_ok());
    }

    #[test]
    fn notifications_reach_every_observer() {
        let observable = PageSetObservable::new();
        let first = Arc::new(CountingObserver::default());
        let second = Arc::new(CountingObserver::default());
        observable.register(first.clone()).expect("register first");
        observable.register(second.clone()).expect("register second");

        observable.notify_changed();
        observable.notify_invalidated();

        for observer in [&first, &second] {
            assert_eq!(observer.changed.load(Ordering::SeqCst), 1);
            assert_eq!(observer.invalidated.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn vec_page_set_notifies_after_update() {
        let pages = VecPageSet::new(vec![1, 2, 3]);
        let observer = Arc::new(CountingObserver::default());
        pages.observable().register(observer.clone()).expect("register");

        let removed = pages.update(|items| items.remove(0));
        assert_eq!(removed, 1);
        assert_eq!(pages.snapshot(), vec![2, 3]);
        assert_eq!(observer.changed.load(Ordering::SeqCst), 1);

        pages.replace(Vec::new());
        assert_eq!(pages.count(), 0);
        assert_eq!(pages.page(0), None);
        assert_eq!(observer.changed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn titles_come_from_the_title_fn() {
        let untitled = VecPageSet::new(vec!["a"]);
        assert_eq!(untitled.page_title(0), None);

        let titled = VecPageSet::new(vec!["a", "b"]).with_titles(|page| page.to_uppercase());
        assert_eq!(titled.page_title(1).as_deref(), Some("B"));
        assert_eq!(titled.page_title(2), None);
    }
}
