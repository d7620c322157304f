//! Capability-based forwarding between the mediator and the real
//! provider/observer.
//!
//! The mediator implements a handful of callbacks itself. Every other
//! callback falls through, in priority order, to the registered content
//! provider and then to the registered event observer. Both are held weakly;
//! a dropped one simply stops answering.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::model::{ContentProvider, EventObserver, Selector};

/// Callbacks the mediator answers itself.
pub const MEDIATOR_SELECTORS: [Selector; 5] = [
    Selector::SectionCount,
    Selector::RowCount,
    Selector::Cell,
    Selector::RowHeight,
    Selector::DidScroll,
];

/// Where a forwarded callback goes.
#[derive(Clone)]
pub enum ForwardTarget {
    /// The registered content provider.
    ContentProvider(Arc<dyn ContentProvider>),
    /// The registered event observer.
    EventObserver(Arc<dyn EventObserver>),
}

impl ForwardTarget {
    /// Returns the observer if this target is one.
    pub fn into_event_observer(self) -> Option<Arc<dyn EventObserver>> {
        match self {
            Self::EventObserver(observer) => Some(observer),
            Self::ContentProvider(_) => None,
        }
    }

    /// Returns the provider if this target is one.
    pub fn into_content_provider(self) -> Option<Arc<dyn ContentProvider>> {
        match self {
            Self::ContentProvider(provider) => Some(provider),
            Self::EventObserver(_) => None,
        }
    }
}

impl std::fmt::Debug for ForwardTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentProvider(_) => f.write_str("ForwardTarget::ContentProvider"),
            Self::EventObserver(_) => f.write_str("ForwardTarget::EventObserver"),
        }
    }
}

/// Weak slots for the real provider and observer, plus the dispatch rules.
#[derive(Default)]
pub struct ForwardingProxy {
    content_provider: RwLock<Option<Weak<dyn ContentProvider>>>,
    event_observer: RwLock<Option<Weak<dyn EventObserver>>>,
}

impl ForwardingProxy {
    /// Creates a proxy with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content provider.
    pub fn set_content_provider(&self, provider: Weak<dyn ContentProvider>) {
        *self.content_provider.write() = Some(provider);
    }

    /// Replaces the event observer.
    pub fn set_event_observer(&self, observer: Weak<dyn EventObserver>) {
        *self.event_observer.write() = Some(observer);
    }

    /// The content provider, if registered and still alive.
    pub fn content_provider(&self) -> Option<Arc<dyn ContentProvider>> {
        self.content_provider.read().as_ref().and_then(Weak::upgrade)
    }

    /// The event observer, if registered and still alive.
    pub fn event_observer(&self) -> Option<Arc<dyn EventObserver>> {
        self.event_observer.read().as_ref().and_then(Weak::upgrade)
    }

    /// Returns `true` if the mediator answers `selector` itself.
    pub fn implements_itself(selector: Selector) -> bool {
        MEDIATOR_SELECTORS.contains(&selector)
    }

    /// Returns `true` if anyone behind the mediator answers `selector`.
    pub fn handles(&self, selector: Selector) -> bool {
        Self::implements_itself(selector)
            || self
                .content_provider()
                .is_some_and(|p| p.responds_to(selector))
            || self
                .event_observer()
                .is_some_and(|o| o.responds_to(selector))
    }

    /// Picks who answers a callback the mediator does not answer itself.
    ///
    /// Returns `None` for the mediator's own callbacks and for callbacks
    /// nobody implements.
    pub fn target_for(&self, selector: Selector) -> Option<ForwardTarget> {
        if Self::implements_itself(selector) {
            return None;
        }
        if let Some(provider) = self.content_provider() {
            if provider.responds_to(selector) {
                return Some(ForwardTarget::ContentProvider(provider));
            }
        }
        if let Some(observer) = self.event_observer() {
            if observer.responds_to(selector) {
                return Some(ForwardTarget::EventObserver(observer));
            }
        }
        None
    }
}
