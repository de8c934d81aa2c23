//! Synchronous in-process event bus.
//!
//! Components never call each other directly; they mutate their own state
//! and announce it here. Delivery is synchronous: by the time
//! [`EventBus::emit`] returns, every subscribed handler has run.

use post_history_client::{Revision, RevisionId};
use std::cell::RefCell;
use std::rc::Rc;

/// Something that happened to the revision history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A revision was stored (inserted or overwritten).
    RevisionAdded { id: RevisionId, revision: Revision },
    /// A revision was evicted, or eviction was attempted.
    RevisionRemoved { id: RevisionId },
    /// The server reported that no further pages exist.
    NoMoreRevisions,
    /// The diff container now shows this revision.
    DiffSwitched { id: RevisionId },
}

impl Event {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RevisionAdded { .. } => "revision-added",
            Self::RevisionRemoved { .. } => "revision-removed",
            Self::NoMoreRevisions => "no-more-revisions",
            Self::DiffSwitched { .. } => "diff-switched",
        }
    }
}

type Handler = Rc<dyn Fn(&Event)>;

/// Ordered list of event handlers.
///
/// Handlers may emit further events, and may subscribe new handlers, while a
/// dispatch is in progress. A handler subscribed during a dispatch only
/// receives later events.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; handlers run in subscription order.
    pub fn subscribe(&self, handler: impl Fn(&Event) + 'static) {
        self.handlers.borrow_mut().push(Rc::new(handler));
    }

    /// Delivers `event` to every handler before returning.
    pub fn emit(&self, event: Event) {
        // Snapshot, so handlers can subscribe without a double borrow.
        let handlers = self.handlers.borrow().clone();
        tracing::trace!(event = event.name(), handlers = handlers.len(), "Emitting event");
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("handlers", &self.subscriber_count()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder(bus: &EventBus) -> Rc<RefCell<Vec<Event>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        seen
    }

    #[test]
    fn test_handlers_run_in_order() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let order = Rc::clone(&order);
            bus.subscribe(move |_| order.borrow_mut().push(n));
        }
        bus.emit(Event::NoMoreRevisions);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_nested_emit() {
        let bus = Rc::new(EventBus::new());
        let inner = Rc::clone(&bus);
        bus.subscribe(move |event| {
            if let Event::RevisionRemoved { id } = event {
                inner.emit(Event::DiffSwitched { id: *id });
            }
        });
        let seen = recorder(&bus);
        bus.emit(Event::RevisionRemoved { id: RevisionId(3) });
        assert_eq!(
            *seen.borrow(),
            vec![
                Event::DiffSwitched { id: RevisionId(3) },
                Event::RevisionRemoved { id: RevisionId(3) },
            ]
        );
    }

    #[test]
    fn test_subscribe_during_dispatch_gets_later_events_only() {
        let bus = Rc::new(EventBus::new());
        let late_calls = Rc::new(Cell::new(0));
        let registered = Cell::new(false);
        let (inner, counter) = (Rc::clone(&bus), Rc::clone(&late_calls));
        bus.subscribe(move |_| {
            if !registered.replace(true) {
                let counter = Rc::clone(&counter);
                inner.subscribe(move |_| counter.set(counter.get() + 1));
            }
        });
        bus.emit(Event::NoMoreRevisions);
        assert_eq!(late_calls.get(), 0);
        assert_eq!(bus.subscriber_count(), 2);
        bus.emit(Event::NoMoreRevisions);
        assert_eq!(late_calls.get(), 1);
    }
}
