use crate::events::{Event, EventBus};
use post_history_client::{Revision, RevisionId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Entries {
    order: Vec<RevisionId>,
    by_id: HashMap<RevisionId, Revision>,
}

/// Insertion-ordered map of loaded revisions that announces its mutations.
///
/// Every mutation is applied first and announced second, so handlers reading
/// the store see the new state. No borrow is held while handlers run.
#[derive(Debug)]
pub struct RevisionStore {
    bus: Rc<EventBus>,
    entries: RefCell<Entries>,
}

impl RevisionStore {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            bus,
            entries: RefCell::default(),
        }
    }

    /// Inserts or overwrites, then emits [`Event::RevisionAdded`].
    ///
    /// An overwritten revision keeps its original position. Returns the
    /// previous revision stored under `id`, if any.
    pub fn set(&self, id: RevisionId, revision: Revision) -> Option<Revision> {
        let previous = {
            let mut entries = self.entries.borrow_mut();
            let previous = entries.by_id.insert(id, revision.clone());
            if previous.is_none() {
                entries.order.push(id);
            }
            previous
        };
        self.bus.emit(Event::RevisionAdded { id, revision });
        previous
    }

    /// Removes `id`, then emits [`Event::RevisionRemoved`] whether or not it
    /// was present. Returns the removed revision.
    pub fn delete(&self, id: RevisionId) -> Option<Revision> {
        let removed = {
            let mut entries = self.entries.borrow_mut();
            let removed = entries.by_id.remove(&id);
            if removed.is_some() {
                entries.order.retain(|existing| *existing != id);
            }
            removed
        };
        self.bus.emit(Event::RevisionRemoved { id });
        removed
    }

    pub fn has(&self, id: RevisionId) -> bool {
        self.entries.borrow().by_id.contains_key(&id)
    }

    pub fn get(&self, id: RevisionId) -> Option<Revision> {
        self.entries.borrow().by_id.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored ids in insertion order.
    pub fn ids(&self) -> Vec<RevisionId> {
        self.entries.borrow().order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revision(id: u64, content: &str) -> Revision {
        Revision {
            id: RevisionId(id),
            content: content.to_string(),
            date: "1 Jan 24 @ 10:00".to_string(),
            author: "Jane".to_string(),
        }
    }

    fn store() -> (Rc<EventBus>, Rc<RevisionStore>, Rc<RefCell<Vec<Event>>>) {
        let bus = Rc::new(EventBus::new());
        let store = Rc::new(RevisionStore::new(Rc::clone(&bus)));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        (bus, store, seen)
    }

    #[test]
    fn test_set_emits_after_mutation() {
        let (bus, store, _) = store();
        let observed = Rc::new(RefCell::new(None));
        let (reader, sink) = (Rc::clone(&store), Rc::clone(&observed));
        bus.subscribe(move |event| {
            if let Event::RevisionAdded { id, .. } = event {
                *sink.borrow_mut() = reader.get(*id);
            }
        });
        store.set(RevisionId(1), revision(1, "<p>a</p>"));
        assert_eq!(*observed.borrow(), Some(revision(1, "<p>a</p>")));
    }

    #[test]
    fn test_set_overwrite_keeps_position() {
        let (_, store, seen) = store();
        assert_eq!(store.set(RevisionId(1), revision(1, "a")), None);
        store.set(RevisionId(2), revision(2, "b"));
        assert_eq!(store.set(RevisionId(1), revision(1, "c")), Some(revision(1, "a")));
        assert_eq!(store.ids(), vec![RevisionId(1), RevisionId(2)]);
        assert_eq!(store.get(RevisionId(1)).unwrap().content, "c");
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_delete_returns_removed_and_always_emits() {
        let (_, store, seen) = store();
        store.set(RevisionId(1), revision(1, "a"));
        store.set(RevisionId(2), revision(2, "b"));
        assert_eq!(store.delete(RevisionId(1)), Some(revision(1, "a")));
        assert_eq!(store.delete(RevisionId(9)), None);
        assert_eq!(store.ids(), vec![RevisionId(2)]);
        assert!(!store.has(RevisionId(1)));
        let removals = seen
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::RevisionRemoved { .. }))
            .count();
        assert_eq!(removals, 2);
    }

    #[test]
    fn test_reads_have_no_side_effects() {
        let (_, store, seen) = store();
        assert!(store.is_empty());
        assert!(!store.has(RevisionId(1)));
        assert_eq!(store.get(RevisionId(1)), None);
        assert_eq!(store.len(), 0);
        assert!(seen.borrow().is_empty());
    }
}
