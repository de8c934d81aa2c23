//! The revision picker list.

use crate::consts;
use crate::events::{Event, EventBus};
use crate::markup::escape_text;
use post_history_client::RevisionId;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// One selectable revision in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: RevisionId,
    pub date: String,
    pub author: String,
    pub current: bool,
}

impl Entry {
    pub fn label(&self) -> String {
        format!("{} - {}", self.date, self.author)
    }

    pub fn to_html(&self) -> String {
        let class = if self.current {
            format!("{} {}", consts::ENTRY_CLASS, consts::ENTRY_CURRENT_CLASS)
        } else {
            consts::ENTRY_CLASS.to_string()
        };
        format!(
            r#"<li class="{class}" {attr}="{id}"><button class="{button}" type="button" value="{id}">{label}</button></li>"#,
            attr = consts::DIFF_ID_ATTR,
            id = self.id,
            button = consts::SELECT_BUTTON_CLASS,
            label = escape_text(&self.label()),
        )
    }
}

type SelectHandler = Box<dyn Fn(RevisionId)>;

/// Keeps the list of selectable revisions in step with the store and the
/// active diff.
pub struct PickerList {
    entries: RefCell<Vec<Entry>>,
    on_select: SelectHandler,
}

impl PickerList {
    /// Subscribes a new list to `bus`. `on_select` runs when an entry is
    /// picked.
    pub fn attach(bus: &EventBus, on_select: impl Fn(RevisionId) + 'static) -> Rc<Self> {
        let picker = Rc::new(Self {
            entries: RefCell::default(),
            on_select: Box::new(on_select),
        });
        let weak: Weak<Self> = Rc::downgrade(&picker);
        bus.subscribe(move |event| {
            if let Some(picker) = weak.upgrade() {
                picker.handle(event);
            }
        });
        picker
    }

    fn handle(&self, event: &Event) {
        let mut entries = self.entries.borrow_mut();
        match event {
            // An overwrite in the store keeps its slot, and so does the entry.
            Event::RevisionAdded { id, revision } => match entries.iter_mut().find(|entry| entry.id == *id) {
                Some(entry) => {
                    entry.date = revision.date.clone();
                    entry.author = revision.author.clone();
                },
                None => entries.push(Entry {
                    id: *id,
                    date: revision.date.clone(),
                    author: revision.author.clone(),
                    current: false,
                }),
            },
            Event::RevisionRemoved { id } => entries.retain(|entry| entry.id != *id),
            Event::DiffSwitched { id } => {
                for entry in entries.iter_mut() {
                    entry.current = entry.id == *id;
                }
            },
            Event::NoMoreRevisions => {},
        }
    }

    /// Picks the entry for `id`, as a click on it would.
    ///
    /// Returns `false` if the list has no such entry.
    pub fn select(&self, id: RevisionId) -> bool {
        let listed = self.entries.borrow().iter().any(|entry| entry.id == id);
        if listed {
            (self.on_select)(id);
        }
        listed
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    /// The entry marked current, if any.
    pub fn current(&self) -> Option<RevisionId> {
        self.entries.borrow().iter().find(|entry| entry.current).map(|entry| entry.id)
    }

    /// Markup of the list items, in list order.
    pub fn to_html(&self) -> String {
        self.entries.borrow().iter().map(Entry::to_html).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use post_history_client::Revision;
    use std::cell::Cell;

    fn added(id: u64, author: &str) -> Event {
        Event::RevisionAdded {
            id: RevisionId(id),
            revision: Revision {
                id: RevisionId(id),
                content: String::new(),
                date: "2 Mar 24 @ 17:40".to_string(),
                author: author.to_string(),
            },
        }
    }

    #[test]
    fn test_tracks_events() {
        let bus = EventBus::new();
        let picker = PickerList::attach(&bus, |_| {});
        bus.emit(added(3, "Jane"));
        bus.emit(added(1, "Joe"));
        bus.emit(added(2, "Jane"));
        bus.emit(Event::RevisionRemoved { id: RevisionId(1) });
        bus.emit(Event::RevisionRemoved { id: RevisionId(8) });
        let ids: Vec<_> = picker.entries().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![RevisionId(3), RevisionId(2)]);

        bus.emit(Event::DiffSwitched { id: RevisionId(2) });
        assert_eq!(picker.current(), Some(RevisionId(2)));
        bus.emit(Event::DiffSwitched { id: RevisionId(3) });
        assert_eq!(picker.current(), Some(RevisionId(3)));
        assert_eq!(picker.entries().iter().filter(|entry| entry.current).count(), 1);
    }

    #[test]
    fn test_select_only_listed() {
        let bus = EventBus::new();
        let selected = Rc::new(Cell::new(None));
        let sink = Rc::clone(&selected);
        let picker = PickerList::attach(&bus, move |id| sink.set(Some(id)));
        bus.emit(added(5, "Jane"));
        assert!(!picker.select(RevisionId(6)));
        assert_eq!(selected.get(), None);
        assert!(picker.select(RevisionId(5)));
        assert_eq!(selected.get(), Some(RevisionId(5)));
    }

    #[test]
    fn test_entry_markup_is_escaped() {
        let bus = EventBus::new();
        let picker = PickerList::attach(&bus, |_| {});
        bus.emit(added(7, "<b>Jane</b> & co"));
        bus.emit(Event::DiffSwitched { id: RevisionId(7) });
        assert_eq!(
            picker.to_html(),
            concat!(
                r#"<li class="hm-post-history__diff hm-post-history__diff--current" data-post-history-diff-id="7">"#,
                r#"<button class="hm-post-history__select-diff" type="button" value="7">"#,
                "2 Mar 24 @ 17:40 - &lt;b&gt;Jane&lt;/b&gt; &amp; co</button></li>",
            )
        );
    }

    #[test]
    fn test_store_overwrite_updates_entry_in_place() {
        let bus = Rc::new(EventBus::new());
        let store = crate::store::RevisionStore::new(Rc::clone(&bus));
        let picker = PickerList::attach(&bus, |_| {});
        let Event::RevisionAdded { revision, .. } = added(1, "Jane") else {
            unreachable!()
        };
        store.set(RevisionId(1), revision.clone());
        store.set(RevisionId(2), Revision { id: RevisionId(2), ..revision.clone() });
        store.set(RevisionId(1), Revision { author: "Joe".to_string(), ..revision });
        bus.emit(Event::DiffSwitched { id: RevisionId(1) });

        let entries = picker.entries();
        assert_eq!(store.len(), 2);
        assert_eq!(entries.iter().map(|entry| entry.id).collect::<Vec<_>>(), store.ids());
        assert_eq!(entries[0].author, "Joe");
        assert_eq!(entries.iter().filter(|entry| entry.current).count(), 1);
    }

    #[test]
    fn test_dropped_list_ignores_events() {
        let bus = EventBus::new();
        drop(PickerList::attach(&bus, |_| {}));
        bus.emit(added(1, "Jane"));
        assert_eq!(bus.subscriber_count(), 1);
    }
}
