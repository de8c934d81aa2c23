//! Bootstrap: one [`History`] per page view.

use crate::container::DiffContainer;
use crate::events::{Event, EventBus};
use crate::fetcher::RevisionFetcher;
use crate::load_more::LoadMore;
use crate::page::Page;
use crate::picker::PickerList;
use crate::store::RevisionStore;
use post_history_client::source::HttpSource;
use post_history_client::{RevisionId, SourceHandle};
use post_history_config::{HostGlobals, Settings};
use std::rc::Rc;
use std::sync::Arc;
use tracing::instrument;

/// State shared by every controller of a page view.
#[derive(Debug)]
pub struct Context {
    pub settings: Settings,
    pub bus: Rc<EventBus>,
    pub store: RevisionStore,
    /// Absent when the page has no marker.
    pub container: Option<DiffContainer>,
}

impl Context {
    /// Shows the diff from the page content to revision `id`, then emits
    /// [`Event::DiffSwitched`]. Ids not in the store are ignored.
    #[instrument(skip(self))]
    pub fn switch_to(&self, id: RevisionId) -> bool {
        let Some(revision) = self.store.get(id) else {
            tracing::debug!("Unknown revision");
            return false;
        };
        if let Some(container) = &self.container {
            container.render(&revision.content);
        }
        self.bus.emit(Event::DiffSwitched { id });
        true
    }
}

/// The wired-up revision history of a page.
pub struct History {
    context: Rc<Context>,
    fetcher: Rc<RevisionFetcher>,
    picker: Option<Rc<PickerList>>,
    load_more: Option<Rc<LoadMore>>,
}

impl History {
    /// Sets up revision history against the HTTP API.
    ///
    /// Returns `None`, without touching anything, when the host globals are
    /// incomplete: the feature simply isn't enabled for this page.
    #[instrument(skip_all)]
    pub fn init(globals: &HostGlobals, page: &Page) -> Option<Self> {
        let settings = globals.resolve()?;
        let source = match HttpSource::new(settings.api_base.clone(), settings.api_nonce.clone()) {
            Ok(source) => source,
            Err(err) => {
                tracing::error!(error = ?err, "Unable to create HTTP client");
                return None;
            },
        };
        Some(Self::build(settings, page, Arc::new(source)))
    }

    /// Same as [`init`](Self::init), with revisions coming from `source`.
    pub fn init_with(globals: &HostGlobals, page: &Page, source: SourceHandle) -> Option<Self> {
        let settings = globals.resolve()?;
        Some(Self::build(settings, page, source))
    }

    fn build(settings: Settings, page: &Page, source: SourceHandle) -> Self {
        let bus = Rc::new(EventBus::new());
        let container = page.content(&settings.marker_selector).map(DiffContainer::new);
        let context = Rc::new(Context {
            store: RevisionStore::new(Rc::clone(&bus)),
            bus,
            settings,
            container,
        });
        let fetcher = Rc::new(RevisionFetcher::new(Rc::clone(&context), source));
        let picker = page.has_diff_list().then(|| {
            let target = Rc::clone(&context);
            PickerList::attach(&context.bus, move |id| {
                target.switch_to(id);
            })
        });
        let load_more = page
            .load_more_button()
            .map(|button| LoadMore::attach(&context.bus, button, Rc::clone(&fetcher)));
        tracing::debug!(
            post_id = context.settings.post_id,
            container = context.container.is_some(),
            picker = picker.is_some(),
            load_more = load_more.is_some(),
            "Post history initialized"
        );
        Self {
            context,
            fetcher,
            picker,
            load_more,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        &self.context.settings
    }

    pub fn bus(&self) -> &EventBus {
        &self.context.bus
    }

    pub fn store(&self) -> &RevisionStore {
        &self.context.store
    }

    pub fn container(&self) -> Option<&DiffContainer> {
        self.context.container.as_ref()
    }

    pub fn fetcher(&self) -> &RevisionFetcher {
        &self.fetcher
    }

    pub fn picker(&self) -> Option<&PickerList> {
        self.picker.as_deref()
    }

    pub fn load_more(&self) -> Option<&LoadMore> {
        self.load_more.as_deref()
    }

    /// See [`Context::switch_to`].
    pub fn switch_to(&self, id: RevisionId) -> bool {
        self.context.switch_to(id)
    }
}
