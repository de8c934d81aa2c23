//! The "load more" button and its controller.

use crate::consts;
use crate::events::{Event, EventBus};
use crate::fetcher::{FetchOutcome, RevisionFetcher};
use crate::markup::Element;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::instrument;

/// Request state shown on the button. Loading and failed are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Failed,
}

/// View-model of the load-more button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreButton {
    element: Element,
    label: String,
    counter: Option<u32>,
    state: LoadState,
    hidden: bool,
    disabled: bool,
}

impl LoadMoreButton {
    pub fn new(element: Element, label: impl Into<String>) -> Self {
        let counter = element
            .attr(consts::LOAD_MORE_ATTR)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|page| *page > 0);
        Self {
            hidden: element.attr("hidden").is_some(),
            disabled: element.attr("disabled").is_some(),
            label: label.into(),
            counter,
            state: LoadState::Idle,
            element,
        }
    }

    /// Next page to request; `None` when the attribute is missing or unusable.
    pub fn counter(&self) -> Option<u32> {
        self.counter
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_failed(&self) -> bool {
        self.state == LoadState::Failed
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn to_html(&self) -> String {
        let mut element = self.element.clone();
        if let Some(counter) = self.counter {
            element.set_attr(consts::LOAD_MORE_ATTR, counter.to_string());
        }
        element.remove_class(consts::LOADING_CLASS);
        element.remove_class(consts::FAILED_CLASS);
        match self.state {
            LoadState::Idle => {},
            LoadState::Loading => element.add_class(consts::LOADING_CLASS),
            LoadState::Failed => element.add_class(consts::FAILED_CLASS),
        }
        element.set_flag("hidden", self.hidden);
        element.set_flag("disabled", self.disabled);
        element.wrap(&self.label)
    }
}

/// Controller advancing through revision pages one click at a time.
pub struct LoadMore {
    button: RefCell<LoadMoreButton>,
    fetcher: Rc<RevisionFetcher>,
}

impl LoadMore {
    /// Wires the button to the bus: once the server runs out of revisions
    /// the button is hidden and disabled for good.
    pub fn attach(bus: &EventBus, button: LoadMoreButton, fetcher: Rc<RevisionFetcher>) -> Rc<Self> {
        let load_more = Rc::new(Self {
            button: RefCell::new(button),
            fetcher,
        });
        let weak: Weak<Self> = Rc::downgrade(&load_more);
        bus.subscribe(move |event| {
            if let Event::NoMoreRevisions = event
                && let Some(load_more) = weak.upgrade()
            {
                let mut button = load_more.button.borrow_mut();
                button.hidden = true;
                button.disabled = true;
                tracing::debug!("Load more button retired");
            }
        });
        load_more
    }

    /// Snapshot of the button's current state.
    pub fn button(&self) -> LoadMoreButton {
        self.button.borrow().clone()
    }

    /// Handles a click.
    ///
    /// Does nothing (returning `None`) while the button is disabled. The
    /// counter advances before the request is sent, so overlapping clicks
    /// ask for consecutive pages. When a request fails and no later click has
    /// moved the counter, it's rewound so the next click retries that page.
    #[instrument(skip(self))]
    pub async fn click(&self) -> Option<FetchOutcome> {
        let page = {
            let mut button = self.button.borrow_mut();
            if button.disabled {
                tracing::debug!("Ignoring click on disabled button");
                return None;
            }
            let page = button.counter.unwrap_or(1);
            button.counter = Some(page.saturating_add(1));
            button.state = LoadState::Loading;
            page
        };
        let outcome = self.fetcher.fetch_page(page).await;
        let mut button = self.button.borrow_mut();
        button.state = match outcome {
            FetchOutcome::Failed => LoadState::Failed,
            FetchOutcome::Loaded { .. } | FetchOutcome::Exhausted => LoadState::Idle,
        };
        if outcome == FetchOutcome::Failed && button.counter == Some(page.saturating_add(1)) {
            button.counter = Some(page);
        }
        tracing::debug!(page, state = ?button.state, "Click settled");
        Some(outcome)
    }
}
