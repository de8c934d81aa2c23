use crate::events::Event;
use crate::history::Context;
use post_history_client::{PageQuery, SourceHandle};
use std::cell::Cell;
use std::rc::Rc;
use tracing::instrument;

/// Result of asking for a page of revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page arrived; `added` revisions were new to the store.
    Loaded { added: usize, has_more: bool },
    /// The request or its response failed. Nothing was stored.
    Failed,
    /// The server already reported the end; no request was sent.
    Exhausted,
}

/// Merges pages of revisions from a source into the store.
///
/// Failures are logged and reported as [`FetchOutcome::Failed`]; they never
/// reach the caller as errors.
pub struct RevisionFetcher {
    context: Rc<Context>,
    source: SourceHandle,
    exhausted: Cell<bool>,
}

impl RevisionFetcher {
    pub fn new(context: Rc<Context>, source: SourceHandle) -> Self {
        Self {
            context,
            source,
            exhausted: Cell::new(false),
        }
    }

    /// Whether the server has reported that no further pages exist.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted.get()
    }

    /// Fetches `page` and stores every revision not already present.
    ///
    /// Known ids are skipped rather than overwritten, so overlapping pages
    /// announce each revision once. The first response with `hasMore: false`
    /// emits [`Event::NoMoreRevisions`]; later requests are not sent.
    #[instrument(skip(self), fields(source = self.source.name(), post_id = self.context.settings.post_id))]
    pub async fn fetch_page(&self, page: u32) -> FetchOutcome {
        if self.exhausted.get() {
            tracing::debug!("No more revisions; skipping request");
            return FetchOutcome::Exhausted;
        }
        let query = PageQuery {
            post_id: self.context.settings.post_id,
            page,
            per_page: self.context.settings.per_page,
        };
        let response = match self.source.fetch_page(&query).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = ?err, retryable = err.is_retryable(), "Failed to load revisions");
                return FetchOutcome::Failed;
            },
        };

        let store = &self.context.store;
        let mut added = 0;
        for revision in response.revisions {
            if store.has(revision.id) {
                continue;
            }
            store.set(revision.id, revision);
            added += 1;
        }
        tracing::debug!(added, has_more = response.has_more, "Merged revisions page");

        if !response.has_more && !self.exhausted.replace(true) {
            self.context.bus.emit(Event::NoMoreRevisions);
        }
        FetchOutcome::Loaded {
            added,
            has_more: response.has_more,
        }
    }
}
