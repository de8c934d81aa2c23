//! Scripted revision source for testing.

use crate::error::{ErrorKind, Result};
use crate::models::{PageQuery, Revision, RevisionPage};
use crate::source::RevisionSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// What the mock answers for a given page number.
#[derive(Debug, Clone)]
pub enum Reply {
    /// A successful response with this body.
    Page(RevisionPage),
    /// A response with this (non-success) status code.
    Status(u16),
    /// A successful response whose body isn't a revisions page.
    Malformed,
    /// A request that never settles.
    Pending,
}

/// In-memory revision source with scripted replies per page number.
///
/// Pages without a reply answer with HTTP 404. Every request is recorded,
/// including ones that fail or never settle.
///
/// # Examples
///
/// ```
/// use post_history_client::source::{MockSource, Reply};
/// use post_history_client::{PageQuery, Revision, RevisionId, RevisionSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let revision = Revision {
///     id: RevisionId(1),
///     content: "<p>Hi</p>".into(),
///     date: "1 Jan 24 @ 10:00".into(),
///     author: "Jane".into(),
/// };
/// let source = MockSource::default().with_page(1, vec![revision], false).with_reply(2, Reply::Status(500));
/// let query = PageQuery { post_id: 7, page: 1, per_page: 3 };
/// assert_eq!(source.fetch_page(&query).await.unwrap().revisions.len(), 1);
/// assert_eq!(source.requests(), vec![query]);
/// # }
/// ```
#[derive(Default)]
pub struct MockSource {
    replies: Mutex<HashMap<u32, Reply>>,
    requests: Mutex<Vec<PageQuery>>,
}

impl MockSource {
    /// Script the reply for `page`, replacing any earlier one.
    pub fn with_reply(self, page: u32, reply: Reply) -> Self {
        self.set_reply(page, reply);
        self
    }

    /// Shorthand for a successful [`Reply::Page`].
    pub fn with_page(self, page: u32, revisions: Vec<Revision>, has_more: bool) -> Self {
        self.with_reply(page, Reply::Page(RevisionPage { revisions, has_more }))
    }

    /// Re-script a page after construction (e.g. to make a retry succeed).
    pub fn set_reply(&self, page: u32, reply: Reply) {
        lock(&self.replies).insert(page, reply);
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<PageQuery> {
        lock(&self.requests).clone()
    }
}

// A poisoned lock only means another test thread panicked; the data is fine.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl RevisionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_page(&self, query: &PageQuery) -> Result<RevisionPage> {
        lock(&self.requests).push(*query);
        // Clone out of the lock; it must not be held across the await below.
        let reply = lock(&self.replies).get(&query.page).cloned().unwrap_or(Reply::Status(404));
        match reply {
            Reply::Page(page) => Ok(page),
            Reply::Status(code) => exn::bail!(ErrorKind::Status(code)),
            Reply::Malformed => exn::bail!(ErrorKind::Decode),
            Reply::Pending => std::future::pending().await,
        }
    }
}
