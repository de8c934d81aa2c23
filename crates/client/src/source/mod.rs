//! Revision source trait and implementations.
//!
//! A [`RevisionSource`] answers "give me page N of this post's revisions".
//! The production implementation talks to the revisions REST endpoint over
//! HTTP; the mock (behind the `mock` feature) replays scripted responses for
//! tests.

mod http;
#[cfg(feature = "mock")]
mod mock;

pub use self::http::{HttpSource, NONCE_HEADER};
#[cfg(feature = "mock")]
pub use self::mock::{MockSource, Reply};
use crate::error::Result;
use crate::models::{PageQuery, RevisionPage};
use async_trait::async_trait;

/// Paginated access to a post's revisions.
///
/// # Examples
///
/// ```
/// use post_history_client::{PageQuery, RevisionSource};
/// use post_history_client::error::Result;
///
/// async fn count_first_page(source: &dyn RevisionSource, post_id: u64) -> Result<usize> {
///     let query = PageQuery { post_id, page: 1, per_page: 3 };
///     Ok(source.fetch_page(&query).await?.revisions.len())
/// }
/// ```
#[async_trait]
pub trait RevisionSource: Send + Sync {
    /// Name of the source, for logging only.
    fn name(&self) -> &str;

    /// Fetches a single page of revisions.
    ///
    /// Implementations must not retry or cache; every call is one request.
    /// Failures are reported through [`ErrorKind`](crate::error::ErrorKind):
    /// - [`Status`](crate::error::ErrorKind::Status) for non-success responses,
    /// - [`Network`](crate::error::ErrorKind::Network) when no response arrived,
    /// - [`Decode`](crate::error::ErrorKind::Decode) when the body isn't a page.
    async fn fetch_page(&self, query: &PageQuery) -> Result<RevisionPage>;
}
