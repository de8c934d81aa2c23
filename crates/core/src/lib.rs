//! Inline revision history for a single page view.
//!
//! A parsed [`Page`] and the host's [`HostGlobals`](post_history_config::HostGlobals)
//! go in; [`History::init`] wires a revision store, a revision fetcher, the
//! picker list and the load-more button onto one synchronous [`EventBus`].
//! Everything here is single-threaded: shared state lives in `Rc`/`RefCell`
//! and the only suspension point is the network request.
//!
//! ```
//! use post_history_client::source::MockSource;
//! use post_history_client::{Revision, RevisionId};
//! use post_history_config::{HostGlobals, Scalar};
//! use post_history_core::{History, Page};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let page = Page::parse(concat!(
//!     r#"<article><span data-hm-post-history-content></span><p>Hello</p></article>"#,
//!     r#"<ul data-post-history-diff-list></ul>"#,
//!     r#"<button data-post-history-load-more="1">Load more</button>"#,
//! ));
//! let globals = HostGlobals {
//!     api_base: Some("https://example.com/wp-json/post-history/v1".into()),
//!     api_nonce: Some("abc123".into()),
//!     post_id: Some(Scalar::from("42")),
//!     ..HostGlobals::server_defaults()
//! };
//! let revision = Revision {
//!     id: RevisionId(7),
//!     content: "<p>Hello world</p>".into(),
//!     date: "1 Jan 24 @ 10:00".into(),
//!     author: "Jane".into(),
//! };
//! let source = Arc::new(MockSource::default().with_page(1, vec![revision], false));
//!
//! let history = History::init_with(&globals, &page, source).unwrap();
//! history.load_more().unwrap().click().await;
//! history.switch_to(RevisionId(7));
//! assert_eq!(
//!     history.container().unwrap().content(),
//!     r#"<p>Hello<ins class="diffins"> world</ins></p>"#,
//! );
//! # }
//! ```

mod consts;
mod container;
pub mod events;
mod fetcher;
mod history;
mod load_more;
mod markup;
mod page;
mod picker;
mod store;

pub use crate::container::DiffContainer;
pub use crate::events::{Event, EventBus};
pub use crate::fetcher::{FetchOutcome, RevisionFetcher};
pub use crate::history::{Context, History};
pub use crate::load_more::{LoadMore, LoadMoreButton, LoadState};
pub use crate::markup::Element;
pub use crate::page::{ContentWrapper, Page};
pub use crate::picker::{Entry, PickerList};
pub use crate::store::RevisionStore;
