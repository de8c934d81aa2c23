//! Revision models.
//!
//! These mirror the JSON returned by the revisions endpoint. Formatting (the
//! display date, content filters) happens server-side, so every field is
//! ready to show as-is.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Identifier of a revision, unique within one post's revisions.
#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(pub u64);

/// One saved historical version of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub id: RevisionId,
    /// Rendered HTML of the revision.
    pub content: String,
    /// Display date, already formatted by the server.
    pub date: String,
    /// Display name of the revision's author.
    pub author: String,
}

/// One page of the revisions listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionPage {
    pub revisions: Vec<Revision>,
    /// Only an explicit `false` means the listing is exhausted.
    #[serde(rename = "hasMore", default = "more_by_default")]
    pub has_more: bool,
}

fn more_by_default() -> bool {
    true
}

/// Parameters of a single page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub post_id: u64,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
}
