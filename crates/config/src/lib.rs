//! Host settings for the post history feature.
//!
//! The host page provides two globals (`HMPostHistorySettings` and
//! `HMPostHistoryCurrentItem`) that together describe where the revisions API
//! lives and where the content sits on the page. This crate gathers those
//! values from every available source into [`HostGlobals`], then
//! [`resolves`](HostGlobals::resolve) them into validated [`Settings`].
//!
//! # Sources
//! Later sources override earlier ones:
//! 1. Server-side defaults ([`HostGlobals::server_defaults`]).
//! 2. Globals embedded in the page's inline `<script>` tags.
//! 3. An optional JSON, TOML or YAML file.
//! 4. `POST_HISTORY_`-prefixed environment variables.

pub mod error;
mod globals;
mod load;
mod settings;

pub use crate::globals::{HostGlobals, Scalar};
pub use crate::load::{ENV_PREFIX, default_path, figment, load};
pub use crate::settings::Settings;

/// Namespace of the revisions REST API.
pub const REST_NAMESPACE: &str = "post-history/v1";
/// Page size used when the host doesn't filter it.
pub const DEFAULT_PER_PAGE: u32 = 3;
/// Attribute carried by the hidden marker element prepended to the content.
pub const MARKER_DATA_ATTR: &str = "data-hm-post-history-content";
