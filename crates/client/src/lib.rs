pub mod error;
pub mod models;
pub mod source;

pub use crate::models::{PageQuery, Revision, RevisionId, RevisionPage};
pub use crate::source::RevisionSource;
pub use reqwest::Url;
use std::sync::Arc;

pub type SourceHandle = Arc<dyn RevisionSource + Send + Sync>;
