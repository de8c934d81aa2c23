//! HTML-aware diffing of revision content.
//!
//! Diffs are computed over words rather than bytes or lines, and markup tags
//! are tokens in their own right, so changed structure is highlighted as well
//! as changed text. Nothing in this crate can fail: malformed markup
//! produces a noisier diff, never an error.
//!
//! ```
//! use post_history_diff::{normalize, render};
//!
//! let baseline = normalize("<p>Hello</p>");
//! let revision = normalize("<p>Hello world</p>");
//! assert_eq!(render(&baseline, &revision), r#"<p>Hello<ins class="diffins"> world</ins></p>"#);
//! ```

mod matcher;
mod normalize;
mod render;
mod token;

pub use crate::matcher::{Operation, diff};
pub use crate::normalize::normalize;
pub use crate::render::{DELETED_CLASS, INSERTED_CLASS, MODIFIED_CLASS, render, render_tokens};
pub use crate::token::{TagRole, Token, TokenKind, tokenize};
