//! Raw, possibly incomplete, host globals.

use crate::{DEFAULT_PER_PAGE, MARKER_DATA_ATTR};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// `wp_localize_script()` output, one global per statement.
static LOCALIZED_GLOBAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var\s+(HMPostHistorySettings|HMPostHistoryCurrentItem)\s*=\s*(\{.*?\})\s*;").unwrap()
});

/// A numeric value that the host may have stringified.
///
/// Localized script data turns every scalar into a string, so `"42"` and `42`
/// are both accepted wherever a number is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(u64),
    Str(String),
}
impl Scalar {
    /// The value as an integer, or `None` if it isn't one.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(s) => s.trim().parse().ok(),
        }
    }
}
impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}
impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// Everything the host page may provide, before validation.
///
/// Field names match the keys of the host globals. Absent keys stay `None`;
/// [`resolve()`](Self::resolve) decides whether the result is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGlobals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page_default: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_selector: Option<String>,
}

impl HostGlobals {
    /// The values the server fills in when nothing filters them.
    ///
    /// The API location, nonce and post ID are inherently per-request, so
    /// they have no default.
    pub fn server_defaults() -> Self {
        Self {
            per_page_default: Some(Scalar::Int(u64::from(DEFAULT_PER_PAGE))),
            marker_selector: Some(format!("[{MARKER_DATA_ATTR}]")),
            ..Self::default()
        }
    }

    /// Collects host globals from the contents of inline `<script>` tags.
    ///
    /// Scripts that don't declare either global, or whose object literal
    /// isn't valid JSON, are ignored. When a key is declared more than once,
    /// the first declaration wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use post_history_config::HostGlobals;
    ///
    /// let script = r#"var HMPostHistoryCurrentItem = {"post_id":"42","marker_selector":"[data-marker]"};"#;
    /// let globals = HostGlobals::from_scripts([script]);
    /// assert_eq!(globals.post_id.and_then(|id| id.as_u64()), Some(42));
    /// ```
    pub fn from_scripts<'a>(scripts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut globals = Self::default();
        for script in scripts {
            for captures in LOCALIZED_GLOBAL_REGEX.captures_iter(script) {
                let (name, object) = (&captures[1], &captures[2]);
                match serde_json::from_str::<Self>(object) {
                    Ok(found) => globals = globals.or(found),
                    Err(err) => tracing::debug!(global = name, error = %err, "Ignoring unparsable host global"),
                }
            }
        }
        globals
    }

    /// Field-wise fallback: keeps every value already set on `self`, taking
    /// the rest from `other`.
    pub fn or(self, other: Self) -> Self {
        Self {
            api_base: self.api_base.or(other.api_base),
            api_nonce: self.api_nonce.or(other.api_nonce),
            per_page_default: self.per_page_default.or(other.per_page_default),
            post_id: self.post_id.or(other.post_id),
            marker_selector: self.marker_selector.or(other.marker_selector),
        }
    }
}
