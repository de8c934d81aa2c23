use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

// Anchors rendered by the server-side widget.
selector!(DIFF_LIST_SELECTOR, "[data-post-history-diff-list]");
selector!(LOAD_MORE_SELECTOR, "button[data-post-history-load-more]");
selector!(INLINE_SCRIPT_SELECTOR, "script:not([src])");

pub(crate) const DIFF_CONTAINER_ATTR: &str = "data-post-history-diff-container";
pub(crate) const DIFF_CONTAINER_CLASS: &str = "hm-post-history__diff-container";
pub(crate) const DIFF_ID_ATTR: &str = "data-post-history-diff-id";
pub(crate) const ENTRY_CLASS: &str = "hm-post-history__diff";
pub(crate) const ENTRY_CURRENT_CLASS: &str = "hm-post-history__diff--current";
pub(crate) const SELECT_BUTTON_CLASS: &str = "hm-post-history__select-diff";
pub(crate) const LOAD_MORE_ATTR: &str = "data-post-history-load-more";
pub(crate) const LOADING_CLASS: &str = "hm-post-history__load-more--loading";
pub(crate) const FAILED_CLASS: &str = "hm-post-history__load-more--failed";
