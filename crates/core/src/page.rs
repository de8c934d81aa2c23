//! Headless model of the host page.

use crate::consts;
use crate::load_more::LoadMoreButton;
use crate::markup::{Element, escape_text};
use post_history_diff::normalize;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::instrument;

/// The element wrapping the post content, i.e. the marker's parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWrapper {
    pub element: Element,
    /// Inner HTML as found on the page, marker included.
    pub inner_html: String,
    /// Normalized inner HTML with the marker removed.
    pub baseline: String,
}

/// A parsed host page.
///
/// The page is read once; the regions that change afterwards are modelled by
/// the view-models built from it.
pub struct Page {
    document: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Text of every inline `<script>`, in document order.
    pub fn inline_scripts(&self) -> Vec<String> {
        self.document
            .select(&consts::INLINE_SCRIPT_SELECTOR)
            .map(|script| script.text().collect())
            .collect()
    }

    /// Whether the picker list root is on the page.
    pub fn has_diff_list(&self) -> bool {
        self.document.select(&consts::DIFF_LIST_SELECTOR).next().is_some()
    }

    /// The load-more button, if the page has one.
    pub fn load_more_button(&self) -> Option<LoadMoreButton> {
        self.document
            .select(&consts::LOAD_MORE_SELECTOR)
            .next()
            .map(|button| LoadMoreButton::new(Element::from_ref(button), button.inner_html()))
    }

    /// Locates the content wrapper through the marker matching `marker_selector`.
    ///
    /// An unparsable selector is treated like a marker that isn't there.
    #[instrument(level = "debug", skip(self))]
    pub fn content(&self, marker_selector: &str) -> Option<ContentWrapper> {
        let selector = Selector::parse(marker_selector)
            .inspect_err(|err| tracing::debug!(error = ?err, "Unparsable marker selector"))
            .ok()?;
        let Some(marker) = self.document.select(&selector).next() else {
            tracing::debug!("Marker not found");
            return None;
        };
        let wrapper = marker.parent().and_then(ElementRef::wrap)?;
        let mut without_marker = String::new();
        for child in wrapper.children().filter(|child| child.id() != marker.id()) {
            match child.value() {
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        without_marker.push_str(&element.html());
                    }
                },
                Node::Text(text) => without_marker.push_str(&escape_text(text)),
                Node::Comment(comment) => {
                    without_marker.push_str("<!--");
                    without_marker.push_str(comment);
                    without_marker.push_str("-->");
                },
                _ => {},
            }
        }
        Some(ContentWrapper {
            element: Element::from_ref(wrapper),
            inner_html: wrapper.inner_html(),
            baseline: normalize(&without_marker),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PAGE: &str = concat!(
        r#"<html><head><script src="/app.js"></script>"#,
        r#"<script>var HMPostHistoryCurrentItem = {"post_id":"42"};</script></head><body>"#,
        r#"<article class="entry"><span data-hm-post-history-content></span><p>Hello</p></article>"#,
        r#"<ul class="hm-post-history__list" data-post-history-diff-list></ul>"#,
        r#"<button class="hm-post-history__load-more" type="button" data-post-history-load-more="2">Load more</button>"#,
        "</body></html>",
    );

    #[test]
    fn test_inline_scripts() {
        let page = Page::parse(PAGE);
        assert_eq!(page.inline_scripts(), vec![r#"var HMPostHistoryCurrentItem = {"post_id":"42"};"#]);
    }

    #[test]
    fn test_content_wrapper() {
        let page = Page::parse(PAGE);
        let wrapper = page.content("[data-hm-post-history-content]").unwrap();
        assert_eq!(wrapper.element.name(), "article");
        assert_eq!(wrapper.element.attr("class"), Some("entry"));
        assert_eq!(wrapper.baseline, "<p>Hello</p>");
        assert_eq!(wrapper.inner_html, r#"<span data-hm-post-history-content=""></span><p>Hello</p>"#);
    }

    #[test]
    fn test_baseline_removes_only_the_marker_node() {
        let page = Page::parse(concat!(
            r#"<article><p><span class="marker"></span>Intro &amp; more</p>"#,
            r#"<span class="marker"></span><!-- note --><p>Body</p></article>"#,
        ));
        let wrapper = page.content("article > span.marker").unwrap();
        assert_eq!(
            wrapper.baseline,
            r#"<p><span class="marker"></span>Intro &amp; more</p><!-- note --><p>Body</p>"#
        );
    }

    #[rstest]
    #[case::absent("[data-nothing-here]")]
    #[case::unparsable("[[[")]
    fn test_missing_marker(#[case] selector: &str) {
        assert_eq!(Page::parse(PAGE).content(selector), None);
    }

    #[test]
    fn test_anchors() {
        let page = Page::parse(PAGE);
        assert!(page.has_diff_list());
        let button = page.load_more_button().unwrap();
        assert_eq!(button.counter(), Some(2));
        assert_eq!(button.label(), "Load more");

        let bare = Page::parse("<p>Nothing to see</p>");
        assert!(!bare.has_diff_list());
        assert!(bare.load_more_button().is_none());
        assert!(bare.inline_scripts().is_empty());
    }

    #[test]
    fn test_load_more_must_be_a_button() {
        let page = Page::parse(r#"<a data-post-history-load-more="1">More</a>"#);
        assert!(page.load_more_button().is_none());
    }
}
