use crate::consts;
use crate::markup::Element;
use crate::page::ContentWrapper;
use post_history_diff::{normalize, render};
use std::cell::RefCell;

/// The content wrapper, tagged to receive rendered diffs.
///
/// Until a diff is rendered it holds the page's original content.
#[derive(Debug)]
pub struct DiffContainer {
    element: Element,
    baseline: String,
    content: RefCell<String>,
}

impl DiffContainer {
    pub fn new(wrapper: ContentWrapper) -> Self {
        let ContentWrapper {
            mut element,
            inner_html,
            baseline,
        } = wrapper;
        element.set_attr(consts::DIFF_CONTAINER_ATTR, "");
        element.add_class(consts::DIFF_CONTAINER_CLASS);
        Self {
            element,
            baseline,
            content: RefCell::new(inner_html),
        }
    }

    /// The normalized page content every diff is computed against.
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Replaces the content with the diff from the baseline to `candidate`.
    pub fn render(&self, candidate: &str) {
        let diff = render(&self.baseline, &normalize(candidate));
        *self.content.borrow_mut() = diff;
    }

    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    pub fn to_html(&self) -> String {
        self.element.wrap(&self.content.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;

    fn container() -> DiffContainer {
        let page = Page::parse(r#"<div id="post"><i data-marker></i><p>Hello</p></div>"#);
        DiffContainer::new(page.content("[data-marker]").unwrap())
    }

    #[test]
    fn test_tagged_for_diffs() {
        let container = container();
        assert_eq!(container.element().attr("id"), Some("post"));
        assert_eq!(container.element().attr(consts::DIFF_CONTAINER_ATTR), Some(""));
        assert!(container.element().has_class(consts::DIFF_CONTAINER_CLASS));
        assert_eq!(container.content(), r#"<i data-marker=""></i><p>Hello</p>"#);
    }

    #[test]
    fn test_render_marks_insertions() {
        let container = container();
        container.render("<p>Hello world</p>");
        assert_eq!(container.content(), r#"<p>Hello<ins class="diffins"> world</ins></p>"#);
        assert_eq!(
            container.to_html(),
            concat!(
                r#"<div id="post" data-post-history-diff-container="" class="hm-post-history__diff-container">"#,
                r#"<p>Hello<ins class="diffins"> world</ins></p></div>"#,
            )
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let container = container();
        container.render("<p>Goodbye <b>cruel</b> world</p>");
        let first = container.content();
        container.render("<p>Goodbye <b>cruel</b> world</p>");
        assert_eq!(container.content(), first);
    }

    #[test]
    fn test_identical_content_has_no_markers() {
        let container = container();
        container.render("<p>Hello</p>");
        assert_eq!(container.content(), "<p>Hello</p>");
    }
}
