use scraper::Html;
use tracing::instrument;

/// Normalizes an HTML fragment to reduce inconsequential diffs.
///
/// The markup is parsed as a detached fragment and serialized back. Parsing
/// merges adjacent text nodes, closes unclosed elements and canonicalizes
/// attribute quoting and entity escaping, so two fragments that only differ
/// in how the same tree was written out normalize to the same string.
///
/// # Examples
///
/// ```
/// use post_history_diff::normalize;
///
/// assert_eq!(normalize("<p class='intro'>Hi"), r#"<p class="intro">Hi</p>"#);
/// ```
#[instrument(level = "trace", skip(html), fields(html_size = html.len()))]
pub fn normalize(html: &str) -> String {
    Html::parse_fragment(html).root_element().inner_html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<p>Hello</p>", "<p>Hello</p>")]
    #[case("<p>Hello</p>\n<p>World</p>", "<p>Hello</p>\n<p>World</p>")]
    #[case("<p class='x'>Hi</p>", r#"<p class="x">Hi</p>"#)]
    #[case("<p>Unclosed", "<p>Unclosed</p>")]
    #[case("a &amp; b", "a &amp; b")]
    #[case("", "")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case("<div><p>One<p>Two</div>")]
    #[case("text <b>bold <i>both</b> italic</i>")]
    #[case("</p></p><<>>&&;")]
    fn test_normalize_is_stable(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }
}
