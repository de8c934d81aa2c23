//! Splitting HTML into diffable tokens.

use regex::Regex;
use std::sync::LazyLock;

// Order matters: comments before tags, tags before the catch-all.
static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^<>]*>|&#?[A-Za-z0-9]+;|[\p{L}\p{N}_]+|\s+|.").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An opening, closing or self-closing tag, or a comment.
    Tag,
    /// A run of letters and digits, or a single character entity.
    Word,
    /// A run of whitespace.
    Whitespace,
    /// Any other single character.
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}
impl Token {
    pub fn is_tag(&self) -> bool {
        self.kind == TokenKind::Tag
    }

    /// How a tag token affects element nesting; `None` for anything else.
    pub fn tag_role(&self) -> Option<TagRole> {
        if !self.is_tag() {
            return None;
        }
        let (closing, rest) = match self.text.strip_prefix("</") {
            Some(rest) => (true, rest),
            None => (false, &self.text[1..]),
        };
        let name = rest
            .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            // Comments, doctypes and other oddities.
            return Some(TagRole::Other);
        }
        Some(if closing {
            TagRole::Close
        } else if self.text.ends_with("/>") || VOID_ELEMENTS.contains(&name.as_str()) {
            TagRole::Void
        } else {
            TagRole::Open
        })
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    /// Opens an element that will be closed later.
    Open,
    Close,
    /// An element without content, such as `<br>` or `<img/>`.
    Void,
    Other,
}

/// Splits markup into tokens.
///
/// Concatenating the text of every token reproduces the input exactly. A
/// `<` that doesn't start a well-formed tag becomes punctuation, so broken
/// markup still tokenizes.
///
/// # Examples
///
/// ```
/// use post_history_diff::{TokenKind, tokenize};
///
/// let tokens = tokenize("<p>Hi there!</p>");
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [
///     TokenKind::Tag,
///     TokenKind::Word,
///     TokenKind::Whitespace,
///     TokenKind::Word,
///     TokenKind::Punctuation,
///     TokenKind::Tag,
/// ]);
/// ```
pub fn tokenize(html: &str) -> Vec<Token> {
    TOKEN_REGEX
        .find_iter(html)
        .map(|m| {
            let text = m.as_str();
            let kind = match text.chars().next() {
                Some('<') if text.len() > 1 && text.ends_with('>') => TokenKind::Tag,
                Some('&') if text.len() > 1 => TokenKind::Word,
                Some(c) if c.is_whitespace() => TokenKind::Whitespace,
                Some(c) if c.is_alphanumeric() || c == '_' => TokenKind::Word,
                _ => TokenKind::Punctuation,
            };
            Token { kind, text: text.to_string() }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn texts(html: &str) -> Vec<String> {
        tokenize(html).into_iter().map(|t| t.text).collect()
    }

    #[rstest]
    #[case("<p>Hello world</p>", &["<p>", "Hello", " ", "world", "</p>"])]
    #[case("a &amp; b", &["a", " ", "&amp;", " ", "b"])]
    #[case("<!-- a <b> -->x", &["<!-- a <b> -->", "x"])]
    #[case("1 < 2", &["1", " ", "<", " ", "2"])]
    #[case("<img src=\"a.png\"/>", &["<img src=\"a.png\"/>"])]
    #[case("café, naïve", &["café", ",", " ", "naïve"])]
    fn test_tokenize(#[case] html: &str, #[case] expected: &[&str]) {
        assert_eq!(texts(html), expected);
    }

    #[rstest]
    #[case("<div class=\"a\">Some <em>mixed</em> content &mdash; here.</div>\n")]
    #[case("<<>>&;&&amp")]
    #[case("")]
    fn test_tokens_reproduce_input(#[case] html: &str) {
        assert_eq!(texts(html).concat(), html);
    }

    #[rstest]
    #[case("<p>", Some(TagRole::Open))]
    #[case("<STRONG class=\"x\">", Some(TagRole::Open))]
    #[case("</p>", Some(TagRole::Close))]
    #[case("<br>", Some(TagRole::Void))]
    #[case("<img src=\"a.png\">", Some(TagRole::Void))]
    #[case("<custom-icon/>", Some(TagRole::Void))]
    #[case("<!-- note -->", Some(TagRole::Other))]
    #[case("word", None)]
    fn test_tag_role(#[case] text: &str, #[case] expected: Option<TagRole>) {
        assert_eq!(tokenize(text)[0].tag_role(), expected);
    }

    #[test]
    fn test_token_kinds() {
        let tokens = tokenize("<br> &amp;x");
        assert!(tokens[0].is_tag());
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[2].kind, TokenKind::Word);
        assert_eq!(tokens[3].kind, TokenKind::Word);
    }
}
