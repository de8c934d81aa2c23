use crate::matcher::{Operation, diff};
use crate::token::{TagRole, Token, tokenize};
use tracing::instrument;

/// Class of the `<ins>` element wrapping inserted text.
pub const INSERTED_CLASS: &str = "diffins";
/// Class of the `<del>` element wrapping deleted text.
pub const DELETED_CLASS: &str = "diffdel";
/// Class of the `<ins>` element wrapping unchanged text whose markup changed.
pub const MODIFIED_CLASS: &str = "diffmod";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Inserted,
    Deleted,
    Modified,
}
impl Mark {
    fn element(self) -> &'static str {
        match self {
            Self::Inserted | Self::Modified => "ins",
            Self::Deleted => "del",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Inserted => INSERTED_CLASS,
            Self::Deleted => DELETED_CLASS,
            Self::Modified => MODIFIED_CLASS,
        }
    }
}

/// Renders an inline HTML diff from `old` to `new`.
///
/// Unchanged content is copied through, inserted text is wrapped in
/// `<ins class="diffins">` and deleted text in `<del class="diffdel">`.
/// Tags from the new side are kept and tags only present on the old side are
/// dropped, so the result follows the structure of `new`. Markup changes are
/// marked too: unchanged text inside an element that exists on one side only
/// (added, removed or renamed formatting and blocks) is wrapped in
/// `<ins class="diffmod">`, and added or removed void elements (`<img>`,
/// `<br>`, ...) are wrapped like text.
///
/// The output depends only on the two inputs; rendering the same pair twice
/// produces identical markup.
#[instrument(level = "debug", skip_all, fields(old_size = old.len(), new_size = new.len()))]
pub fn render(old: &str, new: &str) -> String {
    render_tokens(&tokenize(old), &tokenize(new))
}

/// Same as [`render`], for input that has already been tokenized.
pub fn render_tokens(old: &[Token], new: &[Token]) -> String {
    let operations = diff(old, new);
    let mut old_changed = vec![false; old.len()];
    let mut new_changed = vec![false; new.len()];
    for operation in &operations {
        match operation {
            Operation::Equal { .. } => {},
            Operation::Insert { new } => new_changed[new.clone()].fill(true),
            Operation::Delete { old } => old_changed[old.clone()].fill(true),
            Operation::Replace { old, new } => {
                old_changed[old.clone()].fill(true);
                new_changed[new.clone()].fill(true);
            },
        }
    }
    let old_inside = inside_changed_elements(old, &old_changed);
    let new_inside = inside_changed_elements(new, &new_changed);

    let mut output = String::new();
    for operation in operations {
        match operation {
            Operation::Equal { old: old_range, new: new_range } => {
                // Equal ranges pair up token for token.
                push_unchanged(&mut output, &new[new_range.clone()], |offset| {
                    new_inside[new_range.start + offset] || old_inside[old_range.start + offset]
                });
            },
            Operation::Insert { new: range } => push_changed(&mut output, Mark::Inserted, &new[range]),
            Operation::Delete { old: range } => push_changed(&mut output, Mark::Deleted, &old[range]),
            Operation::Replace { old: old_range, new: new_range } => {
                push_changed(&mut output, Mark::Deleted, &old[old_range]);
                push_changed(&mut output, Mark::Inserted, &new[new_range]);
            },
        }
    }
    output
}

/// For every token, whether it sits inside an element whose opening and
/// closing tags were both changed, i.e. an element only one side has.
fn inside_changed_elements(tokens: &[Token], changed: &[bool]) -> Vec<bool> {
    let mut element_changed = vec![false; tokens.len()];
    let mut open = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        match token.tag_role() {
            Some(TagRole::Open) => open.push(index),
            Some(TagRole::Close) => {
                if let Some(start) = open.pop() {
                    element_changed[start] = changed[start] && changed[index];
                }
            },
            _ => {},
        }
    }

    let mut inside = vec![false; tokens.len()];
    let mut enclosing: Vec<bool> = Vec::new();
    let mut changed_depth = 0;
    for (index, token) in tokens.iter().enumerate() {
        inside[index] = changed_depth > 0;
        match token.tag_role() {
            Some(TagRole::Open) => {
                enclosing.push(element_changed[index]);
                changed_depth += usize::from(element_changed[index]);
            },
            // Stray closing tags in malformed markup have nothing to pop.
            Some(TagRole::Close) => {
                if let Some(true) = enclosing.pop() {
                    changed_depth -= 1;
                }
            },
            _ => {},
        }
    }
    inside
}

fn push_unchanged(output: &mut String, tokens: &[Token], modified: impl Fn(usize) -> bool) {
    let mut start = 0;
    while start < tokens.len() {
        if tokens[start].is_tag() {
            output.push_str(&tokens[start].text);
            start += 1;
            continue;
        }
        let len = tokens[start..].iter().take_while(|t| !t.is_tag()).count();
        let run = &tokens[start..start + len];
        if modified(start) {
            push_marked(output, Mark::Modified, run);
        } else {
            push_tokens(output, run);
        }
        start += len;
    }
}

fn push_changed(output: &mut String, mark: Mark, tokens: &[Token]) {
    let mut start = 0;
    while start < tokens.len() {
        let token = &tokens[start];
        if token.is_tag() {
            match token.tag_role() {
                Some(TagRole::Void) => push_marked(output, mark, std::slice::from_ref(token)),
                _ if mark == Mark::Inserted => output.push_str(&token.text),
                _ => {},
            }
            start += 1;
            continue;
        }
        let len = tokens[start..].iter().take_while(|t| !t.is_tag()).count();
        push_marked(output, mark, &tokens[start..start + len]);
        start += len;
    }
}

fn push_marked(output: &mut String, mark: Mark, tokens: &[Token]) {
    output.push('<');
    output.push_str(mark.element());
    output.push_str(" class=\"");
    output.push_str(mark.class());
    output.push_str("\">");
    push_tokens(output, tokens);
    output.push_str("</");
    output.push_str(mark.element());
    output.push('>');
}

fn push_tokens(output: &mut String, tokens: &[Token]) {
    for token in tokens {
        output.push_str(&token.text);
    }
}
