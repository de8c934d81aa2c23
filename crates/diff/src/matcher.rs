//! Word-level sequence matching.
//!
//! Tokens are compared by their text with the patience algorithm, which
//! anchors on tokens that occur once on each side. Prose diffs then line up
//! on distinctive words rather than on the whitespace between every word.

use crate::token::Token;
use similar::{Algorithm, DiffTag, capture_diff_slices};
use std::ops::Range;

/// A single step in turning the old token sequence into the new one.
///
/// Ranges index into the token slices passed to [`diff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Equal { old: Range<usize>, new: Range<usize> },
    Insert { new: Range<usize> },
    Delete { old: Range<usize> },
    Replace { old: Range<usize>, new: Range<usize> },
}

/// Computes the ordered operations that transform `old` into `new`.
///
/// Every token of both inputs is covered by exactly one operation, and the
/// operations are returned in document order. Adjacent operations of the
/// same kind are merged, and a deletion next to an insertion becomes a
/// replacement, so the result doesn't depend on how the algorithm splits
/// its work.
pub fn diff(old: &[Token], new: &[Token]) -> Vec<Operation> {
    let old_text: Vec<&str> = old.iter().map(|token| token.text.as_str()).collect();
    let new_text: Vec<&str> = new.iter().map(|token| token.text.as_str()).collect();
    // (unchanged, old range, new range); neighbouring spans are contiguous.
    let mut spans: Vec<(bool, Range<usize>, Range<usize>)> = Vec::new();
    for op in capture_diff_slices(Algorithm::Patience, &old_text, &new_text) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        if old_range.is_empty() && new_range.is_empty() {
            continue;
        }
        let unchanged = tag == DiffTag::Equal;
        match spans.last_mut() {
            Some((last_unchanged, old, new)) if *last_unchanged == unchanged => {
                old.end = old_range.end;
                new.end = new_range.end;
            },
            _ => spans.push((unchanged, old_range, new_range)),
        }
    }
    spans
        .into_iter()
        .map(|(unchanged, old, new)| match (unchanged, old.is_empty(), new.is_empty()) {
            (true, _, _) => Operation::Equal { old, new },
            (false, false, true) => Operation::Delete { old },
            (false, true, false) => Operation::Insert { new },
            (false, _, _) => Operation::Replace { old, new },
        })
        .collect()
}
