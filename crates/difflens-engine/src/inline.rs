//! Character-level highlighting of paired modifications.
//!
//! A `Remove` immediately followed by an `Add` is read as one modified
//! line. The pair gets a character diff: the removed line receives
//! `Remove`/`Unchanged` spans of its own text, the added line receives
//! `Add`/`Unchanged` spans of its own text.
//!
//! Pairing is strictly positional. In a run like remove, remove, add, add
//! only the middle two lines touch and only they are annotated; no attempt
//! is made to match lines by similarity.

use difflens_types::{ChangeKind, CharChange, DiffLine, DiffOptions, EditOp, Granularity};

use crate::myers::diff;
use crate::tokenize::tokenize;

/// Annotate every directly adjacent remove/add pair in place. Pairs where
/// either side is longer than `max_chars` characters are skipped.
///
/// Returns the number of pairs annotated.
pub fn annotate_inline(lines: &mut [DiffLine], options: &DiffOptions, max_chars: usize) -> usize {
    let mut pairs = 0;
    let mut i = 0;
    while i + 1 < lines.len() {
        if lines[i].kind == ChangeKind::Remove && lines[i + 1].kind == ChangeKind::Add {
            if within(&lines[i].content, max_chars) && within(&lines[i + 1].content, max_chars) {
                let (removed, added) =
                    char_changes(&lines[i].content, &lines[i + 1].content, options);
                lines[i].inline_changes = Some(removed);
                lines[i + 1].inline_changes = Some(added);
                pairs += 1;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    pairs
}

/// Pure variant of [`annotate_inline`] returning an enriched copy.
pub fn annotated(lines: &[DiffLine], options: &DiffOptions, max_chars: usize) -> Vec<DiffLine> {
    let mut out = lines.to_vec();
    annotate_inline(&mut out, options, max_chars);
    out
}

/// Character diff between a removed and an added text, split into the span
/// list for each side. Adjacent characters of the same kind are merged.
pub fn char_changes(
    removed: &str,
    added: &str,
    options: &DiffOptions,
) -> (Vec<CharChange>, Vec<CharChange>) {
    let char_options = DiffOptions {
        granularity: Granularity::Character,
        ..*options
    };
    let left = tokenize(removed, Granularity::Character);
    let right = tokenize(added, Granularity::Character);
    let script = diff(&left, &right, &char_options);

    let mut old_spans = Vec::new();
    let mut new_spans = Vec::new();
    for op in &script {
        match *op {
            EditOp::Keep { left, right } => {
                push_span(&mut old_spans, ChangeKind::Unchanged, left.text());
                push_span(&mut new_spans, ChangeKind::Unchanged, right.text());
            }
            EditOp::Delete(token) => push_span(&mut old_spans, ChangeKind::Remove, token.text()),
            EditOp::Insert(token) => push_span(&mut new_spans, ChangeKind::Add, token.text()),
        }
    }
    (old_spans, new_spans)
}

fn push_span(spans: &mut Vec<CharChange>, kind: ChangeKind, text: &str) {
    match spans.last_mut() {
        Some(last) if last.kind == kind => last.value.push_str(text),
        _ => spans.push(CharChange::new(kind, text)),
    }
}

fn within(text: &str, max_chars: usize) -> bool {
    text.len() <= max_chars || text.chars().count() <= max_chars
}
