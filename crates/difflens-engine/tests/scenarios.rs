//! End-to-end scenarios for `compute`.

use difflens_engine::{compute, DiffEngine};
use difflens_types::{
    ChangeKind, CharChange, DiffError, DiffLine, DiffOptions, DiffStats, Granularity, LimitKind,
    Limits,
};

fn defaults() -> DiffOptions {
    DiffOptions::default()
}

#[test]
fn identical_text_is_all_unchanged() {
    let text = "fn main() {\n    println!(\"hi\");\n}\n";
    let result = compute(text, text, &defaults()).unwrap();
    assert_eq!(result.stats, DiffStats::from_counts(0, 0, 3));
    assert!(result.is_identical());
}

#[test]
fn empty_against_empty_is_one_unchanged_empty_line() {
    let result = compute("", "", &defaults()).unwrap();
    assert_eq!(result.lines, vec![DiffLine::unchanged("", 1, 1)]);
    assert_eq!(result.stats, DiffStats::from_counts(0, 0, 1));
}

#[test]
fn pure_addition() {
    let result = compute("a", "a\nb", &defaults()).unwrap();
    assert_eq!(
        result.lines,
        vec![DiffLine::unchanged("a", 1, 1), DiffLine::added("b", 2)]
    );
    assert_eq!(
        result.stats,
        DiffStats {
            added: 1,
            removed: 0,
            unchanged: 1,
            total_left: 1,
            total_right: 2,
        }
    );
}

#[test]
fn pure_removal() {
    let result = compute("a\nb", "a", &defaults()).unwrap();
    assert_eq!(
        result.lines,
        vec![DiffLine::unchanged("a", 1, 1), DiffLine::removed("b", 2)]
    );
    assert_eq!(
        result.stats,
        DiffStats {
            added: 0,
            removed: 1,
            unchanged: 1,
            total_left: 2,
            total_right: 1,
        }
    );
}

#[test]
fn single_line_modification_is_highlighted() {
    let result = compute("cat", "car", &defaults()).unwrap();
    assert_eq!(result.lines.len(), 2);

    let removed = &result.lines[0];
    let added = &result.lines[1];
    assert_eq!(removed.kind, ChangeKind::Remove);
    assert_eq!(removed.content, "cat");
    assert_eq!(added.kind, ChangeKind::Add);
    assert_eq!(added.content, "car");

    assert_eq!(
        removed.inline_changes.as_deref(),
        Some(
            &[
                CharChange::new(ChangeKind::Unchanged, "ca"),
                CharChange::new(ChangeKind::Remove, "t"),
            ][..]
        )
    );
    assert_eq!(
        added.inline_changes.as_deref(),
        Some(
            &[
                CharChange::new(ChangeKind::Unchanged, "ca"),
                CharChange::new(ChangeKind::Add, "r"),
            ][..]
        )
    );
}

#[test]
fn ignore_case_reports_left_casing() {
    let opts = defaults().with_ignore_case(true);
    let result = compute("Hello", "hello", &opts).unwrap();
    assert_eq!(result.lines, vec![DiffLine::unchanged("Hello", 1, 1)]);
}

#[test]
fn ignore_whitespace_matches_reflowed_lines() {
    let opts = defaults().with_ignore_whitespace(true);
    let result = compute("let  x =\t1;", "let x = 1;", &opts).unwrap();
    assert!(result.is_identical());
    assert_eq!(result.lines[0].content, "let  x =\t1;");
}

#[test]
fn trailing_newline_difference_is_invisible_at_line_granularity() {
    let result = compute("a\nb\n", "a\nb", &defaults()).unwrap();
    assert!(result.is_identical());
}

#[test]
fn mixed_edit_keeps_both_counters() {
    let left = "one\ntwo\nthree\nfour\n";
    let right = "zero\none\nthree\nfour\nfive\n";
    let result = compute(left, right, &defaults()).unwrap();

    let rendered: Vec<String> = result
        .lines
        .iter()
        .map(|l| {
            format!(
                "{}{} {:?} {:?}",
                l.kind.marker(),
                l.content,
                l.left_line_number,
                l.right_line_number
            )
        })
        .collect();
    assert_eq!(
        rendered,
        vec![
            "+zero None Some(1)",
            " one Some(1) Some(2)",
            "-two Some(2) None",
            " three Some(3) Some(3)",
            " four Some(4) Some(4)",
            "+five None Some(5)",
        ]
    );
    assert_eq!(result.stats, DiffStats::from_counts(2, 1, 3));
}

#[test]
fn word_granularity_counts_words() {
    let opts = DiffOptions::new(Granularity::Word);
    let result = compute("the cat sat", "the dog sat down", &opts).unwrap();
    assert_eq!(result.stats, DiffStats::from_counts(2, 1, 2));
    assert_eq!(result.stats.total_left, 3);
    assert_eq!(result.stats.total_right, 4);
}

#[test]
fn character_granularity_handles_unicode() {
    let opts = DiffOptions::new(Granularity::Character);
    let result = compute("crème", "creme", &opts).unwrap();
    assert_eq!(result.stats, DiffStats::from_counts(1, 1, 4));
    let removed: Vec<_> = result
        .changes()
        .filter(|l| l.kind == ChangeKind::Remove)
        .map(|l| l.content.as_str())
        .collect();
    assert_eq!(removed, vec!["è"]);
}

#[test]
fn too_large_is_distinguishable() {
    let engine = DiffEngine::new(Limits {
        max_edit_distance: Some(2),
        ..Default::default()
    });
    let err = engine
        .compute("a\nb\nc\nd", "w\nx\ny\nz", &defaults())
        .unwrap_err();
    assert!(err.is_too_large());
    assert!(matches!(
        err,
        DiffError::TooLarge {
            kind: LimitKind::EditDistance,
            ..
        }
    ));
}
