//! Property tests over random inputs and option combinations.

use proptest::prelude::*;

use difflens_engine::{compute, diff, diff_bounded, normalize, normalize_lines, tokenize, tokenize_lines};
use difflens_types::{ChangeKind, DiffOptions, EditOp, Granularity, Token};

fn granularity() -> impl Strategy<Value = Granularity> {
    prop_oneof![
        Just(Granularity::Line),
        Just(Granularity::Word),
        Just(Granularity::Character),
    ]
}

fn options() -> impl Strategy<Value = DiffOptions> {
    (
        granularity(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(granularity, ws, case, trim, blank)| DiffOptions {
            granularity,
            ignore_whitespace: ws,
            ignore_case: case,
            trim_trailing_whitespace: trim,
            ignore_blank_lines: blank,
        })
}

fn text() -> impl Strategy<Value = String> {
    "[abAB \t\n]{0,40}"
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(Token::text).collect()
}

fn lcs_len(a: &[&str], b: &[&str]) -> usize {
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }
    dp[a.len()][b.len()]
}

proptest! {
    #[test]
    fn totals_always_match_counts(left in text(), right in text(), opts in options()) {
        let result = compute(&left, &right, &opts).unwrap();
        prop_assert!(result.stats.is_consistent());
        prop_assert_eq!(result.stats.added + result.stats.removed + result.stats.unchanged, result.lines.len());
    }

    #[test]
    fn every_line_is_well_formed(left in text(), right in text(), opts in options()) {
        let result = compute(&left, &right, &opts).unwrap();
        for line in &result.lines {
            prop_assert!(line.is_well_formed(), "{:?}", line);
        }
    }

    #[test]
    fn script_reconstructs_both_sides(left in text(), right in text(), opts in options()) {
        let l = tokenize_lines(&normalize_lines(&left, &opts), opts.granularity);
        let r = tokenize_lines(&normalize_lines(&right, &opts), opts.granularity);
        let script = diff(&l, &r, &opts);

        let left_side: Vec<&Token> = script.iter().filter_map(EditOp::left).collect();
        let right_side: Vec<&Token> = script.iter().filter_map(EditOp::right).collect();
        prop_assert_eq!(left_side, l.iter().collect::<Vec<_>>());
        prop_assert_eq!(right_side, r.iter().collect::<Vec<_>>());
    }

    #[test]
    fn script_is_minimal(left in "[abc]{0,12}", right in "[abc]{0,12}") {
        let l = tokenize(&left, Granularity::Character);
        let r = tokenize(&right, Granularity::Character);
        let script = diff(&l, &r, &DiffOptions::default());
        let lcs = lcs_len(&texts(&l), &texts(&r));
        prop_assert_eq!(script.edit_distance(), l.len() + r.len() - 2 * lcs);
    }

    #[test]
    fn ceiling_rejects_exactly_the_scripts_over_it(left in "[abc]{0,12}", right in "[abc]{0,12}") {
        let l = tokenize(&left, Granularity::Character);
        let r = tokenize(&right, Granularity::Character);
        let d = diff(&l, &r, &DiffOptions::default()).edit_distance();
        let at = diff_bounded(&l, &r, &DiffOptions::default(), Some(d)).unwrap();
        prop_assert_eq!(at.edit_distance(), d);
        if d > 0 {
            prop_assert!(diff_bounded(&l, &r, &DiffOptions::default(), Some(d - 1)).is_err());
        }
    }

    #[test]
    fn agrees_with_reference_myers(left in "[abcd\n]{0,60}", right in "[abcd\n]{0,60}") {
        let l = tokenize(&left, Granularity::Line);
        let r = tokenize(&right, Granularity::Line);
        let ours = diff(&l, &r, &DiffOptions::default()).edit_distance();

        let ops = similar::capture_diff_slices(similar::Algorithm::Myers, &texts(&l), &texts(&r));
        let reference: usize = ops
            .iter()
            .map(|op| {
                let (tag, old, new) = op.as_tag_tuple();
                match tag {
                    similar::DiffTag::Equal => 0,
                    similar::DiffTag::Delete => old.len(),
                    similar::DiffTag::Insert => new.len(),
                    similar::DiffTag::Replace => old.len() + new.len(),
                }
            })
            .sum();
        prop_assert_eq!(ours, reference);
    }

    #[test]
    fn case_insensitive_script_is_minimal_over_keys(left in "[aAbB]{0,10}", right in "[aAbB]{0,10}") {
        let opts = DiffOptions::default().with_ignore_case(true);
        let l = tokenize(&left, Granularity::Character);
        let r = tokenize(&right, Granularity::Character);
        let script = diff(&l, &r, &opts);
        let lk = left.to_lowercase();
        let rk = right.to_lowercase();
        let lcs = lcs_len(
            &texts(&tokenize(&lk, Granularity::Character)),
            &texts(&tokenize(&rk, Granularity::Character)),
        );
        prop_assert_eq!(script.edit_distance(), l.len() + r.len() - 2 * lcs);
    }

    #[test]
    fn normalization_is_idempotent(input in text(), opts in options()) {
        let once = normalize(&input, &opts);
        prop_assert_eq!(normalize(&once, &opts), once);
    }

    #[test]
    fn normalized_lines_tokenize_like_normalized_text(input in text(), opts in options()) {
        let via_lines = tokenize_lines(&normalize_lines(&input, &opts), opts.granularity);
        let via_text = tokenize(&normalize(&input, &opts), opts.granularity);
        prop_assert_eq!(texts(&via_lines), texts(&via_text));
    }

    #[test]
    fn inline_spans_only_on_adjacent_pairs(left in text(), right in text(), opts in options()) {
        let result = compute(&left, &right, &opts).unwrap();
        let lines = &result.lines;
        for (i, line) in lines.iter().enumerate() {
            if line.inline_changes.is_none() {
                continue;
            }
            match line.kind {
                ChangeKind::Unchanged => prop_assert!(false, "unchanged line carries spans"),
                ChangeKind::Remove => {
                    prop_assert_eq!(lines.get(i + 1).map(|l| l.kind), Some(ChangeKind::Add));
                }
                ChangeKind::Add => {
                    prop_assert!(i > 0);
                    prop_assert_eq!(lines[i - 1].kind, ChangeKind::Remove);
                }
            }
        }
    }

    #[test]
    fn identity_has_no_changes(input in text(), granularity in granularity()) {
        let opts = DiffOptions::new(granularity);
        let result = compute(&input, &input, &opts).unwrap();
        prop_assert_eq!(result.stats.added, 0);
        prop_assert_eq!(result.stats.removed, 0);
        prop_assert_eq!(result.stats.unchanged, tokenize(&input, granularity).len());
    }
}
