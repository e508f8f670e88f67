//! Pre-diff text transforms.
//!
//! Trimming runs before blank-line removal so that a line holding only
//! trailing whitespace counts as blank.

use difflens_types::DiffOptions;

/// A line that survived normalization, tagged with its 1-based line number
/// in the original text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Split `text` on `\n`, keeping every segment (including the empty one
/// after a final terminator) with its line number.
pub fn split_lines(text: &str) -> Vec<SourceLine<'_>> {
    text.split('\n')
        .enumerate()
        .map(|(i, text)| SourceLine { number: i + 1, text })
        .collect()
}

/// Apply the normalization options line by line, keeping original line
/// numbers.
pub fn normalize_lines<'a>(text: &'a str, options: &DiffOptions) -> Vec<SourceLine<'a>> {
    let mut lines = split_lines(text);
    if options.trim_trailing_whitespace {
        for line in &mut lines {
            line.text = line.text.trim_end();
        }
    }
    if options.ignore_blank_lines {
        lines.retain(|line| !line.text.trim().is_empty());
    }
    lines
}

/// Apply the normalization options and join the result back into text.
///
/// With neither option set the input is returned unchanged.
pub fn normalize(text: &str, options: &DiffOptions) -> String {
    if !options.normalizes() {
        return text.to_owned();
    }
    let lines = normalize_lines(text, options);
    let mut out = String::with_capacity(text.len());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trim() -> DiffOptions {
        DiffOptions::default().with_trim_trailing_whitespace(true)
    }

    fn blank() -> DiffOptions {
        DiffOptions::default().with_ignore_blank_lines(true)
    }

    fn both() -> DiffOptions {
        trim().with_ignore_blank_lines(true)
    }

    #[test]
    fn no_options_is_identity() {
        let text = "a  \n\n b\r\n";
        assert_eq!(normalize(text, &DiffOptions::default()), text);
    }

    #[test]
    fn trims_trailing_whitespace_per_line() {
        assert_eq!(normalize("a  \nb\t\nc", &trim()), "a\nb\nc");
    }

    #[test]
    fn trimming_keeps_leading_whitespace_and_final_newline() {
        assert_eq!(normalize("  a \n", &trim()), "  a\n");
    }

    #[test]
    fn trimming_folds_crlf() {
        assert_eq!(normalize("a\r\nb\r\n", &trim()), "a\nb\n");
    }

    #[test]
    fn drops_blank_lines() {
        assert_eq!(normalize("a\n\n  \nb\n", &blank()), "a\nb");
    }

    #[test]
    fn whitespace_only_line_is_blank_after_trim() {
        let lines = normalize_lines("a\n   \nb", &both());
        let texts: Vec<_> = lines.iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn original_line_numbers_survive() {
        let lines = normalize_lines("a\n\n\nb\n\nc", &blank());
        let numbers: Vec<_> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 4, 6]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize("", &both()), "");
        assert_eq!(normalize("", &trim()), "");
    }

    #[test]
    fn all_blank_input_becomes_empty() {
        assert_eq!(normalize("\n \n\t\n", &blank()), "");
    }

    #[test]
    fn normalization_is_idempotent_on_samples() {
        let samples = ["a \r\n\r\n b\t\n", "\n\n", "x", " \n", "a\r", ""];
        for opts in [trim(), blank(), both()] {
            for s in samples {
                let once = normalize(s, &opts);
                assert_eq!(normalize(&once, &opts), once, "sample {s:?}");
            }
        }
    }
}
