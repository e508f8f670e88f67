//! Splitting text into comparison units.
//!
//! Every token records its ordinal within its own side and the line it came
//! from, so results at word or character granularity can still be traced
//! back to a source line.

use difflens_types::{Granularity, Token};

use crate::normalize::{split_lines, SourceLine};

/// Tokenize raw text at the given granularity.
///
/// - `Line`: one token per line; the empty segment after a final line
///   terminator is dropped, a trailing `\r` is stripped. The empty string is
///   one empty line.
/// - `Word`: whitespace-separated runs; separators are discarded.
/// - `Character`: one token per Unicode scalar value, line terminators
///   included.
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<Token> {
    tokenize_lines(&split_lines(text), granularity)
}

/// Tokenize already-split (and possibly normalized) lines, tagging tokens
/// with each line's original number.
pub fn tokenize_lines(lines: &[SourceLine<'_>], granularity: Granularity) -> Vec<Token> {
    let empty = [SourceLine { number: 1, text: "" }];
    let lines = if lines.is_empty() { &empty[..] } else { lines };

    match granularity {
        Granularity::Line => line_tokens(lines),
        Granularity::Word => word_tokens(lines),
        Granularity::Character => char_tokens(lines),
    }
}

fn line_tokens(lines: &[SourceLine<'_>]) -> Vec<Token> {
    let mut lines = lines;
    if let [rest @ .., last] = lines {
        if !rest.is_empty() && last.text.is_empty() {
            lines = rest;
        }
    }
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let text = line.text.strip_suffix('\r').unwrap_or(line.text);
            Token::new(text, i + 1, line.number)
        })
        .collect()
}

fn word_tokens(lines: &[SourceLine<'_>]) -> Vec<Token> {
    lines
        .iter()
        .flat_map(|line| line.text.split_whitespace().map(move |w| (w, line.number)))
        .enumerate()
        .map(|(i, (word, number))| Token::new(word, i + 1, number))
        .collect()
}

fn char_tokens(lines: &[SourceLine<'_>]) -> Vec<Token> {
    let last = lines.len() - 1;
    let mut tokens = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        for c in line.text.chars() {
            tokens.push(Token::new(c.to_string(), tokens.len() + 1, line.number));
        }
        if idx < last {
            tokens.push(Token::new("\n", tokens.len() + 1, line.number));
        }
    }
    tokens
}
