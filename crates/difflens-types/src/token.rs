//! Tokens and edit operations.
//!
//! A [`Token`] is created once by the tokenizer and only ever borrowed
//! afterwards; [`EditOp`]s reference tokens rather than copying them so an
//! edit script over large inputs stays cheap.

use serde::{Deserialize, Serialize};

/// An indivisible comparison unit: a line, a word, or a single character.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    text: String,
    ordinal: usize,
    line: usize,
}

impl Token {
    /// Create a token. `ordinal` and `line` are both 1-based.
    pub fn new(text: impl Into<String>, ordinal: usize, line: usize) -> Self {
        Self {
            text: text.into(),
            ordinal,
            line,
        }
    }

    /// The original token text, never normalized for comparison.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based position of this unit within its own side.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// 1-based line the unit came from. Equal to the ordinal at line
    /// granularity.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// One step of an edit script from the left token sequence to the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOp<'a> {
    /// Both sides hold an equivalent token.
    Keep { left: &'a Token, right: &'a Token },
    /// The token exists only on the right.
    Insert(&'a Token),
    /// The token exists only on the left.
    Delete(&'a Token),
}

impl<'a> EditOp<'a> {
    /// The left token consumed by this op, if any.
    pub fn left(&self) -> Option<&'a Token> {
        match *self {
            Self::Keep { left, .. } | Self::Delete(left) => Some(left),
            Self::Insert(_) => None,
        }
    }

    /// The right token consumed by this op, if any.
    pub fn right(&self) -> Option<&'a Token> {
        match *self {
            Self::Keep { right, .. } | Self::Insert(right) => Some(right),
            Self::Delete(_) => None,
        }
    }

    /// Returns `true` for inserts and deletes.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Keep { .. })
    }
}
