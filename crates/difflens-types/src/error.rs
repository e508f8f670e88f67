use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which resource ceiling a computation ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    /// Byte length of one input side.
    InputBytes,
    /// Number of tokens produced for one input side.
    Tokens,
    /// Edit distance explored by the edit-script search.
    EditDistance,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InputBytes => "input bytes",
            Self::Tokens => "tokens",
            Self::EditDistance => "edit distance",
        };
        f.write_str(s)
    }
}

/// Errors produced by a diff computation.
///
/// Well-formed inputs never fail: every pair of strings is diffable. The
/// only failures are resource exhaustion, options that could not be
/// validated before any work began, and cancellation requested by the
/// caller.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    #[error("input too large: {kind} {actual} exceeds limit {limit}")]
    TooLarge {
        kind: LimitKind,
        actual: usize,
        limit: usize,
    },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("computation cancelled")]
    Cancelled,
}

impl DiffError {
    /// Returns `true` for resource exhaustion, which a user can retry with
    /// smaller input.
    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::TooLarge { .. })
    }
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, DiffError>;
