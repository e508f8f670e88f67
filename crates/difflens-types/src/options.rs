use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// The unit of comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Line,
    Word,
    #[serde(alias = "char")]
    Character,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Word => "word",
            Self::Character => "character",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = DiffError;

    /// Unknown values are rejected, never mapped to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" | "lines" => Ok(Self::Line),
            "word" | "words" => Ok(Self::Word),
            "char" | "chars" | "character" | "characters" => Ok(Self::Character),
            other => Err(DiffError::InvalidOptions(format!(
                "unknown granularity: {other:?}"
            ))),
        }
    }
}

/// Options for a single diff computation. Immutable once the computation
/// starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    pub granularity: Granularity,
    /// Treat every run of whitespace as a single space when matching tokens.
    /// Leading and trailing runs still count as one space.
    pub ignore_whitespace: bool,
    /// Match tokens case-insensitively.
    pub ignore_case: bool,
    /// Strip trailing whitespace from every line before tokenizing.
    pub trim_trailing_whitespace: bool,
    /// Drop lines whose trimmed content is empty before tokenizing.
    pub ignore_blank_lines: bool,
}

impl DiffOptions {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            ..Default::default()
        }
    }

    pub fn with_ignore_whitespace(mut self, on: bool) -> Self {
        self.ignore_whitespace = on;
        self
    }

    pub fn with_ignore_case(mut self, on: bool) -> Self {
        self.ignore_case = on;
        self
    }

    pub fn with_trim_trailing_whitespace(mut self, on: bool) -> Self {
        self.trim_trailing_whitespace = on;
        self
    }

    pub fn with_ignore_blank_lines(mut self, on: bool) -> Self {
        self.ignore_blank_lines = on;
        self
    }

    /// Returns `true` if the normalizer would change any input.
    pub fn normalizes(&self) -> bool {
        self.trim_trailing_whitespace || self.ignore_blank_lines
    }
}

/// Resource ceilings for one computation.
///
/// Crossing any of them fails the computation with
/// [`DiffError::TooLarge`] instead of producing a truncated result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum byte length of each input side.
    pub max_input_bytes: usize,
    /// Maximum number of tokens on each side.
    pub max_tokens: usize,
    /// Maximum edit distance the search may explore. `None` means the
    /// search always runs to completion.
    pub max_edit_distance: Option<usize>,
    /// Paired lines longer than this (in chars) are left without inline
    /// highlights.
    pub max_inline_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: 32 * 1024 * 1024,
            max_tokens: 2_000_000,
            max_edit_distance: None,
            max_inline_chars: 10_000,
        }
    }
}

impl Limits {
    /// No ceilings at all.
    pub fn unbounded() -> Self {
        Self {
            max_input_bytes: usize::MAX,
            max_tokens: usize::MAX,
            max_edit_distance: None,
            max_inline_chars: usize::MAX,
        }
    }

    /// Reject limits that would make every computation fail.
    pub fn validate(&self) -> Result<(), DiffError> {
        if self.max_input_bytes == 0 {
            return Err(DiffError::InvalidOptions(
                "max_input_bytes must be greater than zero".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(DiffError::InvalidOptions(
                "max_tokens must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
