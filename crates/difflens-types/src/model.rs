//! Output model: classified lines, inline spans, and statistics.

use serde::{Deserialize, Serialize};

/// Classification of a line or a character span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Add,
    Remove,
    Unchanged,
}

impl ChangeKind {
    /// Single-character marker used by unified renderings.
    pub fn marker(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Remove => '-',
            Self::Unchanged => ' ',
        }
    }
}

/// A contiguous span inside a paired modification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharChange {
    pub kind: ChangeKind,
    pub value: String,
}

impl CharChange {
    pub fn new(kind: ChangeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// One classified entry of the change model.
///
/// `Unchanged` carries both line numbers, `Add` only the right one and
/// `Remove` only the left one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: ChangeKind,
    pub content: String,
    #[serde(default)]
    pub left_line_number: Option<usize>,
    #[serde(default)]
    pub right_line_number: Option<usize>,
    #[serde(default)]
    pub inline_changes: Option<Vec<CharChange>>,
}

impl DiffLine {
    pub fn unchanged(content: impl Into<String>, left: usize, right: usize) -> Self {
        Self {
            kind: ChangeKind::Unchanged,
            content: content.into(),
            left_line_number: Some(left),
            right_line_number: Some(right),
            inline_changes: None,
        }
    }

    pub fn added(content: impl Into<String>, right: usize) -> Self {
        Self {
            kind: ChangeKind::Add,
            content: content.into(),
            left_line_number: None,
            right_line_number: Some(right),
            inline_changes: None,
        }
    }

    pub fn removed(content: impl Into<String>, left: usize) -> Self {
        Self {
            kind: ChangeKind::Remove,
            content: content.into(),
            left_line_number: Some(left),
            right_line_number: None,
            inline_changes: None,
        }
    }

    pub fn is_change(&self) -> bool {
        self.kind != ChangeKind::Unchanged
    }

    /// Returns `true` if the line numbers present match its kind.
    pub fn is_well_formed(&self) -> bool {
        match self.kind {
            ChangeKind::Unchanged => {
                self.left_line_number.is_some()
                    && self.right_line_number.is_some()
                    && self.inline_changes.is_none()
            }
            ChangeKind::Add => self.left_line_number.is_none() && self.right_line_number.is_some(),
            ChangeKind::Remove => {
                self.left_line_number.is_some() && self.right_line_number.is_none()
            }
        }
    }
}

/// Summary counts over a change model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub total_left: usize,
    pub total_right: usize,
}

impl DiffStats {
    /// Build stats from the three counts; totals are always derived.
    pub fn from_counts(added: usize, removed: usize, unchanged: usize) -> Self {
        Self {
            added,
            removed,
            unchanged,
            total_left: removed + unchanged,
            total_right: added + unchanged,
        }
    }

    /// Number of changed entries on either side.
    pub fn changed(&self) -> usize {
        self.added + self.removed
    }

    /// Returns `true` if the totals agree with the counts.
    pub fn is_consistent(&self) -> bool {
        self.total_left == self.removed + self.unchanged
            && self.total_right == self.added + self.unchanged
    }
}

/// The sole output artifact of a computation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub lines: Vec<DiffLine>,
    pub stats: DiffStats,
}

impl DiffResult {
    /// Returns `true` if nothing was added or removed.
    pub fn is_identical(&self) -> bool {
        self.stats.changed() == 0
    }

    /// Iterate over added and removed lines only.
    pub fn changes(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines.iter().filter(|l| l.is_change())
    }
}
