use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline stage boundaries at which progress can be observed.
///
/// The engine never yields inside a stage; observers are called between
/// stages only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Normalized,
    Tokenized,
    EditScript,
    LinesBuilt,
    InlineAnnotated,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 5] = [
        Stage::Normalized,
        Stage::Tokenized,
        Stage::EditScript,
        Stage::LinesBuilt,
        Stage::InlineAnnotated,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normalized => "normalized",
            Self::Tokenized => "tokenized",
            Self::EditScript => "edit-script",
            Self::LinesBuilt => "lines-built",
            Self::InlineAnnotated => "inline-annotated",
        };
        f.write_str(s)
    }
}
