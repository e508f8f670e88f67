//! Diff engine for difflens.
//!
//! Computes a structured difference between two texts at line, word, or
//! character granularity. The engine is a pure, synchronous pipeline:
//!
//! 1. [`normalize`]: trailing-whitespace trimming and blank-line removal
//! 2. [`tokenize`]: split into comparison units, keeping source lines
//! 3. [`myers`]: minimal edit script over option-aware comparison keys
//! 4. [`lines`]: classified `unchanged` / `add` / `remove` entries
//! 5. [`inline`]: character spans for adjacent remove/add pairs
//! 6. [`stats`]: counts and side totals
//!
//! # Quick Start
//!
//! ```rust
//! use difflens_engine::compute;
//! use difflens_types::{ChangeKind, DiffOptions};
//!
//! let result = compute("a\nb\n", "a\nc\n", &DiffOptions::default()).unwrap();
//! assert_eq!(result.stats.added, 1);
//! assert_eq!(result.stats.removed, 1);
//! assert_eq!(result.lines[1].kind, ChangeKind::Remove);
//! ```

pub mod inline;
pub mod lines;
pub mod myers;
pub mod normalize;
pub mod pipeline;
pub mod stats;
pub mod tokenize;

pub use inline::{annotate_inline, annotated, char_changes};
pub use lines::build_lines;
pub use myers::{comparison_key, diff, diff_bounded, EditScript};
pub use normalize::{normalize, normalize_lines, split_lines, SourceLine};
pub use pipeline::{compute, DiffEngine, NoopObserver, StageObserver};
pub use stats::aggregate;
pub use tokenize::{tokenize, tokenize_lines};
