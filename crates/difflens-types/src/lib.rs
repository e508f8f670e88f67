//! Foundation types for difflens.
//!
//! This crate holds the data model shared by the diff engine, the wire
//! protocol, and the worker transport. Every other difflens crate depends on
//! `difflens-types`.
//!
//! # Key Types
//!
//! - [`DiffOptions`] / [`Granularity`] / [`Limits`]: Immutable per-computation settings
//! - [`Token`]: Atomic comparison unit with its ordinal and originating line
//! - [`EditOp`]: Keep / Insert / Delete step of an edit script
//! - [`DiffLine`] / [`CharChange`]: Classified output entries with inline spans
//! - [`DiffStats`] / [`DiffResult`]: Aggregated summary and the final artifact
//! - [`Stage`]: Pipeline boundaries reported to progress observers
//! - [`DiffError`]: Error taxonomy (resource exhaustion, invalid options, internal)

pub mod error;
pub mod model;
pub mod options;
pub mod stage;
pub mod token;

pub use error::{DiffError, EngineResult, LimitKind};
pub use model::{ChangeKind, CharChange, DiffLine, DiffResult, DiffStats};
pub use options::{DiffOptions, Granularity, Limits};
pub use stage::Stage;
pub use token::{EditOp, Token};
