//! Background execution for difflens.
//!
//! Diff computations can take long enough to stall an interactive caller,
//! so they run on a worker that accepts requests, reports progress, and
//! answers with a result or a typed failure. Newer requests supersede older
//! ones.
//!
//! # Key Types
//!
//! - [`DiffWorker`]: latest-wins tokio worker running the engine on the blocking pool
//! - [`DiffSession`]: caller-side tracker of the latest request and last good result
//! - [`DiffConfig`] / [`WorkerConfig`]: `difflens.toml` settings
//! - [`serve`]: the worker over a framed byte stream

pub mod config;
pub mod error;
pub mod session;
pub mod stdio;
pub mod worker;

pub use config::{DiffConfig, WorkerConfig, CONFIG_FILE_NAME};
pub use error::{WorkerError, WorkerResult};
pub use session::{DiffSession, Failure};
pub use stdio::serve;
pub use worker::DiffWorker;
