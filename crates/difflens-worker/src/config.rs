use std::path::Path;

use serde::{Deserialize, Serialize};

use difflens_engine::DiffEngine;
use difflens_protocol::{DiffCodec, MAX_FRAME_PAYLOAD, MAX_MESSAGE_SIZE};
use difflens_types::{DiffOptions, Limits};

use crate::error::{WorkerError, WorkerResult};

/// Default name of the configuration file looked up in the working
/// directory.
pub const CONFIG_FILE_NAME: &str = "difflens.toml";

/// Settings for a background worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Bound of both the command and the response channel.
    pub channel_capacity: usize,
    /// Largest framed payload accepted or produced in stdio mode.
    pub max_message_size: usize,
    /// Whether `Progress` messages are sent between stages.
    pub emit_progress: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            max_message_size: MAX_MESSAGE_SIZE,
            emit_progress: true,
        }
    }
}

impl WorkerConfig {
    pub fn codec(&self) -> DiffCodec {
        DiffCodec::new(self.max_message_size)
    }

    pub fn validate(&self) -> WorkerResult<()> {
        if self.channel_capacity == 0 {
            return Err(WorkerError::Config("channel_capacity must be at least 1".into()));
        }
        if self.max_message_size == 0 {
            return Err(WorkerError::Config("max_message_size must be at least 1".into()));
        }
        if self.max_message_size > MAX_FRAME_PAYLOAD {
            return Err(WorkerError::Config(format!(
                "max_message_size must be at most {MAX_FRAME_PAYLOAD}"
            )));
        }
        Ok(())
    }
}

/// Everything a `difflens.toml` file can set.
///
/// ```toml
/// [options]
/// granularity = "word"
/// ignore_case = true
///
/// [limits]
/// max_tokens = 500000
///
/// [worker]
/// emit_progress = false
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub options: DiffOptions,
    pub limits: Limits,
    pub worker: WorkerConfig,
}

impl DiffConfig {
    pub fn from_toml_str(s: &str) -> WorkerResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| WorkerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> WorkerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| match e {
            WorkerError::Config(msg) => WorkerError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn to_toml_string(&self) -> WorkerResult<String> {
        toml::to_string_pretty(self).map_err(|e| WorkerError::Config(e.to_string()))
    }

    pub fn validate(&self) -> WorkerResult<()> {
        self.limits
            .validate()
            .map_err(|e| WorkerError::Config(e.to_string()))?;
        self.worker.validate()
    }

    pub fn engine(&self) -> DiffEngine {
        DiffEngine::new(self.limits)
    }
}
