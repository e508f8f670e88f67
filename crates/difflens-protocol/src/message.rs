use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use difflens_types::{DiffError, DiffOptions, DiffResult, Stage};

pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

/// Caller-chosen identifier tying responses to the request that caused them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh, time-ordered id (UUID v7).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A self-contained unit of work: both texts and the options to diff them
/// with. Holds no references to caller state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRequest {
    pub request_id: RequestId,
    pub left: String,
    pub right: String,
    #[serde(default)]
    pub options: DiffOptions,
}

impl DiffRequest {
    /// Build a request with a generated id.
    pub fn new(left: impl Into<String>, right: impl Into<String>, options: DiffOptions) -> Self {
        Self {
            request_id: RequestId::generate(),
            left: left.into(),
            right: right.into(),
            options,
        }
    }

    pub fn with_id(mut self, request_id: impl Into<RequestId>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Combined size of both texts in bytes.
    pub fn input_bytes(&self) -> usize {
        self.left.len() + self.right.len()
    }
}

/// Why a request produced no result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    TooLarge,
    InvalidOptions,
    Internal,
    Cancelled,
}

impl From<&DiffError> for FailureKind {
    fn from(err: &DiffError) -> Self {
        match err {
            DiffError::TooLarge { .. } => Self::TooLarge,
            DiffError::InvalidOptions(_) => Self::InvalidOptions,
            DiffError::Internal(_) => Self::Internal,
            DiffError::Cancelled => Self::Cancelled,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TooLarge => "too large",
            Self::InvalidOptions => "invalid options",
            Self::Internal => "internal",
            Self::Cancelled => "cancelled",
        })
    }
}

/// Messages sent back for a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffResponse {
    Progress {
        request_id: RequestId,
        stage: Stage,
    },
    Completed {
        request_id: RequestId,
        result: DiffResult,
    },
    Failed {
        request_id: RequestId,
        failure: FailureKind,
        description: String,
    },
}

impl DiffResponse {
    pub fn failed(request_id: RequestId, err: &DiffError) -> Self {
        Self::Failed {
            request_id,
            failure: err.into(),
            description: err.to_string(),
        }
    }

    pub fn request_id(&self) -> &RequestId {
        match self {
            Self::Progress { request_id, .. }
            | Self::Completed { request_id, .. }
            | Self::Failed { request_id, .. } => request_id,
        }
    }

    /// Returns `true` for the last message a request will produce.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }

    pub fn type_tag(&self) -> u8 {
        match self {
            Self::Progress { .. } => 16,
            Self::Completed { .. } => 17,
            Self::Failed { .. } => 18,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Progress { .. } => "Progress",
            Self::Completed { .. } => "Completed",
            Self::Failed { .. } => "Failed",
        }
    }
}

/// Everything that travels over a framed worker connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Hello { version: u32 },
    Request(DiffRequest),
    /// Abandon whatever request is in flight; no result follows.
    Cancel,
    Response(DiffResponse),
}

impl Message {
    pub fn hello() -> Self {
        Self::Hello {
            version: PROTOCOL_VERSION,
        }
    }

    pub fn type_tag(&self) -> u8 {
        match self {
            Self::Hello { .. } => 1,
            Self::Request(_) => 2,
            Self::Cancel => 3,
            Self::Response(response) => response.type_tag(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Hello { .. } => "Hello",
            Self::Request(_) => "Request",
            Self::Cancel => "Cancel",
            Self::Response(response) => response.type_name(),
        }
    }

    /// Whether `tag` names any message type.
    pub fn is_known_tag(tag: u8) -> bool {
        matches!(tag, 1..=3 | 16..=18)
    }
}

impl From<DiffRequest> for Message {
    fn from(request: DiffRequest) -> Self {
        Self::Request(request)
    }
}

impl From<DiffResponse> for Message {
    fn from(response: DiffResponse) -> Self {
        Self::Response(response)
    }
}

/// Fail unless the peer speaks our protocol version.
pub fn check_version(remote: u32) -> crate::ProtocolResult<()> {
    if remote != PROTOCOL_VERSION {
        return Err(crate::ProtocolError::VersionMismatch {
            local: PROTOCOL_VERSION,
            remote,
        });
    }
    Ok(())
}
