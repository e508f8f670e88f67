//! Foreground bookkeeping for a stream of diff requests.

use tracing::debug;

use difflens_protocol::{DiffRequest, DiffResponse, FailureKind, RequestId};
use difflens_types::{DiffOptions, DiffResult, Stage};

/// The most recent failure reported for the latest request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub description: String,
}

/// Tracks which request is current and what the caller should display.
///
/// Only responses for the latest request are accepted. A failure never
/// clears the last good result, so a caller can keep showing it alongside
/// the error.
#[derive(Debug, Default)]
pub struct DiffSession {
    latest: Option<RequestId>,
    pending: bool,
    stage: Option<Stage>,
    result: Option<DiffResult>,
    failure: Option<Failure>,
}

impl DiffSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request for `left` and `right` and make it the latest.
    pub fn begin(
        &mut self,
        left: impl Into<String>,
        right: impl Into<String>,
        options: DiffOptions,
    ) -> DiffRequest {
        let request = DiffRequest::new(left, right, options);
        self.track(&request);
        request
    }

    /// Make `request` the latest; responses for earlier ones are ignored
    /// from now on.
    pub fn track(&mut self, request: &DiffRequest) {
        self.latest = Some(request.request_id.clone());
        self.pending = true;
        self.stage = None;
    }

    /// Forget the latest request without replacing it.
    pub fn cancel(&mut self) {
        self.latest = None;
        self.pending = false;
        self.stage = None;
    }

    /// Apply a response. Returns `false` if it was stale and ignored.
    pub fn apply(&mut self, response: DiffResponse) -> bool {
        if self.latest.as_ref() != Some(response.request_id()) {
            debug!(request_id = %response.request_id(), "ignoring stale response");
            return false;
        }
        match response {
            DiffResponse::Progress { stage, .. } => self.stage = Some(stage),
            DiffResponse::Completed { result, .. } => {
                self.result = Some(result);
                self.failure = None;
                self.pending = false;
                self.stage = None;
            }
            DiffResponse::Failed {
                failure,
                description,
                ..
            } => {
                self.failure = Some(Failure {
                    kind: failure,
                    description,
                });
                self.pending = false;
                self.stage = None;
            }
        }
        true
    }

    pub fn latest(&self) -> Option<&RequestId> {
        self.latest.as_ref()
    }

    /// Whether the latest request has yet to produce a terminal response.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Last stage reported for the latest request while it is pending.
    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// The most recent successful result, possibly from an older request.
    pub fn result(&self) -> Option<&DiffResult> {
        self.result.as_ref()
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use difflens_types::{DiffLine, DiffStats};

    fn result(content: &str) -> DiffResult {
        DiffResult {
            lines: vec![DiffLine::unchanged(content, 1, 1)],
            stats: DiffStats::from_counts(0, 0, 1),
        }
    }

    #[test]
    fn accepts_only_latest() {
        let mut session = DiffSession::new();
        let first = session.begin("a", "a", DiffOptions::default());
        let second = session.begin("b", "b", DiffOptions::default());
        assert_eq!(session.latest(), Some(&second.request_id));

        assert!(!session.apply(DiffResponse::Completed {
            request_id: first.request_id,
            result: result("a"),
        }));
        assert!(session.result().is_none());
        assert!(session.is_pending());

        assert!(session.apply(DiffResponse::Progress {
            request_id: second.request_id.clone(),
            stage: Stage::EditScript,
        }));
        assert_eq!(session.stage(), Some(Stage::EditScript));

        assert!(session.apply(DiffResponse::Completed {
            request_id: second.request_id,
            result: result("b"),
        }));
        assert_eq!(session.result(), Some(&result("b")));
        assert!(!session.is_pending());
        assert_eq!(session.stage(), None);
    }

    #[test]
    fn failure_keeps_last_good_result() {
        let mut session = DiffSession::new();
        let ok = session.begin("a", "a", DiffOptions::default());
        session.apply(DiffResponse::Completed {
            request_id: ok.request_id,
            result: result("a"),
        });

        let bad = session.begin("huge", "huge", DiffOptions::default());
        assert!(session.apply(DiffResponse::Failed {
            request_id: bad.request_id,
            failure: FailureKind::TooLarge,
            description: "input too large".into(),
        }));
        assert_eq!(session.result(), Some(&result("a")));
        assert_eq!(session.failure().map(|f| f.kind), Some(FailureKind::TooLarge));

        let retry = session.begin("a", "b", DiffOptions::default());
        session.apply(DiffResponse::Completed {
            request_id: retry.request_id,
            result: result("b"),
        });
        assert!(session.failure().is_none());
    }

    #[test]
    fn cancel_ignores_everything_after() {
        let mut session = DiffSession::new();
        let request = session.begin("a", "b", DiffOptions::default());
        session.cancel();
        assert!(!session.apply(DiffResponse::Completed {
            request_id: request.request_id,
            result: result("a"),
        }));
        assert!(!session.is_pending());
        assert!(session.result().is_none());
    }
}
