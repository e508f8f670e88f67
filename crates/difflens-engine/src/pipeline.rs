//! The end-to-end computation: normalize, tokenize, edit script, line
//! model, inline highlights, statistics.

use tracing::debug;

use difflens_types::{
    DiffError, DiffOptions, DiffResult, EngineResult, Granularity, LimitKind, Limits, Stage,
};

use crate::inline::annotate_inline;
use crate::lines::build_lines;
use crate::myers::diff_bounded;
use crate::normalize::normalize_lines;
use crate::stats::aggregate;
use crate::tokenize::tokenize_lines;

/// Receives a notification after each pipeline stage completes.
pub trait StageObserver {
    fn on_stage(&mut self, stage: Stage);

    /// Polled after every notification; returning `true` abandons the
    /// computation with [`DiffError::Cancelled`].
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F: FnMut(Stage)> StageObserver for F {
    fn on_stage(&mut self, stage: Stage) {
        self(stage)
    }
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn on_stage(&mut self, _stage: Stage) {}
}

/// Stateless diff engine bound to a set of resource limits.
///
/// Holds no state between calls; one engine may be shared freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiffEngine {
    limits: Limits,
}

impl DiffEngine {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Diff `left` against `right`.
    pub fn compute(&self, left: &str, right: &str, options: &DiffOptions) -> EngineResult<DiffResult> {
        self.compute_observed(left, right, options, &mut NoopObserver)
    }

    /// Diff `left` against `right`, notifying `observer` between stages.
    ///
    /// Limits are checked before the first stage that depends on them; a
    /// computation that crosses one fails with [`DiffError::TooLarge`].
    pub fn compute_observed(
        &self,
        left: &str,
        right: &str,
        options: &DiffOptions,
        observer: &mut dyn StageObserver,
    ) -> EngineResult<DiffResult> {
        self.limits.validate()?;
        check(LimitKind::InputBytes, left.len(), self.limits.max_input_bytes)?;
        check(LimitKind::InputBytes, right.len(), self.limits.max_input_bytes)?;

        let left_lines = normalize_lines(left, options);
        let right_lines = normalize_lines(right, options);
        advance(observer, Stage::Normalized)?;

        let left_tokens = tokenize_lines(&left_lines, options.granularity);
        let right_tokens = tokenize_lines(&right_lines, options.granularity);
        check(LimitKind::Tokens, left_tokens.len(), self.limits.max_tokens)?;
        check(LimitKind::Tokens, right_tokens.len(), self.limits.max_tokens)?;
        debug!(
            granularity = %options.granularity,
            left_tokens = left_tokens.len(),
            right_tokens = right_tokens.len(),
            "tokenized"
        );
        advance(observer, Stage::Tokenized)?;

        let script = diff_bounded(
            &left_tokens,
            &right_tokens,
            options,
            self.limits.max_edit_distance,
        )?;
        debug!(edit_distance = script.edit_distance(), "edit script computed");
        advance(observer, Stage::EditScript)?;

        let mut lines = build_lines(script.ops());
        advance(observer, Stage::LinesBuilt)?;

        // Character entries are single scalars; there is nothing to highlight.
        if options.granularity != Granularity::Character {
            let pairs = annotate_inline(&mut lines, options, self.limits.max_inline_chars);
            debug!(pairs, "inline highlights attached");
        }
        advance(observer, Stage::InlineAnnotated)?;

        let stats = aggregate(&lines);
        debug!(
            added = stats.added,
            removed = stats.removed,
            unchanged = stats.unchanged,
            "diff computed"
        );
        Ok(DiffResult { lines, stats })
    }
}

/// Diff `left` against `right` with default limits.
pub fn compute(left: &str, right: &str, options: &DiffOptions) -> EngineResult<DiffResult> {
    DiffEngine::default().compute(left, right, options)
}

fn advance(observer: &mut dyn StageObserver, stage: Stage) -> EngineResult<()> {
    observer.on_stage(stage);
    if observer.is_cancelled() {
        debug!(%stage, "computation cancelled");
        return Err(DiffError::Cancelled);
    }
    Ok(())
}

fn check(kind: LimitKind, actual: usize, limit: usize) -> EngineResult<()> {
    if actual > limit {
        return Err(DiffError::TooLarge { kind, actual, limit });
    }
    Ok(())
}
