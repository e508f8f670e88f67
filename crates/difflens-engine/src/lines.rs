//! Conversion of an edit script into the classified change model.

use difflens_types::{DiffLine, EditOp};

/// Walk `ops` in order, emitting one [`DiffLine`] per op with independent
/// left and right counters starting at 1.
///
/// Kept entries report the left token's text, so original casing and
/// spacing of the left side survive option-aware matching. At word and
/// character granularity the numbers are unit ordinals rather than source
/// lines.
pub fn build_lines(ops: &[EditOp<'_>]) -> Vec<DiffLine> {
    let mut lines = Vec::with_capacity(ops.len());
    let mut left_no = 1;
    let mut right_no = 1;

    for op in ops {
        match *op {
            EditOp::Keep { left, .. } => {
                lines.push(DiffLine::unchanged(left.text(), left_no, right_no));
                left_no += 1;
                right_no += 1;
            }
            EditOp::Delete(token) => {
                lines.push(DiffLine::removed(token.text(), left_no));
                left_no += 1;
            }
            EditOp::Insert(token) => {
                lines.push(DiffLine::added(token.text(), right_no));
                right_no += 1;
            }
        }
    }
    lines
}
