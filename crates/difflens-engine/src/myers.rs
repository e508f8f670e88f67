//! Minimal edit scripts between token sequences.
//!
//! Implements Myers' O(N·D) shortest-edit-script search in its linear-space
//! form: common prefix and suffix are stripped, then the middle snake of the
//! remaining region is found by running the greedy search from both ends
//! until the two frontiers overlap, and each half is solved recursively.
//!
//! Tokens are compared through interned comparison keys, so the inner loop
//! compares integers. The keys honour `ignore_whitespace` and `ignore_case`;
//! the tokens referenced by the resulting [`EditOp`]s keep their original
//! text.
//!
//! # Ordering
//!
//! - Common prefixes are matched eagerly at every recursion level, so earlier
//!   left tokens pair with earlier right tokens.
//! - Within a contiguous run of changes, every delete precedes every insert.
//!   A one-line modification therefore always reads as remove-then-add.
//!
//! # Limitations
//!
//! Cost grows with the edit distance: two large, fully disjoint inputs take
//! time proportional to their combined length squared. There is no
//! heuristic fallback; callers bound the work with an edit-distance ceiling
//! instead.

use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;

use difflens_types::{DiffError, DiffOptions, EditOp, EngineResult, LimitKind, Token};

/// An ordered edit script from a left token sequence to a right one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditScript<'a> {
    ops: Vec<EditOp<'a>>,
}

impl<'a> EditScript<'a> {
    pub fn ops(&self) -> &[EditOp<'a>] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<EditOp<'a>> {
        self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp<'a>> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn insertions(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Insert(_)))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Delete(_)))
            .count()
    }

    pub fn keeps(&self) -> usize {
        self.ops.len() - self.edit_distance()
    }

    /// Number of inserts plus deletes.
    pub fn edit_distance(&self) -> usize {
        self.ops.iter().filter(|op| op.is_change()).count()
    }
}

impl<'s, 'a> IntoIterator for &'s EditScript<'a> {
    type Item = &'s EditOp<'a>;
    type IntoIter = std::slice::Iter<'s, EditOp<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// The string two tokens are compared by.
///
/// With `ignore_whitespace`, every whitespace run (leading and trailing ones
/// included) collapses to one space. With `ignore_case`, the key is
/// lowercased.
pub fn comparison_key<'t>(text: &'t str, options: &DiffOptions) -> Cow<'t, str> {
    let mut key = Cow::Borrowed(text);
    if options.ignore_whitespace {
        key = Cow::Owned(collapse_whitespace(&key));
    }
    if options.ignore_case {
        key = Cow::Owned(key.to_lowercase());
    }
    key
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Compute a minimal edit script between `left` and `right`.
pub fn diff<'a>(left: &'a [Token], right: &'a [Token], options: &DiffOptions) -> EditScript<'a> {
    // This never fails since there is no edit-distance ceiling.
    diff_bounded(left, right, options, None).unwrap_or_default()
}

/// Compute a minimal edit script, failing with [`DiffError::TooLarge`] as
/// soon as the edit distance is known to exceed `max_edit_distance`.
pub fn diff_bounded<'a>(
    left: &'a [Token],
    right: &'a [Token],
    options: &DiffOptions,
    max_edit_distance: Option<usize>,
) -> EngineResult<EditScript<'a>> {
    let (old, new) = intern(left, right, options);

    let mut search = Search {
        old: &old,
        new: &new,
        max_edit_distance,
        steps: Vec::with_capacity(old.len().max(new.len())),
    };
    search.conquer(0..old.len(), 0..new.len())?;

    // Each sub-search only bounds its own region; the sum may still be over.
    if let Some(limit) = max_edit_distance {
        let distance = search
            .steps
            .iter()
            .filter(|step| !matches!(step, Step::Keep(..)))
            .count();
        if distance > limit {
            return Err(too_distant(distance, limit));
        }
    }

    let ops = deletes_first(search.steps)
        .into_iter()
        .map(|step| match step {
            Step::Keep(i, j) => EditOp::Keep {
                left: &left[i],
                right: &right[j],
            },
            Step::Delete(i) => EditOp::Delete(&left[i]),
            Step::Insert(j) => EditOp::Insert(&right[j]),
        })
        .collect();

    Ok(EditScript { ops })
}

/// Map every token to a small integer identifying its comparison key.
fn intern<'t>(
    left: &'t [Token],
    right: &'t [Token],
    options: &DiffOptions,
) -> (Vec<u32>, Vec<u32>) {
    let mut ids: HashMap<Cow<'t, str>, u32> = HashMap::new();
    let mut id_of = |token: &'t Token| -> u32 {
        let next = ids.len() as u32;
        *ids.entry(comparison_key(token.text(), options)).or_insert(next)
    };
    let old = left.iter().map(&mut id_of).collect();
    let new = right.iter().map(&mut id_of).collect();
    (old, new)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Keep(usize, usize),
    Delete(usize),
    Insert(usize),
}

struct Search<'k> {
    old: &'k [u32],
    new: &'k [u32],
    max_edit_distance: Option<usize>,
    steps: Vec<Step>,
}

impl Search<'_> {
    fn conquer(&mut self, mut old: Range<usize>, mut new: Range<usize>) -> EngineResult<()> {
        let prefix = common_prefix(&self.old[old.clone()], &self.new[new.clone()]);
        for i in 0..prefix {
            self.steps.push(Step::Keep(old.start + i, new.start + i));
        }
        old.start += prefix;
        new.start += prefix;

        let suffix = common_suffix(&self.old[old.clone()], &self.new[new.clone()]);
        old.end -= suffix;
        new.end -= suffix;

        if old.is_empty() {
            self.steps.extend(new.clone().map(Step::Insert));
        } else if new.is_empty() {
            self.steps.extend(old.clone().map(Step::Delete));
        } else {
            match self.middle_snake(old.clone(), new.clone())? {
                Some((x, y)) => {
                    self.conquer(old.start..x, new.start..y)?;
                    self.conquer(x..old.end, y..new.end)?;
                }
                None => {
                    self.steps.extend(old.clone().map(Step::Delete));
                    self.steps.extend(new.clone().map(Step::Insert));
                }
            }
        }

        for i in 0..suffix {
            self.steps.push(Step::Keep(old.end + i, new.end + i));
        }
        Ok(())
    }

    /// Find a point on an optimal path through `old` x `new`, returned in
    /// absolute indices. Both ranges are non-empty and share no common
    /// prefix or suffix.
    fn middle_snake(
        &self,
        old: Range<usize>,
        new: Range<usize>,
    ) -> EngineResult<Option<(usize, usize)>> {
        let a = &self.old[old.clone()];
        let b = &self.new[new.clone()];
        let n = a.len() as isize;
        let m = b.len() as isize;

        let max_d = (n + m + 1) / 2 + 1;
        let offset = max_d;
        let width = (2 * max_d + 2) as usize;
        let mut forward = vec![-1isize; width];
        let mut backward = vec![-1isize; width];
        forward[(offset + 1) as usize] = 0;
        backward[(offset + 1) as usize] = 0;

        let delta = n - m;
        let odd = delta % 2 != 0;
        let split = |x: isize, y: isize| Some((old.start + x as usize, new.start + y as usize));

        // Diagonals that ran off the grid are trimmed from either end.
        let (mut f_lo, mut f_hi, mut b_lo, mut b_hi) = (0isize, 0isize, 0isize, 0isize);

        for d in 0..max_d {
            let mut k = -d + f_lo;
            while k <= d - f_hi {
                let ki = (offset + k) as usize;
                let mut x = if k == -d || (k != d && forward[ki - 1] < forward[ki + 1]) {
                    forward[ki + 1]
                } else {
                    forward[ki - 1] + 1
                };
                let mut y = x - k;
                while x >= 0 && x < n && y >= 0 && y < m && a[x as usize] == b[y as usize] {
                    x += 1;
                    y += 1;
                }
                forward[ki] = x;

                if x > n {
                    f_hi += 2;
                } else if y > m {
                    f_lo += 2;
                } else if odd {
                    let bi = offset + delta - k;
                    if bi >= 0 && (bi as usize) < width && backward[bi as usize] != -1 {
                        let bx = n - backward[bi as usize];
                        if x >= bx {
                            return Ok(split(x, y));
                        }
                    }
                }
                k += 2;
            }

            // No overlap after the forward pass of step `d`: D >= 2d.
            self.check_ceiling(2 * d as usize)?;

            let mut k = -d + b_lo;
            while k <= d - b_hi {
                let ki = (offset + k) as usize;
                let mut x = if k == -d || (k != d && backward[ki - 1] < backward[ki + 1]) {
                    backward[ki + 1]
                } else {
                    backward[ki - 1] + 1
                };
                let mut y = x - k;
                while x >= 0
                    && x < n
                    && y >= 0
                    && y < m
                    && a[(n - x - 1) as usize] == b[(m - y - 1) as usize]
                {
                    x += 1;
                    y += 1;
                }
                backward[ki] = x;

                if x > n {
                    b_hi += 2;
                } else if y > m {
                    b_lo += 2;
                } else if !odd {
                    let fi = offset + delta - k;
                    if fi >= 0 && (fi as usize) < width && forward[fi as usize] != -1 {
                        let fx = forward[fi as usize];
                        let fy = offset + fx - fi;
                        if fx >= n - x {
                            return Ok(split(fx, fy));
                        }
                    }
                }
                k += 2;
            }

            // No overlap after `d` steps from both ends: D >= 2d + 1.
            self.check_ceiling(2 * d as usize + 1)?;
        }

        Ok(None)
    }

    fn check_ceiling(&self, lower_bound: usize) -> EngineResult<()> {
        match self.max_edit_distance {
            Some(limit) if lower_bound > limit => Err(too_distant(lower_bound, limit)),
            _ => Ok(()),
        }
    }
}

fn too_distant(actual: usize, limit: usize) -> DiffError {
    DiffError::TooLarge {
        kind: LimitKind::EditDistance,
        actual,
        limit,
    }
}

fn common_prefix(a: &[u32], b: &[u32]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[u32], b: &[u32]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Reorder every maximal run of changes so its deletes come before its
/// inserts, keeping the relative order on each side.
fn deletes_first(steps: Vec<Step>) -> Vec<Step> {
    let mut out = Vec::with_capacity(steps.len());
    let mut inserts = Vec::new();
    for step in steps {
        match step {
            Step::Keep(..) => {
                out.append(&mut inserts);
                out.push(step);
            }
            Step::Delete(_) => out.push(step),
            Step::Insert(_) => inserts.push(step),
        }
    }
    out.append(&mut inserts);
    out
}
