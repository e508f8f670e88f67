use difflens_types::{ChangeKind, DiffLine, DiffStats};

/// Count lines by kind in a single pass. Totals are derived from the counts,
/// never from the raw inputs.
pub fn aggregate(lines: &[DiffLine]) -> DiffStats {
    let (mut added, mut removed, mut unchanged) = (0, 0, 0);
    for line in lines {
        match line.kind {
            ChangeKind::Add => added += 1,
            ChangeKind::Remove => removed += 1,
            ChangeKind::Unchanged => unchanged += 1,
        }
    }
    DiffStats::from_counts(added, removed, unchanged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(aggregate(&[]), DiffStats::default());
    }

    #[test]
    fn counts_by_kind() {
        let lines = vec![
            DiffLine::unchanged("a", 1, 1),
            DiffLine::removed("b", 2),
            DiffLine::removed("c", 3),
            DiffLine::added("x", 2),
            DiffLine::unchanged("d", 4, 3),
        ];
        let stats = aggregate(&lines);
        assert_eq!(
            stats,
            DiffStats {
                added: 1,
                removed: 2,
                unchanged: 2,
                total_left: 4,
                total_right: 3,
            }
        );
    }
}
