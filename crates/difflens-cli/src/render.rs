//! Terminal rendering of diff results.

use colored::{ColoredString, Colorize};

use difflens_types::{ChangeKind, CharChange, DiffLine, DiffResult, DiffStats};

/// Render every entry with both line numbers, a marker, and the content.
/// Changed spans inside paired lines are emphasised.
pub fn render_text(result: &DiffResult, left_label: &str, right_label: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format!("--- {left_label}").red().bold()));
    out.push_str(&format!("{}\n", format!("+++ {right_label}").green().bold()));
    for line in &result.lines {
        out.push_str(&render_line(line));
        out.push('\n');
    }
    out.push_str(&render_stats(&result.stats));
    out.push('\n');
    out
}

fn render_line(line: &DiffLine) -> String {
    let gutter = format!(
        "{:>5} {:>5} ",
        number(line.left_line_number),
        number(line.right_line_number)
    )
    .dimmed();
    let marker = paint(line.kind, &line.kind.marker().to_string());
    let content = match &line.inline_changes {
        Some(spans) => render_spans(line.kind, spans),
        None => paint(line.kind, &line.content).to_string(),
    };
    format!("{gutter}{marker} {content}")
}

fn render_spans(kind: ChangeKind, spans: &[CharChange]) -> String {
    spans
        .iter()
        .map(|span| match span.kind {
            ChangeKind::Unchanged => paint(kind, &span.value).to_string(),
            changed => paint(changed, &span.value).bold().underline().to_string(),
        })
        .collect()
}

fn paint(kind: ChangeKind, text: &str) -> ColoredString {
    match kind {
        ChangeKind::Add => text.green(),
        ChangeKind::Remove => text.red(),
        ChangeKind::Unchanged => text.normal(),
    }
}

fn number(n: Option<usize>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

/// One-line summary of a result.
pub fn render_stats(stats: &DiffStats) -> String {
    format!(
        "{} added, {} removed, {} unchanged (left {}, right {})",
        stats.added.to_string().green(),
        stats.removed.to_string().red(),
        stats.unchanged,
        stats.total_left,
        stats.total_right,
    )
}
