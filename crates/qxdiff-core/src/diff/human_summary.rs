//! Human-readable summary renderer for analysis reports.

use crate::diff::report::AnalysisReport;
use crate::model::difference::{
    ATTACHMENT_ACTUAL_TYPE, ATTACHMENT_EXPECTED_TYPE, ATTACHMENT_NEW_VALUE, ATTACHMENT_OLD_VALUE,
};
use crate::model::{Difference, Severity};

/// Render a Markdown summary of an [`AnalysisReport`].
///
/// Differences are grouped per descriptor in emission order. The summary is
/// informational and carries nothing the structured report lacks.
pub fn render_human_summary(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("## Extension Descriptor Diff\n\n");

    let severity_label = match report.max_severity() {
        None => "None",
        Some(Severity::None) => "Non-breaking",
        Some(Severity::PotentiallyBreaking) => "Potentially Breaking",
        Some(Severity::Breaking) => "Breaking",
    };
    out.push_str(&format!(
        "**Run**: `{}`  \n**Differences**: {}  \n**Severity**: {severity_label}\n\n",
        report.run_id,
        report.differences.len()
    ));

    if report.descriptors.is_empty() {
        out.push_str("_No extension descriptors found._\n");
        return out;
    }

    out.push_str("### Descriptors\n\n");
    out.push_str("| File | Old Digest | New Digest |\n|---|---|---|\n");
    for descriptor in &report.descriptors {
        out.push_str(&format!(
            "| `{}` | {} | {} |\n",
            descriptor.file,
            digest_cell(descriptor.old_digest.as_deref()),
            digest_cell(descriptor.new_digest.as_deref()),
        ));
    }
    out.push('\n');

    if report.is_empty() {
        out.push_str("_No differences detected._\n");
        return out;
    }

    for descriptor in &report.descriptors {
        let mut lines = report
            .differences_for(&descriptor.file)
            .map(render_line)
            .peekable();
        if lines.peek().is_none() {
            continue;
        }
        out.push_str(&format!("### `{}`\n\n", descriptor.file));
        for line in lines {
            out.push_str(&line);
        }
        out.push('\n');
    }

    out
}

fn render_line(difference: &Difference) -> String {
    let path = if difference.path().is_empty() {
        "/"
    } else {
        difference.path()
    };
    let mut line = format!(
        "- **{}** `{}` ({})",
        difference.name,
        path,
        difference.severity()
    );
    if let (Some(expected), Some(actual)) = (
        difference.attachment(ATTACHMENT_EXPECTED_TYPE),
        difference.attachment(ATTACHMENT_ACTUAL_TYPE),
    ) {
        line.push_str(&format!(": expected {expected}, found {actual}"));
    } else if let (Some(old), Some(new)) = (
        difference.attachment(ATTACHMENT_OLD_VALUE),
        difference.attachment(ATTACHMENT_NEW_VALUE),
    ) {
        line.push_str(&format!(": `{old}` → `{new}`"));
    }
    line.push('\n');
    line
}

fn digest_cell(digest: Option<&str>) -> String {
    match digest {
        Some(d) => format!("`{}`", short(d)),
        None => "_absent_".to_string(),
    }
}

/// Return the first 12 characters of a digest for display purposes.
fn short(digest: &str) -> &str {
    let end = digest.len().min(12);
    &digest[..end]
}
