use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::domain::{CohortKey, Measure, ScoreSet, SourceRef, UNKNOWN_LABEL};
use crate::obs::emit_report_renamed;
use crate::pairing::{ComparisonReport, ComparisonRow, RunCell};

/// Marker for a run slot with no record.
pub const NOT_AVAILABLE: &str = "N/A";

const TABLE_HEADER: &str = "| Tool | Version | Model | Spec | TTFR R1 | TTFR R2 | TTFC R1 | TTFC R2 | C | R | D | E | S | K | P_O | Overall |";
const TABLE_RULE: &str = "|------|---------|-------|------|---------|---------|---------|---------|---|---|---|---|---|---|-----|---------|";

/// Hex digits of the cohort digest tried before falling back to the full digest.
const SHORT_SUFFIX_LEN: usize = 8;

/// File stem for a report id: path separators and whitespace become `_`.
pub fn report_file_stem(report_id: &str) -> String {
    report_id
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

fn cohort_digest(key: &CohortKey) -> String {
    let mut hasher = Sha256::new();
    for part in [&key.spec_reference, &key.target_model, &key.api_style] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}

/// File stems handed out within one output directory.
///
/// Sanitizing can map two cohort keys onto one stem (`GPT 4` and `GPT_4`).
/// The first report keeps the plain stem; a later clashing report gets the
/// stem plus a digest of its cohort key.
#[derive(Debug, Default)]
pub struct ReportNames {
    used: BTreeSet<String>,
}

impl ReportNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a stem for `report`.
    ///
    /// # Errors
    ///
    /// Fails if even the full-digest stem is already taken.
    pub fn claim(&mut self, report: &ComparisonReport) -> Result<String> {
        let base = report_file_stem(&report.report_id);
        if self.used.insert(base.clone()) {
            return Ok(base);
        }

        let digest = cohort_digest(&report.cohort);
        for len in [SHORT_SUFFIX_LEN, digest.len()] {
            let candidate = format!("{}-{}", base, &digest[..len]);
            if self.used.insert(candidate.clone()) {
                emit_report_renamed(&report.report_id, &base, &candidate);
                return Ok(candidate);
            }
        }
        bail!("no free file name for report {}", report.report_id)
    }
}

/// Table cell text: `|` is escaped so submitted values cannot split a row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn score_cell(m: Measure) -> String {
    match m.known() {
        Some(v) => format!("{:.1}", v),
        None => UNKNOWN_LABEL.to_string(),
    }
}

fn run_cell(cell: RunCell) -> String {
    match cell {
        RunCell::NotAvailable => NOT_AVAILABLE.to_string(),
        RunCell::Value(m) => m.to_string(),
    }
}

fn write_source_line(md: &mut String, label: &str, source: Option<&SourceRef>) {
    let _ = match source {
        Some(src) => writeln!(
            md,
            "**{}**: {} (sha256 `{}`)",
            label,
            src.file_name,
            src.short_digest()
        ),
        None => writeln!(md, "**{}**: {}", label, NOT_AVAILABLE),
    };
}

fn write_row(md: &mut String, row: &ComparisonRow) {
    let ScoreSet {
        correctness,
        reproducibility,
        determinism,
        effort,
        speed,
        contract_docs,
        overreach_penalty,
        overall,
    } = row.scores;

    let cells = [
        escape_cell(&row.tool_name),
        row.tool_version
            .as_deref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), escape_cell),
        escape_cell(&row.target_model),
        escape_cell(&row.spec_reference),
        run_cell(row.ttfr_minutes.run1),
        run_cell(row.ttfr_minutes.run2),
        run_cell(row.ttfc_minutes.run1),
        run_cell(row.ttfc_minutes.run2),
        score_cell(correctness),
        score_cell(reproducibility),
        score_cell(determinism),
        score_cell(effort),
        score_cell(speed),
        score_cell(contract_docs),
        score_cell(overreach_penalty),
        score_cell(overall),
    ];
    let _ = writeln!(md, "| {} |", cells.join(" | "));
}

/// Render the comparison report as Markdown.
pub fn render_comparison_md(report: &ComparisonReport) -> String {
    let mut md = String::new();
    let key = &report.cohort;

    let _ = writeln!(md, "# Comparison Report: {}\n", report.report_id);
    let _ = writeln!(md, "## Report Header\n");
    let _ = writeln!(md, "- **report_id**: {}", report.report_id);
    let _ = writeln!(md, "- **spec_reference**: {}", key.spec_reference);
    let _ = writeln!(md, "- **target_model**: {}", key.target_model);
    let _ = writeln!(md, "- **api_style**: {}", key.api_style);
    let _ = writeln!(md, "- **evaluation_window**: {}", report.generated_at.to_rfc3339());
    let _ = writeln!(md, "- **tools_compared**: {}", report.tools.join(", "));
    let _ = writeln!(md, "- **notes**: Auto-generated comparison report\n");

    let _ = writeln!(md, "## Comparison Table\n");
    let _ = writeln!(md, "{}", TABLE_HEADER);
    let _ = writeln!(md, "{}", TABLE_RULE);
    for row in &report.rows {
        write_row(&mut md, row);
    }

    let _ = writeln!(md, "\n## Detailed Results\n");
    for detail in &report.details {
        let _ = writeln!(md, "### {}\n", detail.tool);
        write_source_line(&mut md, "Run 1", detail.run1.as_ref());
        write_source_line(&mut md, "Run 2", detail.run2.as_ref());
        let _ = writeln!(md);
    }

    if !report.conflicts.is_empty() {
        let _ = writeln!(md, "## Run Conflicts\n");
        for c in &report.conflicts {
            let _ = writeln!(
                md,
                "- `{}` run {}: {} replaced by {}",
                c.tool, c.run_number, c.replaced, c.kept
            );
        }
        let _ = writeln!(md);
    }

    md
}

/// Write `<stem>.md` into `dir`, returning the written path.
pub fn write_comparison_md(dir: &Path, stem: &str, report: &ComparisonReport) -> Result<PathBuf> {
    let path = dir.join(format!("{}.md", stem));
    let md = render_comparison_md(report);
    std::fs::write(&path, md).with_context(|| format!("write {:?}", path))?;
    Ok(path)
}

/// Write `<stem>.json` (pretty JSON of the structured report) into `dir`.
pub fn write_comparison_json(dir: &Path, stem: &str, report: &ComparisonReport) -> Result<PathBuf> {
    let path = dir.join(format!("{}.json", stem));
    let content = serde_json::to_string_pretty(report).context("serialize comparison report")?;
    std::fs::write(&path, content).with_context(|| format!("write {:?}", path))?;
    Ok(path)
}
