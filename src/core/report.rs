use crate::domain::model::{Finding, ValidationResult};
use serde::{Deserialize, Serialize};

const RULE: &str = "============================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Process exit status for a completed run: 0 unless an error was found.
pub fn exit_status(result: &ValidationResult) -> u8 {
    if result.ok() {
        0
    } else {
        1
    }
}

pub fn render(result: &ValidationResult, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => render_text(result),
        ReportFormat::Json => render_json(result),
    }
}

pub fn render_text(result: &ValidationResult) -> String {
    let mut out = String::new();
    let errors: Vec<&Finding> = result.errors().collect();
    let warnings: Vec<&Finding> = result.warnings().collect();

    write_block(&mut out, "ERRORS", "✗", &errors);
    write_block(&mut out, "WARNINGS", "⚠", &warnings);

    if result.ok() && warnings.is_empty() {
        out.push_str("✓ All document validations passed.\n");
    }

    let verdict = if result.ok() {
        format!("\nResult: PASS ({} warnings)\n", warnings.len())
    } else {
        format!(
            "\nResult: FAIL ({} errors, {} warnings)\n",
            errors.len(),
            warnings.len()
        )
    };
    out.push_str(&verdict);
    out
}

fn write_block(out: &mut String, title: &str, marker: &str, findings: &[&Finding]) {
    if findings.is_empty() {
        return;
    }
    out.push_str(&format!("\n{RULE}\n  {}: {}\n{RULE}\n", title, findings.len()));
    for finding in findings {
        out.push_str(&format!("  {} {}\n", marker, finding));
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    error_count: usize,
    warning_count: usize,
    errors: Vec<&'a Finding>,
    warnings: Vec<&'a Finding>,
}

pub fn render_json(result: &ValidationResult) -> String {
    let report = JsonReport {
        ok: result.ok(),
        error_count: result.error_count(),
        warning_count: result.warning_count(),
        errors: result.errors().collect(),
        warnings: result.warnings().collect(),
    };
    // plain structs of strings and bools always serialize
    serde_json::to_string_pretty(&report).unwrap_or_default() + "\n"
}
