//! Markdown rendering of a verdict, mirroring the rendered output contract:
//! percent headline, one bullet per missing skill, summary below.

use crate::analysis::verdict::QualificationVerdict;

/// Renders the verdict as a Markdown report. Each missing-skill entry is
/// emitted exactly as returned by the model, no reformatting.
pub fn render_report(verdict: &QualificationVerdict) -> String {
    let mut report = format!(
        "## You are a {}% match for this job.\n",
        verdict.qualification_percent
    );
    report.push_str("### Missing Skills and Qualifications:\n");
    for item in &verdict.missing_skills_and_qualifications {
        report.push_str(&format!("- {item}\n"));
    }
    report.push('\n');
    report.push_str(&verdict.summary);
    report
}
