//! The structured qualification verdict and its strict response parser.

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// The structured result of one resume/job comparison. Held in memory only
/// for rendering; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualificationVerdict {
    /// Integer percentage as reported by the model. Structural parsing only:
    /// the range is the model's promise, not validated here.
    pub qualification_percent: i64,
    /// Ordered as returned by the model. Empty means fully qualified.
    pub missing_skills_and_qualifications: Vec<String>,
    pub summary: String,
}

/// Parses a raw model reply into a verdict.
///
/// Canonical accepted grammar, applied deterministically:
/// 1. The whole reply may optionally be wrapped in a single markdown code
///    fence (``` or ```json); the fence is stripped first.
/// 2. The remainder must be exactly one RFC 8259 JSON object with exactly
///    the three required keys and matching value types.
///
/// Anything else — missing key, unknown key, wrong type, single-quoted
/// strings, trailing content — is `MalformedResponse`. No partial recovery,
/// no guessing of missing fields.
pub fn parse_verdict(raw: &str) -> Result<QualificationVerdict, AnalysisError> {
    let text = strip_json_fences(raw);
    serde_json::from_str(text)
        .map_err(|e| AnalysisError::MalformedResponse(format!("reply is not a valid verdict: {e}")))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
/// Models occasionally fence JSON despite instructions; the strip is a fixed
/// pre-step of the accepted grammar, not best-effort repair.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "qualification_percent": 80,
        "missing_skills_and_qualifications": ["AWS experience"],
        "summary": "Learn AWS."
    }"#;

    #[test]
    fn test_well_formed_reply_round_trips_losslessly() {
        let verdict = parse_verdict(WELL_FORMED).unwrap();
        assert_eq!(verdict.qualification_percent, 80);
        assert_eq!(
            verdict.missing_skills_and_qualifications,
            vec!["AWS experience".to_string()]
        );
        assert_eq!(verdict.summary, "Learn AWS.");
    }

    #[test]
    fn test_empty_missing_skills_list_is_valid() {
        let verdict = parse_verdict(
            r#"{"qualification_percent": 100, "missing_skills_and_qualifications": [], "summary": "Fully qualified."}"#,
        )
        .unwrap();
        assert!(verdict.missing_skills_and_qualifications.is_empty());
    }

    #[test]
    fn test_missing_skills_order_is_preserved() {
        let verdict = parse_verdict(
            r#"{"qualification_percent": 40,
                "missing_skills_and_qualifications": ["Kubernetes", "AWS", "Terraform"],
                "summary": "s"}"#,
        )
        .unwrap();
        assert_eq!(
            verdict.missing_skills_and_qualifications,
            vec!["Kubernetes", "AWS", "Terraform"]
        );
    }

    #[test]
    fn test_fenced_reply_is_accepted() {
        let fenced = format!("```json\n{WELL_FORMED}\n```");
        let verdict = parse_verdict(&fenced).unwrap();
        assert_eq!(verdict.qualification_percent, 80);
    }

    #[test]
    fn test_missing_required_key_fails() {
        let err = parse_verdict(r#"{"qualification_percent": 80, "summary": "s"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_unknown_key_fails() {
        let err = parse_verdict(
            r#"{"qualification_percent": 80,
                "missing_skills_and_qualifications": [],
                "summary": "s",
                "confidence": 0.9}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_wrong_value_type_fails() {
        let err = parse_verdict(
            r#"{"qualification_percent": "eighty",
                "missing_skills_and_qualifications": [],
                "summary": "s"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_python_style_single_quotes_fail() {
        // The original instruction prompt showed a Python dict; the accepted
        // grammar here is strict JSON, so single-quoted literals are rejected.
        let err = parse_verdict(
            r#"{"qualification_percent": 80, "missing_skills_and_qualifications": ['AWS'], "summary": 'Learn AWS.'}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_trailing_prose_fails() {
        let reply = format!("{WELL_FORMED}\nHope this helps!");
        let err = parse_verdict(&reply).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_json_reply_fails() {
        let err = parse_verdict("You are an 80% match for this job.").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_strip_json_fences_variants() {
        assert_eq!(
            strip_json_fences("```json\n{\"a\": 1}\n```"),
            "{\"a\": 1}"
        );
        assert_eq!(strip_json_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("{\"a\": 1}"), "{\"a\": 1}");
    }
}
