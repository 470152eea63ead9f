//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::analysis::pipeline::{AnalysisPipeline, ResumeSource};
use crate::analysis::report::render_report;
use crate::analysis::verdict::QualificationVerdict;
use crate::errors::AnalysisError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Optional at the serde level so a missing field surfaces as the
    /// pipeline's input error rather than a deserialization rejection.
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub verdict: QualificationVerdict,
    pub report_markdown: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Typed-text comparison: resume text plus job description as JSON.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AnalysisError> {
    let source = ResumeSource::select(request.resume_text, None);
    run_analysis(&state, source, request.job_description.unwrap_or_default()).await
}

/// POST /api/v1/analysis/upload
///
/// Multipart comparison: a `resume` file part (.pdf or .docx), a
/// `job_description` text part, and optionally a `resume_text` part.
/// Typed text wins over the file per the input-selection policy.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AnalysisError> {
    let mut resume_text: Option<String> = None;
    let mut job_description = String::new();
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AnalysisError::Input(format!("invalid multipart request: {e}")))?
    {
        match field.name() {
            Some("resume_text") => {
                resume_text = Some(read_text_field(field).await?);
            }
            Some("job_description") => {
                job_description = read_text_field(field).await?;
            }
            Some("resume") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AnalysisError::Input("resume file part must carry a filename".to_string())
                    })?;
                let bytes = field.bytes().await.map_err(|e| {
                    AnalysisError::Input(format!("failed to read resume upload: {e}"))
                })?;
                upload = Some((filename, bytes));
            }
            _ => {}
        }
    }

    let source = ResumeSource::select(resume_text, upload);
    run_analysis(&state, source, job_description).await
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AnalysisError> {
    field
        .text()
        .await
        .map_err(|e| AnalysisError::Input(format!("failed to read multipart field: {e}")))
}

async fn run_analysis(
    state: &AppState,
    source: ResumeSource,
    job_description: String,
) -> Result<Json<AnalyzeResponse>, AnalysisError> {
    let pipeline = AnalysisPipeline::new(state.llm.as_ref());
    let verdict = pipeline.analyze(source, &job_description).await?;
    let report_markdown = render_report(&verdict);

    Ok(Json(AnalyzeResponse {
        verdict,
        report_markdown,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_tolerates_missing_fields() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.resume_text.is_none());
        assert!(request.job_description.is_none());
    }

    #[test]
    fn test_analyze_response_shape() {
        let response = AnalyzeResponse {
            verdict: QualificationVerdict {
                qualification_percent: 80,
                missing_skills_and_qualifications: vec!["AWS experience".to_string()],
                summary: "Learn AWS.".to_string(),
            },
            report_markdown: "## You are a 80% match for this job.".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["verdict"]["qualification_percent"], 80);
        assert_eq!(
            json["verdict"]["missing_skills_and_qualifications"][0],
            "AWS experience"
        );
        assert!(json["report_markdown"].as_str().unwrap().contains("80%"));
    }
}
