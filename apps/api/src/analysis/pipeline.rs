//! Analysis pipeline — orchestrates extraction, prompting, the model call,
//! and response parsing for one resume/job comparison.
//!
//! One invocation runs start-to-finish with no shared mutable state, no
//! stage retry, and no recovery: the first failing stage's error is the
//! run's result.

use bytes::Bytes;

use crate::analysis::extractor::extract_text;
use crate::analysis::prompts::build_request;
use crate::analysis::verdict::{parse_verdict, QualificationVerdict};
use crate::errors::AnalysisError;
use crate::llm_client::CompletionClient;

/// Which resume input the run will use, decided exactly once per invocation.
///
/// An explicit tagged union rather than "whichever branch set the variable":
/// `NoInput` is a first-class outcome that maps deterministically to an
/// input error, so no later stage can observe an unset intermediate value.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    FreeText(String),
    Upload { filename: String, bytes: Bytes },
    NoInput,
}

impl ResumeSource {
    /// Input-selection policy: typed text wins over an upload; an upload is
    /// used only when no non-empty text was supplied; otherwise `NoInput`.
    pub fn select(resume_text: Option<String>, upload: Option<(String, Bytes)>) -> Self {
        match resume_text.filter(|t| !t.trim().is_empty()) {
            Some(text) => ResumeSource::FreeText(text),
            None => match upload {
                Some((filename, bytes)) => ResumeSource::Upload { filename, bytes },
                None => ResumeSource::NoInput,
            },
        }
    }
}

/// The orchestrator. The only component the HTTP layer calls; owns the
/// stage order select → extract → prompt → call → parse.
pub struct AnalysisPipeline<'a> {
    client: &'a dyn CompletionClient,
}

impl<'a> AnalysisPipeline<'a> {
    pub fn new(client: &'a dyn CompletionClient) -> Self {
        Self { client }
    }

    /// Runs one comparison. Extraction happens only for `Upload` sources;
    /// `NoInput` and an empty job description terminate with an input error
    /// before any extraction or model call.
    pub async fn analyze(
        &self,
        source: ResumeSource,
        job_text: &str,
    ) -> Result<QualificationVerdict, AnalysisError> {
        if job_text.trim().is_empty() {
            return Err(AnalysisError::Input(
                "Please fill both fields or upload a resume".to_string(),
            ));
        }

        let resume_text = match source {
            ResumeSource::FreeText(text) => text,
            ResumeSource::Upload { filename, bytes } => extract_text(&filename, &bytes)?,
            ResumeSource::NoInput => {
                return Err(AnalysisError::Input(
                    "Please fill both fields or upload a resume".to_string(),
                ))
            }
        };

        let request = build_request(&resume_text, job_text);
        let raw = self.client.complete(&request).await?;
        parse_verdict(&raw)
    }
}
