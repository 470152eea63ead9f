//! Prompt constants and the request builder for qualification analysis.

use crate::llm_client::ModelRequest;

/// System prompt for qualification analysis — enforces JSON-only output.
///
/// The schema in this prompt is the contract the response parser validates
/// against: exactly three keys, strict JSON, nothing outside the object.
pub const ANALYSIS_SYSTEM: &str = "Act as a career mentor. Your job is to help candidates \
    determine how qualified they are for a position and identify areas of improvement. \
    The user will give you their resume along with the posted job description, under the \
    labels 'Resume:' and 'Job Description:'. \
    Identify the key skills and qualifications required for the position based on the job \
    description, then determine how qualified the candidate is by comparing those skills \
    and qualifications to their resume. \
    You MUST respond with a single valid JSON object and nothing else, with this EXACT \
    schema (no extra keys): \
    {\"qualification_percent\": 80, \
    \"missing_skills_and_qualifications\": [\"2 years of data analysis experience\", \
    \"Python for data analysis\"], \
    \"summary\": \"Focus on learning Python for data analysis and look for an entry-level \
    position to gain experience.\"} \
    \"qualification_percent\" is an integer from 0 to 100. \
    \"missing_skills_and_qualifications\" lists the skills and qualifications the resume \
    does not cover; use an empty list if the candidate is fully qualified. \
    \"summary\" is a short prose recommendation of which skills to focus on improving. \
    Use double quotes for all strings. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds the immutable model request for one resume/job pair.
///
/// Pure and deterministic: identical inputs yield byte-identical requests.
/// The `Resume:` / `Job Description:` labels are contractual — the system
/// prompt tells the model to look for them — and must not be reworded.
pub fn build_request(resume_text: &str, job_text: &str) -> ModelRequest {
    ModelRequest {
        system: ANALYSIS_SYSTEM,
        user_content: format!("Resume:\n{resume_text}\nJob Description:\n{job_text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_is_pure() {
        let a = build_request("5 years Python, SQL", "Requires Python, SQL, AWS");
        let b = build_request("5 years Python, SQL", "Requires Python, SQL, AWS");
        assert_eq!(a, b);
    }

    #[test]
    fn test_user_content_labels_are_exact() {
        let request = build_request("RESUME_BODY", "JOB_BODY");
        assert_eq!(
            request.user_content,
            "Resume:\nRESUME_BODY\nJob Description:\nJOB_BODY"
        );
    }

    #[test]
    fn test_system_prompt_names_all_three_keys() {
        assert!(ANALYSIS_SYSTEM.contains("qualification_percent"));
        assert!(ANALYSIS_SYSTEM.contains("missing_skills_and_qualifications"));
        assert!(ANALYSIS_SYSTEM.contains("summary"));
    }
}
