//! Qualification analysis — the document-to-structured-verdict pipeline.
//!
//! `pipeline` orchestrates `extractor` → `prompts` → the LLM client →
//! `verdict`; `report` renders the result; `handlers` is the HTTP glue.

pub mod extractor;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod verdict;
