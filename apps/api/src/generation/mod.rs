// Report generation: topic validation, the backend seam, and schema-checked output.
// All LLM calls go through llm_client; no direct HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
