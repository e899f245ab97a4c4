// Job description generation.
// All LLM calls go through llm_client; this module only owns the prompts.

pub mod handlers;
pub mod job_description;
pub mod prompts;
