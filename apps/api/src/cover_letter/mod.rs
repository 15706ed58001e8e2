// Cover letter generation: draft → self-critique → revision.
// All LLM calls go through the `CompletionService` trait, never `LlmClient` directly.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod state;
pub mod steps;
