//! The three pipeline steps. Each reads the current state, makes exactly one
//! completion call, and returns a `StateUpdate`. No step retries.

use std::fmt;

use serde::Serialize;
use tracing::{error, info};

use crate::cover_letter::prompts::{critique_prompt, draft_prompt, revision_prompt};
use crate::cover_letter::state::{PipelineState, StateUpdate};
use crate::errors::AppError;
use crate::llm_client::{CompletionService, LlmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    GenerateDraft,
    SelfCritique,
    ReviseLetter,
}

impl StepName {
    /// Execution order. There are no other edges.
    pub const ORDER: [StepName; 3] = [
        StepName::GenerateDraft,
        StepName::SelfCritique,
        StepName::ReviseLetter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::GenerateDraft => "generate_draft",
            StepName::SelfCritique => "self_critique",
            StepName::ReviseLetter => "revise_letter",
        }
    }

    /// Dispatches to the step function.
    pub async fn run(
        &self,
        state: &PipelineState,
        llm: &dyn CompletionService,
    ) -> Result<StateUpdate, AppError> {
        match self {
            StepName::GenerateDraft => generate_draft(state, llm).await,
            StepName::SelfCritique => self_critique(state, llm).await,
            StepName::ReviseLetter => revise_letter(state, llm).await,
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn require<'a>(value: Option<&'a str>, step: StepName, field: &str) -> Result<&'a str, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{step} requires a {field}")))
}

/// One completion call for `step`. Errors pass through untouched; a blank
/// completion is rejected here whatever the backend.
async fn complete(
    step: StepName,
    prompt: &str,
    llm: &dyn CompletionService,
) -> Result<String, AppError> {
    info!(
        step = step.as_str(),
        prompt_chars = prompt.chars().count(),
        "Running step"
    );

    let text = llm
        .complete(prompt)
        .await
        .and_then(|text| {
            if text.trim().is_empty() {
                Err(LlmError::EmptyContent)
            } else {
                Ok(text)
            }
        })
        .map_err(|e| {
            error!(step = step.as_str(), "Completion failed: {e}");
            AppError::Service(e)
        })?;

    info!(
        step = step.as_str(),
        output_chars = text.chars().count(),
        "Step complete"
    );
    Ok(text)
}

/// Step 1: draft a letter from the resume and job description.
pub async fn generate_draft(
    state: &PipelineState,
    llm: &dyn CompletionService,
) -> Result<StateUpdate, AppError> {
    let prompt = draft_prompt(state.resume(), state.job_description());
    complete(StepName::GenerateDraft, &prompt, llm)
        .await
        .map(StateUpdate::Draft)
}

/// Step 2: critique the draft. Requires `draft`.
pub async fn self_critique(
    state: &PipelineState,
    llm: &dyn CompletionService,
) -> Result<StateUpdate, AppError> {
    let draft = require(state.draft(), StepName::SelfCritique, "draft")?;
    let prompt = critique_prompt(draft);
    complete(StepName::SelfCritique, &prompt, llm)
        .await
        .map(StateUpdate::Critique)
}

/// Step 3: rewrite the draft using the critique. Requires `draft` and `critique`.
pub async fn revise_letter(
    state: &PipelineState,
    llm: &dyn CompletionService,
) -> Result<StateUpdate, AppError> {
    let draft = require(state.draft(), StepName::ReviseLetter, "draft")?;
    let critique = require(state.critique(), StepName::ReviseLetter, "critique")?;
    let prompt = revision_prompt(draft, critique);
    complete(StepName::ReviseLetter, &prompt, llm)
        .await
        .map(StateUpdate::FinalLetter)
}
