//! Cover letter pipeline executor.
//!
//! Flow: generate_draft → self_critique → revise_letter.
//!
//! Strictly linear: one entry, one exit, no branches, no retries. The first
//! failing step aborts the run and its error is returned as-is. A failed run is
//! not resumable; calling again starts from the first step.

use anyhow::anyhow;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::cover_letter::state::{Phase, PipelineState, StageRecord};
use crate::cover_letter::steps::StepName;
use crate::errors::AppError;
use crate::llm_client::CompletionService;

/// Caller-facing output of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct CoverLetterResult {
    pub run_id: Uuid,
    pub draft: String,
    pub critique: String,
    pub final_letter: String,
    pub stages: Vec<StageRecord>,
}

impl CoverLetterResult {
    /// Only a terminal (`Revised`) state converts.
    pub fn from_state(run_id: Uuid, state: PipelineState) -> Result<Self, AppError> {
        if state.phase() != Phase::Revised {
            return Err(AppError::Internal(anyhow!(
                "pipeline stopped before revise_letter (phase {:?})",
                state.phase()
            )));
        }

        let missing = |field: &str| AppError::Internal(anyhow!("terminal state missing {field}"));
        Ok(Self {
            run_id,
            draft: state.draft().ok_or_else(|| missing("draft"))?.to_string(),
            critique: state.critique().ok_or_else(|| missing("critique"))?.to_string(),
            final_letter: state
                .final_letter()
                .ok_or_else(|| missing("final_letter"))?
                .to_string(),
            stages: state.stages().to_vec(),
        })
    }
}

/// The fixed three-step graph, bound to one completion service.
pub struct Pipeline<'a> {
    llm: &'a dyn CompletionService,
}

impl<'a> Pipeline<'a> {
    pub fn new(llm: &'a dyn CompletionService) -> Self {
        Self { llm }
    }

    pub fn steps(&self) -> &'static [StepName] {
        &StepName::ORDER
    }

    /// Threads `state` through every step in order, merging each update.
    pub async fn run(&self, state: PipelineState) -> Result<PipelineState, AppError> {
        let mut state = state;
        for step in self.steps() {
            let update = step.run(&state, self.llm).await?;
            state = state.apply(update)?;
        }
        Ok(state)
    }
}

/// Validates inputs, runs the pipeline under a fresh `run_id`, and returns the
/// three outputs.
///
/// Empty inputs fail with `AppError::Validation` before any completion call.
pub async fn run_pipeline(
    llm: &dyn CompletionService,
    resume: &str,
    job_description: &str,
) -> Result<CoverLetterResult, AppError> {
    let initial = PipelineState::new(resume, job_description)?;
    let run_id = Uuid::new_v4();

    let span = info_span!("cover_letter_pipeline", %run_id);
    async move {
        info!(
            resume_chars = resume.chars().count(),
            job_description_chars = job_description.chars().count(),
            "Starting cover letter pipeline"
        );
        let terminal = Pipeline::new(llm).run(initial).await?;
        let result = CoverLetterResult::from_state(run_id, terminal)?;
        info!(
            final_letter_chars = result.final_letter.chars().count(),
            "Cover letter pipeline complete"
        );
        Ok::<_, AppError>(result)
    }
    .instrument(span)
    .await
}
