//! The accumulating record of pipeline inputs and per-step outputs.
//!
//! Steps never mutate state. They return a `StateUpdate`, and `PipelineState::apply`
//! merges it into a new value. Every output field is write-once.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cover_letter::steps::StepName;
use crate::errors::AppError;

/// A partial state update produced by exactly one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateUpdate {
    Draft(String),
    Critique(String),
    FinalLetter(String),
}

impl StateUpdate {
    /// The step that is allowed to produce this update.
    pub fn step(&self) -> StepName {
        match self {
            StateUpdate::Draft(_) => StepName::GenerateDraft,
            StateUpdate::Critique(_) => StepName::SelfCritique,
            StateUpdate::FinalLetter(_) => StepName::ReviseLetter,
        }
    }

    fn text(&self) -> &str {
        match self {
            StateUpdate::Draft(t) | StateUpdate::Critique(t) | StateUpdate::FinalLetter(t) => t,
        }
    }
}

/// One entry in the audit trail: which stage completed, when, and how much it wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRecord {
    pub step: StepName,
    pub output_chars: usize,
    pub completed_at: DateTime<Utc>,
}

/// Where the pipeline is, derived from which outputs are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inputs,
    Drafted,
    Critiqued,
    Revised,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    resume: String,
    job_description: String,
    draft: Option<String>,
    critique: Option<String>,
    final_letter: Option<String>,
    stages: Vec<StageRecord>,
}

impl PipelineState {
    /// Creates the initial state. Both inputs must contain non-whitespace text.
    pub fn new(
        resume: impl Into<String>,
        job_description: impl Into<String>,
    ) -> Result<Self, AppError> {
        let resume = resume.into();
        let job_description = job_description.into();

        if resume.trim().is_empty() {
            return Err(AppError::Validation("resume cannot be empty".to_string()));
        }
        if job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "job_description cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            resume,
            job_description,
            draft: None,
            critique: None,
            final_letter: None,
            stages: Vec::new(),
        })
    }

    pub fn resume(&self) -> &str {
        &self.resume
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn critique(&self) -> Option<&str> {
        self.critique.as_deref()
    }

    pub fn final_letter(&self) -> Option<&str> {
        self.final_letter.as_deref()
    }

    pub fn stages(&self) -> &[StageRecord] {
        &self.stages
    }

    pub fn phase(&self) -> Phase {
        match (&self.draft, &self.critique, &self.final_letter) {
            (_, _, Some(_)) => Phase::Revised,
            (_, Some(_), None) => Phase::Critiqued,
            (Some(_), None, None) => Phase::Drafted,
            (None, None, None) => Phase::Inputs,
        }
    }

    /// Merges `update` into a new state. Fails if the target field is already set.
    pub fn apply(mut self, update: StateUpdate) -> Result<Self, AppError> {
        let record = StageRecord {
            step: update.step(),
            output_chars: update.text().chars().count(),
            completed_at: Utc::now(),
        };

        let slot = match &update {
            StateUpdate::Draft(_) => &mut self.draft,
            StateUpdate::Critique(_) => &mut self.critique,
            StateUpdate::FinalLetter(_) => &mut self.final_letter,
        };
        if slot.is_some() {
            return Err(AppError::Internal(anyhow!(
                "{} output was already recorded",
                record.step
            )));
        }

        *slot = Some(match update {
            StateUpdate::Draft(t) | StateUpdate::Critique(t) | StateUpdate::FinalLetter(t) => t,
        });
        self.stages.push(record);
        Ok(self)
    }
}
