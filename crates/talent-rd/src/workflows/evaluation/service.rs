use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::workflows::competency::EmployeeId;

use super::domain::{
    EvaluationCategory, EvaluationId, EvaluationRecord, EvaluationStatus,
};
use super::history::{EvaluationAction, EvaluationEvent, EvaluationSnapshot};
use super::repository::{EvaluationRepository, RepositoryError};
use super::rubric::RubricConfig;

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

/// How one category score arrives: entered directly, or as a raw activity
/// count converted through the rubric bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum ScoreInput {
    Direct(f64),
    RawActivity(f64),
}

/// Service composing the rubric and the repository. All mutations append an
/// immutable history event before persisting.
pub struct EvaluationService<R> {
    repository: Arc<R>,
    rubric: RubricConfig,
}

impl<R> EvaluationService<R>
where
    R: EvaluationRepository + 'static,
{
    pub fn new(repository: Arc<R>, rubric: RubricConfig) -> Self {
        Self { repository, rubric }
    }

    pub fn rubric(&self) -> &RubricConfig {
        &self.rubric
    }

    fn snapshot(record: &EvaluationRecord) -> EvaluationSnapshot {
        EvaluationSnapshot {
            status: record.status,
            scores: record.scores,
            total_score: record.total_score,
            grade: record.grade,
        }
    }

    /// Open a new draft evaluation. Each employee gets at most one
    /// evaluation per year, across every lifecycle status.
    pub fn open(
        &self,
        employee_id: EmployeeId,
        year: i32,
        evaluator: String,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        let existing = self.repository.for_employee(&employee_id)?;
        if existing.iter().any(|record| record.year == year) {
            return Err(EvaluationServiceError::AlreadyExists { employee_id, year });
        }

        let mut record =
            EvaluationRecord::new(next_evaluation_id(), employee_id, year, evaluator.clone());

        let snapshot = Self::snapshot(&record);
        record.push_event(EvaluationEvent {
            action: EvaluationAction::Created,
            performer: evaluator,
            before: snapshot.clone(),
            after: snapshot,
            recorded_at: Utc::now(),
            comment: None,
        });

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Record category scores on a draft. Raw activity inputs pass through
    /// the rubric bands; the total and grade are recomputed together so they
    /// can never drift apart.
    pub fn record_scores(
        &self,
        id: &EvaluationId,
        inputs: BTreeMap<EvaluationCategory, ScoreInput>,
        performer: String,
        comment: Option<String>,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        let mut record = self.fetch(id)?;
        if record.status != EvaluationStatus::Draft {
            return Err(EvaluationServiceError::NotEditable {
                status: record.status,
            });
        }

        let before = Self::snapshot(&record);

        let mut scores = record.scores;
        for (category, input) in inputs {
            let value = match input {
                ScoreInput::Direct(score) => score,
                ScoreInput::RawActivity(raw) => self.rubric.convert(category, raw),
            };
            scores = scores.with(category, value);
        }

        record.scores = scores;
        record.total_score = self.rubric.total(&scores);
        record.grade = self.rubric.grade_for(record.total_score);

        record.push_event(EvaluationEvent {
            action: EvaluationAction::ScoresUpdated,
            performer,
            before,
            after: Self::snapshot(&record),
            recorded_at: Utc::now(),
            comment,
        });

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Attach or replace the free-text detail blob for one category.
    pub fn record_detail(
        &self,
        id: &EvaluationId,
        category: EvaluationCategory,
        detail: String,
        performer: String,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        let mut record = self.fetch(id)?;
        if record.status != EvaluationStatus::Draft {
            return Err(EvaluationServiceError::NotEditable {
                status: record.status,
            });
        }

        let snapshot = Self::snapshot(&record);
        record.details.insert(category, detail);
        record.push_event(EvaluationEvent {
            action: EvaluationAction::DetailUpdated,
            performer,
            before: snapshot.clone(),
            after: snapshot,
            recorded_at: Utc::now(),
            comment: Some(category.label().to_string()),
        });

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Move the evaluation through its lifecycle. Illegal transitions are
    /// rejected with a typed error and leave no trace in the history.
    pub fn transition(
        &self,
        id: &EvaluationId,
        target: EvaluationStatus,
        performer: String,
        comment: Option<String>,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        let mut record = self.fetch(id)?;
        let from = record.status;

        if !from.can_transition_to(target) {
            return Err(EvaluationServiceError::IllegalTransition { from, to: target });
        }

        let before = Self::snapshot(&record);
        record.status = target;
        record.push_event(EvaluationEvent {
            action: EvaluationAction::StatusChanged { from, to: target },
            performer,
            before,
            after: Self::snapshot(&record),
            recorded_at: Utc::now(),
            comment,
        });

        self.repository.update(record.clone())?;
        info!(
            evaluation = %record.evaluation_id.0,
            from = from.label(),
            to = target.label(),
            "evaluation status changed"
        );
        Ok(record)
    }

    pub fn get(&self, id: &EvaluationId) -> Result<EvaluationRecord, EvaluationServiceError> {
        self.fetch(id)
    }

    pub fn history(&self, id: &EvaluationId) -> Result<Vec<EvaluationEvent>, EvaluationServiceError> {
        Ok(self.fetch(id)?.history().to_vec())
    }

    pub fn for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<EvaluationRecord>, EvaluationServiceError> {
        Ok(self.repository.for_employee(employee_id)?)
    }

    fn fetch(&self, id: &EvaluationId) -> Result<EvaluationRecord, EvaluationServiceError> {
        Ok(self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("an evaluation for {} in {} already exists", employee_id.0, year)]
    AlreadyExists { employee_id: EmployeeId, year: i32 },
    #[error("cannot transition from {} to {}", from.label(), to.label())]
    IllegalTransition {
        from: EvaluationStatus,
        to: EvaluationStatus,
    },
    #[error("evaluation is not editable while {}", status.label())]
    NotEditable { status: EvaluationStatus },
}
