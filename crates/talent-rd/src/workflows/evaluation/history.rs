use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CategoryScores, EvaluationStatus, Grade};

/// What a history entry records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationAction {
    Created,
    ScoresUpdated,
    StatusChanged {
        from: EvaluationStatus,
        to: EvaluationStatus,
    },
    DetailUpdated,
}

/// State image captured on both sides of a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSnapshot {
    pub status: EvaluationStatus,
    pub scores: CategoryScores,
    pub total_score: f64,
    pub grade: Grade,
}

/// Immutable audit entry. The history list is append-only; nothing in the
/// crate edits or deletes an event once pushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationEvent {
    pub action: EvaluationAction,
    pub performer: String,
    pub before: EvaluationSnapshot,
    pub after: EvaluationSnapshot,
    pub recorded_at: DateTime<Utc>,
    pub comment: Option<String>,
}
