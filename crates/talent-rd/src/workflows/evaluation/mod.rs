//! R&D evaluation lifecycle: rubric scoring, status transitions, and the
//! append-only audit history.

pub mod domain;
pub mod history;
pub mod repository;
pub mod router;
pub(crate) mod rubric;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CategoryScores, EvaluationCategory, EvaluationId, EvaluationRecord, EvaluationStatus, Grade,
};
pub use history::{EvaluationAction, EvaluationEvent, EvaluationSnapshot};
pub use repository::{EvaluationRepository, EvaluationStatusView, RepositoryError};
pub use router::evaluation_router;
pub use rubric::{CategoryWeights, RubricBand, RubricConfig};
pub use service::{EvaluationService, EvaluationServiceError, ScoreInput};
