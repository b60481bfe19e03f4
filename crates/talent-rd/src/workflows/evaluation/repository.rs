use serde::Serialize;

use crate::workflows::competency::EmployeeId;

use super::domain::{EvaluationId, EvaluationRecord};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError>;
    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError>;
    fn for_employee(&self, id: &EmployeeId) -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an evaluation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationStatusView {
    pub evaluation_id: EvaluationId,
    pub employee_id: EmployeeId,
    pub year: i32,
    pub status: &'static str,
    pub total_score: f64,
    pub grade: &'static str,
    pub history_len: usize,
}

impl EvaluationRecord {
    pub fn status_view(&self) -> EvaluationStatusView {
        EvaluationStatusView {
            evaluation_id: self.evaluation_id.clone(),
            employee_id: self.employee_id.clone(),
            year: self.year,
            status: self.status.label(),
            total_score: self.total_score,
            grade: self.grade.label(),
            history_len: self.history().len(),
        }
    }
}
