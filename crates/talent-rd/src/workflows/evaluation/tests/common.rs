use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::competency::EmployeeId;
use crate::workflows::evaluation::domain::{EvaluationCategory, EvaluationId, EvaluationRecord};
use crate::workflows::evaluation::repository::{EvaluationRepository, RepositoryError};
use crate::workflows::evaluation::router::evaluation_router;
use crate::workflows::evaluation::rubric::RubricConfig;
use crate::workflows::evaluation::service::{EvaluationService, ScoreInput};

pub(super) fn employee_id() -> EmployeeId {
    EmployeeId("emp-042".to_string())
}

pub(super) fn build_service() -> (EvaluationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = EvaluationService::new(repository.clone(), RubricConfig::default());
    (service, repository)
}

pub(super) fn direct_scores(values: [f64; 6]) -> BTreeMap<EvaluationCategory, ScoreInput> {
    EvaluationCategory::ordered()
        .into_iter()
        .zip(values)
        .map(|(category, value)| (category, ScoreInput::Direct(value)))
        .collect()
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<EvaluationId, EvaluationRecord>>>,
}

impl EvaluationRepository for MemoryRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.evaluation_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.evaluation_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.evaluation_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_employee(&self, id: &EmployeeId) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.employee_id == id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: EvaluationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_employee(&self, _id: &EmployeeId) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn evaluation_router_with_service(
    service: EvaluationService<MemoryRepository>,
) -> axum::Router {
    evaluation_router(Arc::new(service))
}

pub(super) fn assert_conflict_response(response: &Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
