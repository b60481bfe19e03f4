use super::common::*;
use crate::workflows::evaluation::domain::{EvaluationCategory, EvaluationId, EvaluationStatus, Grade};
use crate::workflows::evaluation::history::EvaluationAction;
use crate::workflows::evaluation::repository::{EvaluationRepository, RepositoryError};
use crate::workflows::evaluation::service::{EvaluationServiceError, ScoreInput};
use std::collections::BTreeMap;

#[test]
fn open_creates_a_zeroed_draft_with_one_event() {
    let (service, _repository) = build_service();

    let record = service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("draft opens");

    assert_eq!(record.status, EvaluationStatus::Draft);
    assert_eq!(record.total_score, 0.0);
    assert_eq!(record.grade, Grade::D);
    assert_eq!(record.history().len(), 1);
    assert_eq!(record.history()[0].action, EvaluationAction::Created);
}

#[test]
fn perfect_scores_earn_an_s() {
    let (service, _repository) = build_service();
    let record = service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("draft opens");

    let updated = service
        .record_scores(
            &record.evaluation_id,
            direct_scores([100.0; 6]),
            "manager.kim".to_string(),
            None,
        )
        .expect("scores recorded");

    assert_eq!(updated.total_score, 100.0);
    assert_eq!(updated.grade, Grade::S);
}

#[test]
fn raw_activity_inputs_convert_through_the_rubric() {
    let (service, _repository) = build_service();
    let record = service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("draft opens");

    let mut inputs = BTreeMap::new();
    // 85 raw activities land in the top band and convert to 100.
    inputs.insert(
        EvaluationCategory::TechnicalCompetency,
        ScoreInput::RawActivity(85.0),
    );
    // 45 raw activities land in the third band and convert to 60.
    inputs.insert(
        EvaluationCategory::RdAchievement,
        ScoreInput::RawActivity(45.0),
    );

    let updated = service
        .record_scores(&record.evaluation_id, inputs, "manager.kim".to_string(), None)
        .expect("scores recorded");

    assert_eq!(
        updated.scores.get(EvaluationCategory::TechnicalCompetency),
        100.0
    );
    assert_eq!(updated.scores.get(EvaluationCategory::RdAchievement), 60.0);
    // 100 * 0.25 + 60 * 0.25 = 40.
    assert!((updated.total_score - 40.0).abs() < 1e-9);
    assert_eq!(updated.grade, Grade::D);
}

#[test]
fn grade_always_matches_the_stored_total() {
    let (service, repository) = build_service();
    let record = service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("draft opens");

    for values in [[100.0; 6], [72.0; 6], [10.0; 6], [89.9; 6]] {
        let updated = service
            .record_scores(
                &record.evaluation_id,
                direct_scores(values),
                "manager.kim".to_string(),
                None,
            )
            .expect("scores recorded");
        assert_eq!(updated.grade, Grade::from_total(updated.total_score));

        let stored = repository
            .fetch(&record.evaluation_id)
            .expect("fetch succeeds")
            .expect("record present");
        assert_eq!(stored.total_score, updated.total_score);
        assert_eq!(stored.grade, updated.grade);
    }
}

#[test]
fn submitted_evaluations_are_not_editable() {
    let (service, _repository) = build_service();
    let record = service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("draft opens");
    service
        .transition(
            &record.evaluation_id,
            EvaluationStatus::Submitted,
            "manager.kim".to_string(),
            None,
        )
        .expect("submit succeeds");

    match service.record_scores(
        &record.evaluation_id,
        direct_scores([50.0; 6]),
        "manager.kim".to_string(),
        None,
    ) {
        Err(EvaluationServiceError::NotEditable { status }) => {
            assert_eq!(status, EvaluationStatus::Submitted);
        }
        other => panic!("expected not-editable error, got {other:?}"),
    }
}

#[test]
fn illegal_transitions_error_and_leave_no_history() {
    let (service, _repository) = build_service();
    let record = service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("draft opens");

    match service.transition(
        &record.evaluation_id,
        EvaluationStatus::Approved,
        "manager.kim".to_string(),
        None,
    ) {
        Err(EvaluationServiceError::IllegalTransition { from, to }) => {
            assert_eq!(from, EvaluationStatus::Draft);
            assert_eq!(to, EvaluationStatus::Approved);
        }
        other => panic!("expected illegal transition, got {other:?}"),
    }

    let history = service
        .history(&record.evaluation_id)
        .expect("history readable");
    assert_eq!(history.len(), 1, "only the Created event remains");
}

#[test]
fn rejected_evaluations_can_reopen_as_drafts() {
    let (service, _repository) = build_service();
    let record = service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("draft opens");

    service
        .transition(
            &record.evaluation_id,
            EvaluationStatus::Submitted,
            "manager.kim".to_string(),
            None,
        )
        .expect("submit");
    service
        .transition(
            &record.evaluation_id,
            EvaluationStatus::Rejected,
            "director.lee".to_string(),
            Some("insufficient evidence".to_string()),
        )
        .expect("reject");
    let reopened = service
        .transition(
            &record.evaluation_id,
            EvaluationStatus::Draft,
            "manager.kim".to_string(),
            None,
        )
        .expect("reopen");

    assert_eq!(reopened.status, EvaluationStatus::Draft);

    // Editable again after reopening.
    service
        .record_scores(
            &reopened.evaluation_id,
            direct_scores([80.0; 6]),
            "manager.kim".to_string(),
            None,
        )
        .expect("editable after reopen");
}

#[test]
fn every_mutation_appends_exactly_one_event() {
    let (service, _repository) = build_service();
    let record = service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("draft opens");
    let id = record.evaluation_id.clone();

    service
        .record_scores(&id, direct_scores([70.0; 6]), "manager.kim".to_string(), None)
        .expect("scores");
    service
        .record_detail(
            &id,
            EvaluationCategory::KnowledgeSharing,
            "Ran four internal seminars".to_string(),
            "manager.kim".to_string(),
        )
        .expect("detail");
    service
        .transition(&id, EvaluationStatus::Submitted, "manager.kim".to_string(), None)
        .expect("submit");
    service
        .transition(&id, EvaluationStatus::Approved, "director.lee".to_string(), None)
        .expect("approve");

    let history = service.history(&id).expect("history readable");
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].action, EvaluationAction::Created);
    assert_eq!(history[1].action, EvaluationAction::ScoresUpdated);
    assert_eq!(history[2].action, EvaluationAction::DetailUpdated);
    assert!(matches!(
        history[3].action,
        EvaluationAction::StatusChanged {
            from: EvaluationStatus::Draft,
            to: EvaluationStatus::Submitted,
        }
    ));
    assert!(matches!(
        history[4].action,
        EvaluationAction::StatusChanged {
            from: EvaluationStatus::Submitted,
            to: EvaluationStatus::Approved,
        }
    ));

    // Before/after snapshots bracket the score change.
    assert_eq!(history[1].before.total_score, 0.0);
    assert!((history[1].after.total_score - 70.0).abs() < 1e-9);
}

#[test]
fn get_propagates_not_found() {
    let (service, _repository) = build_service();

    match service.get(&EvaluationId("missing".to_string())) {
        Err(EvaluationServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn second_draft_for_the_same_employee_and_year_is_rejected() {
    let (service, _repository) = build_service();
    service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("first draft opens");

    match service.open(employee_id(), 2025, "director.lee".to_string()) {
        Err(EvaluationServiceError::AlreadyExists {
            employee_id: employee,
            year,
        }) => {
            assert_eq!(employee, employee_id());
            assert_eq!(year, 2025);
        }
        other => panic!("expected already-exists error, got {other:?}"),
    }

    // A different year for the same employee is a new evaluation.
    service
        .open(employee_id(), 2026, "manager.kim".to_string())
        .expect("next year opens");
    assert_eq!(
        service.for_employee(&employee_id()).expect("query").len(),
        2
    );
}

#[test]
fn for_employee_lists_only_matching_records() {
    let (service, _repository) = build_service();
    service
        .open(employee_id(), 2024, "manager.kim".to_string())
        .expect("first draft");
    service
        .open(employee_id(), 2025, "manager.kim".to_string())
        .expect("second draft");
    service
        .open(
            crate::workflows::competency::EmployeeId("emp-999".to_string()),
            2025,
            "manager.kim".to_string(),
        )
        .expect("other employee");

    let records = service
        .for_employee(&employee_id())
        .expect("query succeeds");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record.employee_id == employee_id()));
}
