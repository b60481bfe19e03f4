use chrono::NaiveDate;

use crate::workflows::competency::domain::{
    Certification, CertificationLevel, CompetencyProfile, Employee, EmployeeId,
    LanguageProficiency, LanguageRecord, SkillKind, SkillRecord, TrainingRecord, TrainingStatus,
    TrainingType,
};

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid reference date")
}

pub(super) fn employee(hired_on: Option<NaiveDate>) -> Employee {
    Employee {
        employee_id: EmployeeId("emp-001".to_string()),
        name: "Jihye Park".to_string(),
        department_name: "기술연구소".to_string(),
        department_code: "RD".to_string(),
        team_name: "플랫폼 연구팀".to_string(),
        hired_on,
        is_active: true,
    }
}

pub(super) fn certification(
    level: CertificationLevel,
    issued_on: NaiveDate,
    expires_on: Option<NaiveDate>,
) -> Certification {
    Certification {
        name: "Cloud Architect".to_string(),
        issuer: "Vendor Institute".to_string(),
        level,
        issued_on,
        expires_on,
        is_active: true,
    }
}

pub(super) fn language(
    name: &str,
    proficiency: LanguageProficiency,
    test: Option<(f64, f64)>,
) -> LanguageRecord {
    LanguageRecord {
        language: name.to_string(),
        proficiency,
        test_score: test.map(|(score, _)| score),
        test_max_score: test.map(|(_, max)| max),
        is_active: true,
    }
}

pub(super) fn training(
    training_type: TrainingType,
    status: TrainingStatus,
    duration_hours: f64,
    completed_on: Option<NaiveDate>,
) -> TrainingRecord {
    TrainingRecord {
        course_name: "Advanced Systems".to_string(),
        training_type,
        status,
        duration_hours,
        completed_on,
    }
}

pub(super) fn skill(
    kind: SkillKind,
    proficiency: u8,
    years: Option<f64>,
    last_assessed_on: Option<NaiveDate>,
) -> SkillRecord {
    SkillRecord {
        name: "Rust".to_string(),
        kind,
        proficiency,
        years_of_experience: years,
        last_assessed_on,
        is_active: true,
    }
}

pub(super) fn empty_profile(hired_on: Option<NaiveDate>) -> CompetencyProfile {
    CompetencyProfile {
        employee: employee(hired_on),
        certifications: Vec::new(),
        languages: Vec::new(),
        trainings: Vec::new(),
        skills: Vec::new(),
    }
}
