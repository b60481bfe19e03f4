use chrono::{Duration, NaiveDate};
use talent_rd::workflows::competency::{
    Certification, CertificationLevel, CompetencyProfile, CompetencyScorecard, Employee,
    EmployeeId, LanguageProficiency, LanguageRecord, ScoringConfig, SkillKind, SkillRecord,
    TrainingRecord, TrainingStatus, TrainingType,
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid reference date")
}

fn profile() -> CompetencyProfile {
    CompetencyProfile {
        employee: Employee {
            employee_id: EmployeeId("emp-100".to_string()),
            name: "Minjun Choi".to_string(),
            department_name: "기술연구소".to_string(),
            department_code: "RD".to_string(),
            team_name: "AI 연구팀".to_string(),
            hired_on: Some(as_of() - Duration::days(8 * 365)),
            is_active: true,
        },
        certifications: vec![Certification {
            name: "Distributed Systems Professional".to_string(),
            issuer: "Vendor Institute".to_string(),
            level: CertificationLevel::Advanced,
            issued_on: as_of() - Duration::days(400),
            expires_on: Some(as_of() + Duration::days(600)),
            is_active: true,
        }],
        languages: vec![
            LanguageRecord {
                language: "English".to_string(),
                proficiency: LanguageProficiency::Advanced,
                test_score: Some(880.0),
                test_max_score: Some(990.0),
                is_active: true,
            },
            LanguageRecord {
                language: "Japanese".to_string(),
                proficiency: LanguageProficiency::Intermediate,
                test_score: None,
                test_max_score: None,
                is_active: true,
            },
        ],
        trainings: vec![TrainingRecord {
            course_name: "Safety and Compliance".to_string(),
            training_type: TrainingType::Required,
            status: TrainingStatus::Completed,
            duration_hours: 60.0,
            completed_on: Some(as_of() - Duration::days(200)),
        }],
        skills: vec![
            SkillRecord {
                name: "Rust".to_string(),
                kind: SkillKind::Technical,
                proficiency: 85,
                years_of_experience: Some(6.0),
                last_assessed_on: Some(as_of() - Duration::days(90)),
                is_active: true,
            },
            SkillRecord {
                name: "Mentoring".to_string(),
                kind: SkillKind::Leadership,
                proficiency: 75,
                years_of_experience: Some(3.0),
                last_assessed_on: Some(as_of() - Duration::days(90)),
                is_active: true,
            },
        ],
    }
}

#[test]
fn scorecard_reflects_every_category() {
    let scorecard = CompetencyScorecard::assess(&profile(), &ScoringConfig::default(), as_of());

    assert!(scorecard.categories.experience > 60.0);
    assert!(scorecard.categories.certification > 0.0);
    assert!(scorecard.categories.language > 0.0);
    assert!(scorecard.categories.training > 0.0);
    assert!(scorecard.categories.technical > 0.0);
    assert!(scorecard.categories.soft_skill > 0.0);
    assert!(scorecard.overall > 0.0 && scorecard.overall <= 100.0);
}

#[test]
fn scorecard_survives_json_round_trip() {
    let scorecard = CompetencyScorecard::assess(&profile(), &ScoringConfig::default(), as_of());

    let json = serde_json::to_string(&scorecard).expect("serializes");
    let parsed: CompetencyScorecard = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(parsed, scorecard);
}

#[test]
fn inactive_records_never_contribute() {
    let mut quiet = profile();
    for cert in &mut quiet.certifications {
        cert.is_active = false;
    }
    for language in &mut quiet.languages {
        language.is_active = false;
    }
    for skill in &mut quiet.skills {
        skill.is_active = false;
    }

    let scorecard = CompetencyScorecard::assess(&quiet, &ScoringConfig::default(), as_of());

    assert_eq!(scorecard.categories.certification, 0.0);
    assert_eq!(scorecard.categories.language, 0.0);
    assert_eq!(scorecard.categories.technical, 0.0);
    assert_eq!(scorecard.categories.soft_skill, 0.0);
    // Experience and training do not carry active flags and still score.
    assert!(scorecard.categories.experience > 0.0);
    assert!(scorecard.categories.training > 0.0);
}

#[test]
fn custom_language_policy_changes_the_language_score() {
    let base = CompetencyScorecard::assess(&profile(), &ScoringConfig::default(), as_of());

    let mut config = ScoringConfig::default();
    config.language_weights.insert("Japanese".to_string(), 0.1);
    let adjusted = CompetencyScorecard::assess(&profile(), &config, as_of());

    assert!(adjusted.categories.language < base.categories.language);
}
