use crate::infra::InMemoryEvaluationRepository;
use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use talent_rd::error::AppError;
use talent_rd::workflows::competency::{
    Certification, CertificationLevel, CompetencyProfile, CompetencyScorecard, Employee,
    EmployeeId, LanguageProficiency, LanguageRecord, ScoringConfig, SkillKind, SkillRecord,
    TrainingRecord, TrainingStatus, TrainingType,
};
use talent_rd::workflows::evaluation::{
    EvaluationAction, EvaluationCategory, EvaluationService, EvaluationStatus, RubricConfig,
    ScoreInput,
};
use talent_rd::workflows::training::{
    analyze_training_hours, AnalysisRequest, HeadcountSource, RdTeamMatcher, TeamHeadcountLog,
    TrainingHoursLog, TrainingHoursReport, TrainingLogImporter, YearRange,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for scoring (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Skip the evaluation lifecycle portion of the demo.
    #[arg(long)]
    pub(crate) skip_evaluation: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TrainingReportArgs {
    /// First year of the reporting window
    #[arg(long)]
    pub(crate) start_year: i32,
    /// Last year of the reporting window
    #[arg(long)]
    pub(crate) end_year: i32,
    /// CSV export of yearly training hours (Year, Training Type, Hours)
    #[arg(long)]
    pub(crate) hours_csv: PathBuf,
    /// CSV export of yearly team headcounts (Year, Team, Headcount)
    #[arg(long)]
    pub(crate) headcounts_csv: Option<PathBuf>,
    /// Break the totals down per training type
    #[arg(long)]
    pub(crate) by_type: bool,
    /// Break the totals down per year
    #[arg(long)]
    pub(crate) by_year: bool,
}

pub(crate) fn run_training_report(args: TrainingReportArgs) -> Result<(), AppError> {
    let TrainingReportArgs {
        start_year,
        end_year,
        hours_csv,
        headcounts_csv,
        by_type,
        by_year,
    } = args;

    let hour_logs = TrainingLogImporter::hours_from_path(hours_csv)?;
    let headcount_logs = match headcounts_csv {
        Some(path) => TrainingLogImporter::headcounts_from_path(path)?,
        None => Vec::new(),
    };

    let request = AnalysisRequest {
        range: YearRange::new(start_year, end_year),
        headcount_source: HeadcountSource::Logs,
        roster: Vec::new(),
        matcher: RdTeamMatcher::default(),
        include_type_breakdown: by_type,
        include_yearly_breakdown: by_year,
    };

    let report = analyze_training_hours(&hour_logs, &headcount_logs, &request);
    render_training_report(&report);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        as_of,
        skip_evaluation,
    } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    println!("Talent analytics demo (evaluated {as_of})");

    println!("\nCompetency scorecard");
    let profile = demo_profile(as_of);
    let scorecard = CompetencyScorecard::assess(&profile, &ScoringConfig::default(), as_of);
    println!(
        "- {} ({} / {})",
        profile.employee.name, profile.employee.department_name, profile.employee.team_name
    );
    println!("  experience     {:>5.1}", scorecard.categories.experience);
    println!(
        "  certification  {:>5.1}",
        scorecard.categories.certification
    );
    println!("  language       {:>5.1}", scorecard.categories.language);
    println!("  training       {:>5.1}", scorecard.categories.training);
    println!("  technical      {:>5.1}", scorecard.categories.technical);
    println!("  soft skill     {:>5.1}", scorecard.categories.soft_skill);
    println!("  overall        {:>5.1}", scorecard.overall);

    println!("\nTraining hours snapshot");
    let report = demo_training_report(as_of.year());
    render_training_report(&report);

    if skip_evaluation {
        return Ok(());
    }

    println!("\nEvaluation lifecycle demo");
    let repository = Arc::new(InMemoryEvaluationRepository::default());
    let service = EvaluationService::new(repository, RubricConfig::default());

    let record = match service.open(
        profile.employee.employee_id.clone(),
        as_of.year(),
        "demo-manager".to_string(),
    ) {
        Ok(record) => record,
        Err(err) => {
            println!("  Could not open an evaluation: {err}");
            return Ok(());
        }
    };
    let id = record.evaluation_id.clone();
    println!("- Opened {} in status {}", id.0, record.status.label());

    let mut inputs: BTreeMap<EvaluationCategory, ScoreInput> = BTreeMap::new();
    inputs.insert(
        EvaluationCategory::TechnicalCompetency,
        ScoreInput::Direct(88.0),
    );
    inputs.insert(
        EvaluationCategory::ProjectExperience,
        ScoreInput::Direct(82.0),
    );
    inputs.insert(EvaluationCategory::RdAchievement, ScoreInput::RawActivity(72.0));
    inputs.insert(
        EvaluationCategory::GlobalCompetency,
        ScoreInput::Direct(64.0),
    );
    inputs.insert(
        EvaluationCategory::KnowledgeSharing,
        ScoreInput::RawActivity(55.0),
    );
    inputs.insert(
        EvaluationCategory::InnovationProposal,
        ScoreInput::Direct(70.0),
    );

    let record = match service.record_scores(&id, inputs, "demo-manager".to_string(), None) {
        Ok(record) => record,
        Err(err) => {
            println!("  Scoring failed: {err}");
            return Ok(());
        }
    };
    println!(
        "- Recorded scores -> total {} grade {}",
        record.total_score,
        record.grade.label()
    );

    for target in [EvaluationStatus::Submitted, EvaluationStatus::Approved] {
        match service.transition(&id, target, "demo-director".to_string(), None) {
            Ok(record) => println!("- Moved to {}", record.status.label()),
            Err(err) => {
                println!("  Transition failed: {err}");
                return Ok(());
            }
        }
    }

    match service.history(&id) {
        Ok(events) => {
            println!("- Audit trail ({} events)", events.len());
            for event in events {
                println!(
                    "  {} by {} ({} -> {})",
                    action_label(&event.action),
                    event.performer,
                    event.before.status.label(),
                    event.after.status.label()
                );
            }
        }
        Err(err) => println!("  History unavailable: {err}"),
    }

    match service.get(&id) {
        Ok(record) => match serde_json::to_string_pretty(&record.status_view()) {
            Ok(json) => println!("  Public status payload:\n{json}"),
            Err(err) => println!("  Public status payload unavailable: {err}"),
        },
        Err(err) => println!("  Lookup failed: {err}"),
    }

    Ok(())
}

fn action_label(action: &EvaluationAction) -> &'static str {
    match action {
        EvaluationAction::Created => "created",
        EvaluationAction::ScoresUpdated => "scores updated",
        EvaluationAction::StatusChanged { .. } => "status changed",
        EvaluationAction::DetailUpdated => "detail updated",
    }
}

fn render_training_report(report: &TrainingHoursReport) {
    println!(
        "- Period {}-{}: {} hours over {} cumulative employees",
        report.period.start_year,
        report.period.end_year,
        report.total_hours,
        report.cumulative_employees
    );
    println!(
        "- Average per person: {} hours",
        report.average_hours_per_person
    );

    if let Some(by_type) = &report.training_type_breakdown {
        println!("- Hours by training type");
        for (training_type, hours) in by_type {
            println!("  {training_type}: {hours}");
        }
    }

    if let Some(yearly) = &report.yearly_breakdown {
        println!("- Hours by year");
        for entry in yearly {
            println!(
                "  {}: {} hours / {} people ({} avg)",
                entry.year, entry.total_hours, entry.headcount, entry.average_hours
            );
        }
    }
}

fn demo_training_report(current_year: i32) -> TrainingHoursReport {
    let hour_logs = vec![
        TrainingHoursLog {
            year: current_year - 1,
            training_type: "technical".to_string(),
            hours: 320.0,
        },
        TrainingHoursLog {
            year: current_year - 1,
            training_type: "leadership".to_string(),
            hours: 64.0,
        },
        TrainingHoursLog {
            year: current_year,
            training_type: "technical".to_string(),
            hours: 280.0,
        },
    ];
    let headcount_logs = vec![
        TeamHeadcountLog {
            year: current_year - 1,
            team: "연구 1팀".to_string(),
            headcount: 12,
        },
        TeamHeadcountLog {
            year: current_year,
            team: "연구 1팀".to_string(),
            headcount: 14,
        },
    ];

    let request = AnalysisRequest {
        range: YearRange::new(current_year - 1, current_year),
        headcount_source: HeadcountSource::Logs,
        roster: Vec::new(),
        matcher: RdTeamMatcher::default(),
        include_type_breakdown: true,
        include_yearly_breakdown: true,
    };

    analyze_training_hours(&hour_logs, &headcount_logs, &request)
}

fn demo_profile(as_of: NaiveDate) -> CompetencyProfile {
    CompetencyProfile {
        employee: Employee {
            employee_id: EmployeeId("emp-001".to_string()),
            name: "Jiwoo Park".to_string(),
            department_name: "기술연구소".to_string(),
            department_code: "RD".to_string(),
            team_name: "연구 1팀".to_string(),
            hired_on: Some(as_of - Duration::days(7 * 365)),
            is_active: true,
        },
        certifications: vec![Certification {
            name: "Embedded Systems Professional".to_string(),
            issuer: "National Board".to_string(),
            level: CertificationLevel::Advanced,
            issued_on: as_of - Duration::days(500),
            expires_on: Some(as_of + Duration::days(800)),
            is_active: true,
        }],
        languages: vec![LanguageRecord {
            language: "English".to_string(),
            proficiency: LanguageProficiency::Advanced,
            test_score: Some(900.0),
            test_max_score: Some(990.0),
            is_active: true,
        }],
        trainings: vec![
            TrainingRecord {
                course_name: "Advanced Control Systems".to_string(),
                training_type: TrainingType::Optional,
                status: TrainingStatus::Completed,
                duration_hours: 48.0,
                completed_on: Some(as_of - Duration::days(120)),
            },
            TrainingRecord {
                course_name: "Workplace Safety".to_string(),
                training_type: TrainingType::Required,
                status: TrainingStatus::Completed,
                duration_hours: 16.0,
                completed_on: Some(as_of - Duration::days(300)),
            },
        ],
        skills: vec![
            SkillRecord {
                name: "Signal Processing".to_string(),
                kind: SkillKind::Technical,
                proficiency: 82,
                years_of_experience: Some(6.0),
                last_assessed_on: Some(as_of - Duration::days(60)),
                is_active: true,
            },
            SkillRecord {
                name: "Mentoring".to_string(),
                kind: SkillKind::Leadership,
                proficiency: 74,
                years_of_experience: Some(2.5),
                last_assessed_on: Some(as_of - Duration::days(60)),
                is_active: true,
            },
        ],
    }
}
