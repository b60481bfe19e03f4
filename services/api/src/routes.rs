use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use talent_rd::error::AppError;
use talent_rd::workflows::competency::{CompetencyProfile, CompetencyScorecard, ScoringConfig};
use talent_rd::workflows::evaluation::{evaluation_router, EvaluationRepository, EvaluationService};
use talent_rd::workflows::training::{
    analyze_training_hours, AnalysisRequest, HeadcountSource, RdTeamMatcher, TeamHeadcountLog,
    TrainingHoursLog, TrainingHoursReport, TrainingLogImporter, YearRange,
};

#[derive(Debug, Deserialize)]
pub(crate) struct CompetencyScoreRequest {
    pub(crate) profile: CompetencyProfile,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) config: Option<ScoringConfig>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrainingReportRequest {
    pub(crate) start_year: i32,
    pub(crate) end_year: i32,
    #[serde(default)]
    pub(crate) headcount_source: Option<HeadcountSource>,
    #[serde(default)]
    pub(crate) roster: Vec<talent_rd::workflows::competency::Employee>,
    #[serde(default)]
    pub(crate) matcher: Option<RdTeamMatcher>,
    #[serde(default)]
    pub(crate) include_type_breakdown: bool,
    #[serde(default)]
    pub(crate) include_yearly_breakdown: bool,
    #[serde(default)]
    pub(crate) hour_logs: Vec<TrainingHoursLog>,
    #[serde(default)]
    pub(crate) headcount_logs: Vec<TeamHeadcountLog>,
    /// Inline dashboard CSV export; rows are appended to `hour_logs`.
    #[serde(default)]
    pub(crate) hours_csv: Option<String>,
    #[serde(default)]
    pub(crate) headcounts_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrainingReportResponse {
    pub(crate) data_source: TrainingDataSource,
    #[serde(flatten)]
    pub(crate) report: TrainingHoursReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum TrainingDataSource {
    CsvImport,
    Inline,
}

pub(crate) fn with_api_routes<R>(service: Arc<EvaluationService<R>>) -> axum::Router
where
    R: EvaluationRepository + 'static,
{
    evaluation_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/competency/score",
            axum::routing::post(competency_score_endpoint),
        )
        .route(
            "/api/v1/training/report",
            axum::routing::post(training_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn competency_score_endpoint(
    Json(payload): Json<CompetencyScoreRequest>,
) -> Json<CompetencyScorecard> {
    let CompetencyScoreRequest {
        profile,
        as_of,
        config,
    } = payload;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let config = config.unwrap_or_default();
    Json(CompetencyScorecard::assess(&profile, &config, as_of))
}

pub(crate) async fn training_report_endpoint(
    Json(payload): Json<TrainingReportRequest>,
) -> Result<Json<TrainingReportResponse>, AppError> {
    let TrainingReportRequest {
        start_year,
        end_year,
        headcount_source,
        roster,
        matcher,
        include_type_breakdown,
        include_yearly_breakdown,
        mut hour_logs,
        mut headcount_logs,
        hours_csv,
        headcounts_csv,
    } = payload;

    let mut data_source = TrainingDataSource::Inline;
    if let Some(csv) = hours_csv {
        let imported = TrainingLogImporter::hours_from_reader(Cursor::new(csv.into_bytes()))?;
        hour_logs.extend(imported);
        data_source = TrainingDataSource::CsvImport;
    }
    if let Some(csv) = headcounts_csv {
        let imported = TrainingLogImporter::headcounts_from_reader(Cursor::new(csv.into_bytes()))?;
        headcount_logs.extend(imported);
        data_source = TrainingDataSource::CsvImport;
    }

    let request = AnalysisRequest {
        range: YearRange::new(start_year, end_year),
        headcount_source: headcount_source.unwrap_or(HeadcountSource::Logs),
        roster,
        matcher: matcher.unwrap_or_default(),
        include_type_breakdown,
        include_yearly_breakdown,
    };

    let report = analyze_training_hours(&hour_logs, &headcount_logs, &request);
    Ok(Json(TrainingReportResponse {
        data_source,
        report,
    }))
}
