use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::competency::Employee;

use super::domain::{HeadcountSource, RdTeamMatcher, TeamHeadcountLog, TrainingHoursLog, YearRange};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parameters for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub range: YearRange,
    pub headcount_source: HeadcountSource,
    #[serde(default)]
    pub roster: Vec<Employee>,
    #[serde(default = "RdTeamMatcher::default")]
    pub matcher: RdTeamMatcher,
    #[serde(default)]
    pub include_type_breakdown: bool,
    #[serde(default)]
    pub include_yearly_breakdown: bool,
}

/// Per-year slice of the report. Present for every year in the range even
/// when nothing happened that year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyTrainingEntry {
    pub year: i32,
    pub total_hours: f64,
    pub headcount: u32,
    pub average_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingHoursReport {
    pub period: YearRange,
    pub total_hours: f64,
    pub cumulative_employees: u64,
    pub average_hours_per_person: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_type_breakdown: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_breakdown: Option<Vec<YearlyTrainingEntry>>,
}

fn headcount_for_year(
    year: i32,
    request: &AnalysisRequest,
    headcount_logs: &[TeamHeadcountLog],
) -> u32 {
    match request.headcount_source {
        HeadcountSource::Logs => headcount_logs
            .iter()
            .filter(|log| log.year == year)
            .map(|log| log.headcount)
            .sum(),
        HeadcountSource::AutoFromRoster => request
            .roster
            .iter()
            .filter(|employee| request.matcher.matches(employee))
            .count() as u32,
    }
}

/// Average training hours per head over a closed year range. A range with no
/// headcount yields an average of zero, never NaN.
pub fn analyze_training_hours(
    hour_logs: &[TrainingHoursLog],
    headcount_logs: &[TeamHeadcountLog],
    request: &AnalysisRequest,
) -> TrainingHoursReport {
    let range = request.range;
    let in_range: Vec<&TrainingHoursLog> = hour_logs
        .iter()
        .filter(|log| range.contains(log.year))
        .collect();

    let total_hours: f64 = in_range.iter().map(|log| log.hours).sum();

    let cumulative_employees: u64 = range
        .years()
        .map(|year| u64::from(headcount_for_year(year, request, headcount_logs)))
        .sum();

    let average_hours_per_person = if cumulative_employees == 0 {
        0.0
    } else {
        round2(total_hours / cumulative_employees as f64)
    };

    let training_type_breakdown = request.include_type_breakdown.then(|| {
        let mut by_type: BTreeMap<String, f64> = BTreeMap::new();
        for log in &in_range {
            *by_type.entry(log.training_type.clone()).or_insert(0.0) += log.hours;
        }
        by_type
            .into_iter()
            .map(|(training_type, hours)| (training_type, round1(hours)))
            .collect()
    });

    let yearly_breakdown = request.include_yearly_breakdown.then(|| {
        range
            .years()
            .map(|year| {
                let year_hours: f64 = in_range
                    .iter()
                    .filter(|log| log.year == year)
                    .map(|log| log.hours)
                    .sum();
                let headcount = headcount_for_year(year, request, headcount_logs);
                let average_hours = if headcount == 0 {
                    0.0
                } else {
                    round2(year_hours / f64::from(headcount))
                };
                YearlyTrainingEntry {
                    year,
                    total_hours: round1(year_hours),
                    headcount,
                    average_hours,
                }
            })
            .collect()
    });

    TrainingHoursReport {
        period: range,
        total_hours: round1(total_hours),
        cumulative_employees,
        average_hours_per_person,
        training_type_breakdown,
        yearly_breakdown,
    }
}
