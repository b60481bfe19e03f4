use serde::{Deserialize, Serialize};

use crate::workflows::competency::Employee;

/// Aggregate fact: hours of training delivered for one type in one year.
/// Not tied to an individual employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingHoursLog {
    pub year: i32,
    pub training_type: String,
    pub hours: f64,
}

/// Aggregate fact: how many people one team carried in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHeadcountLog {
    pub year: i32,
    pub team: String,
    pub headcount: u32,
}

/// Closed year range. A reversed range is normalized by swapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start_year: i32,
    pub end_year: i32,
}

impl YearRange {
    pub fn new(start_year: i32, end_year: i32) -> Self {
        if start_year <= end_year {
            Self {
                start_year,
                end_year,
            }
        } else {
            Self {
                start_year: end_year,
                end_year: start_year,
            }
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start_year..=self.end_year
    }

    /// Number of years covered; a closed range always spans at least one.
    pub fn len(&self) -> usize {
        (self.end_year - self.start_year + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Where the per-head denominator comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadcountSource {
    Logs,
    AutoFromRoster,
}

/// Substring heuristics identifying R&D staff in the roster. The keyword
/// tables encode organization policy (including the Korean department
/// names used in production), so they are injectable configuration.
/// Matching is case-sensitive substring containment, kept exactly as the
/// dashboard behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdTeamMatcher {
    pub department_keywords: Vec<String>,
    pub department_codes: Vec<String>,
    pub team_keywords: Vec<String>,
}

impl Default for RdTeamMatcher {
    fn default() -> Self {
        Self {
            department_keywords: ["기술연구소", "연구개발", "R&D", "연구"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            department_codes: vec!["RD".to_string()],
            team_keywords: ["연구", "개발", "R&D"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl RdTeamMatcher {
    pub fn matches(&self, employee: &Employee) -> bool {
        if !employee.is_active {
            return false;
        }

        self.department_keywords
            .iter()
            .any(|keyword| employee.department_name.contains(keyword.as_str()))
            || self
                .department_codes
                .iter()
                .any(|code| employee.department_code == *code)
            || self
                .team_keywords
                .iter()
                .any(|keyword| employee.team_name.contains(keyword.as_str()))
    }
}
