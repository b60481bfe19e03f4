use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for employee records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Employee master record. Departures flip `is_active`; rows are never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department_name: String,
    pub department_code: String,
    pub team_name: String,
    pub hired_on: Option<NaiveDate>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationLevel {
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

impl CertificationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub level: CertificationLevel,
    pub issued_on: NaiveDate,
    pub expires_on: Option<NaiveDate>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageProficiency {
    Beginner,
    Intermediate,
    Advanced,
    Native,
}

impl LanguageProficiency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Native => "Native",
        }
    }
}

/// Language capability, optionally backed by a standardized test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub language: String,
    pub proficiency: LanguageProficiency,
    pub test_score: Option<f64>,
    pub test_max_score: Option<f64>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
    Required,
    Optional,
    Certification,
}

impl TrainingType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Optional => "Optional",
            Self::Certification => "Certification",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    Planned,
    Ongoing,
    Completed,
    Cancelled,
}

impl TrainingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub course_name: String,
    pub training_type: TrainingType,
    pub status: TrainingStatus,
    pub duration_hours: f64,
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Technical,
    Soft,
    Leadership,
    Domain,
}

/// Assessed skill with a 1-100 proficiency level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub kind: SkillKind,
    pub proficiency: u8,
    pub years_of_experience: Option<f64>,
    pub last_assessed_on: Option<NaiveDate>,
    pub is_active: bool,
}

/// Everything the scoring primitives consume for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyProfile {
    pub employee: Employee,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub languages: Vec<LanguageRecord>,
    #[serde(default)]
    pub trainings: Vec<TrainingRecord>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
}
