//! Pure competency scoring over one employee's records.

pub mod config;
pub mod domain;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use config::{OverallWeights, ScoringConfig};
pub use domain::{
    Certification, CertificationLevel, CompetencyProfile, Employee, EmployeeId,
    LanguageProficiency, LanguageRecord, SkillKind, SkillRecord, TrainingRecord, TrainingStatus,
    TrainingType,
};
pub use scoring::{
    certification_score, experience_score, language_score, overall_score, soft_skill_score,
    technical_score, training_score, CategoryBreakdown, CompetencyScorecard,
};
