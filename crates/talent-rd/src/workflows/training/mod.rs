//! Training-hours analytics over aggregate yearly logs.

pub mod analysis;
pub mod domain;
pub mod import;

pub use analysis::{
    analyze_training_hours, AnalysisRequest, TrainingHoursReport, YearlyTrainingEntry,
};
pub use domain::{HeadcountSource, RdTeamMatcher, TeamHeadcountLog, TrainingHoursLog, YearRange};
pub use import::{TrainingImportError, TrainingLogImporter};
