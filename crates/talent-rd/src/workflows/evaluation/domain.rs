use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::competency::EmployeeId;

use super::history::EvaluationEvent;

/// Identifier wrapper for evaluation records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// The six rubric categories, in dashboard display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationCategory {
    TechnicalCompetency,
    ProjectExperience,
    RdAchievement,
    GlobalCompetency,
    KnowledgeSharing,
    InnovationProposal,
}

impl EvaluationCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::TechnicalCompetency,
            Self::ProjectExperience,
            Self::RdAchievement,
            Self::GlobalCompetency,
            Self::KnowledgeSharing,
            Self::InnovationProposal,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TechnicalCompetency => "Technical Competency",
            Self::ProjectExperience => "Project Experience",
            Self::RdAchievement => "R&D Achievement",
            Self::GlobalCompetency => "Global Competency",
            Self::KnowledgeSharing => "Knowledge Sharing",
            Self::InnovationProposal => "Innovation Proposal",
        }
    }
}

/// Six category scores, each held in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    technical_competency: f64,
    project_experience: f64,
    rd_achievement: f64,
    global_competency: f64,
    knowledge_sharing: f64,
    innovation_proposal: f64,
}

impl CategoryScores {
    pub fn new(
        technical_competency: f64,
        project_experience: f64,
        rd_achievement: f64,
        global_competency: f64,
        knowledge_sharing: f64,
        innovation_proposal: f64,
    ) -> Self {
        let clamp = |value: f64| value.clamp(0.0, 100.0);
        Self {
            technical_competency: clamp(technical_competency),
            project_experience: clamp(project_experience),
            rd_achievement: clamp(rd_achievement),
            global_competency: clamp(global_competency),
            knowledge_sharing: clamp(knowledge_sharing),
            innovation_proposal: clamp(innovation_proposal),
        }
    }

    pub const fn zeroed() -> Self {
        Self {
            technical_competency: 0.0,
            project_experience: 0.0,
            rd_achievement: 0.0,
            global_competency: 0.0,
            knowledge_sharing: 0.0,
            innovation_proposal: 0.0,
        }
    }

    pub fn get(&self, category: EvaluationCategory) -> f64 {
        match category {
            EvaluationCategory::TechnicalCompetency => self.technical_competency,
            EvaluationCategory::ProjectExperience => self.project_experience,
            EvaluationCategory::RdAchievement => self.rd_achievement,
            EvaluationCategory::GlobalCompetency => self.global_competency,
            EvaluationCategory::KnowledgeSharing => self.knowledge_sharing,
            EvaluationCategory::InnovationProposal => self.innovation_proposal,
        }
    }

    pub fn with(&self, category: EvaluationCategory, value: f64) -> Self {
        let mut next = *self;
        let value = value.clamp(0.0, 100.0);
        match category {
            EvaluationCategory::TechnicalCompetency => next.technical_competency = value,
            EvaluationCategory::ProjectExperience => next.project_experience = value,
            EvaluationCategory::RdAchievement => next.rd_achievement = value,
            EvaluationCategory::GlobalCompetency => next.global_competency = value,
            EvaluationCategory::KnowledgeSharing => next.knowledge_sharing = value,
            EvaluationCategory::InnovationProposal => next.innovation_proposal = value,
        }
        next
    }
}

/// Lifecycle status for an evaluation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Allowed-transition table. Every transition is an explicit user action;
    /// a rejected evaluation may be reopened as a draft.
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Submitted)
                | (Self::Draft, Self::Rejected)
                | (Self::Submitted, Self::Approved)
                | (Self::Submitted, Self::Rejected)
                | (Self::Rejected, Self::Draft)
        )
    }
}

/// Letter grade derived from the total score. Inclusive lower bounds,
/// evaluated top-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn from_total(total: f64) -> Self {
        if total >= 90.0 {
            Self::S
        } else if total >= 80.0 {
            Self::A
        } else if total >= 70.0 {
            Self::B
        } else if total >= 60.0 {
            Self::C
        } else {
            Self::D
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

/// One evaluation per (employee, year). Total score and grade are always
/// recomputed from the category scores, never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub evaluation_id: EvaluationId,
    pub employee_id: EmployeeId,
    pub year: i32,
    pub evaluator: String,
    pub status: EvaluationStatus,
    pub scores: CategoryScores,
    pub details: BTreeMap<EvaluationCategory, String>,
    pub total_score: f64,
    pub grade: Grade,
    history: Vec<EvaluationEvent>,
}

impl EvaluationRecord {
    pub(crate) fn new(
        evaluation_id: EvaluationId,
        employee_id: EmployeeId,
        year: i32,
        evaluator: String,
    ) -> Self {
        Self {
            evaluation_id,
            employee_id,
            year,
            evaluator,
            status: EvaluationStatus::Draft,
            scores: CategoryScores::zeroed(),
            details: BTreeMap::new(),
            total_score: 0.0,
            grade: Grade::D,
            history: Vec::new(),
        }
    }

    /// Append-only audit trail; entries are never edited or removed.
    pub fn history(&self) -> &[EvaluationEvent] {
        &self.history
    }

    pub(crate) fn push_event(&mut self, event: EvaluationEvent) {
        self.history.push(event);
    }
}
