use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CategoryScores, EvaluationCategory, Grade};

/// Weight applied to each category when computing the total score.
/// Weights sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub technical_competency: f64,
    pub project_experience: f64,
    pub rd_achievement: f64,
    pub global_competency: f64,
    pub knowledge_sharing: f64,
    pub innovation_proposal: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            technical_competency: 0.25,
            project_experience: 0.20,
            rd_achievement: 0.25,
            global_competency: 0.10,
            knowledge_sharing: 0.10,
            innovation_proposal: 0.10,
        }
    }
}

impl CategoryWeights {
    pub fn weight(&self, category: EvaluationCategory) -> f64 {
        match category {
            EvaluationCategory::TechnicalCompetency => self.technical_competency,
            EvaluationCategory::ProjectExperience => self.project_experience,
            EvaluationCategory::RdAchievement => self.rd_achievement,
            EvaluationCategory::GlobalCompetency => self.global_competency,
            EvaluationCategory::KnowledgeSharing => self.knowledge_sharing,
            EvaluationCategory::InnovationProposal => self.innovation_proposal,
        }
    }

    pub fn validate(&self) -> bool {
        let sum: f64 = EvaluationCategory::ordered()
            .into_iter()
            .map(|category| self.weight(category))
            .sum();
        (sum - 1.0).abs() < 1e-6
    }
}

/// One conversion band: raw activity counts inside `[range_min, range_max]`
/// convert to `converted_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricBand {
    pub range_min: f64,
    pub range_max: f64,
    pub converted_score: f64,
}

impl RubricBand {
    fn contains(&self, raw: f64) -> bool {
        raw >= self.range_min && raw <= self.range_max
    }
}

/// Data-driven rubric: per-category ordered band lists plus the category
/// weight vector. Bands are matched in order; the first hit wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricConfig {
    pub bands: BTreeMap<EvaluationCategory, Vec<RubricBand>>,
    pub weights: CategoryWeights,
}

impl Default for RubricConfig {
    fn default() -> Self {
        let default_bands = vec![
            RubricBand {
                range_min: 80.0,
                range_max: f64::MAX,
                converted_score: 100.0,
            },
            RubricBand {
                range_min: 60.0,
                range_max: 79.0,
                converted_score: 80.0,
            },
            RubricBand {
                range_min: 40.0,
                range_max: 59.0,
                converted_score: 60.0,
            },
            RubricBand {
                range_min: 0.0,
                range_max: 39.0,
                converted_score: 40.0,
            },
        ];

        let bands = EvaluationCategory::ordered()
            .into_iter()
            .map(|category| (category, default_bands.clone()))
            .collect();

        Self {
            bands,
            weights: CategoryWeights::default(),
        }
    }
}

impl RubricConfig {
    /// Convert a raw activity count through the category's bands. When no
    /// band matches (or the category carries no bands) the raw value itself
    /// is used, clamped to [0, 100].
    pub fn convert(&self, category: EvaluationCategory, raw: f64) -> f64 {
        self.bands
            .get(&category)
            .and_then(|bands| bands.iter().find(|band| band.contains(raw)))
            .map(|band| band.converted_score.clamp(0.0, 100.0))
            .unwrap_or_else(|| raw.clamp(0.0, 100.0))
    }

    /// Fixed weighted sum of the six category scores.
    pub fn total(&self, scores: &CategoryScores) -> f64 {
        EvaluationCategory::ordered()
            .into_iter()
            .map(|category| scores.get(category) * self.weights.weight(category))
            .sum::<f64>()
            .clamp(0.0, 100.0)
    }

    pub fn grade_for(&self, total: f64) -> Grade {
        Grade::from_total(total)
    }
}
