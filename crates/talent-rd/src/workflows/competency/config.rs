use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight vector combining the six category scores into the overall score.
/// Weights sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallWeights {
    pub experience: f64,
    pub certification: f64,
    pub language: f64,
    pub training: f64,
    pub technical: f64,
    pub soft_skill: f64,
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            experience: 0.20,
            certification: 0.15,
            language: 0.15,
            training: 0.20,
            technical: 0.20,
            soft_skill: 0.10,
        }
    }
}

impl OverallWeights {
    fn sum(&self) -> f64 {
        self.experience
            + self.certification
            + self.language
            + self.training
            + self.technical
            + self.soft_skill
    }

    /// Validate that the weights form a convex combination.
    pub fn validate(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }
}

/// Injectable scoring policy. The language importance table encodes
/// organization policy, not a general algorithm, so it lives in config
/// rather than in the scoring code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub language_weights: BTreeMap<String, f64>,
    pub default_language_weight: f64,
    pub overall_weights: OverallWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let language_weights = [
            ("English", 1.0),
            ("Japanese", 0.9),
            ("Chinese", 0.9),
            ("German", 0.8),
            ("French", 0.8),
            ("Spanish", 0.7),
            ("Korean", 0.3),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

        Self {
            language_weights,
            default_language_weight: 0.6,
            overall_weights: OverallWeights::default(),
        }
    }
}

impl ScoringConfig {
    /// Exact-name lookup; unlisted languages fall back to the default weight.
    pub fn language_weight(&self, language: &str) -> f64 {
        self.language_weights
            .get(language)
            .copied()
            .unwrap_or(self.default_language_weight)
    }
}
