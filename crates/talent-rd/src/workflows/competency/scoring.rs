use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::config::{OverallWeights, ScoringConfig};
use super::domain::{
    Certification, CertificationLevel, CompetencyProfile, EmployeeId, LanguageProficiency,
    LanguageRecord, SkillKind, SkillRecord, TrainingRecord, TrainingStatus, TrainingType,
};

const DAYS_PER_YEAR: f64 = 365.25;

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}

/// Tenure score: linear to 80 points over the first ten years, then a
/// logarithmic taper that reaches 100 at fifteen years.
pub fn experience_score(hired_on: Option<NaiveDate>, as_of: NaiveDate) -> f64 {
    let Some(hired_on) = hired_on else {
        return 0.0;
    };

    let years = years_between(hired_on, as_of);
    if years <= 0.0 {
        return 0.0;
    }
    if years <= 10.0 {
        return clamp_score(years * 8.0);
    }

    let taper = 20.0 * ((1.0 + (years - 10.0)).ln() / 6.0_f64.ln());
    clamp_score(80.0 + taper)
}

const fn level_multiplier(level: CertificationLevel) -> f64 {
    match level {
        CertificationLevel::Basic => 1.0,
        CertificationLevel::Intermediate => 1.2,
        CertificationLevel::Advanced => 1.5,
        CertificationLevel::Expert => 2.0,
    }
}

fn recency_multiplier(issued_on: NaiveDate, as_of: NaiveDate) -> f64 {
    let years = years_between(issued_on, as_of);
    if years < 3.0 {
        1.0
    } else if years <= 5.0 {
        0.85
    } else {
        0.7
    }
}

/// Certification score: the ten highest-impact active certifications, each
/// worth `10 x level x recency x expiry`. Expired certifications still count
/// at half weight.
pub fn certification_score(certifications: &[Certification], as_of: NaiveDate) -> f64 {
    let mut impacts: Vec<f64> = certifications
        .iter()
        .filter(|cert| cert.is_active)
        .map(|cert| {
            let expiry = match cert.expires_on {
                Some(expires_on) if as_of > expires_on => 0.5,
                _ => 1.0,
            };
            10.0 * level_multiplier(cert.level) * recency_multiplier(cert.issued_on, as_of) * expiry
        })
        .collect();

    impacts.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    clamp_score(impacts.iter().take(10).sum())
}

const fn proficiency_base(proficiency: LanguageProficiency) -> f64 {
    match proficiency {
        LanguageProficiency::Native => 100.0,
        LanguageProficiency::Advanced => 80.0,
        LanguageProficiency::Intermediate => 60.0,
        LanguageProficiency::Beginner => 30.0,
    }
}

/// Language score: tier base (optionally lifted by a test-score ratio),
/// weighted by per-language importance, normalized by at most three languages.
pub fn language_score(languages: &[LanguageRecord], config: &ScoringConfig) -> f64 {
    let active: Vec<&LanguageRecord> = languages.iter().filter(|lang| lang.is_active).collect();
    if active.is_empty() {
        return 0.0;
    }

    let total: f64 = active
        .iter()
        .map(|lang| {
            let mut base = proficiency_base(lang.proficiency);
            if let (Some(score), Some(max)) = (lang.test_score, lang.test_max_score) {
                if max > 0.0 {
                    let ratio = (score / max * 100.0).clamp(0.0, 100.0);
                    if ratio > base {
                        base = ratio;
                    }
                }
            }
            base * config.language_weight(&lang.language)
        })
        .sum();

    let divisor = active.len().min(3) as f64;
    clamp_score(total / divisor)
}

/// Training score: 80 points scaled by total completed hours over 200, up to
/// 20 bonus points for hours completed in the last two years over 40, and
/// 2 points per completed required course capped at 10.
pub fn training_score(trainings: &[TrainingRecord], as_of: NaiveDate) -> f64 {
    let completed: Vec<&TrainingRecord> = trainings
        .iter()
        .filter(|record| record.status == TrainingStatus::Completed)
        .collect();
    if completed.is_empty() {
        return 0.0;
    }

    let total_hours: f64 = completed.iter().map(|record| record.duration_hours).sum();

    let recent_cutoff = as_of
        .checked_sub_months(Months::new(24))
        .unwrap_or(NaiveDate::MIN);
    let recent_hours: f64 = completed
        .iter()
        .filter(|record| {
            record
                .completed_on
                .map(|date| date >= recent_cutoff)
                .unwrap_or(false)
        })
        .map(|record| record.duration_hours)
        .sum();

    let required_count = completed
        .iter()
        .filter(|record| record.training_type == TrainingType::Required)
        .count();

    let base = (total_hours / 200.0).min(1.0) * 80.0;
    let recency_bonus = (recent_hours / 40.0).min(1.0) * 20.0;
    let required_bonus = ((required_count * 2) as f64).min(10.0);

    clamp_score(base + recency_bonus + required_bonus)
}

fn skill_weight(skill: &SkillRecord, as_of: NaiveDate) -> f64 {
    let experience_weight = skill
        .years_of_experience
        .map(|years| (years / 5.0).min(2.0))
        .unwrap_or(1.0);

    let stale_cutoff = as_of
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN);
    let staleness = match skill.last_assessed_on {
        Some(assessed) if assessed < stale_cutoff => 0.8,
        _ => 1.0,
    };

    experience_weight * staleness
}

fn weighted_proficiency_mean(skills: &[(&SkillRecord, f64)]) -> f64 {
    let weight_sum: f64 = skills.iter().map(|(_, weight)| weight).sum();
    if weight_sum <= 0.0 {
        return 0.0;
    }

    let weighted: f64 = skills
        .iter()
        .map(|(skill, weight)| f64::from(skill.proficiency) * weight)
        .sum();
    weighted / weight_sum
}

/// Technical score: experience- and freshness-weighted mean over active
/// technical and domain skills.
pub fn technical_score(skills: &[SkillRecord], as_of: NaiveDate) -> f64 {
    let relevant: Vec<(&SkillRecord, f64)> = skills
        .iter()
        .filter(|skill| {
            skill.is_active && matches!(skill.kind, SkillKind::Technical | SkillKind::Domain)
        })
        .map(|skill| (skill, skill_weight(skill, as_of)))
        .collect();
    if relevant.is_empty() {
        return 0.0;
    }

    clamp_score(weighted_proficiency_mean(&relevant))
}

/// Soft-skill score: the same weighting over soft and leadership skills, with
/// leadership entries weighted 1.5x and adding a flat `proficiency x 0.1`
/// bonus on top of the mean.
pub fn soft_skill_score(skills: &[SkillRecord], as_of: NaiveDate) -> f64 {
    let relevant: Vec<(&SkillRecord, f64)> = skills
        .iter()
        .filter(|skill| {
            skill.is_active && matches!(skill.kind, SkillKind::Soft | SkillKind::Leadership)
        })
        .map(|skill| {
            let mut weight = skill_weight(skill, as_of);
            if skill.kind == SkillKind::Leadership {
                weight *= 1.5;
            }
            (skill, weight)
        })
        .collect();
    if relevant.is_empty() {
        return 0.0;
    }

    let leadership_bonus: f64 = relevant
        .iter()
        .filter(|(skill, _)| skill.kind == SkillKind::Leadership)
        .map(|(skill, _)| f64::from(skill.proficiency) * 0.1)
        .sum();

    clamp_score(weighted_proficiency_mean(&relevant) + leadership_bonus)
}

/// One category score per scoring primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub experience: f64,
    pub certification: f64,
    pub language: f64,
    pub training: f64,
    pub technical: f64,
    pub soft_skill: f64,
}

/// Convex combination of the six category scores, rounded to one decimal.
pub fn overall_score(categories: &CategoryBreakdown, weights: &OverallWeights) -> f64 {
    let combined = categories.experience * weights.experience
        + categories.certification * weights.certification
        + categories.language * weights.language
        + categories.training * weights.training
        + categories.technical * weights.technical
        + categories.soft_skill * weights.soft_skill;
    round1(clamp_score(combined))
}

/// Dashboard-facing bundle of category scores and the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyScorecard {
    pub employee_id: EmployeeId,
    pub as_of: NaiveDate,
    pub categories: CategoryBreakdown,
    pub overall: f64,
}

impl CompetencyScorecard {
    pub fn assess(profile: &CompetencyProfile, config: &ScoringConfig, as_of: NaiveDate) -> Self {
        let categories = CategoryBreakdown {
            experience: experience_score(profile.employee.hired_on, as_of),
            certification: certification_score(&profile.certifications, as_of),
            language: language_score(&profile.languages, config),
            training: training_score(&profile.trainings, as_of),
            technical: technical_score(&profile.skills, as_of),
            soft_skill: soft_skill_score(&profile.skills, as_of),
        };
        let overall = overall_score(&categories, &config.overall_weights);

        Self {
            employee_id: profile.employee.employee_id.clone(),
            as_of,
            categories,
            overall,
        }
    }
}
