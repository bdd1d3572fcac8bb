//! Match scoring: a pluggable, trait-based scorer that measures how well an
//! available resource fits a project's requirements.
//!
//! Default: `WeightedMatchScorer` (skill overlap, idle capacity, seniority).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup.

use serde::{Deserialize, Serialize};

use crate::models::{ExperienceLevel, Project, Resource};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLevel {
    High,
    Medium,
    Low,
}

impl RecommendationLevel {
    /// high ≥ 70, medium ≥ 40, low otherwise.
    pub fn from_score(score: i32) -> Self {
        if score >= 70 {
            RecommendationLevel::High
        } else if score >= 40 {
            RecommendationLevel::Medium
        } else {
            RecommendationLevel::Low
        }
    }
}

/// Score breakdown for one resource against one project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub skill_matches: usize,
    pub skill_score: f64,       // 0 – 100
    pub utilization_score: f64, // 100 - utilization, unbounded
    pub experience_score: f64,  // 25 / 50 / 75 / 100
    pub total_score: i32,       // rounded weighted sum, may be negative
    pub recommendation_level: RecommendationLevel,
}

impl MatchScore {
    /// Neutral score handed out when no project has been chosen yet.
    pub fn placeholder() -> Self {
        Self {
            skill_matches: 0,
            skill_score: 0.0,
            utilization_score: 0.0,
            experience_score: 0.0,
            total_score: 50,
            recommendation_level: RecommendationLevel::Medium,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring strategies without touching the recommender,
/// the handlers, or the store.
pub trait MatchScorer: Send + Sync {
    fn score(&self, resource: &Resource, project: &Project) -> MatchScore;

    /// Label reported alongside recommendations.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedMatchScorer (default implementation)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub utilization: f64,
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            utilization: 0.3,
            experience: 0.2,
        }
    }
}

/// Algorithm:
/// 1. skill_score = 100 × |resource.skills ∩ project.required_skills| / max(|required|, 1)
/// 2. utilization_score = 100 − utilization_rate
/// 3. experience_score from `experience_score`
/// 4. total = round(w_s × skill + w_u × utilization + w_e × experience)
///
/// A project with no required skills scores 0 on skills, not 100.
#[derive(Debug, Clone, Default)]
pub struct WeightedMatchScorer {
    pub weights: ScoringWeights,
}

impl MatchScorer for WeightedMatchScorer {
    fn score(&self, resource: &Resource, project: &Project) -> MatchScore {
        compute_match_score(resource, project, &self.weights)
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

pub fn experience_score(level: ExperienceLevel) -> f64 {
    match level {
        ExperienceLevel::Junior => 25.0,
        ExperienceLevel::MidLevel => 50.0,
        ExperienceLevel::Senior => 75.0,
        ExperienceLevel::Lead => 100.0,
    }
}

fn compute_match_score(resource: &Resource, project: &Project, weights: &ScoringWeights) -> MatchScore {
    let required = &project.required_skills;

    // Exact, case-sensitive membership: "react" does not satisfy "React".
    let skill_matches = required
        .iter()
        .filter(|skill| resource.skills.contains(skill))
        .count();

    let skill_score = skill_matches as f64 / required.len().max(1) as f64 * 100.0;
    let utilization_score = 100.0 - f64::from(resource.utilization_rate);
    let experience_score = experience_score(resource.experience);

    let weighted = weights.skills * skill_score
        + weights.utilization * utilization_score
        + weights.experience * experience_score;
    // Over-utilised resources push the sum below zero; no clamp.
    let total_score = weighted.round() as i32;

    MatchScore {
        skill_matches,
        skill_score,
        utilization_score,
        experience_score,
        total_score,
        recommendation_level: RecommendationLevel::from_score(total_score),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
