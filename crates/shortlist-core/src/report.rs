//! Human- and serialization-friendly views of scoring output.
//!
//! Scores are rounded to 4 decimals and percentages to 2, so reports stay
//! readable and two runs over the same input serialize byte-identically.

use serde::{Deserialize, Serialize};

use crate::scoring::CandidateScore;

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Breakdown of the skill comparison for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchBreakdown {
    pub score: f64,
    pub percentage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub additional_skills: Vec<String>,
    pub matched_count: usize,
    pub required_count: usize,
}

/// Plain-language reading of the numbers, one sentence per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub matched_skills_explanation: String,
    pub missing_skills_explanation: String,
    pub semantic_explanation: String,
}

/// Full per-candidate report row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub candidate_id: String,
    pub rank: Option<u32>,
    pub final_score: f64,
    pub final_score_percentage: f64,
    pub semantic_similarity: f64,
    pub semantic_similarity_percentage: f64,
    pub skill_match: SkillMatchBreakdown,
    pub explanation: Explanation,
}

impl ScoreReport {
    pub fn from_score(score: &CandidateScore) -> Self {
        let skill = &score.skill_match;
        let missing = skill.missing.to_vec();
        let missing_list = if missing.is_empty() {
            "None".to_string()
        } else {
            missing.join(", ")
        };
        let semantic_percentage = round_to(score.semantic_similarity * 100.0, 2);

        Self {
            candidate_id: score.id.clone(),
            rank: score.rank,
            final_score: round_to(score.final_score, 4),
            final_score_percentage: round_to(score.final_score * 100.0, 2),
            semantic_similarity: round_to(score.semantic_similarity, 4),
            semantic_similarity_percentage: semantic_percentage,
            skill_match: SkillMatchBreakdown {
                score: round_to(skill.score, 4),
                percentage: round_to(skill.score * 100.0, 2),
                matched_skills: skill.matched.to_vec(),
                missing_skills: missing.clone(),
                additional_skills: skill.additional.to_vec(),
                matched_count: skill.matched_count(),
                required_count: skill.required_count(),
            },
            explanation: Explanation {
                matched_skills_explanation: format!(
                    "Found {} out of {} required skills.",
                    skill.matched_count(),
                    skill.required_count()
                ),
                missing_skills_explanation: format!(
                    "Missing {} required skills: {missing_list}",
                    missing.len()
                ),
                semantic_explanation: format!(
                    "Resume content similarity to job description: {semantic_percentage}%"
                ),
            },
        }
    }
}

/// One line per candidate in the batch summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub rank: Option<u32>,
    pub candidate_id: String,
    pub final_score: f64,
    pub final_score_percentage: f64,
    pub matched_skills: usize,
    pub required_skills: usize,
}

/// Batch-level overview of a screening run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub total_candidates: usize,
    pub average_score: f64,
    pub average_score_percentage: f64,
    pub top_candidate: Option<String>,
    pub top_candidate_score: f64,
    pub candidates_summary: Vec<SummaryRow>,
}

impl ScreeningSummary {
    /// Summarizes ranked scores. Expects the slice in rank order, as
    /// produced by batch scoring; the first element is reported as the top
    /// candidate.
    pub fn from_scores(scores: &[CandidateScore]) -> Self {
        if scores.is_empty() {
            return Self {
                total_candidates: 0,
                average_score: 0.0,
                average_score_percentage: 0.0,
                top_candidate: None,
                top_candidate_score: 0.0,
                candidates_summary: Vec::new(),
            };
        }

        let total = scores.len();
        let average = scores.iter().map(|s| s.final_score).sum::<f64>() / total as f64;
        let top = &scores[0];

        Self {
            total_candidates: total,
            average_score: round_to(average, 4),
            average_score_percentage: round_to(average * 100.0, 2),
            top_candidate: Some(top.id.clone()),
            top_candidate_score: round_to(top.final_score, 4),
            candidates_summary: scores
                .iter()
                .map(|score| SummaryRow {
                    rank: score.rank,
                    candidate_id: score.id.clone(),
                    final_score: round_to(score.final_score, 4),
                    final_score_percentage: round_to(score.final_score * 100.0, 2),
                    matched_skills: score.skill_match.matched_count(),
                    required_skills: score.skill_match.required_count(),
                })
                .collect(),
        }
    }
}
