//! Weighted scoring and batch ranking of candidates.

use std::cmp::Ordering;

use thiserror::Error;
use tracing::debug;

use crate::similarity::{cosine_similarity, DimensionMismatchError};
use crate::skills::{match_skills, SkillMatchResult};
use crate::{Candidate, JobSpec};

pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.7;
pub const DEFAULT_SKILL_WEIGHT: f64 = 0.3;

/// Tolerance on the weight sum; absorbs float literals like `0.7 + 0.3`.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "invalid scoring weights: semantic {semantic}, skill {skill} \
     (must be non-negative and sum to 1.0)"
)]
pub struct InvalidWeightsError {
    pub semantic: f64,
    pub skill: f64,
}

/// Relative weight of semantic similarity versus skill coverage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub semantic: f64,
    pub skill: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            semantic: DEFAULT_SEMANTIC_WEIGHT,
            skill: DEFAULT_SKILL_WEIGHT,
        }
    }
}

impl ScoringWeights {
    pub fn new(semantic: f64, skill: f64) -> Self {
        Self { semantic, skill }
    }

    pub fn sum(&self) -> f64 {
        self.semantic + self.skill
    }

    /// Both weights must be finite, non-negative and sum to 1.0 within a
    /// small tolerance.
    pub fn validate(&self) -> Result<(), InvalidWeightsError> {
        let well_formed = self.semantic.is_finite()
            && self.skill.is_finite()
            && self.semantic >= 0.0
            && self.skill >= 0.0
            && (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE;
        if well_formed {
            Ok(())
        } else {
            Err(InvalidWeightsError {
                semantic: self.semantic,
                skill: self.skill,
            })
        }
    }

    /// Weighted combination of the two component scores.
    pub fn combine(&self, semantic_similarity: f64, skill_score: f64) -> f64 {
        self.semantic * semantic_similarity + self.skill * skill_score
    }
}

/// One candidate's scores against a job.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub id: String,
    /// Cosine similarity between the embeddings, in `[0.0, 1.0]`.
    pub semantic_similarity: f64,
    pub skill_match: SkillMatchResult,
    /// `semantic * weight + skill * weight`, in `[0.0, 1.0]`.
    pub final_score: f64,
    /// 1-based position after batch ranking; `None` until ranked.
    pub rank: Option<u32>,
}

/// Scores candidates against a job with a fixed, validated weight pair.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Result<Self, InvalidWeightsError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Scores a single candidate. The rank is left unset; only batch
    /// scoring assigns ranks.
    pub fn score_one(
        &self,
        job: &JobSpec,
        candidate: &Candidate,
    ) -> Result<CandidateScore, DimensionMismatchError> {
        let semantic_similarity =
            f64::from(cosine_similarity(&candidate.embedding, &job.embedding)?);
        let skill_match = match_skills(&candidate.skills, &job.required_skills);
        let final_score = self.weights.combine(semantic_similarity, skill_match.score);

        Ok(CandidateScore {
            id: candidate.id.clone(),
            semantic_similarity,
            skill_match,
            final_score,
            rank: None,
        })
    }

    /// Scores a batch and returns it sorted by final score, best first.
    ///
    /// Ties keep the candidates' input order (the sort is stable), and ranks
    /// are dense positions `1..=n`, so the same input always produces the
    /// same output. A dimension mismatch on any candidate fails the whole
    /// batch; partially ranked output would be misleading.
    pub fn score_batch(
        &self,
        job: &JobSpec,
        candidates: &[Candidate],
    ) -> Result<Vec<CandidateScore>, DimensionMismatchError> {
        let mut scored = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            scored.push(self.score_one(job, candidate)?);
        }

        scored.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(Ordering::Equal)
        });
        for (position, score) in scored.iter_mut().enumerate() {
            score.rank = Some(position as u32 + 1);
        }

        debug!(candidates = scored.len(), "scored batch");
        Ok(scored)
    }
}
