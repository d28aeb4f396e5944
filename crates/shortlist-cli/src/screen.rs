//! Screening pipeline: resolve request documents into scorable inputs,
//! rank them, and package the response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use shortlist_core::catalog::SkillCatalog;
use shortlist_core::embed::Embedder;
use shortlist_core::extract::SkillExtractor;
use shortlist_core::report::{ScoreReport, ScreeningSummary};
use shortlist_core::run_id;
use shortlist_core::scoring::Scorer;
use shortlist_core::skills::SkillSet;
use shortlist_core::{Candidate, JobSpec};

use crate::error::CliError;
use crate::input::{CandidateDoc, JobDoc, ScreeningRequest};

/// Largest candidate batch accepted in one request.
pub const DEFAULT_BATCH_LIMIT: usize = 50;

/// Why a candidate was left out of scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no embedding and no resume text to embed")]
    MissingEmbedding,
    #[error("embedding dimension {actual} does not match the job's {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Candidate excluded from scoring, surfaced in the response instead of
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub id: String,
    pub reason: String,
}

/// Response envelope for one screening run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResponse {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub submitted: usize,
    pub scored: usize,
    pub reports: Vec<ScoreReport>,
    pub summary: ScreeningSummary,
    pub skipped: Vec<SkippedCandidate>,
}

/// Turns screening requests into ranked responses with a fixed set of
/// collaborators.
pub struct Screener<'a> {
    catalog: &'a SkillCatalog,
    embedder: &'a dyn Embedder,
    extractor: &'a dyn SkillExtractor,
    scorer: Scorer,
    batch_limit: usize,
}

impl<'a> Screener<'a> {
    pub fn new(
        catalog: &'a SkillCatalog,
        embedder: &'a dyn Embedder,
        extractor: &'a dyn SkillExtractor,
        scorer: Scorer,
    ) -> Self {
        Self {
            catalog,
            embedder,
            extractor,
            scorer,
            batch_limit: DEFAULT_BATCH_LIMIT,
        }
    }

    pub fn with_batch_limit(mut self, batch_limit: usize) -> Self {
        self.batch_limit = batch_limit;
        self
    }

    /// Runs one screening. A batch over the limit is rejected whole rather
    /// than truncated; a truncated ranking would silently hide candidates.
    pub fn screen(&self, request: &ScreeningRequest) -> Result<ScreeningResponse, CliError> {
        let submitted = request.candidates.len();
        if submitted > self.batch_limit {
            return Err(CliError::BatchLimitExceeded {
                submitted,
                limit: self.batch_limit,
            });
        }

        let job = self.resolve_job(&request.job)?;

        let mut candidates = Vec::with_capacity(submitted);
        let mut skipped = Vec::new();
        for doc in &request.candidates {
            match self.resolve_candidate(doc, job.embedding.len()) {
                Ok(candidate) => candidates.push(candidate),
                Err(reason) => {
                    warn!(
                        candidate_id = %doc.id,
                        reason = %reason,
                        "candidate excluded from batch"
                    );
                    skipped.push(SkippedCandidate {
                        id: doc.id.clone(),
                        reason: reason.to_string(),
                    });
                }
            }
        }

        let ranked = self.scorer.score_batch(&job, &candidates)?;
        let reports: Vec<ScoreReport> = ranked.iter().map(ScoreReport::from_score).collect();
        let summary = ScreeningSummary::from_scores(&ranked);

        let run = run_id::generate();
        info!(
            run_id = %run,
            submitted,
            scored = reports.len(),
            skipped = skipped.len(),
            "screening complete"
        );

        Ok(ScreeningResponse {
            run_id: run,
            generated_at: Utc::now(),
            submitted,
            scored: reports.len(),
            reports,
            summary,
            skipped,
        })
    }

    fn resolve_job(&self, job: &JobDoc) -> Result<JobSpec, CliError> {
        let embedding = match (&job.embedding, &job.description) {
            (Some(vector), _) => vector.clone(),
            (None, Some(text)) => self.embedder.embed(text),
            (None, None) => return Err(CliError::MissingJobEmbedding),
        };

        let required_skills = match (&job.required_skills, &job.description) {
            (Some(terms), _) => self.catalog.normalize_terms(terms),
            (None, Some(text)) => self.extractor.extract(text),
            (None, None) => SkillSet::new(),
        };

        Ok(JobSpec {
            embedding,
            required_skills,
        })
    }

    fn resolve_candidate(
        &self,
        doc: &CandidateDoc,
        job_dimension: usize,
    ) -> Result<Candidate, SkipReason> {
        let embedding = match (&doc.embedding, &doc.resume_text) {
            (Some(vector), _) => vector.clone(),
            (None, Some(text)) => self.embedder.embed(text),
            (None, None) => return Err(SkipReason::MissingEmbedding),
        };
        if embedding.len() != job_dimension {
            return Err(SkipReason::DimensionMismatch {
                expected: job_dimension,
                actual: embedding.len(),
            });
        }

        let skills = match (&doc.skills, &doc.resume_text) {
            (Some(terms), _) => self.catalog.normalize_terms(terms),
            (None, Some(text)) => self.extractor.extract(text),
            (None, None) => SkillSet::new(),
        };

        Ok(Candidate {
            id: doc.id.clone(),
            embedding,
            skills,
        })
    }
}

/// Plain-text rendering of a response, one line per ranked candidate.
pub fn render_text(response: &ScreeningResponse) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "screening run {}", response.run_id);
    let _ = writeln!(
        out,
        "scored {} of {} submitted candidates",
        response.scored, response.submitted
    );

    if !response.reports.is_empty() {
        let _ = writeln!(out);
        for report in &response.reports {
            let rank = report
                .rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "{rank:>3}. {id:<24} {pct:>6.2}%  skills {matched}/{required}",
                id = report.candidate_id,
                pct = report.final_score_percentage,
                matched = report.skill_match.matched_count,
                required = report.skill_match.required_count,
            );
            if !report.skill_match.missing_skills.is_empty() {
                let _ = writeln!(
                    out,
                    "     missing: {}",
                    report.skill_match.missing_skills.join(", ")
                );
            }
        }
    }

    if !response.skipped.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "skipped:");
        for skip in &response.skipped {
            let _ = writeln!(out, "  - {}: {}", skip.id, skip.reason);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "average score {:.2}%",
        response.summary.average_score_percentage
    );
    if let Some(top) = &response.summary.top_candidate {
        let _ = writeln!(out, "top candidate {top}");
    }
    out
}
