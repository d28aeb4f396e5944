//! Candidate ranking and skill matching engine for resume screening.
//!
//! The core consumes pre-computed inputs (one embedding and one skill set
//! per side) and produces deterministic, explainable rankings. Embedding
//! generation and skill extraction sit behind the [`embed::Embedder`] and
//! [`extract::SkillExtractor`] seams so callers decide where vectors and
//! skill sets come from.

pub mod catalog;
pub mod embed;
pub mod extract;
pub mod logging;
pub mod report;
pub mod run_id;
pub mod scoring;
pub mod similarity;
pub mod skills;

use crate::skills::SkillSet;

/// The job side of a screening: what candidates are ranked against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSpec {
    pub embedding: Vec<f32>,
    pub required_skills: SkillSet,
}

/// One resume in a screening batch. `id` is opaque to the engine and is
/// carried through to the ranked output unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub embedding: Vec<f32>,
    pub skills: SkillSet,
}
