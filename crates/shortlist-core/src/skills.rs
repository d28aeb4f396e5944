//! Skill sets and required-skill matching.

use std::collections::BTreeSet;

use crate::catalog::nfkc_lower_trim;

/// A deduplicated set of lowercase skill identifiers.
///
/// Terms are NFKC-folded, lowercased and trimmed on insertion, so `"Python"`,
/// `"python"` and `"ＰＹＴＨＯＮ"` all collapse to one member. Iteration is
/// in sorted order, which keeps downstream output stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw terms, dropping anything empty after trimming.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for term in terms {
            set.insert(term.as_ref());
        }
        set
    }

    /// Inserts one term; a no-op when the term is empty after trimming.
    pub fn insert(&mut self, term: &str) {
        let normalized = nfkc_lower_trim(term);
        if !normalized.is_empty() {
            self.0.insert(normalized);
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(&nfkc_lower_trim(term))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Sorted owned copy, for serialization and display.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.difference(&other.0).cloned().collect())
    }

    pub fn union(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.union(&other.0).cloned().collect())
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

/// Outcome of comparing a candidate's skills against a job's requirements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillMatchResult {
    /// Fraction of required skills the candidate has, in `[0.0, 1.0]`.
    pub score: f64,
    /// Required skills the candidate has.
    pub matched: SkillSet,
    /// Required skills the candidate lacks.
    pub missing: SkillSet,
    /// Candidate skills the job did not ask for.
    pub additional: SkillSet,
}

impl SkillMatchResult {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn required_count(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

/// Partitions candidate skills against required skills and scores coverage.
///
/// The score is `|matched| / |required|`. A job with no required skills
/// matches everyone perfectly, so the empty-required score is `1.0`.
pub fn match_skills(candidate: &SkillSet, required: &SkillSet) -> SkillMatchResult {
    let matched = candidate.intersection(required);
    let missing = required.difference(candidate);
    let additional = candidate.difference(required);

    let score = if required.is_empty() {
        1.0
    } else {
        matched.len() as f64 / required.len() as f64
    };

    SkillMatchResult {
        score,
        matched,
        missing,
        additional,
    }
}
