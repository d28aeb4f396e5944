//! Skill extraction from free text.
//!
//! [`CatalogSkillExtractor`] scans text for catalog aliases; anything
//! smarter (an LLM pass, a trained tagger) implements [`SkillExtractor`]
//! and slots into the same pipelines.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::catalog::{nfkc_lower_trim, SkillCatalog};
use crate::skills::SkillSet;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Pulls a skill set out of unstructured text.
pub trait SkillExtractor: Send + Sync {
    fn extract(&self, text: &str) -> SkillSet;
}

/// Dictionary extractor: reports the canonical name of every catalog alias
/// that occurs in the text on a word boundary.
#[derive(Debug, Clone)]
pub struct CatalogSkillExtractor<'a> {
    catalog: &'a SkillCatalog,
}

impl<'a> CatalogSkillExtractor<'a> {
    pub fn new(catalog: &'a SkillCatalog) -> Self {
        Self { catalog }
    }
}

impl Default for CatalogSkillExtractor<'static> {
    fn default() -> Self {
        Self::new(SkillCatalog::builtin())
    }
}

impl SkillExtractor for CatalogSkillExtractor<'_> {
    fn extract(&self, text: &str) -> SkillSet {
        let normalized = nfkc_lower_trim(text);
        if normalized.is_empty() {
            return SkillSet::new();
        }
        let flattened = WHITESPACE_RE.replace_all(&normalized, " ");

        let mut found = SkillSet::new();
        for (alias, canonical) in self.catalog.alias_index() {
            if found.contains(canonical) {
                continue;
            }
            if contains_word(&flattened, alias) {
                found.insert(canonical);
            }
        }

        debug!(skills = found.len(), "extracted skills from text");
        found
    }
}

/// Substring match gated on word boundaries: the characters adjacent to the
/// match must not be alphanumeric. Unlike a regex `\b`, this lets
/// symbol-bearing aliases ("c++", "c#", ".net") match while "java" stays
/// quiet inside "javascript".
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(offset) = haystack[start..].find(needle) {
        let begin = start + offset;
        let end = begin + needle.len();

        let left_clear = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let right_clear = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if left_clear && right_clear {
            return true;
        }

        start = begin
            + haystack[begin..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }
    false
}
