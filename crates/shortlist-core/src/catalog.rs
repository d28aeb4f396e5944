//! Canonical skill catalog: alias lookup and term normalization.
//!
//! The catalog maps surface forms ("py", "k8s", "node.js") onto a closed
//! vocabulary of canonical names. It is built once, validated at load time
//! and read-only afterwards, so it can be shared across threads freely.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use strsim::damerau_levenshtein;
use thiserror::Error;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::skills::SkillSet;

/// Built-in catalog entries: canonical name → surface aliases.
///
/// Each alias must map to exactly one canonical name;
/// `builtin_catalog_is_alias_unique` guards the table.
static BUILTIN_ENTRIES: &[(&str, &[&str])] = &[
    // Programming languages
    ("python", &["python", "py"]),
    ("javascript", &["javascript", "js"]),
    ("java", &["java"]),
    ("c++", &["c++", "cpp", "c plus plus"]),
    ("csharp", &["c#", "csharp", ".net"]),
    ("go", &["golang", "go"]),
    ("rust", &["rust"]),
    ("ruby", &["ruby", "rails"]),
    ("php", &["php"]),
    ("swift", &["swift"]),
    ("kotlin", &["kotlin"]),
    // Web technologies
    ("react", &["react", "reactjs"]),
    ("angular", &["angular", "angularjs"]),
    ("vue", &["vue", "vuejs"]),
    ("html", &["html", "html5"]),
    ("css", &["css", "css3", "scss", "sass"]),
    ("typescript", &["typescript", "ts"]),
    ("nodejs", &["nodejs", "node.js", "node"]),
    ("express", &["express", "expressjs"]),
    ("flask", &["flask"]),
    ("django", &["django"]),
    ("fastapi", &["fastapi"]),
    // Databases
    ("sql", &["sql", "sqlserver"]),
    ("mysql", &["mysql"]),
    ("postgresql", &["postgresql", "postgres"]),
    ("mongodb", &["mongodb", "mongo"]),
    ("redis", &["redis"]),
    ("elasticsearch", &["elasticsearch"]),
    ("cassandra", &["cassandra"]),
    ("dynamodb", &["dynamodb"]),
    // Cloud and DevOps
    ("aws", &["aws", "amazon web services"]),
    ("azure", &["azure", "microsoft azure"]),
    ("gcp", &["gcp", "google cloud"]),
    ("docker", &["docker"]),
    ("kubernetes", &["kubernetes", "k8s"]),
    (
        "ci/cd",
        &["ci/cd", "cicd", "continuous integration", "continuous deployment"],
    ),
    ("jenkins", &["jenkins"]),
    ("gitlab", &["gitlab"]),
    ("github", &["github"]),
    ("terraform", &["terraform"]),
    ("ansible", &["ansible"]),
    // Data science and ML
    ("machine learning", &["machine learning", "ml"]),
    ("deep learning", &["deep learning"]),
    ("nlp", &["nlp", "natural language processing"]),
    ("tensorflow", &["tensorflow"]),
    ("pytorch", &["pytorch"]),
    ("scikit-learn", &["scikit-learn", "sklearn"]),
    ("pandas", &["pandas"]),
    ("numpy", &["numpy"]),
    ("data analysis", &["data analysis"]),
    ("data visualization", &["data visualization", "visualization"]),
    ("tableau", &["tableau"]),
    ("power bi", &["power bi", "powerbi"]),
    // Other technical skills
    ("git", &["git", "version control"]),
    ("rest api", &["rest api", "restful", "api"]),
    ("graphql", &["graphql"]),
    ("microservices", &["microservices"]),
    ("agile", &["agile"]),
    ("scrum", &["scrum"]),
    ("linux", &["linux"]),
    ("testing", &["testing", "unit testing", "integration testing"]),
    ("junit", &["junit"]),
    ("pytest", &["pytest"]),
    ("soap", &["soap"]),
    ("xml", &["xml"]),
    ("json", &["json"]),
    // Soft skills
    ("communication", &["communication", "communication skills"]),
    ("leadership", &["leadership", "leader"]),
    ("teamwork", &["teamwork", "team collaboration", "collaboration"]),
    ("problem solving", &["problem solving", "analytical"]),
    ("project management", &["project management", "pm"]),
    ("critical thinking", &["critical thinking"]),
    ("time management", &["time management"]),
    ("adaptability", &["adaptability", "flexible"]),
];

static BUILTIN: LazyLock<SkillCatalog> = LazyLock::new(|| {
    let entries = BUILTIN_ENTRIES.iter().map(|(canonical, aliases)| {
        (
            (*canonical).to_string(),
            aliases.iter().map(|alias| (*alias).to_string()).collect(),
        )
    });
    SkillCatalog::from_entries(entries).expect("built-in skill catalog is alias-unique")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown skill: {0}")]
    UnknownSkill(String),
    #[error("alias {alias:?} is registered under both {first:?} and {second:?}")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },
}

/// Read-only alias → canonical lookup structure.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    alias_to_canonical: HashMap<String, String>,
    compact_to_canonical: HashMap<String, String>,
    canonical_to_aliases: BTreeMap<String, BTreeSet<String>>,
}

impl SkillCatalog {
    /// Builds a catalog from (canonical, aliases) pairs.
    ///
    /// Every name is NFKC-folded, lowercased and trimmed before insertion,
    /// and each canonical name registers itself as one of its own aliases.
    /// An alias appearing under two different canonical names is a
    /// configuration error caught here, not at matching time.
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut alias_to_canonical: HashMap<String, String> = HashMap::new();
        let mut canonical_to_aliases: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (raw_canonical, raw_aliases) in entries {
            let canonical = nfkc_lower_trim(&raw_canonical);
            if canonical.is_empty() {
                warn!("skipping catalog entry with an empty canonical name");
                continue;
            }

            let aliases = std::iter::once(canonical.clone())
                .chain(raw_aliases.iter().map(|alias| nfkc_lower_trim(alias)));
            for alias in aliases {
                if alias.is_empty() {
                    continue;
                }
                if let Some(existing) = alias_to_canonical.get(&alias) {
                    if existing != &canonical {
                        return Err(CatalogError::DuplicateAlias {
                            alias,
                            first: existing.clone(),
                            second: canonical,
                        });
                    }
                }
                alias_to_canonical.insert(alias.clone(), canonical.clone());
                canonical_to_aliases
                    .entry(canonical.clone())
                    .or_default()
                    .insert(alias);
            }
        }

        // Compact keys collapse separators, so distinct aliases can share one
        // key ("power bi" / "powerbi"). First alias in canonical order wins.
        let mut compact_to_canonical: HashMap<String, String> = HashMap::new();
        for (canonical, aliases) in &canonical_to_aliases {
            for alias in aliases {
                let compact = compact_key(alias);
                // Separator stripping can reduce an alias like "r." to one
                // character; keys that short collide too easily to keep.
                if compact.chars().count() < 2 {
                    continue;
                }
                compact_to_canonical
                    .entry(compact)
                    .or_insert_with(|| canonical.clone());
            }
        }

        Ok(Self {
            alias_to_canonical,
            compact_to_canonical,
            canonical_to_aliases,
        })
    }

    /// The compiled-in catalog, built once on first access.
    pub fn builtin() -> &'static SkillCatalog {
        &BUILTIN
    }

    /// Lowercase alias set for a known canonical skill.
    pub fn lookup_aliases(&self, canonical: &str) -> Result<&BTreeSet<String>, CatalogError> {
        let key = nfkc_lower_trim(canonical);
        self.canonical_to_aliases
            .get(&key)
            .ok_or(CatalogError::UnknownSkill(key))
    }

    /// Every registered canonical skill identifier.
    pub fn all_canonical_names(&self) -> BTreeSet<&str> {
        self.canonical_to_aliases
            .keys()
            .map(String::as_str)
            .collect()
    }

    pub fn contains_canonical(&self, name: &str) -> bool {
        self.canonical_to_aliases
            .contains_key(&nfkc_lower_trim(name))
    }

    pub fn len(&self) -> usize {
        self.canonical_to_aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical_to_aliases.is_empty()
    }

    /// Resolves a surface term to its canonical name: exact alias lookup,
    /// then separator-insensitive compact lookup, then a bounded
    /// Damerau-Levenshtein fallback for small typos.
    pub fn canonicalize(&self, term: &str) -> Option<&str> {
        let normalized = nfkc_lower_trim(term);
        if normalized.is_empty() {
            return None;
        }

        if let Some(canonical) = self.alias_to_canonical.get(&normalized) {
            return Some(canonical);
        }

        let compact = compact_key(term);
        if compact.chars().count() >= 2 {
            if let Some(canonical) = self.compact_to_canonical.get(&compact) {
                return Some(canonical);
            }
        }

        self.fuzzy_canonicalize(&compact)
    }

    fn fuzzy_canonicalize(&self, compact: &str) -> Option<&str> {
        if compact.len() < 5 {
            return None;
        }

        // Short aliases and short canonical targets ("go", "java") are only
        // reachable via the exact lookups above; fuzzing them produces false
        // positives on brief inputs. Scanning the sorted map keeps the result
        // deterministic: best distance wins, first canonical on ties.
        let mut best: Option<(usize, &str)> = None;
        for (canonical, aliases) in &self.canonical_to_aliases {
            if canonical.len() < 5 {
                continue;
            }
            for alias in aliases {
                let alias_key = compact_key(alias);
                if alias_key.len() < 5 {
                    continue;
                }

                let distance = damerau_levenshtein(compact, &alias_key);
                if distance == 0 {
                    return Some(canonical);
                }

                let len = compact.len().max(alias_key.len());
                let acceptable = distance == 1 || (len >= 8 && distance == 2);
                if !acceptable {
                    continue;
                }

                match best {
                    None => best = Some((distance, canonical)),
                    Some((best_distance, _)) if distance < best_distance => {
                        best = Some((distance, canonical));
                    }
                    _ => {}
                }
            }
        }

        best.map(|(_, canonical)| canonical)
    }

    /// Canonical form when the term is known, otherwise the normalized
    /// lowercase input unchanged.
    pub fn normalize_term(&self, term: &str) -> String {
        match self.canonicalize(term) {
            Some(canonical) => canonical.to_string(),
            None => nfkc_lower_trim(term),
        }
    }

    /// Normalizes an explicitly supplied skill list into a deduplicated set.
    pub fn normalize_terms(&self, terms: &[String]) -> SkillSet {
        SkillSet::from_terms(
            terms
                .iter()
                .filter(|term| !term.trim().is_empty())
                .map(|term| self.normalize_term(term)),
        )
    }

    /// Iterates every (alias, canonical) pair, sorted by canonical name.
    pub(crate) fn alias_index(&self) -> impl Iterator<Item = (&str, &str)> {
        self.canonical_to_aliases
            .iter()
            .flat_map(|(canonical, aliases)| {
                aliases
                    .iter()
                    .map(move |alias| (alias.as_str(), canonical.as_str()))
            })
    }
}

pub(crate) fn nfkc_lower_trim(input: &str) -> String {
    input.nfkc().collect::<String>().trim().to_lowercase()
}

fn compact_key(input: &str) -> String {
    input
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '_' | '/'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_of(entries: &[(&str, &[&str])]) -> Result<SkillCatalog, CatalogError> {
        SkillCatalog::from_entries(entries.iter().map(|(canonical, aliases)| {
            (
                (*canonical).to_string(),
                aliases.iter().map(|alias| (*alias).to_string()).collect(),
            )
        }))
    }

    #[test]
    fn builtin_catalog_is_alias_unique() {
        let rebuilt = catalog_of(BUILTIN_ENTRIES);
        assert!(rebuilt.is_ok(), "{:?}", rebuilt.err());
        assert_eq!(SkillCatalog::builtin().len(), BUILTIN_ENTRIES.len());
    }

    #[test]
    fn lookup_aliases_returns_lowercase_aliases() {
        let catalog = SkillCatalog::builtin();
        let aliases = catalog.lookup_aliases("python").unwrap();
        assert!(aliases.contains("py"));
        assert!(aliases.contains("python"));

        // Canonical lookups fold case too.
        assert!(catalog.lookup_aliases("Kubernetes").is_ok());
    }

    #[test]
    fn lookup_aliases_fails_for_unknown_skill() {
        let err = SkillCatalog::builtin()
            .lookup_aliases("underwater basket weaving")
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownSkill("underwater basket weaving".into())
        );
    }

    #[test]
    fn all_canonical_names_covers_the_table() {
        let names = SkillCatalog::builtin().all_canonical_names();
        assert!(names.contains("python"));
        assert!(names.contains("machine learning"));
        assert!(names.contains("ci/cd"));
        assert!(names.contains("communication"));
        assert_eq!(names.len(), BUILTIN_ENTRIES.len());
    }

    #[test]
    fn duplicate_alias_across_canonicals_is_rejected() {
        let err = catalog_of(&[("python", &["py"]), ("pytorch", &["py"])]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateAlias {
                alias: "py".into(),
                first: "python".into(),
                second: "pytorch".into(),
            }
        );
    }

    #[test]
    fn canonical_name_collides_with_foreign_alias() {
        // "java" registers itself; a second skill may not claim it.
        let err = catalog_of(&[("java", &[]), ("jvm", &["java"])]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateAlias { alias, .. } if alias == "java"));
    }

    #[test]
    fn repeated_alias_under_same_canonical_is_fine() {
        let catalog = catalog_of(&[("python", &["py", "py", "python"])]).unwrap();
        assert_eq!(catalog.lookup_aliases("python").unwrap().len(), 2);
    }

    #[test]
    fn canonicalize_resolves_exact_aliases() {
        let catalog = SkillCatalog::builtin();
        assert_eq!(catalog.canonicalize("k8s"), Some("kubernetes"));
        assert_eq!(catalog.canonicalize("C#"), Some("csharp"));
        assert_eq!(catalog.canonicalize("Node.js"), Some("nodejs"));
        assert_eq!(catalog.canonicalize("golang"), Some("go"));
    }

    #[test]
    fn canonicalize_normalizes_fullwidth_and_separators() {
        let catalog = SkillCatalog::builtin();
        assert_eq!(catalog.canonicalize("ＡＷＳ"), Some("aws"));
        assert_eq!(catalog.canonicalize("Power-BI"), Some("power bi"));
        assert_eq!(catalog.canonicalize("sci kit learn"), Some("scikit-learn"));
    }

    #[test]
    fn canonicalize_tolerates_small_typos() {
        let catalog = SkillCatalog::builtin();
        assert_eq!(catalog.canonicalize("dokcer"), Some("docker"));
        assert_eq!(catalog.canonicalize("kuberntes"), Some("kubernetes"));
        assert_eq!(catalog.canonicalize("postgresqll"), Some("postgresql"));
    }

    #[test]
    fn canonicalize_does_not_fuzz_short_tokens() {
        let catalog = SkillCatalog::builtin();
        assert_eq!(catalog.canonicalize("jva"), None);
        assert_eq!(catalog.canonicalize("रust"), None);
        assert_eq!(catalog.canonicalize("c"), None);
    }

    #[test]
    fn normalize_term_keeps_unknown_skills_lowercased() {
        let catalog = SkillCatalog::builtin();
        assert_eq!(catalog.normalize_term("COBOL"), "cobol");
        assert_eq!(catalog.normalize_term("  Py "), "python");
    }

    #[test]
    fn normalize_terms_dedupes_aliases() {
        let catalog = SkillCatalog::builtin();
        let set = catalog.normalize_terms(&[
            "Python".to_string(),
            "py".to_string(),
            "  ".to_string(),
            "K8s".to_string(),
        ]);
        assert_eq!(set.to_vec(), vec!["kubernetes", "python"]);
    }
}
