//! On-disk request and catalog formats.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use shortlist_core::catalog::SkillCatalog;

use crate::error::CliError;

/// One screening request: a job and the candidates to rank against it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreeningRequest {
    pub job: JobDoc,
    #[serde(default)]
    pub candidates: Vec<CandidateDoc>,
}

/// Job-side input. At least one of `embedding` and `description` must be
/// present; the explicit vector wins when both are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit requirement list; when absent, requirements are extracted
    /// from `description`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<String>>,
}

/// Candidate-side input. `id` is carried through to the output unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateDoc {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

pub fn load_request(path: &Path) -> Result<ScreeningRequest, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a catalog file: a JSON object of canonical name → alias list.
/// The map is read in sorted key order, so validation errors are stable
/// across runs.
pub fn load_catalog(path: &Path) -> Result<SkillCatalog, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&raw).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(SkillCatalog::from_entries(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_json(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_minimal_request() {
        let file = temp_json(
            r#"{
                "job": {"description": "Python backend role", "required_skills": ["python"]},
                "candidates": [{"id": "c-1", "resume_text": "Python developer"}]
            }"#,
        );
        let request = load_request(file.path()).unwrap();
        assert_eq!(request.candidates.len(), 1);
        assert_eq!(request.candidates[0].id, "c-1");
        assert_eq!(
            request.job.required_skills.as_deref(),
            Some(&["python".to_string()][..])
        );
    }

    #[test]
    fn candidates_default_to_empty() {
        let file = temp_json(r#"{"job": {"description": "any"}}"#);
        let request = load_request(file.path()).unwrap();
        assert!(request.candidates.is_empty());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_request(Path::new("/nonexistent/request.json")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = temp_json("{not json");
        let err = load_request(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn loads_a_catalog_file() {
        let file = temp_json(r#"{"fortran": ["fortran", "f77"], "cobol": ["cobol"]}"#);
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.canonicalize("f77"), Some("fortran"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn catalog_with_duplicate_alias_is_rejected() {
        let file = temp_json(r#"{"fortran": ["legacy"], "cobol": ["legacy"]}"#);
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Catalog(_)));
    }
}
