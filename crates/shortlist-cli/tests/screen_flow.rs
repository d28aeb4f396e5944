//! End-to-end flows through the file-based API: load a request from disk,
//! screen it, and check the shape of what a caller would see.

use std::io::Write as _;

use shortlist_cli::input::{load_catalog, load_request};
use shortlist_cli::screen::{render_text, Screener};
use shortlist_core::catalog::SkillCatalog;
use shortlist_core::embed::HashEmbedder;
use shortlist_core::extract::CatalogSkillExtractor;
use shortlist_core::scoring::{Scorer, ScoringWeights};

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn default_scorer() -> Scorer {
    Scorer::new(ScoringWeights::default()).unwrap()
}

#[test]
fn ranks_a_request_loaded_from_disk() {
    let file = write_temp(
        r#"{
            "job": {
                "embedding": [1.0, 0.0],
                "required_skills": ["python", "docker"]
            },
            "candidates": [
                {"id": "alice", "embedding": [1.0, 0.0], "skills": ["python", "docker"]},
                {"id": "bob", "embedding": [0.6, 0.8], "skills": ["python"]},
                {"id": "carol", "embedding": [0.0, 1.0], "skills": []}
            ]
        }"#,
    );

    let request = load_request(file.path()).unwrap();
    let embedder = HashEmbedder::new(64);
    let extractor = CatalogSkillExtractor::default();
    let screener = Screener::new(
        SkillCatalog::builtin(),
        &embedder,
        &extractor,
        default_scorer(),
    );

    let response = screener.screen(&request).unwrap();
    let order: Vec<&str> = response
        .reports
        .iter()
        .map(|r| r.candidate_id.as_str())
        .collect();
    assert_eq!(order, vec!["alice", "bob", "carol"]);
    assert_eq!(response.reports[0].rank, Some(1));
    assert_eq!(response.reports[2].rank, Some(3));
    assert_eq!(response.summary.top_candidate.as_deref(), Some("alice"));
}

#[test]
fn screening_twice_produces_identical_rankings() {
    let file = write_temp(
        r#"{
            "job": {"description": "Python engineer with aws and docker"},
            "candidates": [
                {"id": "a", "resume_text": "python and aws work, some docker"},
                {"id": "b", "resume_text": "docker specialist, python scripting"},
                {"id": "c", "resume_text": "sales and account management"}
            ]
        }"#,
    );

    let request = load_request(file.path()).unwrap();
    let embedder = HashEmbedder::new(128);
    let extractor = CatalogSkillExtractor::default();
    let screener = Screener::new(
        SkillCatalog::builtin(),
        &embedder,
        &extractor,
        default_scorer(),
    );

    let first = screener.screen(&request).unwrap();
    let second = screener.screen(&request).unwrap();
    assert_eq!(first.reports, second.reports);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn tied_candidates_keep_submission_order() {
    let file = write_temp(
        r#"{
            "job": {"embedding": [1.0, 0.0], "required_skills": ["python"]},
            "candidates": [
                {"id": "first", "embedding": [1.0, 0.0], "skills": ["python"]},
                {"id": "second", "embedding": [1.0, 0.0], "skills": ["python"]}
            ]
        }"#,
    );

    let request = load_request(file.path()).unwrap();
    let embedder = HashEmbedder::new(64);
    let extractor = CatalogSkillExtractor::default();
    let screener = Screener::new(
        SkillCatalog::builtin(),
        &embedder,
        &extractor,
        default_scorer(),
    );

    let response = screener.screen(&request).unwrap();
    assert_eq!(response.reports[0].candidate_id, "first");
    assert_eq!(response.reports[0].rank, Some(1));
    assert_eq!(response.reports[1].candidate_id, "second");
    assert_eq!(response.reports[1].rank, Some(2));
}

#[test]
fn oversized_request_file_is_rejected() {
    let candidates: Vec<serde_json::Value> = (0..51)
        .map(|i| {
            serde_json::json!({
                "id": format!("c-{i}"),
                "embedding": [1.0, 0.0]
            })
        })
        .collect();
    let request_json = serde_json::json!({
        "job": {"embedding": [1.0, 0.0]},
        "candidates": candidates
    });
    let file = write_temp(&request_json.to_string());

    let request = load_request(file.path()).unwrap();
    let embedder = HashEmbedder::new(64);
    let extractor = CatalogSkillExtractor::default();
    let screener = Screener::new(
        SkillCatalog::builtin(),
        &embedder,
        &extractor,
        default_scorer(),
    );

    let err = screener.screen(&request).unwrap_err();
    assert_eq!(
        err.to_string(),
        "batch of 51 candidates exceeds the limit of 50"
    );
}

#[test]
fn custom_catalog_file_drives_canonicalization() {
    let catalog_file = write_temp(
        r#"{
            "quantum computing": ["quantum computing", "qiskit"],
            "python": ["python", "py"]
        }"#,
    );
    let request_file = write_temp(
        r#"{
            "job": {
                "embedding": [1.0, 0.0],
                "required_skills": ["qiskit", "py"]
            },
            "candidates": [
                {"id": "lab", "embedding": [1.0, 0.0], "skills": ["Quantum Computing", "Python"]}
            ]
        }"#,
    );

    let catalog = load_catalog(catalog_file.path()).unwrap();
    let request = load_request(request_file.path()).unwrap();
    let embedder = HashEmbedder::new(64);
    let extractor = CatalogSkillExtractor::new(&catalog);
    let screener = Screener::new(&catalog, &embedder, &extractor, default_scorer());

    let response = screener.screen(&request).unwrap();
    let report = &response.reports[0];
    assert_eq!(
        report.skill_match.matched_skills,
        vec!["python", "quantum computing"]
    );
    assert!(report.skill_match.missing_skills.is_empty());
    assert!((report.final_score - 1.0).abs() < 1e-6);
}

#[test]
fn response_json_keeps_its_published_shape() {
    let file = write_temp(
        r#"{
            "job": {"embedding": [1.0, 0.0], "required_skills": ["python"]},
            "candidates": [
                {"id": "alice", "embedding": [1.0, 0.0], "skills": ["python", "rust"]}
            ]
        }"#,
    );

    let request = load_request(file.path()).unwrap();
    let embedder = HashEmbedder::new(64);
    let extractor = CatalogSkillExtractor::default();
    let screener = Screener::new(
        SkillCatalog::builtin(),
        &embedder,
        &extractor,
        default_scorer(),
    );

    let response = screener.screen(&request).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();

    for key in ["run_id", "generated_at", "submitted", "scored", "reports", "summary", "skipped"] {
        assert!(value.get(key).is_some(), "response is missing {key}");
    }
    let report = &value["reports"][0];
    for key in [
        "candidate_id",
        "rank",
        "final_score",
        "final_score_percentage",
        "semantic_similarity",
        "semantic_similarity_percentage",
        "skill_match",
        "explanation",
    ] {
        assert!(report.get(key).is_some(), "report is missing {key}");
    }
    assert_eq!(report["rank"], 1);
    assert_eq!(report["skill_match"]["matched_skills"][0], "python");
    assert_eq!(report["skill_match"]["additional_skills"][0], "rust");
    assert_eq!(
        report["explanation"]["matched_skills_explanation"],
        "Found 1 out of 1 required skills."
    );

    let rendered = render_text(&response);
    assert!(rendered.contains("alice"));
    assert!(rendered.contains("scored 1 of 1 submitted candidates"));
}
