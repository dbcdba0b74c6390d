//! Tests for dataset identity and client configuration.

use std::io::Write;

use pedgene_taiga::{DatasetRef, FetchError, TaigaConfig};
use tempfile::NamedTempFile;

#[test]
fn dataset_ref_displays_taiga_id() {
    let dataset = DatasetRef::new("internal-21q4").with_version(12).with_file("CRISPR_gene_effect");
    assert_eq!(dataset.to_string(), "internal-21q4.12/CRISPR_gene_effect");
    assert_eq!(DatasetRef::new("lines").to_string(), "lines");
}

#[test]
fn dataset_ref_parses_full_id() {
    let dataset: DatasetRef = "internal-21q4.12/CRISPR_gene_effect".parse().unwrap();
    assert_eq!(dataset.name, "internal-21q4");
    assert_eq!(dataset.version, Some(12));
    assert_eq!(dataset.file.as_deref(), Some("CRISPR_gene_effect"));
}

#[test]
fn dataset_ref_parses_partial_ids() {
    let dataset: DatasetRef = "expression-matrix".parse().unwrap();
    assert_eq!(dataset, DatasetRef::new("expression-matrix"));

    let dataset: DatasetRef = "expression-matrix.4".parse().unwrap();
    assert_eq!(dataset, DatasetRef::new("expression-matrix").with_version(4));

    // A non-numeric suffix is part of the name.
    let dataset: DatasetRef = "release.v2/data".parse().unwrap();
    assert_eq!(dataset.name, "release.v2");
    assert_eq!(dataset.version, None);
}

#[test]
fn dataset_ref_rejects_empty_name() {
    assert!("/file".parse::<DatasetRef>().is_err());
    assert!(".3".parse::<DatasetRef>().is_err());
}

#[test]
fn explicit_token_wins_over_file() {
    let config = TaigaConfig::default()
        .with_token("  abc  ")
        .with_token_path("/nonexistent/token");
    assert_eq!(config.resolve_token().unwrap(), "abc");
}

#[test]
fn token_is_read_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "token-from-file").unwrap();

    let config = TaigaConfig::default().with_token_path(file.path());
    assert_eq!(config.resolve_token().unwrap(), "token-from-file");
}

#[test]
fn missing_token_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");
    let config = TaigaConfig::default().with_token_path(&path);

    match config.resolve_token() {
        Err(FetchError::MissingToken(reported)) => assert_eq!(reported, path),
        other => panic!("expected MissingToken, got {other:?}"),
    }
}

#[test]
fn api_root_drops_trailing_slash() {
    let config = TaigaConfig::default().with_base_url("https://taiga.example.org/");
    assert_eq!(config.api_root(), "https://taiga.example.org");
}

#[test]
fn config_deserializes_with_defaults() {
    let config: TaigaConfig =
        serde_json::from_str(r#"{"base_url": "https://t", "token_path": "/tmp/token"}"#).unwrap();
    assert_eq!(config.timeout_secs, 120);
    assert!(!config.matrix_index);
    assert!(config.token.is_none());
}

#[test]
fn fetch_error_messages() {
    let err = FetchError::NotReady {
        dataset: "lines.2".to_string(),
        state: "running".to_string(),
    };
    insta::assert_snapshot!(err, @"dataset lines.2 is not ready (state: running)");
    assert!(err.is_transient());
    assert!(!FetchError::NotFound("lines".to_string()).is_transient());
}
