use assert_matches::assert_matches;

use harvard_artifacts::config::ConfigLoader;
use harvard_artifacts::error::HarvardError;

#[test]
fn resolve_reads_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("harvard-artifacts.json");
    std::fs::write(
        &path,
        r#"{
            "api_key": "file-key",
            "db_path": "snapshots/harvard.db",
            "page_size": 50,
            "max_pages": 10
        }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(resolved.api_key.as_deref(), Some("file-key"));
    assert_eq!(resolved.db_path.as_str(), "snapshots/harvard.db");
    assert_eq!(resolved.page_size, 50);
    assert_eq!(resolved.max_pages, 10);
    // Untouched fields keep the original tool's defaults.
    assert_eq!(resolved.min_object_count, 2500);
    assert_eq!(resolved.page_pause_ms, 500);
}

#[test]
fn resolve_rejects_missing_explicit_path() {
    let err = ConfigLoader::resolve(Some("/nonexistent/harvard-artifacts.json")).unwrap_err();
    assert_matches!(err, HarvardError::ConfigRead(_));
}

#[test]
fn resolve_rejects_malformed_json() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("harvard-artifacts.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = ConfigLoader::resolve(Some(path.to_str().unwrap())).unwrap_err();
    assert_matches!(err, HarvardError::ConfigParse(_));
}
