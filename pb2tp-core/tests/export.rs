//! File export tests.

use pathbuilder::Build;
use pb2tp_core::{convert, export_file_name, load_json, save_json, ExportError};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let build = Build::from_value(json!({"name": "Ezren / the \"Wise\"", "level": 3}));
    let doc = convert(&build);

    let file_name = export_file_name(&doc, Some("182461"));
    assert_eq!(file_name, "tableplop_Ezren_the_Wise_182461.json");

    let path = temp_dir.path().join(&file_name);
    save_json(&doc, &path).await.expect("Save should succeed");

    let raw = std::fs::read_to_string(&path).expect("file exists");
    assert!(raw.starts_with("{\n"));
    assert!(raw.contains("\"type\": \"tableplop-character-v2\""));

    let loaded = load_json(&path).await.expect("Load should succeed");
    assert_eq!(loaded.properties.len(), doc.properties.len());
    for (a, b) in loaded.properties.iter().zip(&doc.properties) {
        assert_eq!((a.id, a.parent_id, a.kind), (b.id, b.parent_id, b.kind));
        assert_eq!(a.name, b.name);
        assert_eq!(a.value_int(), b.value_int());
        assert_eq!(a.value_str(), b.value_str());
    }
    assert!(loaded.integrity_issues().is_empty());
}

#[tokio::test]
async fn test_load_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let missing = load_json(temp_dir.path().join("missing.json")).await;
    assert!(matches!(missing, Err(ExportError::Io(_))));

    let garbage = temp_dir.path().join("garbage.json");
    std::fs::write(&garbage, "not json").expect("write should succeed");
    assert!(matches!(load_json(&garbage).await, Err(ExportError::Json(_))));
}

#[test]
fn test_unnamed_build_file_name() {
    let doc = convert(&Build::default());
    assert_eq!(export_file_name(&doc, None), "tableplop_Character_export.json");
}
