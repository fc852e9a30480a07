//! Writing converted documents to disk.

use crate::property::{Document, PropertyKind};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Errors from export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const MAX_STEM_LEN: usize = 50;
const FALLBACK_STEM: &str = "Character";

/// Make a character name safe to use as a file name stem.
///
/// Drops characters that are reserved on common filesystems along with
/// control characters, joins whitespace runs with `_`, and caps the result
/// at 50 characters. An empty result becomes `Character`.
pub fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .filter(|c| !c.is_control())
        .collect();
    let stem: String = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_STEM_LEN)
        .collect();
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// The character name recorded on the Character tab, if any.
pub fn character_name(doc: &Document) -> Option<&str> {
    doc.properties
        .iter()
        .find(|p| p.kind == PropertyKind::Text && p.name.as_deref() == Some("Name"))
        .and_then(|p| p.value_str())
}

/// `tableplop_<name>_<id>.json`, with `export` standing in for a missing id.
pub fn export_file_name(doc: &Document, id: Option<&str>) -> String {
    let stem = sanitize_file_stem(character_name(doc).unwrap_or_default());
    let id = id.map(str::trim).filter(|id| !id.is_empty()).unwrap_or("export");
    format!("tableplop_{stem}_{id}.json")
}

/// Save a document as pretty-printed JSON.
pub async fn save_json(doc: &Document, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let content = doc.to_json_pretty()?;
    fs::write(path.as_ref(), content).await?;
    tracing::debug!(path = %path.as_ref().display(), "saved document");
    Ok(())
}

/// Load a previously exported document.
pub async fn load_json(path: impl AsRef<Path>) -> Result<Document, ExportError> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyNode;

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Valeros the Bold"), "Valeros_the_Bold");
        assert_eq!(sanitize_file_stem("  a<b>:c\"d/e\\f|g?h*i  "), "abcdefghi");
        assert_eq!(sanitize_file_stem("Amiri \u{7} of   Kellid"), "Amiri_of_Kellid");
        assert_eq!(sanitize_file_stem(""), "Character");
        assert_eq!(sanitize_file_stem("???"), "Character");
        assert_eq!(sanitize_file_stem(&"x".repeat(80)).len(), 50);
    }

    #[test]
    fn test_export_file_name() {
        let named = Document::new(vec![PropertyNode::new(PropertyKind::Text)
            .with_name("Name")
            .with_value("Seelah")]);
        assert_eq!(export_file_name(&named, Some("123456")), "tableplop_Seelah_123456.json");
        assert_eq!(
            export_file_name(&Document::new(Vec::new()), None),
            "tableplop_Character_export.json"
        );
    }
}
