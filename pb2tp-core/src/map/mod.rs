//! Section builders, one per sheet tab, and the document assembler.

pub mod actions;
pub mod background;
pub mod character;
pub mod feats;
pub mod inventory;
pub mod spells;

use crate::property::Document;
use pathbuilder::Build;

/// Convert a build into a complete Tableplop document.
///
/// The Character builder also emits the Inventory, Feats and Background
/// tabs; Actions and Spells follow. Output depends only on `build`.
pub fn convert(build: &Build) -> Document {
    let mut properties = character::build_character(build);
    properties.extend(actions::build_actions(build));
    properties.extend(spells::build_spells(build));

    let document = Document::new(properties);
    for issue in document.integrity_issues() {
        tracing::warn!(%issue, "document integrity problem");
    }
    tracing::info!(
        character = %build.name,
        level = build.level,
        properties = document.properties.len(),
        "converted build"
    );
    document
}
