//! JSON Import/Export für Spline-Markups (`*.markups.json`).
//!
//! Das Dateiformat ist verschachteltes JSON; intern wird über eine flache
//! Translation-Map mit JSON-Pointer-Pfaden gelesen und geschrieben.

pub mod keys;
pub mod reader;
pub mod translation_map;
pub mod writer;

pub use reader::{parse_splines_json, read_splines_node};
pub use translation_map::{MapValue, TranslationMap};
pub use writer::{write_splines_json, write_splines_node};

use crate::core::{NodeClass, SceneNode};
use anyhow::{Context, Result};
use std::path::Path;

/// Standard-Dateiendung beim Schreiben.
pub const DEFAULT_WRITE_FILE_EXTENSION: &str = "markups.json";

/// Nur Spline-Nodes können aus diesem Format gelesen werden.
pub fn can_read_in_reference_node(node: &SceneNode) -> bool {
    node.class() == NodeClass::Splines
}

/// Liest eine `*.markups.json`-Datei in einen Spline-Node.
pub fn load_splines_file(path: &Path, node: &mut crate::core::SplinesNode) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Datei konnte nicht gelesen werden: {}", path.display()))?;
    parse_splines_json(&content, node)
        .with_context(|| format!("Datei fehlerhaft: {}", path.display()))
}

/// Schreibt einen Spline-Node als `*.markups.json`-Datei.
pub fn save_splines_file(path: &Path, node: &crate::core::SplinesNode) -> Result<()> {
    let content = write_splines_json(node)?;
    std::fs::write(path, content)
        .with_context(|| format!("Datei konnte nicht geschrieben werden: {}", path.display()))?;
    log::info!("Splines gespeichert nach: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ModelNode, SplinesNode};

    #[test]
    fn test_only_splines_nodes_are_readable() {
        assert!(can_read_in_reference_node(&SceneNode::Splines(SplinesNode::new("S"))));
        assert!(!can_read_in_reference_node(&SceneNode::Model(ModelNode::new("M"))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = std::env::temp_dir().join("markups_splines_fehlt.markups.json");
        let mut node = SplinesNode::new("S");
        let err = load_splines_file(&path, &mut node).expect_err("Fehler erwartet");
        assert!(format!("{:#}", err).contains("markups_splines_fehlt"));
    }
}
