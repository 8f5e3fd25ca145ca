//! Handler für Datei-Operationen (Öffnen, Speichern, Schließen).

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::NodeId;
use std::path::PathBuf;

/// Lädt eine Spline-Datei als neuen Node.
pub fn load(state: &mut AppState, path: PathBuf) -> anyhow::Result<()> {
    use_cases::file_io::load_file(state, &path)?;
    Ok(())
}

/// Speichert einen Spline-Node.
///
/// `None` für Node/Pfad verwendet den aktiven Node bzw. den zuletzt bekannten Pfad.
pub fn save(state: &mut AppState, node: Option<NodeId>, path: Option<PathBuf>) -> anyhow::Result<()> {
    use_cases::file_io::save_file(state, node, path)?;
    Ok(())
}

/// Schließt die Scene.
pub fn close(state: &mut AppState) {
    use_cases::file_io::close_scene(state);
}
