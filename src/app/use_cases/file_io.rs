//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use super::{models, sync};
use crate::app::AppState;
use crate::core::{NodeClass, NodeId, SplinesNode};
use crate::storage::{self, DEFAULT_WRITE_FILE_EXTENSION};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Leitet den Node-Namen aus dem Dateinamen ab (`Foo.markups.json` → `Foo`).
pub fn node_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{}", DEFAULT_WRITE_FILE_EXTENSION);
    let stem = match file_name.strip_suffix(&suffix) {
        Some(stem) => stem.to_string(),
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if stem.is_empty() {
        "S".to_string()
    } else {
        stem
    }
}

/// Lädt eine `*.markups.json`-Datei als neuen Spline-Node in die Scene.
///
/// Das Einfügen läuft als Batch-Verarbeitung; der Manager baut seine
/// Widgets danach einmalig aus der Scene auf.
pub fn load_file(state: &mut AppState, path: &Path) -> Result<NodeId> {
    let mut node =
        SplinesNode::with_defaults(node_name_from_path(path), state.options.spline_defaults.clone());
    storage::load_splines_file(path, &mut node)?;
    // Änderungen am losgelösten Node sind keine Scene-Events
    node.take_events();

    log::info!(
        "Splines geladen: {} ({} Einträge)",
        path.display(),
        node.number_of_markups()
    );

    state.scene.start_batch_processing();
    let id = state.scene.add_splines_node(node);
    models::resolve_associated_models(state, &id);
    sync::dispatch_scene_events(state);
    state.scene.end_batch_processing();

    state.interaction.active_place_node_class = Some(NodeClass::Splines);
    state.interaction.active_place_node_id = Some(id.clone());
    state.current_file_path = Some(path.to_path_buf());
    Ok(id)
}

/// Speichert einen Spline-Node.
///
/// Ohne Node wird der aktive Platzier-Node gespeichert, ohne Pfad der
/// zuletzt verwendete Pfad.
pub fn save_file(
    state: &mut AppState,
    node: Option<NodeId>,
    path: Option<PathBuf>,
) -> Result<PathBuf> {
    let node_id = node
        .or_else(|| state.interaction.active_place_node_id.clone())
        .context("Kein Spline-Node zum Speichern ausgewählt")?;
    let target = path
        .or_else(|| state.current_file_path.clone())
        .context("Kein Speicherpfad bekannt")?;
    let splines = state
        .scene
        .splines(&node_id)
        .with_context(|| format!("Spline-Node {} nicht gefunden", node_id))?;

    storage::save_splines_file(&target, splines)?;
    state.current_file_path = Some(target.clone());
    Ok(target)
}

/// Schließt die Scene und setzt den dateibezogenen Zustand zurück.
pub fn close_scene(state: &mut AppState) {
    state.scene.clear();
    state.interaction.active_place_node_id = None;
    state.current_file_path = None;
}
