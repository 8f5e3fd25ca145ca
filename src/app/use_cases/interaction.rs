//! Use-Cases für den Interaktionsmodus (Platzieren / View-Transform).

use crate::app::state::InteractionMode;
use crate::app::AppState;
use crate::core::{NodeClass, NodeId};

/// Setzt die Spline-Klasse als Platzier-Ziel.
///
/// Ein übergebener Node wird aktiv, sofern er als Spline-Node existiert;
/// ohne Node bleibt der bisher aktive Node erhalten.
pub fn activate_place_node(state: &mut AppState, node: Option<NodeId>) {
    state.interaction.active_place_node_class = Some(NodeClass::Splines);
    match node {
        Some(id) if state.scene.splines(&id).is_some() => {
            state.interaction.active_place_node_id = Some(id);
        }
        Some(id) => log::warn!("Platzier-Node {} ist kein Spline-Node", id),
        None => {}
    }
}

/// Wechselt den Interaktionsmodus.
pub fn set_interaction_mode(state: &mut AppState, mode: InteractionMode) {
    if state.interaction.mode != mode {
        log::debug!("Interaktionsmodus: {:?}", mode);
        state.interaction.mode = mode;
    }
}

/// Setzt die Platzier-Modus-Persistenz.
pub fn set_place_mode_persistence(state: &mut AppState, persistent: bool) {
    state.interaction.place_mode_persistence = persistent;
}

/// Beendet die Platzierung: zurück in den View-Transform-Modus und neu zeichnen.
pub fn stop_interaction(state: &mut AppState) {
    set_interaction_mode(state, InteractionMode::ViewTransform);
    state.view.request_render();
}
