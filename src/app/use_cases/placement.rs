//! Use-Case: Punkt per Klick im aktiven Spline-Node platzieren.

use super::pick;
use crate::app::AppState;
use crate::core::{NodeClass, NodeId, SplinesNode};
use glam::DVec2;

/// Name neu angelegter Spline-Nodes.
const NEW_NODE_NAME: &str = "S";

/// Liefert den aktiven Platzier-Node; legt bei Bedarf einen neuen Spline-Node an.
pub fn ensure_active_splines_node(state: &mut AppState) -> NodeId {
    if let Some(id) = state
        .interaction
        .active_place_node_id
        .clone()
        .filter(|id| state.scene.splines(id).is_some())
    {
        return id;
    }

    let node = SplinesNode::with_defaults(NEW_NODE_NAME, state.options.spline_defaults.clone());
    let id = state.scene.add_splines_node(node);
    log::info!("Neuer Spline-Node {} als Platzier-Ziel angelegt", id);
    state.interaction.active_place_node_class = Some(NodeClass::Splines);
    state.interaction.active_place_node_id = Some(id.clone());
    id
}

/// Platziert einen Punkt an der Display-Position.
///
/// Ohne aktuellen Eintrag entsteht ein neuer Eintrag, sonst wird der Punkt
/// an den aktuellen Eintrag angehängt. Gibt Node und Eintrags-Index zurück.
pub fn place_point(state: &mut AppState, display_pos: DVec2) -> Option<(NodeId, usize)> {
    let node_id = ensure_active_splines_node(state);
    let picked = pick::pick_world_position(
        &state.scene,
        &state.view.camera,
        state.view.viewport,
        display_pos,
    );

    let node = state.scene.splines_mut(&node_id)?;
    let was_modifying = node.start_modify();
    let index = match node.current_spline() {
        Some(n) if n < node.number_of_markups() => {
            node.add_point_to_nth_markup(picked.position, n);
            n
        }
        _ => node.add_spline(picked.position),
    };
    node.end_modify(was_modifying);

    log::debug!(
        "Punkt {:?} in {} / Eintrag {} platziert (Modell-Treffer: {})",
        picked.position,
        node_id,
        index,
        picked.model.is_some()
    );
    state.view.request_render();
    Some((node_id, index))
}
