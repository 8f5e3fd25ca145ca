//! Use-Cases für Attribut-Änderungen an Spline-Einträgen und Display-Nodes.

use crate::app::AppState;
use crate::core::{NodeId, RepresentationType, SplinesNode};

fn with_node<R>(
    state: &mut AppState,
    node: &NodeId,
    operation: &str,
    f: impl FnOnce(&mut SplinesNode) -> R,
) -> Option<R> {
    match state.scene.splines_mut(node) {
        Some(splines) => Some(f(splines)),
        None => {
            log::warn!("{}: Spline-Node {} nicht gefunden", operation, node);
            None
        }
    }
}

/// Setzt die Interpolationsart eines Eintrags.
pub fn set_representation_type(
    state: &mut AppState,
    node: &NodeId,
    index: usize,
    representation: RepresentationType,
) -> bool {
    with_node(state, node, "set_representation_type", |splines| {
        splines.set_nth_spline_representation_type(index, representation)
    })
    .unwrap_or(false)
}

/// Setzt die Slab-Dicke eines Eintrags.
pub fn set_thickness(state: &mut AppState, node: &NodeId, index: usize, thickness: f64) -> bool {
    with_node(state, node, "set_thickness", |splines| {
        splines.set_nth_spline_thickness(index, thickness)
    })
    .unwrap_or(false)
}

/// Öffnet oder schließt die Kurve eines Eintrags.
pub fn set_closed(state: &mut AppState, node: &NodeId, index: usize, closed: bool) -> bool {
    with_node(state, node, "set_closed", |splines| {
        splines.set_nth_spline_closed(index, closed)
    })
    .unwrap_or(false)
}

/// Schaltet die Sichtbarkeit eines Markups-Display-Nodes.
pub fn set_display_visibility(state: &mut AppState, display: &NodeId, visible: bool) -> bool {
    let changed = state.scene.set_display_visibility(display, visible);
    if changed {
        state.view.request_render();
    }
    changed
}
