//! Handler für Attribut-Änderungen und Modell-Zuordnung.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{NodeId, RepresentationType};

/// Setzt die Interpolationsart eines Eintrags.
pub fn set_representation_type(
    state: &mut AppState,
    node: NodeId,
    index: usize,
    representation: RepresentationType,
) {
    use_cases::spline_attributes::set_representation_type(state, &node, index, representation);
}

/// Setzt die Slab-Dicke eines Eintrags.
pub fn set_thickness(state: &mut AppState, node: NodeId, index: usize, thickness: f64) {
    use_cases::spline_attributes::set_thickness(state, &node, index, thickness);
}

/// Öffnet oder schließt einen Eintrag.
pub fn set_closed(state: &mut AppState, node: NodeId, index: usize, closed: bool) {
    use_cases::spline_attributes::set_closed(state, &node, index, closed);
}

/// Schaltet die Sichtbarkeit eines Display-Nodes.
pub fn set_display_visibility(state: &mut AppState, display: NodeId, visible: bool) {
    use_cases::spline_attributes::set_display_visibility(state, &display, visible);
}

/// Ordnet einem Eintrag ein neues Slab-Modell zu.
pub fn associate_model(state: &mut AppState, node: NodeId, index: usize) {
    use_cases::models::associate_model(state, &node, index);
}

/// Ordnet allen Einträgen ohne Zuordnung ein Slab-Modell zu.
pub fn associate_all_models(state: &mut AppState, node: NodeId) {
    use_cases::models::associate_all_models(state, &node);
}
