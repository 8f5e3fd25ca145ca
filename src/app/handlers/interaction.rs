//! Handler für Platzier-Modus und Punkt-Platzierung.

use crate::app::state::InteractionMode;
use crate::app::use_cases;
use crate::app::AppState;
use crate::core::NodeId;
use glam::DVec2;

/// Aktiviert die Spline-Klasse (und optional einen Node) als Platzier-Ziel.
pub fn activate_place_node(state: &mut AppState, node: Option<NodeId>) {
    use_cases::interaction::activate_place_node(state, node);
}

/// Wechselt den Interaktionsmodus.
pub fn set_mode(state: &mut AppState, mode: InteractionMode) {
    use_cases::interaction::set_interaction_mode(state, mode);
}

/// Setzt die Platzier-Modus-Persistenz.
pub fn set_persistence(state: &mut AppState, persistent: bool) {
    use_cases::interaction::set_place_mode_persistence(state, persistent);
}

/// Platziert einen Punkt an der Display-Position.
pub fn place_point(state: &mut AppState, display_pos: DVec2) {
    use_cases::placement::place_point(state, display_pos);
}

/// Beendet die laufende Interaktion.
pub fn stop(state: &mut AppState) {
    use_cases::interaction::stop_interaction(state);
}

/// Entfernt die selektierten Punkte des aktiven Nodes.
pub fn delete_selected_points(state: &mut AppState) {
    use_cases::delete_points::delete_selected_points(state);
}
