//! Use-Case: selektierte Punkte per Löschtaste entfernen.

use crate::app::AppState;

/// Entfernt in jedem Eintrag des aktiven Nodes den selektierten Punkt.
///
/// Einträge ohne selektierten Punkt bleiben unverändert. Gibt die Anzahl
/// entfernter Punkte zurück.
pub fn delete_selected_points(state: &mut AppState) -> usize {
    let Some(id) = state.interaction.active_place_node_id.clone() else {
        return 0;
    };
    let Some(node) = state.scene.splines_mut(&id) else {
        log::warn!("delete_selected_points: aktiver Node {} fehlt", id);
        return 0;
    };

    let was_modifying = node.start_modify();
    let mut removed = 0;
    for n in 0..node.number_of_markups() {
        let Some(point) = node.spline(n).and_then(|attrs| attrs.selected_point_index) else {
            continue;
        };
        if node.remove_nth_control_point(n, point) {
            removed += 1;
        }
    }
    node.end_modify(was_modifying);

    log::debug!("{} selektierte Punkte in {} entfernt", removed, id);
    removed
}
