//! Handler für Widget-Interaktionen (Handles ziehen, einfügen, zurückschreiben).

use crate::app::use_cases;
use crate::app::widgets::WidgetId;
use crate::app::AppState;
use glam::DVec3;

/// Verschiebt einen Widget-Handle.
pub fn move_handle(state: &mut AppState, widget: WidgetId, handle: usize, position: DVec3) {
    use_cases::widget_edit::move_widget_handle(state, widget, handle, position);
}

/// Fügt einen Widget-Handle an.
pub fn insert_handle(state: &mut AppState, widget: WidgetId, position: DVec3) {
    use_cases::widget_edit::insert_widget_handle(state, widget, position);
}

/// Übernimmt den Widget-Zustand in den Spline-Node.
pub fn update_node(state: &mut AppState, widget: WidgetId) {
    use_cases::widget_edit::update_node_from_widget(state, widget);
}
