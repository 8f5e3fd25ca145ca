//! Use-Cases für Benutzer-Interaktionen an Kurven-Widgets.

use crate::app::widgets::WidgetId;
use crate::app::AppState;
use glam::DVec3;

fn interactive_widget(state: &AppState, widget: WidgetId) -> bool {
    match state.manager.widget(widget) {
        Some(w) if w.accepts_interaction() => true,
        Some(_) => {
            log::debug!("{} ist deaktiviert oder gesperrt", widget);
            false
        }
        None => {
            log::warn!("{} unbekannt", widget);
            false
        }
    }
}

/// Verschiebt einen Handle eines aktiven, nicht gesperrten Widgets.
pub fn move_widget_handle(
    state: &mut AppState,
    widget: WidgetId,
    handle: usize,
    position: DVec3,
) -> bool {
    if !interactive_widget(state, widget) {
        return false;
    }
    state
        .manager
        .widget_mut(widget)
        .is_some_and(|w| w.representation_mut().move_handle(handle, position))
}

/// Hängt einen Handle an ein aktives, nicht gesperrtes Widget an.
pub fn insert_widget_handle(state: &mut AppState, widget: WidgetId, position: DVec3) -> bool {
    if !interactive_widget(state, widget) {
        return false;
    }
    match state.manager.widget_mut(widget) {
        Some(w) => {
            w.representation_mut().insert_handle(position);
            true
        }
        None => false,
    }
}

/// Schreibt den Widget-Zustand in den Spline-Node zurück.
pub fn update_node_from_widget(state: &mut AppState, widget: WidgetId) -> bool {
    if !interactive_widget(state, widget) {
        return false;
    }
    state
        .manager
        .update_node_from_widget(&mut state.scene, widget)
}
