//! Event-Pumpe zwischen Scene und Displayable-Manager.

use crate::app::AppState;

/// Reicht anstehende Scene-Events an den Manager weiter, bis keine mehr
/// entstehen oder `max_event_rounds` erreicht ist.
///
/// Gibt die Anzahl verarbeiteter Events zurück.
pub fn dispatch_scene_events(state: &mut AppState) -> usize {
    let mut processed = 0;
    for _ in 0..state.options.max_event_rounds.max(1) {
        let events = state.scene.take_events();
        if events.is_empty() {
            break;
        }
        processed += events.len();
        state.manager.process_events(&mut state.scene, events);
    }

    let remaining = state.scene.pending_events();
    if remaining > 0 {
        log::warn!(
            "Event-Pumpe nach {} Runden abgebrochen, {} Events offen",
            state.options.max_event_rounds,
            remaining
        );
    }

    state.view.render_requests += state.manager.take_render_requests();
    processed
}
