//! Handler für Kamera und Viewport.

use crate::app::AppState;
use crate::core::Camera3D;
use glam::DVec2;

/// Aktualisiert die Viewport-Größe im State.
pub fn set_viewport_size(state: &mut AppState, size: DVec2) {
    if size.x > 0.0 && size.y > 0.0 {
        state.view.viewport = size;
    } else {
        log::warn!("Ungültige Viewport-Größe ignoriert: {:?}", size);
    }
}

/// Übernimmt die Kamera des Hosts.
pub fn set_camera(state: &mut AppState, camera: Camera3D) {
    state.view.camera = camera;
    state.view.request_render();
}
