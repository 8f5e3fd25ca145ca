use crate::core::Camera3D;
use glam::DVec2;

/// View-bezogener Anwendungszustand
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// 3D-Kamera für Picking und Projektion
    pub camera: Camera3D,
    /// Aktuelle Viewport-Größe in Pixel
    pub viewport: DVec2,
    /// Anzahl angeforderter Renders (vom Host abgeholt)
    pub render_requests: u64,
}

impl ViewState {
    /// Erstellt den Standard-View-Zustand.
    pub fn new() -> Self {
        Self {
            camera: Camera3D::new(),
            viewport: DVec2::new(800.0, 600.0),
            render_requests: 0,
        }
    }

    /// Fordert ein Neuzeichnen an.
    pub fn request_render(&mut self) {
        self.render_requests += 1;
    }

    /// Entnimmt die angeforderten Renders.
    pub fn take_render_requests(&mut self) -> u64 {
        std::mem::take(&mut self.render_requests)
    }
}
