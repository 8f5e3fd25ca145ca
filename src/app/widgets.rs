//! Interaktive Kurven-Widgets (Spline / Polyline) mit Handle-Repräsentation.
//!
//! Ein Widget hält nur abgeleiteten Zustand; maßgeblich ist immer der
//! Spline-Node. Hosts verschieben Handles über `move_handle`/`insert_handle`
//! und melden danach eine Widget-Interaktion an den Controller.

use crate::core::RepresentationType;
use crate::shared::spline_geometry::catmull_rom_chain;
use glam::DVec3;

/// Eindeutige ID eines Widgets innerhalb eines Displayable-Managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Widget#{}", self.0)
    }
}

/// Widget-Variante, gewählt über den Repräsentationstyp des Eintrags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Catmull-Rom-Interpolation durch die Handles
    Spline,
    /// Gerade Segmente zwischen den Handles
    Polyline,
}

impl From<RepresentationType> for WidgetKind {
    fn from(representation: RepresentationType) -> Self {
        match representation {
            RepresentationType::Spline => WidgetKind::Spline,
            RepresentationType::Polyline => WidgetKind::Polyline,
        }
    }
}

impl WidgetKind {
    /// Passt diese Variante zum Repräsentationstyp eines Eintrags?
    pub fn matches(self, representation: RepresentationType) -> bool {
        self == WidgetKind::from(representation)
    }
}

/// Handle-Repräsentation einer Kurve.
#[derive(Debug, Clone)]
pub struct CurveRepresentation {
    kind: WidgetKind,
    handles: Vec<DVec3>,
    closed: bool,
    current_handle: Option<usize>,
    samples_per_segment: usize,
    boundary: Vec<DVec3>,
}

impl CurveRepresentation {
    fn new(kind: WidgetKind, samples_per_segment: usize) -> Self {
        Self {
            kind,
            handles: Vec::new(),
            closed: false,
            current_handle: None,
            samples_per_segment: samples_per_segment.max(1),
            boundary: Vec::new(),
        }
    }

    pub fn handles(&self) -> &[DVec3] {
        &self.handles
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// Ersetzt alle Handles (Anzahl und Positionen).
    pub fn set_handles(&mut self, handles: &[DVec3]) {
        self.handles.clear();
        self.handles.extend_from_slice(handles);
        if self
            .current_handle
            .is_some_and(|current| current >= self.handles.len())
        {
            self.current_handle = None;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Aktiver Handle (`None` = keiner).
    pub fn current_handle(&self) -> Option<usize> {
        self.current_handle
    }

    /// Setzt den aktiven Handle; ungültige Indizes deaktivieren ihn.
    pub fn set_current_handle(&mut self, index: Option<usize>) {
        self.current_handle = index.filter(|&i| i < self.handles.len());
    }

    /// Verschiebt einen Handle und macht ihn zum aktiven Handle.
    pub fn move_handle(&mut self, index: usize, position: DVec3) -> bool {
        let Some(handle) = self.handles.get_mut(index) else {
            log::warn!("move_handle: Handle-Index {} ungültig", index);
            return false;
        };
        *handle = position;
        self.current_handle = Some(index);
        true
    }

    /// Hängt einen Handle an, macht ihn aktiv und gibt seinen Index zurück.
    pub fn insert_handle(&mut self, position: DVec3) -> usize {
        self.handles.push(position);
        let index = self.handles.len() - 1;
        self.current_handle = Some(index);
        index
    }

    /// Berechnet das Randpolygon aus den aktuellen Handles neu.
    pub fn build_representation(&mut self) {
        self.boundary = match self.kind {
            WidgetKind::Spline => {
                catmull_rom_chain(&self.handles, self.samples_per_segment, self.closed)
            }
            WidgetKind::Polyline => self.handles.clone(),
        };
    }

    /// Randpolygon aus dem letzten `build_representation`.
    pub fn boundary(&self) -> &[DVec3] {
        &self.boundary
    }
}

/// Interaktives Kurven-Widget.
#[derive(Debug, Clone)]
pub struct CurveWidget {
    id: WidgetId,
    kind: WidgetKind,
    representation: CurveRepresentation,
    enabled: bool,
    process_events: bool,
}

impl CurveWidget {
    /// Erstellt ein deaktiviertes Widget ohne Handles.
    pub fn new(id: WidgetId, kind: WidgetKind, samples_per_segment: usize) -> Self {
        Self {
            id,
            kind,
            representation: CurveRepresentation::new(kind, samples_per_segment),
            enabled: false,
            process_events: true,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn representation(&self) -> &CurveRepresentation {
        &self.representation
    }

    pub fn representation_mut(&mut self) -> &mut CurveRepresentation {
        &mut self.representation
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Nimmt das Widget Benutzer-Interaktionen an?
    pub fn processes_events(&self) -> bool {
        self.process_events
    }

    pub fn set_process_events(&mut self, process_events: bool) {
        self.process_events = process_events;
    }

    /// Nur aktive, nicht gesperrte Widgets reagieren auf Eingaben.
    pub fn accepts_interaction(&self) -> bool {
        self.enabled && self.process_events
    }
}
