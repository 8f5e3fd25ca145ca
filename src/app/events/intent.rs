use crate::app::widgets::WidgetId;
use crate::core::{Camera3D, NodeId, RepresentationType};
use glam::{DVec2, DVec3};
use std::path::PathBuf;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus View/Host ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    // ── Interaktion im 3D-View ──────────────────────────────────────
    /// Platzier-Modus für Spline-Nodes aktivieren (optional mit Ziel-Node)
    PlaceModeRequested { node: Option<NodeId> },
    /// Platzier-Modus nach einem Klick beibehalten
    PlaceModePersistenceChanged { persistent: bool },
    /// Linke Maustaste losgelassen (Display-Koordinaten, Ursprung unten links)
    LeftButtonReleased { display_pos: DVec2 },
    /// Rechte Maustaste losgelassen
    RightButtonReleased,
    /// Taste gedrückt (Key-Sym, z.B. "Delete")
    KeyPressed { key: String },
    /// Platzierung von außen beendet
    EndPlacementRequested,

    // ── Widgets ─────────────────────────────────────────────────────
    /// Handle eines Widgets gezogen
    WidgetHandleDragged {
        widget: WidgetId,
        handle: usize,
        position: DVec3,
    },
    /// Neuer Handle an einem Widget eingefügt
    WidgetHandleInserted { widget: WidgetId, position: DVec3 },

    // ── View ────────────────────────────────────────────────────────
    /// Viewport-Größe hat sich geändert (Pixel)
    ViewportResized { size: DVec2 },
    /// Kamera wurde vom Host verändert
    CameraChanged { camera: Camera3D },

    // ── Spline-Attribute ────────────────────────────────────────────
    /// Repräsentationstyp eines Eintrags ändern
    RepresentationTypeChanged {
        node: NodeId,
        index: usize,
        representation: RepresentationType,
    },
    /// Dicke eines Eintrags ändern
    ThicknessChanged {
        node: NodeId,
        index: usize,
        thickness: f64,
    },
    /// Geschlossen-Flag eines Eintrags ändern
    ClosedChanged {
        node: NodeId,
        index: usize,
        closed: bool,
    },
    /// Sichtbarkeit eines Markups-Display-Nodes ändern
    DisplayVisibilityChanged { display: NodeId, visible: bool },
    /// Slab-Modell für einen Eintrag anlegen
    AssociateModelRequested { node: NodeId, index: usize },
    /// Slab-Modelle für alle Einträge ohne Zuordnung anlegen
    AssociateAllModelsRequested { node: NodeId },

    // ── Datei / Scene ───────────────────────────────────────────────
    /// `*.markups.json` laden
    OpenFileRequested { path: PathBuf },
    /// Spline-Node speichern (`None` = aktiver Node bzw. bekannter Pfad)
    SaveRequested {
        node: Option<NodeId>,
        path: Option<PathBuf>,
    },
    /// Scene schließen
    CloseSceneRequested,
}
