use crate::app::state::InteractionMode;
use crate::app::widgets::WidgetId;
use crate::core::{Camera3D, NodeId, RepresentationType};
use glam::{DVec2, DVec3};
use std::path::PathBuf;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    // ── Interaktion ─────────────────────────────────────────────────
    /// Spline-Klasse als Platzier-Ziel setzen (optional mit aktivem Node)
    ActivatePlaceNode { node: Option<NodeId> },
    /// Interaktionsmodus wechseln
    SetInteractionMode { mode: InteractionMode },
    /// Platzier-Modus-Persistenz setzen
    SetPlaceModePersistence { persistent: bool },
    /// Punkt an Display-Position platzieren (Pick oder Fokusebene)
    PlacePoint { display_pos: DVec2 },
    /// Interaktion beenden (View-Transform + Render)
    StopInteraction,
    /// Selektierte Punkte aller Einträge des aktiven Nodes löschen
    DeleteSelectedPoints,

    // ── Widgets ─────────────────────────────────────────────────────
    /// Handle eines Widgets verschieben
    MoveWidgetHandle {
        widget: WidgetId,
        handle: usize,
        position: DVec3,
    },
    /// Handle an ein Widget anhängen
    InsertWidgetHandle { widget: WidgetId, position: DVec3 },
    /// Widget-Zustand in den Spline-Node zurückschreiben
    UpdateNodeFromWidget { widget: WidgetId },

    // ── View ────────────────────────────────────────────────────────
    SetViewportSize { size: DVec2 },
    SetCamera { camera: Camera3D },

    // ── Spline-Attribute ────────────────────────────────────────────
    SetRepresentationType {
        node: NodeId,
        index: usize,
        representation: RepresentationType,
    },
    SetThickness {
        node: NodeId,
        index: usize,
        thickness: f64,
    },
    SetClosed {
        node: NodeId,
        index: usize,
        closed: bool,
    },
    SetDisplayVisibility { display: NodeId, visible: bool },
    /// Modell-Node anlegen und dem Eintrag zuordnen
    AssociateModel { node: NodeId, index: usize },
    /// Allen Einträgen ohne Modell ein Modell zuordnen
    AssociateAllModels { node: NodeId },

    // ── Datei / Scene ───────────────────────────────────────────────
    LoadFile { path: PathBuf },
    SaveFile {
        node: Option<NodeId>,
        path: Option<PathBuf>,
    },
    CloseScene,
}
