use crate::core::{NodeClass, NodeId};

/// Modus der Maus-Interaktion im 3D-View.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Kamera drehen/verschieben, Widgets bedienen
    #[default]
    ViewTransform,
    /// Klicks platzieren Punkte im aktiven Node
    Place,
}

/// Zustand der Platzier-Interaktion.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Aktueller Modus
    pub mode: InteractionMode,
    /// Im Platzier-Modus bleiben, statt nach einem Klick zurückzuschalten
    pub place_mode_persistence: bool,
    /// Node-Klasse, in die platziert wird
    pub active_place_node_class: Option<NodeClass>,
    /// Node, in den platziert wird
    pub active_place_node_id: Option<NodeId>,
}

impl InteractionState {
    /// Erstellt den Standard-Zustand (View-Transform, kein aktiver Node).
    pub fn new(place_mode_persistence: bool) -> Self {
        Self {
            place_mode_persistence,
            ..Self::default()
        }
    }

    /// Ist die Spline-Klasse als Platzier-Ziel gesetzt?
    pub fn places_splines(&self) -> bool {
        self.active_place_node_class == Some(NodeClass::Splines)
    }

    /// Platzier-Modus mit Spline-Klasse aktiv?
    pub fn is_placing_splines(&self) -> bool {
        self.mode == InteractionMode::Place && self.places_splines()
    }
}
