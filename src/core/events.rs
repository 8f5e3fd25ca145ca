//! Events, die Scene und Nodes an Beobachter melden.
//!
//! Alle Events tragen einen expliziten Diskriminator (`NodeEventKind`),
//! Beobachter müssen keine Typprüfungen auf Nodes machen.

use super::scene::{NodeClass, NodeId};

/// Event eines einzelnen Nodes (von Host-Code über `Scene::take_events` abgeholt).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeEvent {
    /// Irgendein Feld des Nodes wurde geändert
    Modified,
    /// Neuer Markup-Eintrag mit diesem Index
    MarkupAdded(usize),
    /// Markup-Eintrag mit diesem Index entfernt
    MarkupRemoved(usize),
    /// Attribute oder Punkte des n-ten Eintrags geändert
    NthMarkupModified(usize),
    /// Einzelner Kontrollpunkt verschoben
    PointModified { markup: usize, point: usize },
    /// Eine Display-Eigenschaft (Display-Node) des Nodes wurde geändert
    DisplayModified(NodeId),
}

/// Diskriminator für `NodeEvent` (Schlüssel für Beobachtungs-Registrierungen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeEventKind {
    Modified,
    MarkupAdded,
    MarkupRemoved,
    NthMarkupModified,
    PointModified,
    DisplayModified,
}

impl NodeEvent {
    /// Gibt die Event-Art ohne Payload zurück.
    pub fn kind(&self) -> NodeEventKind {
        match self {
            NodeEvent::Modified => NodeEventKind::Modified,
            NodeEvent::MarkupAdded(_) => NodeEventKind::MarkupAdded,
            NodeEvent::MarkupRemoved(_) => NodeEventKind::MarkupRemoved,
            NodeEvent::NthMarkupModified(_) => NodeEventKind::NthMarkupModified,
            NodeEvent::PointModified { .. } => NodeEventKind::PointModified,
            NodeEvent::DisplayModified(_) => NodeEventKind::DisplayModified,
        }
    }
}

/// Event der Scene selbst oder eines ihrer Nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Node wurde der Scene hinzugefügt
    NodeAdded { id: NodeId, class: NodeClass },
    /// Node wurde aus der Scene entfernt (Node existiert nicht mehr)
    NodeRemoved { id: NodeId, class: NodeClass },
    /// Event eines Nodes, der noch in der Scene liegt
    Node { id: NodeId, event: NodeEvent },
    /// Scene wird geschlossen (alle Nodes werden gleich entfernt)
    StartClose,
    /// Scene wurde geschlossen
    EndClose,
    /// Batch-Verarbeitung (Import, Laden) beendet
    EndBatchProcess,
}

/// Ausgangs-Puffer für Node-Events mit StartModify/EndModify-Bündelung.
///
/// Während einer Bündelung werden Events dedupliziert gesammelt und erst
/// beim äußersten `end_modify` in Auftrittsreihenfolge freigegeben.
/// `Modified` erscheint dabei höchstens einmal.
#[derive(Debug, Clone, Default)]
pub struct EventOutbox {
    ready: Vec<NodeEvent>,
    held: indexmap::IndexSet<NodeEvent>,
    modifying: bool,
}

impl EventOutbox {
    /// Startet eine Bündelung und gibt den vorherigen Zustand zurück.
    pub fn start_modify(&mut self) -> bool {
        let was_modifying = self.modifying;
        self.modifying = true;
        was_modifying
    }

    /// Beendet eine Bündelung; `was_modifying` stammt aus `start_modify`.
    pub fn end_modify(&mut self, was_modifying: bool) {
        self.modifying = was_modifying;
        if !was_modifying {
            self.ready.extend(self.held.drain(..));
        }
    }

    /// Gibt zurück, ob gerade gebündelt wird.
    pub fn is_modifying(&self) -> bool {
        self.modifying
    }

    /// Meldet ein Event (sofort oder gebündelt).
    pub fn push(&mut self, event: NodeEvent) {
        if self.modifying {
            self.held.insert(event);
        } else {
            self.ready.push(event);
        }
    }

    /// Entnimmt alle freigegebenen Events.
    pub fn drain(&mut self) -> Vec<NodeEvent> {
        std::mem::take(&mut self.ready)
    }

    /// Anzahl freigegebener, noch nicht abgeholter Events.
    pub fn pending(&self) -> usize {
        self.ready.len()
    }
}
