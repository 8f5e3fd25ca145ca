//! Registry der beobachteten Node-Events, pro Node-ID.
//!
//! Ersetzt einen globalen Event-Broker: der Displayable-Manager trägt hier
//! ein, welche Event-Arten er von welchem Spline-Node verarbeitet.

use crate::core::{NodeEventKind, NodeId};
use indexmap::{IndexMap, IndexSet};

/// Event-Arten, die ein Displayable-Manager an Spline-Nodes beobachtet.
pub const SPLINES_NODE_EVENTS: [NodeEventKind; 6] = [
    NodeEventKind::DisplayModified,
    NodeEventKind::MarkupAdded,
    NodeEventKind::MarkupRemoved,
    NodeEventKind::NthMarkupModified,
    NodeEventKind::PointModified,
    NodeEventKind::Modified,
];

/// Beobachtungen pro Node.
#[derive(Debug, Default)]
pub struct ObservationRegistry {
    observed: IndexMap<NodeId, IndexSet<NodeEventKind>>,
}

impl ObservationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert Event-Arten; bereits vorhandene werden nicht doppelt eingetragen.
    pub fn observe(&mut self, node: &NodeId, kinds: &[NodeEventKind]) {
        let entry = self.observed.entry(node.clone()).or_default();
        for kind in kinds {
            entry.insert(*kind);
        }
    }

    /// Entfernt alle Beobachtungen eines Nodes.
    pub fn unobserve(&mut self, node: &NodeId) -> bool {
        self.observed.shift_remove(node).is_some()
    }

    pub fn is_observed(&self, node: &NodeId) -> bool {
        self.observed.contains_key(node)
    }

    pub fn is_observing(&self, node: &NodeId, kind: NodeEventKind) -> bool {
        self.observed
            .get(node)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Alle beobachteten Nodes in Registrierungsreihenfolge.
    pub fn observed_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.observed.keys()
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn clear(&mut self) {
        self.observed.clear();
    }
}
