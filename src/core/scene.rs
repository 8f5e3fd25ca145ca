//! In-Memory-Scene (Host-Dokument) mit Node-Lebenszyklus und Event-Queue.

use super::display::{MarkupsDisplayNode, ModelDisplayNode, ModelNode};
use super::events::{NodeEvent, SceneEvent};
use super::splines_node::SplinesNode;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Eindeutige, persistierbare Node-ID (z.B. `vtkMRMLModelNode3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    /// Erstellt eine ID aus einem beliebigen String.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// ID als String-Slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// Diskriminator der Node-Arten (ersetzt Laufzeit-Typprüfungen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    /// Spline-Sammlung
    Splines,
    /// Display-Eigenschaften eines Spline-Nodes
    MarkupsDisplay,
    /// Abgeleitetes Slab-Modell
    Model,
    /// Display-Eigenschaften eines Modells
    ModelDisplay,
}

impl NodeClass {
    /// Klassenname, der auch als ID-Präfix dient.
    pub fn class_name(&self) -> &'static str {
        match self {
            NodeClass::Splines => "vtkMRMLMarkupsSplinesNode",
            NodeClass::MarkupsDisplay => "vtkMRMLMarkupsDisplayNode",
            NodeClass::Model => "vtkMRMLModelNode",
            NodeClass::ModelDisplay => "vtkMRMLModelDisplayNode",
        }
    }
}

/// Node der Scene als Tagged-Variant.
#[derive(Debug, Clone)]
pub enum SceneNode {
    Splines(SplinesNode),
    MarkupsDisplay(MarkupsDisplayNode),
    Model(ModelNode),
    ModelDisplay(ModelDisplayNode),
}

impl SceneNode {
    /// Art des Nodes.
    pub fn class(&self) -> NodeClass {
        match self {
            SceneNode::Splines(_) => NodeClass::Splines,
            SceneNode::MarkupsDisplay(_) => NodeClass::MarkupsDisplay,
            SceneNode::Model(_) => NodeClass::Model,
            SceneNode::ModelDisplay(_) => NodeClass::ModelDisplay,
        }
    }
}

/// Host-Dokument: geordnete Node-Sammlung mit Event-Queue.
///
/// Scene-Events werden gesammelt und vom Host über `take_events` abgeholt;
/// dadurch läuft jede Benachrichtigung vollständig durch, bevor die nächste
/// verarbeitet wird.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: IndexMap<NodeId, SceneNode>,
    id_counters: HashMap<NodeClass, u64>,
    batch_depth: u32,
    pending: Vec<SceneEvent>,
}

impl Scene {
    /// Erstellt eine leere Scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der Nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Prüft, ob ein Node mit dieser ID existiert.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    fn generate_id(&mut self, class: NodeClass) -> NodeId {
        loop {
            let counter = self.id_counters.entry(class).or_insert(0);
            *counter += 1;
            let id = NodeId(format!("{}{}", class.class_name(), counter));
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Fügt einen Node hinzu und gibt die neu vergebene ID zurück.
    pub fn add_node(&mut self, node: SceneNode) -> NodeId {
        let class = node.class();
        let id = self.generate_id(class);
        self.nodes.insert(id.clone(), node);
        log::debug!("Node {} hinzugefügt", id);
        self.pending.push(SceneEvent::NodeAdded {
            id: id.clone(),
            class,
        });
        id
    }

    /// Fügt einen Spline-Node samt Standard-Display-Node hinzu.
    pub fn add_splines_node(&mut self, node: SplinesNode) -> NodeId {
        let id = self.add_node(SceneNode::Splines(node));
        let display_id = self.add_node(SceneNode::MarkupsDisplay(MarkupsDisplayNode::new(
            id.clone(),
        )));
        if let Some(splines) = self.splines_mut(&id) {
            splines.add_display_node_id(display_id);
        }
        id
    }

    /// Entfernt einen Node. Spline-Nodes nehmen ihre Display-Nodes mit.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<SceneNode> {
        let node = self.nodes.shift_remove(id)?;
        let class = node.class();
        log::debug!("Node {} entfernt", id);
        self.pending.push(SceneEvent::NodeRemoved {
            id: id.clone(),
            class,
        });
        if let SceneNode::Splines(splines) = &node {
            for display_id in splines.display_node_ids() {
                self.remove_node(display_id);
            }
        }
        Some(node)
    }

    /// Node per ID.
    pub fn get(&self, id: &NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Spline-Node per ID.
    pub fn splines(&self, id: &NodeId) -> Option<&SplinesNode> {
        match self.nodes.get(id)? {
            SceneNode::Splines(node) => Some(node),
            _ => None,
        }
    }

    /// Mutabler Spline-Node per ID.
    pub fn splines_mut(&mut self, id: &NodeId) -> Option<&mut SplinesNode> {
        match self.nodes.get_mut(id)? {
            SceneNode::Splines(node) => Some(node),
            _ => None,
        }
    }

    /// Markups-Display-Node per ID.
    pub fn display(&self, id: &NodeId) -> Option<&MarkupsDisplayNode> {
        match self.nodes.get(id)? {
            SceneNode::MarkupsDisplay(node) => Some(node),
            _ => None,
        }
    }

    /// Mutabler Markups-Display-Node per ID.
    pub fn display_mut(&mut self, id: &NodeId) -> Option<&mut MarkupsDisplayNode> {
        match self.nodes.get_mut(id)? {
            SceneNode::MarkupsDisplay(node) => Some(node),
            _ => None,
        }
    }

    /// Modell-Node per ID.
    pub fn model(&self, id: &NodeId) -> Option<&ModelNode> {
        match self.nodes.get(id)? {
            SceneNode::Model(node) => Some(node),
            _ => None,
        }
    }

    /// Mutabler Modell-Node per ID.
    pub fn model_mut(&mut self, id: &NodeId) -> Option<&mut ModelNode> {
        match self.nodes.get_mut(id)? {
            SceneNode::Model(node) => Some(node),
            _ => None,
        }
    }

    /// Modell-Display-Node per ID.
    pub fn model_display(&self, id: &NodeId) -> Option<&ModelDisplayNode> {
        match self.nodes.get(id)? {
            SceneNode::ModelDisplay(node) => Some(node),
            _ => None,
        }
    }

    /// Alle Node-IDs einer Klasse in Einfüge-Reihenfolge.
    pub fn nodes_by_class(&self, class: NodeClass) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.class() == class)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Ändert die Sichtbarkeit eines Markups-Display-Nodes und meldet die
    /// Änderung am zugehörigen Spline-Node.
    pub fn set_display_visibility(&mut self, display_id: &NodeId, visible: bool) -> bool {
        let Some(display) = self.display_mut(display_id) else {
            log::warn!("Display-Node {} nicht gefunden", display_id);
            return false;
        };
        if display.visible == visible {
            return false;
        }
        display.visible = visible;
        let owner = display.displayable_node.clone();
        self.notify_display_modified(&owner, display_id);
        true
    }

    /// Meldet eine Display-Änderung am besitzenden Node.
    pub fn notify_display_modified(&mut self, owner: &NodeId, display_id: &NodeId) {
        match self.splines_mut(owner) {
            Some(splines) => splines.notify(NodeEvent::DisplayModified(display_id.clone())),
            None => self.pending.push(SceneEvent::Node {
                id: owner.clone(),
                event: NodeEvent::DisplayModified(display_id.clone()),
            }),
        }
    }

    /// Gibt zurück, ob gerade eine Batch-Verarbeitung (Import/Laden) läuft.
    pub fn is_batch_processing(&self) -> bool {
        self.batch_depth > 0
    }

    /// Startet eine (verschachtelbare) Batch-Verarbeitung.
    pub fn start_batch_processing(&mut self) {
        self.batch_depth += 1;
    }

    /// Beendet eine Batch-Verarbeitung; die äußerste meldet `EndBatchProcess`.
    pub fn end_batch_processing(&mut self) {
        if self.batch_depth == 0 {
            log::warn!("end_batch_processing ohne passendes start_batch_processing");
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.pending.push(SceneEvent::EndBatchProcess);
        }
    }

    /// Schließt die Scene: entfernt alle Nodes zwischen `StartClose` und `EndClose`.
    pub fn clear(&mut self) {
        self.pending.push(SceneEvent::StartClose);
        let ids: Vec<NodeId> = self.nodes.keys().cloned().collect();
        for id in ids {
            if let Some(node) = self.nodes.shift_remove(&id) {
                self.pending.push(SceneEvent::NodeRemoved {
                    id,
                    class: node.class(),
                });
            }
        }
        self.id_counters.clear();
        self.pending.push(SceneEvent::EndClose);
        log::info!("Scene geschlossen");
    }

    /// Anzahl noch nicht abgeholter Events (Scene + Nodes).
    pub fn pending_events(&self) -> usize {
        let node_events: usize = self
            .nodes
            .values()
            .map(|node| match node {
                SceneNode::Splines(splines) => splines.pending_events(),
                _ => 0,
            })
            .sum();
        self.pending.len() + node_events
    }

    /// Entnimmt alle anstehenden Events.
    ///
    /// Zuerst Scene-Events in Auftrittsreihenfolge, danach die freigegebenen
    /// Events jedes Spline-Nodes (mit dessen ID markiert).
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        let mut events = std::mem::take(&mut self.pending);
        for (id, node) in self.nodes.iter_mut() {
            if let SceneNode::Splines(splines) = node {
                events.extend(splines.take_events().into_iter().map(|event| {
                    SceneEvent::Node {
                        id: id.clone(),
                        event,
                    }
                }));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_generated_per_class() {
        let mut scene = Scene::new();
        let a = scene.add_node(SceneNode::Model(ModelNode::new("A")));
        let b = scene.add_node(SceneNode::Model(ModelNode::new("B")));
        assert_eq!(a.as_str(), "vtkMRMLModelNode1");
        assert_eq!(b.as_str(), "vtkMRMLModelNode2");
        assert_eq!(scene.nodes_by_class(NodeClass::Model), vec![a, b]);
    }

    #[test]
    fn test_add_splines_node_creates_display_node() {
        let mut scene = Scene::new();
        let id = scene.add_splines_node(SplinesNode::new("S"));
        let splines = scene.splines(&id).expect("Spline-Node erwartet");
        assert_eq!(splines.display_node_ids().len(), 1);
        let display_id = splines.display_node_ids()[0].clone();
        let display = scene.display(&display_id).expect("Display-Node erwartet");
        assert_eq!(display.displayable_node, id);

        let events = scene.take_events();
        assert!(matches!(events[0], SceneEvent::NodeAdded { class: NodeClass::Splines, .. }));
        assert!(matches!(
            events[1],
            SceneEvent::NodeAdded {
                class: NodeClass::MarkupsDisplay,
                ..
            }
        ));
    }

    #[test]
    fn test_remove_splines_node_removes_display_nodes() {
        let mut scene = Scene::new();
        let id = scene.add_splines_node(SplinesNode::new("S"));
        scene.take_events();
        assert!(scene.remove_node(&id).is_some());
        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.take_events().len(), 2);
    }

    #[test]
    fn test_batch_processing_reports_outermost_end() {
        let mut scene = Scene::new();
        scene.start_batch_processing();
        scene.start_batch_processing();
        scene.end_batch_processing();
        assert!(scene.is_batch_processing());
        assert!(scene.take_events().is_empty());
        scene.end_batch_processing();
        assert!(!scene.is_batch_processing());
        assert_eq!(scene.take_events(), vec![SceneEvent::EndBatchProcess]);
    }

    #[test]
    fn test_display_visibility_is_reported_on_owner() {
        let mut scene = Scene::new();
        let id = scene.add_splines_node(SplinesNode::new("S"));
        let display_id = scene.splines(&id).expect("Spline-Node erwartet").display_node_ids()[0].clone();
        scene.take_events();

        assert!(scene.set_display_visibility(&display_id, false));
        assert!(!scene.set_display_visibility(&display_id, false));
        assert_eq!(
            scene.take_events(),
            vec![SceneEvent::Node {
                id,
                event: NodeEvent::DisplayModified(display_id),
            }]
        );
    }

    #[test]
    fn test_clear_wraps_removals_in_close_events() {
        let mut scene = Scene::new();
        scene.add_splines_node(SplinesNode::new("S"));
        scene.take_events();
        scene.clear();
        let events = scene.take_events();
        assert_eq!(events.first(), Some(&SceneEvent::StartClose));
        assert_eq!(events.last(), Some(&SceneEvent::EndClose));
        assert_eq!(events.len(), 4);
        assert_eq!(scene.node_count(), 0);
    }
}
