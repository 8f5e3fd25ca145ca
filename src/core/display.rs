//! Display- und Modell-Nodes: Sichtbarkeit, View-Filter und abgeleitete Slab-Meshes.

use super::mesh::SlabMesh;
use super::scene::NodeId;

/// Standard-Deckkraft abgeleiteter Slab-Modelle.
pub const DEFAULT_MODEL_OPACITY: f64 = 0.5;

/// Display-Eigenschaften eines Spline-Nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupsDisplayNode {
    /// Besitzender Spline-Node
    pub displayable_node: NodeId,
    /// Sichtbarkeit aller Einträge
    pub visible: bool,
    /// Views, in denen angezeigt wird (leer = alle)
    pub view_node_ids: Vec<String>,
}

impl MarkupsDisplayNode {
    /// Erstellt einen sichtbaren Display-Node für alle Views.
    pub fn new(displayable_node: NodeId) -> Self {
        Self {
            displayable_node,
            visible: true,
            view_node_ids: Vec::new(),
        }
    }

    /// Prüft den View-Filter.
    pub fn is_displayable_in_view(&self, view_node_id: &str) -> bool {
        self.view_node_ids.is_empty() || self.view_node_ids.iter().any(|v| v == view_node_id)
    }
}

/// Modell-Node, der ein abgeleitetes Slab-Mesh hält.
#[derive(Debug, Clone, Default)]
pub struct ModelNode {
    /// Anzeigename
    pub name: String,
    /// Aktuelles Mesh (`None` = leer)
    pub mesh: Option<SlabMesh>,
    /// Zugehöriger Modell-Display-Node
    pub display_node: Option<NodeId>,
}

impl ModelNode {
    /// Erstellt einen leeren Modell-Node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            display_node: None,
        }
    }
}

/// Display-Eigenschaften eines Modell-Nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDisplayNode {
    /// Besitzender Modell-Node
    pub model_node: NodeId,
    pub opacity: f64,
    pub frontface_culling: bool,
    pub backface_culling: bool,
    pub visible: bool,
}

impl ModelDisplayNode {
    /// Halbtransparent, beidseitig sichtbar.
    pub fn new(model_node: NodeId, opacity: f64) -> Self {
        Self {
            model_node,
            opacity,
            frontface_culling: false,
            backface_culling: false,
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_view_filter_matches_every_view() {
        let mut display = MarkupsDisplayNode::new(NodeId::new("vtkMRMLMarkupsSplinesNode1"));
        assert!(display.is_displayable_in_view("vtkMRMLViewNode1"));

        display.view_node_ids.push("vtkMRMLViewNode2".to_string());
        assert!(!display.is_displayable_in_view("vtkMRMLViewNode1"));
        assert!(display.is_displayable_in_view("vtkMRMLViewNode2"));
    }

    #[test]
    fn test_model_display_is_double_sided() {
        let display = ModelDisplayNode::new(NodeId::new("vtkMRMLModelNode1"), DEFAULT_MODEL_OPACITY);
        assert!(!display.frontface_culling);
        assert!(!display.backface_culling);
        assert_eq!(display.opacity, 0.5);
    }
}
