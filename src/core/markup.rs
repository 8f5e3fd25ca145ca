//! Basisdaten eines Markup-Eintrags (Kontrollpunkte und Flags).

use super::scene::NodeId;
use glam::DVec3;

/// Ein Markup-Eintrag: geordnete Kontrollpunkte plus Metadaten.
#[derive(Debug, Clone, PartialEq)]
pub struct Markup {
    /// Eindeutige ID innerhalb des Nodes
    pub id: String,
    /// Anzeigename
    pub label: String,
    /// Freitext-Beschreibung
    pub description: String,
    /// Kontrollpunkte in Welt-Koordinaten
    pub points: Vec<DVec3>,
    /// Sichtbarkeit des Eintrags
    pub visible: bool,
    /// Gesperrt (keine Interaktion)
    pub locked: bool,
    /// Ausgewählt
    pub selected: bool,
    /// Zugeordneter abgeleiteter Modell-Node (Slab)
    pub associated_node_id: Option<NodeId>,
}

impl Markup {
    /// Erstellt einen sichtbaren, entsperrten Eintrag ohne Punkte.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            points: Vec::new(),
            visible: true,
            locked: false,
            selected: true,
            associated_node_id: None,
        }
    }

    /// Anzahl der Kontrollpunkte.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}

/// Ersetzt `%N` durch den Node-Namen und `%d` durch die Nummer.
pub fn format_label(format: &str, node_name: &str, number: usize) -> String {
    format
        .replace("%N", node_name)
        .replace("%d", &number.to_string())
}
