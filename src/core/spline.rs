//! Spline-spezifische Attribute eines Markup-Eintrags und deren Standardwerte.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Toleranz für den approximativen Vergleich von Vektoren, Matrizen und Schrittweiten.
pub const FUZZY_TOLERANCE: f64 = 1e-3;

/// Standard-Dicke des extrudierten Slabs.
pub const DEFAULT_THICKNESS: f64 = 1000.0;
/// Standard-Referenzansicht.
pub const DEFAULT_REFERENCE_VIEW: &str = "Coronal";
/// Standard-Schrittweite im Slice-Viewer.
pub const DEFAULT_STEP_SIZE: f64 = 1.0;
/// Standard-Ontologie-Tag.
pub const DEFAULT_ONTOLOGY: &str = "Structure";

/// Interpolationsart einer Spline; bestimmt auch die Widget-Variante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentationType {
    /// Interpolierende Kurve durch alle Kontrollpunkte
    #[default]
    Spline,
    /// Gerade Segmente zwischen den Kontrollpunkten
    Polyline,
}

impl RepresentationType {
    /// Persistierter Name (`"spline"` / `"polyline"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            RepresentationType::Spline => "spline",
            RepresentationType::Polyline => "polyline",
        }
    }

    /// Parst einen persistierten Namen.
    ///
    /// Alles außer `"spline"` wird als Polyline interpretiert (mit Warnung,
    /// falls der Name auch nicht `"polyline"` ist).
    pub fn from_name(name: &str) -> Self {
        match name {
            "spline" => RepresentationType::Spline,
            "polyline" => RepresentationType::Polyline,
            other => {
                log::warn!(
                    "Unbekannter Representation-Type '{}', verwende 'polyline'",
                    other
                );
                RepresentationType::Polyline
            }
        }
    }
}

impl fmt::Display for RepresentationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepresentationType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Gemeinsamer Default-Datensatz eines Spline-Nodes.
///
/// Neue Einträge werden vollständig aus diesen Werten initialisiert, und
/// Lesezugriffe auf ungültige Indizes liefern diese Werte zurück.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineDefaults {
    /// Kurve geschlossen
    pub closed: bool,
    /// Slab-Dicke entlang der Normalen
    pub thickness: f64,
    /// Benannte Referenzansicht (Axial/Sagittal/Coronal)
    pub reference_view: String,
    /// Interpolationsart
    pub representation_type: RepresentationType,
    /// Schrittweite im Slice-Viewer
    pub step_size: f64,
    /// Klassifikations-Tag
    pub ontology: String,
    /// Lokales Koordinatensystem; dritte Spalte = Extrusions-Normale
    pub orientation: DMat4,
    /// Gespeicherte Kameraposition
    pub camera_position: DVec3,
    /// Gespeicherter Kamera-View-Up
    pub camera_view_up: DVec3,
}

impl Default for SplineDefaults {
    fn default() -> Self {
        Self {
            closed: true,
            thickness: DEFAULT_THICKNESS,
            reference_view: DEFAULT_REFERENCE_VIEW.to_string(),
            representation_type: RepresentationType::Spline,
            step_size: DEFAULT_STEP_SIZE,
            ontology: DEFAULT_ONTOLOGY.to_string(),
            orientation: DMat4::IDENTITY,
            camera_position: DVec3::ZERO,
            camera_view_up: DVec3::ZERO,
        }
    }
}

impl SplineDefaults {
    /// Erstellt einen neuen Eintrag aus den aktuellen Standardwerten.
    pub fn to_attributes(&self) -> SplineAttributes {
        SplineAttributes {
            closed: self.closed,
            thickness: self.thickness,
            reference_view: self.reference_view.clone(),
            representation_type: self.representation_type,
            step_size: self.step_size,
            ontology: self.ontology.clone(),
            orientation: self.orientation,
            camera_position: self.camera_position,
            camera_view_up: self.camera_view_up,
            selected_point_index: None,
        }
    }
}

/// Spline-Attribute eines einzelnen Eintrags.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineAttributes {
    pub closed: bool,
    pub thickness: f64,
    pub reference_view: String,
    pub representation_type: RepresentationType,
    pub step_size: f64,
    pub ontology: String,
    pub orientation: DMat4,
    pub camera_position: DVec3,
    pub camera_view_up: DVec3,
    /// Aktiver Kontrollpunkt (`None` = keiner)
    pub selected_point_index: Option<usize>,
}

impl SplineAttributes {
    /// Extrusions-Normale: Z-Achse des Orientierungs-Frames.
    pub fn normal(&self) -> DVec3 {
        extrusion_normal(&self.orientation)
    }
}

/// Transformiert die Z-Richtung `(0, 0, 1, 0)` mit der Orientierung.
pub fn extrusion_normal(orientation: &DMat4) -> DVec3 {
    orientation.transform_vector3(DVec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_representation_type_names() {
        assert_eq!(RepresentationType::from_name("spline"), RepresentationType::Spline);
        assert_eq!(
            RepresentationType::from_name("polyline"),
            RepresentationType::Polyline
        );
        assert_eq!(
            RepresentationType::from_name("bezier"),
            RepresentationType::Polyline
        );
        assert_eq!(RepresentationType::Spline.to_string(), "spline");
    }

    #[test]
    fn test_new_attributes_follow_defaults() {
        let defaults = SplineDefaults {
            thickness: 25.0,
            closed: false,
            ..SplineDefaults::default()
        };
        let attrs = defaults.to_attributes();
        assert_eq!(attrs.thickness, 25.0);
        assert!(!attrs.closed);
        assert_eq!(attrs.selected_point_index, None);
    }

    #[test]
    fn test_normal_is_third_column_of_orientation() {
        let orientation = DMat4::from_cols_array_2d(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0, 0.0],
            [5.0, 6.0, 7.0, 1.0],
        ]);
        let normal = extrusion_normal(&orientation);
        assert_relative_eq!(normal.x, 0.0);
        assert_relative_eq!(normal.y, -1.0);
        assert_relative_eq!(normal.z, 0.0);
    }
}
