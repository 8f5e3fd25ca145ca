//! Schlüssel der Markups-Translation-Map.

// ── Node ────────────────────────────────────────────────────────────

pub const LOCKED: &str = "/Locked";
pub const MARKUP_LABEL_FORMAT: &str = "/MarkupLabelFormat";
pub const MARKUPS_COUNT: &str = "/Markups_Count";
pub const DEFAULT_ONTOLOGY: &str = "/DefaultOntology";
pub const DEFAULT_REFERENCE_VIEW: &str = "/DefaultReferenceView";
pub const DEFAULT_REPRESENTATION_TYPE: &str = "/DefaultRepresentationType";
pub const DEFAULT_STEP_SIZE: &str = "/DefaultStepSize";
pub const DEFAULT_THICKNESS: &str = "/DefaultThickness";
pub const DEFAULT_SPLINE_ORIENTATION: &str = "/DefaultSplineOrientation";
pub const DEFAULT_CAMERA_POSITION: &str = "/DefaultCameraPosition";
pub const DEFAULT_CAMERA_VIEW_UP: &str = "/DefaultCameraViewUp";

// ── Eintrag (relativ zu `markup_prefix(n)`) ─────────────────────────

pub const ID: &str = "ID";
pub const LABEL: &str = "Label";
pub const DESCRIPTION: &str = "Description";
pub const NTH_LOCKED: &str = "Locked";
pub const SELECTED: &str = "Selected";
pub const VISIBILITY: &str = "Visibility";
pub const ASSOCIATED_NODE_ID: &str = "AssociatedNodeID";
pub const POINTS: &str = "Points";
pub const POINTS_COUNT: &str = "Points_Count";
pub const REPRESENTATION_TYPE: &str = "RepresentationType";
pub const CLOSED: &str = "Closed";
pub const THICKNESS: &str = "Thickness";
pub const REFERENCE_VIEW: &str = "ReferenceView";
pub const STEP_SIZE: &str = "StepSize";
pub const ONTOLOGY: &str = "Ontology";
pub const SPLINE_ORIENTATION: &str = "SplineOrientation";
pub const CAMERA_POSITION: &str = "CameraPosition";
pub const CAMERA_VIEW_UP: &str = "CameraViewUp";

/// Präfix aller Schlüssel des n-ten Eintrags (`/Markups/<n>/`).
pub fn markup_prefix(n: usize) -> String {
    format!("/Markups/{}/", n)
}
