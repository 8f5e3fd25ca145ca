//! Core-Domänentypen: Scene, Spline-Nodes, Display-Nodes, Slab-Extrusion, Kamera.

pub mod camera;
pub mod display;
pub mod events;
pub mod extrude;
pub mod markup;
pub mod mesh;
pub mod scene;
/// Spline-Attribute und Default-Werte
///
/// - RepresentationType: Spline oder Polyline (bestimmt die Widget-Variante)
/// - SplineDefaults: gemeinsamer Default-Datensatz eines Nodes
/// - SplineAttributes: Attribute eines einzelnen Eintrags
pub mod spline;
pub mod splines_node;
pub mod triangulate;

pub use camera::{Camera3D, Ray};
pub use display::{MarkupsDisplayNode, ModelDisplayNode, ModelNode, DEFAULT_MODEL_OPACITY};
pub use events::{EventOutbox, NodeEvent, NodeEventKind, SceneEvent};
pub use extrude::{build_spline_model, create_model_from_contour, extrude_contour};
pub use markup::Markup;
pub use mesh::{RayHit, SlabMesh, DEFAULT_MERGE_TOLERANCE};
pub use scene::{NodeClass, NodeId, Scene, SceneNode};
pub use spline::{RepresentationType, SplineAttributes, SplineDefaults, FUZZY_TOLERANCE};
pub use splines_node::SplinesNode;
