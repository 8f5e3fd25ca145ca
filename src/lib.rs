//! Spline-Markups Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;
pub mod storage;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, CurveWidget, InteractionMode,
    SplinesDisplayableManager, WidgetId, WidgetKind,
};
pub use core::{
    build_spline_model, extrude_contour, Camera3D, NodeClass, NodeEvent, NodeId,
    RepresentationType, Scene, SceneEvent, SlabMesh, SplineAttributes, SplineDefaults,
    SplinesNode,
};
pub use shared::SplinesOptions;
pub use storage::{parse_splines_json, write_splines_json};
