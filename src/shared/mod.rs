//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Laufzeit-Optionen und reine Kurven-Geometrie, die von `app`,
//! `storage` und dem Binary gemeinsam genutzt werden.

pub mod options;
pub mod spline_geometry;

pub use options::SplinesOptions;
pub use options::{MAX_EVENT_ROUNDS, SAMPLES_PER_SEGMENT, VIEW_NODE_ID};
