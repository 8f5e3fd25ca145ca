//! Use-Cases der Application-Layer-Orchestrierung.

pub mod delete_points;
pub mod file_io;
pub mod interaction;
pub mod models;
pub mod pick;
pub mod placement;
pub mod spline_attributes;
pub mod sync;
pub mod widget_edit;
