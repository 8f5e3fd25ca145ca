//! Application-Layer: Controller, State, Events, Widgets und Use-Cases.

pub mod command_log;
pub mod controller;
/// Synchronisation Spline-Nodes ↔ Kurven-Widgets
///
/// Hält pro Markups-Display-Node eine Widget-Pipeline und gleicht sie
/// über Scene-Events mit dem Datenmodell ab.
pub mod displayable_manager;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod observations;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Scene, View, Interaktion).
pub mod state;
pub mod use_cases;
pub mod widgets;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use displayable_manager::{Pipeline, RegistrationPhase, SplinesDisplayableManager};
pub use events::{AppCommand, AppIntent};
pub use observations::ObservationRegistry;
pub use state::{AppState, InteractionMode, InteractionState, ViewState};
pub use widgets::{CurveRepresentation, CurveWidget, WidgetId, WidgetKind};
