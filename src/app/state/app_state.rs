use crate::app::displayable_manager::SplinesDisplayableManager;
use crate::app::CommandLog;
use crate::core::{NodeClass, Scene, SplinesNode};
use crate::shared::SplinesOptions;
use std::path::PathBuf;

use super::{InteractionState, ViewState};

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Scene mit Spline-, Display- und Modell-Nodes
    pub scene: Scene,
    /// Synchronisation Spline-Nodes ↔ Widgets
    pub manager: SplinesDisplayableManager,
    /// Platzier-Interaktion
    pub interaction: InteractionState,
    /// View-State
    pub view: ViewState,
    /// Laufzeit-Optionen
    pub options: SplinesOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Pfad der zuletzt geladenen/gespeicherten Datei
    pub current_file_path: Option<PathBuf>,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standard-Optionen
    pub fn new() -> Self {
        Self::with_options(SplinesOptions::default())
    }

    /// Erstellt einen leeren App-State mit den übergebenen Optionen
    pub fn with_options(options: SplinesOptions) -> Self {
        let mut scene = Scene::new();
        let manager = SplinesDisplayableManager::create(&options, &mut scene);
        Self {
            scene,
            manager,
            interaction: InteractionState::new(options.place_mode_persistence),
            view: ViewState::new(),
            options,
            command_log: CommandLog::new(),
            current_file_path: None,
        }
    }

    /// Gibt die Anzahl der Spline-Nodes zurück
    pub fn splines_node_count(&self) -> usize {
        self.scene.nodes_by_class(NodeClass::Splines).len()
    }

    /// Aktiver Platzier-Node, sofern er noch als Spline-Node existiert
    pub fn active_splines_node(&self) -> Option<&SplinesNode> {
        self.interaction
            .active_place_node_id
            .as_ref()
            .and_then(|id| self.scene.splines(id))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
