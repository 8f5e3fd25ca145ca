//! Mapping von View-/Host-Intents auf mutierende App-Commands.

use super::state::InteractionMode;
use super::{AppCommand, AppIntent, AppState};

/// Key-Sym der Löschtaste.
const DELETE_KEY: &str = "Delete";

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::PlaceModeRequested { node } => vec![
            AppCommand::ActivatePlaceNode { node },
            AppCommand::SetInteractionMode {
                mode: InteractionMode::Place,
            },
        ],
        AppIntent::PlaceModePersistenceChanged { persistent } => {
            vec![AppCommand::SetPlaceModePersistence { persistent }]
        }
        AppIntent::LeftButtonReleased { display_pos } => {
            if !state.interaction.is_placing_splines() {
                return vec![];
            }
            let mut commands = vec![AppCommand::PlacePoint { display_pos }];
            if !state.interaction.place_mode_persistence {
                commands.push(AppCommand::SetInteractionMode {
                    mode: InteractionMode::ViewTransform,
                });
            }
            commands
        }
        AppIntent::RightButtonReleased => {
            if state.interaction.places_splines() {
                vec![AppCommand::StopInteraction]
            } else {
                vec![]
            }
        }
        AppIntent::KeyPressed { key } => {
            if key == DELETE_KEY && state.interaction.places_splines() {
                vec![AppCommand::DeleteSelectedPoints]
            } else {
                vec![]
            }
        }
        AppIntent::EndPlacementRequested => vec![AppCommand::StopInteraction],

        AppIntent::WidgetHandleDragged {
            widget,
            handle,
            position,
        } => vec![
            AppCommand::MoveWidgetHandle {
                widget,
                handle,
                position,
            },
            AppCommand::UpdateNodeFromWidget { widget },
        ],
        AppIntent::WidgetHandleInserted { widget, position } => vec![
            AppCommand::InsertWidgetHandle { widget, position },
            AppCommand::UpdateNodeFromWidget { widget },
        ],

        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::CameraChanged { camera } => vec![AppCommand::SetCamera { camera }],

        AppIntent::RepresentationTypeChanged {
            node,
            index,
            representation,
        } => vec![AppCommand::SetRepresentationType {
            node,
            index,
            representation,
        }],
        AppIntent::ThicknessChanged {
            node,
            index,
            thickness,
        } => vec![AppCommand::SetThickness {
            node,
            index,
            thickness,
        }],
        AppIntent::ClosedChanged {
            node,
            index,
            closed,
        } => vec![AppCommand::SetClosed {
            node,
            index,
            closed,
        }],
        AppIntent::DisplayVisibilityChanged { display, visible } => {
            vec![AppCommand::SetDisplayVisibility { display, visible }]
        }
        AppIntent::AssociateModelRequested { node, index } => {
            vec![AppCommand::AssociateModel { node, index }]
        }
        AppIntent::AssociateAllModelsRequested { node } => {
            vec![AppCommand::AssociateAllModels { node }]
        }

        AppIntent::OpenFileRequested { path } => vec![AppCommand::LoadFile { path }],
        AppIntent::SaveRequested { node, path } => vec![AppCommand::SaveFile { node, path }],
        AppIntent::CloseSceneRequested => vec![
            AppCommand::StopInteraction,
            AppCommand::CloseScene,
        ],
    }
}
