//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Host-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/` und gleicht danach
    /// Scene und Widgets über die Event-Pumpe ab.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Interaktion ===
            AppCommand::ActivatePlaceNode { node } => {
                handlers::interaction::activate_place_node(state, node)
            }
            AppCommand::SetInteractionMode { mode } => handlers::interaction::set_mode(state, mode),
            AppCommand::SetPlaceModePersistence { persistent } => {
                handlers::interaction::set_persistence(state, persistent)
            }
            AppCommand::PlacePoint { display_pos } => {
                handlers::interaction::place_point(state, display_pos)
            }
            AppCommand::StopInteraction => handlers::interaction::stop(state),
            AppCommand::DeleteSelectedPoints => handlers::interaction::delete_selected_points(state),

            // === Widgets ===
            AppCommand::MoveWidgetHandle {
                widget,
                handle,
                position,
            } => handlers::widgets::move_handle(state, widget, handle, position),
            AppCommand::InsertWidgetHandle { widget, position } => {
                handlers::widgets::insert_handle(state, widget, position)
            }
            AppCommand::UpdateNodeFromWidget { widget } => {
                handlers::widgets::update_node(state, widget)
            }

            // === Kamera & Viewport ===
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),
            AppCommand::SetCamera { camera } => handlers::view::set_camera(state, camera),

            // === Spline-Attribute ===
            AppCommand::SetRepresentationType {
                node,
                index,
                representation,
            } => handlers::editing::set_representation_type(state, node, index, representation),
            AppCommand::SetThickness {
                node,
                index,
                thickness,
            } => handlers::editing::set_thickness(state, node, index, thickness),
            AppCommand::SetClosed {
                node,
                index,
                closed,
            } => handlers::editing::set_closed(state, node, index, closed),
            AppCommand::SetDisplayVisibility { display, visible } => {
                handlers::editing::set_display_visibility(state, display, visible)
            }
            AppCommand::AssociateModel { node, index } => {
                handlers::editing::associate_model(state, node, index)
            }
            AppCommand::AssociateAllModels { node } => {
                handlers::editing::associate_all_models(state, node)
            }

            // === Datei-I/O ===
            AppCommand::LoadFile { path } => handlers::file_io::load(state, path)?,
            AppCommand::SaveFile { node, path } => handlers::file_io::save(state, node, path)?,
            AppCommand::CloseScene => handlers::file_io::close(state),
        }

        super::use_cases::sync::dispatch_scene_events(state);
        Ok(())
    }
}
