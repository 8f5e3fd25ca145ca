//! Protokoll der ausgeführten Commands mit Zähler für Spline-Änderungen.

use super::AppCommand;

/// Ausgeführte Commands in Reihenfolge plus Anzahl der Bearbeitungen seit
/// dem letzten Laden, Speichern oder Schließen.
#[derive(Default)]
pub struct CommandLog {
    entries: Vec<AppCommand>,
    edits_since_save: usize,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Protokolliert einen Command vor seiner Ausführung.
    ///
    /// Bei vollem Log wird die ältere Hälfte verworfen; der Änderungszähler
    /// bleibt davon unberührt.
    pub fn record(&mut self, command: &AppCommand) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            log::debug!(
                "Command-Log voll, verwerfe {} älteste Einträge",
                Self::MAX_ENTRIES / 2
            );
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        if resets_edit_count(command) {
            self.edits_since_save = 0;
        } else if edits_splines(command) {
            self.edits_since_save += 1;
        }
        log::trace!("Command: {:?}", command);
        self.entries.push(command.clone());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AppCommand] {
        &self.entries
    }

    /// Spline- oder Modell-Änderungen seit dem letzten Datei-Command.
    pub fn edits_since_save(&self) -> usize {
        self.edits_since_save
    }
}

fn resets_edit_count(command: &AppCommand) -> bool {
    matches!(
        command,
        AppCommand::LoadFile { .. } | AppCommand::SaveFile { .. } | AppCommand::CloseScene
    )
}

fn edits_splines(command: &AppCommand) -> bool {
    matches!(
        command,
        AppCommand::PlacePoint { .. }
            | AppCommand::DeleteSelectedPoints
            | AppCommand::MoveWidgetHandle { .. }
            | AppCommand::InsertWidgetHandle { .. }
            | AppCommand::UpdateNodeFromWidget { .. }
            | AppCommand::SetRepresentationType { .. }
            | AppCommand::SetThickness { .. }
            | AppCommand::SetClosed { .. }
            | AppCommand::AssociateModel { .. }
            | AppCommand::AssociateAllModels { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeId;

    #[test]
    fn test_log_drops_oldest_half_when_full() {
        let mut log = CommandLog::new();
        for _ in 0..CommandLog::MAX_ENTRIES {
            log.record(&AppCommand::StopInteraction);
        }
        assert_eq!(log.len(), CommandLog::MAX_ENTRIES);

        log.record(&AppCommand::DeleteSelectedPoints);
        assert_eq!(log.len(), CommandLog::MAX_ENTRIES / 2 + 1);
        assert!(matches!(
            log.entries().last(),
            Some(AppCommand::DeleteSelectedPoints)
        ));
        assert_eq!(log.edits_since_save(), 1);
    }

    #[test]
    fn test_edit_count_resets_on_save() {
        let node = NodeId::new("vtkMRMLMarkupsSplinesNode1");
        let mut log = CommandLog::new();
        log.record(&AppCommand::SetThickness {
            node: node.clone(),
            index: 0,
            thickness: 5.0,
        });
        log.record(&AppCommand::StopInteraction);
        log.record(&AppCommand::AssociateAllModels { node: node.clone() });
        assert_eq!(log.edits_since_save(), 2);

        log.record(&AppCommand::SaveFile {
            node: Some(node),
            path: None,
        });
        assert_eq!(log.edits_since_save(), 0);
        assert_eq!(log.len(), 4);
    }
}
