//! Zentrale Konfiguration für Spline-Markups.
//!
//! `SplinesOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{SplineDefaults, DEFAULT_MERGE_TOLERANCE, DEFAULT_MODEL_OPACITY};
use serde::{Deserialize, Serialize};

// ── Widgets ─────────────────────────────────────────────────────────

/// Zwischenpunkte pro Segment beim Abtasten einer Spline-Kurve.
pub const SAMPLES_PER_SEGMENT: usize = 10;

// ── Extrusion ───────────────────────────────────────────────────────

/// Toleranz beim Verschmelzen koinzidenter Slab-Punkte (Welteinheiten).
pub const MERGE_TOLERANCE: f64 = DEFAULT_MERGE_TOLERANCE;
/// Deckkraft neu zugeordneter Slab-Modelle.
pub const ASSOCIATED_MODEL_OPACITY: f64 = DEFAULT_MODEL_OPACITY;

// ── Interaktion ─────────────────────────────────────────────────────

/// Platzier-Modus nach einem Klick beibehalten.
pub const PLACE_MODE_PERSISTENCE: bool = false;
/// View, in die der Displayable-Manager rendert.
pub const VIEW_NODE_ID: &str = "vtkMRMLViewNode1";
/// Obergrenze für Event-Runden pro Benutzeraktion.
pub const MAX_EVENT_ROUNDS: usize = 16;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `markups_splines.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SplinesOptions {
    // ── Widgets ─────────────────────────────────────────────────
    /// Zwischenpunkte pro Segment für Spline-Widgets
    pub samples_per_segment: usize,

    // ── Extrusion ───────────────────────────────────────────────
    /// Verschmelz-Toleranz der Slab-Bereinigung
    pub merge_tolerance: f64,
    /// Deckkraft neuer Slab-Modelle
    pub associated_model_opacity: f64,

    // ── Interaktion ─────────────────────────────────────────────
    /// Platzier-Modus nach einem Klick beibehalten
    #[serde(default)]
    pub place_mode_persistence: bool,
    /// View, in die gerendert wird
    pub view_node_id: String,
    /// Obergrenze für Event-Runden pro Benutzeraktion
    #[serde(default = "default_max_event_rounds")]
    pub max_event_rounds: usize,

    // ── Neue Spline-Nodes ───────────────────────────────────────
    /// Default-Attribute für neu angelegte Spline-Nodes
    #[serde(default)]
    pub spline_defaults: SplineDefaults,
}

impl Default for SplinesOptions {
    fn default() -> Self {
        Self {
            samples_per_segment: SAMPLES_PER_SEGMENT,
            merge_tolerance: MERGE_TOLERANCE,
            associated_model_opacity: ASSOCIATED_MODEL_OPACITY,
            place_mode_persistence: PLACE_MODE_PERSISTENCE,
            view_node_id: VIEW_NODE_ID.to_string(),
            max_event_rounds: MAX_EVENT_ROUNDS,
            spline_defaults: SplineDefaults::default(),
        }
    }
}

/// Serde-Default für `max_event_rounds` (Abwärtskompatibilität).
fn default_max_event_rounds() -> usize {
    MAX_EVENT_ROUNDS
}

impl SplinesOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("splines-tool"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("markups_splines.toml")
    }
}
