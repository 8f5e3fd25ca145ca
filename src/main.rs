//! splines-tool: Spline-Markups laden, prüfen, extrudieren und speichern.
//!
//! Fährt die Library ohne GUI über denselben Intent/Command-Fluss wie ein Host.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::DVec3;
use markups_splines::core::NodeClass;
use markups_splines::shared::spline_geometry::{catmull_rom_chain, polyline_length};
use markups_splines::{
    AppController, AppIntent, AppState, NodeId, RepresentationType, SplinesOptions,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "splines-tool")]
#[command(about = "Spline-Markups laden, extrudieren und speichern", long_about = None)]
struct Cli {
    /// Optionen-Datei (Standard: markups_splines.toml neben der Binary)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Zeigt Einträge und Attribute einer *.markups.json-Datei
    Info {
        /// Eingabedatei
        file: PathBuf,
    },
    /// Extrudiert alle Einträge zu Slab-Modellen und exportiert sie als OBJ
    Extrude {
        /// Eingabedatei
        input: PathBuf,
        /// OBJ-Ausgabedatei
        output: PathBuf,
        /// Aktualisierte Markups (mit Modell-Zuordnungen) zusätzlich speichern
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Liest eine Datei und schreibt sie normalisiert wieder aus
    Convert {
        /// Eingabedatei
        input: PathBuf,
        /// Ausgabedatei
        output: PathBuf,
    },
    /// Schreibt die Standard-Optionen als TOML
    WriteConfig {
        /// Zieldatei (Standard: neben der Binary)
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("splines-tool v{} startet...", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(SplinesOptions::config_path);

    match cli.command {
        Commands::Info { file } => {
            let (state, node) = open(&config_path, &file)?;
            print_summary(&state, &node);
        }
        Commands::Extrude {
            input,
            output,
            save,
        } => {
            let (mut state, node) = open(&config_path, &input)?;
            extrude_all(&mut state, &node, &output)?;
            if let Some(path) = save {
                save_node(&mut state, &node, path)?;
            }
        }
        Commands::Convert { input, output } => {
            let (mut state, node) = open(&config_path, &input)?;
            save_node(&mut state, &node, output)?;
        }
        Commands::WriteConfig { output } => {
            let path = output.unwrap_or(config_path);
            SplinesOptions::default().save_to_file(&path)?;
        }
    }

    Ok(())
}

fn open(config_path: &Path, file: &Path) -> Result<(AppState, NodeId)> {
    let options = SplinesOptions::load_from_file(config_path);
    let mut state = AppState::with_options(options);
    let mut controller = AppController::new();
    controller.handle_intent(
        &mut state,
        AppIntent::OpenFileRequested {
            path: file.to_path_buf(),
        },
    )?;
    let node = state
        .interaction
        .active_place_node_id
        .clone()
        .context("Geladener Spline-Node fehlt")?;
    Ok((state, node))
}

fn print_summary(state: &AppState, node_id: &NodeId) {
    let Some(node) = state.scene.splines(node_id) else {
        return;
    };
    println!("{} ({}): {} Einträge", node.name(), node_id, node.number_of_markups());
    for n in 0..node.number_of_markups() {
        let closed = node.nth_spline_closed(n);
        let representation = node.nth_spline_representation_type(n);
        let points = node.markup(n).map_or(&[][..], |markup| &markup.points[..]);
        println!(
            "  [{}] {:<12} Punkte: {:>3}  {:?}  geschlossen: {}  Dicke: {}  Länge: {:.2}",
            n,
            node.nth_markup_label(n),
            points.len(),
            representation,
            closed,
            node.nth_spline_thickness(n),
            contour_length(points, representation, closed, state.options.samples_per_segment),
        );
    }
    println!(
        "Widgets: {} in {} Pipelines",
        state.manager.widget_count(),
        state.manager.pipeline_count()
    );
}

/// Länge der Kontur, wie sie extrudiert wird (Spline dicht abgetastet).
fn contour_length(
    points: &[DVec3],
    representation: RepresentationType,
    closed: bool,
    samples_per_segment: usize,
) -> f64 {
    match representation {
        RepresentationType::Spline => {
            let chain = catmull_rom_chain(points, samples_per_segment, closed);
            polyline_length(&chain, closed)
        }
        RepresentationType::Polyline => polyline_length(points, closed),
    }
}

fn extrude_all(state: &mut AppState, node_id: &NodeId, output: &Path) -> Result<()> {
    let mut controller = AppController::new();
    controller.handle_intent(
        state,
        AppIntent::AssociateAllModelsRequested {
            node: node_id.clone(),
        },
    )?;

    let mut obj = String::new();
    let mut vertex_offset = 0;
    let mut exported = 0;
    for id in state.scene.nodes_by_class(NodeClass::Model) {
        let Some(model) = state.scene.model(&id) else {
            continue;
        };
        match &model.mesh {
            Some(mesh) => {
                vertex_offset = mesh.write_obj(&mut obj, &model.name, vertex_offset);
                exported += 1;
            }
            None => log::warn!("Modell {} ohne Mesh (degenerierte Kontur)", model.name),
        }
    }

    std::fs::write(output, obj)
        .with_context(|| format!("OBJ konnte nicht geschrieben werden: {}", output.display()))?;
    log::info!("{} Slab-Modelle nach {} exportiert", exported, output.display());
    Ok(())
}

fn save_node(state: &mut AppState, node_id: &NodeId, path: PathBuf) -> Result<()> {
    let mut controller = AppController::new();
    controller.handle_intent(
        state,
        AppIntent::SaveRequested {
            node: Some(node_id.clone()),
            path: Some(path),
        },
    )
}
