//! Displayable-Manager: hält Kurven-Widgets synchron zu Spline-Nodes.
//!
//! Pro Markups-Display-Node existiert eine Pipeline mit genau einem Widget
//! pro Eintrag des besitzenden Spline-Nodes. Scene- und Node-Events lösen
//! einen Abgleich (`reconcile`) aus; Benutzer-Interaktionen an einem Widget
//! werden über `update_node_from_widget` in den Node zurückgeschrieben.
//! Zugeordnete Modell-Nodes erhalten bei jedem Abgleich ein neues Slab-Mesh.

use super::observations::{ObservationRegistry, SPLINES_NODE_EVENTS};
use super::widgets::{CurveWidget, WidgetId, WidgetKind};
use crate::core::{
    build_spline_model, ModelDisplayNode, NodeClass, NodeEvent, NodeId, RepresentationType,
    Scene, SceneEvent, SceneNode,
};
use crate::shared::SplinesOptions;
use glam::DVec3;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Widgets eines Display-Nodes, Index = Eintrags-Index im Spline-Node.
#[derive(Debug, Default)]
pub struct Pipeline {
    widgets: Vec<CurveWidget>,
}

impl Pipeline {
    pub fn widgets(&self) -> &[CurveWidget] {
        &self.widgets
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }
}

/// Schutz gegen verschachtelte Node-Registrierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationPhase {
    #[default]
    Idle,
    AddingNode,
}

/// Momentaufnahme eines Eintrags für den Abgleich.
struct EntrySnapshot {
    representation: RepresentationType,
    visible: bool,
    locked: bool,
    points: Vec<DVec3>,
    closed: bool,
    selected_point: Option<usize>,
    associated: Option<NodeId>,
    normal: DVec3,
    thickness: f64,
}

/// Auftrag zum Neuaufbau eines zugeordneten Slab-Modells.
struct ModelJob {
    model: NodeId,
    contour: Vec<DVec3>,
    normal: DVec3,
    thickness: f64,
}

/// Synchronisiert Spline-Nodes einer Scene mit interaktiven Kurven-Widgets.
#[derive(Debug)]
pub struct SplinesDisplayableManager {
    view_node_id: String,
    samples_per_segment: usize,
    merge_tolerance: f64,
    model_opacity: f64,
    /// Pipelines pro Markups-Display-Node
    pipelines: IndexMap<NodeId, Pipeline>,
    /// Spline-Node → verwendete Display-Nodes
    markup_to_display: IndexMap<NodeId, IndexSet<NodeId>>,
    /// Widget → Display-Node (Rückwärtssuche für Interaktionen)
    widget_map: HashMap<WidgetId, NodeId>,
    observations: ObservationRegistry,
    phase: RegistrationPhase,
    update_from_scene_requested: bool,
    next_widget_id: u64,
    render_requests: u64,
}

impl SplinesDisplayableManager {
    /// Erstellt einen leeren Manager; der erste Abgleich mit der Scene ist angefordert.
    pub fn new(options: &SplinesOptions) -> Self {
        Self {
            view_node_id: options.view_node_id.clone(),
            samples_per_segment: options.samples_per_segment,
            merge_tolerance: options.merge_tolerance,
            model_opacity: options.associated_model_opacity,
            pipelines: IndexMap::new(),
            markup_to_display: IndexMap::new(),
            widget_map: HashMap::new(),
            observations: ObservationRegistry::new(),
            phase: RegistrationPhase::Idle,
            update_from_scene_requested: true,
            next_widget_id: 1,
            render_requests: 0,
        }
    }

    /// Erstellt einen Manager und baut alle Pipelines aus der Scene auf.
    pub fn create(options: &SplinesOptions, scene: &mut Scene) -> Self {
        let mut manager = Self::new(options);
        manager.update_from_scene(scene);
        manager
    }

    // ── Abfragen ────────────────────────────────────────────────────

    pub fn view_node_id(&self) -> &str {
        &self.view_node_id
    }

    pub fn phase(&self) -> RegistrationPhase {
        self.phase
    }

    pub fn is_update_from_scene_requested(&self) -> bool {
        self.update_from_scene_requested
    }

    pub fn observations(&self) -> &ObservationRegistry {
        &self.observations
    }

    /// Pipeline eines Display-Nodes.
    pub fn pipeline(&self, display_id: &NodeId) -> Option<&Pipeline> {
        self.pipelines.get(display_id)
    }

    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    /// Anzahl aller Widgets über alle Pipelines.
    pub fn widget_count(&self) -> usize {
        self.widget_map.len()
    }

    /// Verwendete Display-Nodes eines Spline-Nodes.
    pub fn display_nodes_of(&self, node_id: &NodeId) -> Vec<NodeId> {
        self.markup_to_display
            .get(node_id)
            .map(|displays| displays.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Widgets des ersten verwendeten Display-Nodes eines Spline-Nodes.
    pub fn widgets_of(&self, node_id: &NodeId) -> &[CurveWidget] {
        self.markup_to_display
            .get(node_id)
            .and_then(|displays| displays.iter().find_map(|d| self.pipelines.get(d)))
            .map(Pipeline::widgets)
            .unwrap_or_default()
    }

    /// Widget-ID für Eintrag `n` eines Spline-Nodes (erster Display-Node).
    pub fn widget_for_entry(&self, node_id: &NodeId, n: usize) -> Option<WidgetId> {
        self.widgets_of(node_id).get(n).map(CurveWidget::id)
    }

    /// Display-Node und Eintrags-Index eines Widgets.
    pub fn widget_location(&self, widget_id: WidgetId) -> Option<(NodeId, usize)> {
        let display_id = self.widget_map.get(&widget_id)?;
        let index = self
            .pipelines
            .get(display_id)?
            .widgets
            .iter()
            .position(|w| w.id() == widget_id)?;
        Some((display_id.clone(), index))
    }

    pub fn widget(&self, widget_id: WidgetId) -> Option<&CurveWidget> {
        let display_id = self.widget_map.get(&widget_id)?;
        self.pipelines
            .get(display_id)?
            .widgets
            .iter()
            .find(|w| w.id() == widget_id)
    }

    pub fn widget_mut(&mut self, widget_id: WidgetId) -> Option<&mut CurveWidget> {
        let display_id = self.widget_map.get(&widget_id)?;
        self.pipelines
            .get_mut(display_id)?
            .widgets
            .iter_mut()
            .find(|w| w.id() == widget_id)
    }

    /// Fordert ein Neuzeichnen an.
    pub fn request_render(&mut self) {
        self.render_requests += 1;
    }

    /// Entnimmt die Anzahl seit dem letzten Aufruf angeforderter Renders.
    pub fn take_render_requests(&mut self) -> u64 {
        std::mem::take(&mut self.render_requests)
    }

    // ── Scene-Events ────────────────────────────────────────────────

    /// Verarbeitet eine Event-Runde und holt danach einen angeforderten
    /// Komplett-Abgleich nach, sofern keine Batch-Verarbeitung läuft.
    pub fn process_events(&mut self, scene: &mut Scene, events: Vec<SceneEvent>) {
        for event in events {
            self.process_scene_event(scene, event);
        }
        if self.update_from_scene_requested && !scene.is_batch_processing() {
            self.update_from_scene(scene);
        }
    }

    /// Verarbeitet ein einzelnes Scene-Event.
    pub fn process_scene_event(&mut self, scene: &mut Scene, event: SceneEvent) {
        match event {
            SceneEvent::NodeAdded {
                id,
                class: NodeClass::Splines,
            } => {
                if scene.is_batch_processing() {
                    self.update_from_scene_requested = true;
                    return;
                }
                self.add_node(scene, &id);
                self.request_render();
            }
            SceneEvent::NodeAdded { .. } => {}
            SceneEvent::NodeRemoved {
                id,
                class: NodeClass::Splines,
            } => {
                self.remove_node(&id);
                self.request_render();
            }
            SceneEvent::NodeRemoved {
                id,
                class: NodeClass::MarkupsDisplay,
            } => {
                if self.remove_display_node(&id) {
                    self.request_render();
                }
            }
            SceneEvent::NodeRemoved { .. } => {}
            SceneEvent::Node { id, event } => self.process_node_event(scene, &id, event),
            SceneEvent::StartClose => self.clear_displayable_nodes(),
            SceneEvent::EndClose => self.update_from_scene_requested = true,
            SceneEvent::EndBatchProcess => {
                self.update_from_scene_requested = true;
                self.request_render();
            }
        }
    }

    fn process_node_event(&mut self, scene: &mut Scene, id: &NodeId, event: NodeEvent) {
        if scene.is_batch_processing() || !self.observations.is_observing(id, event.kind()) {
            return;
        }
        match event {
            NodeEvent::DisplayModified(display_id) => self.update_display_node(scene, &display_id),
            _ => self.update_displayable_node(scene, id),
        }
        self.request_render();
    }

    /// Baut alle Pipelines aus den Spline-Nodes der Scene neu auf.
    pub fn update_from_scene(&mut self, scene: &mut Scene) {
        self.update_from_scene_requested = false;
        self.clear_displayable_nodes();
        let nodes = scene.nodes_by_class(NodeClass::Splines);
        for id in &nodes {
            self.add_node(scene, id);
        }
        log::debug!(
            "Displayable-Manager neu aufgebaut: {} Spline-Nodes, {} Widgets",
            nodes.len(),
            self.widget_count()
        );
        self.request_render();
    }

    // ── Registrierung ───────────────────────────────────────────────

    /// Registriert einen Spline-Node und legt Pipelines für seine Display-Nodes an.
    pub fn add_node(&mut self, scene: &mut Scene, id: &NodeId) {
        if self.phase == RegistrationPhase::AddingNode {
            return;
        }
        let Some(splines) = scene.splines(id) else {
            log::warn!("add_node: Spline-Node {} nicht gefunden", id);
            return;
        };
        let display_ids = splines.display_node_ids().to_vec();

        self.phase = RegistrationPhase::AddingNode;
        self.observations.observe(id, &SPLINES_NODE_EVENTS);
        for display_id in display_ids {
            let usable = scene
                .display(&display_id)
                .is_some_and(|d| d.is_displayable_in_view(&self.view_node_id));
            if usable {
                self.markup_to_display
                    .entry(id.clone())
                    .or_default()
                    .insert(display_id.clone());
                self.add_display_node(scene, &display_id);
            }
        }
        self.phase = RegistrationPhase::Idle;
    }

    /// Entfernt alle Pipelines und Beobachtungen eines Spline-Nodes.
    pub fn remove_node(&mut self, id: &NodeId) {
        if let Some(displays) = self.markup_to_display.shift_remove(id) {
            for display_id in &displays {
                self.remove_display_node(display_id);
            }
        }
        self.observations.unobserve(id);
    }

    fn add_display_node(&mut self, scene: &mut Scene, display_id: &NodeId) {
        if self.pipelines.contains_key(display_id) {
            return;
        }
        self.pipelines.insert(display_id.clone(), Pipeline::default());
        self.reconcile(scene, display_id);
    }

    fn remove_display_node(&mut self, display_id: &NodeId) -> bool {
        let Some(mut pipeline) = self.pipelines.shift_remove(display_id) else {
            return false;
        };
        Self::clear_pipeline(&mut self.widget_map, &mut pipeline);
        for displays in self.markup_to_display.values_mut() {
            displays.shift_remove(display_id);
        }
        true
    }

    fn clear_pipeline(widget_map: &mut HashMap<WidgetId, NodeId>, pipeline: &mut Pipeline) {
        for widget in pipeline.widgets.drain(..) {
            widget_map.remove(&widget.id());
        }
    }

    fn clear_displayable_nodes(&mut self) {
        let nodes: Vec<NodeId> = self.markup_to_display.keys().cloned().collect();
        for id in &nodes {
            self.remove_node(id);
        }
        for (_, mut pipeline) in self.pipelines.drain(..) {
            Self::clear_pipeline(&mut self.widget_map, &mut pipeline);
        }
        self.observations.clear();
    }

    /// Display-Änderung: bekannte Pipeline abgleichen, sonst Besitzer neu registrieren.
    fn update_display_node(&mut self, scene: &mut Scene, display_id: &NodeId) {
        if self.pipelines.contains_key(display_id) {
            self.reconcile(scene, display_id);
            return;
        }
        let Some(owner) = scene.display(display_id).map(|d| d.displayable_node.clone()) else {
            return;
        };
        self.add_node(scene, &owner);
    }

    /// Gleicht alle Pipelines eines Spline-Nodes ab.
    pub fn update_displayable_node(&mut self, scene: &mut Scene, id: &NodeId) {
        for display_id in self.display_nodes_of(id) {
            if self.pipelines.contains_key(&display_id) {
                self.reconcile(scene, &display_id);
            }
        }
    }

    // ── Abgleich Node → Widgets ─────────────────────────────────────

    /// Bringt die Widgets einer Pipeline auf den Stand des Spline-Nodes.
    ///
    /// Weniger Einträge als Widgets oder ein geänderter Repräsentationstyp
    /// verwerfen alle Widgets der Pipeline. Fehlende Widgets werden angehängt.
    pub fn reconcile(&mut self, scene: &mut Scene, display_id: &NodeId) {
        let Some(display) = scene.display(display_id) else {
            log::warn!("reconcile: Display-Node {} nicht gefunden", display_id);
            return;
        };
        let display_visible = display.visible;
        let owner = display.displayable_node.clone();
        let Some(splines) = scene.splines(&owner) else {
            log::warn!("reconcile: Spline-Node {} nicht gefunden", owner);
            return;
        };
        let collection_locked = splines.locked();
        let entries: Vec<EntrySnapshot> = splines
            .markups()
            .iter()
            .enumerate()
            .map(|(n, markup)| {
                let attrs = splines
                    .spline(n)
                    .cloned()
                    .unwrap_or_else(|| splines.defaults().to_attributes());
                EntrySnapshot {
                    representation: attrs.representation_type,
                    visible: markup.visible,
                    locked: markup.locked,
                    points: markup.points.clone(),
                    closed: attrs.closed,
                    selected_point: attrs.selected_point_index,
                    associated: markup.associated_node_id.clone(),
                    normal: attrs.normal(),
                    thickness: attrs.thickness,
                }
            })
            .collect();

        let Some(pipeline) = self.pipelines.get_mut(display_id) else {
            return;
        };

        if entries.len() < pipeline.widgets.len() {
            Self::clear_pipeline(&mut self.widget_map, pipeline);
        }
        let kind_changed = pipeline
            .widgets
            .iter()
            .zip(&entries)
            .any(|(widget, entry)| !widget.kind().matches(entry.representation));
        if kind_changed {
            Self::clear_pipeline(&mut self.widget_map, pipeline);
        }
        for entry in entries.iter().skip(pipeline.widgets.len()) {
            let widget_id = WidgetId(self.next_widget_id);
            self.next_widget_id += 1;
            pipeline.widgets.push(CurveWidget::new(
                widget_id,
                WidgetKind::from(entry.representation),
                self.samples_per_segment,
            ));
            self.widget_map.insert(widget_id, display_id.clone());
        }

        let mut jobs = Vec::new();
        for (widget, entry) in pipeline.widgets.iter_mut().zip(entries) {
            let visible = display_visible && entry.visible;
            widget.set_enabled(visible);
            widget.set_process_events(!(collection_locked || entry.locked));
            if !visible {
                continue;
            }

            let rep = widget.representation_mut();
            rep.set_handles(&entry.points);
            rep.set_closed(entry.closed);
            rep.set_current_handle(entry.selected_point);
            rep.build_representation();

            if let Some(model) = entry.associated {
                jobs.push(ModelJob {
                    model,
                    contour: rep.boundary().to_vec(),
                    normal: entry.normal,
                    thickness: entry.thickness,
                });
            }
        }

        for job in jobs {
            self.update_associated_model(scene, job);
        }
    }

    /// Schreibt das Slab-Mesh in den Modell-Node; legt beim ersten Mal einen
    /// halbtransparenten, beidseitig sichtbaren Display-Node an.
    fn update_associated_model(&self, scene: &mut Scene, job: ModelJob) {
        let has_display = scene
            .model(&job.model)
            .and_then(|model| model.display_node.as_ref())
            .is_some_and(|display| scene.model_display(display).is_some());
        let Some(model) = scene.model_mut(&job.model) else {
            log::warn!("Zugeordneter Modell-Node {} nicht gefunden", job.model);
            return;
        };
        if !build_spline_model(
            model,
            &job.contour,
            job.normal,
            job.thickness,
            self.merge_tolerance,
        ) {
            log::debug!(
                "Modell {}: Kontur mit {} Punkten ergibt kein Slab",
                job.model,
                job.contour.len()
            );
        }
        if has_display {
            return;
        }

        let display_id = scene.add_node(SceneNode::ModelDisplay(ModelDisplayNode::new(
            job.model.clone(),
            self.model_opacity,
        )));
        if let Some(model) = scene.model_mut(&job.model) {
            model.display_node = Some(display_id);
        }
    }

    // ── Rückweg Widget → Node ───────────────────────────────────────

    /// Überträgt die Handles eines Widgets in den zugehörigen Eintrag.
    ///
    /// Fehlende Einträge werden angehängt, überzählige Handles als neue
    /// Punkte ergänzt. Alle Änderungen werden als ein Block gemeldet.
    pub fn update_node_from_widget(&mut self, scene: &mut Scene, widget_id: WidgetId) -> bool {
        let Some((display_id, index)) = self.widget_location(widget_id) else {
            log::warn!("update_node_from_widget: {} unbekannt", widget_id);
            return false;
        };
        let Some(widget) = self.widget(widget_id) else {
            return false;
        };
        let handles = widget.representation().handles().to_vec();
        let current_handle = widget.representation().current_handle();

        let Some(owner) = scene
            .display(&display_id)
            .map(|display| display.displayable_node.clone())
        else {
            log::warn!("update_node_from_widget: Display-Node {} fehlt", display_id);
            return false;
        };
        let Some(node) = scene.splines_mut(&owner) else {
            log::warn!("update_node_from_widget: Spline-Node {} fehlt", owner);
            return false;
        };

        let was_modifying = node.start_modify();
        while node.number_of_markups() <= index {
            node.add_spline(DVec3::ZERO);
        }
        node.init_spline(index);

        for (i, position) in handles.iter().enumerate() {
            if i >= node.number_of_points_in_nth_markup(index) {
                node.add_point_to_nth_markup(*position, index);
            } else {
                node.set_nth_control_point(index, i, *position);
            }
        }
        node.set_nth_markup_selected(index, true);
        node.set_nth_spline_selected_point_index(index, current_handle);
        node.end_modify(was_modifying);

        self.request_render();
        true
    }
}

#[cfg(test)]
mod tests;
