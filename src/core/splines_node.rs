//! Der Spline-Node: geordnete Sammlung von Spline-Einträgen mit Default-Fallback.
//!
//! Jeder Eintrag besteht aus den Basisdaten (`Markup`: Punkte, Flags) und den
//! Spline-Attributen (`SplineAttributes`). Setter sind entprellt: unveränderte
//! Werte lösen keine Events aus. Getter auf ungültige Indizes liefern den
//! Default-Wert und protokollieren einen Fehler.

use super::events::{EventOutbox, NodeEvent};
use super::markup::{format_label, Markup};
use super::scene::NodeId;
use super::spline::{
    extrusion_normal, RepresentationType, SplineAttributes, SplineDefaults, FUZZY_TOLERANCE,
};
use glam::{DMat4, DVec3};

/// Standard-Format für neue Labels (`%N` = Node-Name, `%d` = Nummer).
pub const DEFAULT_MARKUP_LABEL_FORMAT: &str = "%N-%d";

/// Sammlung von Spline-Einträgen eines Scene-Nodes.
#[derive(Debug, Clone)]
pub struct SplinesNode {
    name: String,
    markups: Vec<Markup>,
    splines: Vec<SplineAttributes>,
    defaults: SplineDefaults,
    current_spline: Option<usize>,
    locked: bool,
    markup_label_format: String,
    next_markup_number: usize,
    display_node_ids: Vec<NodeId>,
    outbox: EventOutbox,
}

impl SplinesNode {
    /// Erstellt einen leeren Node mit Standard-Defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_defaults(name, SplineDefaults::default())
    }

    /// Erstellt einen leeren Node mit vorgegebenen Defaults.
    pub fn with_defaults(name: impl Into<String>, defaults: SplineDefaults) -> Self {
        Self {
            name: name.into(),
            markups: Vec::new(),
            splines: Vec::new(),
            defaults,
            current_spline: None,
            locked: false,
            markup_label_format: DEFAULT_MARKUP_LABEL_FORMAT.to_string(),
            next_markup_number: 1,
            display_node_ids: Vec::new(),
            outbox: EventOutbox::default(),
        }
    }

    // ── Events ──────────────────────────────────────────────────────

    /// Startet eine Bündelung; Events werden bis zum äußersten `end_modify` gehalten.
    pub fn start_modify(&mut self) -> bool {
        self.outbox.start_modify()
    }

    /// Beendet eine Bündelung (Wert aus `start_modify` übergeben).
    pub fn end_modify(&mut self, was_modifying: bool) {
        self.outbox.end_modify(was_modifying);
    }

    /// Meldet ein Event an Beobachter.
    pub fn notify(&mut self, event: NodeEvent) {
        self.outbox.push(event);
    }

    /// Entnimmt alle freigegebenen Events.
    pub fn take_events(&mut self) -> Vec<NodeEvent> {
        self.outbox.drain()
    }

    /// Anzahl freigegebener, noch nicht abgeholter Events.
    pub fn pending_events(&self) -> usize {
        self.outbox.pending()
    }

    fn modified_nth(&mut self, n: usize) {
        self.outbox.push(NodeEvent::Modified);
        self.outbox.push(NodeEvent::NthMarkupModified(n));
    }

    // ── Node-Eigenschaften ──────────────────────────────────────────

    /// Name des Nodes (für Labels und Markup-IDs).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// IDs der zugehörigen Markups-Display-Nodes.
    pub fn display_node_ids(&self) -> &[NodeId] {
        &self.display_node_ids
    }

    /// Registriert einen Display-Node (ohne Event).
    pub fn add_display_node_id(&mut self, id: NodeId) {
        if !self.display_node_ids.contains(&id) {
            self.display_node_ids.push(id);
        }
    }

    /// Gesperrt-Flag des gesamten Nodes.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Setzt das Gesperrt-Flag des gesamten Nodes.
    pub fn set_locked(&mut self, locked: bool) {
        if self.locked != locked {
            self.locked = locked;
            self.outbox.push(NodeEvent::Modified);
        }
    }

    /// Label-Format für neue Einträge.
    pub fn markup_label_format(&self) -> &str {
        &self.markup_label_format
    }

    /// Setzt das Label-Format für neue Einträge.
    pub fn set_markup_label_format(&mut self, format: &str) {
        if self.markup_label_format != format {
            self.markup_label_format = format.to_string();
            self.outbox.push(NodeEvent::Modified);
        }
    }

    /// Gemeinsamer Default-Datensatz.
    pub fn defaults(&self) -> &SplineDefaults {
        &self.defaults
    }

    /// Ersetzt den Default-Datensatz; meldet `Modified` nur bei Änderung.
    pub fn set_defaults(&mut self, defaults: SplineDefaults) {
        if self.defaults != defaults {
            self.defaults = defaults;
            self.outbox.push(NodeEvent::Modified);
        }
    }

    // ── Basis-Markups ───────────────────────────────────────────────

    /// Anzahl der Markup-Einträge.
    pub fn number_of_markups(&self) -> usize {
        self.markups.len()
    }

    /// Markup-Eintrag per Index.
    pub fn markup(&self, n: usize) -> Option<&Markup> {
        self.markups.get(n)
    }

    /// Alle Markup-Einträge.
    pub fn markups(&self) -> &[Markup] {
        &self.markups
    }

    fn markup_mut_checked(&mut self, n: usize, operation: &str) -> Option<&mut Markup> {
        let count = self.markups.len();
        let markup = self.markups.get_mut(n);
        if markup.is_none() {
            log::error!(
                "{}: Markup-Index {} ungültig (Anzahl: {})",
                operation,
                n,
                count
            );
        }
        markup
    }

    /// Legt einen neuen Markup-Eintrag ohne Spline-Attribute an.
    ///
    /// Die Attribute werden über `init_spline` nachgezogen.
    pub fn add_markup(&mut self) -> usize {
        let number = self.next_markup_number;
        self.next_markup_number += 1;
        let id = format!("{}_{}", self.name, number - 1);
        let label = format_label(&self.markup_label_format, &self.name, number);
        self.markups.push(Markup::new(id, label));
        let n = self.markups.len() - 1;
        self.outbox.push(NodeEvent::Modified);
        self.outbox.push(NodeEvent::MarkupAdded(n));
        n
    }

    /// Legt einen neuen Markup-Eintrag mit einem ersten Punkt an.
    pub fn add_point_to_new_markup(&mut self, point: DVec3) -> usize {
        let n = self.add_markup();
        self.markups[n].points.push(point);
        n
    }

    /// Hängt einen Punkt an den n-ten Eintrag an und gibt den Punkt-Index zurück.
    pub fn add_point_to_nth_markup(&mut self, point: DVec3, n: usize) -> Option<usize> {
        let markup = self.markup_mut_checked(n, "add_point_to_nth_markup")?;
        markup.points.push(point);
        let index = markup.points.len() - 1;
        self.modified_nth(n);
        Some(index)
    }

    /// Anzahl der Punkte im n-ten Eintrag (0 bei ungültigem Index).
    pub fn number_of_points_in_nth_markup(&self, n: usize) -> usize {
        self.markups.get(n).map_or(0, Markup::point_count)
    }

    /// Position eines Kontrollpunkts.
    pub fn nth_control_point(&self, n: usize, point: usize) -> Option<DVec3> {
        self.markups.get(n)?.points.get(point).copied()
    }

    /// Verschiebt einen Kontrollpunkt; meldet `PointModified` nur bei Änderung.
    pub fn set_nth_control_point(&mut self, n: usize, point: usize, position: DVec3) -> bool {
        let Some(markup) = self.markup_mut_checked(n, "set_nth_control_point") else {
            return false;
        };
        let Some(slot) = markup.points.get_mut(point) else {
            log::error!("set_nth_control_point: Punkt-Index {} ungültig", point);
            return false;
        };
        if *slot == position {
            return false;
        }
        *slot = position;
        self.outbox.push(NodeEvent::Modified);
        self.outbox.push(NodeEvent::PointModified { markup: n, point });
        true
    }

    /// Entfernt einen Kontrollpunkt.
    pub fn remove_nth_control_point(&mut self, n: usize, point: usize) -> bool {
        let Some(markup) = self.markup_mut_checked(n, "remove_nth_control_point") else {
            return false;
        };
        if point >= markup.points.len() {
            log::error!("remove_nth_control_point: Punkt-Index {} ungültig", point);
            return false;
        }
        markup.points.remove(point);
        self.modified_nth(n);
        true
    }

    /// Entfernt einen Eintrag samt Spline-Attributen.
    pub fn remove_markup(&mut self, n: usize) -> bool {
        if n >= self.markups.len() {
            log::error!("remove_markup: Markup-Index {} ungültig", n);
            return false;
        }
        self.markups.remove(n);
        if n < self.splines.len() {
            self.splines.remove(n);
        }
        self.current_spline = match self.current_spline {
            Some(current) if current == n => None,
            Some(current) if current > n => Some(current - 1),
            other => other,
        };
        self.outbox.push(NodeEvent::Modified);
        self.outbox.push(NodeEvent::MarkupRemoved(n));
        true
    }

    /// Entfernt alle Einträge.
    pub fn remove_all_markups(&mut self) {
        let was_modifying = self.start_modify();
        for n in (0..self.markups.len()).rev() {
            self.remove_markup(n);
        }
        self.end_modify(was_modifying);
    }

    /// ID des n-ten Eintrags (leer bei ungültigem Index).
    pub fn nth_markup_id(&self, n: usize) -> String {
        self.markups.get(n).map(|m| m.id.clone()).unwrap_or_default()
    }

    /// Setzt die ID des n-ten Eintrags.
    pub fn set_nth_markup_id(&mut self, n: usize, id: &str) {
        self.set_markup_value(n, "set_nth_markup_id", |m| &mut m.id, id.to_string());
    }

    /// Label des n-ten Eintrags (leer bei ungültigem Index).
    pub fn nth_markup_label(&self, n: usize) -> String {
        self.markups.get(n).map(|m| m.label.clone()).unwrap_or_default()
    }

    /// Setzt das Label des n-ten Eintrags.
    pub fn set_nth_markup_label(&mut self, n: usize, label: &str) {
        self.set_markup_value(n, "set_nth_markup_label", |m| &mut m.label, label.to_string());
    }

    /// Beschreibung des n-ten Eintrags (leer bei ungültigem Index).
    pub fn nth_markup_description(&self, n: usize) -> String {
        self.markups
            .get(n)
            .map(|m| m.description.clone())
            .unwrap_or_default()
    }

    /// Setzt die Beschreibung des n-ten Eintrags.
    pub fn set_nth_markup_description(&mut self, n: usize, description: &str) {
        self.set_markup_value(
            n,
            "set_nth_markup_description",
            |m| &mut m.description,
            description.to_string(),
        );
    }

    /// Sichtbarkeit des n-ten Eintrags (`false` bei ungültigem Index).
    pub fn nth_markup_visibility(&self, n: usize) -> bool {
        self.markups.get(n).is_some_and(|m| m.visible)
    }

    /// Setzt die Sichtbarkeit des n-ten Eintrags.
    pub fn set_nth_markup_visibility(&mut self, n: usize, visible: bool) {
        self.set_markup_value(n, "set_nth_markup_visibility", |m| &mut m.visible, visible);
    }

    /// Gesperrt-Flag des n-ten Eintrags (`false` bei ungültigem Index).
    pub fn nth_markup_locked(&self, n: usize) -> bool {
        self.markups.get(n).is_some_and(|m| m.locked)
    }

    /// Setzt das Gesperrt-Flag des n-ten Eintrags.
    pub fn set_nth_markup_locked(&mut self, n: usize, locked: bool) {
        self.set_markup_value(n, "set_nth_markup_locked", |m| &mut m.locked, locked);
    }

    /// Auswahl-Flag des n-ten Eintrags (`false` bei ungültigem Index).
    pub fn nth_markup_selected(&self, n: usize) -> bool {
        self.markups.get(n).is_some_and(|m| m.selected)
    }

    /// Setzt das Auswahl-Flag des n-ten Eintrags.
    pub fn set_nth_markup_selected(&mut self, n: usize, selected: bool) {
        self.set_markup_value(n, "set_nth_markup_selected", |m| &mut m.selected, selected);
    }

    /// Zugeordneter Modell-Node des n-ten Eintrags.
    pub fn nth_markup_associated_node_id(&self, n: usize) -> Option<NodeId> {
        self.markups.get(n)?.associated_node_id.clone()
    }

    /// Setzt den zugeordneten Modell-Node des n-ten Eintrags.
    pub fn set_nth_markup_associated_node_id(&mut self, n: usize, id: Option<NodeId>) {
        self.set_markup_value(
            n,
            "set_nth_markup_associated_node_id",
            |m| &mut m.associated_node_id,
            id,
        );
    }

    fn set_markup_value<T: PartialEq>(
        &mut self,
        n: usize,
        operation: &str,
        field: impl FnOnce(&mut Markup) -> &mut T,
        value: T,
    ) -> bool {
        let Some(markup) = self.markup_mut_checked(n, operation) else {
            return false;
        };
        let slot = field(markup);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.modified_nth(n);
        true
    }

    // ── Spline-Einträge ─────────────────────────────────────────────

    /// Anzahl der Einträge mit Spline-Attributen.
    pub fn number_of_splines(&self) -> usize {
        self.splines.len()
    }

    /// Spline-Attribute des n-ten Eintrags.
    pub fn spline(&self, n: usize) -> Option<&SplineAttributes> {
        self.splines.get(n)
    }

    /// Legt einen neuen Eintrag aus den Defaults an, setzt ihn als aktuell
    /// und gibt seinen Index zurück.
    pub fn add_spline(&mut self, point: DVec3) -> usize {
        let was_modifying = self.start_modify();
        let n = self.add_point_to_new_markup(point);
        self.init_spline(n);
        self.current_spline = Some(n);
        self.end_modify(was_modifying);
        n
    }

    /// Füllt fehlende Spline-Attribute bis einschließlich Index `n` mit Defaults auf.
    ///
    /// Gibt `false` zurück, wenn für `n` kein Markup-Eintrag existiert.
    pub fn init_spline(&mut self, n: usize) -> bool {
        if n >= self.markups.len() {
            log::error!(
                "init_spline: Kein Markup-Eintrag für Index {} (Anzahl: {})",
                n,
                self.markups.len()
            );
            return false;
        }
        while self.splines.len() <= n {
            self.splines.push(self.defaults.to_attributes());
        }
        true
    }

    /// Ersetzt alle Spline-Attribute des n-ten Eintrags ohne Toleranzvergleich.
    ///
    /// Für das Laden gespeicherter Werte; meldet höchstens ein
    /// `NthMarkupModified`.
    pub(crate) fn replace_nth_spline(&mut self, n: usize, attrs: SplineAttributes) -> bool {
        let count = self.splines.len();
        let Some(slot) = self.splines.get_mut(n) else {
            log::error!(
                "replace_nth_spline: Spline-Index {} ungültig (Anzahl: {})",
                n,
                count
            );
            return false;
        };
        if *slot == attrs {
            return false;
        }
        *slot = attrs;
        self.modified_nth(n);
        true
    }

    /// Aktueller Eintrag (`None` = keiner aktiv).
    pub fn current_spline(&self) -> Option<usize> {
        self.current_spline
    }

    /// Setzt den aktuellen Eintrag.
    pub fn set_current_spline(&mut self, current: Option<usize>) {
        if self.current_spline != current {
            self.current_spline = current;
            self.outbox.push(NodeEvent::Modified);
        }
    }

    fn nth_value<T>(
        &self,
        n: usize,
        operation: &str,
        get: impl FnOnce(&SplineAttributes) -> T,
        default: impl FnOnce(&SplineDefaults) -> T,
    ) -> T {
        match self.splines.get(n) {
            Some(attrs) => get(attrs),
            None => {
                log::error!(
                    "{}: Spline-Index {} ungültig (Anzahl: {}), verwende Default",
                    operation,
                    n,
                    self.splines.len()
                );
                default(&self.defaults)
            }
        }
    }

    fn set_nth_value<T>(
        &mut self,
        n: usize,
        operation: &str,
        field: impl FnOnce(&mut SplineAttributes) -> &mut T,
        value: T,
        same: impl FnOnce(&T, &T) -> bool,
    ) -> bool {
        let count = self.splines.len();
        let Some(attrs) = self.splines.get_mut(n) else {
            log::error!(
                "{}: Spline-Index {} ungültig (Anzahl: {})",
                operation,
                n,
                count
            );
            return false;
        };
        let slot = field(attrs);
        if same(&*slot, &value) {
            return false;
        }
        *slot = value;
        self.modified_nth(n);
        true
    }

    /// Geschlossen-Flag des n-ten Eintrags.
    pub fn nth_spline_closed(&self, n: usize) -> bool {
        self.nth_value(n, "nth_spline_closed", |a| a.closed, |d| d.closed)
    }

    /// Setzt das Geschlossen-Flag des n-ten Eintrags.
    pub fn set_nth_spline_closed(&mut self, n: usize, closed: bool) -> bool {
        self.set_nth_value(n, "set_nth_spline_closed", |a| &mut a.closed, closed, |a, b| a == b)
    }

    /// Slab-Dicke des n-ten Eintrags.
    pub fn nth_spline_thickness(&self, n: usize) -> f64 {
        self.nth_value(n, "nth_spline_thickness", |a| a.thickness, |d| d.thickness)
    }

    /// Setzt die Slab-Dicke des n-ten Eintrags.
    pub fn set_nth_spline_thickness(&mut self, n: usize, thickness: f64) -> bool {
        self.set_nth_value(
            n,
            "set_nth_spline_thickness",
            |a| &mut a.thickness,
            thickness,
            |a, b| a == b,
        )
    }

    /// Referenzansicht des n-ten Eintrags.
    pub fn nth_spline_reference_view(&self, n: usize) -> String {
        self.nth_value(
            n,
            "nth_spline_reference_view",
            |a| a.reference_view.clone(),
            |d| d.reference_view.clone(),
        )
    }

    /// Setzt die Referenzansicht des n-ten Eintrags.
    pub fn set_nth_spline_reference_view(&mut self, n: usize, view: &str) -> bool {
        self.set_nth_value(
            n,
            "set_nth_spline_reference_view",
            |a| &mut a.reference_view,
            view.to_string(),
            |a, b| a == b,
        )
    }

    /// Interpolationsart des n-ten Eintrags.
    pub fn nth_spline_representation_type(&self, n: usize) -> RepresentationType {
        self.nth_value(
            n,
            "nth_spline_representation_type",
            |a| a.representation_type,
            |d| d.representation_type,
        )
    }

    /// Setzt die Interpolationsart des n-ten Eintrags.
    pub fn set_nth_spline_representation_type(
        &mut self,
        n: usize,
        representation: RepresentationType,
    ) -> bool {
        self.set_nth_value(
            n,
            "set_nth_spline_representation_type",
            |a| &mut a.representation_type,
            representation,
            |a, b| a == b,
        )
    }

    /// Schrittweite des n-ten Eintrags.
    pub fn nth_spline_step_size(&self, n: usize) -> f64 {
        self.nth_value(n, "nth_spline_step_size", |a| a.step_size, |d| d.step_size)
    }

    /// Setzt die Schrittweite des n-ten Eintrags (Toleranz 1e-3).
    pub fn set_nth_spline_step_size(&mut self, n: usize, step_size: f64) -> bool {
        self.set_nth_value(
            n,
            "set_nth_spline_step_size",
            |a| &mut a.step_size,
            step_size,
            |a, b| (a - b).abs() < FUZZY_TOLERANCE,
        )
    }

    /// Ontologie-Tag des n-ten Eintrags.
    pub fn nth_spline_ontology(&self, n: usize) -> String {
        self.nth_value(
            n,
            "nth_spline_ontology",
            |a| a.ontology.clone(),
            |d| d.ontology.clone(),
        )
    }

    /// Setzt das Ontologie-Tag des n-ten Eintrags.
    pub fn set_nth_spline_ontology(&mut self, n: usize, ontology: &str) -> bool {
        self.set_nth_value(
            n,
            "set_nth_spline_ontology",
            |a| &mut a.ontology,
            ontology.to_string(),
            |a, b| a == b,
        )
    }

    /// Orientierungsmatrix des n-ten Eintrags.
    pub fn nth_spline_orientation(&self, n: usize) -> DMat4 {
        self.nth_value(
            n,
            "nth_spline_orientation",
            |a| a.orientation,
            |d| d.orientation,
        )
    }

    /// Setzt die Orientierungsmatrix des n-ten Eintrags (Toleranz 1e-3 je Element).
    pub fn set_nth_spline_orientation(&mut self, n: usize, orientation: DMat4) -> bool {
        self.set_nth_value(
            n,
            "set_nth_spline_orientation",
            |a| &mut a.orientation,
            orientation,
            |a, b| a.abs_diff_eq(*b, FUZZY_TOLERANCE),
        )
    }

    /// Extrusions-Normale des n-ten Eintrags (Z-Achse der Orientierung).
    pub fn nth_spline_normal(&self, n: usize) -> DVec3 {
        extrusion_normal(&self.nth_spline_orientation(n))
    }

    /// Gespeicherte Kameraposition des n-ten Eintrags.
    pub fn nth_spline_camera_position(&self, n: usize) -> DVec3 {
        self.nth_value(
            n,
            "nth_spline_camera_position",
            |a| a.camera_position,
            |d| d.camera_position,
        )
    }

    /// Setzt die Kameraposition des n-ten Eintrags (Toleranz 1e-3).
    pub fn set_nth_spline_camera_position(&mut self, n: usize, position: DVec3) -> bool {
        self.set_nth_value(
            n,
            "set_nth_spline_camera_position",
            |a| &mut a.camera_position,
            position,
            |a, b| a.abs_diff_eq(*b, FUZZY_TOLERANCE),
        )
    }

    /// Gespeicherter Kamera-View-Up des n-ten Eintrags.
    pub fn nth_spline_camera_view_up(&self, n: usize) -> DVec3 {
        self.nth_value(
            n,
            "nth_spline_camera_view_up",
            |a| a.camera_view_up,
            |d| d.camera_view_up,
        )
    }

    /// Setzt den Kamera-View-Up des n-ten Eintrags (Toleranz 1e-3).
    pub fn set_nth_spline_camera_view_up(&mut self, n: usize, view_up: DVec3) -> bool {
        self.set_nth_value(
            n,
            "set_nth_spline_camera_view_up",
            |a| &mut a.camera_view_up,
            view_up,
            |a, b| a.abs_diff_eq(*b, FUZZY_TOLERANCE),
        )
    }

    /// Aktiver Kontrollpunkt des n-ten Eintrags.
    pub fn nth_spline_selected_point_index(&self, n: usize) -> Option<usize> {
        self.nth_value(
            n,
            "nth_spline_selected_point_index",
            |a| a.selected_point_index,
            |_| None,
        )
    }

    /// Setzt den aktiven Kontrollpunkt des n-ten Eintrags.
    pub fn set_nth_spline_selected_point_index(&mut self, n: usize, index: Option<usize>) -> bool {
        self.set_nth_value(
            n,
            "set_nth_spline_selected_point_index",
            |a| &mut a.selected_point_index,
            index,
            |a, b| a == b,
        )
    }
}
