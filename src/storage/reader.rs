//! Liest Spline-Nodes aus einer Translation-Map bzw. `*.markups.json`.
//!
//! Fehlende Schlüssel lassen den aktuellen Wert unverändert.

use super::keys;
use super::translation_map::{MapValue, TranslationMap};
use crate::core::{NodeId, RepresentationType, SplineDefaults, SplinesNode};
use anyhow::{Context, Result};
use glam::{DMat4, DVec3};

/// Parst ein `*.markups.json`-Dokument in einen Spline-Node.
///
/// Vorhandene Einträge des Nodes werden vorher entfernt.
pub fn parse_splines_json(content: &str, node: &mut SplinesNode) -> Result<()> {
    let document: serde_json::Value =
        serde_json::from_str(content).context("Markups-JSON ist kein gültiges JSON")?;
    if !document.is_object() {
        anyhow::bail!("Markups-JSON: Wurzel muss ein Objekt sein");
    }
    let map = TranslationMap::from_json(&document);
    read_splines_node(&map, node)
}

/// Überträgt Node- und Eintragsfelder aus der Map in den Node.
///
/// Alle Änderungen werden gebündelt gemeldet. Anzahlen, die nicht durch
/// Schlüssel der Map gedeckt sein können, werden abgelehnt, bevor der Node
/// verändert wird.
pub fn read_splines_node(map: &TranslationMap, node: &mut SplinesNode) -> Result<()> {
    let count = count_at(map, keys::MARKUPS_COUNT)?;
    for n in 0..count {
        let prefix = keys::markup_prefix(n);
        count_at(map, &format!("{}{}", prefix, keys::POINTS_COUNT))?;
    }

    let was_modifying = node.start_modify();
    node.remove_all_markups();

    if let Some(locked) = map.get(keys::LOCKED) {
        node.set_locked(locked.to_bool());
    }
    if let Some(format) = map.get(keys::MARKUP_LABEL_FORMAT) {
        node.set_markup_label_format(&format.to_text());
    }
    node.set_defaults(read_defaults(map, node.defaults()));

    for n in 0..count {
        let prefix = keys::markup_prefix(n);
        read_nth_markup(map, &prefix, node);
        read_nth_spline(map, n, &prefix, node);
    }

    log::info!("Spline-Node '{}' gelesen: {} Einträge", node.name(), count);
    node.end_modify(was_modifying);
    Ok(())
}

/// Liest eine Anzahl; jedes gezählte Element braucht mindestens einen Schlüssel.
fn count_at(map: &TranslationMap, key: &str) -> Result<usize> {
    let count = map.get(key).map_or(0, MapValue::to_int).max(0);
    match usize::try_from(count) {
        Ok(count) if count <= map.len() => Ok(count),
        _ => anyhow::bail!(
            "Markups-JSON: '{}' = {} übersteigt die {} vorhandenen Schlüssel",
            key,
            count,
            map.len()
        ),
    }
}

fn double_at(map: &TranslationMap, key: &str) -> Option<f64> {
    map.get(key).map(MapValue::to_double)
}

fn vec3_at(map: &TranslationMap, base: &str, current: DVec3) -> DVec3 {
    let mut values = current.to_array();
    for (i, value) in values.iter_mut().enumerate() {
        if let Some(v) = double_at(map, &format!("{}/{}", base, i)) {
            *value = v;
        }
    }
    DVec3::from_array(values)
}

/// Liest eine 4x4-Matrix zeilenweise (`row * 4 + col`).
fn matrix_at(map: &TranslationMap, base: &str, current: DMat4) -> DMat4 {
    let mut row_major = current.transpose().to_cols_array();
    for (i, value) in row_major.iter_mut().enumerate() {
        if let Some(v) = double_at(map, &format!("{}/{}", base, i)) {
            *value = v;
        }
    }
    DMat4::from_cols_array(&row_major).transpose()
}

fn read_defaults(map: &TranslationMap, current: &SplineDefaults) -> SplineDefaults {
    let mut defaults = current.clone();
    if let Some(v) = map.get(keys::DEFAULT_ONTOLOGY) {
        defaults.ontology = v.to_text();
    }
    if let Some(v) = map.get(keys::DEFAULT_REFERENCE_VIEW) {
        defaults.reference_view = v.to_text();
    }
    if let Some(v) = map.get(keys::DEFAULT_REPRESENTATION_TYPE) {
        defaults.representation_type = RepresentationType::from_name(&v.to_text());
    }
    if let Some(v) = double_at(map, keys::DEFAULT_STEP_SIZE) {
        defaults.step_size = v;
    }
    if let Some(v) = double_at(map, keys::DEFAULT_THICKNESS) {
        defaults.thickness = v;
    }
    defaults.orientation = matrix_at(map, keys::DEFAULT_SPLINE_ORIENTATION, defaults.orientation);
    defaults.camera_position = vec3_at(map, keys::DEFAULT_CAMERA_POSITION, defaults.camera_position);
    defaults.camera_view_up = vec3_at(map, keys::DEFAULT_CAMERA_VIEW_UP, defaults.camera_view_up);
    defaults
}

/// Basisfelder: ID, Label, Flags, Punkte, zugeordneter Node.
fn read_nth_markup(map: &TranslationMap, prefix: &str, node: &mut SplinesNode) {
    let key = |name: &str| format!("{}{}", prefix, name);

    // Bereits in `read_splines_node` gegen die Map-Größe geprüft
    let point_count = map
        .get(&key(keys::POINTS_COUNT))
        .map_or(0, MapValue::to_int)
        .max(0) as usize;
    let points: Vec<DVec3> = (0..point_count)
        .map(|i| {
            let point_key = |axis: &str| key(&format!("{}/{}/{}", keys::POINTS, i, axis));
            DVec3::new(
                double_at(map, &point_key("x")).unwrap_or(0.0),
                double_at(map, &point_key("y")).unwrap_or(0.0),
                double_at(map, &point_key("z")).unwrap_or(0.0),
            )
        })
        .collect();

    let n = match points.split_first() {
        Some((first, rest)) => {
            let n = node.add_point_to_new_markup(*first);
            for point in rest {
                node.add_point_to_nth_markup(*point, n);
            }
            n
        }
        None => node.add_markup(),
    };

    if let Some(v) = map.get(&key(keys::ID)) {
        node.set_nth_markup_id(n, &v.to_text());
    }
    if let Some(v) = map.get(&key(keys::LABEL)) {
        node.set_nth_markup_label(n, &v.to_text());
    }
    if let Some(v) = map.get(&key(keys::DESCRIPTION)) {
        node.set_nth_markup_description(n, &v.to_text());
    }
    if let Some(v) = map.get(&key(keys::NTH_LOCKED)) {
        node.set_nth_markup_locked(n, v.to_bool());
    }
    if let Some(v) = map.get(&key(keys::SELECTED)) {
        node.set_nth_markup_selected(n, v.to_bool());
    }
    if let Some(v) = map.get(&key(keys::VISIBILITY)) {
        node.set_nth_markup_visibility(n, v.to_bool());
    }
    if let Some(v) = map.get(&key(keys::ASSOCIATED_NODE_ID)) {
        let id = v.to_text();
        node.set_nth_markup_associated_node_id(n, (!id.is_empty()).then(|| NodeId::new(id)));
    }
}

/// Spline-Felder; gespeicherte Werte werden ohne Toleranzvergleich übernommen.
fn read_nth_spline(map: &TranslationMap, n: usize, prefix: &str, node: &mut SplinesNode) {
    let key = |name: &str| format!("{}{}", prefix, name);
    if !node.init_spline(n) {
        return;
    }
    let Some(mut attrs) = node.spline(n).cloned() else {
        return;
    };

    if let Some(v) = map.get(&key(keys::REPRESENTATION_TYPE)) {
        attrs.representation_type = RepresentationType::from_name(&v.to_text());
    }
    if let Some(v) = map.get(&key(keys::CLOSED)) {
        attrs.closed = v.to_bool();
    }
    if let Some(v) = double_at(map, &key(keys::THICKNESS)) {
        attrs.thickness = v;
    }
    if let Some(v) = map.get(&key(keys::REFERENCE_VIEW)) {
        attrs.reference_view = v.to_text();
    }
    if let Some(v) = double_at(map, &key(keys::STEP_SIZE)) {
        attrs.step_size = v;
    }
    if let Some(v) = map.get(&key(keys::ONTOLOGY)) {
        attrs.ontology = v.to_text();
    }
    attrs.orientation = matrix_at(map, &key(keys::SPLINE_ORIENTATION), attrs.orientation);
    attrs.camera_position = vec3_at(map, &key(keys::CAMERA_POSITION), attrs.camera_position);
    attrs.camera_view_up = vec3_at(map, &key(keys::CAMERA_VIEW_UP), attrs.camera_view_up);

    node.replace_nth_spline(n, attrs);
}

#[cfg(test)]
mod tests;
