//! Schreibt Spline-Nodes als Translation-Map bzw. `*.markups.json`.

use super::keys;
use super::translation_map::TranslationMap;
use crate::core::SplinesNode;
use anyhow::{Context, Result};
use glam::{DMat4, DVec3};

/// Serialisiert einen Spline-Node als eingerücktes JSON.
pub fn write_splines_json(node: &SplinesNode) -> Result<String> {
    let document = write_splines_node(node).to_json();
    serde_json::to_string_pretty(&document).context("Markups-JSON konnte nicht erzeugt werden")
}

/// Überträgt Node- und Eintragsfelder in eine neue Translation-Map.
pub fn write_splines_node(node: &SplinesNode) -> TranslationMap {
    let mut map = TranslationMap::new();
    map.insert(keys::LOCKED, node.locked());
    map.insert(keys::MARKUP_LABEL_FORMAT, node.markup_label_format());

    let count = node.number_of_markups();
    for n in 0..count {
        let prefix = keys::markup_prefix(n);
        write_nth_markup(&mut map, n, &prefix, node);
        write_nth_spline(&mut map, n, &prefix, node);
    }
    map.insert(keys::MARKUPS_COUNT, count as i64);

    let defaults = node.defaults();
    map.insert(keys::DEFAULT_ONTOLOGY, defaults.ontology.as_str());
    map.insert(
        keys::DEFAULT_REPRESENTATION_TYPE,
        defaults.representation_type.as_str(),
    );
    map.insert(keys::DEFAULT_REFERENCE_VIEW, defaults.reference_view.as_str());
    map.insert(keys::DEFAULT_STEP_SIZE, defaults.step_size);
    map.insert(keys::DEFAULT_THICKNESS, defaults.thickness);
    insert_matrix(&mut map, keys::DEFAULT_SPLINE_ORIENTATION, &defaults.orientation);
    insert_vec3(&mut map, keys::DEFAULT_CAMERA_POSITION, defaults.camera_position);
    insert_vec3(&mut map, keys::DEFAULT_CAMERA_VIEW_UP, defaults.camera_view_up);
    map
}

fn insert_vec3(map: &mut TranslationMap, base: &str, value: DVec3) {
    for (i, component) in value.to_array().into_iter().enumerate() {
        map.insert(format!("{}/{}", base, i), component);
    }
}

/// Schreibt eine 4x4-Matrix zeilenweise (`row * 4 + col`).
fn insert_matrix(map: &mut TranslationMap, base: &str, matrix: &DMat4) {
    for (i, value) in matrix.transpose().to_cols_array().into_iter().enumerate() {
        map.insert(format!("{}/{}", base, i), value);
    }
}

fn write_nth_markup(map: &mut TranslationMap, n: usize, prefix: &str, node: &SplinesNode) {
    let key = |name: &str| format!("{}{}", prefix, name);
    let Some(markup) = node.markup(n) else {
        return;
    };

    map.insert(
        key(keys::ASSOCIATED_NODE_ID),
        markup
            .associated_node_id
            .as_ref()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default(),
    );
    map.insert(key(keys::DESCRIPTION), markup.description.as_str());
    map.insert(key(keys::ID), markup.id.as_str());
    map.insert(key(keys::LABEL), markup.label.as_str());
    map.insert(key(keys::NTH_LOCKED), markup.locked);
    for (i, point) in markup.points.iter().enumerate() {
        map.insert(key(&format!("{}/{}/x", keys::POINTS, i)), point.x);
        map.insert(key(&format!("{}/{}/y", keys::POINTS, i)), point.y);
        map.insert(key(&format!("{}/{}/z", keys::POINTS, i)), point.z);
    }
    map.insert(key(keys::POINTS_COUNT), markup.points.len().to_string());
    map.insert(key(keys::SELECTED), markup.selected);
    map.insert(key(keys::VISIBILITY), markup.visible);
}

fn write_nth_spline(map: &mut TranslationMap, n: usize, prefix: &str, node: &SplinesNode) {
    let key = |name: &str| format!("{}{}", prefix, name);

    map.insert(
        key(keys::REPRESENTATION_TYPE),
        node.nth_spline_representation_type(n).as_str(),
    );
    map.insert(key(keys::CLOSED), node.nth_spline_closed(n));
    map.insert(key(keys::THICKNESS), node.nth_spline_thickness(n));
    map.insert(key(keys::REFERENCE_VIEW), node.nth_spline_reference_view(n));
    map.insert(key(keys::STEP_SIZE), node.nth_spline_step_size(n));
    map.insert(key(keys::ONTOLOGY), node.nth_spline_ontology(n));
    insert_matrix(map, &key(keys::SPLINE_ORIENTATION), &node.nth_spline_orientation(n));
    insert_vec3(map, &key(keys::CAMERA_POSITION), node.nth_spline_camera_position(n));
    insert_vec3(map, &key(keys::CAMERA_VIEW_UP), node.nth_spline_camera_view_up(n));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::translation_map::MapValue;

    #[test]
    fn test_empty_node_writes_defaults_only() {
        let node = SplinesNode::new("S");
        let map = write_splines_node(&node);
        assert_eq!(map.get("/Markups_Count"), Some(&MapValue::Int(0)));
        assert_eq!(map.get("/DefaultThickness"), Some(&MapValue::Double(1000.0)));
        assert_eq!(map.get("/DefaultSplineOrientation/0"), Some(&MapValue::Double(1.0)));
        assert_eq!(map.get("/DefaultSplineOrientation/1"), Some(&MapValue::Double(0.0)));
        assert!(map.get("/Markups/0/Thickness").is_none());
    }

    #[test]
    fn test_orientation_is_written_row_major() {
        let mut node = SplinesNode::new("S");
        node.add_spline(DVec3::ZERO);
        let translation = DMat4::from_translation(DVec3::new(7.0, 8.0, 9.0));
        node.set_nth_spline_orientation(0, translation);

        let map = write_splines_node(&node);
        assert_eq!(map.get("/Markups/0/SplineOrientation/3"), Some(&MapValue::Double(7.0)));
        assert_eq!(map.get("/Markups/0/SplineOrientation/7"), Some(&MapValue::Double(8.0)));
        assert_eq!(map.get("/Markups/0/SplineOrientation/11"), Some(&MapValue::Double(9.0)));
        assert_eq!(map.get("/Markups/0/SplineOrientation/12"), Some(&MapValue::Double(0.0)));
    }

    #[test]
    fn test_entry_fields_and_types() {
        let mut node = SplinesNode::new("S");
        node.add_spline(DVec3::new(1.0, 2.0, 3.0));
        node.set_nth_spline_closed(0, false);

        let map = write_splines_node(&node);
        assert_eq!(map.get("/Markups/0/Closed"), Some(&MapValue::Int(0)));
        assert_eq!(map.get("/Markups/0/Points_Count"), Some(&MapValue::from("1")));
        assert_eq!(map.get("/Markups/0/Points/0/y"), Some(&MapValue::Double(2.0)));
        assert_eq!(
            map.get("/Markups/0/RepresentationType"),
            Some(&MapValue::from("spline"))
        );
        assert_eq!(map.get("/Markups/0/AssociatedNodeID"), Some(&MapValue::from("")));
    }

    #[test]
    fn test_json_contains_nested_markups() {
        let mut node = SplinesNode::new("S");
        node.add_spline(DVec3::ZERO);
        let json = write_splines_json(&node).expect("JSON erwartet");
        let doc: serde_json::Value = serde_json::from_str(&json).expect("gültiges JSON erwartet");
        assert_eq!(doc["Markups_Count"], serde_json::json!(1));
        assert_eq!(doc["Markups"][0]["Label"], serde_json::json!("S-1"));
        assert_eq!(doc["Markups"][0]["CameraPosition"].as_array().map(Vec::len), Some(3));
    }
}
