use super::*;
use crate::storage::writer::{write_splines_json, write_splines_node};
use approx::assert_relative_eq;

fn assert_same_splines(a: &SplinesNode, b: &SplinesNode) {
    assert_eq!(a.number_of_markups(), b.number_of_markups());
    assert_eq!(a.number_of_splines(), b.number_of_splines());
    assert_eq!(a.defaults(), b.defaults());
    assert_eq!(a.locked(), b.locked());
    for n in 0..a.number_of_splines() {
        assert_eq!(a.spline(n), b.spline(n), "Spline-Attribute {} unterschiedlich", n);
        assert_eq!(a.markup(n), b.markup(n), "Markup {} unterschiedlich", n);
    }
}

fn roundtrip(node: &SplinesNode) -> SplinesNode {
    let json = write_splines_json(node).expect("JSON erwartet");
    let mut restored = SplinesNode::new("S");
    parse_splines_json(&json, &mut restored).expect("Parsing erwartet");
    restored
}

#[test]
fn test_roundtrip_empty_node() {
    let mut node = SplinesNode::new("S");
    let mut defaults = node.defaults().clone();
    defaults.thickness = 33.0;
    defaults.camera_view_up = DVec3::new(0.0, 0.0, 1.0);
    node.set_defaults(defaults);

    let restored = roundtrip(&node);
    assert_same_splines(&node, &restored);
}

#[test]
fn test_roundtrip_single_entry() {
    let mut node = SplinesNode::new("S");
    let n = node.add_spline(DVec3::new(1.0, 2.0, 3.0));
    node.add_point_to_nth_markup(DVec3::new(4.0, 5.0, 6.0), n);
    node.add_point_to_nth_markup(DVec3::new(-1.25, 0.5, 9.0), n);
    node.set_nth_spline_closed(n, false);
    node.set_nth_spline_thickness(n, 0.1);
    node.set_nth_spline_reference_view(n, "Sagittal");
    node.set_nth_spline_representation_type(n, RepresentationType::Polyline);
    node.set_nth_spline_step_size(n, 25.0);
    node.set_nth_spline_ontology(n, "Layer");
    node.set_nth_spline_orientation(
        n,
        DMat4::from_rotation_y(0.3) * DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0)),
    );
    node.set_nth_spline_camera_position(n, DVec3::new(10.0, -20.0, 30.0));
    node.set_nth_spline_camera_view_up(n, DVec3::new(0.0, 1.0, 0.0));
    node.set_nth_markup_description(n, "Test");

    let restored = roundtrip(&node);
    assert_same_splines(&node, &restored);
}

#[test]
fn test_roundtrip_multiple_entries() {
    let mut node = SplinesNode::new("S");
    for i in 0..4 {
        let n = node.add_spline(DVec3::new(i as f64, 0.0, 0.0));
        node.set_nth_spline_thickness(n, 10.0 * (i + 1) as f64);
        node.set_nth_markup_associated_node_id(n, Some(NodeId::new(format!("vtkMRMLModelNode{}", i))));
    }
    node.set_locked(true);

    let restored = roundtrip(&node);
    assert_same_splines(&node, &restored);
    assert_eq!(
        restored.nth_markup_associated_node_id(2),
        Some(NodeId::new("vtkMRMLModelNode2"))
    );
}

#[test]
fn test_roundtrip_keeps_values_near_defaults() {
    let mut node = SplinesNode::new("S");
    let n = node.add_spline(DVec3::ZERO);
    node.set_nth_spline_step_size(n, 5.0);
    node.set_nth_spline_step_size(n, 1.0008);
    node.set_nth_spline_camera_position(n, DVec3::new(5.0, 0.0, 0.0));
    node.set_nth_spline_camera_position(n, DVec3::new(0.0004, 0.0, 0.0));
    let mut orientation = DMat4::IDENTITY;
    orientation.w_axis.y = 0.0002;
    node.set_nth_spline_orientation(n, DMat4::from_translation(DVec3::new(0.0, 9.0, 0.0)));
    node.set_nth_spline_orientation(n, orientation);
    assert_eq!(node.nth_spline_step_size(n), 1.0008);

    let restored = roundtrip(&node);
    assert_same_splines(&node, &restored);
    assert_eq!(restored.nth_spline_step_size(0), 1.0008);
    assert_eq!(restored.nth_spline_camera_position(0), DVec3::new(0.0004, 0.0, 0.0));
    assert_eq!(restored.nth_spline_orientation(0).w_axis.y, 0.0002);
}

#[test]
fn test_replace_spline_reports_single_modification() {
    let mut source = SplinesNode::new("S");
    let n = source.add_spline(DVec3::ZERO);
    source.set_nth_spline_thickness(n, 7.0);
    source.set_nth_spline_step_size(n, 3.0);
    source.set_nth_spline_closed(n, false);
    let map = write_splines_node(&source);

    let mut target = SplinesNode::new("S");
    let n = target.add_markup();
    target.init_spline(n);
    target.take_events();
    let attrs = source.spline(0).cloned().expect("Eintrag erwartet");
    assert!(target.replace_nth_spline(n, attrs.clone()));
    assert!(!target.replace_nth_spline(n, attrs));
    let events = target.take_events();
    assert_eq!(
        events,
        vec![crate::core::NodeEvent::Modified, crate::core::NodeEvent::NthMarkupModified(n)]
    );

    let mut fresh = SplinesNode::new("S");
    read_splines_node(&map, &mut fresh).expect("Lesen erwartet");
    assert_eq!(fresh.spline(0), source.spline(0));
}

#[test]
fn test_oversized_point_count_is_rejected() {
    let json = r#"{"Markups_Count":1,"Markups":[{"Points_Count":"4000000000000000000"}]}"#;
    let mut node = SplinesNode::new("S");
    node.add_spline(DVec3::ONE);
    node.take_events();

    let err = parse_splines_json(json, &mut node).expect_err("Fehler erwartet");
    assert!(err.to_string().contains("Points_Count"));
    // Der Node bleibt unverändert
    assert_eq!(node.number_of_markups(), 1);
    assert_eq!(node.pending_events(), 0);
}

#[test]
fn test_oversized_markup_count_is_rejected() {
    let json = r#"{"Markups_Count":"9223372036854775807","Markups":[]}"#;
    let mut node = SplinesNode::new("S");
    assert!(parse_splines_json(json, &mut node).is_err());
    assert_eq!(node.number_of_markups(), 0);
}

#[test]
fn test_read_replaces_existing_entries() {
    let mut source = SplinesNode::new("S");
    source.add_spline(DVec3::ZERO);
    let map = write_splines_node(&source);

    let mut target = SplinesNode::new("S");
    target.add_spline(DVec3::ONE);
    target.add_spline(DVec3::ONE);
    read_splines_node(&map, &mut target).expect("Lesen erwartet");
    assert_eq!(target.number_of_markups(), 1);
    assert_eq!(target.nth_control_point(0, 0), Some(DVec3::ZERO));
}

#[test]
fn test_legacy_document_with_string_counts() {
    let json = r#"{
        "Locked": 0,
        "MarkupLabelFormat": "%N-%d",
        "Markups": [{
            "AssociatedNodeID": "vtkMRMLModelNode0",
            "CameraPosition": [1.0, 2.0, 3.0],
            "CameraViewUp": [0.0, 0.0, 1.0],
            "Closed": 1,
            "Description": "",
            "ID": "vtkMRMLMarkupsSplinesNode_0",
            "Label": "Kontur",
            "Locked": 0,
            "Ontology": "Layer",
            "Points": [{"x": 1.0, "y": 0.0, "z": 0.0}, {"x": 0.0, "y": 1.0, "z": 0.0}, {"x": -1.0, "y": 0.0, "z": 0.0}],
            "Points_Count": "3",
            "ReferenceView": "Axial",
            "RepresentationType": "polyline",
            "Selected": 1,
            "SplineOrientation": [1, 0, 0, 5, 0, 1, 0, 6, 0, 0, 1, 7, 0, 0, 0, 1],
            "StepSize": 2,
            "Thickness": 50,
            "Visibility": 1
        }],
        "Markups_Count": 1
    }"#;
    let mut node = SplinesNode::new("S");
    parse_splines_json(json, &mut node).expect("Parsing erwartet");

    assert_eq!(node.number_of_splines(), 1);
    assert_eq!(node.number_of_points_in_nth_markup(0), 3);
    assert_eq!(node.nth_markup_label(0), "Kontur");
    assert_eq!(node.nth_spline_representation_type(0), RepresentationType::Polyline);
    assert_relative_eq!(node.nth_spline_thickness(0), 50.0);
    assert_relative_eq!(node.nth_spline_step_size(0), 2.0);
    assert_eq!(node.nth_spline_reference_view(0), "Axial");
    let orientation = node.nth_spline_orientation(0);
    assert_relative_eq!(orientation.w_axis.x, 5.0);
    assert_relative_eq!(orientation.w_axis.z, 7.0);
    assert_eq!(
        node.nth_markup_associated_node_id(0),
        Some(NodeId::new("vtkMRMLModelNode0"))
    );
    // Fehlende Default-Schlüssel lassen die Defaults unverändert
    assert_eq!(node.defaults(), &SplineDefaults::default());
}

#[test]
fn test_missing_entry_keys_keep_defaults() {
    let json = r#"{ "Markups_Count": 1, "Markups": [{ "Points_Count": "0" }] }"#;
    let mut node = SplinesNode::new("S");
    parse_splines_json(json, &mut node).expect("Parsing erwartet");
    assert_eq!(node.number_of_splines(), 1);
    assert_relative_eq!(node.nth_spline_thickness(0), 1000.0);
    assert!(node.nth_spline_closed(0));
    assert_eq!(node.number_of_points_in_nth_markup(0), 0);
}

#[test]
fn test_invalid_json_is_an_error() {
    let mut node = SplinesNode::new("S");
    assert!(parse_splines_json("{ nicht json", &mut node).is_err());
    assert!(parse_splines_json("[1, 2]", &mut node).is_err());
}
