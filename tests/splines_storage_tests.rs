use approx::assert_relative_eq;
use glam::DVec3;
use markups_splines::{
    parse_splines_json, write_splines_json, NodeEvent, RepresentationType, SplinesNode,
};

fn fixture_content() -> &'static str {
    include_str!("fixtures/two_contours.markups.json")
}

#[test]
fn test_fixture_parses_entries_and_defaults() {
    let mut node = SplinesNode::new("two_contours");
    parse_splines_json(fixture_content(), &mut node).expect("Fixture sollte parsen");

    assert_eq!(node.number_of_markups(), 2);
    assert_eq!(node.number_of_splines(), 2);
    assert_relative_eq!(node.defaults().thickness, 40.0);
    assert_eq!(node.defaults().reference_view, "Axial");

    assert_eq!(node.nth_markup_label(0), "Contour-1");
    assert_eq!(node.number_of_points_in_nth_markup(0), 4);
    assert_eq!(
        node.nth_control_point(0, 2),
        Some(DVec3::new(100.0, 100.0, 0.0))
    );
    assert_eq!(node.nth_spline_representation_type(0), RepresentationType::Polyline);
    assert_relative_eq!(node.nth_spline_thickness(0), 20.0);
    assert!(node.nth_markup_associated_node_id(0).is_none());

    assert!(node.nth_markup_locked(1));
    assert_eq!(node.nth_spline_reference_view(1), "Coronal");
    assert_eq!(
        node.nth_markup_associated_node_id(1).map(|id| id.to_string()),
        Some("vtkMRMLModelNode7".to_string())
    );
}

#[test]
fn test_out_of_range_thickness_returns_default() {
    let mut node = SplinesNode::new("two_contours");
    parse_splines_json(fixture_content(), &mut node).expect("Fixture sollte parsen");

    assert_relative_eq!(node.nth_spline_thickness(5), node.defaults().thickness);
    assert!(!node.set_nth_spline_thickness(5, 3.0));
    assert_eq!(node.number_of_splines(), 2);
}

#[test]
fn test_parse_reports_one_batched_modification() {
    let mut node = SplinesNode::new("two_contours");
    parse_splines_json(fixture_content(), &mut node).expect("Fixture sollte parsen");

    let events = node.take_events();
    let modified = events
        .iter()
        .filter(|event| **event == NodeEvent::Modified)
        .count();
    assert_eq!(modified, 1);
    assert!(events.contains(&NodeEvent::MarkupAdded(1)));
}

#[test]
fn test_written_document_reads_back_identically() {
    let mut node = SplinesNode::new("two_contours");
    parse_splines_json(fixture_content(), &mut node).expect("Fixture sollte parsen");
    node.set_nth_spline_closed(0, false);
    node.set_nth_spline_selected_point_index(1, Some(2));

    let content = write_splines_json(&node).expect("Schreiben sollte gelingen");
    let mut restored = SplinesNode::new("two_contours");
    parse_splines_json(&content, &mut restored).expect("Geschriebenes JSON sollte parsen");

    assert_eq!(restored.defaults(), node.defaults());
    assert_eq!(restored.number_of_markups(), node.number_of_markups());
    for n in 0..node.number_of_markups() {
        assert_eq!(restored.markup(n), node.markup(n), "Markup {} unterschiedlich", n);
        assert_eq!(
            restored.nth_spline_closed(n),
            node.nth_spline_closed(n),
            "Closed {} unterschiedlich",
            n
        );
        assert_eq!(
            restored.nth_spline_representation_type(n),
            node.nth_spline_representation_type(n)
        );
    }
}

#[test]
fn test_new_entry_after_load_inherits_file_defaults() {
    let mut node = SplinesNode::new("two_contours");
    parse_splines_json(fixture_content(), &mut node).expect("Fixture sollte parsen");

    let n = node.add_spline(DVec3::new(5.0, 5.0, 5.0));
    assert_eq!(n, 2);
    assert_relative_eq!(node.nth_spline_thickness(n), 40.0);
    assert_eq!(node.nth_spline_reference_view(n), "Axial");
    assert_eq!(node.nth_spline_representation_type(n), RepresentationType::Spline);
}
