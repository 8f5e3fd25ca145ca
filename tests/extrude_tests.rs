use approx::assert_relative_eq;
use glam::DVec3;
use markups_splines::core::ModelNode;
use markups_splines::{build_spline_model, extrude_contour};

const TOLERANCE: f64 = 1e-6;

fn l_shape() -> Vec<DVec3> {
    vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(30.0, 0.0, 0.0),
        DVec3::new(30.0, 10.0, 0.0),
        DVec3::new(10.0, 10.0, 0.0),
        DVec3::new(10.0, 30.0, 0.0),
        DVec3::new(0.0, 30.0, 0.0),
    ]
}

#[test]
fn test_concave_contour_extrudes_to_closed_slab() {
    let mesh = extrude_contour(&l_shape(), DVec3::Z, 5.0, TOLERANCE).expect("Slab erwartet");

    assert!(mesh.is_closed_manifold());
    assert_eq!(mesh.point_count(), 12);
    // L-Fläche 500 · Dicke 5
    assert_relative_eq!(mesh.signed_volume(), 2500.0, epsilon = 1e-6);

    let (min, max) = mesh.bounds().expect("Bounds erwartet");
    assert_relative_eq!(max.z - min.z, 5.0, epsilon = 1e-9);
}

#[test]
fn test_tilted_normal_shears_slab() {
    let normal = DVec3::new(0.0, 0.6, 0.8);
    let mesh = extrude_contour(&l_shape(), normal, 2.0, TOLERANCE).expect("Slab erwartet");
    assert!(mesh.is_closed_manifold());
    // Höhe über der Konturebene = Dicke · cos(Neigung)
    assert_relative_eq!(mesh.signed_volume(), 500.0 * 2.0 * 0.8, epsilon = 1e-6);
}

#[test]
fn test_too_few_points_have_no_slab() {
    let contour = l_shape();
    assert!(extrude_contour(&contour[..2], DVec3::Z, 1.0, TOLERANCE).is_none());
    assert!(extrude_contour(&[], DVec3::Z, 1.0, TOLERANCE).is_none());
}

#[test]
fn test_model_node_follows_contour_changes() {
    let mut model = ModelNode::new("Slab");
    assert!(build_spline_model(&mut model, &l_shape(), DVec3::Z, 1.0, TOLERANCE));
    assert!(model.mesh.is_some());

    assert!(!build_spline_model(&mut model, &l_shape()[..2], DVec3::Z, 1.0, TOLERANCE));
    assert!(model.mesh.is_none());
}
