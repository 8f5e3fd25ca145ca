use super::*;
use crate::core::{ModelNode, SplinesNode};
use approx::assert_relative_eq;

fn pump(manager: &mut SplinesDisplayableManager, scene: &mut Scene) {
    for _ in 0..16 {
        let events = scene.take_events();
        if events.is_empty() {
            return;
        }
        manager.process_events(scene, events);
    }
    panic!("Event-Verarbeitung konvergiert nicht");
}

fn setup() -> (Scene, SplinesDisplayableManager, NodeId) {
    let mut scene = Scene::new();
    let mut manager = SplinesDisplayableManager::create(&SplinesOptions::default(), &mut scene);
    let id = scene.add_splines_node(SplinesNode::new("S"));
    pump(&mut manager, &mut scene);
    (scene, manager, id)
}

fn square() -> Vec<DVec3> {
    vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(10.0, 10.0, 0.0),
        DVec3::new(0.0, 10.0, 0.0),
    ]
}

fn assert_converged(manager: &SplinesDisplayableManager, scene: &Scene, id: &NodeId) {
    let node = scene.splines(id).expect("Spline-Node erwartet");
    let widgets = manager.widgets_of(id);
    assert_eq!(widgets.len(), node.number_of_markups());
    for (n, widget) in widgets.iter().enumerate() {
        assert!(
            widget.kind().matches(node.nth_spline_representation_type(n)),
            "Widget {} hat falsche Variante",
            n
        );
    }
}

#[test]
fn test_new_splines_node_gets_one_pipeline() {
    let (scene, manager, id) = setup();
    assert_eq!(manager.pipeline_count(), 1);
    assert_eq!(manager.display_nodes_of(&id).len(), 1);
    assert!(manager.observations().is_observed(&id));
    assert_eq!(manager.phase(), RegistrationPhase::Idle);
    assert!(!manager.is_update_from_scene_requested());
    assert_eq!(manager.widget_count(), 0);
    assert_converged(&manager, &scene, &id);
}

#[test]
fn test_add_spline_then_pull_three_handles() {
    let (mut scene, mut manager, id) = setup();
    let n = scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .add_spline(DVec3::ZERO);
    assert_eq!(n, 0);
    assert_eq!(scene.splines(&id).and_then(SplinesNode::current_spline), Some(0));
    pump(&mut manager, &mut scene);

    let widgets = manager.widgets_of(&id);
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].kind(), WidgetKind::Spline);
    assert!(widgets[0].is_enabled());

    let widget_id = manager.widget_for_entry(&id, 0).expect("Widget erwartet");
    let handles = vec![
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 2.0, 0.0),
        DVec3::new(0.0, 0.0, 3.0),
    ];
    manager
        .widget_mut(widget_id)
        .expect("Widget erwartet")
        .representation_mut()
        .set_handles(&handles);
    assert!(manager.update_node_from_widget(&mut scene, widget_id));

    let node = scene.splines(&id).expect("Spline-Node erwartet");
    assert_eq!(node.number_of_points_in_nth_markup(0), 3);
    for (i, handle) in handles.iter().enumerate() {
        assert_eq!(node.nth_control_point(0, i), Some(*handle));
    }
    assert!(node.nth_markup_selected(0));
}

#[test]
fn test_pull_emits_single_batch_of_events() {
    let (mut scene, mut manager, id) = setup();
    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .add_spline(DVec3::ZERO);
    pump(&mut manager, &mut scene);

    let widget_id = manager.widget_for_entry(&id, 0).expect("Widget erwartet");
    let rep = manager
        .widget_mut(widget_id)
        .expect("Widget erwartet")
        .representation_mut();
    rep.insert_handle(DVec3::X);
    rep.insert_handle(DVec3::Y);
    manager.update_node_from_widget(&mut scene, widget_id);

    let events = scene.take_events();
    let modified = events
        .iter()
        .filter(|e| matches!(e, SceneEvent::Node { event: NodeEvent::Modified, .. }))
        .count();
    assert_eq!(modified, 1);
    assert_eq!(
        scene.splines(&id).map(|n| n.nth_spline_selected_point_index(0)),
        Some(Some(2))
    );
}

#[test]
fn test_representation_switch_rebuilds_widget_and_keeps_handles() {
    let (mut scene, mut manager, id) = setup();
    {
        let node = scene.splines_mut(&id).expect("Spline-Node erwartet");
        let n = node.add_spline(square()[0]);
        for point in &square()[1..] {
            node.add_point_to_nth_markup(*point, n);
        }
    }
    pump(&mut manager, &mut scene);
    let old_widget = manager.widget_for_entry(&id, 0).expect("Widget erwartet");

    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .set_nth_spline_representation_type(0, RepresentationType::Polyline);
    pump(&mut manager, &mut scene);

    let new_widget = manager.widget_for_entry(&id, 0).expect("Widget erwartet");
    assert_ne!(old_widget, new_widget);
    assert!(manager.widget(old_widget).is_none());
    let widget = manager.widget(new_widget).expect("Widget erwartet");
    assert_eq!(widget.kind(), WidgetKind::Polyline);
    assert_eq!(widget.representation().handles(), square().as_slice());
    assert_eq!(manager.widget_count(), 1);
}

#[test]
fn test_reconcile_converges_after_mixed_operations() {
    let (mut scene, mut manager, id) = setup();
    {
        let node = scene.splines_mut(&id).expect("Spline-Node erwartet");
        node.add_spline(DVec3::ZERO);
        node.add_spline(DVec3::ONE);
        node.add_spline(DVec3::X);
        node.set_nth_spline_representation_type(1, RepresentationType::Polyline);
        node.add_point_to_nth_markup(DVec3::Y, 2);
        node.remove_nth_control_point(0, 0);
    }
    pump(&mut manager, &mut scene);
    assert_converged(&manager, &scene, &id);

    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .remove_markup(0);
    pump(&mut manager, &mut scene);
    assert_converged(&manager, &scene, &id);
    assert_eq!(manager.widget_count(), 2);
}

#[test]
fn test_visibility_and_lock_flags() {
    let (mut scene, mut manager, id) = setup();
    {
        let node = scene.splines_mut(&id).expect("Spline-Node erwartet");
        node.add_spline(DVec3::ZERO);
        node.add_spline(DVec3::ONE);
        node.set_nth_markup_visibility(1, false);
        node.set_nth_markup_locked(0, true);
    }
    pump(&mut manager, &mut scene);

    let widgets = manager.widgets_of(&id);
    assert!(widgets[0].is_enabled());
    assert!(!widgets[0].processes_events());
    assert!(!widgets[1].is_enabled());
    assert!(widgets[1].processes_events());

    let display_id = manager.display_nodes_of(&id)[0].clone();
    assert!(scene.set_display_visibility(&display_id, false));
    pump(&mut manager, &mut scene);
    assert!(manager.widgets_of(&id).iter().all(|w| !w.is_enabled()));

    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .set_locked(true);
    pump(&mut manager, &mut scene);
    assert!(manager.widgets_of(&id).iter().all(|w| !w.processes_events()));
}

#[test]
fn test_associated_model_gets_slab_and_display() {
    let (mut scene, mut manager, id) = setup();
    let model_id = scene.add_node(SceneNode::Model(ModelNode::new("Slab")));
    {
        let node = scene.splines_mut(&id).expect("Spline-Node erwartet");
        let n = node.add_spline(square()[0]);
        for point in &square()[1..] {
            node.add_point_to_nth_markup(*point, n);
        }
        node.set_nth_spline_representation_type(n, RepresentationType::Polyline);
        node.set_nth_spline_thickness(n, 2.0);
        node.set_nth_markup_associated_node_id(n, Some(model_id.clone()));
    }
    pump(&mut manager, &mut scene);

    let model = scene.model(&model_id).expect("Modell erwartet");
    let mesh = model.mesh.as_ref().expect("Slab erwartet");
    assert!(mesh.is_closed_manifold());
    assert_relative_eq!(mesh.signed_volume(), 200.0, epsilon = 1e-6);

    let display_id = model.display_node.clone().expect("Modell-Display erwartet");
    let display = scene.model_display(&display_id).expect("Modell-Display erwartet");
    assert_relative_eq!(display.opacity, 0.5);
    assert!(!display.frontface_culling);
    assert!(!display.backface_culling);

    // Zweiter Abgleich legt keinen weiteren Display-Node an
    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .set_nth_spline_thickness(0, 4.0);
    pump(&mut manager, &mut scene);
    assert_eq!(scene.nodes_by_class(NodeClass::ModelDisplay).len(), 1);
    let mesh = scene
        .model(&model_id)
        .and_then(|m| m.mesh.as_ref())
        .expect("Slab erwartet");
    assert_relative_eq!(mesh.signed_volume(), 400.0, epsilon = 1e-6);
}

#[test]
fn test_batch_processing_defers_registration() {
    let mut scene = Scene::new();
    let mut manager = SplinesDisplayableManager::create(&SplinesOptions::default(), &mut scene);

    scene.start_batch_processing();
    let id = scene.add_splines_node(SplinesNode::new("S"));
    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .add_spline(DVec3::ZERO);
    let events = scene.take_events();
    manager.process_events(&mut scene, events);
    assert_eq!(manager.pipeline_count(), 0);
    assert!(manager.is_update_from_scene_requested());

    scene.end_batch_processing();
    pump(&mut manager, &mut scene);
    assert_eq!(manager.pipeline_count(), 1);
    assert_eq!(manager.widget_count(), 1);
    assert!(!manager.is_update_from_scene_requested());
}

#[test]
fn test_node_removal_tears_down_pipelines() {
    let (mut scene, mut manager, id) = setup();
    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .add_spline(DVec3::ZERO);
    pump(&mut manager, &mut scene);
    let widget_id = manager.widget_for_entry(&id, 0).expect("Widget erwartet");

    scene.remove_node(&id);
    pump(&mut manager, &mut scene);
    assert_eq!(manager.pipeline_count(), 0);
    assert_eq!(manager.widget_count(), 0);
    assert!(manager.widget(widget_id).is_none());
    assert!(!manager.observations().is_observed(&id));
}

#[test]
fn test_scene_close_clears_everything() {
    let (mut scene, mut manager, id) = setup();
    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .add_spline(DVec3::ZERO);
    pump(&mut manager, &mut scene);

    scene.clear();
    pump(&mut manager, &mut scene);
    assert_eq!(manager.pipeline_count(), 0);
    assert_eq!(manager.widget_count(), 0);
    assert!(manager.observations().is_empty());
}

#[test]
fn test_pull_appends_missing_entries() {
    let (mut scene, mut manager, id) = setup();
    {
        let node = scene.splines_mut(&id).expect("Spline-Node erwartet");
        node.add_spline(DVec3::ZERO);
        node.add_spline(DVec3::ONE);
    }
    pump(&mut manager, &mut scene);
    let second = manager.widget_for_entry(&id, 1).expect("Widget erwartet");

    // Einträge verschwinden, bevor der Manager davon erfährt
    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .remove_all_markups();
    assert!(manager.update_node_from_widget(&mut scene, second));

    let node = scene.splines(&id).expect("Spline-Node erwartet");
    assert_eq!(node.number_of_markups(), 2);
    assert_eq!(node.number_of_splines(), 2);
    assert_eq!(node.nth_control_point(1, 0), Some(DVec3::ONE));
}

#[test]
fn test_display_modified_registers_filtered_display() {
    let mut scene = Scene::new();
    let mut manager = SplinesDisplayableManager::create(&SplinesOptions::default(), &mut scene);
    let id = scene.add_splines_node(SplinesNode::new("S"));
    let display_id = scene
        .splines(&id)
        .map(|n| n.display_node_ids()[0].clone())
        .expect("Display-Node erwartet");
    scene
        .display_mut(&display_id)
        .expect("Display-Node erwartet")
        .view_node_ids = vec!["vtkMRMLViewNode2".to_string()];
    pump(&mut manager, &mut scene);
    assert_eq!(manager.pipeline_count(), 0);

    scene
        .display_mut(&display_id)
        .expect("Display-Node erwartet")
        .view_node_ids
        .push(manager.view_node_id().to_string());
    scene.notify_display_modified(&id, &display_id);
    pump(&mut manager, &mut scene);
    assert_eq!(manager.pipeline_count(), 1);
    assert!(manager.pipeline(&display_id).is_some());
}

#[test]
fn test_unknown_widget_is_not_pulled() {
    let (mut scene, mut manager, _) = setup();
    assert!(!manager.update_node_from_widget(&mut scene, WidgetId(999)));
}

#[test]
fn test_render_requests_accumulate() {
    let (mut scene, mut manager, id) = setup();
    manager.take_render_requests();
    scene
        .splines_mut(&id)
        .expect("Spline-Node erwartet")
        .add_spline(DVec3::ZERO);
    pump(&mut manager, &mut scene);
    assert!(manager.take_render_requests() > 0);
    assert_eq!(manager.take_render_requests(), 0);
}
