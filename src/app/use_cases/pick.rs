//! Oberflächen-Pick: Strahl durch die Klickposition gegen sichtbare Modelle.

use crate::core::{Camera3D, NodeClass, NodeId, RayHit, Scene};
use glam::{DVec2, DVec3};

/// Ergebnis eines Picks in Welt-Koordinaten.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePick {
    /// Getroffener Punkt bzw. Punkt auf der Fokusebene
    pub position: DVec3,
    /// Getroffenes Modell (`None` = Fokusebene)
    pub model: Option<NodeId>,
}

/// Nächster Treffer des Kamerastrahls auf einem sichtbaren Modell-Mesh.
///
/// Modelle ohne Display-Node oder mit unsichtbarem Display-Node werden übersprungen.
pub fn pick_surface(
    scene: &Scene,
    camera: &Camera3D,
    viewport: DVec2,
    display_pos: DVec2,
) -> Option<(NodeId, RayHit)> {
    let ray = camera.ray_through(display_pos, viewport);
    let mut best: Option<(NodeId, RayHit)> = None;

    for id in scene.nodes_by_class(NodeClass::Model) {
        let Some(model) = scene.model(&id) else {
            continue;
        };
        let visible = model
            .display_node
            .as_ref()
            .and_then(|display| scene.model_display(display))
            .is_some_and(|display| display.visible);
        if !visible {
            continue;
        }
        let Some(hit) = model.mesh.as_ref().and_then(|mesh| mesh.intersect_ray(&ray)) else {
            continue;
        };
        if best
            .as_ref()
            .map_or(true, |(_, current)| hit.distance < current.distance)
        {
            best = Some((id, hit));
        }
    }
    best
}

/// Weltposition für einen Klick: Oberflächen-Treffer, sonst Fokusebene der Kamera.
pub fn pick_world_position(
    scene: &Scene,
    camera: &Camera3D,
    viewport: DVec2,
    display_pos: DVec2,
) -> SurfacePick {
    match pick_surface(scene, camera, viewport, display_pos) {
        Some((model, hit)) => SurfacePick {
            position: hit.position,
            model: Some(model),
        },
        None => SurfacePick {
            position: camera.display_to_world(display_pos, viewport),
            model: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{create_model_from_contour, ModelDisplayNode, ModelNode, SceneNode};
    use approx::assert_relative_eq;

    fn add_slab(scene: &mut Scene, z: f64, visible: bool) -> NodeId {
        let contour = [
            DVec3::new(-100.0, -100.0, z),
            DVec3::new(100.0, -100.0, z),
            DVec3::new(100.0, 100.0, z),
            DVec3::new(-100.0, 100.0, z),
        ];
        let mut model = ModelNode::new("Slab");
        model.mesh = create_model_from_contour(&contour, DVec3::Z, 2.0);
        let id = scene.add_node(SceneNode::Model(model));
        let mut display = ModelDisplayNode::new(id.clone(), 0.5);
        display.visible = visible;
        let display_id = scene.add_node(SceneNode::ModelDisplay(display));
        if let Some(model) = scene.model_mut(&id) {
            model.display_node = Some(display_id);
        }
        id
    }

    #[test]
    fn test_click_hits_nearest_visible_slab() {
        let mut scene = Scene::new();
        let far = add_slab(&mut scene, 0.0, true);
        let near = add_slab(&mut scene, 100.0, true);
        let camera = Camera3D::new();
        let viewport = DVec2::new(800.0, 600.0);

        let click = viewport * 0.5 + DVec2::new(13.0, 7.0);

        let pick = pick_world_position(&scene, &camera, viewport, click);
        assert_eq!(pick.model, Some(near));
        assert_relative_eq!(pick.position.z, 101.0, epsilon = 1e-9);
        assert_ne!(pick.model, Some(far));
    }

    #[test]
    fn test_hidden_models_are_ignored() {
        let mut scene = Scene::new();
        add_slab(&mut scene, 100.0, false);
        let visible = add_slab(&mut scene, 0.0, true);

        let camera = Camera3D::new();
        let viewport = DVec2::new(800.0, 600.0);
        let click = viewport * 0.5 + DVec2::new(-21.0, 5.0);
        let pick = pick_world_position(&scene, &camera, viewport, click);
        assert_eq!(pick.model, Some(visible));
        assert_relative_eq!(pick.position.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_miss_falls_back_to_focal_plane() {
        let scene = Scene::new();
        let camera = Camera3D::new();
        let viewport = DVec2::new(800.0, 600.0);

        let pick = pick_world_position(&scene, &camera, viewport, viewport * 0.5);
        assert!(pick.model.is_none());
        assert_relative_eq!(pick.position.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pick.position.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pick.position.z, 0.0, epsilon = 1e-9);
    }
}
