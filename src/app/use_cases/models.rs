//! Use-Cases für zugeordnete Slab-Modelle.

use crate::app::AppState;
use crate::core::{ModelNode, NodeId, SceneNode};

/// Legt einen Modell-Node an und ordnet ihn dem n-ten Eintrag zu.
///
/// Das Mesh baut der Displayable-Manager beim nächsten Abgleich.
pub fn associate_model(state: &mut AppState, node: &NodeId, n: usize) -> Option<NodeId> {
    let label = {
        let splines = state.scene.splines(node)?;
        if n >= splines.number_of_markups() {
            log::warn!("associate_model: Eintrag {} fehlt in {}", n, node);
            return None;
        }
        splines.nth_markup_label(n)
    };

    let model_id = state
        .scene
        .add_node(SceneNode::Model(ModelNode::new(format!("{}_Slab", label))));
    let splines = state.scene.splines_mut(node)?;
    splines.set_nth_markup_associated_node_id(n, Some(model_id.clone()));
    log::info!("Modell {} an {} / Eintrag {} gebunden", model_id, node, n);
    Some(model_id)
}

/// Ersetzt Zuordnungen, deren Modell-Node in der Scene fehlt, durch neue Modelle.
///
/// Gibt die Anzahl neu angelegter Modelle zurück.
pub fn resolve_associated_models(state: &mut AppState, node: &NodeId) -> usize {
    let Some(splines) = state.scene.splines(node) else {
        return 0;
    };
    let unresolved: Vec<usize> = splines
        .markups()
        .iter()
        .enumerate()
        .filter_map(|(n, markup)| {
            let id = markup.associated_node_id.as_ref()?;
            state.scene.model(id).is_none().then_some(n)
        })
        .collect();

    let mut created = 0;
    for n in unresolved {
        if associate_model(state, node, n).is_some() {
            created += 1;
        }
    }
    if created > 0 {
        log::info!("{} Modell-Zuordnungen in {} neu aufgelöst", created, node);
    }
    created
}

/// Ordnet jedem Eintrag ohne Modell ein neues Modell zu.
pub fn associate_all_models(state: &mut AppState, node: &NodeId) -> Vec<NodeId> {
    let missing: Vec<usize> = state
        .scene
        .splines(node)
        .map(|splines| {
            splines
                .markups()
                .iter()
                .enumerate()
                .filter(|(_, markup)| markup.associated_node_id.is_none())
                .map(|(n, _)| n)
                .collect()
        })
        .unwrap_or_default();

    let created: Vec<NodeId> = missing
        .into_iter()
        .filter_map(|n| associate_model(state, node, n))
        .collect();
    log::info!("{} Einträge in {} mit neuen Modellen versehen", created.len(), node);
    created
}
