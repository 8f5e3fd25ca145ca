//! Extrusion einer geschlossenen Kontur zu einem geschlossenen Slab-Mesh.
//!
//! Ablauf: Kontur triangulieren (Deckel), Deckel um `±thickness/2 · normal`
//! verschieben, Mantel aus Dreieckspaaren zwischen den Randpunkten beider
//! Deckel bilden, alles zusammenfügen und koinzidente Punkte verschmelzen.

use super::display::ModelNode;
use super::mesh::{SlabMesh, DEFAULT_MERGE_TOLERANCE};
use super::triangulate::{newell_normal, triangulate_contour};
use glam::DVec3;

/// Mindestabstand, unter dem aufeinanderfolgende Konturpunkte als doppelt gelten.
const DUPLICATE_POINT_EPSILON: f64 = 1e-9;

/// Extrudiert eine Kontur zu einem bereinigten Slab-Mesh.
///
/// Gibt `None` zurück bei weniger als drei (verschiedenen) Punkten oder
/// wenn sich weder aus `normal` noch aus der Kontur eine Richtung ergibt.
pub fn create_model_from_contour(
    contour: &[DVec3],
    normal: DVec3,
    thickness: f64,
) -> Option<SlabMesh> {
    extrude_contour(contour, normal, thickness, DEFAULT_MERGE_TOLERANCE)
}

/// Wie `create_model_from_contour`, mit expliziter Verschmelz-Toleranz.
pub fn extrude_contour(
    contour: &[DVec3],
    normal: DVec3,
    thickness: f64,
    merge_tolerance: f64,
) -> Option<SlabMesh> {
    let raw = assemble_slab(contour, normal, thickness)?;
    let cleaned = raw.clean(merge_tolerance);
    if cleaned.is_empty() {
        log::warn!("Extrusion: Mesh nach Bereinigung leer");
        return None;
    }
    Some(cleaned)
}

/// Baut das unbereinigte Slab-Mesh: Boden-Deckel, Mantel, Deckel.
///
/// Punktzahl = `2 · Deckelpunkte + 2 · Konturpunkte`.
pub fn assemble_slab(contour: &[DVec3], normal: DVec3, thickness: f64) -> Option<SlabMesh> {
    let mut points = dedup_contour(contour);
    if points.len() < 3 {
        log::warn!(
            "Extrusion: Kontur hat {} Punkte, mindestens 3 erforderlich",
            points.len()
        );
        return None;
    }

    let polygon_normal = newell_normal(&points);
    let Some(direction) = normal
        .try_normalize()
        .or_else(|| polygon_normal.try_normalize())
    else {
        log::warn!("Extrusion: Keine gültige Normale");
        return None;
    };
    if polygon_normal.dot(direction) < 0.0 {
        points.reverse();
    }

    let cap_triangles = triangulate_contour(&points, direction);
    if cap_triangles.is_empty() {
        log::warn!("Extrusion: Triangulierung der Kontur fehlgeschlagen");
        return None;
    }
    let cap = SlabMesh::from_parts(points.clone(), cap_triangles);
    let offset = direction * (thickness * 0.5);

    let top = cap.translated(offset);
    let bottom = cap.translated(-offset).flipped();
    let belt = build_belt(&points, offset);

    let mut slab = SlabMesh::new();
    slab.append(&bottom);
    slab.append(&belt);
    slab.append(&top);
    Some(slab)
}

/// Mantel: Randpunkte verschachtelt (oben, unten, oben, unten, ...),
/// je Randkante zwei Dreiecke, Ring geschlossen.
fn build_belt(boundary: &[DVec3], offset: DVec3) -> SlabMesh {
    let n = boundary.len();
    let points: Vec<DVec3> = boundary
        .iter()
        .flat_map(|p| [*p + offset, *p - offset])
        .collect();

    let mut triangles = Vec::with_capacity(2 * n);
    for i in 0..n {
        let top = 2 * i;
        let bottom = top + 1;
        let next_top = 2 * ((i + 1) % n);
        let next_bottom = next_top + 1;
        triangles.push([top, bottom, next_bottom]);
        triangles.push([top, next_bottom, next_top]);
    }
    SlabMesh::from_parts(points, triangles)
}

/// Entfernt aufeinanderfolgende Doppelpunkte und den schließenden Punkt.
fn dedup_contour(contour: &[DVec3]) -> Vec<DVec3> {
    let mut points: Vec<DVec3> = Vec::with_capacity(contour.len());
    for p in contour {
        if points
            .last()
            .map_or(true, |last| last.distance(*p) > DUPLICATE_POINT_EPSILON)
        {
            points.push(*p);
        }
    }
    while points.len() > 1 {
        let first = points[0];
        match points.last() {
            Some(last) if last.distance(first) <= DUPLICATE_POINT_EPSILON => {
                points.pop();
            }
            _ => break,
        }
    }
    points
}

/// Schreibt das Extrusionsergebnis in einen Modell-Node (oder leert ihn).
///
/// Gibt zurück, ob ein Mesh erzeugt wurde.
pub fn build_spline_model(
    model: &mut ModelNode,
    contour: &[DVec3],
    normal: DVec3,
    thickness: f64,
    merge_tolerance: f64,
) -> bool {
    model.mesh = extrude_contour(contour, normal, thickness, merge_tolerance);
    model.mesh.is_some()
}
