//! Triangulierung geschlossener, ebener Konturen per Ear-Clipping.

use glam::{DVec2, DVec3};

/// Newell-Normale eines Polygons (Länge = doppelte Fläche).
pub fn newell_normal(points: &[DVec3]) -> DVec3 {
    let mut normal = DVec3::ZERO;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }
    normal
}

/// Projiziert Punkte in ein rechtshändiges 2D-System senkrecht zu `normal`.
pub fn project_to_plane(points: &[DVec3], normal: DVec3) -> Vec<DVec2> {
    let n = normal.normalize_or(DVec3::Z);
    let u = n.any_orthonormal_vector();
    let v = n.cross(u);
    points.iter().map(|p| DVec2::new(p.dot(u), p.dot(v))).collect()
}

/// Vorzeichenbehaftete Fläche eines 2D-Polygons (positiv = gegen den Uhrzeigersinn).
pub fn signed_area_2d(points: &[DVec2]) -> f64 {
    let mut area = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        area += p.perp_dot(q);
    }
    area * 0.5
}

/// Trianguliert eine geschlossene Kontur.
///
/// Die Dreiecke sind gegen den Uhrzeigersinn bezüglich `normal` orientiert
/// (Flächennormale zeigt in Richtung `normal`). Degenerierte Restpolygone
/// werden als Fächer geschlossen.
pub fn triangulate_contour(points: &[DVec3], normal: DVec3) -> Vec<[usize; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }
    let verts_2d = project_to_plane(points, normal);
    let reversed = signed_area_2d(&verts_2d) < 0.0;
    let indices: Vec<usize> = (0..points.len()).collect();
    ear_clip(&verts_2d, &indices, reversed)
}

fn ear_clip(verts_2d: &[DVec2], indices: &[usize], reversed: bool) -> Vec<[usize; 3]> {
    let mut out = Vec::with_capacity(indices.len().saturating_sub(2));
    let mut remaining: Vec<usize> = indices.to_vec();
    let emit = |out: &mut Vec<[usize; 3]>, a: usize, b: usize, c: usize| {
        if reversed {
            out.push([a, c, b]);
        } else {
            out.push([a, b, c]);
        }
    };

    while remaining.len() > 3 {
        let n = remaining.len();
        let mut ear = None;

        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            let a = verts_2d[remaining[prev]];
            let b = verts_2d[remaining[i]];
            let c = verts_2d[remaining[next]];

            let cross = (b - a).perp_dot(c - a);
            let is_convex = if reversed { cross < 0.0 } else { cross > 0.0 };
            if !is_convex {
                continue;
            }

            let blocked = (0..n)
                .filter(|&j| j != prev && j != i && j != next)
                .any(|j| point_in_triangle_2d(verts_2d[remaining[j]], a, b, c));
            if !blocked {
                ear = Some((prev, i, next));
                break;
            }
        }

        let Some((prev, i, next)) = ear else {
            log::warn!(
                "Ear-Clipping: kein Ohr gefunden, schließe {} Restpunkte als Fächer",
                remaining.len()
            );
            for k in 1..remaining.len() - 1 {
                emit(&mut out, remaining[0], remaining[k], remaining[k + 1]);
            }
            return out;
        };
        emit(&mut out, remaining[prev], remaining[i], remaining[next]);
        remaining.remove(i);
    }

    if remaining.len() == 3 {
        emit(&mut out, remaining[0], remaining[1], remaining[2]);
    }
    out
}

/// Punkt echt innerhalb des Dreiecks (baryzentrisch, Rand ausgeschlossen).
fn point_in_triangle_2d(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom.abs() < f64::EPSILON {
        return false;
    }
    let inv_denom = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

    let eps = 1e-10;
    u > eps && v > eps && (u + v) < 1.0 - eps
}
