//! Dreiecks-Mesh für abgeleitete Slabs: Zusammenfügen, Bereinigen, Topologie-Prüfung.

use super::camera::Ray;
use glam::DVec3;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Standard-Toleranz beim Zusammenführen koinzidenter Punkte.
pub const DEFAULT_MERGE_TOLERANCE: f64 = 1e-6;

/// Indiziertes Dreiecks-Mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlabMesh {
    /// Punkte in Welt-Koordinaten
    pub points: Vec<DVec3>,
    /// Dreiecke als Punkt-Indizes (gegen den Uhrzeigersinn = Außenseite)
    pub triangles: Vec<[usize; 3]>,
}

/// Ergebnis eines Strahl-Treffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Strahl-Parameter (Abstand bei normierter Richtung)
    pub distance: f64,
    /// Trefferpunkt
    pub position: DVec3,
}

impl SlabMesh {
    /// Erstellt ein leeres Mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt ein Mesh aus Punkten und Dreiecken.
    pub fn from_parts(points: Vec<DVec3>, triangles: Vec<[usize; 3]>) -> Self {
        Self { points, triangles }
    }

    /// Anzahl der Punkte.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Anzahl der Dreiecke.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Prüft, ob das Mesh keine Dreiecke enthält.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Hängt ein weiteres Mesh an (Indizes werden verschoben).
    pub fn append(&mut self, other: &SlabMesh) {
        let offset = self.points.len();
        self.points.extend_from_slice(&other.points);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }

    /// Kopie mit um `offset` verschobenen Punkten.
    pub fn translated(&self, offset: DVec3) -> SlabMesh {
        SlabMesh {
            points: self.points.iter().map(|p| *p + offset).collect(),
            triangles: self.triangles.clone(),
        }
    }

    /// Kopie mit umgekehrter Dreiecks-Orientierung.
    pub fn flipped(&self) -> SlabMesh {
        SlabMesh {
            points: self.points.clone(),
            triangles: self.triangles.iter().map(|[a, b, c]| [*a, *c, *b]).collect(),
        }
    }

    /// Führt Punkte innerhalb von `tolerance` zusammen, entfernt degenerierte
    /// Dreiecke und unbenutzte Punkte.
    ///
    /// Die Nachbarschaftssuche läuft über einen statischen KD-Tree; der erste
    /// noch freie Punkt einer Gruppe wird zum Repräsentanten.
    pub fn clean(&self, tolerance: f64) -> SlabMesh {
        if self.points.is_empty() {
            return SlabMesh::default();
        }

        let coords: Vec<[f64; 3]> = self.points.iter().map(|p| p.to_array()).collect();
        let tree: ImmutableKdTree<f64, 3> = ImmutableKdTree::new_from_slice(&coords);
        let max_dist_sq = tolerance.max(0.0).powi(2);

        let mut merged: Vec<DVec3> = Vec::with_capacity(self.points.len());
        let mut remap = vec![usize::MAX; self.points.len()];

        for (idx, point) in coords.iter().enumerate() {
            if remap[idx] != usize::MAX {
                continue;
            }
            let target = merged.len();
            merged.push(self.points[idx]);
            remap[idx] = target;
            // Exakte Duplikate auch bei Toleranz 0 finden
            for neighbour in tree.within_unsorted::<SquaredEuclidean>(point, max_dist_sq + f64::EPSILON) {
                if neighbour.distance > max_dist_sq {
                    continue;
                }
                if let Some(slot) = remap.get_mut(neighbour.item as usize) {
                    if *slot == usize::MAX {
                        *slot = target;
                    }
                }
            }
        }

        let triangles: Vec<[usize; 3]> = self
            .triangles
            .iter()
            .map(|[a, b, c]| [remap[*a], remap[*b], remap[*c]])
            .filter(|[a, b, c]| a != b && b != c && a != c)
            .collect();

        // Unbenutzte Punkte entfernen, Reihenfolge bleibt erhalten
        let mut used = vec![false; merged.len()];
        for tri in &triangles {
            for &idx in tri {
                used[idx] = true;
            }
        }
        let mut compact = vec![usize::MAX; merged.len()];
        let mut points = Vec::with_capacity(merged.len());
        for (idx, point) in merged.into_iter().enumerate() {
            if used[idx] {
                compact[idx] = points.len();
                points.push(point);
            }
        }
        let triangles = triangles
            .into_iter()
            .map(|[a, b, c]| [compact[a], compact[b], compact[c]])
            .collect();

        SlabMesh { points, triangles }
    }

    /// Zählt, wie viele Dreiecke jede (ungerichtete) Kante benutzen.
    pub fn edge_use_counts(&self) -> HashMap<(usize, usize), usize> {
        let mut counts = HashMap::new();
        for &[a, b, c] in &self.triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *counts.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Geschlossene Mannigfaltigkeit: jede Kante gehört zu genau zwei Dreiecken
    /// und wird von diesen in entgegengesetzter Richtung durchlaufen.
    pub fn is_closed_manifold(&self) -> bool {
        if self.triangles.is_empty() {
            return false;
        }
        if !self.edge_use_counts().values().all(|&count| count == 2) {
            return false;
        }
        let mut directed = HashMap::new();
        for &[a, b, c] in &self.triangles {
            for edge in [(a, b), (b, c), (c, a)] {
                if directed.insert(edge, ()).is_some() {
                    return false;
                }
            }
        }
        true
    }

    /// Vorzeichenbehaftetes Volumen (positiv bei nach außen zeigenden Normalen).
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                self.points[a].dot(self.points[b].cross(self.points[c])) / 6.0
            })
            .sum()
    }

    /// Achsen-parallele Bounding-Box `(min, max)`.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Nächster Treffer eines Strahls (Möller-Trumbore, beide Seiten).
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        const EPSILON: f64 = 1e-12;
        let mut nearest: Option<f64> = None;

        for &[i0, i1, i2] in &self.triangles {
            let v0 = self.points[i0];
            let edge1 = self.points[i1] - v0;
            let edge2 = self.points[i2] - v0;

            let h = ray.direction.cross(edge2);
            let a = edge1.dot(h);
            if a.abs() < EPSILON {
                continue;
            }
            let f = 1.0 / a;
            let s = ray.origin - v0;
            let u = f * s.dot(h);
            if !(0.0..=1.0).contains(&u) {
                continue;
            }
            let q = s.cross(edge1);
            let v = f * ray.direction.dot(q);
            if v < 0.0 || u + v > 1.0 {
                continue;
            }
            let t = f * edge2.dot(q);
            if t > EPSILON && nearest.map_or(true, |best| t < best) {
                nearest = Some(t);
            }
        }

        nearest.map(|distance| RayHit {
            distance,
            position: ray.at(distance),
        })
    }

    /// Exportiert das Mesh als Wavefront-OBJ.
    pub fn to_obj(&self, name: &str) -> String {
        let mut out = String::new();
        self.write_obj(&mut out, name, 0);
        out
    }

    /// Hängt das Mesh als OBJ-Objekt an `out` an.
    ///
    /// `vertex_offset` ist die Anzahl bereits geschriebener Vertices der Datei.
    /// Gibt den neuen Offset zurück.
    pub fn write_obj(&self, out: &mut String, name: &str, vertex_offset: usize) -> usize {
        let _ = writeln!(out, "o {}", name);
        for p in &self.points {
            let _ = writeln!(out, "v {} {} {}", p.x, p.y, p.z);
        }
        let base = vertex_offset + 1;
        for [a, b, c] in &self.triangles {
            let _ = writeln!(out, "f {} {} {}", a + base, b + base, c + base);
        }
        vertex_offset + self.points.len()
    }
}
