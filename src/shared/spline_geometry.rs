//! Reine Geometrie-Funktionen für Catmull-Rom-Splines in 3D.
//!
//! Layer-neutral: wird von den Kurven-Widgets und den Use-Cases importiert,
//! ohne Zirkel-Abhängigkeiten zu erzeugen.

use glam::DVec3;

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (t ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2.
pub fn catmull_rom_point(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, t: f64) -> DVec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Berechnet eine dichte Punktliste entlang einer Catmull-Rom-Spline durch `points`.
///
/// Offene Kurven: Rand-Segmente nutzen gespiegelte Phantom-Punkte, der letzte
/// Kontrollpunkt ist enthalten. Geschlossene Kurven: die Nachbarn werden
/// zyklisch gewählt, der Startpunkt wird am Ende nicht wiederholt.
///
/// `samples_per_segment`: Anzahl der Punkte pro Segment (inklusive Startpunkt).
pub fn catmull_rom_chain(points: &[DVec3], samples_per_segment: usize, closed: bool) -> Vec<DVec3> {
    let samples = samples_per_segment.max(1);
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }
    if n == 2 && !closed {
        // Gerade Linie, kein Spline nötig
        return (0..=samples)
            .map(|i| points[0].lerp(points[1], i as f64 / samples as f64))
            .collect();
    }

    let segment_count = if closed { n } else { n - 1 };
    let mut result = Vec::with_capacity(segment_count * samples + 1);

    for seg in 0..segment_count {
        let p1 = points[seg];
        let p2 = points[(seg + 1) % n];
        let p0 = if seg > 0 {
            points[seg - 1]
        } else if closed {
            points[n - 1]
        } else {
            2.0 * points[0] - points[1]
        };
        let p3 = if seg + 2 < n {
            points[seg + 2]
        } else if closed {
            points[(seg + 2) % n]
        } else {
            2.0 * points[n - 1] - points[n - 2]
        };

        for i in 0..samples {
            let t = i as f64 / samples as f64;
            result.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }

    if !closed {
        result.push(points[n - 1]);
    }
    result
}

/// Approximierte Länge einer Polyline (bei `closed` inklusive Schlusskante).
pub fn polyline_length(points: &[DVec3], closed: bool) -> f64 {
    let open: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    match (closed, points.first(), points.last()) {
        (true, Some(first), Some(last)) if points.len() > 2 => open + last.distance(*first),
        _ => open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_curve_passes_through_control_points() {
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 5.0, 0.0),
            DVec3::new(20.0, 0.0, 3.0),
        ];
        let chain = catmull_rom_chain(&points, 8, false);
        assert_eq!(chain.len(), 2 * 8 + 1);
        assert_eq!(chain[0], points[0]);
        assert_relative_eq!(chain[8].x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(chain[8].y, 5.0, epsilon = 1e-12);
        assert_eq!(*chain.last().expect("Endpunkt erwartet"), points[2]);
    }

    #[test]
    fn test_closed_curve_does_not_repeat_start() {
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(10.0, 10.0, 0.0),
            DVec3::new(0.0, 10.0, 0.0),
        ];
        let chain = catmull_rom_chain(&points, 5, true);
        assert_eq!(chain.len(), 4 * 5);
        assert_eq!(chain[0], points[0]);
        assert_relative_eq!(chain[15].y, 10.0, epsilon = 1e-12);
        assert!(chain.last().expect("Punkt erwartet").distance(points[0]) > 1e-6);
    }

    #[test]
    fn test_two_points_open_is_straight_line() {
        let chain = catmull_rom_chain(&[DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0)], 4, false);
        assert_eq!(chain.len(), 5);
        assert_relative_eq!(chain[2].x, 2.0);
    }

    #[test]
    fn test_polyline_length_closed_adds_closing_edge() {
        let square = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        assert_relative_eq!(polyline_length(&square, false), 3.0);
        assert_relative_eq!(polyline_length(&square, true), 4.0);
    }
}
