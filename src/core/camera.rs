//! 3D-Kamera für Picking und Display→Welt-Projektion.

use glam::{DVec2, DVec3};

/// Strahl in Welt-Koordinaten (Richtung normiert).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Punkt bei Parameter `t` entlang des Strahls.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Perspektivische 3D-Kamera (Position, Fokuspunkt, View-Up, Öffnungswinkel).
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Position der Kamera in Welt-Koordinaten
    pub position: DVec3,
    /// Fokuspunkt; definiert zusammen mit `position` die Blickrichtung
    pub focal_point: DVec3,
    /// View-Up-Vektor (muss nicht orthogonal zur Blickrichtung sein)
    pub view_up: DVec3,
    /// Vertikaler Öffnungswinkel in Grad
    pub view_angle: f64,
}

impl Camera3D {
    /// Standard-Öffnungswinkel in Grad.
    pub const DEFAULT_VIEW_ANGLE: f64 = 30.0;
    /// Standard-Abstand der Kamera zum Ursprung.
    pub const DEFAULT_DISTANCE: f64 = 500.0;

    /// Erstellt eine Kamera auf der +Z-Achse mit Blick auf den Ursprung.
    pub fn new() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, Self::DEFAULT_DISTANCE),
            focal_point: DVec3::ZERO,
            view_up: DVec3::Y,
            view_angle: Self::DEFAULT_VIEW_ANGLE,
        }
    }

    /// Normierte Blickrichtung (Position → Fokuspunkt).
    pub fn direction_of_projection(&self) -> DVec3 {
        (self.focal_point - self.position).normalize_or(DVec3::NEG_Z)
    }

    /// Orthonormales Paar (rechts, oben) senkrecht zur Blickrichtung.
    fn screen_axes(&self) -> (DVec3, DVec3) {
        let forward = self.direction_of_projection();
        let right = forward
            .cross(self.view_up)
            .try_normalize()
            .unwrap_or_else(|| forward.any_orthonormal_vector());
        let up = right.cross(forward);
        (right, up)
    }

    /// Strahl von der Kamera durch eine Display-Position.
    ///
    /// Display-Koordinaten haben ihren Ursprung unten links.
    pub fn ray_through(&self, display_pos: DVec2, viewport: DVec2) -> Ray {
        let size = viewport.max(DVec2::ONE);
        let ndc = (display_pos / size) * 2.0 - DVec2::ONE;
        let aspect = size.x / size.y;
        let tan_half = (self.view_angle.to_radians() * 0.5).tan();
        let (right, up) = self.screen_axes();
        let direction = self.direction_of_projection()
            + right * (ndc.x * tan_half * aspect)
            + up * (ndc.y * tan_half);
        Ray {
            origin: self.position,
            direction: direction.normalize(),
        }
    }

    /// Projiziert eine Display-Position auf die Fokusebene der Kamera.
    pub fn display_to_world(&self, display_pos: DVec2, viewport: DVec2) -> DVec3 {
        let ray = self.ray_through(display_pos, viewport);
        let forward = self.direction_of_projection();
        let distance = (self.focal_point - self.position).dot(forward);
        let denom = ray.direction.dot(forward);
        if denom.abs() < f64::EPSILON {
            return self.focal_point;
        }
        ray.at(distance / denom)
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new()
    }
}
