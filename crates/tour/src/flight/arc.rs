use bevy::prelude::*;

use crate::config::FlightConfig;
use crate::geodesy::GeoCoord;

/// Quadratic Bezier leg between two stops.
///
/// The control point is the endpoints' midpoint pushed out to the apex
/// radius, so the path bows above the globe. This is not a true great-circle
/// route; it only has to look like one and be cheap to sample every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl ArcPath {
    pub fn new(start: Vec3, control: Vec3, end: Vec3) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Build the leg `from -> to` at the configured altitudes.
    pub fn between(from: GeoCoord, to: GeoCoord, config: &FlightConfig) -> Self {
        let radius = config.flight_radius();
        let start = from.to_point(radius);
        let end = to.to_point(radius);
        Self::new(start, control_point(start, end, config.apex_radius()), end)
    }

    /// Point at curve parameter `t` (clamped to `[0, 1]`).
    pub fn point(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// First derivative at `t`. Not normalized.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        (self.control - self.start) * (2.0 * (1.0 - t)) + (self.end - self.control) * (2.0 * t)
    }

    /// `segments + 1` evenly spaced points along the curve, for drawing.
    pub fn sample(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point(i as f32 / segments as f32))
            .collect()
    }
}

/// Midpoint direction scaled to `apex_radius`.
///
/// Antipodal endpoints have no midpoint direction; the arc then bows over an
/// arbitrary direction perpendicular to the start.
fn control_point(start: Vec3, end: Vec3, apex_radius: f32) -> Vec3 {
    let direction = ((start + end) * 0.5)
        .try_normalize()
        .unwrap_or_else(|| start.normalize_or(Vec3::Y).any_orthonormal_vector());
    direction * apex_radius
}
