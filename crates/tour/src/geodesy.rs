//! Latitude/longitude to globe-space projection.
//!
//! The globe is centred on the origin with its poles on the Y axis. The
//! mapping below is fixed by the equirectangular texture wrapped around the
//! rendered sphere: longitude -180 sits on the -X seam, -90 faces +Z, and the
//! sign flip on X keeps east to the right when looking at the globe from +Z.
//! Markers and the airplane only line up with the texture if every placement
//! goes through [`project`].

use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f32,
    pub lon: f32,
}

impl GeoCoord {
    pub const fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Reject coordinates outside `[-90, 90]` x `[-180, 180]` (NaN included).
    pub fn validate(self) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(GeoError::Latitude(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(GeoError::Longitude(self.lon));
        }
        Ok(self)
    }

    /// Point on a sphere of `radius` around the origin.
    pub fn to_point(self, radius: f32) -> Vec3 {
        project(self.lat, self.lon, radius)
    }
}

/// Project a latitude/longitude (degrees) onto a sphere of `radius`.
pub fn project(lat: f32, lon: f32, radius: f32) -> Vec3 {
    // Colatitude: 0 at the north pole, PI at the south pole.
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();

    Vec3::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Unit vector from the globe centre through `point`.
///
/// The origin itself has no direction; it maps to `Vec3::Y`.
pub fn outward_normal(point: Vec3) -> Vec3 {
    point.try_normalize().unwrap_or(Vec3::Y)
}

/// Rotation that stands an object's local +Y up along the surface normal.
pub fn surface_rotation(point: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::Y, outward_normal(point))
}
