use bevy::prelude::*;

/// Radius of the rendered globe. Markers sit on this surface and the flight
/// radii below are measured from the same origin.
pub const GLOBE_RADIUS: f32 = 4.7;
pub const GLOBE_SEGMENTS: u32 = 64;

/// Seconds for one leg between two stops.
pub const FLIGHT_DURATION_SECS: f32 = 3.0;
/// Cruise altitude above the globe surface at both ends of a leg.
pub const FLIGHT_HEIGHT_OFFSET: f32 = 0.15;
/// Altitude of the arc control point above the surface. Must exceed
/// `FLIGHT_HEIGHT_OFFSET` so the leg bows outward.
pub const FLIGHT_ARC_HEIGHT: f32 = 0.8;
/// Constant roll applied on top of the look-ahead orientation.
pub const FLIGHT_BANK_ANGLE: f32 = std::f32::consts::PI * 0.1;
/// Curve-parameter distance of the look-ahead point.
pub const FLIGHT_LOOKAHEAD: f32 = 0.01;

/// Environment variable that points the app at an alternative dataset file.
pub const DATASET_ENV_VAR: &str = "GLOBE_TOUR_DATASET";

/// Tunables for the flight animator.
///
/// Inserted with defaults by `TourPlugin` unless the app inserts its own
/// copy first.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FlightConfig {
    pub globe_radius: f32,
    /// Altitude of the leg endpoints above the surface.
    pub surface_offset: f32,
    /// Altitude of the control point above the surface.
    pub arc_height: f32,
    pub duration_secs: f32,
    pub bank_angle: f32,
    pub lookahead: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            globe_radius: GLOBE_RADIUS,
            surface_offset: FLIGHT_HEIGHT_OFFSET,
            arc_height: FLIGHT_ARC_HEIGHT,
            duration_secs: FLIGHT_DURATION_SECS,
            bank_angle: FLIGHT_BANK_ANGLE,
            lookahead: FLIGHT_LOOKAHEAD,
        }
    }
}

impl FlightConfig {
    /// Distance from the origin of the leg endpoints.
    pub fn flight_radius(&self) -> f32 {
        self.globe_radius + self.surface_offset
    }

    /// Distance from the origin of the arc control point.
    pub fn apex_radius(&self) -> f32 {
        self.globe_radius + self.arc_height
    }
}
