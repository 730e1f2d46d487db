//! Geometry and result types for the stroke-to-flight-path pipeline.
//!
//! Local coordinates are meters in an East/North planar frame; altitudes are
//! meters relative to the home reference unless a field says otherwise.

use crate::error::{ConfigurationError, Error, Result};
use crate::units::format_duration;
use serde::{Deserialize, Serialize};

/// A planar point in the local East/North frame (meters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Lift the point to a waypoint at the given altitude.
    pub fn at_altitude(&self, z: f64) -> Waypoint3D {
        Waypoint3D::new(self.x, self.y, z)
    }

    /// Translate by an offset.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// One continuous pen-down polyline. Never empty once validated.
pub type Stroke = Vec<Point2D>;

/// Ordered collection of strokes.
pub type StrokeSet = Vec<Stroke>;

/// Check that every stroke holds at least one point.
pub fn validate_strokes(strokes: &[Stroke]) -> Result<()> {
    match strokes.iter().position(|s| s.is_empty()) {
        Some(index) => Err(Error::geometry(format!("stroke {} has no points", index))),
        None => Ok(()),
    }
}

/// A raw line segment as produced by a glyph renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point2D,
    pub end: Point2D,
}

impl LineSegment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// A local waypoint with altitude relative to home.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Waypoint3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Waypoint3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 3D Euclidean distance.
    pub fn distance_to(&self, other: &Waypoint3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Planar projection of the waypoint.
    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// A geodetic waypoint. `altitude` is relative to home, not MSL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// Fixed geodetic origin and orientation for one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeReference {
    /// Latitude in degrees (WGS84)
    pub latitude: f64,
    /// Longitude in degrees (WGS84)
    pub longitude: f64,
    /// Home altitude above mean sea level (meters)
    #[serde(default)]
    pub altitude_msl: f64,
    /// Rotation of the local frame in degrees (0 = text reads north)
    #[serde(default)]
    pub rotation_deg: f64,
}

impl HomeReference {
    pub fn new(latitude: f64, longitude: f64, altitude_msl: f64, rotation_deg: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude_msl,
            rotation_deg,
        }
    }

    /// Reject coordinates that cannot describe a point on the ellipsoid.
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        ConfigurationError::require_in_range("home.latitude", self.latitude, -90.0, 90.0)?;
        ConfigurationError::require_in_range("home.longitude", self.longitude, -180.0, 180.0)?;
        ConfigurationError::require_finite("home.altitude_msl", self.altitude_msl)?;
        ConfigurationError::require_finite("home.rotation_deg", self.rotation_deg)?;
        Ok(())
    }
}

/// Flight duration and length derived from a waypoint path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub total_time_s: f64,
    pub total_distance_m: f64,
}

impl TimeEstimate {
    pub fn new(total_time_s: f64, total_distance_m: f64) -> Self {
        Self {
            total_time_s,
            total_distance_m,
        }
    }

    /// Human readable duration, e.g. `"2m 5s"` or `"42s"`.
    pub fn formatted(&self) -> String {
        format_duration(self.total_time_s)
    }
}
