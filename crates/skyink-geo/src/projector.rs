//! Projector: rotate local strokes and place them on the globe.

use crate::wgs84::EnuFrame;
use skyink_core::{ConfigurationError, GeoPoint, HomeReference, Point2D, Waypoint3D};
use tracing::debug;

/// Converts local East/North meters around a home reference to WGS84.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateTransformer {
    home: HomeReference,
    frame: EnuFrame,
    /// `(sin, cos)` of the rotation; `None` when the rotation is zero.
    rotation: Option<(f64, f64)>,
}

impl CoordinateTransformer {
    /// Validate the home reference and precompute the local frame.
    pub fn new(home: HomeReference) -> Result<Self, ConfigurationError> {
        home.validate()?;

        let rotation =
            (home.rotation_deg != 0.0).then(|| home.rotation_deg.to_radians().sin_cos());
        debug!(
            latitude = home.latitude,
            longitude = home.longitude,
            altitude_msl = home.altitude_msl,
            rotation_deg = home.rotation_deg,
            "Created coordinate transformer"
        );

        Ok(Self {
            home,
            frame: EnuFrame::new(home.latitude, home.longitude, home.altitude_msl),
            rotation,
        })
    }

    pub fn home(&self) -> &HomeReference {
        &self.home
    }

    /// Apply the counter-clockwise frame rotation to a local point.
    pub fn rotate(&self, x: f64, y: f64) -> (f64, f64) {
        match self.rotation {
            Some((sin, cos)) => (x * cos - y * sin, x * sin + y * cos),
            None => (x, y),
        }
    }

    /// Convert one local point. `altitude` is relative to home and is
    /// returned unchanged in the result.
    pub fn transform(&self, x: f64, y: f64, altitude: f64) -> GeoPoint {
        let (east, north) = self.rotate(x, y);
        let (latitude, longitude, _) = self.frame.to_geodetic(east, north, altitude);
        GeoPoint::new(latitude, longitude, altitude)
    }

    pub fn transform_waypoint(&self, waypoint: &Waypoint3D) -> GeoPoint {
        self.transform(waypoint.x, waypoint.y, waypoint.z)
    }

    /// Convert every waypoint of an assembled path, keeping its own altitude.
    pub fn waypoints_to_geo(&self, waypoints: &[Waypoint3D]) -> Vec<GeoPoint> {
        waypoints
            .iter()
            .map(|w| self.transform_waypoint(w))
            .collect()
    }

    /// Convert a 2D path at one altitude.
    pub fn path_to_geo(&self, points: &[Point2D], altitude: f64) -> Vec<GeoPoint> {
        points
            .iter()
            .map(|p| self.transform(p.x, p.y, altitude))
            .collect()
    }
}

/// Axis-aligned bounds `(min_x, max_x, min_y, max_y)` over all paths.
///
/// Returns all zeros when there are no points.
pub fn bounds<P: AsRef<[Point2D]>>(paths: &[P]) -> (f64, f64, f64, f64) {
    let mut points = paths.iter().flat_map(|p| p.as_ref().iter());
    let Some(first) = points.next() else {
        return (0.0, 0.0, 0.0, 0.0);
    };

    points.fold(
        (first.x, first.x, first.y, first.y),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    )
}
