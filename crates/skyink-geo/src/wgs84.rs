//! WGS84 ellipsoid conversions between geodetic, ECEF and local ENU frames.

use nalgebra::{Matrix3, Vector3};

/// Semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// Flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// First eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

const MAX_ITERATIONS: usize = 10;
const LATITUDE_EPSILON_RAD: f64 = 1e-14;

/// Prime vertical radius of curvature at a geodetic latitude.
fn prime_vertical_radius(sin_lat: f64) -> f64 {
    WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt()
}

/// Geodetic (degrees, meters) to Earth-centred Earth-fixed coordinates.
pub fn geodetic_to_ecef(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = latitude_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = longitude_deg.to_radians().sin_cos();
    let n = prime_vertical_radius(sin_lat);

    Vector3::new(
        (n + height_m) * cos_lat * cos_lon,
        (n + height_m) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + height_m) * sin_lat,
    )
}

/// ECEF to geodetic `(latitude°, longitude°, height m)`.
///
/// Fixed-point iteration on latitude; converges well below 1e-9° within a
/// few steps for points near the surface.
pub fn ecef_to_geodetic(ecef: &Vector3<f64>) -> (f64, f64, f64) {
    let longitude = ecef.y.atan2(ecef.x);
    let p = ecef.x.hypot(ecef.y);

    if p == 0.0 {
        // On the polar axis.
        let latitude = std::f64::consts::FRAC_PI_2.copysign(ecef.z);
        let polar_radius = WGS84_A * (1.0 - WGS84_F);
        return (latitude.to_degrees(), 0.0, ecef.z.abs() - polar_radius);
    }

    let mut latitude = ecef.z.atan2(p * (1.0 - WGS84_E2));
    let mut height = 0.0;
    for _ in 0..MAX_ITERATIONS {
        let (sin_lat, cos_lat) = latitude.sin_cos();
        let n = prime_vertical_radius(sin_lat);
        height = p / cos_lat - n;
        let next = ecef.z.atan2(p * (1.0 - WGS84_E2 * n / (n + height)));
        let delta = (next - latitude).abs();
        latitude = next;
        if delta < LATITUDE_EPSILON_RAD {
            break;
        }
    }

    (latitude.to_degrees(), longitude.to_degrees(), height)
}

/// A local East-North-Up tangent frame anchored at a geodetic origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnuFrame {
    origin: Vector3<f64>,
    /// Columns are the East, North and Up unit vectors in ECEF.
    basis: Matrix3<f64>,
}

impl EnuFrame {
    pub fn new(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Self {
        let (sin_lat, cos_lat) = latitude_deg.to_radians().sin_cos();
        let (sin_lon, cos_lon) = longitude_deg.to_radians().sin_cos();

        let east = Vector3::new(-sin_lon, cos_lon, 0.0);
        let north = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
        let up = Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

        Self {
            origin: geodetic_to_ecef(latitude_deg, longitude_deg, height_m),
            basis: Matrix3::from_columns(&[east, north, up]),
        }
    }

    /// Origin of the frame in ECEF.
    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    pub fn to_ecef(&self, east: f64, north: f64, up: f64) -> Vector3<f64> {
        self.origin + self.basis * Vector3::new(east, north, up)
    }

    /// Local ENU offset to geodetic `(latitude°, longitude°, height m)`.
    pub fn to_geodetic(&self, east: f64, north: f64, up: f64) -> (f64, f64, f64) {
        ecef_to_geodetic(&self.to_ecef(east, north, up))
    }
}

/// One-shot ENU to ECEF conversion for a given origin.
pub fn enu_to_ecef(
    east: f64,
    north: f64,
    up: f64,
    origin_lat_deg: f64,
    origin_lon_deg: f64,
    origin_height_m: f64,
) -> Vector3<f64> {
    EnuFrame::new(origin_lat_deg, origin_lon_deg, origin_height_m).to_ecef(east, north, up)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equator_prime_meridian() {
        let ecef = geodetic_to_ecef(0.0, 0.0, 0.0);
        assert!((ecef.x - WGS84_A).abs() < 1e-6);
        assert!(ecef.y.abs() < 1e-6);
        assert!(ecef.z.abs() < 1e-6);
    }

    #[test]
    fn test_geodetic_round_trip() {
        for &(lat, lon, h) in &[
            (47.397742, 8.545594, 488.0),
            (-33.8688, 151.2093, 0.0),
            (89.9, -120.0, 1000.0),
        ] {
            let (lat2, lon2, h2) = ecef_to_geodetic(&geodetic_to_ecef(lat, lon, h));
            assert!((lat - lat2).abs() < 1e-10, "latitude {lat} -> {lat2}");
            assert!((lon - lon2).abs() < 1e-10, "longitude {lon} -> {lon2}");
            assert!((h - h2).abs() < 1e-5, "height {h} -> {h2}");
        }
    }

    #[test]
    fn test_pole() {
        let ecef = geodetic_to_ecef(90.0, 0.0, 100.0);
        let (lat, _, h) = ecef_to_geodetic(&Vector3::new(0.0, 0.0, ecef.z));
        assert_eq!(lat, 90.0);
        assert!((h - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_enu_origin_maps_to_origin() {
        let frame = EnuFrame::new(47.0, 8.0, 500.0);
        let (lat, lon, h) = frame.to_geodetic(0.0, 0.0, 0.0);
        assert!((lat - 47.0).abs() < 1e-12);
        assert!((lon - 8.0).abs() < 1e-12);
        assert!((h - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_enu_up_is_height() {
        let frame = EnuFrame::new(-12.0, 130.0, 0.0);
        let (_, _, h) = frame.to_geodetic(0.0, 0.0, 30.0);
        assert!((h - 30.0).abs() < 1e-6);
    }
}
