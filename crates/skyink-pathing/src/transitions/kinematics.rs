//! Mission time estimate with an acceleration-limited velocity profile.
//!
//! Every waypoint is treated as a full stop: the aircraft accelerates from
//! rest, cruises if the segment is long enough, and decelerates to rest.
//! Direction changes are instantaneous (no cornering-speed limits), so the
//! estimate is optimistic on paths with many tight turns.

use skyink_core::{ConfigurationError, TimeEstimate, Waypoint3D};

/// Default acceleration/deceleration in m/s² (typical multirotor autopilot).
pub const DEFAULT_ACCELERATION_M_S2: f64 = 3.0;

/// Point-to-point motion model with symmetric acceleration and deceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicModel {
    cruise_speed: f64,
    acceleration: f64,
}

impl KinematicModel {
    /// Both speed and acceleration must be positive and finite.
    pub fn new(cruise_speed: f64, acceleration: f64) -> Result<Self, ConfigurationError> {
        Ok(Self {
            cruise_speed: ConfigurationError::require_positive("cruise_speed", cruise_speed)?,
            acceleration: ConfigurationError::require_positive("acceleration", acceleration)?,
        })
    }

    pub fn cruise_speed(&self) -> f64 {
        self.cruise_speed
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Time to reach cruise speed from rest.
    pub fn ramp_time(&self) -> f64 {
        self.cruise_speed / self.acceleration
    }

    /// Distance covered while ramping from rest to cruise speed.
    pub fn ramp_distance(&self) -> f64 {
        let t = self.ramp_time();
        0.5 * self.acceleration * t * t
    }

    /// Time to fly one segment of length `distance`, starting and ending at rest.
    pub fn segment_time(&self, distance: f64) -> f64 {
        let ramp_distance = self.ramp_distance();
        if distance <= 2.0 * ramp_distance {
            // Triangular profile: cruise speed is never reached.
            2.0 * (distance / self.acceleration).sqrt()
        } else {
            let cruise_distance = distance - 2.0 * ramp_distance;
            2.0 * self.ramp_time() + cruise_distance / self.cruise_speed
        }
    }

    /// Sum segment times and 3D distances over a waypoint path.
    pub fn estimate(&self, waypoints: &[Waypoint3D]) -> TimeEstimate {
        waypoints
            .windows(2)
            .fold(TimeEstimate::default(), |mut acc, pair| {
                let distance = pair[0].distance_to(&pair[1]);
                acc.total_distance_m += distance;
                acc.total_time_s += self.segment_time(distance);
                acc
            })
    }
}

/// Estimate mission time over a waypoint path.
///
/// Zero or one waypoint yields a zero estimate. Non-positive speed or
/// acceleration is rejected before any computation.
pub fn estimate_time(
    waypoints: &[Waypoint3D],
    cruise_speed: f64,
    acceleration: f64,
) -> Result<TimeEstimate, ConfigurationError> {
    Ok(KinematicModel::new(cruise_speed, acceleration)?.estimate(waypoints))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_between_profiles() {
        let model = KinematicModel::new(3.0, 3.0).unwrap();
        // d_accel = d_decel = 0.5 * 3 * 1^2 = 1.5
        assert!((model.ramp_distance() - 1.5).abs() < 1e-12);

        let boundary = 2.0 * model.ramp_distance();
        let path = [
            Waypoint3D::new(0.0, 0.0, 30.0),
            Waypoint3D::new(boundary, 0.0, 30.0),
        ];
        let estimate = estimate_time(&path, 3.0, 3.0).unwrap();
        assert!((estimate.total_time_s - 2.0 * model.ramp_time()).abs() < 1e-6);
        assert!((estimate.total_distance_m - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangular_and_trapezoidal_segments() {
        let model = KinematicModel::new(4.0, 2.0).unwrap();
        // Ramp: t = 2 s, d = 4 m each way.
        assert!((model.segment_time(2.0) - 2.0).abs() < 1e-12);
        assert!((model.segment_time(18.0) - (4.0 + 10.0 / 4.0)).abs() < 1e-12);
        assert_eq!(model.segment_time(0.0), 0.0);
    }

    #[test]
    fn test_vertical_component_counts() {
        let path = [
            Waypoint3D::new(0.0, 0.0, 30.0),
            Waypoint3D::new(0.0, 0.0, 40.0),
        ];
        let estimate = estimate_time(&path, 3.0, 3.0).unwrap();
        assert_eq!(estimate.total_distance_m, 10.0);
    }

    #[test]
    fn test_degenerate_paths() {
        assert_eq!(estimate_time(&[], 3.0, 3.0).unwrap(), TimeEstimate::default());
        let single = [Waypoint3D::new(1.0, 2.0, 3.0)];
        assert_eq!(estimate_time(&single, 3.0, 3.0).unwrap(), TimeEstimate::default());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(matches!(
            estimate_time(&[], 3.0, -1.0),
            Err(ConfigurationError::NotPositive { .. })
        ));
        assert!(matches!(
            estimate_time(&[], 0.0, 3.0),
            Err(ConfigurationError::NotPositive { .. })
        ));
        assert!(KinematicModel::new(3.0, f64::NAN).is_err());
    }
}
