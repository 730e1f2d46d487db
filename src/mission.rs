//! Sanity checks on a projected mission before it is handed to a writer.

use serde::{Deserialize, Serialize};
use skyink_core::GeoPoint;

/// Waypoint limit accepted by common autopilot mission stores.
pub const DEFAULT_MAX_WAYPOINTS: usize = 500;

/// Altitude spread above which a mission is flagged.
const MAX_ALTITUDE_VARIATION_M: f64 = 1000.0;

/// A problem found in a finished mission. Issues are warnings: the mission
/// is still returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissionIssue {
    TooManyWaypoints { count: usize, max: usize },
    NoWaypoints,
    LargeAltitudeVariation { range_m: f64 },
}

impl std::fmt::Display for MissionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyWaypoints { count, max } => {
                write!(f, "Too many waypoints: {} > {}", count, max)
            }
            Self::NoWaypoints => write!(f, "No waypoints provided"),
            Self::LargeAltitudeVariation { range_m } => {
                write!(f, "Large altitude variation: {:.1}m", range_m)
            }
        }
    }
}

/// Check waypoint count and altitude spread. An empty list means the
/// mission is valid.
pub fn validate_mission(points: &[GeoPoint], max_waypoints: usize) -> Vec<MissionIssue> {
    let mut issues = Vec::new();

    if points.len() > max_waypoints {
        issues.push(MissionIssue::TooManyWaypoints {
            count: points.len(),
            max: max_waypoints,
        });
    }

    if points.is_empty() {
        issues.push(MissionIssue::NoWaypoints);
        return issues;
    }

    let (low, high) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.altitude), hi.max(p.altitude))
        });
    if high - low > MAX_ALTITUDE_VARIATION_M {
        issues.push(MissionIssue::LargeAltitudeVariation {
            range_m: high - low,
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(altitude: f64) -> GeoPoint {
        GeoPoint::new(47.0, 8.0, altitude)
    }

    #[test]
    fn test_valid_mission() {
        let points = vec![at(30.0), at(40.0), at(30.0)];
        assert!(validate_mission(&points, DEFAULT_MAX_WAYPOINTS).is_empty());
    }

    #[test]
    fn test_empty_mission() {
        assert_eq!(
            validate_mission(&[], DEFAULT_MAX_WAYPOINTS),
            vec![MissionIssue::NoWaypoints]
        );
    }

    #[test]
    fn test_too_many_waypoints() {
        let points = vec![at(30.0); 4];
        let issues = validate_mission(&points, 3);
        assert_eq!(issues, vec![MissionIssue::TooManyWaypoints { count: 4, max: 3 }]);
        assert_eq!(issues[0].to_string(), "Too many waypoints: 4 > 3");
    }

    #[test]
    fn test_altitude_variation() {
        let issues = validate_mission(&[at(0.0), at(1000.0)], DEFAULT_MAX_WAYPOINTS);
        assert!(issues.is_empty());

        let issues = validate_mission(&[at(0.0), at(1200.5)], DEFAULT_MAX_WAYPOINTS);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].to_string(), "Large altitude variation: 1200.5m");
    }
}
