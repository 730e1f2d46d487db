//! Conversion pipeline
//!
//! A [`ConversionRun`] owns one validated configuration and turns strokes
//! into a [`MissionResult`]: simplify, order, assemble, estimate, place
//! relative to home, project, validate. Each call is independent; nothing is
//! cached between runs.

use crate::mission::{validate_mission, MissionIssue, DEFAULT_MAX_WAYPOINTS};
use serde::{Deserialize, Serialize};
use skyink_core::{
    validate_strokes, GeoPoint, HomeReference, LineSegment, Result, Stroke, TimeEstimate,
    Waypoint3D,
};
use skyink_geo::{bounds, CoordinateTransformer};
use skyink_pathing::{
    strokes_from_segments, KinematicModel, PathSimplifier, SimplificationReport,
    TransitionEngine, TransitionStats,
};
use skyink_settings::Config;
use tracing::{debug, info, warn};

/// Everything produced by one conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionResult {
    /// Local waypoints after the home placement offset
    pub waypoints: Vec<Waypoint3D>,
    /// Projected waypoints, same order and length as `waypoints`
    pub geo_waypoints: Vec<GeoPoint>,
    pub home: HomeReference,
    /// Translation applied to the assembled path, `(dx, dy)` in meters
    pub offset: (f64, f64),
    pub time: TimeEstimate,
    /// Transition gaps in the input order
    pub stats_before: TransitionStats,
    /// Transition gaps after ordering
    pub stats_after: TransitionStats,
    /// `None` when simplification is disabled
    pub simplification: Option<SimplificationReport>,
    pub issues: Vec<MissionIssue>,
}

impl MissionResult {
    /// Pen-up distance saved by reordering, in percent.
    pub fn transition_improvement_percent(&self) -> f64 {
        let before = self.stats_before.total_transition_distance;
        if before <= 0.0 {
            return 0.0;
        }
        100.0 * (before - self.stats_after.total_transition_distance) / before
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// One configured conversion.
#[derive(Debug, Clone)]
pub struct ConversionRun {
    config: Config,
    simplifier: Option<PathSimplifier>,
    engine: TransitionEngine,
    kinematics: KinematicModel,
    transformer: CoordinateTransformer,
    max_waypoints: usize,
}

impl ConversionRun {
    /// Validate the configuration and build every stage up front.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let simplifier = if config.simplify.enabled {
            Some(PathSimplifier::new(config.simplifier_parameters())?)
        } else {
            None
        };
        let engine = TransitionEngine::new(config.transition_parameters())?;
        let kinematics = KinematicModel::new(
            config.flight.cruise_speed_m_s,
            config.flight.acceleration_m_s2,
        )?;
        let transformer = CoordinateTransformer::new(config.home)?;

        Ok(Self {
            config,
            simplifier,
            engine,
            kinematics,
            transformer,
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
        })
    }

    /// Override the waypoint limit used by mission validation.
    pub fn with_max_waypoints(mut self, max_waypoints: usize) -> Self {
        self.max_waypoints = max_waypoints;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Group raw line segments into strokes, then run.
    pub fn run_segments(&self, segments: &[LineSegment]) -> Result<MissionResult> {
        let strokes = strokes_from_segments(segments, self.config.placement.join_tolerance_m)?;
        debug!(
            segments = segments.len(),
            strokes = strokes.len(),
            "Grouped segments into strokes"
        );
        self.run(&strokes)
    }

    /// Convert strokes into a projected mission.
    ///
    /// Every stroke must have at least one point.
    pub fn run(&self, strokes: &[Stroke]) -> Result<MissionResult> {
        validate_strokes(strokes)?;
        info!(strokes = strokes.len(), "Starting conversion");

        let (strokes, simplification) = match &self.simplifier {
            Some(simplifier) => {
                let (simplified, report) = simplifier.simplify_with_report(strokes);
                info!(
                    "Simplified {} -> {} points ({:.1}% reduction, epsilon {:.2}m)",
                    report.original_points,
                    report.simplified_points,
                    report.reduction_percent(),
                    report.epsilon_m
                );
                (simplified, Some(report))
            }
            None => (strokes.to_vec(), None),
        };

        let stats_before = self.engine.stats(&strokes);
        let ordered = self.engine.order(&strokes);
        let stats_after = self.engine.stats(&ordered);
        info!(
            before = stats_before.total_transition_distance,
            after = stats_after.total_transition_distance,
            "Ordered {} strokes",
            ordered.len()
        );

        let local = self.engine.assemble(&ordered);
        let time = self.kinematics.estimate(&local);
        info!(
            waypoints = local.len(),
            "Estimated mission time {} ({} total distance)",
            time.formatted(),
            skyink_core::format_distance(time.total_distance_m)
        );

        let (waypoints, offset) = self.place(&local);
        let geo_waypoints = self.transformer.waypoints_to_geo(&waypoints);
        debug!(count = geo_waypoints.len(), "Projected waypoints");

        let issues = validate_mission(&geo_waypoints, self.max_waypoints);
        for issue in &issues {
            warn!("Mission validation issue: {}", issue);
        }

        Ok(MissionResult {
            waypoints,
            geo_waypoints,
            home: *self.transformer.home(),
            offset,
            time,
            stats_before,
            stats_after,
            simplification,
            issues,
        })
    }

    /// Translate the path so its south-west corner sits at the configured
    /// margins north-east of home.
    fn place(&self, waypoints: &[Waypoint3D]) -> (Vec<Waypoint3D>, (f64, f64)) {
        if waypoints.is_empty() {
            return (Vec::new(), (0.0, 0.0));
        }

        let footprint: Vec<_> = waypoints.iter().map(Waypoint3D::xy).collect();
        let (min_x, max_x, min_y, max_y) = bounds(&[footprint]);
        let (margin_x, margin_y) = self.config.margins();
        let offset = (margin_x - min_x, margin_y - min_y);
        debug!(
            min_x,
            max_x,
            min_y,
            max_y,
            dx = offset.0,
            dy = offset.1,
            "Placing text relative to home"
        );

        let placed = waypoints
            .iter()
            .map(|w| Waypoint3D::new(w.x + offset.0, w.y + offset.1, w.z))
            .collect();
        (placed, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyink_core::{Error, Point2D};

    fn stroke(raw: &[(f64, f64)]) -> Stroke {
        raw.iter().copied().map(Point2D::from).collect()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.flight.acceleration_m_s2 = 0.0;
        assert!(matches!(
            ConversionRun::new(config),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_empty_stroke_rejected() {
        let run = ConversionRun::new(Config::default()).unwrap();
        let strokes = vec![stroke(&[(0.0, 0.0)]), Vec::new()];
        assert!(matches!(run.run(&strokes), Err(Error::Geometry(_))));
    }

    #[test]
    fn test_empty_input_gives_empty_mission() {
        let run = ConversionRun::new(Config::default()).unwrap();
        let result = run.run(&[]).unwrap();
        assert!(result.waypoints.is_empty());
        assert!(result.geo_waypoints.is_empty());
        assert_eq!(result.time, TimeEstimate::default());
        assert_eq!(result.issues, vec![MissionIssue::NoWaypoints]);
    }

    #[test]
    fn test_placement_offset() {
        let run = ConversionRun::new(Config::default()).unwrap();
        let result = run
            .run(&[stroke(&[(-4.0, 3.0), (6.0, 8.0)])])
            .unwrap();
        // Default margins are half of the 20 m letter height.
        assert_eq!(result.offset, (14.0, 7.0));
        assert_eq!(result.waypoints[0], Waypoint3D::new(10.0, 10.0, 30.0));
        assert_eq!(result.waypoints[1], Waypoint3D::new(20.0, 15.0, 30.0));
    }

    #[test]
    fn test_simplification_disabled() {
        let mut config = Config::default();
        config.simplify.enabled = false;
        let run = ConversionRun::new(config).unwrap();
        let result = run
            .run(&[stroke(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)])])
            .unwrap();
        assert!(result.simplification.is_none());
        assert_eq!(result.waypoints.len(), 3);
    }

    #[test]
    fn test_improvement_percent() {
        let run = ConversionRun::new(Config::default()).unwrap();
        let strokes = vec![
            stroke(&[(0.0, 0.0), (10.0, 0.0)]),
            stroke(&[(50.0, 0.0), (60.0, 0.0)]),
            stroke(&[(25.0, 0.0), (12.0, 0.0)]),
        ];
        let result = run.run(&strokes).unwrap();
        // 75 m of pen-up travel before ordering, 27 m after.
        assert!((result.transition_improvement_percent() - 64.0).abs() < 1e-9);
        assert!(result.is_valid());
    }
}
