//! Path Simplifier
//!
//! Reduces stroke point counts with the Douglas-Peucker algorithm while
//! keeping letter shape. The corner-preserving variant splits a stroke at
//! sharp turns first so that each straight run is reduced on its own.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use skyink_core::{ConfigurationError, Point2D, Stroke, StrokeSet};
use tracing::debug;

/// Default turn angle (degrees) above which a vertex counts as a corner.
pub const DEFAULT_CORNER_ANGLE_DEG: f64 = 30.0;

/// Fraction of the letter height used as tolerance when none is given.
const AUTO_EPSILON_FRACTION: f64 = 0.02;

/// Tolerance derived from letter height (2%).
pub fn auto_epsilon(letter_height_m: f64) -> f64 {
    letter_height_m * AUTO_EPSILON_FRACTION
}

/// Stepped tolerance recommendation for a given letter height.
pub fn recommended_epsilon(letter_height_m: f64) -> f64 {
    if letter_height_m <= 10.0 {
        0.2
    } else if letter_height_m <= 20.0 {
        0.4
    } else if letter_height_m <= 50.0 {
        0.75
    } else {
        1.5
    }
}

/// Simplify a polyline with Douglas-Peucker.
///
/// Inputs with fewer than three points are returned unchanged. The first and
/// last point are always kept.
pub fn simplify(points: &[Point2D], epsilon: f64) -> Result<Stroke, ConfigurationError> {
    let epsilon = ConfigurationError::require_non_negative("epsilon", epsilon)?;
    Ok(douglas_peucker(points, epsilon))
}

/// Simplify a polyline after splitting it at every corner sharper than
/// `angle_threshold_deg`.
pub fn simplify_preserving_corners(
    points: &[Point2D],
    epsilon: f64,
    angle_threshold_deg: f64,
) -> Result<Stroke, ConfigurationError> {
    let epsilon = ConfigurationError::require_non_negative("epsilon", epsilon)?;
    let angle = ConfigurationError::require_non_negative(
        "corner_angle_threshold_deg",
        angle_threshold_deg,
    )?;
    Ok(corner_preserving(points, epsilon, angle))
}

/// Indices of interior points where the path turns by more than
/// `angle_threshold_deg`.
///
/// The turn angle is the angle between the incoming and outgoing segment
/// directions, so a straight run has a turn of 0° and a full reversal
/// (hairpin) a turn of 180°. Vertices with a zero-length neighbouring
/// segment are never corners.
pub fn detect_corners(points: &[Point2D], angle_threshold_deg: f64) -> Vec<usize> {
    if points.len() < 3 {
        return Vec::new();
    }

    (1..points.len() - 1)
        .filter(|&i| {
            let (prev, here, next) = (points[i - 1], points[i], points[i + 1]);
            let (ax, ay) = (here.x - prev.x, here.y - prev.y);
            let (bx, by) = (next.x - here.x, next.y - here.y);
            let len_a = ax.hypot(ay);
            let len_b = bx.hypot(by);
            if len_a == 0.0 || len_b == 0.0 {
                return false;
            }
            let cos_turn = ((ax * bx + ay * by) / (len_a * len_b)).clamp(-1.0, 1.0);
            cos_turn.acos().to_degrees() > angle_threshold_deg
        })
        .collect()
}

/// Distance from `p` to the segment `a`-`b`; the distance to `a` when the
/// segment is degenerate.
fn segment_distance(p: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point2D::new(a.x + t * dx, a.y + t * dy))
}

fn douglas_peucker(points: &[Point2D], epsilon: f64) -> Stroke {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut ranges = vec![(0usize, last)];
    while let Some((start, end)) = ranges.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_distance = 0.0;
        let mut max_index = start;
        for (offset, point) in points[start + 1..end].iter().enumerate() {
            let distance = segment_distance(point, &points[start], &points[end]);
            if distance > max_distance {
                max_distance = distance;
                max_index = start + 1 + offset;
            }
        }

        if max_distance > epsilon {
            keep[max_index] = true;
            ranges.push((start, max_index));
            ranges.push((max_index, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

fn corner_preserving(points: &[Point2D], epsilon: f64, angle_threshold_deg: f64) -> Stroke {
    if points.len() < 3 {
        return points.to_vec();
    }

    let corners = detect_corners(points, angle_threshold_deg);
    if corners.is_empty() {
        return douglas_peucker(points, epsilon);
    }

    let mut result = Vec::with_capacity(points.len());
    let mut start = 0;
    for end in corners.into_iter().chain(std::iter::once(points.len() - 1)) {
        let piece = douglas_peucker(&points[start..=end], epsilon);
        // Shared boundary point is already the last entry of `result`.
        let skip = usize::from(!result.is_empty());
        result.extend(piece.into_iter().skip(skip));
        start = end;
    }
    result
}

/// Simplifier parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifierParameters {
    /// Tolerance in meters; `None` derives it from the letter height
    pub epsilon_m: Option<f64>,
    /// Letter height in meters (drives the automatic tolerance)
    pub letter_height_m: f64,
    /// Split strokes at sharp corners before reducing
    pub preserve_corners: bool,
    /// Turn angle in degrees that counts as a corner
    pub corner_angle_threshold_deg: f64,
}

impl Default for SimplifierParameters {
    fn default() -> Self {
        Self {
            epsilon_m: None,
            letter_height_m: 20.0,
            preserve_corners: false,
            corner_angle_threshold_deg: DEFAULT_CORNER_ANGLE_DEG,
        }
    }
}

/// Point counts before and after simplifying a stroke set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplificationReport {
    pub original_points: usize,
    pub simplified_points: usize,
    pub epsilon_m: f64,
}

impl SimplificationReport {
    /// Share of points removed, in percent.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_points == 0 {
            return 0.0;
        }
        100.0 * (1.0 - self.simplified_points as f64 / self.original_points as f64)
    }
}

/// Douglas-Peucker simplifier bound to one validated tolerance.
#[derive(Debug, Clone)]
pub struct PathSimplifier {
    params: SimplifierParameters,
    epsilon: f64,
}

impl PathSimplifier {
    /// Validate parameters and resolve the tolerance.
    pub fn new(params: SimplifierParameters) -> Result<Self, ConfigurationError> {
        let letter_height =
            ConfigurationError::require_positive("letter_height_m", params.letter_height_m)?;
        let epsilon = match params.epsilon_m {
            Some(e) => ConfigurationError::require_non_negative("epsilon_m", e)?,
            None => auto_epsilon(letter_height),
        };
        ConfigurationError::require_non_negative(
            "corner_angle_threshold_deg",
            params.corner_angle_threshold_deg,
        )?;

        Ok(Self { params, epsilon })
    }

    /// Simplifier with a fixed tolerance and default settings otherwise.
    pub fn with_epsilon(epsilon: f64) -> Result<Self, ConfigurationError> {
        Self::new(SimplifierParameters {
            epsilon_m: Some(epsilon),
            ..SimplifierParameters::default()
        })
    }

    /// Effective tolerance in meters.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn parameters(&self) -> &SimplifierParameters {
        &self.params
    }

    /// Simplify one stroke using the configured variant.
    pub fn simplify_path(&self, points: &[Point2D]) -> Stroke {
        if self.params.preserve_corners {
            corner_preserving(points, self.epsilon, self.params.corner_angle_threshold_deg)
        } else {
            douglas_peucker(points, self.epsilon)
        }
    }

    /// Corner-preserving simplification with an explicit threshold.
    pub fn simplify_preserving_corners(
        &self,
        points: &[Point2D],
        angle_threshold_deg: f64,
    ) -> Result<Stroke, ConfigurationError> {
        simplify_preserving_corners(points, self.epsilon, angle_threshold_deg)
    }

    /// Simplify every stroke. Strokes are independent, so they are reduced
    /// in parallel; output order matches input order.
    pub fn simplify_paths(&self, strokes: &[Stroke]) -> StrokeSet {
        strokes
            .par_iter()
            .map(|stroke| self.simplify_path(stroke))
            .collect()
    }

    /// Simplify every stroke and report the point reduction.
    pub fn simplify_with_report(&self, strokes: &[Stroke]) -> (StrokeSet, SimplificationReport) {
        let simplified = self.simplify_paths(strokes);
        let report = SimplificationReport {
            original_points: strokes.iter().map(Vec::len).sum(),
            simplified_points: simplified.iter().map(Vec::len).sum(),
            epsilon_m: self.epsilon,
        };
        debug!(
            original = report.original_points,
            simplified = report.simplified_points,
            epsilon = report.epsilon_m,
            "Simplified {} strokes ({:.1}% reduction)",
            strokes.len(),
            report.reduction_percent()
        );
        (simplified, report)
    }
}
