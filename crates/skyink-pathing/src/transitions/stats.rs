//! Pen-up transition statistics.

use serde::{Deserialize, Serialize};
use skyink_core::Stroke;

/// Gap distances between consecutive strokes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransitionStats {
    pub num_transitions: usize,
    pub total_transition_distance: f64,
    pub avg_transition_distance: f64,
    pub max_transition_distance: f64,
}

/// Measure the gap from each stroke's end to the next stroke's start.
///
/// Strokes without points do not contribute a transition.
pub fn transition_stats(strokes: &[Stroke]) -> TransitionStats {
    let endpoints: Vec<_> = strokes
        .iter()
        .filter_map(|s| Some((*s.first()?, *s.last()?)))
        .collect();

    let distances: Vec<f64> = endpoints
        .windows(2)
        .map(|pair| pair[0].1.distance_to(&pair[1].0))
        .collect();

    if distances.is_empty() {
        return TransitionStats::default();
    }

    let total: f64 = distances.iter().sum();
    TransitionStats {
        num_transitions: distances.len(),
        total_transition_distance: total,
        avg_transition_distance: total / distances.len() as f64,
        max_transition_distance: distances.iter().copied().fold(0.0, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyink_core::Point2D;

    fn stroke(raw: &[(f64, f64)]) -> Stroke {
        raw.iter().copied().map(Point2D::from).collect()
    }

    #[test]
    fn test_stats_for_sample() {
        let strokes = vec![
            stroke(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]),
            stroke(&[(20.0, 0.0), (20.0, 10.0), (30.0, 10.0)]),
            stroke(&[(40.0, 0.0), (40.0, 10.0)]),
        ];
        let stats = transition_stats(&strokes);
        let gap = 200f64.sqrt();
        assert_eq!(stats.num_transitions, 2);
        assert!((stats.total_transition_distance - 2.0 * gap).abs() < 1e-9);
        assert!((stats.avg_transition_distance - gap).abs() < 1e-9);
        assert!((stats.max_transition_distance - gap).abs() < 1e-9);
    }

    #[test]
    fn test_single_stroke_has_no_transitions() {
        assert_eq!(transition_stats(&[]), TransitionStats::default());
        assert_eq!(
            transition_stats(&[stroke(&[(0.0, 0.0), (1.0, 1.0)])]),
            TransitionStats::default()
        );
    }
}
