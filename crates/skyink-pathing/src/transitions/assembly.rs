//! Altitude assembly: merge ordered strokes into one 3D waypoint path.

use serde::{Deserialize, Serialize};
use skyink_core::{Point2D, Stroke, Waypoint3D};

/// How pen-up moves between strokes are flown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssemblyMode {
    /// Every waypoint at the write altitude; pen-up moves are flown at the
    /// same height as the strokes. This mode ignores any transit offset.
    #[default]
    ConstantAltitude,
    /// Climb to `write_altitude + transit_offset_m` before flying to a stroke
    /// more than `continuous_threshold_m` away, then descend at its start.
    AltitudeSeparatedTransitions {
        transit_offset_m: f64,
        continuous_threshold_m: f64,
    },
}

/// Concatenate strokes at a constant altitude.
///
/// A stroke's first point is dropped when it is exactly equal to the last
/// point of the previous stroke. Strokes without points are skipped.
pub fn assemble(strokes: &[Stroke], write_altitude: f64) -> Vec<Waypoint3D> {
    assemble_with_mode(strokes, write_altitude, AssemblyMode::ConstantAltitude)
}

/// Concatenate strokes using the given assembly mode.
pub fn assemble_with_mode(
    strokes: &[Stroke],
    write_altitude: f64,
    mode: AssemblyMode,
) -> Vec<Waypoint3D> {
    let capacity = strokes.iter().map(Vec::len).sum::<usize>() + 2 * strokes.len();
    let mut waypoints = Vec::with_capacity(capacity);
    let mut previous_end: Option<Point2D> = None;

    for stroke in strokes {
        let (Some(&start), Some(&end)) = (stroke.first(), stroke.last()) else {
            continue;
        };

        let mut skip = 0;
        if let Some(prev) = previous_end {
            if prev == start {
                skip = 1;
            } else if let AssemblyMode::AltitudeSeparatedTransitions {
                transit_offset_m,
                continuous_threshold_m,
            } = mode
            {
                if prev.distance_to(&start) > continuous_threshold_m {
                    let transit_altitude = write_altitude + transit_offset_m;
                    waypoints.push(prev.at_altitude(transit_altitude));
                    waypoints.push(start.at_altitude(transit_altitude));
                }
            }
        }

        waypoints.extend(
            stroke
                .iter()
                .skip(skip)
                .map(|p| p.at_altitude(write_altitude)),
        );
        previous_end = Some(end);
    }

    waypoints
}
