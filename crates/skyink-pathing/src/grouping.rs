//! Segment Grouping
//!
//! Glyph renderers emit text as a flat list of line segments. Consecutive
//! segments that touch are chained into one continuous stroke so the
//! aircraft traces them without lifting.

use skyink_core::{ConfigurationError, LineSegment, StrokeSet};

/// Maximum gap (meters) between one segment's end and the next one's start
/// for the two to be treated as connected.
pub const DEFAULT_JOIN_TOLERANCE_M: f64 = 0.1;

/// Chain consecutive line segments into strokes.
///
/// A segment whose start lies strictly closer than `join_tolerance` to the
/// previous segment's end extends the current stroke by its end point;
/// any other segment starts a new stroke. Segment order is preserved.
pub fn strokes_from_segments(
    segments: &[LineSegment],
    join_tolerance: f64,
) -> Result<StrokeSet, ConfigurationError> {
    let tolerance = ConfigurationError::require_non_negative("join_tolerance", join_tolerance)?;

    let mut strokes = StrokeSet::new();
    let Some(first) = segments.first() else {
        return Ok(strokes);
    };

    let mut current = vec![first.start, first.end];
    for pair in segments.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.end.distance_to(&next.start) < tolerance {
            current.push(next.end);
        } else {
            strokes.push(std::mem::replace(&mut current, vec![next.start, next.end]));
        }
    }
    strokes.push(current);

    Ok(strokes)
}
