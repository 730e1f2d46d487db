//! Stroke ordering to reduce pen-up travel.

use serde::{Deserialize, Serialize};
use skyink_core::{Point2D, Stroke, StrokeSet};

/// How strokes are ordered before assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMethod {
    /// Keep the extraction order
    Original,
    /// Greedy nearest-neighbour chaining
    #[default]
    NearestNeighbor,
}

/// Which stroke the nearest-neighbour chain starts from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStrategy {
    /// Start with the first stroke as given
    #[default]
    FirstStroke,
    /// Start with the stroke that has an endpoint nearest to this point
    NearestTo(Point2D),
}

/// Candidate picked by a nearest-endpoint scan.
struct Nearest {
    index: usize,
    reversed: bool,
}

/// Scan every stroke's start and end point for the one nearest `from`.
///
/// Ties go to the first stroke encountered, and a start point wins over an
/// end point at equal distance.
fn nearest_endpoint(from: &Point2D, candidates: &[Stroke]) -> Option<Nearest> {
    let mut best: Option<(f64, Nearest)> = None;
    for (index, stroke) in candidates.iter().enumerate() {
        let (Some(start), Some(end)) = (stroke.first(), stroke.last()) else {
            continue;
        };
        let to_start = from.distance_to(start);
        let to_end = from.distance_to(end);
        let (distance, reversed) = if to_end < to_start {
            (to_end, true)
        } else {
            (to_start, false)
        };
        if best.as_ref().is_none_or(|(d, _)| distance < *d) {
            best = Some((distance, Nearest { index, reversed }));
        }
    }
    best.map(|(_, nearest)| nearest)
}

fn take(remaining: &mut Vec<Stroke>, nearest: Nearest) -> Stroke {
    let mut stroke = remaining.remove(nearest.index);
    if nearest.reversed {
        stroke.reverse();
    }
    stroke
}

/// Order strokes with the nearest-neighbour heuristic, seeded with the
/// first stroke.
pub fn order_strokes(strokes: &[Stroke]) -> StrokeSet {
    order_strokes_with(strokes, OrderMethod::NearestNeighbor, EntryStrategy::FirstStroke)
}

/// Order strokes with an explicit method and entry strategy.
///
/// Nearest-neighbour chaining repeatedly appends the remaining stroke whose
/// start or end point is closest to the end of the last placed stroke. A
/// stroke reached through its end point has its points reversed. Strokes
/// without points are dropped. `OrderMethod::Original` returns the input
/// unchanged and ignores `entry`.
pub fn order_strokes_with(
    strokes: &[Stroke],
    method: OrderMethod,
    entry: EntryStrategy,
) -> StrokeSet {
    if method == OrderMethod::Original || strokes.len() <= 1 {
        return strokes.to_vec();
    }

    let mut remaining: Vec<Stroke> = strokes
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect();
    if remaining.is_empty() {
        return StrokeSet::new();
    }

    let seed = match entry {
        EntryStrategy::FirstStroke => Nearest {
            index: 0,
            reversed: false,
        },
        EntryStrategy::NearestTo(start) => match nearest_endpoint(&start, &remaining) {
            Some(nearest) => nearest,
            None => return remaining,
        },
    };

    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(take(&mut remaining, seed));

    while let Some(current_end) = ordered.last().and_then(|s| s.last().copied()) {
        match nearest_endpoint(&current_end, &remaining) {
            Some(nearest) => ordered.push(take(&mut remaining, nearest)),
            None => break,
        }
    }

    ordered
}
