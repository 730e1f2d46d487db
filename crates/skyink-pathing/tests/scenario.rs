use skyink_core::{Point2D, Stroke, Waypoint3D};
use skyink_pathing::{
    assemble, estimate_time, order_strokes, transition_stats, AssemblyMode, PathSimplifier,
    SimplifierParameters, TransitionEngine, TransitionParameters,
};

fn stroke(raw: &[(f64, f64)]) -> Stroke {
    raw.iter().copied().map(Point2D::from).collect()
}

fn three_letters() -> Vec<Stroke> {
    vec![
        stroke(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]),
        stroke(&[(20.0, 0.0), (20.0, 10.0), (30.0, 10.0)]),
        stroke(&[(40.0, 0.0), (40.0, 10.0)]),
    ]
}

#[test]
fn test_three_stroke_scenario() {
    let waypoints = assemble(&three_letters(), 30.0);
    assert_eq!(waypoints.len(), 8);
    assert!(waypoints.iter().all(|w| w.z == 30.0));

    let estimate = estimate_time(&waypoints, 3.0, 3.0).unwrap();
    let expected = 50.0 + 2.0 * 200f64.sqrt();
    assert!((estimate.total_distance_m - expected).abs() < 1e-9);
    assert!(estimate.total_time_s > 0.0);
}

#[test]
fn test_ordering_reduces_pen_up_travel() {
    let strokes = vec![
        stroke(&[(0.0, 0.0), (10.0, 0.0)]),
        stroke(&[(50.0, 0.0), (60.0, 0.0)]),
        stroke(&[(25.0, 0.0), (12.0, 0.0)]),
    ];
    let before = transition_stats(&strokes);
    let ordered = order_strokes(&strokes);
    let after = transition_stats(&ordered);

    assert!(after.total_transition_distance < before.total_transition_distance);
    assert_eq!(ordered[1], stroke(&[(12.0, 0.0), (25.0, 0.0)]));
    assert_eq!(ordered[2], stroke(&[(50.0, 0.0), (60.0, 0.0)]));
}

#[test]
fn test_full_pathing_chain() {
    let mut wiggly = Vec::new();
    for i in 0..=100 {
        let x = i as f64 * 0.1;
        wiggly.push(Point2D::new(x, 0.001 * (i % 2) as f64));
    }
    let strokes = vec![wiggly, stroke(&[(10.0, 5.0), (10.0, 10.0)])];

    let simplifier = PathSimplifier::new(SimplifierParameters::default()).unwrap();
    let (simplified, report) = simplifier.simplify_with_report(&strokes);
    assert_eq!(simplified[0].len(), 2);
    assert_eq!(report.original_points, 103);
    assert_eq!(report.simplified_points, 4);

    let engine = TransitionEngine::new(TransitionParameters {
        mode: AssemblyMode::AltitudeSeparatedTransitions {
            transit_offset_m: 10.0,
            continuous_threshold_m: 1.0,
        },
        ..TransitionParameters::default()
    })
    .unwrap();
    let waypoints = engine.assemble(&engine.order(&simplified));

    // Two pen-down strokes plus a climb and a transit waypoint between them.
    assert_eq!(waypoints.len(), 6);
    assert_eq!(waypoints[2], Waypoint3D::new(10.0, 0.0, 40.0));
    assert_eq!(waypoints[3], Waypoint3D::new(10.0, 5.0, 40.0));
}
