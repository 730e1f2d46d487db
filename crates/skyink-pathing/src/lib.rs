//! # SkyInk Pathing
//!
//! This crate turns raw glyph strokes into a single ordered waypoint path.
//!
//! ## Stages
//!
//! - **Grouping**: Join raw line segments into continuous pen-down strokes
//! - **Simplifier**: Douglas-Peucker reduction with optional corner preservation
//! - **Ordering**: Nearest-neighbour stroke ordering with stroke reversal
//! - **Assembly**: Attach altitude, optionally inserting climb/transit waypoints
//! - **Kinematics**: Acceleration-limited mission time estimate
//! - **Statistics**: Pen-up transition distances for instrumentation

pub mod grouping;
pub mod simplifier;
pub mod transitions;

pub use grouping::{strokes_from_segments, DEFAULT_JOIN_TOLERANCE_M};
pub use simplifier::{
    auto_epsilon, detect_corners, recommended_epsilon, simplify, simplify_preserving_corners,
    PathSimplifier, SimplificationReport, SimplifierParameters, DEFAULT_CORNER_ANGLE_DEG,
};
pub use transitions::{
    assemble, assemble_with_mode, estimate_time, order_strokes, order_strokes_with,
    transition_stats, AssemblyMode, EntryStrategy, KinematicModel, OrderMethod,
    TransitionEngine, TransitionParameters, TransitionStats, DEFAULT_ACCELERATION_M_S2,
};
