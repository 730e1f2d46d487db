//! Transition Engine
//!
//! Orders strokes to minimize pen-up travel, merges them into a single 3D
//! waypoint path at the write altitude, and estimates how long the aircraft
//! needs to fly it.

mod assembly;
mod kinematics;
mod ordering;
mod stats;

pub use assembly::{assemble, assemble_with_mode, AssemblyMode};
pub use kinematics::{estimate_time, KinematicModel, DEFAULT_ACCELERATION_M_S2};
pub use ordering::{order_strokes, order_strokes_with, EntryStrategy, OrderMethod};
pub use stats::{transition_stats, TransitionStats};

use serde::{Deserialize, Serialize};
use skyink_core::{ConfigurationError, Stroke, StrokeSet, Waypoint3D};
use tracing::debug;

/// Transition engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionParameters {
    /// Altitude for tracing strokes (meters above home)
    pub write_altitude_m: f64,
    /// Pen-up flight mode between strokes
    pub mode: AssemblyMode,
    /// Stroke ordering method
    pub order_method: OrderMethod,
    /// First stroke selection for nearest-neighbour ordering
    pub entry: EntryStrategy,
}

impl Default for TransitionParameters {
    fn default() -> Self {
        Self {
            write_altitude_m: 30.0,
            mode: AssemblyMode::ConstantAltitude,
            order_method: OrderMethod::NearestNeighbor,
            entry: EntryStrategy::FirstStroke,
        }
    }
}

/// Orders and assembles strokes with one validated parameter set.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    params: TransitionParameters,
}

impl TransitionEngine {
    pub fn new(params: TransitionParameters) -> Result<Self, ConfigurationError> {
        ConfigurationError::require_finite("write_altitude_m", params.write_altitude_m)?;
        if let AssemblyMode::AltitudeSeparatedTransitions {
            transit_offset_m,
            continuous_threshold_m,
        } = params.mode
        {
            ConfigurationError::require_non_negative("transit_offset_m", transit_offset_m)?;
            // An infinite threshold connects every stroke directly.
            ConfigurationError::require_non_negative_or_unbounded(
                "continuous_threshold_m",
                continuous_threshold_m,
            )?;
        }
        if let EntryStrategy::NearestTo(start) = params.entry {
            ConfigurationError::require_finite("entry.x", start.x)?;
            ConfigurationError::require_finite("entry.y", start.y)?;
        }
        Ok(Self { params })
    }

    pub fn parameters(&self) -> &TransitionParameters {
        &self.params
    }

    pub fn write_altitude(&self) -> f64 {
        self.params.write_altitude_m
    }

    /// Reorder strokes using the configured method and entry strategy.
    pub fn order(&self, strokes: &[Stroke]) -> StrokeSet {
        let ordered = order_strokes_with(strokes, self.params.order_method, self.params.entry);
        debug!(
            method = ?self.params.order_method,
            strokes = ordered.len(),
            "Ordered strokes"
        );
        ordered
    }

    /// Merge strokes into a waypoint path using the configured mode.
    pub fn assemble(&self, strokes: &[Stroke]) -> Vec<Waypoint3D> {
        let waypoints =
            assemble_with_mode(strokes, self.params.write_altitude_m, self.params.mode);
        debug!(
            mode = ?self.params.mode,
            waypoints = waypoints.len(),
            altitude = self.params.write_altitude_m,
            "Assembled waypoint path"
        );
        waypoints
    }

    /// Gap statistics for a stroke order.
    pub fn stats(&self, strokes: &[Stroke]) -> TransitionStats {
        transition_stats(strokes)
    }
}
