//! # SkyInk
//!
//! Turns glyph strokes into an ordered, altitude-profiled waypoint path and
//! places it on the globe for a flight-planning consumer.
//!
//! ## Architecture
//!
//! SkyInk is organized as a workspace with multiple crates:
//!
//! 1. **skyink-core** - Geometry types, configuration errors, unit formatting
//! 2. **skyink-pathing** - Simplifier and Transition Engine
//! 3. **skyink-geo** - Projector (local ENU to WGS84)
//! 4. **skyink-settings** - Configuration sections and file persistence
//! 5. **skyink** - Conversion pipeline that ties the stages together
//!
//! ## Example
//!
//! ```
//! use skyink::{Config, ConversionRun, Point2D};
//!
//! let run = ConversionRun::new(Config::default()).unwrap();
//! let strokes = vec![vec![Point2D::new(0.0, 0.0), Point2D::new(0.0, 10.0)]];
//! let mission = run.run(&strokes).unwrap();
//! assert_eq!(mission.geo_waypoints.len(), 2);
//! ```

pub mod mission;
pub mod pipeline;

pub use mission::{validate_mission, MissionIssue, DEFAULT_MAX_WAYPOINTS};
pub use pipeline::{ConversionRun, MissionResult};

pub use skyink_core::{
    format_distance, format_duration, ConfigurationError, Error, GeoPoint, HomeReference,
    LineSegment, Point2D, Result, Stroke, StrokeSet, TimeEstimate, Waypoint3D,
};

pub use skyink_pathing::{
    assemble, estimate_time, order_strokes, simplify, simplify_preserving_corners,
    strokes_from_segments, transition_stats, AssemblyMode, EntryStrategy, OrderMethod,
    PathSimplifier, SimplificationReport, TransitionEngine, TransitionStats,
};

pub use skyink_geo::{bounds, CoordinateTransformer};

pub use skyink_settings::{AltitudeMode, Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("SKYINK_BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Installs a console subscriber with pretty formatting, filtered by
/// `RUST_LOG` (INFO and above by default). Fails if a global subscriber is
/// already set.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.as_str()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(version = VERSION, build_date = BUILD_DATE, "Logging initialized");
    Ok(())
}
