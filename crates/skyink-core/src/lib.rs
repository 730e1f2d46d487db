//! # SkyInk Core
//!
//! Core types, errors, and unit helpers shared by every SkyInk crate.
//! Provides the planar and geodetic point types that flow through the
//! stroke-to-flight-path pipeline, plus the configuration error type that
//! guards every numeric parameter.

pub mod error;
pub mod types;
pub mod units;

pub use error::{ConfigurationError, Error, Result};

pub use types::{
    validate_strokes, GeoPoint, HomeReference, LineSegment, Point2D, Stroke, StrokeSet,
    TimeEstimate, Waypoint3D,
};

pub use units::{format_distance, format_duration};
