//! # SkyInk Geo
//!
//! Projects local East/North flight paths onto the WGS84 ellipsoid.
//!
//! A [`CoordinateTransformer`] is built once per run from a
//! [`HomeReference`](skyink_core::HomeReference); every conversion after that
//! is a pure function of the local point.

pub mod projector;
pub mod wgs84;

pub use projector::{bounds, CoordinateTransformer};
pub use wgs84::{ecef_to_geodetic, enu_to_ecef, geodetic_to_ecef, EnuFrame};
