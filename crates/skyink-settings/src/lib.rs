//! Configuration for SkyInk
//!
//! Settings are grouped into sections mirroring the pipeline stages and can
//! be persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    AltitudeMode, Config, FlightSettings, PlacementSettings, SimplifySettings,
    TransitionSettings, DEFAULT_HOME,
};
pub use error::{SettingsError, SettingsResult};
