//! Conversion settings
//!
//! Configuration is organized into sections that follow the pipeline:
//! - Simplification (tolerance, corner handling)
//! - Transitions (stroke order, altitude mode)
//! - Flight (kinematic model)
//! - Home reference (geodetic origin and rotation)
//! - Placement (where the text sits relative to home)

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use skyink_core::{ConfigurationError, HomeReference};
use skyink_pathing::{
    auto_epsilon, AssemblyMode, EntryStrategy, OrderMethod, SimplifierParameters,
    TransitionParameters, DEFAULT_ACCELERATION_M_S2, DEFAULT_CORNER_ANGLE_DEG,
    DEFAULT_JOIN_TOLERANCE_M,
};
use std::path::Path;

/// Home used when none is configured (PX4 SITL default location).
pub const DEFAULT_HOME: HomeReference = HomeReference {
    latitude: 47.397_743_2,
    longitude: 8.545_594_2,
    altitude_msl: 488.0,
    rotation_deg: 0.0,
};

/// Continuous-stroke threshold as a share of the letter height.
const CONTINUOUS_THRESHOLD_FRACTION: f64 = 0.3;
/// Home margin as a share of the letter height.
const MARGIN_FRACTION: f64 = 0.5;

/// Simplification settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifySettings {
    /// Run the simplifier at all
    pub enabled: bool,
    /// Tolerance in meters (auto from letter height if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilon_m: Option<f64>,
    /// Letter height in meters
    pub letter_height_m: f64,
    /// Split strokes at corners before simplifying
    pub preserve_corners: bool,
    /// Corner turn angle in degrees
    pub corner_angle_threshold_deg: f64,
}

impl Default for SimplifySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            epsilon_m: None,
            letter_height_m: 20.0,
            preserve_corners: false,
            corner_angle_threshold_deg: DEFAULT_CORNER_ANGLE_DEG,
        }
    }
}

impl SimplifySettings {
    /// Tolerance actually used by the simplifier.
    pub fn effective_epsilon(&self) -> f64 {
        self.epsilon_m
            .unwrap_or_else(|| auto_epsilon(self.letter_height_m))
    }

    pub fn to_parameters(&self) -> SimplifierParameters {
        SimplifierParameters {
            epsilon_m: self.epsilon_m,
            letter_height_m: self.letter_height_m,
            preserve_corners: self.preserve_corners,
            corner_angle_threshold_deg: self.corner_angle_threshold_deg,
        }
    }
}

/// Pen-up flight mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeMode {
    /// Fly every move at the write altitude
    #[default]
    Constant,
    /// Climb to a transit altitude between distant strokes
    Separated,
}

impl std::fmt::Display for AltitudeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constant => write!(f, "constant"),
            Self::Separated => write!(f, "separated"),
        }
    }
}

/// Stroke ordering and altitude settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// Stroke order method
    pub order_method: OrderMethod,
    /// Pen-up flight mode
    pub altitude_mode: AltitudeMode,
    /// Writing altitude above home in meters
    pub write_altitude_m: f64,
    /// Extra height for transit moves (separated mode only)
    pub transit_offset_m: f64,
    /// Gap below which strokes are joined without climbing
    /// (30% of the letter height if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuous_threshold_m: Option<f64>,
    /// Where nearest-neighbour ordering starts
    pub entry: EntryStrategy,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            order_method: OrderMethod::NearestNeighbor,
            altitude_mode: AltitudeMode::Constant,
            write_altitude_m: 30.0,
            transit_offset_m: 10.0,
            continuous_threshold_m: None,
            entry: EntryStrategy::FirstStroke,
        }
    }
}

impl TransitionSettings {
    pub fn continuous_threshold(&self, letter_height_m: f64) -> f64 {
        self.continuous_threshold_m
            .unwrap_or(letter_height_m * CONTINUOUS_THRESHOLD_FRACTION)
    }

    pub fn to_parameters(&self, letter_height_m: f64) -> TransitionParameters {
        let mode = match self.altitude_mode {
            AltitudeMode::Constant => AssemblyMode::ConstantAltitude,
            AltitudeMode::Separated => AssemblyMode::AltitudeSeparatedTransitions {
                transit_offset_m: self.transit_offset_m,
                continuous_threshold_m: self.continuous_threshold(letter_height_m),
            },
        };
        TransitionParameters {
            write_altitude_m: self.write_altitude_m,
            mode,
            order_method: self.order_method,
            entry: self.entry,
        }
    }
}

/// Kinematic model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightSettings {
    /// Cruise speed in m/s
    pub cruise_speed_m_s: f64,
    /// Acceleration and deceleration in m/s²
    pub acceleration_m_s2: f64,
}

impl Default for FlightSettings {
    fn default() -> Self {
        Self {
            cruise_speed_m_s: 3.0,
            acceleration_m_s2: DEFAULT_ACCELERATION_M_S2,
        }
    }
}

/// Placement of the text relative to home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Distance from home to the west edge of the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_x_m: Option<f64>,
    /// Distance from home to the south edge of the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_y_m: Option<f64>,
    /// Gap under which raw segments are joined into one stroke
    pub join_tolerance_m: f64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            margin_x_m: None,
            margin_y_m: None,
            join_tolerance_m: DEFAULT_JOIN_TOLERANCE_M,
        }
    }
}

impl PlacementSettings {
    /// `(margin_x, margin_y)`, defaulting to half the letter height.
    pub fn margins(&self, letter_height_m: f64) -> (f64, f64) {
        let default = letter_height_m * MARGIN_FRACTION;
        (
            self.margin_x_m.unwrap_or(default),
            self.margin_y_m.unwrap_or(default),
        )
    }
}

/// Complete conversion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simplify: SimplifySettings,
    pub transitions: TransitionSettings,
    pub flight: FlightSettings,
    pub placement: PlacementSettings,
    pub home: HomeReference,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simplify: SimplifySettings::default(),
            transitions: TransitionSettings::default(),
            flight: FlightSettings::default(),
            placement: PlacementSettings::default(),
            home: DEFAULT_HOME,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check every numeric setting the pipeline depends on.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let simplify = &self.simplify;
        ConfigurationError::require_positive("simplify.letter_height_m", simplify.letter_height_m)?;
        if let Some(epsilon) = simplify.epsilon_m {
            ConfigurationError::require_non_negative("simplify.epsilon_m", epsilon)?;
        }
        ConfigurationError::require_non_negative(
            "simplify.corner_angle_threshold_deg",
            simplify.corner_angle_threshold_deg,
        )?;

        let transitions = &self.transitions;
        ConfigurationError::require_finite(
            "transitions.write_altitude_m",
            transitions.write_altitude_m,
        )?;
        ConfigurationError::require_non_negative(
            "transitions.transit_offset_m",
            transitions.transit_offset_m,
        )?;
        if let Some(threshold) = transitions.continuous_threshold_m {
            ConfigurationError::require_non_negative_or_unbounded(
                "transitions.continuous_threshold_m",
                threshold,
            )?;
        }

        ConfigurationError::require_positive(
            "flight.cruise_speed_m_s",
            self.flight.cruise_speed_m_s,
        )?;
        ConfigurationError::require_positive(
            "flight.acceleration_m_s2",
            self.flight.acceleration_m_s2,
        )?;

        let placement = &self.placement;
        for (name, margin) in [
            ("placement.margin_x_m", placement.margin_x_m),
            ("placement.margin_y_m", placement.margin_y_m),
        ] {
            if let Some(margin) = margin {
                ConfigurationError::require_finite(name, margin)?;
            }
        }
        ConfigurationError::require_non_negative(
            "placement.join_tolerance_m",
            placement.join_tolerance_m,
        )?;

        self.home.validate()
    }

    pub fn simplifier_parameters(&self) -> SimplifierParameters {
        self.simplify.to_parameters()
    }

    pub fn transition_parameters(&self) -> TransitionParameters {
        self.transitions.to_parameters(self.simplify.letter_height_m)
    }

    /// Home margins resolved against the letter height.
    pub fn margins(&self) -> (f64, f64) {
        self.placement.margins(self.simplify.letter_height_m)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simplify.letter_height_m, 20.0);
        assert_eq!(config.transitions.write_altitude_m, 30.0);
        assert_eq!(config.transitions.transit_offset_m, 10.0);
        assert_eq!(config.flight.cruise_speed_m_s, 3.0);
        assert_eq!(config.flight.acceleration_m_s2, 3.0);
        assert_eq!(config.home, DEFAULT_HOME);
    }

    #[test]
    fn test_derived_defaults_follow_letter_height() {
        let mut config = Config::default();
        config.simplify.letter_height_m = 40.0;
        assert!((config.simplify.effective_epsilon() - 0.8).abs() < 1e-12);
        assert_eq!(config.margins(), (20.0, 20.0));

        config.placement.margin_y_m = Some(5.0);
        assert_eq!(config.margins(), (20.0, 5.0));

        config.transitions.altitude_mode = AltitudeMode::Separated;
        match config.transition_parameters().mode {
            AssemblyMode::AltitudeSeparatedTransitions {
                transit_offset_m,
                continuous_threshold_m,
            } => {
                assert_eq!(transit_offset_m, 10.0);
                assert!((continuous_threshold_m - 12.0).abs() < 1e-12);
            }
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn test_constant_mode_ignores_offset() {
        let config = Config::default();
        assert_eq!(
            config.transition_parameters().mode,
            AssemblyMode::ConstantAltitude
        );
    }

    #[test]
    fn test_validation_failures() {
        let mut config = Config::default();
        config.flight.cruise_speed_m_s = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::NotPositive { .. })
        ));

        let mut config = Config::default();
        config.simplify.epsilon_m = Some(-0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::Negative { .. })
        ));

        let mut config = Config::default();
        config.home.latitude = 95.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::OutOfRange { .. })
        ));

        let mut config = Config::default();
        config.simplify.corner_angle_threshold_deg = -5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "flight": { "cruise_speed_m_s": 5.0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.flight.cruise_speed_m_s, 5.0);
        assert_eq!(config.flight.acceleration_m_s2, 3.0);
        assert_eq!(config.transitions, TransitionSettings::default());
    }

    #[test]
    fn test_altitude_mode_display() {
        assert_eq!(AltitudeMode::Constant.to_string(), "constant");
        assert_eq!(AltitudeMode::Separated.to_string(), "separated");
    }
}
