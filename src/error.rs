//! Error types
//!
//! Configuration problems are caught once, when the scheduler is built.
//! A [`AnimationError::Domain`] raised while rendering means the windowing
//! logic asked for an intensity outside the illuminated window and is
//! treated as fatal by the control loop.

use core::fmt;

/// Result alias used across the crate
pub type Result<T> = core::result::Result<T, AnimationError>;

/// Errors produced by the animation model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationError {
    /// Attenuation was queried with a distance larger than the window width
    Domain { distance: f64, width: f64 },
    /// Unsupported or inconsistent configuration
    Config(ConfigError),
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Attenuation method name is not supported
    UnsupportedMethod,
    /// Path length, speed, trail or lead out of range
    InvalidGeometry,
    /// Sensor position outside `[0, path_length)`
    SensorOutOfPath,
    /// Segment or ring LED range does not fit in the frame buffer
    BoundsOutOfFrame,
    /// More sensors than LEDs available to write them to
    TooManySensors,
    /// Segment capacity exceeded
    TooManySegments,
    /// Input trigger capacity exceeded
    TooManyInputs,
    /// Scheduler needs at least one segment
    NoSegments,
    /// Tick interval must be non-zero
    ZeroInterval,
    /// Progressive unlock needs at least one cycle
    ZeroCycles,
    /// Initial color wheel phase outside `[0, 256)`
    InvalidPhase,
}

impl From<ConfigError> for AnimationError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain { distance, width } => {
                write!(f, "distance {distance} exceeds window width {width}")
            }
            Self::Config(error) => write!(f, "invalid configuration: {error}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::UnsupportedMethod => "attenuation method not supported",
            Self::InvalidGeometry => {
                "path length and speed must be positive, trail and lead within the path"
            }
            Self::SensorOutOfPath => "sensor position must lie in [0, path_length)",
            Self::BoundsOutOfFrame => "LED range exceeds the frame buffer",
            Self::TooManySensors => "segment has more sensors than LEDs",
            Self::TooManySegments => "segment capacity exceeded",
            Self::TooManyInputs => "input trigger capacity exceeded",
            Self::NoSegments => "at least one segment is required",
            Self::ZeroInterval => "tick interval must be non-zero",
            Self::ZeroCycles => "cycle count must be non-zero",
            Self::InvalidPhase => "color phase must lie in [0, 256)",
        };
        f.write_str(message)
    }
}

impl core::error::Error for AnimationError {}

impl core::error::Error for ConfigError {}
