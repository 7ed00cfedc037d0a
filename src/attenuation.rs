//! Intensity falloff inside an illuminated window

use crate::error::{AnimationError, ConfigError, Result};

const METHOD_NAME_LINEAR: &str = "linear";

/// Supported falloff curves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttenuationMethod {
    /// `1 - distance / width`
    #[default]
    Linear,
}

impl AttenuationMethod {
    /// Look up a method by name
    ///
    /// Any name other than `"linear"` is a configuration error.
    pub fn parse_from_str(s: &str) -> Result<Self> {
        match s {
            METHOD_NAME_LINEAR => Ok(Self::Linear),
            _ => Err(ConfigError::UnsupportedMethod.into()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => METHOD_NAME_LINEAR,
        }
    }

    /// Intensity (1.0 at the source, 0.0 at the window edge)
    ///
    /// Fails with [`AnimationError::Domain`] when `distance > width`.
    #[allow(clippy::float_cmp)]
    pub fn apply(self, distance: f64, width: f64) -> Result<f64> {
        // Comparisons against NaN are false, so reject it explicitly.
        if distance.is_nan() || width.is_nan() || distance > width {
            return Err(AnimationError::Domain { distance, width });
        }
        // A zero-width window still lights the sensor sitting on the source.
        if width == 0.0 {
            return Ok(1.0);
        }
        match self {
            Self::Linear => Ok(1.0 - distance / width),
        }
    }
}

/// Linear attenuation of `distance` inside a window of `width`
pub fn attenuation(distance: f64, width: f64) -> Result<f64> {
    AttenuationMethod::Linear.apply(distance, width)
}
