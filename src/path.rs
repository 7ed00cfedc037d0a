//! Circular path kinematics
//!
//! The light source travels at constant speed around a closed path. Its
//! position is a pure function of elapsed simulated time.

use heapless::Vec;

use crate::error::{ConfigError, Result};

/// Shape of the path and of the illuminated windows around the source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathGeometry {
    path_length: f64,
    speed: f64,
    trail: f64,
    lead: f64,
}

impl PathGeometry {
    /// Create a validated geometry
    ///
    /// `path_length` and `speed` must be positive; `trail` and `lead` must
    /// lie in `[0, path_length]`.
    pub fn new(path_length: f64, speed: f64, trail: f64, lead: f64) -> Result<Self> {
        let finite = [path_length, speed, trail, lead]
            .iter()
            .all(|value| value.is_finite());
        let within = |width: f64| (0.0..=path_length).contains(&width);
        if !finite || path_length <= 0.0 || speed <= 0.0 || !within(trail) || !within(lead) {
            return Err(ConfigError::InvalidGeometry.into());
        }
        Ok(Self {
            path_length,
            speed,
            trail,
            lead,
        })
    }

    pub const fn path_length(&self) -> f64 {
        self.path_length
    }

    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Width of the fading window behind the source
    pub const fn trail(&self) -> f64 {
        self.trail
    }

    /// Width of the brightening window ahead of the source
    pub const fn lead(&self) -> f64 {
        self.lead
    }

    /// Time the source needs for one full lap
    pub fn period(&self) -> f64 {
        self.path_length / self.speed
    }

    /// Source position after `elapsed` seconds, wrapped into `[0, path_length]`
    ///
    /// An exact multiple of the path length stays at `path_length` rather
    /// than folding to zero.
    pub fn position(&self, elapsed: f64) -> f64 {
        let pos = self.speed * elapsed;
        if pos <= self.path_length {
            return pos;
        }
        let wrapped = libm::fmod(pos, self.path_length);
        if wrapped > 0.0 {
            wrapped
        } else {
            self.path_length
        }
    }

    /// `N` sensor positions spaced evenly around the path, starting at 0
    ///
    /// Sensor `i` sits at `i * path_length / N`.
    #[allow(clippy::cast_precision_loss)]
    pub fn evenly_spaced<const N: usize>(&self) -> Vec<f64, N> {
        (0..N)
            .map(|index| index as f64 * self.path_length / N as f64)
            .collect()
    }

    /// Check that a sensor position lies on the path
    pub(crate) fn validate_sensor(&self, position: f64) -> Result<()> {
        if (0.0..self.path_length).contains(&position) {
            Ok(())
        } else {
            Err(ConfigError::SensorOutOfPath.into())
        }
    }
}
