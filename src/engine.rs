//! Animation engine
//!
//! Computes the color of every sensor along the path for one instant.
//! Each sensor is evaluated in two phases: the trailing window behind the
//! source first, then the leading window ahead of it. A leading match
//! replaces a trailing match for the same sensor.

use crate::{
    attenuation::attenuation,
    color::{BLACK, Rgb},
    error::{ConfigError, Result},
    path::PathGeometry,
};

/// Render the traveling light onto `leds`
///
/// `leds[i]` receives the color for `sensors[i]`; LEDs past the end of
/// `sensors` are left untouched. `leds` must be at least as long as
/// `sensors`.
pub fn animate_path(
    geometry: &PathGeometry,
    sensors: &[f64],
    elapsed: f64,
    peak: Rgb,
    leds: &mut [Rgb],
) -> Result<()> {
    if leds.len() < sensors.len() {
        return Err(ConfigError::TooManySensors.into());
    }

    let pos = geometry.position(elapsed);
    for (led, &sensor) in leds.iter_mut().zip(sensors) {
        let trailing = trailing_intensity(geometry, pos, sensor)?;
        let leading = leading_intensity(geometry, pos, sensor)?;

        *led = match leading.or(trailing) {
            Some(intensity) => attenuate(intensity, peak),
            None => BLACK,
        };
    }
    Ok(())
}

/// Intensity of a sensor the source has already passed
///
/// The sensor sitting exactly on the source counts as distance zero.
fn trailing_intensity(geometry: &PathGeometry, pos: f64, sensor: f64) -> Result<Option<f64>> {
    let trail = geometry.trail();
    let behind = pos - sensor;

    if behind > trail {
        return Ok(None);
    }
    if behind >= 0.0 {
        return attenuation(behind, trail).map(Some);
    }

    // Trailing window wraps past the path origin.
    let wrapped = geometry.path_length() - sensor + pos;
    if trail > pos && wrapped <= trail {
        return attenuation(wrapped, trail).map(Some);
    }
    Ok(None)
}

/// Intensity of a sensor the source is approaching
fn leading_intensity(geometry: &PathGeometry, pos: f64, sensor: f64) -> Result<Option<f64>> {
    let lead = geometry.lead();
    let path_length = geometry.path_length();

    let ahead = sensor - pos;
    if ahead > 0.0 && ahead < lead {
        return attenuation(ahead, lead).map(Some);
    }

    // Leading window wraps past the path origin.
    let wrapped = sensor + path_length - pos;
    if pos + lead > path_length && wrapped < lead {
        return attenuation(wrapped, lead).map(Some);
    }
    Ok(None)
}

/// Scale every channel of `peak`, rounding down
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn attenuate(intensity: f64, peak: Rgb) -> Rgb {
    let scale = |channel: u8| libm::floor(intensity * f64::from(channel)) as u8;
    Rgb {
        r: scale(peak.r),
        g: scale(peak.g),
        b: scale(peak.b),
    }
}
