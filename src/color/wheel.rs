//! Color wheel
//!
//! Maps a cyclic phase in `[0, 256)` onto a hue rotating r -> g -> b -> r.
//! Each of the three 85-wide bands ramps one channel up and another down,
//! scaled by 3/5 with truncating integer arithmetic, so the brightest
//! channel never exceeds 51.

use super::{BLACK, Rgb};

/// Length of one full hue rotation in phase units
pub const PHASE_CYCLE: f64 = 256.0;

const BAND: f64 = 85.0;

/// Color for a wheel `phase`
///
/// Phases below 0 or above 255 (and NaN) are black.
pub fn rainbow(phase: f64) -> Rgb {
    if !(0.0..=255.0).contains(&phase) {
        return BLACK;
    }

    if phase < BAND {
        Rgb {
            r: ramp_up(phase),
            g: ramp_down(phase),
            b: 0,
        }
    } else if phase < 2.0 * BAND {
        let phase = phase - BAND;
        Rgb {
            r: ramp_down(phase),
            g: 0,
            b: ramp_up(phase),
        }
    } else {
        let phase = phase - 2.0 * BAND;
        Rgb {
            r: 0,
            g: ramp_up(phase),
            b: ramp_down(phase),
        }
    }
}

/// Step a wheel phase forward by one, wrapping at [`PHASE_CYCLE`]
pub fn advance_phase(phase: f64) -> f64 {
    libm::fmod(phase + 1.0, PHASE_CYCLE)
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ramp_up(offset: f64) -> u8 {
    (libm::trunc(offset * 3.0) as u8) / 5
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ramp_down(offset: f64) -> u8 {
    (libm::trunc(255.0 - offset * 3.0) as u8) / 5
}
