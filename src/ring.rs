//! Hue sweep for the circular ring
//!
//! The ring does not use the traveling light. It shows the whole color
//! wheel spread evenly around its LEDs and rotates it by one phase step
//! per tick.

use crate::color::{PHASE_CYCLE, Rgb, advance_phase, rainbow};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueSweep {
    phase: f64,
}

impl HueSweep {
    pub fn new(phase: f64) -> Self {
        Self {
            phase: libm::fmod(phase, PHASE_CYCLE),
        }
    }

    /// Wheel phase of the first ring LED
    pub const fn phase(&self) -> f64 {
        self.phase
    }

    /// Spread one wheel rotation over `leds`
    ///
    /// LED phases are rounded down to whole wheel steps.
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self, leds: &mut [Rgb]) {
        let count = leds.len() as f64;
        for (index, led) in leds.iter_mut().enumerate() {
            let offset = index as f64 * PHASE_CYCLE / count;
            *led = rainbow(libm::floor(libm::fmod(self.phase + offset, PHASE_CYCLE)));
        }
    }

    pub fn advance(&mut self) {
        self.phase = advance_phase(self.phase);
    }
}
