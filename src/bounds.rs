use crate::color::Rgb;
use crate::error::{ConfigError, Result};

/// Range of frame buffer LEDs owned by one segment or by the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingBounds {
    pub start: u8,
    pub end: u8,
}

impl RenderingBounds {
    /// Bounds covering `count` LEDs starting at `start`
    pub const fn from_offset(start: u8, count: u8) -> Self {
        Self {
            start,
            end: start.saturating_add(count),
        }
    }

    /// Get the number of LEDs in the rendering area
    pub const fn count(self) -> u8 {
        self.end.saturating_sub(self.start)
    }

    /// Check that the range is ordered and fits in a frame of `frame_len` LEDs
    pub(crate) fn validate(self, frame_len: usize) -> Result<()> {
        if self.start > self.end || usize::from(self.end) > frame_len {
            return Err(ConfigError::BoundsOutOfFrame.into());
        }
        Ok(())
    }
}

/// Get a slice of the LEDs within the bounds
pub(crate) fn bounded(leds: &mut [Rgb], bounds: RenderingBounds) -> &mut [Rgb] {
    let start = bounds.start;
    let end = bounds.end;
    &mut leds[start as usize..end as usize]
}
