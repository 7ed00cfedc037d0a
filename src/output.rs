//! Frame sinks backed by `smart-leds` drivers

#[cfg(feature = "esp32-log")]
use esp_println::println;
use smart_leds::{SmartLedsWrite, brightness, gamma};

use crate::{FrameSink, color::Rgb};

/// Brightness used when none is configured (half scale)
pub const DEFAULT_BRIGHTNESS: u8 = 128;

/// Sends frames to any [`SmartLedsWrite`] driver
///
/// Global brightness and optional gamma correction are applied here, on
/// the way out, so the animation model always works at full scale.
pub struct LedStripSink<W> {
    writer: W,
    brightness: u8,
    gamma: bool,
}

impl<W> LedStripSink<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            brightness: DEFAULT_BRIGHTNESS,
            gamma: false,
        }
    }

    /// Set the global brightness (255 = full scale)
    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Enable gamma correction
    #[must_use]
    pub const fn with_gamma(mut self) -> Self {
        self.gamma = true;
        self
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Release the underlying driver
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> FrameSink for LedStripSink<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    fn write(&mut self, frame: &[Rgb]) {
        let pixels = frame.iter().copied();
        let result = if self.gamma {
            self.writer.write(brightness(gamma(pixels), self.brightness))
        } else {
            self.writer.write(brightness(pixels, self.brightness))
        };
        // Frames are fire-and-forget; the next tick overwrites everything.
        let _ = result.inspect_err(|_| {
            #[cfg(feature = "esp32-log")]
            println!("[LedStripSink.write] driver rejected frame");
        });
    }
}
