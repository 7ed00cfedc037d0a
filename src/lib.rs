#![no_std]

pub mod activation;
pub mod attenuation;
pub mod bounds;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod frame_scheduler;
pub mod input;
pub mod output;
pub mod path;
pub mod ring;
pub mod scheduler;
pub mod watchdog;

pub use activation::ActivationPolicy;
pub use attenuation::{AttenuationMethod, attenuation};
pub use bounds::RenderingBounds;
pub use config::{RingConfig, SchedulerConfig, SegmentConfig};
pub use engine::animate_path;
pub use error::{AnimationError, ConfigError, Result};
pub use frame_scheduler::{BlockingClock, Clock, FrameResult, FrameScheduler};
pub use input::{InputChannel, InputLevel, InputMap, InputSnapshot, InputSource, Trigger};
pub use output::LedStripSink;
pub use path::PathGeometry;
pub use scheduler::{AnimationState, MAX_SEGMENTS, SegmentScheduler};
pub use watchdog::{Restart, Watchdog};

pub use color::{Rgb, rainbow};
pub use embassy_time::Duration;

/// Abstract LED output trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler hands it one complete frame per tick.
pub trait FrameSink {
    /// Write colors to the LED strip
    fn write(&mut self, frame: &[Rgb]);

    /// Latch the written frame onto the LEDs
    ///
    /// Sinks that display on `write` can keep the default.
    fn flush(&mut self) {}
}
