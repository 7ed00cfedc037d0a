//! Scheduler configuration
//!
//! Built once at startup. All validation that does not depend on the frame
//! buffer size happens here; the rest happens in
//! [`SegmentScheduler::new`](crate::SegmentScheduler::new).

use embassy_time::Duration;
use heapless::Vec;

use crate::activation::ActivationPolicy;
use crate::bounds::RenderingBounds;
use crate::color::PHASE_CYCLE;
use crate::error::{ConfigError, Result};
use crate::input::{InputMap, Trigger};
use crate::path::PathGeometry;
use crate::scheduler::MAX_SEGMENTS;

/// Tick interval, used both for pacing and as the simulated time step
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(30);

/// Number of path periods in one progressive unlock sequence
pub const DEFAULT_CYCLES: u8 = 7;

/// Length of the installed path
pub const DEFAULT_PATH_LENGTH: f64 = 30.0;
/// Source speed, path units per second
pub const DEFAULT_SPEED: f64 = 24.0;
pub const DEFAULT_TRAIL: f64 = 7.0;
pub const DEFAULT_LEAD: f64 = 1.5;

/// LEDs per linear segment
pub const SEGMENT_LEDS: u8 = 7;

/// Sensor positions of the first linear segment
pub const FIRST_SEGMENT_SENSORS: [f64; 7] = [0.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0];

/// Sensor positions shared by the remaining linear segments
pub const FOLLOWING_SEGMENT_SENSORS: [f64; 7] = [21.0, 24.0, 27.0, 0.0, 3.0, 6.0, 9.0];

/// Analog reading above which the blackout button counts as pressed
pub const BLACKOUT_THRESHOLD: u16 = 500;

/// One linear segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentConfig<'a> {
    /// Path position of every LED, in physical LED order
    pub sensors: &'a [f64],
    /// Where the segment's LEDs live in the frame buffer
    pub bounds: RenderingBounds,
    /// Initial color wheel phase
    pub phase: f64,
}

/// The circular ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    pub bounds: RenderingBounds,
    pub phase: f64,
}

/// Configuration for the segment scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig<'a> {
    pub geometry: PathGeometry,
    pub interval: Duration,
    pub cycles: u8,
    pub policy: ActivationPolicy,
    pub segments: Vec<SegmentConfig<'a>, MAX_SEGMENTS>,
    pub ring: Option<RingConfig>,
}

impl<'a> SchedulerConfig<'a> {
    /// Empty configuration with default timing and policy
    pub const fn new(geometry: PathGeometry) -> Self {
        Self {
            geometry,
            interval: DEFAULT_INTERVAL,
            cycles: DEFAULT_CYCLES,
            policy: ActivationPolicy::ProgressiveUnlock,
            segments: Vec::new(),
            ring: None,
        }
    }

    /// Set the tick interval
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the progressive unlock cycle count
    #[must_use]
    pub fn with_cycles(mut self, cycles: u8) -> Self {
        self.cycles = cycles;
        self
    }

    /// Set the activation policy
    #[must_use]
    pub fn with_policy(mut self, policy: ActivationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append a linear segment
    pub fn with_segment(mut self, segment: SegmentConfig<'a>) -> Result<Self> {
        self.segments
            .push(segment)
            .map_err(|_| ConfigError::TooManySegments)?;
        Ok(self)
    }

    /// Attach the ring
    #[must_use]
    pub fn with_ring(mut self, ring: RingConfig) -> Self {
        self.ring = Some(ring);
        self
    }

    /// Check everything that does not depend on the frame buffer
    pub fn validate(&self) -> Result<()> {
        if self.interval.as_ticks() == 0 {
            return Err(ConfigError::ZeroInterval.into());
        }
        if self.cycles == 0 {
            return Err(ConfigError::ZeroCycles.into());
        }
        if self.segments.is_empty() {
            return Err(ConfigError::NoSegments.into());
        }
        for segment in &self.segments {
            if segment.sensors.len() > usize::from(segment.bounds.count()) {
                return Err(ConfigError::TooManySensors.into());
            }
            for &sensor in segment.sensors {
                self.geometry.validate_sensor(sensor)?;
            }
            validate_phase(segment.phase)?;
        }
        if let Some(ring) = &self.ring {
            validate_phase(ring.phase)?;
        }
        Ok(())
    }
}

fn validate_phase(phase: f64) -> Result<()> {
    if (0.0..PHASE_CYCLE).contains(&phase) {
        Ok(())
    } else {
        Err(ConfigError::InvalidPhase.into())
    }
}

impl SchedulerConfig<'static> {
    /// Four linear segments of seven LEDs laid out back to back
    ///
    /// The first segment sits on positions 0 to 18; the other three share
    /// positions 21 to 9 (wrapping through the origin). Color phases start
    /// a quarter wheel apart.
    pub fn four_segments(policy: ActivationPolicy) -> Result<Self> {
        let geometry =
            PathGeometry::new(DEFAULT_PATH_LENGTH, DEFAULT_SPEED, DEFAULT_TRAIL, DEFAULT_LEAD)?;
        let mut config = Self::new(geometry).with_policy(policy);
        for index in 0..4u8 {
            let sensors: &'static [f64] = if index == 0 {
                &FIRST_SEGMENT_SENSORS
            } else {
                &FOLLOWING_SEGMENT_SENSORS
            };
            config = config.with_segment(SegmentConfig {
                sensors,
                bounds: RenderingBounds::from_offset(index * SEGMENT_LEDS, SEGMENT_LEDS),
                phase: f64::from(index) * 64.0,
            })?;
        }
        Ok(config)
    }
}

impl InputMap {
    /// Four active-low segment switches, an active-low override switch and
    /// an analog blackout button
    pub fn four_segments() -> Result<Self> {
        let mut map = Self::new();
        for _ in 0..4 {
            map = map.with_button(Trigger::ActiveLow)?;
        }
        Ok(map
            .with_override(Trigger::ActiveLow)
            .with_blackout(Trigger::Above(BLACKOUT_THRESHOLD)))
    }
}
