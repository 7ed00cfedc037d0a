//! Segment scheduler
//!
//! Owns the per-segment animation state, advances it once per tick and
//! assembles the full frame from every segment and the optional ring.

use embassy_time::Duration;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::activation::{ActivationPolicy, input_gated, progressive_unlock};
use crate::bounds::{RenderingBounds, bounded};
use crate::color::{BLACK, Rgb, advance_phase, rainbow};
use crate::config::SchedulerConfig;
use crate::engine::animate_path;
use crate::error::{ConfigError, Result};
use crate::input::InputSnapshot;
use crate::path::PathGeometry;
use crate::ring::HueSweep;

/// Maximum number of linear segments (and segment buttons)
pub const MAX_SEGMENTS: usize = 8;

/// Simulated time and color phase of one segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Seconds since the start of the current path period
    pub elapsed: f64,
    /// Color wheel phase in `[0, 256)`
    pub phase: f64,
}

impl AnimationState {
    pub const fn new(phase: f64) -> Self {
        Self {
            elapsed: 0.0,
            phase,
        }
    }

    /// Step time by `step` seconds and the phase by one
    ///
    /// Returns `true` when time wrapped back by one full `period`.
    pub fn advance(&mut self, step: f64, period: f64) -> bool {
        self.phase = advance_phase(self.phase);
        self.elapsed += step;
        if self.elapsed > period {
            self.elapsed -= period;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone)]
struct Segment<'a> {
    sensors: &'a [f64],
    bounds: RenderingBounds,
    state: AnimationState,
}

#[derive(Debug, Clone)]
struct Ring {
    bounds: RenderingBounds,
    sweep: HueSweep,
}

/// Segment Scheduler - combines every segment into one frame per tick
pub struct SegmentScheduler<'a, const MAX_LEDS: usize> {
    // Configuration
    geometry: PathGeometry,
    interval: Duration,
    step: f64,
    cycles: u8,
    policy: ActivationPolicy,

    // Internal state
    segments: Vec<Segment<'a>, MAX_SEGMENTS>,
    ring: Option<Ring>,
    cycle: u8,
    led_count: usize,
    frame_buffer: [Rgb; MAX_LEDS],
}

impl<'a, const MAX_LEDS: usize> SegmentScheduler<'a, MAX_LEDS> {
    /// Create a scheduler from a validated configuration
    ///
    /// Fails when the configuration is invalid or a segment or ring range
    /// does not fit in `MAX_LEDS`.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(config: &SchedulerConfig<'a>) -> Result<Self> {
        config.validate()?;

        let mut segments = Vec::new();
        let mut led_count = 0;
        for segment in &config.segments {
            segment.bounds.validate(MAX_LEDS)?;
            led_count = led_count.max(usize::from(segment.bounds.end));
            segments
                .push(Segment {
                    sensors: segment.sensors,
                    bounds: segment.bounds,
                    state: AnimationState::new(segment.phase),
                })
                .map_err(|_| ConfigError::TooManySegments)?;
        }

        let ring = match config.ring {
            Some(ring) => {
                ring.bounds.validate(MAX_LEDS)?;
                led_count = led_count.max(usize::from(ring.bounds.end));
                Some(Ring {
                    bounds: ring.bounds,
                    sweep: HueSweep::new(ring.phase),
                })
            }
            None => None,
        };

        Ok(Self {
            geometry: config.geometry,
            interval: config.interval,
            step: config.interval.as_micros() as f64 / 1_000_000.0,
            cycles: config.cycles,
            policy: config.policy,
            segments,
            ring,
            cycle: 0,
            led_count,
            frame_buffer: [BLACK; MAX_LEDS],
        })
    }

    /// Render the frame for the current state
    ///
    /// Inactive segments, and everything while blackout is asserted,
    /// render black. The ring is lit only when every segment is.
    pub fn render(&mut self, inputs: &InputSnapshot) -> Result<&[Rgb]> {
        self.frame_buffer.fill(BLACK);

        let mut all_active = !inputs.blackout;
        for (index, segment) in self.segments.iter().enumerate() {
            let active = !inputs.blackout
                && is_segment_active(self.policy, index, segment, self.cycle, &self.geometry, inputs);
            all_active &= active;
            if !active {
                continue;
            }

            let leds = bounded(&mut self.frame_buffer, segment.bounds);
            animate_path(
                &self.geometry,
                segment.sensors,
                segment.state.elapsed,
                rainbow(segment.state.phase),
                leds,
            )?;
        }

        if let Some(ring) = &self.ring
            && all_active
        {
            ring.sweep.render(bounded(&mut self.frame_buffer, ring.bounds));
        }

        Ok(&self.frame_buffer[..self.led_count])
    }

    /// Advance every segment by one tick
    ///
    /// Returns `true` when a path period completed and the cycle counter
    /// moved on.
    pub fn advance(&mut self) -> bool {
        let period = self.geometry.period();
        let mut wrapped = false;
        for segment in &mut self.segments {
            wrapped |= segment.state.advance(self.step, period);
        }
        if let Some(ring) = &mut self.ring {
            ring.sweep.advance();
        }

        if wrapped {
            self.cycle = (self.cycle + 1) % self.cycles;
            #[cfg(feature = "esp32-log")]
            println!("[SegmentScheduler.advance] cycle {}", self.cycle);
        }
        wrapped
    }

    /// Progressive unlock cycle counter
    pub const fn cycle(&self) -> u8 {
        self.cycle
    }

    /// State of segment `index`
    pub fn segment_state(&self, index: usize) -> Option<AnimationState> {
        self.segments.get(index).map(|segment| segment.state)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Color wheel phase of the ring, if there is one
    pub fn ring_phase(&self) -> Option<f64> {
        self.ring.as_ref().map(|ring| ring.sweep.phase())
    }

    /// Number of LEDs in every rendered frame
    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    /// The most recently rendered frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer[..self.led_count]
    }

    /// Tick interval, also the simulated time step
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn geometry(&self) -> &PathGeometry {
        &self.geometry
    }

    pub const fn policy(&self) -> ActivationPolicy {
        self.policy
    }
}

fn is_segment_active(
    policy: ActivationPolicy,
    index: usize,
    segment: &Segment<'_>,
    cycle: u8,
    geometry: &PathGeometry,
    inputs: &InputSnapshot,
) -> bool {
    match policy {
        ActivationPolicy::ProgressiveUnlock => {
            let reach = geometry.lead() + segment.state.elapsed * geometry.speed();
            let first_sensor = segment.sensors.first().copied().unwrap_or(0.0);
            progressive_unlock(index, cycle, reach, first_sensor)
        }
        ActivationPolicy::InputGated => input_gated(index, inputs),
    }
}
