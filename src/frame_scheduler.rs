//! Control loop
//!
//! One tick reads the inputs, renders the frame, hands it to the sink,
//! checks the watchdog and advances the animation. The caller sleeps for
//! the returned duration between ticks, or lets [`FrameScheduler::run`]
//! do it.

use core::convert::Infallible;

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::Result;
use crate::input::{InputMap, InputSource};
use crate::scheduler::SegmentScheduler;
use crate::watchdog::{Restart, Watchdog};
use crate::FrameSink;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// How long to wait until the next frame (always the tick interval).
    pub sleep_duration: Duration,
    /// A path period completed during this tick.
    pub cycle_advanced: bool,
    /// The watchdog requested a restart during this tick.
    pub restarted: bool,
}

/// Blocking sleep provider
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// [`Clock`] that busy-waits on the `embassy-time` driver
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingClock;

impl Clock for BlockingClock {
    fn sleep(&mut self, duration: Duration) {
        embassy_time::block_for(duration);
    }
}

/// Fixed-interval frame scheduler.
///
/// The interval the caller sleeps for is the same interval the animation
/// advances its simulated time by, so animation speed tracks wall-clock
/// speed.
///
/// # Usage
///
/// ```ignore
/// let config = SchedulerConfig::four_segments(ActivationPolicy::ProgressiveUnlock)?;
/// let scheduler = SegmentScheduler::<28>::new(&config)?;
/// let mut frames = FrameScheduler::new(scheduler, InputMap::four_segments()?, sink, pins, reset);
///
/// loop {
///     let result = frames.tick()?;
///     delay.delay_ms(result.sleep_duration.as_millis() as u32);
/// }
/// ```
pub struct FrameScheduler<'a, O, I, R, const MAX_LEDS: usize>
where
    O: FrameSink,
    I: InputSource,
    R: Restart,
{
    output: O,
    input: I,
    restart: R,
    inputs: InputMap,
    scheduler: SegmentScheduler<'a, MAX_LEDS>,
    watchdog: Watchdog,
}

impl<'a, O, I, R, const MAX_LEDS: usize> FrameScheduler<'a, O, I, R, MAX_LEDS>
where
    O: FrameSink,
    I: InputSource,
    R: Restart,
{
    /// Create a new frame scheduler.
    ///
    /// Uses the default watchdog threshold.
    pub fn new(
        scheduler: SegmentScheduler<'a, MAX_LEDS>,
        inputs: InputMap,
        output: O,
        input: I,
        restart: R,
    ) -> Self {
        Self {
            output,
            input,
            restart,
            inputs,
            scheduler,
            watchdog: Watchdog::default(),
        }
    }

    /// Replace the watchdog
    #[must_use]
    pub fn with_watchdog(mut self, watchdog: Watchdog) -> Self {
        self.watchdog = watchdog;
        self
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Takes an input snapshot
    /// 2. Renders the current frame
    /// 3. Writes and flushes it to the sink
    /// 4. Restarts the platform if the watchdog expired
    /// 5. Advances the animation by one interval
    pub fn tick(&mut self) -> Result<FrameResult> {
        let snapshot = self.inputs.snapshot(&mut self.input);

        let frame = self.scheduler.render(&snapshot)?;
        self.output.write(frame);
        self.output.flush();

        let restarted = self.watchdog.tick();
        if restarted {
            #[cfg(feature = "esp32-log")]
            println!(
                "[FrameScheduler.tick] watchdog expired after {} ticks, restarting",
                self.watchdog.threshold()
            );
            self.restart.hard_restart();
        }

        let cycle_advanced = self.scheduler.advance();

        Ok(FrameResult {
            sleep_duration: self.scheduler.interval(),
            cycle_advanced,
            restarted,
        })
    }

    /// Run the control loop forever.
    ///
    /// Only returns if rendering fails, which indicates a windowing bug.
    pub fn run<C: Clock>(&mut self, clock: &mut C) -> Result<Infallible> {
        loop {
            match self.tick() {
                Ok(result) => clock.sleep(result.sleep_duration),
                Err(error) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[FrameScheduler.run] halting: {}", error);
                    return Err(error);
                }
            }
        }
    }

    /// Get a reference to the segment scheduler.
    pub fn scheduler(&self) -> &SegmentScheduler<'a, MAX_LEDS> {
        &self.scheduler
    }

    /// Get a mutable reference to the segment scheduler.
    pub fn scheduler_mut(&mut self) -> &mut SegmentScheduler<'a, MAX_LEDS> {
        &mut self.scheduler
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn restart(&self) -> &R {
        &self.restart
    }

    pub fn watchdog(&self) -> &Watchdog {
        &self.watchdog
    }
}
