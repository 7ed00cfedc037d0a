//! Periodic restart
//!
//! Some boards lock up after running for a long time. The control loop
//! counts ticks and asks the platform for a full restart once the count
//! passes a threshold.

/// Default number of ticks between restarts (about 50 minutes at 30 ms)
pub const DEFAULT_RESTART_TICKS: u32 = 100_000;

/// Platform hook that reboots the device
pub trait Restart {
    fn hard_restart(&mut self);
}

/// Tick counter that expires after `threshold` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watchdog {
    ticks: u32,
    threshold: u32,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new(DEFAULT_RESTART_TICKS)
    }
}

impl Watchdog {
    pub const fn new(threshold: u32) -> Self {
        Self {
            ticks: 0,
            threshold,
        }
    }

    /// Count one tick
    ///
    /// Returns `true` when the count exceeds the threshold. The counter
    /// starts over afterwards.
    pub fn tick(&mut self) -> bool {
        self.ticks = self.ticks.saturating_add(1);
        if self.ticks > self.threshold {
            self.ticks = 0;
            return true;
        }
        false
    }

    /// Ticks counted since the last restart
    pub const fn ticks(&self) -> u32 {
        self.ticks
    }

    pub const fn threshold(&self) -> u32 {
        self.threshold
    }
}
