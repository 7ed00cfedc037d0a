//! Input polling
//!
//! Physical buttons and switches are read once per tick through an
//! [`InputSource`] and reduced to an [`InputSnapshot`] of booleans using a
//! [`Trigger`] per channel.

use heapless::Vec;

use crate::error::{ConfigError, Result};
use crate::scheduler::MAX_SEGMENTS;

/// Raw reading of one input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLevel {
    /// Digital pin level, `true` is high
    Digital(bool),
    /// Raw ADC value
    Analog(u16),
}

impl InputLevel {
    /// Level as an analog value (`0` or `u16::MAX` for digital pins)
    pub const fn raw(self) -> u16 {
        match self {
            Self::Digital(true) => u16::MAX,
            Self::Digital(false) => 0,
            Self::Analog(value) => value,
        }
    }

    /// Level as a digital value (analog above half scale reads high)
    pub const fn is_high(self) -> bool {
        match self {
            Self::Digital(high) => high,
            Self::Analog(value) => value > u16::MAX / 2,
        }
    }
}

/// Logical input channels the scheduler reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChannel {
    /// Segment button, zero-based
    Button(usize),
    /// Forces every segment on
    Override,
    /// Forces every LED off
    Blackout,
}

/// Hardware input provider
pub trait InputSource {
    /// Sample a channel
    fn read(&mut self, channel: InputChannel) -> InputLevel;
}

/// Rule turning a raw level into an asserted flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Asserted while the pin reads low (pull-up switch to ground)
    ActiveLow,
    /// Asserted while the pin reads high
    ActiveHigh,
    /// Asserted while the raw value is above the threshold
    Above(u16),
    /// Asserted while the raw value is below the threshold
    Below(u16),
}

impl Trigger {
    pub const fn is_asserted(self, level: InputLevel) -> bool {
        match self {
            Self::ActiveLow => !level.is_high(),
            Self::ActiveHigh => level.is_high(),
            Self::Above(threshold) => level.raw() > threshold,
            Self::Below(threshold) => level.raw() < threshold,
        }
    }
}

/// Asserted state of every mapped channel for one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub buttons: Vec<bool, MAX_SEGMENTS>,
    pub override_all: bool,
    pub blackout: bool,
}

impl InputSnapshot {
    /// Snapshot with only button states set
    ///
    /// Buttons past [`MAX_SEGMENTS`] are ignored.
    pub fn from_buttons(buttons: &[bool]) -> Self {
        let mut snapshot = Self::default();
        for &asserted in buttons.iter().take(MAX_SEGMENTS) {
            // Bounded by the `take` above.
            let _ = snapshot.buttons.push(asserted);
        }
        snapshot
    }

    /// Whether button `index` is asserted (unmapped buttons never are)
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Whether buttons `0..=index` are all asserted
    pub fn chain(&self, index: usize) -> bool {
        (0..=index).all(|button| self.button(button))
    }
}

/// Mapping from logical channels to triggers
#[derive(Debug, Clone, Default)]
pub struct InputMap {
    buttons: Vec<Trigger, MAX_SEGMENTS>,
    override_switch: Option<Trigger>,
    blackout: Option<Trigger>,
}

impl InputMap {
    pub const fn new() -> Self {
        Self {
            buttons: Vec::new(),
            override_switch: None,
            blackout: None,
        }
    }

    /// Map the next segment button
    pub fn with_button(mut self, trigger: Trigger) -> Result<Self> {
        self.buttons
            .push(trigger)
            .map_err(|_| ConfigError::TooManyInputs)?;
        Ok(self)
    }

    /// Map the override switch
    #[must_use]
    pub fn with_override(mut self, trigger: Trigger) -> Self {
        self.override_switch = Some(trigger);
        self
    }

    /// Map the blackout button
    #[must_use]
    pub fn with_blackout(mut self, trigger: Trigger) -> Self {
        self.blackout = Some(trigger);
        self
    }

    /// Number of mapped segment buttons
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Poll every mapped channel once
    pub fn snapshot<S: InputSource>(&self, source: &mut S) -> InputSnapshot {
        let mut snapshot = InputSnapshot::default();
        for (index, trigger) in self.buttons.iter().enumerate() {
            let asserted = trigger.is_asserted(source.read(InputChannel::Button(index)));
            // Both vectors share MAX_SEGMENTS capacity.
            let _ = snapshot.buttons.push(asserted);
        }
        snapshot.override_all = self
            .override_switch
            .is_some_and(|trigger| trigger.is_asserted(source.read(InputChannel::Override)));
        snapshot.blackout = self
            .blackout
            .is_some_and(|trigger| trigger.is_asserted(source.read(InputChannel::Blackout)));
        snapshot
    }
}
