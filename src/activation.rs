//! Segment activation policies
//!
//! Decide, per tick, whether a segment shows its animation or stays black.

use crate::input::InputSnapshot;

/// How segments are switched on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActivationPolicy {
    /// Segments light up one by one as the cycle counter grows
    #[default]
    ProgressiveUnlock,
    /// Segments follow a chain of buttons, with an override switch
    InputGated,
}

/// Progressive unlock rule for segment `index`
///
/// The first segment is always lit. Segment `index` is lit once `cycle`
/// has passed it, or on the cycle equal to it as soon as the leading edge
/// of the source (`reach = lead + elapsed * speed`) arrives at the
/// segment's first sensor.
///
/// Each segment compares against its own first sensor, so segments laid
/// out on different sensor lists unlock where their own light begins.
pub fn progressive_unlock(index: usize, cycle: u8, reach: f64, first_sensor: f64) -> bool {
    let cycle = usize::from(cycle);
    index == 0 || cycle > index || (cycle == index && reach >= first_sensor)
}

/// Input gated rule for segment `index`
///
/// Segment `index` is lit while buttons `0..=index` are all asserted, or
/// while the override switch is asserted.
pub fn input_gated(index: usize, inputs: &InputSnapshot) -> bool {
    inputs.override_all || inputs.chain(index)
}
