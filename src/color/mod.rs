mod wheel;

use smart_leds::RGB8;

pub use wheel::{PHASE_CYCLE, advance_phase, rainbow};

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
