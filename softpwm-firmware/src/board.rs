//! Board pin assignments (Raspberry Pi Pico)
//!
//! Pin ids are GPIO numbers. `main` must hand over the matching
//! peripherals.

/// Number of PWM channels (one per tool)
pub const PWM_CHANNELS: usize = 4;

/// PWM outputs, in channel order (tool 1 = GPIO2)
pub const PWM_PINS: [u8; PWM_CHANNELS] = [2, 3, 4, 5];

/// Direction outputs, in channel order (HIGH = reverse)
pub const DIRECTION_PINS: [u8; PWM_CHANNELS] = [6, 7, 8, 9];
