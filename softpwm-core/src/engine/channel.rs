//! Per-pin duty-cycle state machine
//!
//! Each channel alternates between two states:
//!
//! ```text
//!            elapsed >= duty
//!   ┌──────┐ ──────────────▶ ┌─────┐
//!   │ HIGH │                 │ LOW │
//!   └──────┘ ◀────────────── └─────┘
//!            elapsed >= ceiling
//!            (elapsed := 0)
//! ```
//!
//! The counter is reset once per period, on the LOW→HIGH edge, so a period
//! is exactly `ceiling` ticks: `duty` ticks HIGH, the rest LOW.

use softpwm_hal::Level;

/// One software-PWM output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinChannel<P> {
    /// Platform pin identifier
    pin: P,
    /// Ticks per period the pin is HIGH, `0..=ceiling`
    duty_ticks: u16,
    /// Current logical output level
    level: Level,
    /// Ticks since the current period began, `0..=ceiling`
    elapsed_ticks: u16,
}

impl<P: Copy> PinChannel<P> {
    /// Create a channel at the start of a period
    pub fn new(pin: P, duty_ticks: u16, level: Level) -> Self {
        Self {
            pin,
            duty_ticks,
            level,
            elapsed_ticks: 0,
        }
    }

    /// Platform pin identifier
    pub fn pin(&self) -> P {
        self.pin
    }

    /// Current duty threshold in ticks
    pub fn duty_ticks(&self) -> u16 {
        self.duty_ticks
    }

    /// Current logical level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Ticks elapsed in the current period
    pub fn elapsed_ticks(&self) -> u16 {
        self.elapsed_ticks
    }

    /// Overwrite the duty threshold; the caller clamps it to the ceiling
    pub(crate) fn set_duty_ticks(&mut self, duty_ticks: u16) {
        self.duty_ticks = duty_ticks;
    }

    /// Advance by one tick and return the resulting level
    pub fn advance(&mut self, tick_ceiling: u16) -> Level {
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);

        match self.level {
            Level::High => self.advance_high(tick_ceiling),
            Level::Low => self.advance_low(tick_ceiling),
        }

        self.level
    }

    fn advance_high(&mut self, tick_ceiling: u16) {
        if self.duty_ticks >= tick_ceiling {
            // Full duty: never turn off, but still close the period
            if self.elapsed_ticks >= tick_ceiling {
                self.elapsed_ticks = 0;
            }
        } else if self.elapsed_ticks >= self.duty_ticks {
            self.level = Level::Low;
        }
    }

    fn advance_low(&mut self, tick_ceiling: u16) {
        if self.elapsed_ticks >= tick_ceiling {
            self.elapsed_ticks = 0;
            // Zero duty: stay off for the next period too
            if self.duty_ticks > 0 {
                self.level = Level::High;
            }
        }
    }
}
