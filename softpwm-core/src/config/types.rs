//! Engine configuration definitions

use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default minimum time between tick advances (µs)
pub const DEFAULT_TICK_INTERVAL_MICROS: u32 = 40;

/// Default PWM period in ticks (8-bit duty resolution)
pub const DEFAULT_TICK_CEILING: u16 = 255;

/// Duty and level every channel starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StartPolicy {
    /// duty = 0, level LOW: outputs stay off until commanded
    #[default]
    Off,
    /// duty = tick ceiling, level HIGH: outputs run fully on
    On,
}

/// Software PWM engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PwmConfig {
    /// Minimum real time between tick advances (µs)
    pub tick_interval_micros: u32,
    /// Ticks per PWM period; also the duty-cycle resolution
    pub tick_ceiling: u16,
    /// Starting duty/level for every channel
    pub start: StartPolicy,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            tick_interval_micros: DEFAULT_TICK_INTERVAL_MICROS,
            tick_ceiling: DEFAULT_TICK_CEILING,
            start: StartPolicy::Off,
        }
    }
}

impl PwmConfig {
    /// Create a configuration with the default start policy
    pub const fn new(tick_interval_micros: u32, tick_ceiling: u16) -> Self {
        Self {
            tick_interval_micros,
            tick_ceiling,
            start: StartPolicy::Off,
        }
    }

    /// Replace the start policy
    pub const fn with_start(mut self, start: StartPolicy) -> Self {
        self.start = start;
        self
    }

    /// Check the configuration independently of any pin list
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ceiling == 0 {
            return Err(ConfigError::ZeroTickCeiling);
        }
        Ok(())
    }

    /// Nominal PWM period in microseconds
    ///
    /// Assumes the polling loop keeps up with the tick interval; a slower
    /// loop stretches the real period.
    pub fn period_micros(&self) -> u32 {
        self.tick_interval_micros
            .saturating_mul(self.tick_ceiling as u32)
    }

    /// Nominal PWM frequency in Hz (0 if the period is zero)
    pub fn frequency_hz(&self) -> u32 {
        match self.period_micros() {
            0 => 0,
            period => 1_000_000 / period,
        }
    }

    /// Duty and level a channel starts with under this configuration
    pub fn initial_state(&self) -> (u16, softpwm_hal::Level) {
        match self.start {
            StartPolicy::Off => (0, softpwm_hal::Level::Low),
            StartPolicy::On => (self.tick_ceiling, softpwm_hal::Level::High),
        }
    }
}
