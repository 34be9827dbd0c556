//! Interval-gated software PWM engine
//!
//! # Usage
//!
//! ```ignore
//! let config = PwmConfig::new(40, 255);
//! let mut pwm: SoftPwm<_, 4> = SoftPwm::new(config, &[11, 12], outputs)?;
//! pwm.set_duty_percent(0, 50)?;
//!
//! loop {
//!     pwm.step(clock.now_micros());
//!     // ... other non-blocking work ...
//! }
//! ```
//!
//! Missed intervals are not caught up: if the loop stalls for several tick
//! intervals, the next `step` advances a single tick.

use heapless::Vec;
use softpwm_hal::{elapsed_micros, DigitalOutput, Level, MicrosClock};

use super::channel::PinChannel;
use crate::config::PwmConfig;
use crate::error::{ConfigError, PwmError};

/// Convert a duty percentage to ticks for the given ceiling
///
/// `percent` above 100 is treated as 100. Rounds down, so 50% of 255 is 127.
pub fn percent_to_ticks(percent: u8, tick_ceiling: u16) -> u16 {
    let percent = percent.min(100) as u32;
    (percent * tick_ceiling as u32 / 100) as u16
}

/// Software PWM engine with up to `N` channels
///
/// Owns its digital-output collaborator. Pass `&mut outputs` instead to keep
/// ownership with the caller.
pub struct SoftPwm<O: DigitalOutput, const N: usize> {
    output: O,
    channels: Vec<PinChannel<O::Pin>, N>,
    tick_ceiling: u16,
    tick_interval_micros: u32,
    last_tick_micros: u32,
}

impl<O: DigitalOutput, const N: usize> SoftPwm<O, N> {
    /// Create the engine with one channel per entry of `pins`
    ///
    /// Each pin is configured as an output and driven to the starting level
    /// chosen by `config.start`. Nothing is written if the configuration is
    /// rejected.
    pub fn new(config: PwmConfig, pins: &[O::Pin], mut output: O) -> Result<Self, PwmError> {
        config.validate()?;

        if pins.len() > N {
            return Err(ConfigError::TooManyChannels {
                requested: pins.len(),
                capacity: N,
            }
            .into());
        }

        for (index, pin) in pins.iter().enumerate() {
            if pins[..index].contains(pin) {
                return Err(ConfigError::DuplicatePin { index }.into());
            }
        }

        let (duty_ticks, level) = config.initial_state();
        let mut channels = Vec::new();
        for &pin in pins {
            channels
                .push(PinChannel::new(pin, duty_ticks, level))
                .map_err(|_| ConfigError::TooManyChannels {
                    requested: pins.len(),
                    capacity: N,
                })?;
        }

        for channel in &channels {
            output.configure_output(channel.pin());
            output.write_level(channel.pin(), channel.level());
        }

        Ok(Self {
            output,
            channels,
            tick_ceiling: config.tick_ceiling,
            tick_interval_micros: config.tick_interval_micros,
            last_tick_micros: 0,
        })
    }

    /// Advance all channels by one tick if a tick interval has passed
    ///
    /// Returns `true` if a tick was processed. Never blocks.
    pub fn step(&mut self, now_micros: u32) -> bool {
        if elapsed_micros(now_micros, self.last_tick_micros) < self.tick_interval_micros {
            return false;
        }
        self.last_tick_micros = now_micros;

        let tick_ceiling = self.tick_ceiling;
        for channel in self.channels.iter_mut() {
            let level = channel.advance(tick_ceiling);
            self.output.write_level(channel.pin(), level);
        }

        true
    }

    /// [`step`](Self::step) using the current time of `clock`
    pub fn step_with<C: MicrosClock>(&mut self, clock: &C) -> bool {
        self.step(clock.now_micros())
    }

    /// Set the duty threshold of a channel, in ticks
    ///
    /// Values above the tick ceiling are clamped to it (always on). The new
    /// value is used from the next processed tick on, wherever the channel
    /// is within its current period.
    pub fn set_duty_cycle(&mut self, channel_index: usize, duty_ticks: u16) -> Result<(), PwmError> {
        let count = self.channels.len();
        let tick_ceiling = self.tick_ceiling;

        let channel = self
            .channels
            .get_mut(channel_index)
            .ok_or(PwmError::InvalidChannelIndex {
                index: channel_index,
                count,
            })?;
        channel.set_duty_ticks(duty_ticks.min(tick_ceiling));

        Ok(())
    }

    /// Set the duty of a channel as a percentage (0-100)
    pub fn set_duty_percent(&mut self, channel_index: usize, percent: u8) -> Result<(), PwmError> {
        self.set_duty_cycle(channel_index, percent_to_ticks(percent, self.tick_ceiling))
    }

    /// Get a channel by index
    pub fn channel(&self, index: usize) -> Option<&PinChannel<O::Pin>> {
        self.channels.get(index)
    }

    /// All channels, in pin-list order
    pub fn channels(&self) -> &[PinChannel<O::Pin>] {
        &self.channels
    }

    /// Current level of a channel
    pub fn level(&self, index: usize) -> Option<Level> {
        self.channels.get(index).map(|c| c.level())
    }

    /// Number of configured channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Ticks per PWM period
    pub fn tick_ceiling(&self) -> u16 {
        self.tick_ceiling
    }

    /// Minimum time between ticks (µs)
    pub fn tick_interval_micros(&self) -> u32 {
        self.tick_interval_micros
    }

    /// Timestamp of the last processed tick
    pub fn last_tick_micros(&self) -> u32 {
        self.last_tick_micros
    }

    /// Borrow the output collaborator
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutably borrow the output collaborator
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Tear down the engine and return the output collaborator
    pub fn release(self) -> O {
        self.output
    }
}
