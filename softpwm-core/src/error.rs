//! Engine error types
//!
//! Every error is reported before any engine state is touched.

/// Invalid engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// More pins than the engine has channel slots for
    TooManyChannels { requested: usize, capacity: usize },
    /// Tick ceiling must be at least 1
    ZeroTickCeiling,
    /// Pin at `index` repeats an earlier pin in the list
    DuplicatePin { index: usize },
}

/// Errors returned by the PWM engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Rejected at initialization
    Configuration(ConfigError),
    /// Duty-cycle update addressed a channel that does not exist
    InvalidChannelIndex { index: usize, count: usize },
}

impl From<ConfigError> for PwmError {
    fn from(err: ConfigError) -> Self {
        PwmError::Configuration(err)
    }
}
