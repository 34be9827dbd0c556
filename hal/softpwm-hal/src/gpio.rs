//! Digital output abstractions
//!
//! The PWM engine addresses its outputs by an opaque pin identifier rather
//! than owning one typed pin per channel. [`DigitalOutput`] is that
//! addressable interface; [`PinBank`] implements it on top of a set of
//! `embedded-hal` output pins.

use core::convert::Infallible;
use core::ops::Not;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use heapless::Vec;

/// Logical output level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Check if this is the high level
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if this is the low level
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::High => PinState::High,
            Level::Low => PinState::Low,
        }
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::High => Level::Low,
            Level::Low => Level::High,
        }
    }
}

/// Addressable digital outputs
///
/// Both calls are synchronous and cannot fail; a platform that can report
/// write errors must handle them below this trait.
pub trait DigitalOutput {
    /// Platform pin identifier
    type Pin: Copy + PartialEq;

    /// Configure `pin` as a digital output
    fn configure_output(&mut self, pin: Self::Pin);

    /// Drive `pin` to `level`
    ///
    /// Writing the level a pin already has must be harmless.
    fn write_level(&mut self, pin: Self::Pin, level: Level);
}

impl<T: DigitalOutput + ?Sized> DigitalOutput for &mut T {
    type Pin = T::Pin;

    fn configure_output(&mut self, pin: Self::Pin) {
        (**self).configure_output(pin)
    }

    fn write_level(&mut self, pin: Self::Pin, level: Level) {
        (**self).write_level(pin, level)
    }
}

/// Errors from building a [`PinBank`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinBankError {
    /// Bank already holds its maximum number of pins
    Full,
    /// Another pin was registered under the same identifier
    DuplicateId(u8),
}

struct BankEntry<P> {
    id: u8,
    pin: P,
    /// If true, logical HIGH drives the pin LOW
    active_low: bool,
    configured: bool,
}

/// Fixed-capacity set of `embedded-hal` output pins addressed by `u8` id
///
/// Pins are only driven after [`DigitalOutput::configure_output`] has been
/// called for their id. Writes to unknown or unconfigured ids are ignored.
pub struct PinBank<P, const N: usize> {
    entries: Vec<BankEntry<P>, N>,
}

impl<P, const N: usize> Default for PinBank<P, N>
where
    P: OutputPin + ErrorType<Error = Infallible>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, const N: usize> PinBank<P, N>
where
    P: OutputPin + ErrorType<Error = Infallible>,
{
    /// Create an empty pin bank
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register an active-high pin under `id`
    pub fn add(&mut self, id: u8, pin: P) -> Result<(), PinBankError> {
        self.insert(id, pin, false)
    }

    /// Register an active-low pin under `id` (logical HIGH drives it LOW)
    pub fn add_active_low(&mut self, id: u8, pin: P) -> Result<(), PinBankError> {
        self.insert(id, pin, true)
    }

    fn insert(&mut self, id: u8, pin: P, active_low: bool) -> Result<(), PinBankError> {
        if self.entries.iter().any(|e| e.id == id) {
            return Err(PinBankError::DuplicateId(id));
        }

        self.entries
            .push(BankEntry {
                id,
                pin,
                active_low,
                configured: false,
            })
            .map_err(|_| PinBankError::Full)
    }

    /// Number of registered pins
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no pins are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if `id` has been configured as an output
    pub fn is_configured(&self, id: u8) -> bool {
        self.entries.iter().any(|e| e.id == id && e.configured)
    }

    /// Borrow the pin registered under `id`
    pub fn pin(&self, id: u8) -> Option<&P> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.pin)
    }

    fn drive(entry: &mut BankEntry<P>, level: Level) {
        // Active-low: logical HIGH -> pin LOW
        let physical = if entry.active_low { !level } else { level };
        if let Err(never) = entry.pin.set_state(physical.into()) {
            match never {}
        }
    }
}

impl<P, const N: usize> DigitalOutput for PinBank<P, N>
where
    P: OutputPin + ErrorType<Error = Infallible>,
{
    type Pin = u8;

    fn configure_output(&mut self, pin: u8) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == pin) {
            entry.configured = true;
        }
    }

    fn write_level(&mut self, pin: u8, level: Level) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.id == pin && e.configured)
        {
            Self::drive(entry, level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock embedded-hal output pin for testing
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                writes: 0,
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_level_conversions() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(Level::High.is_high());
        assert_eq!(!Level::High, Level::Low);
        assert_eq!(PinState::from(Level::Low), PinState::Low);
        assert_eq!(Level::default(), Level::Low);
    }

    #[test]
    fn test_write_requires_configure() {
        let mut bank: PinBank<MockPin, 4> = PinBank::new();
        bank.add(9, MockPin::new()).unwrap();

        bank.write_level(9, Level::High);
        assert!(!bank.pin(9).unwrap().high);
        assert_eq!(bank.pin(9).unwrap().writes, 0);

        bank.configure_output(9);
        assert!(bank.is_configured(9));
        bank.write_level(9, Level::High);
        assert!(bank.pin(9).unwrap().high);
    }

    #[test]
    fn test_active_low_pin() {
        let mut bank: PinBank<MockPin, 4> = PinBank::new();
        bank.add_active_low(3, MockPin::new()).unwrap();
        bank.configure_output(3);

        // Logical HIGH drives the pin low
        bank.write_level(3, Level::High);
        assert!(!bank.pin(3).unwrap().high);

        bank.write_level(3, Level::Low);
        assert!(bank.pin(3).unwrap().high);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut bank: PinBank<MockPin, 2> = PinBank::new();
        bank.add(1, MockPin::new()).unwrap();
        bank.configure_output(7);
        bank.write_level(7, Level::High);

        assert!(!bank.is_configured(7));
        assert_eq!(bank.pin(1).unwrap().writes, 0);
    }

    #[test]
    fn test_bank_capacity_and_duplicates() {
        let mut bank: PinBank<MockPin, 2> = PinBank::new();
        assert!(bank.is_empty());

        bank.add(1, MockPin::new()).unwrap();
        assert_eq!(
            bank.add(1, MockPin::new()),
            Err(PinBankError::DuplicateId(1))
        );

        bank.add(2, MockPin::new()).unwrap();
        assert_eq!(bank.add(3, MockPin::new()), Err(PinBankError::Full));
        assert_eq!(bank.len(), 2);
    }
}
