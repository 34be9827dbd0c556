//! softpwm Hardware Abstraction Layer
//!
//! This crate defines the two collaborators the software PWM engine needs
//! from the platform, plus a ready-made adapter for `embedded-hal` pins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (softpwm-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softpwm-core (engine)                  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softpwm-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal OutputPin (chip HAL)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalOutput`] - Addressable digital outputs
//! - [`time::MicrosClock`] - Wrapping microsecond counter

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key items at crate root for convenience
pub use gpio::{DigitalOutput, Level, PinBank, PinBankError};
pub use time::{elapsed_micros, MicrosClock};
