//! Board-agnostic software PWM engine
//!
//! This crate contains the timing logic for emulating PWM on plain GPIO
//! pins. It does not depend on any specific hardware:
//!
//! - Per-pin duty-cycle state machine ([`engine::PinChannel`])
//! - Interval-gated tick engine driven by a polling loop ([`engine::SoftPwm`])
//! - Engine configuration ([`config::PwmConfig`])
//! - Error taxonomy ([`error`])
//!
//! Outputs and time are reached through the `softpwm-hal` traits.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;

pub use config::{PwmConfig, StartPolicy};
pub use engine::{percent_to_ticks, PinChannel, SoftPwm};
pub use error::{ConfigError, PwmError};
pub use softpwm_hal::{DigitalOutput, Level, MicrosClock};
