//! Configuration types
//!
//! Board-agnostic engine configuration. The firmware builds a [`PwmConfig`]
//! from its `pwm.toml`; host code can deserialize one with the `serde`
//! feature.

pub mod types;

pub use types::*;
