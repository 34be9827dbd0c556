//! Build-time configuration
//!
//! Constants are generated from `pwm.toml` by `build.rs`.

use embassy_rp::uart::Config as UartConfig;
use softpwm_core::PwmConfig;

include!(concat!(env!("OUT_DIR"), "/pwm_config.rs"));

/// Engine configuration from pwm.toml
pub const fn pwm_config() -> PwmConfig {
    PwmConfig::new(TICK_INTERVAL_US, TICK_CEILING).with_start(START_POLICY)
}

/// UART configuration for the command port
pub fn uart_config() -> UartConfig {
    let mut config = UartConfig::default();
    config.baudrate = BAUDRATE;
    config
}
