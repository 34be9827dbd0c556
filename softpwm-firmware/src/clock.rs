//! Microsecond time source backed by the Embassy time driver

use embassy_time::Instant;
use softpwm_hal::MicrosClock;

/// Uptime in microseconds, truncated to 32 bits
///
/// Wraps roughly every 71 minutes; the engine compares timestamps with
/// wrapping arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    fn now_micros(&self) -> u32 {
        Instant::now().as_micros() as u32
    }
}
