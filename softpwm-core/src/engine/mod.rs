//! Software PWM timing engine
//!
//! A polling loop calls [`SoftPwm::step`] as often as it can. Once per tick
//! interval every channel advances one tick and its level is written out.

pub mod channel;
pub mod pwm;

pub use channel::PinChannel;
pub use pwm::{percent_to_ticks, SoftPwm};
