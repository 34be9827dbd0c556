//! PWM polling task
//!
//! Owns the engine and steps it as often as the executor allows. Commands
//! from the serial task are applied between steps.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;

use softpwm_core::{DigitalOutput, Level, SoftPwm};
use softpwm_hal::PinBank;
use softpwm_protocol::apply_command;

use crate::board::{DIRECTION_PINS, PWM_CHANNELS};
use crate::channels::COMMAND_CHANNEL;
use crate::clock::EmbassyClock;

/// GPIO outputs driven by the engine
pub type OutputBank = PinBank<Output<'static>, PWM_CHANNELS>;

/// Direction GPIOs, one per tool channel
pub type DirectionBank = PinBank<Output<'static>, PWM_CHANNELS>;

/// PWM task - steps the engine and applies queued commands
#[embassy_executor::task]
pub async fn pwm_task(mut pwm: SoftPwm<OutputBank, PWM_CHANNELS>, mut direction: DirectionBank) {
    info!(
        "PWM task started: {} channels, {} us/tick, {} ticks/period",
        pwm.channel_count(),
        pwm.tick_interval_micros(),
        pwm.tick_ceiling()
    );

    for &pin in DIRECTION_PINS.iter() {
        direction.configure_output(pin);
        direction.write_level(pin, Level::Low);
    }

    let clock = EmbassyClock;

    loop {
        while let Ok(cmd) = COMMAND_CHANNEL.try_receive() {
            match apply_command(&mut pwm, &mut direction, &DIRECTION_PINS, cmd) {
                Ok(channel) => debug!(
                    "Channel {} duty {}",
                    channel,
                    pwm.channel(channel).map(|c| c.duty_ticks())
                ),
                Err(e) => warn!("Command rejected: {:?}", e),
            }
        }

        pwm.step_with(&clock);
        yield_now().await;
    }
}
