//! Command dispatch onto the PWM engine
//!
//! Tool commands also carry a direction, written to a separate output per
//! channel (HIGH = reverse).

use softpwm_core::{DigitalOutput, Level, PwmError, SoftPwm};

use crate::commands::{Command, Direction};

impl From<Direction> for Level {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Level::Low,
            Direction::Reverse => Level::High,
        }
    }
}

/// Apply a decoded command, returning the channel it addressed
///
/// `direction_pins[i]` is the direction output of channel `i`; channels
/// without an entry have no direction output. The direction is written only
/// after the engine has accepted the duty update, so a rejected command
/// leaves every output untouched.
pub fn apply_command<O, D, const N: usize>(
    pwm: &mut SoftPwm<O, N>,
    direction: &mut D,
    direction_pins: &[D::Pin],
    cmd: Command,
) -> Result<usize, PwmError>
where
    O: DigitalOutput,
    D: DigitalOutput,
{
    let channel = cmd.channel_index();

    match cmd {
        Command::Duty(duty) => pwm.set_duty_cycle(channel, duty.duty_ticks)?,
        Command::Tool(tool) => {
            pwm.set_duty_percent(channel, tool.duty_percent())?;
            if let Some(&pin) = direction_pins.get(channel) {
                direction.write_level(pin, tool.direction.into());
            }
        }
    }

    Ok(channel)
}
