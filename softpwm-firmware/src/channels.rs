//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use softpwm_protocol::{Command, Line};

/// Channel capacity for decoded commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for lines waiting to be echoed
const ECHO_CHANNEL_SIZE: usize = 4;

/// Commands from the serial RX task to the PWM task
///
/// The PWM task is the only receiver and the only owner of the engine.
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Received lines, echoed back to the host by the serial TX task
pub static ECHO_CHANNEL: Channel<CriticalSectionRawMutex, Line, ECHO_CHANNEL_SIZE> =
    Channel::new();
