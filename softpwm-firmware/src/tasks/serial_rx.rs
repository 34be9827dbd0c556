//! Serial receive task
//!
//! Assembles command lines from UART0, forwards decoded commands to the
//! PWM task and queues each line for echo.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use softpwm_protocol::{Command, LineReceiver};

use crate::channels::{COMMAND_CHANNEL, ECHO_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Serial RX task - receives lines and decodes commands
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut receiver: LineReceiver = LineReceiver::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for result in receiver.feed_bytes(&buf[..n]) {
                    match result {
                        Ok(line) => {
                            debug!("Line: {=[u8]:a}", &line[..]);
                            handle_line(&line);
                            if ECHO_CHANNEL.try_send(line).is_err() {
                                warn!("Echo channel full, dropping echo");
                            }
                        }
                        Err(e) => {
                            warn!("Line dropped: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Decode one line and queue the command
fn handle_line(line: &[u8]) {
    // Blank lines are keep-alives from some terminals
    if line.iter().all(u8::is_ascii_whitespace) {
        return;
    }

    match Command::parse(line) {
        Ok(cmd) => {
            debug!("Command: {:?}", cmd);
            if COMMAND_CHANNEL.try_send(cmd).is_err() {
                warn!("Command channel full, dropping command");
            }
        }
        Err(e) => {
            warn!("Failed to parse command: {:?}", e);
        }
    }
}
