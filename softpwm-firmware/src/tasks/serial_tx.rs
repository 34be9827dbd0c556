//! Serial transmit task
//!
//! Echoes every received line back to the host.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::ECHO_CHANNEL;

/// Serial TX task - writes echoed lines to UART0
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let line = ECHO_CHANNEL.receive().await;

        if let Err(e) = write_line(&mut tx, &line).await {
            warn!("Failed to echo line: {:?}", e);
        } else {
            trace!("Echoed {} bytes", line.len());
        }
    }
}

async fn write_line(tx: &mut BufferedUartTx, line: &[u8]) -> Result<(), embassy_rp::uart::Error> {
    tx.write_all(line).await?;
    tx.write_all(b"\r\n").await
}
