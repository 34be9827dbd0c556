//! Software PWM firmware
//!
//! Drives PWM on plain GPIO pins of an RP2040 board. Duty cycles are set
//! over UART0 with newline-terminated, comma-separated commands; each
//! received line is echoed back.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level as GpioLevel, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use softpwm_core::SoftPwm;

use crate::board::{DIRECTION_PINS, PWM_CHANNELS, PWM_PINS};
use crate::tasks::{DirectionBank, OutputBank};

mod board;
mod channels;
mod clock;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("softpwm firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Pin assignments are board-specific, see board.rs
    let pwm_outputs: [Output<'static>; PWM_CHANNELS] = [
        Output::new(p.PIN_2, GpioLevel::Low),
        Output::new(p.PIN_3, GpioLevel::Low),
        Output::new(p.PIN_4, GpioLevel::Low),
        Output::new(p.PIN_5, GpioLevel::Low),
    ];
    let direction_outputs: [Output<'static>; PWM_CHANNELS] = [
        Output::new(p.PIN_6, GpioLevel::Low),
        Output::new(p.PIN_7, GpioLevel::Low),
        Output::new(p.PIN_8, GpioLevel::Low),
        Output::new(p.PIN_9, GpioLevel::Low),
    ];

    let mut outputs = OutputBank::new();
    for (&id, pin) in PWM_PINS.iter().zip(pwm_outputs) {
        unwrap!(outputs.add(id, pin));
    }

    let mut direction = DirectionBank::new();
    for (&id, pin) in DIRECTION_PINS.iter().zip(direction_outputs) {
        unwrap!(direction.add(id, pin));
    }

    let pwm_config = config::pwm_config();
    info!(
        "PWM config: {} us/tick, ceiling {}, {} Hz, start {:?}",
        pwm_config.tick_interval_micros,
        pwm_config.tick_ceiling,
        pwm_config.frequency_hz(),
        pwm_config.start
    );
    let pwm = unwrap!(SoftPwm::new(pwm_config, &PWM_PINS, outputs));

    // UART0 on GPIO0 (TX) / GPIO1 (RX) for commands
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, config::uart_config());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config::BAUDRATE);

    spawner.spawn(tasks::pwm_task(pwm, direction)).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::serial_tx_task(tx)).unwrap();

    info!("All tasks spawned, firmware running");
}
