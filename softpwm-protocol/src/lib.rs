//! Serial command protocol
//!
//! Commands arrive as short ASCII lines of comma-separated integers:
//!
//! ```text
//! <field>,<field>,...\n
//! ```
//!
//! There is no other framing. A line is at most [`MAX_LINE_LEN`] bytes and
//! carries at most [`MAX_FIELDS`] fields. Two line shapes are understood:
//!
//! | Fields | Meaning |
//! |---|---|
//! | `channel,duty_ticks` | Raw duty update for one PWM channel |
//! | `tool_id,status,direction,speed` | Tool command as sent by the host SDK |
//!
//! [`apply_command`] turns a decoded command into engine calls.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod dispatch;
pub mod fields;
pub mod line;

pub use commands::{Command, CommandError, Direction, DutyCommand, ToolCommand};
pub use dispatch::apply_command;
pub use fields::{fields, parse_payload, Fields, Payload, FIELD_SEPARATOR, MAX_FIELDS};
pub use line::{Line, LineError, LineReceiver, Lines, LINE_END, MAX_LINE_LEN};
