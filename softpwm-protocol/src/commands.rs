//! Command decoding
//!
//! Maps the integer fields of a line to a typed command. Which command a
//! line carries is decided by its field count.

use crate::fields::{parse_payload, Payload};
use crate::line::LineError;

/// Errors that can occur while decoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line could not be tokenized
    Line(LineError),
    /// No command has this many fields
    UnexpectedFieldCount(usize),
    /// A field is outside the range allowed for its position
    ValueOutOfRange,
}

impl From<LineError> for CommandError {
    fn from(err: LineError) -> Self {
        CommandError::Line(err)
    }
}

/// Rotation direction of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl TryFrom<i32> for Direction {
    type Error = CommandError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Forward),
            1 => Ok(Direction::Reverse),
            _ => Err(CommandError::ValueOutOfRange),
        }
    }
}

/// Raw duty update: `channel,duty_ticks`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCommand {
    /// PWM channel index (0-based)
    pub channel: usize,
    /// Duty threshold in ticks; the engine clamps it to its ceiling
    pub duty_ticks: u16,
}

impl DutyCommand {
    /// Decode from exactly two fields
    pub fn from_fields(fields: &[i32]) -> Result<Self, CommandError> {
        let [channel, duty_ticks] = fields else {
            return Err(CommandError::UnexpectedFieldCount(fields.len()));
        };

        Ok(Self {
            channel: usize::try_from(*channel).map_err(|_| CommandError::ValueOutOfRange)?,
            duty_ticks: u16::try_from(*duty_ticks).map_err(|_| CommandError::ValueOutOfRange)?,
        })
    }
}

/// Tool command: `tool_id,status,direction,speed`
///
/// This is the line the host SDK sends for each tool. Tool ids start at 1
/// and map to PWM channels in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToolCommand {
    /// Tool identifier (1-based)
    pub tool_id: u8,
    /// Status field: 1 = on, 0 = off
    pub enabled: bool,
    /// Requested direction
    pub direction: Direction,
    /// Speed, 0-100%
    pub speed_percent: u8,
}

impl ToolCommand {
    /// Decode from exactly four fields
    pub fn from_fields(fields: &[i32]) -> Result<Self, CommandError> {
        let [tool_id, status, direction, speed] = fields else {
            return Err(CommandError::UnexpectedFieldCount(fields.len()));
        };

        let tool_id = u8::try_from(*tool_id)
            .ok()
            .filter(|&id| id > 0)
            .ok_or(CommandError::ValueOutOfRange)?;
        let enabled = match status {
            0 => false,
            1 => true,
            _ => return Err(CommandError::ValueOutOfRange),
        };
        let speed_percent = u8::try_from(*speed)
            .ok()
            .filter(|&s| s <= 100)
            .ok_or(CommandError::ValueOutOfRange)?;

        Ok(Self {
            tool_id,
            enabled,
            direction: Direction::try_from(*direction)?,
            speed_percent,
        })
    }

    /// PWM channel driven by this tool
    ///
    /// A hand-built command with tool id 0 maps to channel 0.
    pub fn channel_index(&self) -> usize {
        usize::from(self.tool_id).saturating_sub(1)
    }

    /// Duty to apply, in percent (0 when the tool is switched off)
    pub fn duty_percent(&self) -> u8 {
        if self.enabled {
            self.speed_percent
        } else {
            0
        }
    }
}

/// Any decoded command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Duty(DutyCommand),
    Tool(ToolCommand),
}

impl Command {
    /// Decode a received line
    pub fn parse(line: &[u8]) -> Result<Self, CommandError> {
        let payload: Payload = parse_payload(line)?;
        Self::from_fields(&payload)
    }

    /// Decode already-tokenized fields
    pub fn from_fields(fields: &[i32]) -> Result<Self, CommandError> {
        match fields.len() {
            2 => DutyCommand::from_fields(fields).map(Command::Duty),
            4 => ToolCommand::from_fields(fields).map(Command::Tool),
            n => Err(CommandError::UnexpectedFieldCount(n)),
        }
    }

    /// PWM channel this command addresses
    pub fn channel_index(&self) -> usize {
        match self {
            Command::Duty(cmd) => cmd.channel,
            Command::Tool(cmd) => cmd.channel_index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_command() {
        let cmd = Command::parse(b"1,200").unwrap();
        assert_eq!(
            cmd,
            Command::Duty(DutyCommand {
                channel: 1,
                duty_ticks: 200
            })
        );
        assert_eq!(cmd.channel_index(), 1);
    }

    #[test]
    fn test_duty_command_out_of_range() {
        assert_eq!(
            Command::parse(b"-1,200"),
            Err(CommandError::ValueOutOfRange)
        );
        assert_eq!(
            Command::parse(b"0,70000"),
            Err(CommandError::ValueOutOfRange)
        );
    }

    #[test]
    fn test_tool_command_from_sdk_line() {
        // "{id},{status},{direction},{speed}\n" as sent by the host
        let cmd = Command::parse(b"2,1,1,75").unwrap();
        let Command::Tool(tool) = cmd else {
            panic!("expected tool command, got {:?}", cmd);
        };

        assert_eq!(tool.tool_id, 2);
        assert!(tool.enabled);
        assert_eq!(tool.direction, Direction::Reverse);
        assert_eq!(tool.speed_percent, 75);
        assert_eq!(tool.channel_index(), 1);
        assert_eq!(tool.duty_percent(), 75);
    }

    #[test]
    fn test_disabled_tool_has_zero_duty() {
        let tool = ToolCommand::from_fields(&[1, 0, 0, 100]).unwrap();
        assert!(!tool.enabled);
        assert_eq!(tool.duty_percent(), 0);
        assert_eq!(tool.channel_index(), 0);
    }

    #[test]
    fn test_channel_index_of_tool_zero() {
        let tool = ToolCommand {
            tool_id: 0,
            enabled: true,
            direction: Direction::Forward,
            speed_percent: 10,
        };
        assert_eq!(tool.channel_index(), 0);

        let last = ToolCommand { tool_id: 255, ..tool };
        assert_eq!(last.channel_index(), 254);
    }

    #[test]
    fn test_tool_command_validation() {
        // Tool ids start at 1
        assert_eq!(
            ToolCommand::from_fields(&[0, 1, 0, 50]),
            Err(CommandError::ValueOutOfRange)
        );
        // Status is 0 or 1
        assert_eq!(
            ToolCommand::from_fields(&[1, 2, 0, 50]),
            Err(CommandError::ValueOutOfRange)
        );
        // Direction is 0 or 1
        assert_eq!(
            ToolCommand::from_fields(&[1, 1, 3, 50]),
            Err(CommandError::ValueOutOfRange)
        );
        // Speed is a percentage
        assert_eq!(
            ToolCommand::from_fields(&[1, 1, 0, 101]),
            Err(CommandError::ValueOutOfRange)
        );
        assert_eq!(
            ToolCommand::from_fields(&[1, 1, 0]),
            Err(CommandError::UnexpectedFieldCount(3))
        );
    }

    #[test]
    fn test_unexpected_field_counts() {
        assert_eq!(
            Command::parse(b"7"),
            Err(CommandError::UnexpectedFieldCount(1))
        );
        assert_eq!(
            Command::parse(b"1,2,3"),
            Err(CommandError::UnexpectedFieldCount(3))
        );
        assert_eq!(
            Command::parse(b""),
            Err(CommandError::UnexpectedFieldCount(0))
        );
    }

    #[test]
    fn test_line_errors_propagate() {
        assert_eq!(
            Command::parse(b"1,2,3,4,5"),
            Err(CommandError::Line(LineError::TooManyFields))
        );
        assert_eq!(
            Command::parse(b"1,on"),
            Err(CommandError::Line(LineError::InvalidField))
        );
    }
}
