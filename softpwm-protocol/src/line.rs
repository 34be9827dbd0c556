//! Newline-terminated line receiver
//!
//! Bytes are fed one at a time as they come off the UART. A line ends at
//! `\n`; carriage returns are dropped so `\r\n` terminals work too.
//!
//! A line that does not fit the buffer is reported once with
//! [`LineError::InputOverflow`] at the first byte that does not fit. The rest
//! of it is discarded up to and including its `\n`, and the following line is
//! received normally.

use heapless::Vec;

/// Line terminator
pub const LINE_END: u8 = b'\n';

/// Default maximum line length in bytes (terminator excluded)
pub const MAX_LINE_LEN: usize = 32;

/// A received line, without terminator
pub type Line<const N: usize = MAX_LINE_LEN> = Vec<u8, N>;

/// Errors that can occur while receiving or tokenizing a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the receive buffer
    InputOverflow,
    /// Field is not a decimal integer
    InvalidField,
    /// Line has more fields than the payload can hold
    TooManyFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RxState {
    /// Collecting bytes of the current line
    Receiving,
    /// Current line overflowed; dropping bytes until the terminator
    Discarding,
}

/// Receiver assembling bytes into lines of at most `N` bytes
#[derive(Debug, Clone)]
pub struct LineReceiver<const N: usize = MAX_LINE_LEN> {
    buffer: Vec<u8, N>,
    state: RxState,
}

impl<const N: usize> Default for LineReceiver<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReceiver<N> {
    /// Create an empty receiver
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: RxState::Receiving,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = RxState::Receiving;
    }

    /// Bytes of the line received so far
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line,
    /// `Ok(None)` when more bytes are needed, or `Err` on overflow.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line<N>>, LineError> {
        match (self.state, byte) {
            (RxState::Discarding, LINE_END) => {
                self.reset();
                Ok(None)
            }
            (RxState::Discarding, _) => Ok(None),
            (RxState::Receiving, LINE_END) => {
                let line = core::mem::take(&mut self.buffer);
                Ok(Some(line))
            }
            (RxState::Receiving, b'\r') => Ok(None),
            (RxState::Receiving, _) => {
                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.state = RxState::Discarding;
                    return Err(LineError::InputOverflow);
                }
                Ok(None)
            }
        }
    }

    /// Feed a slice of bytes, yielding every line or error it completes
    ///
    /// A partial line at the end stays buffered for the next call. Bytes
    /// after the last yielded item are not fed if the iterator is dropped
    /// early.
    pub fn feed_bytes<'a>(&'a mut self, bytes: &'a [u8]) -> Lines<'a, N> {
        Lines {
            receiver: self,
            bytes: bytes.iter(),
        }
    }
}

/// Iterator returned by [`LineReceiver::feed_bytes`]
pub struct Lines<'a, const N: usize> {
    receiver: &'a mut LineReceiver<N>,
    bytes: core::slice::Iter<'a, u8>,
}

impl<const N: usize> Iterator for Lines<'_, N> {
    type Item = Result<Line<N>, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        for &byte in self.bytes.by_ref() {
            match self.receiver.feed(byte) {
                Ok(None) => {}
                Ok(Some(line)) => return Some(Ok(line)),
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
