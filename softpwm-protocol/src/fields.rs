//! Comma-separated integer fields
//!
//! The tokenizer borrows the line and keeps no state beyond its position,
//! so it can be cloned or restarted freely.

use heapless::Vec;

use crate::line::LineError;

/// Field separator
pub const FIELD_SEPARATOR: u8 = b',';

/// Maximum number of fields per line
pub const MAX_FIELDS: usize = 4;

/// Parsed fields of one line
pub type Payload<const F: usize = MAX_FIELDS> = Vec<i32, F>;

fn is_separator(byte: &u8) -> bool {
    *byte == FIELD_SEPARATOR
}

/// Lazy iterator over the integer fields of a line
///
/// Empty fields (`1,,2`, a leading or trailing comma) are skipped.
/// Whitespace around a field is ignored.
#[derive(Clone)]
pub struct Fields<'a> {
    tokens: core::slice::Split<'a, u8, fn(&u8) -> bool>,
}

/// Tokenize `line` into integer fields
pub fn fields(line: &[u8]) -> Fields<'_> {
    Fields {
        tokens: line.split(is_separator as fn(&u8) -> bool),
    }
}

impl Iterator for Fields<'_> {
    type Item = Result<i32, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.tokens.next()?.trim_ascii();
            if token.is_empty() {
                continue;
            }
            return Some(parse_field(token));
        }
    }
}

fn parse_field(token: &[u8]) -> Result<i32, LineError> {
    core::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse::<i32>().ok())
        .ok_or(LineError::InvalidField)
}

/// Parse all fields of `line` into a payload of at most `F` values
///
/// Fails on the first invalid field, or with [`LineError::TooManyFields`]
/// if the line has more than `F` fields.
pub fn parse_payload<const F: usize>(line: &[u8]) -> Result<Payload<F>, LineError> {
    let mut payload = Vec::new();
    for field in fields(line) {
        payload
            .push(field?)
            .map_err(|_| LineError::TooManyFields)?;
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_fields() {
        let parsed: Payload = parse_payload(b"1,0,1,50").unwrap();
        assert_eq!(&parsed[..], &[1, 0, 1, 50]);
    }

    #[test]
    fn test_empty_fields_skipped() {
        let parsed: Payload = parse_payload(b",3,,250,").unwrap();
        assert_eq!(&parsed[..], &[3, 250]);

        let parsed: Payload = parse_payload(b"").unwrap();
        assert!(parsed.is_empty());

        let parsed: Payload = parse_payload(b",,,").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_whitespace_and_signs() {
        let parsed: Payload = parse_payload(b" 1 , -20,+7\t").unwrap();
        assert_eq!(&parsed[..], &[1, -20, 7]);
    }

    #[test]
    fn test_invalid_field() {
        assert_eq!(
            parse_payload::<4>(b"1,abc,3"),
            Err(LineError::InvalidField)
        );
        assert_eq!(parse_payload::<4>(b"1,2 3"), Err(LineError::InvalidField));
        assert_eq!(
            parse_payload::<4>(b"99999999999"),
            Err(LineError::InvalidField)
        );
    }

    #[test]
    fn test_too_many_fields() {
        assert_eq!(
            parse_payload::<4>(b"1,2,3,4,5"),
            Err(LineError::TooManyFields)
        );
        assert!(parse_payload::<5>(b"1,2,3,4,5").is_ok());
    }

    #[test]
    fn test_iterator_is_lazy_and_restartable() {
        let tokens = fields(b"5,x,7");
        let mut first = tokens.clone();

        assert_eq!(first.next(), Some(Ok(5)));
        assert_eq!(first.next(), Some(Err(LineError::InvalidField)));
        assert_eq!(first.next(), Some(Ok(7)));
        assert_eq!(first.next(), None);

        // The clone starts over from the beginning
        let valid: Payload<4> = tokens.filter_map(Result::ok).collect();
        assert_eq!(&valid[..], &[5, 7]);
    }
}
