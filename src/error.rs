//! Runtime error types

use std::io;

use thiserror::Error;

/// Why an input call failed to produce an integer
#[derive(Debug, Error)]
pub enum ReadError {
    /// The stream ended before any non-whitespace byte arrived
    #[error("end of input stream")]
    EndOfStream,

    /// The next token is not an integer
    #[error("malformed integer input: {}", describe_found(.found))]
    Malformed { found: Option<u8> },

    /// The token is an integer but does not fit in 64 signed bits
    #[error("integer input out of range for i64")]
    OutOfRange,

    /// The console stream itself failed
    #[error("console i/o error: {0}")]
    Io(#[from] io::Error),
}

impl ReadError {
    #[cfg(test)]
    pub(crate) fn is_end_of_stream(&self) -> bool {
        matches!(self, ReadError::EndOfStream)
    }
}

fn describe_found(found: &Option<u8>) -> String {
    match found {
        Some(b) if b.is_ascii_graphic() => format!("unexpected {:?}", *b as char),
        Some(b) => format!("unexpected byte 0x{b:02X}"),
        None => "stream ended mid-token".to_string(),
    }
}

pub type ReadResult<T> = Result<T, ReadError>;
