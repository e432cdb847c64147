//! The two console operations compiled programs rely on.
//!
//! Both are stateless: every call writes/reads through the `RuntimeIo` it is given
//! and keeps nothing between calls.

use std::io::{self, Write};

use crate::{error::ReadResult, io_utils::RuntimeIo, scan};

pub use crate::error::ReadError;

/// Written before every input call, with no trailing newline
pub const INPUT_PROMPT: &str = "Input: ";
/// Written before every printed value
pub const OUTPUT_LABEL: &str = "Output: ";

/// Decides what an input call returns when no integer could be scanned
pub trait InputFailure {
    fn recover(err: &ReadError) -> Option<i64>;
}

/// Never recover: the `ReadError` goes back to the caller.
///
/// The default `InputFailure` when not specified
pub struct FailReport;

impl InputFailure for FailReport {
    #[inline]
    fn recover(_: &ReadError) -> Option<i64> {
        None
    }
}

/// On any input failure, continue as if `N` had been read
pub struct FailEmit<const N: i64>;

impl<const N: i64> InputFailure for FailEmit<N> {
    #[inline]
    fn recover(_: &ReadError) -> Option<i64> {
        Some(N)
    }
}

/// Writes the input prompt and flushes it, so it is visible before any blocking read
pub fn prompt(out: &mut impl Write) -> io::Result<()> {
    out.write_all(INPUT_PROMPT.as_bytes())?;
    out.flush()
}

/// Prompts on `io`'s stdout, then scans exactly one integer from its stdin.
///
/// A failed prompt does not stop the scan: output failures are never reported by input calls
pub fn read_integer<IO: RuntimeIo>(io: &mut IO) -> ReadResult<i64> {
    let _ = prompt(io);

    match scan::scan_i64(io) {
        Ok(v) => Ok(v),
        Err(err) => <IO::Failure as InputFailure>::recover(&err).ok_or(err),
    }
}

/// Writes `Output: <x>\n`. Flushing is left to the stream's own buffering
pub fn print_integer(out: &mut impl Write, x: i64) -> io::Result<()> {
    writeln!(out, "{OUTPUT_LABEL}{x}")
}
