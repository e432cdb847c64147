//! Formatted scan of a single `i64` token.
//!
//! Mirrors the `%i` conversion of the platform's formatted-scan facility:
//! leading whitespace is skipped, an optional sign is accepted, and the radix is
//! picked from the prefix (`0x`/`0X` hex, `0` octal, decimal otherwise).
//!
//! Bytes are only consumed once they are accepted as part of the token, so
//! whatever follows the integer stays buffered in the reader for the next call.

use std::io::{self, BufRead};

use crate::error::{ReadError, ReadResult};

/// Looks at the next byte without consuming it
fn peek_byte(r: &mut impl BufRead) -> io::Result<Option<u8>> {
    loop {
        match r.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Same as C `isspace` in the "C" locale
fn is_scan_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

fn skip_whitespace(r: &mut impl BufRead) -> io::Result<Option<u8>> {
    loop {
        match peek_byte(r)? {
            Some(b) if is_scan_space(b) => r.consume(1),
            other => return Ok(other),
        }
    }
}

/// Consumes digits of `radix` into `acc`.
///
/// Overflow is latched in `overflow` rather than stopping early, so the whole
/// token leaves the stream either way.
fn take_digits(
    r: &mut impl BufRead,
    radix: u32,
    acc: &mut u64,
    overflow: &mut bool,
) -> io::Result<()> {
    while let Some(d) = peek_byte(r)?.and_then(|b| (b as char).to_digit(radix)) {
        r.consume(1);
        match acc
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(d)))
        {
            Some(v) => *acc = v,
            None => *overflow = true,
        }
    }
    Ok(())
}

/// Scans one signed 64-bit integer from `r`
pub fn scan_i64(r: &mut impl BufRead) -> ReadResult<i64> {
    let Some(first) = skip_whitespace(r)? else {
        return Err(ReadError::EndOfStream);
    };

    let negative = first == b'-';
    if matches!(first, b'-' | b'+') {
        r.consume(1);
    }

    let mut magnitude = 0u64;
    let mut overflow = false;

    match peek_byte(r)? {
        Some(b'0') => {
            r.consume(1);
            if matches!(peek_byte(r)?, Some(b'x' | b'X')) {
                r.consume(1);
                // `0x` with no hex digits after it still scans as zero
                take_digits(r, 16, &mut magnitude, &mut overflow)?;
            } else {
                take_digits(r, 8, &mut magnitude, &mut overflow)?;
            }
        }
        Some(b) if b.is_ascii_digit() => {
            take_digits(r, 10, &mut magnitude, &mut overflow)?;
        }
        found => return Err(ReadError::Malformed { found }),
    }

    if overflow {
        return Err(ReadError::OutOfRange);
    }

    if negative {
        // i64::MIN has no positive counterpart, so its magnitude is allowed here
        if magnitude > i64::MIN.unsigned_abs() {
            return Err(ReadError::OutOfRange);
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| ReadError::OutOfRange)
    }
}
