//!
//! The C ABI that generated code links against:
//! * `tiny_input` reads one integer, exiting the process if none can be read
//! * `tiny_print` prints one integer
//! * `tiny_input_checked` reads one integer and reports failures as an `InputStatus`
//!
//! Nothing here may panic, since unwinding out of an `extern "C"` function aborts.
//!

use std::{
    io::{self, Write},
    process,
};

use crate::{
    error::ReadError,
    io_utils::{self, RuntimeIo},
    runtime,
};

pub const INPUT_SYMBOL: &str = "tiny_input";
pub const PRINT_SYMBOL: &str = "tiny_print";

/// Exit status used when `tiny_input` cannot produce an integer
pub const INPUT_FAILURE_EXIT_CODE: i32 = 1;

/// Outcome of `tiny_input_checked`, as seen from C
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStatus {
    Ok = 0,
    EndOfStream = 1,
    Malformed = 2,
    OutOfRange = 3,
    Io = 4,
}

impl From<&ReadError> for InputStatus {
    fn from(err: &ReadError) -> Self {
        match err {
            ReadError::EndOfStream => InputStatus::EndOfStream,
            ReadError::Malformed { .. } => InputStatus::Malformed,
            ReadError::OutOfRange => InputStatus::OutOfRange,
            ReadError::Io(_) => InputStatus::Io,
        }
    }
}

#[no_mangle]
pub extern "C" fn tiny_input() -> i64 {
    let mut io = io_utils::stdio_triple();
    match runtime::read_integer(&mut io) {
        Ok(v) => v,
        Err(err) => {
            let _ = io.flush();
            let _ = writeln!(io.stderr(), "tinyc runtime: {err}");
            process::exit(INPUT_FAILURE_EXIT_CODE)
        }
    }
}

#[no_mangle]
pub extern "C" fn tiny_print(x: i64) {
    print_unchecked(&mut io::stdout(), x)
}

/// Output failures are not part of the contract, so they stop here
pub(crate) fn print_unchecked(out: &mut impl Write, x: i64) {
    let _ = runtime::print_integer(out, x);
}

/// Reads one integer into `*out`. On failure `*out` is left untouched.
///
/// # Safety
/// `out` must be null or valid for a write of one `i64`
#[no_mangle]
pub unsafe extern "C" fn tiny_input_checked(out: *mut i64) -> InputStatus {
    checked_read(&mut io_utils::stdio_triple(), out.as_mut())
}

pub(crate) fn checked_read(io: &mut impl RuntimeIo, out: Option<&mut i64>) -> InputStatus {
    match runtime::read_integer(io) {
        Ok(v) => {
            if let Some(slot) = out {
                *slot = v;
            }
            InputStatus::Ok
        }
        Err(err) => InputStatus::from(&err),
    }
}
