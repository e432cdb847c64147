pub mod error;
pub mod ffi;
pub mod io_utils;
#[cfg(any(test, feature = "jit"))]
pub mod jit;
pub mod runtime;
mod scan;
#[cfg(test)]
pub mod test_suite;

pub use error::ReadError;
pub use ffi::{tiny_input, tiny_input_checked, tiny_print, InputStatus};
pub use runtime::{print_integer, read_integer};
