use std::{
    io::{self, sink, stderr, stdin, stdout, BufRead, Read, Write},
    marker::PhantomData,
};

use crate::runtime::{FailReport, InputFailure};

/// Creates a `RuntimeIo` implementer which uses the process console for `in`, `out`, and `err`
///
/// `stdin` stays locked until the returned value is dropped
pub fn stdio_triple() -> impl RuntimeIo {
    RuntimeStdio {
        stdin: stdin().lock(),
        stdout: stdout(),
        stderr: stderr(),
        _p: PhantomData::<FailReport>,
    }
}

pub fn io_triple<I: BufRead, O: Write, E: Write>(
    stdin: I,
    stdout: O,
    stderr: E,
) -> impl RuntimeIo<Stdin = I, Stdout = O, Stderr = E> {
    RuntimeStdio {
        stdin,
        stdout,
        stderr,
        _p: PhantomData::<FailReport>,
    }
}

/// * `stdin` is already at end of stream
/// * `stdout`/`stderr` route to a sink
pub fn void() -> impl RuntimeIo {
    io_triple(io::empty(), sink(), sink())
}

/// A bundle of std-`in/out/err` which the runtime reads integers from and writes them to
///
/// The `BufRead` impl reads from `stdin`
///
/// The `Write` impl writes to `stdout`
///
/// To get a `Write`r for `stderr`, call `RuntimeIo::stderr()`
///
/// `Failure` decides what an input call does when no integer could be scanned
pub trait RuntimeIo: BufRead + Write + priv_impl::PrivateImpl + Sized {
    type Stdin: BufRead;
    type Stdout: Write;
    type Stderr: Write;
    type Failure: InputFailure;

    fn stderr(&mut self) -> &mut Self::Stderr;

    fn with_failure<F: InputFailure>(self) -> impl RuntimeIo;
}

mod priv_impl {
    /// You cannot implement this trait outside this crate
    pub trait PrivateImpl {}
}

struct RuntimeStdio<I, O, E, F: InputFailure> {
    stdin: I,
    stdout: O,
    stderr: E,
    _p: PhantomData<F>,
}

impl<I, O, E, F: InputFailure> priv_impl::PrivateImpl for RuntimeStdio<I, O, E, F> {}

impl<I: Read, O, E, F: InputFailure> Read for RuntimeStdio<I, O, E, F> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stdin.read(buf)
    }
}

impl<I: BufRead, O, E, F: InputFailure> BufRead for RuntimeStdio<I, O, E, F> {
    #[inline]
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.stdin.fill_buf()
    }

    #[inline]
    fn consume(&mut self, amt: usize) {
        self.stdin.consume(amt)
    }
}

impl<I, O: Write, E, F: InputFailure> Write for RuntimeStdio<I, O, E, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl<I: BufRead, O: Write, E: Write, F: InputFailure> RuntimeIo for RuntimeStdio<I, O, E, F> {
    type Stdin = I;
    type Stdout = O;
    type Stderr = E;
    type Failure = F;

    fn stderr(&mut self) -> &mut Self::Stderr {
        &mut self.stderr
    }

    fn with_failure<U: InputFailure>(self) -> impl RuntimeIo {
        RuntimeStdio {
            stdin: self.stdin,
            stdout: self.stdout,
            stderr: self.stderr,
            _p: PhantomData::<U>,
        }
    }
}

/// A stdout whose reader has gone away: every write and flush fails
#[cfg(test)]
pub(crate) struct Closed;

#[cfg(test)]
impl Write for Closed {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::ErrorKind::BrokenPipe.into())
    }
}
