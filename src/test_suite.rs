use std::{
    cell::RefCell,
    io::{sink, Cursor},
    process,
};

use crate::{
    io_utils::{self, RuntimeIo},
    jit::{self, CompiledProbe, HostSymbols, ProbeOp},
    runtime::{self, FailEmit},
};

/// Console buffers the test host functions read from and write to.
///
/// JIT code runs on the test's own thread, so a thread local keeps tests apart
#[derive(Default)]
struct Console {
    stdin: Cursor<Vec<u8>>,
    stdout: Vec<u8>,
}

thread_local! {
    static CONSOLE: RefCell<Console> = RefCell::new(Console::default());
}

/// `tiny_input` stand-in: failures read as `0` through `FailEmit<0>`.
///
/// If the policy ever lets an error through, abort instead of unwinding into JIT code
extern "C" fn captured_input() -> i64 {
    CONSOLE.with(|c| {
        let mut console = c.borrow_mut();
        let Console { stdin, stdout } = &mut *console;
        let mut io = io_utils::io_triple(stdin, stdout, sink()).with_failure::<FailEmit<0>>();
        match runtime::read_integer(&mut io) {
            Ok(v) => v,
            Err(err) => {
                eprintln!("FailEmit<0> let an input error through: {err}");
                process::abort()
            }
        }
    })
}

extern "C" fn captured_print(x: i64) {
    CONSOLE.with(|c| {
        let _ = runtime::print_integer(&mut c.borrow_mut().stdout, x);
    })
}

fn captured_host() -> HostSymbols {
    HostSymbols {
        input: captured_input,
        print: captured_print,
    }
}

pub struct TestCase {
    pub probe: Vec<ProbeOp>,
    pub input: Vec<u8>,
    pub desired_out: Vec<u8>,
}

impl TestCase {
    #[track_caller]
    pub fn test(&self) {
        let probe: CompiledProbe = jit::compile(&self.probe, captured_host()).unwrap();

        CONSOLE.with(|c| {
            *c.borrow_mut() = Console {
                stdin: Cursor::new(self.input.clone()),
                stdout: Vec::new(),
            }
        });

        probe.run();

        let stdout = CONSOLE.with(|c| std::mem::take(&mut c.borrow_mut().stdout));
        assert_eq!(
            String::from_utf8_lossy(&self.desired_out),
            String::from_utf8_lossy(&stdout),
            "Desired output (left) was not emitted by this test (right)"
        );
    }
}

#[test]
fn echo_positive() {
    TestCase {
        probe: vec![ProbeOp::Echo],
        input: b"42\n".to_vec(),
        desired_out: b"Input: Output: 42\n".to_vec(),
    }
    .test()
}

#[test]
fn echo_negative() {
    TestCase {
        probe: vec![ProbeOp::Echo],
        input: b"-7\n".to_vec(),
        desired_out: b"Input: Output: -7\n".to_vec(),
    }
    .test()
}

#[test]
fn emit_extremes() {
    TestCase {
        probe: vec![
            ProbeOp::Emit(0),
            ProbeOp::Emit(-1),
            ProbeOp::Emit(i64::MAX),
            ProbeOp::Emit(i64::MIN),
        ],
        input: vec![],
        desired_out: b"Output: 0\n\
            Output: -1\n\
            Output: 9223372036854775807\n\
            Output: -9223372036854775808\n"
            .to_vec(),
    }
    .test()
}

#[test]
fn echo_extremes_round_trip() {
    TestCase {
        probe: vec![ProbeOp::Echo, ProbeOp::Echo],
        input: b"9223372036854775807 -9223372036854775808".to_vec(),
        desired_out: b"Input: Output: 9223372036854775807\n\
            Input: Output: -9223372036854775808\n"
            .to_vec(),
    }
    .test()
}

#[test]
fn sum_reads_every_value() {
    TestCase {
        probe: vec![ProbeOp::Sum(3), ProbeOp::Sum(0)],
        input: b"1\n0x10\n-017\n".to_vec(),
        desired_out: b"Input: Input: Input: Output: 2\nOutput: 0\n".to_vec(),
    }
    .test()
}

#[test]
fn sum_wraps() {
    TestCase {
        probe: vec![ProbeOp::Sum(2)],
        input: b"9223372036854775807 1".to_vec(),
        desired_out: b"Input: Input: Output: -9223372036854775808\n".to_vec(),
    }
    .test()
}

#[test]
fn exhausted_input_under_emit_policy() {
    TestCase {
        probe: vec![ProbeOp::Echo, ProbeOp::Echo],
        input: b"5".to_vec(),
        desired_out: b"Input: Output: 5\nInput: Output: 0\n".to_vec(),
    }
    .test()
}

#[test]
fn empty_probe_prints_nothing() {
    TestCase {
        probe: vec![],
        input: b"1".to_vec(),
        desired_out: vec![],
    }
    .test()
}
