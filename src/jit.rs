//! Compiles straight-line probe programs that call the runtime through its C ABI
//!

use std::mem;

use anyhow::Context;
use cranelift::{
    codegen::{ir::types::I64, verify_function},
    prelude::*,
};
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{default_libcall_names, Linkage, Module};
use target_lexicon::Triple;

use crate::ffi::{self, INPUT_SYMBOL, PRINT_SYMBOL};

/// One step of a probe program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOp {
    /// Read a value, then print it back
    Echo,
    /// Print a constant
    Emit(i64),
    /// Read `n` values and print their (wrapping) sum
    Sum(u32),
}

/// The functions bound to the runtime's symbol names when linking a probe
#[derive(Debug, Clone, Copy)]
pub struct HostSymbols {
    pub input: extern "C" fn() -> i64,
    pub print: extern "C" fn(i64),
}

impl Default for HostSymbols {
    fn default() -> Self {
        Self {
            input: ffi::tiny_input,
            print: ffi::tiny_print,
        }
    }
}

/// A finalized probe. The module owns the code `entry` points into
pub struct CompiledProbe {
    _module: JITModule,
    entry: extern "C" fn(),
}

impl CompiledProbe {
    pub fn run(&self) {
        (self.entry)()
    }
}

/// Builds, verifies and JIT-compiles `ops` for the host, linking the runtime symbols to `host`
pub fn compile(ops: &[ProbeOp], host: HostSymbols) -> anyhow::Result<CompiledProbe> {
    let mut flag_builder = settings::builder();
    flag_builder.set("use_colocated_libcalls", "false")?;
    flag_builder.set("is_pic", "false")?;
    let flags = settings::Flags::new(flag_builder);

    let isa = isa::lookup(Triple::host())
        .context("host ISA is not supported by cranelift")?
        .finish(flags.clone())?;

    let mut jit_builder = JITBuilder::with_isa(isa, default_libcall_names());
    jit_builder.symbol(INPUT_SYMBOL, host.input as *const u8);
    jit_builder.symbol(PRINT_SYMBOL, host.print as *const u8);
    let mut module = JITModule::new(jit_builder);

    let mut input_sig = module.make_signature();
    input_sig.returns.push(AbiParam::new(I64));
    let input_id = module.declare_function(INPUT_SYMBOL, Linkage::Import, &input_sig)?;

    let mut print_sig = module.make_signature();
    print_sig.params.push(AbiParam::new(I64));
    let print_id = module.declare_function(PRINT_SYMBOL, Linkage::Import, &print_sig)?;

    // The probe entrypoint has no arguments or returns
    let main_sig = module.make_signature();
    let main_id = module.declare_function("probe_main", Linkage::Local, &main_sig)?;

    let mut ctx = module.make_context();
    ctx.func.signature = main_sig;

    let mut func_builder_ctx = FunctionBuilderContext::new();
    {
        let mut builder = FunctionBuilder::new(&mut ctx.func, &mut func_builder_ctx);
        let input = module.declare_func_in_func(input_id, builder.func);
        let print = module.declare_func_in_func(print_id, builder.func);

        let main_block = builder.create_block();
        builder.switch_to_block(main_block);

        for op in ops {
            match *op {
                ProbeOp::Echo => {
                    let call = builder.ins().call(input, &[]);
                    let v = builder.inst_results(call)[0];
                    builder.ins().call(print, &[v]);
                }
                ProbeOp::Emit(x) => {
                    let v = builder.ins().iconst(I64, x);
                    builder.ins().call(print, &[v]);
                }
                ProbeOp::Sum(n) => {
                    let mut acc = builder.ins().iconst(I64, 0);
                    for _ in 0..n {
                        let call = builder.ins().call(input, &[]);
                        let v = builder.inst_results(call)[0];
                        acc = builder.ins().iadd(acc, v);
                    }
                    builder.ins().call(print, &[acc]);
                }
            }
        }

        builder.ins().return_(&[]);
        builder.seal_all_blocks();
        builder.finalize();
    }

    verify_function(&ctx.func, &flags)
        .map_err(|errs| anyhow::anyhow!("probe failed verification: {errs}"))?;

    module.define_function(main_id, &mut ctx)?;
    module.clear_context(&mut ctx);
    module.finalize_definitions()?;

    let f_ptr = module.get_finalized_function(main_id);
    let entry = unsafe { mem::transmute::<*const u8, extern "C" fn()>(f_ptr) };

    Ok(CompiledProbe {
        _module: module,
        entry,
    })
}
