use tinyc_runtime::jit::{self, HostSymbols, ProbeOp};

/// Runs a single echo against the real console: prompt, read one integer, print it
fn main() -> anyhow::Result<()> {
    let probe = jit::compile(&[ProbeOp::Echo], HostSymbols::default())?;
    probe.run();
    Ok(())
}
