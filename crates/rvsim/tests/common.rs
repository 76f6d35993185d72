#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rvsim::{RunReport, SimConfig, Simulator};
use rvsim_isa::asm;

/// Run `words` against `data` for `cycles` cycles, capturing character output.
pub fn run(words: &[u32], data: &[u8], cycles: u64) -> (RunReport, Vec<u8>) {
    let config = SimConfig::default()
        .with_cycles(cycles)
        .with_data_memory_size(0x1_0000);
    run_with(words, data, config).expect("run failed")
}

pub fn run_with(
    words: &[u32],
    data: &[u8],
    config: SimConfig,
) -> rvsim::Result<(RunReport, Vec<u8>)> {
    let mut sim = Simulator::new(asm::assemble(words), data, config, Vec::new())?;
    let report = sim.run()?;
    let (_, out) = sim.finish();
    Ok((report, out))
}

/// Write program and data images into `dir`.
pub fn write_images(dir: &Path, words: &[u32], data: &[u8]) -> (PathBuf, PathBuf) {
    let program = dir.join("program.bin");
    let data_path = dir.join("data.bin");
    std::fs::write(&program, asm::assemble(words)).expect("write program");
    std::fs::write(&data_path, data).expect("write data");
    (program, data_path)
}

/// Print the NUL-terminated string at data address 0, then spin.
pub fn hello_program() -> Vec<u32> {
    vec![
        asm::addi(5, 0, 0),   // 0x00: t0 = 0
        asm::lui(7, 0x5),     // 0x04: t2 = 0x5000
        asm::lbu(6, 5, 0),    // 0x08: t1 = data[t0]
        asm::beq(6, 0, 16),   // 0x0c: done
        asm::sb(6, 7, 0),     // 0x10: putchar
        asm::addi(5, 5, 1),   // 0x14
        asm::jal(0, -16),     // 0x18: loop
        asm::jal(0, 0),       // 0x1c: spin
    ]
}

/// Iterative fibonacci of `n` in a subroutine; the result lands in a0.
pub fn fib_program(n: i32) -> Vec<u32> {
    vec![
        asm::addi(10, 0, n),  // 0x00: a0 = n
        asm::jal(1, 8),       // 0x04: call fib
        asm::jal(0, 0),       // 0x08: spin
        asm::addi(11, 0, 0),  // 0x0c: fib: a1 = 0
        asm::addi(12, 0, 1),  // 0x10: a2 = 1
        asm::beq(10, 0, 24),  // 0x14: loop: a0 == 0 -> ret
        asm::add(13, 11, 12), // 0x18
        asm::addi(11, 12, 0), // 0x1c
        asm::addi(12, 13, 0), // 0x20
        asm::addi(10, 10, -1), // 0x24
        asm::jal(0, -20),     // 0x28: loop
        asm::addi(10, 11, 0), // 0x2c: ret: a0 = a1
        asm::jalr(0, 1, 0),   // 0x30
    ]
}
