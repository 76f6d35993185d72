//! Static disassembly of an instruction image.

use rvsim_isa::{INSTR_SIZE, decode_bytes};

/// One line per whole word: `addr: raw  disassembly`.
///
/// Words that do not decode are shown as `<unknown>`. Trailing bytes that do
/// not form a full word are ignored.
#[must_use]
pub fn disassemble(image: &[u8]) -> Vec<String> {
    image
        .chunks_exact(INSTR_SIZE as usize)
        .zip((0u32..).step_by(INSTR_SIZE as usize))
        .map(|(bytes, addr)| match decode_bytes(bytes) {
            Some(Ok(instr)) => format!("{addr:08x}: {:08x}  {instr}", instr.raw),
            Some(Err(err)) => format!("{addr:08x}: {:08x}  <unknown>", err.raw()),
            None => format!("{addr:08x}: <truncated>"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rvsim_isa::asm;

    use super::*;

    #[test]
    fn test_listing() {
        let mut image = asm::assemble(&[asm::addi(10, 10, -3), 0xFFFF_FFFF, asm::jal(1, 16)]);
        image.push(0x13);
        let lines = disassemble(&image);
        assert_eq!(
            lines,
            vec![
                "00000000: ffd50513  addi a0, a0, -3",
                "00000004: ffffffff  <unknown>",
                "00000008: 010000ef  jal ra, 16",
            ]
        );
    }
}
