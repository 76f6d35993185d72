//! Tiny RV32I assembler, one function per instruction.
//!
//! Operand order follows assembly syntax: `sw rs2, imm(rs1)` becomes
//! `sw(rs2, rs1, imm)`. Used to build programs for tests and demos.

use crate::{
    OPCODE_AUIPC, OPCODE_BRANCH, OPCODE_JAL, OPCODE_JALR, OPCODE_LOAD, OPCODE_LUI, OPCODE_OP,
    OPCODE_OP_IMM, OPCODE_STORE, encode_b, encode_i, encode_j, encode_r, encode_s, encode_u,
};

/// `lui rd, imm20`
#[must_use]
pub const fn lui(rd: u8, imm20: u32) -> u32 {
    encode_u(OPCODE_LUI, rd, (imm20 << 12) as i32)
}

/// `auipc rd, imm20`
#[must_use]
pub const fn auipc(rd: u8, imm20: u32) -> u32 {
    encode_u(OPCODE_AUIPC, rd, (imm20 << 12) as i32)
}

/// `jal rd, offset`
#[must_use]
pub const fn jal(rd: u8, offset: i32) -> u32 {
    encode_j(OPCODE_JAL, rd, offset)
}

/// `jalr rd, imm(rs1)`
#[must_use]
pub const fn jalr(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_JALR, 0, rd, rs1, imm)
}

/// `beq rs1, rs2, offset`
#[must_use]
pub const fn beq(rs1: u8, rs2: u8, offset: i32) -> u32 {
    encode_b(OPCODE_BRANCH, 0, rs1, rs2, offset)
}

/// `bne rs1, rs2, offset`
#[must_use]
pub const fn bne(rs1: u8, rs2: u8, offset: i32) -> u32 {
    encode_b(OPCODE_BRANCH, 1, rs1, rs2, offset)
}

/// `blt rs1, rs2, offset`
#[must_use]
pub const fn blt(rs1: u8, rs2: u8, offset: i32) -> u32 {
    encode_b(OPCODE_BRANCH, 4, rs1, rs2, offset)
}

/// `bge rs1, rs2, offset`
#[must_use]
pub const fn bge(rs1: u8, rs2: u8, offset: i32) -> u32 {
    encode_b(OPCODE_BRANCH, 5, rs1, rs2, offset)
}

/// `bltu rs1, rs2, offset`
#[must_use]
pub const fn bltu(rs1: u8, rs2: u8, offset: i32) -> u32 {
    encode_b(OPCODE_BRANCH, 6, rs1, rs2, offset)
}

/// `bgeu rs1, rs2, offset`
#[must_use]
pub const fn bgeu(rs1: u8, rs2: u8, offset: i32) -> u32 {
    encode_b(OPCODE_BRANCH, 7, rs1, rs2, offset)
}

/// `lb rd, imm(rs1)`
#[must_use]
pub const fn lb(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_LOAD, 0, rd, rs1, imm)
}

/// `lh rd, imm(rs1)`
#[must_use]
pub const fn lh(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_LOAD, 1, rd, rs1, imm)
}

/// `lw rd, imm(rs1)`
#[must_use]
pub const fn lw(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_LOAD, 2, rd, rs1, imm)
}

/// `lbu rd, imm(rs1)`
#[must_use]
pub const fn lbu(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_LOAD, 4, rd, rs1, imm)
}

/// `lhu rd, imm(rs1)`
#[must_use]
pub const fn lhu(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_LOAD, 5, rd, rs1, imm)
}

/// `sb rs2, imm(rs1)`
#[must_use]
pub const fn sb(rs2: u8, rs1: u8, imm: i32) -> u32 {
    encode_s(OPCODE_STORE, 0, rs1, rs2, imm)
}

/// `sh rs2, imm(rs1)`
#[must_use]
pub const fn sh(rs2: u8, rs1: u8, imm: i32) -> u32 {
    encode_s(OPCODE_STORE, 1, rs1, rs2, imm)
}

/// `sw rs2, imm(rs1)`
#[must_use]
pub const fn sw(rs2: u8, rs1: u8, imm: i32) -> u32 {
    encode_s(OPCODE_STORE, 2, rs1, rs2, imm)
}

/// `addi rd, rs1, imm`
#[must_use]
pub const fn addi(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_OP_IMM, 0, rd, rs1, imm)
}

/// `slti rd, rs1, imm`
#[must_use]
pub const fn slti(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_OP_IMM, 2, rd, rs1, imm)
}

/// `sltiu rd, rs1, imm`
#[must_use]
pub const fn sltiu(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_OP_IMM, 3, rd, rs1, imm)
}

/// `xori rd, rs1, imm`
#[must_use]
pub const fn xori(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_OP_IMM, 4, rd, rs1, imm)
}

/// `ori rd, rs1, imm`
#[must_use]
pub const fn ori(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_OP_IMM, 6, rd, rs1, imm)
}

/// `andi rd, rs1, imm`
#[must_use]
pub const fn andi(rd: u8, rs1: u8, imm: i32) -> u32 {
    encode_i(OPCODE_OP_IMM, 7, rd, rs1, imm)
}

/// `slli rd, rs1, shamt`
#[must_use]
pub const fn slli(rd: u8, rs1: u8, shamt: u8) -> u32 {
    encode_i(OPCODE_OP_IMM, 1, rd, rs1, (0x00 << 5) | (shamt & 0x1F) as i32)
}

/// `srli rd, rs1, shamt`
#[must_use]
pub const fn srli(rd: u8, rs1: u8, shamt: u8) -> u32 {
    encode_i(OPCODE_OP_IMM, 5, rd, rs1, (0x00 << 5) | (shamt & 0x1F) as i32)
}

/// `srai rd, rs1, shamt`
#[must_use]
pub const fn srai(rd: u8, rs1: u8, shamt: u8) -> u32 {
    encode_i(OPCODE_OP_IMM, 5, rd, rs1, (0x20 << 5) | (shamt & 0x1F) as i32)
}

/// `add rd, rs1, rs2`
#[must_use]
pub const fn add(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 0, 0x00, rd, rs1, rs2)
}

/// `sub rd, rs1, rs2`
#[must_use]
pub const fn sub(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 0, 0x20, rd, rs1, rs2)
}

/// `sll rd, rs1, rs2`
#[must_use]
pub const fn sll(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 1, 0x00, rd, rs1, rs2)
}

/// `slt rd, rs1, rs2`
#[must_use]
pub const fn slt(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 2, 0x00, rd, rs1, rs2)
}

/// `sltu rd, rs1, rs2`
#[must_use]
pub const fn sltu(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 3, 0x00, rd, rs1, rs2)
}

/// `xor rd, rs1, rs2`
#[must_use]
pub const fn xor(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 4, 0x00, rd, rs1, rs2)
}

/// `srl rd, rs1, rs2`
#[must_use]
pub const fn srl(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 5, 0x00, rd, rs1, rs2)
}

/// `sra rd, rs1, rs2`
#[must_use]
pub const fn sra(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 5, 0x20, rd, rs1, rs2)
}

/// `or rd, rs1, rs2`
#[must_use]
pub const fn or(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 6, 0x00, rd, rs1, rs2)
}

/// `and rd, rs1, rs2`
#[must_use]
pub const fn and(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r(OPCODE_OP, 7, 0x00, rd, rs1, rs2)
}

/// `nop` (`addi zero, zero, 0`)
#[must_use]
pub const fn nop() -> u32 {
    addi(0, 0, 0)
}

/// `li rd, value` as `lui` + `addi`, adjusting for the sign of the low 12 bits.
#[must_use]
pub const fn li(rd: u8, value: u32) -> [u32; 2] {
    let lo = ((value << 20) as i32) >> 20;
    let hi = value.wrapping_sub(lo as u32) >> 12;
    [lui(rd, hi), addi(rd, rd, lo)]
}

/// Flatten instruction words into a little-endian program image.
#[must_use]
pub fn assemble(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}
