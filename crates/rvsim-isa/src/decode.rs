//! Instruction decoder.
//!
//! Two-level dispatch on the raw word: the opcode selects a family, then
//! funct3 (and funct7 for ADD/SUB, SRL/SRA and the immediate shifts) selects
//! the concrete instruction. Anything outside the RV32I table is a
//! [`DecodeError`].

use thiserror::Error;

use crate::encode::{
    decode_b_imm, decode_funct3, decode_funct7, decode_i_imm, decode_j_imm, decode_opcode,
    decode_rd, decode_rs1, decode_rs2, decode_s_imm, decode_shamt, decode_u_imm,
};
use crate::{
    OPCODE_AUIPC, OPCODE_BRANCH, OPCODE_JAL, OPCODE_JALR, OPCODE_LOAD, OPCODE_LUI, OPCODE_OP,
    OPCODE_OP_IMM, OPCODE_STORE, Op,
};

/// Decoded instruction with all fields extracted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedInstr {
    /// Instruction identifier.
    pub op: Op,
    /// Raw instruction word.
    pub raw: u32,
    /// Instruction arguments.
    pub args: InstrArgs,
}

impl DecodedInstr {
    #[must_use]
    pub const fn new(op: Op, raw: u32, args: InstrArgs) -> Self {
        Self { op, raw, args }
    }
}

/// Operand layout, one variant per RISC-V format.
///
/// Immediates are already sign-extended. For SLLI/SRLI/SRAI the `I` immediate
/// holds the 5-bit shift amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstrArgs {
    /// R-type: rd, rs1, rs2
    R { rd: u8, rs1: u8, rs2: u8 },
    /// I-type: rd, rs1, imm
    I { rd: u8, rs1: u8, imm: i32 },
    /// S-type: rs1, rs2, imm
    S { rs1: u8, rs2: u8, imm: i32 },
    /// B-type: rs1, rs2, imm
    B { rs1: u8, rs2: u8, imm: i32 },
    /// U-type: rd, imm
    U { rd: u8, imm: i32 },
    /// J-type: rd, imm
    J { rd: u8, imm: i32 },
}

/// Word that does not name an RV32I instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown opcode {opcode:#04x} in {raw:#010x}")]
    UnknownOpcode { raw: u32, opcode: u8 },

    #[error("unknown funct3 {funct3} for opcode {opcode:#04x} in {raw:#010x}")]
    UnknownFunct3 { raw: u32, opcode: u8, funct3: u8 },

    #[error("unknown funct7 {funct7:#04x} for opcode {opcode:#04x}, funct3 {funct3} in {raw:#010x}")]
    UnknownFunct7 {
        raw: u32,
        opcode: u8,
        funct3: u8,
        funct7: u8,
    },
}

impl DecodeError {
    /// The word that failed to decode.
    #[must_use]
    pub const fn raw(&self) -> u32 {
        match *self {
            Self::UnknownOpcode { raw, .. }
            | Self::UnknownFunct3 { raw, .. }
            | Self::UnknownFunct7 { raw, .. } => raw,
        }
    }
}

/// Decode a single 32-bit instruction word.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the first field that has no entry in the
/// instruction table.
pub const fn decode(instr: u32) -> Result<DecodedInstr, DecodeError> {
    let opcode = decode_opcode(instr);
    let funct3 = decode_funct3(instr);
    let rd = decode_rd(instr);
    let rs1 = decode_rs1(instr);
    let rs2 = decode_rs2(instr);

    let (op, args) = match opcode {
        OPCODE_LUI => (
            Op::Lui,
            InstrArgs::U {
                rd,
                imm: decode_u_imm(instr),
            },
        ),
        OPCODE_AUIPC => (
            Op::Auipc,
            InstrArgs::U {
                rd,
                imm: decode_u_imm(instr),
            },
        ),
        OPCODE_JAL => (
            Op::Jal,
            InstrArgs::J {
                rd,
                imm: decode_j_imm(instr),
            },
        ),
        OPCODE_JALR => {
            if funct3 != 0 {
                return Err(DecodeError::UnknownFunct3 {
                    raw: instr,
                    opcode,
                    funct3,
                });
            }
            (
                Op::Jalr,
                InstrArgs::I {
                    rd,
                    rs1,
                    imm: decode_i_imm(instr),
                },
            )
        }
        OPCODE_BRANCH => match decode_branch(funct3, rs1, rs2, instr) {
            Some(decoded) => decoded,
            None => {
                return Err(DecodeError::UnknownFunct3 {
                    raw: instr,
                    opcode,
                    funct3,
                });
            }
        },
        OPCODE_LOAD => match decode_load(funct3, rd, rs1, instr) {
            Some(decoded) => decoded,
            None => {
                return Err(DecodeError::UnknownFunct3 {
                    raw: instr,
                    opcode,
                    funct3,
                });
            }
        },
        OPCODE_STORE => match decode_store(funct3, rs1, rs2, instr) {
            Some(decoded) => decoded,
            None => {
                return Err(DecodeError::UnknownFunct3 {
                    raw: instr,
                    opcode,
                    funct3,
                });
            }
        },
        OPCODE_OP_IMM => match decode_op_imm(funct3, rd, rs1, instr) {
            Some(decoded) => decoded,
            None => {
                return Err(DecodeError::UnknownFunct7 {
                    raw: instr,
                    opcode,
                    funct3,
                    funct7: decode_funct7(instr),
                });
            }
        },
        OPCODE_OP => match decode_op(funct3, rd, rs1, rs2, instr) {
            Some(decoded) => decoded,
            None => {
                return Err(DecodeError::UnknownFunct7 {
                    raw: instr,
                    opcode,
                    funct3,
                    funct7: decode_funct7(instr),
                });
            }
        },
        _ => return Err(DecodeError::UnknownOpcode { raw: instr, opcode }),
    };

    Ok(DecodedInstr::new(op, instr, args))
}

/// Decode from little-endian bytes; `None` if fewer than four bytes are given.
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> Option<Result<DecodedInstr, DecodeError>> {
    let word: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(decode(u32::from_le_bytes(word)))
}

const fn decode_branch(funct3: u8, rs1: u8, rs2: u8, instr: u32) -> Option<(Op, InstrArgs)> {
    let imm = decode_b_imm(instr);
    let op = match funct3 {
        0 => Op::Beq,
        1 => Op::Bne,
        4 => Op::Blt,
        5 => Op::Bge,
        6 => Op::Bltu,
        7 => Op::Bgeu,
        _ => return None,
    };
    Some((op, InstrArgs::B { rs1, rs2, imm }))
}

const fn decode_load(funct3: u8, rd: u8, rs1: u8, instr: u32) -> Option<(Op, InstrArgs)> {
    let imm = decode_i_imm(instr);
    let op = match funct3 {
        0 => Op::Lb,
        1 => Op::Lh,
        2 => Op::Lw,
        4 => Op::Lbu,
        5 => Op::Lhu,
        _ => return None,
    };
    Some((op, InstrArgs::I { rd, rs1, imm }))
}

const fn decode_store(funct3: u8, rs1: u8, rs2: u8, instr: u32) -> Option<(Op, InstrArgs)> {
    let imm = decode_s_imm(instr);
    let op = match funct3 {
        0 => Op::Sb,
        1 => Op::Sh,
        2 => Op::Sw,
        _ => return None,
    };
    Some((op, InstrArgs::S { rs1, rs2, imm }))
}

/// OP-IMM never fails on funct3 (all eight are defined), only on the shift funct7.
const fn decode_op_imm(funct3: u8, rd: u8, rs1: u8, instr: u32) -> Option<(Op, InstrArgs)> {
    let funct7 = decode_funct7(instr);
    let op = match funct3 {
        0 => Op::Addi,
        1 if funct7 == 0x00 => Op::Slli,
        2 => Op::Slti,
        3 => Op::Sltiu,
        4 => Op::Xori,
        5 if funct7 == 0x00 => Op::Srli,
        5 if funct7 == 0x20 => Op::Srai,
        6 => Op::Ori,
        7 => Op::Andi,
        _ => return None,
    };
    let imm = if funct3 == 1 || funct3 == 5 {
        decode_shamt(instr) as i32
    } else {
        decode_i_imm(instr)
    };
    Some((op, InstrArgs::I { rd, rs1, imm }))
}

const fn decode_op(funct3: u8, rd: u8, rs1: u8, rs2: u8, instr: u32) -> Option<(Op, InstrArgs)> {
    let op = match (decode_funct7(instr), funct3) {
        (0x00, 0) => Op::Add,
        (0x20, 0) => Op::Sub,
        (0x00, 1) => Op::Sll,
        (0x00, 2) => Op::Slt,
        (0x00, 3) => Op::Sltu,
        (0x00, 4) => Op::Xor,
        (0x00, 5) => Op::Srl,
        (0x20, 5) => Op::Sra,
        (0x00, 6) => Op::Or,
        (0x00, 7) => Op::And,
        _ => return None,
    };
    Some((op, InstrArgs::R { rd, rs1, rs2 }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm;

    #[test]
    fn test_decode_addi() {
        // ADDI x1, x0, 1 (0x00100093)
        let decoded = decode(0x0010_0093).unwrap();
        assert_eq!(decoded.op, Op::Addi);
        assert_eq!(decoded.raw, 0x0010_0093);
        assert_eq!(
            decoded.args,
            InstrArgs::I {
                rd: 1,
                rs1: 0,
                imm: 1
            }
        );
    }

    #[test]
    fn test_decode_add() {
        // ADD x1, x2, x3 (0x003100B3)
        let decoded = decode(0x0031_00B3).unwrap();
        assert_eq!(decoded.op, Op::Add);
        assert_eq!(decoded.args, InstrArgs::R { rd: 1, rs1: 2, rs2: 3 });
    }

    #[test]
    fn test_decode_from_bytes() {
        let bytes = [0x93, 0x00, 0x10, 0x00];
        let decoded = decode_bytes(&bytes).unwrap().unwrap();
        assert_eq!(decoded.op, Op::Addi);
        assert!(decode_bytes(&bytes[..3]).is_none());
    }

    #[test]
    fn test_funct7_selects_sub_and_sra() {
        assert_eq!(decode(asm::sub(1, 2, 3)).unwrap().op, Op::Sub);
        assert_eq!(decode(asm::sra(1, 2, 3)).unwrap().op, Op::Sra);
        assert_eq!(decode(asm::srl(1, 2, 3)).unwrap().op, Op::Srl);
        assert_eq!(decode(asm::srai(1, 2, 7)).unwrap().op, Op::Srai);
        assert_eq!(decode(asm::srli(1, 2, 7)).unwrap().op, Op::Srli);
    }

    #[test]
    fn test_shift_immediate_is_shamt() {
        let decoded = decode(asm::srai(5, 6, 31)).unwrap();
        assert_eq!(
            decoded.args,
            InstrArgs::I {
                rd: 5,
                rs1: 6,
                imm: 31
            }
        );
    }

    #[test]
    fn test_every_op_decodes_from_its_encoding() {
        let words = [
            (asm::lui(1, 0x1000), Op::Lui),
            (asm::auipc(1, 0x1000), Op::Auipc),
            (asm::jal(1, 8), Op::Jal),
            (asm::jalr(1, 2, 4), Op::Jalr),
            (asm::beq(1, 2, 8), Op::Beq),
            (asm::bne(1, 2, 8), Op::Bne),
            (asm::blt(1, 2, 8), Op::Blt),
            (asm::bge(1, 2, 8), Op::Bge),
            (asm::bltu(1, 2, 8), Op::Bltu),
            (asm::bgeu(1, 2, 8), Op::Bgeu),
            (asm::lb(1, 2, 0), Op::Lb),
            (asm::lh(1, 2, 0), Op::Lh),
            (asm::lw(1, 2, 0), Op::Lw),
            (asm::lbu(1, 2, 0), Op::Lbu),
            (asm::lhu(1, 2, 0), Op::Lhu),
            (asm::sb(1, 2, 0), Op::Sb),
            (asm::sh(1, 2, 0), Op::Sh),
            (asm::sw(1, 2, 0), Op::Sw),
            (asm::addi(1, 2, 3), Op::Addi),
            (asm::slti(1, 2, 3), Op::Slti),
            (asm::sltiu(1, 2, 3), Op::Sltiu),
            (asm::xori(1, 2, 3), Op::Xori),
            (asm::ori(1, 2, 3), Op::Ori),
            (asm::andi(1, 2, 3), Op::Andi),
            (asm::slli(1, 2, 3), Op::Slli),
            (asm::srli(1, 2, 3), Op::Srli),
            (asm::srai(1, 2, 3), Op::Srai),
            (asm::add(1, 2, 3), Op::Add),
            (asm::sub(1, 2, 3), Op::Sub),
            (asm::sll(1, 2, 3), Op::Sll),
            (asm::slt(1, 2, 3), Op::Slt),
            (asm::sltu(1, 2, 3), Op::Sltu),
            (asm::xor(1, 2, 3), Op::Xor),
            (asm::srl(1, 2, 3), Op::Srl),
            (asm::sra(1, 2, 3), Op::Sra),
            (asm::or(1, 2, 3), Op::Or),
            (asm::and(1, 2, 3), Op::And),
        ];
        assert_eq!(words.len(), Op::ALL.len());
        for (word, op) in words {
            assert_eq!(decode(word).map(|d| d.op), Ok(op), "word {word:#010x}");
        }
    }

    #[test]
    fn test_unknown_opcode() {
        // ECALL is outside the supported table.
        let err = decode(0x0000_0073).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownOpcode {
                raw: 0x0000_0073,
                opcode: 0x73
            }
        );
        assert_eq!(err.raw(), 0x0000_0073);
        assert!(decode(0).is_err());
        assert!(decode(u32::MAX).is_err());
    }

    #[test]
    fn test_unknown_funct3() {
        // Branch funct3 = 2 is reserved.
        let word = asm::beq(1, 2, 8) | (2 << 12);
        assert!(matches!(
            decode(word),
            Err(DecodeError::UnknownFunct3 { funct3: 2, .. })
        ));
        // LWU / LD are RV64 only.
        let word = asm::lw(1, 2, 0) | (6 << 12);
        assert!(matches!(
            decode(word),
            Err(DecodeError::UnknownFunct3 { funct3: 6, .. })
        ));
        // SD is RV64 only.
        let word = asm::sw(1, 2, 0) | (3 << 12);
        assert!(matches!(decode(word), Err(DecodeError::UnknownFunct3 { .. })));
        // JALR requires funct3 = 0.
        let word = asm::jalr(1, 2, 0) | (1 << 12);
        assert!(matches!(decode(word), Err(DecodeError::UnknownFunct3 { .. })));
    }

    #[test]
    fn test_unknown_funct7() {
        // MUL (M extension) is not supported.
        let mul = crate::encode_r(crate::OPCODE_OP, 0, 0x01, 1, 2, 3);
        assert!(matches!(
            decode(mul),
            Err(DecodeError::UnknownFunct7 { funct7: 0x01, .. })
        ));
        // SLLI with shamt[5] set is RV64 only.
        let slli64 = asm::slli(1, 2, 0) | (1 << 25);
        assert!(matches!(decode(slli64), Err(DecodeError::UnknownFunct7 { .. })));
        // SRAI with a stray funct7 bit.
        let bad_srai = asm::srai(1, 2, 3) | (1 << 26);
        assert!(matches!(decode(bad_srai), Err(DecodeError::UnknownFunct7 { .. })));
    }
}
