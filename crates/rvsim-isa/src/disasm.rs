//! Disassembly in GNU assembler syntax.

use std::fmt::{self, Display};

use crate::{DecodedInstr, InstrArgs, OpClass, reg_name};

impl Display for DecodedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.op.mnemonic();
        match self.args {
            InstrArgs::R { rd, rs1, rs2 } => write!(
                f,
                "{} {}, {}, {}",
                mnemonic,
                reg_name(rd),
                reg_name(rs1),
                reg_name(rs2)
            ),
            InstrArgs::I { rd, rs1, imm } => {
                if matches!(self.op.class(), OpClass::Load | OpClass::JumpIndirect) {
                    write!(f, "{} {}, {}({})", mnemonic, reg_name(rd), imm, reg_name(rs1))
                } else {
                    write!(f, "{} {}, {}, {}", mnemonic, reg_name(rd), reg_name(rs1), imm)
                }
            }
            InstrArgs::S { rs1, rs2, imm } => {
                write!(f, "{} {}, {}({})", mnemonic, reg_name(rs2), imm, reg_name(rs1))
            }
            InstrArgs::B { rs1, rs2, imm } => write!(
                f,
                "{} {}, {}, {}",
                mnemonic,
                reg_name(rs1),
                reg_name(rs2),
                imm
            ),
            InstrArgs::U { rd, imm } => {
                write!(f, "{} {}, {:#x}", mnemonic, reg_name(rd), (imm as u32) >> 12)
            }
            InstrArgs::J { rd, imm } => write!(f, "{} {}, {}", mnemonic, reg_name(rd), imm),
        }
    }
}
