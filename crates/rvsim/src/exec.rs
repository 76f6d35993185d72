//! Instruction semantics.
//!
//! [`execute`] applies one decoded instruction to the machine state and sets
//! the next PC. All arithmetic is 32-bit modular; nothing traps except
//! out-of-range memory accesses.

use std::io::{self, Write};

use rvsim_isa::{DecodedInstr, INSTR_SIZE, InstrArgs, Op, OpClass};
use rvsim_state::{CHAR_OUT_ADDR, CharDevice, CpuState, MemoryError, Width};
use thiserror::Error;

/// Failure while executing an already-decoded instruction.
#[derive(Debug, Error)]
pub enum ExecFault {
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error("character device: {0}")]
    Output(#[from] io::Error),
    #[error("{op} cannot take {args:?}")]
    Operands { op: Op, args: InstrArgs },
}

/// Execute `instr` at the current PC.
///
/// # Errors
///
/// Returns [`ExecFault::Memory`] for an out-of-range load or store,
/// [`ExecFault::Output`] if the character device fails, and
/// [`ExecFault::Operands`] if the operand layout does not match the op.
pub fn execute<W: Write>(
    state: &mut CpuState,
    device: &mut CharDevice<W>,
    instr: &DecodedInstr,
) -> Result<(), ExecFault> {
    let pc = state.pc;
    let next = pc.wrapping_add(INSTR_SIZE);
    let regs = &mut state.regs;

    let new_pc = match (instr.op, instr.args) {
        (Op::Lui, InstrArgs::U { rd, imm }) => {
            regs.write(rd, imm as u32);
            next
        }
        (Op::Auipc, InstrArgs::U { rd, imm }) => {
            regs.write(rd, pc.wrapping_add(imm as u32));
            next
        }
        (Op::Jal, InstrArgs::J { rd, imm }) => {
            regs.write(rd, next);
            pc.wrapping_add(imm as u32)
        }
        (Op::Jalr, InstrArgs::I { rd, rs1, imm }) => {
            // Target uses rs1 before rd is written (rd may equal rs1).
            let target = regs.read(rs1).wrapping_add(imm as u32) & !1;
            regs.write(rd, next);
            target
        }
        (op, InstrArgs::B { rs1, rs2, imm }) => {
            match branch_taken(op, regs.read(rs1), regs.read(rs2)) {
                Some(true) => pc.wrapping_add(imm as u32),
                Some(false) => next,
                None => return Err(operands(instr)),
            }
        }
        (op, InstrArgs::I { rd, rs1, imm }) if matches!(op.class(), OpClass::Load) => {
            let (width, signed) = load_kind(op).ok_or_else(|| operands(instr))?;
            let addr = regs.read(rs1).wrapping_add(imm as u32);
            let value = if signed {
                state.dmem.load_signed(addr, width)?
            } else {
                state.dmem.load(addr, width)?
            };
            regs.write(rd, value);
            next
        }
        (op, InstrArgs::S { rs1, rs2, imm }) => {
            let width = store_width(op).ok_or_else(|| operands(instr))?;
            let addr = regs.read(rs1).wrapping_add(imm as u32);
            let value = regs.read(rs2);
            if width == Width::Byte && addr == CHAR_OUT_ADDR {
                device.put(value as u8)?;
            } else {
                state.dmem.store(addr, width, value)?;
            }
            next
        }
        (op, InstrArgs::I { rd, rs1, imm }) => {
            let value = alu_imm(op, regs.read(rs1), imm).ok_or_else(|| operands(instr))?;
            regs.write(rd, value);
            next
        }
        (op, InstrArgs::R { rd, rs1, rs2 }) => {
            let value = alu(op, regs.read(rs1), regs.read(rs2)).ok_or_else(|| operands(instr))?;
            regs.write(rd, value);
            next
        }
        _ => return Err(operands(instr)),
    };

    state.pc = new_pc;
    Ok(())
}

const fn operands(instr: &DecodedInstr) -> ExecFault {
    ExecFault::Operands {
        op: instr.op,
        args: instr.args,
    }
}

/// Branch condition. BLT/BGE compare signed, BLTU/BGEU unsigned.
#[must_use]
pub const fn branch_taken(op: Op, a: u32, b: u32) -> Option<bool> {
    Some(match op {
        Op::Beq => a == b,
        Op::Bne => a != b,
        Op::Blt => (a as i32) < (b as i32),
        Op::Bge => (a as i32) >= (b as i32),
        Op::Bltu => a < b,
        Op::Bgeu => a >= b,
        _ => return None,
    })
}

/// Width and signedness of a load.
#[must_use]
pub const fn load_kind(op: Op) -> Option<(Width, bool)> {
    Some(match op {
        Op::Lb => (Width::Byte, true),
        Op::Lh => (Width::Half, true),
        Op::Lw => (Width::Word, false),
        Op::Lbu => (Width::Byte, false),
        Op::Lhu => (Width::Half, false),
        _ => return None,
    })
}

#[must_use]
pub const fn store_width(op: Op) -> Option<Width> {
    Some(match op {
        Op::Sb => Width::Byte,
        Op::Sh => Width::Half,
        Op::Sw => Width::Word,
        _ => return None,
    })
}

/// Register-immediate ALU. Shift forms take the shift amount in `imm`.
#[must_use]
pub const fn alu_imm(op: Op, a: u32, imm: i32) -> Option<u32> {
    let b = imm as u32;
    Some(match op {
        Op::Addi => a.wrapping_add(b),
        Op::Slti => ((a as i32) < imm) as u32,
        Op::Sltiu => (a < b) as u32,
        Op::Xori => a ^ b,
        Op::Ori => a | b,
        Op::Andi => a & b,
        Op::Slli => a.wrapping_shl(b & 0x1F),
        Op::Srli => a.wrapping_shr(b & 0x1F),
        Op::Srai => (a as i32).wrapping_shr(b & 0x1F) as u32,
        _ => return None,
    })
}

/// Register-register ALU. Shift amounts use the low 5 bits of `b`.
#[must_use]
pub const fn alu(op: Op, a: u32, b: u32) -> Option<u32> {
    Some(match op {
        Op::Add => a.wrapping_add(b),
        Op::Sub => a.wrapping_sub(b),
        Op::Sll => a.wrapping_shl(b & 0x1F),
        Op::Slt => ((a as i32) < (b as i32)) as u32,
        Op::Sltu => (a < b) as u32,
        Op::Xor => a ^ b,
        Op::Srl => a.wrapping_shr(b & 0x1F),
        Op::Sra => (a as i32).wrapping_shr(b & 0x1F) as u32,
        Op::Or => a | b,
        Op::And => a & b,
        _ => return None,
    })
}
