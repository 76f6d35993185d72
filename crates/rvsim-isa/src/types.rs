//! Core constants for the RV32I register file and opcode map.

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Instruction size in bytes.
pub const INSTR_SIZE: u32 = 4;

// Major opcodes
pub const OPCODE_LOAD: u8 = 0x03;
pub const OPCODE_OP_IMM: u8 = 0x13;
pub const OPCODE_AUIPC: u8 = 0x17;
pub const OPCODE_STORE: u8 = 0x23;
pub const OPCODE_OP: u8 = 0x33;
pub const OPCODE_LUI: u8 = 0x37;
pub const OPCODE_BRANCH: u8 = 0x63;
pub const OPCODE_JALR: u8 = 0x67;
pub const OPCODE_JAL: u8 = 0x6F;

// Register ABI names
pub const REG_ZERO: u8 = 0;
pub const REG_RA: u8 = 1;
pub const REG_SP: u8 = 2;
pub const REG_GP: u8 = 3;
pub const REG_TP: u8 = 4;
pub const REG_T0: u8 = 5;
pub const REG_T1: u8 = 6;
pub const REG_T2: u8 = 7;
pub const REG_S0: u8 = 8;
pub const REG_S1: u8 = 9;
pub const REG_A0: u8 = 10;
pub const REG_A1: u8 = 11;
pub const REG_A2: u8 = 12;
pub const REG_A3: u8 = 13;
pub const REG_A4: u8 = 14;
pub const REG_A5: u8 = 15;

/// Get register ABI name.
#[must_use]
pub const fn reg_name(reg: u8) -> &'static str {
    match reg {
        0 => "zero",
        1 => "ra",
        2 => "sp",
        3 => "gp",
        4 => "tp",
        5 => "t0",
        6 => "t1",
        7 => "t2",
        8 => "s0",
        9 => "s1",
        10 => "a0",
        11 => "a1",
        12 => "a2",
        13 => "a3",
        14 => "a4",
        15 => "a5",
        16 => "a6",
        17 => "a7",
        18 => "s2",
        19 => "s3",
        20 => "s4",
        21 => "s5",
        22 => "s6",
        23 => "s7",
        24 => "s8",
        25 => "s9",
        26 => "s10",
        27 => "s11",
        28 => "t3",
        29 => "t4",
        30 => "t5",
        31 => "t6",
        _ => "??",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reg_names() {
        assert_eq!(reg_name(REG_ZERO), "zero");
        assert_eq!(reg_name(REG_SP), "sp");
        assert_eq!(reg_name(REG_A0), "a0");
        assert_eq!(reg_name(31), "t6");
        assert_eq!(reg_name(32), "??");
    }
}
