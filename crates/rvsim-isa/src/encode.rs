//! Bit-field extraction and the matching reference encoder.
//!
//! Every extractor is total over `u32`: no input word can fault.

/// Extract opcode field (bits [6:0]).
#[inline]
#[must_use]
pub const fn decode_opcode(instr: u32) -> u8 {
    (instr & 0x7F) as u8
}

/// Extract rd field (bits [11:7]).
#[inline]
#[must_use]
pub const fn decode_rd(instr: u32) -> u8 {
    ((instr >> 7) & 0x1F) as u8
}

/// Extract funct3 field (bits [14:12]).
#[inline]
#[must_use]
pub const fn decode_funct3(instr: u32) -> u8 {
    ((instr >> 12) & 0x7) as u8
}

/// Extract rs1 field (bits [19:15]).
#[inline]
#[must_use]
pub const fn decode_rs1(instr: u32) -> u8 {
    ((instr >> 15) & 0x1F) as u8
}

/// Extract rs2 field (bits [24:20]).
#[inline]
#[must_use]
pub const fn decode_rs2(instr: u32) -> u8 {
    ((instr >> 20) & 0x1F) as u8
}

/// Extract funct7 field (bits [31:25]).
#[inline]
#[must_use]
pub const fn decode_funct7(instr: u32) -> u8 {
    ((instr >> 25) & 0x7F) as u8
}

/// Decode I-type immediate (bits [31:20] sign-extended).
#[inline]
#[must_use]
pub const fn decode_i_imm(instr: u32) -> i32 {
    (instr as i32) >> 20
}

/// Shift amount of an immediate shift (low 5 bits of the I-type immediate).
#[inline]
#[must_use]
pub const fn decode_shamt(instr: u32) -> u8 {
    ((instr >> 20) & 0x1F) as u8
}

/// Decode S-type immediate (bits [31:25] | [11:7] sign-extended).
#[inline]
#[must_use]
pub const fn decode_s_imm(instr: u32) -> i32 {
    let imm11_5 = (instr >> 25) & 0x7F;
    let imm4_0 = (instr >> 7) & 0x1F;
    let imm = (imm11_5 << 5) | imm4_0;
    // Sign extend from 12 bits
    ((imm as i32) << 20) >> 20
}

/// Decode B-type immediate (bits [31] | [7] | [30:25] | [11:8] sign-extended, << 1).
#[inline]
#[must_use]
pub const fn decode_b_imm(instr: u32) -> i32 {
    let imm12 = (instr >> 31) & 0x1;
    let imm11 = (instr >> 7) & 0x1;
    let imm10_5 = (instr >> 25) & 0x3F;
    let imm4_1 = (instr >> 8) & 0xF;
    let imm = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);
    // Sign extend from 13 bits
    ((imm as i32) << 19) >> 19
}

/// Decode U-type immediate (bits [31:12] << 12).
#[inline]
#[must_use]
pub const fn decode_u_imm(instr: u32) -> i32 {
    (instr & 0xFFFF_F000) as i32
}

/// Decode J-type immediate (bits [31] | [19:12] | [20] | [30:21] sign-extended, << 1).
#[inline]
#[must_use]
pub const fn decode_j_imm(instr: u32) -> i32 {
    let imm20 = (instr >> 31) & 0x1;
    let imm19_12 = (instr >> 12) & 0xFF;
    let imm11 = (instr >> 20) & 0x1;
    let imm10_1 = (instr >> 21) & 0x3FF;
    let imm = (imm20 << 20) | (imm19_12 << 12) | (imm11 << 11) | (imm10_1 << 1);
    // Sign extend from 21 bits
    ((imm as i32) << 11) >> 11
}

#[inline]
const fn reg_field(reg: u8, shift: u32) -> u32 {
    ((reg as u32) & 0x1F) << shift
}

#[inline]
const fn funct3_field(funct3: u8) -> u32 {
    ((funct3 as u32) & 0x7) << 12
}

/// Encode an R-type word.
#[must_use]
pub const fn encode_r(opcode: u8, funct3: u8, funct7: u8, rd: u8, rs1: u8, rs2: u8) -> u32 {
    (((funct7 as u32) & 0x7F) << 25)
        | reg_field(rs2, 20)
        | reg_field(rs1, 15)
        | funct3_field(funct3)
        | reg_field(rd, 7)
        | ((opcode as u32) & 0x7F)
}

/// Encode an I-type word. Only the low 12 bits of `imm` are kept.
#[must_use]
pub const fn encode_i(opcode: u8, funct3: u8, rd: u8, rs1: u8, imm: i32) -> u32 {
    (((imm as u32) & 0xFFF) << 20)
        | reg_field(rs1, 15)
        | funct3_field(funct3)
        | reg_field(rd, 7)
        | ((opcode as u32) & 0x7F)
}

/// Encode an S-type word. Only the low 12 bits of `imm` are kept.
#[must_use]
pub const fn encode_s(opcode: u8, funct3: u8, rs1: u8, rs2: u8, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 5) & 0x7F) << 25)
        | reg_field(rs2, 20)
        | reg_field(rs1, 15)
        | funct3_field(funct3)
        | ((imm & 0x1F) << 7)
        | ((opcode as u32) & 0x7F)
}

/// Encode a B-type word. Bit 0 and bits above 12 of `imm` are dropped.
#[must_use]
pub const fn encode_b(opcode: u8, funct3: u8, rs1: u8, rs2: u8, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 12) & 0x1) << 31)
        | (((imm >> 5) & 0x3F) << 25)
        | reg_field(rs2, 20)
        | reg_field(rs1, 15)
        | funct3_field(funct3)
        | (((imm >> 1) & 0xF) << 8)
        | (((imm >> 11) & 0x1) << 7)
        | ((opcode as u32) & 0x7F)
}

/// Encode a U-type word. `imm` is the full 32-bit value; its low 12 bits are dropped.
#[must_use]
pub const fn encode_u(opcode: u8, rd: u8, imm: i32) -> u32 {
    ((imm as u32) & 0xFFFF_F000) | reg_field(rd, 7) | ((opcode as u32) & 0x7F)
}

/// Encode a J-type word. Bit 0 and bits above 20 of `imm` are dropped.
#[must_use]
pub const fn encode_j(opcode: u8, rd: u8, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 20) & 0x1) << 31)
        | (((imm >> 1) & 0x3FF) << 21)
        | (((imm >> 11) & 0x1) << 20)
        | (((imm >> 12) & 0xFF) << 12)
        | reg_field(rd, 7)
        | ((opcode as u32) & 0x7F)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic spread of words: edge patterns plus an xorshift walk.
    fn sample_words() -> Vec<u32> {
        let mut words = vec![
            0,
            u32::MAX,
            0x8000_0000,
            0x7FFF_FFFF,
            0x0000_0800,
            0xFFF0_0000,
            0x8000_0080,
            0x0010_0000,
        ];
        let mut x: u32 = 0x9E37_79B9;
        for _ in 0..4096 {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            words.push(x);
        }
        words
    }

    #[test]
    fn test_decode_i_imm() {
        // ADDI x1, x0, 1 -> imm = 1
        assert_eq!(decode_i_imm(0x0010_0093), 1);
        // ADDI x1, x0, -1 -> imm = -1
        assert_eq!(decode_i_imm(0xFFF0_0093), -1);
    }

    #[test]
    fn test_i_imm_is_arithmetic_shift() {
        for w in sample_words() {
            assert_eq!(decode_i_imm(w), (w as i32) >> 20, "word {w:#010x}");
        }
    }

    #[test]
    fn test_decode_s_imm() {
        // sw x2, -4(x1)
        let instr = encode_s(0x23, 2, 1, 2, -4);
        assert_eq!(instr, 0xFE20_AE23);
        assert_eq!(decode_s_imm(instr), -4);
        assert_eq!(decode_s_imm(encode_s(0x23, 2, 1, 2, 2047)), 2047);
        assert_eq!(decode_s_imm(encode_s(0x23, 2, 1, 2, -2048)), -2048);
    }

    #[test]
    fn test_decode_b_imm() {
        // beq x0, x0, 8
        assert_eq!(decode_b_imm(0x0000_0463), 8);
        assert_eq!(decode_b_imm(encode_b(0x63, 0, 1, 2, -4096)), -4096);
        assert_eq!(decode_b_imm(encode_b(0x63, 0, 1, 2, 4094)), 4094);
    }

    #[test]
    fn test_decode_j_imm() {
        assert_eq!(decode_j_imm(0x0000_006F), 0);
        // jal ra, 16
        assert_eq!(decode_j_imm(0x0100_00EF), 16);
        assert_eq!(decode_j_imm(encode_j(0x6F, 0, -(1 << 20))), -(1 << 20));
        assert_eq!(decode_j_imm(encode_j(0x6F, 0, (1 << 20) - 2)), (1 << 20) - 2);
    }

    #[test]
    fn test_decode_u_imm() {
        // lui a0, 0x12345
        assert_eq!(decode_u_imm(0x1234_5537), 0x1234_5000);
        assert_eq!(decode_u_imm(0xFFFF_FFB7) as u32, 0xFFFF_F000);
    }

    #[test]
    fn test_branch_and_jump_offsets_are_even() {
        for w in sample_words() {
            assert_eq!(decode_b_imm(w) & 1, 0, "B-type {w:#010x}");
            assert_eq!(decode_j_imm(w) & 1, 0, "J-type {w:#010x}");
        }
    }

    #[test]
    fn test_immediates_reencode_to_same_fields() {
        // Re-encoding the extracted immediate must reproduce the immediate bits of the word.
        for w in sample_words() {
            let i_bits = 0xFFF0_0000;
            assert_eq!(encode_i(0, 0, 0, 0, decode_i_imm(w)), w & i_bits);

            let s_bits = 0xFE00_0F80;
            assert_eq!(encode_s(0, 0, 0, 0, decode_s_imm(w)), w & s_bits);

            let b_bits = 0xFE00_0F80;
            assert_eq!(encode_b(0, 0, 0, 0, decode_b_imm(w)), w & b_bits);

            let u_bits = 0xFFFF_F000;
            assert_eq!(encode_u(0, 0, decode_u_imm(w)), w & u_bits);

            let j_bits = 0xFFFF_F000;
            assert_eq!(encode_j(0, 0, decode_j_imm(w)), w & j_bits);
        }
    }

    #[test]
    fn test_field_extraction() {
        // ADDI x1, x2, 100 -> rd=1, rs1=2
        let instr = 0x0641_0093;
        assert_eq!(decode_rd(instr), 1);
        assert_eq!(decode_rs1(instr), 2);
        assert_eq!(decode_opcode(instr), 0x13);
        assert_eq!(decode_funct3(instr), 0);

        // SUB x3, x4, x5
        let instr = encode_r(0x33, 0, 0x20, 3, 4, 5);
        assert_eq!(instr, 0x4052_01B3);
        assert_eq!(decode_funct7(instr), 0x20);
        assert_eq!(decode_rs2(instr), 5);
    }

    #[test]
    fn test_shamt_uses_low_five_bits() {
        // srai x1, x1, 31
        let instr = 0x41F0_D093;
        assert_eq!(decode_shamt(instr), 31);
        assert_eq!(decode_i_imm(instr), 0x41F);
    }
}
