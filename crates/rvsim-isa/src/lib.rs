//! RV32I instruction set definitions and decoder.
//!
//! This crate provides bit-field extraction, a reference encoder, decoding
//! into a tagged [`DecodedInstr`], and disassembly for the RV32I base ISA.
//! It has no knowledge of machine state; execution lives in `rvsim`.

pub mod asm;
mod decode;
mod disasm;
mod encode;
mod op;
mod types;

pub use decode::{DecodeError, DecodedInstr, InstrArgs, decode, decode_bytes};
pub use encode::*;
pub use op::{Op, OpClass};
pub use types::*;
