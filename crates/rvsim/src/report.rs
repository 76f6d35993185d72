//! Final register dumps.

use std::fmt::Write;

use crate::runner::RunReport;

/// Banner printed between program output and the register dump.
pub const TERMINATE_BANNER: &str =
    "-----------------------RISC-V program terminate------------------------";

impl RunReport {
    /// Human-readable dump: banner, then `index: VALUE` in uppercase hex.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("\n{TERMINATE_BANNER}\nRegfile values:\n");
        for (index, value) in self.registers.iter().enumerate() {
            let _ = writeln!(out, "{index}: {value:X}");
        }
        out
    }

    /// Key-value dump for scripting.
    #[must_use]
    pub fn to_raw(&self) -> String {
        let mut out = String::new();
        for (index, value) in self.registers.iter().enumerate() {
            let _ = writeln!(out, "x{index}=0x{value:08x}");
        }
        let _ = writeln!(out, "pc=0x{:08x}", self.pc);
        let _ = writeln!(out, "cycles={}", self.cycles);
        let _ = writeln!(out, "instret={}", self.instret);
        let _ = writeln!(out, "skipped={}", self.skipped);
        out
    }

    /// Single-line JSON object.
    #[must_use]
    pub fn to_json(&self) -> String {
        let registers = self
            .registers
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!(
            r#"{{"cycles":{},"instret":{},"skipped":{},"pc":{},"registers":[{}],"time":{:.6},"mips":{:.2}}}"#,
            self.cycles, self.instret, self.skipped, self.pc, registers, self.time_secs, self.mips
        )
    }
}
