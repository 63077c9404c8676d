use thiserror::Error;

use crate::cpu::registers::{Register, Width};

/// Result alias used across the core.
pub type CoreResult<T> = Result<T, CoreError>;

/// Failures the emulation core can report.
///
/// All of these are synchronous and non-retryable. The driving loop decides
/// whether to abort the session or log and halt; the core never recovers on
/// its own, since skipping past a bad decode would desynchronize the program
/// counter from the intended execution trace.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// A register was accessed through the wrong width, e.g. `get8(HL)`.
    /// This is a bug in the caller or in opcode-table construction, not a
    /// runtime condition; the access fails before any mutation.
    #[error("register {register:?} cannot be accessed as a {access} value")]
    InvalidRegisterWidth { register: Register, access: Width },

    /// The fetched byte has no entry in the instruction table.
    #[error("unknown opcode {opcode:#04X} (cb-prefixed: {prefixed}) at PC {pc:#06X}")]
    UnknownOpcode {
        opcode: u8,
        prefixed: bool,
        pc: u16,
    },

    /// A word access at 0xFFFF would need the byte at 0x10000, which does
    /// not exist. Byte accesses are total over the 16-bit address domain.
    #[error("word access at {address:#06X} crosses the end of the address space")]
    OutOfRangeAddress { address: u16 },
}
