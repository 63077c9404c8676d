//! Register identifiers and the packed flag register.
//!
//! The register file is 8 contiguous byte slots laid out `[A, F, B, C, D, E,
//! H, L]`. Adjacent slots pair up into the 16-bit registers AF, BC, DE and
//! HL, composed big-endian: the first slot of the pair is the high byte.

use std::fmt;

use bitflags::bitflags;

/// Number of 8-bit slots in the register file.
pub(crate) const REGISTER_SLOTS: usize = 8;

/// Slot index of the flag register, used by the flag operations.
pub(crate) const FLAG_SLOT: usize = 1;

/// Declared access width of a register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Eight,
    Sixteen,
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Width::Eight => write!(f, "8-bit"),
            Width::Sixteen => write!(f, "16-bit"),
        }
    }
}

/// A named CPU register, tagged with its width and its slot offset.
///
/// Accessing a register through the wrong width is a programming error and
/// fails fast; see [`crate::Cpu::get8`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
    AF,
    BC,
    DE,
    HL,
}

impl Register {
    pub const fn width(self) -> Width {
        match self {
            Register::A
            | Register::F
            | Register::B
            | Register::C
            | Register::D
            | Register::E
            | Register::H
            | Register::L => Width::Eight,
            Register::AF | Register::BC | Register::DE | Register::HL => Width::Sixteen,
        }
    }

    /// Slot index in the register file. For a 16-bit register this is the
    /// high byte; the low byte lives at `offset() + 1`.
    pub(crate) const fn offset(self) -> usize {
        match self {
            Register::A | Register::AF => 0,
            Register::F => 1,
            Register::B | Register::BC => 2,
            Register::C => 3,
            Register::D | Register::DE => 4,
            Register::E => 5,
            Register::H | Register::HL => 6,
            Register::L => 7,
        }
    }
}

bitflags! {
    /// The four meaningful bits of the F register. The low nibble always
    /// reads as zero, mirroring the real hardware.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// Result of the previous operation was zero.
        const ZERO = 0x80;
        /// Previous operation was a subtraction (used by DAA).
        const SUBTRACT = 0x40;
        /// Carry out of bit 3 (8-bit ops) or bit 11 (16-bit ops).
        const HALF_CARRY = 0x20;
        /// Carry out of bit 7 (8-bit ops) or bit 15 (16-bit ops).
        const CARRY = 0x10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_pairing() {
        assert_eq!(Register::A.width(), Width::Eight);
        assert_eq!(Register::L.width(), Width::Eight);
        assert_eq!(Register::AF.width(), Width::Sixteen);
        assert_eq!(Register::HL.width(), Width::Sixteen);
    }

    #[test]
    fn pairs_start_at_their_high_slot() {
        assert_eq!(Register::AF.offset(), Register::A.offset());
        assert_eq!(Register::BC.offset(), Register::B.offset());
        assert_eq!(Register::DE.offset(), Register::D.offset());
        assert_eq!(Register::HL.offset(), Register::H.offset());
        assert_eq!(Register::F.offset(), Register::A.offset() + 1);
    }

    #[test]
    fn flag_bits_occupy_the_high_nibble() {
        let all = Flags::ZERO | Flags::SUBTRACT | Flags::HALF_CARRY | Flags::CARRY;
        assert_eq!(all.bits(), 0xF0);
    }
}
