//! Opcode behaviors and the dispatch tables.
//!
//! Every opcode maps to a small behavior value: a mnemonic, a fixed base
//! cycle cost and a closure over the CPU and memory. Behaviors live in two
//! 256-entry arrays (unprefixed and 0xCB-prefixed) so decode is a direct
//! table lookup and adding an opcode is purely additive. The regular grids
//! of the instruction map (`LD r,r'`, the accumulator ALU block, the whole
//! CB space) are registered with loops over the operand encoding instead of
//! one hand-written entry each.

mod alu16;
mod alu8;
mod bits;
mod control;
mod load;
mod misc;

use std::sync::LazyLock;

use crate::cpu::registers::Register;
use crate::cpu::Cpu;
use crate::error::CoreResult;
use crate::mmu::Mmu;

/// First byte of the two-byte extended opcode space.
pub const CB_PREFIX: u8 = 0xCB;

/// One opcode's behavior: mnemonic (for trace logs and debuggers), base
/// machine-cycle cost and the execution closure.
pub struct Opcode {
    mnemonic: String,
    cycles: u8,
    exec: Box<dyn Fn(&mut Cpu, &mut Mmu) -> CoreResult<()> + Send + Sync>,
}

impl Opcode {
    fn new<F>(mnemonic: impl Into<String>, cycles: u8, exec: F) -> Self
    where
        F: Fn(&mut Cpu, &mut Mmu) -> CoreResult<()> + Send + Sync + 'static,
    {
        Opcode {
            mnemonic: mnemonic.into(),
            cycles,
            exec: Box::new(exec),
        }
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Base cost in machine cycles. Conditional control transfers record a
    /// higher cost themselves when the branch is taken.
    pub fn cycles(&self) -> u8 {
        self.cycles
    }

    pub(crate) fn run(&self, cpu: &mut Cpu, mmu: &mut Mmu) -> CoreResult<()> {
        (self.exec)(cpu, mmu)
    }
}

/// One 256-entry opcode-indexed array under construction.
pub(crate) struct OpcodeMap([Option<Opcode>; 256]);

impl OpcodeMap {
    fn new() -> Self {
        OpcodeMap(std::array::from_fn(|_| None))
    }

    pub(crate) fn set(&mut self, value: u8, opcode: Opcode) {
        debug_assert!(
            self.0[value as usize].is_none(),
            "opcode {value:#04X} registered twice"
        );
        self.0[value as usize] = Some(opcode);
    }
}

/// The mapping from raw opcode byte to behavior, for both opcode spaces.
///
/// The unprefixed table has exactly the eleven holes of the real LR35902
/// map (0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD);
/// the prefixed table is total.
pub struct InstructionTable {
    unprefixed: [Option<Opcode>; 256],
    prefixed: [Option<Opcode>; 256],
}

impl InstructionTable {
    pub fn new() -> Self {
        let mut unprefixed = OpcodeMap::new();
        misc::register(&mut unprefixed);
        load::register(&mut unprefixed);
        alu8::register(&mut unprefixed);
        alu16::register(&mut unprefixed);
        control::register(&mut unprefixed);
        bits::register_accumulator_rotates(&mut unprefixed);

        let mut prefixed = OpcodeMap::new();
        bits::register_prefixed(&mut prefixed);

        InstructionTable {
            unprefixed: unprefixed.0,
            prefixed: prefixed.0,
        }
    }

    pub fn unprefixed(&self, opcode: u8) -> Option<&Opcode> {
        self.unprefixed[opcode as usize].as_ref()
    }

    pub fn prefixed(&self, opcode: u8) -> Option<&Opcode> {
        self.prefixed[opcode as usize].as_ref()
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        InstructionTable::new()
    }
}

static TABLE: LazyLock<InstructionTable> = LazyLock::new(InstructionTable::new);

/// The process-wide instruction table. Built once, on first dispatch.
pub fn table() -> &'static InstructionTable {
    &TABLE
}

/// An 8-bit operand slot of the opcode encoding: a register, or the byte in
/// memory addressed by HL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand8 {
    Reg(Register),
    HlIndirect,
}

impl Operand8 {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Operand8::Reg(Register::A) => "A",
            Operand8::Reg(Register::B) => "B",
            Operand8::Reg(Register::C) => "C",
            Operand8::Reg(Register::D) => "D",
            Operand8::Reg(Register::E) => "E",
            Operand8::Reg(Register::H) => "H",
            Operand8::Reg(Register::L) => "L",
            Operand8::HlIndirect => "(HL)",
            Operand8::Reg(_) => unreachable!("not an operand register"),
        }
    }

    pub(crate) fn read(self, cpu: &mut Cpu, mmu: &Mmu) -> CoreResult<u8> {
        match self {
            Operand8::Reg(register) => cpu.get8(register),
            Operand8::HlIndirect => Ok(mmu.read_byte(cpu.get16(Register::HL)?)),
        }
    }

    pub(crate) fn write(self, cpu: &mut Cpu, mmu: &mut Mmu, value: u8) -> CoreResult<()> {
        match self {
            Operand8::Reg(register) => cpu.set8(register, value),
            Operand8::HlIndirect => {
                let address = cpu.get16(Register::HL)?;
                mmu.write_byte(address, value);
                Ok(())
            }
        }
    }

    pub(crate) fn is_memory(self) -> bool {
        self == Operand8::HlIndirect
    }
}

/// The 8-bit operand slots in opcode-encoding order (bits 0-2 / 3-5).
pub(crate) const OPERANDS8: [Operand8; 8] = [
    Operand8::Reg(Register::B),
    Operand8::Reg(Register::C),
    Operand8::Reg(Register::D),
    Operand8::Reg(Register::E),
    Operand8::Reg(Register::H),
    Operand8::Reg(Register::L),
    Operand8::HlIndirect,
    Operand8::Reg(Register::A),
];

/// A 16-bit operand slot: a register pair or the stack pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand16 {
    Pair(Register),
    StackPointer,
}

impl Operand16 {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Operand16::Pair(Register::BC) => "BC",
            Operand16::Pair(Register::DE) => "DE",
            Operand16::Pair(Register::HL) => "HL",
            Operand16::Pair(Register::AF) => "AF",
            Operand16::StackPointer => "SP",
            Operand16::Pair(_) => unreachable!("not an operand register pair"),
        }
    }

    pub(crate) fn read(self, cpu: &Cpu) -> CoreResult<u16> {
        match self {
            Operand16::Pair(register) => cpu.get16(register),
            Operand16::StackPointer => Ok(cpu.stack_pointer()),
        }
    }

    pub(crate) fn write(self, cpu: &mut Cpu, value: u16) -> CoreResult<()> {
        match self {
            Operand16::Pair(register) => cpu.set16(register, value),
            Operand16::StackPointer => {
                cpu.set_stack_pointer(value);
                Ok(())
            }
        }
    }
}

/// The 16-bit operand slots in opcode-encoding order (bits 4-5).
pub(crate) const OPERANDS16: [Operand16; 4] = [
    Operand16::Pair(Register::BC),
    Operand16::Pair(Register::DE),
    Operand16::Pair(Register::HL),
    Operand16::StackPointer,
];

#[cfg(test)]
mod tests {
    use super::*;

    const UNMAPPED: [u8; 11] = [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];

    #[test]
    fn unprefixed_table_has_exactly_the_hardware_holes() {
        let table = InstructionTable::new();
        for value in 0..=0xFFu8 {
            let expected_hole = UNMAPPED.contains(&value) || value == CB_PREFIX;
            assert_eq!(
                table.unprefixed(value).is_none(),
                expected_hole,
                "opcode {value:#04X}"
            );
        }
    }

    #[test]
    fn prefixed_table_is_total() {
        let table = InstructionTable::new();
        for value in 0..=0xFFu8 {
            assert!(table.prefixed(value).is_some(), "CB opcode {value:#04X}");
        }
    }

    #[test]
    fn mnemonics_follow_the_encoding_grids() {
        let table = InstructionTable::new();
        assert_eq!(table.unprefixed(0x00).unwrap().mnemonic(), "NOP");
        assert_eq!(table.unprefixed(0x41).unwrap().mnemonic(), "LD B,C");
        assert_eq!(table.unprefixed(0x39).unwrap().mnemonic(), "ADD HL,SP");
        assert_eq!(table.unprefixed(0x34).unwrap().mnemonic(), "INC (HL)");
        assert_eq!(table.unprefixed(0x96).unwrap().mnemonic(), "SUB (HL)");
        assert_eq!(table.prefixed(0x7E).unwrap().mnemonic(), "BIT 7,(HL)");
        assert_eq!(table.prefixed(0x37).unwrap().mnemonic(), "SWAP A");
    }

    #[test]
    fn worked_example_costs_are_fixed_in_the_table() {
        let table = InstructionTable::new();
        assert_eq!(table.unprefixed(0x39).unwrap().cycles(), 2);
        assert_eq!(table.unprefixed(0x34).unwrap().cycles(), 3);
    }
}
