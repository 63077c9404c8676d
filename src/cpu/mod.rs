//! The Sharp LR35902 processor state and its fetch-decode-execute entry
//! points.

pub mod isa;
pub mod registers;

use log::{trace, warn};

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::mmu::Mmu;
use registers::{Flags, Register, Width, FLAG_SLOT, REGISTER_SLOTS};

/// Program counter value after the boot ROM hands over control.
pub const INITIAL_PROGRAM_COUNTER: u16 = 0x0100;

/// Stack pointer value after the boot ROM hands over control.
pub const INITIAL_STACK_POINTER: u16 = 0xFFFE;

/// CPU state: the register file, program counter, stack pointer, the cycle
/// cost of the most recent instruction and the running clock.
///
/// One `Cpu` plus one [`Mmu`] make up an emulation session. Both are plain
/// owned values; nothing here is shared or locked, so concurrent sessions
/// just use separate instances.
pub struct Cpu {
    registers: [u8; REGISTER_SLOTS],
    pc: u16,
    sp: u16,
    last_cycles: u8,
    clock: Clock,
    ime: bool,
    halted: bool,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu {
            registers: [0; REGISTER_SLOTS],
            pc: INITIAL_PROGRAM_COUNTER,
            sp: INITIAL_STACK_POINTER,
            last_cycles: 0,
            clock: Clock::new(),
            ime: false,
            halted: false,
        }
    }

    /// Restore the construction state, clock included.
    pub fn reset(&mut self) {
        *self = Cpu::new();
    }

    // --- Register access ---

    /// Read an 8-bit register. Fails with
    /// [`CoreError::InvalidRegisterWidth`] for a 16-bit identifier.
    pub fn get8(&self, register: Register) -> CoreResult<u8> {
        match register.width() {
            Width::Eight => Ok(self.registers[register.offset()]),
            Width::Sixteen => Err(CoreError::InvalidRegisterWidth {
                register,
                access: Width::Eight,
            }),
        }
    }

    /// Write an 8-bit register. Writes to F keep the low nibble zero.
    pub fn set8(&mut self, register: Register, value: u8) -> CoreResult<()> {
        match register.width() {
            Width::Eight => {
                let value = if register == Register::F {
                    value & 0xF0
                } else {
                    value
                };
                self.registers[register.offset()] = value;
                Ok(())
            }
            Width::Sixteen => Err(CoreError::InvalidRegisterWidth {
                register,
                access: Width::Eight,
            }),
        }
    }

    /// Read a register pair, composed big-endian from its two slots.
    pub fn get16(&self, register: Register) -> CoreResult<u16> {
        match register.width() {
            Width::Sixteen => {
                let offset = register.offset();
                let high = u16::from(self.registers[offset]) << 8;
                let low = u16::from(self.registers[offset + 1]);
                Ok(high & 0xFF00 | low & 0x00FF)
            }
            Width::Eight => Err(CoreError::InvalidRegisterWidth {
                register,
                access: Width::Sixteen,
            }),
        }
    }

    /// Write a register pair, splitting the value into its two slots.
    /// Writes to AF keep the low nibble of F zero.
    pub fn set16(&mut self, register: Register, value: u16) -> CoreResult<()> {
        match register.width() {
            Width::Sixteen => {
                let offset = register.offset();
                let mut low = (value & 0x00FF) as u8;
                if register == Register::AF {
                    low &= 0xF0;
                }
                self.registers[offset] = (value >> 8) as u8;
                self.registers[offset + 1] = low;
                Ok(())
            }
            Width::Eight => Err(CoreError::InvalidRegisterWidth {
                register,
                access: Width::Sixteen,
            }),
        }
    }

    // --- Flag operations ---

    pub fn enable_flag(&mut self, flag: Flags) {
        self.registers[FLAG_SLOT] |= flag.bits();
    }

    pub fn disable_flag(&mut self, flag: Flags) {
        self.registers[FLAG_SLOT] &= !flag.bits();
    }

    pub fn is_flag_set(&self, flag: Flags) -> bool {
        self.registers[FLAG_SLOT] & flag.bits() == flag.bits()
    }

    /// Set or clear a flag from a computed condition.
    pub(crate) fn set_flag(&mut self, flag: Flags, enabled: bool) {
        if enabled {
            self.enable_flag(flag);
        } else {
            self.disable_flag(flag);
        }
    }

    // --- Program counter and stack pointer ---

    pub fn program_counter(&self) -> u16 {
        self.pc
    }

    pub fn set_program_counter(&mut self, value: u16) {
        self.pc = value;
    }

    /// Skip one operand byte.
    pub fn increment_program_counter(&mut self) {
        self.pc = self.pc.wrapping_add(1);
    }

    /// Skip a two-byte operand.
    pub fn increment_program_counter_twice(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    pub fn stack_pointer(&self) -> u16 {
        self.sp
    }

    pub fn set_stack_pointer(&mut self, value: u16) {
        self.sp = value;
    }

    /// Push a word onto the stack. The stack grows downwards; the stack
    /// pointer only moves once the write has succeeded.
    pub(crate) fn push(&mut self, mmu: &mut Mmu, value: u16) -> CoreResult<()> {
        let address = self.sp.wrapping_sub(2);
        mmu.write_word(address, value)?;
        self.sp = address;
        Ok(())
    }

    /// Pop a word off the stack.
    pub(crate) fn pop(&mut self, mmu: &Mmu) -> CoreResult<u16> {
        let value = mmu.read_word(self.sp)?;
        self.sp = self.sp.wrapping_add(2);
        Ok(value)
    }

    // --- Operand fetch ---

    /// Read the operand byte at PC and step past it.
    pub(crate) fn fetch_byte(&mut self, mmu: &Mmu) -> u8 {
        let value = mmu.read_byte(self.pc);
        self.increment_program_counter();
        value
    }

    /// Read the little-endian operand word at PC and step past it.
    pub(crate) fn fetch_word(&mut self, mmu: &Mmu) -> CoreResult<u16> {
        let value = mmu.read_word(self.pc)?;
        self.increment_program_counter_twice();
        Ok(value)
    }

    // --- Interrupt master enable / halt state ---
    //
    // DI, EI, RETI and HALT mutate these; actually servicing interrupts is
    // external wiring, which reads them between steps.

    pub fn interrupts_enabled(&self) -> bool {
        self.ime
    }

    pub(crate) fn set_interrupts_enabled(&mut self, enabled: bool) {
        self.ime = enabled;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub(crate) fn halt(&mut self) {
        self.halted = true;
    }

    /// Wake a halted CPU. Called by the hosting application when an
    /// interrupt becomes pending.
    pub fn resume(&mut self) {
        self.halted = false;
    }

    // --- Execution ---

    /// Decode `opcode` through the instruction table and run its behavior.
    ///
    /// The caller has already fetched the opcode byte at PC and stepped past
    /// it; operand reads inside the behavior continue from the current PC.
    /// The base cycle cost is recorded before the behavior runs, so a
    /// behavior only touches [`Cpu::set_last_execution_cycles`] when its
    /// timing depends on a taken branch.
    ///
    /// An unmapped opcode reports [`CoreError::UnknownOpcode`] without
    /// mutating the CPU or the memory.
    pub fn execute(&mut self, opcode: u8, mmu: &mut Mmu) -> CoreResult<()> {
        let table = isa::table();
        if opcode == isa::CB_PREFIX {
            let suffix = mmu.read_byte(self.pc);
            let instruction = table.prefixed(suffix).ok_or_else(|| {
                warn!("no behavior registered for 0xCB {suffix:#04X}");
                CoreError::UnknownOpcode {
                    opcode: suffix,
                    prefixed: true,
                    pc: self.pc,
                }
            })?;
            self.increment_program_counter();
            trace!("execute 0xCB {:#04X} {}", suffix, instruction.mnemonic());
            self.set_last_execution_cycles(instruction.cycles());
            instruction.run(self, mmu)
        } else {
            let instruction = table.unprefixed(opcode).ok_or_else(|| {
                warn!("no behavior registered for {opcode:#04X}");
                CoreError::UnknownOpcode {
                    opcode,
                    prefixed: false,
                    pc: self.pc,
                }
            })?;
            trace!("execute {:#04X} {}", opcode, instruction.mnemonic());
            self.set_last_execution_cycles(instruction.cycles());
            instruction.run(self, mmu)
        }
    }

    /// One full fetch-decode-execute step, clock advancement included.
    /// Returns the machine-cycle cost of the executed instruction.
    ///
    /// Decode happens before any state is touched, so an unmapped opcode
    /// leaves the CPU exactly as it was. A halted CPU burns one cycle
    /// without fetching.
    pub fn step(&mut self, mmu: &mut Mmu) -> CoreResult<u8> {
        if self.halted {
            self.set_last_execution_cycles(1);
            self.advance_clock();
            return Ok(self.last_cycles);
        }

        let opcode = mmu.read_byte(self.pc);
        if opcode != isa::CB_PREFIX && isa::table().unprefixed(opcode).is_none() {
            return Err(CoreError::UnknownOpcode {
                opcode,
                prefixed: false,
                pc: self.pc,
            });
        }

        self.increment_program_counter();
        self.execute(opcode, mmu)?;
        self.advance_clock();
        Ok(self.last_cycles)
    }

    /// Record the machine-cycle cost of the instruction being executed.
    pub fn set_last_execution_cycles(&mut self, m_cycles: u8) {
        self.last_cycles = m_cycles;
    }

    pub fn last_execution_cycles(&self) -> u8 {
        self.last_cycles
    }

    /// Fold the last instruction's cost into the clock. Called exactly once
    /// per fetch-decode-execute step, after the behavior has run.
    pub fn advance_clock(&mut self) {
        self.clock.advance(self.last_cycles);
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Cpu::new()
    }
}
