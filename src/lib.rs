//! Emulation core for the Sharp LR35902 ("GBZ80"), the CPU of the original
//! Game Boy, together with its flat 64 KiB address space.
//!
//! The crate covers the instruction execution engine only: the register file
//! with its 8/16-bit pairing rules, the packed flag register, the opcode
//! dispatch tables (unprefixed and 0xCB-prefixed), and the [`Mmu`] the CPU
//! reads and writes through. Video, audio, input, cartridge banking and
//! interrupt wiring are the hosting application's problem; it maps those
//! subsystems into the address space and drives the CPU one [`Cpu::step`] at
//! a time.
//!
//! ```
//! use gbz80_core::{Cpu, Mmu, Register};
//!
//! let mut cpu = Cpu::new();
//! let mut mmu = Mmu::new();
//!
//! // LD A,0x2A at the reset program counter, then ADD A,A.
//! mmu.write_byte(0x0100, 0x3E);
//! mmu.write_byte(0x0101, 0x2A);
//! mmu.write_byte(0x0102, 0x87);
//!
//! cpu.step(&mut mmu).unwrap();
//! cpu.step(&mut mmu).unwrap();
//! assert_eq!(cpu.get8(Register::A).unwrap(), 0x54);
//! assert_eq!(cpu.clock().m_cycles(), 3);
//! ```

pub mod clock;
pub mod cpu;
pub mod error;
pub mod mmu;

pub use clock::Clock;
pub use cpu::isa::{self, InstructionTable, Opcode};
pub use cpu::registers::{Flags, Register, Width};
pub use cpu::Cpu;
pub use error::{CoreError, CoreResult};
pub use mmu::Mmu;
