//! Control transfers: absolute and relative jumps, calls, returns and the
//! RST restart vectors. Conditional forms carry their not-taken cost in the
//! table and record the taken cost themselves.

use super::{Opcode, OpcodeMap};
use crate::cpu::registers::{Flags, Register};
use crate::cpu::Cpu;

/// Branch condition encoded in bits 3-4 of the conditional opcodes.
#[derive(Debug, Clone, Copy)]
enum Condition {
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

impl Condition {
    fn name(self) -> &'static str {
        match self {
            Condition::NotZero => "NZ",
            Condition::Zero => "Z",
            Condition::NotCarry => "NC",
            Condition::Carry => "C",
        }
    }

    fn holds(self, cpu: &Cpu) -> bool {
        match self {
            Condition::NotZero => !cpu.is_flag_set(Flags::ZERO),
            Condition::Zero => cpu.is_flag_set(Flags::ZERO),
            Condition::NotCarry => !cpu.is_flag_set(Flags::CARRY),
            Condition::Carry => cpu.is_flag_set(Flags::CARRY),
        }
    }
}

const CONDITIONS: [Condition; 4] = [
    Condition::NotZero,
    Condition::Zero,
    Condition::NotCarry,
    Condition::Carry,
];

pub(super) fn register(map: &mut OpcodeMap) {
    // Unconditional forms.
    map.set(
        0xC3,
        Opcode::new("JP a16", 4, |cpu, mmu| {
            let target = cpu.fetch_word(mmu)?;
            cpu.set_program_counter(target);
            Ok(())
        }),
    );
    map.set(
        0xE9,
        Opcode::new("JP HL", 1, |cpu, _mmu| {
            let target = cpu.get16(Register::HL)?;
            cpu.set_program_counter(target);
            Ok(())
        }),
    );
    map.set(
        0x18,
        Opcode::new("JR e8", 3, |cpu, mmu| {
            let offset = cpu.fetch_byte(mmu) as i8;
            relative_jump(cpu, offset);
            Ok(())
        }),
    );
    map.set(
        0xCD,
        Opcode::new("CALL a16", 6, |cpu, mmu| {
            let target = cpu.fetch_word(mmu)?;
            cpu.push(mmu, cpu.program_counter())?;
            cpu.set_program_counter(target);
            Ok(())
        }),
    );
    map.set(
        0xC9,
        Opcode::new("RET", 4, |cpu, mmu| {
            let target = cpu.pop(mmu)?;
            cpu.set_program_counter(target);
            Ok(())
        }),
    );
    map.set(
        0xD9,
        Opcode::new("RETI", 4, |cpu, mmu| {
            let target = cpu.pop(mmu)?;
            cpu.set_program_counter(target);
            cpu.set_interrupts_enabled(true);
            Ok(())
        }),
    );

    // Conditional forms, one per condition row.
    for (index, condition) in CONDITIONS.into_iter().enumerate() {
        let row = (index * 8) as u8;

        map.set(
            0xC2 + row,
            Opcode::new(format!("JP {},a16", condition.name()), 3, move |cpu, mmu| {
                let target = cpu.fetch_word(mmu)?;
                if condition.holds(cpu) {
                    cpu.set_program_counter(target);
                    cpu.set_last_execution_cycles(4);
                }
                Ok(())
            }),
        );
        map.set(
            0x20 + row,
            Opcode::new(format!("JR {},e8", condition.name()), 2, move |cpu, mmu| {
                let offset = cpu.fetch_byte(mmu) as i8;
                if condition.holds(cpu) {
                    relative_jump(cpu, offset);
                    cpu.set_last_execution_cycles(3);
                }
                Ok(())
            }),
        );
        map.set(
            0xC4 + row,
            Opcode::new(
                format!("CALL {},a16", condition.name()),
                3,
                move |cpu, mmu| {
                    let target = cpu.fetch_word(mmu)?;
                    if condition.holds(cpu) {
                        cpu.push(mmu, cpu.program_counter())?;
                        cpu.set_program_counter(target);
                        cpu.set_last_execution_cycles(6);
                    }
                    Ok(())
                },
            ),
        );
        map.set(
            0xC0 + row,
            Opcode::new(format!("RET {}", condition.name()), 2, move |cpu, mmu| {
                if condition.holds(cpu) {
                    let target = cpu.pop(mmu)?;
                    cpu.set_program_counter(target);
                    cpu.set_last_execution_cycles(5);
                }
                Ok(())
            }),
        );
    }

    // RST vectors: 0xC7, 0xCF, ... 0xFF call into page zero.
    for vector in (0x00..=0x38u16).step_by(8) {
        let value = 0xC7 + vector as u8;
        map.set(
            value,
            Opcode::new(format!("RST {vector:#04X}"), 4, move |cpu, mmu| {
                cpu.push(mmu, cpu.program_counter())?;
                cpu.set_program_counter(vector);
                Ok(())
            }),
        );
    }
}

/// PC-relative jump. The offset is measured from the byte after the operand,
/// which is where PC already points once the operand has been fetched.
fn relative_jump(cpu: &mut Cpu, offset: i8) {
    let target = cpu.program_counter().wrapping_add(offset as u16);
    cpu.set_program_counter(target);
}
