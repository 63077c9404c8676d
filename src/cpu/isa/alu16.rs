//! 16-bit arithmetic: ADD HL,rr, INC/DEC on register pairs and the
//! stack pointer, and ADD SP,e8.

use super::{Opcode, OpcodeMap, OPERANDS16};
use crate::cpu::registers::{Flags, Register};
use crate::cpu::Cpu;
use crate::error::CoreResult;

pub(super) fn register(map: &mut OpcodeMap) {
    for (index, operand) in OPERANDS16.into_iter().enumerate() {
        let base = (index * 0x10) as u8;

        // 0x09/0x19/0x29/0x39: HL <- HL + rr. Zero flag untouched.
        map.set(
            0x09 + base,
            Opcode::new(format!("ADD HL,{}", operand.name()), 2, move |cpu, _mmu| {
                let value = operand.read(cpu)?;
                add_hl(cpu, value)
            }),
        );

        // 0x03/0x13/0x23/0x33 and 0x0B/0x1B/0x2B/0x3B: no flag effects.
        map.set(
            0x03 + base,
            Opcode::new(format!("INC {}", operand.name()), 2, move |cpu, _mmu| {
                let value = operand.read(cpu)?.wrapping_add(1);
                operand.write(cpu, value)
            }),
        );
        map.set(
            0x0B + base,
            Opcode::new(format!("DEC {}", operand.name()), 2, move |cpu, _mmu| {
                let value = operand.read(cpu)?.wrapping_sub(1);
                operand.write(cpu, value)
            }),
        );
    }

    // 0xE8: SP <- SP + signed immediate. Flags come from the low byte.
    map.set(
        0xE8,
        Opcode::new("ADD SP,e8", 4, |cpu, mmu| {
            let offset = cpu.fetch_byte(mmu) as i8;
            let result = signed_stack_sum(cpu, offset);
            cpu.set_stack_pointer(result);
            Ok(())
        }),
    );
}

/// 16-bit addition into HL, wrapping at 16 bits. Subtract is cleared,
/// half-carry reflects a carry out of bit 11, carry a carry out of bit 15;
/// the zero flag is not affected by this family.
fn add_hl(cpu: &mut Cpu, value: u16) -> CoreResult<()> {
    let hl = cpu.get16(Register::HL)?;
    let (result, overflow) = hl.overflowing_add(value);
    cpu.disable_flag(Flags::SUBTRACT);
    cpu.set_flag(Flags::HALF_CARRY, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
    cpu.set_flag(Flags::CARRY, overflow);
    cpu.set16(Register::HL, result)
}

/// SP plus a signed 8-bit offset, with the flag rules shared by ADD SP,e8
/// and LD HL,SP+e8: zero and subtract cleared, half-carry and carry from
/// the unsigned low-byte addition.
pub(super) fn signed_stack_sum(cpu: &mut Cpu, offset: i8) -> u16 {
    let sp = cpu.stack_pointer();
    let offset = offset as u16;
    cpu.disable_flag(Flags::ZERO);
    cpu.disable_flag(Flags::SUBTRACT);
    cpu.set_flag(Flags::HALF_CARRY, (sp & 0x000F) + (offset & 0x000F) > 0x000F);
    cpu.set_flag(Flags::CARRY, (sp & 0x00FF) + (offset & 0x00FF) > 0x00FF);
    sp.wrapping_add(offset)
}
