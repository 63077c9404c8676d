//! Everything that stands alone on the opcode map: NOP, HALT, STOP, the
//! interrupt-enable toggles and the accumulator adjustment/complement/carry
//! group.

use super::{Opcode, OpcodeMap};
use crate::cpu::registers::{Flags, Register};

pub(super) fn register(map: &mut OpcodeMap) {
    map.set(0x00, Opcode::new("NOP", 1, |_cpu, _mmu| Ok(())));

    // STOP is encoded as two bytes; the second is padding.
    map.set(
        0x10,
        Opcode::new("STOP", 1, |cpu, mmu| {
            cpu.fetch_byte(mmu);
            cpu.halt();
            Ok(())
        }),
    );

    map.set(
        0x76,
        Opcode::new("HALT", 1, |cpu, _mmu| {
            cpu.halt();
            Ok(())
        }),
    );

    map.set(
        0xF3,
        Opcode::new("DI", 1, |cpu, _mmu| {
            cpu.set_interrupts_enabled(false);
            Ok(())
        }),
    );
    map.set(
        0xFB,
        Opcode::new("EI", 1, |cpu, _mmu| {
            cpu.set_interrupts_enabled(true);
            Ok(())
        }),
    );

    // Decimal adjust after a BCD addition or subtraction.
    map.set(
        0x27,
        Opcode::new("DAA", 1, |cpu, _mmu| {
            let mut a = cpu.get8(Register::A)?;
            let subtract = cpu.is_flag_set(Flags::SUBTRACT);
            let mut adjust = 0u8;
            if cpu.is_flag_set(Flags::HALF_CARRY) || (!subtract && a & 0x0F > 0x09) {
                adjust |= 0x06;
            }
            if cpu.is_flag_set(Flags::CARRY) || (!subtract && a > 0x99) {
                adjust |= 0x60;
                cpu.enable_flag(Flags::CARRY);
            }
            a = if subtract {
                a.wrapping_sub(adjust)
            } else {
                a.wrapping_add(adjust)
            };
            cpu.set_flag(Flags::ZERO, a == 0);
            cpu.disable_flag(Flags::HALF_CARRY);
            cpu.set8(Register::A, a)
        }),
    );

    map.set(
        0x2F,
        Opcode::new("CPL", 1, |cpu, _mmu| {
            let a = cpu.get8(Register::A)?;
            cpu.enable_flag(Flags::SUBTRACT);
            cpu.enable_flag(Flags::HALF_CARRY);
            cpu.set8(Register::A, !a)
        }),
    );

    map.set(
        0x37,
        Opcode::new("SCF", 1, |cpu, _mmu| {
            cpu.disable_flag(Flags::SUBTRACT);
            cpu.disable_flag(Flags::HALF_CARRY);
            cpu.enable_flag(Flags::CARRY);
            Ok(())
        }),
    );

    map.set(
        0x3F,
        Opcode::new("CCF", 1, |cpu, _mmu| {
            let carry = cpu.is_flag_set(Flags::CARRY);
            cpu.disable_flag(Flags::SUBTRACT);
            cpu.disable_flag(Flags::HALF_CARRY);
            cpu.set_flag(Flags::CARRY, !carry);
            Ok(())
        }),
    );
}
