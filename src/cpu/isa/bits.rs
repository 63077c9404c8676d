//! Bit-level operations: the unprefixed accumulator rotates and the whole
//! 0xCB-prefixed space (rotates, shifts, SWAP, BIT, RES, SET).

use super::{Opcode, OpcodeMap, OPERANDS8};
use crate::cpu::registers::{Flags, Register};
use crate::cpu::Cpu;

type ShiftFn = fn(&mut Cpu, u8) -> u8;

/// 0x07/0x0F/0x17/0x1F rotate the accumulator through the same machinery as
/// the prefixed forms, but always clear the zero flag.
pub(super) fn register_accumulator_rotates(map: &mut OpcodeMap) {
    const ROTATES: [(u8, &str, ShiftFn); 4] = [
        (0x07, "RLCA", rlc),
        (0x0F, "RRCA", rrc),
        (0x17, "RLA", rl),
        (0x1F, "RRA", rr),
    ];
    for (value, mnemonic, op) in ROTATES {
        map.set(
            value,
            Opcode::new(mnemonic, 1, move |cpu, _mmu| {
                let a = cpu.get8(Register::A)?;
                let result = op(cpu, a);
                cpu.disable_flag(Flags::ZERO);
                cpu.set8(Register::A, result)
            }),
        );
    }
}

pub(super) fn register_prefixed(map: &mut OpcodeMap) {
    // 0x00-0x3F: one rotate/shift row per operation.
    const SHIFTS: [(&str, ShiftFn); 8] = [
        ("RLC", rlc),
        ("RRC", rrc),
        ("RL", rl),
        ("RR", rr),
        ("SLA", sla),
        ("SRA", sra),
        ("SWAP", swap),
        ("SRL", srl),
    ];
    for (row, (name, op)) in SHIFTS.into_iter().enumerate() {
        for (column, operand) in OPERANDS8.into_iter().enumerate() {
            let value = (row * 8 + column) as u8;
            let cycles = if operand.is_memory() { 4 } else { 2 };
            map.set(
                value,
                Opcode::new(format!("{name} {}", operand.name()), cycles, move |cpu, mmu| {
                    let value = operand.read(cpu, mmu)?;
                    let result = op(cpu, value);
                    operand.write(cpu, mmu, result)
                }),
            );
        }
    }

    // 0x40-0xFF: BIT, RES and SET over bit index and operand.
    for bit in 0..8u8 {
        for (column, operand) in OPERANDS8.into_iter().enumerate() {
            let offset = (bit as usize * 8 + column) as u8;

            // BIT only reads, so the memory form is one cycle cheaper than
            // the read-modify-write operations.
            let cycles = if operand.is_memory() { 3 } else { 2 };
            map.set(
                0x40 + offset,
                Opcode::new(
                    format!("BIT {bit},{}", operand.name()),
                    cycles,
                    move |cpu, mmu| {
                        let value = operand.read(cpu, mmu)?;
                        cpu.set_flag(Flags::ZERO, value & (1 << bit) == 0);
                        cpu.disable_flag(Flags::SUBTRACT);
                        cpu.enable_flag(Flags::HALF_CARRY);
                        Ok(())
                    },
                ),
            );

            let cycles = if operand.is_memory() { 4 } else { 2 };
            map.set(
                0x80 + offset,
                Opcode::new(
                    format!("RES {bit},{}", operand.name()),
                    cycles,
                    move |cpu, mmu| {
                        let value = operand.read(cpu, mmu)?;
                        operand.write(cpu, mmu, value & !(1 << bit))
                    },
                ),
            );
            map.set(
                0xC0 + offset,
                Opcode::new(
                    format!("SET {bit},{}", operand.name()),
                    cycles,
                    move |cpu, mmu| {
                        let value = operand.read(cpu, mmu)?;
                        operand.write(cpu, mmu, value | 1 << bit)
                    },
                ),
            );
        }
    }
}

// The shift helpers set all four flags from the result; the accumulator
// rotates overwrite zero afterwards.

fn rlc(cpu: &mut Cpu, value: u8) -> u8 {
    let carry = value >> 7;
    let result = value << 1 | carry;
    shift_flags(cpu, result, carry == 1);
    result
}

fn rrc(cpu: &mut Cpu, value: u8) -> u8 {
    let carry = value & 1;
    let result = value >> 1 | carry << 7;
    shift_flags(cpu, result, carry == 1);
    result
}

fn rl(cpu: &mut Cpu, value: u8) -> u8 {
    let carry_in = u8::from(cpu.is_flag_set(Flags::CARRY));
    let result = value << 1 | carry_in;
    shift_flags(cpu, result, value >> 7 == 1);
    result
}

fn rr(cpu: &mut Cpu, value: u8) -> u8 {
    let carry_in = u8::from(cpu.is_flag_set(Flags::CARRY));
    let result = value >> 1 | carry_in << 7;
    shift_flags(cpu, result, value & 1 == 1);
    result
}

fn sla(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value << 1;
    shift_flags(cpu, result, value >> 7 == 1);
    result
}

/// Arithmetic shift right: bit 7 is preserved.
fn sra(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value >> 1 | value & 0x80;
    shift_flags(cpu, result, value & 1 == 1);
    result
}

fn swap(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value >> 4 | value << 4;
    shift_flags(cpu, result, false);
    result
}

fn srl(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value >> 1;
    shift_flags(cpu, result, value & 1 == 1);
    result
}

fn shift_flags(cpu: &mut Cpu, result: u8, carry: bool) {
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.disable_flag(Flags::SUBTRACT);
    cpu.disable_flag(Flags::HALF_CARRY);
    cpu.set_flag(Flags::CARRY, carry);
}
