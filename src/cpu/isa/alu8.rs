//! 8-bit arithmetic and logic: the accumulator ALU block (0x80-0xBF plus
//! the d8 column) and INC/DEC on 8-bit operands.

use super::{Opcode, OpcodeMap, OPERANDS8};
use crate::cpu::registers::{Flags, Register};
use crate::cpu::Cpu;
use crate::error::CoreResult;

pub(super) fn register(map: &mut OpcodeMap) {
    type AluFn = fn(&mut Cpu, u8) -> CoreResult<()>;
    const OPS: [(&str, AluFn); 8] = [
        ("ADD A,", add),
        ("ADC A,", adc),
        ("SUB ", sub),
        ("SBC A,", sbc),
        ("AND ", and),
        ("XOR ", xor),
        ("OR ", or),
        ("CP ", cp),
    ];

    // 0x80-0xBF: one row per operation, one column per operand slot.
    for (row, (prefix, op)) in OPS.into_iter().enumerate() {
        for (column, operand) in OPERANDS8.into_iter().enumerate() {
            let value = 0x80 + (row * 8 + column) as u8;
            let cycles = if operand.is_memory() { 2 } else { 1 };
            map.set(
                value,
                Opcode::new(format!("{prefix}{}", operand.name()), cycles, move |cpu, mmu| {
                    let operand_value = operand.read(cpu, mmu)?;
                    op(cpu, operand_value)
                }),
            );
        }

        // Immediate column: 0xC6, 0xCE, ... 0xFE.
        let value = 0xC6 + (row * 8) as u8;
        map.set(
            value,
            Opcode::new(format!("{prefix}d8"), 2, move |cpu, mmu| {
                let operand_value = cpu.fetch_byte(mmu);
                op(cpu, operand_value)
            }),
        );
    }

    // INC r / DEC r, with the (HL) slot reading and writing through memory.
    for (index, operand) in OPERANDS8.into_iter().enumerate() {
        let cycles = if operand.is_memory() { 3 } else { 1 };

        map.set(
            0x04 + (index * 8) as u8,
            Opcode::new(format!("INC {}", operand.name()), cycles, move |cpu, mmu| {
                let value = operand.read(cpu, mmu)?;
                let result = inc(cpu, value);
                operand.write(cpu, mmu, result)
            }),
        );
        map.set(
            0x05 + (index * 8) as u8,
            Opcode::new(format!("DEC {}", operand.name()), cycles, move |cpu, mmu| {
                let value = operand.read(cpu, mmu)?;
                let result = dec(cpu, value);
                operand.write(cpu, mmu, result)
            }),
        );
    }
}

fn add(cpu: &mut Cpu, value: u8) -> CoreResult<()> {
    let a = cpu.get8(Register::A)?;
    let (result, overflow) = a.overflowing_add(value);
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.disable_flag(Flags::SUBTRACT);
    cpu.set_flag(Flags::HALF_CARRY, (a & 0x0F) + (value & 0x0F) > 0x0F);
    cpu.set_flag(Flags::CARRY, overflow);
    cpu.set8(Register::A, result)
}

fn adc(cpu: &mut Cpu, value: u8) -> CoreResult<()> {
    let a = cpu.get8(Register::A)?;
    let carry_in = u8::from(cpu.is_flag_set(Flags::CARRY));
    let (partial, overflow1) = a.overflowing_add(value);
    let (result, overflow2) = partial.overflowing_add(carry_in);
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.disable_flag(Flags::SUBTRACT);
    cpu.set_flag(Flags::HALF_CARRY, (a & 0x0F) + (value & 0x0F) + carry_in > 0x0F);
    cpu.set_flag(Flags::CARRY, overflow1 || overflow2);
    cpu.set8(Register::A, result)
}

fn sub(cpu: &mut Cpu, value: u8) -> CoreResult<()> {
    let a = cpu.get8(Register::A)?;
    let (result, borrow) = a.overflowing_sub(value);
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.enable_flag(Flags::SUBTRACT);
    cpu.set_flag(Flags::HALF_CARRY, (a & 0x0F) < (value & 0x0F));
    cpu.set_flag(Flags::CARRY, borrow);
    cpu.set8(Register::A, result)
}

fn sbc(cpu: &mut Cpu, value: u8) -> CoreResult<()> {
    let a = cpu.get8(Register::A)?;
    let carry_in = u8::from(cpu.is_flag_set(Flags::CARRY));
    let (partial, borrow1) = a.overflowing_sub(value);
    let (result, borrow2) = partial.overflowing_sub(carry_in);
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.enable_flag(Flags::SUBTRACT);
    cpu.set_flag(
        Flags::HALF_CARRY,
        u16::from(a & 0x0F) < u16::from(value & 0x0F) + u16::from(carry_in),
    );
    cpu.set_flag(Flags::CARRY, borrow1 || borrow2);
    cpu.set8(Register::A, result)
}

fn and(cpu: &mut Cpu, value: u8) -> CoreResult<()> {
    let result = cpu.get8(Register::A)? & value;
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.disable_flag(Flags::SUBTRACT);
    cpu.enable_flag(Flags::HALF_CARRY);
    cpu.disable_flag(Flags::CARRY);
    cpu.set8(Register::A, result)
}

fn xor(cpu: &mut Cpu, value: u8) -> CoreResult<()> {
    let result = cpu.get8(Register::A)? ^ value;
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.disable_flag(Flags::SUBTRACT);
    cpu.disable_flag(Flags::HALF_CARRY);
    cpu.disable_flag(Flags::CARRY);
    cpu.set8(Register::A, result)
}

fn or(cpu: &mut Cpu, value: u8) -> CoreResult<()> {
    let result = cpu.get8(Register::A)? | value;
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.disable_flag(Flags::SUBTRACT);
    cpu.disable_flag(Flags::HALF_CARRY);
    cpu.disable_flag(Flags::CARRY);
    cpu.set8(Register::A, result)
}

/// Compare: subtraction flags without storing the result.
fn cp(cpu: &mut Cpu, value: u8) -> CoreResult<()> {
    let a = cpu.get8(Register::A)?;
    let (result, borrow) = a.overflowing_sub(value);
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.enable_flag(Flags::SUBTRACT);
    cpu.set_flag(Flags::HALF_CARRY, (a & 0x0F) < (value & 0x0F));
    cpu.set_flag(Flags::CARRY, borrow);
    Ok(())
}

/// Increment, wrapping at 8 bits. Carry is untouched.
fn inc(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.disable_flag(Flags::SUBTRACT);
    cpu.set_flag(Flags::HALF_CARRY, value & 0x0F == 0x0F);
    result
}

/// Decrement, wrapping at 8 bits. Carry is untouched.
fn dec(cpu: &mut Cpu, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    cpu.set_flag(Flags::ZERO, result == 0);
    cpu.enable_flag(Flags::SUBTRACT);
    cpu.set_flag(Flags::HALF_CARRY, value & 0x0F == 0);
    result
}
