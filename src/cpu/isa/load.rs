//! 8-bit and 16-bit loads: the LD r,r' grid, immediate loads, indirect
//! loads through register pairs (including the post-increment/decrement HL
//! forms), the 0xFF00-page LDH forms, stack-pointer transfers and PUSH/POP.

use super::{alu16, Opcode, OpcodeMap, Operand16, OPERANDS16, OPERANDS8};
use crate::cpu::registers::Register;
use crate::cpu::Cpu;
use crate::error::CoreResult;

/// Base address of the high I/O page addressed by LDH and LD (C),A.
const HIGH_PAGE: u16 = 0xFF00;

pub(super) fn register(map: &mut OpcodeMap) {
    // 0x40-0x7F: LD dst,src over the operand grid. 0x76 encodes HALT, not
    // LD (HL),(HL); it is registered by the misc family.
    for (dst_index, dst) in OPERANDS8.into_iter().enumerate() {
        for (src_index, src) in OPERANDS8.into_iter().enumerate() {
            let value = 0x40 + (dst_index * 8 + src_index) as u8;
            if value == 0x76 {
                continue;
            }
            let cycles = if dst.is_memory() || src.is_memory() { 2 } else { 1 };
            map.set(
                value,
                Opcode::new(
                    format!("LD {},{}", dst.name(), src.name()),
                    cycles,
                    move |cpu, mmu| {
                        let value = src.read(cpu, mmu)?;
                        dst.write(cpu, mmu, value)
                    },
                ),
            );
        }

        // 0x06/0x0E/..: LD dst,d8.
        let value = 0x06 + (dst_index * 8) as u8;
        let cycles = if dst.is_memory() { 3 } else { 2 };
        map.set(
            value,
            Opcode::new(format!("LD {},d8", dst.name()), cycles, move |cpu, mmu| {
                let value = cpu.fetch_byte(mmu);
                dst.write(cpu, mmu, value)
            }),
        );
    }

    // 0x01/0x11/0x21/0x31: LD rr,d16.
    for (index, dst) in OPERANDS16.into_iter().enumerate() {
        map.set(
            0x01 + (index * 0x10) as u8,
            Opcode::new(format!("LD {},d16", dst.name()), 3, move |cpu, mmu| {
                let value = cpu.fetch_word(mmu)?;
                dst.write(cpu, value)
            }),
        );
    }

    // Indirect accumulator transfers through BC, DE and the
    // post-increment/decrement HL forms.
    accumulator_indirect(map, 0x02, 0x0A, "(BC)", |cpu| cpu.get16(Register::BC), 0);
    accumulator_indirect(map, 0x12, 0x1A, "(DE)", |cpu| cpu.get16(Register::DE), 0);
    accumulator_indirect(map, 0x22, 0x2A, "(HL+)", |cpu| cpu.get16(Register::HL), 1);
    accumulator_indirect(map, 0x32, 0x3A, "(HL-)", |cpu| cpu.get16(Register::HL), -1);

    // 0x08: LD (a16),SP.
    map.set(
        0x08,
        Opcode::new("LD (a16),SP", 5, |cpu, mmu| {
            let address = cpu.fetch_word(mmu)?;
            mmu.write_word(address, cpu.stack_pointer())
        }),
    );

    // High-page loads: LDH uses an 8-bit immediate offset, the (C) forms
    // use register C as the offset.
    map.set(
        0xE0,
        Opcode::new("LDH (a8),A", 3, |cpu, mmu| {
            let address = HIGH_PAGE + u16::from(cpu.fetch_byte(mmu));
            mmu.write_byte(address, cpu.get8(Register::A)?);
            Ok(())
        }),
    );
    map.set(
        0xF0,
        Opcode::new("LDH A,(a8)", 3, |cpu, mmu| {
            let address = HIGH_PAGE + u16::from(cpu.fetch_byte(mmu));
            cpu.set8(Register::A, mmu.read_byte(address))
        }),
    );
    map.set(
        0xE2,
        Opcode::new("LD (C),A", 2, |cpu, mmu| {
            let address = HIGH_PAGE + u16::from(cpu.get8(Register::C)?);
            mmu.write_byte(address, cpu.get8(Register::A)?);
            Ok(())
        }),
    );
    map.set(
        0xF2,
        Opcode::new("LD A,(C)", 2, |cpu, mmu| {
            let address = HIGH_PAGE + u16::from(cpu.get8(Register::C)?);
            cpu.set8(Register::A, mmu.read_byte(address))
        }),
    );

    // Absolute accumulator transfers.
    map.set(
        0xEA,
        Opcode::new("LD (a16),A", 4, |cpu, mmu| {
            let address = cpu.fetch_word(mmu)?;
            mmu.write_byte(address, cpu.get8(Register::A)?);
            Ok(())
        }),
    );
    map.set(
        0xFA,
        Opcode::new("LD A,(a16)", 4, |cpu, mmu| {
            let address = cpu.fetch_word(mmu)?;
            cpu.set8(Register::A, mmu.read_byte(address))
        }),
    );

    // Stack-pointer transfers.
    map.set(
        0xF9,
        Opcode::new("LD SP,HL", 2, |cpu, _mmu| {
            let value = cpu.get16(Register::HL)?;
            cpu.set_stack_pointer(value);
            Ok(())
        }),
    );
    map.set(
        0xF8,
        Opcode::new("LD HL,SP+e8", 3, |cpu, mmu| {
            let offset = cpu.fetch_byte(mmu) as i8;
            let result = alu16::signed_stack_sum(cpu, offset);
            cpu.set16(Register::HL, result)
        }),
    );

    // PUSH/POP. The stack column swaps SP for AF.
    const STACK_OPERANDS: [Operand16; 4] = [
        Operand16::Pair(Register::BC),
        Operand16::Pair(Register::DE),
        Operand16::Pair(Register::HL),
        Operand16::Pair(Register::AF),
    ];
    for (index, operand) in STACK_OPERANDS.into_iter().enumerate() {
        map.set(
            0xC5 + (index * 0x10) as u8,
            Opcode::new(format!("PUSH {}", operand.name()), 4, move |cpu, mmu| {
                let value = operand.read(cpu)?;
                cpu.push(mmu, value)
            }),
        );
        map.set(
            0xC1 + (index * 0x10) as u8,
            Opcode::new(format!("POP {}", operand.name()), 3, move |cpu, mmu| {
                let value = cpu.pop(mmu)?;
                // POP AF masks the low nibble of F via the register write.
                operand.write(cpu, value)
            }),
        );
    }
}

/// Register the write/read pair of an accumulator transfer through a
/// register-pair address, stepping HL by `hl_step` afterwards for the
/// post-increment/decrement forms.
fn accumulator_indirect(
    map: &mut OpcodeMap,
    store: u8,
    fetch: u8,
    name: &str,
    address_of: fn(&Cpu) -> CoreResult<u16>,
    hl_step: i16,
) {
    map.set(
        store,
        Opcode::new(format!("LD {name},A"), 2, move |cpu, mmu| {
            let address = address_of(cpu)?;
            mmu.write_byte(address, cpu.get8(Register::A)?);
            step_hl(cpu, hl_step)
        }),
    );
    map.set(
        fetch,
        Opcode::new(format!("LD A,{name}"), 2, move |cpu, mmu| {
            let address = address_of(cpu)?;
            cpu.set8(Register::A, mmu.read_byte(address))?;
            step_hl(cpu, hl_step)
        }),
    );
}

fn step_hl(cpu: &mut Cpu, step: i16) -> CoreResult<()> {
    if step == 0 {
        return Ok(());
    }
    let hl = cpu.get16(Register::HL)?.wrapping_add(step as u16);
    cpu.set16(Register::HL, hl)
}
