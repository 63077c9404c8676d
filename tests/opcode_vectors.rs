//! Whole-instruction state tests driven by JSON vectors: each case gives the
//! full register file and relevant RAM before an instruction, the expected
//! state afterwards and the expected machine-cycle cost.

use serde::Deserialize;

use gbz80_core::{Cpu, Mmu, Register};

#[derive(Deserialize)]
struct TestCase {
    name: String,
    initial: CpuState,
    #[serde(rename = "final")]
    final_state: CpuState,
    cycles: u8,
}

#[derive(Deserialize)]
struct CpuState {
    pc: u16,
    sp: u16,
    a: u8,
    f: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    h: u8,
    l: u8,
    #[serde(default)]
    ram: Vec<(u16, u8)>,
}

fn apply(state: &CpuState, cpu: &mut Cpu, mmu: &mut Mmu) {
    cpu.set_program_counter(state.pc);
    cpu.set_stack_pointer(state.sp);
    cpu.set8(Register::A, state.a).unwrap();
    cpu.set8(Register::F, state.f).unwrap();
    cpu.set8(Register::B, state.b).unwrap();
    cpu.set8(Register::C, state.c).unwrap();
    cpu.set8(Register::D, state.d).unwrap();
    cpu.set8(Register::E, state.e).unwrap();
    cpu.set8(Register::H, state.h).unwrap();
    cpu.set8(Register::L, state.l).unwrap();
    for &(address, value) in &state.ram {
        mmu.write_byte(address, value);
    }
}

fn check(name: &str, state: &CpuState, cpu: &Cpu, mmu: &Mmu) {
    assert_eq!(cpu.program_counter(), state.pc, "{name}: pc");
    assert_eq!(cpu.stack_pointer(), state.sp, "{name}: sp");
    let registers = [
        (Register::A, state.a, "a"),
        (Register::F, state.f, "f"),
        (Register::B, state.b, "b"),
        (Register::C, state.c, "c"),
        (Register::D, state.d, "d"),
        (Register::E, state.e, "e"),
        (Register::H, state.h, "h"),
        (Register::L, state.l, "l"),
    ];
    for (register, expected, label) in registers {
        assert_eq!(
            cpu.get8(register).unwrap(),
            expected,
            "{name}: register {label}"
        );
    }
    for &(address, value) in &state.ram {
        assert_eq!(mmu.read_byte(address), value, "{name}: ram {address:#06X}");
    }
}

#[test]
fn single_step_vectors() {
    let cases: Vec<TestCase> = serde_json::from_str(VECTORS).unwrap();
    assert!(!cases.is_empty());

    for case in &cases {
        let mut cpu = Cpu::new();
        let mut mmu = Mmu::new();
        apply(&case.initial, &mut cpu, &mut mmu);

        let cycles = cpu
            .step(&mut mmu)
            .unwrap_or_else(|e| panic!("{}: {e}", case.name));

        assert_eq!(cycles, case.cycles, "{}: cycles", case.name);
        check(&case.name, &case.final_state, &cpu, &mmu);
    }
}

const VECTORS: &str = r#"[
  {
    "name": "NOP",
    "initial": {"pc": 256, "sp": 65534, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0,
                "ram": [[256, 0]]},
    "final":   {"pc": 257, "sp": 65534, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0},
    "cycles": 1
  },
  {
    "name": "LD B,d8",
    "initial": {"pc": 49152, "sp": 65534, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0,
                "ram": [[49152, 6], [49153, 66]]},
    "final":   {"pc": 49154, "sp": 65534, "a": 0, "f": 0, "b": 66, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0},
    "cycles": 2
  },
  {
    "name": "ADD HL,SP half-carry",
    "initial": {"pc": 256, "sp": 1, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 15, "l": 255,
                "ram": [[256, 57]]},
    "final":   {"pc": 257, "sp": 1, "a": 0, "f": 32, "b": 0, "c": 0, "d": 0, "e": 0, "h": 16, "l": 0},
    "cycles": 2
  },
  {
    "name": "ADD HL,SP wraparound",
    "initial": {"pc": 256, "sp": 1, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 255, "l": 255,
                "ram": [[256, 57]]},
    "final":   {"pc": 257, "sp": 1, "a": 0, "f": 48, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0},
    "cycles": 2
  },
  {
    "name": "INC (HL) wraps to zero",
    "initial": {"pc": 256, "sp": 65534, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 192, "l": 0,
                "ram": [[256, 52], [49152, 255]]},
    "final":   {"pc": 257, "sp": 65534, "a": 0, "f": 160, "b": 0, "c": 0, "d": 0, "e": 0, "h": 192, "l": 0,
                "ram": [[49152, 0]]},
    "cycles": 3
  },
  {
    "name": "ADD A,(HL)",
    "initial": {"pc": 256, "sp": 65534, "a": 15, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 192, "l": 0,
                "ram": [[256, 134], [49152, 1]]},
    "final":   {"pc": 257, "sp": 65534, "a": 16, "f": 32, "b": 0, "c": 0, "d": 0, "e": 0, "h": 192, "l": 0},
    "cycles": 2
  },
  {
    "name": "SUB d8 low-nibble borrow",
    "initial": {"pc": 256, "sp": 65534, "a": 16, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0,
                "ram": [[256, 214], [257, 1]]},
    "final":   {"pc": 258, "sp": 65534, "a": 15, "f": 96, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0},
    "cycles": 2
  },
  {
    "name": "LD A,(HL+)",
    "initial": {"pc": 256, "sp": 65534, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 192, "l": 255,
                "ram": [[256, 42], [49407, 119]]},
    "final":   {"pc": 257, "sp": 65534, "a": 119, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 193, "l": 0},
    "cycles": 2
  },
  {
    "name": "PUSH BC",
    "initial": {"pc": 256, "sp": 65534, "a": 0, "f": 0, "b": 18, "c": 52, "d": 0, "e": 0, "h": 0, "l": 0,
                "ram": [[256, 197]]},
    "final":   {"pc": 257, "sp": 65532, "a": 0, "f": 0, "b": 18, "c": 52, "d": 0, "e": 0, "h": 0, "l": 0,
                "ram": [[65532, 52], [65533, 18]]},
    "cycles": 4
  },
  {
    "name": "RET",
    "initial": {"pc": 256, "sp": 49152, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0,
                "ram": [[256, 201], [49152, 52], [49153, 18]]},
    "final":   {"pc": 4660, "sp": 49154, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0},
    "cycles": 4
  },
  {
    "name": "JR NZ taken backwards",
    "initial": {"pc": 256, "sp": 65534, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0,
                "ram": [[256, 32], [257, 254]]},
    "final":   {"pc": 256, "sp": 65534, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0},
    "cycles": 3
  },
  {
    "name": "JR NZ not taken",
    "initial": {"pc": 256, "sp": 65534, "a": 0, "f": 128, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0,
                "ram": [[256, 32], [257, 254]]},
    "final":   {"pc": 258, "sp": 65534, "a": 0, "f": 128, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0},
    "cycles": 2
  },
  {
    "name": "SWAP E",
    "initial": {"pc": 256, "sp": 65534, "a": 0, "f": 16, "b": 0, "c": 0, "d": 0, "e": 171, "h": 0, "l": 0,
                "ram": [[256, 203], [257, 51]]},
    "final":   {"pc": 258, "sp": 65534, "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 186, "h": 0, "l": 0},
    "cycles": 2
  }
]"#;
