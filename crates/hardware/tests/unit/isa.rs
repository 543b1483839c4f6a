//! Program Loading Tests.

use oosim_core::common::SimError;
use oosim_core::config::Config;
use oosim_core::core::cpu::HaltReason;
use oosim_core::isa::Opcode;
use oosim_core::sim::loader::{parse_program, parse_raw_json};
use oosim_core::Simulator;

#[test]
fn test_assembly_and_raw_records_agree() {
    let asm = "MOVC R1,#6\nMOVC R2,#7\nMUL R3,R1,R2\nHALT";
    let raw = parse_raw_json(
        r#"[
            {"opcode": 7, "rd": 1, "rs1": -1, "rs2": -1, "imm": 6},
            {"opcode": 7, "rd": 2, "rs1": -1, "rs2": -1, "imm": 7},
            {"opcode": 2, "rd": 3, "rs1": 1, "rs2": 2},
            {"opcode": 12, "rd": -1, "rs1": -1, "rs2": -1}
        ]"#,
    )
    .unwrap();

    let mut from_asm = Simulator::from_assembly(asm, &Config::default()).unwrap();
    let mut from_raw = Simulator::from_raw(&raw, &Config::default()).unwrap();
    assert_eq!(from_asm.run_to_completion(), Ok(HaltReason::HaltInstruction));
    assert_eq!(from_raw.run_to_completion(), Ok(HaltReason::HaltInstruction));
    assert_eq!(from_asm.arch_reg(3), Some(42));
    assert_eq!(from_raw.arch_reg(3), Some(42));
    assert_eq!(from_asm.cycles(), from_raw.cycles());
}

#[test]
fn test_register_out_of_range_rejected() {
    let err = Simulator::from_assembly("MOVC R1,#1\nADD R1,R2,R16", &Config::default()).unwrap_err();
    assert_eq!(
        err,
        SimError::RegisterOutOfRange {
            index: 1,
            reg: 16,
            limit: 16
        }
    );
}

#[test]
fn test_unknown_raw_opcode_rejected() {
    let raw = parse_raw_json(r#"[{"opcode": 16}]"#).unwrap();
    assert_eq!(
        Simulator::from_raw(&raw, &Config::default()).unwrap_err(),
        SimError::UnknownOpcode(0x10)
    );
}

#[test]
fn test_listing_round_trips_through_display() {
    let text = "MOVC R1,#5\nLOAD R2,R1,#3\nSTORE R2,R1,#-1\nJALR R7,R6,#0\nBZ #12\nRET R7\nHALT";
    let program = parse_program(text).unwrap();
    let rendered: Vec<String> = program.iter().map(ToString::to_string).collect();
    assert_eq!(rendered.join("\n"), text);
    assert_eq!(program[2].opcode, Opcode::Store);
    assert_eq!((program[2].rs1, program[2].rs2), (2, 1));
}
