//! Sequential Equivalence Properties.
//!
//! Random programs run on the out-of-order core must leave the same registers,
//! condition code and memory as the in-order reference, retire the same
//! addresses in the same order, and never break a structural invariant.
//!
//! `R0` is never written, so it can serve as a zero base for every memory
//! access and keep all addresses in bounds.

use oosim_core::Config;
use oosim_core::common::Word;
use oosim_core::isa::Instruction;
use proptest::prelude::*;

use crate::common::TestContext;
use crate::common::builder::*;

const DATA_REGS: std::ops::Range<usize> = 1..8;
const SOURCE_REGS: std::ops::Range<usize> = 0..8;

fn reg_reg() -> impl Strategy<Value = Instruction> {
    (0..6usize, DATA_REGS, SOURCE_REGS, SOURCE_REGS).prop_map(|(op, rd, a, b)| match op {
        0 => add(rd, a, b),
        1 => sub(rd, a, b),
        2 => mul(rd, a, b),
        3 => and(rd, a, b),
        4 => or(rd, a, b),
        _ => xor(rd, a, b),
    })
}

fn immediate() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        (DATA_REGS, -100..100 as Word).prop_map(|(rd, imm)| movc(rd, imm)),
        (DATA_REGS, SOURCE_REGS, -20..20 as Word).prop_map(|(rd, rs, imm)| addl(rd, rs, imm)),
        (DATA_REGS, SOURCE_REGS, -20..20 as Word).prop_map(|(rd, rs, imm)| subl(rd, rs, imm)),
        (SOURCE_REGS, SOURCE_REGS).prop_map(|(a, b)| cmp(a, b)),
    ]
}

fn memory() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        (DATA_REGS, 0..32 as Word).prop_map(|(rd, off)| load(rd, 0, off)),
        (SOURCE_REGS, 0..32 as Word).prop_map(|(src, off)| store(src, 0, off)),
    ]
}

/// Forward-only conditional branches, so every program terminates.
fn forward_branch() -> impl Strategy<Value = Instruction> {
    (0..4usize, 1..4 as Word).prop_map(|(op, skip)| {
        let imm = skip * 4;
        match op {
            0 => bz(imm),
            1 => bnz(imm),
            2 => bp(imm),
            _ => bnp(imm),
        }
    })
}

fn straight_line() -> impl Strategy<Value = Vec<Instruction>> {
    prop::collection::vec(prop_oneof![3 => reg_reg(), 3 => immediate(), 2 => memory()], 1..40)
}

fn with_branches() -> impl Strategy<Value = Vec<Instruction>> {
    prop::collection::vec(
        prop_oneof![3 => reg_reg(), 3 => immediate(), 2 => memory(), 2 => forward_branch()],
        1..40,
    )
}

fn small_config() -> impl Strategy<Value = Config> {
    (2..=16usize, 17..=24usize, 1..=8usize, 1..=6usize).prop_map(|(rob, phys, iq, lsq)| {
        let mut config = Config::default();
        config.core.rob_size = rob;
        config.core.phys_regs = phys;
        config.core.issue_queue_size = iq;
        config.core.lsq_size = lsq;
        config.memory.data_words = 64;
        config
    })
}

fn terminated(mut program: Vec<Instruction>) -> Vec<Instruction> {
    program.push(halt());
    program
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_straight_line_matches_reference(program in straight_line()) {
        TestContext::new(&terminated(program)).assert_matches_reference();
    }

    #[test]
    fn prop_forward_branches_match_reference(program in with_branches()) {
        TestContext::new(&terminated(program)).assert_matches_reference();
    }

    #[test]
    fn prop_small_structures_match_reference(program in with_branches(), config in small_config()) {
        TestContext::with_config(&terminated(program), config).assert_matches_reference();
    }

    #[test]
    fn prop_stream_exhaustion_matches_reference(program in with_branches()) {
        TestContext::new(&program).assert_matches_reference();
    }

    #[test]
    fn prop_predictions_cover_every_resolved_branch(program in with_branches()) {
        let program = terminated(program);
        let mut ctx = TestContext::new(&program);
        let (reference, _) = ctx.reference();
        let _ = ctx.run_checked().unwrap();
        let branches = reference
            .trace
            .iter()
            .filter(|pc| {
                let idx = usize::try_from((**pc - 4000) / 4).unwrap();
                program[idx].opcode.is_conditional()
            })
            .count() as u64;
        let stats = ctx.sim.stats();
        prop_assert_eq!(stats.branch_predictions + stats.branch_mispredictions, branches);
        prop_assert_eq!(stats.flushes, stats.branch_mispredictions);
    }
}
