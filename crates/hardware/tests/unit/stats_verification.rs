//! Statistics Verification Tests.
//!
//! Checks that the performance counters add up for programs whose dynamic
//! instruction mix is known.

use oosim_core::core::cpu::HaltReason;
use oosim_core::stats::SimStats;
use pretty_assertions::assert_eq;

use crate::common::TestContext;
use crate::common::builder::*;

#[test]
fn test_loop_instruction_mix() {
    let mut ctx = TestContext::new(&[movc(1, 5), movc(2, 0), addl(2, 2, 3), subl(1, 1, 1), bnz(-8), halt()]);
    assert_eq!(ctx.run_checked(), Ok(HaltReason::HaltInstruction));
    let stats = ctx.sim.stats();

    assert_eq!(stats.instructions_retired, 18);
    assert_eq!(stats.inst_int, 13);
    assert_eq!(stats.inst_branch, 5);
    assert_eq!(stats.inst_muldiv + stats.inst_load + stats.inst_store, 0);
    assert!(stats.cycles > stats.instructions_retired);
    assert!((stats.cpi() * stats.ipc() - 1.0).abs() < 1e-9);
    assert!((stats.branch_accuracy() - 0.6).abs() < 1e-9);
}

#[test]
fn test_memory_and_muldiv_classes() {
    let mut ctx = TestContext::new(&[
        movc(1, 6),
        mul(2, 1, 1),
        div(3, 2, 1),
        store(3, 0, 0),
        load(4, 0, 0),
        cmp(4, 1),
        halt(),
    ]);
    let _ = ctx.run_checked().unwrap();
    let stats = ctx.sim.stats();
    assert_eq!(stats.inst_muldiv, 2);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.inst_int, 2);
    assert_eq!(ctx.reg(4), 6);
}

#[test]
fn test_squash_counts_discarded_entries() {
    let mut ctx = TestContext::new(&[movc(1, 0), addl(2, 1, 0), bz(12), movc(3, 3), movc(4, 4), halt()]);
    let _ = ctx.run_checked().unwrap();
    let stats = ctx.sim.stats();
    assert_eq!(stats.flushes, 1);
    // BZ waits on ADDL's CC (forwarded c9), executes c10 and resolves at
    // c11. Both MOVCs and the fall-through HALT were dispatched by c9.
    assert_eq!(stats.squashed, 3);
    assert_eq!(stats.instructions_retired, 4);
}

#[test]
fn test_fresh_stats_are_zero() {
    let ctx = TestContext::new(&[halt()]);
    assert_eq!(ctx.sim.stats(), &SimStats::default());
    assert!((ctx.sim.stats().branch_accuracy() - 1.0).abs() < f64::EPSILON);
    assert!(ctx.sim.stats().cpi().abs() < f64::EPSILON);
}

#[test]
fn test_stats_serialise_for_reports() {
    let mut ctx = TestContext::new(&[movc(1, 1), halt()]);
    let _ = ctx.run().unwrap();
    let json = serde_json::to_value(ctx.sim.stats()).unwrap();
    assert_eq!(json["instructions_retired"], 2);
    assert_eq!(json["inst_int"], 2);
}
