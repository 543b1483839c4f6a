//! Misprediction Recovery Tests.

use oosim_core::core::cpu::HaltReason;
use pretty_assertions::assert_eq;

use crate::common::TestContext;
use crate::common::builder::*;

#[test]
fn test_taken_branch_squashes_fall_through() {
    // CC is zero after ADDL, so BZ is taken past the first ADDL R2.
    let mut ctx = TestContext::new(&[
        movc(1, 0),
        addl(3, 1, 0),
        bz(8),
        addl(2, 1, 2),
        addl(2, 1, 1),
        halt(),
    ]);
    assert_eq!(ctx.run_checked(), Ok(HaltReason::HaltInstruction));
    assert_eq!(ctx.reg(2), 1);

    let stats = ctx.sim.stats();
    assert_eq!(stats.branch_mispredictions, 1);
    assert_eq!(stats.flushes, 1);
    assert_eq!(stats.instructions_retired, 5);
}

#[test]
fn test_squashed_registers_are_reclaimed() {
    let mut ctx = TestContext::new(&[
        movc(1, 0),
        addl(3, 1, 0),
        bz(20),
        movc(4, 1),
        movc(5, 1),
        mul(6, 4, 5),
        movc(7, 1),
        movc(8, 8),
        halt(),
    ]);
    let _ = ctx.run_checked().unwrap();
    let snap = ctx.sim.snapshot();
    assert_eq!(snap.free_list.len(), 20);
    assert_eq!(ctx.reg(4), 0);
    assert_eq!(ctx.reg(6), 0);
    assert_eq!(ctx.reg(7), 0);
    assert_eq!(ctx.reg(8), 8);
}

#[test]
fn test_rename_state_restored_for_later_readers() {
    // The wrong path renames R2; the correct path must read the older R2.
    let mut ctx = TestContext::new(&[
        movc(2, 40),
        movc(1, 1),
        cmp(1, 1),
        bz(8),
        movc(2, 99),
        addl(3, 2, 2),
        halt(),
    ]);
    ctx.assert_matches_reference();
    assert_eq!(ctx.reg(3), 42);
    assert_eq!(ctx.reg(2), 40);
}

#[test]
fn test_not_taken_branch_needs_no_recovery() {
    let mut ctx = TestContext::new(&[movc(1, 5), addl(1, 1, 0), bz(8), movc(2, 2), halt()]);
    let _ = ctx.run_checked().unwrap();
    let stats = ctx.sim.stats();
    assert_eq!(stats.branch_mispredictions, 0);
    assert_eq!(stats.branch_predictions, 1);
    assert_eq!(stats.flushes, 0);
    assert_eq!(ctx.reg(2), 2);
}

#[test]
fn test_wrong_path_halt_is_discarded() {
    let mut ctx = TestContext::new(&[movc(1, 0), addl(1, 1, 0), bz(8), halt(), movc(2, 7), halt()]);
    assert_eq!(ctx.run_checked(), Ok(HaltReason::HaltInstruction));
    assert_eq!(ctx.reg(2), 7);
}

#[test]
fn test_wrong_path_store_never_reaches_memory() {
    let mut ctx = TestContext::new(&[
        movc(1, 0),
        movc(2, 55),
        addl(3, 1, 0),
        bz(8),
        store(2, 1, 10),
        halt(),
    ]);
    let _ = ctx.run_checked().unwrap();
    assert_eq!(ctx.sim.memory()[10], 0);
}
