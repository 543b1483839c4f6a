//! Control Flow and Branch Prediction Tests.

use oosim_core::core::cpu::HaltReason;
use pretty_assertions::assert_eq;

use crate::common::TestContext;
use crate::common::builder::*;

#[test]
fn test_loop_trains_btb() {
    let mut ctx = TestContext::asm(
        "MOVC R1,#5
         MOVC R2,#0
         ADDL R2,R2,#3   ; loop body
         SUBL R1,R1,#1
         BNZ #-8
         HALT",
    );
    assert_eq!(ctx.run_checked(), Ok(HaltReason::HaltInstruction));
    assert_eq!(ctx.reg(2), 15);
    assert_eq!(ctx.reg(1), 0);

    // First iteration misses on the cold entry, the exit misses on the
    // trained one; the three in between hit.
    let stats = ctx.sim.stats();
    assert_eq!(stats.branch_mispredictions, 2);
    assert_eq!(stats.branch_predictions, 3);
}

#[test]
fn test_ret_redirects_at_dispatch() {
    let mut ctx = TestContext::new(&[movc(5, 4016), ret(5), movc(1, 1), movc(2, 2), movc(3, 3), halt()]);
    assert_eq!(ctx.run_checked(), Ok(HaltReason::HaltInstruction));
    assert_eq!((ctx.reg(1), ctx.reg(2), ctx.reg(3)), (0, 0, 3));

    let stats = ctx.sim.stats();
    assert!(stats.stalls_ret_operand > 0, "RET waits for MOVC to write back");
    assert_eq!(stats.branch_mispredictions, 1);
    // RET resolves before the back end sees it: nothing younger was dispatched.
    assert_eq!(stats.flushes, 0);
    assert_eq!(stats.instructions_retired, 4);
}

#[test]
fn test_jalr_links_and_jumps() {
    let mut ctx = TestContext::new(&[movc(6, 4012), jalr(7, 6, 0), movc(1, 1), movc(1, 9), halt()]);
    let _ = ctx.run_checked().unwrap();
    assert_eq!(ctx.reg(1), 9);
    assert_eq!(ctx.reg(7), 4008);
}

#[test]
fn test_call_and_return() {
    let mut ctx = TestContext::asm(
        "MOVC R6,#4020
         JALR R7,R6,#0   ; call
         ADDL R2,R1,#1
         HALT
         HALT
         MOVC R1,#41     ; callee
         RET R7",
    );
    ctx.assert_matches_reference();
    assert_eq!(ctx.reg(2), 42);
}

#[test]
fn test_jump_skips_block() {
    let mut ctx = TestContext::new(&[movc(1, 4000), jump(1, 12), movc(2, 1), movc(3, 3), halt()]);
    let _ = ctx.run_checked().unwrap();
    assert_eq!(ctx.reg(2), 0);
    assert_eq!(ctx.reg(3), 3);
}

#[test]
fn test_cmp_drives_conditional() {
    let mut ctx = TestContext::new(&[
        movc(1, 3),
        movc(2, 7),
        cmp(1, 2),
        bnp(8),
        movc(3, 1),
        movc(4, 1),
        halt(),
    ]);
    ctx.assert_matches_reference();
    assert_eq!(ctx.sim.cc().value, -1);
    assert_eq!((ctx.reg(3), ctx.reg(4)), (0, 1));
}

#[test]
fn test_bnp_falls_through_on_zero() {
    let mut ctx = TestContext::new(&[movc(1, 0), addl(2, 1, 0), bnp(8), movc(3, 7), halt()]);
    ctx.assert_matches_reference();
    assert_eq!(ctx.sim.cc().value, 0);
    assert_eq!(ctx.reg(3), 7);
}

#[test]
fn test_second_branch_waits_for_first() {
    let mut ctx = TestContext::new(&[movc(1, 0), bz(4), bz(4), bp(4), halt()]);
    assert_eq!(ctx.run_checked(), Ok(HaltReason::HaltInstruction));
    let stats = ctx.sim.stats();
    assert!(stats.stalls_branch > 0);
    assert_eq!(stats.branch_predictions + stats.branch_mispredictions, 3);
}

#[test]
fn test_backward_branch_to_exhaustion() {
    let mut ctx = TestContext::new(&[movc(1, 3), subl(1, 1, 1), bp(-4)]);
    assert_eq!(ctx.run_checked(), Ok(HaltReason::StreamExhausted));
    assert_eq!(ctx.reg(1), 0);
}
