//! Precise Fault Tests.
//!
//! A fault is raised only when the faulting instruction reaches the ROB head,
//! so everything older has retired and nothing younger has.

use oosim_core::common::SimError;
use oosim_core::core::cpu::HaltReason;
use pretty_assertions::assert_eq;

use crate::common::TestContext;
use crate::common::builder::*;

#[test]
fn test_divide_by_zero_is_precise() {
    let mut ctx = TestContext::new(&[movc(1, 5), movc(2, 0), div(3, 1, 2), movc(4, 4), halt()]);
    assert_eq!(ctx.run_checked(), Err(SimError::DivideByZero { pc: 4008 }));
    assert_eq!(ctx.reg(1), 5);
    assert_eq!(ctx.reg(4), 0);
    assert_eq!(ctx.sim.instructions_retired(), 2);
}

#[test]
fn test_fault_repeats_on_next_step() {
    let mut ctx = TestContext::new(&[movc(1, 0), div(2, 1, 1), halt()]);
    let first = ctx.run().unwrap_err();
    assert_eq!(ctx.sim.step().unwrap_err(), first);
}

#[test]
fn test_wrong_path_fault_vanishes() {
    let mut ctx = TestContext::new(&[
        movc(1, 0),
        addl(2, 1, 0),
        bz(12),
        div(3, 1, 1),
        movc(4, 1),
        movc(5, 5),
        halt(),
    ]);
    assert_eq!(ctx.run_checked(), Ok(HaltReason::HaltInstruction));
    assert_eq!((ctx.reg(3), ctx.reg(4), ctx.reg(5)), (0, 0, 5));
}

#[test]
fn test_wrong_path_bad_address_vanishes() {
    let mut ctx = TestContext::new(&[
        movc(1, -50),
        cmp(1, 1),
        bz(8),
        load(2, 1, 0),
        halt(),
    ]);
    assert_eq!(ctx.run_checked(), Ok(HaltReason::HaltInstruction));
    assert_eq!(ctx.reg(2), 0);
}

#[test]
fn test_stores_before_fault_are_visible() {
    let mut ctx = TestContext::new(&[
        movc(1, 9),
        store(1, 0, 3),
        movc(2, -1),
        store(1, 2, 0),
        store(1, 0, 4),
        halt(),
    ]);
    ctx.assert_matches_reference();
    assert_eq!(ctx.sim.memory()[3], 9);
    assert_eq!(ctx.sim.memory()[4], 0);
}
