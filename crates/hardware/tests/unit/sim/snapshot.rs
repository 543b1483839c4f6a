//! Snapshot and Invariant Tests.

use oosim_core::sim::InvariantViolation;
use oosim_core::core::rename::PhysReg;
use pretty_assertions::assert_eq;

use crate::common::TestContext;
use crate::common::builder::*;

#[test]
fn test_snapshot_tracks_progress() {
    let mut ctx = TestContext::new(&[movc(1, 1), movc(2, 2), mul(3, 1, 2), halt()]);
    let before = ctx.sim.snapshot();
    assert_eq!(before.cycle, 0);
    assert_eq!(before.pc, 4000);
    assert!(!before.fetch_halted);

    ctx.step_n(5);
    let during = ctx.sim.snapshot();
    assert_eq!(during.cycle, 5);
    assert!(during.rob.len > 0);
    assert!(during.rob.len <= during.rob.capacity);
    assert_eq!(
        during.free_list.len() + during.rob_entries.iter().filter(|e| e.phys.is_some()).count(),
        20
    );

    let _ = ctx.run_checked().unwrap();
    let after = ctx.sim.snapshot();
    assert_eq!(after.retired, 4);
    assert!(after.fetch_halted);
    assert_eq!(after.arch_regs[3].value, 2);
}

#[test]
fn test_snapshot_serialises() {
    let mut ctx = TestContext::new(&[movc(1, 1), halt()]);
    ctx.step_n(2);
    let json = serde_json::to_value(ctx.sim.snapshot()).unwrap();
    assert_eq!(json["cycle"], 2);
    assert!(json["rename"].as_array().is_some_and(|slots| slots.len() == 17));
    assert!(json["rob"]["capacity"].is_number());
}

#[test]
fn test_checkpoint_live_only_while_branch_unresolved() {
    let mut ctx = TestContext::new(&[movc(1, 0), addl(2, 1, 0), bz(8), movc(3, 3), movc(4, 4), halt()]);
    let mut saw_unresolved = false;
    while !ctx.sim.is_halted() {
        ctx.step_n(1);
        ctx.sim.check_invariants().unwrap();
        let cpu = ctx.sim.cpu();
        assert!(cpu.checkpoints.len() <= 1);
        if !cpu.checkpoints.is_empty() {
            assert!(cpu.branch_unresolved);
            saw_unresolved = true;
        }
    }
    assert!(saw_unresolved);
    assert!(ctx.sim.cpu().checkpoints.is_empty());
}

#[test]
fn test_invariant_violation_renders() {
    let err = InvariantViolation::Leaked(PhysReg(7));
    assert_eq!(err.to_string(), "P7 leaked: neither free nor owned");
    let err = InvariantViolation::CheckpointDepth(2);
    assert!(err.to_string().starts_with("2 checkpoints live"));
}
