//! Register Renaming Tests.
//!
//! Observes the rename table, MRI map and free list through snapshots while
//! short programs are in flight.

use oosim_core::core::rename::RegSource;
use oosim_core::isa::Opcode;
use pretty_assertions::assert_eq;

use crate::common::TestContext;
use crate::common::builder::*;

const CC: usize = 16;

#[test]
fn test_initial_state_all_from_arf() {
    let ctx = TestContext::new(&[halt()]);
    let snap = ctx.sim.snapshot();
    assert_eq!(snap.free_list.len(), 20);
    assert_eq!(snap.rename.len(), 17);
    assert!(snap.rename.iter().all(|s| s.entry.source == RegSource::Arf));
    assert!(snap.rename.iter().all(|s| s.most_recent.is_none()));
    assert!(snap.rob_entries.is_empty());
}

#[test]
fn test_flag_setter_maps_rd_and_cc_to_one_register() {
    let mut ctx = TestContext::new(&[movc(1, 3), mul(2, 1, 1), halt()]);
    let mut seen = false;
    for _ in 0..40 {
        ctx.step_n(1);
        let snap = ctx.sim.snapshot();
        let Some(slot) = snap.rob_entries.iter().find(|e| e.opcode == Opcode::Mul) else {
            continue;
        };
        let phys = slot.phys.expect("MUL owns a register");
        assert_eq!(snap.rename[2].entry.producer(), Some(phys));
        assert_eq!(snap.rename[CC].entry.producer(), Some(phys));
        assert_eq!(snap.rename[2].most_recent, Some(phys));
        assert_eq!(snap.rename[CC].most_recent, Some(phys));
        seen = true;
        break;
    }
    assert!(seen, "MUL never observed in flight");
    assert_eq!(ctx.run_checked(), Ok(oosim_core::core::cpu::HaltReason::HaltInstruction));
    assert_eq!(ctx.reg(2), 9);
    assert_eq!(ctx.sim.cc().value, 9);
}

#[test]
fn test_movc_leaves_condition_code_alone() {
    let mut ctx = TestContext::new(&[movc(1, 3), addl(2, 1, 1), movc(3, 0), halt()]);
    let _ = ctx.run_checked().unwrap();
    assert_eq!(ctx.reg(3), 0);
    assert_eq!(ctx.sim.cc().value, 4);
    assert!(ctx.sim.cc().flags.positive);
}

#[test]
fn test_older_retirement_does_not_clobber_newer_rename() {
    // Two writers of R1 in flight: the first one retiring must leave R1 on
    // the PRF until the second retires.
    let mut ctx = TestContext::new(&[movc(1, 1), mul(1, 1, 1), addl(1, 1, 5), add(2, 1, 1), halt()]);
    let _ = ctx.run_checked().unwrap();
    assert_eq!(ctx.reg(1), 6);
    assert_eq!(ctx.reg(2), 12);
}

#[test]
fn test_registers_return_to_free_list() {
    let mut ctx = TestContext::new(&[movc(1, 1), movc(2, 2), add(3, 1, 2), cmp(3, 1), sub(4, 3, 2), halt()]);
    let _ = ctx.run_checked().unwrap();
    let snap = ctx.sim.snapshot();
    assert_eq!(snap.free_list.len(), 20);
    assert!(snap.rename.iter().all(|s| s.entry.source == RegSource::Arf));
    assert_eq!(ctx.reg(4), 1);
}

#[test]
fn test_free_list_exhaustion_stalls_dispatch() {
    let mut config = oosim_core::Config::default();
    config.core.arch_regs = 8;
    config.core.phys_regs = 9;
    let program: Vec<_> = [movc(1, 3)]
        .into_iter()
        .chain((0..12).map(|_| mul(1, 1, 1)))
        .chain([halt()])
        .collect();
    let mut ctx = TestContext::with_config(&program, config);
    ctx.assert_matches_reference();
    assert!(ctx.sim.stats().stalls_phys_reg > 0);
}
