//! # Statistics Verification Tests
//!
//! This module verifies that [`SimStats`] counts what the machine actually did,
//! and that the report renders the requested sections.

use w32sim_core::stats::{STATS_SECTIONS, SimStats};

use crate::common::harness::TestContext;

fn render(stats: &SimStats, sections: &[&str]) -> String {
    let mut out = Vec::new();
    stats.write_sections(&mut out, sections).unwrap();
    String::from_utf8(out).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Counting
// ══════════════════════════════════════════════════════════

#[test]
fn test_instruction_mix() {
    let mut tc = TestContext::new().load_asm(
        "addi r1, r0, 1
         add r2, r1, r1
         sw r2, 0x100(r0)
         lw r3, 0x100(r0)
         lea r4, r1, r2, 2
         push r3
         pop r5
         trap 9
         halt",
    );
    assert_eq!(tc.run_to_halt(), 9);

    let stats = &tc.cpu().stats;
    assert_eq!(stats.cycles, 9);
    assert_eq!(stats.instructions_retired, 9);
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_lea, 1);
    assert_eq!(stats.inst_stack, 2);
    assert_eq!(stats.traps, 1);
    assert_eq!(stats.unmapped_traps, 1);
    assert_eq!(stats.calls, 0);
}

#[test]
fn test_faulting_step_counts_cycle_not_retirement() {
    let mut tc = TestContext::new().load_program(&[0x0000_0000]);
    assert!(tc.step().is_err());
    assert_eq!(tc.cpu().stats.cycles, 1);
    assert_eq!(tc.cpu().stats.instructions_retired, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Reporting
// ══════════════════════════════════════════════════════════

#[test]
fn test_full_report_has_every_section() {
    let mut tc = TestContext::new().load_asm("addi r1, r0, 1\njne 0(pc)\nhalt");
    let _ = tc.run_to_halt();
    let text = render(&tc.cpu().stats, &[]);

    assert!(text.contains("W32 SIMULATION STATISTICS"));
    assert!(text.contains("INSTRUCTION MIX"));
    assert!(text.contains("CONTROL FLOW"));
    assert!(text.contains("TRAPS"));
    assert!(text.contains("sim_insts                3"), "Report was:\n{text}");
    assert!(text.contains("jump.taken             1"), "Report was:\n{text}");
}

#[test]
fn test_section_filter() {
    let stats = SimStats::default();
    let text = render(&stats, &["traps"]);
    assert!(text.contains("trap.unmapped          0"));
    assert!(!text.contains("INSTRUCTION MIX"));
    assert!(!text.contains("W32 SIMULATION STATISTICS"));
}

#[test]
fn test_known_sections() {
    assert_eq!(STATS_SECTIONS, ["summary", "instruction_mix", "control", "traps"]);
    let stats = SimStats::default();
    for section in STATS_SECTIONS {
        assert!(!render(&stats, &[section]).is_empty(), "Section '{section}' rendered nothing");
    }
}
