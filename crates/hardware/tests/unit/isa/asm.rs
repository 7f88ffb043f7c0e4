//! # Assembler Tests
//!
//! This module verifies the two-pass assembler: statement syntax, label
//! resolution relative to the next instruction, directives, and diagnostics.

use pretty_assertions::assert_eq;
use w32sim_core::common::AsmError;
use w32sim_core::isa::asm::{assemble, assemble_to_bytes};

// ══════════════════════════════════════════════════════════
// 1. Statements
// ══════════════════════════════════════════════════════════

#[test]
fn test_reference_program() {
    let words = assemble(
        "addi r1, r0, 5
         addi r2, r0, -3
         add r3, r1, r2
         halt",
    )
    .unwrap();
    assert_eq!(words, [0x2010_0005, 0x2020_FFFD, 0x1031_2000, 0x0100_0000]);
}

#[test]
fn test_comments_and_blank_lines() {
    let words = assemble(
        "; header comment

         halt        ; stop
         # hash comments too
         ret # trailing",
    )
    .unwrap();
    assert_eq!(words, [0x0100_0000, 0x0400_0000]);
}

#[test]
fn test_case_and_separators() {
    let words = assemble("ADD R3, R1, R2\nadd r3 r1 r2\nPush SP").unwrap();
    assert_eq!(words, [0x1031_2000, 0x1031_2000, 0x50D0_0000]);
}

#[test]
fn test_memory_operands() {
    let words = assemble("lw r1, 8(r2)\nsb r1, (r2)\nlbu r4, 0xfffc(sp)\nsw r1, -4(r2)").unwrap();
    assert_eq!(words, [0x3312_0008, 0x3512_0000, 0x324D_FFFC, 0x3612_FFFC]);
}

#[test]
fn test_word_directive() {
    let words = assemble(".word 0xdeadbeef\n.word -1\n.word 0").unwrap();
    assert_eq!(words, [0xDEAD_BEEF, 0xFFFF_FFFF, 0]);
}

#[test]
fn test_bytes_are_little_endian() {
    let bytes = assemble_to_bytes("addi r1, r0, 1\nhalt").unwrap();
    assert_eq!(bytes, [0x01, 0x00, 0x10, 0x20, 0x00, 0x00, 0x00, 0x01]);
}

// ══════════════════════════════════════════════════════════
// 2. Labels
// ══════════════════════════════════════════════════════════

#[test]
fn test_backward_label() {
    let words = assemble(
        "loop: subi r1, r1, 1
         jne loop(pc)
         halt",
    )
    .unwrap();
    assert_eq!(words, [0x2411_0001, 0x420B_FFF8, 0x0100_0000]);
}

#[test]
fn test_forward_label_and_bare_target() {
    let words = assemble("call f\nhalt\nf: ret").unwrap();
    assert_eq!(words[0], 0x030B_0004);
}

#[test]
fn test_label_on_own_line_binds_next_statement() {
    let words = assemble("start:\n\n  halt\n  jmp start").unwrap();
    assert_eq!(words, [0x0100_0000, 0x400B_FFF8]);
}

#[test]
fn test_several_labels_on_one_line() {
    let words = assemble("jmp b\na: b: halt").unwrap();
    assert_eq!(words[0], 0x400B_0000);
}

// ══════════════════════════════════════════════════════════
// 3. Diagnostics
// ══════════════════════════════════════════════════════════

#[test]
fn test_unknown_mnemonic() {
    assert_eq!(
        assemble("halt\nMUL r1, r2, r3"),
        Err(AsmError::UnknownMnemonic {
            line: 2,
            mnemonic: "mul".to_string()
        })
    );
}

#[test]
fn test_operand_count() {
    assert_eq!(
        assemble("add r1, r2"),
        Err(AsmError::OperandCount {
            line: 1,
            mnemonic: "add".to_string(),
            expected: 3,
            found: 2
        })
    );
}

#[test]
fn test_invalid_operands() {
    assert_eq!(
        assemble("push r16"),
        Err(AsmError::InvalidOperand {
            line: 1,
            operand: "r16".to_string()
        })
    );
    assert_eq!(
        assemble("lw r1, 8[r2]"),
        Err(AsmError::InvalidOperand {
            line: 1,
            operand: "8[r2]".to_string()
        })
    );
    assert_eq!(
        assemble("addi r1, r0, five"),
        Err(AsmError::InvalidOperand {
            line: 1,
            operand: "five".to_string()
        })
    );
}

#[test]
fn test_label_target_requires_pc_base() {
    assert_eq!(
        assemble("x: jmp x(r1)"),
        Err(AsmError::InvalidOperand {
            line: 1,
            operand: "x(r1)".to_string()
        })
    );
}

#[test]
fn test_out_of_range_values() {
    assert_eq!(
        assemble("addi r1, r0, 70000"),
        Err(AsmError::OutOfRange {
            line: 1,
            value: 70000,
            bits: 16
        })
    );
    assert_eq!(
        assemble("trap -1"),
        Err(AsmError::OutOfRange {
            line: 1,
            value: -1,
            bits: 16
        })
    );
    assert_eq!(
        assemble("lea r1, r2, r3, 4096"),
        Err(AsmError::OutOfRange {
            line: 1,
            value: 4096,
            bits: 12
        })
    );
}

#[test]
fn test_undefined_and_duplicate_labels() {
    assert_eq!(
        assemble("jmp nowhere"),
        Err(AsmError::UndefinedLabel {
            line: 1,
            label: "nowhere".to_string()
        })
    );
    assert_eq!(
        assemble("a: halt\na: halt"),
        Err(AsmError::DuplicateLabel {
            line: 2,
            label: "a".to_string()
        })
    );
    assert_eq!(
        assemble("1st: halt"),
        Err(AsmError::InvalidOperand {
            line: 1,
            operand: "1st".to_string()
        })
    );
}
