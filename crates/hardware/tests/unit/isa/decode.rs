//! # Decoder Tests
//!
//! Verifies raw field extraction and the mapping of `(opcode, subop)` pairs
//! onto typed instructions, including which immediates are sign-extended.

use pretty_assertions::assert_eq;
use w32sim_core::common::{Fault, Reg};
use w32sim_core::core::units::alu::AluOp;
use w32sim_core::core::units::bru::Condition;
use w32sim_core::isa::Instruction;
use w32sim_core::isa::decode::{IllegalEncoding, decode};
use w32sim_core::isa::instruction::{InstructionBits, extract, sign_extend16};
use w32sim_core::isa::op::{LoadWidth, StoreWidth};
use w32sim_core::isa::opcodes::{OP_ALU, OP_ALU_IMM, OP_CONTROL, OP_JUMP, OP_MEM, OP_STACK};
use w32sim_core::isa::subop::{alu_imm, control, jump, mem, stack};

use crate::common::builder::InstructionBuilder;

fn typed(raw: u32) -> Result<Instruction, IllegalEncoding> {
    Instruction::try_from(decode(raw))
}

// ══════════════════════════════════════════════════════════
// 1. Field extraction
// ══════════════════════════════════════════════════════════

#[test]
fn test_field_positions() {
    let raw = 0x1234_5678u32;
    assert_eq!(raw.opcode(), 0x1);
    assert_eq!(raw.subop(), 0x2);
    assert_eq!(raw.dr(), Reg::R3);
    assert_eq!(raw.sr1(), Reg::R4);
    assert_eq!(raw.base(), Reg::R4);
    assert_eq!(raw.sr2(), Reg::R5);
    assert_eq!(raw.imm16(), 0x5678);
    assert_eq!(raw.off12(), 0x678);
}

#[test]
fn test_decoded_struct_matches_accessors() {
    let d = decode(0xFEDC_BA98);
    assert_eq!(d.raw, 0xFEDC_BA98);
    assert_eq!(d.opcode, 0xF);
    assert_eq!(d.subop, 0xE);
    assert_eq!(d.dr, Reg::Sp);
    assert_eq!(d.sr1, Reg::Fp);
    assert_eq!(d.base(), Reg::Fp);
    assert_eq!(d.sr2, Reg::Pc);
    assert_eq!(d.imm16, 0xBA98);
    assert_eq!(d.off12, 0xA98);
}

#[test]
fn test_extract_and_sign_extend() {
    assert_eq!(extract(0xABCD_0000, 16, 31), 0xABCD);
    assert_eq!(extract(0xFFFF_FFFF, 0, 31), 0xFFFF_FFFF);
    assert_eq!(sign_extend16(0x7FFF), 0x7FFF);
    assert_eq!(sign_extend16(0x8000), 0xFFFF_8000);
    assert_eq!(sign_extend16(0xFFFF), 0xFFFF_FFFF);
}

// ══════════════════════════════════════════════════════════
// 2. Typed decoding
// ══════════════════════════════════════════════════════════

#[test]
fn test_decode_control() {
    let b = || InstructionBuilder::new().opcode(OP_CONTROL);
    assert_eq!(typed(b().subop(control::HALT).build()), Ok(Instruction::Halt));
    assert_eq!(typed(b().subop(control::RET).build()), Ok(Instruction::Ret));
    assert_eq!(
        typed(b().subop(control::TRAP).imm16(0xABCD).build()),
        Ok(Instruction::Trap { vector: 0xABCD })
    );
    assert_eq!(
        typed(b().subop(control::CALL).base(Reg::Pc).imm16(-8).build()),
        Ok(Instruction::Call {
            base: Reg::Pc,
            offset: -8
        })
    );
}

#[test]
fn test_decode_alu_register() {
    let raw = InstructionBuilder::new()
        .opcode(OP_ALU)
        .subop(1)
        .dr(Reg::R3)
        .sr1(Reg::R1)
        .sr2(Reg::R2)
        .build();
    assert_eq!(
        typed(raw),
        Ok(Instruction::Alu {
            op: AluOp::Sub,
            dr: Reg::R3,
            sr1: Reg::R1,
            sr2: Reg::R2
        })
    );
}

#[test]
fn test_alu_immediate_order_differs_from_register_order() {
    let expected = [
        (alu_imm::ADDI, AluOp::Add),
        (alu_imm::ANDI, AluOp::And),
        (alu_imm::ORI, AluOp::Or),
        (alu_imm::XORI, AluOp::Xor),
        (alu_imm::SUBI, AluOp::Sub),
    ];
    for (subop, op) in expected {
        let raw = InstructionBuilder::new()
            .opcode(OP_ALU_IMM)
            .subop(subop)
            .dr(Reg::R1)
            .sr1(Reg::R2)
            .imm16(-1)
            .build();
        assert_eq!(
            typed(raw),
            Ok(Instruction::AluImm {
                op,
                dr: Reg::R1,
                sr1: Reg::R2,
                imm: -1
            }),
            "Subop {subop} should decode as {}",
            op.mnemonic()
        );
    }
}

#[test]
fn test_decode_memory_family() {
    let b = |subop| {
        InstructionBuilder::new()
            .opcode(OP_MEM)
            .subop(subop)
            .dr(Reg::R1)
            .base(Reg::R2)
            .imm16(0xFFFC)
            .build()
    };
    assert_eq!(
        typed(b(mem::LB)),
        Ok(Instruction::Load {
            width: LoadWidth::Byte,
            dr: Reg::R1,
            base: Reg::R2,
            offset: 0xFFFC
        })
    );
    assert_eq!(
        typed(b(mem::LBU)),
        Ok(Instruction::Load {
            width: LoadWidth::ByteUnsigned,
            dr: Reg::R1,
            base: Reg::R2,
            offset: 0xFFFC
        })
    );
    assert_eq!(
        typed(b(mem::LW)),
        Ok(Instruction::Load {
            width: LoadWidth::Word,
            dr: Reg::R1,
            base: Reg::R2,
            offset: 0xFFFC
        })
    );
    assert_eq!(
        typed(b(mem::SB)),
        Ok(Instruction::Store {
            width: StoreWidth::Byte,
            src: Reg::R1,
            base: Reg::R2,
            offset: 0xFFFC
        })
    );
    assert_eq!(
        typed(b(mem::SW)),
        Ok(Instruction::Store {
            width: StoreWidth::Word,
            src: Reg::R1,
            base: Reg::R2,
            offset: 0xFFFC
        })
    );
}

#[test]
fn test_decode_lea_uses_off12() {
    let raw = InstructionBuilder::new()
        .opcode(OP_MEM)
        .subop(mem::LEA)
        .dr(Reg::R1)
        .sr1(Reg::R2)
        .sr2(Reg::R3)
        .off12(0xABC)
        .build();
    assert_eq!(
        typed(raw),
        Ok(Instruction::Lea {
            dr: Reg::R1,
            sr1: Reg::R2,
            sr2: Reg::R3,
            scale: 0xABC
        })
    );
}

#[test]
fn test_decode_jumps() {
    let conds = [
        (jump::JMP, Condition::Always),
        (jump::JE, Condition::Equal),
        (jump::JNE, Condition::NotEqual),
        (jump::JL, Condition::Less),
        (jump::JG, Condition::Greater),
        (jump::JGE, Condition::GreaterEqual),
        (jump::JLE, Condition::LessEqual),
    ];
    for (subop, cond) in conds {
        let raw = InstructionBuilder::new()
            .opcode(OP_JUMP)
            .subop(subop)
            .base(Reg::Pc)
            .imm16(-8)
            .build();
        assert_eq!(
            typed(raw),
            Ok(Instruction::Jump {
                cond,
                base: Reg::Pc,
                offset: -8
            })
        );
    }
}

#[test]
fn test_decode_stack() {
    let b = |subop| {
        InstructionBuilder::new()
            .opcode(OP_STACK)
            .subop(subop)
            .dr(Reg::R7)
            .build()
    };
    assert_eq!(typed(b(stack::PUSH)), Ok(Instruction::Push { src: Reg::R7 }));
    assert_eq!(typed(b(stack::POP)), Ok(Instruction::Pop { dr: Reg::R7 }));
}

// ══════════════════════════════════════════════════════════
// 3. Illegal encodings
// ══════════════════════════════════════════════════════════

#[test]
fn test_unmapped_subops() {
    let illegal = [
        (OP_CONTROL, 0),
        (OP_CONTROL, 5),
        (OP_ALU, 5),
        (OP_ALU_IMM, 5),
        (OP_MEM, 0),
        (OP_MEM, 4),
        (OP_MEM, 8),
        (OP_JUMP, 7),
        (OP_STACK, 2),
    ];
    for (opcode, subop) in illegal {
        let raw = InstructionBuilder::new().opcode(opcode).subop(subop).build();
        assert_eq!(
            typed(raw),
            Err(IllegalEncoding(raw)),
            "Expected opcode {opcode} subop {subop} to be illegal"
        );
    }
}

#[test]
fn test_unmapped_opcodes() {
    for opcode in 6..=0xF {
        let raw = InstructionBuilder::new().opcode(opcode).build();
        assert!(typed(raw).is_err(), "Expected opcode {opcode} to be illegal");
    }
}

#[test]
fn test_decode_with_pc_builds_fault() {
    assert_eq!(
        Instruction::decode(0, 0x3010),
        Err(Fault::IllegalInstruction {
            raw: 0,
            pc: 0x3010
        })
    );
    assert_eq!(IllegalEncoding(7).at(4), Fault::IllegalInstruction { raw: 7, pc: 4 });
}

#[test]
fn test_sets_flags_only_for_alu() {
    assert!(typed(0x1000_0000).unwrap().sets_flags());
    assert!(typed(0x2000_0000).unwrap().sets_flags());
    assert!(!typed(0x3300_0000).unwrap().sets_flags(), "loads must not set flags");
    assert!(!typed(0x3700_0000).unwrap().sets_flags());
    assert!(!typed(0x0100_0000).unwrap().sets_flags());
}
