//! # ALU Tests
//!
//! Verifies the five integer operations, including wraparound at 32 bits.

use rstest::rstest;
use w32sim_core::core::units::alu::arithmetic::{self, ArithOp};
use w32sim_core::core::units::alu::logic::{self, LogicOp};
use w32sim_core::core::units::alu::{Alu, AluOp};

#[rstest]
#[case::add(AluOp::Add, 5, 3, 8)]
#[case::add_wraps(AluOp::Add, 0xFFFF_FFFF, 1, 0)]
#[case::add_negative(AluOp::Add, 5, (-3i32) as u32, 2)]
#[case::sub(AluOp::Sub, 10, 4, 6)]
#[case::sub_wraps(AluOp::Sub, 0, 1, 0xFFFF_FFFF)]
#[case::and(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case::or(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case::xor(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case::xor_self(AluOp::Xor, 0xDEAD_BEEF, 0xDEAD_BEEF, 0)]
fn test_alu(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    let result = Alu::execute(op, a, b);
    assert_eq!(
        result, expected,
        "{} 0x{a:08x}, 0x{b:08x}: expected 0x{expected:08x}, got 0x{result:08x}",
        op.mnemonic()
    );
}

#[test]
fn test_mnemonics() {
    let names: Vec<&str> = [AluOp::Add, AluOp::Sub, AluOp::And, AluOp::Or, AluOp::Xor]
        .into_iter()
        .map(AluOp::mnemonic)
        .collect();
    assert_eq!(names, ["add", "sub", "and", "or", "xor"]);
}

#[rstest]
#[case::add(ArithOp::Add, 0x7FFF_FFFF, 1, 0x8000_0000)]
#[case::sub(ArithOp::Sub, 3, 5, (-2i32) as u32)]
fn test_arithmetic_unit(
    #[case] op: ArithOp,
    #[case] a: u32,
    #[case] b: u32,
    #[case] expected: u32,
) {
    assert_eq!(arithmetic::execute(op, a, b), expected);
}

#[rstest]
#[case::and(LogicOp::And, 0xF0F0_F0F0, 0xFF00_FF00, 0xF000_F000)]
#[case::or(LogicOp::Or, 0xF0F0_F0F0, 0x0F0F_0F0F, 0xFFFF_FFFF)]
#[case::xor(LogicOp::Xor, 0xFFFF_0000, 0xFF00_FF00, 0x00FF_FF00)]
fn test_logic_unit(
    #[case] op: LogicOp,
    #[case] a: u32,
    #[case] b: u32,
    #[case] expected: u32,
) {
    assert_eq!(logic::execute(op, a, b), expected);
}
