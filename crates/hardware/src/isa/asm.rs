//! Two-pass assembler.
//!
//! Accepts the text produced by [`disassemble`](crate::isa::disasm::disassemble)
//! plus a small amount of sugar:
//! 1. **Comments:** everything after `;` or `#` is ignored.
//! 2. **Labels:** `name:` binds the address of the next statement. Jump and `call`
//!    targets may name a label, encoded relative to `pc`.
//! 3. **Directives:** `.word VALUE` emits a raw 32-bit word.
//! 4. **Operands:** separated by commas and/or whitespace; immediates are decimal or
//!    `0x` hexadecimal, optionally negative.
//!
//! Addresses are byte offsets from the start of the output, so assembled code is
//! position-independent as long as it only uses `pc`-relative control flow.

use std::collections::HashMap;

use crate::common::error::AsmError;
use crate::common::reg::Reg;
use crate::core::units::alu::AluOp;
use crate::core::units::bru::Condition;
use crate::isa::abi;
use crate::isa::op::{Instruction, LoadWidth, StoreWidth};

/// Size of every statement in bytes.
const STMT_SIZE: u32 = 4;

/// One non-empty source statement.
#[derive(Debug)]
struct Stmt<'a> {
    line: usize,
    addr: u32,
    mnemonic: String,
    operands: Vec<&'a str>,
}

/// Assembles source text into instruction words.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered, tagged with its 1-based line.
///
/// # Examples
///
/// ```
/// use w32sim_core::isa::asm::assemble;
///
/// let words = assemble("loop: subi r1, r1, 1\n jne loop(pc)\n halt").unwrap();
/// assert_eq!(words.len(), 3);
/// ```
pub fn assemble(source: &str) -> Result<Vec<u32>, AsmError> {
    let (stmts, labels) = first_pass(source)?;
    stmts.iter().map(|s| encode_stmt(s, &labels)).collect()
}

/// Assembles source text into a little-endian program image.
///
/// # Errors
///
/// See [`assemble`].
pub fn assemble_to_bytes(source: &str) -> Result<Vec<u8>, AsmError> {
    Ok(assemble(source)?
        .into_iter()
        .flat_map(u32::to_le_bytes)
        .collect())
}

/// Splits lines into statements and binds labels to addresses.
fn first_pass(source: &str) -> Result<(Vec<Stmt<'_>>, HashMap<&str, u32>), AsmError> {
    let mut stmts = Vec::new();
    let mut labels = HashMap::new();
    let mut addr = 0u32;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let mut text = raw
            .find(|c: char| c == ';' || c == '#')
            .map_or(raw, |i| &raw[..i])
            .trim();

        while let Some((head, tail)) = text.split_once(':') {
            let head = head.trim();
            if !is_label(head) {
                return Err(AsmError::InvalidOperand {
                    line,
                    operand: head.to_string(),
                });
            }
            if labels.insert(head, addr).is_some() {
                return Err(AsmError::DuplicateLabel {
                    line,
                    label: head.to_string(),
                });
            }
            text = tail.trim();
        }

        let mut tokens = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty());
        let Some(mnemonic) = tokens.next() else {
            continue;
        };
        stmts.push(Stmt {
            line,
            addr,
            mnemonic: mnemonic.to_ascii_lowercase(),
            operands: tokens.collect(),
        });
        addr = addr.wrapping_add(STMT_SIZE);
    }
    Ok((stmts, labels))
}

fn is_label(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '.')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Parses a decimal or `0x` hexadecimal integer, optionally negative.
fn parse_int(s: &str) -> Option<i64> {
    let (neg, body) = s.strip_prefix('-').map_or((false, s), |b| (true, b));
    let body = body.strip_prefix('+').unwrap_or(body);
    let value = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        body.parse::<i64>().ok()?
    };
    Some(if neg { -value } else { value })
}

/// Operand parser bound to one statement.
struct Operands<'s, 'a> {
    stmt: &'s Stmt<'a>,
    labels: &'s HashMap<&'a str, u32>,
}

impl<'a> Operands<'_, 'a> {
    fn invalid(&self, operand: &str) -> AsmError {
        AsmError::InvalidOperand {
            line: self.stmt.line,
            operand: operand.to_string(),
        }
    }

    fn expect(&self, n: usize) -> Result<(), AsmError> {
        if self.stmt.operands.len() == n {
            Ok(())
        } else {
            Err(AsmError::OperandCount {
                line: self.stmt.line,
                mnemonic: self.stmt.mnemonic.clone(),
                expected: n,
                found: self.stmt.operands.len(),
            })
        }
    }

    fn reg(&self, i: usize) -> Result<Reg, AsmError> {
        let op = self.stmt.operands[i];
        abi::lookup(op).ok_or_else(|| self.invalid(op))
    }

    fn range(&self, value: i64, min: i64, max: i64, bits: u32) -> Result<i64, AsmError> {
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(AsmError::OutOfRange {
                line: self.stmt.line,
                value,
                bits,
            })
        }
    }

    fn int(&self, text: &str) -> Result<i64, AsmError> {
        parse_int(text).ok_or_else(|| self.invalid(text))
    }

    /// A 16-bit field written either signed or unsigned.
    fn imm16(&self, text: &str) -> Result<u16, AsmError> {
        let v = self.int(text)?;
        Ok(self.range(v, i64::from(i16::MIN), i64::from(u16::MAX), 16)? as u16)
    }

    fn unsigned(&self, i: usize, bits: u32) -> Result<u16, AsmError> {
        let v = self.int(self.stmt.operands[i])?;
        Ok(self.range(v, 0, (1 << bits) - 1, bits)? as u16)
    }

    /// `offset(base)`; an empty offset means zero.
    fn mem(&self, i: usize) -> Result<(u16, Reg), AsmError> {
        let op = self.stmt.operands[i];
        let (off, base) = op
            .strip_suffix(')')
            .and_then(|s| s.split_once('('))
            .ok_or_else(|| self.invalid(op))?;
        let base = abi::lookup(base.trim()).ok_or_else(|| self.invalid(op))?;
        let off = if off.trim().is_empty() {
            0
        } else {
            self.imm16(off.trim())?
        };
        Ok((off, base))
    }

    /// Control-flow target: `offset(base)`, `label(pc)` or a bare label.
    fn target(&self, i: usize) -> Result<(i16, Reg), AsmError> {
        let op = self.stmt.operands[i];
        let label = match op.strip_suffix(')').and_then(|s| s.split_once('(')) {
            Some((name, base)) if is_label(name) && !name.starts_with('.') => {
                if abi::lookup(base.trim()) != Some(Reg::Pc) {
                    return Err(self.invalid(op));
                }
                name
            }
            Some(_) => return self.mem(i).map(|(off, base)| (off as i16, base)),
            None if is_label(op) => op,
            None => return Err(self.invalid(op)),
        };
        let dest = *self
            .labels
            .get(label)
            .ok_or_else(|| AsmError::UndefinedLabel {
                line: self.stmt.line,
                label: label.to_string(),
            })?;
        let next = i64::from(self.stmt.addr) + i64::from(STMT_SIZE);
        let delta = self.range(
            i64::from(dest) - next,
            i64::from(i16::MIN),
            i64::from(i16::MAX),
            16,
        )?;
        Ok((delta as i16, Reg::Pc))
    }
}

fn alu_op(stem: &str) -> Option<AluOp> {
    Some(match stem {
        "add" => AluOp::Add,
        "sub" => AluOp::Sub,
        "and" => AluOp::And,
        "or" => AluOp::Or,
        "xor" => AluOp::Xor,
        _ => return None,
    })
}

fn condition(mnemonic: &str) -> Option<Condition> {
    Condition::ALL
        .into_iter()
        .find(|c| c.mnemonic() == mnemonic)
}

/// Second pass: encodes a single statement.
fn encode_stmt(stmt: &Stmt<'_>, labels: &HashMap<&str, u32>) -> Result<u32, AsmError> {
    let ops = Operands { stmt, labels };
    let m = stmt.mnemonic.as_str();

    let inst = match m {
        ".word" => {
            ops.expect(1)?;
            let v = ops.int(stmt.operands[0])?;
            let v = ops.range(v, i64::from(i32::MIN), i64::from(u32::MAX), 32)?;
            return Ok(v as u32);
        }
        "halt" | "ret" => {
            ops.expect(0)?;
            if m == "halt" {
                Instruction::Halt
            } else {
                Instruction::Ret
            }
        }
        "trap" => {
            ops.expect(1)?;
            Instruction::Trap {
                vector: ops.unsigned(0, 16)?,
            }
        }
        "call" => {
            ops.expect(1)?;
            let (offset, base) = ops.target(0)?;
            Instruction::Call { base, offset }
        }
        "lb" | "lbu" | "lw" => {
            ops.expect(2)?;
            let (offset, base) = ops.mem(1)?;
            let width = match m {
                "lb" => LoadWidth::Byte,
                "lbu" => LoadWidth::ByteUnsigned,
                _ => LoadWidth::Word,
            };
            Instruction::Load {
                width,
                dr: ops.reg(0)?,
                base,
                offset,
            }
        }
        "sb" | "sw" => {
            ops.expect(2)?;
            let (offset, base) = ops.mem(1)?;
            let width = if m == "sb" {
                StoreWidth::Byte
            } else {
                StoreWidth::Word
            };
            Instruction::Store {
                width,
                src: ops.reg(0)?,
                base,
                offset,
            }
        }
        "lea" => {
            ops.expect(4)?;
            Instruction::Lea {
                dr: ops.reg(0)?,
                sr1: ops.reg(1)?,
                sr2: ops.reg(2)?,
                scale: ops.unsigned(3, 12)?,
            }
        }
        "push" => {
            ops.expect(1)?;
            Instruction::Push { src: ops.reg(0)? }
        }
        "pop" => {
            ops.expect(1)?;
            Instruction::Pop { dr: ops.reg(0)? }
        }
        _ => {
            if let Some(cond) = condition(m) {
                ops.expect(1)?;
                let (offset, base) = ops.target(0)?;
                Instruction::Jump { cond, base, offset }
            } else if let Some(op) = alu_op(m) {
                ops.expect(3)?;
                Instruction::Alu {
                    op,
                    dr: ops.reg(0)?,
                    sr1: ops.reg(1)?,
                    sr2: ops.reg(2)?,
                }
            } else if let Some(op) = m.strip_suffix('i').and_then(alu_op) {
                ops.expect(3)?;
                Instruction::AluImm {
                    op,
                    dr: ops.reg(0)?,
                    sr1: ops.reg(1)?,
                    imm: ops.imm16(stmt.operands[2])? as i16,
                }
            } else {
                return Err(AsmError::UnknownMnemonic {
                    line: stmt.line,
                    mnemonic: stmt.mnemonic.clone(),
                });
            }
        }
    };
    Ok(inst.encode())
}
