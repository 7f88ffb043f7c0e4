//! Main Execution Step.
//!
//! This module implements the fetch-decode-execute cycle of the CPU. It performs the following:
//! 1. **Fetch:** Loads the word at `PC` and advances `PC` by 4 before dispatch, so
//!    relative targets and return addresses are computed against the next instruction.
//! 2. **Decode:** Maps the word onto a typed [`Instruction`], faulting on unmapped pairs.
//! 3. **Dispatch:** Applies one family's semantics. Every fallible access happens before
//!    the instruction's register effects are committed.
//! 4. **Accounting:** Updates [`SimStats`](crate::stats::SimStats) and emits `trace` events.

use tracing::{trace, warn};

use super::Cpu;
use super::trap::{TrapHandler, TrapOutcome};
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::Fault;
use crate::common::reg::Reg;
use crate::core::arch::flags::Flags;
use crate::core::units::alu::Alu;
use crate::isa::op::{Instruction, LoadWidth, StoreWidth};

/// Width of a stack slot in bytes.
const STACK_SLOT: u32 = 4;

/// An instruction that completed without faulting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retired {
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// Raw instruction word.
    pub raw: u32,
    /// Decoded instruction.
    pub inst: Instruction,
}

impl Cpu {
    /// Fetches, decodes and executes one instruction.
    ///
    /// # Arguments
    ///
    /// * `traps` - Host services for `TRAP` instructions.
    ///
    /// # Returns
    ///
    /// The retired instruction, or the fault that stopped it. A fetch fault leaves `PC`
    /// unchanged; any later fault leaves `PC` pointing past the faulting instruction.
    pub fn step(&mut self, traps: &mut dyn TrapHandler) -> Result<Retired, Fault> {
        let pc = self.regs.pc();
        self.stats.cycles += 1;

        let raw = self.bus.fetch(pc)?;
        self.regs.set_pc(pc.wrapping_add(INSTRUCTION_SIZE));

        let inst = Instruction::decode(raw, pc)?;
        self.execute(inst, traps)?;

        self.stats.instructions_retired += 1;
        trace!("{pc:#010x}: {raw:#010x}  {inst}");
        Ok(Retired { pc, raw, inst })
    }

    /// Applies the semantics of one decoded instruction.
    ///
    /// `PC` must already point at the following instruction.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::OutOfBoundsAccess`] for loads, stores and stack operations
    /// outside memory. The faulting instruction's effects are not applied.
    pub fn execute(&mut self, inst: Instruction, traps: &mut dyn TrapHandler) -> Result<(), Fault> {
        match inst {
            Instruction::Halt => self.halted = true,
            Instruction::Trap { vector } => self.exec_trap(vector, traps),
            Instruction::Call { base, offset } => {
                let target = self.relative_target(base, offset);
                let ret = self.regs.pc();
                self.push(ret)?;
                self.regs.set_pc(target);
                self.stats.calls += 1;
            }
            Instruction::Ret => {
                let ret = self.pop()?;
                self.regs.set_pc(ret);
                self.stats.returns += 1;
            }
            Instruction::Alu { op, dr, sr1, sr2 } => {
                let result = Alu::execute(op, self.regs.read(sr1), self.regs.read(sr2));
                self.write_result(dr, result);
            }
            Instruction::AluImm { op, dr, sr1, imm } => {
                let result = Alu::execute(op, self.regs.read(sr1), imm as i32 as u32);
                self.write_result(dr, result);
            }
            Instruction::Load {
                width,
                dr,
                base,
                offset,
            } => {
                let addr = self.regs.read(base).wrapping_add(u32::from(offset));
                let val = match width {
                    LoadWidth::Byte => self.bus.load::<u8>(addr)? as i8 as i32 as u32,
                    LoadWidth::ByteUnsigned => u32::from(self.bus.load::<u8>(addr)?),
                    LoadWidth::Word => self.bus.load::<u32>(addr)?,
                };
                self.regs.write(dr, val);
                self.stats.inst_load += 1;
            }
            Instruction::Store {
                width,
                src,
                base,
                offset,
            } => {
                let addr = self.regs.read(base).wrapping_add(u32::from(offset));
                let val = self.regs.read(src);
                match width {
                    StoreWidth::Byte => self.bus.store(addr, val as u8)?,
                    StoreWidth::Word => self.bus.store(addr, val)?,
                }
                self.stats.inst_store += 1;
            }
            Instruction::Lea { dr, sr1, sr2, scale } => {
                let index = self.regs.read(sr2).wrapping_mul(u32::from(scale));
                self.regs.write(dr, self.regs.read(sr1).wrapping_add(index));
                self.stats.inst_lea += 1;
            }
            Instruction::Jump { cond, base, offset } => {
                if cond.is_taken(self.regs.flags()) {
                    let target = self.relative_target(base, offset);
                    self.regs.set_pc(target);
                    self.stats.branches_taken += 1;
                } else {
                    self.stats.branches_not_taken += 1;
                }
            }
            Instruction::Push { src } => {
                let val = self.regs.read(src);
                self.push(val)?;
                self.stats.inst_stack += 1;
            }
            Instruction::Pop { dr } => {
                let val = self.bus.load::<u32>(self.regs.sp())?;
                self.regs.write(dr, val);
                self.regs.set_sp(self.regs.sp().wrapping_add(STACK_SLOT));
                self.stats.inst_stack += 1;
            }
        }
        Ok(())
    }

    /// `reg[base] + sext(offset)`, read before any register is modified.
    #[inline(always)]
    const fn relative_target(&self, base: Reg, offset: i16) -> u32 {
        self.regs.read(base).wrapping_add(offset as i32 as u32)
    }

    /// Writes an ALU result and recomputes `FLAGS` from it.
    ///
    /// When `dr` is `FLAGS` itself, the recomputed flags win.
    fn write_result(&mut self, dr: Reg, result: u32) {
        self.regs.write(dr, result);
        self.regs.set_flags(Flags::from_result(result));
        self.stats.inst_alu += 1;
    }

    /// `SP -= 4; [SP] = val`. `SP` is only moved once the store succeeds.
    fn push(&mut self, val: u32) -> Result<(), Fault> {
        let sp = self.regs.sp().wrapping_sub(STACK_SLOT);
        self.bus.store(sp, val)?;
        self.regs.set_sp(sp);
        Ok(())
    }

    /// `val = [SP]; SP += 4`.
    fn pop(&mut self) -> Result<u32, Fault> {
        let sp = self.regs.sp();
        let val = self.bus.load::<u32>(sp)?;
        self.regs.set_sp(sp.wrapping_add(STACK_SLOT));
        Ok(val)
    }

    fn exec_trap(&mut self, vector: u16, traps: &mut dyn TrapHandler) {
        self.stats.traps += 1;
        if traps.handle(vector, &self.regs) == TrapOutcome::Unmapped {
            self.stats.unmapped_traps += 1;
            let pc = self.regs.pc().wrapping_sub(INSTRUCTION_SIZE);
            warn!("unmapped trap vector {vector:#06x} at pc {pc:#010x}");
        }
    }
}
