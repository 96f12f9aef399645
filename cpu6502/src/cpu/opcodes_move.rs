//! Loads, stores, register transfers, and stack push/pull (§4.3.2, §4.3.5).

use super::Cpu;
use crate::bus::MemoryBus;
use crate::opcodes::Mode;

/// Function: Load a value from memory into the accumulator.
/// Flags: N, Z
pub fn lda<B: MemoryBus>(cpu: &mut Cpu<B>, mode: Mode) {
  cpu.a = cpu.read_operand(mode);
  cpu.update_zn(cpu.a);
}

/// Function: Load a value from memory into the X register.
/// Flags: N, Z
pub fn ldx<B: MemoryBus>(cpu: &mut Cpu<B>, mode: Mode) {
  cpu.x = cpu.read_operand(mode);
  cpu.update_zn(cpu.x);
}

/// Function: Load a value from memory into the Y register.
/// Flags: N, Z
pub fn ldy<B: MemoryBus>(cpu: &mut Cpu<B>, mode: Mode) {
  cpu.y = cpu.read_operand(mode);
  cpu.update_zn(cpu.y);
}

/// Function: Store the accumulator to memory.
/// Flags: none
pub fn sta<B: MemoryBus>(cpu: &mut Cpu<B>, mode: Mode) {
  cpu.store(mode, cpu.a);
}

/// Function: Store the X register to memory.
/// Flags: none
pub fn stx<B: MemoryBus>(cpu: &mut Cpu<B>, mode: Mode) {
  cpu.store(mode, cpu.x);
}

/// Function: Store the Y register to memory.
/// Flags: none
pub fn sty<B: MemoryBus>(cpu: &mut Cpu<B>, mode: Mode) {
  cpu.store(mode, cpu.y);
}

/// Function: Copy the accumulator into X.
/// Flags: N, Z
pub fn tax<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.x = cpu.a;
  cpu.update_zn(cpu.x);
}

/// Function: Copy the accumulator into Y.
/// Flags: N, Z
pub fn tay<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.y = cpu.a;
  cpu.update_zn(cpu.y);
}

/// Function: Copy X into the accumulator.
/// Flags: N, Z
pub fn txa<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.a = cpu.x;
  cpu.update_zn(cpu.a);
}

/// Function: Copy Y into the accumulator.
/// Flags: N, Z
pub fn tya<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.a = cpu.y;
  cpu.update_zn(cpu.a);
}

/// Function: Copy the stack pointer into X.
/// Flags: N, Z
pub fn tsx<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.x = cpu.sp;
  cpu.update_zn(cpu.x);
}

/// Function: Copy X into the stack pointer.
/// Flags: none — unlike every other transfer, TXS leaves N and Z alone.
pub fn txs<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.sp = cpu.x;
}

/// Function: Push the accumulator onto the stack.
/// Flags: none
pub fn pha<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.push_u8(cpu.a);
}

/// Function: Pull a byte from the stack into the accumulator.
/// Flags: N, Z
pub fn pla<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.a = cpu.pop_u8();
  cpu.update_zn(cpu.a);
}

/// Function: Push the processor status onto the stack, with the Break
/// and unused bits set — this is the one place the pushed status differs
/// from the live status register.
/// Flags: none
pub fn php<B: MemoryBus>(cpu: &mut Cpu<B>) {
  let status = cpu.status_for_push(true);
  cpu.push_u8(status);
}

/// Function: Pull the processor status from the stack, ignoring the
/// Break and unused bits it was pushed with.
/// Flags: N, V, D, I, Z, C (all restored from the stack)
pub fn plp<B: MemoryBus>(cpu: &mut Cpu<B>) {
  let pulled = cpu.pop_u8();
  cpu.restore_status(pulled);
}

