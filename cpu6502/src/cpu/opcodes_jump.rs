//! Unconditional transfers of control: JMP, JSR/RTS, and the BRK/RTI
//! software-interrupt pair (§4.3.7).

use super::Cpu;
use crate::bus::MemoryBus;
use crate::opcodes::Mode;

/// Function: Jump to an absolute or indirect address.
/// Flags: none
pub fn jmp<B: MemoryBus>(cpu: &mut Cpu<B>, mode: Mode) {
  cpu.pc = cpu.effective_address(mode, false);
}

/// Function: Push the address of the last byte of this instruction, then
/// jump to a subroutine.
/// Flags: none
pub fn jsr<B: MemoryBus>(cpu: &mut Cpu<B>, mode: Mode) {
  let target = cpu.effective_address(mode, false);
  cpu.push_u16(cpu.pc.wrapping_sub(1));
  cpu.pc = target;
}

/// Function: Pull a return address from the stack and resume just past
/// the JSR that pushed it.
/// Flags: none
pub fn rts<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.pc = cpu.pop_u16().wrapping_add(1);
}

/// Function: Return from an interrupt: pull status (ignoring B and the
/// unused bit), then pull PC.
/// Flags: N, V, D, I, Z, C (all restored from the stack)
pub fn rti<B: MemoryBus>(cpu: &mut Cpu<B>) {
  let pulled = cpu.pop_u8();
  cpu.restore_status(pulled);
  cpu.pc = cpu.pop_u16();
}

/// Function: Software interrupt. Shares the hardware IRQ entry sequence,
/// but pushes status with the Break bit set so RTI's handler can tell
/// BRK apart from a real IRQ.
/// Flags: I (set)
pub fn brk<B: MemoryBus>(cpu: &mut Cpu<B>) {
  cpu.enter_interrupt(true);
}
