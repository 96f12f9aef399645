//! The MOS Technology 6502 central processing unit.
//!
//! http://www.6502.org/
//! https://en.wikipedia.org/wiki/MOS_Technology_6502
//!
//! The CPU holds a non-owning reference to its bus; it never allocates or
//! frees memory of its own, and the fetch-decode-execute loop in `step()`
//! never blocks or yields. A host drives the emulation by calling `step()`
//! in a loop until `cycles` crosses a per-frame budget.

mod opcodes_jump;
mod opcodes_logical;
mod opcodes_move;

#[cfg(test)]
mod test;
#[cfg(test)]
mod test_helpers;

use crate::bus::MemoryBus;
use crate::opcodes::{self, Instruction, Mode};
use colored::Colorize;

const RESET_VECTOR: u32 = 0xFFFC;
const IRQ_BRK_VECTOR: u32 = 0xFFFE;
const STACK_PAGE: u16 = 0x0100;

/// Bits of the packed processor status register ("P"), in PHP/PLP layout:
///
/// ```text
///   7  bit  0
/// ---- ----
/// NVss DIZC
/// |||| ||||
/// |||| |||+- Carry
/// |||| ||+-- Zero
/// |||| |+--- Interrupt Disable
/// |||| +---- Decimal
/// ||++------ No CPU effect; see the B flag
/// |+-------- Overflow
/// +--------- Negative
/// ```
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFlag {
  Carry            = 0b0000_0001,
  Zero             = 0b0000_0010,
  InterruptDisable = 0b0000_0100,
  Decimal          = 0b0000_1000,
  Break            = 0b0001_0000,
  /// Bit 5. Never physically stored; always reads back as 1.
  Unused           = 0b0010_0000,
  Overflow         = 0b0100_0000,
  Negative         = 0b1000_0000,
}

/// Status flags as they read back from PLP: bit 5 forced on, bit 4 (Break)
/// cleared, since neither is an addressable flag on real hardware — only
/// the copy PHP/BRK pushes carries a meaningful B bit.
const STATUS_READBACK_MASK: u8 = !(StatusFlag::Break as u8) | (StatusFlag::Unused as u8);

/// Power-on/reset status: interrupts disabled, the two unused/break bits
/// set, matching the conventional 6502 reset value of 0x34.
const RESET_STATUS: u8 = StatusFlag::InterruptDisable as u8 | StatusFlag::Unused as u8 | StatusFlag::Break as u8;

pub struct Cpu<'bus, B: MemoryBus> {
  bus: &'bus mut B,
  pub a: u8,
  pub x: u8,
  pub y: u8,
  pub pc: u16,
  pub sp: u8,
  p: u8,
  /// Total elapsed cycles since construction. Monotonically increasing;
  /// the driver compares this against a per-frame budget.
  pub cycles: u64,
  /// Level-triggered IRQ line, sampled between instructions (§4.3.7).
  irq_pending: bool,
}

impl<'bus, B: MemoryBus> Cpu<'bus, B> {
  pub fn new(bus: &'bus mut B) -> Cpu<'bus, B> {
    Cpu {
      bus,
      a: 0,
      x: 0,
      y: 0,
      pc: 0,
      sp: 0xFF,
      p: RESET_STATUS,
      cycles: 0,
      irq_pending: false,
    }
  }

  /// Initialize PC from the reset vector (low byte at 0xFFFC, high at
  /// 0xFFFD). Other registers are left as constructed; real hardware
  /// leaves them undefined, so callers that care set them explicitly.
  pub fn reset(&mut self) {
    self.pc = self.bus.read_u16(RESET_VECTOR);
  }

  /// Raise or lower the level-triggered IRQ line. Callers that drive IRQ
  /// from outside the `step()` loop must raise the line only after any
  /// state the ISR will observe has already been written.
  pub fn set_irq_line(&mut self, asserted: bool) {
    self.irq_pending = asserted;
  }

  pub fn bus_mut(&mut self) -> &mut B {
    self.bus
  }

  // -- flags -----------------------------------------------------------

  fn flag(&self, flag: StatusFlag) -> bool {
    self.p & (flag as u8) != 0
  }

  fn set_flag(&mut self, flag: StatusFlag, value: bool) {
    if value {
      self.p |= flag as u8;
    } else {
      self.p &= !(flag as u8);
    }
  }

  /// Set Z and N from an 8-bit result, the rule shared by every load,
  /// transfer, ALU, and read-modify-write instruction (not stores).
  fn update_zn(&mut self, result: u8) {
    self.set_flag(StatusFlag::Zero, result == 0);
    self.set_flag(StatusFlag::Negative, result & 0x80 != 0);
  }

  /// The processor status byte as PHP would push it: bits 4 and 5 forced
  /// on, matching the "pushed by PHP" case (`is_brk` distinguishes PHP's
  /// always-1 B bit from a hardware IRQ's always-0 B bit).
  fn status_for_push(&self, is_brk: bool) -> u8 {
    let mut value = self.p | StatusFlag::Unused as u8;
    if is_brk {
      value |= StatusFlag::Break as u8;
    } else {
      value &= !(StatusFlag::Break as u8);
    }
    value
  }

  fn restore_status(&mut self, pulled: u8) {
    self.p = pulled & STATUS_READBACK_MASK;
  }

  /// Read the raw status byte. Exposed for tests and PHP-round-trip
  /// assertions; normal callers go through individual flags.
  #[cfg(test)]
  pub(crate) fn p_for_test(&self) -> u8 {
    self.p
  }

  // -- stack -------------------------------------------------------------

  fn push_u8(&mut self, value: u8) {
    self.bus.write_byte(STACK_PAGE as u32 + self.sp as u32, value);
    self.sp = self.sp.wrapping_sub(1);
  }

  fn pop_u8(&mut self) -> u8 {
    self.sp = self.sp.wrapping_add(1);
    self.bus.read_byte(STACK_PAGE as u32 + self.sp as u32)
  }

  /// High byte is pushed first, then low.
  fn push_u16(&mut self, value: u16) {
    let [lo, hi] = value.to_le_bytes();
    self.push_u8(hi);
    self.push_u8(lo);
  }

  /// Low byte is popped first, then high.
  fn pop_u16(&mut self) -> u16 {
    let lo = self.pop_u8();
    let hi = self.pop_u8();
    u16::from_le_bytes([lo, hi])
  }

  // -- fetch -------------------------------------------------------------

  fn next_u8(&mut self) -> u8 {
    let value = self.bus.read_byte(self.pc as u32);
    self.pc = self.pc.wrapping_add(1);
    value
  }

  fn next_u16(&mut self) -> u16 {
    let lo = self.next_u8();
    let hi = self.next_u8();
    u16::from_le_bytes([lo, hi])
  }

  /// Read a zero-page-indirect pointer; both bytes are fetched from the
  /// zero page and wrap mod 256 rather than crossing into page one. This
  /// pins the "unsure" zero-page-wrap open question from the source.
  fn read_zero_page_u16(&mut self, zp: u8) -> u16 {
    let lo = self.bus.read_byte(zp as u32);
    let hi = self.bus.read_byte(zp.wrapping_add(1) as u32);
    u16::from_le_bytes([lo, hi])
  }

  // -- addressing ----------------------------------------------------------

  fn page_crossed(base: u16, effective: u16) -> bool {
    (base & 0xFF00) != (effective & 0xFF00)
  }

  /// Compute the effective address for every mode but `Implicit`,
  /// `Accumulator`, and `Relative` (branches resolve their own target in
  /// `branch_to`). `is_write` selects whether `AbsoluteX`/`AbsoluteY`/
  /// `IndirectY` pay their page-crossing penalty now (reads only; writes
  /// always cost the worst case, already baked into the opcode's base
  /// cycle count).
  fn effective_address(&mut self, mode: Mode, is_write: bool) -> u16 {
    use Mode::*;
    match mode {
      Immediate => {
        let address = self.pc;
        self.pc = self.pc.wrapping_add(1);
        address
      }
      ZeroPage => self.next_u8() as u16,
      ZeroPageX => self.next_u8().wrapping_add(self.x) as u16,
      ZeroPageY => self.next_u8().wrapping_add(self.y) as u16,
      Absolute => self.next_u16(),
      AbsoluteX => {
        let base = self.next_u16();
        let effective = base.wrapping_add(self.x as u16);
        if !is_write && Self::page_crossed(base, effective) {
          self.cycles += 1;
        }
        effective
      }
      AbsoluteY => {
        let base = self.next_u16();
        let effective = base.wrapping_add(self.y as u16);
        if !is_write && Self::page_crossed(base, effective) {
          self.cycles += 1;
        }
        effective
      }
      Indirect => {
        let pointer = self.next_u16();
        self.bus.read_u16(pointer as u32)
      }
      IndirectX => {
        let zp = self.next_u8().wrapping_add(self.x);
        self.read_zero_page_u16(zp)
      }
      IndirectY => {
        let zp = self.next_u8();
        let base = self.read_zero_page_u16(zp);
        let effective = base.wrapping_add(self.y as u16);
        if !is_write && Self::page_crossed(base, effective) {
          self.cycles += 1;
        }
        effective
      }
      Implicit | Accumulator | Relative => {
        unreachable!("{:?} addressing has no effective address", mode)
      }
    }
  }

  fn read_operand(&mut self, mode: Mode) -> u8 {
    if mode == Mode::Accumulator {
      return self.a;
    }
    let address = self.effective_address(mode, false);
    self.bus.read_byte(address as u32)
  }

  fn read_modify_write<F: FnOnce(&mut Self, u8) -> u8>(&mut self, mode: Mode, op: F) {
    if mode == Mode::Accumulator {
      let result = op(self, self.a);
      self.a = result;
      return;
    }
    let address = self.effective_address(mode, true);
    let operand = self.bus.read_byte(address as u32);
    let result = op(self, operand);
    self.bus.write_byte(address as u32, result);
  }

  fn store(&mut self, mode: Mode, value: u8) {
    let address = self.effective_address(mode, true);
    self.bus.write_byte(address as u32, value);
  }

  // -- branches ------------------------------------------------------------

  /// Shared template for the eight conditional branches (§4.3.6): advance
  /// PC past the opcode and displacement (2 base cycles charged by the
  /// opcode table), then on a taken branch add 1 cycle for same page, 2
  /// for a page crossing.
  fn branch(&mut self, taken: bool) {
    let displacement = self.next_u8() as i8;
    if !taken {
      return;
    }
    let from = self.pc;
    let target = self.pc.wrapping_add(displacement as u16);
    self.cycles += if Self::page_crossed(from, target) { 2 } else { 1 };
    self.pc = target;
  }

  // -- interrupts ------------------------------------------------------------

  /// Shared entry sequence for hardware IRQ and BRK: push PC (high then
  /// low), push status (B set only for BRK), raise I, load PC from the
  /// IRQ/BRK vector, and charge 7 cycles.
  fn enter_interrupt(&mut self, is_brk: bool) {
    self.push_u16(self.pc);
    let status = self.status_for_push(is_brk);
    self.push_u8(status);
    self.set_flag(StatusFlag::InterruptDisable, true);
    self.pc = self.bus.read_u16(IRQ_BRK_VECTOR);
    self.cycles += 7;
  }

  /// Fetch, decode, and execute one instruction (or, if an IRQ is pending
  /// and unmasked, the interrupt entry sequence instead). Advances `pc`
  /// and `cycles`.
  pub fn step(&mut self) {
    if self.irq_pending && !self.flag(StatusFlag::InterruptDisable) {
      self.enter_interrupt(false);
      return;
    }

    let pc_at_fetch = self.pc;
    let opcode = self.next_u8();

    let entry = match opcodes::decode(opcode) {
      Some(entry) => entry,
      None => {
        eprintln!(
          "{}",
          format!("unknown opcode: {:#04x} at {:#06x}", opcode, pc_at_fetch).yellow()
        );
        self.cycles += 2;
        return;
      }
    };

    self.cycles += entry.cycles as u64;
    self.dispatch(entry.instruction, entry.mode);
  }

  #[rustfmt::skip]
  fn dispatch(&mut self, instruction: Instruction, mode: Mode) {
    use Instruction::*;
    match instruction {
      LDA => opcodes_move::lda(self, mode),
      LDX => opcodes_move::ldx(self, mode),
      LDY => opcodes_move::ldy(self, mode),
      STA => opcodes_move::sta(self, mode),
      STX => opcodes_move::stx(self, mode),
      STY => opcodes_move::sty(self, mode),
      TAX => opcodes_move::tax(self),
      TAY => opcodes_move::tay(self),
      TXA => opcodes_move::txa(self),
      TYA => opcodes_move::tya(self),
      TSX => opcodes_move::tsx(self),
      TXS => opcodes_move::txs(self),
      PHA => opcodes_move::pha(self),
      PLA => opcodes_move::pla(self),
      PHP => opcodes_move::php(self),
      PLP => opcodes_move::plp(self),

      AND => opcodes_logical::and(self, mode),
      ORA => opcodes_logical::ora(self, mode),
      EOR => opcodes_logical::eor(self, mode),
      BIT => opcodes_logical::bit(self, mode),
      ADC => opcodes_logical::adc(self, mode),
      SBC => opcodes_logical::sbc(self, mode),
      CMP => opcodes_logical::cmp(self, mode),
      CPX => opcodes_logical::cpx(self, mode),
      CPY => opcodes_logical::cpy(self, mode),
      INC => opcodes_logical::inc(self, mode),
      INX => opcodes_logical::inx(self),
      INY => opcodes_logical::iny(self),
      DEC => opcodes_logical::dec(self, mode),
      DEX => opcodes_logical::dex(self),
      DEY => opcodes_logical::dey(self),
      ASL => opcodes_logical::asl(self, mode),
      LSR => opcodes_logical::lsr(self, mode),
      ROL => opcodes_logical::rol(self, mode),
      ROR => opcodes_logical::ror(self, mode),

      JMP => opcodes_jump::jmp(self, mode),
      JSR => opcodes_jump::jsr(self, mode),
      RTS => opcodes_jump::rts(self),
      RTI => opcodes_jump::rti(self),
      BPL => self.branch(!self.flag(StatusFlag::Negative)),
      BMI => self.branch(self.flag(StatusFlag::Negative)),
      BVC => self.branch(!self.flag(StatusFlag::Overflow)),
      BVS => self.branch(self.flag(StatusFlag::Overflow)),
      BCC => self.branch(!self.flag(StatusFlag::Carry)),
      BCS => self.branch(self.flag(StatusFlag::Carry)),
      BNE => self.branch(!self.flag(StatusFlag::Zero)),
      BEQ => self.branch(self.flag(StatusFlag::Zero)),
      CLC => self.set_flag(StatusFlag::Carry, false),
      SEC => self.set_flag(StatusFlag::Carry, true),
      CLD => self.set_flag(StatusFlag::Decimal, false),
      SED => self.set_flag(StatusFlag::Decimal, true),
      CLI => self.set_flag(StatusFlag::InterruptDisable, false),
      SEI => self.set_flag(StatusFlag::InterruptDisable, true),
      CLV => self.set_flag(StatusFlag::Overflow, false),
      NOP => {}
      BRK => opcodes_jump::brk(self),
    }
  }
}
