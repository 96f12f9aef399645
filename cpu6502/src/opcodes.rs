//! The decoded opcode table: the single source of truth both `step()` and
//! the disassembler read from, so the two can never disagree about an
//! instruction's addressing mode or its length in bytes.
//!
//! Mnemonics, modes, and base cycle counts follow the documented MOS 6502
//! instruction set. Undocumented/illegal opcodes are out of scope; `decode`
//! returns `None` for them and the CPU treats that as an unknown opcode.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Implicit,
  /// `ASL A` / `LSR A` / `ROL A` / `ROR A` — operates on the accumulator
  /// rather than a memory operand.
  Accumulator,
  Immediate,
  ZeroPage,
  ZeroPageX,
  ZeroPageY,
  Absolute,
  AbsoluteX,
  AbsoluteY,
  Indirect,
  IndirectX,
  IndirectY,
  Relative,
}

impl Mode {
  /// Number of operand bytes following the opcode byte.
  pub fn operand_len(self) -> u8 {
    match self {
      Mode::Implicit | Mode::Accumulator => 0,
      Mode::Immediate
      | Mode::ZeroPage
      | Mode::ZeroPageX
      | Mode::ZeroPageY
      | Mode::IndirectX
      | Mode::IndirectY
      | Mode::Relative => 1,
      Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Instruction {
  LDA,
  LDX,
  LDY,
  STA,
  STX,
  STY,
  TAX,
  TAY,
  TXA,
  TYA,
  TSX,
  TXS,
  PHA,
  PLA,
  PHP,
  PLP,
  AND,
  ORA,
  EOR,
  BIT,
  ADC,
  SBC,
  CMP,
  CPX,
  CPY,
  INC,
  INX,
  INY,
  DEC,
  DEX,
  DEY,
  ASL,
  LSR,
  ROL,
  ROR,
  JMP,
  JSR,
  RTS,
  RTI,
  BPL,
  BMI,
  BVC,
  BVS,
  BCC,
  BCS,
  BNE,
  BEQ,
  CLC,
  SEC,
  CLD,
  SED,
  CLI,
  SEI,
  CLV,
  NOP,
  BRK,
}

impl Instruction {
  pub fn mnemonic(self) -> &'static str {
    use Instruction::*;
    match self {
      LDA => "LDA",
      LDX => "LDX",
      LDY => "LDY",
      STA => "STA",
      STX => "STX",
      STY => "STY",
      TAX => "TAX",
      TAY => "TAY",
      TXA => "TXA",
      TYA => "TYA",
      TSX => "TSX",
      TXS => "TXS",
      PHA => "PHA",
      PLA => "PLA",
      PHP => "PHP",
      PLP => "PLP",
      AND => "AND",
      ORA => "ORA",
      EOR => "EOR",
      BIT => "BIT",
      ADC => "ADC",
      SBC => "SBC",
      CMP => "CMP",
      CPX => "CPX",
      CPY => "CPY",
      INC => "INC",
      INX => "INX",
      INY => "INY",
      DEC => "DEC",
      DEX => "DEX",
      DEY => "DEY",
      ASL => "ASL",
      LSR => "LSR",
      ROL => "ROL",
      ROR => "ROR",
      JMP => "JMP",
      JSR => "JSR",
      RTS => "RTS",
      RTI => "RTI",
      BPL => "BPL",
      BMI => "BMI",
      BVC => "BVC",
      BVS => "BVS",
      BCC => "BCC",
      BCS => "BCS",
      BNE => "BNE",
      BEQ => "BEQ",
      CLC => "CLC",
      SEC => "SEC",
      CLD => "CLD",
      SED => "SED",
      CLI => "CLI",
      SEI => "SEI",
      CLV => "CLV",
      NOP => "NOP",
      BRK => "BRK",
    }
  }

  /// Whether this opcode writes to memory rather than reading it, used to
  /// decide `AbsoluteX`/`AbsoluteY`'s page-crossing rule (reads get a
  /// penalty only when they cross a page, writes always pay it) and the
  /// disassembler's read-port vs. write-port annotation choice.
  pub fn is_write(self) -> bool {
    matches!(self, Instruction::STA | Instruction::STX | Instruction::STY)
  }
}

#[derive(Debug, Clone, Copy)]
pub struct OpcodeEntry {
  pub instruction: Instruction,
  pub mode: Mode,
  /// Base cycle cost, before any page-crossing or branch-taken penalty.
  pub cycles: u8,
}

/// Decode a fetched opcode byte into its instruction, addressing mode, and
/// base cycle cost. Returns `None` for opcodes with no entry in the
/// documented instruction set (§4.3.8: treated by the CPU as an unknown
/// opcode, diagnosed and skipped as a 1-byte NOP).
#[rustfmt::skip]
pub fn decode(opcode: u8) -> Option<OpcodeEntry> {
  use Instruction::*;
  use Mode::*;
  let (instruction, mode, cycles) = match opcode {
    // Cost is charged entirely by enter_interrupt(); step() must not
    // also add the table cost here or BRK double-charges (14 vs 7).
    0x00 => (BRK, Implicit,    0),
    0x01 => (ORA, IndirectX,   6),
    0x05 => (ORA, ZeroPage,    3),
    0x06 => (ASL, ZeroPage,    5),
    0x08 => (PHP, Implicit,    3),
    0x09 => (ORA, Immediate,   2),
    0x0A => (ASL, Accumulator, 2),
    0x0D => (ORA, Absolute,    4),
    0x0E => (ASL, Absolute,    6),

    0x10 => (BPL, Relative,    2),
    0x11 => (ORA, IndirectY,   5),
    0x15 => (ORA, ZeroPageX,   4),
    0x16 => (ASL, ZeroPageX,   6),
    0x18 => (CLC, Implicit,    2),
    0x19 => (ORA, AbsoluteY,   4),
    0x1D => (ORA, AbsoluteX,   4),
    0x1E => (ASL, AbsoluteX,   7),

    0x20 => (JSR, Absolute,    6),
    0x21 => (AND, IndirectX,   6),
    0x24 => (BIT, ZeroPage,    3),
    0x25 => (AND, ZeroPage,    3),
    0x26 => (ROL, ZeroPage,    5),
    0x28 => (PLP, Implicit,    4),
    0x29 => (AND, Immediate,   2),
    0x2A => (ROL, Accumulator, 2),
    0x2C => (BIT, Absolute,    4),
    0x2D => (AND, Absolute,    4),
    0x2E => (ROL, Absolute,    6),

    0x30 => (BMI, Relative,    2),
    0x31 => (AND, IndirectY,   5),
    0x35 => (AND, ZeroPageX,   4),
    0x36 => (ROL, ZeroPageX,   6),
    0x38 => (SEC, Implicit,    2),
    0x39 => (AND, AbsoluteY,   4),
    0x3D => (AND, AbsoluteX,   4),
    0x3E => (ROL, AbsoluteX,   7),

    0x40 => (RTI, Implicit,    6),
    0x41 => (EOR, IndirectX,   6),
    0x45 => (EOR, ZeroPage,    3),
    0x46 => (LSR, ZeroPage,    5),
    0x48 => (PHA, Implicit,    3),
    0x49 => (EOR, Immediate,   2),
    0x4A => (LSR, Accumulator, 2),
    0x4C => (JMP, Absolute,    3),
    0x4D => (EOR, Absolute,    4),
    0x4E => (LSR, Absolute,    6),

    0x50 => (BVC, Relative,    2),
    0x51 => (EOR, IndirectY,   5),
    0x55 => (EOR, ZeroPageX,   4),
    0x56 => (LSR, ZeroPageX,   6),
    0x58 => (CLI, Implicit,    2),
    0x59 => (EOR, AbsoluteY,   4),
    0x5D => (EOR, AbsoluteX,   4),
    0x5E => (LSR, AbsoluteX,   7),

    0x60 => (RTS, Implicit,    6),
    0x61 => (ADC, IndirectX,   6),
    0x65 => (ADC, ZeroPage,    3),
    0x66 => (ROR, ZeroPage,    5),
    0x68 => (PLA, Implicit,    4),
    0x69 => (ADC, Immediate,   2),
    0x6A => (ROR, Accumulator, 2),
    0x6C => (JMP, Indirect,    5),
    0x6D => (ADC, Absolute,    4),
    0x6E => (ROR, Absolute,    6),

    0x70 => (BVS, Relative,    2),
    0x71 => (ADC, IndirectY,   5),
    0x75 => (ADC, ZeroPageX,   4),
    0x76 => (ROR, ZeroPageX,   6),
    0x78 => (SEI, Implicit,    2),
    0x79 => (ADC, AbsoluteY,   4),
    0x7D => (ADC, AbsoluteX,   4),
    0x7E => (ROR, AbsoluteX,   7),

    0x81 => (STA, IndirectX,   6),
    0x84 => (STY, ZeroPage,    3),
    0x85 => (STA, ZeroPage,    3),
    0x86 => (STX, ZeroPage,    3),
    0x88 => (DEY, Implicit,    2),
    0x8A => (TXA, Implicit,    2),
    0x8C => (STY, Absolute,    4),
    0x8D => (STA, Absolute,    4),
    0x8E => (STX, Absolute,    4),

    0x90 => (BCC, Relative,    2),
    0x91 => (STA, IndirectY,   6),
    0x94 => (STY, ZeroPageX,   4),
    0x95 => (STA, ZeroPageX,   4),
    0x96 => (STX, ZeroPageY,   4),
    0x98 => (TYA, Implicit,    2),
    0x99 => (STA, AbsoluteY,   5),
    0x9A => (TXS, Implicit,    2),
    0x9D => (STA, AbsoluteX,   5),

    0xA0 => (LDY, Immediate,   2),
    0xA1 => (LDA, IndirectX,   6),
    0xA2 => (LDX, Immediate,   2),
    0xA4 => (LDY, ZeroPage,    3),
    0xA5 => (LDA, ZeroPage,    3),
    0xA6 => (LDX, ZeroPage,    3),
    0xA8 => (TAY, Implicit,    2),
    0xA9 => (LDA, Immediate,   2),
    0xAA => (TAX, Implicit,    2),
    0xAC => (LDY, Absolute,    4),
    0xAD => (LDA, Absolute,    4),
    0xAE => (LDX, Absolute,    4),

    0xB0 => (BCS, Relative,    2),
    0xB1 => (LDA, IndirectY,   5),
    0xB4 => (LDY, ZeroPageX,   4),
    0xB5 => (LDA, ZeroPageX,   4),
    0xB6 => (LDX, ZeroPageY,   4),
    0xB8 => (CLV, Implicit,    2),
    0xB9 => (LDA, AbsoluteY,   4),
    0xBA => (TSX, Implicit,    2),
    0xBC => (LDY, AbsoluteX,   4),
    0xBD => (LDA, AbsoluteX,   4),
    0xBE => (LDX, AbsoluteY,   4),

    0xC0 => (CPY, Immediate,   2),
    0xC1 => (CMP, IndirectX,   6),
    0xC4 => (CPY, ZeroPage,    3),
    0xC5 => (CMP, ZeroPage,    3),
    0xC6 => (DEC, ZeroPage,    5),
    0xC8 => (INY, Implicit,    2),
    0xC9 => (CMP, Immediate,   2),
    0xCA => (DEX, Implicit,    2),
    0xCC => (CPY, Absolute,    4),
    0xCD => (CMP, Absolute,    4),
    0xCE => (DEC, Absolute,    6),

    0xD0 => (BNE, Relative,    2),
    0xD1 => (CMP, IndirectY,   5),
    0xD5 => (CMP, ZeroPageX,   4),
    0xD6 => (DEC, ZeroPageX,   6),
    0xD8 => (CLD, Implicit,    2),
    0xD9 => (CMP, AbsoluteY,   4),
    0xDD => (CMP, AbsoluteX,   4),
    0xDE => (DEC, AbsoluteX,   7),

    0xE0 => (CPX, Immediate,   2),
    0xE1 => (SBC, IndirectX,   6),
    0xE4 => (CPX, ZeroPage,    3),
    0xE5 => (SBC, ZeroPage,    3),
    0xE6 => (INC, ZeroPage,    5),
    0xE8 => (INX, Implicit,    2),
    0xE9 => (SBC, Immediate,   2),
    0xEA => (NOP, Implicit,    2),
    0xEC => (CPX, Absolute,    4),
    0xED => (SBC, Absolute,    4),
    0xEE => (INC, Absolute,    6),

    0xF0 => (BEQ, Relative,    2),
    0xF1 => (SBC, IndirectY,   5),
    0xF5 => (SBC, ZeroPageX,   4),
    0xF6 => (INC, ZeroPageX,   6),
    0xF8 => (SED, Implicit,    2),
    0xF9 => (SBC, AbsoluteY,   4),
    0xFD => (SBC, AbsoluteX,   4),
    0xFE => (INC, AbsoluteX,   7),

    _ => return None,
  };
  Some(OpcodeEntry { instruction, mode, cycles })
}
