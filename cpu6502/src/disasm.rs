//! A pure disassembler (§4.2): given a PC, reads up to three bytes from
//! the bus and produces `(textual_line, byte_length)` without advancing
//! PC or mutating any CPU state. Shares the opcode table `step()` uses,
//! so the two can never silently disagree on instruction length.

use crate::bus::MemoryBus;
use crate::debug_symbols::DebugSymbols;
use crate::opcodes::{self, Instruction, Mode};

fn symbol_suffix(address: u16, instruction: Instruction, symbols: &DebugSymbols) -> String {
  let mut tokens = Vec::new();
  if let Some(label) = symbols.function_name(address) {
    tokens.push(label.to_string());
  }
  let port = if instruction.is_write() {
    symbols.write_port(address)
  } else {
    symbols.read_port(address)
  };
  if let Some(port) = port {
    tokens.push(port.to_string());
  }
  if tokens.is_empty() {
    String::new()
  } else {
    format!("  {}", tokens.join("  "))
  }
}

/// Disassemble one instruction at `pc`. Returns the textual line and how
/// many bytes it occupies (1-3); for an opcode byte the table doesn't
/// recognize, returns the diagnostic line and a length of 1.
pub fn disassemble<B: MemoryBus>(bus: &mut B, pc: u16, symbols: &DebugSymbols) -> (String, u8) {
  let opcode = bus.read_byte(pc as u32);
  let entry = match opcodes::decode(opcode) {
    Some(entry) => entry,
    None => return (format!("unknown opcode: {:#04x}", opcode), 1),
  };

  let mnemonic = entry.instruction.mnemonic();
  let byte_length = 1 + entry.mode.operand_len();

  let text = match entry.mode {
    Mode::Implicit => mnemonic.to_string(),
    Mode::Accumulator => format!("{mnemonic} A"),
    Mode::Immediate => {
      let value = bus.read_byte(pc as u32 + 1);
      format!("{mnemonic} #{value:02x}")
    }
    Mode::ZeroPage => {
      let address = bus.read_byte(pc as u32 + 1);
      format!("{mnemonic} ${address:02x}")
    }
    Mode::ZeroPageX => {
      let address = bus.read_byte(pc as u32 + 1);
      format!("{mnemonic} ${address:02x}, X")
    }
    Mode::ZeroPageY => {
      let address = bus.read_byte(pc as u32 + 1);
      format!("{mnemonic} ${address:02x}, Y")
    }
    Mode::Absolute => {
      let address = bus.read_u16(pc as u32 + 1);
      format!("{mnemonic} ${address:04x}{}", symbol_suffix(address, entry.instruction, symbols))
    }
    Mode::AbsoluteX => {
      let address = bus.read_u16(pc as u32 + 1);
      format!(
        "{mnemonic} ${address:04x}, X{}",
        symbol_suffix(address, entry.instruction, symbols)
      )
    }
    Mode::AbsoluteY => {
      let address = bus.read_u16(pc as u32 + 1);
      format!(
        "{mnemonic} ${address:04x}, Y{}",
        symbol_suffix(address, entry.instruction, symbols)
      )
    }
    Mode::Indirect => {
      let pointer = bus.read_u16(pc as u32 + 1);
      format!("{mnemonic} (${pointer:04x})")
    }
    Mode::IndirectX => {
      let zp = bus.read_byte(pc as u32 + 1);
      format!("{mnemonic} (${zp:02x}, X)")
    }
    Mode::IndirectY => {
      let zp = bus.read_byte(pc as u32 + 1);
      format!("{mnemonic} (${zp:02x}), Y")
    }
    Mode::Relative => {
      let displacement = bus.read_byte(pc as u32 + 1) as i8;
      let target = (pc as i32 + displacement as i32 + 2) as u16;
      format!("{mnemonic} *{displacement}   -> {target:#x}")
    }
  };

  (text, byte_length)
}
