//! A cycle-counted interpreter for the MOS Technology 6502, plus the
//! supporting address bus, disassembler, debug-symbol loader, and ROM
//! loader an arcade-board emulator needs around it.

pub mod bus;
pub mod cpu;
pub mod debug_symbols;
pub mod disasm;
pub mod opcodes;
pub mod rom;

pub use bus::{DirectBus, MemoryBus, MirrorRegion};
pub use cpu::Cpu;
