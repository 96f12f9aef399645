//! A thin driver around `cpu6502`: load a ROM image and an optional debug
//! symbol file, then either disassemble from the reset vector or run the
//! CPU for a bounded number of frames (§6 "Driver CLI (collaborator)").
//!
//! This binary's surface is not part of the interpreter's contract; it
//! exists to exercise the library end to end.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use cpu6502::bus::DirectBus;
use cpu6502::cpu::Cpu;
use cpu6502::debug_symbols::DebugSymbols;
use cpu6502::disasm;
use cpu6502::rom;

/// Cycles per video frame for an NTSC-style 60 Hz refresh at ~1.79 MHz,
/// the same budget the source's main loop drives its 6502 against.
const CYCLES_PER_FRAME: u64 = 29_780;

#[derive(Parser)]
#[command(author, version, about = "Run or disassemble a 6502 ROM image", long_about = None)]
struct Cli {
  /// Path to the flat ROM image to load.
  #[arg(long)]
  rombase: PathBuf,

  /// Address the ROM image is mapped to.
  #[arg(long, value_parser = parse_hex_u16, default_value = "0x8000")]
  load_address: u16,

  /// Optional path to a JSON debug-symbol file.
  #[arg(long)]
  configbase: Option<PathBuf>,

  /// Disassemble from the reset vector instead of running, printing up
  /// to this many instructions.
  #[arg(long)]
  dump: Option<usize>,

  /// Number of video frames to run when not dumping.
  #[arg(long, default_value_t = 60)]
  frames: u32,
}

fn parse_hex_u16(raw: &str) -> Result<u16, String> {
  let trimmed = raw.trim_start_matches("0x").trim_start_matches("0X");
  u16::from_str_radix(trimmed, 16).map_err(|error| error.to_string())
}

fn run(cli: Cli) -> Result<(), String> {
  let mut bus = DirectBus::new_64k();
  let rom_len = (0x10000 - cli.load_address as usize).min(0x8000);
  rom::load_into(&cli.rombase, cli.load_address as u32, rom_len, &mut bus).map_err(|error| error.to_string())?;

  let symbols = match &cli.configbase {
    Some(path) => DebugSymbols::load(path),
    None => DebugSymbols::empty(),
  };

  if let Some(count) = cli.dump {
    let mut cpu = Cpu::new(&mut bus);
    cpu.reset();
    let mut pc = cpu.pc;
    for _ in 0..count {
      let (text, byte_length) = disasm::disassemble(cpu.bus_mut(), pc, &symbols);
      println!("{:#06x}  {}", pc, text);
      pc = pc.wrapping_add(byte_length as u16);
    }
    return Ok(());
  }

  let mut cpu = Cpu::new(&mut bus);
  cpu.reset();
  for frame in 0..cli.frames {
    let frame_end = cpu.cycles + CYCLES_PER_FRAME;
    while cpu.cycles < frame_end {
      cpu.step();
    }
    cpu.set_irq_line(true);
    cpu.step();
    cpu.set_irq_line(false);
    if frame % 10 == 0 {
      eprintln!(
        "{}",
        format!("frame {frame}: PC={:#06x} A={:#04x} X={:#04x} Y={:#04x} cycles={}", cpu.pc, cpu.a, cpu.x, cpu.y, cpu.cycles)
          .dimmed()
      );
    }
  }

  Ok(())
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(message) => {
      eprintln!("{}", format!("ERROR: {message}").red());
      ExitCode::from(255)
    }
  }
}
