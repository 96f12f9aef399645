//! Optional symbol information loaded from a JSON side file: named memory
//! ranges (code/data/unknown), function labels, and read/write port names
//! for the disassembler to annotate (§4.2, §6).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// What a memory range is used for, from the debugger's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
  Code,
  Data,
  Unknown,
}

#[derive(Debug, Deserialize)]
struct RangeRecord {
  start: String,
  end: String,
  #[serde(rename = "type")]
  kind: String,
  #[serde(default)]
  name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FunctionRecord {
  address: String,
  name: String,
}

#[derive(Debug, Deserialize)]
struct SymbolFile {
  #[serde(default)]
  ranges: Vec<RangeRecord>,
  #[serde(default)]
  functions: Vec<FunctionRecord>,
  #[serde(default)]
  read_ports: Vec<FunctionRecord>,
  #[serde(default)]
  write_ports: Vec<FunctionRecord>,
}

struct Range {
  start: u16,
  end: u16,
  kind: Kind,
  name: Option<String>,
}

/// A loaded symbol table. Malformed entries are diagnosed and skipped
/// rather than failing the whole load, matching `debug_symbols.cpp`'s
/// "warn and continue" policy for a debugger aid that is never load
/// bearing for execution.
#[derive(Default)]
pub struct DebugSymbols {
  ranges: Vec<Range>,
  functions: HashMap<u16, String>,
  read_ports: HashMap<u16, String>,
  write_ports: HashMap<u16, String>,
}

fn parse_hex_address(raw: &str, context: &str) -> Option<u16> {
  let trimmed = raw.trim().trim_start_matches("0x").trim_start_matches("0X");
  match u16::from_str_radix(trimmed, 16) {
    Ok(value) => Some(value),
    Err(_) => {
      eprintln!("debug symbols: could not parse address {:?} in {}", raw, context);
      None
    }
  }
}

impl DebugSymbols {
  pub fn empty() -> DebugSymbols {
    DebugSymbols::default()
  }

  /// Parse a symbol file's JSON text. Never fails outright: an
  /// individual bad record is diagnosed to stderr and dropped.
  pub fn parse(contents: &str) -> DebugSymbols {
    let parsed: SymbolFile = match serde_json::from_str(contents) {
      Ok(value) => value,
      Err(error) => {
        eprintln!("debug symbols: malformed JSON ({error}), ignoring symbol file");
        return DebugSymbols::empty();
      }
    };

    let mut symbols = DebugSymbols::empty();

    for record in parsed.ranges {
      let (Some(start), Some(end)) = (
        parse_hex_address(&record.start, "range start"),
        parse_hex_address(&record.end, "range end"),
      ) else {
        continue;
      };
      let kind = match record.kind.as_str() {
        "code" => Kind::Code,
        "data" => Kind::Data,
        "unknown" => Kind::Unknown,
        other => {
          eprintln!("debug symbols: unknown range type {:?}, treating as unknown", other);
          Kind::Unknown
        }
      };
      symbols.ranges.push(Range {
        start,
        end,
        kind,
        name: record.name,
      });
    }

    for record in parsed.functions {
      if let Some(address) = parse_hex_address(&record.address, "function address") {
        symbols.functions.insert(address, record.name);
      }
    }
    for record in parsed.read_ports {
      if let Some(address) = parse_hex_address(&record.address, "read port address") {
        symbols.read_ports.insert(address, record.name);
      }
    }
    for record in parsed.write_ports {
      if let Some(address) = parse_hex_address(&record.address, "write port address") {
        symbols.write_ports.insert(address, record.name);
      }
    }

    symbols
  }

  pub fn load(path: &Path) -> DebugSymbols {
    match fs::read_to_string(path) {
      Ok(contents) => DebugSymbols::parse(&contents),
      Err(error) => {
        eprintln!("debug symbols: could not read {}: {error}", path.display());
        DebugSymbols::empty()
      }
    }
  }

  pub fn kind(&self, address: u16) -> Kind {
    for range in &self.ranges {
      if address >= range.start && address <= range.end {
        return range.kind;
      }
    }
    Kind::Unknown
  }

  pub fn range_name(&self, address: u16) -> Option<&str> {
    self
      .ranges
      .iter()
      .find(|range| address >= range.start && address <= range.end)
      .and_then(|range| range.name.as_deref())
  }

  pub fn function_name(&self, address: u16) -> Option<&str> {
    self.functions.get(&address).map(String::as_str)
  }

  pub fn read_port(&self, address: u16) -> Option<&str> {
    self.read_ports.get(&address).map(String::as_str)
  }

  pub fn write_port(&self, address: u16) -> Option<&str> {
    self.write_ports.get(&address).map(String::as_str)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn parses_ranges_functions_and_ports() {
    let symbols = DebugSymbols::parse(
      r#"{
        "ranges": [{"start": "0x8000", "end": "0xFFFF", "type": "code", "name": "rom"}],
        "functions": [{"address": "0x8010", "name": "main_loop"}],
        "read_ports": [{"address": "0x2002", "name": "ppu_status"}],
        "write_ports": [{"address": "0x2000", "name": "ppu_ctrl"}]
      }"#,
    );
    assert_eq!(symbols.kind(0x9000), Kind::Code);
    assert_eq!(symbols.range_name(0x9000), Some("rom"));
    assert_eq!(symbols.function_name(0x8010), Some("main_loop"));
    assert_eq!(symbols.read_port(0x2002), Some("ppu_status"));
    assert_eq!(symbols.write_port(0x2000), Some("ppu_ctrl"));
    assert_eq!(symbols.kind(0x0010), Kind::Unknown);
  }

  #[test]
  fn skips_malformed_entries_instead_of_failing() {
    let symbols = DebugSymbols::parse(
      r#"{
        "ranges": [
          {"start": "not-hex", "end": "0xFFFF", "type": "code"},
          {"start": "0x0000", "end": "0x7FFF", "type": "data"}
        ]
      }"#,
    );
    assert_eq!(symbols.kind(0x1000), Kind::Data);
  }

  #[test]
  fn malformed_json_yields_an_empty_table_not_a_panic() {
    let symbols = DebugSymbols::parse("not json at all");
    assert_eq!(symbols.kind(0x1234), Kind::Unknown);
  }
}
