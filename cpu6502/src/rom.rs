//! Loading a raw ROM image onto a bus (§6 "ROM loader (collaborator)").
//!
//! Unlike the teacher's NES loader this carries no iNES header parsing:
//! the spec's ROM images are flat byte dumps placed at a caller-supplied
//! base address.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::bus::DirectBus;

#[derive(Debug)]
pub enum RomLoadError {
  Io(io::Error),
  /// The span `[start, start + len)` the caller asked to map the image
  /// into is too short to hold it.
  TooShort { expected_at_most: usize, actual: usize },
}

impl fmt::Display for RomLoadError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RomLoadError::Io(error) => write!(f, "{error}"),
      RomLoadError::TooShort { expected_at_most, actual } => {
        write!(f, "ROM image is {actual} bytes, but only {expected_at_most} fit at the requested base")
      }
    }
  }
}

impl std::error::Error for RomLoadError {}

impl From<io::Error> for RomLoadError {
  fn from(error: io::Error) -> RomLoadError {
    RomLoadError::Io(error)
  }
}

/// Read `path` and copy its bytes onto `bus` starting at `start`,
/// analogous to the source's `RomLoader::load(name, start, len, ram)`.
/// `len` caps how much of the file is mapped; pass the file's own size
/// to map it in full.
pub fn load_into(path: &Path, start: u32, len: usize, bus: &mut DirectBus) -> Result<(), RomLoadError> {
  let bytes = fs::read(path)?;
  if bytes.len() > len {
    return Err(RomLoadError::TooShort {
      expected_at_most: len,
      actual: bytes.len(),
    });
  }
  bus.load_bytes(start, &bytes);
  Ok(())
}
