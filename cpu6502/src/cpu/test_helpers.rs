//! Shared scaffolding for CPU unit tests: assertion helpers that print the
//! full flag byte on mismatch instead of just true/false, the way a
//! hardware trace would.

use crate::cpu::StatusFlag;

pub fn assert_flag(p: u8, flag: StatusFlag, expected: bool, name: &str) {
  let actual = p & (flag as u8) != 0;
  assert_eq!(
    actual, expected,
    "expected flag {} to be {} but it was {} (P = {:#010b})",
    name, expected, actual, p
  );
}
