use super::opcodes_move;
use super::test_helpers::assert_flag;
use super::{Cpu, StatusFlag, STATUS_READBACK_MASK};
use crate::bus::{DirectBus, MemoryBus};

fn new_cpu_at(bus: &mut DirectBus, pc: u16) -> Cpu<'_, DirectBus> {
  let mut cpu = Cpu::new(bus);
  cpu.pc = pc;
  cpu
}

// -- scenario 1: reset vector ------------------------------------------------

#[test]
fn scenario_reset_vector() {
  let mut bus = DirectBus::new_64k();
  bus.write_byte(0xFFFC, 0x23);
  bus.write_byte(0xFFFD, 0x01);
  let mut cpu = Cpu::new(&mut bus);
  cpu.reset();
  assert_eq!(cpu.pc, 0x0123);
}

// -- scenario 2: ADC decimal wrap ---------------------------------------------

#[test]
fn scenario_adc_decimal_wrap() {
  let mut bus = DirectBus::new_64k();
  // SED; LDA #$16; ADC #$85
  bus.load_bytes(0x0200, &[0xF8, 0xA9, 0x16, 0x69, 0x85]);
  bus.load_bytes(0xFFFC, &[0x00, 0x02]);
  let mut cpu = Cpu::new(&mut bus);
  cpu.reset();
  cpu.step(); // SED
  cpu.step(); // LDA #$16
  let pc_before_adc = cpu.pc;
  let cycles_before_adc = cpu.cycles;
  cpu.step(); // ADC #$85
  assert_eq!(cpu.pc - pc_before_adc, 2);
  assert_eq!(cpu.cycles - cycles_before_adc, 2);
  assert_eq!(cpu.a, 0x01);
  assert_flag(cpu.p_for_test(), StatusFlag::Carry, true, "C");
  assert_flag(cpu.p_for_test(), StatusFlag::Overflow, false, "V");
}

// -- scenario 3: ADC signed overflow ------------------------------------------

#[test]
fn scenario_adc_signed_overflow() {
  let mut bus = DirectBus::new_64k();
  // LDA #$70; ADC #$10
  bus.load_bytes(0x0200, &[0xA9, 0x70, 0x69, 0x10]);
  bus.load_bytes(0xFFFC, &[0x00, 0x02]);
  let mut cpu = Cpu::new(&mut bus);
  cpu.reset();
  cpu.step();
  cpu.step();
  assert_eq!(cpu.a, 0x80);
  assert_flag(cpu.p_for_test(), StatusFlag::Overflow, true, "V");
  assert_flag(cpu.p_for_test(), StatusFlag::Negative, true, "N");
  assert_flag(cpu.p_for_test(), StatusFlag::Zero, false, "Z");
  assert_flag(cpu.p_for_test(), StatusFlag::Carry, false, "C");
}

// -- scenario 4: LDA (zp),Y with page cross -----------------------------------

#[test]
fn scenario_lda_indirect_indexed_page_cross() {
  let mut bus = DirectBus::new_64k();
  bus.write_byte(0x0034, 0xA0);
  bus.write_byte(0x0035, 0x10);
  bus.write_byte(0x1113, 0x42);
  // LDY #$73; LDA ($34), Y
  bus.load_bytes(0x0200, &[0xA0, 0x73, 0xB1, 0x34]);
  bus.load_bytes(0xFFFC, &[0x00, 0x02]);
  let mut cpu = Cpu::new(&mut bus);
  cpu.reset();
  cpu.step(); // LDY
  let cycles_before = cpu.cycles;
  cpu.step(); // LDA (zp),Y
  assert_eq!(cpu.a, 0x42);
  assert_eq!(cpu.cycles - cycles_before, 6);
}

// -- scenario 5: branch taken across a page -----------------------------------

#[test]
fn scenario_branch_same_page() {
  let mut bus = DirectBus::new_64k();
  bus.load_bytes(0x0123, &[0x10, 0xFC]); // BPL *-4
  let mut cpu = new_cpu_at(&mut bus, 0x0123);
  cpu.step();
  assert_eq!(cpu.pc, 0x0121);
  assert_eq!(cpu.cycles, 3);
}

#[test]
fn scenario_branch_crossing_page() {
  let mut bus = DirectBus::new_64k();
  bus.load_bytes(0x0123, &[0x10, 0xD0]); // BPL *-0x30
  let mut cpu = new_cpu_at(&mut bus, 0x0123);
  cpu.step();
  assert_eq!(cpu.pc, 0x00F5);
  assert_eq!(cpu.cycles, 4);
}

// -- scenario 6: JSR then RTS --------------------------------------------------

#[test]
fn scenario_jsr_then_rts() {
  let mut bus = DirectBus::new_64k();
  bus.load_bytes(0x0123, &[0x20, 0x01, 0x02]); // JSR $0201
  let mut cpu = new_cpu_at(&mut bus, 0x0123);
  cpu.sp = 0xF0;
  cpu.step();
  assert_eq!(cpu.pc, 0x0201);
  assert_eq!(cpu.sp, 0xEE);
  assert_eq!(cpu.bus_mut().read_byte(0x01F0), 0x01);
  assert_eq!(cpu.bus_mut().read_byte(0x01EF), 0x25);

  cpu.bus_mut().write_byte(0x0201, 0x60); // RTS
  cpu.step();
  assert_eq!(cpu.pc, 0x0126);
}

// -- scenario 7: PHP with all flags set -----------------------------------------

#[test]
fn scenario_php_all_flags_set() {
  let mut bus = DirectBus::new_64k();
  bus.write_byte(0x0200, 0x08); // PHP
  let mut cpu = new_cpu_at(&mut bus, 0x0200);
  cpu.sp = 0xF0;
  for flag in [
    StatusFlag::Negative,
    StatusFlag::Overflow,
    StatusFlag::Zero,
    StatusFlag::Carry,
    StatusFlag::Decimal,
    StatusFlag::InterruptDisable,
  ] {
    cpu.set_flag(flag, true);
  }
  cpu.step();
  assert_eq!(cpu.bus_mut().read_byte(0x01F0), 0xFF);
  assert_eq!(cpu.sp, 0xEF);
  assert_eq!(cpu.cycles, 3);
}

// -- scenario 8: unknown opcode -------------------------------------------------

#[test]
fn scenario_unknown_opcode() {
  let mut bus = DirectBus::new_64k();
  bus.write_byte(0x0200, 0x02);
  let mut cpu = new_cpu_at(&mut bus, 0x0200);
  let (a, x, y, sp) = (cpu.a, cpu.x, cpu.y, cpu.sp);
  cpu.step();
  assert_eq!(cpu.pc, 0x0201);
  assert_eq!(cpu.cycles, 2);
  assert_eq!((cpu.a, cpu.x, cpu.y, cpu.sp), (a, x, y, sp));
}

// -- quantified invariants ------------------------------------------------------

#[test]
fn flag_locality_across_all_byte_values() {
  for r in 0u16..=255 {
    let mut bus = DirectBus::new_64k();
    let mut cpu = Cpu::new(&mut bus);
    cpu.update_zn(r as u8);
    assert_eq!(cpu.flag(StatusFlag::Zero), r == 0);
    assert_eq!(cpu.flag(StatusFlag::Negative), r >= 0x80);
  }
}

#[test]
fn adc_identity_binary() {
  for a in [0u8, 1, 0x7F, 0x80, 0xFF] {
    for m in [0u8, 1, 0x7F, 0x80, 0xFF] {
      for c in [false, true] {
        let mut bus = DirectBus::new_64k();
        bus.load_bytes(0x0200, &[0x69, m]); // ADC #m
        let mut cpu = new_cpu_at(&mut bus, 0x0200);
        cpu.a = a;
        cpu.set_flag(StatusFlag::Carry, c);
        cpu.step();
        let expected = a as u16 + m as u16 + c as u16;
        let actual = cpu.a as u16 + if cpu.flag(StatusFlag::Carry) { 256 } else { 0 };
        assert_eq!(actual, expected, "A={a:#x} M={m:#x} C={c}");
      }
    }
  }
}

#[test]
fn stack_round_trip_is_lifo() {
  let mut bus = DirectBus::new_64k();
  let mut cpu = Cpu::new(&mut bus);
  cpu.sp = 0xFD;
  cpu.push_u8(0x11);
  cpu.push_u16(0x2233);
  cpu.push_u8(0x44);
  assert_eq!(cpu.pop_u8(), 0x44);
  assert_eq!(cpu.pop_u16(), 0x2233);
  assert_eq!(cpu.pop_u8(), 0x11);
  assert_eq!(cpu.sp, 0xFD);
}

#[test]
fn php_then_plp_restores_all_visible_flags() {
  let mut bus = DirectBus::new_64k();
  let mut cpu = Cpu::new(&mut bus);
  cpu.sp = 0xFD;
  for flag in [
    StatusFlag::Negative,
    StatusFlag::Overflow,
    StatusFlag::Decimal,
    StatusFlag::InterruptDisable,
    StatusFlag::Zero,
    StatusFlag::Carry,
  ] {
    cpu.set_flag(flag, true);
  }
  let before = cpu.p_for_test() & STATUS_READBACK_MASK;
  opcodes_move::php(&mut cpu);
  cpu.set_flag(StatusFlag::Negative, false);
  cpu.set_flag(StatusFlag::Carry, false);
  opcodes_move::plp(&mut cpu);
  assert_eq!(cpu.p_for_test() & STATUS_READBACK_MASK, before);
}

#[test]
fn branch_timing_not_taken_costs_two_cycles() {
  let mut bus = DirectBus::new_64k();
  bus.write_byte(0x0200, 0x10); // BPL
  bus.write_byte(0x0201, 0x10);
  let mut cpu = new_cpu_at(&mut bus, 0x0200);
  cpu.set_flag(StatusFlag::Negative, true); // BPL not taken
  cpu.step();
  assert_eq!(cpu.cycles, 2);
  assert_eq!(cpu.pc, 0x0202);
}

#[test]
fn unknown_opcode_is_non_fatal_and_resembles_nop() {
  let mut bus = DirectBus::new_64k();
  bus.load_bytes(0x0200, &[0x02, 0xEA]); // unknown, then NOP
  let mut cpu = new_cpu_at(&mut bus, 0x0200);
  cpu.step();
  cpu.step();
  assert_eq!(cpu.pc, 0x0202);
  assert_eq!(cpu.cycles, 2 + 2);
}

#[test]
fn txs_does_not_touch_flags() {
  let mut bus = DirectBus::new_64k();
  bus.write_byte(0x0200, 0x9A); // TXS
  let mut cpu = new_cpu_at(&mut bus, 0x0200);
  cpu.x = 0x00;
  cpu.set_flag(StatusFlag::Zero, false);
  cpu.step();
  assert_eq!(cpu.sp, 0x00);
  assert_flag(cpu.p_for_test(), StatusFlag::Zero, false, "Z");
}

#[test]
fn brk_enters_through_the_irq_brk_vector_with_break_set() {
  let mut bus = DirectBus::new_64k();
  bus.write_byte(0x0200, 0x00); // BRK
  bus.load_bytes(0xFFFE, &[0x00, 0x03]);
  let mut cpu = new_cpu_at(&mut bus, 0x0200);
  cpu.sp = 0xFF;
  cpu.step();
  assert_eq!(cpu.pc, 0x0300);
  assert_eq!(cpu.cycles, 7);
  let pushed_status = cpu.bus_mut().read_byte(0x01FD);
  assert_flag(pushed_status, StatusFlag::Break, true, "B");
  assert_flag(cpu.p_for_test(), StatusFlag::InterruptDisable, true, "I");
}

#[test]
fn hardware_irq_pushes_status_with_break_clear() {
  let mut bus = DirectBus::new_64k();
  bus.write_byte(0x0200, 0xEA); // NOP
  bus.load_bytes(0xFFFE, &[0x00, 0x03]);
  let mut cpu = new_cpu_at(&mut bus, 0x0200);
  cpu.sp = 0xFF;
  cpu.set_flag(StatusFlag::InterruptDisable, false);
  cpu.set_irq_line(true);
  cpu.step();
  assert_eq!(cpu.pc, 0x0300);
  assert_eq!(cpu.cycles, 7);
  let pushed_status = cpu.bus_mut().read_byte(0x01FD);
  assert_flag(pushed_status, StatusFlag::Break, false, "B");
}
