//! Run loop and fatal conditions.

use pipesim_core::common::{DecodeError, MemoryError, SimError};

use crate::common::builder::instruction::{InstructionBuilder, exit, nop};
use crate::common::harness::{PROGRAM_BASE, TestContext};

#[test]
fn unmapped_fetch_is_fatal_once_decoded() {
    let mut ctx = TestContext::new();
    ctx.cpu.pc = 0x9000_0000;

    ctx.step().unwrap();
    assert!(
        ctx.cpu.pipeline.decode.as_ref().is_some_and(|f| f.fault.is_some()),
        "the fault waits in the decode slot"
    );

    let err = ctx.step().unwrap_err();
    assert!(matches!(
        err,
        SimError::Memory {
            pc: 0x9000_0000,
            source: MemoryError::Unmapped { addr: 0x9000_0000 }
        }
    ));
}

#[test]
fn running_off_the_last_mapped_page_is_fatal() {
    let last = PROGRAM_BASE + 0xFFC;
    let mut ctx = TestContext::new().load_program(last, &[nop()]);

    let err = ctx.run(10).unwrap_err();
    assert!(matches!(
        err,
        SimError::Memory {
            pc,
            source: MemoryError::Unmapped { addr }
        } if pc == last + 4 && addr == last + 4
    ));
}

#[test]
fn jump_at_the_end_of_a_page_discards_the_wrong_path_fetch() {
    let last = PROGRAM_BASE + 0xFFC;
    let jump_back = InstructionBuilder::new().jal(0, -0xFFC).build();
    let mut ctx = TestContext::new()
        .load_program(PROGRAM_BASE, &exit(0))
        .load_program(last, &[jump_back]);
    assert!(!ctx.cpu.memory.is_mapped(last + 4));

    ctx.run(100).unwrap();
    assert_eq!(ctx.cpu.exit_code, Some(0));
}

#[test]
fn exit_at_the_end_of_a_page_ignores_the_next_fetch() {
    let first = PROGRAM_BASE + 0x1000 - 12;
    let mut ctx = TestContext::new().load_program(first, &exit(3));

    ctx.run(100).unwrap();
    assert_eq!(ctx.cpu.exit_code, Some(3));
}

#[test]
fn undecodable_word_is_fatal_with_its_pc() {
    // FENCE is outside the supported subset.
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[nop(), 0x0000_000F]);
    ctx.step().unwrap();
    ctx.step().unwrap();

    let err = ctx.step().unwrap_err();
    match err {
        SimError::Decode { pc, source } => {
            assert_eq!(pc, PROGRAM_BASE + 4);
            assert!(matches!(source, DecodeError::UnknownOpcode { opcode: 0x0F, .. }));
        }
        other => panic!("expected a decode failure, got {other:?}"),
    }
}

#[test]
fn unmapped_load_reports_the_load_pc() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[InstructionBuilder::new().ld(5, 8, 0).build(), nop(), nop(), nop()],
    );
    ctx.set_reg(8, 0x5000_0000);

    let err = ctx.run(10).unwrap_err();
    assert!(matches!(
        err,
        SimError::Memory {
            pc: PROGRAM_BASE,
            source: MemoryError::Unmapped { addr: 0x5000_0000 }
        }
    ));
}

#[test]
fn page_crossing_store_is_fatal() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[InstructionBuilder::new().sd(8, 0, 0).build(), nop(), nop(), nop()],
    );
    ctx.set_reg(8, 0x3FFC);

    let err = ctx.run(10).unwrap_err();
    assert!(matches!(
        err,
        SimError::Memory {
            source: MemoryError::CrossesPage { addr: 0x3FFC, size: 8 },
            ..
        }
    ));
}

#[test]
fn run_until_exit_returns_the_code() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &exit(3));
    assert_eq!(ctx.cpu.run_until_exit(None).unwrap(), Some(3));
}

#[test]
fn run_until_exit_honours_the_cycle_budget() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &exit(3));
    assert_eq!(ctx.cpu.run_until_exit(Some(2)).unwrap(), None);
    assert_eq!(ctx.cpu.stats.cycles, 2);
}

#[test]
fn take_exit_clears_the_code() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &exit(1));
    ctx.run(100).unwrap();
    assert!(ctx.cpu.is_exit());
    assert_eq!(ctx.cpu.take_exit(), Some(1));
    assert!(!ctx.cpu.is_exit());
}

#[test]
fn dump_state_reports_pc_heap_registers_and_stats() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[nop(), nop(), nop()]);
    ctx.cpu.heap = 0x4_0000;
    ctx.set_reg(10, 0xABCD);
    ctx.run(3).unwrap();

    let dump = ctx.cpu.dump_state();
    assert!(dump.contains("PC   = 0x000000000001000c"));
    assert!(dump.contains("HEAP = 0x0000000000040000"));
    assert!(dump.contains("EX   = 0x0000000000010004"));
    assert!(dump.contains("0x000000000000abcd"));
    assert!(dump.contains("sim_cycles"));
}

#[test]
fn stack_pointer_starts_at_the_configured_value() {
    let ctx = TestContext::new();
    assert_eq!(ctx.get_reg(2), 0x8000_0000);
}
