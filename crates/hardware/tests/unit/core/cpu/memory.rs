//! Memory Timing.
//!
//! Every fetch, load and store is sent down the storage chain; latency beyond one
//! cycle is added to the cycle count and to the memory stall counter.

use pipesim_core::common::AccessType;
use pipesim_core::config::{Config, LatencyConfig};
use pipesim_core::core::Cpu;
use pipesim_core::soc::memory::AddressSpace;
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::{InstructionBuilder, exit, nop};
use crate::common::harness::{PROGRAM_BASE, TestContext};
use crate::common::mocks::storage::{RecordingStorage, Request};

fn flat_memory(hit: u64) -> Config {
    let mut config = Config::default();
    config.cache.levels.clear();
    config.cache.memory = LatencyConfig { bus: 0, hit };
    config
}

#[test]
fn single_cycle_memory_adds_no_stalls() {
    let mut ctx = TestContext::new().load_program(PROGRAM_BASE, &[nop(), nop()]);
    ctx.step().unwrap();
    ctx.step().unwrap();
    assert_eq!(ctx.cpu.stats.cycles, 2);
    assert_eq!(ctx.cpu.stats.stalls_mem, 0);
}

#[test]
fn slow_memory_charges_latency_minus_one_per_access() {
    let mut ctx = TestContext::with_config(&flat_memory(5), "").load_program(PROGRAM_BASE, &[nop()]);
    ctx.step().unwrap();
    assert_eq!(ctx.cpu.stats.stalls_mem, 4);
    assert_eq!(ctx.cpu.stats.cycles, 5);
}

#[test]
fn bus_latency_counts_toward_the_stall() {
    let mut config = flat_memory(3);
    config.cache.memory.bus = 2;
    let mut ctx = TestContext::with_config(&config, "").load_program(PROGRAM_BASE, &[nop()]);
    ctx.step().unwrap();
    assert_eq!(ctx.cpu.stats.stalls_mem, 4);
}

#[test]
fn cold_fetch_misses_the_whole_default_hierarchy() {
    let mut ctx =
        TestContext::with_config(&Config::default(), "").load_program(PROGRAM_BASE, &[nop(), nop()]);

    ctx.step().unwrap();
    assert_eq!(ctx.cpu.stats.stalls_mem, 99, "L1, L2 and L3 miss into memory");

    ctx.step().unwrap();
    assert_eq!(ctx.cpu.stats.stalls_mem, 99, "second fetch hits the same L1 block");
    assert_eq!(ctx.cpu.hierarchy.stats().access_counter, 2);
    assert_eq!(ctx.cpu.hierarchy.stats().miss_num, 1);
}

#[test]
fn every_access_reaches_the_top_level() {
    let (storage, log) = RecordingStorage::boxed(1);
    let mut memory = AddressSpace::new();
    let program = [
        InstructionBuilder::new().addi(5, 0, 9).build(),
        InstructionBuilder::new().sd(2, 5, -8).build(),
        InstructionBuilder::new().ld(6, 2, -8).build(),
    ];
    for (i, word) in program.iter().chain(exit(0).iter()).enumerate() {
        memory
            .write(PROGRAM_BASE + 4 * i as u64, 4, u64::from(*word))
            .unwrap();
    }
    let mut cpu = Cpu::new(&Config::default(), memory, storage);
    cpu.pc = PROGRAM_BASE;
    assert_eq!(cpu.run_until_exit(Some(100)).unwrap(), Some(0));

    let requests = log.borrow();
    let data: Vec<Request> = requests
        .iter()
        .filter(|r| r.bytes == 8)
        .copied()
        .collect();
    assert_eq!(
        data,
        vec![
            Request {
                addr: 0x8000_0000 - 8,
                bytes: 8,
                access: AccessType::Write
            },
            Request {
                addr: 0x8000_0000 - 8,
                bytes: 8,
                access: AccessType::Read
            },
        ]
    );
    let fetches = requests
        .iter()
        .filter(|r| r.bytes == 4 && r.access == AccessType::Read)
        .count();
    assert_eq!(fetches as u64, cpu.stats.cycles - 1, "one fetch per cycle except the exit cycle");
}
