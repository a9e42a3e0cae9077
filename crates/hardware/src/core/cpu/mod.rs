//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers, program counter and heap pointer.
//! 2. **Pipeline Control:** Owns the four pipeline slots advanced once per cycle.
//! 3. **Memory Hierarchy:** Holds the address space (data) and the top storage level (timing).
//! 4. **System Integration:** Dispatches syscalls to the console and heap.

/// Instruction execution orchestration and pipeline coordination.
pub mod execution;

/// Memory access handling for fetch, loads and stores.
pub mod memory;

/// System call dispatch.
pub mod syscall;

use std::fmt::{self, Write as _};

use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::pipeline::latches::PipelineRegisters;
use crate::isa::abi;
use crate::soc::devices::{Console, StdConsole};
use crate::soc::memory::AddressSpace;
use crate::soc::traits::Storage;
use crate::stats::SimStats;

/// Seed used by the random syscall until the program seeds it.
const DEFAULT_RNG_SEED: u64 = 0x2545_F491_4F6C_DD1D;

/// The processor state.
///
/// The CPU orchestrates instruction execution through the pipeline, routes memory
/// traffic through the cache hierarchy, dispatches syscalls and tracks statistics.
pub struct Cpu {
    /// General Purpose Registers.
    pub regs: RegisterFile,
    /// Program Counter of the next fetch.
    pub pc: u64,
    /// Heap pointer; grows page by page through the heap syscall.
    pub heap: u64,
    /// Initial stack pointer. A heap below it never grows past it.
    pub stack_top: u64,

    /// Sparse simulated memory holding all program data.
    pub memory: AddressSpace,
    /// Top of the storage chain (L1, or the backing memory when no caches are configured).
    pub hierarchy: Box<dyn Storage>,

    /// Decode, Execute, AccessMemory and WriteBack slots.
    pub pipeline: PipelineRegisters,

    /// Enable instruction tracing.
    pub trace: bool,
    /// Exit code if simulation finished.
    pub exit_code: Option<u64>,
    /// Performance statistics.
    pub stats: SimStats,

    console: Box<dyn Console>,
    rng_state: u64,
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("pc", &format_args!("{:#x}", self.pc))
            .field("heap", &format_args!("{:#x}", self.heap))
            .field("pipeline", &self.pipeline)
            .field("exit_code", &self.exit_code)
            .field("hierarchy", &self.hierarchy.name())
            .finish_non_exhaustive()
    }
}

impl Cpu {
    /// Creates a new CPU over a populated address space.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the initial stack pointer and trace flag.
    /// * `memory` - Address space already holding the program image.
    /// * `hierarchy` - Top storage level, usually from [`crate::soc::build_hierarchy`].
    ///
    /// The PC and heap pointer start at zero; set them from the loaded image.
    pub fn new(config: &Config, memory: AddressSpace, hierarchy: Box<dyn Storage>) -> Self {
        let mut regs = RegisterFile::new();
        regs.write(abi::REG_SP, config.general.stack_pointer);
        Self {
            regs,
            pc: 0,
            heap: 0,
            stack_top: config.general.stack_pointer,
            memory,
            hierarchy,
            pipeline: PipelineRegisters::new(),
            trace: config.general.trace_instructions,
            exit_code: None,
            stats: SimStats::default(),
            console: Box::new(StdConsole),
            rng_state: DEFAULT_RNG_SEED,
        }
    }

    /// Replaces the console used by the I/O syscalls.
    #[must_use]
    pub fn with_console(mut self, console: Box<dyn Console>) -> Self {
        self.console = console;
        self
    }

    /// Returns `true` once the program has executed the exit syscall.
    pub const fn is_exit(&self) -> bool {
        self.exit_code.is_some()
    }

    /// Retrieves the exit code if the simulation has finished.
    ///
    /// # Returns
    ///
    /// `Some(u64)` containing the exit code if finished, otherwise `None`.
    pub fn take_exit(&mut self) -> Option<u64> {
        self.exit_code.take()
    }

    /// PC of the instruction in the Execute slot, for the step debugger.
    pub fn next_instruction_pc(&self) -> Option<u64> {
        self.pipeline.execute.as_ref().map(|inst| inst.pc)
    }

    /// Formats PC, registers, heap pointer and statistics for a fatal-error report.
    pub fn dump_state(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "PC   = {:#018x}", self.pc);
        let _ = writeln!(out, "HEAP = {:#018x}", self.heap);
        if let Some(pc) = self.next_instruction_pc() {
            let _ = writeln!(out, "EX   = {pc:#018x}");
        }
        out.push_str(&self.regs.dump());
        out.push_str(&self.stats.report_sections(&[], self.hierarchy.as_ref()));
        out
    }
}
