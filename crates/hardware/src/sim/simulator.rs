//! Simulator: the CPU wired to its configuration and memory hierarchy.
//!
//! Builds the storage chain from the configuration, places the program image and
//! drives the CPU cycle by cycle.

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::sim::loader;
use crate::soc::builder::build_hierarchy;
use crate::soc::memory::AddressSpace;

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, pipeline, memory, caches, stats).
    pub cpu: Cpu,
    max_cycles: Option<u64>,
}

impl Simulator {
    /// Creates a simulator over an already populated address space.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration.
    /// * `memory` - Address space holding the program.
    /// * `entry` - Initial PC.
    /// * `heap_start` - Initial heap pointer.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if a cache level has invalid geometry.
    pub fn new(
        config: &Config,
        memory: AddressSpace,
        entry: u64,
        heap_start: u64,
    ) -> Result<Self, SimError> {
        let hierarchy = build_hierarchy(&config.cache)?;
        let mut cpu = Cpu::new(config, memory, hierarchy);
        cpu.pc = entry;
        cpu.heap = heap_start;
        Ok(Self {
            cpu,
            max_cycles: config.general.max_cycles,
        })
    }

    /// Loads an ELF image and creates a simulator starting at its entry point.
    ///
    /// # Errors
    ///
    /// [`SimError::Load`] for malformed images, [`SimError::Config`] for bad geometry.
    pub fn from_elf(config: &Config, bytes: &[u8]) -> Result<Self, SimError> {
        let mut memory = AddressSpace::new();
        let image = loader::load_elf(bytes, &mut memory)?;
        Self::new(config, memory, image.entry, image.heap_start)
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// Any fatal condition raised by the pipeline.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.cpu.step_cycle()
    }

    /// Runs until the program exits.
    ///
    /// # Returns
    ///
    /// The exit code passed to the exit syscall.
    ///
    /// # Errors
    ///
    /// The first fatal condition, or [`SimError::CycleLimit`] when the configured
    /// cycle budget runs out.
    pub fn run(&mut self) -> Result<u64, SimError> {
        self.cpu
            .run_until_exit(self.max_cycles)?
            .ok_or(SimError::CycleLimit(self.max_cycles.unwrap_or_default()))
    }

    /// Retrieves the exit code if the simulation has finished.
    pub fn take_exit(&mut self) -> Option<u64> {
        self.cpu.take_exit()
    }
}
