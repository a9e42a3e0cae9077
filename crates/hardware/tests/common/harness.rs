use std::cell::RefCell;
use std::rc::Rc;

use pipesim_core::common::SimError;
use pipesim_core::config::{Config, LatencyConfig};
use pipesim_core::core::Cpu;
use pipesim_core::soc::build_hierarchy;
use pipesim_core::soc::devices::BufferConsole;
use pipesim_core::soc::memory::AddressSpace;

/// Default address programs are loaded at.
pub const PROGRAM_BASE: u64 = 0x1_0000;

pub struct TestContext {
    pub cpu: Cpu,
    output: Rc<RefCell<Vec<u8>>>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// CPU with no caches and a one-cycle backing memory, so no memory stalls are charged.
    pub fn new() -> Self {
        let mut config = Config::default();
        config.cache.levels.clear();
        config.cache.memory = LatencyConfig { bus: 0, hit: 1 };
        Self::with_config(&config, "")
    }

    /// CPU built from `config`, reading console input from `input`.
    pub fn with_config(config: &Config, input: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let hierarchy = build_hierarchy(&config.cache).unwrap();
        let console = BufferConsole::new(input);
        let output = console.output();
        let cpu = Cpu::new(config, AddressSpace::new(), hierarchy).with_console(Box::new(console));
        Self { cpu, output }
    }

    /// Replaces the console input.
    pub fn with_input(mut self, input: &str) -> Self {
        let console = BufferConsole::new(input);
        self.output = console.output();
        self.cpu = self.cpu.with_console(Box::new(console));
        self
    }

    /// Load a sequence of 32-bit instructions into memory at `addr` and set the PC.
    pub fn load_program(mut self, addr: u64, instructions: &[u32]) -> Self {
        for (i, inst) in instructions.iter().enumerate() {
            let offset = addr + (i as u64) * 4;
            self.cpu.memory.write(offset, 4, u64::from(*inst)).unwrap();
        }
        self.cpu.pc = addr;
        self
    }

    /// Load 16-bit compressed instructions at `addr` and set the PC.
    pub fn load_compressed(mut self, addr: u64, instructions: &[u16]) -> Self {
        for (i, inst) in instructions.iter().enumerate() {
            let offset = addr + (i as u64) * 2;
            self.cpu.memory.write(offset, 2, u64::from(*inst)).unwrap();
        }
        self.cpu.pc = addr;
        self
    }

    /// Load raw bytes at `addr` without touching the PC.
    pub fn load_bytes(mut self, addr: u64, bytes: &[u8]) -> Self {
        self.cpu.memory.write_bytes(addr, bytes).unwrap();
        self
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: u64) {
        self.cpu.regs.write(reg, val);
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> u64 {
        self.cpu.regs.read(reg)
    }

    /// Advance one cycle.
    pub fn step(&mut self) -> Result<(), SimError> {
        self.cpu.step_cycle()
    }

    /// Run the CPU for up to `cycles` cycles, stopping early on exit.
    pub fn run(&mut self, cycles: u64) -> Result<(), SimError> {
        for _ in 0..cycles {
            if self.cpu.is_exit() {
                break;
            }
            self.cpu.step_cycle()?;
        }
        Ok(())
    }

    /// Everything printed through the console so far, decoded as UTF-8.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output.borrow()).into_owned()
    }

    /// Everything printed through the console so far, as raw bytes.
    pub fn output_bytes(&self) -> Vec<u8> {
        self.output.borrow().clone()
    }
}
