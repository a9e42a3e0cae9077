//! Main Execution Loop.
//!
//! This module implements the core execution cycle of the CPU. Each call to
//! [`Cpu::step_cycle`] runs the stages in reverse pipeline order:
//! WriteBack → AccessMemory → Execute → Decode → Fetch.
//!
//! Running the oldest stage first means every slot is emptied before the stage behind
//! it refills it, so no instruction is overwritten before it has advanced. When the
//! exit syscall executes, the rest of the cycle (Decode and Fetch) is abandoned.

use super::Cpu;
use crate::common::error::SimError;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};

impl Cpu {
    /// Advances the pipeline by one cycle.
    ///
    /// Does nothing once the program has exited.
    ///
    /// # Errors
    ///
    /// Any fatal condition raised by a stage: decode failure, memory fault or an
    /// unknown syscall. The machine state is left as it was at the failure so the
    /// caller can report it with [`Cpu::dump_state`].
    pub fn step_cycle(&mut self) -> Result<(), SimError> {
        if self.is_exit() {
            return Ok(());
        }
        self.stats.cycles += 1;

        wb_stage(self);
        mem_stage(self)?;
        execute_stage(self)?;
        if self.is_exit() {
            return Ok(());
        }
        decode_stage(self)?;
        fetch_stage(self)?;
        Ok(())
    }

    /// Steps cycles until the program exits or `max_cycles` total cycles have elapsed.
    ///
    /// # Returns
    ///
    /// The exit code, or `None` if the budget ran out first.
    ///
    /// # Errors
    ///
    /// The first fatal condition raised by [`Cpu::step_cycle`].
    pub fn run_until_exit(&mut self, max_cycles: Option<u64>) -> Result<Option<u64>, SimError> {
        while !self.is_exit() {
            if max_cycles.is_some_and(|limit| self.stats.cycles >= limit) {
                return Ok(None);
            }
            self.step_cycle()?;
        }
        Ok(self.exit_code)
    }
}
