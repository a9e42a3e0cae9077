//! Memory access handling.
//!
//! Every pipeline memory access has two halves: the data moves through the
//! [`AddressSpace`](crate::soc::memory::AddressSpace), and the timing is taken from the
//! storage chain. The latency returned by the chain beyond one cycle is charged to the
//! cycle counter as memory stall cycles.

use super::Cpu;
use crate::common::constants::{COMPRESSED_INSTRUCTION_MASK, FULL_WIDTH_MARKER, INSTRUCTION_SIZE_32};
use crate::common::data::AccessType;
use crate::common::error::SimError;

/// Width of an instruction fetch request sent to the storage chain.
const FETCH_BYTES: usize = INSTRUCTION_SIZE_32 as usize;

impl Cpu {
    /// Sends one request down the storage chain and charges its latency.
    ///
    /// # Returns
    ///
    /// The total latency in cycles reported by the chain.
    pub fn timed_access(&mut self, addr: u64, bytes: usize, access: AccessType) -> u64 {
        let (hit, latency) = self.hierarchy.handle_request(addr, bytes, access);
        let stall = latency.saturating_sub(1);
        self.stats.cycles += stall;
        self.stats.stalls_mem += stall;
        if self.trace {
            tracing::debug!(
                addr = format_args!("{addr:#x}"),
                bytes,
                ?access,
                hit,
                latency,
                "hierarchy access"
            );
        }
        latency
    }

    /// Fetches the code word at `pc`.
    ///
    /// Compressed encodings are returned in the low 16 bits; the upper halfword is read
    /// only for full-width encodings.
    ///
    /// # Errors
    ///
    /// [`SimError::Memory`] if `pc` is unmapped.
    pub fn fetch_word(&mut self, pc: u64) -> Result<u32, SimError> {
        let low = self.read_data(pc, pc, 2)? as u32;
        let raw = if low & COMPRESSED_INSTRUCTION_MASK == FULL_WIDTH_MARKER {
            let high = self.read_data(pc, pc + 2, 2)? as u32;
            low | (high << 16)
        } else {
            low
        };
        let _ = self.timed_access(pc, FETCH_BYTES, AccessType::Read);
        Ok(raw)
    }

    /// Loads `size` bytes at `addr` on behalf of the instruction at `pc`, zero-extended.
    ///
    /// # Errors
    ///
    /// [`SimError::Memory`] for unmapped addresses, bad sizes or page crossings.
    pub fn load(&mut self, pc: u64, addr: u64, size: usize) -> Result<u64, SimError> {
        let value = self.read_data(pc, addr, size)?;
        let _ = self.timed_access(addr, size, AccessType::Read);
        Ok(value)
    }

    /// Stores the low `size` bytes of `value` at `addr` on behalf of the instruction at `pc`.
    ///
    /// # Errors
    ///
    /// [`SimError::Memory`] for bad sizes or page crossings.
    pub fn store(&mut self, pc: u64, addr: u64, size: usize, value: u64) -> Result<(), SimError> {
        self.memory
            .write(addr, size, value)
            .map_err(|source| SimError::Memory { pc, source })?;
        let _ = self.timed_access(addr, size, AccessType::Write);
        Ok(())
    }

    /// Reads from the address space without touching the storage chain.
    fn read_data(&self, pc: u64, addr: u64, size: usize) -> Result<u64, SimError> {
        self.memory
            .read(addr, size)
            .map_err(|source| SimError::Memory { pc, source })
    }
}
