//! Global System Constants.
//!
//! This module defines constants used across the simulator. It includes:
//! 1. **Memory Constants:** Page size, shift and offset mask of the sparse address space.
//! 2. **Instruction Constants:** Encoded widths and the compressed-encoding marker.
//! 3. **Machine Constants:** Register count and the initial stack pointer.

/// Page size in bytes (4KB).
pub const PAGE_SIZE: u64 = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u64 = 12;

/// Mask for extracting the page offset from an address.
pub const PAGE_OFFSET_MASK: u64 = PAGE_SIZE - 1;

/// Size of a compressed (16-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE_16: u64 = 2;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE_32: u64 = 4;

/// Bit mask for checking if an instruction is compressed.
pub const COMPRESSED_INSTRUCTION_MASK: u32 = 0x3;

/// Low two bits of every full-width encoding; anything else is compressed.
pub const FULL_WIDTH_MARKER: u32 = 0x3;

/// Number of general-purpose registers.
pub const GPR_COUNT: usize = 32;

/// Stack pointer installed before the first cycle.
pub const DEFAULT_STACK_POINTER: u64 = 0x8000_0000;

/// Rounds `value` up to the next page boundary, `None` past the top of the address space.
pub const fn page_round_up(value: u64) -> Option<u64> {
    match value.checked_add(PAGE_OFFSET_MASK) {
        Some(v) => Some(v & !PAGE_OFFSET_MASK),
        None => None,
    }
}

/// Returns the page-aligned start address of the page containing `addr`.
pub const fn page_base(addr: u64) -> u64 {
    addr & !PAGE_OFFSET_MASK
}
