//! Fatal Simulation Conditions.
//!
//! Every failure the core can hit is fatal: the driver stops stepping, prints the
//! machine state and exits. This module defines:
//! 1. **Memory Errors:** Unmapped reads, double mapping, bad access sizes and page crossings.
//! 2. **Decode Errors:** Opcode/funct combinations outside the supported table.
//! 3. **Configuration Errors:** Cache geometry that does not satisfy the set/way/block invariant.
//! 4. **Simulation Errors:** The top-level error returned by a cycle, wrapping the above with the PC.

use thiserror::Error;

/// Address space precondition failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    /// A read touched an address with no backing page.
    #[error("read from unmapped address {addr:#x}")]
    Unmapped {
        /// The faulting address.
        addr: u64,
    },

    /// `allocate` was called for an address whose page is already mapped.
    #[error("page containing {addr:#x} is already mapped")]
    AlreadyMapped {
        /// Address inside the existing page.
        addr: u64,
    },

    /// `deallocate` was called for an address with no page.
    #[error("cannot deallocate {addr:#x}: page not mapped")]
    NotMapped {
        /// Address that was expected to be mapped.
        addr: u64,
    },

    /// Access width other than 1, 2, 4 or 8 bytes.
    #[error("invalid access size {size} (expected 1, 2, 4 or 8)")]
    InvalidSize {
        /// The rejected size in bytes.
        size: usize,
    },

    /// Heap growth would wrap the address space, run into the stack or exceed the
    /// per-call limit.
    #[error("cannot grow heap at {heap:#x} by {size:#x} bytes")]
    HeapExhausted {
        /// Heap pointer before the request.
        heap: u64,
        /// Requested growth in bytes.
        size: u64,
    },

    /// Access range spans two pages.
    #[error("{size}-byte access at {addr:#x} crosses a page boundary")]
    CrossesPage {
        /// Start address of the access.
        addr: u64,
        /// Width of the access in bytes.
        size: usize,
    },
}

/// Instruction decode failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The major opcode is not implemented.
    #[error("unknown opcode {opcode:#04x} in instruction {raw:#010x}")]
    UnknownOpcode {
        /// Raw instruction word.
        raw: u32,
        /// Major opcode (bits 0-6).
        opcode: u32,
    },

    /// The opcode is known but its funct3/funct7 combination is not.
    #[error(
        "unknown funct combination in {raw:#010x} (opcode {opcode:#04x}, funct3 {funct3:#x}, funct7 {funct7:#04x})"
    )]
    UnknownFunct {
        /// Raw instruction word.
        raw: u32,
        /// Major opcode (bits 0-6).
        opcode: u32,
        /// funct3 field (bits 12-14).
        funct3: u32,
        /// funct7 field (bits 25-31).
        funct7: u32,
    },

    /// A 16-bit encoding outside the supported compressed subset.
    #[error("unsupported compressed instruction {raw:#06x} (quadrant {quadrant}, funct3 {funct3:#x})")]
    UnknownCompressed {
        /// Raw 16-bit encoding.
        raw: u32,
        /// Quadrant (bits 0-1).
        quadrant: u32,
        /// funct3 field (bits 13-15).
        funct3: u32,
    },
}

/// Invalid cache hierarchy configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A geometry parameter is zero.
    #[error("cache '{name}': {field} must be non-zero")]
    Zero {
        /// Level name.
        name: String,
        /// Offending field.
        field: &'static str,
    },

    /// Block size or set count is not a power of two.
    #[error("cache '{name}': {field} = {value} is not a power of two")]
    NotPowerOfTwo {
        /// Level name.
        name: String,
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: usize,
    },

    /// `size != block_size * associativity * set_count`.
    #[error(
        "cache '{name}': size {size} is not a multiple of block_size {block_size} x associativity {associativity}"
    )]
    Geometry {
        /// Level name.
        name: String,
        /// Total capacity in bytes.
        size: usize,
        /// Block size in bytes.
        block_size: usize,
        /// Ways per set.
        associativity: usize,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Top-level error returned by a simulated cycle or by simulator construction.
#[derive(Debug, Error)]
pub enum SimError {
    /// The instruction in the Decode slot could not be decoded.
    #[error("decode failure at pc {pc:#x}: {source}")]
    Decode {
        /// PC of the undecodable instruction.
        pc: u64,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },

    /// A fetch, load, store or syscall violated an address space precondition.
    #[error("memory fault at pc {pc:#x}: {source}")]
    Memory {
        /// PC of the faulting instruction.
        pc: u64,
        /// Underlying memory failure.
        #[source]
        source: MemoryError,
    },

    /// `ecall` with a number outside the syscall table.
    #[error("unknown syscall {number} at pc {pc:#x}")]
    UnknownSyscall {
        /// Value of a7.
        number: u64,
        /// PC of the `ecall`.
        pc: u64,
    },

    /// Console input for a read syscall could not be parsed.
    #[error("syscall {syscall} could not parse console input {text:?}")]
    BadInput {
        /// Name of the read syscall.
        syscall: &'static str,
        /// Rejected token.
        text: String,
    },

    /// Console I/O failed.
    #[error("console i/o: {0}")]
    Io(#[from] std::io::Error),

    /// The program image could not be loaded.
    #[error("load failed: {0}")]
    Load(String),

    /// The cycle budget ran out before the program exited.
    #[error("cycle limit of {0} reached without exit")]
    CycleLimit(u64),

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
