//! Pipeline latch structures for inter-stage communication.
//!
//! The pipeline holds four ordered slots: Decode → Execute → AccessMemory → WriteBack.
//! Each slot owns at most one instruction; advancing an instruction moves it into the
//! next slot and leaves the previous one empty, so an instruction occupies exactly
//! one slot at a time.

use crate::common::error::MemoryError;
use crate::isa::instruction::Instruction;

/// Entry in the Decode slot: a fetched but not yet decoded code word.
///
/// A fetch from an unmapped PC still fills the slot. The fault is raised only if the
/// slot reaches decode, so a squashed or abandoned wrong-path fetch is harmless.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchedInstruction {
    /// Raw code word. Compressed encodings occupy the low 16 bits.
    pub raw: u32,
    /// Address the word was fetched from.
    pub pc: u64,
    /// Error from reading the word, if the fetch faulted.
    pub fault: Option<MemoryError>,
}

/// The four pipeline slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineRegisters {
    /// Fetched instruction waiting to be decoded.
    pub decode: Option<FetchedInstruction>,
    /// Decoded instruction waiting for the ALU.
    pub execute: Option<Instruction>,
    /// Executed instruction waiting for its load or store.
    pub memory: Option<Instruction>,
    /// Instruction waiting to commit its result.
    pub writeback: Option<Instruction>,
}

impl PipelineRegisters {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no slot holds an instruction.
    pub const fn is_empty(&self) -> bool {
        self.decode.is_none()
            && self.execute.is_none()
            && self.memory.is_none()
            && self.writeback.is_none()
    }

    /// Number of occupied slots.
    pub fn occupancy(&self) -> usize {
        usize::from(self.decode.is_some())
            + usize::from(self.execute.is_some())
            + usize::from(self.memory.is_some())
            + usize::from(self.writeback.is_some())
    }

    /// Empties every slot.
    pub fn flush(&mut self) {
        *self = Self::default();
    }
}
