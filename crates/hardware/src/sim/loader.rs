//! Binary Loader.
//!
//! This module loads a statically linked RV64 ELF executable into an address space. It performs:
//! 1. **Validation:** The image must be a 64-bit little-endian RISC-V ELF.
//! 2. **Segment copy:** Every loadable segment is copied in, zero-filled up to its memory size.
//! 3. **Heap placement:** The heap starts at the page-rounded end of the highest segment.

use std::fs;
use std::path::Path;

use object::{Architecture, Object, ObjectSegment};

use crate::common::constants::page_round_up;
use crate::common::error::SimError;
use crate::soc::memory::AddressSpace;

/// Entry point and heap start of a loaded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadedImage {
    /// Program entry point.
    pub entry: u64,
    /// First address past the highest segment, rounded up to a page.
    pub heap_start: u64,
}

/// Loads a binary file from disk into a byte vector.
///
/// # Errors
///
/// [`SimError::Load`] naming the path if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, SimError> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| SimError::Load(format!("{}: {e}", path.display())))
}

/// Copies every loadable segment of the ELF image in `bytes` into `memory`.
///
/// # Errors
///
/// [`SimError::Load`] if the image is not a 64-bit little-endian RISC-V ELF or a segment
/// cannot be read.
pub fn load_elf(bytes: &[u8], memory: &mut AddressSpace) -> Result<LoadedImage, SimError> {
    let file = object::File::parse(bytes).map_err(|e| SimError::Load(e.to_string()))?;
    if file.architecture() != Architecture::Riscv64 {
        return Err(SimError::Load(format!(
            "unsupported architecture {:?}",
            file.architecture()
        )));
    }
    if !file.is_little_endian() || !file.is_64() {
        return Err(SimError::Load("expected a 64-bit little-endian image".to_string()));
    }

    let mut end = 0u64;
    for segment in file.segments() {
        let addr = segment.address();
        let mem_size = segment.size();
        let data = segment.data().map_err(|e| SimError::Load(e.to_string()))?;
        if mem_size == 0 && data.is_empty() {
            continue;
        }
        tracing::debug!(
            addr = format_args!("{addr:#x}"),
            file_size = data.len(),
            mem_size,
            "load segment"
        );

        memory
            .write_bytes(addr, data)
            .map_err(|e| SimError::Load(e.to_string()))?;
        let filled = data.len() as u64;
        if mem_size > filled {
            let zeros = vec![0u8; (mem_size - filled) as usize];
            memory
                .write_bytes(addr + filled, &zeros)
                .map_err(|e| SimError::Load(e.to_string()))?;
        }
        let segment_end = addr
            .checked_add(mem_size.max(filled))
            .ok_or_else(|| SimError::Load(format!("segment at {addr:#x} wraps the address space")))?;
        end = end.max(segment_end);
    }

    let heap_start = page_round_up(end)
        .ok_or_else(|| SimError::Load(format!("image end {end:#x} leaves no room for a heap")))?;
    let image = LoadedImage {
        entry: file.entry(),
        heap_start,
    };
    tracing::info!(
        entry = format_args!("{:#x}", image.entry),
        heap = format_args!("{:#x}", image.heap_start),
        pages = memory.page_count(),
        "loaded ELF image"
    );
    Ok(image)
}
