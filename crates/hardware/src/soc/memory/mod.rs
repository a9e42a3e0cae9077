//! Sparse Address Space.
//!
//! This module implements the program's memory as a sparse set of fixed-size pages.
//! It provides:
//! 1. **Page Management:** Explicit `allocate`/`deallocate` with double-mapping checks.
//! 2. **Access:** 1/2/4/8-byte little-endian reads and writes confined to one page.
//! 3. **Asymmetry:** Writes map a zeroed page on demand; reads of unmapped addresses fail.
//!
//! Caches model timing only; data always lives here.

/// Terminal storage level with fixed latency.
pub mod backing;

use std::collections::BTreeMap;

use crate::common::constants::{PAGE_OFFSET_MASK, PAGE_SIZE, page_base};
use crate::common::error::MemoryError;

/// One zero-initialised page.
type Page = Box<[u8; PAGE_SIZE as usize]>;

/// Sparse, page-granular, byte-addressable memory.
#[derive(Clone, Debug, Default)]
pub struct AddressSpace {
    pages: BTreeMap<u64, Page>,
}

impl AddressSpace {
    /// Creates an empty address space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a new zero-filled page covering `addr`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::AlreadyMapped`] if the page already exists.
    pub fn allocate(&mut self, addr: u64) -> Result<(), MemoryError> {
        let base = page_base(addr);
        if self.pages.contains_key(&base) {
            return Err(MemoryError::AlreadyMapped { addr });
        }
        let _ = self.pages.insert(base, Box::new([0; PAGE_SIZE as usize]));
        Ok(())
    }

    /// Unmaps the page containing `addr`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::NotMapped`] if no page covers `addr`.
    pub fn deallocate(&mut self, addr: u64) -> Result<(), MemoryError> {
        self.pages
            .remove(&page_base(addr))
            .map(|_| ())
            .ok_or(MemoryError::NotMapped { addr })
    }

    /// Returns `true` if a page covers `addr`.
    pub fn is_mapped(&self, addr: u64) -> bool {
        self.pages.contains_key(&page_base(addr))
    }

    /// Number of mapped pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Reads `size` bytes at `addr`, little-endian, zero-extended to 64 bits.
    ///
    /// # Errors
    ///
    /// Invalid size, page crossing, or [`MemoryError::Unmapped`]; reads never allocate.
    pub fn read(&self, addr: u64, size: usize) -> Result<u64, MemoryError> {
        check_access(addr, size)?;
        let page = self
            .pages
            .get(&page_base(addr))
            .ok_or(MemoryError::Unmapped { addr })?;
        let offset = (addr & PAGE_OFFSET_MASK) as usize;
        let mut buf = [0u8; 8];
        buf[..size].copy_from_slice(&page[offset..offset + size]);
        Ok(u64::from_le_bytes(buf))
    }

    /// Writes the low `size` bytes of `value` at `addr`, little-endian.
    ///
    /// Maps a zeroed page first if none covers `addr`.
    ///
    /// # Errors
    ///
    /// Invalid size or page crossing.
    pub fn write(&mut self, addr: u64, size: usize, value: u64) -> Result<(), MemoryError> {
        check_access(addr, size)?;
        let page = self
            .pages
            .entry(page_base(addr))
            .or_insert_with(|| Box::new([0; PAGE_SIZE as usize]));
        let offset = (addr & PAGE_OFFSET_MASK) as usize;
        page[offset..offset + size].copy_from_slice(&value.to_le_bytes()[..size]);
        Ok(())
    }

    /// Copies `data` to `addr`, mapping pages on demand; may span pages.
    pub fn write_bytes(&mut self, addr: u64, data: &[u8]) -> Result<(), MemoryError> {
        for (i, byte) in data.iter().enumerate() {
            self.write(addr + i as u64, 1, u64::from(*byte))?;
        }
        Ok(())
    }

    /// Reads a NUL-terminated byte string starting at `addr` (terminator excluded).
    pub fn read_c_string(&self, addr: u64) -> Result<Vec<u8>, MemoryError> {
        let mut out = Vec::new();
        let mut cursor = addr;
        loop {
            let byte = self.read(cursor, 1)? as u8;
            if byte == 0 {
                return Ok(out);
            }
            out.push(byte);
            cursor += 1;
        }
    }
}

/// Validates width and page containment of an access.
fn check_access(addr: u64, size: usize) -> Result<(), MemoryError> {
    if !matches!(size, 1 | 2 | 4 | 8) {
        return Err(MemoryError::InvalidSize { size });
    }
    if (addr & PAGE_OFFSET_MASK) + size as u64 > PAGE_SIZE {
        return Err(MemoryError::CrossesPage { addr, size });
    }
    Ok(())
}
