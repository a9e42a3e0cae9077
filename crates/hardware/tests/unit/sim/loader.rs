//! ELF Loading.

use std::io::Write;

use pipesim_core::common::SimError;
use pipesim_core::sim::loader::load_binary;
use pipesim_core::sim::{LoadedImage, load_elf};
use pipesim_core::soc::AddressSpace;
use pretty_assertions::assert_eq;

use crate::common::builder::elf::{ElfBuilder, MACHINE_X86_64};
use crate::common::builder::instruction::exit;

const BASE: u64 = 0x1_0000;

#[test]
fn segment_is_copied_and_entry_reported() {
    let bytes = ElfBuilder::new(BASE, &exit(3)).build();
    let mut memory = AddressSpace::new();

    let image = load_elf(&bytes, &mut memory).unwrap();
    assert_eq!(
        image,
        LoadedImage {
            entry: BASE,
            heap_start: BASE + 0x1000,
        }
    );
    assert_eq!(memory.read(BASE, 4).unwrap(), u64::from(exit(3)[0]));
    assert_eq!(memory.read(BASE + 8, 4).unwrap(), u64::from(exit(3)[2]));
}

#[test]
fn memory_size_beyond_file_size_is_zero_filled() {
    let bytes = ElfBuilder::new(BASE, &exit(0)).bss(0x1000).build();
    let mut memory = AddressSpace::new();

    let image = load_elf(&bytes, &mut memory).unwrap();
    assert!(memory.is_mapped(BASE + 0x1000));
    assert_eq!(memory.read(BASE + 0x1008, 4).unwrap(), 0);
    assert_eq!(image.heap_start, BASE + 0x2000);
}

#[test]
fn foreign_architecture_is_rejected() {
    let bytes = ElfBuilder::new(BASE, &exit(0))
        .machine(MACHINE_X86_64)
        .build();
    let mut memory = AddressSpace::new();

    let err = load_elf(&bytes, &mut memory).unwrap_err();
    assert!(matches!(err, SimError::Load(msg) if msg.contains("architecture")));
    assert_eq!(memory.page_count(), 0);
}

#[test]
fn garbage_is_rejected() {
    let mut memory = AddressSpace::new();
    let err = load_elf(b"definitely not an executable", &mut memory).unwrap_err();
    assert!(matches!(err, SimError::Load(_)));
}

#[test]
fn binary_is_read_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[1, 2, 3]).unwrap();

    assert_eq!(load_binary(file.path()).unwrap(), vec![1, 2, 3]);
}

#[test]
fn missing_binary_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.elf");

    let err = load_binary(&path).unwrap_err();
    assert!(matches!(err, SimError::Load(msg) if msg.contains("missing.elf")));
}
