//! Pipeline slot bookkeeping.

use pipesim_core::core::pipeline::latches::{FetchedInstruction, PipelineRegisters};
use pipesim_core::isa::decode::decode;

#[test]
fn new_pipeline_is_empty() {
    let pipe = PipelineRegisters::new();
    assert!(pipe.is_empty());
    assert_eq!(pipe.occupancy(), 0);
}

#[test]
fn occupancy_counts_filled_slots() {
    let mut pipe = PipelineRegisters::new();
    pipe.decode = Some(FetchedInstruction {
        raw: 0x13,
        pc: 0x100,
        fault: None,
    });
    pipe.writeback = Some(decode(0x13).unwrap());
    assert_eq!(pipe.occupancy(), 2);
    assert!(!pipe.is_empty());

    pipe.flush();
    assert!(pipe.is_empty());
}
