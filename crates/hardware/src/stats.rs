//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the simulator. It provides:
//! 1. **Cycles and CPI:** Total cycles, retired instructions and derived metrics.
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, branch/jump, system).
//! 3. **Stalls:** Memory, control and data hazard stall counts.
//! 4. **Storage levels:** Per-level access, miss, replacement, fetch and latency counters.

use std::fmt::Write as _;
use std::time::Instant;

use crate::isa::instruction::OpKind;
use crate::soc::traits::{Storage, levels};

/// Counters owned by one storage level. All are monotonically non-decreasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Requests handled by this level.
    pub access_counter: u64,
    /// Cycles spent at this level: bus plus hit on hits, bus for each request sent down.
    pub access_time: u64,
    /// Requests that missed.
    pub miss_num: u64,
    /// Victims evicted to make room.
    pub replace_num: u64,
    /// Blocks fetched from the lower level.
    pub fetch_num: u64,
}

impl StorageStats {
    /// Requests that hit.
    pub const fn hits(&self) -> u64 {
        self.access_counter - self.miss_num
    }

    /// Miss rate in percent, zero before the first access.
    pub fn miss_rate(&self) -> f64 {
        if self.access_counter == 0 {
            0.0
        } else {
            self.miss_num as f64 / self.access_counter as f64 * 100.0
        }
    }
}

/// Simulation statistics structure tracking pipeline metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed, including memory delay cycles.
    pub cycles: u64,
    /// Number of instructions retired at write-back.
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of ALU (non-load/store/branch/system) instructions retired.
    pub inst_alu: u64,
    /// Count of `ecall` instructions retired.
    pub inst_system: u64,

    /// Extra cycles charged for storage latency beyond one cycle per access.
    pub stalls_mem: u64,
    /// Taken branches and jumps (one squash each).
    pub stalls_control: u64,
    /// Load-use hazards observed at execute.
    pub stalls_data: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_alu: 0,
            inst_system: 0,
            stalls_mem: 0,
            stalls_control: 0,
            stalls_data: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"instruction_mix"`, `"memory"`.
/// Pass an empty slice to `report_sections` to include all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "memory"];

impl SimStats {
    /// Records one retired instruction in the mix counters.
    pub fn record_retire(&mut self, op: OpKind) {
        self.instructions_retired += 1;
        if op.is_load() {
            self.inst_load += 1;
        } else if op.is_store() {
            self.inst_store += 1;
        } else if op.is_branch() || op.is_jump() {
            self.inst_branch += 1;
        } else if op == OpKind::Ecall {
            self.inst_system += 1;
        } else {
            self.inst_alu += 1;
        }
    }

    /// Cycles per retired instruction; zero before the first retirement.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Renders the requested sections.
    ///
    /// # Arguments
    ///
    /// * `sections` - Section names from [`STATS_SECTIONS`], or empty for all.
    /// * `hierarchy` - Top storage level; every level below it is reported.
    pub fn report_sections(&self, sections: &[String], hierarchy: &dyn Storage) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64().max(f64::EPSILON);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| n as f64 / of * 100.0;
        let mut out = String::new();

        let _ = writeln!(out, "\n==========================================================");
        let _ = writeln!(out, "PIPELINE SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(
                out,
                "sim_ipc                  {:.4}",
                self.instructions_retired as f64 / cyc
            );
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("core") {
            let _ = writeln!(out, "STALLS");
            for (name, n) in [
                ("memory", self.stalls_mem),
                ("control", self.stalls_control),
                ("data", self.stalls_data),
            ] {
                let _ = writeln!(out, "  stalls.{name:<15} {n} ({:.2}%)", pct(n, cyc));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, n) in [
                ("alu", self.inst_alu),
                ("load", self.inst_load),
                ("store", self.inst_store),
                ("branch", self.inst_branch),
                ("system", self.inst_system),
            ] {
                let _ = writeln!(out, "  op.{name:<19} {n} ({:.2}%)", pct(n, instr));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("memory") {
            let _ = writeln!(out, "MEMORY HIERARCHY");
            for level in levels(hierarchy) {
                let s = level.stats();
                let _ = writeln!(
                    out,
                    "  {:<6} accesses: {:<10} | misses: {:<10} | miss_rate: {:>6.2}% | replace: {:<8} | fetch: {:<8} | cycles: {}",
                    level.name(),
                    s.access_counter,
                    s.miss_num,
                    s.miss_rate(),
                    s.replace_num,
                    s.fetch_num,
                    s.access_time
                );
            }
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self, hierarchy: &dyn Storage) {
        print!("{}", self.report_sections(&[], hierarchy));
    }
}
