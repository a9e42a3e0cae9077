//! System call dispatch.
//!
//! `ecall` is handled in the Execute stage. The syscall number is taken from `a7` and
//! the single argument from `a0`, both after forwarding. A syscall that produces a value
//! turns the `ecall` into a write of `a7`, so the result commits through the ordinary
//! write-back path.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use super::Cpu;
use crate::common::constants::page_round_up;
use crate::common::error::{MemoryError, SimError};
use crate::common::PAGE_SIZE;
use crate::core::pipeline::hazards::Operands;
use crate::isa::abi::REG_A7;
use crate::isa::instruction::Instruction;

/// Mask keeping random results non-negative as a 32-bit signed value.
const RANDOM_MASK: u64 = 0x7FFF_FFFF;

/// Replacement seed when the program seeds the generator with zero.
const ZERO_SEED_REPLACEMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Largest heap growth accepted by a single heap syscall (1 GiB).
pub const MAX_HEAP_GROWTH: u64 = 1 << 30;

/// Syscall numbers understood by the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Syscall {
    /// Stop the simulation; `a0` is the exit code.
    Exit,
    /// Print the low byte of `a0` as a character.
    PrintChar,
    /// Print `a0` as a signed 32-bit integer.
    PrintInt,
    /// Print `a0` as a signed 64-bit integer.
    PrintLong,
    /// Print the NUL-terminated string at `a0`.
    PrintString,
    /// Read one character into the byte at `a0`.
    ReadChar,
    /// Read a signed 32-bit integer into the word at `a0`.
    ReadInt,
    /// Read a signed 64-bit integer into the doubleword at `a0`.
    ReadLong,
    /// Read a token into a NUL-terminated string at `a0`.
    ReadString,
    /// Seed the random generator with `a0`.
    SeedRandom,
    /// Return a non-negative pseudo-random number.
    Random,
    /// Grow the heap by `a0` bytes rounded up to pages; returns the old heap pointer.
    HeapAllocate,
    /// Return seconds since the Unix epoch.
    WallClockTime,
}

impl Syscall {
    /// Maps a value of `a7` to a syscall.
    pub const fn from_number(number: u64) -> Option<Self> {
        Some(match number {
            0 => Self::Exit,
            1 => Self::PrintChar,
            2 => Self::PrintInt,
            3 => Self::PrintLong,
            4 => Self::PrintString,
            5 => Self::ReadChar,
            6 => Self::ReadInt,
            7 => Self::ReadLong,
            8 => Self::ReadString,
            9 => Self::SeedRandom,
            10 => Self::Random,
            11 => Self::HeapAllocate,
            12 => Self::WallClockTime,
            _ => return None,
        })
    }

    /// Lower-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exit => "exit",
            Self::PrintChar => "print_char",
            Self::PrintInt => "print_int",
            Self::PrintLong => "print_long",
            Self::PrintString => "print_string",
            Self::ReadChar => "read_char",
            Self::ReadInt => "read_int",
            Self::ReadLong => "read_long",
            Self::ReadString => "read_string",
            Self::SeedRandom => "seed_random",
            Self::Random => "random",
            Self::HeapAllocate => "heap_allocate",
            Self::WallClockTime => "wall_clock_time",
        }
    }
}

impl Cpu {
    /// Executes the syscall selected by `ops.a7` for the `ecall` in `inst`.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownSyscall`] for numbers outside the table, [`SimError::Memory`]
    /// for faulting buffer accesses or heap collisions, and console failures.
    pub fn handle_syscall(&mut self, inst: &mut Instruction, ops: &Operands) -> Result<(), SimError> {
        let pc = inst.pc;
        let syscall = Syscall::from_number(ops.a7).ok_or(SimError::UnknownSyscall {
            number: ops.a7,
            pc,
        })?;
        let arg = ops.a0;
        let mem = |source: MemoryError| SimError::Memory { pc, source };

        if self.trace {
            tracing::debug!(pc = format_args!("{pc:#x}"), syscall = syscall.name(), arg, "ecall");
        }

        let result = match syscall {
            Syscall::Exit => {
                tracing::info!(code = arg, cycles = self.stats.cycles, "program exited");
                self.exit_code = Some(arg);
                None
            }
            Syscall::PrintChar => {
                self.console.print(&[arg as u8])?;
                None
            }
            Syscall::PrintInt => {
                self.console.print((arg as i32).to_string().as_bytes())?;
                None
            }
            Syscall::PrintLong => {
                self.console.print((arg as i64).to_string().as_bytes())?;
                None
            }
            Syscall::PrintString => {
                let bytes = self.memory.read_c_string(arg).map_err(mem)?;
                self.console.print(&bytes)?;
                None
            }
            Syscall::ReadChar => {
                let byte = self.console.read_char()?;
                self.memory.write(arg, 1, u64::from(byte)).map_err(mem)?;
                None
            }
            Syscall::ReadInt => {
                let value: i32 = self.read_number(syscall)?;
                self.memory.write(arg, 4, u64::from(value as u32)).map_err(mem)?;
                None
            }
            Syscall::ReadLong => {
                let value: i64 = self.read_number(syscall)?;
                self.memory.write(arg, 8, value as u64).map_err(mem)?;
                None
            }
            Syscall::ReadString => {
                let mut bytes = self.console.read_token()?;
                bytes.push(0);
                self.memory.write_bytes(arg, &bytes).map_err(mem)?;
                None
            }
            Syscall::SeedRandom => {
                self.rng_state = if arg == 0 { ZERO_SEED_REPLACEMENT } else { arg };
                None
            }
            Syscall::Random => Some(self.next_random()),
            Syscall::HeapAllocate => Some(self.grow_heap(arg).map_err(mem)?),
            Syscall::WallClockTime => Some(
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_or(0, |d| d.as_secs()),
            ),
        };

        if let Some(value) = result {
            inst.rd = REG_A7;
            inst.writes_reg = true;
            inst.wb_value = value;
        }
        Ok(())
    }

    /// Reads one token and parses it as a decimal integer.
    fn read_number<T: FromStr>(&mut self, syscall: Syscall) -> Result<T, SimError> {
        let token = self.console.read_token()?;
        let text = String::from_utf8_lossy(&token);
        text.parse().map_err(|_| SimError::BadInput {
            syscall: syscall.name(),
            text: text.into_owned(),
        })
    }

    /// Advances the xorshift generator and returns a 31-bit value.
    fn next_random(&mut self) -> u64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x & RANDOM_MASK
    }

    /// Maps `size` bytes (rounded up to pages) at the heap pointer.
    ///
    /// # Returns
    ///
    /// The heap pointer before growth.
    ///
    /// # Errors
    ///
    /// [`MemoryError::HeapExhausted`] if the new end wraps, passes the stack top or the
    /// request exceeds [`MAX_HEAP_GROWTH`]. Nothing is mapped in that case.
    fn grow_heap(&mut self, size: u64) -> Result<u64, MemoryError> {
        let old = self.heap;
        let exhausted = MemoryError::HeapExhausted { heap: old, size };
        if size > MAX_HEAP_GROWTH {
            return Err(exhausted);
        }
        let (Some(new), Some(mut page)) = (
            old.checked_add(size).and_then(page_round_up),
            page_round_up(old),
        ) else {
            return Err(exhausted);
        };
        if old < self.stack_top && new > self.stack_top {
            return Err(exhausted);
        }
        while page < new {
            self.memory.allocate(page)?;
            page += PAGE_SIZE;
        }
        self.heap = new;
        Ok(old)
    }
}
