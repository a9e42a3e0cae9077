//! RISC-V Compressed (C) Extension Constants.
//!
//! Defines the quadrants and funct3 values for 16-bit compressed instructions.
//! Compressed instructions are divided into three quadrants (0, 1, 2) based
//! on the lowest 2 bits of the instruction.

/// Quadrant 0 (bits 1:0 = 00).
pub const QUADRANT_0: u32 = 0b00;
/// Quadrant 1 (bits 1:0 = 01).
pub const QUADRANT_1: u32 = 0b01;
/// Quadrant 2 (bits 1:0 = 10).
pub const QUADRANT_2: u32 = 0b10;

/// Instructions in Quadrant 0.
pub mod q0 {
    /// Compressed Add Immediate, scaled by 4, to Stack Pointer (C.ADDI4SPN).
    pub const C_ADDI4SPN: u32 = 0b000;
    /// Compressed Load Word (C.LW).
    pub const C_LW: u32 = 0b010;
    /// Compressed Load Double (C.LD).
    pub const C_LD: u32 = 0b011;
    /// Compressed Store Word (C.SW).
    pub const C_SW: u32 = 0b110;
    /// Compressed Store Double (C.SD).
    pub const C_SD: u32 = 0b111;
}

/// Instructions in Quadrant 1.
pub mod q1 {
    /// Compressed Add Immediate (C.ADDI).
    pub const C_ADDI: u32 = 0b000;
    /// Compressed Add Immediate Word (C.ADDIW).
    pub const C_ADDIW: u32 = 0b001;
    /// Compressed Load Immediate (C.LI).
    pub const C_LI: u32 = 0b010;
    /// Compressed Load Upper Immediate / Add Immediate 16 to SP (C.LUI / C.ADDI16SP).
    pub const C_LUI_ADDI16SP: u32 = 0b011;
    /// Miscellaneous ALU operations (C.SRLI, C.SRAI, C.ANDI, C.SUB, etc.).
    pub const C_MISC_ALU: u32 = 0b100;
    /// Compressed Jump (C.J).
    pub const C_J: u32 = 0b101;
    /// Compressed Branch Equal Zero (C.BEQZ).
    pub const C_BEQZ: u32 = 0b110;
    /// Compressed Branch Not Equal Zero (C.BNEZ).
    pub const C_BNEZ: u32 = 0b111;
}

/// Instructions in Quadrant 2.
pub mod q2 {
    /// Compressed Shift Left Logical Immediate (C.SLLI).
    pub const C_SLLI: u32 = 0b000;
    /// Compressed Load Word from SP (C.LWSP).
    pub const C_LWSP: u32 = 0b010;
    /// Compressed Load Double from SP (C.LDSP).
    pub const C_LDSP: u32 = 0b011;
    /// Register moves and jumps (C.JR, C.MV, C.JALR, C.ADD).
    pub const C_MISC_ALU: u32 = 0b100;
    /// Compressed Store Word to SP (C.SWSP).
    pub const C_SWSP: u32 = 0b110;
    /// Compressed Store Double to SP (C.SDSP).
    pub const C_SDSP: u32 = 0b111;
}
