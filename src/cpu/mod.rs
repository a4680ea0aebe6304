//! 6502 CPU emulation for the NES.
//!
//! Official instruction set plus the JAM halt opcodes, dispatched through
//! a 256-entry opcode table. Bus trait used for all memory access.

pub mod cpu;
pub mod flags;
pub mod opcodes;
