//! Famicore: an instruction-level NES (Ricoh 2A03 / 6502) CPU emulator.
//!
//! Implements the CPU side of the NES as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): the
//! 6502 interpreter, the CPU memory map it executes against, and iNES
//! image loading. The PPU, APU, controllers, and mapper hardware are
//! deliberately out of scope; their address ranges read as open bus.
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map):
//!   2 KiB RAM mirrored through $0000-$1FFF, PRG window at $8000-$FFFF
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) header strip;
//!   flat PRG image, no mapper
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU) / 2A03: registers,
//!   flags, addressing modes, opcode table, fetch-decode-execute loop

pub mod bus;
pub mod cartridge;
pub mod cpu;
