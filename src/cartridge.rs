//! NES cartridge image loading from iNES format (.nes files).
//!
//! Only the part of [iNES](https://www.nesdev.org/wiki/INES) the CPU core
//! needs: the 16-byte header is consumed and stripped, and the remainder
//! of the file is mapped flat into the CPU address space at $8000. Header
//! parsing (mapper number, PRG/CHR sizes, mirroring) is the concern of a
//! full loader and is not interpreted here.

use std::fs;

use anyhow::{Result, bail};

/// Header length stripped from the front of every iNES file.
const INES_HEADER_LEN: usize = 16;

/// Cartridge: the program image read-mapped at $8000-$FFFF.
///
/// The image is loaded once and never written; mapper registers are not
/// modeled. Reads past the image end return 0 (open bus).
pub struct Cartridge {
    pub prg_rom: Vec<u8>,
}

impl Cartridge {
    /// Load a cartridge image from an iNES file on disk.
    ///
    /// Fails (without constructing anything) if the file cannot be read
    /// or is shorter than the 16-byte header.
    pub fn load(path: &str) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Build a cartridge from raw iNES bytes: strip the header, keep the rest.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < INES_HEADER_LEN {
            bail!(
                "ROM image is {} bytes, shorter than the {}-byte iNES header",
                data.len(),
                INES_HEADER_LEN
            );
        }

        Ok(Self {
            prg_rom: data[INES_HEADER_LEN..].to_vec(),
        })
    }

    /// Read from the PRG window, which starts at CPU address $8000.
    /// Total over the 16-bit space: addresses below the window and
    /// offsets past the image end read as 0.
    pub fn read(&self, addr: u16) -> u8 {
        let offset = (addr as usize).wrapping_sub(0x8000);
        if offset < self.prg_rom.len() {
            self.prg_rom[offset]
        } else {
            0
        }
    }
}
