//! Memory bus and address decoding for the NES CPU.
//!
//! Maps CPU addresses to internal RAM and the cartridge PRG window.

use crate::cartridge::Cartridge;

/// Trait for bus access used by the CPU.
///
/// Both functions are total over the 16-bit address space: there is no
/// address a caller can pass that faults. Reads of unmapped regions
/// return 0 (open-bus fallback); writes outside RAM are discarded.
pub trait Bus {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

/// Main NES bus: 2 KiB internal RAM plus the cartridge PRG image.
pub struct NesBus {
    pub ram: [u8; 2048],
    pub cart: Cartridge,
}

impl NesBus {
    /// Create a new bus with the given cartridge and zeroed RAM.
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; 2048],
            cart,
        }
    }

    /// Replace the cartridge and zero-fill RAM, as a reset does.
    pub fn load(&mut self, cart: Cartridge) {
        self.ram = [0; 2048];
        self.cart = cart;
    }
}

impl Bus for NesBus {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            // Internal RAM (mirrored 4x in 0x0000-0x1FFF)
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            // PPU/APU registers, controllers, expansion: unmapped here
            0x2000..=0x7FFF => 0,
            // Cartridge PRG ROM
            0x8000..=0xFFFF => self.cart.read(addr),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            // Internal RAM
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            // PRG ROM and unmapped regions: writes are discarded
            _ => {}
        }
    }
}
