//! Headless NES CPU runner.
//!
//! Loads a cartridge image, resets the CPU through the reset vector, and
//! runs until the CPU halts (JAM opcode or decode fault), tracing every
//! instruction. Usage: famicore [path/to/game.nes]

use std::env;

use anyhow::Result;
use famicore::{bus::NesBus, cartridge::Cartridge, cpu::cpu::CPU};

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "test/nestest.nes".to_string());

    let cart = Cartridge::load(&path)?;
    let bus = NesBus::new(cart);

    let mut cpu = CPU::new(bus);
    cpu.trace = true;

    cpu.reset();
    cpu.run();

    println!(
        "halted at ${:04X}  A:{:02X} X:{:02X} Y:{:02X} SP:{:02X}  {} cycles",
        cpu.pc, cpu.a, cpu.x, cpu.y, cpu.sp, cpu.cycles
    );

    Ok(())
}
