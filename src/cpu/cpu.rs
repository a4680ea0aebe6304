use crate::{
    bus::Bus,
    cpu::flags::{
        FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW,
        FLAG_UNUSED, FLAG_ZERO,
    },
    cpu::opcodes::{Mode, OPCODES, Op, Opcode},
};

use ansi_term::Colour::Red;

/// A resolved operand: what an addressing mode produced.
///
/// Resolution is pure with respect to the status flags; it only consumes
/// operand bytes (advancing PC) and reads memory.
#[derive(Debug, Clone, Copy)]
pub enum Operand {
    /// Implied mode: the instruction carries no operand.
    None,
    /// The operand is the accumulator itself (shift/rotate A forms).
    Accumulator,
    /// An immediate byte (also the raw displacement byte for branches).
    Immediate(u8),
    /// An effective memory address.
    Address(u16),
}

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub cycles: usize,
    pub bus: B,
    pub halted: bool,
    /// Print a trace line per executed instruction (off in tests).
    pub trace: bool,
}

impl<B: Bus> CPU<B> {
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: FLAG_INTERRUPT_DISABLE | FLAG_UNUSED,
            cycles: 0,
            bus,
            halted: false,
            trace: false,
        }
    }

    /// Reset to the documented power-on state and seed PC from the reset
    /// vector at $FFFC/$FFFD (little endian, through ordinary bus mapping).
    pub fn reset(&mut self) {
        let lo = self.bus.read(0xFFFC) as u16;
        let hi = self.bus.read(0xFFFD) as u16;

        self.pc = (hi << 8) | lo;

        self.sp = 0xFD; // resets at 0xFD instead of 0xFF for some reason
        self.status = FLAG_INTERRUPT_DISABLE | FLAG_UNUSED;

        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.halted = false;

        self.cycles = 7;
    }

    /// Execute one instruction. A no-op once the CPU has halted.
    ///
    /// Fetches the opcode byte, looks it up in the dispatch table,
    /// resolves the addressing mode, and executes. An opcode with no
    /// table entry is a decode fault: it is reported and the CPU halts
    /// with PC pointing just past the offending byte.
    pub fn step(&mut self) {
        if self.halted {
            return;
        }

        let pc = self.pc;
        let opcode = self.fetch_byte();

        let Some(entry) = OPCODES[opcode as usize] else {
            println!(
                "{} unknown opcode ${:02X} at ${:04X}, halting",
                Red.bold().paint("ERROR"),
                opcode,
                pc
            );
            self.halted = true;
            return;
        };

        if self.trace {
            self.log_instruction(pc, opcode, &entry);
        }

        let operand = self.resolve(entry.mode);
        self.execute(&entry, operand);
        self.cycles += entry.cycles as usize;
    }

    /// Run until the CPU halts (explicit halt opcode or decode fault).
    pub fn run(&mut self) {
        while !self.halted {
            self.step();
        }
    }

    /// Run at most `n` instructions. Gives event-driven hosts a bounded
    /// call; the loop itself never yields mid-instruction.
    pub fn run_steps(&mut self, n: usize) {
        for _ in 0..n {
            if self.halted {
                break;
            }
            self.step();
        }
    }

    fn jam(&mut self) {
        self.halted = true;
    }

    fn fetch_byte(&mut self) -> u8 {
        let byte = self.bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Resolve an addressing mode to an operand, consuming exactly the
    /// mode's operand bytes from the instruction stream.
    fn resolve(&mut self, mode: Mode) -> Operand {
        match mode {
            Mode::Implied => Operand::None,
            Mode::Accumulator => Operand::Accumulator,
            Mode::Immediate | Mode::Relative => Operand::Immediate(self.fetch_byte()),
            Mode::ZeroPage => Operand::Address(self.fetch_byte() as u16),
            Mode::ZeroPageX => {
                // Index wraps within page zero
                let base = self.fetch_byte();
                Operand::Address(base.wrapping_add(self.x) as u16)
            }
            Mode::ZeroPageY => {
                let base = self.fetch_byte();
                Operand::Address(base.wrapping_add(self.y) as u16)
            }
            Mode::Absolute => Operand::Address(self.fetch_word()),
            Mode::AbsoluteX => {
                let base = self.fetch_word();
                Operand::Address(base.wrapping_add(self.x as u16))
            }
            Mode::AbsoluteY => {
                let base = self.fetch_word();
                Operand::Address(base.wrapping_add(self.y as u16))
            }
            Mode::Indirect => {
                let ptr = self.fetch_word();

                let lo = self.bus.read(ptr) as u16;
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF); // page-boundary bug
                let hi = self.bus.read(hi_addr) as u16;

                Operand::Address((hi << 8) | lo)
            }
            Mode::IndirectX => {
                let zp = self.fetch_byte().wrapping_add(self.x);

                let lo = self.bus.read(zp as u16) as u16;
                let hi = self.bus.read(zp.wrapping_add(1) as u16) as u16;

                Operand::Address((hi << 8) | lo)
            }
            Mode::IndirectY => {
                let zp = self.fetch_byte();

                let lo = self.bus.read(zp as u16) as u16;
                let hi = self.bus.read(zp.wrapping_add(1) as u16) as u16;
                let base = (hi << 8) | lo;

                Operand::Address(base.wrapping_add(self.y as u16))
            }
        }
    }

    fn read_operand(&self, operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(value) => value,
            Operand::Address(addr) => self.bus.read(addr),
            Operand::Accumulator => self.a,
            Operand::None => unreachable!("operation reads an implied operand"),
        }
    }

    fn write_operand(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Address(addr) => self.bus.write(addr, value),
            Operand::Accumulator => self.a = value,
            _ => unreachable!("operation writes an immediate or implied operand"),
        }
    }

    fn operand_address(&self, operand: Operand) -> u16 {
        match operand {
            Operand::Address(addr) => addr,
            _ => unreachable!("operation needs an effective address"),
        }
    }

    fn execute(&mut self, entry: &Opcode, operand: Operand) {
        match entry.op {
            // Loads / stores
            Op::Lda => {
                self.a = self.read_operand(operand);
                self.update_zero_and_negative_flags(self.a);
            }
            Op::Ldx => {
                self.x = self.read_operand(operand);
                self.update_zero_and_negative_flags(self.x);
            }
            Op::Ldy => {
                self.y = self.read_operand(operand);
                self.update_zero_and_negative_flags(self.y);
            }
            Op::Sta => self.write_operand(operand, self.a),
            Op::Stx => self.write_operand(operand, self.x),
            Op::Sty => self.write_operand(operand, self.y),

            // Register transfers
            Op::Tax => {
                self.x = self.a;
                self.update_zero_and_negative_flags(self.x);
            }
            Op::Tay => {
                self.y = self.a;
                self.update_zero_and_negative_flags(self.y);
            }
            Op::Txa => {
                self.a = self.x;
                self.update_zero_and_negative_flags(self.a);
            }
            Op::Tya => {
                self.a = self.y;
                self.update_zero_and_negative_flags(self.a);
            }
            Op::Tsx => {
                self.x = self.sp;
                self.update_zero_and_negative_flags(self.x);
            }
            // TXS does not touch the flags
            Op::Txs => self.sp = self.x,

            // Stack
            Op::Pha => self.push(self.a),
            Op::Pla => {
                self.a = self.pop();
                self.update_zero_and_negative_flags(self.a);
            }
            Op::Php => {
                let status = self.status | FLAG_BREAK | FLAG_UNUSED;
                self.push(status);
            }
            Op::Plp => {
                let value = self.pop();
                self.status = (value & !FLAG_BREAK) | FLAG_UNUSED;
            }

            // Logic
            Op::And => {
                self.a &= self.read_operand(operand);
                self.update_zero_and_negative_flags(self.a);
            }
            Op::Ora => {
                self.a |= self.read_operand(operand);
                self.update_zero_and_negative_flags(self.a);
            }
            Op::Eor => {
                self.a ^= self.read_operand(operand);
                self.update_zero_and_negative_flags(self.a);
            }
            Op::Bit => {
                let value = self.read_operand(operand);
                self.set_flag(FLAG_ZERO, self.a & value == 0);
                self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
                self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
            }

            // Arithmetic / comparison
            Op::Adc => {
                let value = self.read_operand(operand);
                self.add_with_carry(value);
            }
            Op::Sbc => {
                // A - M - (1 - C) == A + !M + C, with the same flag rules
                let value = self.read_operand(operand);
                self.add_with_carry(value ^ 0xFF);
            }
            Op::Cmp => {
                let value = self.read_operand(operand);
                self.compare(self.a, value);
            }
            Op::Cpx => {
                let value = self.read_operand(operand);
                self.compare(self.x, value);
            }
            Op::Cpy => {
                let value = self.read_operand(operand);
                self.compare(self.y, value);
            }

            // Increments / decrements
            Op::Inc => {
                let value = self.read_operand(operand).wrapping_add(1);
                self.write_operand(operand, value);
                self.update_zero_and_negative_flags(value);
            }
            Op::Dec => {
                let value = self.read_operand(operand).wrapping_sub(1);
                self.write_operand(operand, value);
                self.update_zero_and_negative_flags(value);
            }
            Op::Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Op::Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative_flags(self.y);
            }
            Op::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Op::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.y);
            }

            // Shifts / rotates: carry takes the bit shifted out, rotates
            // feed the previous carry into the vacated bit
            Op::Asl => {
                let value = self.read_operand(operand);
                self.set_flag(FLAG_CARRY, value & 0x80 != 0);
                let result = value << 1;
                self.write_operand(operand, result);
                self.update_zero_and_negative_flags(result);
            }
            Op::Lsr => {
                let value = self.read_operand(operand);
                self.set_flag(FLAG_CARRY, value & 0x01 != 0);
                let result = value >> 1;
                self.write_operand(operand, result);
                self.update_zero_and_negative_flags(result);
            }
            Op::Rol => {
                let value = self.read_operand(operand);
                let old_carry = self.status & FLAG_CARRY != 0;
                self.set_flag(FLAG_CARRY, value & 0x80 != 0);
                let result = (value << 1) | u8::from(old_carry);
                self.write_operand(operand, result);
                self.update_zero_and_negative_flags(result);
            }
            Op::Ror => {
                let value = self.read_operand(operand);
                let old_carry = self.status & FLAG_CARRY != 0;
                self.set_flag(FLAG_CARRY, value & 0x01 != 0);
                let result = (value >> 1) | (u8::from(old_carry) << 7);
                self.write_operand(operand, result);
                self.update_zero_and_negative_flags(result);
            }

            // Control flow
            Op::Jmp => self.pc = self.operand_address(operand),
            Op::Jsr => {
                let addr = self.operand_address(operand);

                // Pushed address is the last byte of the JSR itself;
                // RTS pulls it and increments past it.
                let return_addr = self.pc.wrapping_sub(1);
                self.push((return_addr >> 8) as u8);
                self.push(return_addr as u8);

                self.pc = addr;
            }
            Op::Rts => {
                let lo = self.pop() as u16;
                let hi = self.pop() as u16;

                self.pc = ((hi << 8) | lo).wrapping_add(1);
            }

            // Branches
            Op::Bcc => self.branch(operand, self.status & FLAG_CARRY == 0),
            Op::Bcs => self.branch(operand, self.status & FLAG_CARRY != 0),
            Op::Beq => self.branch(operand, self.status & FLAG_ZERO != 0),
            Op::Bne => self.branch(operand, self.status & FLAG_ZERO == 0),
            Op::Bmi => self.branch(operand, self.status & FLAG_NEGATIVE != 0),
            Op::Bpl => self.branch(operand, self.status & FLAG_NEGATIVE == 0),
            Op::Bvs => self.branch(operand, self.status & FLAG_OVERFLOW != 0),
            Op::Bvc => self.branch(operand, self.status & FLAG_OVERFLOW == 0),

            // Status flag changes
            Op::Clc => self.status &= !FLAG_CARRY,
            Op::Cld => self.status &= !FLAG_DECIMAL,
            Op::Cli => self.status &= !FLAG_INTERRUPT_DISABLE,
            Op::Clv => self.status &= !FLAG_OVERFLOW,
            Op::Sec => self.status |= FLAG_CARRY,
            Op::Sed => self.status |= FLAG_DECIMAL,
            Op::Sei => self.status |= FLAG_INTERRUPT_DISABLE,

            // System
            Op::Brk => {
                self.pc = self.pc.wrapping_add(1); // +1 because of the padding byte

                self.push((self.pc >> 8) as u8);
                self.push(self.pc as u8);

                let status = self.status | FLAG_BREAK | FLAG_UNUSED;
                self.push(status);

                self.status |= FLAG_INTERRUPT_DISABLE;

                let lo = self.bus.read(0xFFFE) as u16;
                let hi = self.bus.read(0xFFFF) as u16;
                self.pc = (hi << 8) | lo;
            }
            Op::Rti => {
                let status = self.pop();
                self.status = (status & !FLAG_BREAK) | FLAG_UNUSED;

                let lo = self.pop() as u16;
                let hi = self.pop() as u16;
                self.pc = (hi << 8) | lo;
            }
            Op::Nop => {}
            Op::Jam => self.jam(),
        }
    }

    /// ADC core, shared by SBC via the one's complement of the operand.
    /// Carry out of bit 7 sets C; signed overflow sets V when both inputs
    /// share a sign and the result does not.
    fn add_with_carry(&mut self, value: u8) {
        let carry_in = u16::from(self.status & FLAG_CARRY != 0);
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        self.set_flag(FLAG_OVERFLOW, (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0);

        self.a = result;
        self.update_zero_and_negative_flags(self.a);
    }

    /// CMP/CPX/CPY: flags from `reg - value` without touching the register.
    fn compare(&mut self, reg: u8, value: u8) {
        let result = reg.wrapping_sub(value);

        self.set_flag(FLAG_CARRY, reg >= value);
        self.update_zero_and_negative_flags(result);
    }

    fn push(&mut self, value: u8) {
        let addr = 0x0100 | self.sp as u16;
        self.bus.write(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = 0x0100 | self.sp as u16;
        self.bus.read(addr)
    }

    /// Shared branch body: the displacement byte is already consumed, so
    /// a taken branch is relative to the address after the operand.
    fn branch(&mut self, operand: Operand, condition: bool) {
        let Operand::Immediate(offset) = operand else {
            unreachable!("branches use relative addressing");
        };

        if condition {
            self.pc = self.pc.wrapping_add(offset as i8 as u16);
            self.cycles += 1;
        }
    }

    fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    fn log_instruction(&self, pc: u16, opcode: u8, entry: &Opcode) {
        println!(
            "{:04X}  {:02X}  {:<4} A:{:02X} X:{:02X} Y:{:02X} SP:{:02X}  {} CYC:{}",
            pc,
            opcode,
            entry.mnemonic,
            self.a,
            self.x,
            self.y,
            self.sp,
            self.flag_letters(),
            self.cycles
        );
    }

    /// Flag letters in NV--DIZC order, uppercase when set.
    fn flag_letters(&self) -> String {
        let letter = |flag: u8, set: char, clear: char| {
            if self.status & flag != 0 { set } else { clear }
        };
        format!(
            "{}{}--{}{}{}{}",
            letter(FLAG_NEGATIVE, 'N', 'n'),
            letter(FLAG_OVERFLOW, 'V', 'v'),
            letter(FLAG_DECIMAL, 'D', 'd'),
            letter(FLAG_INTERRUPT_DISABLE, 'I', 'i'),
            letter(FLAG_ZERO, 'Z', 'z'),
            letter(FLAG_CARRY, 'C', 'c'),
        )
    }
}
