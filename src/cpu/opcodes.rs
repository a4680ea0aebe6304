//! 6502 opcode table: one entry per defined opcode byte.
//!
//! Data-driven replacement for a per-opcode match: each of the 256 byte
//! values maps to `Some(Opcode)` (operation, addressing mode, mnemonic,
//! base cycle count) or `None`. A `None` is a decode fault and halts the
//! CPU, so the unimplemented opcodes are an explicit, enumerable gap
//! rather than a fallthrough. All 151 official opcodes are present,
//! plus the twelve JAM bytes ($02, $12, ...) which halt by definition.
//!
//! Cycle counts are the documented base counts; they are informational
//! only (no scheduler consumes them) and page-cross penalties are not
//! modeled. Taken branches add one cycle in the executor.

/// Addressing mode: the rule for locating an instruction's operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl Mode {
    /// Operand bytes consumed after the opcode byte itself.
    pub fn operand_len(self) -> u16 {
        match self {
            Mode::Implied | Mode::Accumulator => 0,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::IndirectX
            | Mode::IndirectY
            | Mode::Relative => 1,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
        }
    }
}

/// Operation: what an instruction does, independent of addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Loads / stores
    Lda, Ldx, Ldy, Sta, Stx, Sty,
    // Register transfers
    Tax, Tay, Txa, Tya, Tsx, Txs,
    // Stack
    Pha, Pla, Php, Plp,
    // Logic
    And, Ora, Eor, Bit,
    // Arithmetic / comparison
    Adc, Sbc, Cmp, Cpx, Cpy,
    // Increments / decrements
    Inc, Inx, Iny, Dec, Dex, Dey,
    // Shifts / rotates
    Asl, Lsr, Rol, Ror,
    // Control flow
    Jmp, Jsr, Rts,
    // Branches
    Bcc, Bcs, Beq, Bmi, Bne, Bpl, Bvc, Bvs,
    // Status flag changes
    Clc, Cld, Cli, Clv, Sec, Sed, Sei,
    // System
    Brk, Rti, Nop,
    // Unofficial halt ($02 family)
    Jam,
}

/// One decoded opcode: operation, addressing mode, mnemonic for the
/// trace log, and documented base cycle count.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub op: Op,
    pub mode: Mode,
    pub mnemonic: &'static str,
    pub cycles: u8,
}

const fn entry(op: Op, mode: Mode, mnemonic: &'static str, cycles: u8) -> Option<Opcode> {
    Some(Opcode {
        op,
        mode,
        mnemonic,
        cycles,
    })
}

/// The dispatch table, indexed by opcode byte.
pub static OPCODES: [Option<Opcode>; 256] = {
    use Mode::*;
    use Op::*;

    let mut t: [Option<Opcode>; 256] = [None; 256];

    // LDA
    t[0xA9] = entry(Lda, Immediate, "LDA", 2);
    t[0xA5] = entry(Lda, ZeroPage, "LDA", 3);
    t[0xB5] = entry(Lda, ZeroPageX, "LDA", 4);
    t[0xAD] = entry(Lda, Absolute, "LDA", 4);
    t[0xBD] = entry(Lda, AbsoluteX, "LDA", 4);
    t[0xB9] = entry(Lda, AbsoluteY, "LDA", 4);
    t[0xA1] = entry(Lda, IndirectX, "LDA", 6);
    t[0xB1] = entry(Lda, IndirectY, "LDA", 5);

    // LDX
    t[0xA2] = entry(Ldx, Immediate, "LDX", 2);
    t[0xA6] = entry(Ldx, ZeroPage, "LDX", 3);
    t[0xB6] = entry(Ldx, ZeroPageY, "LDX", 4);
    t[0xAE] = entry(Ldx, Absolute, "LDX", 4);
    t[0xBE] = entry(Ldx, AbsoluteY, "LDX", 4);

    // LDY
    t[0xA0] = entry(Ldy, Immediate, "LDY", 2);
    t[0xA4] = entry(Ldy, ZeroPage, "LDY", 3);
    t[0xB4] = entry(Ldy, ZeroPageX, "LDY", 4);
    t[0xAC] = entry(Ldy, Absolute, "LDY", 4);
    t[0xBC] = entry(Ldy, AbsoluteX, "LDY", 4);

    // STA
    t[0x85] = entry(Sta, ZeroPage, "STA", 3);
    t[0x95] = entry(Sta, ZeroPageX, "STA", 4);
    t[0x8D] = entry(Sta, Absolute, "STA", 4);
    t[0x9D] = entry(Sta, AbsoluteX, "STA", 5);
    t[0x99] = entry(Sta, AbsoluteY, "STA", 5);
    t[0x81] = entry(Sta, IndirectX, "STA", 6);
    t[0x91] = entry(Sta, IndirectY, "STA", 6);

    // STX
    t[0x86] = entry(Stx, ZeroPage, "STX", 3);
    t[0x96] = entry(Stx, ZeroPageY, "STX", 4);
    t[0x8E] = entry(Stx, Absolute, "STX", 4);

    // STY
    t[0x84] = entry(Sty, ZeroPage, "STY", 3);
    t[0x94] = entry(Sty, ZeroPageX, "STY", 4);
    t[0x8C] = entry(Sty, Absolute, "STY", 4);

    // Register transfers
    t[0xAA] = entry(Tax, Implied, "TAX", 2);
    t[0xA8] = entry(Tay, Implied, "TAY", 2);
    t[0x8A] = entry(Txa, Implied, "TXA", 2);
    t[0x98] = entry(Tya, Implied, "TYA", 2);
    t[0xBA] = entry(Tsx, Implied, "TSX", 2);
    t[0x9A] = entry(Txs, Implied, "TXS", 2);

    // Stack
    t[0x48] = entry(Pha, Implied, "PHA", 3);
    t[0x68] = entry(Pla, Implied, "PLA", 4);
    t[0x08] = entry(Php, Implied, "PHP", 3);
    t[0x28] = entry(Plp, Implied, "PLP", 4);

    // AND
    t[0x29] = entry(And, Immediate, "AND", 2);
    t[0x25] = entry(And, ZeroPage, "AND", 3);
    t[0x35] = entry(And, ZeroPageX, "AND", 4);
    t[0x2D] = entry(And, Absolute, "AND", 4);
    t[0x3D] = entry(And, AbsoluteX, "AND", 4);
    t[0x39] = entry(And, AbsoluteY, "AND", 4);
    t[0x21] = entry(And, IndirectX, "AND", 6);
    t[0x31] = entry(And, IndirectY, "AND", 5);

    // ORA
    t[0x09] = entry(Ora, Immediate, "ORA", 2);
    t[0x05] = entry(Ora, ZeroPage, "ORA", 3);
    t[0x15] = entry(Ora, ZeroPageX, "ORA", 4);
    t[0x0D] = entry(Ora, Absolute, "ORA", 4);
    t[0x1D] = entry(Ora, AbsoluteX, "ORA", 4);
    t[0x19] = entry(Ora, AbsoluteY, "ORA", 4);
    t[0x01] = entry(Ora, IndirectX, "ORA", 6);
    t[0x11] = entry(Ora, IndirectY, "ORA", 5);

    // EOR
    t[0x49] = entry(Eor, Immediate, "EOR", 2);
    t[0x45] = entry(Eor, ZeroPage, "EOR", 3);
    t[0x55] = entry(Eor, ZeroPageX, "EOR", 4);
    t[0x4D] = entry(Eor, Absolute, "EOR", 4);
    t[0x5D] = entry(Eor, AbsoluteX, "EOR", 4);
    t[0x59] = entry(Eor, AbsoluteY, "EOR", 4);
    t[0x41] = entry(Eor, IndirectX, "EOR", 6);
    t[0x51] = entry(Eor, IndirectY, "EOR", 5);

    // BIT
    t[0x24] = entry(Bit, ZeroPage, "BIT", 3);
    t[0x2C] = entry(Bit, Absolute, "BIT", 4);

    // ADC
    t[0x69] = entry(Adc, Immediate, "ADC", 2);
    t[0x65] = entry(Adc, ZeroPage, "ADC", 3);
    t[0x75] = entry(Adc, ZeroPageX, "ADC", 4);
    t[0x6D] = entry(Adc, Absolute, "ADC", 4);
    t[0x7D] = entry(Adc, AbsoluteX, "ADC", 4);
    t[0x79] = entry(Adc, AbsoluteY, "ADC", 4);
    t[0x61] = entry(Adc, IndirectX, "ADC", 6);
    t[0x71] = entry(Adc, IndirectY, "ADC", 5);

    // SBC
    t[0xE9] = entry(Sbc, Immediate, "SBC", 2);
    t[0xE5] = entry(Sbc, ZeroPage, "SBC", 3);
    t[0xF5] = entry(Sbc, ZeroPageX, "SBC", 4);
    t[0xED] = entry(Sbc, Absolute, "SBC", 4);
    t[0xFD] = entry(Sbc, AbsoluteX, "SBC", 4);
    t[0xF9] = entry(Sbc, AbsoluteY, "SBC", 4);
    t[0xE1] = entry(Sbc, IndirectX, "SBC", 6);
    t[0xF1] = entry(Sbc, IndirectY, "SBC", 5);

    // CMP
    t[0xC9] = entry(Cmp, Immediate, "CMP", 2);
    t[0xC5] = entry(Cmp, ZeroPage, "CMP", 3);
    t[0xD5] = entry(Cmp, ZeroPageX, "CMP", 4);
    t[0xCD] = entry(Cmp, Absolute, "CMP", 4);
    t[0xDD] = entry(Cmp, AbsoluteX, "CMP", 4);
    t[0xD9] = entry(Cmp, AbsoluteY, "CMP", 4);
    t[0xC1] = entry(Cmp, IndirectX, "CMP", 6);
    t[0xD1] = entry(Cmp, IndirectY, "CMP", 5);

    // CPX / CPY
    t[0xE0] = entry(Cpx, Immediate, "CPX", 2);
    t[0xE4] = entry(Cpx, ZeroPage, "CPX", 3);
    t[0xEC] = entry(Cpx, Absolute, "CPX", 4);
    t[0xC0] = entry(Cpy, Immediate, "CPY", 2);
    t[0xC4] = entry(Cpy, ZeroPage, "CPY", 3);
    t[0xCC] = entry(Cpy, Absolute, "CPY", 4);

    // INC / DEC (memory)
    t[0xE6] = entry(Inc, ZeroPage, "INC", 5);
    t[0xF6] = entry(Inc, ZeroPageX, "INC", 6);
    t[0xEE] = entry(Inc, Absolute, "INC", 6);
    t[0xFE] = entry(Inc, AbsoluteX, "INC", 7);
    t[0xC6] = entry(Dec, ZeroPage, "DEC", 5);
    t[0xD6] = entry(Dec, ZeroPageX, "DEC", 6);
    t[0xCE] = entry(Dec, Absolute, "DEC", 6);
    t[0xDE] = entry(Dec, AbsoluteX, "DEC", 7);

    // INX / INY / DEX / DEY
    t[0xE8] = entry(Inx, Implied, "INX", 2);
    t[0xC8] = entry(Iny, Implied, "INY", 2);
    t[0xCA] = entry(Dex, Implied, "DEX", 2);
    t[0x88] = entry(Dey, Implied, "DEY", 2);

    // ASL
    t[0x0A] = entry(Asl, Accumulator, "ASL", 2);
    t[0x06] = entry(Asl, ZeroPage, "ASL", 5);
    t[0x16] = entry(Asl, ZeroPageX, "ASL", 6);
    t[0x0E] = entry(Asl, Absolute, "ASL", 6);
    t[0x1E] = entry(Asl, AbsoluteX, "ASL", 7);

    // LSR
    t[0x4A] = entry(Lsr, Accumulator, "LSR", 2);
    t[0x46] = entry(Lsr, ZeroPage, "LSR", 5);
    t[0x56] = entry(Lsr, ZeroPageX, "LSR", 6);
    t[0x4E] = entry(Lsr, Absolute, "LSR", 6);
    t[0x5E] = entry(Lsr, AbsoluteX, "LSR", 7);

    // ROL
    t[0x2A] = entry(Rol, Accumulator, "ROL", 2);
    t[0x26] = entry(Rol, ZeroPage, "ROL", 5);
    t[0x36] = entry(Rol, ZeroPageX, "ROL", 6);
    t[0x2E] = entry(Rol, Absolute, "ROL", 6);
    t[0x3E] = entry(Rol, AbsoluteX, "ROL", 7);

    // ROR
    t[0x6A] = entry(Ror, Accumulator, "ROR", 2);
    t[0x66] = entry(Ror, ZeroPage, "ROR", 5);
    t[0x76] = entry(Ror, ZeroPageX, "ROR", 6);
    t[0x6E] = entry(Ror, Absolute, "ROR", 6);
    t[0x7E] = entry(Ror, AbsoluteX, "ROR", 7);

    // JMP / JSR / RTS
    t[0x4C] = entry(Jmp, Absolute, "JMP", 3);
    t[0x6C] = entry(Jmp, Indirect, "JMP", 5);
    t[0x20] = entry(Jsr, Absolute, "JSR", 6);
    t[0x60] = entry(Rts, Implied, "RTS", 6);

    // Branches
    t[0x90] = entry(Bcc, Relative, "BCC", 2);
    t[0xB0] = entry(Bcs, Relative, "BCS", 2);
    t[0xF0] = entry(Beq, Relative, "BEQ", 2);
    t[0x30] = entry(Bmi, Relative, "BMI", 2);
    t[0xD0] = entry(Bne, Relative, "BNE", 2);
    t[0x10] = entry(Bpl, Relative, "BPL", 2);
    t[0x50] = entry(Bvc, Relative, "BVC", 2);
    t[0x70] = entry(Bvs, Relative, "BVS", 2);

    // Status flag changes
    t[0x18] = entry(Clc, Implied, "CLC", 2);
    t[0xD8] = entry(Cld, Implied, "CLD", 2);
    t[0x58] = entry(Cli, Implied, "CLI", 2);
    t[0xB8] = entry(Clv, Implied, "CLV", 2);
    t[0x38] = entry(Sec, Implied, "SEC", 2);
    t[0xF8] = entry(Sed, Implied, "SED", 2);
    t[0x78] = entry(Sei, Implied, "SEI", 2);

    // System
    t[0x00] = entry(Brk, Implied, "BRK", 7);
    t[0x40] = entry(Rti, Implied, "RTI", 6);
    t[0xEA] = entry(Nop, Implied, "NOP", 2);

    // JAM: unofficial halt opcodes
    t[0x02] = entry(Jam, Implied, "JAM", 0);
    t[0x12] = entry(Jam, Implied, "JAM", 0);
    t[0x22] = entry(Jam, Implied, "JAM", 0);
    t[0x32] = entry(Jam, Implied, "JAM", 0);
    t[0x42] = entry(Jam, Implied, "JAM", 0);
    t[0x52] = entry(Jam, Implied, "JAM", 0);
    t[0x62] = entry(Jam, Implied, "JAM", 0);
    t[0x72] = entry(Jam, Implied, "JAM", 0);
    t[0x92] = entry(Jam, Implied, "JAM", 0);
    t[0xB2] = entry(Jam, Implied, "JAM", 0);
    t[0xD2] = entry(Jam, Implied, "JAM", 0);
    t[0xF2] = entry(Jam, Implied, "JAM", 0);

    t
};
