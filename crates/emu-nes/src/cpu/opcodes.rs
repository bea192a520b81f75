//! 6502 opcode table: mnemonic, addressing mode and base cycle cost per byte.
//!
//! `decode` is the single source of truth for which of the 256 possible opcode
//! bytes are legal. Everything else (the dispatch in `instructions.rs`, the
//! disassembler in `trace_line`) is driven off this table rather than
//! duplicating the opcode map.

/// Addressing modes for 6502
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect, // (Indirect,X)
    IndirectIndexed, // (Indirect),Y
}

/// One legal 6502 mnemonic. Illegal opcodes carry no variant here; `decode`
/// returns `None` for them and the CPU traps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Mnemonic {
    Lda, Ldx, Ldy, Sta, Stx, Sty,
    Tax, Tay, Txa, Tya, Tsx, Txs,
    Pha, Php, Pla, Plp,
    Adc, Sbc, And, Ora, Eor, Bit,
    Asl, Lsr, Rol, Ror,
    Cmp, Cpx, Cpy,
    Inc, Inx, Iny, Dec, Dex, Dey,
    Bpl, Bmi, Bvc, Bvs, Bcc, Bcs, Bne, Beq,
    Jmp, Jsr, Rts, Brk, Rti,
    Sec, Clc, Sei, Cli, Sed, Cld, Clv,
    Nop,
}

/// Decoded shape of a single opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeDef {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub cycles: u8,
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<OpcodeDef> {
    Some(OpcodeDef { mnemonic, mode, cycles })
}

/// Decode a single opcode byte. Returns `None` for the 105 illegal encodings.
pub fn decode(opcode: u8) -> Option<OpcodeDef> {
    use AddressingMode::*;
    use Mnemonic::*;

    match opcode {
        // LDA
        0xA9 => op(Lda, Immediate, 2),
        0xA5 => op(Lda, ZeroPage, 3),
        0xB5 => op(Lda, ZeroPageX, 4),
        0xAD => op(Lda, Absolute, 4),
        0xBD => op(Lda, AbsoluteX, 4),
        0xB9 => op(Lda, AbsoluteY, 4),
        0xA1 => op(Lda, IndexedIndirect, 6),
        0xB1 => op(Lda, IndirectIndexed, 5),

        // LDX
        0xA2 => op(Ldx, Immediate, 2),
        0xA6 => op(Ldx, ZeroPage, 3),
        0xB6 => op(Ldx, ZeroPageY, 4),
        0xAE => op(Ldx, Absolute, 4),
        0xBE => op(Ldx, AbsoluteY, 4),

        // LDY
        0xA0 => op(Ldy, Immediate, 2),
        0xA4 => op(Ldy, ZeroPage, 3),
        0xB4 => op(Ldy, ZeroPageX, 4),
        0xAC => op(Ldy, Absolute, 4),
        0xBC => op(Ldy, AbsoluteX, 4),

        // STA
        0x85 => op(Sta, ZeroPage, 3),
        0x95 => op(Sta, ZeroPageX, 4),
        0x8D => op(Sta, Absolute, 4),
        0x9D => op(Sta, AbsoluteX, 5),
        0x99 => op(Sta, AbsoluteY, 5),
        0x81 => op(Sta, IndexedIndirect, 6),
        0x91 => op(Sta, IndirectIndexed, 6),

        // STX / STY
        0x86 => op(Stx, ZeroPage, 3),
        0x96 => op(Stx, ZeroPageY, 4),
        0x8E => op(Stx, Absolute, 4),
        0x84 => op(Sty, ZeroPage, 3),
        0x94 => op(Sty, ZeroPageX, 4),
        0x8C => op(Sty, Absolute, 4),

        // Register transfers
        0xAA => op(Tax, Implied, 2),
        0xA8 => op(Tay, Implied, 2),
        0x8A => op(Txa, Implied, 2),
        0x98 => op(Tya, Implied, 2),
        0xBA => op(Tsx, Implied, 2),
        0x9A => op(Txs, Implied, 2),

        // Stack
        0x48 => op(Pha, Implied, 3),
        0x08 => op(Php, Implied, 3),
        0x68 => op(Pla, Implied, 4),
        0x28 => op(Plp, Implied, 4),

        // ADC
        0x69 => op(Adc, Immediate, 2),
        0x65 => op(Adc, ZeroPage, 3),
        0x75 => op(Adc, ZeroPageX, 4),
        0x6D => op(Adc, Absolute, 4),
        0x7D => op(Adc, AbsoluteX, 4),
        0x79 => op(Adc, AbsoluteY, 4),
        0x61 => op(Adc, IndexedIndirect, 6),
        0x71 => op(Adc, IndirectIndexed, 5),

        // SBC
        0xE9 => op(Sbc, Immediate, 2),
        0xE5 => op(Sbc, ZeroPage, 3),
        0xF5 => op(Sbc, ZeroPageX, 4),
        0xED => op(Sbc, Absolute, 4),
        0xFD => op(Sbc, AbsoluteX, 4),
        0xF9 => op(Sbc, AbsoluteY, 4),
        0xE1 => op(Sbc, IndexedIndirect, 6),
        0xF1 => op(Sbc, IndirectIndexed, 5),

        // AND
        0x29 => op(And, Immediate, 2),
        0x25 => op(And, ZeroPage, 3),
        0x35 => op(And, ZeroPageX, 4),
        0x2D => op(And, Absolute, 4),
        0x3D => op(And, AbsoluteX, 4),
        0x39 => op(And, AbsoluteY, 4),
        0x21 => op(And, IndexedIndirect, 6),
        0x31 => op(And, IndirectIndexed, 5),

        // ORA
        0x09 => op(Ora, Immediate, 2),
        0x05 => op(Ora, ZeroPage, 3),
        0x15 => op(Ora, ZeroPageX, 4),
        0x0D => op(Ora, Absolute, 4),
        0x1D => op(Ora, AbsoluteX, 4),
        0x19 => op(Ora, AbsoluteY, 4),
        0x01 => op(Ora, IndexedIndirect, 6),
        0x11 => op(Ora, IndirectIndexed, 5),

        // EOR
        0x49 => op(Eor, Immediate, 2),
        0x45 => op(Eor, ZeroPage, 3),
        0x55 => op(Eor, ZeroPageX, 4),
        0x4D => op(Eor, Absolute, 4),
        0x5D => op(Eor, AbsoluteX, 4),
        0x59 => op(Eor, AbsoluteY, 4),
        0x41 => op(Eor, IndexedIndirect, 6),
        0x51 => op(Eor, IndirectIndexed, 5),

        // BIT
        0x24 => op(Bit, ZeroPage, 3),
        0x2C => op(Bit, Absolute, 4),

        // ASL
        0x0A => op(Asl, Accumulator, 2),
        0x06 => op(Asl, ZeroPage, 5),
        0x16 => op(Asl, ZeroPageX, 6),
        0x0E => op(Asl, Absolute, 6),
        0x1E => op(Asl, AbsoluteX, 7),

        // LSR
        0x4A => op(Lsr, Accumulator, 2),
        0x46 => op(Lsr, ZeroPage, 5),
        0x56 => op(Lsr, ZeroPageX, 6),
        0x4E => op(Lsr, Absolute, 6),
        0x5E => op(Lsr, AbsoluteX, 7),

        // ROL
        0x2A => op(Rol, Accumulator, 2),
        0x26 => op(Rol, ZeroPage, 5),
        0x36 => op(Rol, ZeroPageX, 6),
        0x2E => op(Rol, Absolute, 6),
        0x3E => op(Rol, AbsoluteX, 7),

        // ROR
        0x6A => op(Ror, Accumulator, 2),
        0x66 => op(Ror, ZeroPage, 5),
        0x76 => op(Ror, ZeroPageX, 6),
        0x6E => op(Ror, Absolute, 6),
        0x7E => op(Ror, AbsoluteX, 7),

        // CMP
        0xC9 => op(Cmp, Immediate, 2),
        0xC5 => op(Cmp, ZeroPage, 3),
        0xD5 => op(Cmp, ZeroPageX, 4),
        0xCD => op(Cmp, Absolute, 4),
        0xDD => op(Cmp, AbsoluteX, 4),
        0xD9 => op(Cmp, AbsoluteY, 4),
        0xC1 => op(Cmp, IndexedIndirect, 6),
        0xD1 => op(Cmp, IndirectIndexed, 5),

        // CPX / CPY
        0xE0 => op(Cpx, Immediate, 2),
        0xE4 => op(Cpx, ZeroPage, 3),
        0xEC => op(Cpx, Absolute, 4),
        0xC0 => op(Cpy, Immediate, 2),
        0xC4 => op(Cpy, ZeroPage, 3),
        0xCC => op(Cpy, Absolute, 4),

        // INC / DEC
        0xE6 => op(Inc, ZeroPage, 5),
        0xF6 => op(Inc, ZeroPageX, 6),
        0xEE => op(Inc, Absolute, 6),
        0xFE => op(Inc, AbsoluteX, 7),
        0xC6 => op(Dec, ZeroPage, 5),
        0xD6 => op(Dec, ZeroPageX, 6),
        0xCE => op(Dec, Absolute, 6),
        0xDE => op(Dec, AbsoluteX, 7),

        // INX/INY/DEX/DEY
        0xE8 => op(Inx, Implied, 2),
        0xC8 => op(Iny, Implied, 2),
        0xCA => op(Dex, Implied, 2),
        0x88 => op(Dey, Implied, 2),

        // Branches
        0x10 => op(Bpl, Relative, 2),
        0x30 => op(Bmi, Relative, 2),
        0x50 => op(Bvc, Relative, 2),
        0x70 => op(Bvs, Relative, 2),
        0x90 => op(Bcc, Relative, 2),
        0xB0 => op(Bcs, Relative, 2),
        0xD0 => op(Bne, Relative, 2),
        0xF0 => op(Beq, Relative, 2),

        // Jumps / subroutines / interrupts
        0x4C => op(Jmp, Absolute, 3),
        0x6C => op(Jmp, Indirect, 5),
        0x20 => op(Jsr, Absolute, 6),
        0x60 => op(Rts, Implied, 6),
        0x00 => op(Brk, Implied, 7),
        0x40 => op(Rti, Implied, 6),

        // Flags
        0x38 => op(Sec, Implied, 2),
        0x18 => op(Clc, Implied, 2),
        0x78 => op(Sei, Implied, 2),
        0x58 => op(Cli, Implied, 2),
        0xF8 => op(Sed, Implied, 2),
        0xD8 => op(Cld, Implied, 2),
        0xB8 => op(Clv, Implied, 2),

        // NOP
        0xEA => op(Nop, Implied, 2),

        _ => None,
    }
}
