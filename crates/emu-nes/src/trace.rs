//! CPU trace-line formatting for the standalone 6502 driver. Not wired to
//! any logging call site automatically — callers that want a trace build
//! the line themselves via `Cpu6502::trace_line` and print or log it.

use crate::cpu::{AddressingMode, Mnemonic};

pub(crate) fn operand_len(mode: AddressingMode) -> u8 {
    use AddressingMode::*;
    match mode {
        Implied | Accumulator => 0,
        Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndexedIndirect | IndirectIndexed => 1,
        Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
    }
}

fn mnemonic_name(mnemonic: Mnemonic) -> &'static str {
    use Mnemonic::*;
    match mnemonic {
        Lda => "LDA", Ldx => "LDX", Ldy => "LDY", Sta => "STA", Stx => "STX", Sty => "STY",
        Tax => "TAX", Tay => "TAY", Txa => "TXA", Tya => "TYA", Tsx => "TSX", Txs => "TXS",
        Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP",
        Adc => "ADC", Sbc => "SBC", And => "AND", Ora => "ORA", Eor => "EOR", Bit => "BIT",
        Asl => "ASL", Lsr => "LSR", Rol => "ROL", Ror => "ROR",
        Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
        Inc => "INC", Inx => "INX", Iny => "INY", Dec => "DEC", Dex => "DEX", Dey => "DEY",
        Bpl => "BPL", Bmi => "BMI", Bvc => "BVC", Bvs => "BVS",
        Bcc => "BCC", Bcs => "BCS", Bne => "BNE", Beq => "BEQ",
        Jmp => "JMP", Jsr => "JSR", Rts => "RTS", Brk => "BRK", Rti => "RTI",
        Sec => "SEC", Clc => "CLC", Sei => "SEI", Cli => "CLI", Sed => "SED", Cld => "CLD", Clv => "CLV",
        Nop => "NOP",
    }
}

/// `PC  OPCODE [OP1 [OP2]]  MNEMONIC   A:xx X:xx Y:xx P:xx SP:xx CYC:nnn`,
/// with `bytes[0]` the opcode and any remaining entries its operand bytes.
pub fn format_trace_line(pc: u16, bytes: &[u8], a: u8, x: u8, y: u8, status: u8, sp: u8, cyc: u64) -> String {
    let opcode = bytes[0];
    let mnemonic = crate::cpu::decode(opcode).map_or("???", |def| mnemonic_name(def.mnemonic));

    let mut encoded = format!("{:02X}", opcode);
    for b in &bytes[1..] {
        encoded.push(' ');
        encoded.push_str(&format!("{:02X}", b));
    }

    format!(
        "{:04X}  {:<8} {:<4}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
        pc, encoded, mnemonic, a, x, y, status, sp, cyc
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lda_immediate_formats_with_one_operand_byte() {
        let line = format_trace_line(0x8000, &[0xA9, 0x42], 0, 0, 0, 0x24, 0xFD, 7);
        assert!(line.starts_with("8000  A9 42"));
        assert!(line.contains("LDA"));
        assert!(line.contains("CYC:7"));
    }

    #[test]
    fn implied_instruction_has_no_operand_bytes() {
        let line = format_trace_line(0x8000, &[0xEA], 0, 0, 0, 0x24, 0xFD, 2);
        assert!(line.starts_with("8000  EA"));
        assert!(line.contains("NOP"));
    }
}
