use crate::cpu::{AddressingMode, Cpu6502, CpuMemory, StatusFlags};

impl<M: CpuMemory> Cpu6502<M> {
    pub(in crate::cpu) fn adc(&mut self, mode: AddressingMode) -> u8 {
        let (operand, crossed) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.add_with_carry(value);
        crossed as u8
    }

    pub(in crate::cpu) fn sbc(&mut self, mode: AddressingMode) -> u8 {
        let (operand, crossed) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.subtract_with_borrow(value);
        crossed as u8
    }

    /// Binary add always drives the flags. In decimal mode the accumulator
    /// result is BCD-corrected afterwards but N/V/Z/C are still derived from
    /// the nibble-carry chain the real NMOS part produces — not from the
    /// corrected byte.
    fn add_with_carry(&mut self, value: u8) {
        let decimal = self.get_flag(StatusFlags::DECIMAL);
        let a = self.a;
        let carry_in = self.get_flag(StatusFlags::CARRY) as u16;

        if decimal {
            let mut al = (a as u16 & 0x0F) + (value as u16 & 0x0F) + carry_in;
            if al > 0x09 {
                al += 0x06;
            }
            let carry_lo = if al > 0x0F { 1 } else { 0 };
            let mut ah = (a as u16 >> 4) + (value as u16 >> 4) + carry_lo;

            let bin_sum = (a as u16).wrapping_add(value as u16).wrapping_add(carry_in);
            self.set_flag(StatusFlags::ZERO, bin_sum & 0xFF == 0);
            self.set_flag(StatusFlags::NEGATIVE, ah & 0x08 != 0);
            let overflow = (a as u16 ^ value as u16) & 0x80 == 0
                && (a as u16 ^ (ah << 4)) & 0x80 != 0;
            self.set_flag(StatusFlags::OVERFLOW, overflow);

            if ah > 0x09 {
                ah += 0x06;
            }
            self.set_flag(StatusFlags::CARRY, ah > 0x0F);
            self.a = (((ah & 0x0F) << 4) | (al & 0x0F)) as u8;
        } else {
            let sum = a as u16 + value as u16 + carry_in;
            let result = sum as u8;
            self.set_flag(StatusFlags::CARRY, sum > 0xFF);
            self.set_flag(StatusFlags::OVERFLOW, !(a ^ value) & (a ^ result) & 0x80 != 0);
            self.a = result;
            self.update_zn(result);
        }
    }

    /// Unlike ADC, SBC's flags are always the binary-subtraction result even
    /// in decimal mode; only the accumulator is decimal-corrected.
    fn subtract_with_borrow(&mut self, value: u8) {
        let decimal = self.get_flag(StatusFlags::DECIMAL);
        let a = self.a;
        let carry_in = self.get_flag(StatusFlags::CARRY) as u16;

        let sum = a as u16 + (!value) as u16 + carry_in;
        let result = sum as u8;
        self.set_flag(StatusFlags::CARRY, sum > 0xFF);
        self.set_flag(StatusFlags::OVERFLOW, (a ^ value) & (a ^ result) & 0x80 != 0);
        self.update_zn(result);

        if decimal {
            let mut al = (a as i16 & 0x0F) - (value as i16 & 0x0F) - (1 - carry_in as i16);
            if al < 0 {
                al = ((al - 6) & 0x0F) - 0x10;
            }
            let mut ah = (a as i16 >> 4) - (value as i16 >> 4) - if al < 0 { 1 } else { 0 };
            if ah < 0 {
                ah -= 6;
            }
            self.a = (((ah << 4) & 0xF0) | (al & 0x0F)) as u8;
        } else {
            self.a = result;
        }
    }
}
