use crate::cpu::{AddressingMode, Cpu6502, CpuMemory, StatusFlags};

impl<M: CpuMemory> Cpu6502<M> {
    pub(in crate::cpu) fn and(&mut self, mode: AddressingMode) -> u8 {
        let (operand, crossed) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.a &= value;
        self.update_zn(self.a);
        crossed as u8
    }

    pub(in crate::cpu) fn ora(&mut self, mode: AddressingMode) -> u8 {
        let (operand, crossed) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.a |= value;
        self.update_zn(self.a);
        crossed as u8
    }

    pub(in crate::cpu) fn eor(&mut self, mode: AddressingMode) -> u8 {
        let (operand, crossed) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.a ^= value;
        self.update_zn(self.a);
        crossed as u8
    }

    /// BIT sets Z from `A & value`, but N and V come from bits 7 and 6 of
    /// the memory operand itself, not from the AND result.
    pub(in crate::cpu) fn bit(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.set_flag(StatusFlags::ZERO, (self.a & value) == 0);
        self.set_flag(StatusFlags::NEGATIVE, value & 0x80 != 0);
        self.set_flag(StatusFlags::OVERFLOW, value & 0x40 != 0);
        0
    }
}
