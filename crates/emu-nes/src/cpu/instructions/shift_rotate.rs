use crate::cpu::{AddressingMode, Cpu6502, CpuMemory, StatusFlags};

impl<M: CpuMemory> Cpu6502<M> {
    pub(in crate::cpu) fn asl(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.set_flag(StatusFlags::CARRY, value & 0x80 != 0);
        let result = value << 1;
        self.write_operand(operand, result);
        self.update_zn(result);
        0
    }

    pub(in crate::cpu) fn lsr(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.set_flag(StatusFlags::CARRY, value & 0x01 != 0);
        let result = value >> 1;
        self.write_operand(operand, result);
        self.update_zn(result);
        0
    }

    pub(in crate::cpu) fn rol(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.read_operand(operand);
        let carry_in = self.get_flag(StatusFlags::CARRY) as u8;
        self.set_flag(StatusFlags::CARRY, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.write_operand(operand, result);
        self.update_zn(result);
        0
    }

    pub(in crate::cpu) fn ror(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.read_operand(operand);
        let carry_in = self.get_flag(StatusFlags::CARRY) as u8;
        self.set_flag(StatusFlags::CARRY, value & 0x01 != 0);
        let result = (value >> 1) | (carry_in << 7);
        self.write_operand(operand, result);
        self.update_zn(result);
        0
    }
}
