use crate::cpu::{AddressingMode, Cpu6502, CpuMemory, StatusFlags};

impl<M: CpuMemory> Cpu6502<M> {
    fn compare(&mut self, register: u8, value: u8) {
        let result = register.wrapping_sub(value);
        self.set_flag(StatusFlags::CARRY, register >= value);
        self.update_zn(result);
    }

    pub(in crate::cpu) fn cmp(&mut self, mode: AddressingMode) -> u8 {
        let (operand, crossed) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.compare(self.a, value);
        crossed as u8
    }

    pub(in crate::cpu) fn cpx(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.compare(self.x, value);
        0
    }

    pub(in crate::cpu) fn cpy(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.compare(self.y, value);
        0
    }
}
