use crate::cpu::{AddressingMode, Cpu6502, CpuMemory};

impl<M: CpuMemory> Cpu6502<M> {
    pub(in crate::cpu) fn lda(&mut self, mode: AddressingMode) -> u8 {
        let (operand, crossed) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.a = value;
        self.update_zn(value);
        crossed as u8
    }

    pub(in crate::cpu) fn ldx(&mut self, mode: AddressingMode) -> u8 {
        let (operand, crossed) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.x = value;
        self.update_zn(value);
        crossed as u8
    }

    pub(in crate::cpu) fn ldy(&mut self, mode: AddressingMode) -> u8 {
        let (operand, crossed) = self.resolve(mode);
        let value = self.read_operand(operand);
        self.y = value;
        self.update_zn(value);
        crossed as u8
    }

    pub(in crate::cpu) fn sta(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.a;
        self.write_operand(operand, value);
        0
    }

    pub(in crate::cpu) fn stx(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.x;
        self.write_operand(operand, value);
        0
    }

    pub(in crate::cpu) fn sty(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.y;
        self.write_operand(operand, value);
        0
    }
}
