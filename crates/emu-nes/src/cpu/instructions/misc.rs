use crate::cpu::{AddressingMode, Cpu6502, CpuMemory};

impl<M: CpuMemory> Cpu6502<M> {
    pub(in crate::cpu) fn inc(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.read_operand(operand).wrapping_add(1);
        self.write_operand(operand, value);
        self.update_zn(value);
        0
    }

    pub(in crate::cpu) fn dec(&mut self, mode: AddressingMode) -> u8 {
        let (operand, _) = self.resolve(mode);
        let value = self.read_operand(operand).wrapping_sub(1);
        self.write_operand(operand, value);
        self.update_zn(value);
        0
    }

    pub(in crate::cpu) fn inx(&mut self) -> u8 {
        self.x = self.x.wrapping_add(1);
        self.update_zn(self.x);
        0
    }

    pub(in crate::cpu) fn iny(&mut self) -> u8 {
        self.y = self.y.wrapping_add(1);
        self.update_zn(self.y);
        0
    }

    pub(in crate::cpu) fn dex(&mut self) -> u8 {
        self.x = self.x.wrapping_sub(1);
        self.update_zn(self.x);
        0
    }

    pub(in crate::cpu) fn dey(&mut self) -> u8 {
        self.y = self.y.wrapping_sub(1);
        self.update_zn(self.y);
        0
    }

    pub(in crate::cpu) fn nop(&mut self) -> u8 {
        0
    }
}
