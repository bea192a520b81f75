use crate::cpu::{Cpu6502, CpuMemory, StatusFlags};

impl<M: CpuMemory> Cpu6502<M> {
    pub(in crate::cpu) fn sec(&mut self) -> u8 {
        self.set_flag(StatusFlags::CARRY, true);
        0
    }

    pub(in crate::cpu) fn clc(&mut self) -> u8 {
        self.set_flag(StatusFlags::CARRY, false);
        0
    }

    pub(in crate::cpu) fn sei(&mut self) -> u8 {
        self.set_flag(StatusFlags::INTERRUPT, true);
        0
    }

    pub(in crate::cpu) fn cli(&mut self) -> u8 {
        self.set_flag(StatusFlags::INTERRUPT, false);
        0
    }

    pub(in crate::cpu) fn sed(&mut self) -> u8 {
        self.set_flag(StatusFlags::DECIMAL, true);
        0
    }

    pub(in crate::cpu) fn cld(&mut self) -> u8 {
        self.set_flag(StatusFlags::DECIMAL, false);
        0
    }

    pub(in crate::cpu) fn clv(&mut self) -> u8 {
        self.set_flag(StatusFlags::OVERFLOW, false);
        0
    }
}
