use crate::cpu::{Cpu6502, CpuMemory, StatusFlags};

impl<M: CpuMemory> Cpu6502<M> {
    pub(in crate::cpu) fn pha(&mut self) -> u8 {
        let value = self.a;
        self.push(value);
        0
    }

    /// PHP always pushes with B and unused set, regardless of their live state.
    pub(in crate::cpu) fn php(&mut self) -> u8 {
        let mut pushed = self.status;
        pushed.insert(StatusFlags::BREAK);
        pushed.insert(StatusFlags::UNUSED);
        self.push(pushed.bits());
        0
    }

    pub(in crate::cpu) fn pla(&mut self) -> u8 {
        let value = self.pop();
        self.a = value;
        self.update_zn(value);
        0
    }

    /// PLP discards the popped B bit and forces unused back to 1.
    pub(in crate::cpu) fn plp(&mut self) -> u8 {
        let mut popped = StatusFlags::from_bits_truncate(self.pop());
        popped.remove(StatusFlags::BREAK);
        popped.insert(StatusFlags::UNUSED);
        self.status = popped;
        0
    }
}
