use crate::cpu::{Cpu6502, CpuMemory};

impl<M: CpuMemory> Cpu6502<M> {
    pub(in crate::cpu) fn tax(&mut self) -> u8 {
        self.x = self.a;
        self.update_zn(self.x);
        0
    }

    pub(in crate::cpu) fn tay(&mut self) -> u8 {
        self.y = self.a;
        self.update_zn(self.y);
        0
    }

    pub(in crate::cpu) fn txa(&mut self) -> u8 {
        self.a = self.x;
        self.update_zn(self.a);
        0
    }

    pub(in crate::cpu) fn tya(&mut self) -> u8 {
        self.a = self.y;
        self.update_zn(self.a);
        0
    }

    pub(in crate::cpu) fn tsx(&mut self) -> u8 {
        self.x = self.sp;
        self.update_zn(self.x);
        0
    }

    /// TXS does not touch any flags, unlike every other transfer.
    pub(in crate::cpu) fn txs(&mut self) -> u8 {
        self.sp = self.x;
        0
    }
}
