use crate::cpu::{Cpu6502, CpuMemory};

impl<M: CpuMemory> Cpu6502<M> {
    /// All eight branches share this shape: always consume the relative
    /// offset byte, then if `taken`, add +1 cycle (+2 if the branch also
    /// crosses a page).
    pub(in crate::cpu) fn branch(&mut self, taken: bool) -> u8 {
        let offset = self.fetch_byte() as i8;
        if !taken {
            return 0;
        }
        let base = self.pc;
        let target = base.wrapping_add(offset as i16 as u16);
        self.pc = target;
        if base & 0xFF00 != target & 0xFF00 {
            2
        } else {
            1
        }
    }
}
