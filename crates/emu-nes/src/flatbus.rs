//! A flat 64 KiB RAM bus for driving the CPU standalone, independent of the
//! NES bus — used by the standalone 6502 trace/test driver contract (see
//! [`crate::trace`]).

use crate::cpu::CpuMemory;
use emu_core::{EmulatorError, Result};

pub struct FlatBus {
    ram: [u8; 0x10000],
}

impl FlatBus {
    pub fn new() -> Self {
        Self { ram: [0; 0x10000] }
    }

    /// Copy `data` into RAM starting at `base_addr`. Rejects an image that
    /// would run past the end of the 64 KiB address space.
    pub fn load(&mut self, base_addr: u16, data: &[u8]) -> Result<()> {
        let end = base_addr as usize + data.len();
        if end > self.ram.len() {
            return Err(EmulatorError::Other(format!(
                "image of {} bytes at ${:04X} exceeds the 64 KiB address space",
                data.len(),
                base_addr
            )));
        }
        self.ram[base_addr as usize..end].copy_from_slice(data);
        Ok(())
    }

    /// Point the reset vector ($FFFC/$FFFD) at `addr`.
    pub fn set_reset_vector(&mut self, addr: u16) {
        self.ram[0xFFFC] = (addr & 0xFF) as u8;
        self.ram[0xFFFD] = (addr >> 8) as u8;
    }
}

impl Default for FlatBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuMemory for FlatBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }
}
