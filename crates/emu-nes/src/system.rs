//! Top-level NES system: ties the CPU, bus, PPU and cartridge together and
//! drives one frame at a time at the 3:1 PPU:CPU clock ratio.

use crate::bus::NesBus;
use crate::cartridge::{Cartridge, Mirroring};
use crate::cpu::{Cpu6502, CpuMemory};
use crate::ppu::Ppu;
use emu_core::{Button, Controller, Cpu as CpuTrait, Result};
use std::path::Path;

pub struct NesSystem {
    cpu: Cpu6502<NesBus>,
}

impl NesSystem {
    /// Load a cartridge from an iNES file and reset the CPU.
    pub fn new(rom_path: &Path) -> Result<Self> {
        let cartridge = Cartridge::load(rom_path)?;
        Self::from_cartridge(cartridge)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(path.as_ref())
    }

    /// Build a system from a raw PRG image with no CHR-ROM (CHR-RAM),
    /// bypassing file IO. Used by tests that only exercise the CPU/bus.
    pub fn with_prg_rom(prg_rom: Vec<u8>) -> Result<Self> {
        let cartridge = Cartridge::from_parts(prg_rom, vec![], Mirroring::Horizontal);
        Self::from_cartridge(cartridge)
    }

    fn from_cartridge(cartridge: Cartridge) -> Result<Self> {
        let mut bus = NesBus::new();
        bus.load_cartridge(cartridge);
        let mut cpu = Cpu6502::new(bus);
        cpu.reset();
        Ok(Self { cpu })
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Step one CPU instruction, then the PPU three ticks per CPU cycle
    /// consumed (plus whatever extra ticks an OAM-DMA stall charged),
    /// sampling NMI once after those ticks complete.
    pub fn step(&mut self) -> Result<u8> {
        let cycles = self.cpu.step()?;

        let (extra_cpu_cycles, extra_ppu_ticks) = self.cpu.memory_mut().take_dma_stall();
        self.cpu.cycles = self.cpu.cycles.wrapping_add(extra_cpu_cycles);

        let ppu_ticks = cycles as u64 * 3 + extra_ppu_ticks;
        for _ in 0..ppu_ticks {
            self.cpu.memory_mut().tick_ppu();
        }

        if self.cpu.memory_mut().take_pending_nmi() {
            self.cpu.nmi();
        }

        Ok(cycles)
    }

    /// Step instructions until at least `cycles` CPU cycles have elapsed.
    pub fn run_cycles(&mut self, cycles: u64) -> Result<()> {
        let target = self.cpu.cycles + cycles;
        while self.cpu.cycles < target {
            self.step()?;
        }
        Ok(())
    }

    /// Runs until the PPU's own frame counter advances.
    pub fn step_frame(&mut self) -> Result<()> {
        let start_frame = self.cpu.memory().ppu().frame();
        while self.cpu.memory().ppu().frame() == start_frame {
            self.step()?;
        }
        Ok(())
    }

    pub fn frame(&self) -> u64 {
        self.cpu.memory().ppu().frame()
    }

    pub fn cpu(&self) -> &Cpu6502<NesBus> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu6502<NesBus> {
        &mut self.cpu
    }

    pub fn read_memory(&mut self, addr: u16) -> u8 {
        CpuMemory::read(self.cpu.memory_mut(), addr)
    }

    pub fn framebuffer(&self) -> &[u32] {
        self.cpu.memory().ppu().framebuffer()
    }

    pub fn ppu(&self) -> &Ppu {
        self.cpu.memory().ppu()
    }

    pub fn controller1(&mut self) -> &mut Controller {
        self.cpu.memory_mut().controller1()
    }

    pub fn controller2(&mut self) -> &mut Controller {
        self.cpu.memory_mut().controller2()
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.controller1().state().set(button, pressed);
    }

    pub fn press_button(&mut self, button: Button) {
        self.controller1().state().press(button);
    }

    pub fn release_button(&mut self, button: Button) {
        self.controller1().state().release(button);
    }
}
