//! The System: CPU-addressable bus, internal RAM, controller ports, and the
//! OAM-DMA latch. Owns the PPU and cartridge and multiplexes CPU addresses
//! across them.

use crate::apu::Apu;
use crate::cartridge::Cartridge;
use crate::cpu::CpuMemory;
use crate::ppu::Ppu;
use emu_core::{Controller, EmulatorContext, MemoryBus, MemoryObserver};

pub struct NesBus {
    ram: [u8; 0x0800],
    ppu: Ppu,
    apu: Apu,
    controller1: Controller,
    controller2: Controller,
    cartridge: Option<Cartridge>,

    /// Set by a PPUCTRL write whose NMI-enable bit re-asserts while
    /// `nmi_occurred` is still latched, or by a PPU tick crossing into
    /// VBlank with NMI output enabled. Drained once per CPU step by the
    /// owning `NesSystem`.
    pending_nmi: bool,

    /// Extra (cpu_cycles, ppu_ticks) charged by an OAM-DMA copy, drained
    /// once per CPU step by the owning `NesSystem`.
    dma_stall: (u64, u64),

    observers: Vec<Box<dyn MemoryObserver>>,
    context: EmulatorContext,
}

impl NesBus {
    pub fn new() -> Self {
        Self {
            ram: [0; 0x0800],
            ppu: Ppu::new(),
            apu: Apu::new(),
            controller1: Controller::new(),
            controller2: Controller::new(),
            cartridge: None,
            pending_nmi: false,
            dma_stall: (0, 0),
            observers: Vec::new(),
            context: EmulatorContext { frame: 0, cycle: 0, pc: 0, last_input: 0 },
        }
    }

    pub fn load_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    pub fn controller1(&mut self) -> &mut Controller {
        &mut self.controller1
    }

    pub fn controller2(&mut self) -> &mut Controller {
        &mut self.controller2
    }

    /// Advance the PPU by one dot, latching an NMI if this tick crosses
    /// into VBlank with NMI output enabled.
    pub fn tick_ppu(&mut self) {
        let Self { ppu, cartridge, pending_nmi, .. } = self;
        let cart = cartridge.as_mut().expect("cartridge must be loaded before ticking the PPU");
        if ppu.step(cart) {
            *pending_nmi = true;
        }
    }

    /// Drain and clear the pending-NMI flag. The caller is responsible for
    /// invoking the CPU's NMI entry sequence when this returns `true`.
    pub fn take_pending_nmi(&mut self) -> bool {
        std::mem::take(&mut self.pending_nmi)
    }

    /// Drain and clear the (cpu_cycles, ppu_ticks) charged by a completed
    /// OAM-DMA copy since the last call.
    pub fn take_dma_stall(&mut self) -> (u64, u64) {
        std::mem::take(&mut self.dma_stall)
    }

    fn run_oam_dma(&mut self, page: u8) {
        for i in 0..256u16 {
            let src = ((page as u16) << 8) | i;
            let byte = self.read_internal(src);
            self.ppu.oam_dma_write(i as u8, byte);
        }
        self.dma_stall.0 += 514;
        self.dma_stall.1 += 1542;
    }

    fn read_internal(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => {
                let Self { ppu, cartridge, .. } = self;
                let cart = cartridge.as_mut().expect("cartridge must be loaded to read PPU registers");
                ppu.read_register(addr, cart)
            }
            0x4016 => self.controller1.read() | 0x40,
            0x4017 => self.controller2.read() | 0x40,
            0x4000..=0x4015 | 0x4018..=0x401F => self.apu.read_register(addr),
            // No PRG RAM, no expansion hardware: $4020-$5FFF and $6000-$7FFF
            // read as 0 rather than falling through to the PRG-ROM window.
            0x4020..=0x7FFF => 0,
            0x8000..=0xFFFF => self.cartridge.as_ref().map_or(0, |c| c.read_prg(addr)),
            _ => 0,
        }
    }

    fn write_internal(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = value,
            0x2000..=0x3FFF => {
                let Self { ppu, cartridge, pending_nmi, .. } = self;
                let cart = cartridge.as_mut().expect("cartridge must be loaded to write PPU registers");
                if ppu.write_register(addr, value, cart) {
                    *pending_nmi = true;
                }
            }
            0x4014 => self.run_oam_dma(value),
            0x4016 => {
                self.controller1.write(value);
                self.controller2.write(value);
            }
            0x4000..=0x4015 | 0x4017..=0x401F => self.apu.write_register(addr, value),
            0x4020..=0xFFFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.write_prg(addr, value);
                }
            }
            _ => {}
        }
    }
}

impl Default for NesBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuMemory for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        let value = self.read_internal(addr);
        let context = self.context;
        for observer in &mut self.observers {
            observer.on_read(addr, value, &context);
        }
        value
    }

    fn write(&mut self, addr: u16, value: u8) {
        let old_value = self.read_internal(addr);
        self.write_internal(addr, value);
        let context = self.context;
        for observer in &mut self.observers {
            observer.on_write(addr, old_value, value, &context);
        }
    }
}

impl MemoryBus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        CpuMemory::read(self, addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        CpuMemory::write(self, addr, value)
    }

    fn attach_observer(&mut self, observer: Box<dyn MemoryObserver>) {
        self.observers.push(observer);
    }

    fn clear_observers(&mut self) {
        self.observers.clear();
    }

    fn context(&self) -> EmulatorContext {
        self.context
    }

    fn update_context(&mut self, context: EmulatorContext) {
        self.context = context;
    }
}
