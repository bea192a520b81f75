//! NES core: 6502 CPU, 2C02 PPU, system bus, and NROM cartridge loading.
//!
//! APU register space is addressable but stubbed (see [`apu`]) — audio
//! synthesis is out of scope.

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod flatbus;
pub mod palette;
pub mod ppu;
pub mod system;
pub mod trace;

pub use bus::NesBus;
pub use cartridge::Cartridge;
pub use cpu::Cpu6502;
pub use flatbus::FlatBus;
pub use palette::NES_PALETTE;
pub use ppu::Ppu;
pub use system::NesSystem;
