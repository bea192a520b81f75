//! 6502 CPU implementation
//!
//! Generic over a `CpuMemory` implementation so the same interpreter drives
//! either a flat 64 KiB RAM (see `crate::flatbus`) or the full NES bus.

mod instructions;
mod opcodes;

use bitflags::bitflags;
use emu_core::{Cpu as CpuTrait, Result};
use tracing::{debug, warn};

pub use opcodes::{decode, AddressingMode, Mnemonic, OpcodeDef};

bitflags! {
    /// CPU status flags: N V - B D I Z C
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY     = 0b0000_0001; // C
        const ZERO      = 0b0000_0010; // Z
        const INTERRUPT = 0b0000_0100; // I (interrupt disable)
        const DECIMAL   = 0b0000_1000; // D (BCD mode)
        const BREAK     = 0b0001_0000; // B — only meaningful in a stacked copy
        const UNUSED    = 0b0010_0000; // always 1 while live in the CPU
        const OVERFLOW  = 0b0100_0000; // V
        const NEGATIVE  = 0b1000_0000; // N
    }
}

/// Memory interface for the CPU
///
/// The CPU reads/writes through this trait without caring about the actual
/// backing store (flat RAM, memory-mapped IO, mirroring, etc).
pub trait CpuMemory {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);

    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// Where an addressing mode resolved to: a memory address, the accumulator,
/// or nothing (implied operand).
#[derive(Debug, Clone, Copy)]
pub(crate) enum Operand {
    Implied,
    Accumulator,
    Address(u16),
}

impl Operand {
    pub(crate) fn address(self) -> u16 {
        match self {
            Operand::Address(a) => a,
            _ => panic!("instruction required an address-mode operand"),
        }
    }
}

/// 6502 CPU state and interpreter.
pub struct Cpu6502<M: CpuMemory> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    /// Offset into page $01; all stack accesses target `0x0100 + sp`.
    pub sp: u8,
    pub pc: u16,
    pub status: StatusFlags,
    /// Total cycles executed since `init`, monotonically increasing.
    pub cycles: u64,
    /// Set when an illegal opcode is dispatched. Sticky: `step` becomes a
    /// no-op once set, mirroring the spec's single `running -> halted`
    /// transition.
    pub halted: bool,
    memory: M,
}

impl<M: CpuMemory> Cpu6502<M> {
    /// `init`: zeroed registers, status = $24 (I + unused), bus installed.
    pub fn new(memory: M) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: StatusFlags::INTERRUPT | StatusFlags::UNUSED,
            cycles: 0,
            halted: false,
            memory,
        }
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    #[inline]
    pub fn set_flag(&mut self, flag: StatusFlags, value: bool) {
        self.status.set(flag, value);
    }

    #[inline]
    pub fn get_flag(&self, flag: StatusFlags) -> bool {
        self.status.contains(flag)
    }

    #[inline]
    pub(crate) fn update_zn(&mut self, value: u8) {
        self.set_flag(StatusFlags::ZERO, value == 0);
        self.set_flag(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    #[inline]
    fn push(&mut self, value: u8) {
        self.memory.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    #[inline]
    fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push((value & 0xFF) as u8);
    }

    #[inline]
    fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(0x0100 | self.sp as u16)
    }

    #[inline]
    fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    #[inline]
    fn fetch_byte(&mut self) -> u8 {
        let byte = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    #[inline]
    fn fetch_word(&mut self) -> u16 {
        let word = self.memory.read_word(self.pc);
        self.pc = self.pc.wrapping_add(2);
        word
    }

    // -- Addressing mode helpers --------------------------------------
    // Each advances `pc` past its operand bytes. Indexed/indirect-indexed
    // helpers return whether the indexed result crossed a page, as a local
    // value rather than CPU-struct scratch (see SPEC_FULL.md design notes).

    fn addr_immediate(&mut self) -> u16 {
        let addr = self.pc;
        self.pc = self.pc.wrapping_add(1);
        addr
    }

    fn addr_zero_page(&mut self) -> u16 {
        self.fetch_byte() as u16
    }

    fn addr_zero_page_x(&mut self) -> u16 {
        self.fetch_byte().wrapping_add(self.x) as u16
    }

    fn addr_zero_page_y(&mut self) -> u16 {
        self.fetch_byte().wrapping_add(self.y) as u16
    }

    fn addr_absolute(&mut self) -> u16 {
        self.fetch_word()
    }

    fn addr_absolute_x(&mut self) -> (u16, bool) {
        let base = self.fetch_word();
        let addr = base.wrapping_add(self.x as u16);
        (addr, (base & 0xFF00) != (addr & 0xFF00))
    }

    fn addr_absolute_y(&mut self) -> (u16, bool) {
        let base = self.fetch_word();
        let addr = base.wrapping_add(self.y as u16);
        (addr, (base & 0xFF00) != (addr & 0xFF00))
    }

    /// JMP-indirect only: the page-wrap bug. If the pointer's low byte is
    /// $FF, the high byte of the target is fetched from the start of the
    /// same page instead of the next one.
    fn addr_indirect(&mut self) -> u16 {
        let ptr = self.fetch_word();
        if ptr & 0x00FF == 0x00FF {
            let lo = self.memory.read(ptr) as u16;
            let hi = self.memory.read(ptr & 0xFF00) as u16;
            (hi << 8) | lo
        } else {
            self.memory.read_word(ptr)
        }
    }

    fn addr_indexed_indirect(&mut self) -> u16 {
        let ptr = self.fetch_byte().wrapping_add(self.x);
        let lo = self.memory.read(ptr as u16) as u16;
        let hi = self.memory.read(ptr.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    fn addr_indirect_indexed(&mut self) -> (u16, bool) {
        let ptr = self.fetch_byte();
        let lo = self.memory.read(ptr as u16) as u16;
        let hi = self.memory.read(ptr.wrapping_add(1) as u16) as u16;
        let base = (hi << 8) | lo;
        let addr = base.wrapping_add(self.y as u16);
        (addr, (base & 0xFF00) != (addr & 0xFF00))
    }

    /// Resolve an addressing mode to an operand, reporting whether an
    /// indexed computation crossed a page boundary. `Relative` is handled
    /// separately by the branch instructions, which need the raw offset.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> (Operand, bool) {
        use AddressingMode::*;
        match mode {
            Implied => (Operand::Implied, false),
            Accumulator => (Operand::Accumulator, false),
            Immediate => (Operand::Address(self.addr_immediate()), false),
            ZeroPage => (Operand::Address(self.addr_zero_page()), false),
            ZeroPageX => (Operand::Address(self.addr_zero_page_x()), false),
            ZeroPageY => (Operand::Address(self.addr_zero_page_y()), false),
            Absolute => (Operand::Address(self.addr_absolute()), false),
            AbsoluteX => {
                let (addr, crossed) = self.addr_absolute_x();
                (Operand::Address(addr), crossed)
            }
            AbsoluteY => {
                let (addr, crossed) = self.addr_absolute_y();
                (Operand::Address(addr), crossed)
            }
            Indirect => (Operand::Address(self.addr_indirect()), false),
            IndexedIndirect => (Operand::Address(self.addr_indexed_indirect()), false),
            IndirectIndexed => {
                let (addr, crossed) = self.addr_indirect_indexed();
                (Operand::Address(addr), crossed)
            }
            Relative => unreachable!("branches read their offset directly"),
        }
    }

    fn read_operand(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::Accumulator => self.a,
            Operand::Address(addr) => self.memory.read(addr),
            Operand::Implied => unreachable!("no operand to read"),
        }
    }

    fn write_operand(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Accumulator => self.a = value,
            Operand::Address(addr) => self.memory.write(addr, value),
            Operand::Implied => unreachable!("no operand to write"),
        }
    }

    /// `reset`: load PC from the reset vector, S = $FD, force I, +7 cycles.
    /// Does not touch A/X/Y/other flags — this is a hardware reset, not an
    /// interrupt, and the prior PC/status are not saved.
    pub fn reset(&mut self) {
        self.pc = self.memory.read_word(0xFFFC);
        self.sp = 0xFD;
        self.status.insert(StatusFlags::INTERRUPT);
        self.cycles = self.cycles.wrapping_add(7);
        self.halted = false;
        debug!(pc = format_args!("${:04X}", self.pc), "cpu reset");
    }

    fn enter_interrupt(&mut self, vector: u16) {
        self.push_word(self.pc);
        let mut pushed = self.status;
        pushed.remove(StatusFlags::BREAK);
        pushed.insert(StatusFlags::UNUSED);
        self.push(pushed.bits());
        self.status.insert(StatusFlags::INTERRUPT);
        self.pc = self.memory.read_word(vector);
        self.cycles = self.cycles.wrapping_add(7);
    }

    /// Maskable interrupt request: ignored while I=1.
    pub fn irq(&mut self) {
        if self.halted || self.get_flag(StatusFlags::INTERRUPT) {
            return;
        }
        debug!(pc = format_args!("${:04X}", self.pc), "irq entry");
        self.enter_interrupt(0xFFFE);
    }

    /// Non-maskable interrupt: unconditional, vector at $FFFA/$FFFB.
    pub fn nmi(&mut self) {
        if self.halted {
            return;
        }
        debug!(pc = format_args!("${:04X}", self.pc), "nmi entry");
        self.enter_interrupt(0xFFFA);
    }

    /// Execute one instruction, returning the cycles it consumed.
    pub fn step(&mut self) -> Result<u8> {
        if self.halted {
            return Ok(0);
        }
        let before = self.cycles;
        let opcode = self.fetch_byte();
        self.execute(opcode)?;
        Ok((self.cycles - before) as u8)
    }

    /// Format a trace line for the instruction about to execute, with
    /// register state sampled before it runs. Peeks bytes at `pc` without
    /// advancing it.
    pub fn trace_line(&mut self) -> String {
        let pc = self.pc;
        let opcode = self.memory.read(pc);
        let len = opcodes::decode(opcode).map_or(0, |def| crate::trace::operand_len(def.mode));
        let mut bytes = vec![opcode];
        for i in 0..len {
            bytes.push(self.memory.read(pc.wrapping_add(1 + i as u16)));
        }
        crate::trace::format_trace_line(pc, &bytes, self.a, self.x, self.y, self.status.bits(), self.sp, self.cycles)
    }
}

impl<M: CpuMemory> CpuTrait for Cpu6502<M> {
    fn reset(&mut self) {
        Cpu6502::reset(self);
    }

    fn step(&mut self) -> Result<u8> {
        Cpu6502::step(self)
    }

    fn pc(&self) -> u16 {
        self.pc
    }

    fn sp(&self) -> u8 {
        self.sp
    }

    fn a(&self) -> u8 {
        self.a
    }

    fn x(&self) -> u8 {
        self.x
    }

    fn y(&self) -> u8 {
        self.y
    }

    fn status(&self) -> u8 {
        self.status.bits()
    }
}

fn trap(pc: u16, opcode: u8) {
    warn!(pc = format_args!("${:04X}", pc), opcode = format_args!("${:02X}", opcode), "illegal opcode trapped");
}

impl<M: CpuMemory> Cpu6502<M> {
    pub(crate) fn illegal(&mut self, opcode: u8) {
        trap(self.pc.wrapping_sub(1), opcode);
        self.halted = true;
        self.cycles = self.cycles.wrapping_add(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestMemory {
        ram: Vec<u8>,
    }

    impl TestMemory {
        fn new() -> Self {
            Self { ram: vec![0; 0x10000] }
        }
    }

    impl CpuMemory for TestMemory {
        fn read(&mut self, addr: u16) -> u8 {
            self.ram[addr as usize]
        }

        fn write(&mut self, addr: u16, value: u8) {
            self.ram[addr as usize] = value;
        }
    }

    fn cpu_with(program: &[(u16, u8)]) -> Cpu6502<TestMemory> {
        let mut mem = TestMemory::new();
        for &(addr, value) in program {
            mem.ram[addr as usize] = value;
        }
        let mut cpu = Cpu6502::new(mem);
        cpu.pc = 0;
        cpu
    }

    #[test]
    fn init_state_matches_power_on() {
        let cpu = cpu_with(&[]);
        assert_eq!(cpu.a, 0);
        assert_eq!(cpu.status.bits(), 0x24);
        assert!(!cpu.halted);
    }

    #[test]
    fn reset_sets_sp_and_interrupt_disable_without_touching_registers() {
        let mut cpu = cpu_with(&[(0xFFFC, 0x00), (0xFFFD, 0x80)]);
        cpu.a = 0x77;
        cpu.reset();
        assert_eq!(cpu.pc, 0x8000);
        assert_eq!(cpu.sp, 0xFD);
        assert!(cpu.get_flag(StatusFlags::INTERRUPT));
        assert_eq!(cpu.a, 0x77);
        assert_eq!(cpu.cycles, 7);
    }

    #[test]
    fn lda_immediate_sets_flags_and_charges_two_cycles() {
        let mut cpu = cpu_with(&[(0, 0xA9), (1, 0x42)]);
        let cycles = cpu.step().unwrap();
        assert_eq!(cpu.a, 0x42);
        assert_eq!(cpu.pc, 2);
        assert_eq!(cycles, 2);
        assert!(!cpu.get_flag(StatusFlags::ZERO));
        assert!(!cpu.get_flag(StatusFlags::NEGATIVE));
    }

    #[test]
    fn status_bit5_always_set_bit4_never_set() {
        let mut cpu = cpu_with(&[(0, 0x38)]); // SEC
        cpu.step().unwrap();
        assert_eq!(cpu.status.bits() & 0x20, 0x20);
        assert_eq!(cpu.status.bits() & 0x10, 0x00);
    }

    #[test]
    fn illegal_opcode_halts_cpu() {
        let mut cpu = cpu_with(&[(0, 0x02)]); // KIL/JAM, illegal
        cpu.step().unwrap();
        assert!(cpu.halted);
        let before = cpu.pc;
        cpu.step().unwrap();
        assert_eq!(cpu.pc, before, "stepping a halted CPU is a no-op");
    }

    #[test]
    fn indexed_load_charges_extra_cycle_only_on_page_cross() {
        let mut cpu = cpu_with(&[
            (0, 0xBD), (1, 0xFF), (2, 0x10), // LDA $10FF,X
        ]);
        cpu.x = 0;
        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 4);

        let mut cpu = cpu_with(&[(0, 0xBD), (1, 0xFF), (2, 0x10)]);
        cpu.x = 1;
        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 5);
    }

    #[test]
    fn jmp_indirect_page_wrap_bug() {
        let mut cpu = cpu_with(&[
            (0, 0x6C), (1, 0xFF), (2, 0x10), // JMP ($10FF)
            (0x10FF, 0x80), (0x1000, 0x06), (0x1100, 0xFF),
        ]);
        cpu.step().unwrap();
        assert_eq!(cpu.pc, 0x0680);
    }

    #[test]
    fn jsr_rts_round_trip() {
        let mut cpu = cpu_with(&[
            (0x0600, 0x20), (0x0601, 0x00), (0x0602, 0x07), // JSR $0700
            (0x0700, 0x60), // RTS
        ]);
        cpu.pc = 0x0600;
        let sp_before = cpu.sp;
        cpu.step().unwrap(); // JSR
        assert_eq!(cpu.pc, 0x0700);
        assert_eq!(cpu.sp, sp_before.wrapping_sub(2));
        cpu.step().unwrap(); // RTS
        assert_eq!(cpu.pc, 0x0603);
        assert_eq!(cpu.sp, sp_before);
    }

    #[test]
    fn brk_pushes_b_and_unused_then_jumps_to_irq_vector() {
        let mut cpu = cpu_with(&[
            (0x0601, 0x00), // BRK
            (0xFFFE, 0x00), (0xFFFF, 0x07),
        ]);
        cpu.pc = 0x0601;
        cpu.set_flag(StatusFlags::INTERRUPT, false);
        cpu.step().unwrap();
        assert_eq!(cpu.pc, 0x0700);
        assert!(cpu.get_flag(StatusFlags::INTERRUPT));
        let pushed_status = cpu.memory.read(0x0100 | cpu.sp.wrapping_add(1) as u16);
        assert_eq!(pushed_status & 0x30, 0x30);
    }
}
