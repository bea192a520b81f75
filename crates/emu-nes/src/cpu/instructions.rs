//! Instruction dispatch: decode the opcode, resolve its addressing mode, and
//! hand off to the per-family handler. Handlers live in sibling modules,
//! grouped the way the 6502 ISA itself groups them (loads/stores, ALU,
//! shifts, branches, ...).

mod arithmetic;
mod branch;
mod compare;
mod flags;
mod jump;
mod load_store;
mod logic;
mod misc;
mod shift_rotate;
mod stack;
mod transfer;

use super::opcodes::{self, Mnemonic};
use super::{Cpu6502, CpuMemory};
use emu_core::Result;

impl<M: CpuMemory> Cpu6502<M> {
    pub(super) fn execute(&mut self, opcode: u8) -> Result<u8> {
        let def = match opcodes::decode(opcode) {
            Some(def) => def,
            None => {
                self.illegal(opcode);
                return Ok(2);
            }
        };

        let extra = self.dispatch(def.mnemonic, def.mode);
        let total = def.cycles as u64 + extra as u64;
        self.cycles = self.cycles.wrapping_add(total);
        Ok(total as u8)
    }

    fn dispatch(&mut self, mnemonic: Mnemonic, mode: super::AddressingMode) -> u8 {
        use Mnemonic::*;
        match mnemonic {
            Lda => self.lda(mode),
            Ldx => self.ldx(mode),
            Ldy => self.ldy(mode),
            Sta => self.sta(mode),
            Stx => self.stx(mode),
            Sty => self.sty(mode),

            Tax => self.tax(),
            Tay => self.tay(),
            Txa => self.txa(),
            Tya => self.tya(),
            Tsx => self.tsx(),
            Txs => self.txs(),

            Pha => self.pha(),
            Php => self.php(),
            Pla => self.pla(),
            Plp => self.plp(),

            Adc => self.adc(mode),
            Sbc => self.sbc(mode),
            And => self.and(mode),
            Ora => self.ora(mode),
            Eor => self.eor(mode),
            Bit => self.bit(mode),

            Asl => self.asl(mode),
            Lsr => self.lsr(mode),
            Rol => self.rol(mode),
            Ror => self.ror(mode),

            Cmp => self.cmp(mode),
            Cpx => self.cpx(mode),
            Cpy => self.cpy(mode),

            Inc => self.inc(mode),
            Inx => self.inx(),
            Iny => self.iny(),
            Dec => self.dec(mode),
            Dex => self.dex(),
            Dey => self.dey(),

            Bpl => self.branch(!self.get_flag(super::StatusFlags::NEGATIVE)),
            Bmi => self.branch(self.get_flag(super::StatusFlags::NEGATIVE)),
            Bvc => self.branch(!self.get_flag(super::StatusFlags::OVERFLOW)),
            Bvs => self.branch(self.get_flag(super::StatusFlags::OVERFLOW)),
            Bcc => self.branch(!self.get_flag(super::StatusFlags::CARRY)),
            Bcs => self.branch(self.get_flag(super::StatusFlags::CARRY)),
            Bne => self.branch(!self.get_flag(super::StatusFlags::ZERO)),
            Beq => self.branch(self.get_flag(super::StatusFlags::ZERO)),

            Jmp => self.jmp(mode),
            Jsr => self.jsr(),
            Rts => self.rts(),
            Brk => self.brk(),
            Rti => self.rti(),

            Sec => self.sec(),
            Clc => self.clc(),
            Sei => self.sei(),
            Cli => self.cli(),
            Sed => self.sed(),
            Cld => self.cld(),
            Clv => self.clv(),

            Nop => self.nop(),
        }
    }
}
