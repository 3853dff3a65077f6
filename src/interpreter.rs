/// # interpreter
///
/// One call to `step` is one CHIP-8 instruction: fetch the big-endian word at
/// PC, move PC on by two, then hand the decoded fields to the handler for the
/// instruction's family. Families 0x8 (ALU) and 0xF (misc) pick a second
/// handler from their low bits.
///
/// Hosts are expected to:
///  - check `is_awaiting_key` before each step, and feed `key_pressed` while
///    it's true
///  - call `tick_timers` at 60Hz, whatever the instruction rate is
///  - read `framebuffer` whenever they want to paint
///  - beep while `sound_active`
use crate::error::{Chip8Error, Result};
use crate::framebuffer::Framebuffer;
use crate::instruction::Instruction;
use crate::latch::InputLatch;
use crate::memory::{AddressSpace, MemoryMap, ADDRESS_MASK, FONT_ADDR, FONT_GLYPH_BYTES};
use crate::random::RandomSource;
use crate::registers::{RegisterFile, VF};
use crate::stack::CallStack;
use log::{debug, trace, warn};
use std::io;

type Handler = fn(&mut Chip8Interpreter, Instruction) -> Result<()>;

/// handlers indexed by the top nibble of the opcode
const FAMILIES: [Handler; 16] = [
    Chip8Interpreter::sys,
    Chip8Interpreter::jp,
    Chip8Interpreter::call,
    Chip8Interpreter::se_byte,
    Chip8Interpreter::sne_byte,
    Chip8Interpreter::se_reg,
    Chip8Interpreter::ld_byte,
    Chip8Interpreter::add_byte,
    Chip8Interpreter::alu,
    Chip8Interpreter::sne_reg,
    Chip8Interpreter::ld_i,
    Chip8Interpreter::jp_v0,
    Chip8Interpreter::rnd,
    Chip8Interpreter::drw,
    Chip8Interpreter::skp,
    Chip8Interpreter::misc,
];

pub struct Chip8Interpreter {
    memory: AddressSpace,
    registers: RegisterFile,
    stack: CallStack,
    framebuffer: Framebuffer,
    random: RandomSource,
    latch: InputLatch,
}

impl Chip8Interpreter {
    /// a fresh machine: font loaded, PC at 0x200, RNG seeded from the clock
    pub fn new() -> Self {
        Self::with_random(RandomSource::new())
    }

    /// same as `new`, but Cxnn produces a repeatable sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_random(RandomSource::with_seed(seed))
    }

    fn with_random(random: RandomSource) -> Self {
        Chip8Interpreter {
            memory: AddressSpace::new(),
            registers: RegisterFile::new(),
            stack: CallStack::new(),
            framebuffer: Framebuffer::new(),
            random,
            latch: InputLatch::Running,
        }
    }

    /// load a chip8 program at 0x200, dropping whatever doesn't fit
    pub fn load_program(&mut self, program: &[u8]) -> usize {
        self.memory.load_program(program)
    }

    /// load a chip8 program from a file or whatever
    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        Ok(self.memory.load_program_from(reader)?)
    }

    /// execute one instruction. a no-op while waiting on a key
    pub fn step(&mut self) -> Result<()> {
        if self.latch.is_awaiting_key() {
            return Ok(());
        }
        let pc = self.registers.pc;
        let inst = Instruction::decode(self.memory.get_word(pc));
        trace!("{:#05x}: {:04x}", pc, inst.opcode);
        self.registers.advance_pc();
        FAMILIES[inst.family as usize](self, inst)
    }

    /// count DT and ST down; the host calls this at 60Hz
    pub fn tick_timers(&mut self) {
        self.registers.tick_timers();
    }

    /// deliver a key press. only does anything while Fx0A is waiting
    pub fn key_pressed(&mut self, key: u8) {
        if let Some(r) = self.latch.release() {
            debug!("key {:x} -> V{:X}", key & 0xf, r);
            self.registers.v[r as usize] = key & 0xf;
        }
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.latch.is_awaiting_key()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// should the host be beeping?
    pub fn sound_active(&self) -> bool {
        self.registers.sound_timer > 0
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    /// address of the instruction currently executing
    fn current_pc(&self) -> u16 {
        self.registers.pc.wrapping_sub(2) & ADDRESS_MASK
    }

    fn skip_if(&mut self, cond: bool) {
        if cond {
            self.registers.advance_pc();
        }
    }

    // 0nnn, 00E0, 00EE
    fn sys(&mut self, inst: Instruction) -> Result<()> {
        match inst.nn {
            0xee => {
                let pc = self.current_pc();
                let ret = self
                    .stack
                    .pop()
                    .ok_or(Chip8Error::StackUnderflow { pc })?;
                debug!("{:#05x}: return to {:#05x}", pc, ret);
                self.registers.sp = self.stack.depth() as u8;
                self.registers.set_pc(ret);
            }
            0xe0 => self.framebuffer.clear(),
            _ => warn!("machine code call {:04x} ignored", inst.opcode),
        }
        Ok(())
    }

    fn jp(&mut self, inst: Instruction) -> Result<()> {
        self.registers.set_pc(inst.nnn);
        Ok(())
    }

    fn call(&mut self, inst: Instruction) -> Result<()> {
        let pc = self.current_pc();
        self.stack
            .push(self.registers.pc)
            .ok_or(Chip8Error::StackOverflow { pc })?;
        debug!("{:#05x}: call {:#05x}", pc, inst.nnn);
        self.registers.sp = self.stack.depth() as u8;
        self.registers.set_pc(inst.nnn);
        Ok(())
    }

    fn se_byte(&mut self, inst: Instruction) -> Result<()> {
        self.skip_if(self.registers.v[inst.x] == inst.nn);
        Ok(())
    }

    fn sne_byte(&mut self, inst: Instruction) -> Result<()> {
        self.skip_if(self.registers.v[inst.x] != inst.nn);
        Ok(())
    }

    fn se_reg(&mut self, inst: Instruction) -> Result<()> {
        self.skip_if(self.registers.v[inst.x] == self.registers.v[inst.y]);
        Ok(())
    }

    fn ld_byte(&mut self, inst: Instruction) -> Result<()> {
        self.registers.v[inst.x] = inst.nn;
        Ok(())
    }

    fn add_byte(&mut self, inst: Instruction) -> Result<()> {
        let v = &mut self.registers.v;
        v[inst.x] = v[inst.x].wrapping_add(inst.nn);
        Ok(())
    }

    // 8xyn. VF is always written last, so it wins when x is F
    fn alu(&mut self, inst: Instruction) -> Result<()> {
        let v = &mut self.registers.v;
        let (vx, vy) = (v[inst.x], v[inst.y]);
        match inst.n {
            0x0 => v[inst.x] = vy,
            0x1 => v[inst.x] = vx | vy,
            0x2 => v[inst.x] = vx & vy,
            0x3 => v[inst.x] = vx ^ vy,
            0x4 => {
                let (sum, carry) = vx.overflowing_add(vy);
                v[inst.x] = sum;
                v[VF] = carry as u8;
            }
            0x5 => {
                v[inst.x] = vx.wrapping_sub(vy);
                v[VF] = (vy <= vx) as u8;
            }
            0x6 => {
                v[inst.x] = vy >> 1;
                v[VF] = vy & 0x1;
            }
            0x7 => {
                v[inst.x] = vy.wrapping_sub(vx);
                v[VF] = (vx <= vy) as u8;
            }
            0xe => {
                v[inst.x] = vy << 1;
                v[VF] = vy >> 7;
            }
            _ => warn!("unknown ALU opcode {:04x} ignored", inst.opcode),
        }
        Ok(())
    }

    fn sne_reg(&mut self, inst: Instruction) -> Result<()> {
        self.skip_if(self.registers.v[inst.x] != self.registers.v[inst.y]);
        Ok(())
    }

    fn ld_i(&mut self, inst: Instruction) -> Result<()> {
        self.registers.set_i(inst.nnn);
        Ok(())
    }

    fn jp_v0(&mut self, inst: Instruction) -> Result<()> {
        self.registers
            .set_pc(inst.nnn.wrapping_add(self.registers.v[0] as u16));
        Ok(())
    }

    fn rnd(&mut self, inst: Instruction) -> Result<()> {
        self.registers.v[inst.x] = self.random.next_byte() & inst.nn;
        Ok(())
    }

    fn drw(&mut self, inst: Instruction) -> Result<()> {
        let mut sprite = [0u8; 15];
        let rows = &mut sprite[..inst.n as usize];
        self.memory.read_into(self.registers.i, rows);
        let (x, y) = (self.registers.v[inst.x], self.registers.v[inst.y]);
        let collision = self.framebuffer.draw_sprite(x, y, rows);
        self.registers.v[VF] = collision as u8;
        Ok(())
    }

    // Ex9E / ExA1 need a live keyboard bitmap, which the core doesn't keep
    fn skp(&mut self, inst: Instruction) -> Result<()> {
        warn!("key skip {:04x} not implemented, ignored", inst.opcode);
        Ok(())
    }

    // Fxnn
    fn misc(&mut self, inst: Instruction) -> Result<()> {
        let vx = self.registers.v[inst.x];
        let i = self.registers.i;
        match inst.nn {
            0x07 => self.registers.v[inst.x] = self.registers.delay_timer,
            0x0a => {
                debug!("waiting for key into V{:X}", inst.x);
                self.latch.await_key(inst.x as u8);
            }
            0x15 => self.registers.delay_timer = vx,
            0x18 => self.registers.sound_timer = vx,
            0x1e => self.registers.set_i(i.wrapping_add(vx as u16)),
            0x29 => self
                .registers
                .set_i(FONT_ADDR + FONT_GLYPH_BYTES * vx as u16),
            0x33 => self.memory.write_from(i, &[vx / 100, vx / 10 % 10, vx % 10]),
            0x55 => self.memory.write_from(i, &self.registers.v[..=inst.x]),
            0x65 => self.memory.read_into(i, &mut self.registers.v[..=inst.x]),
            _ => warn!("unknown misc opcode {:04x} ignored", inst.opcode),
        }
        Ok(())
    }
}

impl Default for Chip8Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
