use crate::memory::{ADDRESS_MASK, PROGRAM_ADDR};

/// index of the flag register
pub const VF: usize = 0xf;

/// V0..VF, I, the program counter, the stack depth and the two timers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    pub v: [u8; 16],
    /// only the low 12 bits are meaningful
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_ADDR,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
        }
    }

    /// set I, keeping it inside the address space
    pub fn set_i(&mut self, addr: u16) {
        self.i = addr & ADDRESS_MASK;
    }

    /// move on to the next instruction
    pub fn advance_pc(&mut self) {
        self.set_pc(self.pc.wrapping_add(2));
    }

    pub fn set_pc(&mut self, addr: u16) {
        self.pc = addr & ADDRESS_MASK;
    }

    /// count both timers down by one, stopping at zero
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
