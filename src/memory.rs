use log::info;
use std::io;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// Represents the byte-addressable memory the interpreter runs against.
/// Every access goes through the 12-bit mask, so addresses wrap rather than
/// falling off the end.
pub trait MemoryMap {
    /// read a single byte
    fn read_byte(&self, addr: u16) -> u8;

    /// write a single byte
    fn write_byte(&mut self, addr: u16, value: u8);

    /// get a big-endian two-byte word (opcodes)
    fn get_word(&self, addr: u16) -> u16 {
        let hi = self.read_byte(addr) as u16;
        let lo = self.read_byte(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// fill `buf` from consecutive addresses, wrapping at the top of memory
    fn read_into(&self, addr: u16, buf: &mut [u8]) {
        for (offset, b) in buf.iter_mut().enumerate() {
            *b = self.read_byte(addr.wrapping_add(offset as u16));
        }
    }

    /// copy `data` to consecutive addresses, wrapping at the top of memory
    fn write_from(&mut self, addr: u16, data: &[u8]) {
        for (offset, b) in data.iter().enumerate() {
            self.write_byte(addr.wrapping_add(offset as u16), *b);
        }
    }
}

/// how much RAM we have
pub const RAM_SIZE_BYTES: usize = 0x1000;

/// all instruction-driven addresses are masked to this
pub const ADDRESS_MASK: u16 = 0x0fff;

/// where the program is loaded
pub const PROGRAM_ADDR: u16 = 0x0200;

/// biggest program that fits between PROGRAM_ADDR and the top of RAM
pub const MAX_PROGRAM_BYTES: usize = RAM_SIZE_BYTES - PROGRAM_ADDR as usize;

/// where the hex digit glyphs live; Fx29 relies on this being zero
pub const FONT_ADDR: u16 = 0x0000;

/// bytes per font glyph
pub const FONT_GLYPH_BYTES: u16 = 5;

/// CHIP-8 memory: font glyphs in the low page, program from 0x200
pub struct AddressSpace {
    bytes: Box<[u8]>,
}

impl MemoryMap for AddressSpace {
    fn read_byte(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDRESS_MASK) as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDRESS_MASK) as usize] = value;
    }
}

impl AddressSpace {
    /// zeroed memory with the font baked in
    pub fn new() -> Self {
        let mut mem = AddressSpace {
            bytes: vec![0u8; RAM_SIZE_BYTES].into_boxed_slice(),
        };
        mem.write_from(FONT_ADDR, &FONT);
        mem
    }

    /// copy a program in at 0x200. anything that doesn't fit below the top
    /// of RAM is dropped; returns how many bytes were copied
    pub fn load_program(&mut self, program: &[u8]) -> usize {
        let len = program.len().min(MAX_PROGRAM_BYTES);
        if len < program.len() {
            info!(
                "program is {} bytes, truncated to {}",
                program.len(),
                MAX_PROGRAM_BYTES
            );
        }
        let start = PROGRAM_ADDR as usize;
        self.bytes[start..start + len].copy_from_slice(&program[..len]);
        info!("loaded {} program bytes at {:#05x}", len, PROGRAM_ADDR);
        len
    }

    /// read unknown len of data from somewhere and load it as the program
    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize, io::Error> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(self.load_program(&buf))
    }

    /// the whole of memory, read-only
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
