/// A fetched opcode split into its fields. Which fields mean anything
/// depends on the family.
///
/// ```text
///  15..12  11..8  7..4  3..0
///  family    x     y     n
///                 ---nn----
///         ------nnn--------
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: u16,
    pub family: u8,
    pub x: usize,
    pub y: usize,
    pub n: u8,
    pub nn: u8,
    pub nnn: u16,
}

impl Instruction {
    pub fn decode(opcode: u16) -> Self {
        Instruction {
            opcode,
            family: (opcode >> 12) as u8,
            x: ((opcode >> 8) & 0xf) as usize,
            y: ((opcode >> 4) & 0xf) as usize,
            n: (opcode & 0xf) as u8,
            nn: (opcode & 0xff) as u8,
            nnn: opcode & 0x0fff,
        }
    }
}

impl From<u16> for Instruction {
    fn from(opcode: u16) -> Self {
        Instruction::decode(opcode)
    }
}
