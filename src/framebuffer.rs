/// display width in pixels
pub const WIDTH: usize = 64;
/// display height in pixels
pub const HEIGHT: usize = 32;
/// bytes in one packed row
pub const ROW_BYTES: usize = WIDTH / 8;
/// bytes in the whole packed raster
pub const FRAMEBUFFER_BYTES: usize = ROW_BYTES * HEIGHT;

/// 64x32 monochrome raster, row-major, 8 pixels to a byte with the leftmost
/// pixel in the most significant bit. the only way to set a pixel is to XOR
/// a sprite over it.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    bytes: [u8; FRAMEBUFFER_BYTES],
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            bytes: [0; FRAMEBUFFER_BYTES],
        }
    }

    pub fn clear(&mut self) {
        self.bytes = [0; FRAMEBUFFER_BYTES];
    }

    /// XOR `rows` onto the screen with the top-left corner at (x, y). both
    /// coordinates wrap, and so does each row as it crosses the right-hand
    /// edge. returns true if any set pixel was cleared
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let x = x as usize % WIDTH;
        let shift = x % 8;
        let col = x / 8;
        let mut collision = false;

        for (r, &row) in rows.iter().enumerate() {
            let line = (y as usize + r) % HEIGHT * ROW_BYTES;
            // a row that isn't byte-aligned straddles two bytes
            collision |= self.xor_byte(line + col, row >> shift);
            if shift != 0 {
                collision |= self.xor_byte(line + (col + 1) % ROW_BYTES, row << (8 - shift));
            }
        }
        collision
    }

    fn xor_byte(&mut self, idx: usize, incoming: u8) -> bool {
        let new = self.bytes[idx] ^ incoming;
        self.bytes[idx] = new;
        (new ^ incoming) & incoming != 0
    }

    /// is the pixel at (x, y) lit?
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let byte = self.bytes[(y % HEIGHT) * ROW_BYTES + (x % WIDTH) / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// the packed raster, for whoever is rendering it
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.bytes.chunks(ROW_BYTES) {
            for byte in row {
                write!(f, "{:08b}", byte)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
