use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use log::warn;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// COSMAC hex keypad laid over the left-hand side of a qwerty keyboard
///
/// ```text
///  1 2 3 C      1 2 3 4
///  4 5 6 D  ->  q w e r
///  7 8 9 E      a s d f
///  A 0 B F      z x c v
/// ```
const CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// reads keypresses
pub trait Input {
    /// get a list of all the mapped keys that have been pressed recently,
    /// without flushing them from the buffer
    fn peek_keys(&mut self) -> Result<&[u8], io::Error>;

    /// flush all the keypresses from the buffer
    fn flush_keys(&mut self) -> Result<(), io::Error>;

    /// has the user asked to stop?
    fn quit_requested(&self) -> bool {
        false
    }
}

/// keys from the terminal, read with crossterm in raw mode. Esc quits
pub struct TermInput {
    buffer: Vec<u8>,
    keymap: HashMap<char, u8>,
    quit: bool,
}

impl TermInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TermInput {
            buffer: Vec::new(),
            keymap: HashMap::from(CONVENTIONAL_KEYMAP),
            quit: false,
        })
    }

    fn read_events(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(evt) = read()? {
                match evt.code {
                    KeyCode::Char(key) => match self.keymap.get(&key.to_ascii_lowercase()) {
                        Some(mapped_key) => self.buffer.push(*mapped_key),
                        None => warn!("can't map {:?} to a COSMAC key", key),
                    },
                    KeyCode::Esc => self.quit = true,
                    other => warn!("unmapped key event {:?}", other),
                }
            }
        }
        Ok(())
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for TermInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        self.read_events()?;
        Ok(self.buffer.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.read_events()?;
        self.buffer.clear();
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// dummy Input implementation for testing: hands out its keys once, then
/// asks to quit when they've all been flushed if `quit_when_empty` is set
pub struct DummyInput {
    bytes: Vec<u8>,
    quit_when_empty: bool,
}

impl DummyInput {
    pub fn new(keys: &[u8]) -> Self {
        DummyInput {
            bytes: Vec::from(keys),
            quit_when_empty: false,
        }
    }

    pub fn quitting(keys: &[u8]) -> Self {
        DummyInput {
            bytes: Vec::from(keys),
            quit_when_empty: true,
        }
    }
}

impl Input for DummyInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        Ok(self.bytes.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.bytes.clear();
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        self.quit_when_empty && self.bytes.is_empty()
    }
}
