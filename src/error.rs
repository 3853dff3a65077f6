use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Conditions the interpreter can't recover from by itself. Unknown opcodes
/// aren't in here: they get logged and skipped.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("stack overflow: call at {pc:#05x} with a full call stack")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05x} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("couldn't load program: {0}")]
    ProgramLoad(#[from] io::Error),

    #[error("display error: {0}")]
    Display(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("sound error: {0}")]
    Sound(String),
}
