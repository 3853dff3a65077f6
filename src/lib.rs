///
/// ## Design
///
/// * the interpreter is a plain CHIP-8 machine: 4K of memory with the font at
///   the bottom and the program at 0x200, 16 byte registers plus I, a 24-deep
///   call stack, a packed 64x32 framebuffer and the two 60Hz timers
/// * one `step()` is one instruction; the host decides how fast to call it
/// * the timers are ticked by the host, decoupled from the instruction rate
/// * Fx0A parks the interpreter until the host delivers a key; the host
///   checks `is_awaiting_key()` before stepping
/// * unknown opcodes are logged and skipped. stack overflow/underflow is fatal
///   and handed back to the host
/// * abstract display so can plug alternatives; starting with TUI in-console
/// * input device, with trait for reading key-presses
/// * audio device, with trait for making beeps
///
/// Model
///
/// Host
///  |-- display, input, sound, config
///  |-- interpreter
///  |    |-- memory, registers, call stack, framebuffer
///  |    `-- random source, input latch
///  `-- main loop, one iteration per 60Hz frame
///       |-- interpreter.step() x cycles_per_tick, unless awaiting a key
///       |-- interpreter.tick_timers()
///       |-- sound.set_active(interpreter.sound_active())
///       |-- display.draw(interpreter.framebuffer())
///       `-- sleep off the rest of the frame
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod host;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod latch;
pub mod memory;
pub mod random;
pub mod registers;
pub mod sound;
pub mod stack;

pub use config::Config;
pub use error::{Chip8Error, Result};
pub use framebuffer::Framebuffer;
pub use host::Host;
pub use interpreter::Chip8Interpreter;
