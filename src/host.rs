/// # host
///
/// The main loop that drives an interpreter against a display, an input
/// device and a buzzer. Work is split into 60Hz frames:
///
///  - run `cycles_per_tick` instructions, unless the interpreter is parked on
///    Fx0A and no key has arrived, in which case the frame's remaining
///    instructions are skipped
///  - tick the timers, follow the sound timer with the buzzer, repaint
///  - sleep off whatever is left of the frame
///
/// Instructions run as fast as possible then sleep, so timing is right over
/// a frame but not within it.
use crate::config::Config;
use crate::display::Display;
use crate::error::{Chip8Error, Result};
use crate::input::Input;
use crate::interpreter::Chip8Interpreter;
use crate::sound::Sound;
use log::{debug, info, warn};
use std::time::Instant;

pub struct Host<'a> {
    interpreter: Chip8Interpreter,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    config: Config,
    cycles: u64,
}

impl<'a> Host<'a> {
    pub fn new(
        interpreter: Chip8Interpreter,
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
        config: Config,
    ) -> Self {
        Host {
            interpreter,
            display,
            input,
            sound,
            config,
            cycles: 0,
        }
    }

    /// run until the input asks to quit, the cycle limit is hit or the
    /// program does something fatal. returns the instructions executed
    pub fn run(&mut self) -> Result<u64> {
        info!(
            "running at {}Hz, {} instructions per frame",
            self.config.instruction_hz,
            self.config.cycles_per_tick()
        );
        let result = self.run_frames();
        info!("stopped after {} instructions", self.cycles);
        // the buzzer goes quiet however the run ended
        if let Err(e) = self.sound.set_active(false) {
            warn!("couldn't stop the buzzer: {}", e);
        }
        result.map(|()| self.cycles)
    }

    fn run_frames(&mut self) -> Result<()> {
        while !self.input.quit_requested() && !self.cycle_limit_reached() {
            let started = Instant::now();
            self.frame()?;
            let interval = self.config.tick_interval();
            if let Some(rest) = interval.checked_sub(started.elapsed()) {
                spin_sleep::sleep(rest);
            }
        }
        Ok(())
    }

    /// one 60Hz frame's worth of work
    pub fn frame(&mut self) -> Result<()> {
        for _ in 0..self.config.cycles_per_tick() {
            if self.cycle_limit_reached() {
                break;
            }
            if self.interpreter.is_awaiting_key() && !self.deliver_key()? {
                break;
            }
            self.interpreter.step()?;
            self.cycles += 1;
        }
        // nothing reads key state outside Fx0A, so stale presses go
        self.input
            .flush_keys()
            .map_err(|e| Chip8Error::Input(e.to_string()))?;

        self.interpreter.tick_timers();
        self.sound
            .set_active(self.interpreter.sound_active())
            .map_err(|e| Chip8Error::Sound(e.to_string()))?;
        self.display
            .draw(self.interpreter.framebuffer())
            .map_err(|e| Chip8Error::Display(e.to_string()))
    }

    /// hand the first buffered key to a waiting interpreter. false if there
    /// wasn't one
    fn deliver_key(&mut self) -> Result<bool> {
        let keys = self
            .input
            .peek_keys()
            .map_err(|e| Chip8Error::Input(e.to_string()))?;
        let Some(&key) = keys.first() else {
            return Ok(false);
        };
        debug!("delivering key {:x}", key);
        self.interpreter.key_pressed(key);
        self.input
            .flush_keys()
            .map_err(|e| Chip8Error::Input(e.to_string()))?;
        Ok(true)
    }

    fn cycle_limit_reached(&self) -> bool {
        self.config.max_cycles.is_some_and(|max| self.cycles >= max)
    }

    pub fn interpreter(&self) -> &Chip8Interpreter {
        &self.interpreter
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DummyDisplay;
    use crate::input::DummyInput;
    use crate::sound::{Mute, Sound};

    fn fast(max_cycles: u64) -> Config {
        Config {
            instruction_hz: 6000,
            max_cycles: Some(max_cycles),
            seed: Some(0),
            mute: true,
        }
    }

    fn interpreter_with(program: &[u8]) -> Chip8Interpreter {
        let mut i = Chip8Interpreter::with_seed(0);
        i.load_program(program);
        i
    }

    #[test]
    fn test_run_stops_at_cycle_limit() -> Result<()> {
        let (mut d, mut i, mut s) = (DummyDisplay::new(), DummyInput::new(&[]), Mute::new());
        // V0 += 1; jump back
        let interp = interpreter_with(&[0x70, 0x01, 0x12, 0x00]);
        let mut host = Host::new(interp, &mut d, &mut i, &mut s, fast(40));
        assert_eq!(host.run()?, 40);
        assert_eq!(host.interpreter().registers().v[0], 20);
        drop(host);
        assert_eq!(d.frames, 1);
        Ok(())
    }

    #[test]
    fn test_frame_draws_and_beeps() -> Result<()> {
        let (mut d, mut i, mut s) = (DummyDisplay::new(), DummyInput::new(&[]), Mute::new());
        // V0 := 5; ST := V0; I := font "0"; draw it at (V1, V1); spin
        let interp = interpreter_with(&[
            0x60, 0x05, 0xf0, 0x18, 0xa0, 0x00, 0xd1, 0x15, 0x12, 0x08,
        ]);
        let mut host = Host::new(interp, &mut d, &mut i, &mut s, fast(100));
        host.frame()?;
        // ticked once already
        assert_eq!(host.interpreter().registers().sound_timer, 4);
        drop(host);
        assert_eq!(s.beeps, 1);
        let frame = d.last.expect("a frame was drawn");
        assert_eq!(frame.as_bytes()[0], 0xf0);
        Ok(())
    }

    #[test]
    fn test_key_wait_parks_frame() -> Result<()> {
        let (mut d, mut i, mut s) = (DummyDisplay::new(), DummyInput::new(&[]), Mute::new());
        // wait for a key into V2, then spin
        let interp = interpreter_with(&[0xf2, 0x0a, 0x12, 0x02]);
        let mut host = Host::new(interp, &mut d, &mut i, &mut s, fast(100));
        host.frame()?;
        assert!(host.interpreter().is_awaiting_key());
        assert_eq!(host.cycles(), 1);
        Ok(())
    }

    #[test]
    fn test_key_delivered_to_waiting_interpreter() -> Result<()> {
        let (mut d, mut i, mut s) = (DummyDisplay::new(), DummyInput::quitting(&[0x7]), Mute::new());
        let interp = interpreter_with(&[0xf2, 0x0a, 0x12, 0x02]);
        let mut host = Host::new(interp, &mut d, &mut i, &mut s, fast(10));
        host.run()?;
        assert!(!host.interpreter().is_awaiting_key());
        assert_eq!(host.interpreter().registers().v[2], 0x7);
        Ok(())
    }

    #[test]
    fn test_stack_error_silences_buzzer() {
        let (mut d, mut i, mut s) = (DummyDisplay::new(), DummyInput::new(&[]), Mute::new());
        // V0 := 0x20; ST := V0; return with nothing on the stack
        let interp = interpreter_with(&[0x60, 0x20, 0xf0, 0x18, 0x00, 0xee]);
        let mut host = Host::new(interp, &mut d, &mut i, &mut s, fast(10));
        // the return fails inside the first frame, before the buzzer follows
        // ST, so start it the way an earlier frame would have
        host.sound.set_active(true).expect("mute can't fail");
        assert!(matches!(
            host.run(),
            Err(Chip8Error::StackUnderflow { pc: 0x204 })
        ));
        drop(host);
        assert_eq!(s.beeps, 1);
        assert!(!s.is_beeping());
    }

    #[test]
    fn test_stack_error_stops_run() {
        let (mut d, mut i, mut s) = (DummyDisplay::new(), DummyInput::new(&[]), Mute::new());
        let interp = interpreter_with(&[0x00, 0xee]);
        let mut host = Host::new(interp, &mut d, &mut i, &mut s, fast(10));
        assert!(matches!(
            host.run(),
            Err(Chip8Error::StackUnderflow { .. })
        ));
    }
}
