use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use chip8::display::MonoTermDisplay;
use chip8::input::TermInput;
use chip8::sound::{Mute, SimpleBeep, Sound};
use chip8::{Chip8Interpreter, Config, Host};

/// run a CHIP-8 program in the terminal. Esc quits; logs go to stderr
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// program image to load at 0x200
    rom: PathBuf,

    /// instructions per second
    #[arg(long, default_value_t = chip8::config::DEFAULT_INSTRUCTION_HZ)]
    hz: u32,

    /// stop after this many instructions
    #[arg(long)]
    cycles: Option<u64>,

    /// seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// no beeping
    #[arg(long)]
    mute: bool,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            instruction_hz: args.hz,
            max_cycles: args.cycles,
            seed: args.seed,
            mute: args.mute,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::from(&args);

    // load the program before touching the terminal, so a bad path is
    // reported on a sane screen
    let mut interpreter = match config.seed {
        Some(seed) => Chip8Interpreter::with_seed(seed),
        None => Chip8Interpreter::new(),
    };
    let mut f = File::open(&args.rom)?;
    let len = interpreter.load_program_from(&mut f)?;
    info!("{}: {} bytes", args.rom.display(), len);

    let mut display = MonoTermDisplay::new()?;
    let mut input = TermInput::new()?;
    let mut sound: Box<dyn Sound> = if config.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };

    let mut host = Host::new(
        interpreter,
        &mut display,
        &mut input,
        &mut *sound,
        config,
    );
    host.run()?;
    drop(host);

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..4 {
        println!();
    }
    Ok(())
}
