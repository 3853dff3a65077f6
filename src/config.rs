use std::time::Duration;

/// timers and the display refresh both run at this rate
pub const TIMER_HZ: u32 = 60;

/// roughly what COSMAC VIP programs expect
pub const DEFAULT_INSTRUCTION_HZ: u32 = 700;

/// knobs for the host loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// instructions per second
    pub instruction_hz: u32,
    /// stop after this many instructions; run until the input says quit if None
    pub max_cycles: Option<u64>,
    /// pin the RNG so runs repeat
    pub seed: Option<u64>,
    pub mute: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instruction_hz: DEFAULT_INSTRUCTION_HZ,
            max_cycles: None,
            seed: None,
            mute: false,
        }
    }
}

impl Config {
    /// how many instructions go between two timer ticks. never zero
    pub fn cycles_per_tick(&self) -> u32 {
        (self.instruction_hz / TIMER_HZ).max(1)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / TIMER_HZ
    }
}
