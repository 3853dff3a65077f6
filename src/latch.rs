/// whether the interpreter is free to run, or parked on Fx0A until a key
/// arrives. the host checks this before every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputLatch {
    #[default]
    Running,
    /// the register the next key press lands in
    AwaitingKey(u8),
}

impl InputLatch {
    pub fn is_awaiting_key(&self) -> bool {
        matches!(self, InputLatch::AwaitingKey(_))
    }

    /// park until a key is pressed
    pub fn await_key(&mut self, register: u8) {
        *self = InputLatch::AwaitingKey(register & 0xf);
    }

    /// release the latch, handing back the register waiting for the key.
    /// `None` if nothing was waiting
    pub fn release(&mut self) -> Option<u8> {
        match std::mem::take(self) {
            InputLatch::AwaitingKey(r) => Some(r),
            InputLatch::Running => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_transitions() {
        let mut l = InputLatch::default();
        assert!(!l.is_awaiting_key());
        assert_eq!(l.release(), None);

        l.await_key(0x3);
        assert_eq!(l, InputLatch::AwaitingKey(3));
        assert!(l.is_awaiting_key());

        assert_eq!(l.release(), Some(3));
        assert_eq!(l, InputLatch::Running);
    }
}
