/// how many return addresses fit on the stack
pub const STACK_CAPACITY: usize = 24;

/// saved return addresses for 2nnn / 00EE. pushing onto a full stack or
/// popping an empty one hands back `None` and leaves the stack alone
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<u16>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: Vec::with_capacity(STACK_CAPACITY),
        }
    }

    /// save a return address; `None` if the stack is already full
    pub fn push(&mut self, addr: u16) -> Option<()> {
        if self.frames.len() == STACK_CAPACITY {
            return None;
        }
        self.frames.push(addr);
        Some(())
    }

    pub fn pop(&mut self) -> Option<u16> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
