use super::error::ChipError;

pub const STACK_DEPTH: usize = 16;

/// Return addresses for CALL/RET, bounded to 16 entries.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    data: [u16; STACK_DEPTH],
    len: usize,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a return address; `pc` is only used for the error report.
    pub fn push(&mut self, addr: u16, pc: u16) -> Result<(), ChipError> {
        if self.len == STACK_DEPTH {
            return Err(ChipError::StackOverflow { pc });
        }
        self.data[self.len] = addr;
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.data[self.len])
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn peek(&self) -> Option<u16> {
        self.len.checked_sub(1).map(|top| self.data[top])
    }
}
