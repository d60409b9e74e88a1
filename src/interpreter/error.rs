use thiserror::Error;

/// Everything that can stop the machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChipError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("unsupported opcode {opcode:04X} at {pc:#05X}")]
    UnsupportedOpcode { opcode: u16, pc: u16 },

    #[error("stack overflow: CALL nested deeper than 16 at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: RET with empty call stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },
}
