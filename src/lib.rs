//! A CHIP-8 virtual machine.
//!
//! The machine itself lives in [`interpreter::ChipState`]. It knows nothing
//! about windows or keyboards: the host feeds it keypad state and elapsed
//! time, calls `step` and `tick` at their own rates, and reads the 64x32
//! display back out. `chip8_base` supplies that host loop for the binary.
pub mod interpreter;
