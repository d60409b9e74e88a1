pub mod config;
pub mod decode;
pub mod display;
pub mod error;
pub mod font;
pub mod stack;
pub mod timers;


use chip8_base::{Display, Interpreter, Keys};
use config::{Config, UnderflowPolicy};
use decode::Instruction;
use display::{FrameBuffer, HEIGHT, WIDTH};
use error::ChipError;
use rand::Rng;
use stack::CallStack;
use std::time::Duration;
use timers::{TickOutcome, Timers};

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
/// Largest ROM that fits between 0x200 and 0xFFF inclusive.
pub const MAX_ROM_SIZE: usize = 0xFFF - PROGRAM_START as usize + 1;

pub struct ChipState {
    memory: [u8; MEMORY_SIZE],
    program_counter: u16,
    /// Address of the most recently fetched instruction.
    last_pc: u16,
    stack: CallStack,
    registers: [u8; 16],
    index_register: u16,
    timers: Timers,
    display: FrameBuffer,
    keypad: Keys,
    redraw: bool,
    config: Config,
    clock_speed: Duration,
}

impl Interpreter for ChipState {
    fn step(&mut self, keys: &Keys) -> Option<Display> {
        self.set_keys(keys);
        if let Err(err) = ChipState::step(self) {
            log::error!("{}\n{}", err, self.dump());
            std::process::exit(1);
        }

        // Each call stands for one instruction period of wall time.
        if self.tick(self.clock_speed).beep {
            log::info!("beep");
        }

        if self.take_redraw() {
            Some(self.display.to_display())
        } else {
            None
        }
    }

    fn speed(&self) -> Duration {
        self.clock_speed
    }

    fn buzzer_active(&self) -> bool {
        self.timers.buzzer_active()
    }
}

impl ChipState {
    pub fn new(config: Config) -> Self {
        let mut state = ChipState {
            memory: [0; MEMORY_SIZE],
            program_counter: PROGRAM_START,
            last_pc: PROGRAM_START,
            stack: CallStack::new(),
            registers: [0; 16],
            index_register: 0,
            timers: Timers::new(),
            display: FrameBuffer::new(),
            keypad: [false; 16],
            redraw: false,
            config,
            clock_speed: Duration::from_secs_f64(1_f64 / config.clock_freq.max(1) as f64),
        };
        state.reset();
        state
    }

    /// Put the machine back into its power-on state. Memory is wiped, so any
    /// loaded ROM is lost.
    pub fn reset(&mut self) {
        self.memory = [0; MEMORY_SIZE];
        self.memory[font::FONT_ADDR..font::FONT_ADDR + font::FONT.len()]
            .copy_from_slice(&font::FONT);
        self.program_counter = PROGRAM_START;
        self.last_pc = PROGRAM_START;
        self.stack = CallStack::new();
        self.registers = [0; 16];
        self.index_register = 0;
        self.timers = Timers::new();
        self.display.clear();
        self.keypad = [false; 16];
        self.redraw = false;
    }

    /// Copy a program image into memory at 0x200.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), ChipError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(ChipError::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + rom.len()].copy_from_slice(rom);
        log::info!("loaded {} byte ROM at {:#05X}", rom.len(), start);
        Ok(())
    }

    pub fn set_keys(&mut self, keys: &Keys) {
        self.keypad = *keys;
    }

    /// Row-major 64x32 pixels, each 0 or 1.
    pub fn pixels(&self) -> &[u8] {
        self.display.pixels()
    }

    /// Returns whether the display changed since the last call, clearing the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        self.timers.tick(elapsed)
    }

    /// Fetch, decode and execute one instruction.
    pub fn step(&mut self) -> Result<(), ChipError> {
        let pc = self.program_counter;
        self.last_pc = pc;
        let word = self.fetch();
        let instruction =
            Instruction::decode(word).ok_or(ChipError::UnsupportedOpcode { opcode: word, pc })?;
        log::trace!("{:03X}: {:04X} {:?}", pc, word, instruction);
        self.execute(instruction, pc)
    }

    /// Human readable dump of the registers, for diagnostics. `op` and `PC`
    /// name the last instruction fetched, which is the one that failed when
    /// `step` returns an error.
    pub fn dump(&self) -> String {
        let pc = self.last_pc;
        let mut out = format!(
            "op: {:02X}{:02X}\n",
            self.read(pc),
            self.read(pc.wrapping_add(1))
        );
        out.push_str(&format!(
            "PC: {:#05X} next: {:#05X} SP: {} I: {:#05X} DT: {} ST: {}\n",
            pc,
            self.program_counter,
            self.stack.len(),
            self.index_register,
            self.timers.delay,
            self.timers.sound
        ));
        for (i, v) in self.registers.iter().enumerate() {
            out.push_str(&format!("V{:X}={:02X} ", i, v));
        }
        out.push_str("\nkeys: ");
        for (i, key) in self.keypad.iter().enumerate() {
            out.push_str(&format!("{:X}:{} ", i, *key as u8));
        }
        out
    }

    fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & 0xFFF) as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.memory[(addr & 0xFFF) as usize] = value;
    }

    fn fetch(&mut self) -> u16 {
        let pc = self.program_counter;
        let instruction = u16::from_be_bytes([self.read(pc), self.read(pc.wrapping_add(1))]);
        self.program_counter = pc.wrapping_add(2);
        instruction
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    /// Run an instruction. `pc` is the address it was fetched from; the
    /// program counter already points past it.
    fn execute(&mut self, instruction: Instruction, pc: u16) -> Result<(), ChipError> {
        use Instruction::*;

        let v = &mut self.registers;
        match instruction {
            Sys(_) => (),
            Cls => {
                self.display.clear();
                self.redraw = true;
            }
            Ret => match self.stack.pop() {
                Some(addr) => self.program_counter = addr,
                None => match self.config.quirks.stack_underflow {
                    UnderflowPolicy::Ignore => log::debug!("RET with empty stack at {:#05X}", pc),
                    UnderflowPolicy::Fatal => return Err(ChipError::StackUnderflow { pc }),
                },
            },
            Jp(nnn) => self.program_counter = nnn,
            Call(nnn) => {
                self.stack.push(self.program_counter, pc)?;
                self.program_counter = nnn;
            }
            SeByte { x, kk } => {
                let eq = v[x as usize] == kk;
                self.skip_if(eq);
            }
            SneByte { x, kk } => {
                let ne = v[x as usize] != kk;
                self.skip_if(ne);
            }
            SeReg { x, y } => {
                let eq = v[x as usize] == v[y as usize];
                self.skip_if(eq);
            }
            SneReg { x, y } => {
                let ne = v[x as usize] != v[y as usize];
                self.skip_if(ne);
            }
            LdByte { x, kk } => v[x as usize] = kk,
            AddByte { x, kk } => v[x as usize] = v[x as usize].wrapping_add(kk),
            LdReg { x, y } => v[x as usize] = v[y as usize],
            Or { x, y } => v[x as usize] |= v[y as usize],
            And { x, y } => v[x as usize] &= v[y as usize],
            Xor { x, y } => v[x as usize] ^= v[y as usize],
            // For the flag-setting ALU ops VF is written last, so the flag
            // wins when x is F.
            AddReg { x, y } => {
                let (sum, overflow) = v[x as usize].overflowing_add(v[y as usize]);
                v[x as usize] = sum;
                v[0xF] = overflow as u8;
            }
            Sub { x, y } => {
                let (diff, borrow) = v[x as usize].overflowing_sub(v[y as usize]);
                v[x as usize] = diff;
                v[0xF] = !borrow as u8;
            }
            Subn { x, y } => {
                let (diff, borrow) = v[y as usize].overflowing_sub(v[x as usize]);
                v[x as usize] = diff;
                v[0xF] = !borrow as u8;
            }
            Shr { x, y } => {
                if self.config.quirks.shift_uses_vy {
                    v[x as usize] = v[y as usize];
                }
                let out = v[x as usize] & 0x1;
                v[x as usize] >>= 1;
                v[0xF] = out;
            }
            Shl { x, y } => {
                if self.config.quirks.shift_uses_vy {
                    v[x as usize] = v[y as usize];
                }
                let out = (v[x as usize] >> 7) & 0x1;
                v[x as usize] <<= 1;
                v[0xF] = out;
            }
            LdI(nnn) => self.index_register = nnn,
            JpV0(nnn) => self.program_counter = nnn + v[0] as u16,
            Rnd { x, kk } => v[x as usize] = rand::thread_rng().gen::<u8>() & kk,
            Drw { x, y, n } => {
                let origin_x = v[x as usize] as usize % WIDTH;
                let origin_y = v[y as usize] as usize % HEIGHT;
                let mut sprite = [0_u8; 15];
                for (row, byte) in sprite.iter_mut().enumerate().take(n as usize) {
                    *byte = self.read(self.index_register.wrapping_add(row as u16));
                }
                let collision = self.display.draw_sprite(
                    origin_x,
                    origin_y,
                    &sprite[..n as usize],
                    self.config.quirks.sprite_edge,
                );
                self.registers[0xF] = collision as u8;
                self.redraw = true;
            }
            Skp(x) => {
                let pressed = self.keypad[(v[x as usize] & 0xF) as usize];
                self.skip_if(pressed);
            }
            Sknp(x) => {
                let pressed = self.keypad[(v[x as usize] & 0xF) as usize];
                self.skip_if(!pressed);
            }
            LdVxDt(x) => v[x as usize] = self.timers.delay,
            LdDtVx(x) => self.timers.delay = v[x as usize],
            LdStVx(x) => self.timers.sound = v[x as usize],
            LdVxK(x) => match self.keypad.iter().position(|&key| key) {
                Some(key) => v[x as usize] = key as u8,
                // Nothing pressed: run this instruction again next step.
                None => self.program_counter = pc,
            },
            AddI(x) => {
                self.index_register = self.index_register.wrapping_add(v[x as usize] as u16);
            }
            LdF(x) => {
                let glyph = (v[x as usize] & 0xF) as usize;
                self.index_register = (font::FONT_ADDR + glyph * font::GLYPH_SIZE) as u16;
            }
            LdB(x) => {
                let val = v[x as usize];
                let index = self.index_register;
                self.write(index, val / 100);
                self.write(index.wrapping_add(1), (val / 10) % 10);
                self.write(index.wrapping_add(2), val % 10);
            }
            StoreRegs(x) => {
                for reg_i in 0..=x as u16 {
                    let val = self.registers[reg_i as usize];
                    self.write(self.index_register.wrapping_add(reg_i), val);
                }
            }
            LoadRegs(x) => {
                for reg_i in 0..=x as u16 {
                    self.registers[reg_i as usize] =
                        self.read(self.index_register.wrapping_add(reg_i));
                }
            }
        };
        Ok(())
    }
}
