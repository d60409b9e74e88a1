/// Fixed-width fields of a 16-bit instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub group: u8,
    pub x: u8,
    pub y: u8,
    pub n: u8,
    pub kk: u8,
    pub nnn: u16,
}

impl Opcode {
    pub fn new(word: u16) -> Self {
        Opcode {
            group: (word >> 12) as u8,
            x: ((word >> 8) & 0xF) as u8,
            y: ((word >> 4) & 0xF) as u8,
            n: (word & 0xF) as u8,
            kk: (word & 0xFF) as u8,
            nnn: word & 0x0FFF,
        }
    }
}

/// A decoded CHIP-8 instruction. Register operands are indices into V.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn, ignored
    Sys(u16),
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jp(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SeByte { x: u8, kk: u8 },
    /// 4xkk
    SneByte { x: u8, kk: u8 },
    /// 5xy0
    SeReg { x: u8, y: u8 },
    /// 6xkk
    LdByte { x: u8, kk: u8 },
    /// 7xkk
    AddByte { x: u8, kk: u8 },
    /// 8xy0
    LdReg { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddReg { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    Shr { x: u8, y: u8 },
    /// 8xy7
    Subn { x: u8, y: u8 },
    /// 8xyE
    Shl { x: u8, y: u8 },
    /// 9xy0
    SneReg { x: u8, y: u8 },
    /// Annn
    LdI(u16),
    /// Bnnn
    JpV0(u16),
    /// Cxkk
    Rnd { x: u8, kk: u8 },
    /// Dxyn
    Drw { x: u8, y: u8, n: u8 },
    /// Ex9E
    Skp(u8),
    /// ExA1
    Sknp(u8),
    /// Fx07
    LdVxDt(u8),
    /// Fx0A
    LdVxK(u8),
    /// Fx15
    LdDtVx(u8),
    /// Fx18
    LdStVx(u8),
    /// Fx1E
    AddI(u8),
    /// Fx29
    LdF(u8),
    /// Fx33
    LdB(u8),
    /// Fx55
    StoreRegs(u8),
    /// Fx65
    LoadRegs(u8),
}

impl Instruction {
    /// Decode a word, or `None` if it matches no known pattern.
    pub fn decode(word: u16) -> Option<Instruction> {
        use Instruction::*;

        let Opcode {
            group,
            x,
            y,
            n,
            kk,
            nnn,
        } = Opcode::new(word);

        let instruction = match (group, x, y, n) {
            (0x0, 0x0, 0xE, 0x0) => Cls,
            (0x0, 0x0, 0xE, 0xE) => Ret,
            (0x0, ..) => Sys(nnn),
            (0x1, ..) => Jp(nnn),
            (0x2, ..) => Call(nnn),
            (0x3, ..) => SeByte { x, kk },
            (0x4, ..) => SneByte { x, kk },
            (0x5, _, _, 0x0) => SeReg { x, y },
            (0x6, ..) => LdByte { x, kk },
            (0x7, ..) => AddByte { x, kk },
            (0x8, _, _, 0x0) => LdReg { x, y },
            (0x8, _, _, 0x1) => Or { x, y },
            (0x8, _, _, 0x2) => And { x, y },
            (0x8, _, _, 0x3) => Xor { x, y },
            (0x8, _, _, 0x4) => AddReg { x, y },
            (0x8, _, _, 0x5) => Sub { x, y },
            (0x8, _, _, 0x6) => Shr { x, y },
            (0x8, _, _, 0x7) => Subn { x, y },
            (0x8, _, _, 0xE) => Shl { x, y },
            (0x9, _, _, 0x0) => SneReg { x, y },
            (0xA, ..) => LdI(nnn),
            (0xB, ..) => JpV0(nnn),
            (0xC, ..) => Rnd { x, kk },
            (0xD, ..) => Drw { x, y, n },
            (0xE, _, 0x9, 0xE) => Skp(x),
            (0xE, _, 0xA, 0x1) => Sknp(x),
            (0xF, _, 0x0, 0x7) => LdVxDt(x),
            (0xF, _, 0x0, 0xA) => LdVxK(x),
            (0xF, _, 0x1, 0x5) => LdDtVx(x),
            (0xF, _, 0x1, 0x8) => LdStVx(x),
            (0xF, _, 0x1, 0xE) => AddI(x),
            (0xF, _, 0x2, 0x9) => LdF(x),
            (0xF, _, 0x3, 0x3) => LdB(x),
            (0xF, _, 0x5, 0x5) => StoreRegs(x),
            (0xF, _, 0x6, 0x5) => LoadRegs(x),
            _ => return None,
        };
        Some(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields() {
        let op = Opcode::new(0xD12F);
        assert_eq!(op.group, 0xD);
        assert_eq!(op.x, 0x1);
        assert_eq!(op.y, 0x2);
        assert_eq!(op.n, 0xF);
        assert_eq!(op.kk, 0x2F);
        assert_eq!(op.nnn, 0x12F);
    }

    #[test]
    fn every_word_has_fields() {
        for word in [0x0000, 0xFFFF, 0x8000, 0x0FFF] {
            let op = Opcode::new(word);
            assert_eq!(((op.group as u16) << 12) | op.nnn, word);
        }
    }

    #[test]
    fn system_group() {
        assert_eq!(Instruction::decode(0x00E0), Some(Instruction::Cls));
        assert_eq!(Instruction::decode(0x00EE), Some(Instruction::Ret));
        assert_eq!(Instruction::decode(0x0123), Some(Instruction::Sys(0x123)));
        assert_eq!(Instruction::decode(0x0000), Some(Instruction::Sys(0)));
    }

    #[test]
    fn operands() {
        assert_eq!(Instruction::decode(0x2ABC), Some(Instruction::Call(0xABC)));
        assert_eq!(
            Instruction::decode(0x7A05),
            Some(Instruction::AddByte { x: 0xA, kk: 0x05 })
        );
        assert_eq!(
            Instruction::decode(0x8CDE),
            Some(Instruction::Shl { x: 0xC, y: 0xD })
        );
        assert_eq!(
            Instruction::decode(0xD345),
            Some(Instruction::Drw { x: 3, y: 4, n: 5 })
        );
        assert_eq!(Instruction::decode(0xF40A), Some(Instruction::LdVxK(4)));
        assert_eq!(Instruction::decode(0xE1A1), Some(Instruction::Sknp(1)));
    }

    #[test]
    fn unknown_words() {
        for word in [0x5121, 0x9AB3, 0x8008, 0x800F, 0xE000, 0xE19F, 0xF000, 0xF066] {
            assert_eq!(Instruction::decode(word), None, "{:04X}", word);
        }
    }
}
