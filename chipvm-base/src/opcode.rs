use std::fmt;

use crate::{
    nibble_ints::{U8Nibble, U12, U4},
    processor::DataRegister,
};

/// A fetched 16-bit instruction word and the fields embedded in it.
///
/// Field naming follows the common notation of the instruction set,
/// e.g. `8xy4` or `Dxyn`:
///
/// | field | bits     |
/// |-------|----------|
/// | `x`   | `0F00`   |
/// | `y`   | `00F0`   |
/// | `n`   | `000F`   |
/// | `kk`  | `00FF`   |
/// | `nnn` | `0FFF`   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    /// Combine the high and low byte of an instruction word, as stored in memory.
    pub const fn from_bytes(high: u8, low: u8) -> Self {
        Self((high as u16) << 8 | low as u16)
    }

    pub const fn word(self) -> u16 {
        self.0
    }

    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// The instruction family, the highest nibble.
    pub const fn family(self) -> U4 {
        U4::from_u8(self.to_bytes()[0], U8Nibble::Hi)
    }

    pub fn x(self) -> DataRegister {
        DataRegister::from(U4::from_u8(self.to_bytes()[0], U8Nibble::Lo))
    }

    pub fn y(self) -> DataRegister {
        DataRegister::from(U4::from_u8(self.to_bytes()[1], U8Nibble::Hi))
    }

    pub const fn n(self) -> U4 {
        U4::from_u8(self.to_bytes()[1], U8Nibble::Lo)
    }

    pub const fn kk(self) -> u8 {
        self.to_bytes()[1]
    }

    pub const fn nnn(self) -> U12 {
        U12::from_u16_masked(self.0)
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Self(word)
    }
}

impl From<Opcode> for u16 {
    fn from(opcode: Opcode) -> Self {
        opcode.0
    }
}

/// Disassembles the word into the conventional assembler mnemonic.
/// Words without a defined meaning are shown as a data word.
impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = u8::from(self.x());
        let y = u8::from(self.y());
        let (kk, nnn, n) = (self.kk(), self.nnn().into_u16(), self.n().into_u8());

        match (self.family().into_u8(), n) {
            (0x0, 0x0) => write!(f, "CLS"),
            (0x0, 0xE) => write!(f, "RET"),
            (0x1, _) => write!(f, "JP 0x{:03X}", nnn),
            (0x2, _) => write!(f, "CALL 0x{:03X}", nnn),
            (0x3, _) => write!(f, "SE V{:X}, 0x{:02X}", x, kk),
            (0x4, _) => write!(f, "SNE V{:X}, 0x{:02X}", x, kk),
            (0x5, _) => write!(f, "SE V{:X}, V{:X}", x, y),
            (0x6, _) => write!(f, "LD V{:X}, 0x{:02X}", x, kk),
            (0x7, _) => write!(f, "ADD V{:X}, 0x{:02X}", x, kk),
            (0x8, 0x0) => write!(f, "LD V{:X}, V{:X}", x, y),
            (0x8, 0x1) => write!(f, "OR V{:X}, V{:X}", x, y),
            (0x8, 0x2) => write!(f, "AND V{:X}, V{:X}", x, y),
            (0x8, 0x3) => write!(f, "XOR V{:X}, V{:X}", x, y),
            (0x8, 0x4) => write!(f, "ADD V{:X}, V{:X}", x, y),
            (0x8, 0x5) => write!(f, "SUB V{:X}, V{:X}", x, y),
            (0x8, 0x6) => write!(f, "SHR V{:X}", x),
            (0x8, 0x7) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            (0x8, 0xE) => write!(f, "SHL V{:X}", x),
            (0x9, _) => write!(f, "SNE V{:X}, V{:X}", x, y),
            (0xA, _) => write!(f, "LD I, 0x{:03X}", nnn),
            (0xB, _) => write!(f, "JP V0, 0x{:03X}", nnn),
            (0xC, _) => write!(f, "RND V{:X}, 0x{:02X}", x, kk),
            (0xD, _) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            (0xE, 0xE) => write!(f, "SKP V{:X}", x),
            (0xE, 0x1) => write!(f, "SKNP V{:X}", x),
            (0xF, _) => match kk {
                0x07 => write!(f, "LD V{:X}, DT", x),
                0x0A => write!(f, "LD V{:X}, K", x),
                0x15 => write!(f, "LD DT, V{:X}", x),
                0x18 => write!(f, "LD ST, V{:X}", x),
                0x1E => write!(f, "ADD I, V{:X}", x),
                0x29 => write!(f, "LD F, V{:X}", x),
                0x33 => write!(f, "LD B, V{:X}", x),
                0x55 => write!(f, "LD [I], V{:X}", x),
                0x65 => write!(f, "LD V{:X}, [I]", x),
                _ => write!(f, "DW 0x{:04X}", self.0),
            },
            _ => write!(f, "DW 0x{:04X}", self.0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fields() {
        let opcode = Opcode::from_bytes(0xD9, 0x35);

        assert_eq!(opcode.word(), 0xD935);
        assert_eq!(opcode.family().into_u8(), 0xD);
        assert_eq!(opcode.x(), DataRegister::V9);
        assert_eq!(opcode.y(), DataRegister::V3);
        assert_eq!(opcode.n().into_u8(), 5);
        assert_eq!(opcode.kk(), 0x35);
        assert_eq!(opcode.nnn().into_u16(), 0x935);
    }

    #[test]
    fn disassembly() {
        let cases = [
            (0x00E0, "CLS"),
            (0x00EE, "RET"),
            (0x1200, "JP 0x200"),
            (0x6042, "LD V0, 0x42"),
            (0x8AB4, "ADD VA, VB"),
            (0xD125, "DRW V1, V2, 5"),
            (0xF365, "LD V3, [I]"),
            (0xE19E, "SKP V1"),
            (0x5121, "SE V1, V2"),
            (0xF0FF, "DW 0xF0FF"),
            (0x8008, "DW 0x8008"),
        ];

        for &(word, mnemonic) in cases.iter() {
            assert_eq!(Opcode::from(word).to_string(), mnemonic);
        }
    }
}
