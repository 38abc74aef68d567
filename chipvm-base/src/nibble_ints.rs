use derive_more::Into;

/// A minimal 4-bit integer, as found in the nibbles of an instruction word.
/// Need not actually use only 4 bits in memory.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Into)]
#[repr(transparent)]
pub struct U4(u8);

#[derive(Debug, Clone, Copy)]
#[repr(u8)]
pub enum U8Nibble {
    Lo = 0,
    Hi = 1,
}

impl U4 {
    pub const MAX: Self = Self(0b1111);

    pub const fn into_u8(self) -> u8 {
        self.0
    }

    /// Take the given nibble of `val`.
    pub const fn from_u8(val: u8, nibble: U8Nibble) -> Self {
        U4((val >> (4 * (nibble as u8))) & 0b1111)
    }
}

/// A minimal 12-bit integer, the width of an address embedded in an instruction word.
/// Need not actually use only 12 bits in memory.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Into)]
#[repr(transparent)]
pub struct U12(u16);

impl U12 {
    pub const MAX: Self = Self(0b1111_1111_1111);

    pub const fn into_u16(self) -> u16 {
        self.0
    }

    /// Keep the low 12 bits of `val`, dropping the rest.
    pub const fn from_u16_masked(val: u16) -> Self {
        U12(val & Self::MAX.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn u4_from_u8_nibbles() {
        assert_eq!(U4::from_u8(0xA7, U8Nibble::Hi), U4(0xA));
        assert_eq!(U4::from_u8(0xA7, U8Nibble::Lo), U4(0x7));
    }

    #[test]
    fn u12_masking() {
        assert_eq!(U12::from_u16_masked(0xD123).into_u16(), 0x123);
        assert_eq!(U12::from_u16_masked(0xFFFF), U12::MAX);
        assert_eq!(u16::from(U12::from_u16_masked(0x0FFF)), 0xFFF);
    }
}
