use num_enum::{IntoPrimitive, TryFromPrimitive, UnsafeFromPrimitive};
use static_assertions::const_assert_eq;

use crate::nibble_ints::{U8Nibble, U4};

/// Data register of the virtual machine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    TryFromPrimitive,
    IntoPrimitive,
    UnsafeFromPrimitive,
)]
#[repr(u8)]
pub enum DataRegister {
    /// Used as the offset of `Bnnn` jumps.
    V0,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
    V9,
    VA,
    VB,
    VC,
    VD,
    VE,
    /// Receives the carry/borrow flags, the shifted-out bit of bit shifts
    /// and the collision flag of sprite drawing.
    ///
    /// Programs may still name it as an operand. When an instruction
    /// both stores a result into `VF` and produces a flag, the flag is
    /// written last and wins.
    VF,
}

impl DataRegister {
    /// Number of data registers.
    pub const COUNT: usize = Self::VF as usize + 1;

    /// Iterate over the registers from [`DataRegister::V0`] up to and including `last`.
    pub fn up_to(last: DataRegister) -> impl Iterator<Item = DataRegister> {
        (0..=last as u8).map(|i| DataRegister::from(U4::from_u8(i, U8Nibble::Lo)))
    }
}

const_assert_eq!(DataRegister::VF as u8, U4::MAX.into_u8());

impl From<DataRegister> for U4 {
    fn from(reg: DataRegister) -> Self {
        U4::from_u8(reg as u8, U8Nibble::Lo)
    }
}

impl From<U4> for DataRegister {
    fn from(val: U4) -> Self {
        // SAFETY: DataRegister has exactly U4::MAX + 1 variants.
        unsafe { DataRegister::from_unchecked(val.into_u8()) }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn up_to_is_inclusive() {
        let registers: Vec<_> = DataRegister::up_to(DataRegister::V3).collect();
        assert_eq!(
            registers,
            [
                DataRegister::V0,
                DataRegister::V1,
                DataRegister::V2,
                DataRegister::V3
            ]
        );
        assert_eq!(DataRegister::up_to(DataRegister::VF).count(), DataRegister::COUNT);
    }
}
